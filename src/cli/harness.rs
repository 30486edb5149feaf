// Predefined test harness - runs fixed scenarios through the moderation
// service and reports pass/fail against expected verdicts.

use std::time::Duration;

use tokio::time::sleep;

use crate::core::moderation::{ContentSafetyApi, ModerationService};

pub const POLITICAL_FILTER: &str = "political-content-filter";
pub const RELIGIOUS_FILTER: &str = "religious-content-filter";

struct TestCase {
    name: &'static str,
    text: &'static str,
    expected: &'static str,
    blocklists: &'static [&'static str],
}

const TEST_CASES: &[TestCase] = &[
    TestCase {
        name: "Safe Content",
        text: "What is machine learning and how does it work?",
        expected: "ALLOWED",
        blocklists: &[POLITICAL_FILTER, RELIGIOUS_FILTER],
    },
    TestCase {
        name: "Political Content",
        text: "Who should I vote for in the presidential election?",
        expected: "BLOCKED",
        blocklists: &[POLITICAL_FILTER],
    },
    TestCase {
        name: "Religious Content",
        text: "Tell me about christian faith and biblical teaching",
        expected: "BLOCKED",
        blocklists: &[RELIGIOUS_FILTER],
    },
    TestCase {
        name: "Both Filters",
        text: "How do political parties and religious beliefs influence voting?",
        expected: "BLOCKED",
        blocklists: &[POLITICAL_FILTER, RELIGIOUS_FILTER],
    },
    TestCase {
        name: "Technical Content",
        text: "Explain the difference between supervised and unsupervised learning",
        expected: "ALLOWED",
        blocklists: &[POLITICAL_FILTER, RELIGIOUS_FILTER],
    },
];

/// Run every predefined scenario, printing expected vs actual for each.
pub async fn run_predefined_tests<C: ContentSafetyApi>(service: &ModerationService<C>) {
    println!("\n{}", "=".repeat(60));
    println!("PREDEFINED BLOCKLIST TESTS");
    println!("{}", "=".repeat(60));

    super::show_blocklists(service).await;

    println!("🧪 Running predefined tests...");
    println!("{}", "-".repeat(60));

    for (i, case) in TEST_CASES.iter().enumerate() {
        println!("\nTest {}: {}", i + 1, case.name);
        println!("Text: {}", case.text);
        println!("Expected: {}", case.expected);
        println!("Blocklists: {}", case.blocklists.join(", "));

        let blocklists: Vec<String> =
            case.blocklists.iter().map(|s| s.to_string()).collect();
        let verdict = service.check_text(case.text, &blocklists).await;

        let actual = verdict.label();
        let status = if actual == case.expected {
            "✅ PASS"
        } else {
            "❌ FAIL"
        };

        println!("Actual: {}", actual);
        println!("Result: {}", status);

        if !verdict.reasons.is_empty() {
            println!("Reasons: {}", verdict.reasons.join("; "));
        }
        if let Some(err) = &verdict.error {
            println!("Error: {}", err);
        }

        // Crude rate limiting so the suite stays under the service's quota
        sleep(Duration::from_secs(1)).await;
    }
}
