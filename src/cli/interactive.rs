// Interactive testing loop - lets an operator pick blocklist combinations
// and submit free text until they quit.

use std::io;

use crate::cli::harness::{self, POLITICAL_FILTER, RELIGIOUS_FILTER};
use crate::cli::{prompt, show_blocklists};
use crate::core::moderation::{ContentSafetyApi, ModerationService};

const EXIT_KEYWORDS: &[&str] = &["quit", "exit", "q"];

/// Map a menu choice to the blocklists to test against.
/// Anything unrecognized falls back to both filters.
fn blocklists_for_choice(choice: &str) -> Vec<String> {
    match choice {
        "1" => vec![POLITICAL_FILTER.to_string()],
        "2" => vec![RELIGIOUS_FILTER.to_string()],
        _ => vec![POLITICAL_FILTER.to_string(), RELIGIOUS_FILTER.to_string()],
    }
}

pub async fn run<C: ContentSafetyApi>(service: &ModerationService<C>) -> io::Result<()> {
    println!("\n{}", "=".repeat(60));
    println!("INTERACTIVE BLOCKLIST TESTING");
    println!("{}", "=".repeat(60));

    show_blocklists(service).await;

    println!("\nAvailable test options:");
    println!("1. {} only", POLITICAL_FILTER);
    println!("2. {} only", RELIGIOUS_FILTER);
    println!("3. Both filters");
    println!("4. Run predefined tests");

    loop {
        println!("\n{}", "-".repeat(40));
        let Some(choice) = prompt("Select option (1-4) or 'quit' to exit: ")? else {
            break;
        };

        if EXIT_KEYWORDS.contains(&choice.to_lowercase().as_str()) {
            println!("👋 Goodbye!");
            break;
        }

        if choice == "4" {
            harness::run_predefined_tests(service).await;
            continue;
        }

        let Some(text) = prompt("Enter text to test: ")? else {
            break;
        };
        if text.is_empty() {
            continue;
        }

        if !matches!(choice.as_str(), "1" | "2" | "3") {
            println!("Invalid choice, using both blocklists");
        }
        let blocklists = blocklists_for_choice(&choice);

        println!("\n🔍 Testing against: {}", blocklists.join(", "));

        let verdict = service.check_text(&text, &blocklists).await;

        println!("\n{}", if verdict.blocked { "🚫 BLOCKED" } else { "✅ ALLOWED" });

        if !verdict.reasons.is_empty() {
            println!("Reasons: {}", verdict.reasons.join("; "));
        }
        if let Some(err) = &verdict.error {
            println!("Error: {}", err);
        }
        // Show the full result for debugging
        if let Some(raw) = &verdict.raw {
            println!("Full API Response: {}", raw);
        }
    }

    Ok(())
}
