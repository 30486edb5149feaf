// CLI layer - the operator-facing surface: the predefined test harness and
// the interactive prompt loop.

#[path = "harness.rs"]
pub mod harness;
#[path = "interactive.rs"]
pub mod interactive;

use std::io::{self, Write};

use crate::core::moderation::{ContentSafetyApi, ModerationService};

/// Print a prompt and read one trimmed line from stdin.
/// Returns `None` on EOF so callers can bail out of their loops.
pub fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Fetch and print the configured blocklists with their item counts.
pub async fn show_blocklists<C: ContentSafetyApi>(service: &ModerationService<C>) {
    match service.blocklist_summaries().await {
        Ok(summaries) => {
            println!("\n📋 Available blocklists ({}):", summaries.len());
            for (i, summary) in summaries.iter().enumerate() {
                println!("  {}. {}", i + 1, summary.name);
                println!("     Description: {}", summary.description);
                if let Some(count) = summary.item_count {
                    println!("     Items: {}", count);
                }
                println!();
            }
        }
        Err(err) => println!("❌ Failed to list blocklists: {}", err),
    }
}
