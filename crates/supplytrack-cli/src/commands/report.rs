//! Deviation report command
//!
//! Usage: supplytrack report [--json]

use clap::Args;
use supplytrack_store::OrderStore;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Execute report command
pub fn execute(args: ReportArgs, store: &OrderStore) -> Result<(), Box<dyn std::error::Error>> {
    let report = store.deviation_report()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_empty() {
        println!("No parts recorded");
        return Ok(());
    }

    for group in report {
        println!(
            "{} (max deviation {:.2})",
            group.order_name,
            group.max_deviation()
        );
        for part in group.parts {
            println!("  {}\t{:.2}", part.part_name, part.deviation);
        }
    }
    Ok(())
}
