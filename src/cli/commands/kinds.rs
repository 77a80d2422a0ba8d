//! List signal kinds command.

use anyhow::Result;
use kumo_core::SignalKind;

pub async fn run() -> Result<()> {
    println!("Signal Kinds");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for kind in SignalKind::ALL {
        println!("  {:<20} {:<5} {}", kind.as_str(), kind.direction().as_str(), kind.label());
        println!("  ───────────────────────────────────────────────────────");
        println!("  {}", kind.description());
        println!();
    }

    println!("Use these names in [signals] enabled_kinds or a pair's enabled_signals.");

    Ok(())
}
