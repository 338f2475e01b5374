//! Check command implementation
//!
//! Reports how the process-wide random source is set up.

use randvar_core::rng::static_random;
use tracing::info;

use crate::Result;

/// Run the check command
pub fn run() -> Result<()> {
    info!("Checking random source...");

    let quality = if static_random::is_high_quality() {
        "high"
    } else {
        "fast"
    };
    let fuse = static_random::rejection_limit()
        .map_or_else(|| "unlimited".to_string(), |n| n.to_string());

    println!("Random source");
    println!("  Quality:            {}", quality);
    println!("  Rejection attempts: {}", fuse);
    println!("  Split depth:        {}", static_random::split_depth());
    println!("  Default depth:      {}", static_random::default_split_depth());
    println!("  Sample draw:        {:.6}", static_random::next_double());

    info!("Check complete");
    Ok(())
}
