pub mod venues;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "court-scout")]
#[command(about = "Finds bookable sports-court slots across several club availability feeds")]
pub struct CliConfig {
    /// Path to the TOML file holding the feed parameters and venue list.
    #[arg(long, default_value = "venues.toml")]
    pub config: String,

    #[arg(long, default_value = "127.0.0.1:3001")]
    pub bind: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
