//! Command implementations for the SYNOP resolver CLI
//!
//! Each command is implemented in its own module; shared setup lives in
//! [`shared`].

pub mod resolve;
pub mod shared;

use crate::Result;
use crate::app::services::resolver::ResolutionStats;
use crate::cli::args::Commands;

/// Main command runner
///
/// Dispatches to the subcommand handler and returns the combined resolution
/// statistics of everything it processed.
pub async fn run(command: Commands) -> Result<ResolutionStats> {
    match command {
        Commands::Resolve(resolve_args) => resolve::run_resolve(resolve_args).await,
    }
}
