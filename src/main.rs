use clap::Parser;
use std::process;
use synop_resolver::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(command) => result,
            () = wait_for_ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(synop_resolver::Error::processing_interrupted(
                    "Resolution interrupted by user",
                ))
            }
        }
    });

    match result {
        Ok(_stats) => {
            // Success - stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Resolve once CTRL+C is pressed
///
/// If the signal handler cannot be installed this never resolves, so the
/// command runs to completion.
async fn wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("Failed to listen for CTRL+C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("synop-resolve - BUFR to SYNOP field resolution");
    println!("==============================================");
    println!();
    println!("Resolve decoded BUFR observation records into SYNOP report fields.");
    println!();
    println!("USAGE:");
    println!("    synop-resolve <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    resolve     Resolve observation records from a CSV file");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Resolve every subset of a decoder dump:");
    println!("    synop-resolve resolve --input records.csv");
    println!();
    println!("    # Keep insignificant weather codes and show debug logging:");
    println!("    synop-resolve resolve -i records.csv --keep-insignificant-weather -vv");
    println!();
    println!("For detailed help, use:");
    println!("    synop-resolve resolve --help");
}
