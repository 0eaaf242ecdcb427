// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap and validate them into a Config
// 2. Set up logging (stderr, controlled by -v and RUST_LOG)
// 3. Run the driver against the real GitHub client
// 4. Print the outcome, or the error, and exit (0 = success, 1 = any error)
//
// This is the only file that prints errors or calls std::process::exit().
// =============================================================================

// Module declarations - tells Rust about our other source files
mod app; // src/app.rs - the driver
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - validated settings
mod error; // src/error.rs - typed errors
mod github; // src/github/ - GitHub API, language index, blob decoding
mod output; // src/output/ - file writer and pager

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use app::Outcome;
use cli::Cli;
use config::Config;
use error::AppError;

// The #[tokio::main] attribute transforms our async main into a real main function.
// Requests are still made one after another; the runtime just drives reqwest.
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            if matches!(e, AppError::Usage(_)) {
                eprintln!("{}", Cli::command().render_help());
            }
            eprintln!("{}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<(), AppError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help is not an error; everything else clap rejects exits with 1
            let code = match e.kind() {
                clap::error::ErrorKind::DisplayHelp => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let config = Config::try_from(cli)?;
    init_logging(config.verbose);

    let pager = output::pager_from_env();

    match app::execute(&config, pager.as_ref()).await? {
        Outcome::Version(line) => println!("{}", line),
        Outcome::Listed { languages } => {
            tracing::debug!(languages, "listed languages");
        }
        Outcome::Written(path) => {
            println!("file successfully written to {}", path.display());
        }
    }

    Ok(())
}

// Logs go to stderr so stdout only carries the list / success line.
// RUST_LOG, when set, takes precedence over -v.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gitignore_fetch={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
