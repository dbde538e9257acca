//! graphfuzz — GraphQL argument fuzzer

use clap::{CommandFactory, Parser};
use graphfuzz::{run, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("graphfuzz=debug")
    } else {
        EnvFilter::new("graphfuzz=warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Missing flags are not a failure: print usage and do nothing.
    let config = match cli.config() {
        Ok(config) => config,
        Err(e) => {
            println!("{e}");
            println!("{}", Cli::command().render_help());
            return;
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = run(&config, &mut stdout).await {
        println!("{e}");
        std::process::exit(1);
    }
}
