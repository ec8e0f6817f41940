use clap::Parser;

use hindsight::adapter::inbound::cli::command::Cli;
use hindsight::adapter::inbound::cli::dispatch::dispatch;
use hindsight::adapter::inbound::cli::operator;
use hindsight::adapter::inbound::cli::output::{self, OutputConfig};
use hindsight::infrastructure::operator::entry::Operator;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    let _ = operator::install(Box::new(Operator));

    if let Err(e) = dispatch(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
