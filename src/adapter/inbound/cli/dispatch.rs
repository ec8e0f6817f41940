//! Command dispatch.

use super::command::{Cli, Commands};
use super::operator::operator;
use super::{export, observe, record, run, session, stats};
use crate::error::Result;

/// Run the parsed command line.
///
/// # Errors
///
/// Returns the first error raised by the selected command.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let request = session::resolve(&cli)?;
    let snapshot = operator()?.prepare_session(&request)?;

    match cli.command {
        Commands::Run(args) => run::execute(&request, &snapshot, &args).await,
        Commands::Record(args) => record::execute_record(&request, args),
        Commands::Observe(args) => observe::execute_observe(&request, &args),
        Commands::Annotate(args) => record::execute_annotate(&request, &args),
        Commands::Exit(args) => record::execute_exit(&request, args),
        Commands::Due(args) => observe::execute_due(&request, &args),
        Commands::Stats(command) => stats::handler::execute(&request, &command),
        Commands::Export(args) => export::execute_export(&request, &args),
        Commands::Prune(args) => export::execute_prune(&request, &args),
    }
}
