use crate::cli::commands::RunContext;
use crate::cli::parser::Commands;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, ctx: &RunContext) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let store = ctx.open_store()?;
        LogLogic::print_log(store.conn())?;
    }

    Ok(())
}
