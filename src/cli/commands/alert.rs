use crate::cli::commands::RunContext;
use crate::cli::parser::{AlertAction, Commands};
use crate::core::alerts::AlertBoard;
use crate::errors::AppResult;
use crate::notifier;
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREEN, GREY, RESET};
use crate::utils::time::format_ts;

pub fn handle(cmd: &Commands, ctx: &RunContext) -> AppResult<()> {
    let Commands::Alert { action } = cmd else {
        return Ok(());
    };

    let store = ctx.open_store()?;
    let notifier = notifier::from_config(&ctx.cfg.notifier)?;
    let board = AlertBoard::new(&store, notifier.as_ref(), &ctx.settings.retry)
        .with_subject(&ctx.cfg.notifier.subject);

    match action {
        AlertAction::Add { text } => {
            let alert = board.create(text, ctx.now)?;
            success(format!("Alert {} posted.", alert.id));
        }
        AlertAction::Edit { id, text } => {
            board.edit(*id, text)?;
            success(format!("Alert {} updated.", id));
        }
        AlertAction::Del { id } => {
            board.delete(*id)?;
            success(format!("Alert {} deleted.", id));
        }
        AlertAction::Select { id } => {
            board.select(*id)?;
            success(format!("Alert {} is now featured.", id));
        }
        AlertAction::List => {
            let alerts = board.list()?;
            if alerts.is_empty() {
                info("No alerts.");
            }
            for a in alerts {
                let mark = if a.selected {
                    format!("{GREEN}★{RESET}")
                } else {
                    " ".to_string()
                };
                println!(
                    "{} {:>4}  {GREY}{}{RESET}  {}",
                    mark,
                    a.id,
                    format_ts(&a.created_at),
                    a.description
                );
            }
        }
    }

    Ok(())
}
