//! checkin / checkout / break / status

use crate::cli::commands::RunContext;
use crate::cli::parser::{BreakAction, Commands};
use crate::core::attendance::AttendanceController;
use crate::core::breaks::BreakController;
use crate::core::geo::{FixedLocation, GeoError};
use crate::core::session::{SessionState, reconcile};
use crate::errors::AppResult;
use crate::models::session_kind::SessionKind;
use crate::store::{RecordStore, SqliteStore};
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{GREY, RESET, YELLOW};
use crate::utils::formatting::{describe_work_mode, duration_hm};
use crate::utils::time::format_ts;

/// Fresh state for the acting user. A failed lookup aborts the command so
/// nothing is written on top of an unknown state.
fn current_state(ctx: &RunContext, store: &SqliteStore, kind: SessionKind) -> AppResult<SessionState> {
    let user = ctx.current_user(store)?;
    let r = reconcile(store, &ctx.settings.retry, kind, user.id, ctx.now);
    match r.error {
        Some(e) => Err(e),
        None => Ok(r.state),
    }
}

pub fn handle(cmd: &Commands, ctx: &RunContext) -> AppResult<()> {
    let store = ctx.open_store()?;

    match cmd {
        Commands::Checkin {
            lat,
            lon,
            deny_location,
            overtime,
        } => {
            let kind = SessionKind::from_overtime_flag(*overtime);
            let state = current_state(ctx, &store, kind)?;

            let locator = match (lat, lon) {
                _ if *deny_location => FixedLocation::failing(GeoError::Denied),
                (Some(lat), Some(lon)) => FixedLocation::at(*lat, *lon),
                _ => FixedLocation::failing(GeoError::Unsupported),
            };

            let next = AttendanceController::new(&store, &ctx.settings, kind)
                .check_in(&state, &locator, ctx.now)?;

            if let Some(open) = &next.session {
                let (label, color) = describe_work_mode(open.work_mode);
                success(format!(
                    "Checked in ({}) at {} as {}{}{}",
                    kind.label(),
                    format_ts(&open.check_in),
                    color,
                    label,
                    RESET
                ));
            }
        }

        Commands::Checkout { overtime } => {
            let kind = SessionKind::from_overtime_flag(*overtime);
            let state = current_state(ctx, &store, kind)?;
            let worked = state.elapsed_minutes(ctx.now);

            AttendanceController::new(&store, &ctx.settings, kind).check_out(&state, ctx.now)?;

            success(format!(
                "Checked out ({}) at {} after {}",
                kind.label(),
                format_ts(&ctx.now),
                duration_hm(worked)
            ));
        }

        Commands::Break { action, overtime } => {
            let kind = SessionKind::from_overtime_flag(*overtime);
            let state = current_state(ctx, &store, kind)?;
            let breaks = BreakController::new(&store, &ctx.settings, kind);

            let next = match action {
                BreakAction::Toggle => breaks.toggle(&state, ctx.now)?,
                BreakAction::Start => breaks.start(&state, ctx.now)?,
                BreakAction::End => breaks.end(&state, ctx.now)?,
            };

            if next.is_on_break() {
                success(format!("Break started at {}", format_ts(&ctx.now)));
            } else {
                success(format!("Break ended at {}", format_ts(&ctx.now)));
                if let Some(open) = &next.session {
                    let summary = breaks.summary(open.id)?;
                    info(format!(
                        "Total break time: {} ({} breaks)",
                        summary.total_display(),
                        summary.count
                    ));
                }
            }
        }

        Commands::Status { overtime } => {
            let kind = SessionKind::from_overtime_flag(*overtime);
            let user = ctx.current_user(&store)?;
            let r = reconcile(&store, &ctx.settings.retry, kind, user.id, ctx.now);
            if let Some(e) = &r.error {
                warning(format!("Could not read the current session: {}", e));
            }
            print_status(&store, ctx, &user.full_name, &r.state)?;
        }

        _ => {}
    }

    Ok(())
}

fn print_status(
    store: &dyn RecordStore,
    ctx: &RunContext,
    name: &str,
    state: &SessionState,
) -> AppResult<()> {
    println!("👤 {} ({})", name, state.kind.label());

    let Some(open) = &state.session else {
        println!("   {}Checked out{}", GREY, RESET);
        return Ok(());
    };

    let (label, color) = describe_work_mode(open.work_mode);
    println!(
        "   Checked in since {} as {}{}{}",
        format_ts(&open.check_in),
        color,
        label,
        RESET
    );
    println!("   Elapsed: {}", duration_hm(state.elapsed_minutes(ctx.now)));

    let summary = BreakController::new(store, &ctx.settings, state.kind).summary(open.id)?;
    println!(
        "   Breaks: {} ({} taken)",
        summary.total_display(),
        summary.count
    );
    if let Some(b) = &state.open_break {
        println!(
            "   {}On break since {}{}",
            YELLOW,
            format_ts(&b.start_time),
            RESET
        );
    }
    Ok(())
}
