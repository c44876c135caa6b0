use crate::cli::commands::RunContext;
use crate::cli::parser::Commands;
use crate::core::dashboard::{employee_dashboard, list_employees};
use crate::errors::{AppError, AppResult};
use crate::models::session_kind::SessionKind;
use crate::models::user::Role;
use crate::ui::messages::{header, info};
use crate::utils::colors::{GREY, RESET};
use crate::utils::formatting::{duration_hm, hours_1dp, pad_right, percent_1dp};
use crate::utils::time::format_ts;

pub fn handle(cmd: &Commands, ctx: &RunContext) -> AppResult<()> {
    let Commands::Dashboard { employee, overtime } = cmd else {
        return Ok(());
    };

    let store = ctx.open_store()?;
    let admin = ctx.current_user(&store)?;
    if admin.role != Role::Admin {
        return Err(AppError::Validation(
            "The dashboard is only available to administrators".into(),
        ));
    }

    let Some(employee_id) = employee else {
        let users = list_employees(&store, &ctx.settings)?;
        header("Employees");
        if users.is_empty() {
            info("No employees registered.");
        }
        for u in users {
            println!("{:>4}  {}", u.id, u.full_name);
        }
        return Ok(());
    };

    let kind = SessionKind::from_overtime_flag(*overtime);
    let dash = employee_dashboard(&store, &ctx.settings, kind, *employee_id, ctx.now)?;

    header(format!("{} · {}", dash.user.full_name, kind.label()));

    match &dash.today {
        None => println!("Today: {GREY}no check-in{RESET}"),
        Some(row) => {
            let s = &row.session;
            println!("Today:");
            println!("   Check-in:  {}", format_ts(&s.check_in));
            println!(
                "   Check-out: {}",
                s.check_out
                    .map(|t| format_ts(&t))
                    .unwrap_or_else(|| format!("{GREY}still working{RESET}"))
            );
            println!("   Mode:      {}", s.work_mode.label());
            println!("   Status:    {}", s.status.to_db_str());
            println!("   Duration:  {}", duration_hm(row.duration_minutes));
            println!(
                "   Breaks:    {} ({})",
                row.break_summary.total_display(),
                row.break_summary.count
            );
            for b in &row.breaks {
                println!(
                    "      {} → {}",
                    b.start_time.format("%H:%M"),
                    b.end_time
                        .map(|t| t.format("%H:%M").to_string())
                        .unwrap_or_else(|| "--:--".into())
                );
            }
        }
    }

    let st = &dash.stats;
    println!("\nThis month ({}):", dash.month);
    for (label, value) in [
        ("Expected working days", st.expected_working_days.to_string()),
        ("Days attended", st.total_working_days.to_string()),
        ("Present", st.present_days.to_string()),
        ("Late", st.late_days.to_string()),
        ("On site", st.on_site_days.to_string()),
        ("Remote", st.remote_days.to_string()),
        ("Attendance rate", percent_1dp(st.attendance_rate())),
        ("Average daily hours", hours_1dp(st.average_work_hours)),
        ("Total hours", hours_1dp(st.total_hours)),
        ("Expected hours", hours_1dp(st.expected_hours)),
    ] {
        println!("   {} {}", pad_right(label, 22), value);
    }

    Ok(())
}
