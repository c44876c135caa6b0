use crate::cli::commands::RunContext;
use crate::cli::parser::Commands;
use crate::core::calculator::period::{Direction, ViewType, navigate};
use crate::core::calculator::stats::MonthlyStats;
use crate::core::report::{PeriodReport, build_report};
use crate::errors::AppResult;
use crate::models::session_kind::SessionKind;
use crate::models::work_mode::{AttendanceStatus, BreakStatus};
use crate::utils::colors::{GREEN, GREY, RED, RESET, YELLOW, colorize_optional};
use crate::utils::formatting::{describe_work_mode, duration_hm, hours_1dp, pad_right, percent_1dp};

pub fn handle(cmd: &Commands, ctx: &RunContext) -> AppResult<()> {
    match cmd {
        Commands::Report {
            view,
            date,
            prev,
            next,
            overtime,
            json,
        } => {
            let view: ViewType = view.parse()?;
            let mut anchor = ctx.anchor_date(date)?;
            if *prev {
                anchor = navigate(view, anchor, Direction::Prev, ctx.settings.month_step);
            } else if *next {
                anchor = navigate(view, anchor, Direction::Next, ctx.settings.month_step);
            }

            let store = ctx.open_store()?;
            let user = ctx.current_user(&store)?;
            let kind = SessionKind::from_overtime_flag(*overtime);
            let report = build_report(&store, &ctx.settings, kind, user.id, view, anchor, ctx.now)?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&user.full_name, &report);
            }
        }

        Commands::Stats { date, overtime } => {
            let anchor = ctx.anchor_date(date)?;
            let store = ctx.open_store()?;
            let user = ctx.current_user(&store)?;
            let kind = SessionKind::from_overtime_flag(*overtime);
            let report = build_report(
                &store,
                &ctx.settings,
                kind,
                user.id,
                ViewType::Monthly,
                anchor,
                ctx.now,
            )?;

            println!(
                "📊 {} · {} · {}\n",
                user.full_name,
                kind.label(),
                report.period.start.format("%B %Y")
            );
            print_stats(&report.stats);
        }

        _ => {}
    }

    Ok(())
}

fn status_cell(status: AttendanceStatus) -> String {
    match status {
        AttendanceStatus::Present => format!("{GREEN}{}{RESET}", pad_right("present", 8)),
        AttendanceStatus::Late => format!("{YELLOW}{}{RESET}", pad_right("late", 8)),
    }
}

fn print_report(name: &str, report: &PeriodReport) {
    println!(
        "📅 {} · {} · {} view · {}\n",
        name, report.kind, report.view, report.period
    );

    if report.rows.is_empty() {
        println!("{GREY}No records for this period.{RESET}\n");
    } else {
        println!(
            "{}  {}  {}  {}  {}  {}",
            pad_right("CHECK-IN", 19),
            pad_right("CHECK-OUT", 19),
            pad_right("MODE", 8),
            pad_right("STATUS", 8),
            pad_right("WORKED", 8),
            "BREAKS"
        );

        for row in &report.rows {
            let s = &row.session;
            let out = s
                .check_out
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "--:--".to_string());
            let (mode, color) = describe_work_mode(s.work_mode);

            let mut breaks = format!(
                "{} ({})",
                row.break_summary.total_display(),
                row.break_summary.count
            );
            if let Some(since) = row.break_summary.in_progress_since {
                breaks.push_str(&format!(" {YELLOW}on break since {}{RESET}", since.format("%H:%M")));
            }

            println!(
                "{}  {}  {}{}{}  {}  {}  {}",
                pad_right(&s.check_in_str(), 19),
                colorize_optional(&pad_right(&out, 19)),
                color,
                pad_right(mode, 8),
                RESET,
                status_cell(s.status),
                pad_right(&duration_hm(row.duration_minutes), 8),
                breaks
            );

            for b in &row.breaks {
                let end = b
                    .end_time
                    .map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_else(|| "--:--".to_string());
                let late = match b.status {
                    BreakStatus::Late => format!(" {RED}late{RESET}"),
                    BreakStatus::OnTime => String::new(),
                };
                println!(
                    "    ☕ {} → {}{}",
                    b.start_time.format("%H:%M"),
                    colorize_optional(&end),
                    late
                );
            }
        }
        println!();
    }

    print_stats(&report.stats);
}

fn print_stats(stats: &MonthlyStats) {
    let line = |label: &str, value: String| println!("   {} {}", pad_right(label, 22), value);

    line("Expected working days:", stats.expected_working_days.to_string());
    line("Days attended:", stats.total_working_days.to_string());
    line("Present:", format!("{GREEN}{}{RESET}", stats.present_days));
    line("Late:", format!("{YELLOW}{}{RESET}", stats.late_days));
    line("On site:", stats.on_site_days.to_string());
    line("Remote:", stats.remote_days.to_string());
    line("Attendance rate:", percent_1dp(stats.attendance_rate()));
    line("Average daily hours:", hours_1dp(stats.average_work_hours));
    line("Total hours:", hours_1dp(stats.total_hours));
    line("Expected hours:", hours_1dp(stats.expected_hours));
    println!();
}
