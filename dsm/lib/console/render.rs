//! Text rendering for menus, listings and reports.
//!
//! Every function returns a `String` so the driver decides where it goes.

use chrono::SecondsFormat;

use crate::{
    cli::AnsiStyles, health::HealthReport, ContainerUsage, Detail, EngineInfo, ManagerMode,
    OperationResult, PrivilegeStatus, ResourceRecord, UnitStatus,
};

use super::MenuNode;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Application name shown in the banner.
pub const APP_NAME: &str = "Docker Service Manager";

/// Banner line shown whenever the console runs on fixtures.
pub const DEMO_BANNER: &str = "DEMO MODE - showing sample data, no changes are made";

/// Prompt shown under every menu.
pub const CHOICE_PROMPT: &str = "Enter your choice: ";

/// Prompt used to hold output on screen.
pub const PAUSE_PROMPT: &str = "Press Enter to continue...";

/// Number of cells in a usage bar.
const BAR_WIDTH: usize = 20;

const BAR_FILLED: char = '#';

const BAR_EMPTY: char = '.';

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// The startup banner.
pub fn banner(mode: ManagerMode) -> String {
    let mut out = format!("{APP_NAME} v{}\n", env!("CARGO_PKG_VERSION")).header();
    if mode == ManagerMode::Simulated {
        out.push('\n');
        out.push_str(&demo_banner());
    }
    out.push('\n');
    out
}

/// The demo banner line.
pub fn demo_banner() -> String {
    format!("*** {DEMO_BANNER} ***").invalid()
}

/// A section heading with an underline of the same width.
pub fn section(title: &str) -> String {
    let rule = "=".repeat(title.chars().count());
    format!("\n{}\n{rule}\n", title.header())
}

/// A menu: its title and one line per option.
pub fn menu(node: &MenuNode) -> String {
    let mut out = section(node.get_title());
    for option in node.get_options() {
        out.push_str(&format!(
            "{}. {}\n",
            option.get_key().to_string().literal(),
            option.get_description()
        ));
    }
    out
}

/// A one-line outcome: the message, styled by success.
pub fn outcome(result: &OperationResult) -> String {
    if result.succeeded() {
        format!("[OK] {}", result.message()).valid()
    } else {
        format!("[FAILED] {}", result.message()).invalid()
    }
}

/// A left-aligned table with a header row and a rule under it.
pub fn table(headers: &[&str], rows: &[Vec<&str>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[&str]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = line(headers).header();
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("{}\n", rule.join("  ")));
    for row in rows {
        out.push_str(&line(row.as_slice()));
    }
    out
}

/// The payload of a successful result. Listings in demo mode carry the demo banner.
pub fn detail(detail: &Detail, mode: ManagerMode) -> String {
    let demo = if mode == ManagerMode::Simulated {
        format!("{}\n", demo_banner())
    } else {
        String::new()
    };

    match detail {
        Detail::Containers(list) => demo + &records(list, "No containers found"),
        Detail::Images(list) => demo + &records(list, "No images found"),
        Detail::Unit(status) => unit_status(status),
        Detail::Logs(text) if text.trim().is_empty() => "(no log output)\n".to_string(),
        Detail::Logs(text) if text.ends_with('\n') => text.clone(),
        Detail::Logs(text) => format!("{text}\n"),
        Detail::Usage(list) => demo + &usage(list),
        Detail::Engine(info) => engine_info(info),
        Detail::Privileges(status) => privileges(status),
    }
}

/// A table of listing records, or `empty` when there are none.
pub fn records<T: ResourceRecord>(records: &[T], empty: &str) -> String {
    if records.is_empty() {
        return format!("{empty}\n");
    }

    let rows: Vec<Vec<&str>> = records.iter().map(ResourceRecord::cells).collect();
    table(T::HEADERS, &rows)
}

/// A numbered list used to pick one record.
pub fn numbered<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    items
        .into_iter()
        .enumerate()
        .map(|(i, (name, status))| format!("{}. {name} ({status})\n", i + 1))
        .collect()
}

/// The state of a systemd unit.
pub fn unit_status(status: &UnitStatus) -> String {
    table(
        &["Property", "Value"],
        &[
            vec!["Unit", status.get_unit().as_str()],
            vec!["Load state", status.get_load_state().as_str()],
            vec!["Active state", status.get_active_state().as_str()],
            vec!["Sub state", status.get_sub_state().as_str()],
            vec!["Unit file state", status.get_unit_file_state().as_str()],
        ],
    )
}

/// Engine version information.
pub fn engine_info(info: &EngineInfo) -> String {
    table(
        &["Property", "Value"],
        &[
            vec!["Client version", info.get_client_version().as_str()],
            vec!["Server version", info.get_server_version().as_str()],
            vec!["API version", info.get_api_version().as_str()],
            vec!["OS", info.get_os().as_str()],
            vec!["Architecture", info.get_arch().as_str()],
        ],
    )
}

/// The privilege check breakdown.
pub fn privileges(status: &PrivilegeStatus) -> String {
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    table(
        &["Property", "Value"],
        &[
            vec!["User", status.get_user().as_str()],
            vec!["Root", yes_no(*status.get_is_root())],
            vec!["In docker group", yes_no(*status.get_in_docker_group())],
        ],
    )
}

/// A horizontal bar for a percentage, clamped to `0..=100`.
pub fn bar(percent: f64) -> String {
    let ratio = if percent.is_finite() {
        percent.clamp(0.0, 100.0) / 100.0
    } else {
        0.0
    };
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;

    let mut out = String::with_capacity(BAR_WIDTH + 2);
    out.push('[');
    out.extend(std::iter::repeat(BAR_FILLED).take(filled));
    out.extend(std::iter::repeat(BAR_EMPTY).take(BAR_WIDTH - filled));
    out.push(']');
    out
}

/// CPU and memory bars for each container.
pub fn usage(usage: &[ContainerUsage]) -> String {
    if usage.is_empty() {
        return "No running containers\n".to_string();
    }

    let width = usage
        .iter()
        .map(|u| u.get_name().chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for u in usage {
        out.push_str(&format!(
            "{:<width$}  CPU {} {:>5.1}%   MEM {} {:>5.1}%  {}\n",
            u.get_name(),
            bar(*u.get_cpu_percent()),
            u.get_cpu_percent(),
            bar(*u.get_memory_percent()),
            u.get_memory_percent(),
            u.get_memory_usage(),
        ));
    }
    out
}

/// A health report: one row per check and an overall verdict.
pub fn health_report(report: &HealthReport) -> String {
    let rows: Vec<Vec<&str>> = report
        .get_checks()
        .iter()
        .map(|check| {
            vec![
                check.get_name().as_str(),
                if *check.get_passed() { "PASS" } else { "FAIL" },
                check.get_message().as_str(),
            ]
        })
        .collect();

    let mut out = format!(
        "Generated at {}\n\n",
        report
            .get_generated_at()
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    out.push_str(&table(&["Check", "Result", "Details"], &rows));
    out.push('\n');

    let verdict = if *report.get_healthy() {
        "Overall status: HEALTHY".valid()
    } else {
        "Overall status: UNHEALTHY".invalid()
    };
    out.push_str(&verdict);
    out.push('\n');
    out
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
