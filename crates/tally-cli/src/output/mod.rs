mod chart_text;
mod error_text;
mod format;
mod json;
mod ledger_text;
mod mode;
mod summary_text;

use std::io;

use tally_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "add" => ledger_text::render_add(&success.data),
        "remove" => ledger_text::render_remove(&success.data),
        "list" => ledger_text::render_list(&success.data),
        "summary" => summary_text::render_summary(&success.data),
        "chart" => chart_text::render_chart(&success.data),
        "report" => render_report(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}

fn render_report(data: &serde_json::Value) -> io::Result<String> {
    let sections = [
        ledger_text::render_list(&data["transactions"])?,
        summary_text::render_summary(&data["summary"])?,
        chart_text::render_chart(&data["chart"])?,
    ];
    Ok(sections.join("\n\n"))
}
