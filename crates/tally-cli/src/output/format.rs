use std::cmp;

use serde_json::Value;
use tally_client::model::Money;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
    /// Cells in this column are cut short when the table is wider than the
    /// terminal.
    pub shrinks: bool,
}

const INDENT: &str = "  ";
const COLUMN_GAP: &str = "  ";
const ELLIPSIS: char = '…';

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(120);
    cmp::max(from_env, 40)
}

/// Reads a JSON amount back into [`Money`]; missing or malformed values read
/// as zero.
pub fn money_field(value: &Value, key: &str) -> Money {
    value
        .get(key)
        .and_then(Value::as_f64)
        .and_then(Money::from_units)
        .unwrap_or(Money::ZERO)
}

pub fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

/// `+$12.50` for income, `-$12.50` for expenses.
pub fn signed_amount(amount: Money, is_income: bool) -> String {
    let sign = if is_income { '+' } else { '-' };
    format!("{sign}{}", amount.format_currency())
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// One header line plus one line per row, each column as wide as its widest
/// cell. The shrinking column gives up width until the table fits
/// `max_width`, but never below its header.
pub fn render_table(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
) -> Vec<String> {
    let mut widths = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .fold(column.name.chars().count(), cmp::max)
        })
        .collect::<Vec<usize>>();

    let used = INDENT.len()
        + widths.iter().sum::<usize>()
        + COLUMN_GAP.len() * widths.len().saturating_sub(1);
    let excess = used.saturating_sub(max_width);
    if let Some(index) = columns.iter().position(|column| column.shrinks)
        && excess > 0
    {
        let floor = columns[index].name.chars().count();
        widths[index] = widths[index].saturating_sub(excess).max(floor);
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<_>>();
    std::iter::once(&header)
        .chain(rows)
        .map(|row| format_row(columns, row, &widths))
        .collect()
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (column, &width))| {
            let value = fit_cell(cells.get(index).map(String::as_str).unwrap_or(""), width);
            match column.align {
                Align::Left => format!("{value:<width$}"),
                Align::Right => format!("{value:>width$}"),
            }
        })
        .collect::<Vec<_>>();

    format!("{INDENT}{}", pieces.join(COLUMN_GAP))
}

fn fit_cell(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut cut = value.chars().take(width.saturating_sub(1)).collect::<String>();
    cut.push(ELLIPSIS);
    cut
}
