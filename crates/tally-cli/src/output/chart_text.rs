use std::io;

use serde_json::Value;
use tally_client::model::{Category, Money};

use super::format::money_field;

const BAR_WIDTH: usize = 30;
const BAR_CHAR: char = '#';
const EMPTY_CHART: &str = "No expense data to display";

pub fn render_chart(data: &Value) -> io::Result<String> {
    let totals = data.get("totals").unwrap_or(&Value::Null);
    let bars = Category::ALL
        .into_iter()
        .map(|category| {
            (
                format!(
                    "{}: {}",
                    category.label(),
                    money_field(totals, category.as_str()).format_currency()
                ),
                money_field(totals, category.as_str()),
            )
        })
        .filter(|(_, total)| total.is_positive())
        .collect::<Vec<_>>();

    let mut lines = vec!["Spending by category".to_string(), String::new()];
    if bars.is_empty() {
        lines.push(format!("  {EMPTY_CHART}"));
        return Ok(lines.join("\n"));
    }

    let max_total = bars
        .iter()
        .map(|(_, total)| *total)
        .max()
        .unwrap_or(Money::ZERO);
    let label_width = bars.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, total) in &bars {
        let bar = BAR_CHAR.to_string().repeat(bar_length(*total, max_total));
        lines.push(format!("  {label:<label_width$}  {bar}"));
    }

    Ok(lines.join("\n"))
}

/// Bar length proportional to `total / max`; any spending gets at least one cell.
fn bar_length(total: Money, max_total: Money) -> usize {
    if !max_total.is_positive() || !total.is_positive() {
        return 0;
    }
    let scaled = (total.to_units() / max_total.to_units() * BAR_WIDTH as f64).round();
    (scaled as usize).clamp(1, BAR_WIDTH)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tally_client::model::Money;

    use super::{BAR_WIDTH, bar_length, render_chart};

    #[test]
    fn renders_capitalized_labels_for_non_zero_categories() {
        let rendered = render_chart(&json!({
            "totals": {
                "food": 25.0,
                "transport": 10.0,
                "entertainment": 0.0,
                "utilities": 0.0,
                "shopping": 0.0,
                "other": 0.0
            },
            "max_total": 25.0,
            "has_expenses": true
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Food: $25.00"));
            assert!(text.contains("Transport: $10.00"));
            assert!(!text.contains("Shopping"));

            let food_line = text.lines().find(|line| line.contains("Food:"));
            let transport_line = text.lines().find(|line| line.contains("Transport:"));
            assert_eq!(
                food_line.map(|line| line.matches('#').count()),
                Some(BAR_WIDTH)
            );
            assert_eq!(
                transport_line.map(|line| line.matches('#').count()),
                Some(12)
            );
        }
    }

    #[test]
    fn empty_totals_render_empty_state() {
        let rendered = render_chart(&json!({
            "totals": {"food": 0.0, "other": 0.0},
            "max_total": 0.0,
            "has_expenses": false
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("No expense data to display"));
            assert!(!text.contains('#'));
        }
    }

    #[test]
    fn tiny_totals_still_get_a_visible_bar() {
        let max = Money::from_minor_units(1_000_000);
        assert_eq!(bar_length(Money::from_minor_units(1), max), 1);
        assert_eq!(bar_length(max, max), BAR_WIDTH);
        assert_eq!(bar_length(Money::ZERO, max), 0);
        assert_eq!(bar_length(Money::from_minor_units(5), Money::ZERO), 0);
    }
}
