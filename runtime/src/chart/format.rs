//! Value formatting for ticks and tooltips.

use serde::{Deserialize, Serialize};

/// How the values of a series or axis are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// `$` followed by a thousands-grouped number.
    Currency,
    /// Whole numbers only; ticks step by 1.
    Count,
    /// Number followed by `%`.
    Percent,
    Plain,
}

impl ValueFormat {
    /// Label for an axis tick, or `None` when the tick should not be drawn
    /// (fractional ticks on a count axis).
    pub fn tick(&self, value: f64) -> Option<String> {
        match self {
            Self::Currency => Some(format_currency(value)),
            Self::Count => format_whole(value),
            Self::Percent => Some(format!("{}%", group_thousands(value))),
            Self::Plain => Some(format_plain(value)),
        }
    }

    /// Tick step size implied by the format.
    pub fn step_size(&self) -> Option<f64> {
        match self {
            Self::Count => Some(1.0),
            _ => None,
        }
    }
}

/// How a tooltip line for one data point is phrased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum TooltipRule {
    /// The value rendered with the series format.
    Value,
    /// The raw value followed by a unit, e.g. `3 orders`.
    Unit { unit: String },
    /// `<label>: <value> <unit> (<pct>%)`, percentage of `total`.
    ShareOfTotal { total: f64, unit: String },
}

impl TooltipRule {
    pub fn unit(unit: &str) -> Self {
        Self::Unit {
            unit: unit.to_string(),
        }
    }

    pub fn render(&self, format: ValueFormat, label: &str, value: f64) -> String {
        match self {
            Self::Value => match format {
                ValueFormat::Currency => format_currency(value),
                ValueFormat::Percent => format!("{}%", format_plain(value)),
                ValueFormat::Count | ValueFormat::Plain => format_plain(value),
            },
            Self::Unit { unit } => format!("{} {unit}", format_plain(value)),
            Self::ShareOfTotal { total, unit } => format!(
                "{label}: {} {unit} ({})",
                format_plain(value),
                share_percent(value, *total)
            ),
        }
    }

    /// Label drawn on the point itself: `<n> (<pct>%)` for shares of a
    /// total, the plain value otherwise.
    pub fn point_label(&self, value: f64) -> String {
        match self {
            Self::ShareOfTotal { total, .. } => {
                format!("{value:.0} ({})", share_percent(value, *total))
            }
            Self::Value | Self::Unit { .. } => format_plain(value),
        }
    }
}

/// `$` plus the thousands-grouped value, e.g. `$1,234.5`.
pub fn format_currency(value: f64) -> String {
    format!("${}", group_thousands(value))
}

/// Whole-number label, `None` for fractional values.
pub fn format_whole(value: f64) -> Option<String> {
    if value.fract() != 0.0 || !value.is_finite() {
        return None;
    }
    if value.abs() < 1e15 {
        Some(format!("{}", value as i64))
    } else {
        Some(format!("{value}"))
    }
}

/// Shortest display of a number: integers without a trailing `.0`.
pub fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Percentage of `total` with two decimals. A zero total reads as 0%.
pub fn share_percent(value: f64, total: f64) -> String {
    if total == 0.0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", value / total * 100.0)
}

/// Group the integer part in threes with `,` and keep at most three
/// fraction digits, trailing zeros removed.
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*d as char);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(100.0), "100");
        assert_eq!(group_thousands(1234.0), "1,234");
        assert_eq!(group_thousands(1234567.891), "1,234,567.891");
        assert_eq!(group_thousands(1000.5), "1,000.5");
        assert_eq!(group_thousands(-2500.0), "-2,500");
        assert_eq!(group_thousands(0.12345), "0.123");
        assert_eq!(group_thousands(-0.0001), "0");
    }

    #[test]
    fn test_currency_ticks() {
        assert_eq!(ValueFormat::Currency.tick(100.0).unwrap(), "$100");
        assert_eq!(ValueFormat::Currency.tick(200.0).unwrap(), "$200");
        assert_eq!(ValueFormat::Currency.tick(12500.0).unwrap(), "$12,500");
    }

    #[test]
    fn test_count_ticks_skip_fractions() {
        assert_eq!(ValueFormat::Count.tick(3.0).unwrap(), "3");
        assert_eq!(ValueFormat::Count.tick(5.0).unwrap(), "5");
        assert!(ValueFormat::Count.tick(3.5).is_none());
        assert_eq!(ValueFormat::Count.tick(1e20).unwrap(), "100000000000000000000");
        assert_eq!(format_whole(-4.0).unwrap(), "-4");
        assert_eq!(ValueFormat::Count.step_size(), Some(1.0));
        assert_eq!(ValueFormat::Currency.step_size(), None);
    }

    #[test]
    fn test_tooltip_rules() {
        let share = TooltipRule::ShareOfTotal {
            total: 10.0,
            unit: "orders".to_string(),
        };
        assert_eq!(
            share.render(ValueFormat::Count, "Completed Orders", 7.0),
            "Completed Orders: 7 orders (70.00%)"
        );
        assert_eq!(
            TooltipRule::unit("orders").render(ValueFormat::Count, "2024-01", 3.0),
            "3 orders"
        );
        assert_eq!(
            TooltipRule::Value.render(ValueFormat::Currency, "2024-01", 1500.0),
            "$1,500"
        );
        assert_eq!(
            TooltipRule::Value.render(ValueFormat::Percent, "Widget", 42.5),
            "42.5%"
        );
    }

    #[test]
    fn test_point_labels() {
        let share = TooltipRule::ShareOfTotal {
            total: 10.0,
            unit: "orders".to_string(),
        };
        assert_eq!(share.point_label(7.0), "7 (70.00%)");
        assert_eq!(share.point_label(3.0), "3 (30.00%)");
        assert_eq!(TooltipRule::Value.point_label(2.5), "2.5");
    }

    #[test]
    fn test_share_of_zero_total() {
        assert_eq!(share_percent(0.0, 0.0), "0.00%");
        assert_eq!(share_percent(1.0, 3.0), "33.33%");
    }
}
