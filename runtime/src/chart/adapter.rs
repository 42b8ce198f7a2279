//! Map extracted payloads onto chart specs.
//!
//! One parameterized adapter covers every chart of the dashboard. The
//! view mode is fixed per page and decides which of two fields a
//! single/aggregate chart reads; the other field is never touched.

use super::color::{
    Color, ColorAssignment, ColorPolicy, PALETTE, SERIES_BLUE, SERIES_PURPLE, SERIES_RED,
    SERIES_TEAL, WHITE,
};
use super::format::{TooltipRule, ValueFormat};
use super::kind::ChartKind;
use super::records;
use super::spec::{Axis, AxisId, ChartSpec, Legend, Paint, Series, SeriesStyle, Variant};
use crate::error::ChartResult;
use crate::extraction::ViewMode;
use serde_json::Value;
use tracing::debug;

/// Adapts payloads for one page.
#[derive(Debug, Clone, Copy)]
pub struct ChartAdapter {
    mode: ViewMode,
}

impl ChartAdapter {
    pub fn new(mode: ViewMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Build the chart spec for `kind` from its decoded payload.
    ///
    /// An empty record list is not an error: the returned spec has series
    /// with zero-length values and `is_empty()` is true.
    pub fn adapt(&self, parsed: &Value, kind: ChartKind) -> ChartResult<ChartSpec> {
        let spec = match kind {
            ChartKind::DailyOrders => self.daily_orders(parsed)?,
            ChartKind::MonthlyRevenue => self.monthly_revenue(parsed)?,
            ChartKind::OrderCompletion => order_completion(parsed)?,
            ChartKind::LeadConversion => lead_conversion(parsed)?,
            ChartKind::OrderStats => order_stats(parsed)?,
            ChartKind::QuantityShare => product_share(parsed, kind)?,
            ChartKind::RevenueShare => product_share(parsed, kind)?,
            ChartKind::SalesOverview => sales_overview(parsed)?,
            ChartKind::LifetimeValue => lifetime_value(parsed)?,
            ChartKind::AverageOrderValue => average_order_value(parsed)?,
            ChartKind::OrderFrequency => order_frequency(parsed)?,
            ChartKind::DailyRevenue => daily_revenue(parsed)?,
        };

        debug_assert!(spec.is_aligned());
        debug!(
            "adapted {kind}: {} labels, {} series",
            spec.labels.len(),
            spec.series.len()
        );
        Ok(spec)
    }

    fn daily_orders(&self, parsed: &Value) -> ChartResult<ChartSpec> {
        let (field, name) = match self.mode {
            ViewMode::Single => ("count", "Daily Orders (Single Agent)"),
            ViewMode::Aggregate => ("average_count", "Average Daily Orders (All Agents)"),
        };
        let (labels, mut columns) =
            records::project_rows(records::rows(parsed)?, "date", &[field])?;

        Ok(ChartSpec {
            title: Some(name.to_string()),
            labels,
            series: vec![series(
                name,
                columns.remove(0),
                AxisId::Primary,
                ValueFormat::Count,
                TooltipRule::unit("orders"),
                SeriesStyle::line(SERIES_BLUE),
            )],
            axes: vec![Axis::primary(ValueFormat::Count).titled("Orders")],
            x_title: Some("Date".to_string()),
            ..ChartSpec::for_kind(ChartKind::DailyOrders)
        })
    }

    fn monthly_revenue(&self, parsed: &Value) -> ChartResult<ChartSpec> {
        let (field, name) = match self.mode {
            ViewMode::Single => ("revenue", "Monthly Revenue (Single Agent)"),
            ViewMode::Aggregate => ("average_revenue", "Average Monthly Revenue (All Agents)"),
        };
        let (labels, mut columns) =
            records::project_rows(records::rows(parsed)?, "month", &[field])?;

        Ok(ChartSpec {
            title: Some(name.to_string()),
            labels,
            series: vec![series(
                name,
                columns.remove(0),
                AxisId::Primary,
                ValueFormat::Currency,
                TooltipRule::Value,
                SeriesStyle::line(SERIES_TEAL),
            )],
            axes: vec![Axis::primary(ValueFormat::Currency).titled("Revenue ($)")],
            x_title: Some("Month".to_string()),
            ..ChartSpec::for_kind(ChartKind::MonthlyRevenue)
        })
    }
}

fn series(
    name: &str,
    values: Vec<f64>,
    axis: AxisId,
    format: ValueFormat,
    tooltip: TooltipRule,
    style: SeriesStyle,
) -> Series {
    Series {
        name: name.to_string(),
        values,
        axis: Some(axis),
        variant: None,
        format,
        tooltip,
        style,
        point_labels: false,
    }
}

/// A pie over fixed categories, colored from the palette.
fn category_pie(
    kind: ChartKind,
    title: &str,
    name: &str,
    labels: &[&str],
    values: Vec<f64>,
    unit: &str,
) -> ChartSpec {
    let total: f64 = values.iter().sum();
    let colors = ColorAssignment::assign(labels, ColorPolicy::Palette).colors_for(labels);

    ChartSpec {
        title: Some(title.to_string()),
        labels: labels.iter().map(|l| l.to_string()).collect(),
        series: vec![Series {
            name: name.to_string(),
            values,
            axis: None,
            variant: None,
            format: ValueFormat::Count,
            tooltip: TooltipRule::ShareOfTotal {
                total,
                unit: unit.to_string(),
            },
            style: SeriesStyle::categories(colors),
            point_labels: false,
        }],
        ..ChartSpec::for_kind(kind)
    }
}

fn order_completion(parsed: &Value) -> ChartResult<ChartSpec> {
    let counters = records::scalars(
        parsed,
        &["acceptedOrders", "remainingOrders", "totalOrders"],
    )?;
    let (accepted, remaining, total) = (counters[0], counters[1], counters[2]);

    let mut spec = category_pie(
        ChartKind::OrderCompletion,
        "Order Completion Rate",
        "Orders",
        &["Completed Orders", "Remaining Orders"],
        vec![accepted, remaining],
        "orders",
    );
    // Percentages are of the reported total, which may include orders in
    // neither slice.
    spec.series[0].tooltip = TooltipRule::ShareOfTotal {
        total,
        unit: "orders".to_string(),
    };
    spec.series[0].point_labels = true;
    Ok(spec)
}

fn lead_conversion(parsed: &Value) -> ChartResult<ChartSpec> {
    let values = records::scalars(parsed, &["sale", "no_sale"])?;
    Ok(category_pie(
        ChartKind::LeadConversion,
        "Lead Conversion (Sale vs. No Sale)",
        "Lead Conversion",
        &["Sale", "No Sale"],
        values,
        "leads",
    ))
}

fn order_stats(parsed: &Value) -> ChartResult<ChartSpec> {
    const LABELS: [&str; 3] = ["Total Orders", "Total Order Value", "Average Order Value"];
    let values = records::scalars(parsed, &["order_count", "total_value", "average_value"])?;
    // Blue, orange, purple: the palette after the completion pie's colors.
    let colors = PALETTE[2..].to_vec();

    Ok(ChartSpec {
        title: Some("Order Statistics".to_string()),
        labels: LABELS.iter().map(|l| l.to_string()).collect(),
        series: vec![series(
            "Order Stats",
            values,
            AxisId::Primary,
            ValueFormat::Plain,
            TooltipRule::Value,
            SeriesStyle::categories(colors),
        )],
        axes: vec![Axis::primary(ValueFormat::Plain)],
        legend: Legend::Hidden,
        ..ChartSpec::for_kind(ChartKind::OrderStats)
    })
}

/// Quantity or revenue share per product. Both pies color products by
/// hue rotation over the shared label list, so a product has the same
/// color in each.
fn product_share(parsed: &Value, kind: ChartKind) -> ChartResult<ChartSpec> {
    let (field, name, title) = if kind == ChartKind::QuantityShare {
        ("quantity", "Quantity Sold (%)", "Quantity Sold Distribution (%)")
    } else {
        ("revenue", "Revenue Contribution (%)", "Revenue Contribution Distribution (%)")
    };
    let (labels, mut columns) = records::columns(parsed, "labels", &[field])?;
    let colors = ColorAssignment::assign(&labels, ColorPolicy::HueRotation).colors_for(&labels);

    Ok(ChartSpec {
        title: Some(title.to_string()),
        labels,
        series: vec![Series {
            name: name.to_string(),
            values: columns.remove(0),
            axis: None,
            variant: None,
            format: ValueFormat::Percent,
            tooltip: TooltipRule::Value,
            style: SeriesStyle {
                fill: Paint::PerPoint(colors),
                border: Paint::Uniform(WHITE),
                border_width: 1,
                filled_area: false,
            },
            point_labels: false,
        }],
        ..ChartSpec::for_kind(kind)
    })
}

fn sales_overview(parsed: &Value) -> ChartResult<ChartSpec> {
    let (labels, mut columns) =
        records::columns(parsed, "labels", &["total_sold", "unique_customers"])?;
    let customers = columns.pop().unwrap_or_default();
    let sold = columns.pop().unwrap_or_default();

    let mut customer_series = series(
        "Unique Customers",
        customers,
        AxisId::Secondary,
        ValueFormat::Count,
        TooltipRule::unit("customers"),
        SeriesStyle::line(SERIES_PURPLE),
    );
    customer_series.variant = Some(Variant::Line);
    customer_series.style.filled_area = false;

    Ok(ChartSpec {
        title: Some("Product Sales".to_string()),
        labels,
        series: vec![
            series(
                "Total Sold",
                sold,
                AxisId::Primary,
                ValueFormat::Count,
                TooltipRule::unit("units"),
                SeriesStyle::bar(SERIES_TEAL),
            ),
            customer_series,
        ],
        axes: vec![
            Axis::primary(ValueFormat::Count).titled("Total Sold"),
            Axis::secondary(ValueFormat::Count).titled("Unique Customers"),
        ],
        x_title: Some("Product".to_string()),
        ..ChartSpec::for_kind(ChartKind::SalesOverview)
    })
}

fn monthly_currency_line(
    kind: ChartKind,
    parsed: &Value,
    field: &str,
    title: &str,
    name: &str,
    axis_title: &str,
    color: Color,
) -> ChartResult<ChartSpec> {
    let (labels, mut columns) = records::columns(parsed, "labels", &[field])?;
    Ok(ChartSpec {
        title: Some(title.to_string()),
        labels,
        series: vec![series(
            name,
            columns.remove(0),
            AxisId::Primary,
            ValueFormat::Currency,
            TooltipRule::Value,
            SeriesStyle::line(color),
        )],
        axes: vec![Axis::primary(ValueFormat::Currency).titled(axis_title)],
        x_title: Some("Month".to_string()),
        ..ChartSpec::for_kind(kind)
    })
}

fn lifetime_value(parsed: &Value) -> ChartResult<ChartSpec> {
    let mut spec = monthly_currency_line(
        ChartKind::LifetimeValue,
        parsed,
        "ltv_values",
        "Lifetime Value (LTV)",
        "Lifetime Value (LTV)",
        "Lifetime Value ($)",
        SERIES_TEAL,
    )?;
    // Cumulative values; starting at zero flattens the curve.
    spec.axes[0].begin_at_zero = false;
    spec.series[0].style.filled_area = false;
    Ok(spec)
}

fn average_order_value(parsed: &Value) -> ChartResult<ChartSpec> {
    monthly_currency_line(
        ChartKind::AverageOrderValue,
        parsed,
        "average_order_value",
        "Monthly Average Order Value (AOV)",
        "Average Order Value ($)",
        "AOV ($)",
        SERIES_RED,
    )
}

fn order_frequency(parsed: &Value) -> ChartResult<ChartSpec> {
    let (labels, mut columns) =
        records::columns(parsed, "labels", &["order_counts", "total_spent"])?;
    let spent = columns.pop().unwrap_or_default();
    let counts = columns.pop().unwrap_or_default();

    Ok(ChartSpec {
        title: Some("Monthly Order Frequency & Spending".to_string()),
        labels,
        series: vec![
            series(
                "Number of Orders",
                counts,
                AxisId::Primary,
                ValueFormat::Count,
                TooltipRule::unit("orders"),
                SeriesStyle::bar(SERIES_TEAL),
            ),
            series(
                "Total Spent ($)",
                spent,
                AxisId::Secondary,
                ValueFormat::Currency,
                TooltipRule::Value,
                SeriesStyle::bar(SERIES_PURPLE),
            ),
        ],
        axes: vec![
            Axis::primary(ValueFormat::Count).titled("Number of Orders"),
            Axis::secondary(ValueFormat::Currency).titled("Total Spent ($)"),
        ],
        x_title: Some("Month".to_string()),
        ..ChartSpec::for_kind(ChartKind::OrderFrequency)
    })
}

fn daily_revenue(parsed: &Value) -> ChartResult<ChartSpec> {
    let (labels, mut columns) = records::project_rows(
        records::rows(parsed)?,
        "date",
        &["total_revenue", "total_orders"],
    )?;
    let orders = columns.pop().unwrap_or_default();
    let revenue = columns.pop().unwrap_or_default();

    Ok(ChartSpec {
        title: Some("Daily Revenue and Orders".to_string()),
        labels,
        series: vec![
            series(
                "Total Revenue",
                revenue,
                AxisId::Primary,
                ValueFormat::Currency,
                TooltipRule::Value,
                SeriesStyle::bar(SERIES_TEAL),
            ),
            series(
                "Number of Orders",
                orders,
                AxisId::Secondary,
                ValueFormat::Count,
                TooltipRule::unit("orders"),
                SeriesStyle::bar(SERIES_PURPLE),
            ),
        ],
        axes: vec![
            Axis::primary(ValueFormat::Currency).titled("Revenue ($)"),
            Axis::secondary(ValueFormat::Count).titled("Orders"),
        ],
        x_title: Some("Date".to_string()),
        ..ChartSpec::for_kind(ChartKind::DailyRevenue)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::spec::AxisPosition;
    use crate::error::ChartError;
    use serde_json::json;

    fn single() -> ChartAdapter {
        ChartAdapter::new(ViewMode::Single)
    }

    fn aggregate() -> ChartAdapter {
        ChartAdapter::new(ViewMode::Aggregate)
    }

    #[test]
    fn test_daily_orders_single_agent() {
        let parsed = json!([
            {"date": "2024-01-01", "count": 5},
            {"date": "2024-01-02", "count": 8}
        ]);
        let spec = single().adapt(&parsed, ChartKind::DailyOrders).unwrap();
        assert_eq!(spec.labels, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(spec.series[0].values, vec![5.0, 8.0]);
        assert_eq!(spec.series[0].name, "Daily Orders (Single Agent)");
        assert_eq!(spec.variant, Variant::Line);
    }

    #[test]
    fn test_aggregate_mode_reads_average_field_only() {
        // `count` is malformed; aggregate mode must not read it.
        let parsed = json!([
            {"date": "2024-01-01", "average_count": 2.5, "count": "oops"},
            {"date": "2024-01-02", "average_count": 4}
        ]);
        let spec = aggregate().adapt(&parsed, ChartKind::DailyOrders).unwrap();
        assert_eq!(spec.series[0].values, vec![2.5, 4.0]);
        assert_eq!(spec.series[0].name, "Average Daily Orders (All Agents)");

        // And single mode never reads the average field.
        let parsed = json!([{"month": "2024-01", "revenue": 900, "average_revenue": null}]);
        let spec = single().adapt(&parsed, ChartKind::MonthlyRevenue).unwrap();
        assert_eq!(spec.series[0].values, vec![900.0]);
        let err = aggregate()
            .adapt(&parsed, ChartKind::MonthlyRevenue)
            .unwrap_err();
        assert_eq!(err, ChartError::invalid_field("average_revenue", 0));
    }

    #[test]
    fn test_empty_records_render_nothing() {
        for kind in [ChartKind::DailyOrders, ChartKind::MonthlyRevenue, ChartKind::DailyRevenue] {
            let spec = single().adapt(&json!([]), kind).unwrap();
            assert!(spec.is_empty());
            assert!(spec.labels.is_empty());
            assert!(spec.series.iter().all(|s| s.values.is_empty()));
        }
        let spec = single()
            .adapt(&json!({"labels": [], "ltv_values": []}), ChartKind::LifetimeValue)
            .unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_missing_label_is_error() {
        let parsed = json!([{"count": 5}]);
        let err = single().adapt(&parsed, ChartKind::DailyOrders).unwrap_err();
        assert_eq!(err, ChartError::missing_field("date", 0));
    }

    #[test]
    fn test_order_completion_pie() {
        let parsed = json!({"acceptedOrders": 7, "remainingOrders": 3, "totalOrders": 10});
        let spec = single().adapt(&parsed, ChartKind::OrderCompletion).unwrap();
        assert_eq!(spec.variant, Variant::Pie);
        assert_eq!(spec.labels, vec!["Completed Orders", "Remaining Orders"]);
        assert_eq!(spec.series[0].values, vec![7.0, 3.0]);
        assert_eq!(
            spec.tooltip(0, 0).unwrap(),
            "Completed Orders: 7 orders (70.00%)"
        );
        assert_eq!(
            spec.tooltip(0, 1).unwrap(),
            "Remaining Orders: 3 orders (30.00%)"
        );
        assert!(spec.axes.is_empty());
        assert_eq!(spec.point_labels(0), vec!["7 (70.00%)", "3 (30.00%)"]);
    }

    #[test]
    fn test_dual_axis_daily_revenue() {
        let parsed = json!([
            {"date": "2024-03-01", "total_revenue": 100, "total_orders": 3},
            {"date": "2024-03-02", "total_revenue": "200.00", "total_orders": 5}
        ]);
        let spec = single().adapt(&parsed, ChartKind::DailyRevenue).unwrap();
        assert_eq!(spec.series[0].axis, Some(AxisId::Primary));
        assert_eq!(spec.series[1].axis, Some(AxisId::Secondary));

        let primary: Vec<_> = spec.series[0]
            .values
            .iter()
            .filter_map(|v| spec.tick_label(AxisId::Primary, *v))
            .collect();
        assert_eq!(primary, vec!["$100", "$200"]);

        let secondary: Vec<_> = spec.series[1]
            .values
            .iter()
            .filter_map(|v| spec.tick_label(AxisId::Secondary, *v))
            .collect();
        assert_eq!(secondary, vec!["3", "5"]);

        let axis = spec.axis(AxisId::Secondary).unwrap();
        assert!(!axis.grid_lines);
        assert_eq!(axis.step_size, Some(1.0));
        assert_eq!(axis.position, AxisPosition::Right);
        assert!(spec.axis(AxisId::Primary).unwrap().grid_lines);
    }

    #[test]
    fn test_product_share_pies_share_colors() {
        let parsed = json!({
            "labels": ["Widget", "Gadget", "Other"],
            "quantity": [50.0, 30.0, 20.0],
            "revenue": [20.0, 70.0, 10.0]
        });
        let quantity = single().adapt(&parsed, ChartKind::QuantityShare).unwrap();
        let revenue = single().adapt(&parsed, ChartKind::RevenueShare).unwrap();
        assert_eq!(quantity.series[0].style.fill, revenue.series[0].style.fill);
        assert_eq!(revenue.series[0].values, vec![20.0, 70.0, 10.0]);
        assert_eq!(quantity.tooltip(0, 0).unwrap(), "50%");
    }

    #[test]
    fn test_sales_overview_combo() {
        let parsed = json!({
            "labels": ["Widget", "Gadget"],
            "total_sold": [40, 12],
            "unique_customers": [9, 4]
        });
        let spec = single().adapt(&parsed, ChartKind::SalesOverview).unwrap();
        assert_eq!(spec.variant, Variant::Combo);
        assert_eq!(spec.series[1].variant, Some(Variant::Line));
        assert_eq!(spec.series[0].values, vec![40.0, 12.0]);
        assert_eq!(spec.series[1].values, vec![9.0, 4.0]);
        assert_eq!(spec.tooltip(1, 0).unwrap(), "9 customers");
    }

    #[test]
    fn test_order_frequency_axes() {
        let parsed = json!({
            "labels": ["2024-01", "2024-02"],
            "order_counts": [2, 1],
            "total_spent": ["150.00", "80.50"]
        });
        let spec = single().adapt(&parsed, ChartKind::OrderFrequency).unwrap();
        assert_eq!(spec.axis(AxisId::Primary).unwrap().format, ValueFormat::Count);
        assert_eq!(
            spec.axis(AxisId::Secondary).unwrap().format,
            ValueFormat::Currency
        );
        assert_eq!(spec.tooltip(1, 1).unwrap(), "$80.5");
    }

    #[test]
    fn test_lifetime_value_does_not_start_at_zero() {
        let parsed = json!({"labels": ["2024-01", "2024-02"], "ltv_values": [500, 750]});
        let spec = single().adapt(&parsed, ChartKind::LifetimeValue).unwrap();
        assert!(!spec.axes[0].begin_at_zero);
        assert_eq!(spec.x_title.as_deref(), Some("Month"));
    }

    #[test]
    fn test_order_stats_and_lead_conversion() {
        let stats = single()
            .adapt(
                &json!({"order_count": 12, "total_value": "3400.00", "average_value": 283.33}),
                ChartKind::OrderStats,
            )
            .unwrap();
        assert_eq!(stats.series[0].values, vec![12.0, 3400.0, 283.33]);
        assert_eq!(stats.legend, Legend::Hidden);
        assert_eq!(
            stats.series[0].style.fill,
            Paint::PerPoint(vec![PALETTE[2], PALETTE[3], PALETTE[4]])
        );
        assert_eq!(PALETTE[2].to_string(), "#2196f3");
        assert_eq!(PALETTE[4].to_string(), "#8e24aa");

        let leads = single()
            .adapt(&json!({"sale": 1, "no_sale": 3}), ChartKind::LeadConversion)
            .unwrap();
        assert_eq!(leads.tooltip(0, 0).unwrap(), "Sale: 1 leads (25.00%)");
        assert!(leads.point_labels(0).is_empty());
    }

    #[test]
    fn test_adapt_is_idempotent() {
        let parsed = json!({
            "labels": ["A", "B", "C", "D", "E", "F"],
            "quantity": [1, 2, 3, 4, 5, 6],
            "revenue": [6, 5, 4, 3, 2, 1]
        });
        for kind in [ChartKind::QuantityShare, ChartKind::RevenueShare] {
            let first = single().adapt(&parsed, kind).unwrap();
            let second = single().adapt(&parsed, kind).unwrap();
            assert_eq!(first, second);
            assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }

    #[test]
    fn test_series_aligned_with_labels() {
        let cases = [
            (
                ChartKind::DailyRevenue,
                json!([{"date": "d1", "total_revenue": 1, "total_orders": 1}]),
            ),
            (
                ChartKind::OrderFrequency,
                json!({"labels": ["m1", "m2"], "order_counts": [1, 2], "total_spent": [3, 4]}),
            ),
            (
                ChartKind::AverageOrderValue,
                json!({"labels": ["m1"], "average_order_value": [42]}),
            ),
        ];
        for (kind, parsed) in cases {
            let spec = single().adapt(&parsed, kind).unwrap();
            assert!(spec.is_aligned(), "{kind} misaligned");
            assert_eq!(spec.variant, kind.variant());
            assert!(!spec.is_empty());
        }
    }
}
