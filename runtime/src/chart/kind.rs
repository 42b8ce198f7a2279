//! The chart kinds of the dashboard.

use super::spec::Variant;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every chart the dashboard knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Orders per day for one agent, or the per-agent average.
    DailyOrders,
    /// Revenue per month for one agent, or the per-agent average.
    MonthlyRevenue,
    /// Accepted vs. remaining orders.
    OrderCompletion,
    /// Leads that ended in a sale vs. those that did not.
    LeadConversion,
    /// Order count, total value and average value side by side.
    OrderStats,
    /// Share of quantity sold per product (top products plus "Other").
    QuantityShare,
    /// Share of revenue per product, colored like `QuantityShare`.
    RevenueShare,
    /// Units sold and unique customers per product, fetched from the server.
    SalesOverview,
    /// Cumulative client lifetime value per month.
    LifetimeValue,
    /// Average order value per month.
    AverageOrderValue,
    /// Orders and amount spent per month.
    OrderFrequency,
    /// Revenue and order count per day.
    DailyRevenue,
}

impl ChartKind {
    pub const ALL: [ChartKind; 12] = [
        ChartKind::DailyOrders,
        ChartKind::MonthlyRevenue,
        ChartKind::OrderCompletion,
        ChartKind::LeadConversion,
        ChartKind::OrderStats,
        ChartKind::QuantityShare,
        ChartKind::RevenueShare,
        ChartKind::SalesOverview,
        ChartKind::LifetimeValue,
        ChartKind::AverageOrderValue,
        ChartKind::OrderFrequency,
        ChartKind::DailyRevenue,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DailyOrders => "daily_orders",
            Self::MonthlyRevenue => "monthly_revenue",
            Self::OrderCompletion => "order_completion",
            Self::LeadConversion => "lead_conversion",
            Self::OrderStats => "order_stats",
            Self::QuantityShare => "quantity_share",
            Self::RevenueShare => "revenue_share",
            Self::SalesOverview => "sales_overview",
            Self::LifetimeValue => "lifetime_value",
            Self::AverageOrderValue => "average_order_value",
            Self::OrderFrequency => "order_frequency",
            Self::DailyRevenue => "daily_revenue",
        }
    }

    /// Whether the chart overlays two series on independent axes.
    pub fn is_dual_axis(&self) -> bool {
        matches!(
            self,
            Self::SalesOverview | Self::OrderFrequency | Self::DailyRevenue
        )
    }

    /// How the chart is drawn. Empty placeholder specs use it too.
    pub fn variant(&self) -> Variant {
        match self {
            Self::OrderCompletion
            | Self::LeadConversion
            | Self::QuantityShare
            | Self::RevenueShare => Variant::Pie,
            Self::OrderStats | Self::OrderFrequency | Self::DailyRevenue => Variant::Bar,
            Self::SalesOverview => Variant::Combo,
            Self::DailyOrders
            | Self::MonthlyRevenue
            | Self::LifetimeValue
            | Self::AverageOrderValue => Variant::Line,
        }
    }

    /// Whether the chart's input depends on the single/aggregate flag.
    pub fn uses_view_mode(&self) -> bool {
        matches!(self, Self::DailyOrders | Self::MonthlyRevenue)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| format!("unknown chart kind: {s}"))
    }
}
