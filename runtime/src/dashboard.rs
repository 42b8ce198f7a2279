//! Built-in chart targets for the dashboard's pages.

use crate::chart::ChartKind;
use crate::extraction::{CarrierKey, CarrierSource};
use crate::pipeline::ChartTarget;
use std::fmt;
use std::str::FromStr;

/// Endpoint serving product sales with unique customer counts.
pub const SALES_DATA_PATH: &str = "/products/sales-data/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPage {
    /// One agent, or all agents averaged, depending on the page flag.
    AgentDetail,
    AgentOverview,
    OrderCompletion,
    ProductSales,
    SalesChart,
    ClientDetail,
    ClientOverview,
    DailyRevenue,
}

impl DashboardPage {
    pub const ALL: [DashboardPage; 8] = [
        DashboardPage::AgentDetail,
        DashboardPage::AgentOverview,
        DashboardPage::OrderCompletion,
        DashboardPage::ProductSales,
        DashboardPage::SalesChart,
        DashboardPage::ClientDetail,
        DashboardPage::ClientOverview,
        DashboardPage::DailyRevenue,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::AgentDetail => "agent-detail",
            Self::AgentOverview => "agent-overview",
            Self::OrderCompletion => "order-completion",
            Self::ProductSales => "product-sales",
            Self::SalesChart => "sales-chart",
            Self::ClientDetail => "client-detail",
            Self::ClientOverview => "client-overview",
            Self::DailyRevenue => "daily-revenue",
        }
    }

    /// The charts this page mounts, in initialization order.
    pub fn targets(&self) -> Vec<ChartTarget> {
        let chart_data = |name: &str| CarrierKey::dataset("chart-data", name);

        match self {
            Self::AgentDetail => {
                let flag = chart_data("isSingleAgent");
                vec![
                    ChartTarget::embedded(
                        ChartKind::DailyOrders,
                        chart_data("dailyOrders"),
                        "dailyOrdersChart",
                    )
                    .with_mode_flag(flag.clone()),
                    ChartTarget::embedded(
                        ChartKind::MonthlyRevenue,
                        chart_data("monthlyRevenue"),
                        "monthlyRevenueChart",
                    )
                    .with_mode_flag(flag),
                ]
            }
            Self::AgentOverview => vec![
                ChartTarget::embedded(
                    ChartKind::LeadConversion,
                    chart_data("leadStats"),
                    "leadConversionChart",
                ),
                ChartTarget::embedded(
                    ChartKind::OrderStats,
                    chart_data("orderStats"),
                    "orderStatsChart",
                ),
            ],
            Self::OrderCompletion => {
                let counter = |name: &str| CarrierKey::dataset("orderCompletionChart", name);
                vec![ChartTarget::embedded(
                    ChartKind::OrderCompletion,
                    CarrierSource::bundle(&[
                        ("acceptedOrders", counter("acceptedOrders")),
                        ("remainingOrders", counter("remainingOrders")),
                        ("totalOrders", counter("totalOrders")),
                    ]),
                    "orderCompletionChart",
                )]
            }
            Self::ProductSales => {
                let shares = CarrierSource::bundle(&[
                    ("labels", CarrierKey::element("chart-labels")),
                    ("quantity", CarrierKey::element("chart-quantity")),
                    ("revenue", CarrierKey::element("chart-revenue")),
                ]);
                vec![
                    ChartTarget::embedded(
                        ChartKind::QuantityShare,
                        shares.clone(),
                        "quantityPieChart",
                    ),
                    ChartTarget::embedded(ChartKind::RevenueShare, shares, "revenuePieChart"),
                ]
            }
            Self::SalesChart => vec![ChartTarget::remote(
                ChartKind::SalesOverview,
                SALES_DATA_PATH,
                "salesChart",
            )],
            Self::ClientDetail => vec![
                ChartTarget::embedded(
                    ChartKind::OrderFrequency,
                    CarrierKey::element("monthlyOrderStatsData"),
                    "orderFrequencyChart",
                ),
                ChartTarget::embedded(
                    ChartKind::AverageOrderValue,
                    CarrierKey::element("averageOrderValueData"),
                    "averageOrderValueChart",
                ),
            ],
            Self::ClientOverview => {
                let mut targets = Self::ClientDetail.targets();
                targets.push(ChartTarget::embedded(
                    ChartKind::LifetimeValue,
                    CarrierKey::element("ltvData"),
                    "lifetimeValueChart",
                ));
                targets
            }
            Self::DailyRevenue => vec![ChartTarget::embedded(
                ChartKind::DailyRevenue,
                chart_data("dailyRevenue"),
                "dailyRevenueChart",
            )],
        }
    }
}

impl fmt::Display for DashboardPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DashboardPage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-").to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| format!("unknown dashboard page: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::Page;
    use crate::pipeline::Pipeline;

    #[test]
    fn test_every_page_has_targets() {
        for page in DashboardPage::ALL {
            assert!(!page.targets().is_empty(), "{page} has no targets");
            assert_eq!(page.name().parse::<DashboardPage>().unwrap(), page);
        }
    }

    #[test]
    fn test_mounts_are_unique_per_page() {
        for page in DashboardPage::ALL {
            let targets = page.targets();
            let mut mounts: Vec<_> = targets.iter().map(|t| t.mount.as_str()).collect();
            mounts.sort_unstable();
            mounts.dedup();
            assert_eq!(mounts.len(), targets.len(), "{page} reuses a mount");
        }
    }

    #[test]
    fn test_product_sales_page() {
        let html = r#"
            <script id="chart-labels" type="application/json">["Widget", "Gadget", "Other"]</script>
            <script id="chart-quantity" type="application/json">[50.0, 30.0, 20.0]</script>
            <script id="chart-revenue" type="application/json">[25.5, 60.0, 14.5]</script>
        "#;
        let page = Page::parse(html);
        let targets = DashboardPage::ProductSales.targets();
        let outcomes = Pipeline::new().run_embedded(&page, &targets);
        assert_eq!(outcomes.len(), 2);
        let quantity = outcomes[0].spec();
        let revenue = outcomes[1].spec();
        assert_eq!(quantity.labels, revenue.labels);
        assert_eq!(quantity.series[0].style.fill, revenue.series[0].style.fill);
        assert_eq!(revenue.series[0].values, vec![25.5, 60.0, 14.5]);
    }

    #[test]
    fn test_order_completion_page() {
        let html = r#"<canvas id="orderCompletionChart" data-accepted-orders="7"
                        data-remaining-orders="3" data-total-orders="10"></canvas>"#;
        let page = Page::parse(html);
        let targets = DashboardPage::OrderCompletion.targets();
        let outcomes = Pipeline::new().run_embedded(&page, &targets);
        let spec = outcomes[0].spec();
        assert_eq!(spec.series[0].values, vec![7.0, 3.0]);
        assert_eq!(spec.tooltip(0, 0).unwrap(), "Completed Orders: 7 orders (70.00%)");
    }
}
