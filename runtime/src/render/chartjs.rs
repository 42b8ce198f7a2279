//! Chart.js configuration objects.
//!
//! Chart.js takes formatting callbacks as JavaScript functions, which JSON
//! cannot carry. Tooltip texts are therefore precomputed per point
//! (`tooltips` on each dataset, plus `dataLabels` for series drawn with
//! on-slice labels) and ticks carry a declarative `format` descriptor that
//! a page-side callback applies.

use crate::chart::spec::{Axis, AxisId, AxisPosition, ChartSpec, Legend, Paint, Series, Variant};
use crate::chart::ValueFormat;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct ChartJsConfig {
    #[serde(rename = "type")]
    pub chart_type: &'static str,
    pub data: ChartJsData,
    pub options: ChartJsOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartJsData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub dataset_type: Option<&'static str>,
    pub background_color: Paint,
    pub border_color: Paint,
    pub border_width: u8,
    pub fill: bool,
    #[serde(rename = "yAxisID", skip_serializing_if = "Option::is_none")]
    pub y_axis_id: Option<&'static str>,
    pub tooltips: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data_labels: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartJsOptions {
    pub responsive: bool,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub scales: BTreeMap<&'static str, Scale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Interaction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Plugins {
    pub legend: LegendOptions,
    pub title: TitleOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendOptions {
    pub display: bool,
    pub position: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Interaction {
    pub mode: &'static str,
    pub intersect: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleOptions>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub draw_on_chart_area: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_size: Option<f64>,
    pub format: TickFormat,
}

/// Declarative tick formatting, mirroring `ValueFormat::tick`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<&'static str>,
    pub grouping: bool,
    pub integer_only: bool,
}

impl From<ValueFormat> for TickFormat {
    fn from(format: ValueFormat) -> Self {
        match format {
            ValueFormat::Currency => Self {
                prefix: Some("$"),
                grouping: true,
                ..Self::default()
            },
            ValueFormat::Count => Self {
                integer_only: true,
                ..Self::default()
            },
            ValueFormat::Percent => Self {
                suffix: Some("%"),
                grouping: true,
                ..Self::default()
            },
            ValueFormat::Plain => Self::default(),
        }
    }
}

fn variant_type(variant: Variant) -> &'static str {
    match variant {
        Variant::Pie => "pie",
        Variant::Line => "line",
        // Combo charts are bar charts with line datasets mixed in.
        Variant::Bar | Variant::Combo => "bar",
    }
}

fn axis_key(id: AxisId) -> &'static str {
    match id {
        AxisId::Primary => "y",
        AxisId::Secondary => "y2",
    }
}

fn position(pos: AxisPosition) -> &'static str {
    match pos {
        AxisPosition::Left => "left",
        AxisPosition::Right => "right",
    }
}

fn title(text: Option<&String>) -> Option<TitleOptions> {
    text.map(|t| TitleOptions {
        display: true,
        text: t.clone(),
    })
}

fn scale(axis: &Axis) -> Scale {
    Scale {
        begin_at_zero: Some(axis.begin_at_zero),
        position: Some(position(axis.position)),
        grid: Some(Grid {
            draw_on_chart_area: axis.grid_lines,
        }),
        ticks: Some(Ticks {
            step_size: axis.step_size,
            format: axis.format.into(),
        }),
        title: title(axis.title.as_ref()),
    }
}

fn dataset(spec: &ChartSpec, index: usize, series: &Series) -> Dataset {
    Dataset {
        label: series.name.clone(),
        data: series.values.clone(),
        dataset_type: series.variant.map(variant_type),
        background_color: series.style.fill.clone(),
        border_color: series.style.border.clone(),
        border_width: series.style.border_width,
        fill: series.style.filled_area,
        y_axis_id: series.axis.map(axis_key),
        tooltips: spec.tooltips(index),
        data_labels: spec.point_labels(index),
    }
}

impl ChartJsConfig {
    pub fn from_spec(spec: &ChartSpec) -> Self {
        let datasets = spec
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| dataset(spec, i, s))
            .collect();

        let mut scales = BTreeMap::new();
        for axis in &spec.axes {
            scales.insert(axis_key(axis.id), scale(axis));
        }
        if spec.variant != Variant::Pie {
            if let Some(x) = title(spec.x_title.as_ref()) {
                scales.insert(
                    "x",
                    Scale {
                        begin_at_zero: None,
                        position: None,
                        grid: None,
                        ticks: None,
                        title: Some(x),
                    },
                );
            }
        }

        let interaction = spec.kind.is_dual_axis().then_some(Interaction {
            mode: "index",
            intersect: false,
        });

        Self {
            chart_type: variant_type(spec.variant),
            data: ChartJsData {
                labels: spec.labels.clone(),
                datasets,
            },
            options: ChartJsOptions {
                responsive: true,
                plugins: Plugins {
                    legend: LegendOptions {
                        display: spec.legend != Legend::Hidden,
                        position: "top",
                    },
                    title: TitleOptions {
                        display: spec.title.is_some(),
                        text: spec.title.clone().unwrap_or_default(),
                    },
                },
                scales,
                interaction,
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
