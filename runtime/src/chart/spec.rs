//! Renderer-agnostic chart description.

use super::color::Color;
use super::format::{TooltipRule, ValueFormat};
use super::kind::ChartKind;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Pie,
    Bar,
    Line,
    /// Bar and line series on one canvas.
    Combo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisId {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPosition {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Legend {
    Top,
    Hidden,
}

/// A value axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub id: AxisId,
    pub title: Option<String>,
    pub format: ValueFormat,
    pub begin_at_zero: bool,
    /// Whether this axis draws gridlines across the chart area.
    pub grid_lines: bool,
    pub step_size: Option<f64>,
    pub position: AxisPosition,
}

impl Axis {
    pub fn primary(format: ValueFormat) -> Self {
        Self {
            id: AxisId::Primary,
            title: None,
            format,
            begin_at_zero: true,
            grid_lines: true,
            step_size: format.step_size(),
            position: AxisPosition::Left,
        }
    }

    /// Right-hand axis. Gridlines are off so the two grids do not overlap.
    pub fn secondary(format: ValueFormat) -> Self {
        Self {
            id: AxisId::Secondary,
            grid_lines: false,
            position: AxisPosition::Right,
            ..Self::primary(format)
        }
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

/// Fill and border paint of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Uniform(Color),
    /// One color per data point (pie slices, per-category bars).
    PerPoint(Vec<Color>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStyle {
    pub fill: Paint,
    pub border: Paint,
    pub border_width: u8,
    /// Fill the area under a line.
    pub filled_area: bool,
}

impl SeriesStyle {
    /// Translucent fill under a solid line.
    pub fn line(color: Color) -> Self {
        Self {
            fill: Paint::Uniform(color.with_alpha(0.2)),
            border: Paint::Uniform(color),
            border_width: 2,
            filled_area: true,
        }
    }

    pub fn bar(color: Color) -> Self {
        Self {
            fill: Paint::Uniform(color.with_alpha(0.6)),
            border: Paint::Uniform(color),
            border_width: 1,
            filled_area: false,
        }
    }

    /// One color per category, with a darker border of the same hue.
    pub fn categories(colors: Vec<Color>) -> Self {
        let borders = colors.iter().map(|c| c.darken(0.25)).collect();
        Self {
            fill: Paint::PerPoint(colors),
            border: Paint::PerPoint(borders),
            border_width: 1,
            filled_area: false,
        }
    }
}

/// One named numeric series aligned with the chart labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    /// `None` for charts without value axes (pies).
    pub axis: Option<AxisId>,
    /// Drawing variant when it differs from the chart's (combo charts).
    pub variant: Option<Variant>,
    pub format: ValueFormat,
    pub tooltip: TooltipRule,
    pub style: SeriesStyle,
    /// Draw a `<n> (<pct>%)` label on every point.
    pub point_labels: bool,
}

/// Fully resolved configuration for one chart instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub variant: Variant,
    pub title: Option<String>,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    pub axes: Vec<Axis>,
    pub x_title: Option<String>,
    pub legend: Legend,
}

impl ChartSpec {
    /// A spec with no labels and no series. Callers skip rendering it.
    pub fn empty(kind: ChartKind, variant: Variant) -> Self {
        Self {
            kind,
            variant,
            title: None,
            labels: Vec::new(),
            series: Vec::new(),
            axes: Vec::new(),
            x_title: None,
            legend: Legend::Top,
        }
    }

    /// Empty spec drawn the way `kind` is drawn. Stands in for a chart
    /// whose data could not be extracted or adapted.
    pub fn for_kind(kind: ChartKind) -> Self {
        Self::empty(kind, kind.variant())
    }

    /// Nothing to plot: no labels, no series, or only empty series.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.series.iter().all(|s| s.values.is_empty())
    }

    /// Every series has exactly one value per label.
    pub fn is_aligned(&self) -> bool {
        self.series.iter().all(|s| s.values.len() == self.labels.len())
    }

    pub fn axis(&self, id: AxisId) -> Option<&Axis> {
        self.axes.iter().find(|a| a.id == id)
    }

    /// Tick label for a value on an axis.
    pub fn tick_label(&self, id: AxisId, value: f64) -> Option<String> {
        self.axis(id)?.format.tick(value)
    }

    /// Tooltip text for one data point.
    pub fn tooltip(&self, series: usize, point: usize) -> Option<String> {
        let s = self.series.get(series)?;
        let value = *s.values.get(point)?;
        let label = self.labels.get(point)?;
        Some(s.tooltip.render(s.format, label, value))
    }

    /// Tooltip texts for every point of a series.
    pub fn tooltips(&self, series: usize) -> Vec<String> {
        (0..self.labels.len())
            .filter_map(|point| self.tooltip(series, point))
            .collect()
    }

    /// On-point labels of a series; empty unless the series asks for them.
    pub fn point_labels(&self, series: usize) -> Vec<String> {
        match self.series.get(series) {
            Some(s) if s.point_labels => {
                s.values.iter().map(|v| s.tooltip.point_label(*v)).collect()
            }
            _ => Vec::new(),
        }
    }
}
