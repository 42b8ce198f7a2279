//! Deterministic color assignment for chart categories.
//!
//! Colors depend only on label order, so two charts that share a label
//! domain (the quantity and revenue pies of the product page) paint each
//! category the same way.

use serde::{Serialize, Serializer};
use std::fmt;

/// A CSS color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Rgba { r: u8, g: u8, b: u8, a: f32 },
    Hsl { h: f64, s: u8, l: u8 },
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgba { r, g, b, a: 1.0 }
    }

    /// Same color with a different opacity. HSL colors are returned as-is.
    pub fn with_alpha(self, alpha: f32) -> Self {
        match self {
            Self::Rgba { r, g, b, .. } => Self::Rgba { r, g, b, a: alpha },
            hsl @ Self::Hsl { .. } => hsl,
        }
    }

    /// A darker shade, used for slice and bar borders.
    pub fn darken(self, amount: f32) -> Self {
        let keep = (1.0 - amount).clamp(0.0, 1.0);
        match self {
            Self::Rgba { r, g, b, a } => Self::Rgba {
                r: (f32::from(r) * keep).round() as u8,
                g: (f32::from(g) * keep).round() as u8,
                b: (f32::from(b) * keep).round() as u8,
                a,
            },
            Self::Hsl { h, s, l } => Self::Hsl {
                h,
                s,
                l: (f32::from(l) * keep).round() as u8,
            },
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgba { r, g, b, a } if *a >= 1.0 => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Rgba { r, g, b, a } => write!(f, "rgba({r}, {g}, {b}, {a})"),
            Self::Hsl { h, s, l } => write!(f, "hsl({h}, {s}%, {l}%)"),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fixed category palette: green, red, blue, orange, purple.
pub const PALETTE: [Color; 5] = [
    Color::rgb(0x4c, 0xaf, 0x50),
    Color::rgb(0xf4, 0x43, 0x36),
    Color::rgb(0x21, 0x96, 0xf3),
    Color::rgb(0xff, 0x98, 0x00),
    Color::rgb(0x8e, 0x24, 0xaa),
];

/// Color for every category past the end of the palette.
pub const NEUTRAL: Color = Color::rgb(0x9e, 0x9e, 0x9e);

pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

// Series colors for line and bar charts.
pub const SERIES_BLUE: Color = Color::rgb(54, 162, 235);
pub const SERIES_TEAL: Color = Color::rgb(75, 192, 192);
pub const SERIES_RED: Color = Color::rgb(255, 99, 132);
pub const SERIES_PURPLE: Color = Color::rgb(153, 102, 255);

/// How category colors are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPolicy {
    /// `PALETTE` in order, then `NEUTRAL`.
    Palette,
    /// Hue circle divided evenly by the number of distinct labels.
    HueRotation,
}

/// Label to color mapping, in first-seen label order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAssignment {
    entries: Vec<(String, Color)>,
}

impl ColorAssignment {
    pub fn assign<S: AsRef<str>>(labels: &[S], policy: ColorPolicy) -> Self {
        let mut distinct: Vec<&str> = Vec::with_capacity(labels.len());
        for label in labels {
            if !distinct.contains(&label.as_ref()) {
                distinct.push(label.as_ref());
            }
        }

        let count = distinct.len();
        let entries = distinct
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                let color = match policy {
                    ColorPolicy::Palette => PALETTE.get(i).copied().unwrap_or(NEUTRAL),
                    ColorPolicy::HueRotation => Color::Hsl {
                        h: (i as f64 * (360.0 / count as f64)) % 360.0,
                        s: 70,
                        l: 50,
                    },
                };
                (label.to_string(), color)
            })
            .collect();

        Self { entries }
    }

    pub fn color_of(&self, label: &str) -> Option<Color> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
    }

    /// Colors for `labels` in order; unknown labels get `NEUTRAL`.
    pub fn colors_for<S: AsRef<str>>(&self, labels: &[S]) -> Vec<Color> {
        labels
            .iter()
            .map(|l| self.color_of(l.as_ref()).unwrap_or(NEUTRAL))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
