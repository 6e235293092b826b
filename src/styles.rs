//! Year color palette and per-year color assignment

use crate::errors::{Result, TimelineError};
use crate::window::DateWindow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed 15-color palette cycled across the window's years.
pub const PALETTE: [&str; 15] = [
    "#2E7DD1", // Cerulean
    "#E8803A", // Amber Orange
    "#4CAF6E", // Fern Green
    "#D1495B", // Rosewood
    "#8E6CC0", // Amethyst
    "#2FA8A0", // Teal
    "#C9A227", // Goldenrod
    "#B05FA3", // Orchid
    "#5C8A3C", // Moss Green
    "#D8707B", // Coral Pink
    "#4568B2", // Indigo
    "#DB9A2F", // Ochre
    "#3E8FB8", // Steel Blue
    "#A9553F", // Sienna
    "#7D7DA8", // Slate Violet
];

/// Neutral color for the non-data boundary ticks at the window edges.
pub const BOUNDARY_TICK_COLOR: &str = "#8A8A8A";

/// Radius of interior (year-colored) axis ticks.
pub const TICK_RADIUS: f64 = 4.0;

/// Radius of the first and last axis tick, drawn larger to mark the
/// window bounds.
pub const BOUNDARY_TICK_RADIUS: f64 = 6.0;

/// Deterministic year-to-color mapping for one render.
///
/// Covers `min_year..=max_year + 1` of the window; the palette index
/// wraps modulo the palette length for windows wider than 15 years.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearColors {
    colors: BTreeMap<i32, String>,
}

impl YearColors {
    pub fn assign(window: &DateWindow) -> Self {
        let colors = (window.min_year()..=window.max_year() + 1)
            .enumerate()
            .map(|(index, year)| (year, PALETTE[index % PALETTE.len()].to_string()))
            .collect();
        Self { colors }
    }

    /// Exact-match lookup; years outside the assigned range have no color.
    pub fn get(&self, year: i32) -> Option<&str> {
        self.colors.get(&year).map(String::as_str)
    }

    /// Lookup that treats a miss as the invariant violation it is.
    pub fn require(&self, year: i32) -> Result<&str> {
        self.get(year)
            .ok_or(TimelineError::YearColorMissing { year })
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Assigned `(year, color)` pairs in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &str)> + '_ {
        self.colors.iter().map(|(year, color)| (*year, color.as_str()))
    }
}
