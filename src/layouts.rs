//! Chart geometry and time-axis scale construction

use crate::errors::Result;
use crate::styles::{YearColors, BOUNDARY_TICK_COLOR, BOUNDARY_TICK_RADIUS, TICK_RADIUS};
use crate::window::{jan_first, DateWindow};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Logical vertical domain the lanes live in; mapped inverted to pixels
/// so positive values render above the axis.
pub const LANE_DOMAIN: [f64; 2] = [-105.0, 105.0];

/// Chart layout configuration and calculations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartLayout {
    /// Total chart width in pixels
    pub width: u32,
    /// Total chart height in pixels
    pub height: u32,
    /// Margin configuration
    pub margins: Margins,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 480,
            margins: Margins::default(),
        }
    }
}

impl ChartLayout {
    /// Calculate the plot area after accounting for margins
    pub fn plot_area(&self) -> (u32, u32, u32, u32) {
        let left = self.margins.left;
        let right = self.width - self.margins.right;
        let top = self.margins.top;
        let bottom = self.height - self.margins.bottom;
        (left, top, right, bottom)
    }

    /// Calculate plot area dimensions
    pub fn plot_dimensions(&self) -> (u32, u32) {
        let (left, top, right, bottom) = self.plot_area();
        (right - left, bottom - top)
    }
}

/// Margin configuration for chart layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Margins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 40,   // Space before the first tick
            right: 40,  // Space after the last tick
            top: 30,    // Space for upper callouts
            bottom: 40, // Space for tick labels
        }
    }
}

/// Tick unit of the time axis, chosen from the window span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    Month,
    Year,
}

/// One resolved axis tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub date: NaiveDate,
    pub x: f64,
    pub label: String,
    pub color: String,
    pub radius: f64,
    /// First/last tick of the axis: marks a window bound, not data.
    pub boundary: bool,
}

/// Time-domain-to-pixel mapping plus the resolved tick scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    pub domain: [NaiveDate; 2],
    pub granularity: Granularity,
    /// Horizontal pixel range the domain maps onto.
    pub pixel_range: [f64; 2],
    /// Pixel range the logical lane domain maps onto, `[bottom, top]`.
    pub vertical_range: [f64; 2],
    pub ticks: Vec<AxisTick>,
}

/// Round the window span to whole years for the granularity decision.
fn years_span(window: &DateWindow) -> i64 {
    let days = (window.max - window.min).num_days().abs();
    (days as f64 / 365.25).round() as i64
}

impl AxisScale {
    /// Build the axis scale for a window. Spans of at most one year get
    /// month granularity with the domain widened one month on each
    /// side; anything longer gets one tick per year.
    ///
    /// Errors only when an interior tick's year has no assigned color,
    /// which means `colors` was built from a different window.
    pub fn build(window: &DateWindow, colors: &YearColors, chart: &ChartLayout) -> Result<Self> {
        let (left, top, right, bottom) = chart.plot_area();
        let pixel_range = [f64::from(left), f64::from(right)];
        let vertical_range = [f64::from(bottom), f64::from(top)];

        let granularity = if years_span(window) <= 1 {
            Granularity::Month
        } else {
            Granularity::Year
        };

        let domain = match granularity {
            Granularity::Month => [
                window
                    .min
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(window.min),
                window
                    .max
                    .checked_add_months(Months::new(1))
                    .unwrap_or(window.max),
            ],
            Granularity::Year => [window.min, window.max],
        };

        let mut scale = Self {
            domain,
            granularity,
            pixel_range,
            vertical_range,
            ticks: Vec::new(),
        };
        let ticks = scale.build_ticks(window, colors)?;
        scale.ticks = ticks;
        Ok(scale)
    }

    fn build_ticks(&self, window: &DateWindow, colors: &YearColors) -> Result<Vec<AxisTick>> {
        let dates: Vec<NaiveDate> = match self.granularity {
            Granularity::Month => {
                let mut dates = Vec::new();
                let mut current = self.domain[0];
                while current <= self.domain[1] {
                    dates.push(current);
                    match current.checked_add_months(Months::new(1)) {
                        Some(next) => current = next,
                        None => break,
                    }
                }
                dates
            }
            Granularity::Year => (window.min_year()..=window.max_year())
                .map(jan_first)
                .collect(),
        };

        let last = dates.len().saturating_sub(1);
        dates
            .into_iter()
            .enumerate()
            .map(|(index, date)| {
                let boundary = index == 0 || index == last;
                let label = match self.granularity {
                    Granularity::Month => date.format("%b '%y").to_string(),
                    Granularity::Year => date.format("%Y").to_string(),
                };
                // Interior ticks always fall inside the window, whose
                // years all carry a color; a miss is an invariant
                // violation, not a recoverable input defect.
                let color = if boundary {
                    BOUNDARY_TICK_COLOR.to_string()
                } else {
                    colors.require(date.year())?.to_string()
                };
                let radius = if boundary {
                    BOUNDARY_TICK_RADIUS
                } else {
                    TICK_RADIUS
                };
                Ok(AxisTick {
                    date,
                    x: self.position(date),
                    label,
                    color,
                    radius,
                    boundary,
                })
            })
            .collect()
    }

    /// Linear time-to-pixel mapping. Dates outside the domain yield
    /// `NaN`; callers clamp where a defined position is required.
    pub fn position(&self, date: NaiveDate) -> f64 {
        let [start, end] = self.domain;
        if date < start || date > end {
            return f64::NAN;
        }
        let total = (end - start).num_days();
        if total == 0 {
            return self.pixel_range[0];
        }
        let fraction = (date - start).num_days() as f64 / total as f64;
        self.pixel_range[0] + fraction * (self.pixel_range[1] - self.pixel_range[0])
    }

    /// Map a logical lane coordinate onto the inverted vertical pixel range.
    pub fn vertical(&self, logical: f64) -> f64 {
        let [bottom, top] = self.vertical_range;
        let span = LANE_DOMAIN[1] - LANE_DOMAIN[0];
        bottom + (logical - LANE_DOMAIN[0]) / span * (top - bottom)
    }
}
