//! Vertical lane placement and connector geometry

use crate::layouts::AxisScale;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Width of one event callout box in pixels.
pub const CALLOUT_WIDTH: f64 = 140.0;

/// Horizontal offset from the callout's left edge to its connector line.
const CONNECTOR_OFFSET: f64 = CALLOUT_WIDTH / 2.0;

/// Logical distance of the connector's near-axis stub from the axis.
const STUB_LOGICAL_Y: f64 = 10.0;

/// One of four discrete vertical placement slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lane {
    FarNegative,
    NearNegative,
    NearPositive,
    FarPositive,
}

impl Lane {
    /// Lane for the event at 0-based index `i`, independent of its date.
    ///
    /// Even indices go below the axis, odd above; within each side the
    /// running count alternates far and near. Consecutive events cycle
    /// through all four lanes, so index-adjacent (and therefore often
    /// time-adjacent) events never share one.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            let count = index / 2;
            if count % 2 == 0 {
                Self::FarNegative
            } else {
                Self::NearNegative
            }
        } else {
            let count = index.div_ceil(2);
            if count % 2 == 1 {
                Self::FarPositive
            } else {
                Self::NearPositive
            }
        }
    }

    /// Logical vertical coordinate of the lane's callout.
    pub fn logical_y(self) -> f64 {
        match self {
            Self::FarNegative => -100.0,
            Self::NearNegative => -60.0,
            Self::NearPositive => 40.0,
            Self::FarPositive => 90.0,
        }
    }
}

/// Resolved placement of one event's callout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub lane: Lane,
    /// Left edge of the callout in pixels.
    pub x: f64,
    /// Top anchor of the callout in pixels.
    pub y: f64,
}

/// Vertical line segment from an event's callout to its axis stub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub x: f64,
    pub y_from: f64,
    pub y_to: f64,
    /// Hex color of the event's year.
    pub color: String,
}

/// Axis pixel position of an event's date; `NaN` when the date is
/// missing or outside the scale domain.
fn axis_anchor(date: Option<NaiveDate>, scale: &AxisScale) -> f64 {
    date.map_or(f64::NAN, |d| scale.position(d))
}

/// Place the event at `index`. A date outside the scale domain (or a
/// missing date) maps to `NaN` and is clamped to `0`, a defined
/// position rather than a failure.
pub fn slot_for(index: usize, date: Option<NaiveDate>, scale: &AxisScale) -> SlotAssignment {
    let lane = Lane::for_index(index);
    SlotAssignment {
        lane,
        x: clamp_nan(axis_anchor(date, scale) - CALLOUT_WIDTH / 2.0),
        y: scale.vertical(lane.logical_y()),
    }
}

/// Connector for the event at `index`, running from the near-axis stub
/// to the callout's lane. Computed from the raw axis anchor so that an
/// unmappable date clamps the whole line to `0`, not to the callout
/// offset.
pub fn connector_for(
    index: usize,
    date: Option<NaiveDate>,
    slot: &SlotAssignment,
    scale: &AxisScale,
    color: &str,
) -> Connector {
    let stub = if index % 2 == 0 {
        -STUB_LOGICAL_Y
    } else {
        STUB_LOGICAL_Y
    };
    Connector {
        x: clamp_nan(axis_anchor(date, scale) - CALLOUT_WIDTH / 2.0 + CONNECTOR_OFFSET),
        y_from: scale.vertical(stub),
        y_to: scale.vertical(slot.lane.logical_y()),
        color: color.to_string(),
    }
}

fn clamp_nan(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}
