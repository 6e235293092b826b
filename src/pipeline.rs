//! Layout assembly: the full data-to-geometry pipeline

use crate::data::{Event, EventExtractor};
use crate::errors::Result;
use crate::host::{Host, TabularData, TimelineConfig};
use crate::layouts::{AxisScale, ChartLayout};
use crate::placement::{connector_for, slot_for, Connector, SlotAssignment};
use crate::styles::{YearColors, BOUNDARY_TICK_COLOR};
use crate::window::{select_window, DateWindow};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One event with its resolved geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedEvent {
    pub event: Event,
    pub slot: SlotAssignment,
    pub connector: Connector,
}

/// Fully resolved, immutable layout for one render cycle.
///
/// A new `Layout` is built from scratch on every update; nothing is
/// cached or mutated across cycles. The empty layout is the valid
/// "nothing to draw" terminal state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub window: Option<DateWindow>,
    pub colors: YearColors,
    pub scale: Option<AxisScale>,
    pub events: Vec<PlacedEvent>,
}

impl Layout {
    /// The no-render layout.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Runs the pipeline: extraction, window selection, color assignment,
/// axis scale construction, slot placement, composition.
pub struct LayoutAssembler {
    chart: ChartLayout,
}

impl Default for LayoutAssembler {
    fn default() -> Self {
        Self::new(ChartLayout::default())
    }
}

impl LayoutAssembler {
    pub fn new(chart: ChartLayout) -> Self {
        Self { chart }
    }

    pub fn chart(&self) -> &ChartLayout {
        &self.chart
    }

    /// Build the layout for one update cycle.
    ///
    /// `today` anchors the candidate window; the host supplies it so
    /// the pipeline stays a pure function of its inputs. Returns the
    /// empty layout when nothing qualifies for rendering. The only
    /// error path is a year-color lookup miss, which signals a window
    /// construction defect rather than bad input.
    pub fn build(
        &self,
        host: &dyn Host,
        table: &TabularData,
        config: &TimelineConfig,
        today: NaiveDate,
    ) -> Result<Layout> {
        let events = EventExtractor::new(host).extract(table);
        debug!(events = events.len(), "extracted events");

        let Some(selection) = select_window(events, today, config) else {
            debug!("no dated events; producing empty layout");
            return Ok(Layout::empty());
        };

        let colors = YearColors::assign(&selection.window);
        let scale = AxisScale::build(&selection.window, &colors, &self.chart)?;

        let mut placed = Vec::with_capacity(selection.events.len());
        for (index, event) in selection.events.into_iter().enumerate() {
            let slot = slot_for(index, event.date, &scale);
            let color = match event.date {
                Some(date) => colors.require(date.year())?,
                // Dateless events survive only the fallback path; their
                // connector takes the neutral boundary color.
                None => BOUNDARY_TICK_COLOR,
            };
            let connector = connector_for(index, event.date, &slot, &scale, color);
            placed.push(PlacedEvent {
                event,
                slot,
                connector,
            });
        }

        debug!(
            events = placed.len(),
            min = %selection.window.min,
            max = %selection.window.max,
            granularity = ?scale.granularity,
            "assembled layout"
        );
        Ok(Layout {
            window: Some(selection.window),
            colors,
            scale: Some(scale),
            events: placed,
        })
    }
}
