//! # Eventline
//!
//! Deterministic layout engine for chronological event timeline visuals.
//!
//! Given a loosely-typed tabular snapshot and display configuration
//! from a hosting shell, the pipeline produces a fully resolved
//! geometric layout: the visible date window, a per-year color
//! assignment, the time-axis scale and tick scheme, and one vertical
//! lane slot plus connector segment per event. The host's rendering
//! layer consumes the [`Layout`] read-only to emit graphical
//! primitives; no drawing happens here.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use eventline::{
//!     ColumnDescriptor, Host, LayoutAssembler, SelectionHandle, TabularData, TimelineConfig,
//! };
//! use serde_json::json;
//!
//! struct Shell;
//!
//! impl Host for Shell {
//!     fn selection_handle(&self, row_index: usize) -> SelectionHandle {
//!         SelectionHandle::new(format!("row-{row_index}"))
//!     }
//!     fn validate_data_url(&self, url: &str) -> bool {
//!         url.starts_with("data:")
//!     }
//!     fn sanitize_markup(&self, markup: &str) -> String {
//!         markup.to_string()
//!     }
//! }
//!
//! let data = TabularData::new(
//!     vec![
//!         ColumnDescriptor { role: "Company".to_string() },
//!         ColumnDescriptor { role: "Date".to_string() },
//!     ],
//!     vec![vec![json!("Acme"), json!("2024-03-01")]],
//! );
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let layout = LayoutAssembler::default()
//!     .build(&Shell, &data, &TimelineConfig::default(), today)
//!     .unwrap();
//!
//! assert_eq!(layout.events.len(), 1);
//! ```
//!
//! ## Pipeline
//!
//! Data flows strictly through six stages, each a pure function of the
//! previous stage's output:
//!
//! 1. **Extraction** (`data`) — rows to validated [`Event`] records,
//!    capped at [`MAX_EVENTS`].
//! 2. **Window selection** (`window`) — configured look-back/forward
//!    window, with a data-driven fallback.
//! 3. **Color assignment** (`styles`) — one palette color per year,
//!    wrapping every 15 years.
//! 4. **Axis scale** (`layouts`) — month or year granularity, tick
//!    scheme, linear time-to-pixel mapping.
//! 5. **Slot placement** (`placement`) — four alternating vertical
//!    lanes and connector segments.
//! 6. **Assembly** (`pipeline`) — the immutable [`Layout`], rebuilt
//!    wholesale every cycle.

pub mod data;
pub mod errors;
pub mod host;
pub mod layouts;
pub mod pipeline;
pub mod placement;
pub mod styles;
pub mod window;

// Re-export key types for convenience
pub use data::{Event, EventKind, MAX_EVENTS};
pub use errors::{Result, TimelineError};
pub use host::{
    ColumnDescriptor, Host, LayoutMode, SelectionHandle, TabularData, TimelineConfig,
};
pub use layouts::{AxisScale, AxisTick, ChartLayout, Granularity, Margins};
pub use pipeline::{Layout, LayoutAssembler, PlacedEvent};
pub use placement::{Connector, Lane, SlotAssignment, CALLOUT_WIDTH};
pub use styles::{YearColors, BOUNDARY_TICK_COLOR, PALETTE};
pub use window::{select_window, DateWindow, WindowSelection};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
