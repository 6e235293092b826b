//! Interfaces supplied by the hosting visual shell
//!
//! The layout engine never talks to the rendering surface or the data
//! platform directly. The host hands it a loosely-typed table snapshot,
//! a configuration struct, and a small capability set (selection
//! handles, data-URL validation, markup sanitization) behind the
//! [`Host`] trait.

use serde::{Deserialize, Serialize};

/// Opaque per-row selection token minted by the host.
///
/// The engine attaches one to every extracted event and passes it
/// through unchanged; it never inspects the contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionHandle(String);

impl SelectionHandle {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

/// Capability set injected by the hosting shell.
pub trait Host {
    /// Mint the opaque identity for one source row.
    fn selection_handle(&self, row_index: usize) -> SelectionHandle;

    /// Check that a string is a well-formed data URL.
    fn validate_data_url(&self, url: &str) -> bool;

    /// Neutralize user-supplied text before it reaches a rendering surface.
    fn sanitize_markup(&self, markup: &str) -> String;
}

/// One column of the host's tabular dataset, identified by its role name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub role: String,
}

/// Raw tabular snapshot as delivered by the host.
///
/// Cells are loosely typed; the extractor coerces them with defined
/// fallbacks rather than rejecting rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabularData {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl TabularData {
    pub fn new(columns: Vec<ColumnDescriptor>, rows: Vec<Vec<serde_json::Value>>) -> Self {
        Self { columns, rows }
    }
}

/// Which decorative image slot the callouts render, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    #[default]
    None,
    Header,
    Footer,
}

/// Display configuration read from the host's property pane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Image slot shown on event callouts.
    pub layout_mode: LayoutMode,
    /// Whole years before the current year included in the candidate window.
    pub years_back: u32,
    /// Whole years after the current year included in the candidate window.
    pub years_forward: u32,
    /// Render descriptions as rich markup with icons instead of plain text.
    pub rich_content: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            layout_mode: LayoutMode::None,
            years_back: 1,
            years_forward: 8,
            rich_content: false,
        }
    }
}
