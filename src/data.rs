//! Event extraction from the host's tabular snapshot

use crate::host::{Host, SelectionHandle, TabularData};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Hard cap on processed events; excess rows are dropped in input order.
pub const MAX_EVENTS: usize = 100;

/// Category of a timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EventKind {
    Regulatory,
    Commercial,
    ClinicalTrials,
    Launch,
    #[default]
    Unknown,
}

impl EventKind {
    /// Parse a type cell. Unrecognized or missing values fall back to
    /// [`EventKind::Unknown`].
    pub fn parse(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "regulatory" => Self::Regulatory,
            "commercial" => Self::Commercial,
            "clinical trials" | "clinicaltrials" => Self::ClinicalTrials,
            "launch" => Self::Launch,
            _ => Self::Unknown,
        }
    }
}

/// One timeline entry derived from a table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub company: String,
    pub kind: EventKind,
    pub description: Option<String>,
    pub company_link: Option<String>,
    /// `None` when the date cell is missing or unparsable; such events
    /// never contribute to date-range computations.
    pub date: Option<NaiveDate>,
    pub header_image: Option<String>,
    pub footer_image: Option<String>,
    pub identity: SelectionHandle,
}

/// Named column roles the extractor recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnRole {
    Company,
    Type,
    Description,
    CompanyLink,
    Date,
    HeaderImage,
    FooterImage,
}

impl ColumnRole {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Company" => Some(Self::Company),
            "Type" => Some(Self::Type),
            "Description" => Some(Self::Description),
            "CompanyLink" => Some(Self::CompanyLink),
            "Date" => Some(Self::Date),
            "HeaderImage" => Some(Self::HeaderImage),
            "FooterImage" => Some(Self::FooterImage),
            _ => None,
        }
    }
}

/// Role-to-column-index mapping; first matching column per role wins.
#[derive(Debug, Default)]
struct RoleMap {
    company: Option<usize>,
    kind: Option<usize>,
    description: Option<usize>,
    company_link: Option<usize>,
    date: Option<usize>,
    header_image: Option<usize>,
    footer_image: Option<usize>,
}

impl RoleMap {
    fn from_table(table: &TabularData) -> Self {
        let mut map = Self::default();
        for (index, column) in table.columns.iter().enumerate() {
            let Some(role) = ColumnRole::from_name(&column.role) else {
                continue;
            };
            let slot = match role {
                ColumnRole::Company => &mut map.company,
                ColumnRole::Type => &mut map.kind,
                ColumnRole::Description => &mut map.description,
                ColumnRole::CompanyLink => &mut map.company_link,
                ColumnRole::Date => &mut map.date,
                ColumnRole::HeaderImage => &mut map.header_image,
                ColumnRole::FooterImage => &mut map.footer_image,
            };
            if slot.is_none() {
                *slot = Some(index);
            }
        }
        map
    }
}

/// Converts host table rows into [`Event`] records.
pub struct EventExtractor<'a> {
    host: &'a dyn Host,
}

impl<'a> EventExtractor<'a> {
    pub fn new(host: &'a dyn Host) -> Self {
        Self { host }
    }

    /// Extract one event per row, preserving row order and applying the
    /// [`MAX_EVENTS`] cap. Malformed cells degrade to defaults; this
    /// never fails.
    pub fn extract(&self, table: &TabularData) -> Vec<Event> {
        let roles = RoleMap::from_table(table);
        if table.rows.len() > MAX_EVENTS {
            warn!(
                rows = table.rows.len(),
                cap = MAX_EVENTS,
                "row count exceeds cap; dropping overflow rows"
            );
        }
        table
            .rows
            .iter()
            .take(MAX_EVENTS)
            .enumerate()
            .map(|(row_index, row)| self.event_from_row(&roles, row, row_index))
            .collect()
    }

    fn event_from_row(&self, roles: &RoleMap, row: &[Value], row_index: usize) -> Event {
        let company = cell_text(row, roles.company)
            .map(|text| self.host.sanitize_markup(&text))
            .unwrap_or_default();
        let kind = cell_text(row, roles.kind)
            .map(|text| EventKind::parse(&text))
            .unwrap_or_default();
        let description =
            cell_text(row, roles.description).map(|text| self.host.sanitize_markup(&text));
        let company_link =
            cell_text(row, roles.company_link).map(|text| self.host.sanitize_markup(&text));
        let date = roles
            .date
            .and_then(|index| row.get(index))
            .and_then(|cell| {
                let parsed = parse_date_cell(cell);
                if parsed.is_none() && !cell.is_null() {
                    warn!(row = row_index, cell = %cell, "unparsable date cell");
                }
                parsed
            });

        Event {
            company,
            kind,
            description,
            company_link,
            date,
            header_image: self.image_cell(row, roles.header_image, row_index),
            footer_image: self.image_cell(row, roles.footer_image, row_index),
            identity: self.host.selection_handle(row_index),
        }
    }

    fn image_cell(&self, row: &[Value], index: Option<usize>, row_index: usize) -> Option<String> {
        let url = cell_text(row, index)?;
        if self.host.validate_data_url(&url) {
            Some(url)
        } else {
            warn!(row = row_index, "discarding malformed image data URL");
            None
        }
    }
}

/// Coerce a cell to text. Strings pass through, numbers and booleans
/// are formatted, null and structured values yield `None`.
fn cell_text(row: &[Value], index: Option<usize>) -> Option<String> {
    match row.get(index?)? {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parse the host's serialized date forms: epoch milliseconds, RFC 3339
/// strings, or plain `YYYY-MM-DD` strings.
fn parse_date_cell(cell: &Value) -> Option<NaiveDate> {
    match cell {
        Value::Number(number) => {
            let millis = number.as_i64().or_else(|| number.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
        }
        Value::String(text) => {
            let text = text.trim();
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                return Some(parsed.date_naive());
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::StubHost;
    use crate::host::ColumnDescriptor;
    use serde_json::json;

    fn table(columns: &[&str], rows: Vec<Vec<Value>>) -> TabularData {
        TabularData::new(
            columns
                .iter()
                .map(|role| ColumnDescriptor {
                    role: role.to_string(),
                })
                .collect(),
            rows,
        )
    }

    #[test]
    fn extracts_rows_in_order_with_handles() {
        let data = table(
            &["Company", "Type", "Date"],
            vec![
                vec![json!("Acme"), json!("Launch"), json!("2023-04-01")],
                vec![json!("Globex"), json!("Regulatory"), json!("2024-01-15")],
            ],
        );
        let events = EventExtractor::new(&StubHost).extract(&data);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].company, "Acme");
        assert_eq!(events[0].kind, EventKind::Launch);
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2023, 4, 1));
        assert_eq!(events[0].identity.token(), "row-0");
        assert_eq!(events[1].identity.token(), "row-1");
    }

    #[test]
    fn caps_rows_at_limit_preserving_prefix() {
        let rows: Vec<Vec<Value>> = (0..150)
            .map(|i| vec![json!(format!("Company {i}")), json!("2024-06-01")])
            .collect();
        let data = table(&["Company", "Date"], rows);
        let events = EventExtractor::new(&StubHost).extract(&data);
        assert_eq!(events.len(), MAX_EVENTS);
        assert_eq!(events[0].company, "Company 0");
        assert_eq!(events[99].company, "Company 99");
    }

    #[test]
    fn missing_company_yields_empty_string() {
        let data = table(&["Company", "Date"], vec![vec![json!(null), json!("2024-06-01")]]);
        let events = EventExtractor::new(&StubHost).extract(&data);
        assert_eq!(events[0].company, "");
    }

    #[test]
    fn numeric_company_is_stringified() {
        let data = table(&["Company"], vec![vec![json!(42)]]);
        let events = EventExtractor::new(&StubHost).extract(&data);
        assert_eq!(events[0].company, "42");
    }

    #[test]
    fn unparsable_date_becomes_none() {
        let data = table(
            &["Company", "Date"],
            vec![vec![json!("Acme"), json!("sometime next year")]],
        );
        let events = EventExtractor::new(&StubHost).extract(&data);
        assert_eq!(events[0].date, None);
    }

    #[test]
    fn epoch_millis_dates_parse() {
        // 2022-03-01T00:00:00Z
        let data = table(&["Company", "Date"], vec![vec![json!("Acme"), json!(1646092800000i64)]]);
        let events = EventExtractor::new(&StubHost).extract(&data);
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2022, 3, 1));
    }

    #[test]
    fn first_matching_column_wins_for_duplicate_roles() {
        let data = table(
            &["Company", "Company"],
            vec![vec![json!("First"), json!("Second")]],
        );
        let events = EventExtractor::new(&StubHost).extract(&data);
        assert_eq!(events[0].company, "First");
    }

    #[test]
    fn invalid_image_urls_are_dropped() {
        let data = table(
            &["Company", "HeaderImage", "FooterImage"],
            vec![vec![
                json!("Acme"),
                json!("data:image/png;base64,iVBORw0KGgo="),
                json!("javascript:alert(1)"),
            ]],
        );
        let events = EventExtractor::new(&StubHost).extract(&data);
        assert!(events[0].header_image.is_some());
        assert!(events[0].footer_image.is_none());
    }

    #[test]
    fn free_text_fields_are_sanitized() {
        let data = table(
            &["Company", "Description"],
            vec![vec![json!("<b>Acme</b>"), json!("<script>x</script>")]],
        );
        let events = EventExtractor::new(&StubHost).extract(&data);
        assert_eq!(events[0].company, "&lt;b&gt;Acme&lt;/b&gt;");
        assert_eq!(
            events[0].description.as_deref(),
            Some("&lt;script&gt;x&lt;/script&gt;")
        );
    }

    #[test]
    fn unknown_kind_for_unrecognized_type() {
        assert_eq!(EventKind::parse("Merger"), EventKind::Unknown);
        assert_eq!(EventKind::parse("Clinical Trials"), EventKind::ClinicalTrials);
        assert_eq!(EventKind::parse("launch"), EventKind::Launch);
    }
}
