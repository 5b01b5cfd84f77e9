//! View types for page rendering.
//!
//! These types are purpose-built for Askama templates: they carry
//! pre-formatted strings and computed fields so templates stay simple.

use health_core::{
  dashboard::{IssueCounts, MapMarker},
  issue::{IssueReport, IssueType, TypeFilter},
};
use serde::Serialize;
use strum::IntoEnumIterator as _;

/// Serialise `value` for embedding inside a `<script>` element.
///
/// `<` is emitted as a JSON unicode escape so user text can never close the
/// script tag.
pub fn script_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
  Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

// ── Flash ───────────────────────────────────────────────────────

/// One-shot message shown above the form after a submission.
pub struct Flash {
  /// CSS modifier: `success` or `error`.
  pub kind:    &'static str,
  pub message: String,
}

impl Flash {
  pub fn success(message: impl Into<String>) -> Self {
    Self { kind: "success", message: message.into() }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self { kind: "error", message: message.into() }
  }
}

// ── Select options ──────────────────────────────────────────────

pub struct SelectOption {
  pub value:    &'static str,
  pub selected: bool,
}

/// The report form's issue-type choices.
pub fn type_options(selected: Option<IssueType>) -> Vec<SelectOption> {
  IssueType::iter()
    .map(|t| SelectOption { value: t.as_str(), selected: Some(t) == selected })
    .collect()
}

/// The dashboard filter choices: `All` followed by every type.
pub fn filter_options(selected: TypeFilter) -> Vec<SelectOption> {
  std::iter::once(TypeFilter::All)
    .chain(IssueType::iter().map(TypeFilter::Only))
    .map(|f| SelectOption {
      value:    match f {
        TypeFilter::All => "All",
        TypeFilter::Only(t) => t.as_str(),
      },
      selected: f == selected,
    })
    .collect()
}

// ── Form ────────────────────────────────────────────────────────

/// Values to pre-fill the report form with. Kept after a rejection so the
/// user can correct the location without retyping.
#[derive(Default)]
pub struct FormValues {
  pub types:       Vec<SelectOption>,
  pub location:    String,
  pub description: String,
}

impl FormValues {
  pub fn blank() -> Self {
    Self { types: type_options(None), ..Self::default() }
  }

  pub fn refill(issue_type: Option<IssueType>, location: String, description: String) -> Self {
    Self { types: type_options(issue_type), location, description }
  }
}

// ── Table ───────────────────────────────────────────────────────

/// One row of the reported-issues table.
pub struct IssueRow {
  pub id:          i64,
  pub issue_type:  &'static str,
  pub location:    String,
  pub description: String,
  pub latitude:    String,
  pub longitude:   String,
}

impl From<IssueReport> for IssueRow {
  fn from(r: IssueReport) -> Self {
    Self {
      id:          r.id,
      issue_type:  r.issue_type.as_str(),
      location:    r.location,
      description: r.description,
      latitude:    format_degrees(r.latitude),
      longitude:   format_degrees(r.longitude),
    }
  }
}

fn format_degrees(v: f64) -> String { format!("{v:.6}") }

// ── Charts ──────────────────────────────────────────────────────

/// Data for the bar and pie charts, in descending count order.
#[derive(Debug, Serialize, PartialEq)]
pub struct ChartData {
  pub labels:     Vec<&'static str>,
  pub counts:     Vec<u64>,
  /// Pie legend labels with the one-decimal percentage, e.g. `Flu (60.0%)`.
  pub pie_labels: Vec<String>,
}

impl From<&IssueCounts> for ChartData {
  fn from(counts: &IssueCounts) -> Self {
    let ranked = counts.ranked();
    Self {
      labels:     ranked.iter().map(|(t, _)| t.as_str()).collect(),
      counts:     ranked.iter().map(|(_, n)| *n).collect(),
      pie_labels: counts
        .shares()
        .into_iter()
        .map(|(t, pct)| format!("{t} ({pct:.1}%)"))
        .collect(),
    }
  }
}

// ── Map ─────────────────────────────────────────────────────────

/// A marker in the shape the page script hands to Leaflet.
#[derive(Debug, Serialize, PartialEq)]
pub struct MarkerView<'a> {
  pub lat:   f64,
  pub lon:   f64,
  pub popup: &'a str,
}

impl<'a> From<&'a MapMarker> for MarkerView<'a> {
  fn from(marker: &'a MapMarker) -> Self {
    Self { lat: marker.latitude, lon: marker.longitude, popup: &marker.popup }
  }
}
