//! Dashboard reader: the aggregate view over stored issue reports.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
  Error, Result,
  issue::{IssueReport, IssueType, TypeFilter},
  store::{IssueSnapshot, IssueStore},
};

// ─── Counts ──────────────────────────────────────────────────────────────────

/// Number of reports per issue type. Types with no reports are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IssueCounts(BTreeMap<IssueType, u64>);

impl IssueCounts {
  pub fn tally<'a>(rows: impl IntoIterator<Item = &'a IssueReport>) -> Self {
    let mut counts = BTreeMap::new();
    for row in rows {
      *counts.entry(row.issue_type).or_insert(0) += 1;
    }
    Self(counts)
  }

  pub fn total(&self) -> u64 { self.0.values().sum() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Types by descending count; ties keep declaration order.
  pub fn ranked(&self) -> Vec<(IssueType, u64)> {
    let mut ranked: Vec<_> = self.0.iter().map(|(t, n)| (*t, *n)).collect();
    // Stable sort over the already type-ordered entries.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
  }

  /// Each type's percentage of the total, in [`ranked`](Self::ranked) order.
  pub fn shares(&self) -> Vec<(IssueType, f64)> {
    let total = self.total();
    if total == 0 {
      return Vec::new();
    }
    self
      .ranked()
      .into_iter()
      .map(|(t, n)| (t, n as f64 * 100.0 / total as f64))
      .collect()
  }
}

impl FromIterator<(IssueType, u64)> for IssueCounts {
  fn from_iter<I: IntoIterator<Item = (IssueType, u64)>>(iter: I) -> Self {
    Self(iter.into_iter().filter(|(_, n)| *n > 0).collect())
  }
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// Everything the summary view needs for one filter selection.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
  pub filter:         TypeFilter,
  pub total_count:    u64,
  pub rows:           Vec<IssueReport>,
  /// Computed over `rows`, so a type filter collapses this to a single
  /// entry.
  pub counts_by_type: IssueCounts,
}

/// Query the store for `filter` and compute the per-type breakdown.
pub async fn get_dashboard<S: IssueStore>(
  store: &S,
  filter: TypeFilter,
) -> Result<Dashboard> {
  let IssueSnapshot { rows, total_count } = store
    .snapshot_issues(filter.issue_type())
    .await
    .map_err(Error::storage)?;
  let counts_by_type = IssueCounts::tally(&rows);

  tracing::debug!(%filter, total_count, rows = rows.len(), "dashboard query");

  Ok(Dashboard { filter, total_count, rows, counts_by_type })
}

// ─── Map markers ─────────────────────────────────────────────────────────────

/// One map marker per stored report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
  pub id:        i64,
  pub latitude:  f64,
  pub longitude: f64,
  /// `<strong>{type}</strong><br>{description}<br>{location}`, with the
  /// user-supplied fields HTML-escaped.
  pub popup:     String,
}

impl From<IssueReport> for MapMarker {
  fn from(r: IssueReport) -> Self {
    Self {
      id:        r.id,
      latitude:  r.latitude,
      longitude: r.longitude,
      popup:     popup_html(&r),
    }
  }
}

fn popup_html(r: &IssueReport) -> String {
  format!(
    "<strong>{}</strong><br>{}<br>{}",
    r.issue_type,
    html_escape(&r.description),
    html_escape(&r.location),
  )
}

fn html_escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(ch),
    }
  }
  out
}

/// Markers for the full history of reports. The map ignores the dashboard
/// filter.
pub async fn map_markers<S: IssueStore>(store: &S) -> Result<Vec<MapMarker>> {
  let rows = store.list_issues(None).await.map_err(Error::storage)?;
  Ok(rows.into_iter().map(MapMarker::from).collect())
}
