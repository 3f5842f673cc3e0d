use serde::{Deserialize, Serialize};

// ── Issues ──

/// Ranked view of a citizen post, recomputed on every read.
///
/// Field names follow the admin client's wire contract, hence camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: i64,
    pub image: String,
    pub title: String,
    pub location: String,
    pub category: String,
    pub priority: i64,
    pub status: String,
    pub submitted: String,
    pub description: String,
    pub likes: i64,
    pub comment_count: i64,
    /// Alias of `comment_count`, kept as a separate wire field.
    pub reports_count: i64,
    pub engagement: String,
    pub time_ago: String,
    pub recent_reports: Vec<Report>,
}

// ── Reports ──

/// A projected comment on an issue, shown in the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub name: String,
    pub report: String,
    pub time_ago: String,
    pub avatar: String,
    pub image: Option<String>,
}
