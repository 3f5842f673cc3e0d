use std::collections::{HashMap, HashSet};

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use civicdesk_shared::{Issue, Report};
use rusqlite::{Connection, OptionalExtension};

use crate::{error::ApiError, priority, timeago, AppState};

/// Shown when a post was submitted without a photo.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=80&h=80&fit=crop";

/// Issue status is not persisted yet; every issue reads as pending.
const DEFAULT_STATUS: &str = "Pending";

// ── Row types ──

struct PostRow {
    id: i64,
    title: String,
    location: String,
    description: String,
    image_url: Option<String>,
    likes_count: i64,
    comments_count: i64,
    created_at: String,
    tag_id: Option<i64>,
}

struct CommentRow {
    content: String,
    created_at: String,
    author_name: Option<String>,
    author_photo: Option<String>,
}

struct TagInfo {
    name: String,
    weight: f64,
}

// ── Category weight resolver ──

/// Resolves all distinct tag ids of a batch in one bulk query.
///
/// A failed lookup degrades every post in the batch to the default
/// category/weight instead of failing the listing; ids missing from the
/// returned map get the same treatment at projection time.
fn resolve_tags(conn: &Connection, tag_ids: &[i64]) -> HashMap<i64, TagInfo> {
    if tag_ids.is_empty() {
        return HashMap::new();
    }

    match query_tags(conn, tag_ids) {
        Ok(tags) => tags,
        Err(err) => {
            tracing::warn!(error = %err, "tag lookup failed, using default weights");
            HashMap::new()
        }
    }
}

fn query_tags(conn: &Connection, tag_ids: &[i64]) -> rusqlite::Result<HashMap<i64, TagInfo>> {
    let placeholders = vec!["?"; tag_ids.len()].join(", ");
    let mut stmt = conn.prepare(&format!(
        "SELECT id, name, weight FROM tags WHERE id IN ({placeholders})"
    ))?;

    let rows = stmt.query_map(rusqlite::params_from_iter(tag_ids.iter()), |row| {
        Ok((
            row.get::<_, i64>(0)?,
            TagInfo {
                name: row.get(1)?,
                weight: row.get(2)?,
            },
        ))
    })?;

    rows.collect()
}

// ── Projection ──

fn project_issue(
    post: &PostRow,
    tag: Option<&TagInfo>,
    now: DateTime<Utc>,
) -> Result<Issue, ApiError> {
    let created_at = timeago::parse_timestamp(&post.created_at).ok_or_else(|| {
        ApiError::Malformed(format!(
            "post {}: unparseable created_at {:?}",
            post.id, post.created_at
        ))
    })?;

    let (category, weight) = match tag {
        Some(tag) => (tag.name.clone(), tag.weight),
        None => (
            priority::DEFAULT_CATEGORY.to_string(),
            priority::DEFAULT_WEIGHT,
        ),
    };

    let age = timeago::time_ago(created_at, now);

    Ok(Issue {
        id: post.id,
        image: post
            .image_url
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        title: post.title.clone(),
        location: post.location.clone(),
        category,
        priority: priority::rounded_priority(post.likes_count, post.comments_count, weight),
        status: DEFAULT_STATUS.to_string(),
        submitted: age.clone(),
        description: post.description.clone(),
        likes: post.likes_count,
        comment_count: post.comments_count,
        reports_count: post.comments_count,
        engagement: priority::engagement_label(post.comments_count).to_string(),
        time_ago: age,
        recent_reports: Vec::new(),
    })
}

fn project_report(comment: &CommentRow, now: DateTime<Utc>) -> Result<Report, ApiError> {
    let created_at = timeago::parse_timestamp(&comment.created_at).ok_or_else(|| {
        ApiError::Malformed(format!(
            "comment: unparseable created_at {:?}",
            comment.created_at
        ))
    })?;

    // The avatar falls back to "U", not to the first letter of "Anonymous".
    let avatar = comment
        .author_name
        .as_deref()
        .and_then(|name| name.chars().next())
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "U".to_string());

    let name = comment
        .author_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or("Anonymous")
        .to_string();

    Ok(Report {
        name,
        report: comment.content.clone(),
        time_ago: timeago::time_ago(created_at, now),
        avatar,
        image: comment.author_photo.clone(),
    })
}

// ── Aggregation ──

const POST_COLUMNS: &str =
    "id, title, location, description, image_url, likes_count, comments_count, created_at, tag_id";

fn post_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        id: row.get(0)?,
        title: row.get(1)?,
        location: row.get(2)?,
        description: row.get(3)?,
        image_url: row.get(4)?,
        likes_count: row.get(5)?,
        comments_count: row.get(6)?,
        created_at: row.get(7)?,
        tag_id: row.get(8)?,
    })
}

/// Fetches the whole post collection, scores each post and returns the
/// projected issues sorted by priority descending.
///
/// The full-table fetch is kept deliberately; pagination would change the
/// external contract. One malformed record aborts the batch.
fn load_issues(conn: &Connection, now: DateTime<Utc>) -> Result<Vec<Issue>, ApiError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC"
    ))?;
    let posts = stmt
        .query_map([], |row| post_from_row(row))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let tag_ids: Vec<i64> = posts
        .iter()
        .filter_map(|post| post.tag_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let tags = resolve_tags(conn, &tag_ids);

    let mut issues = posts
        .iter()
        .map(|post| {
            let tag = post.tag_id.and_then(|id| tags.get(&id));
            project_issue(post, tag, now)
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Stable sort: equal priorities keep the created_at DESC fetch order.
    issues.sort_by(|a, b| b.priority.cmp(&a.priority));

    Ok(issues)
}

/// Fetches one post with its comments and returns the projected issue with
/// `recentReports` populated, oldest comment first.
fn load_issue_detail(conn: &Connection, id: i64, now: DateTime<Utc>) -> Result<Issue, ApiError> {
    let post = conn
        .query_row(
            &format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1"),
            [id],
            |row| post_from_row(row),
        )
        .optional()?
        .ok_or(ApiError::NotFound)?;

    let tag_ids: Vec<i64> = post.tag_id.into_iter().collect();
    let tags = resolve_tags(conn, &tag_ids);
    let tag = post.tag_id.and_then(|id| tags.get(&id));

    let mut issue = project_issue(&post, tag, now)?;

    let mut stmt = conn.prepare(
        "SELECT c.content, c.created_at, u.display_name, u.photo_url
         FROM post_comments c
         LEFT JOIN users u ON c.user_id = u.id
         WHERE c.post_id = ?1
         ORDER BY c.created_at ASC",
    )?;
    let comments = stmt
        .query_map([id], |row| {
            Ok(CommentRow {
                content: row.get(0)?,
                created_at: row.get(1)?,
                author_name: row.get(2)?,
                author_photo: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    issue.recent_reports = comments
        .iter()
        .map(|comment| project_report(comment, now))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(issue)
}

// ── Handlers ──

/// GET /api/issues
pub async fn list_issues(State(state): State<AppState>) -> Result<Json<Vec<Issue>>, ApiError> {
    let pool = state.db.clone();

    let issues = tokio::task::spawn_blocking(move || {
        let conn = pool.get()?;
        load_issues(&conn, Utc::now())
    })
    .await??;

    tracing::debug!(count = issues.len(), "issues listed");
    Ok(Json(issues))
}

/// GET /api/issues/{id}
pub async fn get_issue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Issue>, ApiError> {
    let pool = state.db.clone();

    let issue = tokio::task::spawn_blocking(move || {
        let conn = pool.get()?;
        load_issue_detail(&conn, id, Utc::now())
    })
    .await??;

    Ok(Json(issue))
}
