use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::middleware::AuthContext;
use crate::error::{AppError, AppResult};
use crate::models::journal::{
    CreateJournalRequest, JournalEntry, JournalPage, JournalQuery, Mood, Tone,
};
use crate::models::motivation::Badge;
use crate::services::streak::{self, CheckinOutcome, PgMotivationStore};
use crate::services::{mood, tone};
use crate::AppState;

const PAGE_SIZE: usize = 20;
const SUMMARY_MAX_CHARS: usize = 60;

#[derive(Debug, Serialize)]
pub struct JournalResponse {
    pub entry: JournalEntry,
    pub mood: Mood,
    pub tone: Tone,
    pub reply: String,
    pub streak: i32,
    pub level: i32,
    pub awarded_badges: Vec<Badge>,
    pub badges: Vec<Badge>,
}

/// Submit a journal entry: classify its mood, record the daily check-in, and
/// compose the study buddy's reply.
pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<CreateJournalRequest>,
) -> AppResult<Json<JournalResponse>> {
    let content = body.content.trim().to_string();
    if content.is_empty() {
        return Err(AppError::Validation("content is required".into()));
    }
    if content.chars().count() > 2000 {
        return Err(AppError::Validation(
            "content must be at most 2000 characters".into(),
        ));
    }

    let tone = body.tone.unwrap_or_default();
    let mood = mood::classify(&content);

    let entry = sqlx::query_as::<_, JournalEntry>(
        r#"
        INSERT INTO journal_entries (id, tenant_id, user_id, content, mood, tone)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth.tenant_id)
    .bind(auth.user_id)
    .bind(&content)
    .bind(mood)
    .bind(tone)
    .fetch_one(&state.db)
    .await?;

    // Mood events are best-effort analytics; a failed insert never blocks
    // the entry.
    let payload = serde_json::json!({ "detected_at": Utc::now() });
    if let Err(e) = sqlx::query(
        r#"
        INSERT INTO mood_events (id, tenant_id, user_id, source, mood, payload)
        VALUES ($1, $2, $3, 'journal', $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth.tenant_id)
    .bind(auth.user_id)
    .bind(mood)
    .bind(&payload)
    .execute(&state.db)
    .await
    {
        tracing::warn!(error = %e, "mood event insert failed");
    }

    // A broken streak engine must never block saving the entry: degrade to
    // defaults and let the next check-in re-evaluate.
    let today = state.config.checkin_today(Utc::now());
    let store = PgMotivationStore::new(state.db.clone());
    let outcome =
        match streak::checkin_and_reward(&store, auth.tenant_id, auth.user_id, today).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "checkin failed");
                CheckinOutcome::degraded()
            }
        };

    let summary = summarize(&content);
    let reply = tone::render(tone, mood, Some(&summary));

    Ok(Json(JournalResponse {
        entry,
        mood,
        tone,
        reply,
        streak: outcome.streak_days,
        level: outcome.level,
        awarded_badges: outcome.awarded_badges,
        badges: outcome.badges,
    }))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<JournalQuery>,
) -> AppResult<Json<JournalPage>> {
    let limit = (PAGE_SIZE + 1) as i64;

    let rows = if let Some(cursor) = query.cursor {
        sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT * FROM journal_entries
            WHERE user_id = $1 AND created_at < $2
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(auth.user_id)
        .bind(cursor)
        .bind(limit)
        .fetch_all(&state.db)
        .await?
    } else {
        sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT * FROM journal_entries
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(auth.user_id)
        .bind(limit)
        .fetch_all(&state.db)
        .await?
    };

    let has_more = rows.len() > PAGE_SIZE;
    let entries: Vec<JournalEntry> = rows.into_iter().take(PAGE_SIZE).collect();
    let next_cursor = if has_more {
        entries.last().map(|e| e.created_at)
    } else {
        None
    };

    Ok(Json(JournalPage {
        entries,
        next_cursor,
    }))
}

/// Short preview of the entry for the "I noted" line.
fn summarize(content: &str) -> String {
    if content.chars().count() > SUMMARY_MAX_CHARS {
        let head: String = content.chars().take(SUMMARY_MAX_CHARS - 3).collect();
        format!("{head}...")
    } else {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_kept_verbatim() {
        assert_eq!(summarize("今天刷了两套题"), "今天刷了两套题");
    }

    #[test]
    fn exactly_sixty_chars_is_kept() {
        let content = "字".repeat(60);
        assert_eq!(summarize(&content), content);
    }

    #[test]
    fn long_content_is_truncated_with_ellipsis() {
        let content = "字".repeat(61);
        let summary = summarize(&content);
        assert_eq!(summary.chars().count(), 60);
        assert!(summary.ends_with("..."));
        assert!(summary.starts_with(&"字".repeat(57)));
    }
}
