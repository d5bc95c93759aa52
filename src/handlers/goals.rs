use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthContext;
use crate::error::{AppError, AppResult};
use crate::models::goal::{CreateGoalRequest, GoalStatus, LearningGoal, UpdateGoalRequest};
use crate::AppState;

pub async fn list_goals(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> AppResult<Json<Vec<LearningGoal>>> {
    let goals = sqlx::query_as::<_, LearningGoal>(
        r#"
        SELECT * FROM learning_goals
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(auth.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(goals))
}

pub async fn get_goal(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(goal_id): Path<Uuid>,
) -> AppResult<Json<LearningGoal>> {
    let goal = fetch_owned_goal(&state, &auth, goal_id).await?;
    Ok(Json(goal))
}

pub async fn create_goal(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<CreateGoalRequest>,
) -> AppResult<Json<LearningGoal>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let current_level = body.current_level.unwrap_or(1);
    let target_level = body.target_level.unwrap_or(10);
    if current_level >= target_level {
        return Err(AppError::Validation(
            "target_level must be higher than current_level".into(),
        ));
    }

    let goal = sqlx::query_as::<_, LearningGoal>(
        r#"
        INSERT INTO learning_goals
            (id, tenant_id, user_id, title, description, goal_type, current_level, target_level, target_date, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth.tenant_id)
    .bind(auth.user_id)
    .bind(&body.title)
    .bind(&body.description)
    .bind(body.goal_type)
    .bind(current_level)
    .bind(target_level)
    .bind(body.target_date)
    .bind(GoalStatus::default())
    .fetch_one(&state.db)
    .await?;

    Ok(Json(goal))
}

pub async fn update_goal(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(goal_id): Path<Uuid>,
    Json(body): Json<UpdateGoalRequest>,
) -> AppResult<Json<LearningGoal>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let existing = fetch_owned_goal(&state, &auth, goal_id).await?;

    let current_level = body.current_level.unwrap_or(existing.current_level);
    let target_level = body.target_level.unwrap_or(existing.target_level);
    if current_level >= target_level {
        return Err(AppError::Validation(
            "target_level must be higher than current_level".into(),
        ));
    }

    let goal = sqlx::query_as::<_, LearningGoal>(
        r#"
        UPDATE learning_goals SET
            title = COALESCE($3, title),
            description = COALESCE($4, description),
            goal_type = COALESCE($5, goal_type),
            current_level = $6,
            target_level = $7,
            target_date = COALESCE($8, target_date),
            status = COALESCE($9, status),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(goal_id)
    .bind(auth.user_id)
    .bind(&body.title)
    .bind(&body.description)
    .bind(body.goal_type)
    .bind(current_level)
    .bind(target_level)
    .bind(body.target_date)
    .bind(body.status)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(goal))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(goal_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let _goal = fetch_owned_goal(&state, &auth, goal_id).await?;

    sqlx::query("DELETE FROM learning_goals WHERE id = $1 AND user_id = $2")
        .bind(goal_id)
        .bind(auth.user_id)
        .execute(&state.db)
        .await?;

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Load a goal by id, distinguishing "does not exist" from "belongs to
/// someone else".
async fn fetch_owned_goal(
    state: &AppState,
    auth: &AuthContext,
    goal_id: Uuid,
) -> AppResult<LearningGoal> {
    let goal = sqlx::query_as::<_, LearningGoal>("SELECT * FROM learning_goals WHERE id = $1")
        .bind(goal_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("Goal not found".into()))?;

    if goal.user_id != auth.user_id {
        return Err(AppError::Forbidden);
    }

    Ok(goal)
}
