use axum::{Extension, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::middleware::AuthContext;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub email: Option<String>,
}

/// Echo the verified session context so clients can confirm which user and
/// workspace their token resolves to.
pub async fn session(Extension(auth): Extension<AuthContext>) -> Json<SessionResponse> {
    Json(SessionResponse {
        user_id: auth.user_id,
        tenant_id: auth.tenant_id,
        email: auth.email,
    })
}
