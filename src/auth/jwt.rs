use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Claims minted by the external auth provider with the shared secret. The
/// `tenant_id` claim carries the active workspace picked at sign-in.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub tenant_id: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::Unauthorized)
}

/// Mint a token locally. Production tokens come from the auth provider;
/// this exists for local development and tests.
#[allow(dead_code)]
pub fn create_access_token(
    user_id: Uuid,
    tenant_id: Uuid,
    email: &str,
    ttl_secs: i64,
    config: &Config,
) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        tenant_id,
        email: email.to_string(),
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create access token: {}", e)))
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn test_config(secret: &str) -> Config {
        Config {
            database_url: String::new(),
            host: "127.0.0.1".into(),
            port: 8080,
            frontend_url: String::new(),
            jwt_secret: secret.into(),
            checkin_offset: FixedOffset::east_opt(9 * 3600).unwrap(),
        }
    }

    #[test]
    fn token_round_trips() {
        let config = test_config("round-trip-secret");
        let (user_id, tenant_id) = (Uuid::new_v4(), Uuid::new_v4());

        let token =
            create_access_token(user_id, tenant_id, "ada@example.com", 900, &config).unwrap();
        let data = verify_token(&token, &config).unwrap();

        assert_eq!(data.claims.sub, user_id);
        assert_eq!(data.claims.tenant_id, tenant_id);
        assert_eq!(data.claims.email, "ada@example.com");
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config("expired-secret");
        let token =
            create_access_token(Uuid::new_v4(), Uuid::new_v4(), "", -120, &config).unwrap();

        assert!(matches!(
            verify_token(&token, &config),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = test_config("secret-a");
        let other = test_config("secret-b");
        let token = create_access_token(Uuid::new_v4(), Uuid::new_v4(), "", 900, &config).unwrap();

        assert!(verify_token(&token, &other).is_err());
    }
}
