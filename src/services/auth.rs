//! Authentication
//!
//! Password check against the shared demo password, JWT issuance carrying the
//! user's profile, and token verification for the auth guard.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::validation::{EMAIL_REQUIRED, INVALID_CREDENTIALS};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{LoginResponse, User};
use crate::repository::Database;

/// Token payload: the user's public fields plus issue and expiry times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub user: User,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn new(user: User, expires_in_secs: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            user,
            iat: now,
            exp: now.saturating_add(i64::try_from(expires_in_secs).unwrap_or(i64::MAX)),
        }
    }
}

impl From<Claims> for User {
    fn from(claims: Claims) -> Self {
        claims.user
    }
}

/// Signs and verifies HS256 tokens with the configured secret.
#[derive(Clone)]
pub struct Authenticator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_secs: u64,
    password: String,
}

impl Authenticator {
    pub fn new(secret: &str, expires_in_secs: u64, password: impl Into<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expires_in_secs,
            password: password.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_secret,
            config.jwt_expires_in_secs,
            config.auth_password.clone(),
        )
    }

    /// Checks email and password, then issues a token for the matching user.
    ///
    /// The password is compared before the lookup, so a wrong password never
    /// reveals whether the email exists.
    pub async fn login(
        &self,
        db: &Database,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<LoginResponse> {
        let email = match email {
            Some(email) if !email.is_empty() => email,
            _ => return Err(ApiError::Validation(EMAIL_REQUIRED.to_string())),
        };
        if password != Some(self.password.as_str()) {
            return Err(ApiError::Validation(INVALID_CREDENTIALS.to_string()));
        }

        let user = db
            .find_user_by_email(email)
            .await
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let token = self.issue(&user)?;
        info!(user_id = %user.id, email = %user.email, "User logged in");
        Ok(LoginResponse { token, user })
    }

    pub fn issue(&self, user: &User) -> Result<String> {
        self.sign(&Claims::new(user.clone(), self.expires_in_secs))
    }

    pub fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("failed to sign token: {e}")))
    }

    /// Verifies signature and expiry and returns the embedded user.
    pub fn verify_token(&self, token: &str) -> Result<User> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.into())
            .map_err(|e| {
                debug!(error = %e, "JWT verification failed");
                ApiError::Unauthorized("Invalid or expired token".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::NewUser;
    use uuid::Uuid;

    fn authenticator() -> Authenticator {
        Authenticator::new("test-secret", 3600, "onerail")
    }

    async fn db_with_user() -> (Database, User) {
        let db = Database::new();
        let user = db
            .create_user(NewUser {
                first_name: "Alex".into(),
                last_name: "Smith".into(),
                email: "alex@acme.io".into(),
                date_created: None,
                organization_id: Uuid::new_v4(),
            })
            .await
            .unwrap();
        (db, user)
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let (db, user) = db_with_user().await;
        let auth = authenticator();

        let response = auth
            .login(&db, Some("alex@acme.io"), Some("onerail"))
            .await
            .unwrap();
        assert_eq!(response.user, user);
        assert_eq!(auth.verify_token(&response.token).unwrap(), user);
    }

    #[tokio::test]
    async fn test_login_errors() {
        let (db, _) = db_with_user().await;
        let auth = authenticator();

        let err = auth.login(&db, None, Some("onerail")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m == "email is required"));

        let err = auth
            .login(&db, Some("alex@acme.io"), Some("wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m == "invalid credentials"));

        let err = auth
            .login(&db, Some("nobody@acme.io"), Some("onerail"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "User not found"));
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let (_, user) = db_with_user().await;
        let auth = authenticator();
        let now = Utc::now().timestamp();
        let token = auth
            .sign(&Claims {
                user,
                iat: now - 7200,
                exp: now - 3600,
            })
            .unwrap();

        let err = auth.verify_token(&token).unwrap_err();
        assert_eq!(err.to_string(), "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_token_from_other_secret_rejected() {
        let (_, user) = db_with_user().await;
        let token = Authenticator::new("other", 3600, "onerail")
            .issue(&user)
            .unwrap();

        assert!(matches!(
            authenticator().verify_token(&token),
            Err(ApiError::Unauthorized(_))
        ));
        assert!(authenticator().verify_token("not.a.jwt").is_err());
    }
}
