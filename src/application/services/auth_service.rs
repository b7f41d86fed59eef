//! Token authentication and admin account bootstrap.
//!
//! API tokens are opaque bearer strings; only their HMAC-SHA256 digest is
//! stored, keyed by a server-side secret. Lookup happens by digest, so a
//! database leak alone does not expose usable tokens.

use crate::domain::entities::{CurrentUser, NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    signing_secret: String,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, signing_secret: String) -> Self {
        Self {
            users,
            signing_secret,
        }
    }

    /// Computes the hex-encoded HMAC-SHA256 digest of a token.
    pub fn hash_token(&self, token: &str) -> Result<String, AppError> {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .map_err(|_| AppError::internal("Token signing key rejected", json!({})))?;
        mac.update(token.as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Resolves a bearer token to its user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for unknown tokens and for tokens
    /// belonging to deactivated users.
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser, AppError> {
        let hash = self.hash_token(token)?;

        let user = self
            .users
            .find_by_token_hash(&hash)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid or revoked API token", json!({})))?;

        Ok(CurrentUser::from(&user))
    }

    /// Creates or refreshes the admin account from configuration.
    ///
    /// Runs once at startup. Re-running with a new token rotates the stored
    /// hash without touching the account's links or QR codes.
    pub async fn bootstrap_admin(
        &self,
        username: &str,
        email: &str,
        token: &str,
    ) -> Result<User, AppError> {
        let token_hash = self.hash_token(token)?;

        let user = self
            .users
            .upsert_by_username(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                is_admin: true,
                token_hash,
            })
            .await?;

        tracing::info!(username = %user.username, "admin account ready");

        Ok(user)
    }
}
