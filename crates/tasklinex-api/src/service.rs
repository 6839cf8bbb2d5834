//! Signup and login orchestration.

use chrono::Duration;
use std::sync::Arc;
use tasklinex_auth::{hash_password, verify_password, TokenSigner};
use tasklinex_db::{AccountStore, NewAccount};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};

/// Default token window
const SESSION_WINDOW_MINUTES: i64 = 30;
/// Token window when the caller asks to be remembered
const REMEMBERED_WINDOW_DAYS: i64 = 15;

/// Orchestrates signup and login over the account store, the password
/// hasher and the token signer. Stateless between requests.
#[derive(Clone)]
pub struct AuthService {
    store: AccountStore,
    signer: Arc<TokenSigner>,
}

impl AuthService {
    pub fn new(store: AccountStore, signer: Arc<TokenSigner>) -> Self {
        Self { store, signer }
    }

    /// Register a new account. Issues no token.
    pub async fn signup(&self, req: SignupRequest) -> Result<SignupResponse, ApiError> {
        validate_signup(&req)?;

        // Friendly fast path; the UNIQUE constraint on email is the
        // authoritative guard under concurrent signups.
        if self.store.find_by_email(&req.email).await?.is_some() {
            return Err(ApiError::Conflict);
        }

        let password_hash = hash_password(&req.password)?;
        let id = Uuid::new_v4();

        let account = self
            .store
            .insert(NewAccount {
                id,
                email: req.email,
                password_hash,
                first_name: req.first_name,
                last_name: req.last_name,
                company_name: req.company_name,
            })
            .await?;

        info!(account_id = %account.id, "Account created");

        Ok(SignupResponse {
            message: "User created successfully".to_string(),
        })
    }

    /// Exchange credentials for a signed bearer token.
    ///
    /// Unknown email and wrong password both surface as
    /// `ApiError::InvalidCredentials`; the two paths are indistinguishable
    /// to the caller.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, ApiError> {
        let account = self
            .store
            .find_by_email(&req.email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !verify_password(&req.password, &account.password_hash)? {
            return Err(ApiError::InvalidCredentials);
        }

        let validity = if req.remember_me {
            Duration::days(REMEMBERED_WINDOW_DAYS)
        } else {
            Duration::minutes(SESSION_WINDOW_MINUTES)
        };

        let token = self
            .signer
            .issue(&account.email, &account.id.to_string(), validity)?;

        info!(account_id = %account.id, remember_me = req.remember_me, "Login succeeded");

        Ok(LoginResponse {
            access_token: token,
            token_type: "bearer".to_string(),
        })
    }
}

fn validate_signup(req: &SignupRequest) -> Result<(), ApiError> {
    if req.first_name.trim().is_empty() {
        return Err(ApiError::validation(
            "MISSING_FIRST_NAME",
            "First name must not be empty",
        ));
    }
    if req.last_name.trim().is_empty() {
        return Err(ApiError::validation(
            "MISSING_LAST_NAME",
            "Last name must not be empty",
        ));
    }
    if !is_valid_email(&req.email) {
        return Err(ApiError::validation(
            "INVALID_EMAIL",
            "Email address is not valid",
        ));
    }
    if req.password.is_empty() {
        return Err(ApiError::validation(
            "MISSING_PASSWORD",
            "Password must not be empty",
        ));
    }
    Ok(())
}

/// Syntactic email check: one '@', non-empty local part, dotted domain,
/// no whitespace. Deliverability is not our concern here.
fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
