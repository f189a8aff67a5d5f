use anyhow::Context;
use tracing::{info, warn};

use super::dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest};
use super::repo_types::NewUser;
use crate::{
    db::StoreError,
    error::{AppError, AppResult},
    state::AppState,
};

pub const REGISTER_FIELDS_REQUIRED: &str = "Username, password, and email are required";
pub const LOGIN_FIELDS_REQUIRED: &str = "Username and password are required";
pub const USER_EXISTS: &str = "User already exists";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Trimmed, non-empty text field.
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Passwords are kept verbatim but must not be blank.
fn required_secret(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn register(state: &AppState, req: RegisterRequest) -> AppResult<PublicUser> {
    let (Some(username), Some(password), Some(email)) = (
        required(req.username),
        required_secret(req.password),
        required(req.email),
    ) else {
        warn!("registration with missing fields");
        return Err(AppError::validation(REGISTER_FIELDS_REQUIRED));
    };

    let passwords = state.passwords.clone();
    let password_hash = tokio::task::spawn_blocking(move || passwords.hash(&password))
        .await
        .context("join hash task")??;

    let new_user = NewUser {
        username: &username,
        email: &email,
        password_hash: &password_hash,
    };
    match state.users.insert(new_user).await {
        Ok(user) => {
            info!(user_id = %user.id, username = %user.username, "user registered");
            Ok(user.into())
        }
        Err(StoreError::UniqueViolation { constraint }) => {
            warn!(%constraint, %username, "registration conflict");
            Err(AppError::conflict(USER_EXISTS))
        }
        Err(e) => Err(anyhow::Error::new(e).context("insert user").into()),
    }
}

pub async fn login(state: &AppState, req: LoginRequest) -> AppResult<LoginResponse> {
    let (Some(username), Some(password)) = (required(req.username), required_secret(req.password))
    else {
        return Err(AppError::validation(LOGIN_FIELDS_REQUIRED));
    };

    let user = state
        .users
        .find_by_username(&username)
        .await
        .context("find user by username")?;

    let passwords = state.passwords.clone();
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let verified = tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => passwords.verify(&password, &hash),
        None => Ok(passwords.verify_dummy(&password)),
    })
    .await
    .context("join verify task")??;

    let user = match user {
        Some(user) if verified => user,
        Some(user) => {
            warn!(user_id = %user.id, "login invalid password");
            return Err(AppError::auth(INVALID_CREDENTIALS));
        }
        None => {
            warn!(%username, "login unknown username");
            return Err(AppError::auth(INVALID_CREDENTIALS));
        }
    };

    let token = state.keys.sign(user.id)?;
    info!(user_id = %user.id, "user logged in");
    Ok(LoginResponse {
        token,
        user: user.into(),
    })
}
