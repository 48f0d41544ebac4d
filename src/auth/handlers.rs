use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RefreshRequest, RegisterRequest},
        repo::{NewUser, User},
        services::{
            hash_password, is_valid_email, validate_registration, verify_password, AuthUser,
            JwtKeys,
        },
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

type HandlerError = (StatusCode, String);

fn internal(e: anyhow::Error) -> HandlerError {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn email_taken() -> HandlerError {
    (StatusCode::CONFLICT, "Email already registered".into())
}

/// A concurrent signup can pass the lookup and still lose the insert on
/// the unique email index.
fn create_user_error(e: anyhow::Error) -> HandlerError {
    let unique = e
        .downcast_ref::<sqlx::Error>()
        .and_then(|db| db.as_database_error())
        .is_some_and(|db| db.is_unique_violation());
    if unique {
        warn!(error = %e, "email registered concurrently");
        email_taken()
    } else {
        error!(error = %e, "create user failed");
        internal(e)
    }
}

/// Signs a fresh token pair for `user`.
fn issue_tokens(state: &AppState, user: &User) -> Result<AuthResponse, HandlerError> {
    let public = user.to_public().map_err(|e| {
        error!(error = %e, user_id = %user.id, "stored role is invalid");
        internal(e)
    })?;
    let keys = JwtKeys::from_ref(state);
    let access_token = keys.sign_access(user.id, public.role).map_err(|e| {
        error!(error = %e, "jwt sign access failed");
        internal(e)
    })?;
    let refresh_token = keys.sign_refresh(user.id, public.role).map_err(|e| {
        error!(error = %e, "jwt sign refresh failed");
        internal(e)
    })?;
    Ok(AuthResponse {
        access_token,
        refresh_token,
        redirect_to: public.role.landing_path(),
        user: public,
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), HandlerError> {
    let role = validate_registration(&mut payload).map_err(|msg| {
        warn!(email = %payload.email, reason = %msg, "signup rejected");
        (StatusCode::BAD_REQUEST, msg)
    })?;

    // Ensure email is not taken
    let existing = User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(|e| {
            error!(error = %e, "find_by_email failed");
            internal(e)
        })?;
    if existing.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(email_taken());
    }

    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        internal(e)
    })?;

    let user = User::create(
        &state.db,
        NewUser {
            email: &payload.email,
            password_hash: &hash,
            role,
            full_name: &payload.full_name,
            phone_number: &payload.phone_number,
            medical_license_number: payload.medical_license_number.as_deref(),
        },
    )
    .await
    .map_err(create_user_error)?;

    let response = issue_tokens(&state, &user)?;
    info!(user_id = %user.id, email = %user.email, %role, "user registered");
    Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, HandlerError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    let user = match User::find_by_email(&state.db, &payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(internal(e));
        }
    };

    let ok = verify_password(&payload.password, &user.password_hash).map_err(|e| {
        error!(error = %e, "verify_password failed");
        internal(e)
    })?;

    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
    }

    let response = issue_tokens(&state, &user)?;
    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(response))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, HandlerError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| (StatusCode::UNAUTHORIZED, e.to_string()))?;

    // Role is re-read so a changed account is reflected in the new pair
    let user = User::find_by_id(&state.db, claims.sub)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))?;

    Ok(Json(issue_tokens(&state, &user)?))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id, _): AuthUser,
) -> Result<Json<PublicUser>, HandlerError> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "user lookup failed");
            internal(e)
        })?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))?;

    user.to_public().map(Json).map_err(internal)
}
