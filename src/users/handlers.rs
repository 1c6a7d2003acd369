use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{jwt::JwtKeys, password},
    error::{ApiError, MessageResponse, MSG_REGISTERED},
    extract::Payload,
    state::AppState,
    users::{
        dto::{LoginRequest, LoginResponse, LoginUser, RegisterRequest, UpdateUserRequest},
        repo_types::{NewUser, User},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user).put(update_user))
}

/// A malformed id cannot belong to any user.
fn parse_user_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        warn!(id = %raw, "malformed user id");
        ApiError::UserNotFound
    })
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token and public user data", body = LoginResponse),
        (status = 400, description = "Wrong email or password", body = MessageResponse),
        (status = 500, description = "Server error", body = MessageResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Payload(payload): Payload<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Some(user) = state.users.find_by_email(&payload.email).await? else {
        warn!("login unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    let ok = password::verify_password_blocking(payload.password, user.password.clone()).await?;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = JwtKeys::from_ref(&state).sign(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        token,
        user: LoginUser {
            id: user.id,
            name: user.name,
            profile: user.profile,
        },
    }))
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Malformed body or missing fields", body = MessageResponse),
        (status = 409, description = "Email already in use", body = MessageResponse),
        (status = 500, description = "Server error", body = MessageResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Payload(payload): Payload<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if !payload.has_required_fields() {
        warn!("register missing fields");
        return Err(ApiError::MissingFields);
    }
    if payload.profile.is_some() || payload.description.is_some() {
        info!("register ignores supplied profile/description");
    }

    let password_hash = password::hash_password_blocking(payload.password).await?;

    let user = state
        .users
        .create(NewUser {
            name: payload.name,
            email: payload.email,
            password_hash,
        })
        .await
        .map_err(|e| {
            let e = ApiError::from(e);
            if matches!(e, ApiError::EmailTaken) {
                warn!("email already registered");
            }
            e
        })?;

    info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(MessageResponse::new(MSG_REGISTERED))))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Every registered user", body = [User]),
        (status = 500, description = "Server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "User not found", body = MessageResponse),
        (status = 500, description = "Server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&id)?;
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or(ApiError::UserNotFound)?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "The updated user", body = User),
        (status = 400, description = "Malformed body", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse),
        (status = 500, description = "Server error", body = MessageResponse)
    )
)]
#[instrument(skip(state, changes))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(changes): Payload<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&id)?;

    let mut user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or(ApiError::UserNotFound)?;
    user.apply_changes(changes.name, changes.description, changes.profile);
    let saved = state.users.save(&user).await?;

    info!(user_id = %saved.id, "user updated");
    Ok(Json(saved))
}
