use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sea_orm::*;
use tracing::instrument;

use crate::entity::user;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::auth::{
    LoginRequest, LoginResponse, MessageResponse, ProfileResponse, RegisterRequest,
    RegisterResponse, UpdateProfileRequest, UserResponse, VerifyEmailQuery,
    validate_login_request, validate_register_request, validate_update_profile,
};
use crate::state::AppState;
use crate::utils::{hash, jwt};

/// Map a unique-constraint violation from a user write to the taken field.
fn map_user_write_err(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            if detail.contains("email") {
                AppError::EmailTaken
            } else {
                AppError::PhoneTaken
            }
        }
        _ => AppError::from(err),
    }
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    operation_id = "register",
    summary = "Register a new user",
    description = "Creates an account and sends a verification email. Email delivery is best-effort: a delivery failure is logged but does not fail the registration.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Email or phone already in use (EMAIL_TAKEN, PHONE_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_register_request(&payload)?;

    let password_hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;
    let token = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now();

    let new_user = user::ActiveModel {
        full_name: Set(payload.full_name.trim().to_string()),
        email: Set(payload.email.trim().to_lowercase()),
        gender: Set(payload.gender.to_lowercase()),
        phone_number: Set(payload.phone_number.trim().to_string()),
        password: Set(password_hash),
        verifikasi_token: Set(Some(token.clone())),
        email_verified: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let user = new_user.insert(&state.db).await.map_err(map_user_write_err)?;

    if let Err(e) = state
        .mailer
        .send_verification(&user.email, &user.full_name, &token)
        .await
    {
        tracing::warn!("Failed to send verification email to {}: {:#}", user.email, e);
    }

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Registered. Check your email to verify your account.".into(),
            data: UserResponse::from(user),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in with email and password",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Wrong email or password (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let email = payload.email.trim().to_lowercase();

    let user = user::Entity::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = hash::verify_password(&payload.password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let token = jwt::sign(
        user.id,
        &user.email,
        &user.full_name,
        &state.config.auth.jwt_secret,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    Ok(Json(LoginResponse {
        success: true,
        token,
        user: UserResponse::from(user),
    }))
}

#[utoipa::path(
    get,
    path = "/verifikasi-email",
    tag = "Auth",
    operation_id = "verifyEmail",
    summary = "Verify an email address",
    description = "Consumes the token from the verification link. Each token works once.",
    params(VerifyEmailQuery),
    responses(
        (status = 200, description = "Email verified", body = MessageResponse),
        (status = 404, description = "Unknown or already-used token (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let user = user::Entity::find()
        .filter(user::Column::VerifikasiToken.eq(&query.token))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Verification token not found".into()))?;

    let mut active: user::ActiveModel = user.into();
    active.email_verified = Set(true);
    active.verifikasi_token = Set(None);
    active.updated_at = Set(chrono::Utc::now());
    active.update(&state.db).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Email verified".into(),
    }))
}

#[utoipa::path(
    get,
    path = "/profile",
    tag = "Auth",
    operation_id = "getProfile",
    summary = "Get the authenticated user's profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = user::Entity::find_by_id(auth_user.user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Json(ProfileResponse {
        success: true,
        data: UserResponse::from(user),
    }))
}

#[utoipa::path(
    post,
    path = "/profile",
    tag = "Auth",
    operation_id = "updateProfile",
    summary = "Update the authenticated user's profile",
    description = "Updates name, gender, phone number or password. Only provided fields are written; email cannot be changed.",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 409, description = "Phone number already in use (PHONE_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn update_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    validate_update_profile(&payload)?;

    let txn = state.db.begin().await?;

    let user = user::Entity::find_by_id(auth_user.user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    let mut active: user::ActiveModel = user.into();

    if let Some(ref full_name) = payload.full_name {
        active.full_name = Set(full_name.trim().to_string());
    }
    if let Some(gender) = payload.gender {
        active.gender = Set(gender.to_lowercase());
    }
    if let Some(ref phone) = payload.phone_number {
        active.phone_number = Set(phone.trim().to_string());
    }
    if let Some(ref password) = payload.password {
        let password_hash = hash::hash_password(password)
            .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;
        active.password = Set(password_hash);
    }
    active.updated_at = Set(chrono::Utc::now());

    let user = active.update(&txn).await.map_err(map_user_write_err)?;
    txn.commit().await?;

    Ok(Json(ProfileResponse {
        success: true,
        data: UserResponse::from(user),
    }))
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    operation_id = "logout",
    summary = "Log out",
    description = "Tokens are stateless, so logout is client-side: the server acknowledges and the client discards the token.",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user), fields(user_id = auth_user.user_id))]
pub async fn logout(auth_user: AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse {
        success: true,
        message: "Logged out".into(),
    })
}
