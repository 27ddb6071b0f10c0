use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const GENDERS: &[&str] = &["male", "female"];

/// Request body for user registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Full display name.
    #[schema(example = "Budi Santoso")]
    pub full_name: String,
    /// Unique email address, used to log in.
    #[schema(example = "budi@example.com")]
    pub email: String,
    /// One of: male, female.
    #[schema(example = "male")]
    pub gender: String,
    /// Unique phone number, digits with an optional leading `+`.
    #[schema(example = "+628123456789")]
    pub phone_number: String,
    /// Password (8-128 characters).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    let valid = email.len() <= 254
        && email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(AppError::Validation("Email is not valid".into()));
    }
    Ok(())
}

fn validate_phone(phone: &str) -> Result<(), AppError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.len() < 8 || digits.len() > 15 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Phone number must be 8-15 digits".into(),
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < 8 || password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be 8-128 characters".into(),
        ));
    }
    Ok(())
}

fn validate_gender(gender: &str) -> Result<(), AppError> {
    if !GENDERS.contains(&gender) {
        return Err(AppError::Validation(
            "Gender must be one of: male, female".into(),
        ));
    }
    Ok(())
}

pub fn validate_register_request(payload: &RegisterRequest) -> Result<(), AppError> {
    let name = payload.full_name.trim();
    if name.is_empty() || name.chars().count() > 128 {
        return Err(AppError::Validation(
            "Full name must be 1-128 characters".into(),
        ));
    }
    validate_email(&payload.email)?;
    validate_gender(&payload.gender.to_lowercase())?;
    validate_phone(payload.phone_number.trim())?;
    validate_password(&payload.password)?;
    Ok(())
}

/// Request body for user login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "budi@example.com")]
    pub email: String,
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::Validation("Email must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Request body for profile updates. Only supplied fields are written;
/// email cannot be changed.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
}

pub fn validate_update_profile(payload: &UpdateProfileRequest) -> Result<(), AppError> {
    if *payload == UpdateProfileRequest::default() {
        return Err(AppError::Validation("No fields to update".into()));
    }
    if let Some(ref name) = payload.full_name {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > 128 {
            return Err(AppError::Validation(
                "Full name must be 1-128 characters".into(),
            ));
        }
    }
    if let Some(ref gender) = payload.gender {
        validate_gender(&gender.to_lowercase())?;
    }
    if let Some(ref phone) = payload.phone_number {
        validate_phone(phone.trim())?;
    }
    if let Some(ref password) = payload.password {
        validate_password(password)?;
    }
    Ok(())
}

/// Public view of a user account.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "Budi Santoso")]
    pub full_name: String,
    #[schema(example = "budi@example.com")]
    pub email: String,
    #[schema(example = "male")]
    pub gender: String,
    #[schema(example = "+628123456789")]
    pub phone_number: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::user::Model> for UserResponse {
    fn from(user: crate::entity::user::Model) -> Self {
        UserResponse {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            gender: user.gender,
            phone_number: user.phone_number,
            email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}

/// Successful registration response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Registered. Check your email to verify your account.")]
    pub message: String,
    pub data: UserResponse,
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    #[schema(example = true)]
    pub success: bool,
    /// JWT bearer token valid for 24 hours.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub user: UserResponse,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: UserResponse,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Email verified")]
    pub message: String,
}

/// Query parameters for email verification.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VerifyEmailQuery {
    /// The verification token from the emailed link.
    pub token: String,
}
