use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use validator::Validate;

use super::ApiError;
use super::ApiSuccess;
use super::FieldError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;
use crate::domain::user::ports::AuthenticationServicePort;
use crate::inbound::http::extractors::ValidatedJson;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::UserNameError;

pub async fn register<S: AuthenticationServicePort>(
    State(state): State<AppState<S>>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref id| ApiSuccess::new(StatusCode::CREATED, id.into()))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    name: String,
    #[validate(email(message = "Invalid email"))]
    email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error(transparent)]
    Name(#[from] UserNameError),

    #[error(transparent)]
    Email(#[from] EmailError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ParseRegisterRequestError> {
        let name = UserName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        Ok(CreateUserCommand::new(name, email, self.password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        let field_error = match err {
            ParseRegisterRequestError::Name(e) => FieldError::new("name", e.to_string()),
            ParseRegisterRequestError::Email(_) => FieldError::invalid_email(),
        };
        ApiError::ValidationFailed(vec![field_error])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: String,
}

impl From<&UserId> for RegisterResponseData {
    fn from(id: &UserId) -> Self {
        Self { id: id.to_string() }
    }
}
