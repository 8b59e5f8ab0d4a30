use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use validator::Validate;

use super::ApiError;
use super::ApiSuccess;
use super::FieldError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::User;
use crate::domain::user::ports::AuthenticationServicePort;
use crate::inbound::http::extractors::ValidatedJson;
use crate::inbound::http::router::AppState;

const LOGIN_SUCCESS: &str = "Login successful";

pub async fn login<S: AuthenticationServicePort>(
    State(state): State<AppState<S>>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::ValidationFailed(vec![FieldError::invalid_email()]))?;

    // No session or token is issued; a 200 only confirms the credentials.
    state
        .auth_service
        .login(LoginCommand::new(email, body.password))
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email"))]
    email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    password: String,
}

/// Public view of a logged-in user. The password hash is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    #[serde(rename = "userId")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
}

impl From<&User> for LoginResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            message: LOGIN_SUCCESS.to_string(),
        }
    }
}
