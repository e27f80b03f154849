use crate::api::{self, envelope, ApiRequest, Transport};
use crate::error::ApiError;
use crate::model::{Role, User};
use serde::Deserialize;
use serde_json::json;

/// What a successful login or registration yields.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

pub async fn login(
    transport: &dyn Transport,
    email: &str,
    password: &str,
) -> Result<AuthResponse, ApiError> {
    let payload = api::call(
        transport,
        ApiRequest::post(
            "/auth/login",
            json!({ "email": email, "password": password }),
        ),
        "login failed",
    )
    .await?;
    envelope::unwrap_entity(payload, "auth")
}

pub struct Registration<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub role: Role,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

pub async fn register(
    transport: &dyn Transport,
    registration: &Registration<'_>,
) -> Result<AuthResponse, ApiError> {
    let payload = api::call(
        transport,
        ApiRequest::post(
            "/auth/register",
            json!({
                "email": registration.email,
                "password": registration.password,
                "role": registration.role.as_str(),
                "firstName": registration.first_name,
                "lastName": registration.last_name,
            }),
        ),
        "registration failed",
    )
    .await?;
    envelope::unwrap_entity(payload, "auth")
}

pub async fn profile(transport: &dyn Transport, token: &str) -> Result<User, ApiError> {
    let payload = api::call(
        transport,
        ApiRequest::get("/auth/profile").token(token),
        "profile fetch failed",
    )
    .await?;
    envelope::unwrap_entity(payload, "user")
}
