use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use kernel::model::{id::UserId, role::Role};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};
use std::str::FromStr;

/// Identity asserted by the upstream auth proxy. Credential verification
/// happens there; this extractor only reads the trusted headers the proxy
/// injects.
pub struct AuthorizedUser {
    user_id: UserId,
    role: Role,
    email: Option<String>,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn email(&self) -> Option<String> {
        self.email.clone()
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };

        let user_id = header("x-user-id")
            .and_then(|raw| UserId::from_str(&raw).ok())
            .ok_or(AppError::Unauthenticated)?;
        let role = header("x-user-role")
            .and_then(|raw| Role::from_str(&raw).ok())
            .ok_or(AppError::Unauthenticated)?;
        let email = header("x-user-email");

        Ok(Self {
            user_id,
            role,
            email,
        })
    }
}
