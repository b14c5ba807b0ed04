//! Login and current-user endpoints.

use serde::{Deserialize, Serialize};
use store::{SessionBackend, User};

use crate::client::{ApiClient, ApiRequest, CURRENT_USER_PATH, LOGIN_PATH};
use crate::error::ApiError;
use crate::transport::Transport;

/// Credentials as the backend expects them on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    #[serde(rename = "email")]
    pub identifier: String,
    #[serde(rename = "password")]
    pub secret: String,
}

/// A successful login: the bearer token and the user it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CurrentUser {
    Wrapped { user: User },
    Bare(User),
}

impl<T: Transport, B: SessionBackend> ApiClient<T, B> {
    /// Exchange credentials for a token. Does not touch the session store.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let body = serde_json::to_value(credentials).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send_json(ApiRequest::post(LOGIN_PATH).json(body)).await
    }

    /// The user behind the stored token, as the backend sees it now.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let user: CurrentUser = self.send_json(ApiRequest::get(CURRENT_USER_PATH)).await?;
        Ok(match user {
            CurrentUser::Wrapped { user } => user,
            CurrentUser::Bare(user) => user,
        })
    }
}
