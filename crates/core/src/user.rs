//! Viewer accounts. Users only scope watch history; there is no login.

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;

/// Maximum length of a username, in characters.
pub const MAX_USERNAME_CHARS: usize = 64;

/// Payload for creating a user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
}

impl NewUser {
    /// Trim and validate, returning the username to store.
    pub fn into_username(self) -> Result<String, CoreError> {
        let username = self.username.trim().to_string();
        if username.is_empty() {
            return Err(CoreError::Validation("Username must not be blank".into()));
        }
        NewUser {
            username: username.clone(),
        }
        .validate()?;
        Ok(username)
    }
}
