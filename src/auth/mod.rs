pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::models::PublicUser;

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenKeys};

lazy_static! {
    // Display names: letters, digits, spaces and . ' _ -
    static ref NAME_REGEX: regex::Regex = regex::Regex::new(r"^[\p{L}\p{N} .'_-]+$").unwrap();
}

// Strips surrounding whitespace before validation runs.
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|value| value.trim().to_string())
}

/// Represents the payload for a user login request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Must be a valid email format.
    #[validate(email)]
    #[serde(deserialize_with = "trimmed")]
    pub email: String,
    /// Any non-empty password. Strength rules apply only at registration.
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account. Must be unique.
    #[validate(email)]
    #[serde(deserialize_with = "trimmed")]
    pub email: String,
    /// Must be between 6 and 128 characters long.
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    /// Optional display name.
    #[validate(
        length(min = 1, max = 100),
        regex(
            path = "NAME_REGEX",
            message = "Name may contain letters, digits, spaces, and . ' _ -"
        )
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Response after a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The signed bearer token.
    pub token: String,
    /// Public fields of the authenticated user.
    pub user: PublicUser,
}
