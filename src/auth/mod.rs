pub mod extractors;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};

// Re-export necessary items
pub use extractors::CurrentUser;
pub use password::PasswordHasher;
pub use token::{Claims, TokenIssuer};

/// Response body of `POST /token`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The JWT to send back as `Authorization: Bearer <token>`.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
