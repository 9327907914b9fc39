use crate::error::AppError;
use actix_web::web;
use bcrypt::{hash, verify};

/// Salted one-way hashing of user passwords with bcrypt.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash(password, self.cost)
            .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
    }

    /// Checks `password` against a stored digest.
    ///
    /// A malformed digest counts as a mismatch rather than an error.
    pub fn verify(&self, password: &str, hashed_password: &str) -> bool {
        match verify(password, hashed_password) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("Password verification against malformed digest: {}", e);
                false
            }
        }
    }

    /// Runs `hash` on the blocking thread pool so the calling worker keeps serving requests.
    pub async fn hash_blocking(self, password: String) -> Result<String, AppError> {
        web::block(move || self.hash(&password)).await?
    }

    /// Runs `verify` on the blocking thread pool.
    pub async fn verify_blocking(
        self,
        password: String,
        hashed_password: String,
    ) -> Result<bool, AppError> {
        Ok(web::block(move || self.verify(&password, &hashed_password)).await?)
    }
}
