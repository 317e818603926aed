use std::{error::Error, fmt::Debug};

use crate::constant::{BAD_REQUEST, INTERNAL_ERROR, NOT_FOUND};

#[derive(thiserror::Error)]
pub enum ServiceError {
    #[error("User not found")]
    UserNotFound,

    #[error("Holding lot not found")]
    LotNotFound,

    #[error("Invalid Credentials")]
    InvalidCredentials,

    #[error("sell quantity {requested} exceeds lot quantity {available}")]
    Oversold { available: i32, requested: i32 },

    #[error("Request body error")]
    BadRequest(#[source] serde_json::Error),

    #[error("Query error")]
    Store(#[from] sqlx::Error),

    #[error("Upstream error")]
    Upstream(#[from] reqwest::Error),

    #[error("Token error")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hash error")]
    Hash(#[source] argon2::password_hash::Error),
}

impl Debug for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        if let Some(source) = self.source() {
            write!(f, " (Caused by: {})", source)?;
        }
        Ok(())
    }
}

impl ServiceError {
    pub fn status_line(&self) -> &'static str {
        match self {
            ServiceError::UserNotFound | ServiceError::LotNotFound => NOT_FOUND,
            ServiceError::InvalidCredentials
            | ServiceError::Oversold { .. }
            | ServiceError::BadRequest(_) => BAD_REQUEST,
            ServiceError::Store(_)
            | ServiceError::Upstream(_)
            | ServiceError::Token(_)
            | ServiceError::Hash(_) => INTERNAL_ERROR,
        }
    }

    /// Body text safe to put on the wire. Store and upstream detail stays
    /// in the server log.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::UserNotFound => "User not found".to_string(),
            ServiceError::LotNotFound => "Holding lot not found".to_string(),
            ServiceError::InvalidCredentials => "Invalid Credentials".to_string(),
            ServiceError::Oversold {
                available,
                requested,
            } => format!("Cannot sell {requested}: only {available} held in this lot"),
            ServiceError::BadRequest(_) => "Invalid request body".to_string(),
            ServiceError::Upstream(_) => {
                "Error communicating with recommendation service".to_string()
            }
            ServiceError::Store(_) | ServiceError::Token(_) | ServiceError::Hash(_) => {
                "Something went wrong".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_map_to_404() {
        assert_eq!(ServiceError::UserNotFound.status_line(), NOT_FOUND);
        assert_eq!(ServiceError::LotNotFound.status_line(), NOT_FOUND);
    }

    #[test]
    fn domain_rejections_map_to_400() {
        assert_eq!(ServiceError::InvalidCredentials.status_line(), BAD_REQUEST);
        let oversold = ServiceError::Oversold {
            available: 3,
            requested: 10,
        };
        assert_eq!(oversold.status_line(), BAD_REQUEST);
        let message = oversold.public_message();
        assert!(message.contains('3') && message.contains("10"));
    }

    #[test]
    fn store_detail_is_genericized() {
        let err = ServiceError::Store(sqlx::Error::RowNotFound);
        assert_eq!(err.status_line(), INTERNAL_ERROR);
        assert_eq!(err.public_message(), "Something went wrong");
    }
}
