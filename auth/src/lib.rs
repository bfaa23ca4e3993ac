//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the task service:
//! - Password hashing (bcrypt, configurable cost)
//! - JWT token generation and validation
//! - Time-bound access token issuance
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(4);
//! let hash = hasher.hash("My_passw0rd").unwrap();
//! let is_valid = hasher.verify("My_passw0rd", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{Claims, TokenIssuer};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(10));
//! let access_token = issuer.issue("user123", "alice").unwrap();
//!
//! let claims: Claims = issuer.validate(&access_token.token).unwrap();
//! assert_eq!(claims.username, "alice");
//! ```

pub mod jwt;
pub mod password;
pub mod token_issuer;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token_issuer::AccessToken;
pub use token_issuer::TokenIssuer;
