//! # qrfolio-auth
//!
//! Credentials and invites.
//!
//! - `password`: Argon2id hashing and the registration password policy
//! - `jwt`: HS256 access tokens carried as `Authorization: Bearer`
//! - `phrase`: human-friendly single-use registration phrases

pub mod jwt;
pub mod password;
pub mod phrase;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordPolicy};
pub use phrase::generate_phrase;
