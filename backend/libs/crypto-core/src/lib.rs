//! Shared cryptography for the blogging platform
//!
//! - `jwt`: session token issuance and validation
//! - `password`: Argon2id password hashing and verification

pub mod jwt;
pub mod password;
