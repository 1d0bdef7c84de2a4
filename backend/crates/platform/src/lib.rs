//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations:
//! - Digest utilities (SHA-256, hex, constant-time compare)
//! - Password hashing (Argon2id, salted adaptive one-way function)

pub mod crypto;
pub mod password;
