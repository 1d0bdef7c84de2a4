//! Value Objects

pub mod biometric_digest;
pub mod email;
pub mod user_id;
pub mod user_password;
pub mod user_role;
