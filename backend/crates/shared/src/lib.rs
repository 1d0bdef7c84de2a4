//! Shared Kernel - Domain-crossing minimal core
//!
//! The smallest vocabulary shared by every crate in the workspace:
//! - Unified error type and result alias ([`error::app_error::AppError`])
//! - Error classification mapped to HTTP status codes ([`error::kind::ErrorKind`])
//! - Typed entity IDs ([`id::Id`])
//!
//! Only things that are hard to change and mean the same thing in every
//! domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
