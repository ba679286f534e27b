//! Domain layer - Core business entities and logic
//!
//! User records, the password value object and the reset token, independent
//! of storage and transport.

pub mod password;
pub mod reset;
pub mod user;

pub use password::Password;
pub use reset::{ResetState, ResetToken};
pub use user::{NewUser, NewUserRecord, Registration, User, UserProfile};
