//! Game sessions: one exclusively owned engine per session key, human/AI role
//! assignment, and idle expiry.

mod store;

pub use store::{GameSnapshot, SessionConfig, SessionStore};
