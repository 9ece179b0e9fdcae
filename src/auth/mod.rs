//! Authentication module for Credential Gate.
//!
//! Provides the two pieces every front end shares:
//! - Credential Store: fixed username to password table
//! - Authenticator: predicate deciding whether a pair matches the store

mod authenticator;
mod store;

pub use authenticator::*;
pub use store::*;
