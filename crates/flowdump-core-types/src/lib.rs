//! Core types shared across flowdump crates
//!
//! - **Session identity**: [`SessionName`], the key a flow dump job is tracked under
//! - **Schema constants**: canonical log field keys, event names and database names

pub mod schema;
pub mod session;

pub use session::{SessionName, SESSION_PREFIX};
