//! Explorer sessions.
//!
//! A session is one user's dataset browser plus their latest prediction. The
//! two flows never touch each other's state.

mod routes;
mod store;

pub use routes::router;
pub use store::{Session, SessionStats, SessionStore};
