//! Client session state for Windward.
//!
//! This crate owns the client-side record of "who am I and am I logged
//! in":
//!
//! 1. **Session** — the explicitly owned state record (connection link,
//!    login flags, remembered login parameters, process identity label).
//!    One exists per client process; it outlives individual games.
//! 2. **Logout planning** ([`logout::plan`]) — a pure function from a
//!    [`LogoutReason`](windward_protocol::LogoutReason) to the list of
//!    follow-up actions, so the reason switch is testable without a
//!    connection, a UI, or a server in sight.
//!
//! # How it fits in the stack
//!
//! ```text
//! Controller (above)  ← drives login/logout and executes follow-ups
//!     ↕
//! Session Layer (this crate)  ← records login state, plans logouts
//!     ↕
//! Protocol Layer (below)  ← provides Message, LogoutReason, MessageLink
//! ```

mod error;
pub mod logout;
mod session;

pub use error::SessionError;
pub use session::Session;
