//! Wire protocol for Windward.
//!
//! This crate defines the "language" that the game client and server
//! speak during the login/logout envelope:
//!
//! - **Types** ([`Message`], [`ServerState`], [`LogoutReason`],
//!   [`ServerInfo`], [`ErrorTemplate`]) — the values that travel on the
//!   wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those values are
//!   converted to/from bytes.
//! - **Correlation** ([`MessageLink`], [`ask_once`]) — the blocking
//!   "ask" (send a query, await the reply with the matching tag) and the
//!   fire-and-forget "tell".
//! - **Errors** ([`ProtocolError`]) — what can go wrong, including the
//!   fatal case where the reply tag matches nothing we expected.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw bytes) and session
//! (login state). It doesn't know about startup flows or the UI — it
//! only knows messages, tags, and how replies pair with queries.
//!
//! ```text
//! Transport (bytes) → Protocol (Message, ask/tell) → Session (login state)
//! ```

mod codec;
mod error;
mod link;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
#[cfg(feature = "json")]
pub use link::ask_once;
pub use link::{LinkConfig, MessageLink};
pub use types::{
    tag, ErrorTemplate, LogoutReason, Message, ServerInfo, ServerState,
};
