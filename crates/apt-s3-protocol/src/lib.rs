//! Wire model for the APT method interface.
//!
//! APT talks to its transport methods over a pair of byte streams using a
//! line-oriented, message-framed protocol: each message is a status line
//! (`<code> <description>`) followed by `Name: Value` fields and terminated
//! by a single blank line. This crate provides the in-memory representation
//! of those messages ([`Message`], [`Header`], [`Field`]), parsing and
//! byte-exact serialization, and an incremental [`MessageFramer`] that
//! reassembles whole messages from an async input stream.

mod error;
pub mod fields;
mod framer;
mod header;
mod message;

pub use error::ProtocolError;
pub use framer::MessageFramer;
pub use header::{Header, StatusCode};
pub use message::{Field, Message};
