//! Request engine for the apt-s3 APT acquire method.
//!
//! Ties the wire model to the object store: a framer loop reads messages
//! off the input stream, each message is dispatched onto its own task, and
//! a completion tracker decides when all outstanding protocol work is done
//! and the process may exit. The single ordering constraint — no fetch
//! proceeds before APT's one-time configuration message has been applied —
//! is enforced with a publish-once configuration cell.

mod checksums;
mod config;
mod engine;
mod error;
mod location;
pub mod reply;
mod tracker;
mod writer;

pub use checksums::FileDigests;
pub use config::{
    CONFIG_KEY_ENDPOINT, CONFIG_KEY_REGION, CONFIG_KEY_ROLE, MethodConfig,
};
pub use engine::AcquireEngine;
pub use error::MethodError;
pub use location::{LocationError, ObjectLocation};
pub use tracker::WorkTracker;
pub use writer::MessageWriter;
