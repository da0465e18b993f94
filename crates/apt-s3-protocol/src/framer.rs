//! Blank-line framing over an async byte stream.
//!
//! APT writes messages to the method's stdin without any length prefix;
//! the only delimiter is the blank line terminating each block. The framer
//! reads lines incrementally, accumulates them, and yields one parsed
//! [`Message`] per completed block. Messages are yielded in arrival order;
//! what the caller does with them concurrently is its own business.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::ProtocolError;
use crate::message::Message;

/// A buffer shorter than this when a blank line arrives is treated as
/// stray leading whitespace rather than a complete message.
const MIN_COMPLETE_LEN: usize = 3;

/// Incremental message reassembler over a buffered async reader.
#[derive(Debug)]
pub struct MessageFramer<R> {
    reader: R,
    buffer: String,
}

impl<R: AsyncBufRead + Unpin> MessageFramer<R> {
    /// Wrap a buffered reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
        }
    }

    /// Read the next complete message, or `None` at end of stream.
    ///
    /// A blank line completes the current buffer if it holds more than a
    /// trivial number of bytes. At end of stream any dangling unterminated
    /// tail is discarded rather than reported as an error: the protocol
    /// guarantees every message ends with a blank line, so a tail can only
    /// be a truncated write from a dying peer.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] if the stream fails or a completed block
    /// does not parse.
    pub async fn next_message(&mut self) -> Result<Option<Message>, ProtocolError> {
        let mut line = String::new();
        loop {
            line.clear();
            let n = self.reader.read_line(&mut line).await?;
            if n == 0 {
                return Ok(None);
            }

            let trimmed = line.trim_end_matches(['\r', '\n']);
            if trimmed.is_empty() && self.buffer.len() > MIN_COMPLETE_LEN {
                let message = Message::parse(&self.buffer)?;
                self.buffer.clear();
                return Ok(Some(message));
            }
            self.buffer.push_str(trimmed);
            self.buffer.push('\n');
        }
    }
}
