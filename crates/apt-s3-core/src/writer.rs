//! Serializing messages to the output stream.
//!
//! Every in-flight request shares one output stream, so whole serialized
//! messages are the unit of atomicity: two concurrently produced messages
//! may appear in either order, but never interleaved line-by-line.

use std::sync::Arc;

use apt_s3_protocol::Message;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Cloneable handle writing whole messages under a mutex.
#[derive(Debug)]
pub struct MessageWriter<W> {
    inner: Arc<Mutex<W>>,
}

impl<W> Clone for MessageWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: AsyncWrite + Unpin + Send> MessageWriter<W> {
    /// Wrap an output stream.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// Write one whole serialized message and flush.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the write or flush fails.
    pub async fn send(&self, message: &Message) -> std::io::Result<()> {
        let wire = message.to_wire();
        let mut writer = self.inner.lock().await;
        writer.write_all(wire.as_bytes()).await?;
        writer.flush().await
    }
}
