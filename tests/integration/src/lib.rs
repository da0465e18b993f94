//! End-to-end protocol tests for the apt-s3 method engine.
//!
//! Each test scripts an input stream of protocol messages, runs the full
//! engine against an in-memory object store, and asserts on the parsed
//! output stream. No network, no real S3: the store boundary is the same
//! trait the AWS implementation fills in production.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::io::{AsyncReadExt, BufReader, duplex};

use apt_s3_core::{AcquireEngine, MethodError};
use apt_s3_protocol::{Message, MessageFramer};
use apt_s3_store::{
    CredentialSpec, ObjectMetadata, ObjectStore, StoreEndpoint, StoreError, StoreProvider,
};

static INIT: Once = Once::new();

/// Initialize tracing (once), on stderr like the real binary.
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Epoch seconds of `Thu, 25 Oct 2018 20:17:39 GMT`, the fixed timestamp
/// every stored object reports.
pub const FIXED_EPOCH: i64 = 1_540_498_659;

/// The fixed timestamp rendered the way the protocol mandates.
pub const FIXED_RFC1123: &str = "Thu, 25 Oct 2018 20:17:39 GMT";

/// In-memory object store double.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    objects: HashMap<(String, String), Vec<u8>>,
    broken: HashSet<(String, String)>,
}

impl InMemoryStore {
    /// An empty store: every lookup is a not-found.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object.
    #[must_use]
    pub fn with_object(mut self, bucket: &str, key: &str, body: &[u8]) -> Self {
        self.objects
            .insert((bucket.to_owned(), key.to_owned()), body.to_vec());
        self
    }

    /// Mark a key so any access to it fails with a non-not-found store
    /// error.
    #[must_use]
    pub fn with_broken_object(mut self, bucket: &str, key: &str) -> Self {
        self.broken.insert((bucket.to_owned(), key.to_owned()));
        self
    }

    fn lookup(&self, bucket: &str, key: &str) -> Result<&Vec<u8>, StoreError> {
        let coordinates = (bucket.to_owned(), key.to_owned());
        if self.broken.contains(&coordinates) {
            return Err(StoreError::service(std::io::Error::other(
                "simulated store failure",
            )));
        }
        self.objects.get(&coordinates).ok_or(StoreError::NotFound)
    }

    fn timestamp() -> DateTime<Utc> {
        DateTime::from_timestamp(FIXED_EPOCH, 0).expect("fixed timestamp in range")
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectMetadata, StoreError> {
        let body = self.lookup(bucket, key)?;
        Ok(ObjectMetadata {
            size: i64::try_from(body.len()).expect("test object fits in i64"),
            last_modified: Self::timestamp(),
        })
    }

    async fn download(&self, bucket: &str, key: &str, dest: &Path) -> Result<u64, StoreError> {
        let body = self.lookup(bucket, key)?.clone();
        tokio::fs::write(dest, &body)
            .await
            .map_err(StoreError::service)?;
        Ok(body.len() as u64)
    }
}

/// Provider double that hands out one shared [`InMemoryStore`] and records
/// every connection request for later assertions. Clones share state, so
/// tests can keep a handle while the engine owns the original.
#[derive(Debug, Clone)]
pub struct RecordingProvider {
    store: Arc<InMemoryStore>,
    connections: Arc<Mutex<Vec<(StoreEndpoint, CredentialSpec)>>>,
}

impl RecordingProvider {
    /// Wrap a store.
    #[must_use]
    pub fn new(store: InMemoryStore) -> Self {
        Self {
            store: Arc::new(store),
            connections: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every `(endpoint, credentials)` pair the engine connected with.
    #[must_use]
    pub fn connections(&self) -> Vec<(StoreEndpoint, CredentialSpec)> {
        self.connections.lock().expect("connections lock").clone()
    }
}

#[async_trait]
impl StoreProvider for RecordingProvider {
    async fn connect(
        &self,
        endpoint: &StoreEndpoint,
        credentials: CredentialSpec,
    ) -> Result<Arc<dyn ObjectStore>, StoreError> {
        self.connections
            .lock()
            .expect("connections lock")
            .push((endpoint.clone(), credentials));
        Ok(Arc::clone(&self.store) as Arc<dyn ObjectStore>)
    }
}

/// The output of one engine run: the run result, the parsed output
/// messages in emission order, and the raw output bytes.
#[derive(Debug)]
pub struct MethodRun {
    /// What [`AcquireEngine::run`] returned.
    pub result: Result<(), MethodError>,
    /// Every output message, parsed back off the stream.
    pub messages: Vec<Message>,
    /// The raw output text.
    pub raw: String,
}

impl MethodRun {
    /// All messages with the given status code, in emission order.
    #[must_use]
    pub fn with_status(&self, status: u16) -> Vec<&Message> {
        self.messages
            .iter()
            .filter(|m| m.header().status() == status)
            .collect()
    }

    /// The single message with the given status code.
    ///
    /// # Panics
    ///
    /// Panics if there are zero or several such messages.
    #[must_use]
    pub fn single(&self, status: u16) -> &Message {
        let matches = self.with_status(status);
        assert_eq!(
            matches.len(),
            1,
            "expected exactly one {status} message, output was:\n{}",
            self.raw
        );
        matches[0]
    }
}

/// Run the engine over a scripted input against the given provider.
///
/// # Panics
///
/// Panics if the run does not finish within the test timeout or the
/// output stream does not reparse as well-formed messages.
pub async fn run_method(provider: RecordingProvider, input: &str) -> MethodRun {
    init_tracing();

    let engine = AcquireEngine::new(provider);
    let (out_tx, mut out_rx) = duplex(1024 * 1024);
    let reader = BufReader::new(std::io::Cursor::new(input.as_bytes().to_vec()));

    let collector = tokio::spawn(async move {
        let mut collected = String::new();
        out_rx
            .read_to_string(&mut collected)
            .await
            .expect("collect output");
        collected
    });

    let result = tokio::time::timeout(Duration::from_secs(10), engine.run(reader, out_tx))
        .await
        .expect("engine run timed out");
    let raw = collector.await.expect("collector task");

    let mut messages = Vec::new();
    let mut framer = MessageFramer::new(raw.as_bytes());
    while let Some(message) = framer.next_message().await.expect("reparse output") {
        messages.push(message);
    }

    MethodRun {
        result,
        messages,
        raw,
    }
}

/// A `601 Configuration` block for the given region.
#[must_use]
pub fn configuration_block(region: &str) -> String {
    format!("601 Configuration\nConfig-Item: Acquire::s3::region={region}\n\n")
}

/// A `600 URI Acquire` block.
#[must_use]
pub fn acquire_block(uri: &str, filename: &Path) -> String {
    format!(
        "600 URI Acquire\nURI: {uri}\nFilename: {}\n\n",
        filename.display()
    )
}

mod test_concurrency;
mod test_failure;
