//! The request engine.
//!
//! One framer loop reads the input stream; every framed message costs one
//! tracker unit and is dispatched onto its own task. `601 Configuration`
//! publishes the method configuration exactly once; `600 URI Acquire`
//! waits for that publication, then walks the fetch sequence: resolve the
//! locator, announce, connect, head, download, digest, report. Unknown
//! inbound codes are ignored. The run loop finishes when the tracker hits
//! zero, or earlier when any handler reports a fatal error — in which case
//! a single `401 General Failure` is emitted and every other in-flight
//! request is abandoned with the process.

use std::path::Path;
use std::sync::Arc;

use apt_s3_protocol::{Message, MessageFramer, StatusCode, fields};
use apt_s3_store::{CredentialSpec, StoreEndpoint, StoreError, StoreProvider};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};
use url::Url;

use crate::checksums::FileDigests;
use crate::config::MethodConfig;
use crate::error::MethodError;
use crate::location::ObjectLocation;
use crate::reply;
use crate::tracker::WorkTracker;
use crate::writer::MessageWriter;

/// The protocol engine, generic over the store so tests can run it
/// against an in-memory double.
#[derive(Debug)]
pub struct AcquireEngine<P> {
    provider: Arc<P>,
}

impl<P: StoreProvider + 'static> AcquireEngine<P> {
    /// Create an engine over a store provider.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Announce capabilities, then service the protocol until all
    /// outstanding work completes or a fatal error ends it.
    ///
    /// Returns `Ok(())` on graceful completion (the caller should exit 0)
    /// and the fatal error otherwise (the caller should exit non-zero);
    /// the corresponding `401 General Failure` has already been written.
    ///
    /// # Errors
    ///
    /// Any [`MethodError`] reported by a handler, the framer, or the
    /// output stream.
    pub async fn run<R, W>(&self, input: R, output: W) -> Result<(), MethodError>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let writer = MessageWriter::new(output);
        writer.send(&reply::capabilities()).await?;

        let (config_tx, _) = watch::channel(None::<MethodConfig>);
        let (fatal_tx, mut fatal_rx) = mpsc::channel(1);
        let shared = Arc::new(Shared {
            provider: Arc::clone(&self.provider),
            writer,
            tracker: WorkTracker::new(),
            config_tx,
            fatal_tx,
        });

        let reader = Arc::clone(&shared);
        tokio::spawn(async move { reader.read_input(MessageFramer::new(input)).await });

        tokio::select! {
            () = shared.tracker.wait_idle() => Ok(()),
            Some(err) = fatal_rx.recv() => {
                // Report once, then give up on everything in flight.
                shared.writer.send(&reply::general_failure(&err)).await.ok();
                Err(err)
            }
        }
    }
}

/// State shared by the framer loop and every per-message task.
#[derive(Debug)]
struct Shared<P, W> {
    provider: Arc<P>,
    writer: MessageWriter<W>,
    tracker: WorkTracker,
    config_tx: watch::Sender<Option<MethodConfig>>,
    fatal_tx: mpsc::Sender<MethodError>,
}

impl<P, W> Shared<P, W>
where
    P: StoreProvider + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    /// Frame messages off the input stream until it is exhausted, paying
    /// one tracker unit per message and releasing the stream's own unit
    /// at the end.
    async fn read_input<R: AsyncBufRead + Unpin>(self: Arc<Self>, mut framer: MessageFramer<R>) {
        loop {
            match framer.next_message().await {
                Ok(Some(message)) => {
                    self.tracker.add();
                    let shared = Arc::clone(&self);
                    tokio::spawn(async move { shared.dispatch(message).await });
                }
                Ok(None) => {
                    self.tracker.done();
                    return;
                }
                Err(err) => {
                    self.fatal(err.into());
                    return;
                }
            }
        }
    }

    /// Route one message by its status code.
    async fn dispatch(self: Arc<Self>, message: Message) {
        match message.header().status_code() {
            Some(StatusCode::UriAcquire) => {
                if let Err(err) = self.uri_acquire(&message).await {
                    self.fatal(err);
                }
            }
            Some(StatusCode::Configuration) => self.configure(&message),
            _ => {
                debug!(status = message.header().status(), "ignoring inbound message");
                self.tracker.done();
            }
        }
    }

    /// Apply the one-time configuration message and set the latch.
    fn configure(&self, message: &Message) {
        let applied = self.config_tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(MethodConfig::from_config_items(
                message.fields_named(fields::CONFIG_ITEM),
            ));
            true
        });
        if !applied {
            warn!("ignoring repeated configuration message");
        }
        self.tracker.done();
    }

    /// Service one `600 URI Acquire`.
    async fn uri_acquire(&self, message: &Message) -> Result<(), MethodError> {
        let config = self.await_configuration().await;

        let uri = message
            .field(fields::URI)
            .ok_or(MethodError::MissingField(fields::URI))?;

        let endpoint_url = config.endpoint_url();
        let endpoint = Url::parse(&endpoint_url).map_err(|source| MethodError::InvalidEndpoint {
            endpoint: endpoint_url.clone(),
            source,
        })?;
        let endpoint_host = endpoint
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| MethodError::EndpointMissingHost {
                endpoint: endpoint_url.clone(),
            })?
            .to_owned();

        let location = ObjectLocation::resolve(uri, &endpoint_host)?;
        debug!(
            uri = %location,
            bucket = location.bucket(),
            key = location.key(),
            region = %config.region,
            "acquiring object"
        );
        self.writer
            .send(&reply::status_connecting(&location, &endpoint_host))
            .await?;

        let credentials = match (location.username(), location.password()) {
            (Some(user), Some(password)) => CredentialSpec::Static {
                access_key_id: user.to_owned(),
                secret_access_key: password.to_owned(),
            },
            (Some(_), None) => return Err(MethodError::MissingPassword),
            (None, _) => match &config.role_arn {
                Some(role_arn) => CredentialSpec::AssumeRole {
                    role_arn: role_arn.clone(),
                },
                None => CredentialSpec::Default,
            },
        };

        let store_endpoint = StoreEndpoint {
            region: config.region.clone(),
            endpoint_url: config.endpoint.clone(),
        };
        let store = self.provider.connect(&store_endpoint, credentials).await?;

        let metadata = match store.head_object(location.bucket(), location.key()).await {
            Ok(metadata) => metadata,
            Err(StoreError::NotFound) => {
                self.writer
                    .send(&reply::uri_failure_not_found(&location))
                    .await?;
                self.tracker.done();
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let filename = message
            .field(fields::FILENAME)
            .ok_or(MethodError::MissingField(fields::FILENAME))?;
        self.writer
            .send(&reply::uri_start(&location, metadata.size, metadata.last_modified))
            .await?;

        let written = store
            .download(location.bucket(), location.key(), Path::new(filename))
            .await?;
        let digests = FileDigests::from_file(Path::new(filename))
            .await
            .map_err(|source| MethodError::ReadBack {
                path: filename.to_owned(),
                source,
            })?;

        self.writer
            .send(&reply::uri_done(
                &location,
                filename,
                written,
                metadata.last_modified,
                &digests,
            ))
            .await?;
        self.tracker.done();
        Ok(())
    }

    /// Block until the configuration latch is set.
    async fn await_configuration(&self) -> MethodConfig {
        let mut rx = self.config_tx.subscribe();
        match rx.wait_for(Option::is_some).await {
            Ok(config) => config.clone().unwrap_or_default(),
            // The sender lives in self; a closed channel is unreachable,
            // but defaulting beats blocking forever if it ever happens.
            Err(_) => MethodConfig::default(),
        }
    }

    /// Report a fatal error to the run loop. The first one wins; later
    /// reports are dropped because the process is already on its way down.
    fn fatal(&self, err: MethodError) {
        let _ = self.fatal_tx.try_send(err);
    }
}
