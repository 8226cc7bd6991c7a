//! Worker lookups and paginated listings.
//!
//! Pages are requested with `$skip`/`top` offsets and the listing ends at the
//! first page that decodes to zero workers. Three consumption styles share
//! that loop:
//! - [`WorkerService::list_workers`] accumulates everything in memory
//! - [`WorkerService::list_workers_into`] pushes workers into a channel from
//!   a background task
//! - [`WorkerService::stream_workers`] pulls pages lazily as a `Stream`

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;

use futures::Stream;
use futures::stream;
use log::{debug, error, info, warn};
use reqwest::Method;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use adp_common::{Config, ConfigError, DEFAULT_PAGE_SIZE, Worker, WorkerPage};

use crate::auth::OAuthAuthenticator;
use crate::error::ClientError;
use crate::transport::Transport;
use crate::Authenticator;

/// Path of the workers collection, relative to the API base URL.
pub const WORKERS_PATH: &str = "hr/v2/workers";

/// Lazily paged workers, ending after the first error.
pub type WorkerStream = Pin<Box<dyn Stream<Item = Result<Worker, ClientError>> + Send>>;

/// Read access to ADP worker records.
#[derive(Debug)]
pub struct WorkerService<A> {
    transport: Transport<A>,
}

impl<A> Clone for WorkerService<A> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
        }
    }
}

impl WorkerService<OAuthAuthenticator> {
    /// Builds an authenticator from `config`, authenticates, and returns a
    /// service pointed at the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns any configuration, validation, certificate or authentication
    /// error encountered along the way.
    pub async fn connect(config: &Config) -> Result<Self, ClientError> {
        let mut authenticator = OAuthAuthenticator::from_config(config)?;
        authenticator.authenticate().await?;
        Ok(Self::new(authenticator, &config.base_url))
    }
}

impl<A: Authenticator + 'static> WorkerService<A> {
    /// Creates a service around an authenticator, which should already be
    /// authenticated.
    pub fn new(authenticator: A, base_url: impl Into<String>) -> Self {
        Self::with_shared(Arc::new(authenticator), base_url)
    }

    /// Creates a service around an authenticator that is shared elsewhere.
    pub fn with_shared(authenticator: Arc<A>, base_url: impl Into<String>) -> Self {
        Self {
            transport: Transport::new(authenticator, base_url),
        }
    }

    /// The transport, for issuing other authenticated requests.
    pub const fn transport(&self) -> &Transport<A> {
        &self.transport
    }

    /// Fetches one worker by associate OID.
    ///
    /// The response uses the page envelope, so the result is a
    /// [`WorkerPage`] that normally holds a single worker.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::HttpStatus`] for unknown workers and the usual
    /// transport and decode errors.
    pub async fn get_worker(&self, associate_oid: &str) -> Result<WorkerPage, ClientError> {
        let response = self
            .transport
            .request(Method::GET, &format!("{WORKERS_PATH}/{associate_oid}"))
            .await?;
        Transport::<A>::decode_page(response).await
    }

    /// Fetches one worker by associate OID, returning `None` when the
    /// response holds no worker.
    ///
    /// # Errors
    ///
    /// Same as [`WorkerService::get_worker`].
    pub async fn find_worker(&self, associate_oid: &str) -> Result<Option<Worker>, ClientError> {
        let page = self.get_worker(associate_oid).await?;
        Ok(page.into_iter().next())
    }

    /// Fetches `top` workers starting at offset `skip`.
    ///
    /// # Errors
    ///
    /// Returns transport, status and decode errors.
    pub async fn fetch_page(&self, top: usize, skip: usize) -> Result<WorkerPage, ClientError> {
        debug!("Fetching workers page skip={skip} top={top}");
        let response = self
            .transport
            .request(Method::GET, &format!("{WORKERS_PATH}?$skip={skip}&top={top}"))
            .await?;
        Transport::<A>::decode_page(response).await
    }

    /// Lists every worker, [`DEFAULT_PAGE_SIZE`] at a time.
    ///
    /// # Errors
    ///
    /// Returns the first page error; workers already fetched are discarded.
    pub async fn list_workers(&self) -> Result<Vec<Worker>, ClientError> {
        let mut workers = Vec::new();
        let mut skip = 0;

        loop {
            let page = self.fetch_page(DEFAULT_PAGE_SIZE, skip).await?;
            if page.is_empty() {
                break;
            }
            workers.extend(page);
            skip += DEFAULT_PAGE_SIZE;
        }

        info!("Listed {} workers", workers.len());
        Ok(workers)
    }

    /// Lists every worker into `sink` from a background task.
    ///
    /// Workers arrive in server page order, then in-page order. The sender is
    /// moved into the task and dropped when it ends, which closes the channel
    /// on every path. This future resolves only after the task has finished;
    /// if it is dropped early, the task is cancelled.
    ///
    /// A receiver that hangs up early ends the listing without error.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`ClientError::Configuration`] if `page_size` is zero
    /// - [`ClientError::Cancelled`] if `cancel` fires first
    /// - The first page error otherwise
    pub async fn list_workers_into(
        &self,
        sink: mpsc::Sender<Worker>,
        page_size: usize,
        cancel: CancellationToken,
    ) -> Result<(), ClientError> {
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize.into());
        }

        let producer_cancel = cancel.child_token();
        let _guard = producer_cancel.clone().drop_guard();

        let service = self.clone();
        let handle = tokio::spawn(async move {
            service
                .produce_workers(sink, page_size, producer_cancel)
                .await
        });

        let outcome = handle.await?;
        if let Err(e) = &outcome {
            error!("Worker listing failed: {e}");
        }
        outcome
    }

    async fn produce_workers(
        &self,
        sink: mpsc::Sender<Worker>,
        page_size: usize,
        cancel: CancellationToken,
    ) -> Result<(), ClientError> {
        let mut skip = 0;
        let mut delivered = 0usize;

        loop {
            let page = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    info!("Worker listing cancelled after {delivered} workers");
                    return Err(ClientError::Cancelled);
                }
                page = self.fetch_page(page_size, skip) => page?,
            };

            if page.is_empty() {
                info!("Streamed {delivered} workers");
                return Ok(());
            }

            for worker in page {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => {
                        info!("Worker listing cancelled after {delivered} workers");
                        return Err(ClientError::Cancelled);
                    }
                    sent = sink.send(worker) => {
                        if sent.is_err() {
                            warn!("Worker receiver dropped after {delivered} workers, stopping");
                            return Ok(());
                        }
                    }
                }
                delivered += 1;
            }

            skip += page_size;
        }
    }

    /// Lists every worker as a lazy stream, fetching the next page only once
    /// the buffered one is drained.
    ///
    /// The stream yields the first error it meets and then ends. A zero
    /// `page_size` yields a single [`ClientError::Configuration`].
    pub fn stream_workers(&self, page_size: usize) -> WorkerStream {
        let cursor = PageCursor {
            service: self.clone(),
            page_size,
            skip: 0,
            buffer: VecDeque::new(),
            done: false,
        };

        Box::pin(stream::unfold(cursor, |mut cursor| async move {
            loop {
                if let Some(worker) = cursor.buffer.pop_front() {
                    return Some((Ok(worker), cursor));
                }
                if cursor.done {
                    return None;
                }
                if cursor.page_size == 0 {
                    cursor.done = true;
                    return Some((Err(ConfigError::InvalidPageSize.into()), cursor));
                }

                match cursor.service.fetch_page(cursor.page_size, cursor.skip).await {
                    Ok(page) if page.is_empty() => return None,
                    Ok(page) => {
                        cursor.skip += cursor.page_size;
                        cursor.buffer.extend(page);
                    }
                    Err(e) => {
                        cursor.done = true;
                        return Some((Err(e), cursor));
                    }
                }
            }
        }))
    }
}

struct PageCursor<A> {
    service: WorkerService<A>,
    page_size: usize,
    skip: usize,
    buffer: VecDeque<Worker>,
    done: bool,
}
