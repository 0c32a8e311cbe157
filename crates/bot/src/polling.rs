//! Long-polling loop.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use feedcat_common::AppResult;
use tracing::{debug, info};

use crate::handlers::Dispatcher;
use crate::telegram::Update;

/// Pause after a failed fetch before polling again.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Where updates come from.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Fetch the updates after `offset`, waiting for new ones if needed.
    async fn fetch(&self, offset: Option<i64>) -> AppResult<Vec<Update>>;
}

#[async_trait]
impl<T: UpdateSource + ?Sized> UpdateSource for std::sync::Arc<T> {
    async fn fetch(&self, offset: Option<i64>) -> AppResult<Vec<Update>> {
        (**self).fetch(offset).await
    }
}

/// Feeds updates to the dispatcher one at a time, in arrival order.
pub struct Poller<S> {
    source: S,
    dispatcher: Dispatcher,
    retry_delay: Duration,
}

impl<S: UpdateSource> Poller<S> {
    /// Poller with the default retry delay.
    #[must_use]
    pub const fn new(source: S, dispatcher: Dispatcher) -> Self {
        Self {
            source,
            dispatcher,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Override the pause after a failed fetch.
    #[must_use]
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Poll until `shutdown` completes.
    ///
    /// An update counts as consumed once it has been dispatched; the next
    /// fetch asks only for later ones.
    pub async fn run<F>(self, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        tokio::pin!(shutdown);
        let mut offset: Option<i64> = None;
        info!("Polling for updates");

        loop {
            let fetched = tokio::select! {
                () = &mut shutdown => break,
                fetched = self.source.fetch(offset) => fetched,
            };

            match fetched {
                Ok(updates) => {
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        let update_id = update.update_id;
                        match update.into_event() {
                            Some(event) => self.dispatcher.dispatch(event).await,
                            None => debug!(update_id = update_id, "Skipping unsupported update"),
                        }
                    }
                }
                Err(e) => {
                    e.log("Failed to fetch updates");
                    tokio::select! {
                        () = &mut shutdown => break,
                        () = tokio::time::sleep(self.retry_delay) => {}
                    }
                }
            }
        }

        info!("Polling stopped");
    }
}
