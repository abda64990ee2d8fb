use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Snapshot of one remote resource as seen by the display layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Runs fetches for one resource and publishes every state change.
///
/// Starting a fetch sets `loading` and keeps the previous data. Success
/// replaces the data and clears the error; failure clears the data and
/// records the error message.
#[derive(Debug)]
pub struct Fetcher<T> {
    state: Arc<watch::Sender<FetchState<T>>>,
}

impl<T> Clone for Fetcher<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Default for Fetcher<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Fetcher<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (tx, _) = watch::channel(FetchState::default());
        Self { state: Arc::new(tx) }
    }

    pub fn state(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.state.borrow().data.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Receiver that wakes on every transition.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    /// Drive `fetch` to completion on the current task.
    pub async fn run<F, E>(&self, fetch: F) -> FetchState<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.state.send_modify(|s| s.loading = true);

        let outcome = fetch.await;

        self.state.send_modify(|s| {
            match outcome {
                Ok(value) => {
                    s.data = Some(value);
                    s.error = None;
                }
                Err(e) => {
                    s.data = None;
                    s.error = Some(e.to_string());
                }
            }
            s.loading = false;
        });

        self.state()
    }

    /// Run `fetch` on a background task. `loading` is already set when this returns.
    pub fn spawn<F, E>(&self, fetch: F) -> JoinHandle<FetchState<T>>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        self.state.send_modify(|s| s.loading = true);

        let this = self.clone();
        tokio::spawn(async move { this.run(fetch).await })
    }
}
