use futures_util::future::join_all;
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tokio::task::JoinError;
use tracing::debug;

use super::{backend::Backend, errors::UpstreamError};
use crate::{
    consensus::{BackendResponse, ResponseSet},
    wire::WireKind,
};

/// Fans one call out to every backend and collects all outcomes.
///
/// Each backend runs in its own spawned task, so a panicking backend becomes an
/// [`UpstreamError::Panicked`] entry instead of tearing down the call. Dispatch returns only
/// after every backend has produced an outcome. Without a call deadline a backend that never
/// answers stalls the whole call; backends are expected to enforce their own timeouts.
pub struct Dispatcher {
    backends: Arc<[Arc<dyn Backend>]>,
    names: Arc<[Arc<str>]>,
    call_deadline: Option<Duration>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(backends: Vec<Arc<dyn Backend>>) -> Self {
        let names = backends.iter().map(|b| Arc::<str>::from(b.name())).collect();
        Self { backends: backends.into(), names, call_deadline: None }
    }

    /// Bounds every backend call. An elapsed deadline becomes [`UpstreamError::Timeout`].
    #[must_use]
    pub fn with_call_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.call_deadline = deadline;
        self
    }

    #[must_use]
    pub fn backend_count(&self) -> usize {
        self.backends.len()
    }

    pub fn backend_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| &**n)
    }

    /// Calls every backend concurrently and decodes each answer as `kind`.
    ///
    /// Never fails: transport errors, node errors, decode errors and panics all land in the
    /// returned [`ResponseSet`] as error entries.
    pub async fn dispatch(&self, kind: WireKind, method: &str, params: Vec<Value>) -> ResponseSet {
        let method: Arc<str> = Arc::from(method);
        let params: Arc<[Value]> = params.into();

        debug!(method = %method, backends = self.backends.len(), "dispatching call");

        let handles = self.backends.iter().map(|backend| {
            let backend = Arc::clone(backend);
            let method = Arc::clone(&method);
            let params = Arc::clone(&params);
            let deadline = self.call_deadline;

            tokio::spawn(async move {
                let call = backend.call(&method, &params);
                let raw = match deadline {
                    Some(deadline) => {
                        tokio::time::timeout(deadline, call)
                            .await
                            .map_err(|_| UpstreamError::Timeout)?
                    }
                    None => call.await,
                }?;
                Ok::<_, UpstreamError>(kind.decode(raw)?)
            })
        });

        let outcomes = join_all(handles).await;

        let mut responses = ResponseSet::with_capacity(outcomes.len());
        for (backend, joined) in self.names.iter().zip(outcomes) {
            let outcome = joined.unwrap_or_else(|e| Err(UpstreamError::Panicked(panic_message(e))));
            if let Err(error) = &outcome {
                debug!(backend = %backend, method = %method, error = %error, "backend call failed");
            }
            responses.push(BackendResponse { backend: Arc::clone(backend), outcome });
        }
        responses
    }
}

fn panic_message(error: JoinError) -> String {
    match error.try_into_panic() {
        Ok(payload) => payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string()),
        Err(error) => error.to_string(),
    }
}
