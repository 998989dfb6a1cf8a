//! Response set and consensus failure types.

use std::sync::Arc;
use thiserror::Error;

use crate::{upstream::UpstreamError, wire::WireValue};

/// Outcome of one backend for one call.
#[derive(Debug)]
pub struct BackendResponse {
    pub backend: Arc<str>,
    pub outcome: Result<WireValue, UpstreamError>,
}

impl BackendResponse {
    #[must_use]
    pub fn value(backend: impl Into<Arc<str>>, value: WireValue) -> Self {
        Self { backend: backend.into(), outcome: Ok(value) }
    }

    #[must_use]
    pub fn error(backend: impl Into<Arc<str>>, error: UpstreamError) -> Self {
        Self { backend: backend.into(), outcome: Err(error) }
    }
}

/// Every backend's outcome for a single call, values and errors together.
///
/// Built once per call by the dispatcher and dropped after resolution. Resolvers never
/// depend on entry order.
#[derive(Debug, Default)]
pub struct ResponseSet {
    entries: Vec<BackendResponse>,
}

impl ResponseSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, response: BackendResponse) {
        self.entries.push(response);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[BackendResponse] {
        &self.entries
    }

    /// Successful values, in arrival order.
    pub fn values(&self) -> impl Iterator<Item = &WireValue> {
        self.entries.iter().filter_map(|e| e.outcome.as_ref().ok())
    }

    /// Backend errors paired with the backend that produced them.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &UpstreamError)> {
        self.entries.iter().filter_map(|e| e.outcome.as_ref().err().map(|err| (&*e.backend, err)))
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Error messages grouped by display text, first-seen order, with their counts.
    #[must_use]
    pub fn error_groups(&self) -> Vec<(String, usize)> {
        let mut groups: Vec<(String, usize)> = Vec::new();
        for (_, err) in self.errors() {
            let message = err.to_string();
            match groups.iter_mut().find(|(m, _)| *m == message) {
                Some((_, count)) => *count += 1,
                None => groups.push((message, 1)),
            }
        }
        groups
    }

    /// Distinct error messages, first-seen order.
    #[must_use]
    pub fn distinct_error_messages(&self) -> Vec<String> {
        self.error_groups().into_iter().map(|(message, _)| message).collect()
    }
}

impl FromIterator<BackendResponse> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = BackendResponse>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

/// Why a resolver could not produce a value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsensusError {
    #[error("not enough occurrences of the same response")]
    NotEnoughOccurrences,

    #[error("servers returned different responses")]
    DifferentResponses,

    #[error("not enough responses")]
    NotEnoughResponses,

    /// A single backend error message outranked every value.
    #[error("{0}")]
    Backend(String),

    #[error("the following errors occurred: [{}]", .0.join(", "))]
    Multiple(Vec<String>),
}

impl ConsensusError {
    /// Static label used for metrics.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NotEnoughOccurrences => "not_enough_occurrences",
            Self::DifferentResponses => "different_responses",
            Self::NotEnoughResponses => "not_enough_responses",
            Self::Backend(_) => "backend_error",
            Self::Multiple(_) => "multiple",
        }
    }

    /// Appends this failure to the distinct backend error messages, if there are any.
    #[must_use]
    pub fn with_backend_errors(self, mut messages: Vec<String>) -> Self {
        if messages.is_empty() {
            return self;
        }
        messages.push(self.to_string());
        Self::Multiple(messages)
    }
}
