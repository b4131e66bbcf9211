//! Bounded-concurrency request dispatch with partial-failure semantics.
mod gate;


use std::num::NonZeroUsize;

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult, DispatchError};
use crate::request::{SerializedRequest, SerializedResponse};
use crate::transport::RequestSender;

use gate::ConcurrencyGate;

pub const DEFAULT_CONCURRENCY: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(value) => value,
    None => NonZeroUsize::MIN,
};

#[derive(Debug, Clone, Copy)]
pub struct DispatchOptions {
    /// Maximum number of in-flight sends at any moment.
    pub concurrency: NonZeroUsize,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// A successful dispatch outcome: the request together with its response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestResponsePair {
    pub req: SerializedRequest,
    pub res: SerializedResponse,
}

/// A failed dispatch outcome, carrying the original request for diagnosis
/// or a caller-side retry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedRequest {
    pub req: SerializedRequest,
    pub err: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Succeeded(RequestResponsePair),
    Failed(FailedRequest),
}

/// The partitioned result of one dispatch run. Order within each sequence
/// reflects completion order, not submission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub succeeded: Vec<RequestResponsePair>,
    pub failed: Vec<FailedRequest>,
}

/// Sends every request through `sender` with at most `options.concurrency`
/// sends in flight at once. A failed send becomes a [`FailedRequest`] and
/// never aborts its siblings; each request gets exactly one send, no
/// retries. An empty input returns an empty result without calling the
/// sender at all.
pub async fn dispatch<S>(
    requests: Vec<SerializedRequest>,
    sender: &S,
    options: DispatchOptions,
) -> BatchResult
where
    S: RequestSender + ?Sized,
{
    if requests.is_empty() {
        debug!("Nothing to dispatch");
        return BatchResult::default();
    }
    debug!(
        "Sending {} requests, {} at a time",
        requests.len(),
        options.concurrency
    );

    let gate = ConcurrencyGate::new(options.concurrency);
    let total = requests.len();
    let mut in_flight: FuturesUnordered<_> = requests
        .into_iter()
        .map(|request| send_one(&gate, sender, request))
        .collect();

    let mut outcomes = Vec::with_capacity(total);
    while let Some(outcome) = in_flight.next().await {
        outcomes.push(outcome);
    }
    drop(in_flight);
    gate.close();

    aggregate(outcomes)
}

async fn send_one<S>(gate: &ConcurrencyGate, sender: &S, request: SerializedRequest) -> Outcome
where
    S: RequestSender + ?Sized,
{
    let Some(_permit) = gate.admit().await else {
        // The gate only closes after the run settles; if a send ever sees a
        // closed gate, surface it instead of dropping the request.
        return Outcome::Failed(FailedRequest {
            err: "dispatch gate closed".to_owned(),
            req: request,
        });
    };
    match sender.send(&request).await {
        Ok(response) => Outcome::Succeeded(RequestResponsePair {
            req: request,
            res: response,
        }),
        Err(err) => Outcome::Failed(FailedRequest {
            err: err.to_string(),
            req: request,
        }),
    }
}

/// Partitions outcomes into succeeded and failed sequences, preserving the
/// order in which outcomes were produced. Total: never drops an outcome.
#[must_use]
pub fn aggregate(outcomes: Vec<Outcome>) -> BatchResult {
    let mut result = BatchResult::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Succeeded(pair) => result.succeeded.push(pair),
            Outcome::Failed(failed) => result.failed.push(failed),
        }
    }
    result
}

/// All-or-nothing reduction over [`dispatch`]: returns the succeeded pairs,
/// or a single error enumerating every failure message once the whole batch
/// has had its chance to complete.
///
/// # Errors
///
/// Returns an error when any request in the batch failed.
pub async fn bombard<S>(
    requests: Vec<SerializedRequest>,
    sender: &S,
    options: DispatchOptions,
) -> AppResult<Vec<RequestResponsePair>>
where
    S: RequestSender + ?Sized,
{
    let result = dispatch(requests, sender, options).await;
    if result.failed.is_empty() {
        return Ok(result.succeeded);
    }
    let failures: Vec<String> = result
        .failed
        .iter()
        .map(|failed| failed.err.clone())
        .collect();
    Err(AppError::dispatch(DispatchError::DispatchFailed {
        failures,
    }))
}
