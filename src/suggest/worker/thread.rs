//! Fetch worker thread

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;

use futures::FutureExt;
use tokio::sync::mpsc::UnboundedReceiver;

use super::types::{FetchRequest, FetchResponse};
use crate::suggest::fetcher::SuggestionFetcher;

/// Spawn the fetch worker thread
///
/// Creates a background thread with a current-thread tokio runtime that:
/// 1. Listens for lookups on the request channel
/// 2. Runs each lookup as its own task through the fetcher
/// 3. Sends results back unless the requesting session has detached
///
/// If the runtime cannot be built, every request is answered with a failure
/// so the session never waits forever.
pub fn spawn_worker(
    fetcher: SuggestionFetcher,
    mut request_rx: UnboundedReceiver<FetchRequest>,
    response_tx: Sender<FetchResponse>,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                log::error!("Failed to create fetch worker runtime: {}", e);
                while let Some(request) = request_rx.blocking_recv() {
                    let _ = response_tx.send(FetchResponse::Failed {
                        term: request.term,
                        message: format!("suggestion worker unavailable: {}", e),
                        generation: request.generation,
                    });
                }
                return;
            }
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            runtime.block_on(worker_loop(fetcher, request_rx, response_tx));
        }));

        if let Err(e) = result {
            log::error!("Fetch worker thread panicked: {}", panic_message(e.as_ref()));
        }
    });
}

/// Accept requests until every sender is gone
async fn worker_loop(
    fetcher: SuggestionFetcher,
    mut request_rx: UnboundedReceiver<FetchRequest>,
    response_tx: Sender<FetchResponse>,
) {
    log::debug!("Fetch worker started ({})", fetcher.provider_name());

    while let Some(request) = request_rx.recv().await {
        log::debug!(
            "Worker received request {}: {}",
            request.generation,
            request.term
        );
        tokio::spawn(handle_request(
            fetcher.clone(),
            request,
            response_tx.clone(),
        ));
    }

    log::debug!("Fetch worker shutting down");
}

async fn handle_request(
    fetcher: SuggestionFetcher,
    request: FetchRequest,
    response_tx: Sender<FetchResponse>,
) {
    if request.liveness.is_cancelled() {
        log::debug!("Skipping request {}: session detached", request.generation);
        return;
    }

    // A panicking provider must still answer, or the session would stay loading
    let outcome = match AssertUnwindSafe(fetcher.fetch_term(&request.term))
        .catch_unwind()
        .await
    {
        Ok(outcome) => outcome.map_err(|e| e.to_string()),
        Err(e) => {
            let panic_msg = panic_message(e.as_ref());
            log::error!("Request {} panicked: {}", request.generation, panic_msg);
            Err(format!("provider panicked: {}", panic_msg))
        }
    };

    // The transport is never aborted; a detached session just gets nothing
    if request.liveness.is_cancelled() {
        log::debug!(
            "Dropping result of request {}: session detached",
            request.generation
        );
        return;
    }

    let response = match outcome {
        Ok(suggestions) => {
            log::debug!(
                "Request {} loaded {} suggestions",
                request.generation,
                suggestions.len()
            );
            FetchResponse::Loaded {
                term: request.term,
                suggestions,
                generation: request.generation,
            }
        }
        Err(e) => {
            log::debug!("Request {} failed: {}", request.generation, e);
            FetchResponse::Failed {
                term: request.term,
                message: e,
                generation: request.generation,
            }
        }
    };

    let _ = response_tx.send(response);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "thread_tests.rs"]
mod thread_tests;
