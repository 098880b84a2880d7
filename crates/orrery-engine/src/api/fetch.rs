//! Outbound HTTP requests issued by games.
//!
//! Games queue a [`FetchRequest`] through `EngineContext::fetch`. The runner
//! hands it to a platform [`Fetcher`], and the reply comes back through
//! `Game::on_fetch` on a later frame.

use std::collections::HashMap;

use crate::api::types::RequestId;
use crate::core::task::{CancelToken, Mailbox, Postbox};

/// A GET request for a text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub url: String,
}

/// Why a fetch produced no body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("request aborted")]
    Aborted,
    #[error("unreadable response body: {0}")]
    Body(String),
}

/// Completion of one request.
#[derive(Debug, Clone)]
pub struct FetchReply {
    pub id: RequestId,
    pub body: Result<String, FetchError>,
}

/// Platform hook that performs requests on behalf of the runner.
pub trait Fetcher {
    /// Start `request`. Implementations post exactly one reply to `postbox`,
    /// unless `token` is cancelled before the request settles.
    fn spawn(&mut self, request: FetchRequest, postbox: Postbox<FetchReply>, token: CancelToken);

    /// Abort the underlying transport for `id`, if the platform supports it.
    fn abort(&mut self, _id: RequestId) {}
}

/// In-flight request bookkeeping owned by the runner.
pub struct FetchQueue {
    mailbox: Mailbox<FetchReply>,
    in_flight: HashMap<RequestId, CancelToken>,
}

impl FetchQueue {
    pub fn new() -> Self {
        Self {
            mailbox: Mailbox::new(),
            in_flight: HashMap::new(),
        }
    }

    /// Hand each request to `fetcher` with a fresh cancel token.
    pub fn dispatch(&mut self, fetcher: &mut dyn Fetcher, requests: Vec<FetchRequest>) {
        for request in requests {
            log::debug!("fetch {:?}: GET {}", request.id, request.url);
            let token = CancelToken::new();
            self.in_flight.insert(request.id, token.clone());
            fetcher.spawn(request, self.mailbox.postbox(), token);
        }
    }

    /// Collect replies that arrived since the last call.
    /// Replies for cancelled or unknown requests are dropped.
    pub fn collect(&mut self) -> Vec<FetchReply> {
        let mut delivered = Vec::new();
        for reply in self.mailbox.drain() {
            match self.in_flight.remove(&reply.id) {
                Some(token) if !token.is_cancelled() => delivered.push(reply),
                _ => log::debug!("dropping reply for {:?}", reply.id),
            }
        }
        delivered
    }

    /// Cancel one request. Returns false if it was not in flight.
    pub fn cancel(&mut self, fetcher: &mut dyn Fetcher, id: RequestId) -> bool {
        match self.in_flight.remove(&id) {
            Some(token) => {
                token.cancel();
                fetcher.abort(id);
                true
            }
            None => false,
        }
    }

    /// Cancel everything still in flight.
    pub fn cancel_all(&mut self, fetcher: &mut dyn Fetcher) {
        for (id, token) in self.in_flight.drain() {
            token.cancel();
            fetcher.abort(id);
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

impl Default for FetchQueue {
    fn default() -> Self {
        Self::new()
    }
}
