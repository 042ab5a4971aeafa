//! Scripted gateway shared by the flow tests.

#![allow(dead_code)]

use async_trait::async_trait;
use nearby::core::service::{Gateway, RequestOptions};
use nearby::{AppError, Result};
use parking_lot::Mutex;
use reqwest::Method;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use tokio::sync::oneshot;

/// A call the flows made, as the gateway saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub headers: HashMap<String, String>,
}

enum Reply {
    Ready(std::result::Result<Value, String>),
    Deferred(oneshot::Receiver<std::result::Result<Value, String>>),
}

/// Replies are queued per path and consumed in order.
#[derive(Default)]
pub struct MockGateway {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(&self, path: &str, value: Value) -> &Self {
        self.enqueue(path, Reply::Ready(Ok(value)));
        self
    }

    pub fn fail(&self, path: &str, message: &str) -> &Self {
        self.enqueue(path, Reply::Ready(Err(message.to_string())));
        self
    }

    /// Queue a reply the test releases later through the returned sender.
    pub fn defer(&self, path: &str) -> oneshot::Sender<std::result::Result<Value, String>> {
        let (tx, rx) = oneshot::channel();
        self.enqueue(path, Reply::Deferred(rx));
        tx
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|c| c.path == path).collect()
    }

    fn enqueue(&self, path: &str, reply: Reply) {
        self.replies
            .lock()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn request(&self, path: &str, options: RequestOptions) -> Result<Value> {
        let reply = {
            self.calls.lock().push(RecordedCall {
                method: options.method.clone(),
                path: path.to_string(),
                body: options.body.clone(),
                headers: options.headers.clone(),
            });
            self.replies.lock().get_mut(path).and_then(VecDeque::pop_front)
        };

        let outcome = match reply {
            Some(Reply::Ready(outcome)) => outcome,
            Some(Reply::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err("deferred reply dropped".to_string())),
            None => Err(format!("no reply scripted for {}", path)),
        };
        outcome.map_err(AppError::Request)
    }
}
