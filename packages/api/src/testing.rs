//! Scripted [`Transport`] for tests.
//!
//! Replies are queued per `(method, path)` and handed out in order. Every
//! request is recorded so tests can assert on what was sent, or that nothing was.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

pub enum Reply {
    Ready(HttpResponse),
    Fail(String),
    /// Resolves when the paired sender fires; a dropped sender reads as a network failure.
    Deferred(oneshot::Receiver<HttpResponse>),
}

#[derive(Default)]
struct Script {
    replies: HashMap<(Method, String), VecDeque<Reply>>,
    requests: Vec<HttpRequest>,
}

#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reply the test releases by hand.
    pub fn deferred() -> (oneshot::Sender<HttpResponse>, Reply) {
        let (tx, rx) = oneshot::channel();
        (tx, Reply::Deferred(rx))
    }

    pub fn push(&self, method: Method, path: &str, reply: Reply) {
        self.script
            .lock()
            .unwrap()
            .replies
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn reply(&self, method: Method, path: &str, response: HttpResponse) {
        self.push(method, path, Reply::Ready(response));
    }

    pub fn fail(&self, method: Method, path: &str, message: &str) {
        self.push(method, path, Reply::Fail(message.to_string()));
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.script.lock().unwrap().requests.len()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let key = (request.method, request.path.clone());
        let reply = {
            let mut script = self.script.lock().unwrap();
            script.requests.push(request);
            script.replies.get_mut(&key).and_then(VecDeque::pop_front)
        };
        match reply {
            Some(Reply::Ready(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(message),
            Some(Reply::Deferred(rx)) => rx.await.map_err(|_| "reply dropped".to_string()),
            None => Err(format!("no scripted reply for {} {}", key.0.as_str(), key.1)),
        }
    }
}
