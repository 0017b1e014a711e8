//! In-memory [`Transport`] and [`Sleeper`] doubles for tests.

use super::backoff::Sleeper;
use super::transport::{HttpResponse, Transport};
use crate::error::FetchError;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

pub(crate) const SEARCH_URL: &str = "https://dblp.test/search/author/api";
pub(crate) const PID_BASE_URL: &str = "https://dblp.test/pid";

/// Serves scripted responses per request and records every request made.
///
/// Requests are keyed by URL, or by `URL?q=<name>` for search queries. Each key
/// holds a queue; the last queued response is repeated once the queue drains.
/// Unscripted requests fail with [`FetchError::Transport`].
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    responses: RefCell<HashMap<String, VecDeque<Result<HttpResponse, String>>>>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&self, key: String, response: Result<HttpResponse, String>) {
        self.responses
            .borrow_mut()
            .entry(key)
            .or_default()
            .push_back(response);
    }

    pub(crate) fn on_search(&self, name: &str, body: &str) -> &Self {
        self.push(
            format!("{SEARCH_URL}?q={name}"),
            Ok(HttpResponse {
                status: 200,
                body: body.to_string(),
            }),
        );
        self
    }

    pub(crate) fn on_search_status(&self, name: &str, status: u16) -> &Self {
        self.push(
            format!("{SEARCH_URL}?q={name}"),
            Ok(HttpResponse {
                status,
                body: String::new(),
            }),
        );
        self
    }

    pub(crate) fn on_export(&self, pid: &str, status: u16, body: &str) -> &Self {
        self.push(
            format!("{PID_BASE_URL}/{pid}.bib"),
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
        self
    }

    pub(crate) fn on_export_failure(&self, pid: &str, message: &str) -> &Self {
        self.push(format!("{PID_BASE_URL}/{pid}.bib"), Err(message.to_string()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, FetchError> {
        let key = match query.iter().find(|(name, _)| *name == "q") {
            Some((_, q)) => format!("{url}?q={q}"),
            None => url.to_string(),
        };
        self.requests.borrow_mut().push(key.clone());

        let mut responses = self.responses.borrow_mut();
        let queue = responses.get_mut(&key);
        let next = match queue {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(FetchError::Transport {
                url: url.to_string(),
                message,
            }),
            None => Err(FetchError::Transport {
                url: url.to_string(),
                message: "no scripted response".to_string(),
            }),
        }
    }
}

/// Records requested sleeps without sleeping.
#[derive(Debug, Default)]
pub(crate) struct RecordingSleeper {
    slept: RefCell<Vec<Duration>>,
}

impl RecordingSleeper {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn slept(&self) -> Vec<Duration> {
        self.slept.borrow().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

/// A search API body with one hit, shaped like DBLP's.
pub(crate) fn search_hit(name: &str, pid: &str) -> String {
    format!(
        r#"{{"result":{{"query":"{name}","status":{{"@code":"200","text":"OK"}},"hits":{{"@total":"1","@computed":"1","@sent":"1","@first":"0","hit":[{{"@score":"6","@id":"1","info":{{"author":"{name}","url":"https://dblp.org/pid/{pid}"}},"url":"URL#1"}}]}}}}}}"#
    )
}

/// A search API body with no hits.
pub(crate) fn search_empty(name: &str) -> String {
    format!(
        r#"{{"result":{{"query":"{name}","status":{{"@code":"200","text":"OK"}},"hits":{{"@total":"0","@computed":"0","@sent":"0","@first":"0"}}}}}}"#
    )
}
