//! In-memory transport and clock fakes shared by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::TransportError;
use crate::transport::{RawResponse, Sleeper, Transport};

pub(crate) type Scripted = Result<RawResponse, TransportError>;

/// Replays a scripted sequence of responses and records every request.
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeTransport {
    pub(crate) fn new(responses: Vec<Scripted>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(url, user_agent)` pairs in request order.
    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn get(&self, url: &str, user_agent: &str) -> Result<RawResponse, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_owned(), user_agent.to_owned()));
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(TransportError::Other("no scripted response left".to_owned())))
            .map(|mut response| {
                if response.final_url.is_empty() {
                    response.final_url = url.to_owned();
                }
                response
            })
    }
}

/// Records requested sleeps without waiting.
#[derive(Debug, Default)]
pub(crate) struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub(crate) fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

pub(crate) fn status(code: u16) -> Scripted {
    Ok(RawResponse {
        status: code,
        final_url: String::new(),
        body: String::new(),
    })
}

pub(crate) fn html_response(body: &str) -> Scripted {
    Ok(RawResponse {
        status: 200,
        final_url: String::new(),
        body: body.to_owned(),
    })
}

/// A 200 response whose redirect chain ended at `final_url`.
pub(crate) fn redirected_to(final_url: &str) -> Scripted {
    Ok(RawResponse {
        status: 200,
        final_url: final_url.to_owned(),
        body: String::new(),
    })
}
