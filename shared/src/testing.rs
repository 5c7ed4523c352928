//! Scripted transport for unit tests.

use std::{cell::RefCell, collections::VecDeque};

use async_trait::async_trait;

use crate::{
    gateway::{HttpRequest, HttpResponse, HttpTransport},
    model::Status,
};

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct RecordingTransport {
    script: RefCell<VecDeque<Result<HttpResponse, String>>>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: &str) {
        self.script.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn push_failure(&self, message: &str) {
        self.script.borrow_mut().push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.sent.borrow().len()
    }
}

#[async_trait(?Send)]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        self.sent.borrow_mut().push(request);
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted response".to_string()))
    }
}

pub fn submission_json(id: &str, status: Status) -> String {
    let extra = match status {
        Status::Pending => String::new(),
        Status::Completed => r#","user_ai_response":"Thank you!""#.to_string(),
        Status::Failed => r#","error_message":"Please try again later.""#.to_string(),
    };
    format!(
        r#"{{"id":"{id}","rating":4,"review":"Solid","status":"{status}","created_at":"2024-05-01T10:00:00"{extra}}}"#
    )
}
