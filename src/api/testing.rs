//
//  atlassian-cloud
//  api/testing.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::common::ApiError;
use crate::api::transport::{RawResponse, RequestDescriptor, Transport};
use crate::auth::Credentials;

/// Builds a response with a JSON body.
pub(crate) fn json_response(status: u16, body: Value) -> RawResponse {
    RawResponse::new(status, body.to_string())
}

/// Replays canned responses in order and records every request.
///
/// Once the script runs out every request gets a `599`.
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<RequestDescriptor>>,
    usernames: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn new(responses: impl IntoIterator<Item = RawResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            usernames: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn usernames(&self) -> Vec<String> {
        self.usernames.lock().unwrap().clone()
    }

    /// Value of query parameter `key` in request number `index`.
    pub(crate) fn query_value(&self, index: usize, key: &str) -> Option<String> {
        self.requests.lock().unwrap().get(index).and_then(|request| {
            request
                .query
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        request: &RequestDescriptor,
        credentials: &Credentials,
    ) -> Result<RawResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.usernames
            .lock()
            .unwrap()
            .push(credentials.username().to_string());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| RawResponse::new(599, "no scripted response")))
    }
}
