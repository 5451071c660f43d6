//! In-memory collaborators for handler tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{Value, json};

use civica_core::attachment::{Attachment, AttachmentError, AttachmentStore};
use civica_core::inference::{CredentialPhotoSource, InferenceError, InferenceService};
use civica_core::voting::{VotingError, VotingReply, VotingService};

use crate::AppState;

/// Decode a response body as JSON.
pub(crate) async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub(crate) fn sample_attachment(id: &str) -> Attachment {
    Attachment {
        id: id.to_string(),
        filename: "passport.jpg".to_string(),
        mime_type: "image/jpeg".to_string(),
        file_size: 2048,
        storage_key: format!("uploads/{id}/passport.jpg"),
        public_url: None,
        metadata: None,
        created_at: Utc::now(),
    }
}

#[derive(Default)]
pub(crate) struct FakeStore {
    attachments: Mutex<HashMap<String, Attachment>>,
    urls: Mutex<HashMap<String, String>>,
    failure: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl FakeStore {
    pub(crate) fn insert(&self, attachment: Attachment) {
        self.attachments
            .lock()
            .unwrap()
            .insert(attachment.id.clone(), attachment);
    }

    pub(crate) fn set_url(&self, id: &str, url: &str) {
        self.urls
            .lock()
            .unwrap()
            .insert(id.to_string(), url.to_string());
    }

    pub(crate) fn fail_with(&self, msg: &str) {
        *self.failure.lock().unwrap() = Some(msg.to_string());
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), AttachmentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().clone() {
            Some(msg) => Err(AttachmentError::repository(msg)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AttachmentStore for FakeStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Attachment>, AttachmentError> {
        self.check()?;
        Ok(self.attachments.lock().unwrap().get(id).cloned())
    }

    async fn view_file(&self, id: &str) -> Result<Option<String>, AttachmentError> {
        self.check()?;
        Ok(self.urls.lock().unwrap().get(id).cloned())
    }
}

/// Scripted inference outcome.
#[derive(Clone)]
pub(crate) enum Scripted {
    Reply(Value),
    Reject(String),
    Fail(String),
}

pub(crate) struct FakeInference {
    outcome: Mutex<Scripted>,
    calls: Mutex<Vec<String>>,
    last_inline: Mutex<Option<Value>>,
}

impl Default for FakeInference {
    fn default() -> Self {
        Self {
            outcome: Mutex::new(Scripted::Reply(json!({ "ok": true }))),
            calls: Mutex::new(Vec::new()),
            last_inline: Mutex::new(None),
        }
    }
}

impl FakeInference {
    pub(crate) fn script(&self, outcome: Scripted) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn last_inline(&self) -> Option<Value> {
        self.last_inline.lock().unwrap().clone()
    }

    fn answer(&self, call: String) -> Result<Value, InferenceError> {
        self.calls.lock().unwrap().push(call);
        match self.outcome.lock().unwrap().clone() {
            Scripted::Reply(value) => Ok(value),
            Scripted::Reject(msg) => Err(InferenceError::Rejected(msg)),
            Scripted::Fail(msg) => Err(InferenceError::Transport(msg)),
        }
    }
}

#[async_trait]
impl InferenceService for FakeInference {
    async fn analyze_attachment(&self, attachment: &Attachment) -> Result<Value, InferenceError> {
        self.answer(format!("analyze:{}", attachment.id))
    }

    async fn ocr_analysis(&self, attachment: &Attachment) -> Result<Value, InferenceError> {
        self.answer(format!("ocr:{}", attachment.id))
    }

    async fn credential_photo(
        &self,
        source: CredentialPhotoSource,
    ) -> Result<Value, InferenceError> {
        match source {
            CredentialPhotoSource::ByReference(id) => self.answer(format!("photo:ref:{id}")),
            CredentialPhotoSource::Inline(payload) => {
                *self.last_inline.lock().unwrap() = Some(payload);
                self.answer("photo:inline".to_string())
            }
        }
    }

    async fn compare_faces(&self, id1: &str, id2: &str) -> Result<Value, InferenceError> {
        self.answer(format!("compare:{id1}:{id2}"))
    }
}

#[derive(Default)]
pub(crate) struct FakeVoting {
    calls: Mutex<Vec<(String, Value)>>,
}

impl FakeVoting {
    pub(crate) fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: &str, input: Value) -> Result<VotingReply, VotingError> {
        self.calls
            .lock()
            .unwrap()
            .push((op.to_string(), input.clone()));
        Ok(VotingReply {
            status: 200,
            body: json!({ "op": op, "input": input }),
        })
    }
}

#[async_trait]
impl VotingService for FakeVoting {
    async fn cast_vote(&self, request: Value) -> Result<VotingReply, VotingError> {
        self.record("cast_vote", request)
    }

    async fn add_candidate(&self, request: Value) -> Result<VotingReply, VotingError> {
        self.record("add_candidate", request)
    }

    async fn get_candidate(&self, id: &str) -> Result<VotingReply, VotingError> {
        if id == "broken" {
            return Err(VotingError::Transport("connection refused".to_string()));
        }
        self.record("get_candidate", Value::String(id.to_string()))
    }

    async fn mint_vote_proof(&self, request: Value) -> Result<VotingReply, VotingError> {
        self.record("mint_vote_proof", request)
    }
}

pub(crate) struct Fakes {
    pub store: Arc<FakeStore>,
    pub inference: Arc<FakeInference>,
    pub voting: Arc<FakeVoting>,
}

/// Build an `AppState` over fresh fakes, returning handles to inspect them.
pub(crate) fn test_state() -> (AppState, Fakes) {
    let fakes = Fakes {
        store: Arc::new(FakeStore::default()),
        inference: Arc::new(FakeInference::default()),
        voting: Arc::new(FakeVoting::default()),
    };

    let state = AppState {
        attachments: fakes.store.clone(),
        inference: fakes.inference.clone(),
        voting: fakes.voting.clone(),
    };

    (state, fakes)
}
