//! In-memory port implementations shared by the unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use freemate_domain::{ClientConfig, OutgoingRequest, RawResponse};

use crate::auth::TokenStore;
use crate::client::ApiClient;
use crate::ports::{Clock, HttpTransport, Notifier, SessionStorage, TransportError};

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()),
        }
    }
}

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.lock().unwrap().remove(key);
    }
}

/// Everything the core asked the UI to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
    Loading(bool),
    Redirect(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn push(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

impl Notifier for RecordingNotifier {
    fn show_success(&self, message: &str) {
        self.push(Notice::Success(message.to_string()));
    }

    fn show_error(&self, message: &str) {
        self.push(Notice::Error(message.to_string()));
    }

    fn show_loading(&self, show: bool) {
        self.push(Notice::Loading(show));
    }

    fn redirect(&self, destination: &str) {
        self.push(Notice::Redirect(destination.to_string()));
    }
}

/// Transport that replays canned responses and records what it was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<OutgoingRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<RawResponse, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<OutgoingRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: &OutgoingRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {} {}", request.method, request.url))
    }
}

/// A client wired to in-memory ports.
pub struct Harness {
    pub client: Arc<ApiClient>,
    pub tokens: Arc<TokenStore>,
    pub transport: Arc<ScriptedTransport>,
    pub notifier: Arc<RecordingNotifier>,
    pub storage: Arc<MemoryStorage>,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    pub const BASE_URL: &'static str = "https://api.test";

    pub fn new(responses: Vec<Result<RawResponse, TransportError>>) -> Self {
        let config = Arc::new(ClientConfig::with_base_url(Self::BASE_URL));
        let clock = Arc::new(ManualClock::default());
        let storage = Arc::new(MemoryStorage::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let transport = Arc::new(ScriptedTransport::new(responses));
        let tokens = Arc::new(TokenStore::new(
            &config.token,
            clock.clone(),
            storage.clone(),
        ));
        let client = Arc::new(ApiClient::new(
            config,
            transport.clone(),
            tokens.clone(),
            notifier.clone(),
        ));

        Self {
            client,
            tokens,
            transport,
            notifier,
            storage,
            clock,
        }
    }
}
