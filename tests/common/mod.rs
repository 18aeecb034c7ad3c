//! Shared fixtures: scripted transport, recording surface, queued spawner

#![allow(dead_code)]

use async_trait::async_trait;
use nodewallet::app::LocalTask;
use nodewallet::{
    ClientConfig, EndpointDef, Field, HandlerTable, HistoryView, HttpResponse, Notice, RequestBody, Spawner, Surface,
    Transport, TransportError, WalletApp,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

pub const NODE_A: &str = "http://127.0.0.1:8080";
pub const NODE_B: &str = "http://127.0.0.1:8081";
pub const NODE_C: &str = "http://127.0.0.1:8082";

/// URL of `route` on `node`
pub fn url(node: &str, route: &str) -> String {
    format!("{}/{}", node, route)
}

// =============================================================================
// MockTransport
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub url: String,
    pub body: RequestBody,
    pub timeout: Option<Duration>,
}

/// Answers by exact URL. Unscripted URLs fail as if the host were down.
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<HashMap<String, Result<HttpResponse, TransportError>>>,
    delays: RefCell<HashMap<String, Duration>>,
    requests: RefCell<Vec<Recorded>>,
}

impl MockTransport {
    pub fn new() -> Self { Self::default() }

    pub fn respond(&self, url: impl Into<String>, status: u16, body: impl Into<String>) -> &Self {
        self.replies.borrow_mut().insert(url.into(), Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(&self, url: impl Into<String>, error: TransportError) -> &Self {
        self.replies.borrow_mut().insert(url.into(), Err(error));
        self
    }

    /// Hold every reply from `url` back by `delay`
    pub fn delay(&self, url: impl Into<String>, delay: Duration) -> &Self {
        self.delays.borrow_mut().insert(url.into(), delay);
        self
    }

    /// Probe route answers 200
    pub fn healthy(&self, node: &str) -> &Self {
        self.respond(url(node, ""), 200, r#"{"status":"ok"}"#)
    }

    pub fn requests(&self) -> Vec<Recorded> { self.requests.borrow().clone() }

    pub fn count(&self) -> usize { self.requests.borrow().len() }

    /// Requests whose URL is exactly `url`
    pub fn calls_to(&self, url: &str) -> Vec<Recorded> {
        self.requests.borrow().iter().filter(|r| r.url == url).cloned().collect()
    }

    /// POSTs only; probes excluded
    pub fn posts(&self) -> Vec<Recorded> {
        self.requests.borrow().iter().filter(|r| r.method == "POST").cloned().collect()
    }

    async fn answer(&self, method: &'static str, url: &str, body: RequestBody, timeout: Option<Duration>) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(Recorded { method, url: url.to_string(), body, timeout });
        let delay = self.delays.borrow().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .borrow()
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(TransportError::Failed(format!("connection refused: {}", url))))
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<HttpResponse, TransportError> {
        self.answer("GET", url, RequestBody::Empty, timeout).await
    }

    async fn post(&self, url: &str, body: RequestBody) -> Result<HttpResponse, TransportError> {
        self.answer("POST", url, body, None).await
    }
}

// =============================================================================
// RecordingSurface
// =============================================================================

pub struct RecordingSurface {
    fields: RefCell<HashMap<Field, String>>,
    notices: RefCell<Vec<Notice>>,
    diagnostics: RefCell<Vec<String>>,
    prompts: RefCell<Vec<String>>,
    answer: Cell<bool>,
    history: RefCell<Option<HistoryView>>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            fields: RefCell::default(),
            notices: RefCell::default(),
            diagnostics: RefCell::default(),
            prompts: RefCell::default(),
            answer: Cell::new(true),
            history: RefCell::default(),
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Self { Self::default() }

    pub fn with(self, field: Field, value: &str) -> Self {
        self.fields.borrow_mut().insert(field, value.to_string());
        self
    }

    /// What `confirm` answers from now on
    pub fn answer(&self, yes: bool) { self.answer.set(yes) }

    pub fn value(&self, field: Field) -> String { self.field(field) }
    pub fn notices(&self) -> Vec<Notice> { self.notices.borrow().clone() }
    pub fn diagnostics(&self) -> Vec<String> { self.diagnostics.borrow().clone() }
    pub fn prompts(&self) -> Vec<String> { self.prompts.borrow().clone() }
    pub fn history(&self) -> Option<HistoryView> { self.history.borrow().clone() }
}

impl Surface for RecordingSurface {
    fn field(&self, field: Field) -> String {
        self.fields.borrow().get(&field).cloned().unwrap_or_default()
    }

    fn set_field(&self, field: Field, value: &str) {
        self.fields.borrow_mut().insert(field, value.to_string());
    }

    fn notify(&self, notice: &Notice) {
        self.notices.borrow_mut().push(notice.clone());
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answer.get()
    }

    fn diagnostic(&self, message: &str) {
        self.diagnostics.borrow_mut().push(message.to_string());
    }

    fn render_history(&self, view: &HistoryView) {
        *self.history.borrow_mut() = Some(view.clone());
    }
}

// =============================================================================
// TaskQueue
// =============================================================================

/// Collects spawned tasks so a test decides when they run
#[derive(Clone, Default)]
pub struct TaskQueue {
    tasks: Rc<RefCell<Vec<LocalTask>>>,
}

impl TaskQueue {
    pub fn new() -> Self { Self::default() }

    pub fn spawner(&self) -> Spawner {
        let tasks = self.tasks.clone();
        Rc::new(move |task: LocalTask| tasks.borrow_mut().push(task))
    }

    pub fn pending(&self) -> usize { self.tasks.borrow().len() }

    /// Run everything queued so far, concurrently, until the queue is empty
    pub async fn drain(&self) {
        loop {
            let batch: Vec<LocalTask> = self.tasks.borrow_mut().drain(..).collect();
            if batch.is_empty() {
                return;
            }
            futures::future::join_all(batch).await;
        }
    }
}

// =============================================================================
// App fixture
// =============================================================================

pub type TestApp = WalletApp<RecordingSurface, MockTransport, HandlerTable>;

pub struct Harness {
    pub app: TestApp,
    pub surface: Rc<RecordingSurface>,
    pub transport: Rc<MockTransport>,
    pub table: HandlerTable,
    pub queue: TaskQueue,
}

impl Harness {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_surface(config, RecordingSurface::new())
    }

    pub fn with_surface(config: ClientConfig, surface: RecordingSurface) -> Self {
        let surface = Rc::new(surface);
        let transport = Rc::new(MockTransport::new());
        let table = HandlerTable::new();
        let queue = TaskQueue::new();
        let app = WalletApp::new(config, surface.clone(), transport.clone(), table.clone(), queue.spawner());
        Self { app, surface, transport, table, queue }
    }

    /// Click `control` and run whatever it spawned
    pub async fn click(&self, control: nodewallet::Control) -> usize {
        let fired = self.table.activate(control);
        self.queue.drain().await;
        fired
    }
}

/// The three stock local nodes
pub fn three_nodes() -> ClientConfig {
    ClientConfig::empty()
        .with_endpoint(EndpointDef::same(NODE_A))
        .with_endpoint(EndpointDef::same(NODE_B))
        .with_endpoint(EndpointDef::same(NODE_C))
}
