// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking the Kubernetes API and configuration discovery,
//! and for capturing log output.

use crate::error::{Result, SteadyError};
use crate::kubernetes::{ClientKind, ConfigLoader, Connector};
use http::{Request, Response};
use kube::client::Body;
use kube::{Client, Config as KConfig};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

type Key = (String, String);

/// A mock HTTP service that answers with scripted responses per method and path.
///
/// Responses registered for the same route are served in order; the last one
/// keeps being served once the others are used up. Unmatched requests get 404.
#[derive(Clone, Default)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<Key, VecDeque<(u16, String)>>>>,
    requests: Arc<Mutex<Vec<Key>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PATCH", path, status, body)
    }

    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Every (method, path) received so far
    pub fn requests(&self) -> Vec<Key> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn next_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(&(method.to_string(), path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let response = self.next_response(&method, &path);
        self.requests.lock().unwrap().push((method, path));

        Box::pin(async move {
            let (status, body) =
                response.unwrap_or_else(|| (404, not_found_json("resource", "unknown")));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Log lines emitted on the current thread while the guard is held.
///
/// `#[tokio::test]` runs on a current-thread runtime, so everything the test
/// awaits is captured.
#[derive(Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn start() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn lines(&self) -> Vec<String> {
        let buf = self.buf.lock().unwrap();
        String::from_utf8_lossy(&buf).lines().map(str::to_string).collect()
    }

    /// ERROR lines mentioning `needle`
    pub fn errors_mentioning(&self, needle: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.contains(" ERROR ") && line.contains(needle))
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.lines().iter().filter(|line| line.contains(" ERROR ")).count()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Configuration pointing at a cluster that is never dialed
pub fn test_kube_config() -> KConfig {
    KConfig::new("https://kubernetes.default.svc".parse().unwrap())
}

#[derive(Clone, Copy)]
enum InCluster {
    Available,
    Unavailable,
    Broken,
}

/// A config loader with scripted outcomes that counts its calls.
#[derive(Clone)]
pub struct StubLoader {
    in_cluster: InCluster,
    kubeconfig_ok: bool,
    in_cluster_calls: Arc<AtomicUsize>,
    kubeconfig_calls: Arc<AtomicUsize>,
}

impl StubLoader {
    fn build(in_cluster: InCluster, kubeconfig_ok: bool) -> Self {
        Self {
            in_cluster,
            kubeconfig_ok,
            in_cluster_calls: Arc::default(),
            kubeconfig_calls: Arc::default(),
        }
    }

    pub fn in_cluster() -> Self {
        Self::build(InCluster::Available, true)
    }

    pub fn kubeconfig_only() -> Self {
        Self::build(InCluster::Unavailable, true)
    }

    /// Neither discovery mode works
    pub fn unconfigured() -> Self {
        Self::build(InCluster::Unavailable, false)
    }

    /// In-cluster discovery fails with something other than unavailability
    pub fn broken_in_cluster() -> Self {
        Self::build(InCluster::Broken, true)
    }

    pub fn in_cluster_calls(&self) -> usize {
        self.in_cluster_calls.load(Ordering::SeqCst)
    }

    pub fn kubeconfig_calls(&self) -> usize {
        self.kubeconfig_calls.load(Ordering::SeqCst)
    }
}

impl ConfigLoader for StubLoader {
    fn in_cluster(&self) -> Result<KConfig> {
        self.in_cluster_calls.fetch_add(1, Ordering::SeqCst);
        match self.in_cluster {
            InCluster::Available => Ok(test_kube_config()),
            InCluster::Unavailable => Err(SteadyError::InClusterUnavailable(
                "KUBERNETES_SERVICE_HOST not set".to_string(),
            )),
            InCluster::Broken => Err(SteadyError::KubeconfigError(
                "service account token unreadable".to_string(),
            )),
        }
    }

    fn kubeconfig(&self) -> impl Future<Output = Result<KConfig>> + Send {
        self.kubeconfig_calls.fetch_add(1, Ordering::SeqCst);
        let outcome = if self.kubeconfig_ok {
            Ok(test_kube_config())
        } else {
            Err(SteadyError::KubeconfigError(
                "failed to read ~/.kube/config".to_string(),
            ))
        };
        async move {
            // Give concurrent first accesses a chance to interleave
            tokio::task::yield_now().await;
            outcome
        }
    }
}

/// Connector handing out mock-backed clients and counting connects per kind.
#[derive(Clone, Default)]
pub struct CountingConnector {
    connects: Arc<Mutex<HashMap<ClientKind, usize>>>,
    fail_next: Arc<AtomicBool>,
}

impl CountingConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first connect fails, later ones succeed
    pub fn failing_once() -> Self {
        let connector = Self::default();
        connector.fail_next.store(true, Ordering::SeqCst);
        connector
    }

    pub fn connects(&self, kind: ClientKind) -> usize {
        self.connects.lock().unwrap().get(&kind).copied().unwrap_or(0)
    }
}

impl Connector for CountingConnector {
    fn connect(&self, kind: ClientKind, _config: &KConfig) -> Result<Client> {
        *self.connects.lock().unwrap().entry(kind).or_default() += 1;
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(SteadyError::KubeconfigError(format!(
                "Failed to create {} client: tls setup failed",
                kind
            )));
        }
        Ok(MockService::new().into_client())
    }
}

pub fn pod_json(namespace: &str, name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid"
        }
    })
    .to_string()
}

pub fn node_list_json(names: &[&str]) -> String {
    let items: Vec<_> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "apiVersion": "v1",
                "kind": "Node",
                "metadata": { "name": name }
            })
        })
        .collect();
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "NodeList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(404, "NotFound", &format!("{} \"{}\" not found", resource, name))
}

/// Create a 409 conflict response
pub fn already_exists_json(resource: &str, name: &str) -> String {
    status_json(409, "AlreadyExists", &format!("{} \"{}\" already exists", resource, name))
}

fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}
