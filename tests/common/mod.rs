//! Shared test doubles for the remediation engine and HTTP surface.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use credential_rotator::{
    api::{build_router, ApiState},
    audit::{self, AuditError, AuditSink},
    identity::{self, IdentityClient, IdentityError},
    remediation::{PolicyGate, RemediationEngine},
    secrets::{self, InMemorySecretStore, SecretEntry, SecretStoreClient, SecretString, SecretsError},
};
use serde_json::Value;
use tower::ServiceExt;

/// Ordered log of every collaborator call made during a run.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Which identity operation should fail, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityFailure {
    #[default]
    None,
    Revoke,
    PasswordReset,
    Panic,
}

pub struct RecordingIdentityClient {
    log: CallLog,
    failure: IdentityFailure,
}

impl RecordingIdentityClient {
    pub fn new(log: CallLog) -> Self {
        Self { log, failure: IdentityFailure::None }
    }

    pub fn failing(log: CallLog, failure: IdentityFailure) -> Self {
        Self { log, failure }
    }
}

#[async_trait]
impl IdentityClient for RecordingIdentityClient {
    async fn revoke_sessions(&self, user_id: &str) -> identity::Result<()> {
        self.log.lock().unwrap().push(format!("revoke:{user_id}"));
        match self.failure {
            IdentityFailure::Revoke => {
                Err(IdentityError::unexpected_status("revokeSignInSessions", 503, "unavailable"))
            }
            IdentityFailure::Panic => panic!("directory client bug"),
            _ => Ok(()),
        }
    }

    async fn set_force_password_reset(
        &self,
        user_id: &str,
        require_mfa_on_next_sign_in: bool,
    ) -> identity::Result<()> {
        self.log.lock().unwrap().push(format!("reset:{user_id}:mfa={require_mfa_on_next_sign_in}"));
        match self.failure {
            IdentityFailure::PasswordReset => {
                Err(IdentityError::request_failed("connection reset by peer"))
            }
            _ => Ok(()),
        }
    }
}

/// Wraps [`InMemorySecretStore`], logging calls and failing on demand.
pub struct ScriptedSecretStore {
    inner: InMemorySecretStore,
    log: CallLog,
    fail_list: bool,
    fail_after_sets: Option<usize>,
    sets: AtomicUsize,
}

impl ScriptedSecretStore {
    pub fn new(log: CallLog) -> Self {
        Self {
            inner: InMemorySecretStore::new(),
            log,
            fail_list: false,
            fail_after_sets: None,
            sets: AtomicUsize::new(0),
        }
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// Allow `successful` writes, then fail every later one.
    pub fn failing_after_sets(mut self, successful: usize) -> Self {
        self.fail_after_sets = Some(successful);
        self
    }

    pub async fn with_secret(self, name: &str, owner: Option<&str>, value: &str) -> Self {
        self.inner.insert(name, owner, value).await;
        self
    }

    pub async fn value(&self, name: &str) -> Option<String> {
        self.inner.value(name).await.map(|v| v.expose_secret().to_string())
    }

    pub async fn version(&self, name: &str) -> Option<u64> {
        self.inner.version(name).await
    }
}

#[async_trait]
impl SecretStoreClient for ScriptedSecretStore {
    async fn list_secrets(&self) -> secrets::Result<Vec<SecretEntry>> {
        self.log.lock().unwrap().push("list".to_string());
        if self.fail_list {
            return Err(SecretsError::connection_failed("vault unreachable"));
        }
        self.inner.list_secrets().await
    }

    async fn set_secret(&self, name: &str, value: &SecretString) -> secrets::Result<()> {
        self.log.lock().unwrap().push(format!("set:{name}"));
        let attempt = self.sets.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.fail_after_sets {
            if attempt >= limit {
                return Err(SecretsError::backend_error("permission denied"));
            }
        }
        self.inner.set_secret(name, value).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAudit {
    pub user_id: String,
    pub incident_id: Option<String>,
    pub actions: Vec<String>,
}

pub struct RecordingAuditSink {
    log: CallLog,
    records: Mutex<Vec<RecordedAudit>>,
    fail: bool,
}

impl RecordingAuditSink {
    pub fn new(log: CallLog) -> Self {
        Self { log, records: Mutex::new(Vec::new()), fail: false }
    }

    pub fn failing(log: CallLog) -> Self {
        Self { log, records: Mutex::new(Vec::new()), fail: true }
    }

    pub fn records(&self) -> Vec<RecordedAudit> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn record(
        &self,
        user_id: &str,
        incident_id: Option<&str>,
        actions: &[String],
    ) -> audit::Result<()> {
        self.log.lock().unwrap().push("audit".to_string());
        if self.fail {
            return Err(AuditError::Rejected { status: 502 });
        }
        self.records.lock().unwrap().push(RecordedAudit {
            user_id: user_id.to_string(),
            incident_id: incident_id.map(str::to_string),
            actions: actions.to_vec(),
        });
        Ok(())
    }
}

/// Engine collaborators sharing one call log.
pub struct Harness {
    pub log: CallLog,
    pub identity: Arc<RecordingIdentityClient>,
    pub store: Arc<ScriptedSecretStore>,
    pub audit: Arc<RecordingAuditSink>,
}

impl Harness {
    pub fn new(
        log: CallLog,
        identity: RecordingIdentityClient,
        store: ScriptedSecretStore,
        audit: RecordingAuditSink,
    ) -> Self {
        Self { log, identity: Arc::new(identity), store: Arc::new(store), audit: Arc::new(audit) }
    }

    /// Healthy identity and audit doubles around `store`.
    pub fn healthy(log: CallLog, store: ScriptedSecretStore) -> Self {
        Self::new(
            log.clone(),
            RecordingIdentityClient::new(log.clone()),
            store,
            RecordingAuditSink::new(log),
        )
    }

    pub fn engine(&self) -> RemediationEngine {
        RemediationEngine::new(self.identity.clone(), self.store.clone(), self.audit.clone())
    }

    pub fn router(&self, gate: PolicyGate) -> Router {
        build_router(ApiState::new(gate, Arc::new(self.engine())))
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

pub async fn post_json(router: Router, path: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request");
    send(router, request).await
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
