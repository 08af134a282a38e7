// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process fakes of the backend collaborators.

use async_trait::async_trait;
use photo_challenge::client::{ChallengeClient, NoticeReceiver};
use photo_challenge::config::Config;
use photo_challenge::db::{DocumentStore, FirestoreDb};
use photo_challenge::error::AppError;
use photo_challenge::models::{Document, Identity, ObjectHandle};
use photo_challenge::services::{BlobStore, ChannelSensor, IdentityService};
use photo_challenge::AppState;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{oneshot, watch};

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

// ─── Identity ────────────────────────────────────────────────────

/// Accounts kept in memory; UIDs are "uid-{n}".
#[derive(Default)]
pub struct FakeIdentity {
    accounts: Mutex<HashMap<String, (String, String)>>,
    current: Mutex<Option<Identity>>,
}

#[allow(dead_code)]
impl FakeIdentity {
    /// Add an account without signing it in. Returns its UID.
    pub fn add_account(&self, email: &str, password: &str) -> String {
        let mut accounts = self.accounts.lock().unwrap();
        let uid = format!("uid-{}", accounts.len() + 1);
        accounts.insert(email.to_string(), (password.to_string(), uid.clone()));
        uid
    }

    /// Sign in as `uid` directly.
    pub fn force_sign_in(&self, uid: &str) {
        *self.current.lock().unwrap() = Some(Identity::new(uid, None, "test-token"));
    }
}

#[async_trait]
impl IdentityService for FakeIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some((stored, uid)) if stored == password => {
                let identity = Identity::new(uid.clone(), Some(email.to_string()), "test-token");
                *self.current.lock().unwrap() = Some(identity.clone());
                Ok(identity)
            }
            _ => Err(AppError::Auth(AppError::INVALID_CREDENTIALS.to_string())),
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        if password.len() < 6 {
            return Err(AppError::Auth("WEAK_PASSWORD".to_string()));
        }
        if self.accounts.lock().unwrap().contains_key(email) {
            return Err(AppError::Auth("EMAIL_EXISTS".to_string()));
        }
        let uid = self.add_account(email, password);
        let identity = Identity::new(uid, Some(email.to_string()), "test-token");
        *self.current.lock().unwrap() = Some(identity.clone());
        Ok(identity)
    }

    fn sign_out(&self) {
        *self.current.lock().unwrap() = None;
    }

    fn current_identity(&self) -> Option<Identity> {
        self.current.lock().unwrap().clone()
    }
}

// ─── Documents ───────────────────────────────────────────────────

/// Document store with optional per-call gates to control resolution order.
#[derive(Default)]
pub struct FakeDocumentStore {
    documents: Mutex<Vec<Document>>,
    fail: AtomicBool,
    gates: Mutex<VecDeque<oneshot::Receiver<Vec<Document>>>>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakeDocumentStore {
    pub fn with_challenges(names: &[&str]) -> Self {
        let store = Self::default();
        store.set_challenges(names);
        store
    }

    pub fn set_challenges(&self, names: &[&str]) {
        *self.documents.lock().unwrap() = names
            .iter()
            .enumerate()
            .map(|(i, name)| Document::new(format!("c{}", i)).with_field("name", *name))
            .collect();
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// The next un-gated call waits until the returned sender fires and then
    /// returns what it was sent.
    pub fn gate(&self) -> oneshot::Sender<Vec<Document>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for FakeDocumentStore {
    async fn list_collection(&self, name: &str) -> Result<Vec<Document>, AppError> {
        assert_eq!(name, "challenges");
        self.calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            return gate
                .await
                .map_err(|_| AppError::Store("gate dropped".to_string()));
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Store("PERMISSION_DENIED".to_string()));
        }
        Ok(self.documents.lock().unwrap().clone())
    }
}

// ─── Blobs ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeBlobStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    put_calls: AtomicUsize,
    fail_puts: AtomicBool,
    unresolvable: Mutex<HashSet<String>>,
    list_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
}

#[allow(dead_code)]
impl FakeBlobStore {
    pub fn insert(&self, key: &str, bytes: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.to_vec());
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn set_failing_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// The next un-gated `list` call waits until the returned sender fires,
    /// then lists whatever is stored at that point.
    pub fn gate_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.list_gates.lock().unwrap().push_back(rx);
        tx
    }

    /// Make URL resolution fail for one key.
    pub fn make_unresolvable(&self, key: &str) {
        self.unresolvable.lock().unwrap().insert(key.to_string());
    }
}

#[async_trait]
impl BlobStore for FakeBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), AppError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(AppError::Store("HTTP 403 Forbidden".to_string()));
        }
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectHandle>, AppError> {
        let gate = self.list_gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            gate.await
                .map_err(|_| AppError::Store("gate dropped".to_string()))?;
        }

        // Direct children only, like a delimiter listing
        Ok(self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|key| {
                key.strip_prefix(prefix)
                    .is_some_and(|rest| !rest.contains('/'))
            })
            .map(|key| ObjectHandle::from_path(key.clone()))
            .collect())
    }

    async fn resolve_url(&self, handle: &ObjectHandle) -> Result<String, AppError> {
        // Yield so concurrent resolutions actually interleave
        tokio::task::yield_now().await;
        if self.unresolvable.lock().unwrap().contains(&handle.full_path) {
            return Err(AppError::Store("HTTP 404".to_string()));
        }
        Ok(format!("https://blobs.test/{}", handle.full_path))
    }
}

// ─── Wiring ──────────────────────────────────────────────────────

/// All fakes plus the app state built on top of them.
#[allow(dead_code)]
pub struct TestBackend {
    pub identity: Arc<FakeIdentity>,
    pub store: Arc<FakeDocumentStore>,
    pub blobs: Arc<FakeBlobStore>,
    pub sensor: Arc<ChannelSensor>,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestBackend {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let identity = Arc::new(FakeIdentity::default());
        let store = Arc::new(FakeDocumentStore::default());
        let blobs = Arc::new(FakeBlobStore::default());
        let sensor = Arc::new(ChannelSensor::new());

        let state = Arc::new(AppState::new(
            config,
            identity.clone(),
            store.clone(),
            blobs.clone(),
            sensor.clone(),
        ));

        Self {
            identity,
            store,
            blobs,
            sensor,
            state,
        }
    }

    pub fn client(&self) -> (ChallengeClient, NoticeReceiver) {
        ChallengeClient::new(self.state.clone())
    }
}

/// Wait until the watched value satisfies `predicate`, or panic after 5s.
#[allow(dead_code)]
pub async fn wait_until<T, F>(rx: &mut watch::Receiver<T>, predicate: F) -> T
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    let value = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|v| predicate(v)))
        .await
        .expect("Timed out waiting for watched value")
        .expect("Watch sender dropped");
    value.clone()
}
