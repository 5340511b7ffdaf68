//! In-memory browser sessions holding a page credential.
//!
//! Session ids are random UUIDs handed out in an `HttpOnly` cookie. Only the
//! SHA-256 hash of an id is kept, so a memory dump does not reveal live
//! cookies.

use crate::publishing::PublishCredential;
use axum::http::{HeaderMap, header};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub const SESSION_COOKIE: &str = "pagepilot_session";

fn hash_session_id(id: &str) -> String {
    hex::encode(Sha256::digest(id.as_bytes()))
}

/// Result of resolving a session cookie.
#[derive(Debug)]
pub enum SessionLookup {
    Missing,
    Incomplete,
    Found(PublishCredential),
}

struct SessionEntry {
    credential: PublishCredential,
    created: Instant,
}

pub struct SessionStore {
    entries: Mutex<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl.as_secs()
    }

    /// Store a credential under a fresh session id and return the id.
    pub fn create(&self, credential: PublishCredential) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let now = Instant::now();
        entries.retain(|_, entry| now.duration_since(entry.created) < self.ttl);
        entries.insert(
            hash_session_id(&id),
            SessionEntry {
                credential,
                created: now,
            },
        );
        id
    }

    pub fn lookup(&self, id: &str) -> SessionLookup {
        if id.is_empty() {
            return SessionLookup::Missing;
        }
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match entries.get(&hash_session_id(id)) {
            Some(entry) if entry.created.elapsed() >= self.ttl => SessionLookup::Missing,
            Some(entry) if !entry.credential.is_complete() => SessionLookup::Incomplete,
            Some(entry) => SessionLookup::Found(entry.credential.clone()),
            None => SessionLookup::Missing,
        }
    }

    /// Credential for the request's session cookie, if any.
    pub fn credential_for(&self, headers: &HeaderMap) -> Option<PublishCredential> {
        match session_id(headers).map(|id| self.lookup(id)) {
            Some(SessionLookup::Found(credential)) => Some(credential),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Session id from the `Cookie` header(s).
pub fn session_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

pub fn session_cookie(id: &str, max_age_secs: u64) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; Max-Age={max_age_secs}; HttpOnly; Secure; SameSite=Lax")
}
