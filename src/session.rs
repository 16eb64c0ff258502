//! Cookie-backed sessions.
//!
//! Each browser gets a UUID v4 session id in an `sid` cookie; the session
//! data itself (logged-in identity plus pending flash notices) stays
//! server-side in an in-memory map. Handlers resolve a [`SessionHandle`]
//! from the request headers once and pass it around explicitly.
use std::collections::HashMap;

use axum::http::{HeaderMap, header::COOKIE};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::AppError;

pub const SESSION_COOKIE: &str = "sid";

#[derive(Debug, Clone, Copy)]
pub struct SessionHandle {
    pub id: Uuid,
    /// Set when this request created the session, meaning the response must
    /// carry the Set-Cookie header.
    pub fresh: bool,
}

impl SessionHandle {
    pub fn cookie(&self) -> String {
        format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id)
    }
}

#[derive(Default)]
struct SessionData {
    identity: Option<String>,
    notices: Vec<String>,
}

#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionData>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the caller's session from the request headers, creating one
    /// when the cookie is absent, unparseable, or no longer known.
    pub fn open(&self, headers: &HeaderMap) -> SessionHandle {
        if let Some(id) = cookie_session_id(headers) {
            if self.sessions.read().contains_key(&id) {
                return SessionHandle { id, fresh: false };
            }
        }

        let id = Uuid::new_v4();
        self.sessions.write().insert(id, SessionData::default());

        SessionHandle { id, fresh: true }
    }

    pub fn require_identity(&self, handle: &SessionHandle) -> Result<String, AppError> {
        self.identity(handle).ok_or(AppError::Unauthenticated)
    }

    pub fn identity(&self, handle: &SessionHandle) -> Option<String> {
        self.sessions
            .read()
            .get(&handle.id)
            .and_then(|data| data.identity.clone())
    }

    pub fn set_identity(&self, handle: &SessionHandle, identity: &str) {
        if let Some(data) = self.sessions.write().get_mut(&handle.id) {
            data.identity = Some(identity.to_string());
        }
    }

    pub fn clear_identity(&self, handle: &SessionHandle) {
        if let Some(data) = self.sessions.write().get_mut(&handle.id) {
            data.identity = None;
        }
    }

    pub fn push_notice(&self, handle: &SessionHandle, notice: &str) {
        if let Some(data) = self.sessions.write().get_mut(&handle.id) {
            data.notices.push(notice.to_string());
        }
    }

    /// Drains pending flash notices; they render once and are gone.
    pub fn take_notices(&self, handle: &SessionHandle) -> Vec<String> {
        self.sessions
            .write()
            .get_mut(&handle.id)
            .map(|data| std::mem::take(&mut data.notices))
            .unwrap_or_default()
    }
}

fn cookie_session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .find_map(|id| Uuid::parse_str(id).ok())
}
