//! In-memory store implementations for tests. No database required.
//!
//! These are fixture stores: built once from rows, read-only afterwards,
//! which matches how the engine treats the real collaborators.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use async_trait::async_trait;

use gachaboard_common::{DirectoryUser, EventWindow, GameEvent, ProgressionRecord};

use crate::traits::{EventSource, ProgressionStore, ProviderLedger, UserDirectory};

/// Fixture event log. Serves whatever falls inside the requested window.
pub struct MemoryEventLog {
    events: Vec<GameEvent>,
}

impl MemoryEventLog {
    pub fn new(events: Vec<GameEvent>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl EventSource for MemoryEventLog {
    async fn fetch_events(&self, window: &EventWindow, names: &[String]) -> Result<Vec<GameEvent>> {
        Ok(self
            .events
            .iter()
            .filter(|e| window.contains(e.created_at) && names.iter().any(|n| n == &e.name))
            .cloned()
            .collect())
    }
}

/// Fixture user directory.
pub struct MemoryDirectory {
    users: HashMap<String, DirectoryUser>,
}

impl MemoryDirectory {
    pub fn new(users: Vec<DirectoryUser>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            users: HashMap::new(),
        }
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn lookup_user(&self, user_id: &str) -> Result<Option<DirectoryUser>> {
        Ok(self.users.get(user_id).cloned())
    }
}

/// Fixture provider ledger: a named membership set.
pub struct MemoryLedger {
    name: String,
    members: HashSet<String>,
}

impl MemoryLedger {
    pub fn new(name: impl Into<String>, members: impl IntoIterator<Item = String>) -> Self {
        Self {
            name: name.into(),
            members: members.into_iter().collect(),
        }
    }
}

#[async_trait]
impl ProviderLedger for MemoryLedger {
    fn name(&self) -> &str {
        &self.name
    }

    async fn exists(&self, user_id: &str) -> Result<bool> {
        Ok(self.members.contains(user_id))
    }
}

/// Fixture progression store.
pub struct MemoryProgression {
    records: Vec<ProgressionRecord>,
}

impl MemoryProgression {
    pub fn new(records: Vec<ProgressionRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl ProgressionStore for MemoryProgression {
    async fn tiers_for(&self, user_id: &str) -> Result<Vec<ProgressionRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}
