use anyhow::{Error, Result};

use crate::backend::Backend;
use crate::model::{ActionResponse, Entry, EntryForm, RevealResponse};

/// One request as the backend saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(String),
    Add(EntryForm),
    FetchForEdit(i64),
    Update(i64, EntryForm),
    Delete(i64),
    Reveal(i64),
}

impl Call {
    pub fn is_search(&self) -> bool {
        match self {
            Call::Search(_) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
struct Stored {
    entry: Entry,
    secret: String,
}

/// In-memory store that answers like the HTTP backend and records every call.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    stored: Vec<Stored>,
    next_id: i64,
    clock: u32,
    /// Fail every request as if the connection dropped.
    pub offline: bool,
    /// Answer every mutation and reveal with `success: false` and this message.
    pub reject_with: Option<String>,
    pub calls: Vec<Call>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend { next_id: 1, ..Self::default() }
    }

    pub fn with_entry(mut self, form: EntryForm) -> Self {
        self.insert(&form);
        self
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.stored.iter().map(|s| s.entry.clone()).collect()
    }

    pub fn secret(&self, id: i64) -> Option<&str> {
        self.find(id).map(|s| s.secret.as_str())
    }

    pub fn search_count(&self) -> usize {
        self.calls.iter().filter(|c| c.is_search()).count()
    }

    fn tick(&mut self) -> String {
        self.clock += 1;
        format!("2024-01-01 {:02}:{:02}", self.clock / 60, self.clock % 60)
    }

    fn insert(&mut self, form: &EntryForm) -> i64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        let now = self.tick();
        self.stored.push(Stored {
            entry: Entry {
                id,
                service_name: form.service_name.clone(),
                username: Some(form.username.clone()),
                email: Some(form.email.clone()),
                notes: Some(form.notes.clone()),
                created_at: Some(now.clone()),
                updated_at: Some(now),
            },
            secret: form.password.clone(),
        });
        id
    }

    fn find(&self, id: i64) -> Option<&Stored> {
        self.stored.iter().find(|s| s.entry.id == id)
    }

    fn check_online(&self) -> Result<()> {
        if self.offline {
            return Err(Error::msg("connection refused"));
        }
        Ok(())
    }

    fn rejection(&self) -> Option<ActionResponse> {
        self.reject_with.as_deref().map(ActionResponse::failed)
    }
}

fn matches(entry: &Entry, query: &str) -> bool {
    let query = query.to_lowercase();
    let fields = [
        Some(entry.service_name.as_str()),
        entry.username.as_deref(),
        entry.email.as_deref(),
        entry.notes.as_deref(),
    ];
    fields.iter().flatten().any(|f| f.to_lowercase().contains(&query))
}

impl Backend for MemoryBackend {
    fn search(&mut self, query: &str) -> Result<Vec<Entry>> {
        self.calls.push(Call::Search(query.to_owned()));
        self.check_online()?;
        Ok(self
            .stored
            .iter()
            .map(|s| &s.entry)
            .filter(|e| query.is_empty() || matches(e, query))
            .cloned()
            .collect())
    }

    fn add(&mut self, form: &EntryForm) -> Result<ActionResponse> {
        self.calls.push(Call::Add(form.clone()));
        self.check_online()?;
        if let Some(rejection) = self.rejection() {
            return Ok(rejection);
        }
        if form.service_name.is_empty() || form.password.is_empty() {
            return Ok(ActionResponse::failed("Service name and password are required"));
        }
        self.insert(form);
        Ok(ActionResponse::ok())
    }

    fn fetch_for_edit(&mut self, id: i64) -> Result<Entry> {
        self.calls.push(Call::FetchForEdit(id));
        self.check_online()?;
        self.find(id)
            .map(|s| s.entry.clone())
            .ok_or_else(|| Error::msg(format!("entry {} not found", id)))
    }

    fn update(&mut self, id: i64, form: &EntryForm) -> Result<ActionResponse> {
        self.calls.push(Call::Update(id, form.clone()));
        self.check_online()?;
        if let Some(rejection) = self.rejection() {
            return Ok(rejection);
        }
        let now = self.tick();
        let stored = match self.stored.iter_mut().find(|s| s.entry.id == id) {
            Some(s) => s,
            None => return Ok(ActionResponse::failed("Entry not found")),
        };
        stored.entry.service_name = form.service_name.clone();
        stored.entry.username = Some(form.username.clone());
        stored.entry.email = Some(form.email.clone());
        stored.entry.notes = Some(form.notes.clone());
        stored.entry.updated_at = Some(now);
        if !form.password.is_empty() {
            stored.secret = form.password.clone();
        }
        Ok(ActionResponse::ok())
    }

    fn delete(&mut self, id: i64) -> Result<ActionResponse> {
        self.calls.push(Call::Delete(id));
        self.check_online()?;
        if let Some(rejection) = self.rejection() {
            return Ok(rejection);
        }
        let before = self.stored.len();
        self.stored.retain(|s| s.entry.id != id);
        if self.stored.len() == before {
            return Ok(ActionResponse::failed("Entry not found"));
        }
        Ok(ActionResponse::ok())
    }

    fn reveal(&mut self, id: i64) -> Result<RevealResponse> {
        self.calls.push(Call::Reveal(id));
        self.check_online()?;
        let message = match (self.rejection(), self.find(id)) {
            (Some(rejection), _) => rejection.message,
            (None, Some(stored)) => {
                return Ok(RevealResponse {
                    success: true,
                    password: Some(stored.secret.clone()),
                    message: None,
                })
            }
            (None, None) => Some("Entry not found".to_owned()),
        };
        Ok(RevealResponse { success: false, password: None, message })
    }
}
