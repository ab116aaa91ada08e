use std::fmt;

use serde::{Deserialize, Serialize};

// Wire model, as served by the backend

/// One stored credential, minus its secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub service_name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Entry>,
}

/// Reply to add, edit and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ActionResponse {
    pub fn ok() -> Self {
        ActionResponse { success: true, message: None }
    }

    pub fn failed(message: &str) -> Self {
        ActionResponse { success: false, message: Some(message.to_owned()) }
    }

    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or("unknown error")
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealResponse {
    pub success: bool,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl fmt::Debug for RevealResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealResponse")
            .field("success", &self.success)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("message", &self.message)
            .finish()
    }
}

/// Form-encoded body for `/add_password` and `/edit_password/:id`.
/// A blank `password` on edit keeps the stored secret.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryForm {
    pub service_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub notes: String,
}

impl EntryForm {
    /// Populate from a fetched entry. The secret is never pre-filled.
    pub fn from_entry(entry: &Entry) -> Self {
        EntryForm {
            service_name: entry.service_name.clone(),
            username: entry.username.clone().unwrap_or_default(),
            email: entry.email.clone().unwrap_or_default(),
            password: String::new(),
            notes: entry.notes.clone().unwrap_or_default(),
        }
    }

    pub fn clear(&mut self) {
        *self = EntryForm::default();
    }
}

impl fmt::Debug for EntryForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryForm")
            .field("service_name", &self.service_name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &if self.password.is_empty() { "" } else { "<redacted>" })
            .field("notes", &self.notes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_payload_ignores_password_field() {
        let json = r#"{"id": 7, "service_name": "mail", "username": "bob",
            "email": "", "notes": "", "password": "hunter2"}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        let form = EntryForm::from_entry(&entry);
        assert_eq!(form.service_name, "mail");
        assert_eq!(form.username, "bob");
        assert!(form.password.is_empty());
    }

    #[test]
    fn search_payload_with_missing_optionals() {
        let json = r#"{"results": [{"id": 1, "service_name": "git", "updated_at": "2024-01-02 03:04"}]}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].username, None);
        assert_eq!(response.results[0].updated_at.as_deref(), Some("2024-01-02 03:04"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let form = EntryForm { password: "hunter2".into(), ..EntryForm::default() };
        assert!(!format!("{:?}", form).contains("hunter2"));
        let reveal = RevealResponse { success: true, password: Some("hunter2".into()), message: None };
        assert!(!format!("{:?}", reveal).contains("hunter2"));
    }

    #[test]
    fn failure_message_defaults() {
        let response: ActionResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(response.message_or_default(), "unknown error");
    }
}
