use std::fmt;

use itertools::Itertools;

use crate::model::Entry;

pub const PLACEHOLDER: &str = "N/A";
pub const NO_RECORDS: &str = r#"<p class="text-muted text-center">No records found.</p>"#;
pub const SEARCH_FAILED: &str =
    r#"<p class="text-danger">Search request failed, check that the backend is running.</p>"#;

/// Escape a value for insertion into markup. `None` renders as nothing.
/// `&` goes first so later entities are not escaped twice.
pub fn escape<T: fmt::Display>(value: Option<T>) -> String {
    match value {
        None => String::new(),
        Some(v) => v
            .to_string()
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#039;"),
    }
}

fn escape_or_placeholder(value: Option<&str>) -> String {
    let escaped = escape(value);
    if escaped.is_empty() {
        PLACEHOLDER.to_owned()
    } else {
        escaped
    }
}

/// Per-card affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Reveal(i64),
    Edit(i64),
    Delete(i64),
}

impl Action {
    pub fn id(&self) -> i64 {
        match *self {
            Action::Reveal(id) | Action::Edit(id) | Action::Delete(id) => id,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Action::Reveal(_) => "reveal",
            Action::Edit(_) => "edit",
            Action::Delete(_) => "delete",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Action::Reveal(_) => "Show password",
            Action::Edit(_) => "Edit",
            Action::Delete(_) => "Delete",
        }
    }

    fn style(&self) -> &'static str {
        match self {
            Action::Reveal(_) => "btn-outline-primary",
            Action::Edit(_) => "btn-outline-secondary",
            Action::Delete(_) => "btn-outline-danger",
        }
    }

    /// Parse the `data-action` / `data-entry-id` pair a rendered button carries.
    pub fn parse(name: &str, id: &str) -> Option<Action> {
        let id = id.trim().parse().ok()?;
        match name {
            "reveal" => Some(Action::Reveal(id)),
            "edit" => Some(Action::Edit(id)),
            "delete" => Some(Action::Delete(id)),
            _ => None,
        }
    }

    fn button(&self) -> String {
        format!(
            r#"<button class="btn btn-sm {}" data-action="{}" data-entry-id="{}">{}</button>"#,
            self.style(),
            self.name(),
            self.id(),
            self.label()
        )
    }
}

pub fn card(entry: &Entry) -> String {
    let actions = [Action::Reveal(entry.id), Action::Edit(entry.id), Action::Delete(entry.id)]
        .iter()
        .map(Action::button)
        .join("\n");
    format!(
        r#"<div class="col-md-6 col-lg-4 mb-4">
<div class="card h-100">
<div class="card-body d-flex flex-column">
<h5 class="card-title">{service}</h5>
<p class="card-text">
<strong>Username:</strong> {username}<br>
<strong>Email:</strong> {email}<br>
<strong>Notes:</strong> {notes}
</p>
<small class="text-muted mt-auto">Updated: {updated}</small>
<div class="mt-3">
{actions}
</div>
</div>
</div>
</div>"#,
        service = escape_or_placeholder(Some(entry.service_name.as_str())),
        username = escape_or_placeholder(entry.username.as_deref()),
        email = escape_or_placeholder(entry.email.as_deref()),
        notes = escape_or_placeholder(entry.notes.as_deref()),
        updated = escape(entry.updated_at.as_deref()),
        actions = actions,
    )
}

/// Markup for the results area. Replaces whatever was there before.
pub fn results(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return NO_RECORDS.to_owned();
    }
    format!(r#"<div class="row">{}</div>"#, entries.iter().map(card).join("\n"))
}
