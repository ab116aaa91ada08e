use log::*;

use crate::backend::Backend;
use crate::model::{ActionResponse, EntryForm, Session};
use crate::page::{EditForm, Page};
use crate::prompt::Prompt;
use crate::render::{self, Action};

pub const DELETE_WARNING: &str = "Delete this entry? This cannot be undone.";

/// How a user action ended. The user has already been told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Failed(String),
    /// The user declined a confirmation.
    Cancelled,
    /// Nothing to act on, e.g. a toggle without a target.
    Ignored,
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        *self == Outcome::Done
    }
}

/// Wording for one mutating action's notifications.
struct Messages {
    success: &'static str,
    failure: &'static str,
    transport: &'static str,
}

const ADD: Messages = Messages {
    success: "Entry added.",
    failure: "Add failed",
    transport: "Failed to add entry, please try again.",
};

const UPDATE: Messages = Messages {
    success: "Entry updated.",
    failure: "Update failed",
    transport: "Failed to update entry, please try again.",
};

const DELETE: Messages = Messages {
    success: "Entry deleted.",
    failure: "Delete failed",
    transport: "Failed to delete entry, please try again.",
};

/// Drives a `Page` against a `Backend`, talking to the user through a `Prompt`.
///
/// Every action runs to completion before returning, so a refresh only
/// ever follows an acknowledged mutation.
pub struct Controller<B, P> {
    backend: B,
    prompt: P,
    session: Session,
}

impl<B: Backend, P: Prompt> Controller<B, P> {
    pub fn new(backend: B, prompt: P) -> Self {
        Controller { backend, prompt, session: Session::new() }
    }

    /// Wire the controller to a freshly loaded page and show the initial list.
    pub fn attach(&mut self, page: &mut Page) -> Outcome {
        let query = page.search_input.clone();
        self.search(page, &query)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Fetch entries matching `query` and replace the results area with them.
    pub fn search(&mut self, page: &mut Page, query: &str) -> Outcome {
        self.session.last_query = query.to_owned();
        match self.backend.search(query) {
            Ok(entries) => {
                debug!("Search {:?} returned {} entries", query, entries.len());
                page.search_results = render::results(&entries);
                Outcome::Done
            }
            Err(e) => {
                error!("Search failed: {:#}", e);
                page.search_results = render::SEARCH_FAILED.to_owned();
                Outcome::Failed(format!("{:#}", e))
            }
        }
    }

    /// Re-run the last search.
    pub fn refresh(&mut self, page: &mut Page) -> Outcome {
        let query = self.session.last_query.clone();
        self.search(page, &query)
    }

    pub fn submit_add(&mut self, page: &mut Page) -> Outcome {
        let form = page.add_form.clone();
        let response = self.backend.add(&form);
        let outcome = self.report(response, &ADD);
        if outcome.is_done() {
            page.add_modal_open = false;
            page.add_form.clear();
            page.search_input.clear();
            self.session.reset_query();
            self.refresh(page);
        }
        outcome
    }

    /// Load an entry into the edit form and open it. The secret stays blank.
    pub fn open_edit(&mut self, page: &mut Page, id: i64) -> Outcome {
        match self.backend.fetch_for_edit(id) {
            Ok(entry) => {
                page.edit_form = EditForm {
                    entry_id: Some(entry.id),
                    fields: EntryForm::from_entry(&entry),
                };
                page.edit_modal_open = true;
                Outcome::Done
            }
            Err(e) => {
                error!("Fetching entry {} for edit failed: {:#}", id, e);
                self.prompt.notify("Unable to load entry, please try again.");
                Outcome::Failed(format!("{:#}", e))
            }
        }
    }

    pub fn submit_edit(&mut self, page: &mut Page) -> Outcome {
        let id = match page.edit_form.entry_id {
            Some(id) => id,
            None => {
                warn!("Edit submitted without an entry id");
                return Outcome::Ignored;
            }
        };
        let form = page.edit_form.fields.clone();
        let response = self.backend.update(id, &form);
        let outcome = self.report(response, &UPDATE);
        if outcome.is_done() {
            page.edit_modal_open = false;
            self.refresh(page);
        }
        outcome
    }

    /// Delete after the user confirms. Declining sends nothing.
    pub fn delete(&mut self, page: &mut Page, id: i64) -> Outcome {
        if !self.prompt.confirm(DELETE_WARNING) {
            debug!("Delete of entry {} declined", id);
            return Outcome::Cancelled;
        }
        let response = self.backend.delete(id);
        let outcome = self.report(response, &DELETE);
        if outcome.is_done() {
            self.refresh(page);
        }
        outcome
    }

    /// Show an entry's secret in a notification. Nothing is kept.
    pub fn reveal(&mut self, id: i64) -> Outcome {
        match self.backend.reveal(id) {
            Ok(response) => match (response.success, response.password) {
                (true, Some(password)) => {
                    self.prompt.notify(&format!("Password: {}", password));
                    Outcome::Done
                }
                (_, _) => {
                    let message = response.message.unwrap_or_else(|| "unknown error".to_owned());
                    self.prompt.notify(&format!("Could not get password: {}", message));
                    Outcome::Failed(message)
                }
            },
            Err(e) => {
                error!("Reveal of entry {} failed: {:#}", id, e);
                self.prompt.notify("Unable to fetch password, please try again.");
                Outcome::Failed(format!("{:#}", e))
            }
        }
    }

    /// Route a click on one of a card's buttons.
    pub fn dispatch(&mut self, page: &mut Page, action: Action) -> Outcome {
        match action {
            Action::Reveal(id) => self.reveal(id),
            Action::Edit(id) => self.open_edit(page, id),
            Action::Delete(id) => self.delete(page, id),
        }
    }

    pub fn toggle_password(&mut self, page: &mut Page, button: usize) -> Outcome {
        if page.toggle_password(button) {
            Outcome::Done
        } else {
            debug!("Toggle button {} has no target input", button);
            Outcome::Ignored
        }
    }

    fn report(&mut self, response: anyhow::Result<ActionResponse>, messages: &Messages) -> Outcome {
        match response {
            Ok(ref r) if r.success => {
                self.prompt.notify(messages.success);
                Outcome::Done
            }
            Ok(r) => {
                let message = r.message_or_default().to_owned();
                warn!("{}: {}", messages.failure, message);
                self.prompt.notify(&format!("{}: {}", messages.failure, message));
                Outcome::Failed(message)
            }
            Err(e) => {
                error!("{}: {:#}", messages.failure, e);
                self.prompt.notify(messages.transport);
                Outcome::Failed(format!("{:#}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::{Call, MemoryBackend};
    use crate::prompt::RecordingPrompt;

    fn form(service: &str, password: &str) -> EntryForm {
        EntryForm {
            service_name: service.into(),
            password: password.into(),
            ..EntryForm::default()
        }
    }

    fn attached(backend: MemoryBackend, answer: bool) -> (Controller<MemoryBackend, RecordingPrompt>, Page) {
        let mut page = Page::new();
        let mut controller = Controller::new(backend, RecordingPrompt::answering(answer));
        controller.attach(&mut page);
        (controller, page)
    }

    #[test]
    fn attach_lists_everything() {
        let (controller, page) = attached(MemoryBackend::new().with_entry(form("mail", "x")), true);
        assert_eq!(controller.backend().calls, vec![Call::Search(String::new())]);
        assert!(page.search_results.contains("mail"));
    }

    #[test]
    fn failed_search_renders_inline_error() {
        let mut backend = MemoryBackend::new();
        backend.offline = true;
        let (controller, page) = attached(backend, true);
        assert_eq!(page.search_results, render::SEARCH_FAILED);
        assert!(controller.prompt().notifications.is_empty());
    }

    #[test]
    fn attach_reports_initial_search_outcome() {
        let mut page = Page::new();
        page.search_input = "mail".into();
        let mut controller = Controller::new(
            MemoryBackend::new().with_entry(form("mail", "x")),
            RecordingPrompt::default(),
        );
        assert_eq!(controller.attach(&mut page), Outcome::Done);
        assert_eq!(controller.session().last_query, "mail");

        controller.backend_mut().offline = true;
        let mut reloaded = Page::new();
        assert!(!controller.attach(&mut reloaded).is_done());
        assert_eq!(reloaded.search_results, render::SEARCH_FAILED);
    }

    #[test]
    fn declined_delete_sends_nothing() {
        let (mut controller, mut page) = attached(MemoryBackend::new().with_entry(form("mail", "x")), false);
        let calls_before = controller.backend().calls.len();
        assert_eq!(controller.delete(&mut page, 1), Outcome::Cancelled);
        assert_eq!(controller.backend().calls.len(), calls_before);
        assert_eq!(controller.prompt().confirmations, vec![DELETE_WARNING.to_owned()]);
    }

    #[test]
    fn rejected_add_keeps_dialog_and_form() {
        let (mut controller, mut page) = attached(MemoryBackend::new(), true);
        page.add_modal_open = true;
        page.add_form = form("mail", "");
        let outcome = controller.submit_add(&mut page);
        assert!(!outcome.is_done());
        assert!(page.add_modal_open);
        assert_eq!(page.add_form.service_name, "mail");
        assert_eq!(controller.backend().search_count(), 1);
        assert_eq!(
            controller.prompt().last_notification(),
            Some("Add failed: Service name and password are required")
        );
    }

    #[test]
    fn submit_edit_without_id_is_ignored() {
        let (mut controller, mut page) = attached(MemoryBackend::new(), true);
        assert_eq!(controller.submit_edit(&mut page), Outcome::Ignored);
        assert_eq!(controller.backend().calls.len(), 1);
    }

    #[test]
    fn reveal_failure_uses_backend_message() {
        let mut backend = MemoryBackend::new().with_entry(form("mail", "s3cret"));
        backend.reject_with = Some("decryption failed".into());
        let (mut controller, page) = attached(backend, true);
        assert_eq!(controller.reveal(1), Outcome::Failed("decryption failed".into()));
        assert_eq!(
            controller.prompt().last_notification(),
            Some("Could not get password: decryption failed")
        );
        assert!(!page.search_results.contains("s3cret"));
    }

    #[test]
    fn dispatch_routes_card_actions() {
        let (mut controller, mut page) = attached(MemoryBackend::new().with_entry(form("mail", "x")), true);
        controller.dispatch(&mut page, Action::Edit(1));
        assert!(page.edit_modal_open);
        assert_eq!(page.edit_form.entry_id, Some(1));
        controller.dispatch(&mut page, Action::Reveal(1));
        assert_eq!(controller.prompt().last_notification(), Some("Password: x"));
    }
}
