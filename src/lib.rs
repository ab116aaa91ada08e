pub mod backend;
pub mod config;
pub mod controller;
pub mod model;
pub mod page;
pub mod prompt;
pub mod render;
mod dmenu;

pub use backend::{Backend, HttpBackend, MemoryBackend};
pub use controller::{Controller, Outcome};
pub use model::{ActionResponse, Entry, EntryForm, RevealResponse, SearchResponse, Session};
pub use page::Page;
pub use prompt::{DmenuPrompt, Prompt, RecordingPrompt, TerminalPrompt};
pub use render::{escape, Action};

/// Ask for a secret without echoing it, through dmenu.
pub fn prompt_secret(prompt: &str) -> std::io::Result<Option<String>> {
    dmenu::prompt_hidden(prompt)
}
