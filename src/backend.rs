pub mod http;
pub mod memory;

use anyhow::Result;

use crate::model::{ActionResponse, Entry, EntryForm, RevealResponse};

pub use http::HttpBackend;
pub use memory::MemoryBackend;

/// The password store, as reached through its HTTP endpoints.
///
/// `Err` means the request never produced a usable reply (transport or
/// parse failure). A reply with `success: false` is still `Ok`.
pub trait Backend {
    /// `GET /search?q=`; an empty query lists everything.
    fn search(&mut self, query: &str) -> Result<Vec<Entry>>;

    /// `POST /add_password`
    fn add(&mut self, form: &EntryForm) -> Result<ActionResponse>;

    /// `GET /edit_password/:id`
    fn fetch_for_edit(&mut self, id: i64) -> Result<Entry>;

    /// `POST /edit_password/:id`
    fn update(&mut self, id: i64, form: &EntryForm) -> Result<ActionResponse>;

    /// `POST /delete_password/:id`
    fn delete(&mut self, id: i64) -> Result<ActionResponse>;

    /// `GET /view_password/:id`
    fn reveal(&mut self, id: i64) -> Result<RevealResponse>;
}
