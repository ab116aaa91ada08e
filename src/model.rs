pub mod entry;
pub mod session;

pub use entry::{ActionResponse, Entry, EntryForm, RevealResponse, SearchResponse};
pub use session::Session;
