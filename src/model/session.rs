/// Client-side session. Only remembers what was last searched for, so a
/// refresh after a mutation can re-run it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub last_query: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_query(&mut self) {
        self.last_query.clear();
    }
}
