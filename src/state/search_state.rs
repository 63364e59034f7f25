//! Search box state.

/// Text typed into the search box and the outcome of the last search.
#[derive(Debug, Default)]
pub struct SearchState {
    query: String,
    /// True when the last submitted query matched nothing
    no_match: bool,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Queries =====

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn no_match(&self) -> bool {
        self.no_match
    }

    // ===== Mutations =====

    /// Mutable access to the query buffer (for the text edit widget).
    pub(crate) fn query_mut(&mut self) -> &mut String {
        &mut self.query
    }

    pub fn record_result(&mut self, found: bool) {
        self.no_match = !found;
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.no_match = false;
    }
}
