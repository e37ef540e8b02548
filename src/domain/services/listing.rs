use crate::domain::models::repository::Repository;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::Arc;

/// Cards revealed per "load more".
pub const PAGE_SIZE: usize = 9;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterKey {
    #[default]
    All,
    Updated,
    Stars,
}

impl FilterKey {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::All => "all",
            FilterKey::Updated => "updated",
            FilterKey::Stars => "stars",
        }
    }
}

/// Filtered, searched and paginated view over a fixed repository list.
///
/// The view holds positions into the full list, so it can only ever be a
/// subset or reordering of it. Every filter or search change re-derives the
/// view from scratch and rewinds to the first page.
#[derive(Debug, Clone)]
pub struct ListView {
    repositories: Arc<[Repository]>,
    filter: FilterKey,
    search: String,
    filtered: Vec<usize>,
    pages: usize,
}

impl ListView {
    pub fn new(repositories: Arc<[Repository]>) -> Self {
        let mut view = Self {
            repositories,
            filter: FilterKey::default(),
            search: String::new(),
            filtered: Vec::new(),
            pages: 1,
        };
        view.rebuild();
        view
    }

    pub fn filter(&self) -> FilterKey {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn set_filter(&mut self, filter: FilterKey) {
        self.filter = filter;
        self.rebuild();
    }

    /// Stores the trimmed, lowercased term and rebuilds the view.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.trim().to_lowercase();
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let repos = &self.repositories;
        let mut order: Vec<usize> = (0..repos.len()).collect();

        match self.filter {
            FilterKey::All | FilterKey::Updated => {
                order.sort_by(|&a, &b| repos[b].updated_at.cmp(&repos[a].updated_at));
            }
            FilterKey::Stars => {
                order.sort_by(|&a, &b| {
                    repos[b].stargazers_count.cmp(&repos[a].stargazers_count)
                });
            }
        }

        if !self.search.is_empty() {
            order.retain(|&i| repos[i].matches(&self.search));
        }

        self.filtered = order;
        self.pages = 1;
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn revealed_len(&self) -> usize {
        (self.pages * PAGE_SIZE).min(self.filtered.len())
    }

    pub fn remaining(&self) -> usize {
        self.filtered.len() - self.revealed_len()
    }

    pub fn has_more(&self) -> bool {
        self.remaining() > 0
    }

    /// Reveals the next page and returns the positions that became visible.
    /// Returns an empty range once the view is exhausted.
    pub fn load_more(&mut self) -> Range<usize> {
        if !self.has_more() {
            let end = self.revealed_len();
            return end..end;
        }
        let start = self.revealed_len();
        self.pages += 1;
        start..self.revealed_len()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Repository> {
        self.slice(0..self.revealed_len())
    }

    pub fn slice(&self, range: Range<usize>) -> impl Iterator<Item = &Repository> {
        self.filtered[range].iter().map(|&i| &self.repositories[i])
    }

    /// Repository at `position` of the filtered view.
    pub fn get(&self, position: usize) -> Option<&Repository> {
        self.filtered
            .get(position)
            .map(|&i| &self.repositories[i])
    }
}
