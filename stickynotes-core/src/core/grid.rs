//! The main window's grid of preview cards and its search filter.

use crate::core::preview::{render, NotePreview};
use crate::NoteRecord;
use indexmap::IndexMap;

/// What the main window should show in place of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridState {
    /// At least one card is visible.
    Cards,
    /// No card is visible; show the empty-state placeholder.
    Empty,
}

/// One note's card in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewCard {
    pub id: String,
    pub preview: NotePreview,
    /// Hidden cards are filtered out by the current search query.
    pub visible: bool,
    search_text: String,
}

impl PreviewCard {
    fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.search_text.contains(query)
    }
}

/// Preview cards keyed by note id, in the order they were added.
#[derive(Debug, Default)]
pub struct PreviewGrid {
    cards: IndexMap<String, PreviewCard>,
    query: String,
}

impl PreviewGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a card for `record` or refreshes the existing one in place.
    pub fn upsert(&mut self, record: &NoteRecord) {
        let mut card = PreviewCard {
            id: record.id.clone(),
            preview: render(record),
            visible: true,
            search_text: record.content.to_lowercase(),
        };
        card.visible = card.matches(&self.query);
        self.cards.insert(record.id.clone(), card);
    }

    /// Drops the card for `id`, returning whether one existed.
    pub fn remove(&mut self, id: &str) -> bool {
        self.cards.shift_remove(id).is_some()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn get(&self, id: &str) -> Option<&PreviewCard> {
        self.cards.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cards.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.cards.keys().map(String::as_str)
    }

    pub fn cards(&self) -> impl Iterator<Item = &PreviewCard> {
        self.cards.values()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Sets the search query and re-filters every card.
    ///
    /// Matching is a case-insensitive substring test on the note content; an
    /// empty query shows everything.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_lowercase();
        self.apply_filter();
    }

    /// Re-evaluates card visibility against the current query.
    pub fn apply_filter(&mut self) {
        let query = &self.query;
        for card in self.cards.values_mut() {
            card.visible = card.matches(query);
        }
    }

    pub fn visible_count(&self) -> usize {
        self.cards.values().filter(|c| c.visible).count()
    }

    pub fn state(&self) -> GridState {
        if self.cards.values().any(|c| c.visible) {
            GridState::Cards
        } else {
            GridState::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::note::DEFAULT_POSITION;

    fn record(id: &str, content: &str) -> NoteRecord {
        let mut r = NoteRecord::new(DEFAULT_POSITION);
        r.id = id.to_string();
        r.content = content.to_string();
        r
    }

    #[test]
    fn test_empty_grid_shows_placeholder() {
        let grid = PreviewGrid::new();
        assert_eq!(grid.state(), GridState::Empty);
    }

    #[test]
    fn test_upsert_refreshes_in_place() {
        let mut grid = PreviewGrid::new();
        grid.upsert(&record("a", "one"));
        grid.upsert(&record("b", "two"));
        grid.upsert(&record("a", "uno"));

        let ids: Vec<&str> = grid.ids().collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(grid.get("a").unwrap().preview.title, "uno");
        assert_eq!(grid.state(), GridState::Cards);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut grid = PreviewGrid::new();
        grid.upsert(&record("a", "Buy MILK"));
        grid.upsert(&record("b", "call mom"));

        grid.set_query("milk");
        assert!(grid.get("a").unwrap().visible);
        assert!(!grid.get("b").unwrap().visible);
        assert_eq!(grid.visible_count(), 1);

        grid.set_query("");
        assert_eq!(grid.visible_count(), 2);
    }

    #[test]
    fn test_no_match_shows_placeholder() {
        let mut grid = PreviewGrid::new();
        grid.upsert(&record("a", "hello"));
        grid.set_query("zzz");
        assert_eq!(grid.state(), GridState::Empty);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_new_cards_respect_active_query() {
        let mut grid = PreviewGrid::new();
        grid.set_query("Work");
        grid.upsert(&record("a", "homework"));
        grid.upsert(&record("b", "groceries"));
        assert!(grid.get("a").unwrap().visible);
        assert!(!grid.get("b").unwrap().visible);
    }

    #[test]
    fn test_remove_card() {
        let mut grid = PreviewGrid::new();
        grid.upsert(&record("a", "x"));
        assert!(grid.remove("a"));
        assert!(!grid.remove("a"));
        assert!(grid.is_empty());
    }
}
