//! Per-section list state for the admin console.
//!
//! Each content type owns one roster for the lifetime of the console.
//! Mutations mirror the optimistic-update rules: they run only after
//! the corresponding backend call has resolved, created entities are
//! prepended, updates replace by id, deletes remove by id.

use folio_common::entities::Entity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Error(String),
}

#[derive(Debug)]
pub struct Roster<T: Entity> {
    state: LoadState,
    items: Vec<T>,
}

impl<T: Entity> Default for Roster<T> {
    fn default() -> Self {
        Self { state: LoadState::Idle, items: Vec::new() }
    }
}

impl<T: Entity> Roster<T> {
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn begin_loading(&mut self) {
        self.state = LoadState::Loading;
    }

    pub fn set_loaded(&mut self, items: Vec<T>) {
        self.items = items;
        self.state = LoadState::Ready;
    }

    pub fn set_failed(&mut self, message: impl Into<String>) {
        self.state = LoadState::Error(message.into());
    }

    /// New entities go to the head of the list, exactly once, carrying
    /// the backend-assigned id.
    pub fn insert_created(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Replace the item with the matching id; anything else is left in
    /// place. An update for an unknown id is a no-op.
    pub fn apply_update(&mut self, updated: T) {
        if let Some(slot) = self.items.iter_mut().find(|item| item.id() == updated.id()) {
            *slot = updated;
        }
    }

    /// Remove exactly the item with the matching id.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|item| item.id() != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_common::entities::Project;

    fn project(id: &str, name: &str) -> Project {
        Project {
            id: id.into(),
            name: name.into(),
            summary: "s".into(),
            date: "2024".into(),
            ..Project::default()
        }
    }

    #[test]
    fn test_created_entity_is_prepended_once() {
        let mut roster = Roster::default();
        roster.set_loaded(vec![project("p1", "Old")]);

        roster.insert_created(project("p2", "New"));
        let ids: Vec<&str> = roster.items().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["p2", "p1"]);
        assert_eq!(roster.items().iter().filter(|p| p.id() == "p2").count(), 1);
    }

    #[test]
    fn test_update_replaces_matching_id_only() {
        let mut roster = Roster::default();
        roster.set_loaded(vec![project("p1", "One"), project("p2", "Two")]);

        roster.apply_update(project("p2", "Two v2"));
        assert_eq!(roster.get("p1").unwrap().name, "One");
        assert_eq!(roster.get("p2").unwrap().name, "Two v2");
        assert_eq!(roster.items().len(), 2);
    }

    #[test]
    fn test_remove_deletes_exactly_the_matching_id() {
        let mut roster = Roster::default();
        roster.set_loaded(vec![project("p1", "One"), project("p2", "Two"), project("p3", "Three")]);

        roster.remove("p2");
        let ids: Vec<&str> = roster.items().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);

        // Removing an absent id leaves the rest untouched.
        roster.remove("p2");
        assert_eq!(roster.items().len(), 2);
    }

    #[test]
    fn test_load_failure_keeps_previous_items() {
        let mut roster = Roster::default();
        roster.set_loaded(vec![project("p1", "One")]);
        roster.begin_loading();
        roster.set_failed("Failed to load projects.");
        assert_eq!(*roster.state(), LoadState::Error("Failed to load projects.".into()));
        assert_eq!(roster.items().len(), 1);
    }
}
