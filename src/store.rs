// src/store.rs
//
// Append-only, id-keyed collections. The repository holds imported source
// pages; the history holds immutable snapshots of completed translation
// runs. Neither store supports update or delete, and duplicate ids are
// rejected rather than overwritten.

use crate::annotation::{HistoryItem, RepositoryItem};

#[derive(Debug, Default)]
pub struct RepositoryStore {
    items: Vec<RepositoryItem>,
}

impl RepositoryStore {
    pub fn add(&mut self, item: RepositoryItem) -> bool {
        if self.contains(&item.id) {
            log::warn!("repository already contains id {}", item.id);
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&RepositoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[RepositoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct HistoryStore {
    items: Vec<HistoryItem>,
}

impl HistoryStore {
    pub fn add(&mut self, item: HistoryItem) -> bool {
        if self.contains(&item.id) {
            log::warn!("history already contains id {}", item.id);
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
