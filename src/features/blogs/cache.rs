//! Local collection cache for the console.
//!
//! Blog records live in one identity map keyed by id. The "all" and "personal"
//! mirrors are ordered index lists into that map, so a single write is visible
//! through both mirrors at once.

use std::collections::HashMap;

use crate::features::blogs::models::{BlogRecord, BlogStatus};
use crate::features::categories::models::Category;
use crate::shared::constants::UNCATEGORIZED;
use crate::shared::validation::normalize_key;

/// Which mirror a view reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mirror {
    #[default]
    All,
    Personal,
}

/// Snapshot of an optimistically removed record, enough to put it back
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedEntry {
    pub record: BlogRecord,
    all_position: Option<usize>,
    personal_position: Option<usize>,
}

#[derive(Debug, Default)]
pub struct CollectionCache {
    records: HashMap<i64, BlogRecord>,
    all_ids: Vec<i64>,
    personal_ids: Vec<i64>,
    personal_loaded: bool,
    categories: Vec<Category>,
    categories_loaded: bool,
}

impl CollectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // BLOG MIRRORS
    // =========================================================================

    /// Replace the "all" mirror with server truth
    pub fn replace_all(&mut self, records: Vec<BlogRecord>) {
        self.all_ids = self.absorb(records);
        self.collect_garbage();
    }

    /// Replace the "personal" mirror with server truth
    pub fn replace_personal(&mut self, records: Vec<BlogRecord>) {
        self.personal_ids = self.absorb(records);
        self.personal_loaded = true;
        self.collect_garbage();
    }

    fn absorb(&mut self, records: Vec<BlogRecord>) -> Vec<i64> {
        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            if !ids.contains(&record.id) {
                ids.push(record.id);
            }
            self.records.insert(record.id, record);
        }
        ids
    }

    fn collect_garbage(&mut self) {
        let all_ids = &self.all_ids;
        let personal_ids = &self.personal_ids;
        self.records
            .retain(|id, _| all_ids.contains(id) || personal_ids.contains(id));
    }

    /// Set the status of a record. Returns false when the record is not cached.
    pub fn patch_status(&mut self, id: i64, status: BlogStatus) -> bool {
        match self.records.get_mut(&id) {
            Some(record) => {
                record.status = status;
                true
            }
            None => false,
        }
    }

    /// Remove a record from both mirrors, returning a snapshot for compensation
    pub fn remove(&mut self, id: i64) -> Option<RemovedEntry> {
        let record = self.records.remove(&id)?;
        let all_position = self.all_ids.iter().position(|x| *x == id);
        let personal_position = self.personal_ids.iter().position(|x| *x == id);

        if let Some(pos) = all_position {
            self.all_ids.remove(pos);
        }
        if let Some(pos) = personal_position {
            self.personal_ids.remove(pos);
        }

        Some(RemovedEntry {
            record,
            all_position,
            personal_position,
        })
    }

    /// Undo a [`CollectionCache::remove`]. A record that reappeared meanwhile is left alone.
    pub fn restore(&mut self, entry: RemovedEntry) {
        let id = entry.record.id;
        if self.records.contains_key(&id) {
            return;
        }

        if let Some(pos) = entry.all_position {
            let pos = pos.min(self.all_ids.len());
            self.all_ids.insert(pos, id);
        }
        if let Some(pos) = entry.personal_position {
            let pos = pos.min(self.personal_ids.len());
            self.personal_ids.insert(pos, id);
        }
        self.records.insert(id, entry.record);
    }

    /// Insert or replace a record.
    ///
    /// New records go to the front of the "all" mirror, and of the "personal"
    /// mirror when `personal` is set and that mirror has been loaded.
    pub fn upsert_record(&mut self, record: BlogRecord, personal: bool) {
        let id = record.id;
        if !self.all_ids.contains(&id) {
            self.all_ids.insert(0, id);
        }
        if personal && self.personal_loaded && !self.personal_ids.contains(&id) {
            self.personal_ids.insert(0, id);
        }
        self.records.insert(id, record);
    }

    pub fn get(&self, id: i64) -> Option<&BlogRecord> {
        self.records.get(&id)
    }

    pub fn mirror(&self, mirror: Mirror) -> Vec<&BlogRecord> {
        let ids = match mirror {
            Mirror::All => &self.all_ids,
            Mirror::Personal => &self.personal_ids,
        };
        ids.iter().filter_map(|id| self.records.get(id)).collect()
    }

    pub fn all(&self) -> Vec<&BlogRecord> {
        self.mirror(Mirror::All)
    }

    pub fn personal(&self) -> Vec<&BlogRecord> {
        self.mirror(Mirror::Personal)
    }

    pub fn contains(&self, mirror: Mirror, id: i64) -> bool {
        match mirror {
            Mirror::All => self.all_ids.contains(&id),
            Mirror::Personal => self.personal_ids.contains(&id),
        }
    }

    pub fn personal_loaded(&self) -> bool {
        self.personal_loaded
    }

    /// Check if another visible record already uses this title (case-insensitive)
    pub fn title_taken(&self, title: &str, exclude_id: Option<i64>) -> bool {
        let key = normalize_key(title);
        self.records
            .values()
            .any(|r| Some(r.id) != exclude_id && normalize_key(&r.title) == key)
    }

    // =========================================================================
    // CATEGORIES
    // =========================================================================

    pub fn replace_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
        self.categories_loaded = true;
    }

    /// Insert new categories and replace existing ones by id
    pub fn upsert_categories(&mut self, categories: Vec<Category>) {
        for category in categories {
            match self.categories.iter_mut().find(|c| c.id == category.id) {
                Some(existing) => *existing = category,
                None => self.categories.push(category),
            }
        }
        self.categories_loaded = true;
    }

    pub fn remove_category(&mut self, id: i64) -> Option<Category> {
        let pos = self.categories.iter().position(|c| c.id == id)?;
        Some(self.categories.remove(pos))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn categories_loaded(&self) -> bool {
        self.categories_loaded
    }

    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Check if another category already uses this name (case-insensitive)
    pub fn category_name_taken(&self, name: &str, exclude_id: Option<i64>) -> bool {
        let key = normalize_key(name);
        self.categories
            .iter()
            .any(|c| Some(c.id) != exclude_id && normalize_key(&c.name) == key)
    }

    /// Display name of a blog's category.
    ///
    /// Once categories are loaded a missing category means it was deleted, so
    /// the stale denormalized name is ignored.
    pub fn category_name_for(&self, blog: &BlogRecord) -> String {
        if let Some(category) = self.category(blog.category_id) {
            return category.name.clone();
        }

        if self.categories_loaded {
            return UNCATEGORIZED.to_string();
        }

        blog.category_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| UNCATEGORIZED.to_string())
    }
}
