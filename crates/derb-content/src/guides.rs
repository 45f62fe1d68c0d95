use crate::model::{ContentRecord, GuideRecord};
use crate::store::ContentStore;

/// Guides in declared order, resolved against a [`ContentStore`].
#[derive(Debug, Clone, Default)]
pub struct GuideIndex {
    guides: Vec<GuideRecord>,
}

impl GuideIndex {
    pub fn new(guides: Vec<GuideRecord>) -> Self {
        Self { guides }
    }

    pub fn all(&self) -> &[GuideRecord] {
        &self.guides
    }

    pub fn get(&self, key: &str) -> Option<&GuideRecord> {
        self.guides.iter().find(|g| g.key == key)
    }

    /// Questions of a guide in the guide's order. Slugs with no matching
    /// question are skipped; an unknown guide yields nothing.
    pub fn questions<'a>(&self, store: &'a ContentStore, guide_key: &str) -> Vec<&'a ContentRecord> {
        let Some(guide) = self.get(guide_key) else {
            return Vec::new();
        };
        guide
            .question_keys
            .iter()
            .filter_map(|key| store.get(key))
            .collect()
    }

    /// First guide listing `record_key`.
    pub fn guide_for(&self, record_key: &str) -> Option<&GuideRecord> {
        self.guides
            .iter()
            .find(|g| g.question_keys.iter().any(|k| k == record_key))
    }

    pub fn position(&self, guide_key: &str) -> Option<usize> {
        self.guides.iter().position(|g| g.key == guide_key)
    }

    /// Previous and next guide, wrapping at both ends.
    pub fn neighbors(&self, guide_key: &str) -> Option<(&GuideRecord, &GuideRecord)> {
        let idx = self.position(guide_key)?;
        let len = self.guides.len();
        let prev = &self.guides[(idx + len - 1) % len];
        let next = &self.guides[(idx + 1) % len];
        Some((prev, next))
    }

    /// Opening question of the first guide, used as the home page feature.
    pub fn featured<'a>(&self, store: &'a ContentStore) -> Option<&'a ContentRecord> {
        let first = self.guides.first()?;
        self.questions(store, &first.key).into_iter().next()
    }
}
