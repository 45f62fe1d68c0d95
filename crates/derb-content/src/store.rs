use std::cmp::Reverse;
use std::collections::HashMap;

use crate::category::Category;
use crate::dates;
use crate::error::ContentError;
use crate::model::ContentRecord;

/// Immutable, insertion-ordered collection of questions with a slug index.
#[derive(Debug, Clone)]
pub struct ContentStore {
    records: Vec<ContentRecord>,
    by_key: HashMap<String, usize>,
}

impl ContentStore {
    /// Builds the store, rejecting duplicate slugs and questions without a
    /// body.
    pub fn new(records: Vec<ContentRecord>) -> Result<Self, ContentError> {
        let mut by_key = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if record.sections.is_empty() {
                return Err(ContentError::NoSections(record.key.clone()));
            }
            if by_key.insert(record.key.clone(), idx).is_some() {
                return Err(ContentError::DuplicateKey(record.key.clone()));
            }
        }
        Ok(Self { records, by_key })
    }

    pub fn all(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn get(&self, key: &str) -> Option<&ContentRecord> {
        self.by_key.get(key).map(|&idx| &self.records[idx])
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn in_category(&self, category: Category) -> Vec<&ContentRecord> {
        self.records
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Question count for every category, in `Category::ALL` order.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.records.iter().filter(|r| r.category == c).count()))
            .collect()
    }

    /// Most recently updated questions first. Unparseable dates sort last;
    /// ties keep store order.
    pub fn recent(&self, limit: usize) -> Vec<&ContentRecord> {
        let mut sorted: Vec<&ContentRecord> = self.records.iter().collect();
        sorted.sort_by_key(|r| Reverse(dates::parse_updated(&r.last_updated)));
        sorted.truncate(limit);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    #[test]
    fn lookup_by_key() {
        let store = ContentStore::new(vec![
            record("a", Category::Safety),
            record("b", Category::Cities),
        ])
        .unwrap();
        assert_eq!(store.get("b").map(|r| r.key.as_str()), Some("b"));
        assert!(store.get("missing").is_none());
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = ContentStore::new(vec![
            record("a", Category::Safety),
            record("a", Category::Cities),
        ])
        .unwrap_err();
        assert!(matches!(err, ContentError::DuplicateKey(k) if k == "a"));
    }

    #[test]
    fn empty_body_is_rejected() {
        let mut r = record("a", Category::Safety);
        r.sections.clear();
        assert!(matches!(
            ContentStore::new(vec![r]),
            Err(ContentError::NoSections(_))
        ));
    }

    #[test]
    fn category_counts_cover_every_category() {
        let store = ContentStore::new(vec![
            record("a", Category::Safety),
            record("b", Category::Safety),
        ])
        .unwrap();
        let counts = store.category_counts();
        assert_eq!(counts.len(), Category::ALL.len());
        assert!(counts.contains(&(Category::Safety, 2)));
        assert!(counts.contains(&(Category::Cities, 0)));
    }

    #[test]
    fn recent_sorts_newest_first() {
        let mut old = record("old", Category::Safety);
        old.last_updated = "2024-03-01".to_string();
        let mut new = record("new", Category::Safety);
        new.last_updated = "2025-06-01".to_string();
        let mut junk = record("junk", Category::Safety);
        junk.last_updated = "someday".to_string();

        let store = ContentStore::new(vec![junk, old, new]).unwrap();
        let keys: Vec<&str> = store.recent(5).iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["new", "old", "junk"]);
        assert_eq!(store.recent(1).len(), 1);
    }

    #[test]
    fn recent_keeps_store_order_on_equal_dates() {
        let store = ContentStore::new(vec![
            record("c", Category::Safety),
            record("a", Category::Safety),
            record("b", Category::Safety),
        ])
        .unwrap();
        let keys: Vec<&str> = store.recent(3).iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }
}
