use std::path::Path;

use tracing::info;

use crate::error::ContentError;
use crate::guides::GuideIndex;
use crate::loader::Dataset;
use crate::model::{ContentRecord, GuideRecord};
use crate::related;
use crate::store::ContentStore;

/// The whole read-only content set: questions plus guides. Built once at
/// startup and shared between requests.
#[derive(Debug, Clone)]
pub struct Catalog {
    store: ContentStore,
    guides: GuideIndex,
}

impl Catalog {
    pub fn new(dataset: Dataset) -> Result<Self, ContentError> {
        let store = ContentStore::new(dataset.records)?;
        let guides = GuideIndex::new(dataset.guides);
        info!(
            questions = store.len(),
            guides = guides.all().len(),
            "content catalog ready"
        );
        Ok(Self { store, guides })
    }

    pub fn bundled() -> Result<Self, ContentError> {
        Self::new(Dataset::bundled()?)
    }

    pub fn from_dir(dir: &Path) -> Result<Self, ContentError> {
        Self::new(Dataset::from_dir(dir)?)
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn guides(&self) -> &GuideIndex {
        &self.guides
    }

    pub fn guide_questions(&self, guide_key: &str) -> Vec<&ContentRecord> {
        self.guides.questions(&self.store, guide_key)
    }

    pub fn guide_for(&self, record_key: &str) -> Option<&GuideRecord> {
        self.guides.guide_for(record_key)
    }

    pub fn related(&self, focal_key: &str, count: usize) -> Vec<&ContentRecord> {
        related::related(&self.store, focal_key, count)
    }

    pub fn featured(&self) -> Option<&ContentRecord> {
        self.guides.featured(&self.store)
    }
}
