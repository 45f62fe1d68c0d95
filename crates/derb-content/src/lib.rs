//! Read-only content engine for Derb: questions about Morocco, the guides
//! that group them, and the projections pages are built from (search,
//! related questions, colour zoning, tag cloud, JSON-LD, feeds).

pub mod catalog;
pub mod category;
pub mod dates;
pub mod error;
pub mod feed;
pub mod guides;
pub mod inline;
pub mod jsonld;
pub mod loader;
pub mod model;
pub mod related;
pub mod search;
pub mod site;
pub mod store;
pub mod tags;
pub mod zones;

pub use catalog::Catalog;
pub use category::Category;
pub use error::ContentError;
pub use loader::Dataset;
pub use model::{Backlink, BacklinkKind, ContentRecord, GuideRecord, Illustration, Section, Source};
pub use search::SearchFilter;
pub use site::Site;
pub use store::ContentStore;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::category::Category;
    use crate::model::{ContentRecord, GuideRecord, Section};

    pub fn record(key: &str, category: Category) -> ContentRecord {
        ContentRecord {
            key: key.to_string(),
            title: format!("Question {key}"),
            category,
            city: None,
            subtitle: None,
            short_answer: None,
            sections: vec![Section {
                heading: None,
                content: format!("Body of {key}"),
            }],
            illustrations: Vec::new(),
            sources: None,
            related_keys: None,
            search_terms: None,
            tags: None,
            backlinks: None,
            last_updated: "2025-01-01".to_string(),
        }
    }

    pub fn guide(key: &str, questions: &[&str]) -> GuideRecord {
        GuideRecord {
            key: key.to_string(),
            title: format!("Guide {key}"),
            subtitle: String::new(),
            description: String::new(),
            question_keys: questions.iter().map(|q| q.to_string()).collect(),
        }
    }
}
