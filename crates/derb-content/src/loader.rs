/// Dataset loading: `questions.json` and `guides.json`, either compiled into
/// the crate or read from a directory on disk.
use std::path::Path;

use tracing::warn;

use crate::error::ContentError;
use crate::model::{ContentRecord, GuideRecord};

pub const QUESTIONS_FILE: &str = "questions.json";
pub const GUIDES_FILE: &str = "guides.json";

const BUNDLED_QUESTIONS: &str = include_str!("../data/questions.json");
const BUNDLED_GUIDES: &str = include_str!("../data/guides.json");

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<ContentRecord>,
    pub guides: Vec<GuideRecord>,
}

impl Dataset {
    /// The dataset shipped with the crate.
    pub fn bundled() -> Result<Self, ContentError> {
        Self::from_json(BUNDLED_QUESTIONS, BUNDLED_GUIDES)
    }

    pub fn from_dir(dir: &Path) -> Result<Self, ContentError> {
        let questions = read(&dir.join(QUESTIONS_FILE))?;
        let guides = read(&dir.join(GUIDES_FILE))?;
        Self::from_json(&questions, &guides)
    }

    pub fn from_json(questions: &str, guides: &str) -> Result<Self, ContentError> {
        let records: Vec<ContentRecord> =
            serde_json::from_str(questions).map_err(|source| ContentError::Json {
                file: QUESTIONS_FILE.to_string(),
                source,
            })?;
        let guides: Vec<GuideRecord> =
            serde_json::from_str(guides).map_err(|source| ContentError::Json {
                file: GUIDES_FILE.to_string(),
                source,
            })?;
        let dataset = Self { records, guides };
        dataset.report_dangling();
        Ok(dataset)
    }

    /// Logs references that will be silently skipped at read time.
    fn report_dangling(&self) {
        let exists = |key: &str| self.records.iter().any(|r| r.key == key);

        for guide in &self.guides {
            for key in guide.question_keys.iter().filter(|k| !exists(k.as_str())) {
                warn!(guide = %guide.key, question = %key, "guide references unknown question");
            }
        }
        for record in &self.records {
            for key in record.related_keys().iter().filter(|k| !exists(k.as_str())) {
                warn!(question = %record.key, related = %key, "related slug does not resolve");
            }
            for ill in record
                .illustrations
                .iter()
                .filter(|ill| ill.after_section >= record.sections.len())
            {
                warn!(
                    question = %record.key,
                    illustration = %ill.id,
                    after_section = ill.after_section,
                    sections = record.sections.len(),
                    "illustration placed after a missing section"
                );
            }
        }
    }
}

fn read(path: &Path) -> Result<String, ContentError> {
    std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_parses() {
        let dataset = Dataset::bundled().expect("bundled dataset should parse");
        assert!(dataset.records.len() >= 10);
        assert!(!dataset.guides.is_empty());
    }

    #[test]
    fn unknown_category_is_rejected_at_load() {
        let questions = r#"[{
            "slug": "x", "title": "X", "category": "nightlife",
            "sections": [{"content": "c"}], "lastUpdated": "2025-01-01"
        }]"#;
        let err = Dataset::from_json(questions, "[]").unwrap_err();
        assert!(matches!(err, ContentError::Json { ref file, .. } if file == QUESTIONS_FILE));
    }

    #[test]
    fn dangling_references_are_tolerated() {
        let questions = r#"[{
            "slug": "x", "title": "X", "category": "safety",
            "sections": [{"content": "c"}],
            "illustrations": [{"id": "i", "caption": "c", "afterSection": 4}],
            "relatedSlugs": ["nowhere"],
            "lastUpdated": "2025-01-01"
        }]"#;
        let guides = r#"[{
            "slug": "g", "title": "G", "subtitle": "s", "description": "d",
            "questions": ["x", "ghost"]
        }]"#;
        let dataset = Dataset::from_json(questions, guides).unwrap();
        assert_eq!(dataset.guides[0].question_keys.len(), 2);
    }

    #[test]
    fn from_dir_reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(QUESTIONS_FILE), BUNDLED_QUESTIONS).unwrap();
        std::fs::write(dir.path().join(GUIDES_FILE), BUNDLED_GUIDES).unwrap();
        let dataset = Dataset::from_dir(dir.path()).unwrap();
        assert_eq!(dataset.records.len(), Dataset::bundled().unwrap().records.len());
    }

    #[test]
    fn from_dir_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }
}
