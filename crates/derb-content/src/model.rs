use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A single published question, e.g. "Why does my riad smell like drains?".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// URL slug, unique across the dataset
    #[serde(rename = "slug")]
    pub key: String,
    pub title: String,
    pub category: Category,
    /// City the question is primarily about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// One or two sentence direct answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_answer: Option<String>,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub illustrations: Vec<Illustration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
    /// Hand-curated cross links, tried first when picking related questions
    #[serde(rename = "relatedSlugs", default, skip_serializing_if = "Option::is_none")]
    pub related_keys: Option<Vec<String>>,
    /// Extra search intents this question answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_terms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backlinks: Option<Vec<Backlink>>,
    pub last_updated: String,
}

impl ContentRecord {
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    pub fn search_terms(&self) -> &[String] {
        self.search_terms.as_deref().unwrap_or_default()
    }

    pub fn related_keys(&self) -> &[String] {
        self.related_keys.as_deref().unwrap_or_default()
    }

    pub fn sources(&self) -> &[Source] {
        self.sources.as_deref().unwrap_or_default()
    }

    pub fn backlinks(&self) -> &[Backlink] {
        self.backlinks.as_deref().unwrap_or_default()
    }

    /// Illustrations placed after the section at `index`. Illustrations that
    /// point past the last section never match any section.
    pub fn illustrations_after(&self, index: usize) -> impl Iterator<Item = &Illustration> {
        self.illustrations
            .iter()
            .filter(move |ill| ill.after_section == index)
    }

    /// Short answer, or `None` when absent or empty.
    pub fn short_answer(&self) -> Option<&str> {
        self.short_answer.as_deref().filter(|s| !s.is_empty())
    }

    /// Subtitle, or `None` when absent or empty.
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref().filter(|s| !s.is_empty())
    }

    /// Short answer, falling back to the first section's content.
    pub fn answer_text(&self) -> &str {
        self.short_answer()
            .or_else(|| self.sections.first().map(|s| s.content.as_str()))
            .unwrap_or_default()
    }

    /// Full body as markdown, one `## heading` per headed section.
    pub fn full_text(&self) -> String {
        self.sections
            .iter()
            .map(|s| match &s.heading {
                Some(heading) if !heading.is_empty() => format!("## {heading}\n{}", s.content),
                _ => s.content.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A body section of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub content: String,
}

/// An inline drawing shown after a given section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Illustration {
    pub id: String,
    pub caption: String,
    /// 0-based index of the section this illustration follows
    #[serde(rename = "afterSection")]
    pub after_section: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Source {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Link out to a place, story or glossary entry on the partner site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Backlink {
    /// Anchor text
    pub text: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: BacklinkKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BacklinkKind {
    Place,
    Story,
    Glossary,
}

/// A curated theme: an ordered list of question slugs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GuideRecord {
    #[serde(rename = "slug")]
    pub key: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    #[serde(rename = "questions")]
    pub question_keys: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ContentRecord {
        serde_json::from_str(
            r#"{
                "slug": "why-gps-fails",
                "title": "Why does GPS fail in the medina?",
                "category": "the-medina",
                "sections": [
                    {"content": "Narrow lanes block the sky."},
                    {"heading": "What works", "content": "Landmarks."}
                ],
                "illustrations": [
                    {"id": "lanes", "caption": "Lanes", "afterSection": 0},
                    {"id": "ghost", "caption": "Nowhere", "afterSection": 7}
                ],
                "backlinks": [{"text": "Jemaa el-Fna", "url": "https://slowmorocco.com/places/jemaa", "type": "place"}],
                "lastUpdated": "2025-01-10"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn deserializes_dataset_field_names() {
        let record = sample();
        assert_eq!(record.key, "why-gps-fails");
        assert_eq!(record.category, Category::TheMedina);
        assert!(record.related_keys().is_empty());
        assert_eq!(record.backlinks()[0].kind, BacklinkKind::Place);
    }

    #[test]
    fn out_of_range_illustration_is_never_placed() {
        let record = sample();
        let placed: Vec<&str> = (0..record.sections.len())
            .flat_map(|i| record.illustrations_after(i))
            .map(|ill| ill.id.as_str())
            .collect();
        assert_eq!(placed, vec!["lanes"]);
    }

    #[test]
    fn answer_text_falls_back_to_first_section() {
        let record = sample();
        assert_eq!(record.answer_text(), "Narrow lanes block the sky.");
    }

    #[test]
    fn empty_short_answer_and_subtitle_count_as_absent() {
        let mut record = sample();
        record.short_answer = Some(String::new());
        record.subtitle = Some(String::new());
        assert_eq!(record.short_answer(), None);
        assert_eq!(record.subtitle(), None);
        assert_eq!(record.answer_text(), "Narrow lanes block the sky.");
    }

    #[test]
    fn full_text_marks_headings() {
        let record = sample();
        assert_eq!(
            record.full_text(),
            "Narrow lanes block the sky.\n\n## What works\nLandmarks."
        );
    }
}
