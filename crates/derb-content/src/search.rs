/// Substring search and category/tag filtering over the full question list.
///
/// A [`SearchFilter`] is a value: changing one criterion produces a new
/// filter, and [`SearchFilter::apply`] always scans the collection it is
/// given. Callers pass the unfiltered list every time so that loosening a
/// criterion brings back everything it had hidden.
use crate::category::Category;
use crate::model::ContentRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    query: Option<String>,
    category: Option<Category>,
    tag: Option<String>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank queries disable text matching.
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = normalize(query).map(|q| q.to_lowercase());
        self
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Blank tags disable tag filtering.
    pub fn with_tag(mut self, tag: Option<&str>) -> Self {
        self.tag = tag.and_then(normalize).map(str::to_string);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.category.is_none() && self.tag.is_none()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn matches(&self, record: &ContentRecord) -> bool {
        if let Some(category) = self.category {
            if record.category != category {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !record.tags().iter().any(|t| t == tag) {
                return false;
            }
        }
        match &self.query {
            Some(query) => text_matches(record, query),
            None => true,
        }
    }

    /// Records matching every active criterion, in input order.
    pub fn apply<'a>(&self, records: &'a [ContentRecord]) -> Vec<&'a ContentRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Convenience wrapper around [`SearchFilter`].
pub fn search<'a>(
    records: &'a [ContentRecord],
    query: &str,
    category: Option<Category>,
    tag: Option<&str>,
) -> Vec<&'a ContentRecord> {
    SearchFilter::new()
        .with_query(query)
        .with_category(category)
        .with_tag(tag)
        .apply(records)
}

fn normalize(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

// `needle` is already lowercase.
fn text_matches(record: &ContentRecord, needle: &str) -> bool {
    let hit = |text: &str| text.to_lowercase().contains(needle);

    hit(&record.title)
        || record.short_answer.as_deref().is_some_and(hit)
        || record.subtitle.as_deref().is_some_and(hit)
        || record.sections.iter().any(|s| hit(&s.content))
        || record
            .sections
            .iter()
            .any(|s| s.heading.as_deref().is_some_and(hit))
        || record.search_terms().iter().any(|t| hit(t))
        || record.tags().iter().any(|t| hit(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;
    use crate::test_support::record;

    fn fixture() -> Vec<ContentRecord> {
        let mut title = record("title", Category::TheMedina);
        title.title = "Why is the Medina so loud?".to_string();

        let mut heading = record("heading", Category::Safety);
        heading.sections.push(Section {
            heading: Some("Night walks in the MEDINA".to_string()),
            content: "Stay on lit streets.".to_string(),
        });

        let mut term = record("term", Category::Cities);
        term.search_terms = Some(vec!["old town medina".to_string()]);
        term.tags = Some(vec!["fes".to_string()]);

        let mut tagged = record("tagged", Category::Safety);
        tagged.tags = Some(vec!["medina".to_string(), "heat".to_string()]);

        let mut subtitle = record("subtitle", Category::FoodDrink);
        subtitle.subtitle = Some("Eating in the medina".to_string());

        vec![title, heading, term, tagged, subtitle, record("plain", Category::Safety)]
    }

    fn keys(records: &[&ContentRecord]) -> Vec<String> {
        records.iter().map(|r| r.key.clone()).collect()
    }

    #[test]
    fn blank_query_is_identity() {
        let all = fixture();
        assert_eq!(search(&all, "", None, None).len(), all.len());
        assert_eq!(search(&all, "   ", None, Some("")).len(), all.len());
    }

    #[test]
    fn text_match_covers_every_field_case_insensitively() {
        let all = fixture();
        let upper = search(&all, "MEDINA", None, None);
        let lower = search(&all, "medina", None, None);
        assert_eq!(keys(&upper), keys(&lower));
        assert_eq!(
            keys(&upper),
            vec!["title", "heading", "term", "tagged", "subtitle"]
        );
    }

    #[test]
    fn filters_are_anded() {
        let all = fixture();
        let hits = search(&all, "medina", Some(Category::Safety), None);
        assert_eq!(keys(&hits), vec!["heading", "tagged"]);

        let hits = search(&all, "medina", Some(Category::Safety), Some("heat"));
        assert_eq!(keys(&hits), vec!["tagged"]);
    }

    #[test]
    fn tag_filter_is_exact() {
        let all = fixture();
        assert!(search(&all, "", None, Some("Heat")).is_empty());
        assert_eq!(keys(&search(&all, "", None, Some("heat"))), vec!["tagged"]);
    }

    #[test]
    fn loosening_a_criterion_restores_records() {
        let all = fixture();
        let narrow = SearchFilter::new()
            .with_query("medina")
            .with_category(Some(Category::Cities));
        assert_eq!(keys(&narrow.apply(&all)), vec!["term"]);

        let loose = narrow.with_category(None);
        assert_eq!(loose.apply(&all).len(), 5);
        assert_eq!(loose.apply(&all), loose.apply(&all));
    }
}
