use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::ContentRecord;

const CITY_TAGS: &[&str] = &[
    "marrakech",
    "casablanca",
    "rabat",
    "agadir",
    "taghazout",
    "tangier",
    "fes",
    "essaouira",
    "chefchaouen",
];

const TAG_LABELS: &[(&str, &str)] = &[
    ("marrakech", "Marrakech"),
    ("casablanca", "Casablanca"),
    ("rabat", "Rabat"),
    ("agadir", "Agadir"),
    ("taghazout", "Taghazout"),
    ("tangier", "Tangier"),
    ("fes", "Fes"),
    ("medina", "Medina"),
    ("riads", "Riads"),
    ("architecture", "Architecture"),
    ("navigation", "Navigation"),
    ("food", "Food"),
    ("etiquette", "Etiquette"),
    ("heat", "Heat"),
    ("sound", "Sound"),
    ("wildlife", "Wildlife"),
    ("safety", "Safety"),
    ("ramadan", "Ramadan"),
    ("surfing", "Surfing"),
    ("shopping", "Shopping"),
    ("hammam", "Hammam"),
    ("vegan", "Vegan"),
    ("transport", "Transport"),
];

pub fn is_city(tag: &str) -> bool {
    CITY_TAGS.contains(&tag)
}

/// Display label for a tag, falling back to the tag itself.
pub fn tag_label(tag: &str) -> &str {
    TAG_LABELS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, label)| *label)
        .unwrap_or(tag)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TagCount {
    pub tag: String,
    pub label: String,
    pub count: usize,
    pub is_city: bool,
    /// `count / max_count` over the whole cloud, in (0, 1]
    pub weight: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TagCloud {
    pub cities: Vec<TagCount>,
    pub topics: Vec<TagCount>,
}

/// Counts tags across `records`. Each group is sorted by count descending;
/// ties keep first-seen order.
pub fn tag_cloud<'a>(records: impl IntoIterator<Item = &'a ContentRecord>) -> TagCloud {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        for tag in record.tags() {
            let count = counts.entry(tag.as_str()).or_insert_with(|| {
                order.push(tag.as_str());
                0
            });
            *count += 1;
        }
    }

    let max = counts.values().copied().max().unwrap_or(0).max(1) as f32;
    let (mut cities, mut topics): (Vec<TagCount>, Vec<TagCount>) = order
        .into_iter()
        .map(|tag| {
            let count = counts[tag];
            TagCount {
                tag: tag.to_string(),
                label: tag_label(tag).to_string(),
                count,
                is_city: is_city(tag),
                weight: count as f32 / max,
            }
        })
        .partition(|t| t.is_city);

    cities.sort_by(|a, b| b.count.cmp(&a.count));
    topics.sort_by(|a, b| b.count.cmp(&a.count));
    TagCloud { cities, topics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::test_support::record;

    fn tagged(key: &str, tags: &[&str]) -> ContentRecord {
        let mut r = record(key, Category::Cities);
        r.tags = Some(tags.iter().map(|t| t.to_string()).collect());
        r
    }

    #[test]
    fn splits_cities_from_topics_and_sorts_by_count() {
        let records = vec![
            tagged("a", &["heat", "fes", "marrakech"]),
            tagged("b", &["marrakech", "surfing"]),
            tagged("c", &["marrakech", "surfing", "heat"]),
            tagged("d", &["kasbahs"]),
        ];
        let cloud = tag_cloud(&records);

        let cities: Vec<(&str, usize)> =
            cloud.cities.iter().map(|t| (t.tag.as_str(), t.count)).collect();
        assert_eq!(cities, vec![("marrakech", 3), ("fes", 1)]);

        let topics: Vec<(&str, usize)> =
            cloud.topics.iter().map(|t| (t.tag.as_str(), t.count)).collect();
        assert_eq!(topics, vec![("heat", 2), ("surfing", 2), ("kasbahs", 1)]);

        assert_eq!(cloud.cities[0].weight, 1.0);
        assert_eq!(cloud.topics[2].label, "kasbahs");
        assert_eq!(cloud.cities[1].label, "Fes");
    }

    #[test]
    fn empty_input_gives_empty_cloud() {
        assert_eq!(tag_cloud(&Vec::<ContentRecord>::new()), TagCloud::default());
    }
}
