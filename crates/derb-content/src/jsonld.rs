/// schema.org JSON-LD documents for search engines and AI crawlers.
///
/// Every function is a pure projection of records onto `serde_json::Value`;
/// record fields are copied verbatim.
use serde_json::{json, Map, Value};

use crate::category::Category;
use crate::model::{BacklinkKind, ContentRecord};
use crate::site::Site;

const DESCRIPTION_CHARS: usize = 200;
const MARRAKECH_LAT: f64 = 31.6295;
const MARRAKECH_LON: f64 = -7.9811;

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Subtitle, else the first 200 characters of the first section.
pub fn description(record: &ContentRecord) -> String {
    match record.subtitle() {
        Some(subtitle) => subtitle.to_string(),
        None => record
            .sections
            .first()
            .map(|s| truncate_chars(&s.content, DESCRIPTION_CHARS))
            .unwrap_or_default(),
    }
}

fn publisher(site: &Site) -> Value {
    json!({
        "@type": "Organization",
        "name": site.publisher_name,
        "url": site.publisher_url,
    })
}

fn citations(record: &ContentRecord) -> Option<Value> {
    if record.sources().is_empty() {
        return None;
    }
    let items: Vec<Value> = record
        .sources()
        .iter()
        .map(|s| {
            let mut item = json!({ "@type": "CreativeWork", "name": s.text });
            if let Some(url) = &s.url {
                item["url"] = json!(url);
            }
            item
        })
        .collect();
    Some(Value::Array(items))
}

fn insert_opt(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value);
    }
}

/// The per-question API document.
pub fn article_document(site: &Site, record: &ContentRecord) -> Value {
    let url = site.question_url(&record.key);
    let full_text = record.full_text();
    let answer = record
        .short_answer()
        .map_or_else(|| full_text.clone(), str::to_string);

    let mut doc = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "@id": url,
        "url": url,
        "headline": record.title,
        "description": description(record),
        "articleSection": record.category,
        "dateModified": record.last_updated,
        "inLanguage": "en",
        "publisher": publisher(site),
        "author": { "@type": "Organization", "name": site.name, "url": site.base_url },
        "about": {
            "@type": "Place",
            "name": "Marrakech",
            "geo": { "@type": "GeoCoordinates", "latitude": MARRAKECH_LAT, "longitude": MARRAKECH_LON },
        },
        "mainEntity": {
            "@type": "Question",
            "name": record.title,
            "acceptedAnswer": {
                "@type": "Answer",
                "text": answer,
                "dateModified": record.last_updated,
            },
        },
        "shortAnswer": record.short_answer,
        "articleBody": full_text,
        "sections": record.sections.iter().enumerate().map(|(i, s)| json!({
            "position": i + 1,
            "heading": s.heading,
            "content": s.content,
        })).collect::<Vec<_>>(),
    });

    if let Value::Object(map) = &mut doc {
        insert_opt(map, "citation", citations(record));
        insert_opt(
            map,
            "relatedQuestions",
            record.related_keys.as_ref().map(|keys| {
                keys.iter()
                    .map(|k| {
                        let related = site.question_url(k);
                        json!({ "url": related, "@id": related })
                    })
                    .collect()
            }),
        );
        insert_opt(
            map,
            "keywords",
            record.search_terms.as_ref().map(|terms| json!(terms)),
        );
        if !record.backlinks().is_empty() {
            let links: Vec<Value> = record
                .backlinks()
                .iter()
                .map(|bl| {
                    json!({
                        "url": bl.url,
                        "name": bl.text,
                        "type": bl.kind,
                        "publisher": site.publisher_name,
                    })
                })
                .collect();
            map.insert("relatedLink".to_string(), Value::Array(links));
        }
    }
    doc
}

/// ItemList of every question, as served by the questions API.
pub fn item_list<'a>(site: &Site, records: impl IntoIterator<Item = &'a ContentRecord>) -> Value {
    let items: Vec<Value> = records
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            let url = site.question_url(&q.key);
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "item": {
                    "@type": "Article",
                    "@id": url,
                    "url": url,
                    "headline": q.title,
                    "description": description(q),
                    "articleSection": q.category,
                    "dateModified": q.last_updated,
                    "mainEntityOfPage": url,
                },
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "ItemList",
        "name": format!("{} — Urban Reference for Marrakech", site.name),
        "description": "Structured explanations of everyday realities in Marrakech: infrastructure, climate, architecture, culture, and navigation.",
        "url": site.base_url,
        "numberOfItems": items.len(),
        "publisher": publisher(site),
        "itemListElement": items,
    })
}

pub fn faq_page<'a>(site: &Site, records: impl IntoIterator<Item = &'a ContentRecord>) -> Value {
    let entities: Vec<Value> = records
        .into_iter()
        .map(|q| {
            let url = site.question_url(&q.key);
            json!({
                "@type": "Question",
                "name": q.title,
                "url": url,
                "acceptedAnswer": { "@type": "Answer", "text": q.answer_text(), "url": url },
            })
        })
        .collect();
    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": entities,
    })
}

/// Breadcrumbs, Article and QAPage for a question page.
pub fn question_page_graph(site: &Site, record: &ContentRecord) -> Value {
    let url = site.question_url(&record.key);
    let label = record.category.label();
    let description = record
        .short_answer()
        .map_or_else(|| description(record), str::to_string);

    let mut article = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "@id": url,
        "url": url,
        "headline": record.title,
        "description": description,
        "articleSection": label,
        "dateModified": record.last_updated,
        "datePublished": record.last_updated,
        "inLanguage": "en",
        "isPartOf": { "@type": "WebSite", "name": site.name, "url": site.base_url },
        "publisher": publisher(site),
        "author": { "@type": "Organization", "name": site.name, "url": site.base_url },
        "about": {
            "@type": "Place",
            "name": "Marrakech, Morocco",
            "geo": { "@type": "GeoCoordinates", "latitude": MARRAKECH_LAT, "longitude": MARRAKECH_LON },
        },
    });
    if let Value::Object(map) = &mut article {
        insert_opt(map, "citation", citations(record));
        if !record.backlinks().is_empty() {
            let all: Vec<&str> = record.backlinks().iter().map(|bl| bl.url.as_str()).collect();
            let significant: Vec<&str> = record
                .backlinks()
                .iter()
                .filter(|bl| matches!(bl.kind, BacklinkKind::Place | BacklinkKind::Story))
                .map(|bl| bl.url.as_str())
                .collect();
            map.insert("relatedLink".to_string(), json!(all));
            map.insert("significantLink".to_string(), json!(significant));
        }
    }

    json!([
        {
            "@context": "https://schema.org",
            "@type": "BreadcrumbList",
            "itemListElement": [
                { "@type": "ListItem", "position": 1, "name": site.name, "item": site.base_url },
                { "@type": "ListItem", "position": 2, "name": label, "item": site.category_url(record.category) },
                { "@type": "ListItem", "position": 3, "name": record.title, "item": url },
            ],
        },
        article,
        {
            "@context": "https://schema.org",
            "@type": "QAPage",
            "mainEntity": {
                "@type": "Question",
                "name": record.title,
                "text": record.subtitle().unwrap_or(&record.title),
                "answerCount": 1,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": record.answer_text(),
                    "url": url,
                    "dateModified": record.last_updated,
                },
            },
        },
    ])
}

pub fn collection_page(site: &Site, category: Category, records: &[&ContentRecord]) -> Value {
    let meta = category.meta();
    let url = site.category_url(category);
    let items: Vec<Value> = records
        .iter()
        .enumerate()
        .map(|(i, q)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "url": site.question_url(&q.key),
                "name": q.title,
            })
        })
        .collect();
    json!({
        "@context": "https://schema.org",
        "@type": "CollectionPage",
        "name": meta.heading,
        "description": meta.description,
        "url": url,
        "isPartOf": { "@type": "WebSite", "name": site.name, "url": site.base_url },
        "mainEntity": {
            "@type": "ItemList",
            "numberOfItems": items.len(),
            "itemListElement": items,
        },
    })
}

pub fn website(site: &Site) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": site.name,
        "url": site.base_url,
        "description": "An urban reference explaining the everyday realities of Morocco's cities.",
        "inLanguage": "en",
        "publisher": publisher(site),
        "potentialAction": {
            "@type": "SearchAction",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": format!("{}/?q={{search_term_string}}", site.base_url),
            },
            "query-input": "required name=search_term_string",
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Backlink, Source};
    use crate::test_support::record;

    fn rich() -> ContentRecord {
        let mut r = record("tap-water", Category::FoodDrink);
        r.short_answer = Some("Bottled is safer.".to_string());
        r.sources = Some(vec![
            Source {
                text: "ONEE".to_string(),
                url: Some("https://www.one.org.ma".to_string()),
            },
            Source {
                text: "Local plumbers".to_string(),
                url: None,
            },
        ]);
        r.related_keys = Some(vec!["mint-tea".to_string()]);
        r.backlinks = Some(vec![
            Backlink {
                text: "Riad life".to_string(),
                url: "https://slowmorocco.com/stories/riad".to_string(),
                kind: BacklinkKind::Story,
            },
            Backlink {
                text: "Khettara".to_string(),
                url: "https://slowmorocco.com/glossary/khettara".to_string(),
                kind: BacklinkKind::Glossary,
            },
        ]);
        r
    }

    #[test]
    fn article_document_carries_optional_blocks() {
        let site = Site::default();
        let doc = article_document(&site, &rich());
        assert_eq!(doc["@id"], "https://derb.so/questions/tap-water");
        assert_eq!(doc["articleSection"], "food-drink");
        assert_eq!(doc["mainEntity"]["acceptedAnswer"]["text"], "Bottled is safer.");
        assert_eq!(doc["citation"][0]["url"], "https://www.one.org.ma");
        assert!(doc["citation"][1].get("url").is_none());
        assert_eq!(
            doc["relatedQuestions"][0]["@id"],
            "https://derb.so/questions/mint-tea"
        );
        assert_eq!(doc["relatedLink"][1]["type"], "glossary");
        assert!(doc.get("keywords").is_none());
        assert_eq!(doc["sections"][0]["position"], 1);
    }

    #[test]
    fn bare_record_omits_optional_blocks() {
        let doc = article_document(&Site::default(), &record("plain", Category::Safety));
        assert!(doc.get("citation").is_none());
        assert!(doc.get("relatedLink").is_none());
        assert!(doc["shortAnswer"].is_null());
    }

    #[test]
    fn question_graph_lists_significant_links() {
        let graph = question_page_graph(&Site::default(), &rich());
        assert_eq!(graph[0]["@type"], "BreadcrumbList");
        assert_eq!(graph[0]["itemListElement"][1]["name"], "Food & Drink");
        let article = &graph[1];
        assert_eq!(article["relatedLink"].as_array().unwrap().len(), 2);
        assert_eq!(
            article["significantLink"],
            json!(["https://slowmorocco.com/stories/riad"])
        );
        assert_eq!(graph[2]["mainEntity"]["answerCount"], 1);
    }

    #[test]
    fn item_list_numbers_from_one() {
        let records = vec![record("a", Category::Safety), record("b", Category::Cities)];
        let list = item_list(&Site::default(), &records);
        assert_eq!(list["numberOfItems"], 2);
        assert_eq!(list["itemListElement"][1]["position"], 2);
    }

    #[test]
    fn description_truncates_first_section() {
        let mut r = record("long", Category::Safety);
        r.sections[0].content = "x".repeat(500);
        assert_eq!(description(&r).chars().count(), 200);
    }

    #[test]
    fn empty_subtitle_and_short_answer_fall_back() {
        let mut r = record("blank", Category::Safety);
        r.subtitle = Some(String::new());
        r.short_answer = Some(String::new());
        assert_eq!(description(&r), "Body of blank");

        let doc = article_document(&Site::default(), &r);
        assert_eq!(doc["mainEntity"]["acceptedAnswer"]["text"], "Body of blank");

        let graph = question_page_graph(&Site::default(), &r);
        assert_eq!(graph[1]["description"], "Body of blank");
        assert_eq!(graph[2]["mainEntity"]["text"], "Question blank");
    }
}
