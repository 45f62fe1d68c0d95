use std::cmp::Reverse;
use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::catalog::Catalog;
use crate::category::Category;
use crate::dates;
use crate::model::ContentRecord;
use crate::site::Site;

const FEED_DESCRIPTION_CHARS: usize = 300;
/// Path, changefreq and priority of each fixed page.
const STATIC_PAGES: &[(&str, &str, f32)] = &[
    ("guides", "weekly", 0.95),
    ("questions", "weekly", 0.7),
    ("about", "monthly", 0.6),
];

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn feed_description(record: &ContentRecord) -> String {
    match record.short_answer() {
        Some(answer) => answer.to_string(),
        None => record
            .sections
            .first()
            .map(|s| s.content.chars().take(FEED_DESCRIPTION_CHARS).collect())
            .unwrap_or_default(),
    }
}

/// RSS 2.0 feed, newest questions first.
pub fn rss_feed<'a>(
    site: &Site,
    records: impl IntoIterator<Item = &'a ContentRecord>,
    now: DateTime<Utc>,
) -> String {
    let mut sorted: Vec<&ContentRecord> = records.into_iter().collect();
    sorted.sort_by_key(|r| Reverse(dates::parse_updated(&r.last_updated)));

    let mut items = String::new();
    for q in sorted {
        let url = site.question_url(&q.key);
        let pub_date = dates::parse_updated(&q.last_updated)
            .map(dates::rfc1123)
            .unwrap_or_else(|| q.last_updated.clone());
        let _ = write!(
            items,
            "    <item>\n      <title>{title}</title>\n      <link>{url}</link>\n      <guid isPermaLink=\"true\">{url}</guid>\n      <description>{description}</description>\n      <pubDate>{pub_date}</pubDate>\n      <category>{category}</category>\n    </item>\n",
            title = escape_xml(&q.title),
            description = escape_xml(&feed_description(q)),
            category = escape_xml(q.category.slug()),
        );
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>{name} — Urban Reference for Morocco</title>
    <link>{base}</link>
    <description>Everyday realities of Morocco's cities explained: infrastructure, climate, architecture, culture, and navigation.</description>
    <language>en</language>
    <lastBuildDate>{built}</lastBuildDate>
    <atom:link href="{feed}" rel="self" type="application/rss+xml"/>
{items}  </channel>
</rss>
"#,
        name = escape_xml(&site.name),
        base = site.base_url,
        built = dates::rfc1123(now),
        feed = site.page_url("feed.xml"),
    )
}

fn url_entry(out: &mut String, loc: &str, lastmod: DateTime<Utc>, changefreq: &str, priority: f32) {
    let _ = write!(
        out,
        "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{changefreq}</changefreq>\n    <priority>{priority}</priority>\n  </url>\n",
        escape_xml(loc),
        lastmod.format("%Y-%m-%d"),
    );
}

/// XML sitemap covering questions, guides, categories and static pages.
pub fn sitemap(site: &Site, catalog: &Catalog, now: DateTime<Utc>) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    url_entry(&mut out, &site.base_url, now, "weekly", 1.0);
    for &(page, changefreq, priority) in STATIC_PAGES {
        url_entry(&mut out, &site.page_url(page), now, changefreq, priority);
    }
    for q in catalog.store().all() {
        let lastmod = dates::parse_updated(&q.last_updated).unwrap_or(now);
        url_entry(&mut out, &site.question_url(&q.key), lastmod, "monthly", 0.8);
    }
    for guide in catalog.guides().all() {
        url_entry(&mut out, &site.guide_url(&guide.key), now, "weekly", 0.9);
    }
    for category in Category::ALL {
        url_entry(&mut out, &site.category_url(category), now, "weekly", 0.7);
    }

    out.push_str("</urlset>\n");
    out
}
