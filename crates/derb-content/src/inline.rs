use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));

/// A run of body text: plain, or a Markdown-style `[label](url)` link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    Text { text: String },
    Link { label: String, url: String },
}

/// Splits `text` into plain and link segments, in order. Empty text runs
/// between adjacent links are dropped.
pub fn inline_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in LINK_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            segments.push(Segment::Text {
                text: text[last..whole.start()].to_string(),
            });
        }
        segments.push(Segment::Link {
            label: caps[1].to_string(),
            url: caps[2].to_string(),
        });
        last = whole.end();
    }
    if last < text.len() || segments.is_empty() {
        segments.push(Segment::Text {
            text: text[last..].to_string(),
        });
    }
    segments
}
