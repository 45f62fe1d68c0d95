use std::collections::HashSet;

use crate::model::ContentRecord;
use crate::store::ContentStore;

/// Picks up to `count` questions related to `focal_key`.
///
/// Candidates come from three tiers, in order: the focal question's curated
/// `relatedSlugs`, then questions of the same category, then everything
/// else. Within a tier candidates follow store order. The focal question is
/// never included and no question appears twice. An unknown focal key
/// yields nothing.
pub fn related<'a>(store: &'a ContentStore, focal_key: &str, count: usize) -> Vec<&'a ContentRecord> {
    let Some(focal) = store.get(focal_key) else {
        return Vec::new();
    };

    let mut picked: Vec<&ContentRecord> = Vec::with_capacity(count);
    let mut seen: HashSet<&str> = HashSet::from([focal.key.as_str()]);

    let curated = focal
        .related_keys()
        .iter()
        .filter_map(|key| store.get(key));
    let same_category = store.all().iter().filter(|r| r.category == focal.category);
    let rest = store.all().iter();

    for candidate in curated.chain(same_category).chain(rest) {
        if picked.len() >= count {
            break;
        }
        if seen.insert(candidate.key.as_str()) {
            picked.push(candidate);
        }
    }

    picked
}
