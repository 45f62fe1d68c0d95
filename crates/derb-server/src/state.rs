use derb_common::links::{ContentLinksProvider, ContentSite};
use derb_content::{Catalog, ContentRecord, SearchFilter, Site};
use tracing::debug;

use crate::cache::ResponseCache;

/// Everything a request needs. The catalog never changes after startup, so
/// the state is shared behind a plain `Arc` with no locking.
pub struct AppState {
    pub catalog: Catalog,
    pub site: Site,
    pub cache: ResponseCache,
    pub links: Box<dyn ContentLinksProvider>,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        site: Site,
        cache: ResponseCache,
        links: Box<dyn ContentLinksProvider>,
    ) -> Self {
        Self {
            catalog,
            site,
            cache,
            links,
        }
    }

    /// Runs `filter` over the full question list, consulting the search
    /// cache first. Cached slugs that no longer resolve are skipped.
    pub async fn search(&self, filter: &SearchFilter) -> Vec<&ContentRecord> {
        let store = self.catalog.store();
        if filter.is_empty() {
            return store.all().iter().collect();
        }

        if let Some(keys) = self.cache.get_search_keys(filter).await {
            debug!(hits = keys.len(), "search cache hit");
            return keys.iter().filter_map(|k| store.get(k)).collect();
        }

        let hits = filter.apply(store.all());
        let keys: Vec<String> = hits.iter().map(|r| r.key.clone()).collect();
        self.cache.set_search_keys(filter, &keys).await;
        hits
    }

    pub async fn content_sites(&self) -> Vec<ContentSite> {
        if let Some(sites) = self.cache.get_content_sites().await {
            return sites;
        }
        let sites = self.links.content_sites().await;
        if !sites.is_empty() {
            self.cache.set_content_sites(&sites).await;
        }
        sites
    }
}


#[cfg(test)]
mod tests {
    use derb_content::Category;

    use super::test_support::state;
    use super::*;

    #[tokio::test]
    async fn empty_filter_returns_everything_in_order() {
        let state = state();
        let hits = state.search(&SearchFilter::new()).await;
        assert_eq!(hits.len(), state.catalog.store().len());
        assert_eq!(hits[0].key, state.catalog.store().all()[0].key);
    }

    #[tokio::test]
    async fn search_matches_core_filter() {
        let state = state();
        let filter = SearchFilter::new()
            .with_query("riad")
            .with_category(Some(Category::TheMedina));
        let expected: Vec<&str> = filter
            .apply(state.catalog.store().all())
            .into_iter()
            .map(|r| r.key.as_str())
            .collect();
        let hits: Vec<&str> = state
            .search(&filter)
            .await
            .into_iter()
            .map(|r| r.key.as_str())
            .collect();
        assert_eq!(hits, expected);
        assert!(!hits.is_empty());
    }

    #[tokio::test]
    async fn no_links_means_no_sites() {
        assert!(state().content_sites().await.is_empty());
    }
}
