use crate::category::Category;

/// Identity of the published site, used to build absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    /// Base URL without trailing slash, e.g. "https://derb.so"
    pub base_url: String,
    pub name: String,
    pub publisher_name: String,
    pub publisher_url: String,
}

impl Default for Site {
    fn default() -> Self {
        Self::new("https://derb.so")
    }
}

impl Site {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            name: "Derb".to_string(),
            publisher_name: "Slow Morocco".to_string(),
            publisher_url: "https://slowmorocco.com".to_string(),
        }
    }

    pub fn question_url(&self, key: &str) -> String {
        format!("{}/questions/{key}", self.base_url)
    }

    pub fn guide_url(&self, key: &str) -> String {
        format!("{}/guides/{key}", self.base_url)
    }

    pub fn category_url(&self, category: Category) -> String {
        format!("{}/category/{}", self.base_url, category.slug())
    }

    pub fn page_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
