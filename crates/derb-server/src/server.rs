/// MCP server implementation for the Derb question catalog.
///
/// Exposes ten read-only tools:
/// - `search_questions`: Substring search with category/tag filters
/// - `get_question`: Full question with its guide and related questions
/// - `get_related`: Related questions for a slug
/// - `list_category` / `list_categories`: Browse by category
/// - `list_guides` / `get_guide`: Browse curated guides with their layout
/// - `tag_cloud`: City and topic tag counts
/// - `recent_questions`: Most recently updated questions
/// - `structured_data`: JSON-LD documents for pages
use std::sync::Arc;

use derb_common::mcp_api::{
    section_views, summarize, CategoriesResponse, CategoryInfo, CategoryListResponse,
    GetGuideParams, GetQuestionParams, GetRelatedParams, GuideDetailResponse, GuideListResponse,
    GuideSummary, ListCategoryParams, QuestionDetailResponse, QuestionSummary,
    RecentQuestionsParams, RecentQuestionsResponse, RelatedQuestionsResponse,
    SearchQuestionsParams, SearchQuestionsResponse, StructuredDataKind, StructuredDataParams,
    StructuredDataResponse, TagCloudResponse,
};
use derb_content::{jsonld, tags, Category, ContentRecord, SearchFilter};
use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::debug;

use crate::state::AppState;

const RELATED_ON_QUESTION: usize = 4;
const DEFAULT_SEARCH_LIMIT: u32 = 20;
const MAX_SEARCH_LIMIT: u32 = 100;
const DEFAULT_RELATED: u32 = 4;
const MAX_RELATED: u32 = 20;
const DEFAULT_RECENT: u32 = 10;
const MAX_RECENT: u32 = 100;

#[derive(Clone)]
pub struct DerbServer {
    state: Arc<AppState>,
    tool_router: ToolRouter<DerbServer>,
}

impl DerbServer {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    fn question(&self, slug: &str) -> Result<&ContentRecord, String> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err("slug must not be empty".to_string());
        }
        self.state
            .catalog
            .store()
            .get(slug)
            .ok_or_else(|| format!("question not found: {slug}"))
    }
}

fn parse_category(raw: &str) -> Result<Category, String> {
    raw.trim().parse::<Category>().map_err(|_| {
        let available: Vec<&str> = Category::ALL.iter().map(|c| c.slug()).collect();
        format!(
            "unknown category: '{}'. Available categories: {}",
            raw.trim(),
            available.join(", ")
        )
    })
}

fn bounded(value: Option<u32>, default: u32, max: u32) -> usize {
    value.unwrap_or(default).min(max) as usize
}

#[tool_router]
impl DerbServer {
    #[tool(description = "Search Derb questions about Morocco. Case-insensitive substring match over titles, answers, section text, search terms and tags, optionally narrowed by category slug and exact tag. Results keep catalog order.")]
    async fn search_questions(
        &self,
        Parameters(params): Parameters<SearchQuestionsParams>,
    ) -> Result<Json<SearchQuestionsResponse>, String> {
        let category = params
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(parse_category)
            .transpose()?;
        let filter = SearchFilter::new()
            .with_query(params.query.as_deref().unwrap_or_default())
            .with_category(category)
            .with_tag(params.tag.as_deref());
        let limit = bounded(params.limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT);

        let hits = self.state.search(&filter).await;
        debug!(matches = hits.len(), limit, "search_questions");

        Ok(Json(SearchQuestionsResponse {
            total: hits.len(),
            results: summarize(hits.into_iter().take(limit)),
        }))
    }

    #[tool(description = "Get a Derb question by slug: the full record (answer, sections, illustrations, sources, backlinks), a render-ready body with inline links split out and illustrations placed after their sections, the guide it belongs to, and four related questions.")]
    async fn get_question(
        &self,
        Parameters(params): Parameters<GetQuestionParams>,
    ) -> Result<Json<QuestionDetailResponse>, String> {
        let record = self.question(&params.slug)?;
        let catalog = &self.state.catalog;

        Ok(Json(QuestionDetailResponse {
            question: record.clone(),
            body: section_views(record),
            guide: catalog.guide_for(&record.key).map(GuideSummary::from),
            related: summarize(catalog.related(&record.key, RELATED_ON_QUESTION)),
        }))
    }

    #[tool(description = "List questions related to a slug: hand-curated links first, then the same category, then the rest of the catalog. Never repeats and never includes the question itself.")]
    async fn get_related(
        &self,
        Parameters(params): Parameters<GetRelatedParams>,
    ) -> Result<Json<RelatedQuestionsResponse>, String> {
        let record = self.question(&params.slug)?;
        let count = bounded(params.count, DEFAULT_RELATED, MAX_RELATED);

        Ok(Json(RelatedQuestionsResponse {
            slug: record.key.clone(),
            related: summarize(self.state.catalog.related(&record.key, count)),
        }))
    }

    #[tool(description = "List every question in a category. Categories: arrival-logistics, the-medina, social-cultural, food-drink, safety, religious-calendar, cities.")]
    async fn list_category(
        &self,
        Parameters(params): Parameters<ListCategoryParams>,
    ) -> Result<Json<CategoryListResponse>, String> {
        if params.category.trim().is_empty() {
            return Err("category must not be empty".to_string());
        }
        let category = parse_category(&params.category)?;
        let questions = self.state.catalog.store().in_category(category);

        Ok(Json(CategoryListResponse {
            category: CategoryInfo::new(category, questions.len()),
            intro: category.meta().intro.to_string(),
            questions: summarize(questions),
        }))
    }

    #[tool(description = "List all categories with their labels and question counts, in display order.")]
    async fn list_categories(&self) -> Result<Json<CategoriesResponse>, String> {
        let categories = self
            .state
            .catalog
            .store()
            .category_counts()
            .into_iter()
            .map(|(category, count)| CategoryInfo::new(category, count))
            .collect();
        Ok(Json(CategoriesResponse { categories }))
    }

    #[tool(description = "List the curated guides in display order, plus the featured lead question of the first guide.")]
    async fn list_guides(&self) -> Result<Json<GuideListResponse>, String> {
        let catalog = &self.state.catalog;
        Ok(Json(GuideListResponse {
            guides: catalog.guides().all().iter().map(GuideSummary::from).collect(),
            featured: catalog.featured().map(QuestionSummary::from),
        }))
    }

    #[tool(description = "Get a guide by slug: its questions in order (missing ones skipped), its position, the previous and next guides (wrapping around), and the colour-band layout for its question list.")]
    async fn get_guide(
        &self,
        Parameters(params): Parameters<GetGuideParams>,
    ) -> Result<Json<GuideDetailResponse>, String> {
        let slug = params.slug.trim();
        if slug.is_empty() {
            return Err("slug must not be empty".to_string());
        }
        GuideDetailResponse::build(&self.state.catalog, slug)
            .map(Json)
            .ok_or_else(|| format!("guide not found: {slug}"))
    }

    #[tool(description = "Tag cloud over all questions: city tags and topic tags, each sorted by how many questions carry them, with display labels and relative weights.")]
    async fn tag_cloud(&self) -> Result<Json<TagCloudResponse>, String> {
        Ok(Json(TagCloudResponse {
            cloud: tags::tag_cloud(self.state.catalog.store().all()),
        }))
    }

    #[tool(description = "Most recently updated questions, newest first (default: 10, max: 100).")]
    async fn recent_questions(
        &self,
        Parameters(params): Parameters<RecentQuestionsParams>,
    ) -> Result<Json<RecentQuestionsResponse>, String> {
        let limit = bounded(params.limit, DEFAULT_RECENT, MAX_RECENT);
        Ok(Json(RecentQuestionsResponse {
            questions: summarize(self.state.catalog.store().recent(limit)),
        }))
    }

    #[tool(description = "Build a schema.org JSON-LD document. Kinds: article and question-page (need a question slug), collection-page (needs a category slug), item-list, faq-page, website.")]
    async fn structured_data(
        &self,
        Parameters(params): Parameters<StructuredDataParams>,
    ) -> Result<Json<StructuredDataResponse>, String> {
        let site = &self.state.site;
        let store = self.state.catalog.store();
        let slug = params.slug.as_deref().unwrap_or_default();

        let document = match params.kind {
            StructuredDataKind::Article => jsonld::article_document(site, self.question(slug)?),
            StructuredDataKind::QuestionPage => {
                jsonld::question_page_graph(site, self.question(slug)?)
            }
            StructuredDataKind::ItemList => jsonld::item_list(site, store.all()),
            StructuredDataKind::FaqPage => jsonld::faq_page(site, store.all()),
            StructuredDataKind::CollectionPage => {
                if slug.trim().is_empty() {
                    return Err("collection-page needs a category slug".to_string());
                }
                let category = parse_category(slug)?;
                jsonld::collection_page(site, category, &store.in_category(category))
            }
            StructuredDataKind::Website => jsonld::website(site),
        };

        Ok(Json(StructuredDataResponse {
            kind: params.kind,
            document,
        }))
    }
}

#[tool_handler]
impl ServerHandler for DerbServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "derb".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Derb MCP server. Answers practical questions about Morocco \
                 (medina navigation, riads, taxis, food, safety, Ramadan, cities). \
                 Use search_questions for keyword lookup, get_question for a full \
                 answer by slug, list_category and list_guides for browsing, and \
                 structured_data for schema.org JSON-LD."
                    .to_string(),
            ),
        }
    }
}
