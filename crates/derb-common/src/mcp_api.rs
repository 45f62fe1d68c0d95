use derb_content::inline::{inline_segments, Segment};
use derb_content::tags::TagCloud;
use derb_content::zones::ZonePlan;
use derb_content::{Catalog, Category, ContentRecord, GuideRecord, Illustration};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchQuestionsParams {
    /// Case-insensitive substring matched against titles, answers, section
    /// text, search terms and tags. Omit or leave blank to match everything.
    pub query: Option<String>,
    /// Category slug such as "the-medina" or "food-drink".
    pub category: Option<String>,
    /// Exact tag such as "marrakech" or "riads".
    pub tag: Option<String>,
    /// Maximum number of results to return (default: 20, max: 100).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetQuestionParams {
    /// Question slug such as "why-does-gps-fail-in-the-medina".
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetRelatedParams {
    /// Question slug to find related questions for.
    pub slug: String,
    /// Number of related questions (default: 4, max: 20).
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListCategoryParams {
    /// Category slug such as "safety" or "arrival-logistics".
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetGuideParams {
    /// Guide slug such as "the-medina" or "inside-the-riad".
    pub slug: String,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct RecentQuestionsParams {
    /// Number of questions (default: 10, max: 100).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StructuredDataKind {
    /// Per-question API document. Needs a question slug.
    Article,
    /// Breadcrumb, Article and QAPage graph. Needs a question slug.
    QuestionPage,
    /// ItemList of every question.
    ItemList,
    /// FAQPage over every question.
    FaqPage,
    /// CollectionPage for one category. Needs a category slug.
    CollectionPage,
    /// WebSite with its SearchAction.
    Website,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StructuredDataParams {
    pub kind: StructuredDataKind,
    /// Question slug (article, question-page) or category slug
    /// (collection-page). Ignored by the other kinds.
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QuestionSummary {
    pub slug: String,
    pub title: String,
    pub category: Category,
    pub category_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_answer: Option<String>,
    pub last_updated: String,
}

impl From<&ContentRecord> for QuestionSummary {
    fn from(record: &ContentRecord) -> Self {
        Self {
            slug: record.key.clone(),
            title: record.title.clone(),
            category: record.category,
            category_label: record.category.label().to_string(),
            short_answer: record.short_answer().map(str::to_string),
            last_updated: record.last_updated.clone(),
        }
    }
}

pub fn summarize<'a>(records: impl IntoIterator<Item = &'a ContentRecord>) -> Vec<QuestionSummary> {
    records.into_iter().map(QuestionSummary::from).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GuideSummary {
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    /// Listed question slugs, including any that no longer resolve.
    pub question_count: usize,
}

impl From<&GuideRecord> for GuideSummary {
    fn from(guide: &GuideRecord) -> Self {
        Self {
            slug: guide.key.clone(),
            title: guide.title.clone(),
            subtitle: guide.subtitle.clone(),
            description: guide.description.clone(),
            question_count: guide.question_keys.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchQuestionsResponse {
    /// Matches before `limit` was applied.
    pub total: usize,
    pub results: Vec<QuestionSummary>,
}

/// A body section ready to render: text split into plain runs and links,
/// followed by the illustrations placed after it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SectionView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub segments: Vec<Segment>,
    pub illustrations: Vec<Illustration>,
}

/// Renderable body of `record`, one view per section in order.
pub fn section_views(record: &ContentRecord) -> Vec<SectionView> {
    record
        .sections
        .iter()
        .enumerate()
        .map(|(i, section)| SectionView {
            heading: section.heading.clone().filter(|h| !h.is_empty()),
            segments: inline_segments(&section.content),
            illustrations: record.illustrations_after(i).cloned().collect(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QuestionDetailResponse {
    pub question: ContentRecord,
    pub body: Vec<SectionView>,
    /// First guide that lists this question, if any.
    pub guide: Option<GuideSummary>,
    pub related: Vec<QuestionSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RelatedQuestionsResponse {
    pub slug: String,
    pub related: Vec<QuestionSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryInfo {
    pub slug: Category,
    pub label: String,
    pub heading: String,
    pub description: String,
    pub question_count: usize,
}

impl CategoryInfo {
    pub fn new(category: Category, question_count: usize) -> Self {
        let meta = category.meta();
        Self {
            slug: category,
            label: category.label().to_string(),
            heading: meta.heading.to_string(),
            description: meta.description.to_string(),
            question_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryListResponse {
    pub category: CategoryInfo,
    pub intro: String,
    pub questions: Vec<QuestionSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GuideListResponse {
    pub guides: Vec<GuideSummary>,
    /// Lead question of the first guide.
    pub featured: Option<QuestionSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GuideDetailResponse {
    pub guide: GuideSummary,
    /// 0-based position among all guides.
    pub position: usize,
    pub total_guides: usize,
    pub previous: GuideSummary,
    pub next: GuideSummary,
    /// Questions that resolve, in guide order.
    pub questions: Vec<QuestionSummary>,
    /// Colour bands and emphasis, indexed like `questions`.
    pub layout: ZonePlan,
}

impl GuideDetailResponse {
    /// `None` when no guide has this slug.
    pub fn build(catalog: &Catalog, slug: &str) -> Option<Self> {
        let guides = catalog.guides();
        let guide = guides.get(slug)?;
        let position = guides.position(slug)?;
        let (previous, next) = guides.neighbors(slug)?;
        let questions = catalog.guide_questions(slug);

        Some(Self {
            guide: GuideSummary::from(guide),
            position,
            total_guides: guides.all().len(),
            previous: GuideSummary::from(previous),
            next: GuideSummary::from(next),
            layout: derb_content::zones::plan(questions.len()),
            questions: summarize(questions),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TagCloudResponse {
    #[serde(flatten)]
    pub cloud: TagCloud,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecentQuestionsResponse {
    pub questions: Vec<QuestionSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StructuredDataResponse {
    pub kind: StructuredDataKind,
    /// JSON-LD document, ready to embed in a `<script type="application/ld+json">`.
    pub document: serde_json::Value,
}
