//! Shared API Types
//!
//! DTOs for the REST resources the console edits: research streams and
//! their configuration, generated reports, prompt workbench, and admin
//! records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Standard response envelope used by the backend
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiResponse<T: Default> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: T,
}

/// Workspace overview from GET /api/v1/overview
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OverviewStats {
    #[serde(default)]
    pub stream_count: usize,
    #[serde(default)]
    pub reports_this_week: usize,
    #[serde(default)]
    pub conversation_count: usize,
    #[serde(default)]
    pub active_generations: usize,
}

// ============================================================================
// Research Streams
// ============================================================================

/// Stream summary from GET /api/v1/streams
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StreamSummary {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub report_count: usize,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Full stream configuration, edited by the multi-tab stream editor
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct StreamConfig {
    #[serde(default)]
    pub semantic: SemanticSpace,
    #[serde(default)]
    pub retrieval: RetrievalStrategy,
    #[serde(default)]
    pub taxonomy: Taxonomy,
    #[serde(default)]
    pub prompts: EnrichmentPrompts,
}

/// Semantic space: what the stream is about
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct SemanticSpace {
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub seed_terms: Vec<String>,
    #[serde(default)]
    pub excluded_terms: Vec<String>,
    /// 0.0 = narrow, 1.0 = broad
    #[serde(default)]
    pub breadth: f32,
}

/// Retrieval strategy: how source material is gathered
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RetrievalStrategy {
    #[serde(default)]
    pub sources: Vec<SourceToggle>,
    #[serde(default)]
    pub query_expansion: bool,
    /// 0.0 = ignore recency, 1.0 = strongly prefer fresh material
    #[serde(default)]
    pub recency_weight: f32,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub cadence: String,
}

fn default_max_results() -> usize {
    50
}

impl Default for RetrievalStrategy {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            query_expansion: false,
            recency_weight: 0.5,
            max_results: default_max_results(),
            cadence: "daily".to_string(),
        }
    }
}

/// A retrieval source and whether it is enabled
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SourceToggle {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub enabled: bool,
}

/// Presentation taxonomy: ordered report sections
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Taxonomy {
    #[serde(default)]
    pub sections: Vec<TaxonomySection>,
}

/// One section of the report layout
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TaxonomySection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Per-section content-enrichment prompts
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct EnrichmentPrompts {
    #[serde(default)]
    pub entries: Vec<SectionPrompt>,
}

impl EnrichmentPrompts {
    /// Prompt text for a section, if one has been written.
    pub fn for_section(&self, section_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.section_id == section_id)
            .map(|e| e.prompt.as_str())
    }

    /// Insert or replace the prompt for a section.
    pub fn set(&mut self, section_id: &str, prompt: String) {
        match self.entries.iter_mut().find(|e| e.section_id == section_id) {
            Some(entry) => entry.prompt = prompt,
            None => self.entries.push(SectionPrompt {
                section_id: section_id.to_string(),
                prompt,
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SectionPrompt {
    pub section_id: String,
    pub prompt: String,
}

// ============================================================================
// Prompt Workbench
// ============================================================================

/// Server prompt defaults from GET /api/v1/prompts/defaults
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PromptDefaults {
    #[serde(default)]
    pub base_prompt: String,
    #[serde(default)]
    pub section_prompt: String,
}

/// Dry-run request for POST /api/v1/prompts/test
#[derive(Debug, Clone, Serialize)]
pub struct PromptTestRequest {
    pub prompt: String,
    pub section_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<Uuid>,
}

/// Dry-run result
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PromptTestResult {
    #[serde(default)]
    pub rendered: String,
    #[serde(default)]
    pub warnings: Vec<String>,
}

// ============================================================================
// Reports
// ============================================================================

/// Report summary from GET /api/v1/reports
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReportSummary {
    pub id: Uuid,
    pub stream_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub section_count: usize,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Paginated report listing
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReportsPage {
    #[serde(default)]
    pub reports: Vec<ReportSummary>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub per_page: usize,
}

/// Full report from GET /api/v1/reports/:id
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Report {
    pub id: Uuid,
    pub stream_id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sections: Vec<ReportSection>,
}

/// One rendered section of a report
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReportSection {
    pub title: String,
    #[serde(default)]
    pub body_markdown: String,
    #[serde(default)]
    pub source_count: usize,
}

// ============================================================================
// Admin
// ============================================================================

/// User record from GET /api/v1/admin/users
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
}

/// Feature flag from GET /api/v1/admin/flags
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FeatureFlag {
    pub key: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub enabled: bool,
}

/// Backend component health from GET /api/v1/admin/status
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ComponentStatus {
    pub component: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub detail: String,
}

// ============================================================================
// Server chat defaults (settings page)
// ============================================================================

/// Server-side chat configuration from /api/v1/config
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ChatDefaults {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub assistant_name: String,
    #[serde(default)]
    pub context_sharing_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_config_round_trip_defaults() {
        let parsed: StreamConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.retrieval.max_results, 50);
        assert_eq!(parsed.retrieval.cadence, "daily");
        assert!(parsed.taxonomy.sections.is_empty());

        let partial: StreamConfig =
            serde_json::from_str(r#"{"retrieval": {"query_expansion": true}}"#).unwrap();
        assert!(partial.retrieval.query_expansion);
        assert_eq!(partial.retrieval.max_results, 50);
    }

    #[test]
    fn test_enrichment_prompts_set_and_lookup() {
        let mut prompts = EnrichmentPrompts::default();
        assert!(prompts.for_section("overview").is_none());

        prompts.set("overview", "Summarize the week.".to_string());
        prompts.set("overview", "Summarize the month.".to_string());
        assert_eq!(prompts.entries.len(), 1);
        assert_eq!(prompts.for_section("overview"), Some("Summarize the month."));
    }

    #[test]
    fn test_report_section_defaults() {
        let section: ReportSection =
            serde_json::from_str(r#"{"title": "Highlights"}"#).unwrap();
        assert_eq!(section.title, "Highlights");
        assert_eq!(section.body_markdown, "");
        assert_eq!(section.source_count, 0);
    }
}
