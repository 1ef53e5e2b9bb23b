//! MCP (Model Context Protocol) server implementation.
//!
//! This module exposes the dictionary analysis over the MCP protocol, making it
//! available to AI assistants via stdio transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It wraps the same core library that
//! the CLI commands use, and every `#[tool]` method delegates to a core library
//! function. Tools receive the entry dump as JSON text and never write files:
//! the hygiene tools return plans only.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use dialex_core::DictionaryEntry;
use dialex_core::hygiene::{self, LanguageAlias, default_language_aliases};
use dialex_core::search::search_prefix;
use dialex_core::source::{DumpFormat, parse_entries};
use dialex_core::stats::{DEFAULT_TOP_WORDS, compute_statistics};
use dialex_core::text::explain_example;

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `compute_statistics` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ComputeStatisticsParams {
    /// Entry dump as JSON: an array of entries or `{"data": [...]}`.
    pub entries: String,
    /// Length of the top-word lists.
    pub top: Option<usize>,
    /// Return every token list untruncated instead of the summary.
    #[serde(default)]
    pub full: bool,
}

/// Parameters for the `extract_dialect_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ExtractDialectTextParams {
    /// Example field text.
    pub text: String,
}

/// Parameters for the `search_words` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchWordsParams {
    /// Entry dump as JSON.
    pub entries: String,
    /// Headword prefix (case-insensitive, matched literally).
    pub prefix: String,
}

/// Parameters for the hygiene planning tools.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct PlanParams {
    /// Entry dump as JSON.
    pub entries: String,
}

/// MCP server exposing the dictionary analysis to AI assistants.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    max_input: Option<usize>,
    top_words: usize,
    language_aliases: Vec<LanguageAlias>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_router]
impl ProjectServer {
    /// Create a new MCP server instance with default settings.
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
            max_input: None,
            top_words: DEFAULT_TOP_WORDS,
            language_aliases: default_language_aliases(),
        }
    }

    /// Limit the size of entry dumps passed to tools.
    #[must_use]
    pub const fn with_max_input(mut self, max_input: Option<usize>) -> Self {
        self.max_input = max_input;
        self
    }

    /// Set the default length of the top-word lists.
    #[must_use]
    pub const fn with_top_words(mut self, top_words: usize) -> Self {
        self.top_words = top_words;
        self
    }

    /// Replace the language-name rewrite rules.
    #[must_use]
    pub fn with_language_aliases(mut self, aliases: Vec<LanguageAlias>) -> Self {
        self.language_aliases = aliases;
        self
    }

    /// Parse a dump passed as a tool argument.
    fn parse_dump(&self, text: &str) -> Result<Vec<DictionaryEntry>, McpError> {
        if let Some(max) = self.max_input
            && text.len() > max
        {
            return Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            ));
        }
        parse_entries(text, DumpFormat::Json)
            .map_err(|e| McpError::invalid_params(format!("invalid entries: {e}"), None))
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Compute per-language example coverage statistics.
    #[tool(
        description = "Compute per-language statistics of dictionary words used in examples and example words missing from the dictionary. Takes the entry dump as JSON."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn compute_statistics(
        &self,
        Parameters(params): Parameters<ComputeStatisticsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "compute_statistics", top = ?params.top, "executing MCP tool");

        let entries = self.parse_dump(&params.entries)?;
        let report = compute_statistics(&entries);
        let json = if params.full {
            to_json(&report)?
        } else {
            to_json(&report.summarize(params.top.unwrap_or(self.top_words)))?
        };

        tracing::info!(
            tool = "compute_statistics",
            languages = report.overall.total_languages,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Show how an example field is split and tokenized.
    #[tool(
        description = "Extract the dialect sentences of an example field and the tokens counted by the statistics."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn extract_dialect_text(
        &self,
        Parameters(params): Parameters<ExtractDialectTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "extract_dialect_text", "executing MCP tool");

        let breakdown = explain_example(&params.text);
        let json = to_json(&breakdown)?;

        tracing::info!(
            tool = "extract_dialect_text",
            tokens = breakdown.tokens.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Find entries by headword prefix.
    #[tool(description = "Find entries whose headword starts with a prefix, ignoring case.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", prefix = %params.prefix))]
    fn search_words(
        &self,
        Parameters(params): Parameters<SearchWordsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "search_words", "executing MCP tool");

        let entries = self.parse_dump(&params.entries)?;
        let found = search_prefix(&entries, &params.prefix)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let json = to_json(&found)?;

        tracing::info!(tool = "search_words", matches = found.len(), "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Plan the removal of full-stop duplicates.
    #[tool(
        description = "List entries that duplicate another entry except for a trailing period. Returns a plan; nothing is modified."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn plan_fullstop_cleanup(
        &self,
        Parameters(params): Parameters<PlanParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "plan_fullstop_cleanup", "executing MCP tool");

        let entries = self.parse_dump(&params.entries)?;
        let plan = hygiene::plan_fullstop_cleanup(&entries);
        let json = to_json(&plan)?;

        tracing::info!(
            tool = "plan_fullstop_cleanup",
            removals = plan.removals.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Plan the rewrite of language names to codes.
    #[tool(
        description = "List entries whose free-text language names would be rewritten to dialect codes. Returns a plan; nothing is modified."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn plan_language_fixes(
        &self,
        Parameters(params): Parameters<PlanParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "plan_language_fixes", "executing MCP tool");

        let entries = self.parse_dump(&params.entries)?;
        let plan = hygiene::plan_language_fixes(&entries, &self.language_aliases);
        let json = to_json(&plan)?;

        tracing::info!(
            tool = "plan_language_fixes",
            fixes = plan.fixes.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Pass the dictionary entry dump as JSON text to analyze example coverage, search headwords, or plan data cleanups.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
