use anyhow::{bail, Context, Result};
use log::warn;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use casemark::anchor_spec::collect_anchors;
use casemark::bookmark::AnchorStore;
use casemark::config::LabelConfig;
use casemark::pdf::PdfDocument;

use crate::commands::page_count;

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnchorsRequest {
    #[schemars(description = "Path to the PDF file supplying the page count")]
    #[serde(default)]
    pub path: Option<String>,
    #[schemars(description = "Page count, used when no PDF path is given")]
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[schemars(
        description = "Anchors as PAGE=CATEGORY[:VALUE], e.g. '1=index', '3=oa', '5=annexure:2', '9=custom:Reply', '12=vakalath'"
    )]
    pub anchors: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ApplyRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Output file path")]
    pub output: String,
    #[schemars(
        description = "Anchors as PAGE=CATEGORY[:VALUE], e.g. '1=index', '3=oa', '5=annexure:2'"
    )]
    pub anchors: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    tool_router: ToolRouter<Self>,
    config: LabelConfig,
}

impl PdfServer {
    pub fn new(config: LabelConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            config,
        }
    }

    fn store(&self, req: &AnchorsRequest) -> Result<AnchorStore> {
        let total_pages = page_count(req.path.as_deref().map(Path::new), req.total_pages)?;
        let anchors = collect_anchors(None, &req.anchors)?;
        Ok(AnchorStore::with_anchors(total_pages, anchors)?)
    }

    fn apply(&self, req: &ApplyRequest) -> Result<ApplyResult> {
        let anchors = collect_anchors(None, &req.anchors)?;
        if anchors.is_empty() {
            bail!("No anchors assigned; nothing to bookmark");
        }

        let mut doc = PdfDocument::open(&req.path)?;
        let store = AnchorStore::with_anchors(doc.page_count(), anchors)?;
        let outline = store.outline(&self.config)?;
        doc.set_outline(&outline)?;
        doc.save(&req.output)?;

        Ok(ApplyResult {
            output_path: req.output.clone(),
            bookmark_count: outline.len() as u32,
            page_count: store.total_pages(),
        })
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new(LabelConfig::default())
    }
}

fn respond<T: Serialize>(result: Result<T>) -> String {
    let json = result.and_then(|value| {
        serde_json::to_string_pretty(&value).context("Failed to serialize result")
    });
    match json {
        Ok(json) => json,
        Err(e) => {
            warn!("tool call failed: {:#}", e);
            format!("Error: {:#}", e)
        }
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Spread page anchors over the whole document and list the category of every page, marking which pages are anchors and which inherit from an earlier anchor")]
    fn bookmark_labels(&self, Parameters(req): Parameters<AnchorsRequest>) -> String {
        respond(self.store(&req).and_then(|store| {
            let labeling = store.labeling()?;
            Ok(labeling
                .iter()
                .map(|(&page, assignment)| PageLabelResult {
                    page,
                    label: assignment.resolve(&self.config),
                    anchor: store.is_anchor(page),
                })
                .collect::<Vec<_>>())
        }))
    }

    #[tool(description = "Summarize page coverage per category (page count, first and last page) and overall anchor progress")]
    fn bookmark_summary(&self, Parameters(req): Parameters<AnchorsRequest>) -> String {
        respond(self.store(&req).and_then(|store| {
            let summary = store.summary(&self.config)?;
            let progress = store.progress()?;
            Ok(SummaryResult {
                categories: summary
                    .iter()
                    .map(|c| CoverageResult {
                        label: c.label.clone(),
                        count: c.count as u32,
                        first: c.first,
                        last: c.last,
                    })
                    .collect(),
                anchors: progress.anchors as u32,
                covered_pages: progress.covered as u32,
                total_pages: progress.total_pages,
                percent: progress.percent(),
            })
        }))
    }

    #[tool(description = "Compute the bookmark outline (title and target page per category) without writing any file")]
    fn bookmark_outline(&self, Parameters(req): Parameters<AnchorsRequest>) -> String {
        respond(self.store(&req).and_then(|store| {
            Ok(store
                .outline(&self.config)?
                .into_iter()
                .map(|e| TocEntryResult {
                    title: e.title,
                    page: Some(e.page),
                    depth: e.depth,
                })
                .collect::<Vec<_>>())
        }))
    }

    #[tool(description = "Write the bookmark outline into a copy of a PDF, replacing any bookmarks it already has")]
    fn bookmark_apply(&self, Parameters(req): Parameters<ApplyRequest>) -> String {
        respond(self.apply(&req))
    }

    #[tool(description = "Get the bookmarks (outline) a PDF already has")]
    fn pdf_toc(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        respond(PdfDocument::open(&path).and_then(|doc| {
            Ok(doc
                .outline()?
                .into_iter()
                .map(|item| TocEntryResult {
                    title: item.title,
                    page: item.page,
                    depth: item.depth,
                })
                .collect::<Vec<_>>())
        }))
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PageLabelResult {
    pub page: u32,
    pub label: String,
    pub anchor: bool,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CoverageResult {
    pub label: String,
    pub count: u32,
    pub first: u32,
    pub last: u32,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SummaryResult {
    pub categories: Vec<CoverageResult>,
    pub anchors: u32,
    pub covered_pages: u32,
    pub total_pages: u32,
    pub percent: f64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TocEntryResult {
    pub title: String,
    pub page: Option<u32>,
    pub depth: u32,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ApplyResult {
    pub output_path: String,
    pub bookmark_count: u32,
    pub page_count: u32,
}

#[tool_handler]
impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Case-file bookmarking tools. Tag a few pages with categories (index, oa, \
                 annexure:N, vakalath, custom:NAME); each tag carries forward to the next one. \
                 Use bookmark_labels to see every page's category, bookmark_summary for \
                 coverage, bookmark_outline to preview bookmarks, bookmark_apply to write them \
                 into a PDF, and pdf_toc to read a PDF's existing bookmarks."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server(config: LabelConfig) -> Result<()> {
    let server = PdfServer::new(config);

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
