use std::str::FromStr;
use std::sync::Arc;

use docdelta_diff::{build_outline, DiffParser, OutlineOptions};
use docdelta_render::CmarkRenderer;
use docdelta_store::{list_versions, DiffStore, FsDiffStore};
use docdelta_types::{DiffResponse, VersionTag};
use docdelta_versions::{allowed_range, AllowedVersions};
use serde::{Deserialize, Serialize};

use crate::config::DocdeltaConfig;
use crate::error::{SdkError, SdkResult};

/// Which diff collection a request reads from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// One diff per version pair.
    #[default]
    Standard,
    /// Diffs covering several documents merged into one.
    Combined,
}

impl FromStr for DiffKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "combined" => Ok(Self::Combined),
            other => Err(format!("unknown diff type: {other}")),
        }
    }
}

/// A request for the comparison of two versions.
///
/// Missing versions default to the two newest: `source` to the second entry
/// of the version list and `target` to the first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRequest {
    pub source: Option<String>,
    pub target: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: DiffKind,
}

impl DiffRequest {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            target: Some(target.into()),
            kind: DiffKind::Standard,
        }
    }

    pub fn combined(mut self) -> Self {
        self.kind = DiffKind::Combined;
        self
    }
}

/// High-level docdelta API.
pub struct DocDelta {
    config: DocdeltaConfig,
    standard: Arc<dyn DiffStore>,
    combined: Arc<dyn DiffStore>,
    parser: DiffParser,
}

impl DocDelta {
    /// Build from configuration with filesystem stores.
    pub fn from_config(config: DocdeltaConfig) -> Self {
        let standard = Arc::new(FsDiffStore::new(config.diff_dir.clone()));
        let combined = Arc::new(FsDiffStore::new(config.combined_diff_dir.clone()));
        Self::with_stores(config, standard, combined)
    }

    /// Build from configuration with explicit stores.
    pub fn with_stores(config: DocdeltaConfig, standard: Arc<dyn DiffStore>, combined: Arc<dyn DiffStore>) -> Self {
        let renderer = Arc::new(CmarkRenderer::with_options(config.render.clone()));
        let parser = DiffParser::new(renderer).with_title_rules(config.title.clone());
        Self {
            config,
            standard,
            combined,
            parser,
        }
    }

    pub fn config(&self) -> &DocdeltaConfig {
        &self.config
    }

    pub fn parser(&self) -> &DiffParser {
        &self.parser
    }

    fn outline_options(&self) -> &OutlineOptions {
        &self.config.outline
    }

    fn store(&self, kind: DiffKind) -> &dyn DiffStore {
        match kind {
            DiffKind::Standard => self.standard.as_ref(),
            DiffKind::Combined => self.combined.as_ref(),
        }
    }

    // ---- Versions ----

    /// Known versions, newest first.
    pub fn versions(&self) -> SdkResult<Vec<VersionTag>> {
        Ok(list_versions(self.standard.as_ref(), self.config.document_version.as_deref())?)
    }

    /// Selectable versions on each side for the given selection.
    pub fn allowed_versions(&self, source: &str, target: &str) -> SdkResult<AllowedVersions> {
        let versions = self.versions()?;
        Ok(allowed_range(source, target, &versions)?)
    }

    // ---- Diffs ----

    /// Parse a diff text and build its outline.
    pub fn render(&self, text: &str) -> DiffResponse {
        let diff = self.parser.parse(text);
        let headings = build_outline(&diff, self.outline_options());
        DiffResponse::new(diff, headings)
    }

    /// Look up and parse the stored diff for `request`.
    pub fn try_diff(&self, request: &DiffRequest) -> SdkResult<DiffResponse> {
        let (source, target) = self.resolve(request)?;
        let text = self.store(request.kind).load(&source, &target)?;
        tracing::debug!(%source, %target, kind = ?request.kind, bytes = text.len(), "parsing stored diff");
        Ok(self.render(&text))
    }

    /// Like [`try_diff`](Self::try_diff), but any failure yields an empty
    /// response after being logged.
    pub fn diff(&self, request: &DiffRequest) -> DiffResponse {
        self.try_diff(request).unwrap_or_else(|e| {
            tracing::warn!(error = %e, ?request, "serving empty diff");
            DiffResponse::empty()
        })
    }

    /// Fill in missing request versions from the version list.
    pub fn resolve(&self, request: &DiffRequest) -> SdkResult<(String, String)> {
        if let (Some(source), Some(target)) = (&request.source, &request.target) {
            return Ok((source.clone(), target.clone()));
        }

        let versions = self.versions()?;
        let nth = |i: usize| versions.get(i).map(|v| v.name.clone()).ok_or(SdkError::NoVersions);
        let source = match &request.source {
            Some(s) => s.clone(),
            None => nth(1)?,
        };
        let target = match &request.target {
            Some(t) => t.clone(),
            None => nth(0)?,
        };
        Ok((source, target))
    }
}

impl std::fmt::Debug for DocDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocDelta")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
