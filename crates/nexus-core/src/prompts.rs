//! Analysis prompt templates
//!
//! Each template is a markdown file with YAML frontmatter. A file named
//! `<id>.md` in the overrides directory (~/.local/share/nexus/prompts/overrides/)
//! replaces the copy compiled into the binary, so the wording sent to the
//! model can be tuned without rebuilding.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Placeholder replaced by the rendered dataset digest
pub const SUMMARY_PLACEHOLDER: &str = "{{data_summary}}";

const FRONTMATTER_FENCE: &str = "---";

/// Known prompt IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptId {
    /// Narrative insight over a dataset digest
    AnalyzeEnvironment,
}

impl PromptId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnalyzeEnvironment => "analyze_environment",
        }
    }

    pub fn all() -> &'static [PromptId] {
        &[Self::AnalyzeEnvironment]
    }

    fn embedded(&self) -> &'static str {
        match self {
            Self::AnalyzeEnvironment => include_str!("../../../prompts/analyze_environment.md"),
        }
    }

    fn file_name(&self) -> String {
        format!("{}.md", self.as_str())
    }
}

impl std::str::FromStr for PromptId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|id| id.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown prompt: {}", s))
    }
}

/// Frontmatter fields
#[derive(Debug, Clone, Deserialize)]
pub struct PromptMetadata {
    pub id: String,
    pub version: u32,
    #[serde(default)]
    pub description: String,
}

/// Where a template was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    Embedded,
    Override(PathBuf),
}

impl PromptSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Embedded => "embedded",
            Self::Override(_) => "override",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Prompt {
    pub metadata: PromptMetadata,
    pub template: String,
    pub source: PromptSource,
}

impl Prompt {
    /// Substitute the dataset digest into the template
    pub fn fill(&self, data_summary: &str) -> String {
        self.template.replace(SUMMARY_PLACEHOLDER, data_summary)
    }
}

/// Short description of one template, as shown by `prompts list`
#[derive(Debug, Clone)]
pub struct PromptInfo {
    pub id: PromptId,
    pub version: u32,
    pub source: PromptSource,
}

/// Loads templates once and keeps them for the life of the process
pub struct PromptLibrary {
    overrides: Option<PathBuf>,
    loaded: HashMap<PromptId, Prompt>,
}

impl PromptLibrary {
    /// Library reading overrides from the default data directory
    pub fn new() -> Self {
        Self::with_overrides(default_prompts_dir())
    }

    /// Library that only uses the compiled-in templates
    pub fn embedded_only() -> Self {
        Self::with_overrides(None)
    }

    pub fn with_overrides(dir: Option<PathBuf>) -> Self {
        Self {
            overrides: dir,
            loaded: HashMap::new(),
        }
    }

    pub fn get(&mut self, id: PromptId) -> Result<&Prompt> {
        if !self.loaded.contains_key(&id) {
            let prompt = self.read(id)?;
            self.loaded.insert(id, prompt);
        }
        self.loaded
            .get(&id)
            .ok_or_else(|| Error::NotFound(format!("prompt {}", id.as_str())))
    }

    pub fn list(&mut self) -> Vec<PromptInfo> {
        PromptId::all()
            .iter()
            .map(|&id| match self.get(id).map(|p| (p.metadata.version, p.source.clone())) {
                Ok((version, source)) => PromptInfo {
                    id,
                    version,
                    source,
                },
                Err(e) => {
                    debug!(prompt = id.as_str(), error = %e, "Prompt failed to load");
                    PromptInfo {
                        id,
                        version: 0,
                        source: self
                            .override_file(id)
                            .map_or(PromptSource::Embedded, PromptSource::Override),
                    }
                }
            })
            .collect()
    }

    fn override_file(&self, id: PromptId) -> Option<PathBuf> {
        self.overrides
            .as_deref()
            .map(|dir| dir.join(id.file_name()))
            .filter(|path| path.exists())
    }

    fn read(&self, id: PromptId) -> Result<Prompt> {
        let Some(path) = self.override_file(id) else {
            return parse_prompt(id.embedded(), PromptSource::Embedded);
        };

        debug!(prompt = id.as_str(), path = %path.display(), "Using prompt override");
        let content = read_override(&path)?;
        parse_prompt(&content, PromptSource::Override(path))
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Directory searched for template overrides
pub fn default_prompts_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("nexus").join("prompts").join("overrides"))
}

fn read_override(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read prompt override {}: {}",
            path.display(),
            e
        ))
    })
}

/// Split frontmatter from the template body and check the placeholder is kept
fn parse_prompt(content: &str, source: PromptSource) -> Result<Prompt> {
    let rest = content
        .trim_start()
        .strip_prefix(FRONTMATTER_FENCE)
        .ok_or_else(|| Error::Config("Prompt must start with YAML frontmatter (---)".into()))?;

    let (frontmatter, body) = rest.split_once(FRONTMATTER_FENCE).ok_or_else(|| {
        Error::Config("Prompt frontmatter not closed (missing second ---)".into())
    })?;

    let metadata: PromptMetadata = serde_yaml::from_str(frontmatter)
        .map_err(|e| Error::Config(format!("Invalid prompt frontmatter: {}", e)))?;

    let template = body.trim().to_string();
    if !template.contains(SUMMARY_PLACEHOLDER) {
        return Err(Error::Config(format!(
            "Prompt '{}' never uses {}",
            metadata.id, SUMMARY_PLACEHOLDER
        )));
    }

    Ok(Prompt {
        metadata,
        template,
        source,
    })
}
