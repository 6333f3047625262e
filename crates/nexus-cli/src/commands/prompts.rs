//! Inspect the analysis prompt templates

use anyhow::{Context, Result};
use nexus_core::prompts::{default_prompts_dir, PromptId, PromptLibrary, PromptSource};

pub fn cmd_prompts_list() -> Result<()> {
    let mut library = PromptLibrary::new();

    println!("{:<24} {:>7}  SOURCE", "PROMPT", "VERSION");
    for info in library.list() {
        let source = match &info.source {
            PromptSource::Embedded => info.source.label().to_string(),
            PromptSource::Override(path) => format!("{} ({})", info.source.label(), path.display()),
        };
        println!("{:<24} {:>7}  {}", info.id.as_str(), info.version, source);
    }

    if let Some(dir) = default_prompts_dir() {
        println!();
        println!("Drop <prompt>.md into {} to replace a template.", dir.display());
        println!("Keep the {{{{data_summary}}}} placeholder; the dataset digest is inserted there.");
    }

    Ok(())
}

/// Print one template with its frontmatter fields
pub fn cmd_prompts_show(prompt_id: &str) -> Result<()> {
    let Ok(id) = prompt_id.parse::<PromptId>() else {
        let known: Vec<&str> = PromptId::all().iter().map(|id| id.as_str()).collect();
        eprintln!("Unknown prompt '{}'. Known prompts: {}", prompt_id, known.join(", "));
        return Ok(());
    };

    let mut library = PromptLibrary::new();
    let prompt = library
        .get(id)
        .with_context(|| format!("Failed to load prompt {}", id.as_str()))?;

    println!("{} v{} [{}]", prompt.metadata.id, prompt.metadata.version, prompt.source.label());
    if let PromptSource::Override(path) = &prompt.source {
        println!("file: {}", path.display());
    }
    if !prompt.metadata.description.is_empty() {
        println!("{}", prompt.metadata.description);
    }
    println!();
    println!("{}", prompt.template);

    Ok(())
}

pub fn cmd_prompts_path() -> Result<()> {
    let dir = default_prompts_dir().context("No local data directory on this system")?;
    println!("{}", dir.display());
    if !dir.exists() {
        eprintln!("(not created yet)");
    }
    Ok(())
}
