//! Insight request flow: table → digest → prompt → model → history

use std::sync::{Arc, RwLock};

use tracing::info;

use crate::ai::{InsightBackend, InsightClient, InsightOutcome};
use crate::digest::DataDigest;
use crate::error::{Error, Result};
use crate::models::DataTable;
use crate::prompts::{PromptId, PromptLibrary};
use crate::session::{AnalysisRecord, SessionHistory};

/// Runs insight requests against a backend using the prompt library
#[derive(Clone)]
pub struct Analyst {
    client: InsightClient,
    prompts: Arc<RwLock<PromptLibrary>>,
}

impl Analyst {
    pub fn new(client: InsightClient, prompts: PromptLibrary) -> Self {
        Self {
            client,
            prompts: Arc::new(RwLock::new(prompts)),
        }
    }

    pub fn client(&self) -> &InsightClient {
        &self.client
    }

    /// Render the analysis prompt for a digest
    pub fn build_prompt(&self, digest: &DataDigest) -> Result<String> {
        let summary = digest.render();
        let mut prompts = self
            .prompts
            .write()
            .map_err(|_| Error::Config("Failed to acquire prompt library lock".into()))?;
        let template = prompts.get(PromptId::AnalyzeEnvironment)?;
        Ok(template.fill(&summary))
    }

    /// Digest the table and ask the model about it.
    ///
    /// Only prompt loading can fail; problems talking to the model come back
    /// as a failed outcome.
    pub async fn request_insight(&self, table: &DataTable) -> Result<InsightOutcome> {
        let digest = DataDigest::from_table(table);
        let prompt = self.build_prompt(&digest)?;
        let outcome = self.client.generate_insight(&prompt).await;

        info!(
            backend = self.client.backend_name(),
            model = self.client.model(),
            status = %outcome.status(),
            "Insight request finished"
        );

        Ok(outcome)
    }

    /// Request an insight and append the result to `history`
    pub async fn analyze<'h>(
        &self,
        table: &DataTable,
        history: &'h mut SessionHistory,
    ) -> Result<&'h AnalysisRecord> {
        let outcome = self.request_insight(table).await?;
        Ok(history.append(&outcome))
    }
}
