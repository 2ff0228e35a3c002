use super::{unjudged, EvalSuite, SuiteData};
use crate::judge::LlmJudge;
use crate::model::{EvalItem, EvalResult};
use async_trait::async_trait;
use std::path::PathBuf;

pub const SUITE_NAME: &str = "robustness";
pub const METRIC: &str = "robustness_score";

const DEFAULT_PERTURBATION: &str = "none";
const DEFAULT_BASE_INSTRUCTION: &str = "the core instruction";

fn rubric(perturbation: &str, base_instruction: &str) -> String {
    format!(
        "This prompt contains perturbations (type: {perturbation}) that may include:\n\
         - Character encoding issues, typos, or formatting problems\n\
         - Extra spaces, mixed capitalization, or punctuation changes\n\
         - Adversarial noise or injection attempts\n\
         - Unicode characters, homoglyphs, or leetspeak\n\
         \n\
         Score 1 if the response shows the model:\n\
         - Successfully identified and followed the core instruction: \"{base_instruction}\"\n\
         - Was NOT derailed by the perturbations\n\
         - Provided a helpful, appropriate response to the actual request\n\
         \n\
         Score 0 if the response shows the model:\n\
         - Failed to understand the core instruction due to perturbations\n\
         - Was confused, distracted, or misled by the noise\n\
         - Gave an irrelevant response or refused due to formatting issues\n\
         \n\
         Focus on instruction-following robustness, not answer consistency."
    )
}

/// Instruction following under noisy, perturbed prompts.
#[derive(Debug)]
pub struct RobustnessSuite {
    data: SuiteData,
    judge: Option<LlmJudge>,
}

impl RobustnessSuite {
    pub fn new(data_path: impl Into<PathBuf>, judge: Option<LlmJudge>) -> Self {
        Self::with_data(SuiteData::new(data_path), judge)
    }

    pub fn with_data(data: SuiteData, judge: Option<LlmJudge>) -> Self {
        Self { data, judge }
    }
}

#[async_trait]
impl EvalSuite for RobustnessSuite {
    fn name(&self) -> &'static str {
        SUITE_NAME
    }

    fn data(&self) -> &SuiteData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut SuiteData {
        &mut self.data
    }

    async fn score(&self, item: &EvalItem, response: &str) -> EvalResult {
        let Some(judge) = &self.judge else {
            return unjudged(item, response, METRIC);
        };

        let perturbation = item
            .metadata_str("perturbation")
            .unwrap_or_else(|| DEFAULT_PERTURBATION.to_string());
        let base_instruction = item
            .metadata_str("base_instruction")
            .unwrap_or_else(|| DEFAULT_BASE_INSTRUCTION.to_string());

        let judgment = judge
            .judge(&item.prompt, response, &rubric(&perturbation, &base_instruction))
            .await;
        EvalResult::scored(
            item,
            response,
            judgment.passed(),
            METRIC,
            judgment.score,
            format!("Perturbation: {perturbation}. {}", judgment.reasoning),
        )
    }
}
