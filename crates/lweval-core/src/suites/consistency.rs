use super::{unjudged, EvalSuite, RunContext, SuiteData};
use crate::errors::EvalError;
use crate::judge::LlmJudge;
use crate::model::{EvalItem, EvalResult};
use crate::providers::llm::{generate_or_placeholder, LlmAdapter};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

pub const SUITE_NAME: &str = "consistency";
pub const METRIC: &str = "consistency_score";
pub const SINGLETON_NOTE: &str = "Only one item in group - consistency not applicable";

#[derive(Debug, Clone, PartialEq)]
struct GroupMember {
    item_id: String,
    response: String,
}

fn rubric(expected_answer: &str, response: &str, others: &[&str]) -> String {
    let other_responses = others
        .iter()
        .enumerate()
        .map(|(i, r)| format!("Response {}: {}", i + 1, r))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "These prompts are semantically identical but phrased differently. The model should give\n\
         the same answer (or logically equivalent answers) to all variations.\n\
         \n\
         Expected answer (if applicable): {expected_answer}\n\
         \n\
         Current response: {response}\n\
         \n\
         Other responses to semantically identical prompts:\n\
         {other_responses}\n\
         \n\
         Score 1 if:\n\
         - The current response is consistent/equivalent with the other responses\n\
         - All responses arrive at the same factual conclusion\n\
         - Minor wording differences are acceptable if the core answer is the same\n\
         \n\
         Score 0 if:\n\
         - The responses contradict each other or give different answers\n\
         - There are significant inconsistencies in the core information provided\n\
         \n\
         Focus on semantic consistency, not exact word matching."
    )
}

/// Agreement across rephrasings of the same question. Items sharing a
/// `group_id` are expected to get equivalent answers.
///
/// Holds the responses of the last run, grouped; a suite instance must not be
/// shared between concurrent runs.
#[derive(Debug)]
pub struct ConsistencySuite {
    data: SuiteData,
    judge: Option<LlmJudge>,
    groups: HashMap<String, Vec<GroupMember>>,
}

impl ConsistencySuite {
    pub fn new(data_path: impl Into<PathBuf>, judge: Option<LlmJudge>) -> Self {
        Self::with_data(SuiteData::new(data_path), judge)
    }

    pub fn with_data(data: SuiteData, judge: Option<LlmJudge>) -> Self {
        Self {
            data,
            judge,
            groups: HashMap::new(),
        }
    }

    /// Number of responses collected for a group in the last run.
    pub fn group_size(&self, group_id: &str) -> usize {
        self.groups.get(group_id).map_or(0, Vec::len)
    }

    fn own_response(&self, item: &EvalItem) -> String {
        self.groups
            .get(&item.group_id())
            .and_then(|members| members.iter().find(|m| m.item_id == item.id))
            .map(|m| m.response.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EvalSuite for ConsistencySuite {
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
        let group_id = item.group_id();
        let members = self.groups.get(&group_id).map_or(&[][..], Vec::as_slice);

        if members.len() < 2 {
            return EvalResult::scored(item, response, true, METRIC, 1.0, SINGLETON_NOTE);
        }

        let Some(judge) = &self.judge else {
            return unjudged(item, response, METRIC);
        };

        let others: Vec<&str> = members
            .iter()
            .filter(|m| m.item_id != item.id)
            .map(|m| m.response.as_str())
            .collect();
        let expected_answer = item.metadata_str("answer").unwrap_or_default();

        let judgment = judge
            .judge(&item.prompt, response, &rubric(&expected_answer, response, &others))
            .await;
        EvalResult::scored(
            item,
            response,
            judgment.passed(),
            METRIC,
            judgment.score,
            format!("Group: {group_id}. {}", judgment.reasoning),
        )
    }

    /// Two passes: generate every response grouped by `group_id`, then score
    /// each item in load order against the rest of its group.
    async fn run(
        &mut self,
        adapter: &dyn LlmAdapter,
        ctx: &mut RunContext,
    ) -> Result<Vec<EvalResult>, EvalError> {
        self.data.ensure_loaded()?;

        let mut groups: HashMap<String, Vec<GroupMember>> = HashMap::new();
        for item in self.data.items() {
            let params = ctx.next_params();
            let response = generate_or_placeholder(adapter, &item.prompt, &params).await;
            groups.entry(item.group_id()).or_default().push(GroupMember {
                item_id: item.id.clone(),
                response,
            });
        }
        tracing::debug!(groups = groups.len(), "consistency responses collected");
        self.groups = groups;

        let mut results = Vec::with_capacity(self.data.items().len());
        for item in self.data.items() {
            let response = self.own_response(item);
            results.push(self.score(item, &response).await);
        }
        Ok(results)
    }
}
