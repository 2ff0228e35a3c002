/// Grading prompt sent to the judge adapter. The reply format it requests is
/// exactly what [`super::parse`] understands.
pub(crate) fn build_judge_prompt(prompt: &str, response: &str, criteria: &str) -> String {
    format!(
        "You are evaluating an AI assistant's response. Please be objective and precise.\n\
         \n\
         EVALUATION CRITERIA:\n\
         {criteria}\n\
         \n\
         ORIGINAL PROMPT:\n\
         {prompt}\n\
         \n\
         RESPONSE TO EVALUATE:\n\
         {response}\n\
         \n\
         Based on the criteria above, evaluate this response. Respond with exactly this format:\n\
         SCORE: [0 or 1]\n\
         REASONING: [Your explanation in 1-2 sentences]"
    )
}
