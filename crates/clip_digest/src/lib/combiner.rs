//! # Combiner
//!
//! Builds the prompt for the final combine pass that stitches partial
//! summaries into one output. The call itself goes through the ordinary
//! submit path, so it shares the rate limit and retry discipline with
//! chunk submissions.

const COMBINE_PROMPT: &str = include_str!("./llm/prompts/combine_0.txt");

/// Embeds the ordered partial summaries into a single merge instruction.
///
/// Parts appear in input order, each labeled with its position and the
/// total count; nothing is dropped or reordered. The instruction asks the
/// service to merge and format, not to re-summarize.
pub fn build_combine_prompt(summaries: &[String]) -> String {
    let total = summaries.len();
    let mut prompt = String::from(COMBINE_PROMPT.trim_end());

    for (i, summary) in summaries.iter().enumerate() {
        prompt.push_str(&format!("\n\n--- Part {} of {} ---\n", i + 1, total));
        prompt.push_str(summary);
    }

    prompt
}
