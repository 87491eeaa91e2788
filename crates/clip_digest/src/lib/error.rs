use crate::llm::summarizer::LlmError;

/// Terminal outcome of a summarization job.
///
/// Rate limits and transient faults never surface here; they are absorbed
/// by the retry loop unless the attempt budget runs out.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("no text to summarize")]
    EmptyInput,
    #[error("summarization of chunk {index} failed after {attempts} attempt(s)")]
    ChunkFailed {
        index: usize,
        attempts: u32,
        #[source]
        source: LlmError,
    },
    #[error("combining partial summaries failed after {attempts} attempt(s)")]
    CombineFailed {
        attempts: u32,
        #[source]
        source: LlmError,
    },
    #[error("summarization cancelled")]
    Cancelled,
}
