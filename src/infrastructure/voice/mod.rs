pub mod pipeline;

pub use pipeline::RagVoicePipeline;
