pub mod error;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod settings;
