#[cfg(feature = "llm")]
pub mod analyzer;
pub mod display;
pub mod history;
#[cfg(feature = "llm")]
pub mod llm;
pub mod model;
pub mod recommendations;
pub mod reply;
pub mod roles;
pub mod upload;

#[cfg(feature = "llm")]
pub use analyzer::Analyzer;
pub use model::{AnalysisResult, DisasterCategory};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("unsupported file type '{0}', expected an image (jpg or png)")]
    InvalidFileType(String),
    #[error("uploaded file is empty")]
    EmptyUpload,
    #[error("llm configuration error: {0}")]
    Config(String),
    #[error("llm request failed: {0}")]
    Request(String),
    #[error("llm returned status {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("invalid llm reply: {0}")]
    Parse(String),
}

impl AnalysisError {
    /// True for failures caused by the uploaded file rather than the model.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidFileType(_) | Self::EmptyUpload)
    }
}
