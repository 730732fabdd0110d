use crate::llm::{VisionModel, ANALYSIS_PROMPT};
use crate::model::{mock_result, AnalysisResult};
use crate::reply::parse_model_reply;
use crate::upload::{validate_image, ImageUpload};
use crate::AnalysisError;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

enum Mode {
    Mock { delay: Duration },
    Model(Arc<dyn VisionModel>),
}

/// Turns one uploaded image into an [`AnalysisResult`].
pub struct Analyzer {
    mode: Mode,
}

impl Analyzer {
    pub fn mock(delay: Duration) -> Self {
        Self {
            mode: Mode::Mock { delay },
        }
    }

    pub fn with_model(model: Arc<dyn VisionModel>) -> Self {
        Self {
            mode: Mode::Model(model),
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self.mode {
            Mode::Mock { .. } => "mock",
            Mode::Model(_) => "model",
        }
    }

    pub async fn analyze(&self, upload: &ImageUpload) -> Result<AnalysisResult, AnalysisError> {
        validate_image(upload)?;

        match &self.mode {
            Mode::Mock { delay } => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                Ok(mock_result(Utc::now()))
            }
            Mode::Model(model) => {
                let raw = model.describe(upload, ANALYSIS_PROMPT).await?;
                parse_model_reply(&raw, Utc::now()).inspect_err(|e| {
                    tracing::warn!(error = %e, reply = %raw, "unparsable llm reply");
                })
            }
        }
    }
}
