use analysis_core::AnalysisError;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Message shown for every model or reply failure; details stay in the logs.
pub const GENERIC_ANALYSIS_ERROR: &str = "Analysis failed. Please try again.";
pub const INVALID_FILE_MESSAGE: &str = "Please upload an image file (jpg or png)";

#[derive(Debug)]
pub enum ApiError {
    Analysis(AnalysisError),
    BadRequest(String),
    /// The multipart body could not be read; keeps the extractor's status (413 over the limit).
    Upload { status: StatusCode, message: String },
    NotFound(String),
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::Upload {
            status: e.status(),
            message: e.body_text(),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        ApiError::Analysis(e)
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Analysis(AnalysisError::InvalidFileType(_)) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, INVALID_FILE_MESSAGE.into())
            }
            ApiError::Analysis(e @ AnalysisError::EmptyUpload) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Analysis(_) => (StatusCode::BAD_GATEWAY, GENERIC_ANALYSIS_ERROR.into()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Upload { status, message } => (*status, message.clone()),
            ApiError::NotFound(id) => (StatusCode::NOT_FOUND, format!("incident {id} not found")),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Analysis(e) if e.is_client_error() => {
                tracing::info!(error = %e, "rejected upload");
            }
            ApiError::Analysis(e) => tracing::error!(error = %e, "analysis failed"),
            ApiError::Upload { status, message } => {
                tracing::info!(status = status.as_u16(), error = %message, "unreadable upload");
            }
            _ => {}
        }
        let (status, message) = self.status_and_message();
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        let cases = [
            (
                ApiError::Analysis(AnalysisError::InvalidFileType("text/plain".into())),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (ApiError::Analysis(AnalysisError::EmptyUpload), StatusCode::BAD_REQUEST),
            (
                ApiError::Analysis(AnalysisError::Parse("bad".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (ApiError::NotFound("INC-9".into()), StatusCode::NOT_FOUND),
            (
                ApiError::Upload {
                    status: StatusCode::PAYLOAD_TOO_LARGE,
                    message: "length limit exceeded".into(),
                },
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_and_message().0, status);
        }
    }

    #[test]
    fn upstream_details_are_not_exposed() {
        let err = ApiError::Analysis(AnalysisError::Upstream {
            status: 401,
            body: "invalid api key sk-123".into(),
        });
        assert_eq!(err.status_and_message().1, GENERIC_ANALYSIS_ERROR);
    }
}
