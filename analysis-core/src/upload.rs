use crate::AnalysisError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

#[derive(Clone, Debug)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime(), self.to_base64())
    }

    fn mime(&self) -> String {
        self.content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }
}

pub fn is_image_mime(content_type: &str) -> bool {
    content_type
        .trim()
        .to_ascii_lowercase()
        .strip_prefix("image/")
        .is_some_and(|sub| !sub.is_empty())
}

pub fn validate_image(upload: &ImageUpload) -> Result<(), AnalysisError> {
    if !is_image_mime(&upload.content_type) {
        return Err(AnalysisError::InvalidFileType(upload.content_type.clone()));
    }
    if upload.bytes.is_empty() {
        return Err(AnalysisError::EmptyUpload);
    }
    Ok(())
}
