//! CV endpoints.

use maicivy_shared::{ApiEnvelope, ApiError, CvDocument, CvTheme, PATH_CV, PATH_CV_THEMES};

use crate::api_client::ApiClient;

impl ApiClient {
    /// CV rendered for `theme` (e.g. "backend", "fullstack").
    pub async fn cv(&self, theme: &str) -> Result<CvDocument, ApiError> {
        let path = format!("{}?theme={}", PATH_CV, urlencoding::encode(theme));
        self.get_json(&path).await
    }

    pub async fn cv_themes(&self) -> Result<Vec<CvTheme>, ApiError> {
        let envelope: ApiEnvelope<Vec<CvTheme>> = self.get_json(PATH_CV_THEMES).await?;
        Ok(envelope.data)
    }
}
