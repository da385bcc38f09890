//! Visitor profile detection.

use maicivy_shared::{ApiError, DetectedProfile, PATH_PROFILE_DETECT};

use crate::api_client::ApiClient;

impl ApiClient {
    pub async fn detect_profile(&self) -> Result<DetectedProfile, ApiError> {
        self.get_json(PATH_PROFILE_DETECT).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api_client::ApiClient;
    use maicivy_shared::ProfileType;

    #[tokio::test]
    async fn detected_profile_uses_camel_case() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/profile/detect")
            .with_status(200)
            .with_body(r#"{"profileType":"techLead","confidence":0.75,"bypassEnabled":true}"#)
            .create_async()
            .await;

        let profile = ApiClient::new(server.url()).detect_profile().await.unwrap();

        assert_eq!(profile.profile_type, ProfileType::TechLead);
        assert_eq!(profile.confidence, 0.75);
        assert!(profile.bypass_enabled);
        mock.assert_async().await;
    }
}
