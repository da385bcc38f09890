//! Career timeline.

use maicivy_shared::{ApiEnvelope, ApiError, TimelineEvent, PATH_TIMELINE};

use crate::api_client::ApiClient;

impl ApiClient {
    /// Timeline events, optionally restricted to one category.
    pub async fn timeline(&self, category: Option<&str>) -> Result<Vec<TimelineEvent>, ApiError> {
        let path = match category {
            Some(category) => format!("{}?category={}", PATH_TIMELINE, urlencoding::encode(category)),
            None => PATH_TIMELINE.to_string(),
        };
        let envelope: ApiEnvelope<Vec<TimelineEvent>> = self.get_json(&path).await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use crate::api_client::ApiClient;
    use mockito::Matcher;

    #[tokio::test]
    async fn category_is_url_encoded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/timeline")
            .match_query(Matcher::UrlEncoded("category".into(), "open source".into()))
            .with_status(200)
            .with_body(r#"{"success":true,"data":[]}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let events = client.timeline(Some("open source")).await.unwrap();

        assert!(events.is_empty());
        mock.assert_async().await;
    }
}
