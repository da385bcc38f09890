//! GitHub portfolio sync status.

use maicivy_shared::{
    ApiEnvelope, ApiError, GithubRepo, GithubStatus, PATH_GITHUB_REPOS, PATH_GITHUB_STATUS,
};

use crate::api_client::ApiClient;

impl ApiClient {
    pub async fn github_status(&self) -> Result<GithubStatus, ApiError> {
        self.get_json(PATH_GITHUB_STATUS).await
    }

    pub async fn github_repos(&self) -> Result<Vec<GithubRepo>, ApiError> {
        let envelope: ApiEnvelope<Vec<GithubRepo>> = self.get_json(PATH_GITHUB_REPOS).await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use crate::api_client::ApiClient;

    #[tokio::test]
    async fn status_decodes_with_missing_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/github/status")
            .with_status(200)
            .with_body(r#"{"connected":false}"#)
            .create_async()
            .await;

        let status = ApiClient::new(server.url()).github_status().await.unwrap();

        assert!(!status.connected);
        assert_eq!(status.username, None);
        assert_eq!(status.repos_count, 0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn repos_are_unwrapped_from_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/github/repos")
            .with_status(200)
            .with_body(
                r#"{"success":true,"data":[{"name":"maicivy","full_name":"me/maicivy","html_url":"https://github.com/me/maicivy","stars":4}]}"#,
            )
            .create_async()
            .await;

        let repos = ApiClient::new(server.url()).github_repos().await.unwrap();

        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].full_name, "me/maicivy");
        assert_eq!(repos[0].stars, 4);
        assert_eq!(repos[0].language, None);
        mock.assert_async().await;
    }
}
