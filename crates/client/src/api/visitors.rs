//! Visitor session endpoints.

use maicivy_shared::{ApiError, VisitorStatus, PATH_VISITORS_CHECK};

use crate::api_client::ApiClient;

impl ApiClient {
    /// Current session's visit status. Sets the session cookie on first call.
    pub async fn check_visitor(&self) -> Result<VisitorStatus, ApiError> {
        self.get_json(PATH_VISITORS_CHECK).await
    }
}
