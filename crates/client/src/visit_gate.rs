//! Visit-gate status resolver.
//!
//! Asks the backend whether the current session may see gated content,
//! retrying transient failures. When every attempt fails the gate opens
//! (see [`VisitorStatus::fail_open`]) and the error is reported alongside.

use maicivy_shared::{ApiError, VisitorStatus};

use crate::api_client::ApiClient;
use crate::backoff::RetryPolicy;

#[derive(Debug, Clone, PartialEq)]
pub struct GateState {
    pub status: Option<VisitorStatus>,
    pub error: Option<ApiError>,
    pub is_loading: bool,
}

impl Default for GateState {
    fn default() -> Self {
        Self::loading()
    }
}

impl GateState {
    pub fn loading() -> Self {
        Self {
            status: None,
            error: None,
            is_loading: true,
        }
    }

    /// Settled state for a finished check. Failure substitutes the fail-open
    /// status and keeps the error.
    pub fn settled(result: Result<VisitorStatus, ApiError>) -> Self {
        match result {
            Ok(status) => Self {
                status: Some(status),
                error: None,
                is_loading: false,
            },
            Err(error) => Self {
                status: Some(VisitorStatus::fail_open()),
                error: Some(error),
                is_loading: false,
            },
        }
    }

    /// Server-computed access flag; `false` until the first check settles.
    pub fn has_access(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.has_access)
    }
}

/// Check the visitor status, retrying per `policy`.
pub async fn check_with_retry(
    client: &ApiClient,
    policy: &RetryPolicy,
) -> Result<VisitorStatus, ApiError> {
    let mut failed = 0;
    loop {
        match client.check_visitor().await {
            Ok(status) => return Ok(status),
            Err(e) => {
                failed += 1;
                let Some(delay) = policy.delay_after(failed) else {
                    tracing::error!("Visitor check failed after {} attempts: {}", failed, e);
                    return Err(e);
                };
                tracing::warn!(
                    "Visitor check failed (attempt {}), retrying in {}ms: {}",
                    failed,
                    delay.as_millis(),
                    e
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Resolver bound to one API client and retry policy.
#[derive(Debug, Clone)]
pub struct VisitGate {
    client: ApiClient,
    policy: RetryPolicy,
}

impl VisitGate {
    pub fn new(client: ApiClient, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Run the check-with-retry sequence and return the state that replaces
    /// whatever was stored before. Refresh is another call to this.
    pub async fn resolve(&self) -> GateState {
        GateState::settled(check_with_retry(&self.client, &self.policy).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const CHECK: &str = "/api/v1/visitors/check";

    fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn three_failures_fail_open() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", CHECK)
            .with_status(500)
            .expect(3)
            .create_async()
            .await;

        let gate = VisitGate::new(ApiClient::new(server.url()), fast_retry());
        let state = gate.resolve().await;

        assert!(!state.is_loading);
        assert!(state.has_access());
        assert_eq!(state.status, Some(VisitorStatus::fail_open()));
        assert_eq!(state.status.as_ref().map(|s| s.visit_count), Some(0));
        assert_eq!(state.error.as_ref().and_then(ApiError::status), Some(500));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn success_is_stored_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", CHECK)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"visitCount":3,"hasAccess":false,"remainingVisits":0,"sessionId":"s1"}"#)
            .expect(1)
            .create_async()
            .await;

        let gate = VisitGate::new(ApiClient::new(server.url()), fast_retry());
        let state = gate.resolve().await;

        assert_eq!(
            state,
            GateState {
                status: Some(VisitorStatus {
                    visit_count: 3,
                    has_access: false,
                    remaining_visits: 0,
                    session_id: "s1".to_string(),
                }),
                error: None,
                is_loading: false,
            }
        );
        assert!(!state.has_access());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn refresh_clears_error_and_replaces_status() {
        let mut server = mockito::Server::new_async().await;
        let failing = server
            .mock("GET", CHECK)
            .with_status(503)
            .create_async()
            .await;

        let gate = VisitGate::new(ApiClient::new(server.url()), fast_retry());
        let first = gate.resolve().await;
        assert!(first.error.is_some());

        failing.remove_async().await;
        server
            .mock("GET", CHECK)
            .with_status(200)
            .with_body(r#"{"visitCount":1,"hasAccess":true,"remainingVisits":2,"sessionId":"abc"}"#)
            .create_async()
            .await;

        let refreshed = gate.resolve().await;
        assert_eq!(refreshed.error, None);
        assert_eq!(
            refreshed.status.map(|s| (s.visit_count, s.session_id)),
            Some((1, "abc".to_string()))
        );
    }

    #[tokio::test]
    async fn recovers_on_second_attempt() {
        let mut server = mockito::Server::new_async().await;
        let failing = server
            .mock("GET", CHECK)
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
        };
        let check = tokio::spawn(async move { check_with_retry(&client, &policy).await });

        // Swap the mock while the resolver sleeps before its retry
        tokio::time::sleep(Duration::from_millis(50)).await;
        failing.remove_async().await;
        server
            .mock("GET", CHECK)
            .with_status(200)
            .with_body(r#"{"visitCount":2,"hasAccess":true,"remainingVisits":1,"sessionId":"s2"}"#)
            .create_async()
            .await;

        let status = check.await.unwrap().unwrap();
        assert_eq!(status.visit_count, 2);
    }

    #[test]
    fn loading_state_grants_nothing_yet() {
        let state = GateState::default();
        assert!(state.is_loading);
        assert!(!state.has_access());
    }
}
