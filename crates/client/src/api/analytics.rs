//! Public analytics dashboard endpoints.

use maicivy_shared::{
    AnalyticsStats, ApiEnvelope, ApiError, LetterStats, RealtimeStats, ThemeViews,
    PATH_ANALYTICS_LETTERS, PATH_ANALYTICS_REALTIME, PATH_ANALYTICS_STATS, PATH_ANALYTICS_THEMES,
};

use crate::api_client::ApiClient;

impl ApiClient {
    pub async fn analytics_stats(&self) -> Result<AnalyticsStats, ApiError> {
        self.get_json(PATH_ANALYTICS_STATS).await
    }

    /// Point-in-time snapshot of the counters the realtime socket streams.
    pub async fn realtime_stats(&self) -> Result<RealtimeStats, ApiError> {
        let envelope: ApiEnvelope<RealtimeStats> = self.get_json(PATH_ANALYTICS_REALTIME).await?;
        Ok(envelope.data)
    }

    /// Views per CV theme, most viewed first as returned by the backend.
    pub async fn theme_views(&self) -> Result<Vec<ThemeViews>, ApiError> {
        let envelope: ApiEnvelope<Vec<ThemeViews>> = self.get_json(PATH_ANALYTICS_THEMES).await?;
        Ok(envelope.data)
    }

    pub async fn letter_stats(&self) -> Result<LetterStats, ApiError> {
        let envelope: ApiEnvelope<LetterStats> = self.get_json(PATH_ANALYTICS_LETTERS).await?;
        Ok(envelope.data)
    }
}
