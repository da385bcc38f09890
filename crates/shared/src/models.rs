//! Shared data models for the maicivy API and realtime analytics stream.

use serde::{Deserialize, Serialize};

// --- Common Definitions ---

/// `{ success, data }` envelope used by most `/api/v1/*` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

// --- Visitors ---

/// Per-session visit status as computed by the backend.
///
/// `has_access` is authoritative; the client mirrors it and never derives it
/// from `visit_count`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VisitorStatus {
    pub visit_count: u32,
    pub has_access: bool,
    pub remaining_visits: u32,
    pub session_id: String,
}

impl VisitorStatus {
    /// Status substituted when the backend cannot be reached at all.
    pub fn fail_open() -> Self {
        Self {
            visit_count: 0,
            has_access: true,
            remaining_visits: 0,
            session_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ProfileType {
    Recruiter,
    TechLead,
    Cto,
    Ceo,
    Developer,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetectedProfile {
    pub profile_type: ProfileType,
    pub confidence: f32,
    /// Whether the detected profile skips the visit gate server-side.
    #[serde(default)]
    pub bypass_enabled: bool,
}

// --- Realtime analytics ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RealtimeMessageKind {
    Heartbeat,
    InitialStats,
    Pong,
    Ping,
    #[serde(other)]
    Unknown,
}

impl RealtimeMessageKind {
    /// Kinds whose `data` payload, when present, replaces the displayed stats.
    pub fn carries_stats(self) -> bool {
        matches!(self, Self::Heartbeat | Self::InitialStats | Self::Pong)
    }
}

/// A JSON text frame on the `/ws/analytics` socket.
///
/// The server sends `RealtimeMessage<RealtimeStats>`. Receivers decode a
/// [`RawRealtimeMessage`] first so a payload of an unexpected shape never
/// fails the whole frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RealtimeMessage<D = RealtimeStats> {
    #[serde(rename = "type")]
    pub kind: RealtimeMessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<D>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Frame with its payload left undecoded.
pub type RawRealtimeMessage = RealtimeMessage<serde_json::Value>;

impl RealtimeMessage {
    pub fn ping() -> Self {
        Self {
            kind: RealtimeMessageKind::Ping,
            data: None,
            time: None,
        }
    }

    pub fn with_stats(kind: RealtimeMessageKind, stats: RealtimeStats) -> Self {
        Self {
            kind,
            data: Some(stats),
            time: None,
        }
    }
}

impl RawRealtimeMessage {
    /// Decode the stats payload. `None` when the kind carries no stats or
    /// the frame has no (or a null) `data`.
    pub fn stats(&self) -> Option<Result<RealtimeStats, serde_json::Error>> {
        if !self.kind.carries_stats() {
            return None;
        }
        match &self.data {
            None | Some(serde_json::Value::Null) => None,
            Some(data) => Some(RealtimeStats::deserialize(data)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RealtimeStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_visitors: Option<u64>,
    #[serde(default)]
    pub unique_today: u64,
    #[serde(default)]
    pub total_events: u64,
    #[serde(default)]
    pub letters_today: u64,
    /// Kept as sent: Unix seconds from the dev server, ISO-8601 text from
    /// other backends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<serde_json::Value>,
}

// --- Analytics ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    #[serde(default)]
    pub total_visits: u64,
    #[serde(default)]
    pub unique_visitors: u64,
    #[serde(default)]
    pub letters_generated: u64,
    #[serde(default)]
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemeViews {
    pub theme: String,
    pub views: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LetterStats {
    pub total: u64,
    pub motivation: u64,
    pub anti_motivation: u64,
}

// --- CV ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CvTheme {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CvExperience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub description: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CvSkill {
    pub name: String,
    pub level: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CvProject {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

/// A CV rendered for one theme.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CvDocument {
    pub theme: String,
    #[serde(default)]
    pub experiences: Vec<CvExperience>,
    #[serde(default)]
    pub skills: Vec<CvSkill>,
    #[serde(default)]
    pub projects: Vec<CvProject>,
}

// --- Letters ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LetterType {
    Motivation,
    AntiMotivation,
    Both,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LetterRequest {
    pub company_name: String,
    pub letter_type: LetterType,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedLetters {
    pub id: String,
    pub company_name: String,
    #[serde(default)]
    pub motivation: Option<String>,
    #[serde(default)]
    pub anti_motivation: Option<String>,
}

// --- GitHub ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GithubStatus {
    pub connected: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub last_sync: Option<String>,
    #[serde(default)]
    pub repos_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GithubRepo {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stars: u32,
}

// --- Timeline ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEvent {
    pub id: String,
    /// `experience`, `project`, `education`, ...
    pub category: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visitor_status_uses_camel_case() {
        let status: VisitorStatus = serde_json::from_str(
            r#"{"visitCount":3,"hasAccess":false,"remainingVisits":0,"sessionId":"s1"}"#,
        )
        .unwrap();
        assert_eq!(
            status,
            VisitorStatus {
                visit_count: 3,
                has_access: false,
                remaining_visits: 0,
                session_id: "s1".to_string(),
            }
        );
    }

    #[test]
    fn unknown_realtime_kind_is_accepted() {
        let msg: RawRealtimeMessage =
            serde_json::from_str(r#"{"type":"letter_generated","data":"Acme"}"#).unwrap();
        assert_eq!(msg.kind, RealtimeMessageKind::Unknown);
        assert!(msg.stats().is_none());
    }

    #[test]
    fn heartbeat_with_partial_stats() {
        let msg: RawRealtimeMessage = serde_json::from_str(
            r#"{"type":"heartbeat","data":{"current_visitors":7,"letters_today":2},"time":"12:00"}"#,
        )
        .unwrap();
        let data = msg.stats().unwrap().unwrap();
        assert_eq!(data.current_visitors, Some(7));
        assert_eq!(data.letters_today, 2);
        assert_eq!(data.unique_today, 0);
    }

    #[test]
    fn timestamp_accepts_text_or_seconds() {
        let text: RawRealtimeMessage = serde_json::from_str(
            r#"{"type":"heartbeat","data":{"current_visitors":3,"timestamp":"2025-01-01T00:00:00Z"}}"#,
        )
        .unwrap();
        let stats = text.stats().unwrap().unwrap();
        assert_eq!(stats.current_visitors, Some(3));
        assert_eq!(stats.timestamp, Some(serde_json::json!("2025-01-01T00:00:00Z")));

        let seconds: RealtimeMessage =
            serde_json::from_str(r#"{"type":"initial_stats","data":{"timestamp":1735689600}}"#)
                .unwrap();
        assert_eq!(
            seconds.data.and_then(|d| d.timestamp),
            Some(serde_json::json!(1735689600))
        );
    }

    #[test]
    fn pong_with_data_carries_stats() {
        let msg: RawRealtimeMessage =
            serde_json::from_str(r#"{"type":"pong","data":{"current_visitors":2}}"#).unwrap();
        assert_eq!(msg.stats().unwrap().unwrap().current_visitors, Some(2));

        let bare: RawRealtimeMessage = serde_json::from_str(r#"{"type":"pong"}"#).unwrap();
        assert!(bare.stats().is_none());
    }

    #[test]
    fn ping_serializes_without_data() {
        let json = serde_json::to_string(&RealtimeMessage::ping()).unwrap();
        assert_eq!(json, r#"{"type":"ping"}"#);
    }
}
