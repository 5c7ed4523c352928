use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Processing status of a submission as reported by the server.
///
/// The wire form is exactly `PENDING`, `COMPLETED` or `FAILED`; any other
/// spelling is rejected when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Still waiting for the AI response.
    Pending,
    /// The AI response is available.
    Completed,
    /// Processing failed server-side.
    Failed,
}

impl Status {
    /// Every status, in display order.
    pub const ALL: [Status; 3] = [Status::Pending, Status::Completed, Status::Failed];

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::Completed => "COMPLETED",
            Status::Failed => "FAILED",
        }
    }

    /// Parses the exact wire representation. Case matters.
    pub fn parse(raw: &str) -> Option<Self> {
        Status::ALL.into_iter().find(|status| status.as_str() == raw)
    }

    /// Human label used by filters and badges.
    pub fn label(self) -> &'static str {
        match self {
            Status::Pending => "Processing",
            Status::Completed => "Completed",
            Status::Failed => "Failed",
        }
    }

    /// `Pending` is the only non-terminal status.
    pub fn is_terminal(self) -> bool {
        match self {
            Status::Pending => false,
            Status::Completed | Status::Failed => true,
        }
    }

    /// Whether a submission may move from `self` to `next`.
    pub fn can_transition_to(self, next: Status) -> bool {
        matches!(
            (self, next),
            (Status::Pending, Status::Completed) | (Status::Pending, Status::Failed)
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A star rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Returns `None` outside `1..=5`.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Raw star count.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or_else(|| format!("rating must be between 1 and 5, got {value}"))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Full view of one submission, as returned to the reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Opaque server-assigned id.
    pub id: String,
    /// Star rating.
    pub rating: Rating,
    /// Review text as stored by the server.
    #[serde(rename = "review")]
    pub review_text: String,
    /// Processing status.
    pub status: Status,
    /// Creation time.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// AI reply, present once completed.
    #[serde(rename = "user_ai_response", default, skip_serializing_if = "Option::is_none")]
    pub ai_response: Option<String>,
    /// Reason shown to the reviewer when processing failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// One row of the admin listing. `review_text` may be truncated by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSubmissionSummary {
    /// Opaque server-assigned id.
    pub id: String,
    /// Star rating.
    pub rating: Rating,
    /// Review preview.
    #[serde(rename = "review_preview")]
    pub review_text: String,
    /// Processing status.
    pub status: Status,
    /// Creation time.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// AI-written summary for the admin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_summary: Option<String>,
    /// Ordered follow-up suggestions; `null` on the wire decodes as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recommended_actions: Vec<String>,
    /// Processing error, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AdminSubmissionSummary {
    /// First dash-separated segment of the id, used as a compact label.
    pub fn short_id(&self) -> &str {
        self.id.split('-').next().unwrap_or(&self.id)
    }
}

/// Response to a successful `submit_review`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Id to poll.
    pub submission_id: String,
    /// Status right after creation, normally `Pending`.
    #[serde(rename = "status")]
    pub initial_status: Status,
}

/// One page of the admin listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSubmissionPage {
    /// Rows on this page.
    pub items: Vec<AdminSubmissionSummary>,
    /// Number of rows matching the filters across all pages.
    pub total: u64,
    /// Page size the server applied.
    #[serde(default)]
    pub limit: u64,
    /// Offset the server applied.
    #[serde(default)]
    pub offset: u64,
}

/// Submission count for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// Day, `YYYY-MM-DD` on the wire.
    pub date: NaiveDate,
    /// Submissions created that day.
    pub count: u64,
}

/// Raw aggregate counts for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Count per star rating.
    #[serde(default)]
    pub counts_by_rating: BTreeMap<u8, u64>,
    /// Count per status.
    #[serde(default)]
    pub counts_by_status: BTreeMap<Status, u64>,
    /// Per-day counts over the trailing window, oldest first.
    #[serde(rename = "submissions_per_day", default)]
    pub counts_by_day: Vec<DailyCount>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses RFC 3339, or a naive ISO timestamp which is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp `{raw}`")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn status_wire_form_is_exact() {
        let parsed: Status = serde_json::from_str("\"COMPLETED\"").expect("decode status");
        assert_eq!(parsed, Status::Completed);
        assert!(serde_json::from_str::<Status>("\"completed\"").is_err());
        assert_eq!(Status::parse("FAILED"), Some(Status::Failed));
        assert_eq!(Status::parse("Failed"), None);
        assert_eq!(serde_json::to_string(&Status::Pending).expect("encode"), "\"PENDING\"");
    }

    #[test]
    fn only_pending_moves_forward() {
        assert!(Status::Pending.can_transition_to(Status::Completed));
        assert!(Status::Pending.can_transition_to(Status::Failed));
        assert!(!Status::Completed.can_transition_to(Status::Pending));
        assert!(!Status::Failed.can_transition_to(Status::Completed));
        assert!(!Status::Pending.can_transition_to(Status::Pending));
    }

    #[test]
    fn rating_rejects_out_of_range() {
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(6).is_none());
        assert_eq!(Rating::new(5).map(Rating::get), Some(5));
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn submission_accepts_naive_server_timestamp() {
        let body = r#"{
            "id": "4f1c2d3e-aaaa-bbbb-cccc-000000000001",
            "rating": 4,
            "review": "Quick delivery",
            "status": "COMPLETED",
            "created_at": "2024-05-01T10:15:30.123456",
            "user_ai_response": "Thanks for the kind words!"
        }"#;
        let submission: Submission = serde_json::from_str(body).expect("decode submission");
        assert_eq!(submission.rating.get(), 4);
        assert_eq!(submission.created_at.day(), 1);
        assert_eq!(submission.created_at.hour(), 10);
        assert_eq!(submission.ai_response.as_deref(), Some("Thanks for the kind words!"));
        assert!(submission.error_message.is_none());
    }

    #[test]
    fn rfc3339_timestamps_are_normalised_to_utc() {
        let parsed = parse_timestamp("2024-05-01T12:00:00+02:00").expect("parse");
        assert_eq!(parsed.hour(), 10);
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn admin_summary_treats_null_actions_as_empty() {
        let body = r#"{
            "id": "abc-def",
            "rating": 2,
            "review_preview": "Late again",
            "status": "FAILED",
            "created_at": "2024-05-01T10:15:30Z",
            "recommended_actions": null,
            "error_message": "LLM timeout"
        }"#;
        let summary: AdminSubmissionSummary = serde_json::from_str(body).expect("decode summary");
        assert!(summary.recommended_actions.is_empty());
        assert_eq!(summary.short_id(), "abc");
        assert!(summary.admin_summary.is_none());
    }

    #[test]
    fn analytics_snapshot_reads_string_keyed_maps() {
        let body = r#"{
            "counts_by_rating": {"1": 2, "5": 7},
            "counts_by_status": {"PENDING": 1, "COMPLETED": 8},
            "submissions_per_day": [{"date": "2024-05-01", "count": 3}]
        }"#;
        let snapshot: AnalyticsSnapshot = serde_json::from_str(body).expect("decode analytics");
        assert_eq!(snapshot.counts_by_rating.get(&5), Some(&7));
        assert_eq!(snapshot.counts_by_status.get(&Status::Completed), Some(&8));
        assert_eq!(snapshot.counts_by_day[0].count, 3);
    }
}
