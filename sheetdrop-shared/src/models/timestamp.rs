//! Timestamps that survive JSON round trips.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use yew::{Html, ToHtml, html};

/// UTC instant serialized as an RFC 3339 string.
///
/// Local storage only holds strings, so dates survive a reload as text and
/// come back through serde as a real `DateTime` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// The current instant.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl ToHtml for Timestamp {
    fn to_html(&self) -> Html {
        html! { self.0.format("%Y-%m-%d %H:%M").to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_timestamp_formatting() {
        let dt = Utc.with_ymd_and_hms(2025, 3, 8, 14, 30, 0).unwrap();
        let timestamp = Timestamp(dt);

        assert_eq!(timestamp.to_html(), html! { "2025-03-08 14:30" });
    }

    #[test]
    fn test_timestamp_serialization() {
        let dt = Utc.with_ymd_and_hms(2025, 3, 8, 14, 30, 0).unwrap();
        let serialized = serde_json::to_string(&Timestamp(dt)).unwrap();

        assert_eq!(serialized, "\"2025-03-08T14:30:00Z\"");
    }

    #[test]
    fn test_timestamp_round_trip() {
        let original = Timestamp(Utc.with_ymd_and_hms(2024, 12, 1, 8, 0, 5).unwrap());
        let json = serde_json::to_string(&original).unwrap();
        let restored: Timestamp = serde_json::from_str(&json).unwrap();

        assert_eq!(original, restored);
    }

    #[test]
    fn test_timestamp_ordering() {
        let earlier = Timestamp(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let later = Timestamp(Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap());

        assert!(earlier < later);
    }
}
