use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

use crate::inference::Sentiment;

/// Request body for sentiment analysis.
#[derive(Debug, Deserialize)]
pub struct TextInput {
    pub text: String,
}

/// Response returned after a successful analysis.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub sentiment: Sentiment,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// One stored analysis, as shown in a user's history.
#[derive(Debug, Serialize)]
pub struct SentimentHistoryItem {
    pub text: String,
    pub sentiment: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Admin aggregation view: identifier -> (text -> label).
pub type AllUsersSentiments = BTreeMap<String, BTreeMap<String, String>>;

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn analyze_response_shape() {
        let response = AnalyzeResponse {
            sentiment: Sentiment::Positive,
            timestamp: datetime!(2025-06-01 12:00:00 +5:30),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"sentiment\":\"POSITIVE\""));
        assert!(json.contains("+05:30"));
    }
}
