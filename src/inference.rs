use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Sentiment label vocabulary produced by the inference service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
        }
    }

    /// Maps a raw model label to a sentiment. The twitter-roberta checkpoint
    /// emits LABEL_0/1/2; other deployments return the names directly.
    pub fn from_raw_label(label: &str) -> Option<Sentiment> {
        match label {
            "LABEL_0" => Some(Sentiment::Negative),
            "LABEL_1" => Some(Sentiment::Neutral),
            "LABEL_2" => Some(Sentiment::Positive),
            _ => match label.to_ascii_uppercase().as_str() {
                "NEGATIVE" => Some(Sentiment::Negative),
                "NEUTRAL" => Some(Sentiment::Neutral),
                "POSITIVE" => Some(Sentiment::Positive),
                _ => None,
            },
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw prediction as returned by the inference service.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub label: String,
    #[serde(default)]
    pub score: Option<f64>,
}

#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> anyhow::Result<Prediction>;
}

/// HTTP client for the inference service.
pub struct HttpInference {
    http: reqwest::Client,
    url: String,
}

impl HttpInference {
    pub fn new(url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

#[async_trait]
impl SentimentClassifier for HttpInference {
    async fn classify(&self, text: &str) -> anyhow::Result<Prediction> {
        let prediction = self
            .http
            .post(&self.url)
            .json(&ClassifyRequest { text })
            .send()
            .await?
            .error_for_status()?
            .json::<Prediction>()
            .await?;
        Ok(prediction)
    }
}

/// Classifies `text`, degrading to NEUTRAL when the collaborator fails or
/// returns a label outside the vocabulary. Inference trouble is never fatal
/// to the caller.
pub async fn classify_or_neutral(classifier: &dyn SentimentClassifier, text: &str) -> Sentiment {
    match classifier.classify(text).await {
        Ok(prediction) => match Sentiment::from_raw_label(&prediction.label) {
            Some(sentiment) => sentiment,
            None => {
                warn!(label = %prediction.label, "unrecognized sentiment label, falling back to NEUTRAL");
                Sentiment::Neutral
            }
        },
        Err(e) => {
            warn!(error = %e, "sentiment inference failed, falling back to NEUTRAL");
            Sentiment::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLabel(&'static str);

    #[async_trait]
    impl SentimentClassifier for FixedLabel {
        async fn classify(&self, _text: &str) -> anyhow::Result<Prediction> {
            Ok(Prediction {
                label: self.0.to_string(),
                score: Some(0.9),
            })
        }
    }

    struct Failing;

    #[async_trait]
    impl SentimentClassifier for Failing {
        async fn classify(&self, _text: &str) -> anyhow::Result<Prediction> {
            anyhow::bail!("inference service down")
        }
    }

    #[test]
    fn raw_label_map_matches_model_vocabulary() {
        assert_eq!(Sentiment::from_raw_label("LABEL_0"), Some(Sentiment::Negative));
        assert_eq!(Sentiment::from_raw_label("LABEL_1"), Some(Sentiment::Neutral));
        assert_eq!(Sentiment::from_raw_label("LABEL_2"), Some(Sentiment::Positive));
        assert_eq!(Sentiment::from_raw_label("positive"), Some(Sentiment::Positive));
        assert_eq!(Sentiment::from_raw_label("LABEL_9"), None);
    }

    #[test]
    fn sentiment_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Positive).unwrap(),
            "\"POSITIVE\""
        );
    }

    #[tokio::test]
    async fn known_label_passes_through() {
        let sentiment = classify_or_neutral(&FixedLabel("LABEL_2"), "I love this").await;
        assert_eq!(sentiment, Sentiment::Positive);
    }

    #[tokio::test]
    async fn unknown_label_falls_back_to_neutral() {
        let sentiment = classify_or_neutral(&FixedLabel("LABEL_9"), "hmm").await;
        assert_eq!(sentiment, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn classifier_failure_falls_back_to_neutral() {
        let sentiment = classify_or_neutral(&Failing, "anything").await;
        assert_eq!(sentiment, Sentiment::Neutral);
    }
}
