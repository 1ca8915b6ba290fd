//! Sentiment labels, per-comment results and aggregate statistics.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sentiment outcome for a single comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    /// The model answered, but with nothing we recognise (or the call failed)
    Unclassified,
}

impl SentimentLabel {
    /// Labels that have a named counter, in match priority order.
    pub const CATEGORIES: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the classifier made of one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Classification {
    pub label: SentimentLabel,

    /// Raw answer, sentinel, or error text when the label is `Unclassified`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Classification {
    pub fn labeled(label: SentimentLabel) -> Self {
        Self {
            label,
            detail: None,
        }
    }

    pub fn unclassified(detail: impl Into<String>) -> Self {
        Self {
            label: SentimentLabel::Unclassified,
            detail: Some(detail.into()),
        }
    }
}

/// Classification tied back to its position in the sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClassificationResult {
    /// Index into the sampled comment list
    pub index: usize,

    pub label: SentimentLabel,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ClassificationResult {
    pub fn new(index: usize, classification: Classification) -> Self {
        Self {
            index,
            label: classification.label,
            detail: classification.detail,
        }
    }
}

/// Label tallies over one batch.
///
/// `positive + negative + neutral <= total`; the remainder is the
/// unclassified/error count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AggregateStats {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub total: usize,
}

/// Whole-number percentages derived from [`AggregateStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SentimentPercentages {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl AggregateStats {
    /// Count one label.
    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Unclassified => {}
        }
        self.total += 1;
    }

    /// Entries that landed in no named bucket.
    pub fn unclassified(&self) -> usize {
        self.total - (self.positive + self.negative + self.neutral)
    }

    /// `floor(count * 100 / total)`, or 0 for an empty batch.
    pub fn percent(&self, count: usize) -> usize {
        if self.total == 0 {
            return 0;
        }
        count * 100 / self.total
    }

    pub fn percentages(&self) -> SentimentPercentages {
        SentimentPercentages {
            positive: self.percent(self.positive),
            negative: self.percent(self.negative),
            neutral: self.percent(self.neutral),
        }
    }

    /// Non-zero counts keyed by label name, for chart sinks.
    pub fn label_counts(&self) -> Vec<(SentimentLabel, usize)> {
        [
            (SentimentLabel::Positive, self.positive),
            (SentimentLabel::Negative, self.negative),
            (SentimentLabel::Neutral, self.neutral),
            (SentimentLabel::Unclassified, self.unclassified()),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect()
    }
}
