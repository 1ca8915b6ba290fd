//! Chart data sinks.
//!
//! Rendering happens elsewhere; the pipeline only hands over the data series
//! and where to put them.

use std::path::Path;

use async_trait::async_trait;
use serde::Serialize;

use tubemood_models::SentimentLabel;

use crate::error::PipelineResult;
use crate::keywords::WordFrequency;

pub const WORD_CLOUD_FILE: &str = "wordcloud.json";
pub const PIE_CHART_FILE: &str = "piechart.json";

/// Destination for chart data.
#[async_trait]
pub trait ChartSink: Send + Sync {
    async fn write_word_cloud(&self, freq: &WordFrequency, path: &Path) -> PipelineResult<()>;

    async fn write_pie_chart(
        &self,
        label_counts: &[(SentimentLabel, usize)],
        path: &Path,
    ) -> PipelineResult<()>;
}

#[derive(Debug, Serialize)]
struct WordWeight<'a> {
    text: &'a str,
    weight: usize,
}

#[derive(Debug, Serialize)]
struct PieSlice {
    label: SentimentLabel,
    value: usize,
}

/// Writes chart series as JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonChartSink;

impl JsonChartSink {
    async fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> PipelineResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(path, body).await?;
        Ok(())
    }
}

#[async_trait]
impl ChartSink for JsonChartSink {
    async fn write_word_cloud(&self, freq: &WordFrequency, path: &Path) -> PipelineResult<()> {
        let words: Vec<WordWeight<'_>> = freq
            .ranked()
            .into_iter()
            .map(|(text, weight)| WordWeight { text, weight })
            .collect();
        Self::write_json(&words, path).await
    }

    async fn write_pie_chart(
        &self,
        label_counts: &[(SentimentLabel, usize)],
        path: &Path,
    ) -> PipelineResult<()> {
        let slices: Vec<PieSlice> = label_counts
            .iter()
            .map(|&(label, value)| PieSlice { label, value })
            .collect();
        Self::write_json(&slices, path).await
    }
}
