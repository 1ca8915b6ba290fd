//! End-to-end analysis of one video's comments.

use std::sync::Arc;

use chrono::Utc;
use tracing::Instrument;

use tubemood_models::{
    AnalysisId, AnalysisReport, ChartPaths, Insight, SentimentLabel, VideoId, VideoMeta,
};

use crate::aggregate::aggregate;
use crate::charts::{ChartSink, PIE_CHART_FILE, WORD_CLOUD_FILE};
use crate::config::PipelineConfig;
use crate::coordinator::classify_all;
use crate::error::PipelineResult;
use crate::keywords::{extract, top_n, WordFrequency};
use crate::logging::RequestLogger;
use crate::metrics;
use crate::sampler::sample;
use crate::traits::{CommentSource, InsightSummarizer, SentimentClassifier};

/// Which video to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSelector {
    /// A video URL or bare ID supplied by the caller
    Explicit(String),
    /// Any currently trending video
    RandomTrending,
}

/// Runs the comment pipeline against its collaborators.
#[derive(Clone)]
pub struct CommentAnalyzer {
    source: Arc<dyn CommentSource>,
    classifier: Arc<dyn SentimentClassifier>,
    summarizer: Arc<dyn InsightSummarizer>,
    charts: Arc<dyn ChartSink>,
    config: PipelineConfig,
}

impl CommentAnalyzer {
    pub fn new(
        source: Arc<dyn CommentSource>,
        classifier: Arc<dyn SentimentClassifier>,
        summarizer: Arc<dyn InsightSummarizer>,
        charts: Arc<dyn ChartSink>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source,
            classifier,
            summarizer,
            charts,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Model the classifier will use next.
    pub fn model_name(&self) -> String {
        self.classifier.model_name()
    }

    /// Resolve, fetch, sample, classify and summarize.
    ///
    /// Bad input and ingestion failures abort the run. A failed summary is
    /// reported in [`AnalysisReport::insight`] instead.
    pub async fn analyze(
        &self,
        selector: VideoSelector,
        analysis_id: AnalysisId,
    ) -> PipelineResult<AnalysisReport> {
        let video_id = self.resolve(selector).await.inspect_err(|e| {
            metrics::record_analysis(if e.is_validation() { "rejected" } else { "failed" });
        })?;

        let logger = RequestLogger::new(&analysis_id, video_id.as_str());
        let span = logger.create_span();

        let result = self
            .run(&video_id, analysis_id, &logger)
            .instrument(span)
            .await;

        match &result {
            Ok(_) => metrics::record_analysis("completed"),
            Err(e) => {
                logger.log_error(&e.to_string());
                metrics::record_analysis("failed");
            }
        }
        result
    }

    async fn resolve(&self, selector: VideoSelector) -> PipelineResult<VideoId> {
        match selector {
            VideoSelector::Explicit(input) => Ok(VideoId::parse(&input)?),
            VideoSelector::RandomTrending => self.source.random_trending_video_id().await,
        }
    }

    async fn run(
        &self,
        video_id: &VideoId,
        analysis_id: AnalysisId,
        logger: &RequestLogger,
    ) -> PipelineResult<AnalysisReport> {
        let meta = self.fetch_meta(video_id, logger).await;

        logger.log_start("fetching comments");
        let fetched = self
            .source
            .fetch_comments(video_id, self.config.max_fetch)
            .await?;
        let fetched_count = fetched.len();
        metrics::record_comments_fetched(fetched_count);

        let comments = sample(fetched, self.config.max_sample);
        logger.log_progress(&format!(
            "sampled {} of {} comments",
            comments.len(),
            fetched_count
        ));

        let results = classify_all(
            Arc::clone(&self.classifier),
            &comments,
            self.config.max_concurrency,
        )
        .await;

        let stats = aggregate(&results);
        let sentiments = results.iter().map(|r| r.label).collect();
        logger.log_progress(&format!(
            "classified {} comments ({} unclassified)",
            stats.total,
            stats.unclassified()
        ));

        let freq = extract(comments.iter().map(|c| c.text.as_str()));
        let top_keywords = top_n(&freq, self.config.top_keywords);

        let charts = self.write_charts(&freq, &stats.label_counts(), logger).await;
        let insight = self.summarize(&top_keywords, logger).await;

        let report = AnalysisReport {
            analysis_id,
            video_id: video_id.clone(),
            video: meta,
            fetched_count,
            comments,
            sentiments,
            stats,
            percentages: stats.percentages(),
            top_keywords,
            insight,
            charts,
            model: self.classifier.model_name(),
            analyzed_at: Utc::now(),
        };

        logger.log_completion(&format!(
            "{}% positive, {}% negative, {}% neutral",
            report.percentages.positive, report.percentages.negative, report.percentages.neutral
        ));
        Ok(report)
    }

    async fn fetch_meta(&self, video_id: &VideoId, logger: &RequestLogger) -> Option<VideoMeta> {
        match self.source.fetch_video_meta(video_id).await {
            Ok(meta) => Some(meta),
            Err(e) => {
                logger.log_warning(&format!("video metadata unavailable: {}", e));
                None
            }
        }
    }

    async fn summarize(&self, keywords: &[String], logger: &RequestLogger) -> Insight {
        match self.summarizer.summarize(keywords).await {
            Ok(text) => Insight::Ready { text },
            Err(e) => {
                metrics::record_summarization_failure();
                logger.log_warning(&format!("summary failed: {}", e));
                Insight::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn write_charts(
        &self,
        freq: &WordFrequency,
        label_counts: &[(SentimentLabel, usize)],
        logger: &RequestLogger,
    ) -> ChartPaths {
        let word_cloud_path = self.config.chart_dir.join(WORD_CLOUD_FILE);
        let pie_chart_path = self.config.chart_dir.join(PIE_CHART_FILE);

        let mut paths = ChartPaths::default();
        match self.charts.write_word_cloud(freq, &word_cloud_path).await {
            Ok(()) => paths.word_cloud = Some(word_cloud_path.display().to_string()),
            Err(e) => logger.log_warning(&format!("word cloud not written: {}", e)),
        }
        match self.charts.write_pie_chart(label_counts, &pie_chart_path).await {
            Ok(()) => paths.pie_chart = Some(pie_chart_path.display().to_string()),
            Err(e) => logger.log_warning(&format!("pie chart not written: {}", e)),
        }
        paths
    }
}
