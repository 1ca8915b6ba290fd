//! Bounded-concurrency classification fan-out.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::warn;

use tubemood_models::{Classification, ClassificationResult, Comment};

use crate::error::PipelineError;
use crate::traits::SentimentClassifier;

/// Classify every comment with at most `max_concurrency` calls in flight.
///
/// All tasks are spawned up front and awaited together. `results[i]` always
/// belongs to `comments[i]`. A failed or panicked task becomes
/// `Unclassified` carrying its error; the rest of the batch is unaffected.
pub async fn classify_all(
    classifier: Arc<dyn SentimentClassifier>,
    comments: &[Comment],
    max_concurrency: usize,
) -> Vec<ClassificationResult> {
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));

    let handles: Vec<_> = comments
        .iter()
        .map(|comment| {
            let semaphore = Arc::clone(&semaphore);
            let classifier = Arc::clone(&classifier);
            let text = comment.text.clone();

            tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| PipelineError::upstream("Semaphore closed"))?;
                classifier.classify(&text).await
            })
        })
        .collect();

    join_all(handles)
        .await
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| {
            let classification = match outcome {
                Ok(Ok(classification)) => classification,
                Ok(Err(e)) => {
                    warn!(index, error = %e, "Classification failed");
                    Classification::unclassified(e.to_string())
                }
                Err(e) => {
                    warn!(index, error = %e, "Classification task aborted");
                    Classification::unclassified(e.to_string())
                }
            };
            ClassificationResult::new(index, classification)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use rand::Rng;
    use tubemood_models::SentimentLabel;

    use crate::error::PipelineResult;

    /// Labels by text and tracks how many calls overlap.
    #[derive(Default)]
    struct TrackingClassifier {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SentimentClassifier for TrackingClassifier {
        async fn classify(&self, text: &str) -> PipelineResult<Classification> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            let delay = rand::rng().random_range(1..15);
            tokio::time::sleep(Duration::from_millis(delay)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if text.starts_with("fail") {
                return Err(PipelineError::upstream("model unavailable"));
            }
            if text.starts_with("panic") {
                panic!("classifier blew up");
            }
            let label = match text.len() % 3 {
                0 => SentimentLabel::Positive,
                1 => SentimentLabel::Negative,
                _ => SentimentLabel::Neutral,
            };
            Ok(Classification::labeled(label))
        }

        fn model_name(&self) -> String {
            "tracking".to_string()
        }
    }

    fn comments(texts: &[String]) -> Vec<Comment> {
        texts.iter().map(|t| Comment::new("viewer", t.as_str())).collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_in_flight_bound_is_respected() {
        let classifier = Arc::new(TrackingClassifier::default());
        let texts: Vec<String> = (0..40).map(|i| format!("comment {i}")).collect();

        let results = classify_all(classifier.clone(), &comments(&texts), 5).await;

        assert_eq!(results.len(), 40);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 40);
        assert_eq!(classifier.peak.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_results_follow_input_order() {
        let classifier = Arc::new(TrackingClassifier::default());
        let texts: Vec<String> = (0..30).map(|i| "x".repeat(i + 1)).collect();

        let results = classify_all(classifier, &comments(&texts), 5).await;

        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.index, i);
            let expected = match texts[i].len() % 3 {
                0 => SentimentLabel::Positive,
                1 => SentimentLabel::Negative,
                _ => SentimentLabel::Neutral,
            };
            assert_eq!(result.label, expected);
        }
    }

    #[tokio::test]
    async fn test_failures_stay_local() {
        let classifier = Arc::new(TrackingClassifier::default());
        let texts = vec![
            "abc".to_string(),
            "fail here".to_string(),
            "panic now".to_string(),
            "abcd".to_string(),
        ];

        let results = classify_all(classifier, &comments(&texts), 2).await;

        assert_eq!(results[0].label, SentimentLabel::Positive);
        assert_eq!(results[1].label, SentimentLabel::Unclassified);
        assert!(results[1].detail.as_deref().unwrap().contains("model unavailable"));
        assert_eq!(results[2].label, SentimentLabel::Unclassified);
        assert!(results[2].detail.is_some());
        assert_eq!(results[3].label, SentimentLabel::Negative);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let classifier = Arc::new(TrackingClassifier::default());
        assert!(classify_all(classifier, &[], 5).await.is_empty());
    }
}
