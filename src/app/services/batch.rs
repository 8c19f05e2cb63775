//! Concurrent resolution of independent reports
//!
//! Each subset folds into its own report on a blocking worker. Subsets share no
//! state, so the only coordination is the worker limit and re-assembling the
//! results in input order.

use crate::app::models::Subset;
use crate::app::services::resolver::{ResolutionStats, ResolvedReport, resolve_report};
use crate::config::Config;
use crate::{Error, Result};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, info};

/// One subset after resolution
#[derive(Debug, Clone)]
pub struct ResolvedSubset {
    pub id: String,
    pub resolved: ResolvedReport,
}

/// Reports of a batch, in input order, with combined counters
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub reports: Vec<ResolvedSubset>,
    pub stats: ResolutionStats,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

/// Resolve every subset with at most `parallel_workers` running at once
///
/// Fails only if the configuration is invalid or a worker task dies.
pub async fn resolve_batch(subsets: Vec<Subset>, config: &Config) -> Result<BatchResult> {
    config.validate()?;

    let workers = config.performance.parallel_workers;
    let resolver_config = Arc::new(config.resolver.clone());
    let start = Instant::now();
    info!(
        "Resolving {} subsets with {} workers",
        subsets.len(),
        workers
    );

    let outcomes: Vec<Result<ResolvedSubset>> = stream::iter(subsets)
        .map(|subset| {
            let resolver_config = Arc::clone(&resolver_config);
            async move {
                let id = subset.id.clone();
                task::spawn_blocking(move || {
                    let resolved = resolve_report(&subset.records, &resolver_config);
                    debug!("Subset {}: {}", subset.id, resolved.stats.summary());
                    ResolvedSubset {
                        id: subset.id,
                        resolved,
                    }
                })
                .await
                .map_err(|e| Error::task_join(format!("resolving subset '{}'", id), e))
            }
        })
        .buffered(workers)
        .collect()
        .await;

    let mut batch = BatchResult {
        reports: Vec::with_capacity(outcomes.len()),
        stats: ResolutionStats::new(),
    };
    for outcome in outcomes {
        let subset = outcome?;
        batch.stats.merge(&subset.resolved.stats);
        batch.reports.push(subset);
    }

    info!(
        "Resolved {} reports in {:.2?}: {}",
        batch.len(),
        start.elapsed(),
        batch.stats.summary()
    );
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{DescriptorCode, ObservationRecord};
    use crate::app::models::report::Section;

    fn subset(id: &str, seconds: i32, mm: f64) -> Subset {
        let mut subset = Subset::new(id);
        subset.push(
            ObservationRecord::new(DescriptorCode::element(13, 11), mm)
                .with_time_significance(seconds),
        );
        subset
    }

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let subsets: Vec<_> = (0..20)
            .map(|i| subset(&format!("station-{i}"), -21600, i as f64))
            .collect();
        let config = Config::default().with_workers(4);

        let batch = resolve_batch(subsets, &config).await.unwrap();

        assert_eq!(batch.len(), 20);
        for (i, report) in batch.reports.iter().enumerate() {
            assert_eq!(report.id, format!("station-{i}"));
            let expected = format!("{:03}", i);
            assert_eq!(
                report.resolved.report.precipitation.synoptic.amount(),
                Some(expected.as_str())
            );
        }
    }

    #[tokio::test]
    async fn test_batch_reports_are_independent() {
        let subsets = vec![subset("a", -3600, 1.0), subset("b", -86400, 2.0)];

        let batch = resolve_batch(subsets, &Config::default()).await.unwrap();

        let first = &batch.reports[0].resolved.report;
        let second = &batch.reports[1].resolved.report;
        assert!(first.sections.contains(Section::HourlyPrecipitation));
        assert!(!first.sections.contains(Section::DailyPrecipitation));
        assert!(second.sections.contains(Section::DailyPrecipitation));
        assert!(!second.precipitation.hourly.is_occupied());
    }

    #[tokio::test]
    async fn test_batch_merges_stats() {
        let mut twice = subset("twice", -3600, 1.0);
        twice.push(
            ObservationRecord::new(DescriptorCode::element(13, 11), 1.0)
                .with_time_significance(-3600),
        );

        let batch = resolve_batch(vec![subset("once", -3600, 1.0), twice], &Config::default())
            .await
            .unwrap();

        assert_eq!(batch.stats.records, 3);
        assert_eq!(batch.stats.applied, 2);
        assert_eq!(batch.stats.slot_conflicts, 1);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let batch = resolve_batch(Vec::new(), &Config::default()).await.unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.stats.records, 0);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let config = Config::default().with_workers(0);
        let result = resolve_batch(vec![subset("a", -3600, 1.0)], &config).await;
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }
}
