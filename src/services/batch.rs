use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{self, JoinSet};

use crate::error::ConvertError;
use crate::models::ResolvedJob;
use crate::services::converter::{ConversionReport, ImageConverter};

/// Outcome of one batch job
#[derive(Debug)]
pub struct JobResult {
    pub index: usize,
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: Result<ConversionReport, ConvertError>,
}

/// Results of a batch run, ordered by job index
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub results: Vec<JobResult>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Runs conversions on blocking worker threads, at most `workers` at once.
///
/// A failing job is recorded in the summary and does not stop the others.
pub struct BatchRunner {
    converter: Arc<ImageConverter>,
    workers: usize,
}

impl BatchRunner {
    pub fn new(converter: ImageConverter, workers: usize) -> Self {
        Self {
            converter: Arc::new(converter),
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub async fn run(&self, jobs: Vec<ResolvedJob>) -> BatchSummary {
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();
        // Job identity per task, so a task that dies still yields a result
        let mut pending: HashMap<task::Id, (usize, PathBuf, PathBuf)> = HashMap::new();

        tracing::info!(jobs = jobs.len(), workers = self.workers, "Starting batch");

        for job in jobs {
            let semaphore = semaphore.clone();
            let converter = self.converter.clone();
            let (index, input, output) = (job.index, job.input.clone(), job.output.clone());

            let handle = tasks.spawn(async move {
                // Never closed, so acquisition cannot fail.
                let _permit = semaphore.acquire_owned().await.ok();
                tracing::debug!(index = job.index, input = %job.input.display(), "Job started");
                task::spawn_blocking(move || converter.run_job(&job))
                    .await
                    .unwrap_or_else(|e| Err(ConvertError::Worker(e.to_string())))
            });
            pending.insert(handle.id(), (index, input, output));
        }

        let mut results = Vec::new();
        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, result) = match joined {
                Ok((id, result)) => (id, result),
                Err(e) => (e.id(), Err(ConvertError::Worker(e.to_string()))),
            };
            let Some((index, input, output)) = pending.remove(&id) else {
                continue;
            };

            match &result {
                Ok(report) => tracing::info!(
                    index,
                    output = %output.display(),
                    width = report.output_size.0,
                    height = report.output_size.1,
                    "Job finished"
                ),
                Err(e) => tracing::error!(index, input = %input.display(), %e, "Job failed"),
            }

            results.push(JobResult {
                index,
                input,
                output,
                result,
            });
        }
        results.sort_by_key(|r| r.index);

        let summary = BatchSummary { results };
        tracing::info!(
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            "Batch complete"
        );
        summary
    }
}
