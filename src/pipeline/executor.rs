use std::sync::Arc;

use log::{info, warn};
use tokio::sync::Semaphore;

use crate::config::MAX_JOBS;
use crate::decoder::SymbolDecoder;
use crate::errors::{ScanError, ScanResult};
use crate::metadata::MetadataParser;
use crate::source::ImageSource;

use super::extraction::ExtractionPipeline;
use super::record::Record;

/// Runs the extraction pipeline over many inputs concurrently
///
/// Each input is extracted on tokio's blocking pool; at most `jobs` run at
/// once. Records are returned in input order regardless of completion order.
pub struct PipelineExecutor<D, M>
where
    D: SymbolDecoder + 'static,
    M: MetadataParser + 'static,
{
    pipeline: Arc<ExtractionPipeline<D, M>>,
    semaphore: Arc<Semaphore>,
    jobs: usize,
}

impl<D, M> PipelineExecutor<D, M>
where
    D: SymbolDecoder + 'static,
    M: MetadataParser + 'static,
{
    pub fn new(pipeline: ExtractionPipeline<D, M>, jobs: usize) -> Self {
        let jobs = jobs.clamp(1, MAX_JOBS);
        Self {
            pipeline: Arc::new(pipeline),
            semaphore: Arc::new(Semaphore::new(jobs)),
            jobs,
        }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Extract all inputs, calling `on_record` in input order
    ///
    /// Extraction itself never panics out; a task that still fails to
    /// complete yields a failed record for its input.
    pub async fn execute<F>(&self, sources: Vec<Box<dyn ImageSource>>, mut on_record: F) -> Vec<Record>
    where
        F: FnMut(&Record),
    {
        info!("Extracting {} image(s) with {} worker(s)", sources.len(), self.jobs);

        let mut handles = Vec::with_capacity(sources.len());
        for source in sources {
            let name = source.name().to_string();
            let pipeline = Arc::clone(&self.pipeline);
            let semaphore = Arc::clone(&self.semaphore);

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.map_err(|e| {
                    ScanError::GenericError(format!("Semaphore error: {}", e))
                })?;
                let record = tokio::task::spawn_blocking(move || pipeline.extract(source.as_ref())).await?;
                Ok::<Record, ScanError>(record)
            });
            handles.push((name, handle));
        }

        let mut records = Vec::with_capacity(handles.len());
        for (name, handle) in handles {
            let record = match handle.await {
                Ok(Ok(record)) => record,
                Ok(Err(e)) => {
                    warn!("Extraction of {} failed: {}", name, e);
                    Record::failed(name)
                }
                Err(e) => {
                    warn!("Extraction of {} failed: {}", name, e);
                    Record::failed(name)
                }
            };
            on_record(&record);
            records.push(record);
        }

        records
    }

    /// Build a runtime sized for `jobs` and run [`execute`](Self::execute) on it
    pub fn run_blocking<F>(&self, sources: Vec<Box<dyn ImageSource>>, on_record: F) -> ScanResult<Vec<Record>>
    where
        F: FnMut(&Record),
    {
        // Workers only await blocking handles; extraction runs on the blocking pool
        let workers = self.jobs.min(sources.len()).max(1);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(workers)
            .max_blocking_threads(self.jobs)
            .thread_name("qrstamp-worker")
            .build()?;

        Ok(runtime.block_on(self.execute(sources, on_record)))
    }
}
