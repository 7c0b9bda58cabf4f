// THEORY:
// Batch processing for many images. A single image is always processed
// sequentially; the unit of parallelism is the whole per-image pipeline.
//
// A dispatcher task hands incoming `ImageTask`s to a fixed set of workers in
// round-robin order. Each worker shares one `PathAnalyzer` (normally the
// `SilhouettePipeline`) and runs the CPU-bound decode-and-scan on tokio's blocking
// pool. Results travel back on a per-task oneshot channel, so callers get them in
// the order they asked, no matter which worker finished first.
//
// Panics raised inside an analysis (invariant violations) are not errors. The
// worker ships the panic payload back over the oneshot and `process_image`
// re-raises it on the awaiting task. The worker itself keeps serving tasks.

use crate::error::SilhouetteError;
use crate::pipeline::{PipelineConfig, SilhouettePipeline, SilhouetteReport};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

pub type AnalysisResult = Result<SilhouetteReport, SilhouetteError>;

/// What a worker sends back: the analysis result, or the payload of its panic.
pub type TaskOutcome = std::thread::Result<AnalysisResult>;

/// The per-image work a `WorkerPool` runs on the blocking pool.
pub trait PathAnalyzer: Send + Sync + 'static {
    fn analyze_path(&self, path: &Path) -> AnalysisResult;
}

impl PathAnalyzer for SilhouettePipeline {
    fn analyze_path(&self, path: &Path) -> AnalysisResult {
        SilhouettePipeline::analyze_path(self, path)
    }
}

pub struct ImageTask {
    pub path: PathBuf,
    pub result_sender: oneshot::Sender<TaskOutcome>,
}

pub struct WorkerPool {
    task_sender: mpsc::UnboundedSender<ImageTask>,
    dispatcher: JoinHandle<()>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns the dispatcher and `worker_count` workers. Must run inside a tokio runtime.
    pub fn new<A: PathAnalyzer>(analyzer: A, worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        let analyzer = Arc::new(analyzer);
        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<ImageTask>();

        let (worker_senders, worker_receivers): (Vec<_>, Vec<_>) = (0..worker_count)
            .map(|_| mpsc::unbounded_channel::<ImageTask>())
            .unzip();

        let dispatcher = tokio::spawn(async move {
            let mut worker_idx = 0;
            while let Some(task) = task_receiver.recv().await {
                if let Err(mpsc::error::SendError(task)) = worker_senders[worker_idx].send(task) {
                    let _ = task.result_sender.send(Ok(Err(SilhouetteError::WorkerPool(
                        format!("worker {worker_idx} has stopped"),
                    ))));
                }
                worker_idx = (worker_idx + 1) % worker_count;
            }
        });

        let mut workers = Vec::with_capacity(worker_count);
        for (worker_id, mut worker_receiver) in worker_receivers.into_iter().enumerate() {
            let worker_analyzer = Arc::clone(&analyzer);

            let worker = tokio::spawn(async move {
                while let Some(task) = worker_receiver.recv().await {
                    let analyzer = Arc::clone(&worker_analyzer);
                    let path = task.path.clone();
                    let joined =
                        tokio::task::spawn_blocking(move || analyzer.analyze_path(&path)).await;

                    let outcome = match joined {
                        Ok(result) => Ok(result),
                        Err(err) if err.is_panic() => {
                            error!(worker_id, path = %task.path.display(), "analysis panicked");
                            Err(err.into_panic())
                        }
                        Err(err) => Ok(Err(SilhouetteError::WorkerPool(format!(
                            "analysis of {} was cancelled: {err}",
                            task.path.display()
                        )))),
                    };
                    debug!(
                        worker_id,
                        path = %task.path.display(),
                        ok = matches!(outcome, Ok(Ok(_))),
                        "worker finished image"
                    );
                    let _ = task.result_sender.send(outcome);
                }
            });

            workers.push(worker);
        }

        Self {
            task_sender,
            dispatcher,
            workers,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Analyzes `path` on a worker. A panic inside the analysis resumes here.
    pub async fn process_image(&self, path: PathBuf) -> AnalysisResult {
        let (result_sender, result_receiver) = oneshot::channel();

        let task = ImageTask {
            path,
            result_sender,
        };

        self.task_sender.send(task).map_err(|_| {
            SilhouetteError::WorkerPool("failed to send task to worker pool".to_string())
        })?;

        let outcome = result_receiver.await.map_err(|_| {
            SilhouetteError::WorkerPool("failed to receive result from worker".to_string())
        })?;
        match outcome {
            Ok(result) => result,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }

    /// Stops accepting tasks and waits for the dispatcher and workers to drain.
    /// A panic in any of them is re-raised.
    pub async fn shutdown(self) {
        drop(self.task_sender);
        for handle in std::iter::once(self.dispatcher).chain(self.workers) {
            match handle.await {
                Ok(()) => {}
                Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                Err(err) => warn!("worker pool task did not finish: {err}"),
            }
        }
    }
}

/// Analyzes batches of image files concurrently.
pub struct ParallelPipeline {
    config: PipelineConfig,
    worker_pool: WorkerPool,
}

impl ParallelPipeline {
    /// `worker_count` defaults to the number of logical CPUs.
    pub fn new(
        config: PipelineConfig,
        worker_count: Option<usize>,
    ) -> Result<Self, SilhouetteError> {
        let pipeline = SilhouettePipeline::new(config.clone())?;
        let worker_count = worker_count.unwrap_or_else(num_cpus::get);
        debug!(worker_count, "starting silhouette worker pool");
        Ok(Self {
            config,
            worker_pool: WorkerPool::new(pipeline, worker_count),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn worker_count(&self) -> usize {
        self.worker_pool.worker_count()
    }

    pub async fn analyze_path(&self, path: &Path) -> AnalysisResult {
        self.worker_pool.process_image(path.to_path_buf()).await
    }

    /// One result per input path, in input order.
    pub async fn analyze_paths(&self, paths: &[PathBuf]) -> Vec<AnalysisResult> {
        join_all(paths.iter().map(|path| self.analyze_path(path))).await
    }

    pub async fn shutdown(self) {
        self.worker_pool.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::panic::AssertUnwindSafe;

    #[tokio::test]
    async fn missing_files_fail_individually() {
        let pipeline = ParallelPipeline::new(PipelineConfig::default(), Some(2)).unwrap();
        assert_eq!(pipeline.worker_count(), 2);

        let paths = vec![
            PathBuf::from("/definitely/missing/one.png"),
            PathBuf::from("/definitely/missing/two.png"),
            PathBuf::from("/definitely/missing/three.png"),
        ];
        let results = pipeline.analyze_paths(&paths).await;
        assert_eq!(results.len(), 3);
        assert!(results
            .iter()
            .all(|result| matches!(result, Err(SilhouetteError::Io { .. }))));

        pipeline.shutdown().await;
    }

    /// Panics on any file named `poisoned.png`, analyzes everything else normally.
    struct PoisonedAnalyzer {
        pipeline: SilhouettePipeline,
    }

    impl PathAnalyzer for PoisonedAnalyzer {
        fn analyze_path(&self, path: &Path) -> AnalysisResult {
            if path.file_name().is_some_and(|name| name == "poisoned.png") {
                panic!("cell state array does not match the pixel grid");
            }
            self.pipeline.analyze_path(path)
        }
    }

    fn poisoned_pool(worker_count: usize) -> WorkerPool {
        let pipeline = SilhouettePipeline::new(PipelineConfig::default()).unwrap();
        WorkerPool::new(PoisonedAnalyzer { pipeline }, worker_count)
    }

    #[tokio::test]
    #[should_panic(expected = "cell state array does not match the pixel grid")]
    async fn analysis_panic_resumes_in_the_caller() {
        let pool = poisoned_pool(1);
        let _ = pool.process_image(PathBuf::from("poisoned.png")).await;
    }

    #[tokio::test]
    async fn worker_keeps_serving_after_a_panic() {
        let pool = poisoned_pool(1);

        let caught = AssertUnwindSafe(pool.process_image(PathBuf::from("poisoned.png")))
            .catch_unwind()
            .await;
        let payload = caught.expect_err("the panic must reach the caller");
        assert_eq!(
            payload.downcast_ref::<&str>(),
            Some(&"cell state array does not match the pixel grid")
        );

        // Same single worker: a stopped worker would answer with a WorkerPool error.
        for _ in 0..2 {
            let result = pool
                .process_image(PathBuf::from("/definitely/missing/after.png"))
                .await;
            assert!(matches!(result, Err(SilhouetteError::Io { .. })));
        }

        pool.shutdown().await;
    }

    #[tokio::test]
    async fn zero_workers_still_gets_one() {
        let pipeline = ParallelPipeline::new(PipelineConfig::default(), Some(0)).unwrap();
        assert_eq!(pipeline.worker_count(), 1);
        pipeline.shutdown().await;
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_before_spawning() {
        let config = PipelineConfig {
            border_inspection_thickness: 0,
            ..Default::default()
        };
        assert!(matches!(
            ParallelPipeline::new(config, Some(1)),
            Err(SilhouetteError::InvalidConfig(_))
        ));
    }
}
