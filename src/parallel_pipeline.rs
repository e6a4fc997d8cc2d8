// THEORY:
// The `parallel_pipeline` spreads whole frames across a pool of workers. Every
// histogram computation owns its arrays and only reads its frame, so frames
// never need to share anything and need no locking: a dispatcher hands each
// incoming frame to the next worker in round-robin order, and the worker
// replies on a oneshot channel dedicated to that frame.
//
// The scan itself is CPU-bound, so workers run it through `spawn_blocking`
// and keep the async executor threads free for dispatching. The pool must be
// created inside a tokio runtime.

use crate::core_modules::histogram::{Histogram, RgbHistogram};
use crate::core_modules::pixel_source::pixel_source::{FrameLayout, RawFrame};
use crate::error::{HistogramError, Result};
use crate::pipeline::{HistogramPipeline, HistogramReport, PipelineConfig};
use futures::future::join_all;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinError;
use tracing::{debug, trace, warn};

/// Configuration for the WorkerPool.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of worker tasks. Values below 1 are treated as 1.
    pub workers: usize,
    pub pipeline: PipelineConfig,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            pipeline: PipelineConfig::default(),
        }
    }
}

/// A packed frame handed over to the pool.
#[derive(Debug, Clone)]
pub struct OwnedFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub layout: FrameLayout,
}

impl OwnedFrame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, layout: FrameLayout) -> Self {
        Self {
            data,
            width,
            height,
            layout,
        }
    }
}

/// Gray frames get one histogram, color frames get three.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameHistograms {
    Gray(HistogramReport<Histogram>),
    Rgb(HistogramReport<RgbHistogram>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameAnalysis {
    /// Submission order of the frame within this pool, starting at 0.
    pub frame_id: u64,
    pub histograms: FrameHistograms,
}

/// Unwraps a finished scan task. A panicked or cancelled task is logged with
/// its cause and reported to the caller as `WorkerUnavailable`.
fn scan_outcome(
    worker_idx: usize,
    frame_id: u64,
    joined: std::result::Result<Result<FrameAnalysis>, JoinError>,
) -> Result<FrameAnalysis> {
    joined.unwrap_or_else(|join_error| {
        warn!(worker_idx, frame_id, %join_error, "histogram scan task failed");
        Err(HistogramError::WorkerUnavailable)
    })
}

struct FrameTask {
    frame_id: u64,
    frame: OwnedFrame,
    result_sender: oneshot::Sender<Result<FrameAnalysis>>,
}

pub struct WorkerPool {
    task_sender: mpsc::UnboundedSender<FrameTask>,
    workers: Vec<tokio::task::JoinHandle<()>>,
    pipeline: Arc<HistogramPipeline>,
    frame_counter: AtomicU64,
}

impl WorkerPool {
    pub fn new(config: ParallelConfig) -> Self {
        let worker_count = config.workers.max(1);
        let pipeline = Arc::new(HistogramPipeline::new(config.pipeline));
        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<FrameTask>();
        let mut workers = Vec::with_capacity(worker_count + 1);

        let (worker_senders, worker_receivers): (Vec<_>, Vec<_>) = (0..worker_count)
            .map(|_| mpsc::unbounded_channel::<FrameTask>())
            .unzip();

        // Dispatcher
        workers.push(tokio::spawn(async move {
            let mut worker_idx = 0;
            while let Some(task) = task_receiver.recv().await {
                if worker_senders[worker_idx].send(task).is_err() {
                    warn!(worker_idx, "histogram worker is gone, dropping frame");
                }
                worker_idx = (worker_idx + 1) % worker_count;
            }
        }));

        for (worker_idx, mut worker_receiver) in worker_receivers.into_iter().enumerate() {
            let worker_pipeline = Arc::clone(&pipeline);

            workers.push(tokio::spawn(async move {
                while let Some(task) = worker_receiver.recv().await {
                    let FrameTask {
                        frame_id,
                        frame,
                        result_sender,
                    } = task;
                    let pipeline = Arc::clone(&worker_pipeline);

                    let joined = tokio::task::spawn_blocking(move || {
                        Self::analyze_frame(&pipeline, frame_id, &frame)
                    })
                    .await;
                    let analysis = scan_outcome(worker_idx, frame_id, joined);

                    trace!(worker_idx, frame_id, "frame processed");
                    let _ = result_sender.send(analysis);
                }
            }));
        }

        debug!(worker_count, "histogram worker pool started");
        Self {
            task_sender,
            workers,
            pipeline,
            frame_counter: AtomicU64::new(0),
        }
    }

    fn analyze_frame(
        pipeline: &HistogramPipeline,
        frame_id: u64,
        frame: &OwnedFrame,
    ) -> Result<FrameAnalysis> {
        let raw = RawFrame::new(&frame.data, frame.width, frame.height, frame.layout)?;
        let histograms = match frame.layout {
            FrameLayout::Gray8 => FrameHistograms::Gray(pipeline.analyze_gray(&raw)),
            FrameLayout::Rgb8 | FrameLayout::Rgba8 => FrameHistograms::Rgb(pipeline.analyze_rgb(&raw)),
        };
        Ok(FrameAnalysis {
            frame_id,
            histograms,
        })
    }

    /// The pipeline the workers use, e.g. to chart a returned report.
    pub fn pipeline(&self) -> &HistogramPipeline {
        &self.pipeline
    }

    pub async fn process_frame(&self, frame: OwnedFrame) -> Result<FrameAnalysis> {
        let frame_id = self.frame_counter.fetch_add(1, Ordering::Relaxed);
        let (result_sender, result_receiver) = oneshot::channel();

        self.task_sender
            .send(FrameTask {
                frame_id,
                frame,
                result_sender,
            })
            .map_err(|_| HistogramError::WorkerUnavailable)?;

        result_receiver
            .await
            .map_err(|_| HistogramError::WorkerUnavailable)?
    }

    /// Processes all frames concurrently. Results keep the order of `frames`.
    pub async fn process_batch(&self, frames: Vec<OwnedFrame>) -> Vec<Result<FrameAnalysis>> {
        join_all(frames.into_iter().map(|frame| self.process_frame(frame))).await
    }

    /// Closes the task channel and waits for every worker to finish its queue.
    pub async fn shutdown(self) {
        drop(self.task_sender);
        for worker in self.workers {
            if let Err(join_error) = worker.await {
                warn!(%join_error, "histogram worker ended abnormally");
            }
        }
        debug!("histogram worker pool stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn panicked_scan_becomes_worker_unavailable() {
        let joined = tokio::task::spawn_blocking(|| -> Result<FrameAnalysis> {
            panic!("scan blew up");
        })
        .await;
        assert!(joined.as_ref().is_err_and(|e| e.is_panic()));

        let outcome = scan_outcome(0, 7, joined);
        assert!(matches!(outcome, Err(HistogramError::WorkerUnavailable)));
    }

    #[tokio::test]
    async fn finished_scan_passes_through() {
        let joined = tokio::task::spawn_blocking(|| -> Result<FrameAnalysis> {
            Err(HistogramError::FrameSizeMismatch { expected: 4, actual: 1 })
        })
        .await;

        let outcome = scan_outcome(1, 3, joined);
        assert!(matches!(
            outcome,
            Err(HistogramError::FrameSizeMismatch { expected: 4, actual: 1 })
        ));
    }

    #[tokio::test]
    async fn shutdown_waits_for_idle_workers() {
        let pool = WorkerPool::new(ParallelConfig {
            workers: 2,
            pipeline: PipelineConfig::default(),
        });
        let frame = OwnedFrame::new(vec![5; 4], 2, 2, FrameLayout::Gray8);
        assert!(pool.process_frame(frame).await.is_ok());
        pool.shutdown().await;
    }
}
