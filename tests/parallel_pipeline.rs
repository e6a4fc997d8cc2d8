use histogram_vision::HistogramError;
use histogram_vision::FrameLayout;
use histogram_vision::parallel_pipeline::{FrameHistograms, OwnedFrame, ParallelConfig, WorkerPool};
use histogram_vision::pipeline::PipelineConfig;
use histogram_vision::OutputSize;

fn config(workers: usize) -> ParallelConfig {
    ParallelConfig {
        workers,
        pipeline: PipelineConfig {
            output_size: OutputSize::new(256, 10),
        },
    }
}

#[tokio::test]
async fn gray_frame_gets_single_histogram() {
    let pool = WorkerPool::new(config(2));
    let frame = OwnedFrame::new(vec![0, 0, 255, 255], 2, 2, FrameLayout::Gray8);

    let analysis = pool.process_frame(frame).await.expect("frame should be processed");
    match analysis.histograms {
        FrameHistograms::Gray(report) => {
            assert_eq!(report.pixel_count, 4);
            assert_eq!(report.raw[0], 2);
            assert_eq!(report.raw[255], 2);
            assert_eq!(report.normalized[0], 10);
        }
        other => panic!("expected gray histograms, got {other:?}"),
    }
    pool.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn batch_results_keep_submission_order() {
    let pool = WorkerPool::new(config(3));
    let frames: Vec<OwnedFrame> = (0..8u8)
        .map(|value| OwnedFrame::new(vec![value * 10, 0, 0, 255], 1, 1, FrameLayout::Rgba8))
        .collect();

    let results = pool.process_batch(frames).await;
    assert_eq!(results.len(), 8);
    for (index, result) in results.into_iter().enumerate() {
        let analysis = result.expect("frame should be processed");
        assert_eq!(analysis.frame_id, index as u64);
        match analysis.histograms {
            FrameHistograms::Rgb(report) => {
                assert_eq!(report.raw[0][index * 10], 1);
                assert_eq!(report.raw[1][0], 1);
            }
            other => panic!("expected rgb histograms, got {other:?}"),
        }
    }
    pool.shutdown().await;
}

#[tokio::test]
async fn malformed_frame_is_reported() {
    let pool = WorkerPool::new(config(1));
    let frame = OwnedFrame::new(vec![1, 2, 3], 2, 2, FrameLayout::Rgb8);

    let err = pool.process_frame(frame).await.unwrap_err();
    assert!(matches!(err, HistogramError::FrameSizeMismatch { expected: 12, actual: 3 }));

    // The worker survives a bad frame.
    let frame = OwnedFrame::new(vec![9], 1, 1, FrameLayout::Gray8);
    assert!(pool.process_frame(frame).await.is_ok());
    pool.shutdown().await;
}

#[tokio::test]
async fn charts_can_be_rendered_from_worker_reports() {
    let pool = WorkerPool::new(config(1));
    let frame = OwnedFrame::new(vec![128; 16], 4, 4, FrameLayout::Gray8);

    let analysis = pool.process_frame(frame).await.unwrap();
    let FrameHistograms::Gray(report) = analysis.histograms else {
        panic!("expected gray histograms");
    };
    let chart = pool.pipeline().chart_gray(&report);
    assert_eq!(chart.dimensions(), (256, 10));
    assert!((0..10).all(|y| chart.get_pixel(128, y).0[0] == 255));
    pool.shutdown().await;
}

#[tokio::test]
async fn oversized_frame_is_rejected_without_scanning() {
    let pool = WorkerPool::new(config(1));
    let frame = OwnedFrame::new(Vec::new(), 1 << 31, 1 << 31, FrameLayout::Rgba8);

    let err = pool.process_frame(frame).await.unwrap_err();
    assert!(matches!(err, HistogramError::FrameTooLarge { .. }));
    pool.shutdown().await;
}
