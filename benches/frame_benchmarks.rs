//! Performance benchmarks for imageops-frame
//!
//! Measures the per-frame cost of the filters at common camera preview
//! resolutions, to keep the hot path within a frame budget and to track
//! regressions.

use criterion::*;
use image::{Rgba, RgbaImage};
use imageops_frame::{
    convert_to_gray, detect_edges, CannyParams, FrameProcessor, GradientNorm, PixelBuffer,
};
use itertools::iproduct;
use std::hint::black_box;

const PREVIEW_SIZES: [(u32, u32); 3] = [
    (320, 240),  // QVGA
    (640, 480),  // VGA
    (1280, 720), // HD
];

/// Helper function to create an RGBA frame with gradients and hard edges
fn create_rgba_frame(width: u32, height: u32) -> PixelBuffer {
    let mut image = RgbaImage::new(width, height);

    iproduct!(0..height, 0..width).for_each(|(y, x)| {
        let r = ((x * 255) / width) as u8;
        let g = ((y * 255) / height) as u8;
        // Checkerboard of 32px cells gives plenty of real edges
        let b = if (x / 32 + y / 32) % 2 == 0 { 40 } else { 220 };
        image.put_pixel(x, y, Rgba([r, g, b, 255]));
    });

    PixelBuffer::from(image)
}

/// Benchmark grayscale conversion across preview sizes
fn bench_grayscale(c: &mut Criterion) {
    let mut group = c.benchmark_group("grayscale");
    group.sample_size(20);

    for (width, height) in PREVIEW_SIZES {
        group.throughput(Throughput::Elements(u64::from(width * height)));
        let frame = create_rgba_frame(width, height);

        group.bench_with_input(
            BenchmarkId::new("convert_to_gray", format!("{}x{}", width, height)),
            &frame,
            |b, frame| {
                b.iter_batched(
                    || frame.clone(),
                    |mut frame| {
                        convert_to_gray(&mut frame).unwrap();
                        black_box(frame)
                    },
                    BatchSize::LargeInput,
                )
            },
        );
    }

    group.finish();
}

/// Benchmark Canny edge detection across sizes, apertures and norms
fn bench_canny(c: &mut Criterion) {
    let apertures = [3, 5, 7];
    let norms = [GradientNorm::L1, GradientNorm::L2];

    let mut group = c.benchmark_group("canny");
    group.sample_size(10);

    for ((width, height), aperture, norm) in iproduct!(PREVIEW_SIZES, apertures, norms) {
        group.throughput(Throughput::Elements(u64::from(width * height)));
        let frame = create_rgba_frame(width, height);
        let params = CannyParams::default()
            .with_aperture_size(aperture)
            .with_norm(norm);

        group.bench_with_input(
            BenchmarkId::new(
                "detect_edges",
                format!("{}x{}_k{}_{:?}", width, height, aperture, norm),
            ),
            &(frame, params),
            |b, (frame, params)| {
                b.iter_batched(
                    || frame.clone(),
                    |mut frame| {
                        detect_edges(&mut frame, params).unwrap();
                        black_box(frame)
                    },
                    BatchSize::LargeInput,
                )
            },
        );
    }

    group.finish();
}

/// Benchmark the processor hot path with default settings
fn bench_processor(c: &mut Criterion) {
    let processor = FrameProcessor::default();

    let mut group = c.benchmark_group("processor");
    group.sample_size(10);

    for (width, height) in PREVIEW_SIZES {
        group.throughput(Throughput::Elements(u64::from(width * height)));
        let frame = create_rgba_frame(width, height);

        group.bench_with_input(
            BenchmarkId::new("process_frame", format!("{}x{}", width, height)),
            &frame,
            |b, frame| {
                b.iter_batched(
                    || frame.clone(),
                    |mut frame| black_box(processor.process_frame(&mut frame)),
                    BatchSize::LargeInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_grayscale, bench_canny, bench_processor);
criterion_main!(benches);
