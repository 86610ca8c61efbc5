//! End-to-end pipeline tests against real files in temp directories.

use std::path::Path;

use blurmill_core::codec::{FileCodec, ImageCodec};
use blurmill_core::{BlurmillError, Channel, Config, ConfigError, Image, Pipeline};

/// Write a constant-color RGB PNG through the production codec.
fn write_constant_png(path: &Path, width: usize, height: usize, rgb: (u8, u8, u8)) {
    let image = Image::new([
        Channel::filled(width, height, rgb.0),
        Channel::filled(width, height, rgb.1),
        Channel::filled(width, height, rgb.2),
    ]);
    FileCodec.encode(path, &image).unwrap();
}

fn small_config() -> Config {
    let mut config = Config::default();
    config.pipeline.worker_count = 3;
    config.pipeline.queue_capacity = 2;
    config
}

#[test]
fn constant_color_image_survives_blur() {
    let dir = tempfile::tempdir().unwrap();
    let input_root = dir.path().join("input");
    let output_root = dir.path().join("output");
    std::fs::create_dir(&input_root).unwrap();

    write_constant_png(&input_root.join("flat.png"), 10, 10, (100, 150, 200));

    let stats = Pipeline::new(small_config())
        .run(&input_root, &output_root)
        .unwrap();
    assert_eq!(stats.discovered, 1);
    assert_eq!(stats.enqueued, 1);
    assert_eq!(stats.processed, 1);
    assert_eq!(stats.failed, 0);

    // Constant input: interior averages to the constant, border passes
    // through, so every pixel keeps its original value.
    let output = FileCodec.decode(&output_root.join("flat.png")).unwrap();
    for (channel, expected) in output.channels().iter().zip([100, 150, 200]) {
        assert!(channel.samples().iter().all(|&v| v == expected));
    }
}

#[test]
fn blur_is_applied_to_interior() {
    let dir = tempfile::tempdir().unwrap();
    let input_root = dir.path().join("input");
    let output_root = dir.path().join("output");
    std::fs::create_dir(&input_root).unwrap();

    // 9x9 black image with a white spike in the middle of the red channel.
    let mut red = Channel::filled(9, 9, 0);
    red.set(4, 4, 255);
    let image = Image::new([red, Channel::filled(9, 9, 0), Channel::filled(9, 9, 0)]);
    FileCodec.encode(&input_root.join("spike.png"), &image).unwrap();

    Pipeline::new(small_config())
        .run(&input_root, &output_root)
        .unwrap();

    let output = FileCodec.decode(&output_root.join("spike.png")).unwrap();
    // 5x5 window sum 255, truncating average 255 / 25 = 10.
    assert_eq!(output.channels()[0].get(4, 4), 10);
    // Corner stays on the border passthrough path.
    assert_eq!(output.channels()[0].get(0, 0), 0);
}

#[test]
fn nested_directories_are_mirrored() {
    let dir = tempfile::tempdir().unwrap();
    let input_root = dir.path().join("input");
    let output_root = dir.path().join("output");
    std::fs::create_dir_all(input_root.join("2024/trip")).unwrap();

    write_constant_png(&input_root.join("top.png"), 8, 8, (1, 2, 3));
    write_constant_png(&input_root.join("2024/trip/deep.png"), 8, 8, (4, 5, 6));

    let stats = Pipeline::new(small_config())
        .run(&input_root, &output_root)
        .unwrap();
    assert_eq!(stats.processed, 2);
    assert!(output_root.join("top.png").is_file());
    assert!(output_root.join("2024/trip/deep.png").is_file());
}

#[test]
fn corrupt_file_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input_root = dir.path().join("input");
    let output_root = dir.path().join("output");
    std::fs::create_dir(&input_root).unwrap();

    write_constant_png(&input_root.join("good.png"), 10, 10, (10, 20, 30));
    std::fs::write(input_root.join("corrupt.png"), b"definitely not a png").unwrap();

    let stats = Pipeline::new(small_config())
        .run(&input_root, &output_root)
        .unwrap();
    assert_eq!(stats.discovered, 2);
    assert_eq!(stats.processed, 1);
    assert_eq!(stats.failed, 1);
    assert!(output_root.join("good.png").is_file());
    assert!(!output_root.join("corrupt.png").exists());
}

#[test]
fn many_files_through_small_queue() {
    // More files than the queue capacity forces backpressure and wraparound
    // while several workers drain concurrently.
    let dir = tempfile::tempdir().unwrap();
    let input_root = dir.path().join("input");
    let output_root = dir.path().join("output");
    std::fs::create_dir(&input_root).unwrap();

    for i in 0..25 {
        write_constant_png(
            &input_root.join(format!("img_{i:02}.png")),
            6,
            6,
            (i as u8, 0, 0),
        );
    }

    let stats = Pipeline::new(small_config())
        .run(&input_root, &output_root)
        .unwrap();
    assert_eq!(stats.discovered, 25);
    assert_eq!(stats.processed, 25);
    assert_eq!(stats.failed, 0);
    for i in 0..25 {
        assert!(output_root.join(format!("img_{i:02}.png")).is_file());
    }
}

#[test]
fn empty_input_directory_is_a_clean_run() {
    let dir = tempfile::tempdir().unwrap();
    let input_root = dir.path().join("input");
    let output_root = dir.path().join("output");
    std::fs::create_dir(&input_root).unwrap();

    let stats = Pipeline::new(small_config())
        .run(&input_root, &output_root)
        .unwrap();
    assert_eq!(stats.discovered, 0);
    assert_eq!(stats.processed, 0);
    assert!(output_root.is_dir());
}

#[test]
fn missing_input_root_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = Pipeline::new(small_config())
        .run(&dir.path().join("absent"), &dir.path().join("out"))
        .unwrap_err();
    assert!(matches!(
        err,
        BlurmillError::Config(ConfigError::InputRootInvalid(_))
    ));
}

#[test]
fn output_root_occupied_by_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input_root = dir.path().join("input");
    std::fs::create_dir(&input_root).unwrap();
    let output_root = dir.path().join("output");
    std::fs::write(&output_root, b"in the way").unwrap();

    let err = Pipeline::new(small_config())
        .run(&input_root, &output_root)
        .unwrap_err();
    assert!(matches!(
        err,
        BlurmillError::Config(ConfigError::OutputRootNotDirectory(_))
    ));
}

#[test]
fn invalid_filter_size_rejected_before_any_work() {
    let dir = tempfile::tempdir().unwrap();
    let input_root = dir.path().join("input");
    let output_root = dir.path().join("output");
    std::fs::create_dir(&input_root).unwrap();

    let mut config = small_config();
    config.filter.filter_size = 6;
    let err = Pipeline::new(config)
        .run(&input_root, &output_root)
        .unwrap_err();
    assert!(matches!(
        err,
        BlurmillError::Config(ConfigError::ValidationError(_))
    ));
    // Fatal config errors fire before threads start, so no output root
    // side effects beyond its creation check.
    assert!(!output_root.join("anything.png").exists());
}
