//! Job execution: load an image, transform it, write the result.
//!
//! A [`Job`] is fully resolved before it gets here: the operation carries
//! validated parameters and the [`OutputTarget`] already names the file and
//! encoder. Running it is load → [`Operation::apply`] → save.
//!
//! `ascii` is the one command that does not produce an image, so it has its
//! own entry point that renders text either to stdout or to a file.
//!
//! Both entry points come in two flavours: a plain one using
//! [`RustBackend`], and a `*_with_backend` one that tests drive with a mock.

use crate::ascii::{self, RenderOptions};
use crate::imaging::{
    BackendError, ImageBackend, Operation, ParamError, Quality, RustBackend, SaveParams,
};
use crate::naming::OutputTarget;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Invalid parameter: {0}")]
    Params(#[from] ParamError),
    #[error("Source image not found: {0}")]
    SourceNotFound(PathBuf),
}

/// One image transformation, ready to run.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub input: PathBuf,
    pub target: OutputTarget,
    pub operation: Operation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobResult {
    pub operation: Operation,
    pub output: PathBuf,
    /// (width, height) of the decoded input
    pub source_dimensions: (u32, u32),
    /// (width, height) of the written image
    pub output_dimensions: (u32, u32),
}

pub fn run_job(job: &Job, quality: Quality) -> Result<JobResult, ProcessError> {
    run_job_with_backend(&RustBackend::new(), job, quality)
}

/// Run a job using a specific backend (allows testing with mock).
pub fn run_job_with_backend(
    backend: &impl ImageBackend,
    job: &Job,
    quality: Quality,
) -> Result<JobResult, ProcessError> {
    ensure_source(&job.input)?;
    let source = backend.load(&job.input)?;
    debug!(
        input = %job.input.display(),
        width = source.width(),
        height = source.height(),
        operation = job.operation.name(),
        "Loaded source image"
    );

    let progress = job
        .operation
        .is_slow()
        .then(|| spinner(&format!("Applying {}...", job.operation.name())));
    let started = Instant::now();
    let transformed = job.operation.apply(&source);
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    let image = transformed?;
    debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        width = image.width(),
        height = image.height(),
        "Transform finished"
    );

    backend.save(
        &image,
        &SaveParams {
            output: job.target.path.clone(),
            format: job.target.format,
            quality,
        },
    )?;
    info!(
        output = %job.target.path.display(),
        format = ?job.target.format,
        "Saved image"
    );

    Ok(JobResult {
        operation: job.operation,
        output: job.target.path.clone(),
        source_dimensions: source.dimensions(),
        output_dimensions: image.dimensions(),
    })
}

/// Where `ascii` sends its text.
#[derive(Debug, Clone, PartialEq)]
pub enum AsciiDestination {
    /// Print only (`-v/--verbose_only`).
    Stdout,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AsciiOutcome {
    Printed,
    Saved(PathBuf),
}

pub fn run_ascii(
    input: &Path,
    destination: &AsciiDestination,
    options: &RenderOptions,
) -> Result<AsciiOutcome, ProcessError> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    run_ascii_with_backend(&RustBackend::new(), input, destination, options, &mut lock)
}

/// Render `input` as text. `console` receives the art for
/// [`AsciiDestination::Stdout`] and is untouched otherwise.
pub fn run_ascii_with_backend(
    backend: &impl ImageBackend,
    input: &Path,
    destination: &AsciiDestination,
    options: &RenderOptions,
    console: &mut impl io::Write,
) -> Result<AsciiOutcome, ProcessError> {
    ensure_source(input)?;
    let source = backend.load(input)?;

    match destination {
        AsciiDestination::Stdout => {
            ascii::render_to(&source, console, options)?;
            debug!(input = %input.display(), colored = options.colored, "Printed ASCII art");
            Ok(AsciiOutcome::Printed)
        }
        AsciiDestination::File(path) => {
            let art = ascii::render(&source, options);
            std::fs::write(path, &art)?;
            info!(
                output = %path.display(),
                lines = art.lines().count(),
                "Saved ASCII art"
            );
            Ok(AsciiOutcome::Saved(path.clone()))
        }
    }
}

fn ensure_source(path: &Path) -> Result<(), ProcessError> {
    if !path.is_file() {
        return Err(ProcessError::SourceNotFound(path.to_path_buf()));
    }
    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::Charset;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::imaging::{BlurRadius, PixelSize, ScaleFactor, Threshold};
    use crate::test_helpers::{create_test_jpeg, gradient_image, solid_image};
    use image::{ImageFormat, Rgba};
    use std::fs;
    use tempfile::TempDir;

    fn create_dummy_source(path: &Path) {
        // The mock backend doesn't need real content
        fs::write(path, "").unwrap();
    }

    fn job(input: &Path, output: &Path, operation: Operation) -> Job {
        Job {
            input: input.to_path_buf(),
            target: OutputTarget {
                path: output.to_path_buf(),
                format: ImageFormat::Png,
            },
            operation,
        }
    }

    // =========================================================================
    // Image jobs (mock backend)
    // =========================================================================

    #[test]
    fn job_loads_transforms_and_saves() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("photo.jpg");
        create_dummy_source(&input);

        let backend = MockBackend::with_image(gradient_image(30, 20));
        let result = run_job_with_backend(
            &backend,
            &job(&input, Path::new("/out/rotated.png"), Operation::Rotate),
            Quality::default(),
        )
        .unwrap();

        assert_eq!(result.source_dimensions, (30, 20));
        assert_eq!(result.output_dimensions, (20, 30));
        assert_eq!(result.output, PathBuf::from("/out/rotated.png"));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[0], RecordedOp::Load(p) if p.ends_with("photo.jpg")));
        assert!(matches!(
            &ops[1],
            RecordedOp::Save { output, format: ImageFormat::Png, quality: 90, width: 20, height: 30 }
                if output == "/out/rotated.png"
        ));
    }

    #[test]
    fn job_passes_quality_to_backend() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("photo.jpg");
        create_dummy_source(&input);

        let backend = MockBackend::with_image(gradient_image(8, 8));
        run_job_with_backend(
            &backend,
            &job(&input, Path::new("o.png"), Operation::Mirror),
            Quality::new(55),
        )
        .unwrap();

        assert!(matches!(
            backend.get_operations().last(),
            Some(RecordedOp::Save { quality: 55, .. })
        ));
    }

    #[test]
    fn saved_pixels_are_the_transformed_image() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("photo.png");
        create_dummy_source(&input);

        let backend = MockBackend::with_image(solid_image(4, 4, Rgba([250, 10, 10, 40])));
        run_job_with_backend(
            &backend,
            &job(&input, Path::new("o.png"), Operation::Grayscale),
            Quality::default(),
        )
        .unwrap();

        let saved = backend.last_saved().unwrap();
        assert!(saved.pixels().all(|p| p.0 == [90, 90, 90, 255]));
    }

    #[test]
    fn every_operation_runs_through_the_job() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("photo.jpg");
        create_dummy_source(&input);

        let operations = [
            Operation::Blur(BlurRadius(1)),
            Operation::Pixelate(PixelSize::new(3).unwrap()),
            Operation::Mirror,
            Operation::FlipVertical,
            Operation::Rotate,
            Operation::Grayscale,
            Operation::Monochrome(Threshold::default()),
            Operation::Scale(ScaleFactor::new(2).unwrap()),
            Operation::Curse,
            Operation::Zxc,
        ];
        for operation in operations {
            let backend = MockBackend::with_image(gradient_image(20, 10));
            let result = run_job_with_backend(
                &backend,
                &job(&input, Path::new("o.png"), operation),
                Quality::default(),
            )
            .unwrap();
            assert_eq!(result.operation, operation);
            assert!(backend.last_saved().is_some(), "{} saved nothing", operation.name());
        }
    }

    #[test]
    fn missing_source_is_reported_before_loading() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::with_image(gradient_image(4, 4));

        let result = run_job_with_backend(
            &backend,
            &job(&tmp.path().join("nope.jpg"), Path::new("o.png"), Operation::Mirror),
            Quality::default(),
        );

        assert!(matches!(result, Err(ProcessError::SourceNotFound(_))));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn save_failure_propagates() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("photo.jpg");
        create_dummy_source(&input);

        let backend = MockBackend::failing_save(gradient_image(4, 4));
        let result = run_job_with_backend(
            &backend,
            &job(&input, Path::new("o.png"), Operation::Mirror),
            Quality::default(),
        );

        assert!(matches!(
            result,
            Err(ProcessError::Imaging(BackendError::Encode { .. }))
        ));
    }

    #[test]
    fn oversized_scale_is_a_param_error() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("photo.jpg");
        create_dummy_source(&input);

        let backend = MockBackend::with_image(gradient_image(4, 4));
        let result = run_job_with_backend(
            &backend,
            &job(
                &input,
                Path::new("o.png"),
                Operation::Scale(ScaleFactor::new(u32::MAX).unwrap()),
            ),
            Quality::default(),
        );

        assert!(matches!(
            result,
            Err(ProcessError::Params(ParamError::DimensionOverflow { .. }))
        ));
        // Nothing written
        assert!(backend.last_saved().is_none());
    }

    // =========================================================================
    // ASCII jobs
    // =========================================================================

    fn ascii_options() -> RenderOptions {
        RenderOptions {
            width: Some(4),
            height: Some(2),
            ..RenderOptions::default()
        }
    }

    #[test]
    fn ascii_to_console() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("photo.jpg");
        create_dummy_source(&input);

        let backend = MockBackend::with_image(solid_image(8, 8, Rgba([255, 255, 255, 255])));
        let mut console = Vec::new();
        let outcome = run_ascii_with_backend(
            &backend,
            &input,
            &AsciiDestination::Stdout,
            &ascii_options(),
            &mut console,
        )
        .unwrap();

        assert_eq!(outcome, AsciiOutcome::Printed);
        assert_eq!(String::from_utf8(console).unwrap(), "@@@@\n@@@@\n");
    }

    #[test]
    fn ascii_to_file_leaves_console_alone() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("photo.jpg");
        create_dummy_source(&input);
        let output = tmp.path().join("art.txt");

        let backend = MockBackend::with_image(solid_image(8, 8, Rgba([0, 0, 0, 255])));
        let mut console = Vec::new();
        let options = RenderOptions {
            charset: Charset::parse("xy").unwrap(),
            ..ascii_options()
        };
        let outcome = run_ascii_with_backend(
            &backend,
            &input,
            &AsciiDestination::File(output.clone()),
            &options,
            &mut console,
        )
        .unwrap();

        assert_eq!(outcome, AsciiOutcome::Saved(output.clone()));
        assert!(console.is_empty());
        assert_eq!(fs::read_to_string(&output).unwrap(), "xxxx\nxxxx\n");
    }

    #[test]
    fn ascii_missing_source() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::new();
        let result = run_ascii_with_backend(
            &backend,
            &tmp.path().join("gone.png"),
            &AsciiDestination::Stdout,
            &ascii_options(),
            &mut Vec::new(),
        );
        assert!(matches!(result, Err(ProcessError::SourceNotFound(_))));
    }

    // =========================================================================
    // Real backend
    // =========================================================================

    #[test]
    fn run_job_with_real_backend_writes_file() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("photo.jpg");
        create_test_jpeg(&input, 40, 30);
        let output = tmp.path().join("out.png");

        let result = run_job(
            &job(&input, &output, Operation::Pixelate(PixelSize::new(10).unwrap())),
            Quality::default(),
        )
        .unwrap();

        assert_eq!(result.output_dimensions, (40, 30));
        let written = image::open(&output).unwrap();
        assert_eq!((written.width(), written.height()), (40, 30));
    }
}
