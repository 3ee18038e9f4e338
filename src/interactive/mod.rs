//! Interactive mode: a menu loop for `climp --interactive`.
//!
//! Each menu entry asks for an input image, an output path and whatever
//! parameter the command needs, then runs the same job the flag CLI would and
//! prints the same confirmation line. A failed run is reported and the menu
//! comes back. Esc or Ctrl-C at the menu leaves; at any other prompt it
//! abandons the current command.

pub mod theme;

use crate::ascii::{Charset, RenderOptions};
use crate::config::ClimpConfig;
use crate::imaging::{
    BlurRadius, Operation, ParamError, PixelSize, Quality, ScaleFactor, Threshold,
};
use crate::naming::{self, TEXT_EXTENSION};
use crate::output;
use crate::process::{self, AsciiDestination, AsciiOutcome, Job, ProcessError};
use console::Style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::error;

/// Menu entries, in display order.
pub const COMMANDS: &[&str] = &[
    "pixelate",
    "blur",
    "mirror",
    "flip_vertical",
    "rotate",
    "grayscale",
    "monochrome_ugly",
    "scale",
    "ascii",
    "curse",
    "zxc",
    "exit",
];

const ASCII_TARGETS: &[&str] = &["Console only", "File"];

#[derive(Error, Debug)]
pub enum InteractiveError {
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Params(#[from] ParamError),
}

/// `Ok(None)` on interrupt so Ctrl-C backs out of the current command.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> Result<Option<T>, InteractiveError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Entry point for `--interactive`.
pub fn run(config: &ClimpConfig) -> Result<(), InteractiveError> {
    theme::print_banner();
    let theme = theme::climp_theme();

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("$")
            .items(COMMANDS)
            .default(0)
            .interact_opt()?;

        let command = match selection {
            Some(i) if COMMANDS[i] != "exit" => COMMANDS[i],
            _ => break,
        };

        match guided_command(&theme, command, config) {
            Ok(()) => {}
            Err(e @ InteractiveError::Prompt(_)) => return Err(e),
            Err(e) => report_failure(command, &e),
        }
        eprintln!();
    }

    Ok(())
}

fn guided_command(
    theme: &ColorfulTheme,
    command: &str,
    config: &ClimpConfig,
) -> Result<(), InteractiveError> {
    let Some(input) = prompt_input(theme)? else {
        return Ok(());
    };

    if command == "ascii" {
        return guided_ascii(theme, &input, config);
    }

    let ext = input_extension(&input);
    let Some(requested) = prompt_output(theme, &input, &config.output.suffix, &ext)? else {
        return Ok(());
    };
    if requested.extension().is_none() {
        notice(&format!(
            "Output has no extension, .{} will be used",
            config.output.fallback_format
        ));
    }
    let Some(operation) = prompt_operation(theme, command, config)? else {
        return Ok(());
    };

    let job = Job {
        target: naming::resolve_output(&input, Some(&requested), &config.output, Path::new(".")),
        input,
        operation,
    };
    let result = process::run_job(&job, Quality::new(config.output.quality))?;
    output::print_saved(result.operation.label(), &result.output);
    Ok(())
}

fn guided_ascii(
    theme: &ColorfulTheme,
    input: &Path,
    config: &ClimpConfig,
) -> Result<(), InteractiveError> {
    let Some(requested) = prompt_output(theme, input, &config.output.suffix, TEXT_EXTENSION)?
    else {
        return Ok(());
    };
    let Some(choice) = Select::with_theme(theme)
        .with_prompt("Render only in console or in file?")
        .items(ASCII_TARGETS)
        .default(0)
        .interact_opt()?
    else {
        return Ok(());
    };

    let destination = if choice == 0 {
        AsciiDestination::Stdout
    } else {
        AsciiDestination::File(requested)
    };
    let options = RenderOptions {
        default_width: config.ascii.width,
        charset: Charset::parse(&config.ascii.charset)?,
        ..RenderOptions::default()
    };

    if let AsciiOutcome::Saved(path) = process::run_ascii(input, &destination, &options)? {
        output::print_ascii_saved(&path);
    }
    Ok(())
}

/// Re-prompts until the path has an extension.
fn prompt_input(theme: &ColorfulTheme) -> Result<Option<PathBuf>, InteractiveError> {
    loop {
        let Some(raw) = handle_interrupt(
            Input::<String>::with_theme(theme)
                .with_prompt("Path to input image")
                .interact_text(),
        )?
        else {
            return Ok(None);
        };

        let path = PathBuf::from(raw.trim());
        if path.extension().is_none() {
            notice("Input file must have an extension");
            continue;
        }
        return Ok(Some(path));
    }
}

fn prompt_output(
    theme: &ColorfulTheme,
    input: &Path,
    suffix: &str,
    ext: &str,
) -> Result<Option<PathBuf>, InteractiveError> {
    let answer = handle_interrupt(
        Input::<String>::with_theme(theme)
            .with_prompt("Path to output file")
            .default(naming::default_file_name(input, suffix, ext))
            .interact_text(),
    )?;
    Ok(answer.map(|s| PathBuf::from(s.trim())))
}

/// Ask for the command's parameter, if it has one.
fn prompt_operation(
    theme: &ColorfulTheme,
    command: &str,
    config: &ClimpConfig,
) -> Result<Option<Operation>, InteractiveError> {
    let at_least_one = |v: &u32| if *v == 0 { Err("must be at least 1") } else { Ok(()) };

    let operation = match command {
        "pixelate" => prompt_u32(theme, "Pixel size", 10, at_least_one)?
            .map(|v| PixelSize::new(v).map(Operation::Pixelate))
            .transpose()?,
        "blur" => prompt_u32(theme, "Blur radius", 5, |_: &u32| Ok(()))?
            .map(|v| Operation::Blur(BlurRadius(v))),
        "scale" => prompt_u32(theme, "Scale factor", 2, at_least_one)?
            .map(|v| ScaleFactor::new(v).map(Operation::Scale))
            .transpose()?,
        "monochrome_ugly" => handle_interrupt(
            Input::<f32>::with_theme(theme)
                .with_prompt("Threshold")
                .default(config.monochrome.threshold)
                .validate_with(|v: &f32| {
                    if v.is_finite() { Ok(()) } else { Err("must be a finite number") }
                })
                .interact_text(),
        )?
        .map(|v| Threshold::new(v).map(Operation::Monochrome))
        .transpose()?,
        other => match fixed_operation(other) {
            Some(op) => Some(op),
            None => unreachable!("menu entry {other:?} has no operation"),
        },
    };
    Ok(operation)
}

/// Operations that run without asking anything.
fn fixed_operation(command: &str) -> Option<Operation> {
    match command {
        "mirror" => Some(Operation::Mirror),
        "flip_vertical" => Some(Operation::FlipVertical),
        "rotate" => Some(Operation::Rotate),
        "grayscale" => Some(Operation::Grayscale),
        "curse" => Some(Operation::Curse),
        "zxc" => Some(Operation::Zxc),
        _ => None,
    }
}

fn prompt_u32(
    theme: &ColorfulTheme,
    prompt: &str,
    default: u32,
    validate: impl FnMut(&u32) -> Result<(), &'static str> + 'static,
) -> Result<Option<u32>, InteractiveError> {
    handle_interrupt(
        Input::<u32>::with_theme(theme)
            .with_prompt(prompt)
            .default(default)
            .validate_with(validate)
            .interact_text(),
    )
}

fn input_extension(input: &Path) -> String {
    input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn notice(message: &str) {
    let warn = Style::new().for_stderr().yellow();
    eprintln!("  {}", warn.apply_to(message));
}

fn report_failure(command: &str, err: &InteractiveError) {
    error!(command, error = %err, "Interactive command failed");
    let red = Style::new().for_stderr().red();
    eprintln!("  {} {err}", red.apply_to("✗"));
}
