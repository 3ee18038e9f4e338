use clap::{Parser, Subcommand};
use climp::ascii::{Charset, RenderOptions};
use climp::config::{self, ClimpConfig};
use climp::imaging::{
    BlurRadius, Operation, ParamError, PixelSize, Quality, ScaleFactor, Threshold,
};
use climp::process::{self, AsciiDestination, AsciiOutcome, Job};
use climp::{interactive, logging, naming, output};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "climp")]
#[command(about = "Command-line image manipulation")]
#[command(long_about = "\
Command-line image manipulation

Reads one image, applies one transformation and writes the result:

  climp photo.jpg -o out.png blur -r 5
  climp photo.jpg pixelate -p 10        # writes ./photo_edited.jpg
  climp photo.jpg ascii --width 100 -v  # prints to the terminal

The output format follows the -o extension. Unknown or missing extensions
fall back to the configured format (jpg unless climp.toml says otherwise).

Run 'climp --gen-config' to print a documented climp.toml.")]
#[command(version)]
struct Cli {
    /// Input image
    #[arg(value_name = "FILEPATH", required_unless_present_any = ["interactive", "gen_config"])]
    filepath: Option<PathBuf>,

    /// Output file (default: <name>_edited.<ext> in the current directory)
    #[arg(short, long, value_name = "FILEPATH")]
    output: Option<PathBuf>,

    /// Choose commands from a menu instead of flags
    #[arg(short, long)]
    interactive: bool,

    /// Config file (default: ./climp.toml when present)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print a stock climp.toml with all options documented
    #[arg(long)]
    gen_config: bool,

    /// Debug logging on stderr
    #[arg(long)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Gaussian blur
    Blur {
        /// Blur strength; 0 leaves the image unchanged
        #[arg(short = 'r', long = "blur_radius", value_name = "VALUE")]
        blur_radius: u32,
    },
    /// Pixelate into square blocks
    Pixelate {
        /// Block edge in pixels
        #[arg(short = 'p', long = "pixel_size", value_name = "VALUE",
              value_parser = clap::value_parser!(u32).range(1..))]
        pixel_size: u32,
    },
    /// Flip horizontally
    Mirror,
    /// Flip vertically
    #[command(name = "flip_vertical")]
    FlipVertical,
    /// Rotate 90° clockwise
    Rotate,
    /// Average the channels into gray
    Grayscale,
    /// Black and white by luminance threshold
    #[command(name = "monochrome_ugly")]
    MonochromeUgly {
        /// Luminance (0-255) at or above which pixels turn white
        #[arg(short = 't', long, value_name = "VALUE")]
        threshold: Option<f32>,
    },
    /// Enlarge by an integer factor
    Scale {
        /// Multiplier for both edges
        #[arg(short = 's', long, value_name = "VALUE",
              value_parser = clap::value_parser!(u32).range(1..))]
        scale: u32,
    },
    /// Render the image as ASCII art
    Ascii(AsciiArgs),
    /// Stretch, squash and pixelate
    Curse,
    /// Curse, then black and white
    Zxc,
}

#[derive(clap::Args)]
struct AsciiArgs {
    /// Columns (default from config, at most 1000)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// Rows (derived from the width when omitted, at most 1000)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,

    /// 24-bit ANSI colour per glyph
    #[arg(long)]
    colored: bool,

    /// Bright areas get the first glyph
    #[arg(long)]
    invert: bool,

    /// default, block, emoji, russian, slight, or literal glyphs darkest first
    #[arg(long, value_name = "SET")]
    charset: Option<String>,

    /// Print to the terminal only, write no file
    #[arg(short = 'v', long = "verbose_only")]
    verbose_only: bool,
}

enum Action {
    Transform(Operation),
    Ascii(AsciiArgs),
}

impl Command {
    fn into_action(self, config: &ClimpConfig) -> Result<Action, ParamError> {
        let operation = match self {
            Command::Blur { blur_radius } => Operation::Blur(BlurRadius(blur_radius)),
            Command::Pixelate { pixel_size } => Operation::Pixelate(PixelSize::new(pixel_size)?),
            Command::Mirror => Operation::Mirror,
            Command::FlipVertical => Operation::FlipVertical,
            Command::Rotate => Operation::Rotate,
            Command::Grayscale => Operation::Grayscale,
            Command::MonochromeUgly { threshold } => Operation::Monochrome(Threshold::new(
                threshold.unwrap_or(config.monochrome.threshold),
            )?),
            Command::Scale { scale } => Operation::Scale(ScaleFactor::new(scale)?),
            Command::Ascii(args) => return Ok(Action::Ascii(args)),
            Command::Curse => Operation::Curse,
            Command::Zxc => Operation::Zxc,
        };
        Ok(Action::Transform(operation))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(cli.config.as_deref(), &std::env::current_dir()?)?;
    logging::init(&config.logging, cli.verbose, cli.log_json);
    init_thread_pool(&config.processing);
    debug!(?config, "Configuration loaded");

    if cli.interactive {
        interactive::run(&config)?;
        return Ok(());
    }

    let Some(command) = cli.command else {
        output::print_no_subcommand();
        return Ok(());
    };
    let input = cli.filepath.ok_or("an input image is required")?;

    match command.into_action(&config)? {
        Action::Transform(operation) => {
            let job = Job {
                target: naming::resolve_output(
                    &input,
                    cli.output.as_deref(),
                    &config.output,
                    Path::new("."),
                ),
                input,
                operation,
            };
            let result = process::run_job(&job, Quality::new(config.output.quality))?;
            output::print_saved(result.operation.label(), &result.output);
        }
        Action::Ascii(args) => {
            run_ascii(&input, cli.output.as_deref(), args, &config)?;
        }
    }

    Ok(())
}

fn run_ascii(
    input: &Path,
    requested: Option<&Path>,
    args: AsciiArgs,
    config: &ClimpConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let charset = Charset::parse(args.charset.as_deref().unwrap_or(&config.ascii.charset))?;
    let options = RenderOptions {
        width: args.width,
        height: args.height,
        default_width: config.ascii.width,
        colored: args.colored,
        invert: args.invert,
        charset,
    };
    let destination = if args.verbose_only {
        AsciiDestination::Stdout
    } else {
        AsciiDestination::File(naming::resolve_text_output(
            input,
            requested,
            &config.output,
            Path::new("."),
        ))
    };

    if let AsciiOutcome::Saved(path) = process::run_ascii(input, &destination, &options)? {
        output::print_ascii_saved(&path);
    }
    Ok(())
}

/// Size the global rayon pool used by the per-pixel transforms.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
