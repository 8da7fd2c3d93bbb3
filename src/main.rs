use clap::{Parser, Subcommand};
use image_editor::config::{self, DEFAULT_CONFIG_FILE};
use image_editor::output::{self, InfoReport, ResizeReport};
use image_editor::{ImageEditor, ResizeMode, RustBackend};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "image-editor")]
#[command(about = "Resize, convert and inspect JPEG, PNG and GIF images")]
#[command(long_about = "\
Resize, convert and inspect JPEG, PNG and GIF images

The input type is detected from the file's content; the output type is
picked from the output file's extension (.jpg/.jpeg, .png, .gif).

Resizing fits the image inside a WIDTH x HEIGHT box without changing its
aspect ratio. Pass 0 (or omit) one bound to leave that side free:

  image-editor resize photo.jpg thumb.png --width 400 --height 400
  image-editor resize photo.jpg wide.jpg --width 1200

Defaults for resizing and JPEG quality come from image-editor.toml in the
working directory, or the file passed with --config. Run
'image-editor gen-config' to generate a documented one.")]
#[command(version = version_string())]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug). RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fit an image into a bounding box and save it
    Resize {
        /// Source image (JPEG, PNG or GIF)
        input: PathBuf,
        /// Destination; the extension picks the format
        output: PathBuf,
        /// Box width in pixels (0 = unconstrained)
        #[arg(long, default_value_t = 0)]
        width: u32,
        /// Box height in pixels (0 = unconstrained)
        #[arg(long, default_value_t = 0)]
        height: u32,
        /// Copy nearest pixels instead of resampling
        #[arg(long)]
        fast: bool,
        /// Config file (defaults to ./image-editor.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show type, dimensions and EXIF/IPTC metadata of an image
    Info {
        /// Image to inspect
        input: PathBuf,
        /// Print a JSON document instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print a stock image-editor.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Resize {
            input,
            output: destination,
            width,
            height,
            fast,
            config: config_path,
        } => {
            // An explicit --config must exist; the working-directory file is optional
            let editor_config = match &config_path {
                Some(path) => config::load_config(path)?,
                None => config::load_config_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
            };
            let options = editor_config.options();
            let mode = if fast { ResizeMode::Resize } else { options.mode };

            let mut editor = ImageEditor::open_with(&input, RustBackend::new(), options)?;
            editor.resize(width, height, mode)?;
            editor.save(&destination)?;

            let resized = editor
                .new_dimensions()
                .ok_or(image_editor::EditorError::NoOutput)?;
            info!(
                input = %input.display(),
                output = %destination.display(),
                width = resized.width,
                height = resized.height,
                "resized"
            );
            output::print_resize_output(&ResizeReport {
                source: &input,
                output: &destination,
                mime_type: editor.mime_type(),
                original: editor.original_dimensions(),
                resized,
                mode,
            });
        }
        Command::Info { input, json } => {
            let report = build_info_report(&input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_info_output(&report);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the fmt subscriber on stderr so stdout stays clean for results.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Open `input` and collect everything `info` shows.
///
/// Unreadable metadata is reported as absent; the image itself must decode.
fn build_info_report(input: &Path) -> Result<InfoReport, Box<dyn std::error::Error>> {
    let editor = ImageEditor::open(input)?;

    let exif = editor.exif().unwrap_or_else(|err| {
        warn!(path = %input.display(), error = %err, "ignoring unreadable EXIF data");
        None
    });
    let iptc = editor.iptc().unwrap_or_else(|err| {
        warn!(path = %input.display(), error = %err, "ignoring unreadable IPTC data");
        None
    });

    Ok(InfoReport {
        path: input.display().to_string(),
        mime_type: editor.mime_type().to_string(),
        dimensions: editor.original_dimensions(),
        exif,
        iptc,
    })
}
