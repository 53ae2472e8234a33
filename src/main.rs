use clap::{Parser, Subcommand};
use imgedit::config::{self, EditorConfig};
use imgedit::console::{Console, StartupArgs};
use imgedit::imaging::{RustBackend, supported_input_extensions};
use std::io;
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("IMGEDIT_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("IMGEDIT_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once; called exactly once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "imgedit")]
#[command(about = "Interactive image editor: threshold, channel filters, histograms, resize")]
#[command(long_about = "\
Interactive image editor: threshold, channel filters, histograms, resize

Load an image, then pick operations from a numbered menu. Every operation
writes a new PNG next to its source; the loaded file is never overwritten.

Menu:
  1. Resize              → <input>-scaled_image.png
  2. Histogram           → histogram_red.png, histogram_green.png, histogram_blue.png
  3. Threshold           → <output> (samples above the cutoff become 255, others 0)
  4-6. Red/green/blue    → <output>-<channel>-filter.png (filters accumulate)
  7. Change input file
  8. Change output file
  0. Exit

Settings (threshold cutoff, filter strength, resize kernel, histogram
directory, startup retry limit) live in ./imgedit.toml.
Run 'imgedit gen-config' to print a documented one.

Set RUST_LOG=debug for diagnostic logging.")]
#[command(version = version_string())]
struct Cli {
    /// Image to load first (prompted for if missing or unreadable)
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Output file name used by threshold and the channel filters
    #[arg(long, short)]
    output: Option<String>,

    /// Config file [default: ./imgedit.toml if present]
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a stock imgedit.toml with all options documented
    GenConfig,
    /// List the image formats that can be loaded
    Formats,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
        }
        Some(Command::Formats) => {
            println!("{}", supported_input_extensions().join(", "));
        }
        None => {
            let editor_config = load_editor_config(cli.config.as_deref())?;
            log::debug!("config: {editor_config:?}");
            let backend = RustBackend::new(editor_config.resize.filter);
            let args = StartupArgs {
                input: cli.input,
                output: cli.output,
            };
            let stdin = io::stdin().lock();
            Console::new(stdin, io::stdout(), io::stderr()).run(backend, editor_config, args)?;
        }
    }

    Ok(())
}

/// An explicit `--config` must exist; the default file is optional.
fn load_editor_config(path: Option<&Path>) -> Result<EditorConfig, config::ConfigError> {
    match path {
        Some(path) => config::load_config(path),
        None => config::load_default_config(Path::new(".")),
    }
}
