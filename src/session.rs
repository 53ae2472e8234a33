//! Editing session: the loaded image, its working copy, and the commands
//! that act on them.
//!
//! A [`Session`] holds two buffers decoded from the same file:
//!
//! - the **original**, which resize, histogram and threshold read from and
//!   never modify;
//! - the **working copy**, which the red/green/blue filters modify in place,
//!   so repeated filters accumulate.
//!
//! Every command goes through [`Session::execute`] and reports what it wrote
//! as an [`Outcome`]; turning outcomes into console text is the job of
//! [`output`](crate::output).

use crate::buffer::{BufferError, Channel, PixelBuffer};
use crate::config::EditorConfig;
use crate::imaging::{CodecError, ImageBackend};
use crate::{histogram, naming, resize, transform};
use log::{info, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("output file name must not be empty")]
    EmptyFilename,
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
    #[error("'{0}' is not a menu option")]
    InvalidChoice(String),
    #[error("no readable image after {0} attempts")]
    StartupFailed(u32),
    #[error("input closed")]
    InputClosed,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One user request against a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Resize { width: u32, height: u32 },
    Histograms,
    Threshold,
    Filter(Channel),
    ChangeInput(PathBuf),
    ChangeOutput(String),
}

/// What a command did, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resized {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    Histograms {
        written: Vec<(Channel, PathBuf)>,
        /// Channels the image does not have (e.g. green/blue of a gray image).
        skipped: Vec<Channel>,
        /// Charts that could not be written. The other channels are still
        /// attempted.
        failed: Vec<(Channel, CodecError)>,
    },
    Thresholded {
        path: PathBuf,
        cutoff: i32,
    },
    Filtered {
        channel: Channel,
        path: PathBuf,
    },
    InputChanged {
        path: PathBuf,
        width: u32,
        height: u32,
        channels: usize,
    },
    OutputChanged {
        path: PathBuf,
    },
}

pub struct Session<B: ImageBackend> {
    backend: B,
    config: EditorConfig,
    input_path: PathBuf,
    output_path: PathBuf,
    original: PixelBuffer,
    working: PixelBuffer,
}

impl<B: ImageBackend> Session<B> {
    /// Start a session on an already-decoded image.
    pub fn new(
        backend: B,
        config: EditorConfig,
        input_path: PathBuf,
        output_path: PathBuf,
        original: PixelBuffer,
    ) -> Self {
        info!(
            "loaded {} ({}x{}, {} channels)",
            input_path.display(),
            original.width(),
            original.height(),
            original.channels()
        );
        let working = original.clone();
        Self {
            backend,
            config,
            input_path,
            output_path,
            original,
            working,
        }
    }

    /// Decode `input_path` and start a session on it.
    pub fn open(
        backend: B,
        config: EditorConfig,
        input_path: PathBuf,
        output_path: PathBuf,
    ) -> Result<Self, SessionError> {
        let original = backend.decode(&input_path)?;
        Ok(Self::new(backend, config, input_path, output_path, original))
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    pub fn working(&self) -> &PixelBuffer {
        &self.working
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, SessionError> {
        match command {
            Command::Resize { width, height } => self.resize(width, height),
            Command::Histograms => self.histograms(),
            Command::Threshold => self.threshold(),
            Command::Filter(channel) => self.filter(channel),
            Command::ChangeInput(path) => self.change_input(path),
            Command::ChangeOutput(name) => self.change_output(&name),
        }
    }

    fn write(&self, path: &Path, buffer: &PixelBuffer) -> Result<(), SessionError> {
        self.backend.encode_png(path, buffer)?;
        info!("wrote {}", path.display());
        Ok(())
    }

    fn resize(&self, width: u32, height: u32) -> Result<Outcome, SessionError> {
        let scaled = resize::resize(&self.backend, &self.original, width, height)?;
        let path = naming::scaled_output(&self.input_path);
        self.write(&path, &scaled)?;
        Ok(Outcome::Resized {
            path,
            width,
            height,
        })
    }

    fn histograms(&self) -> Result<Outcome, SessionError> {
        let mut written = Vec::new();
        let mut skipped = Vec::new();
        let mut failed = Vec::new();
        for channel in Channel::RGB {
            if !self.original.has_color_channel(channel) {
                warn!(
                    "skipping {channel} histogram: image has {} channel(s)",
                    self.original.channels()
                );
                skipped.push(channel);
                continue;
            }
            let hist = histogram::compute(&self.original, channel)?;
            let path = naming::histogram_output(&self.config.histogram.output_dir, channel);
            match self.backend.encode_png(&path, &histogram::render(&hist)) {
                Ok(()) => {
                    info!("wrote {}", path.display());
                    written.push((channel, path));
                }
                Err(e) => {
                    warn!("{channel} histogram not written: {e}");
                    failed.push((channel, e));
                }
            }
        }
        Ok(Outcome::Histograms {
            written,
            skipped,
            failed,
        })
    }

    fn threshold(&self) -> Result<Outcome, SessionError> {
        let cutoff = self.config.filters.threshold;
        let mut binary = self.original.clone();
        transform::threshold(&mut binary, cutoff);
        self.write(&self.output_path, &binary)?;
        Ok(Outcome::Thresholded {
            path: self.output_path.clone(),
            cutoff,
        })
    }

    fn filter(&mut self, channel: Channel) -> Result<Outcome, SessionError> {
        self.working.check_color_channel(channel)?;
        transform::boost_channel(&mut self.working, channel, self.config.filters.boost)?;
        let path = naming::filter_output(&self.output_path, channel);
        self.write(&path, &self.working)?;
        Ok(Outcome::Filtered { channel, path })
    }

    /// Replace both buffers with a freshly decoded image.
    ///
    /// Nothing changes unless the new file decodes.
    fn change_input(&mut self, path: PathBuf) -> Result<Outcome, SessionError> {
        let decoded = self.backend.decode(&path)?;
        let outcome = Outcome::InputChanged {
            path: path.clone(),
            width: decoded.width(),
            height: decoded.height(),
            channels: decoded.channels(),
        };
        info!("switched input to {}", path.display());
        self.working = decoded.clone();
        self.original = decoded;
        self.input_path = path;
        Ok(outcome)
    }

    fn change_output(&mut self, name: &str) -> Result<Outcome, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyFilename);
        }
        self.output_path = PathBuf::from(name);
        Ok(Outcome::OutputChanged {
            path: self.output_path.clone(),
        })
    }
}
