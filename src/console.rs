//! Interactive prompt loop.
//!
//! [`Console`] drives a [`Session`] from any line-oriented input, so the
//! binary wires it to stdin/stdout/stderr and tests wire it to in-memory
//! buffers. The flow is:
//!
//! 1. ask for an input image until one decodes (optionally capped by
//!    `startup.max_attempts`);
//! 2. ask for an output name unless one was given up front;
//! 3. show the menu and run commands until `0` or end of input.
//!
//! Command failures are reported and the loop continues. Only a startup that
//! never produces a readable image, or input closing before it does, ends the
//! run with an error.

use crate::buffer::{Channel, PixelBuffer};
use crate::config::EditorConfig;
use crate::imaging::ImageBackend;
use crate::output;
use crate::session::{Command, Session, SessionError};
use log::{debug, warn};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Values supplied on the command line that skip the matching prompts.
#[derive(Debug, Clone, Default)]
pub struct StartupArgs {
    /// First load attempt; prompts take over if it fails to decode.
    pub input: Option<PathBuf>,
    pub output: Option<String>,
}

/// A main-menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Resize,
    Histogram,
    Threshold,
    Filter(Channel),
    ChangeInput,
    ChangeOutput,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Result<Self, SessionError> {
        match input.trim() {
            "1" => Ok(MenuChoice::Resize),
            "2" => Ok(MenuChoice::Histogram),
            "3" => Ok(MenuChoice::Threshold),
            "4" => Ok(MenuChoice::Filter(Channel::Red)),
            "5" => Ok(MenuChoice::Filter(Channel::Green)),
            "6" => Ok(MenuChoice::Filter(Channel::Blue)),
            "7" => Ok(MenuChoice::ChangeInput),
            "8" => Ok(MenuChoice::ChangeOutput),
            "0" => Ok(MenuChoice::Exit),
            other => Err(SessionError::InvalidChoice(other.to_string())),
        }
    }
}

pub struct Console<R, W, E> {
    input: R,
    out: W,
    err: E,
}

impl<R: BufRead, W: Write, E: Write> Console<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Self { input, out, err }
    }

    /// Run a whole editing session. Returns once the user exits.
    pub fn run<B: ImageBackend>(
        &mut self,
        backend: B,
        config: EditorConfig,
        args: StartupArgs,
    ) -> Result<(), SessionError> {
        let (input_path, image) =
            self.load_initial(&backend, args.input, config.startup.max_attempts)?;
        let output_path = match args.output {
            Some(name) if !name.trim().is_empty() => PathBuf::from(name.trim()),
            _ => self.prompt_output()?,
        };
        let mut session = Session::new(backend, config, input_path, output_path, image);
        self.menu_loop(&mut session)?;
        writeln!(self.out, "{}", output::format_farewell())?;
        Ok(())
    }

    /// Ask for an image until one decodes.
    ///
    /// `first` is tried before prompting. With `max_attempts` unset this
    /// loops for as long as input keeps coming.
    pub fn load_initial<B: ImageBackend>(
        &mut self,
        backend: &B,
        first: Option<PathBuf>,
        max_attempts: Option<u32>,
    ) -> Result<(PathBuf, PixelBuffer), SessionError> {
        let mut pending = first;
        let mut attempts = 0u32;
        loop {
            let path = match pending.take() {
                Some(path) => path,
                None => PathBuf::from(self.prompt(output::INPUT_PROMPT)?),
            };
            attempts += 1;
            match backend.decode(&path) {
                Ok(image) => return Ok((path, image)),
                Err(e) => {
                    warn!("startup load attempt {attempts} failed: {e}");
                    let err = SessionError::from(e);
                    writeln!(self.err, "{}", output::format_error(&err))?;
                }
            }
            if max_attempts.is_some_and(|max| attempts >= max) {
                return Err(SessionError::StartupFailed(attempts));
            }
        }
    }

    fn prompt_output(&mut self) -> Result<PathBuf, SessionError> {
        loop {
            let name = self.prompt(output::OUTPUT_PROMPT)?;
            if !name.is_empty() {
                return Ok(PathBuf::from(name));
            }
            writeln!(
                self.err,
                "{}",
                output::format_error(&SessionError::EmptyFilename)
            )?;
        }
    }

    fn menu_loop<B: ImageBackend>(
        &mut self,
        session: &mut Session<B>,
    ) -> Result<(), SessionError> {
        loop {
            output::write_lines(&mut self.out, &output::format_menu())?;
            let command = match self.next_command() {
                Ok(Some(command)) => command,
                Ok(None) | Err(SessionError::InputClosed) => return Ok(()),
                Err(SessionError::Io(e)) => return Err(e.into()),
                Err(e) => {
                    writeln!(self.err, "{}", output::format_error(&e))?;
                    continue;
                }
            };
            match session.execute(command) {
                Ok(outcome) => {
                    output::write_lines(&mut self.out, &output::format_outcome(&outcome))?;
                }
                Err(e) => {
                    warn!("command failed: {e}");
                    writeln!(self.err, "{}", output::format_error(&e))?;
                }
            }
        }
    }

    /// Read a menu choice and the arguments it needs. `None` means exit.
    fn next_command(&mut self) -> Result<Option<Command>, SessionError> {
        let choice = MenuChoice::parse(&self.prompt(output::CHOICE_PROMPT)?)?;
        debug!("menu choice {choice:?}");
        Ok(Some(match choice {
            MenuChoice::Exit => return Ok(None),
            MenuChoice::Resize => {
                let width = self.prompt_number(output::WIDTH_PROMPT)?;
                let height = self.prompt_number(output::HEIGHT_PROMPT)?;
                Command::Resize { width, height }
            }
            MenuChoice::Histogram => Command::Histograms,
            MenuChoice::Threshold => Command::Threshold,
            MenuChoice::Filter(channel) => Command::Filter(channel),
            MenuChoice::ChangeInput => {
                Command::ChangeInput(PathBuf::from(self.prompt(output::INPUT_PROMPT)?))
            }
            MenuChoice::ChangeOutput => {
                Command::ChangeOutput(self.prompt(output::NEW_OUTPUT_PROMPT)?)
            }
        }))
    }

    fn prompt_number(&mut self, text: &str) -> Result<u32, SessionError> {
        let line = self.prompt(text)?;
        line.parse()
            .map_err(|_| SessionError::InvalidNumber(line.clone()))
    }

    /// Print `text` without a newline and read one trimmed line.
    fn prompt(&mut self, text: &str) -> Result<String, SessionError> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}
