//! Console text for the interactive editor.
//!
//! # Output Format
//!
//! ```text
//! Menu:
//! 1. Resize
//! 2. Histogram
//! ...
//! 0. Exit
//! Choose an option (0-8) and press enter: 4
//! Red filter applied, saved as: out.png-red-filter.png
//! ```
//!
//! Results go to stdout, errors to stderr.
//!
//! # Architecture
//!
//! Each message has a `format_*` function (returns `Vec<String>` or
//! `String`) for testability, and [`write_lines`] does the I/O. Format
//! functions are pure: no I/O, no side effects.

use crate::session::{Outcome, SessionError};
use std::io::{self, Write};

pub const INPUT_PROMPT: &str = "Enter the image to edit, with its extension (e.g. picture.jpg): ";
pub const OUTPUT_PROMPT: &str = "Enter the output file name, with its extension: ";
pub const NEW_OUTPUT_PROMPT: &str = "Enter the new output file name, with its extension: ";
pub const WIDTH_PROMPT: &str = "Enter the new width: ";
pub const HEIGHT_PROMPT: &str = "Enter the new height: ";
pub const CHOICE_PROMPT: &str = "Choose an option (0-8) and press enter: ";

const MENU_ENTRIES: [&str; 9] = [
    "Resize",
    "Histogram",
    "Threshold",
    "Red filter",
    "Green filter",
    "Blue filter",
    "Change input file",
    "Change output file",
    "Exit",
];

/// The numbered main menu. Exit is listed last as option 0.
pub fn format_menu() -> Vec<String> {
    let mut lines = vec!["Menu:".to_string()];
    let count = MENU_ENTRIES.len();
    for (i, entry) in MENU_ENTRIES.iter().enumerate() {
        let key = (i + 1) % count;
        lines.push(format!("{key}. {entry}"));
    }
    lines
}

/// Describe a successful command.
pub fn format_outcome(outcome: &Outcome) -> Vec<String> {
    match outcome {
        Outcome::Resized {
            path,
            width,
            height,
        } => vec![
            format!("Resized to {width}x{height}"),
            format!("Output file: {}", path.display()),
        ],
        Outcome::Histograms {
            written,
            skipped,
            failed,
        } => {
            let mut lines: Vec<String> = written
                .iter()
                .map(|(channel, path)| format!("{channel} histogram saved as: {}", path.display()))
                .collect();
            if !skipped.is_empty() {
                let names: Vec<&str> = skipped.iter().map(|c| c.name()).collect();
                lines.push(format!(
                    "Skipped {}: the image has no such channel",
                    names.join(", ")
                ));
            }
            for (channel, err) in failed {
                lines.push(format!("Error: {channel} histogram not saved: {err}"));
            }
            lines
        }
        Outcome::Thresholded { path, cutoff } => vec![
            format!("Threshold at {cutoff} applied"),
            format!("Output file: {}", path.display()),
        ],
        Outcome::Filtered { channel, path } => vec![format!(
            "{} filter applied, saved as: {}",
            capitalize(channel.name()),
            path.display()
        )],
        Outcome::InputChanged {
            path,
            width,
            height,
            channels,
        } => vec![format!(
            "Input file changed to {} ({width}x{height}, {channels} channels)",
            path.display()
        )],
        Outcome::OutputChanged { path } => {
            vec![format!("Output file changed to {}", path.display())]
        }
    }
}

/// One-line description of a failed command.
pub fn format_error(err: &SessionError) -> String {
    match err {
        SessionError::Codec(crate::imaging::CodecError::Decode { .. }) => {
            format!("Error: {err}. Enter a valid image file name.")
        }
        _ => format!("Error: {err}"),
    }
}

pub fn format_farewell() -> String {
    "Exiting.".to_string()
}

/// Write each line followed by a newline.
pub fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
