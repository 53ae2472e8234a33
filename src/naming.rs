//! Output filename conventions.
//!
//! Every file-producing command derives its target from the session's input
//! or output name by plain suffixing, so results land next to their source:
//!
//! | Command | Output |
//! |---|---|
//! | resize | `<input>-scaled_image.png` |
//! | threshold | `<output>` verbatim |
//! | red/green/blue filter | `<output>-<channel>-filter.png` |
//! | histogram | `<histogram dir>/histogram_<channel>.png` (bare name for `.`) |
//!
//! Suffixes are appended to the whole name, extension included:
//! `photo.jpg` resizes to `photo.jpg-scaled_image.png`.

use crate::buffer::Channel;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Target of the resize command.
pub fn scaled_output(input: &Path) -> PathBuf {
    with_suffix(input, "-scaled_image.png")
}

/// Target of a channel filter command.
pub fn filter_output(output: &Path, channel: Channel) -> PathBuf {
    with_suffix(output, &format!("-{}-filter.png", channel.name()))
}

/// Target of one histogram chart.
pub fn histogram_output(dir: &Path, channel: Channel) -> PathBuf {
    let name = format!("histogram_{}.png", channel.name());
    if dir.as_os_str().is_empty() || dir == Path::new(".") {
        PathBuf::from(name)
    } else {
        dir.join(name)
    }
}
