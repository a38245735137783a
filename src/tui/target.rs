//! Alternate display target (`-T`).
//!
//! Frames can be sent to another terminal device instead of stdout. The
//! path must name a character device; anything else is rejected before
//! the clock starts.
//!
//! Once open, the device is the whole terminal: its window size sizes the
//! layout, it is put into raw mode, and keys are read from it. The
//! controlling terminal is left alone.

use std::fmt;
use std::fs::{File, Metadata, OpenOptions};
use std::path::{Path, PathBuf};

use crate::core::layout::Viewport;

#[derive(Debug)]
pub enum TargetError {
    Stat { path: PathBuf, source: std::io::Error },
    NotCharDevice(PathBuf),
    Open { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetError::Stat { path, source } => {
                write!(f, "couldn't stat '{}': {source}", path.display())
            }
            TargetError::NotCharDevice(path) => {
                write!(f, "'{}' doesn't appear to be a character device", path.display())
            }
            TargetError::Open { path, source } => {
                write!(f, "'{}' couldn't be opened: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for TargetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TargetError::Stat { source, .. } | TargetError::Open { source, .. } => Some(source),
            TargetError::NotCharDevice(_) => None,
        }
    }
}

/// Checks that `path` is a character device and opens it read-write.
pub fn open_target(path: &Path) -> Result<File, TargetError> {
    let metadata = std::fs::metadata(path).map_err(|source| TargetError::Stat {
        path: path.to_path_buf(),
        source,
    })?;
    if !is_char_device(&metadata) {
        return Err(TargetError::NotCharDevice(path.to_path_buf()));
    }
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|source| TargetError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// The device's window size.
#[cfg(unix)]
pub fn window_size(device: &File) -> std::io::Result<Viewport> {
    let size = rustix::termios::tcgetwinsize(device)?;
    Ok(Viewport::new(size.ws_row, size.ws_col))
}

#[cfg(not(unix))]
pub fn window_size(_device: &File) -> std::io::Result<Viewport> {
    Err(std::io::ErrorKind::Unsupported.into())
}

/// Raw mode on the target device. The saved settings are put back on drop.
pub struct RawMode {
    #[cfg(unix)]
    device: File,
    #[cfg(unix)]
    saved: rustix::termios::Termios,
}

#[cfg(unix)]
impl RawMode {
    pub fn enter(device: &File) -> std::io::Result<Self> {
        use rustix::termios::{OptionalActions, tcgetattr, tcsetattr};

        let device = device.try_clone()?;
        let saved = tcgetattr(&device)?;
        let mut raw = saved.clone();
        raw.make_raw();
        tcsetattr(&device, OptionalActions::Now, &raw)?;
        log::info!("Target device switched to raw mode");
        Ok(Self { device, saved })
    }
}

#[cfg(not(unix))]
impl RawMode {
    pub fn enter(_device: &File) -> std::io::Result<Self> {
        Err(std::io::ErrorKind::Unsupported.into())
    }
}

#[cfg(unix)]
impl Drop for RawMode {
    fn drop(&mut self) {
        use rustix::termios::{OptionalActions, tcsetattr};

        if let Err(e) = tcsetattr(&self.device, OptionalActions::Now, &self.saved) {
            log::warn!("Could not restore target device settings: {}", e);
        }
    }
}

#[cfg(unix)]
fn is_char_device(metadata: &Metadata) -> bool {
    use std::os::unix::fs::FileTypeExt;
    metadata.file_type().is_char_device()
}

#[cfg(not(unix))]
fn is_char_device(_metadata: &Metadata) -> bool {
    false
}
