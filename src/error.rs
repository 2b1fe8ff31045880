// Error types module
// Typed failures for each stage of a wallpaper run

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load or validate the JSON configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Failure to turn a birthdate or "now" override into a life position
#[derive(Debug, Error)]
pub enum DateError {
    #[error("invalid date '{input}': {source}")]
    Parse {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("current date {now} is before birthdate {birth}")]
    BeforeBirth {
        birth: chrono::NaiveDate,
        now: chrono::NaiveDateTime,
    },
}

/// Failure to paint or persist the calendar image
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("canvas dimensions must be non-zero, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("canvas of {width}x{height} exceeds the {max}px side limit")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("failed to write image to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Failure to hand the finished image to the desktop
#[derive(Debug, Error)]
pub enum WallpaperError {
    #[error("wallpaper image not found at {0}")]
    NotFound(PathBuf),

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("wallpaper backend '{0}' is not available on this platform")]
    Unsupported(String),
}

/// Failure to read the screen resolution from the compositor
///
/// Never fatal: callers substitute the default resolution.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("no display server connection: {0}")]
    Connect(String),

    #[error("display server roundtrip failed: {0}")]
    Roundtrip(String),

    #[error("{program} failed: {reason}")]
    Query { program: &'static str, reason: String },

    #[error("no output reported a usable mode")]
    NoOutputs,

    #[cfg_attr(
        any(target_os = "linux", target_os = "macos", target_os = "windows"),
        allow(dead_code)
    )]
    #[error("resolution detection is not supported on this platform")]
    Unsupported,
}
