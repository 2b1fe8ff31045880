// Command line interface module
// Handles parsing of command line arguments and test-mode environment overrides

use crate::wallpaper::{Backend, FitMode};
use clap::Parser;
use std::path::PathBuf;

/// Default name of the generated image, written to the working directory
pub const DEFAULT_OUTPUT: &str = "life_calendar_wallpaper.png";

/// Default directory for multi-resolution test renders
pub const DEFAULT_RESOLUTION_TEST_DIR: &str = "resolution_tests";

/// lifeweeks - Your life in weeks as a desktop wallpaper
#[derive(Parser, Debug)]
#[command(name = "lifeweeks")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    pub config: PathBuf,

    /// Where to write the rendered image
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Pretend the current time is this date (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long, env = "TEST_DATE", value_name = "DATE")]
    pub date: Option<String>,

    /// Render at this resolution instead of detecting it (e.g. 2560x1440)
    #[arg(short, long, env = "TEST_RESOLUTION", value_name = "WxH")]
    pub resolution: Option<String>,

    /// Theme name, overriding the config file
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Wallpaper backend, overriding the config file and platform detection
    #[arg(short, long, value_enum)]
    pub backend: Option<Backend>,

    /// How the image is fitted to the screen
    #[arg(short, long, value_enum)]
    pub fit: Option<FitMode>,

    /// Only render the image, do not set it as wallpaper
    #[arg(long, default_value = "false")]
    pub no_apply: bool,

    /// Render test images at common screen resolutions into DIR and exit
    #[arg(
        long,
        value_name = "DIR",
        num_args = 0..=1,
        default_missing_value = DEFAULT_RESOLUTION_TEST_DIR
    )]
    pub multi_resolution: Option<PathBuf>,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["lifeweeks"]).unwrap();
        assert_eq!(args.config, PathBuf::from("config.json"));
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(!args.no_apply);
        assert!(args.multi_resolution.is_none());
        assert!(args.backend.is_none());
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "lifeweeks",
            "--date",
            "2024-06-15",
            "--resolution",
            "2560x1440",
            "--backend",
            "feh",
            "--fit",
            "center",
            "--no-apply",
        ])
        .unwrap();
        assert_eq!(args.date.as_deref(), Some("2024-06-15"));
        assert_eq!(args.resolution.as_deref(), Some("2560x1440"));
        assert_eq!(args.backend, Some(Backend::Feh));
        assert_eq!(args.fit, Some(FitMode::Center));
        assert!(args.no_apply);
    }

    #[test]
    fn multi_resolution_directory_is_optional() {
        let args = Args::try_parse_from(["lifeweeks", "--multi-resolution"]).unwrap();
        assert_eq!(args.multi_resolution, Some(PathBuf::from(DEFAULT_RESOLUTION_TEST_DIR)));

        let args = Args::try_parse_from(["lifeweeks", "--multi-resolution", "out"]).unwrap();
        assert_eq!(args.multi_resolution, Some(PathBuf::from("out")));
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(Args::try_parse_from(["lifeweeks", "--backend", "kde"]).is_err());
    }
}
