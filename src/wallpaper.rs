// Wallpaper module
// Hands the finished image to the desktop through one platform backend

use crate::error::WallpaperError;
use clap::ValueEnum;
use log::{debug, info};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// How the image is fitted to the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    #[default]
    Fill,
    Fit,
    Center,
    Stretch,
    Tile,
}

/// Mechanism used to set the desktop background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// `swww img` on wlroots compositors
    Swww,
    /// `gsettings` for GNOME
    Gnome,
    /// `feh` on X11 window managers
    Feh,
    /// AppleScript through `osascript`
    Macos,
    /// PowerShell calling `SystemParametersInfo`
    Windows,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::Swww => "swww",
            Backend::Gnome => "gnome",
            Backend::Feh => "feh",
            Backend::Macos => "macos",
            Backend::Windows => "windows",
        };
        f.write_str(name)
    }
}

impl Backend {
    /// The backend suited to the platform and desktop session we are running in
    pub fn detect() -> Backend {
        if cfg!(target_os = "windows") {
            Backend::Windows
        } else if cfg!(target_os = "macos") {
            Backend::Macos
        } else {
            let desktop = std::env::var("XDG_CURRENT_DESKTOP").ok();
            let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
            Self::for_unix_session(desktop.as_deref(), wayland)
        }
    }

    fn for_unix_session(desktop: Option<&str>, wayland: bool) -> Backend {
        let gnome = desktop
            .map(|d| d.split(':').any(|part| part.eq_ignore_ascii_case("gnome")))
            .unwrap_or(false);
        if gnome {
            Backend::Gnome
        } else if wayland {
            Backend::Swww
        } else {
            Backend::Feh
        }
    }

    fn is_supported(self) -> bool {
        match self {
            Backend::Swww | Backend::Gnome | Backend::Feh => {
                cfg!(all(unix, not(target_os = "macos")))
            }
            Backend::Macos => cfg!(target_os = "macos"),
            Backend::Windows => cfg!(target_os = "windows"),
        }
    }

    /// Build the setter for this backend
    pub fn setter(self) -> Result<Box<dyn WallpaperSetter>, WallpaperError> {
        if !self.is_supported() {
            return Err(WallpaperError::Unsupported(self.to_string()));
        }
        Ok(match self {
            Backend::Swww => Box::new(Swww),
            Backend::Gnome => Box::new(Gnome),
            Backend::Feh => Box::new(Feh),
            Backend::Macos => Box::new(AppleScript),
            Backend::Windows => Box::new(PowerShell),
        })
    }
}

/// Something that can make an image file the desktop background
pub trait WallpaperSetter {
    /// Executable invoked, for error reporting
    fn program(&self) -> &'static str;

    /// Commands to run in order; `path` is absolute
    fn commands(&self, path: &Path, fit: FitMode) -> Vec<Command>;

    fn set(&self, path: &Path, fit: FitMode) -> Result<(), WallpaperError> {
        for mut command in self.commands(path, fit) {
            run(self.program(), &mut command)?;
        }
        Ok(())
    }
}

/// Set `path` as the wallpaper; the file must already exist
///
/// The path is made absolute without resolving symlinks and never carries a `\\?\` prefix.
pub fn apply(
    path: &Path,
    setter: &dyn WallpaperSetter,
    fit: FitMode,
) -> Result<PathBuf, WallpaperError> {
    if !path.is_file() {
        return Err(WallpaperError::NotFound(path.to_path_buf()));
    }
    let absolute =
        std::path::absolute(path).map_err(|_| WallpaperError::NotFound(path.to_path_buf()))?;
    info!(
        "Setting wallpaper from: {} (via {})",
        absolute.display(),
        setter.program()
    );
    setter.set(&absolute, fit)?;
    info!("Wallpaper set successfully");
    Ok(absolute)
}

fn run(program: &'static str, command: &mut Command) -> Result<(), WallpaperError> {
    debug!("Running {:?}", command);
    let output = command
        .output()
        .map_err(|source| WallpaperError::Spawn { program, source })?;
    if !output.status.success() {
        return Err(WallpaperError::Failed {
            program,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

struct Swww;

impl WallpaperSetter for Swww {
    fn program(&self) -> &'static str {
        "swww"
    }

    fn commands(&self, path: &Path, fit: FitMode) -> Vec<Command> {
        let resize = match fit {
            FitMode::Fit => "fit",
            FitMode::Center => "no",
            FitMode::Fill | FitMode::Stretch | FitMode::Tile => "crop",
        };
        let mut command = Command::new("swww");
        command.arg("img").arg(path).arg("--resize").arg(resize);
        vec![command]
    }
}

struct Gnome;

impl WallpaperSetter for Gnome {
    fn program(&self) -> &'static str {
        "gsettings"
    }

    fn commands(&self, path: &Path, fit: FitMode) -> Vec<Command> {
        let options = match fit {
            FitMode::Fill => "zoom",
            FitMode::Fit => "scaled",
            FitMode::Center => "centered",
            FitMode::Stretch => "stretched",
            FitMode::Tile => "wallpaper",
        };
        let uri = format!("file://{}", path.display());
        let set = |key: &str, value: &str| {
            let mut command = Command::new("gsettings");
            command.args(["set", "org.gnome.desktop.background", key, value]);
            command
        };
        vec![
            set("picture-options", options),
            set("picture-uri", &uri),
            set("picture-uri-dark", &uri),
        ]
    }
}

struct Feh;

impl WallpaperSetter for Feh {
    fn program(&self) -> &'static str {
        "feh"
    }

    fn commands(&self, path: &Path, fit: FitMode) -> Vec<Command> {
        let flag = match fit {
            FitMode::Fill => "--bg-fill",
            FitMode::Fit => "--bg-max",
            FitMode::Center => "--bg-center",
            FitMode::Stretch => "--bg-scale",
            FitMode::Tile => "--bg-tile",
        };
        let mut command = Command::new("feh");
        command.arg("--no-fehbg").arg(flag).arg(path);
        vec![command]
    }
}

struct AppleScript;

impl WallpaperSetter for AppleScript {
    fn program(&self) -> &'static str {
        "osascript"
    }

    fn commands(&self, path: &Path, fit: FitMode) -> Vec<Command> {
        if fit != FitMode::Fill {
            debug!("osascript backend ignores fit mode {:?}", fit);
        }
        let script = format!(
            "tell application \"System Events\" to tell every desktop to set picture to \"{}\"",
            path.display().to_string().replace('"', "\\\"")
        );
        let mut command = Command::new("osascript");
        command.arg("-e").arg(script);
        vec![command]
    }
}

struct PowerShell;

impl WallpaperSetter for PowerShell {
    fn program(&self) -> &'static str {
        "powershell"
    }

    fn commands(&self, path: &Path, fit: FitMode) -> Vec<Command> {
        // WallpaperStyle / TileWallpaper registry values
        let (style, tile) = match fit {
            FitMode::Fill => (10, 0),
            FitMode::Fit => (6, 0),
            FitMode::Stretch => (2, 0),
            FitMode::Center => (0, 0),
            FitMode::Tile => (0, 1),
        };
        let script = format!(
            r#"$desktop = 'HKCU:\Control Panel\Desktop'
Set-ItemProperty -Path $desktop -Name WallpaperStyle -Value {style}
Set-ItemProperty -Path $desktop -Name TileWallpaper -Value {tile}
Add-Type -TypeDefinition @"
using System;
using System.Runtime.InteropServices;
public class Wallpaper {{
    [DllImport("user32.dll", CharSet = CharSet.Auto)]
    public static extern int SystemParametersInfo(
        int uAction, int uParam, string lpvParam, int fuWinIni);
}}
"@
if ([Wallpaper]::SystemParametersInfo(0x0014, 0, '{path}', 0x03) -eq 0) {{ exit 1 }}"#,
            path = path.display().to_string().replace('\'', "''"),
        );
        let mut command = Command::new("powershell");
        command
            .args(["-NoProfile", "-NonInteractive", "-ExecutionPolicy", "Bypass", "-Command"])
            .arg(script);
        vec![command]
    }
}
