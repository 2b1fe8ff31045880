// Display module
// Detects the screen resolution, falling back to 1920x1080

use crate::error::DisplayError;
use crate::layout::ScreenDimensions;
use log::{debug, info, warn};
use std::process::Command;

/// Resolve the canvas size: an explicit override wins, then detection, then the default
pub fn resolve(requested: Option<&str>) -> ScreenDimensions {
    resolve_with(requested, detect)
}

fn resolve_with<F>(requested: Option<&str>, detect: F) -> ScreenDimensions
where
    F: FnOnce() -> Result<ScreenDimensions, DisplayError>,
{
    if let Some(text) = requested.filter(|s| !s.trim().is_empty()) {
        match text.parse::<ScreenDimensions>() {
            Ok(screen) => {
                info!("Using resolution override: {}", screen);
                return screen;
            }
            Err(e) => warn!("Ignoring resolution override: {}", e),
        }
    }

    info!("Detecting screen resolution...");
    match detect() {
        Ok(screen) => {
            info!("Detected screen resolution: {}", screen);
            screen
        }
        Err(e) => {
            warn!(
                "Resolution detection failed ({}), using {}",
                e,
                ScreenDimensions::DEFAULT
            );
            ScreenDimensions::DEFAULT
        }
    }
}

/// Wayland compositor first, then `xrandr` for X11 sessions
#[cfg(target_os = "linux")]
pub fn detect() -> Result<ScreenDimensions, DisplayError> {
    wayland::detect().or_else(|e| {
        debug!("Wayland output probe failed ({}), trying xrandr", e);
        let mut command = Command::new("xrandr");
        command.arg("--current");
        query("xrandr", &mut command, parse_xrandr)
    })
}

#[cfg(target_os = "macos")]
pub fn detect() -> Result<ScreenDimensions, DisplayError> {
    let mut command = Command::new("system_profiler");
    command.arg("SPDisplaysDataType");
    query("system_profiler", &mut command, parse_system_profiler)
}

#[cfg(target_os = "windows")]
pub fn detect() -> Result<ScreenDimensions, DisplayError> {
    let mut command = Command::new("powershell");
    command
        .args(["-NoProfile", "-NonInteractive", "-ExecutionPolicy", "Bypass", "-Command"])
        .arg(VIDEO_CONTROLLER_QUERY);
    query("powershell", &mut command, parse_width_comma_height)
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub fn detect() -> Result<ScreenDimensions, DisplayError> {
    Err(DisplayError::Unsupported)
}

/// Prints `WIDTH,HEIGHT` of the first active video controller
#[cfg(target_os = "windows")]
const VIDEO_CONTROLLER_QUERY: &str = "$v = Get-CimInstance Win32_VideoController | \
Where-Object { $_.CurrentHorizontalResolution } | Select-Object -First 1; \
\"$($v.CurrentHorizontalResolution),$($v.CurrentVerticalResolution)\"";

/// Run a resolution query and parse its standard output
#[cfg_attr(
    not(any(target_os = "linux", target_os = "macos", target_os = "windows")),
    allow(dead_code)
)]
fn query(
    program: &'static str,
    command: &mut Command,
    parse: fn(&str) -> Option<ScreenDimensions>,
) -> Result<ScreenDimensions, DisplayError> {
    debug!("Running {:?}", command);
    let output = command.output().map_err(|e| DisplayError::Query {
        program,
        reason: e.to_string(),
    })?;
    if !output.status.success() {
        return Err(DisplayError::Query {
            program,
            reason: format!("exited with {}", output.status),
        });
    }
    parse(&String::from_utf8_lossy(&output.stdout)).ok_or(DisplayError::NoOutputs)
}

/// Mode of the first output marked current (`*`) in `xrandr --current`
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_xrandr(output: &str) -> Option<ScreenDimensions> {
    output
        .lines()
        .filter(|line| line.starts_with(char::is_whitespace) && line.contains('*'))
        .find_map(|line| {
            let mode = line.split_whitespace().next()?;
            // interlaced modes carry a trailing `i`
            mode.trim_end_matches(|c: char| !c.is_ascii_digit()).parse().ok()
        })
}

/// First `Resolution: W x H` line of `system_profiler SPDisplaysDataType`
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn parse_system_profiler(output: &str) -> Option<ScreenDimensions> {
    output.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("Resolution:")?;
        let mut numbers = rest
            .split(|c: char| !c.is_ascii_digit())
            .filter(|part| !part.is_empty());
        let width = numbers.next()?.parse().ok()?;
        let height = numbers.next()?.parse().ok()?;
        ScreenDimensions::new(width, height)
    })
}

#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
fn parse_width_comma_height(output: &str) -> Option<ScreenDimensions> {
    let (width, height) = output.trim().split_once(',')?;
    ScreenDimensions::new(width.trim().parse().ok()?, height.trim().parse().ok()?)
}

#[cfg(target_os = "linux")]
mod wayland {
    use super::*;
    use smithay_client_toolkit::{
        delegate_output, delegate_registry,
        output::{OutputHandler, OutputState},
        registry::{ProvidesRegistryState, RegistryState},
        registry_handlers,
    };
    use wayland_client::{
        globals::registry_queue_init, protocol::wl_output, Connection, QueueHandle,
    };

    /// Minimal client state: just enough to receive output modes
    struct OutputProbe {
        registry_state: RegistryState,
        output_state: OutputState,
    }

    impl OutputHandler for OutputProbe {
        fn output_state(&mut self) -> &mut OutputState {
            &mut self.output_state
        }

        fn new_output(
            &mut self,
            _conn: &Connection,
            _qh: &QueueHandle<Self>,
            _output: wl_output::WlOutput,
        ) {
            debug!("New output detected");
        }

        fn update_output(
            &mut self,
            _conn: &Connection,
            _qh: &QueueHandle<Self>,
            _output: wl_output::WlOutput,
        ) {
            debug!("Output updated");
        }

        fn output_destroyed(
            &mut self,
            _conn: &Connection,
            _qh: &QueueHandle<Self>,
            _output: wl_output::WlOutput,
        ) {
            debug!("Output destroyed");
        }
    }

    impl ProvidesRegistryState for OutputProbe {
        fn registry(&mut self) -> &mut RegistryState {
            &mut self.registry_state
        }

        registry_handlers![OutputState];
    }

    delegate_output!(OutputProbe);
    delegate_registry!(OutputProbe);

    /// Ask the compositor for the current mode of the first output
    pub fn detect() -> Result<ScreenDimensions, DisplayError> {
        let conn =
            Connection::connect_to_env().map_err(|e| DisplayError::Connect(e.to_string()))?;
        let (globals, mut event_queue) =
            registry_queue_init(&conn).map_err(|e| DisplayError::Roundtrip(e.to_string()))?;
        let qh = event_queue.handle();

        let mut probe = OutputProbe {
            registry_state: RegistryState::new(&globals),
            output_state: OutputState::new(&globals, &qh),
        };

        // First roundtrip binds the outputs, the second delivers their modes
        for _ in 0..2 {
            event_queue
                .roundtrip(&mut probe)
                .map_err(|e| DisplayError::Roundtrip(e.to_string()))?;
        }

        let output_state = &probe.output_state;
        output_state
            .outputs()
            .filter_map(|output| output_state.info(&output))
            .find_map(|info| {
                let mode = info
                    .modes
                    .iter()
                    .find(|m| m.current)
                    .or_else(|| info.modes.first())?;
                let (width, height) = mode.dimensions;
                ScreenDimensions::new(width.max(0) as u32, height.max(0) as u32)
            })
            .ok_or(DisplayError::NoOutputs)
    }
}
