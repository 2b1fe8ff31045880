// Layout engine module
// Derives every pixel position of the calendar from the target screen size

use crate::life::{WEEKS_PER_YEAR, YEARS};
use std::fmt;
use std::str::FromStr;

/// Width the base font sizes and spacings were tuned for
pub const BASE_WIDTH: u32 = 1920;

/// Fraction of the screen the grid may occupy
const USABLE_WIDTH_FRACTION: f32 = 0.85;
const USABLE_HEIGHT_FRACTION: f32 = 0.75;

/// Inflation applied to the limiting cell size for a denser grid
const CELL_INFLATION: f32 = 1.08;

/// Grid top edge as a fraction of screen height
const GRID_TOP_FRACTION: f32 = 0.08;

/// Smallest marker radius in pixels
pub const MIN_CIRCLE_RADIUS: u32 = 3;

/// Decade labels run along the top every this many years
pub const YEAR_LABEL_INTERVAL: u32 = 10;

/// First labelled week row
const FIRST_WEEK_LABEL: u32 = 4;

/// Baseline nudge applied to axis labels
const LABEL_BASELINE_NUDGE: f32 = 3.0;

// Sizes at 1920px wide
const QUOTE_FONT_BASE: u32 = 24;
const ATTRIBUTION_FONT_BASE: u32 = 12;
const MARKER_FONT_BASE: u32 = 14;
const CREDIT_FONT_BASE: u32 = 12;
const CREDIT_FONT_MIN: u32 = 10;
const YEAR_MARKER_OFFSET_BASE: u32 = 10;
const WEEK_MARKER_OFFSET_BASE: u32 = 10;
const QUOTE_SPACING_BASE: u32 = 35;

/// Credit line sits this far into the space between grid and screen bottom
const CREDIT_POSITION_FRACTION: f32 = 0.33;

/// Target canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenDimensions {
    pub width: u32,
    pub height: u32,
}

impl ScreenDimensions {
    /// Used whenever the real resolution cannot be determined
    pub const DEFAULT: ScreenDimensions = ScreenDimensions {
        width: 1920,
        height: 1080,
    };

    /// Largest accepted side in pixels
    pub const MAX_SIDE: u32 = 16384;

    /// `None` unless both sides are in `1..=MAX_SIDE`
    pub fn new(width: u32, height: u32) -> Option<Self> {
        let valid = |side| (1..=Self::MAX_SIDE).contains(&side);
        (valid(width) && valid(height)).then_some(Self { width, height })
    }
}

impl fmt::Display for ScreenDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for ScreenDimensions {
    type Err = String;

    /// Parse `WIDTHxHEIGHT`, e.g. `2560x1440`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(|c| c == 'x' || c == 'X')
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
        let width: u32 = w.trim().parse().map_err(|_| format!("invalid width '{}'", w))?;
        let height: u32 = h.trim().parse().map_err(|_| format!("invalid height '{}'", h))?;
        Self::new(width, height).ok_or_else(|| {
            format!(
                "each side must be between 1 and {}, got '{}'",
                Self::MAX_SIDE,
                s
            )
        })
    }
}

/// Proportional constants chosen by screen width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingProfile {
    pub name: &'static str,
    /// Smallest screen width this profile applies to
    pub min_width: u32,
    pub circle_radius_percent: f32,
    pub cell_padding_percent: f32,
    /// Week labels are drawn every this many weeks
    pub label_frequency: u32,
}

/// Profiles ordered by ascending breakpoint
pub static SIZING_PROFILES: [SizingProfile; 4] = [
    SizingProfile {
        name: "small",
        min_width: 0,
        circle_radius_percent: 0.38,
        cell_padding_percent: 0.18,
        label_frequency: 4,
    },
    SizingProfile {
        name: "medium",
        min_width: 1600,
        circle_radius_percent: 0.40,
        cell_padding_percent: 0.18,
        label_frequency: 4,
    },
    SizingProfile {
        name: "large",
        min_width: 2560,
        circle_radius_percent: 0.42,
        cell_padding_percent: 0.18,
        label_frequency: 4,
    },
    SizingProfile {
        name: "xl",
        min_width: 3440,
        circle_radius_percent: 0.44,
        cell_padding_percent: 0.18,
        label_frequency: 4,
    },
];

impl SizingProfile {
    /// The profile with the largest breakpoint not exceeding `width`
    pub fn for_width(width: u32) -> &'static SizingProfile {
        SIZING_PROFILES
            .iter()
            .rev()
            .find(|profile| width >= profile.min_width)
            .unwrap_or(&SIZING_PROFILES[0])
    }
}

/// Scale a size tuned for a 1920px wide screen to `screen_width`
pub fn scale_for_resolution(base: u32, screen_width: u32) -> u32 {
    let scaled = (base as f32 * screen_width as f32 / BASE_WIDTH as f32).round() as u32;
    scaled.max(1)
}

/// Pixel position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Horizontal anchoring of a text run relative to its x coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Center,
    Right,
}

/// An axis label; `position.y` is the text baseline
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub position: Point,
    pub align: Align,
}

/// Every size and position needed to paint the calendar
///
/// Text `*_y` values are baselines, matching how the renderer places glyph runs.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub screen: ScreenDimensions,
    pub profile: &'static SizingProfile,
    pub cell_size: f32,
    pub circle_radius: u32,
    pub cell_padding: f32,
    /// Top-left corner of the grid
    pub grid_origin: Point,
    pub grid_width: f32,
    pub grid_height: f32,
    pub year_marker_y: f32,
    /// Right edge of the week labels
    pub week_marker_base_x: f32,
    pub quote_y: f32,
    pub attribution_y: f32,
    pub credit_y: f32,
    pub quote_font_size: u32,
    pub attribution_font_size: u32,
    /// Shared by year and week labels
    pub marker_font_size: u32,
    pub credit_font_size: u32,
}

impl LayoutPlan {
    /// Lay out the calendar for `screen`
    pub fn compute(screen: ScreenDimensions) -> LayoutPlan {
        let width = screen.width as f32;
        let height = screen.height as f32;
        let scale = |base| scale_for_resolution(base, screen.width);

        let usable_width = width * USABLE_WIDTH_FRACTION;
        let usable_height = height * USABLE_HEIGHT_FRACTION;
        let cell_size = (usable_width / YEARS as f32).min(usable_height / WEEKS_PER_YEAR as f32)
            * CELL_INFLATION;

        let profile = SizingProfile::for_width(screen.width);
        let circle_radius =
            ((cell_size * profile.circle_radius_percent).round() as u32).max(MIN_CIRCLE_RADIUS);
        let cell_padding = cell_size * profile.cell_padding_percent;

        // Years run left to right, weeks top to bottom
        let grid_width = YEARS as f32 * cell_size;
        let grid_height = WEEKS_PER_YEAR as f32 * cell_size;
        let grid_origin = Point {
            x: (width - grid_width) / 2.0,
            y: height * GRID_TOP_FRACTION,
        };

        let quote_font_size = scale(QUOTE_FONT_BASE);
        let attribution_font_size = scale(ATTRIBUTION_FONT_BASE);

        let year_marker_y = grid_origin.y - scale(YEAR_MARKER_OFFSET_BASE) as f32;
        let quote_spacing = scale(QUOTE_SPACING_BASE) as f32;
        // Keep the quote's ascenders on screen on very wide, short displays
        let quote_y = (year_marker_y - quote_spacing).max(quote_font_size as f32);
        let attribution_y =
            year_marker_y - quote_spacing / 2.0 + attribution_font_size as f32 / 4.0;

        let grid_bottom = grid_origin.y + grid_height;
        let credit_y = grid_bottom + (height - grid_bottom) * CREDIT_POSITION_FRACTION;

        LayoutPlan {
            screen,
            profile,
            cell_size,
            circle_radius,
            cell_padding,
            grid_origin,
            grid_width,
            grid_height,
            year_marker_y,
            week_marker_base_x: grid_origin.x - scale(WEEK_MARKER_OFFSET_BASE) as f32,
            quote_y,
            attribution_y,
            credit_y,
            quote_font_size,
            attribution_font_size,
            marker_font_size: scale(MARKER_FONT_BASE),
            credit_font_size: scale(CREDIT_FONT_BASE).max(CREDIT_FONT_MIN),
        }
    }

    /// Center of the marker for `year` (column) and `week` (row)
    pub fn cell_center(&self, year: u32, week: u32) -> Point {
        Point {
            x: self.grid_origin.x + (year as f32 + 0.5) * self.cell_size,
            y: self.grid_origin.y + (week as f32 + 0.5) * self.cell_size,
        }
    }

    /// Decade labels (10..=80) centered above their year column
    pub fn year_labels(&self) -> impl Iterator<Item = Label> + '_ {
        (1..=YEARS / YEAR_LABEL_INTERVAL).map(move |decade| {
            let year = decade * YEAR_LABEL_INTERVAL;
            Label {
                text: year.to_string(),
                position: Point {
                    x: self.grid_origin.x + (year as f32 - 0.5) * self.cell_size,
                    y: self.year_marker_y + LABEL_BASELINE_NUDGE,
                },
                align: Align::Center,
            }
        })
    }

    /// Week labels right-aligned to the left of the grid
    pub fn week_labels(&self) -> impl Iterator<Item = Label> + '_ {
        (FIRST_WEEK_LABEL..=WEEKS_PER_YEAR)
            .step_by(self.profile.label_frequency.max(1) as usize)
            .map(move |week| Label {
                text: week.to_string(),
                position: Point {
                    x: self.week_marker_base_x,
                    y: self.grid_origin.y
                        + (week as f32 - 1.0) * self.cell_size
                        + self.cell_size / 2.0
                        + LABEL_BASELINE_NUDGE,
                },
                align: Align::Right,
            })
    }
}
