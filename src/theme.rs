// Theme module
// Named color palettes for the calendar

use image::Rgba;
use log::warn;

/// Semantic colors used by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba<u8>,
    pub past_weeks: Rgba<u8>,
    pub current_week: Rgba<u8>,
    pub future_weeks: Rgba<u8>,
    pub text: Rgba<u8>,
    pub attribution: Rgba<u8>,
    pub grid_markers: Rgba<u8>,
    pub labels: Rgba<u8>,
    /// Source credit line below the grid
    pub credit: Rgba<u8>,
}

const fn rgb(hex: u32) -> Rgba<u8> {
    Rgba([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255])
}

pub const DARK: Theme = Theme {
    name: "dark",
    background: rgb(0x121110),
    past_weeks: rgb(0xf5f1e6),
    current_week: rgb(0xe5c98a),
    future_weeks: rgb(0xf0d090),
    text: rgb(0xffffff),
    attribution: rgb(0xe5c98a),
    grid_markers: rgb(0xe5c98a),
    labels: rgb(0xe5c98a),
    credit: rgb(0xb08d57),
};

/// Aged parchment with sepia ink
pub const LIGHT: Theme = Theme {
    name: "light",
    background: rgb(0xfdf7e3),
    past_weeks: rgb(0x3b3024),
    current_week: rgb(0xc1a97b),
    future_weeks: rgb(0xc1a97b),
    text: rgb(0x5a4636),
    attribution: rgb(0x857c6d),
    grid_markers: rgb(0xc9b79f),
    labels: rgb(0xa89060),
    credit: rgb(0x4c3a2c),
};

impl Theme {
    /// Look up a palette by name, falling back to dark
    pub fn by_name(name: &str) -> Theme {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => DARK,
            "light" => LIGHT,
            other => {
                warn!("Unknown theme '{}', using dark", other);
                DARK
            }
        }
    }

    /// Every semantic role with its color, in declaration order
    pub fn roles(&self) -> [(&'static str, Rgba<u8>); 9] {
        [
            ("background", self.background),
            ("pastWeeks", self.past_weeks),
            ("currentWeek", self.current_week),
            ("futureWeeks", self.future_weeks),
            ("text", self.text),
            ("attribution", self.attribution),
            ("gridMarkers", self.grid_markers),
            ("labels", self.labels),
            ("credit", self.credit),
        ]
    }
}

/// `#rrggbb` form of a color, ignoring alpha
pub fn to_hex(color: Rgba<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back_to_dark() {
        assert_eq!(Theme::by_name("light"), LIGHT);
        assert_eq!(Theme::by_name(" Light "), LIGHT);
        assert_eq!(Theme::by_name("dark"), DARK);
        assert_eq!(Theme::by_name("solarized"), DARK);
        assert_eq!(Theme::by_name(""), DARK);
    }

    #[test]
    fn palette_constants_hold_their_colors() {
        assert_eq!(DARK.background, Rgba([0x12, 0x11, 0x10, 255]));
        assert_eq!(DARK.past_weeks, Rgba([0xf5, 0xf1, 0xe6, 255]));
        assert_eq!(DARK.grid_markers, Rgba([0xe5, 0xc9, 0x8a, 255]));
        assert_eq!(DARK.credit, Rgba([0xb0, 0x8d, 0x57, 255]));
        assert_eq!(LIGHT.background, Rgba([0xfd, 0xf7, 0xe3, 255]));
        assert_eq!(LIGHT.grid_markers, Rgba([0xc9, 0xb7, 0x9f, 255]));
        assert_eq!(LIGHT.credit, Rgba([0x4c, 0x3a, 0x2c, 255]));
    }

    #[test]
    fn roles_list_every_color_as_hex() {
        let light: Vec<_> = LIGHT
            .roles()
            .iter()
            .map(|&(role, color)| format!("{role}={}", to_hex(color)))
            .collect();
        assert_eq!(
            light,
            [
                "background=#fdf7e3",
                "pastWeeks=#3b3024",
                "currentWeek=#c1a97b",
                "futureWeeks=#c1a97b",
                "text=#5a4636",
                "attribution=#857c6d",
                "gridMarkers=#c9b79f",
                "labels=#a89060",
                "credit=#4c3a2c",
            ]
        );
        assert_eq!(DARK.roles()[6], ("gridMarkers", rgb(0xe5c98a)));
    }
}
