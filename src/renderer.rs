// Renderer module
// Paints the life calendar from a layout plan, life position and theme

use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::layout::{Align, LayoutPlan, Point};
use crate::life::{LifePosition, WEEKS_PER_YEAR, YEARS};
use crate::text::{FontFamily, TextPainter, TextStyle};
use crate::theme::Theme;
use log::info;
use std::path::{Path, PathBuf};

/// Source credit drawn under the grid
pub const CREDIT_TEXT: &str = "Inspired by Tim Urban's 'Your Life in Weeks' — waitbutwhy.com";

const LABEL_OPACITY: f32 = 0.7;
const CREDIT_OPACITY: f32 = 0.9;

/// Outline widths for unfilled markers
const CURRENT_WEEK_LINE_WIDTH: f32 = 4.0;
const FUTURE_WEEK_LINE_WIDTH: f32 = 1.0;

/// Text lines may use at most this fraction of the screen width
const MAX_TEXT_WIDTH_FRACTION: f32 = 0.95;

/// How a single week cell is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Filled marker
    Past,
    /// Thick outline
    Current,
    /// Thin outline
    Future,
}

impl CellState {
    pub fn classify(index: u32, total_weeks_lived: u32) -> CellState {
        use std::cmp::Ordering;
        match index.cmp(&total_weeks_lived) {
            Ordering::Less => CellState::Past,
            Ordering::Equal => CellState::Current,
            Ordering::Greater => CellState::Future,
        }
    }
}

/// The quote shown above the grid
#[derive(Debug, Clone, Copy)]
pub struct Quote<'a> {
    pub text: &'a str,
    pub attribution: &'a str,
}

/// Paints calendars with one theme
pub struct Renderer<'a> {
    theme: &'a Theme,
    painter: TextPainter,
}

impl<'a> Renderer<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            painter: TextPainter::new(),
        }
    }

    /// Paint the full calendar onto a fresh canvas sized to the plan's screen
    pub fn render(
        &mut self,
        plan: &LayoutPlan,
        position: &LifePosition,
        quote: Quote<'_>,
    ) -> Result<Canvas, RenderError> {
        let mut canvas = Canvas::new(plan.screen.width, plan.screen.height, self.theme.background)?;

        let label_style = TextStyle {
            size: plan.marker_font_size as f32,
            family: FontFamily::SansSerif,
            italic: false,
            color: self.theme.labels,
            opacity: LABEL_OPACITY,
        };
        for label in plan.year_labels().chain(plan.week_labels()) {
            self.painter.draw_line(
                &mut canvas,
                &label.text,
                label.position,
                label.align,
                &label_style,
                f32::MAX,
            );
        }

        paint_grid(&mut canvas, plan, position, self.theme);

        let center_x = plan.screen.width as f32 / 2.0;
        let max_width = plan.screen.width as f32 * MAX_TEXT_WIDTH_FRACTION;

        let quote_style = TextStyle {
            size: plan.quote_font_size as f32,
            family: FontFamily::Serif,
            italic: false,
            color: self.theme.text,
            opacity: 1.0,
        };
        self.painter.draw_line(
            &mut canvas,
            quote.text,
            Point { x: center_x, y: plan.quote_y },
            Align::Center,
            &quote_style,
            max_width,
        );

        let attribution_style = TextStyle {
            size: plan.attribution_font_size as f32,
            family: FontFamily::SansSerif,
            italic: true,
            color: self.theme.attribution,
            opacity: 1.0,
        };
        self.painter.draw_line(
            &mut canvas,
            &format!("— {}", quote.attribution),
            Point { x: center_x, y: plan.attribution_y },
            Align::Center,
            &attribution_style,
            max_width,
        );

        let credit_style = TextStyle {
            size: plan.credit_font_size as f32,
            family: FontFamily::Serif,
            italic: false,
            color: self.theme.credit,
            opacity: CREDIT_OPACITY,
        };
        self.painter.draw_line(
            &mut canvas,
            CREDIT_TEXT,
            Point { x: center_x, y: plan.credit_y },
            Align::Center,
            &credit_style,
            max_width,
        );

        Ok(canvas)
    }

    /// Render and write the image to `path`, overwriting any existing file
    pub fn render_to_file(
        &mut self,
        plan: &LayoutPlan,
        position: &LifePosition,
        quote: Quote<'_>,
        path: &Path,
    ) -> Result<PathBuf, RenderError> {
        let canvas = self.render(plan, position, quote)?;
        canvas.save(path)?;
        info!(
            "Wallpaper saved to: {} ({}x{})",
            path.display(),
            canvas.width(),
            canvas.height()
        );
        Ok(path.to_path_buf())
    }
}

/// Draw one marker per week of an 80 year life
pub fn paint_grid(canvas: &mut Canvas, plan: &LayoutPlan, position: &LifePosition, theme: &Theme) {
    let radius = plan.circle_radius as f32;
    for week in 0..WEEKS_PER_YEAR {
        for year in 0..YEARS {
            let center = plan.cell_center(year, week);
            let index = year * WEEKS_PER_YEAR + week;
            match CellState::classify(index, position.total_weeks_lived) {
                CellState::Past => canvas.fill_circle(center.x, center.y, radius, theme.past_weeks),
                CellState::Current => canvas.stroke_circle(
                    center.x,
                    center.y,
                    radius,
                    CURRENT_WEEK_LINE_WIDTH,
                    theme.current_week,
                ),
                CellState::Future => canvas.stroke_circle(
                    center.x,
                    center.y,
                    radius,
                    FUTURE_WEEK_LINE_WIDTH,
                    theme.future_weeks,
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ScreenDimensions;
    use crate::theme::{DARK, LIGHT};

    fn position_at(total_weeks_lived: u32) -> LifePosition {
        LifePosition {
            total_weeks_lived,
            current_year_of_life: total_weeks_lived / WEEKS_PER_YEAR,
            current_week_of_year: total_weeks_lived % WEEKS_PER_YEAR,
            week_progress: 0.0,
            weeks_until_next_birthday: 1,
        }
    }

    fn cell_for(plan: &LayoutPlan, index: u32) -> Point {
        plan.cell_center(index / WEEKS_PER_YEAR, index % WEEKS_PER_YEAR)
    }

    fn painted(theme: &Theme, total: u32) -> (LayoutPlan, Canvas) {
        let plan = LayoutPlan::compute(ScreenDimensions::DEFAULT);
        let mut canvas =
            Canvas::new(plan.screen.width, plan.screen.height, theme.background).unwrap();
        paint_grid(&mut canvas, &plan, &position_at(total), theme);
        (plan, canvas)
    }

    #[test]
    fn classifies_cells_against_weeks_lived() {
        assert_eq!(CellState::classify(0, 0), CellState::Current);
        assert_eq!(CellState::classify(99, 100), CellState::Past);
        assert_eq!(CellState::classify(100, 100), CellState::Current);
        assert_eq!(CellState::classify(101, 100), CellState::Future);
    }

    #[test]
    fn past_weeks_are_filled() {
        let (plan, canvas) = painted(&DARK, 100);
        let past = cell_for(&plan, 99);
        assert_eq!(canvas.pixel(past.x as u32, past.y as u32), DARK.past_weeks);
    }

    #[test]
    fn current_week_is_a_thick_ring() {
        for theme in [&DARK, &LIGHT] {
            let (plan, canvas) = painted(theme, 100);
            let current = cell_for(&plan, 100);
            // hollow in the middle
            assert_eq!(canvas.pixel(current.x as u32, current.y as u32), theme.background);
            // solid a pixel or more inside the radius, which a 1px outline never reaches
            let inner_ring = (current.x + plan.circle_radius as f32 - 1.0) as u32;
            assert_eq!(canvas.pixel(inner_ring, current.y as u32), theme.current_week);
        }
    }

    #[test]
    fn future_weeks_are_thin_rings() {
        let (plan, canvas) = painted(&DARK, 100);
        let future = cell_for(&plan, 101);
        assert_eq!(canvas.pixel(future.x as u32, future.y as u32), DARK.background);
        let inner_ring = (future.x + plan.circle_radius as f32 - 1.0) as u32;
        assert_ne!(canvas.pixel(inner_ring, future.y as u32), DARK.future_weeks);
        let on_ring = (future.x + plan.circle_radius as f32) as u32;
        assert_ne!(canvas.pixel(on_ring, future.y as u32), DARK.background);
    }

    #[test]
    fn newborn_has_no_filled_cells() {
        let (plan, canvas) = painted(&DARK, 0);
        let first = cell_for(&plan, 0);
        assert_eq!(canvas.pixel(first.x as u32, first.y as u32), DARK.background);
    }

    #[test]
    fn full_render_keeps_markers_on_top_of_labels() {
        let position = position_at(100);
        let quote = Quote {
            text: "The days are long but the decades are short.",
            attribution: "Sam Altman",
        };
        let mut renderer = Renderer::new(&DARK);
        let (plan, grid_only) = painted(&DARK, 100);
        let canvas = renderer.render(&plan, &position, quote).unwrap();

        assert_eq!((canvas.width(), canvas.height()), (1920, 1080));
        assert_eq!(canvas.pixel(0, 0), DARK.background);
        for index in [0, 51, 99, 100, 101, 2000, YEARS * WEEKS_PER_YEAR - 1] {
            let center = cell_for(&plan, index);
            let (x, y) = (center.x as u32, center.y as u32);
            assert_eq!(canvas.pixel(x, y), grid_only.pixel(x, y), "cell {index}");
        }
        let past = cell_for(&plan, 99);
        assert_eq!(canvas.pixel(past.x as u32, past.y as u32), DARK.past_weeks);
    }

    #[test]
    fn render_to_file_overwrites_the_same_path() {
        let dir = std::env::temp_dir().join(format!("lifeweeks-render-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("life_calendar_wallpaper.png");
        let quote = Quote {
            text: "Memento mori",
            attribution: "Seneca",
        };
        let position = position_at(1500);
        let mut renderer = Renderer::new(&LIGHT);

        for (width, height) in [(1280, 720), (1024, 768)] {
            let plan = LayoutPlan::compute(ScreenDimensions::new(width, height).unwrap());
            let written = renderer.render_to_file(&plan, &position, quote, &path).unwrap();
            assert_eq!(written, path);
        }

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (1024, 768));
        let plan = LayoutPlan::compute(ScreenDimensions::new(1024, 768).unwrap());
        let past = cell_for(&plan, 1499);
        assert_eq!(*decoded.get_pixel(past.x as u32, past.y as u32), LIGHT.past_weeks);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn past_eighty_years_fills_everything() {
        let (plan, canvas) = painted(&LIGHT, YEARS * WEEKS_PER_YEAR + 10);
        let last = cell_for(&plan, YEARS * WEEKS_PER_YEAR - 1);
        assert_eq!(canvas.pixel(last.x as u32, last.y as u32), LIGHT.past_weeks);
    }
}
