// lifeweeks - Your life in weeks as a desktop wallpaper
// Renders an 80 x 52 grid of weeks relative to a birthdate and sets it as the desktop background

mod canvas;
mod cli;
mod config;
mod display;
mod error;
mod layout;
mod life;
mod quote;
mod renderer;
mod text;
mod theme;
mod wallpaper;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use cli::Args;
use config::Config;
use layout::{LayoutPlan, ScreenDimensions};
use life::LifePosition;
use log::{debug, error, info};
use renderer::{Quote, Renderer};
use std::fs;
use std::path::Path;
use theme::Theme;
use wallpaper::Backend;

/// Common screen resolutions rendered by `--multi-resolution`
const TEST_RESOLUTIONS: [(u32, u32, &str); 10] = [
    (1920, 1080, "Full HD"),
    (1366, 768, "Laptop"),
    (1536, 864, "Mid-range Laptop"),
    (1440, 900, "MacBook"),
    (1280, 720, "HD"),
    (1600, 900, "Mid-tier Laptop"),
    (2560, 1440, "QHD"),
    (1360, 768, "Old Laptop"),
    (1024, 768, "Legacy 4:3"),
    (1680, 1050, "Widescreen"),
];

fn main() {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    info!("Loading configuration from {}", args.config.display());
    let config = Config::load(&args.config)?;

    let birth = life::parse_birthdate(&config.birthdate).context("invalid birthdate in config")?;
    let now = current_time(args.date.as_deref())?;
    let theme = Theme::by_name(args.theme.as_deref().unwrap_or(&config.theme));
    for (role, color) in theme.roles() {
        debug!("Theme {} {}: {}", theme.name, role, theme::to_hex(color));
    }

    let position = LifePosition::calculate(birth, now)?;
    info!(
        "Current life position: {} weeks lived (year {}, week {}), {} weeks until next birthday",
        position.total_weeks_lived,
        position.current_year_of_life,
        position.current_week_of_year,
        position.weeks_until_next_birthday
    );
    debug!("Progress through this week: {:.2}", position.week_progress);

    let calendar_week = quote::calendar_week(now);
    let index = quote::select_index(calendar_week, &position, config.quotes.len());
    let quote = Quote {
        text: &config.quotes[index],
        attribution: &config.attributions[index],
    };
    debug!("Selected quote: \"{}\" - {}", quote.text, quote.attribution);

    let mut renderer = Renderer::new(&theme);

    if let Some(dir) = &args.multi_resolution {
        return render_test_suite(&mut renderer, &position, quote, dir);
    }

    let screen = display::resolve(args.resolution.as_deref());
    let plan = layout_for(screen);

    info!("Generating {} wallpaper...", theme.name);
    let path = renderer.render_to_file(&plan, &position, quote, &args.output)?;

    if args.no_apply {
        info!("Skipping wallpaper application (--no-apply)");
        return Ok(());
    }

    let backend = args
        .backend
        .or(config.wallpaper.backend)
        .unwrap_or_else(Backend::detect);
    let fit = args.fit.unwrap_or(config.wallpaper.fit);
    info!("Setting wallpaper with the {} backend...", backend);
    let setter = backend.setter()?;
    wallpaper::apply(&path, setter.as_ref(), fit)?;

    info!("Done! Your life calendar wallpaper has been set.");
    Ok(())
}

/// The injected "now": the override when given, else the local wall clock
fn current_time(override_date: Option<&str>) -> Result<NaiveDateTime> {
    match override_date.filter(|d| !d.trim().is_empty()) {
        Some(date) => {
            info!("TESTING MODE: simulating date {}", date);
            Ok(life::parse_instant(date)?)
        }
        None => Ok(Local::now().naive_local()),
    }
}

fn layout_for(screen: ScreenDimensions) -> LayoutPlan {
    let plan = LayoutPlan::compute(screen);
    debug!(
        "Layout for {}: profile {}, cell {:.2}px, radius {}px, padding {:.2}px, \
         grid {:.0}x{:.0} at ({:.1}, {:.1})",
        screen,
        plan.profile.name,
        plan.cell_size,
        plan.circle_radius,
        plan.cell_padding,
        plan.grid_width,
        plan.grid_height,
        plan.grid_origin.x,
        plan.grid_origin.y
    );
    plan
}

/// Render one image per common resolution into `dir` without touching the wallpaper
fn render_test_suite(
    renderer: &mut Renderer<'_>,
    position: &LifePosition,
    quote: Quote<'_>,
    dir: &Path,
) -> Result<()> {
    info!("TESTING MODE: rendering {} resolutions", TEST_RESOLUTIONS.len());
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    for (width, height, name) in TEST_RESOLUTIONS {
        let screen = ScreenDimensions { width, height };
        info!("Testing {} ({})...", name, screen);
        let plan = layout_for(screen);
        let path = dir.join(format!("life_calendar_{}.png", screen));
        renderer.render_to_file(&plan, position, quote, &path)?;
    }

    info!("Test wallpapers saved to: {}", dir.display());
    Ok(())
}
