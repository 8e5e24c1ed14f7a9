use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use log::info;

use retrocanvas::test_pattern::render_still;
use retrocanvas::CanvasConfig;

/// Render the retrocanvas test pattern headless or in a window
#[derive(Parser, Debug)]
#[command(name = "retrocanvas", version, about)]
struct Args {
    /// JSON config file; missing fields use defaults
    #[arg(short, long, default_value = "retrocanvas.json")]
    config: PathBuf,

    /// Canvas width in pixels
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Render one frame of the test pattern to this PNG and exit
    #[arg(short, long, conflicts_with = "window")]
    screenshot: Option<PathBuf>,

    /// Open a window and run the frame loop
    #[arg(long)]
    window: bool,

    /// Draw the FPS overlay
    #[arg(long)]
    debug_overlay: bool,

    /// Disable vsync
    #[arg(long)]
    no_vsync: bool,
}

impl Args {
    /// Command-line values take precedence over the config file
    fn apply(&self, config: &mut CanvasConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.debug_overlay {
            config.debug_overlay = true;
        }
        if self.no_vsync {
            config.vsync = false;
        }
        if let Some(path) = &self.screenshot {
            config.screenshot_path.clone_from(path);
        }
    }
}

fn render_headless(config: &CanvasConfig) -> anyhow::Result<()> {
    info!("rendering {}x{} test pattern", config.width, config.height);
    let buffer = render_still(config).context("failed to render test pattern")?;
    buffer
        .save_png(&config.screenshot_path)
        .with_context(|| format!("failed to write {}", config.screenshot_path.display()))?;
    Ok(())
}

#[cfg(feature = "window")]
fn run_window(config: &CanvasConfig) -> anyhow::Result<()> {
    use retrocanvas::display::{Display, InputEvent, RenderTarget};
    use retrocanvas::{DebugOverlay, FrameTimer, Pacing, PixelBuffer, TestPattern};
    use sdl2::keyboard::Keycode;

    let (mut display, texture_creator) = Display::with_options(
        "retrocanvas",
        config.width,
        config.height,
        config.scale,
        config.vsync,
    )?;
    let mut buffer = PixelBuffer::try_with_size(config.width, config.height)?;
    let mut target = RenderTarget::with_size(&texture_creator, buffer.width(), buffer.height())?;

    let mut pattern = TestPattern::new();
    let mut overlay = DebugOverlay::new();
    let mut show_overlay = config.debug_overlay;
    let mut pacing = Pacing::default();
    let mut timer = FrameTimer::new();
    let mut pointer = (0, 0);

    info!(
        "window open: {}x{} canvas, vsync {}",
        buffer.width(),
        buffer.height(),
        if display.vsync() { "on" } else { "off" }
    );
    info!("F3 overlay, F4 pacing, F5 half size, F12 screenshot, Escape quits");

    'main: loop {
        let dt = timer.tick();
        overlay.record_frame(f64::from(dt) * 1000.0);

        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                InputEvent::KeyDown(Keycode::F3) => show_overlay = !show_overlay,
                InputEvent::KeyDown(Keycode::F4) => pacing = pacing.toggled(),
                InputEvent::KeyDown(Keycode::F5) => {
                    let (w, h) = if buffer.width() == config.width {
                        ((config.width / 2).max(1), (config.height / 2).max(1))
                    } else {
                        (config.width, config.height)
                    };
                    if let Err(e) = buffer.resize(w, h, config.clear_color) {
                        log::error!("canvas resize failed: {}", e);
                    }
                },
                InputEvent::KeyDown(Keycode::F12) => {
                    if let Err(e) = buffer.save_png(&config.screenshot_path) {
                        log::error!("screenshot failed: {}", e);
                    }
                },
                InputEvent::MouseMove { x, y } => pointer = (x, y),
                _ => {},
            }
        }

        match pacing {
            Pacing::Lockstep => pattern.update(dt),
            Pacing::Catchup => {
                for _ in 0..timer.catch_up(dt) {
                    pattern.update(retrocanvas::debug::FIXED_STEP);
                }
            },
        }

        buffer.clear(config.clear_color);
        pattern.render(&mut buffer);

        let viewport = display.viewport();
        let (px, py) = viewport.window_to_canvas(
            pointer,
            display.window_size(),
            (buffer.width(), buffer.height()),
        );
        if viewport.contains(px, py) {
            buffer.circle(px as i64, py as i64, 3, retrocanvas::Color::RED);
        }

        if show_overlay {
            overlay.draw(&mut buffer, display.vsync(), pacing);
        }

        if !target.matches(&buffer) {
            display.set_logical_size(buffer.width(), buffer.height())?;
            target = RenderTarget::with_size(&texture_creator, buffer.width(), buffer.height())?;
        }
        display.present(&mut target, &buffer)?;
    }

    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_window(_config: &CanvasConfig) -> anyhow::Result<()> {
    bail!("built without the `window` feature; rebuild with --features window")
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = if args.config.exists() {
        CanvasConfig::load(&args.config)
            .with_context(|| format!("failed to load {}", args.config.display()))?
    } else {
        CanvasConfig::default()
    };
    args.apply(&mut config);

    if config.width == 0 || config.height == 0 {
        bail!("canvas size must be non-zero, got {}x{}", config.width, config.height);
    }

    if args.window {
        run_window(&config)
    } else {
        render_headless(&config)
    }
}
