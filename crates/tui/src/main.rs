mod app;
mod logger;
mod renderer;
mod scene;

use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::LevelFilter;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Position, Rect},
};
use vitae_core::PageConfig;
use vitae_protocol::{PageEvent, PageMarkup, Size};

use crate::app::{App, CELL_HEIGHT, CELL_WIDTH, invalid_fields, sample_fields};

const DEMO_PAGE: &str = include_str!("../assets/demo-page.json");
const FRAME: Duration = Duration::from_millis(16);

struct Args {
    markup: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        markup: None,
        config: None,
    };
    let mut rest = std::env::args().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--config" => {
                let path = rest.next().context("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "-h" | "--help" => bail!("Usage: vitae [markup.json] [--config config.json]"),
            _ if args.markup.is_none() => args.markup = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument `{arg}`"),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    let args = parse_args()?;
    logger::init(LevelFilter::Info)?;

    let markup = match &args.markup {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            PageMarkup::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => PageMarkup::from_json(DEMO_PAGE).context("parsing the built-in demo page")?,
    };
    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            PageConfig::from_json(&json).with_context(|| format!("loading {}", path.display()))?
        }
        None => PageConfig::default(),
    };

    let seed = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    let result = run(markup, config, seed);

    for line in logger::drain() {
        eprintln!("{line}");
    }
    result
}

fn run(markup: PageMarkup, config: PageConfig, seed: u64) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let term_size = terminal.size()?;
    let viewport = Size::new(
        f64::from(term_size.width) * CELL_WIDTH,
        f64::from(term_size.height) * CELL_HEIGHT,
    );
    let started = Instant::now();
    let now = || started.elapsed().as_secs_f64() * 1000.0;
    let mut app = App::new(
        markup,
        config,
        viewport,
        seed,
        DateTime::<Utc>::from(SystemTime::now()),
    );
    app.send(&PageEvent::Loaded, now());

    let outcome = event_loop(&mut terminal, &mut app, &now);
    app.teardown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    outcome
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    now: &dyn Fn() -> f64,
) -> Result<()> {
    loop {
        app.tick(now());
        terminal.draw(|frame| renderer::draw(frame, app))?;

        if !event::poll(FRAME)? {
            continue;
        }
        let t = now();
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Esc => app.escape(t),
                KeyCode::Up => app.scroll_by(-1.0, t),
                KeyCode::Down => app.scroll_by(1.0, t),
                KeyCode::PageUp => app.scroll_by(-8.0, t),
                KeyCode::PageDown => app.scroll_by(8.0, t),
                KeyCode::Tab => app.next_link(t),
                KeyCode::Char('m') => app.toggle_menu(t),
                KeyCode::Char('s') => app.submit(sample_fields(), t),
                KeyCode::Char('x') => app.submit(invalid_fields(), t),
                KeyCode::Char('c') => app.open_certificate(t),
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => app.scroll_by(1.0, t),
                MouseEventKind::ScrollUp => app.scroll_by(-1.0, t),
                MouseEventKind::Moved => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    let hero = renderer::areas(area, renderer::skill_rows(app)).hero;
                    if hero.contains(Position::new(mouse.column, mouse.row)) {
                        let fx = f64::from(mouse.column - hero.x) / f64::from(hero.width.max(1));
                        let fy = f64::from(mouse.row - hero.y) / f64::from(hero.height.max(1));
                        app.pointer(fx, fy, t);
                    }
                }
                _ => {}
            },
            Event::Resize(cols, rows) => app.resize(cols, rows, t),
            _ => {}
        }
    }
    Ok(())
}
