//! tabfocus - a terminal table viewer with single-cell focus navigation.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tabfocus::app::App;
use tabfocus::config::{load_config, Settings};
use tabfocus::data::DataReader;
use tabfocus::{summary, ui};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// How long the event loop waits for input before ticking timers.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(name = "tabfocus")]
#[command(about = "A terminal table viewer with single-cell focus navigation", long_about = None)]
struct Args {
    /// Path to the table file (.json) or directory to open
    file: Option<PathBuf>,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Config file (default: <config dir>/tabfocus/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Column key used for row identifiers
    #[arg(long)]
    id_column: Option<String>,

    /// User agent used to detect handheld devices
    #[arg(long)]
    user_agent: Option<String>,

    /// Print a summary of the table and exit
    #[arg(long)]
    summary: bool,

    /// Viewport width in pixels used by --summary
    #[arg(long, default_value_t = 1024)]
    width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_path) = &args.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting tabfocus");
    }

    let settings = resolve_settings(&args)?;

    if let Some(ref path) = args.file {
        if !path.exists() {
            eprintln!("Error: Path not found: {}", path.display());
            std::process::exit(1);
        }
    }

    if args.summary {
        let Some(ref path) = args.file else {
            anyhow::bail!("--summary needs a table file");
        };
        let dataset = DataReader::read_file(path)?;
        print!("{}", summary::summarize(&dataset, &settings, args.width));
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(args.file, settings);
    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    tracing::info!("tabfocus exited");
    Ok(())
}

/// Defaults, then the config file, then command-line flags.
fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut settings = load_config(args.config.as_deref())?.resolve();
    if let Some(ref key) = args.id_column {
        settings.preferred_key = Some(key.clone());
    }
    if let Some(ref agent) = args.user_agent {
        settings.viewer.user_agent = Some(agent.clone());
    }
    Ok(settings)
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let size = terminal.size()?;
    app.resize(size.width, size.height, Instant::now());

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key(&mut app, key) == Flow::Quit {
                        return Ok(());
                    }
                },
                Event::Mouse(mouse) => {
                    let now = Instant::now();
                    if app.focus.visible {
                        let size = terminal.size()?;
                        let area = Rect::new(0, 0, size.width, size.height);
                        let result = app.focus.handle_mouse(mouse, area, now);
                        app.on_focus_dispatch(result);
                    } else if app.has_table() && !app.file_browser_mode {
                        match mouse.kind {
                            MouseEventKind::ScrollDown => app.table.move_cursor(1, 0),
                            MouseEventKind::ScrollUp => app.table.move_cursor(-1, 0),
                            _ => {},
                        }
                    }
                },
                Event::Resize(cols, rows) => app.resize(cols, rows, Instant::now()),
                _ => {},
            }
        }

        app.tick(Instant::now());
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> Flow {
    // Focus viewer - takes every key while open
    if app.focus.visible {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('y')) => app.copy_cell(),
            _ => {
                let result = app.focus.handle_key(key, Instant::now());
                app.on_focus_dispatch(result);
            },
        }
        return Flow::Continue;
    }

    // Search prompt
    if app.table.search.is_active() {
        match key.code {
            KeyCode::Enter => {
                app.table.submit_search();
                app.status = format!("{} matching rows", app.table.view_len());
            },
            KeyCode::Esc => app.table.search.cancel(),
            KeyCode::Backspace => app.table.search.backspace(),
            KeyCode::Char(c) => app.table.search.input(c),
            _ => {},
        }
        return Flow::Continue;
    }

    // Column picker
    if app.table.picker.is_some() {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.table.move_picker(-1),
            KeyCode::Down | KeyCode::Char('j') => app.table.move_picker(1),
            KeyCode::Char(' ') | KeyCode::Enter => app.toggle_picked_column(),
            KeyCode::Esc | KeyCode::Char('v') | KeyCode::Char('q') => app.table.close_picker(),
            _ => {},
        }
        return Flow::Continue;
    }

    // File browser
    if app.file_browser_mode {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Flow::Quit,
            (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                app.file_browser.cursor_up();
            },
            (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                app.file_browser.cursor_down();
            },
            (KeyModifiers::NONE, KeyCode::Enter)
            | (KeyModifiers::NONE, KeyCode::Char('l'))
            | (KeyModifiers::NONE, KeyCode::Right) => {
                app.browser_select();
            },
            (KeyModifiers::NONE, KeyCode::Char('h')) | (KeyModifiers::NONE, KeyCode::Left) => {
                app.browser_parent();
            },
            (KeyModifiers::NONE, KeyCode::Char('.')) => app.toggle_hidden(),
            (KeyModifiers::NONE, KeyCode::Esc) => {
                if app.has_table() {
                    app.file_browser_mode = false;
                }
            },
            _ => {},
        }
        return Flow::Continue;
    }

    // Table view
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('q')) => return Flow::Quit,
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Flow::Quit,

        (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
            app.table.move_cursor(-1, 0);
        },
        (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
            app.table.move_cursor(1, 0);
        },
        (KeyModifiers::NONE, KeyCode::Left) | (KeyModifiers::NONE, KeyCode::Char('h')) => {
            app.table.move_cursor(0, -1);
        },
        (KeyModifiers::NONE, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char('l')) => {
            app.table.move_cursor(0, 1);
        },
        (KeyModifiers::NONE, KeyCode::Char('g')) | (KeyModifiers::NONE, KeyCode::Home) => {
            app.table.cursor_home();
        },
        (KeyModifiers::SHIFT, KeyCode::Char('G')) | (KeyModifiers::NONE, KeyCode::End) => {
            app.table.cursor_end();
        },
        (KeyModifiers::CONTROL, KeyCode::Char('d')) | (KeyModifiers::NONE, KeyCode::PageDown) => {
            app.table.move_cursor(15, 0);
        },
        (KeyModifiers::CONTROL, KeyCode::Char('u')) | (KeyModifiers::NONE, KeyCode::PageUp) => {
            app.table.move_cursor(-15, 0);
        },

        // Focus viewer
        (KeyModifiers::NONE, KeyCode::Enter) => app.open_focus_at_selection(),
        (KeyModifiers::NONE, KeyCode::Char('m')) => app.open_focus_at_origin(),

        // Search, sort, columns
        (KeyModifiers::NONE, KeyCode::Char('/')) => app.table.search.start(),
        (KeyModifiers::NONE, KeyCode::Esc) => {
            if !app.table.search.query().is_empty() {
                app.table.search.clear();
                app.table.rebuild_view();
                app.status = "Search cleared".to_string();
            }
        },
        (KeyModifiers::NONE, KeyCode::Char('s')) => app.sort_selected(),
        (KeyModifiers::NONE, KeyCode::Char('v')) => app.table.open_picker(),

        // Misc
        (KeyModifiers::NONE, KeyCode::Char('y')) => app.copy_cell(),
        (KeyModifiers::NONE, KeyCode::Char('o')) => app.open_file_browser_at_current(),
        (KeyModifiers::SHIFT, KeyCode::Char('T')) => app.cycle_theme(),
        _ => {},
    }
    Flow::Continue
}
