use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyModifiers,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use indoc::indoc;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::Rect;
use tracing::Level;

use frameless_wm::config::WmConfig;
use frameless_wm::playground::Playground;
use frameless_wm::tracing_sub;
use frameless_wm::window::FloatRect;

const MAX_WINDOWS: usize = 8;

const ABOUT: &str = indoc! {"
    Frameless window playground.

    Every box is a toolkit-drawn window without OS decorations. Drag its
    title bar or body to move it, grab an edge or corner to resize it, and
    release against the top or side of the terminal to maximize or
    half-maximize. Double-click the title bar to toggle maximize.

    Keys: n = new window, x = close topmost, Ctrl+Q = quit.
"};

#[derive(Debug, Parser)]
#[command(name = "frameless-wm", version, about = "Frameless window playground", long_about = ABOUT)]
struct Args {
    /// Cells the pointer must travel before a press becomes a drag.
    #[arg(long, default_value_t = 1)]
    threshold: u16,
    /// Width of the resize band inside each window edge.
    #[arg(long, default_value_t = 1)]
    inset: u16,
    /// Cells of a window that must stay on screen while moving it.
    #[arg(long, default_value_t = 4)]
    margin: u16,
    /// Number of windows to open at start.
    #[arg(long, default_value_t = 3)]
    windows: usize,
    /// Open one extra window that opts out of window management.
    #[arg(long)]
    with_unmanaged: bool,
    /// Append log output to this file instead of discarding it.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    // stderr is the terminal we draw on; only log to a file
    if let Some(path) = &args.log_file {
        tracing_sub::set_log_file(path)?;
        let level = if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        };
        tracing_sub::init_default(level);
    }

    let config = WmConfig {
        border_inset: args.inset,
        drag_threshold: args.threshold,
        min_visible_margin: args.margin,
        snap_edge_width: 1,
        ..WmConfig::default()
    };
    let (width, height) = terminal::size()?;
    let mut playground =
        Playground::new(config, Rect::new(0, 0, width, height)).map_err(io::Error::other)?;

    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    for idx in 0..args.windows.min(MAX_WINDOWS) {
        spawn_cascaded(&mut playground, idx, None);
    }
    if args.with_unmanaged {
        spawn_cascaded(&mut playground, args.windows.min(MAX_WINDOWS), Some(false));
    }

    let result = run(&mut terminal, &mut playground);

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn spawn_cascaded(playground: &mut Playground, idx: usize, opt_in: Option<bool>) {
    let offset = (idx as i32) * 3;
    let title = match opt_in {
        Some(false) => "unmanaged".to_string(),
        _ => format!("window {}", idx + 1),
    };
    playground.spawn(&title, FloatRect::new(4 + offset * 2, 2 + offset, 32, 10), opt_in);
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    playground: &mut Playground,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| playground.render(frame))?;
        playground.tick();
        if !event::poll(Duration::from_millis(16))? {
            continue;
        }
        // Drain bursts so drags do not lag behind the pointer.
        loop {
            match event::read()? {
                Event::Key(key)
                    if key.code == KeyCode::Char('q')
                        && key.modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    return Ok(());
                }
                Event::Key(key) if key.code == KeyCode::Char('n') => {
                    let count = playground.window_ids().len();
                    if count < MAX_WINDOWS {
                        spawn_cascaded(playground, count, None);
                    }
                }
                Event::Key(key) if key.code == KeyCode::Char('x') => playground.close_topmost(),
                Event::Mouse(mouse) => {
                    playground.handle_mouse(mouse);
                }
                Event::FocusLost => playground.focus_lost(),
                Event::Resize(width, height) => {
                    playground.set_screen(Rect::new(0, 0, width, height));
                }
                _ => {}
            }
            if !event::poll(Duration::from_millis(0))? {
                break;
            }
        }
    }
}
