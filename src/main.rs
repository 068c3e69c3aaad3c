mod app;
mod config;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod ticker;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::Parser;
use config::{Cli, Commands};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use notifications::TerminalNotifier;
use persistence::{ensure_data_dir, init_local_dir, read_tasks, FileStore, SettingsStore, TaskList};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Init) => {
            let current_dir = std::env::current_dir()?;
            let data_dir = init_local_dir(&current_dir)?;
            println!("Initialized pomotick directory: {}", data_dir.display());
            println!();
            println!("Tasks and settings will now be stored in this directory.");
            println!("Run 'pomotick' to start the timer.");
            Ok(())
        }
        Some(Commands::Tasks) => {
            let data_dir = ensure_data_dir(cli.data_dir.as_deref())?;
            start_logging(&data_dir, &cli);
            print_tasks(&data_dir)
        }
        None => run_tui(&cli),
    }
}

fn start_logging(data_dir: &Path, cli: &Cli) {
    if let Err(e) = logging::init(data_dir, cli.log_level()) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
}

fn print_tasks(data_dir: &Path) -> Result<()> {
    let store = FileStore::new(data_dir);
    let tasks = read_tasks(&store)?;

    if tasks.is_empty() {
        println!("No tasks.");
        return Ok(());
    }
    for (idx, task) in tasks.iter().enumerate() {
        println!("{:>3}. {}  ({})", idx + 1, task.description, task.time);
    }
    Ok(())
}

fn run_tui(cli: &Cli) -> Result<()> {
    let data_dir = ensure_data_dir(cli.data_dir.as_deref())?;
    start_logging(&data_dir, cli);
    tracing::info!(data_dir = %data_dir.display(), "starting pomotick");

    let store = FileStore::new(&data_dir);
    let tasks = TaskList::load(Box::new(store.clone()));
    let settings = SettingsStore::new(Box::new(store));
    let mut app = AppState::new(tasks, settings, Box::new(TerminalNotifier));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!("{:#}", err);
    }
    tracing::info!("pomotick stopped");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let poll_rate = ticker::poll_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Wake up no later than the next countdown tick
        let timeout = match app.timer.next_tick_due() {
            Some(due) => poll_rate.min(due.saturating_duration_since(Instant::now())),
            None => poll_rate,
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
    }
}
