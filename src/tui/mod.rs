//! Terminal user interface (`flo tui`).
//!
//! Tabs group the actions: Projects, Monitor, Chat, Utilities, Config and
//! Reports. Actions that call claude-flow run on worker threads while the
//! event loop keeps drawing; their output lands in the output pane.

pub mod app;
pub mod events;
pub mod ui;
pub mod worker;

use anyhow::Result;
use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::runtime::Handle;

use app::{App, WorkerEvent};
use events::{Outcome, handle_key};
use worker::Services;

const TICK_RATE: Duration = Duration::from_millis(100);

/// Run the TUI until the user quits.
///
/// The facade inside `services` should be in collect mode so child output
/// does not draw over the alternate screen.
pub fn run(services: Services, handle: Handle) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, services, handle);

    // Restore the terminal even when the loop failed.
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result
}

fn run_event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    mut services: Services,
    handle: Handle,
) -> Result<()> {
    let mut app = App::new();
    let (tx, rx) = mpsc::channel::<WorkerEvent>();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
        {
            match handle_key(&mut app, key) {
                Outcome::Quit => return Ok(()),
                Outcome::Run(job) if job.action.is_local() => {
                    let title = job.action.label();
                    match services.apply_local(&job) {
                        Ok(lines) => app.push_output(title, lines),
                        Err(e) => app.push_output(title, vec![format!("{:#}", e)]),
                    }
                    app.status = format!("Finished: {}", title);
                }
                Outcome::Run(job) => {
                    tracing::info!("Starting '{}'", job.action.label());
                    app.job_started(&job);
                    services.spawn(job, handle.clone(), tx.clone());
                }
                Outcome::Continue => {}
            }
        }

        while let Ok(event) = rx.try_recv() {
            app.handle_worker_event(event);
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.tick();
            last_tick = Instant::now();
        }
    }
}
