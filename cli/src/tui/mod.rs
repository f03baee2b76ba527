pub mod app;
pub mod ui;

use std::io;

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracking_synthesis_core::{ExportFormat, FileTrackingStore, Student, SynthesisService, TrackedItem};

use crate::tui::app::App;

pub fn run(
    service: SynthesisService<FileTrackingStore>,
    student: Student,
    items: Vec<TrackedItem>,
    today: NaiveDate,
    custom_range: Option<(NaiveDate, NaiveDate)>,
) -> Result<()> {
    let mut app = App::new(service, student, items, today, custom_range);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if event::poll(std::time::Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => app.next_tab(),
                    KeyCode::Left | KeyCode::Char('h') => app.previous_tab(),
                    KeyCode::Char('r') => app.refresh(),
                    KeyCode::Char('c') => app.export(ExportFormat::Csv),
                    KeyCode::Char('p') => app.export(ExportFormat::Pdf),
                    _ => {}
                }
            }
        }
    }
}
