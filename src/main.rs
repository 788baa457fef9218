mod config;
mod keybindings;
mod location;
mod logging;
mod palette;
mod services;
mod ui;

use std::env;
use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use crate::config::Settings;
use crate::location::{Location, DEFAULT_BASE_URL};
use crate::palette::PaletteState;
use crate::services::clipboard;
use crate::ui::app::{App, AppEvent};
use crate::ui::theme::Theme;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    println!("colorman {} - Terminal colour palette kept in a shareable link", VERSION);
    println!();
    println!("USAGE:");
    println!("    colorman [OPTIONS] [LOCATION]");
    println!();
    println!("ARGS:");
    println!("    <LOCATION>              URL or fragment holding the palette,");
    println!("                            e.g. https://host/p#AABBCC-DDEEFF or AABBCC");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help              Print help information");
    println!("    -v, --version           Print version information");
    println!("    --print <LOCATION>      Print the colours in LOCATION, one per line");
    println!();
    println!("The final link is printed when the editor exits.");
}

fn print_version() {
    println!("colorman {}", VERSION);
}

fn print_colors(input: &str) {
    let location = Location::parse(input, DEFAULT_BASE_URL);
    for color in PaletteState::from_fragment(location.hash()).colors() {
        println!("{}", color);
    }
}

/// What the command line asks for.
#[derive(Debug, PartialEq, Eq)]
enum CliCommand<'a> {
    Help,
    Version,
    Print(&'a str),
    MissingPrintArg,
    Unknown(&'a str),
    Run(Option<&'a str>),
}

fn parse_args(args: &[String]) -> CliCommand<'_> {
    let Some(first) = args.get(1) else {
        return CliCommand::Run(None);
    };
    match first.as_str() {
        "-h" | "--help" => CliCommand::Help,
        "-v" | "--version" => CliCommand::Version,
        "--print" => match args.get(2) {
            Some(location) => CliCommand::Print(location.as_str()),
            None => CliCommand::MissingPrintArg,
        },
        arg if arg.starts_with('-') && arg.len() > 1 && !arg.starts_with("-#") => CliCommand::Unknown(arg),
        arg => CliCommand::Run(Some(arg)),
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    // Options that exit early never touch the settings file
    let location_arg = match parse_args(&args) {
        CliCommand::Help => {
            print_help();
            return Ok(());
        }
        CliCommand::Version => {
            print_version();
            return Ok(());
        }
        CliCommand::Print(location) => {
            print_colors(location);
            return Ok(());
        }
        CliCommand::MissingPrintArg => {
            eprintln!("Error: --print requires a LOCATION argument");
            eprintln!("Usage: colorman --print \"#AABBCC-DDEEFF\"");
            return Ok(());
        }
        CliCommand::Unknown(arg) => {
            eprintln!("Unknown option: {}", arg);
            eprintln!("Use --help for usage information");
            return Ok(());
        }
        CliCommand::Run(location) => location,
    };

    let (settings, settings_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(err) => (Settings::default(), Some(err)),
    };

    if logging::debug_requested(settings.debug_log) {
        if let Some(dir) = Settings::debug_dir() {
            if let Err(err) = logging::init(&dir) {
                eprintln!("Warning: debug log disabled: {}", err);
            }
        }
    }
    if let Some(err) = settings_error {
        error!("settings not loaded, using defaults: {}", err);
    }

    let location = Location::parse(location_arg.unwrap_or(""), &settings.base_url);
    info!(base = %location.base(), hash = %location.hash(), "starting");
    let mut app = App::new(location, &settings, Theme::default());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        crossterm::cursor::MoveTo(0, 0),
        EnterAlternateScreen,
        EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        crossterm::cursor::Show
    )?;

    if let Err(err) = result {
        error!("terminal loop failed: {}", err);
        eprintln!("Error: {}", err);
    }

    info!(href = %app.location.href(), "exiting");
    println!("{}", app.location.href());

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    let mut shown_title = String::new();

    loop {
        if app.has_pending_events() {
            app.process_pending();
        }
        if app.should_quit {
            return Ok(());
        }

        if app.title != shown_title {
            let _ = execute!(io::stdout(), SetTitle(&app.title));
            shown_title = app.title.clone();
        }

        if let Some(text) = app.take_clipboard_request() {
            clipboard::write_text_stdout(&text);
        }

        terminal.draw(|f| ui::draw::draw(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.push_event(AppEvent::Key(key));
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    app.push_event(AppEvent::Click {
                        column: mouse.column,
                        row: mouse.row,
                    });
                }
                _ => {}
            }
        }
    }
}
