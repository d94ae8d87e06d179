use std::fs::File;
use std::io::{self, Read};
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use b64file::app;
use b64file::config::{self, Settings};
use b64file::payload::Payload;

#[derive(Parser)]
#[command(name = "b64file", version, about = "Paste Base64 text and save it as a PNG or PDF file")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Cells kept free at the right edge when wrapping pasted text
    #[arg(long, default_value_t = config::DEFAULT_MARGIN)]
    margin: u16,

    /// Directory for the suggested base64.png / base64.pdf file name
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Preload Base64 text from a file
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write logs here (filtered by RUST_LOG, default level warn)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a Base64 file without the UI
    Decode {
        /// File holding Base64 text, or - for stdin
        input: PathBuf,
        /// Output path (defaults to base64.png / base64.pdf in the output directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_file.unwrap_or_else(config::default_log_path));

    let mut settings = Settings {
        margin: cli.margin,
        ..Settings::default()
    };
    if let Some(dir) = cli.output_dir {
        settings.output_dir = dir;
    }

    // Handle subcommands first
    if let Some(Commands::Decode { input, output }) = cli.command {
        return handle_decode(&input, output.as_deref(), &settings);
    }

    if let Some(path) = cli.input {
        settings.initial_text = Some(read_input(&path)?);
    }

    run_ui(settings)
}

/// Installs a tracing subscriber writing to `path`. The UI owns the terminal,
/// so nothing is ever logged to stdout or stderr.
fn init_logging(path: &Path) {
    let file = match File::create(path) {
        Ok(f) => f,
        Err(_) => return,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn read_input(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
}

/// Handles `b64file decode FILE`: decodes, classifies and writes, then exits.
fn handle_decode(input: &Path, output: Option<&Path>, settings: &Settings) -> io::Result<()> {
    let text = match read_input(input) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", input.display(), e);
            std::process::exit(1);
        }
    };

    let payload = match Payload::from_text(&text) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let path = match output {
        Some(p) => p.to_path_buf(),
        None => payload.default_path(&settings.output_dir),
    };

    match payload.write_to(&path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), kind = payload.format.label(), "saved");
            println!("Saved {} to {}", payload.format.label(), path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Sets up the terminal, runs the TUI, and restores the terminal on exit.
fn run_ui(settings: Settings) -> io::Result<()> {
    // Setup panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app
    let result = run_app(&mut terminal, settings);

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "terminal error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: Settings,
) -> io::Result<()> {
    let mut app = app::App::new(settings);

    loop {
        app.render_frame(terminal)?;

        // While a wrap is pending, only peek for input so the next slice runs
        // right after this frame. Otherwise block up to 100ms (keeps the status
        // timer ticking without a busy-loop).
        let timeout = if app.is_busy() {
            Duration::ZERO
        } else {
            Duration::from_millis(100)
        };
        if event::poll(timeout)? {
            // Drain all queued events without blocking, then render immediately.
            loop {
                let ev = event::read()?;
                app.handle_event(ev);
                if app.should_quit {
                    break;
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste)?;
    Ok(())
}
