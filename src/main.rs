use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::stdout;
use std::path::PathBuf;

use streetfind::config::{self, ConfigResult, ProviderKind};
use streetfind::error::StreetfindError;
use streetfind::suggest::{self, Session, SharedCache, SuggestionFetcher};
use streetfind::App;

/// Type-ahead street name lookup
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Type-ahead street name lookup with debounced, cached suggestions"
)]
struct Args {
    /// Print suggestions for TERM and exit instead of opening the field
    #[arg(short, long, value_name = "TERM")]
    query: Option<String>,

    /// Street list file, one name per line (overrides the configured provider)
    #[arg(short, long, value_name = "FILE")]
    streets: Option<PathBuf>,

    /// Field name reported with every value change
    #[arg(short, long, default_value = "street_name")]
    field: String,

    /// Initial text of the field
    #[arg(short, long)]
    initial: Option<String>,
}

fn main() -> Result<()> {
    // Writes to /tmp/streetfind-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    {
        use std::io::Write;

        if let Ok(log_file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/streetfind-debug.log")
        {
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Debug)
                .target(env_logger::Target::Pipe(Box::new(log_file)))
                .format(|buf, record| {
                    use std::time::SystemTime;
                    let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
                    writeln!(
                        buf,
                        "[{}] [{}] {}",
                        datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                        record.level(),
                        record.args()
                    )
                })
                .init();
        }

        log::debug!("=== STREETFIND DEBUG SESSION STARTED ===");
    }

    color_eyre::install()?;

    let mut config_result = config::load_config();

    let args = Args::parse();

    if let Some(path) = &args.streets {
        config_result.config.provider.kind = ProviderKind::Static;
        config_result.config.provider.streets_file = Some(path.clone());
    }

    // One cache for the whole process, shared by every lookup
    let cache = SharedCache::new(config_result.config.autocomplete.cache_capacity);
    let provider = suggest::provider::from_config(&config_result.config.provider)
        .map_err(StreetfindError::from)?;
    let fetcher = SuggestionFetcher::new(cache, provider);

    if let Some(term) = &args.query {
        return print_suggestions(&fetcher, term, &config_result);
    }

    let session = Session::new(
        args.field.as_str(),
        config_result.config.autocomplete.clone(),
        fetcher,
    );
    let mut app = App::new(session).with_warning(config_result.warning);
    if let Some(initial) = &args.initial {
        app = app.with_initial_value(initial);
    }

    let terminal = init_terminal()?;
    let result = run(terminal, app);

    restore_terminal()?;
    let app = result?;

    // Output after terminal restore to prevent corruption
    if let Some(value) = &app.accepted {
        println!("{}", value);
    }

    #[cfg(debug_assertions)]
    log::debug!("=== STREETFIND DEBUG SESSION ENDED ===");

    Ok(())
}

/// One-shot lookup through the same fetcher the field uses
fn print_suggestions(fetcher: &SuggestionFetcher, term: &str, config: &ConfigResult) -> Result<()> {
    if let Some(warning) = &config.warning {
        eprintln!("Warning: {}", warning);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| StreetfindError::Runtime(e.to_string()))?;

    let suggestions = runtime
        .block_on(fetcher.fetch(term))
        .map_err(StreetfindError::from)?;

    for suggestion in suggestions
        .iter()
        .take(config.config.autocomplete.max_suggestions)
    {
        println!("{}", suggestion.street_name);
    }

    Ok(())
}

/// Initialize terminal with raw mode, alternate screen, and bracketed paste
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    if let Err(e) = execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
    disable_raw_mode()?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<App> {
    loop {
        if app.should_render() {
            terminal.draw(|frame| app.render(frame))?;
            app.clear_dirty();
        }

        app.handle_events()?;

        if app.should_quit() {
            break;
        }
    }

    Ok(app)
}
