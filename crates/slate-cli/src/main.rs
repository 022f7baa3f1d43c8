use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use slate_cli::{App, SystemProbe, ThemeManager, commands, keys, ui};
use slate_config::{Config, ConfigLoader};
use slate_engine::{LayoutConfig, Presentation};
use std::{
    fs::File,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Present markdown files as slides in the terminal.
#[derive(Parser, Debug)]
#[command(name = "slate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Present a markdown file; slides are separated by `---` lines
    Present {
        /// Markdown file to present
        file: PathBuf,

        /// Use this config file instead of searching for one
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write debug logs to this file while presenting
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
    /// Create a sample presentation
    Init {
        /// File to create (default: presentation.md)
        filename: Option<String>,
    },
    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information
    Version,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Create a default configuration file
    Init,
    /// Show the configuration in effect
    Show,
    /// Show which configuration file is used
    Path,
    /// Print an example configuration with every option
    Example,
}

fn main() {
    let cli = Cli::parse();
    let log_file = match &cli.command {
        Commands::Present { log_file, .. } => log_file.as_deref(),
        _ => None,
    };

    if let Err(e) = init_logging(log_file) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();

    match cli.command {
        Commands::Present { file, config, .. } => present(&file, config.as_deref(), !color),
        Commands::Init { filename } => {
            let path = commands::presentation_file_name(filename.as_deref());
            commands::init_presentation(&path)?;
            println!("Created sample presentation: {}", path.display());
            println!("Run: slate present {}", path.display());
            Ok(())
        }
        Commands::Config(ConfigCommand::Init) => commands::config_init(),
        Commands::Config(ConfigCommand::Show) => commands::config_show(),
        Commands::Config(ConfigCommand::Path) => {
            commands::config_path();
            Ok(())
        }
        Commands::Config(ConfigCommand::Example) => commands::config_example(),
        Commands::Version => {
            println!("{}", commands::banner(color));
            Ok(())
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            let path = slate_config::expand_path(path);
            Config::load_from_path(&path)?
                .ok_or_else(|| anyhow!("Config file not found: {}", path.display()))
        }
        None => {
            let (config, source) = ConfigLoader::new().load()?;
            if let Some(source) = source {
                log::info!("Using config {}", source.display());
            }
            Ok(config)
        }
    }
}

fn present(file: &Path, config_path: Option<&Path>, monochrome: bool) -> Result<()> {
    let config = load_config(config_path).context("Failed to load config")?;

    let file = slate_config::expand_path(file);
    let mut presentation = slate_engine::load_presentation(&file)?;
    presentation.attach_layout(LayoutConfig {
        word_wrap: config.presentation.word_wrap,
        margin: config.presentation.margin,
        padding: config.presentation.padding,
    });

    let theme = ThemeManager::new(&config.theme, Box::new(SystemProbe), monochrome);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_presentation(&mut terminal, &presentation, &config, theme);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_presentation(
    terminal: &mut Tui,
    presentation: &Presentation,
    config: &Config,
    theme: ThemeManager,
) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(
        presentation,
        config,
        theme,
        size.width as usize,
        size.height as usize,
    )?;

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if let Some(name) = keys::key_name(&key) {
                    app.handle_key(&name);
                }
            }
            Event::Resize(width, height) => app.resize(width as usize, height as usize),
            _ => {}
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
