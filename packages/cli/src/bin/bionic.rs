use bionic_cli::{init_tracing, GatewayOverrides, Runtime};
use bionic_workflows::CopyTarget;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process;

mod cli;

#[derive(Parser)]
#[command(name = "bionic")]
#[command(about = "Bionic Brokerage - AI assistant for real estate agents")]
#[command(version)]
struct Cli {
    /// Model id to call (overrides BIONIC_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    /// API base URL (overrides BIONIC_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal user interface
    Tui,
    /// Chat with the AI concierge line by line
    Chat,
    /// Generate a listing, caption, and flyer points from property notes
    Market {
        /// Free-text property notes
        #[arg(long)]
        notes: String,

        /// Copy one result to the clipboard: listing, caption, flyer, or point:N
        #[arg(long)]
        copy: Option<CopyTarget>,
    },
    /// Identify the architectural style and selling features in a room photo
    AnalyzeImage {
        /// Path to a png, jpeg, webp, heic, or gif image
        path: PathBuf,
    },
    /// Rank the farm list by likelihood to sell
    Hunt,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Keep the alternate screen clean while the TUI owns the terminal
    let default_directive = match cli.command {
        Commands::Tui => "warn",
        _ => "info",
    };
    init_tracing(default_directive);

    let overrides = GatewayOverrides {
        model: cli.model,
        base_url: cli.base_url,
    };

    if let Err(e) = handle_command(cli.command, &overrides).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(
    command: Commands,
    overrides: &GatewayOverrides,
) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = Runtime::from_env(overrides)?;

    match command {
        Commands::Tui => start_tui(runtime).await,
        Commands::Chat => cli::chat::run_chat(&runtime).await,
        Commands::Market { notes, copy } => cli::market::run_market(&runtime, notes, copy).await,
        Commands::AnalyzeImage { path } => cli::market::run_analyze_image(&runtime, &path).await,
        Commands::Hunt => cli::hunt::run_hunt(&runtime).await,
    }
}

async fn start_tui(runtime: Runtime) -> Result<(), Box<dyn std::error::Error>> {
    use bionic_workflows::{ConciergeSession, PropensityRanker, SeedLeadProvider};
    use crossterm::{execute, terminal};
    use std::sync::Arc;

    let ranker = PropensityRanker::load(Arc::new(SeedLeadProvider::new())).await?;
    let state = bionic_tui::AppState::new(ConciergeSession::new(), ranker);
    let mut app = bionic_tui::App::new(state, runtime.gateway, runtime.crm, runtime.max_tool_rounds);

    terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    // Always restore the terminal, even if the app failed
    let cleanup_result = (|| -> Result<(), Box<dyn std::error::Error>> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    })();

    if let Err(cleanup_error) = cleanup_result {
        eprintln!("Terminal cleanup error: {}", cleanup_error);
    }

    result.map_err(|e| e.into())
}
