use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::builder::RangedU64ValueParser;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::assistant::{Assistant, GeminiClient};
use crate::cli::interrupt::Interrupt;
use crate::cli::session::{answer_query, run_interactive, show_history};
use crate::config::{MISSING_API_KEY_MESSAGE, resolve_api_key, resolve_model, resolve_wiki_url};
use crate::history::HistoryStore;
use crate::utils::get_config_dir;
use crate::wiki::{ArchWikiClient, WikiRetriever};

const EXAMPLES: &str = "\
Examples:
  archlinux-ai-cli -q \"How do I update my system?\"
  archlinux-ai-cli -i            # Interactive mode
  archlinux-ai-cli --history 5

Set your API key:
  export GOOGLE_AI_API_KEY=\"your-api-key-here\"
  Or create ~/.config/archlinux-ai-cli/api_key";

#[derive(Parser)]
#[command(name = "archlinux-ai-cli")]
#[command(version)]
#[command(about = "Answer Arch Linux troubleshooting questions from the Arch Wiki", long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Ask a single question
    #[arg(short, long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Run in interactive mode
    #[arg(short, long)]
    pub interactive: bool,

    /// Show the last N history entries
    #[arg(
        long,
        value_name = "N",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub history: Option<usize>,

    /// Google AI Studio API key
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Generative model name
    #[arg(long, value_name = "NAME")]
    pub model: Option<String>,

    /// Log retrieval and backend details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_dir = get_config_dir()?;
    let history = HistoryStore::in_dir(&config_dir);
    let mut stdout = io::stdout();

    if let Some(limit) = cli.history {
        show_history(&history, limit, &mut stdout)?;
        return Ok(ExitCode::SUCCESS);
    }

    if !cli.interactive && cli.query.is_none() {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(api_key) = resolve_api_key(cli.api_key.as_deref(), Some(&config_dir)) else {
        eprintln!("{}", MISSING_API_KEY_MESSAGE);
        return Ok(ExitCode::FAILURE);
    };

    let wiki_url = resolve_wiki_url();
    let retriever = WikiRetriever::new(ArchWikiClient::new(wiki_url.as_str())?);
    let generator = GeminiClient::new(api_key.key, resolve_model(cli.model.as_deref()))?;
    let assistant = Assistant::new(retriever, generator, wiki_url);

    if cli.interactive {
        let interrupt = Interrupt::install()?;
        run_interactive(&assistant, &history, io::stdin().lock(), &interrupt, &mut stdout)?;
    } else if let Some(query) = cli.query {
        answer_query(&assistant, &history, &query, &Interrupt::new(), &mut stdout)?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Logs go to stderr so stdout only carries answers. `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "archlinux_ai_cli=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
