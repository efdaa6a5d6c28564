use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotmix::{cli, config, error, types::PkceToken};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Session the preference and recommendations belong to
    #[clap(long, global = true, env = "SPOTMIX_SESSION")]
    session: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Set the genre to build recommendations for, or show the current one
    Preference(PreferenceOptions),

    /// List known genres and their search templates
    Genres,

    /// Build a new set of recommendations
    Recommend(RecommendOptions),

    /// Show the stored recommendations
    Recommendations,

    /// Top tracks, artists and genres of the last weeks
    Stats,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct PreferenceOptions {
    /// Genre label, or `personal_mix` to use your listening history
    pub genre: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// Number of tracks to recommend (defaults to RECOMMENDATION_LIMIT)
    #[clap(long, value_parser = clap::value_parser!(u16).range(1..=50))]
    pub limit: Option<u16>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let cli = Cli::parse();
    let session = cli.session.unwrap_or_else(config::session_key);

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Preference(opt) => match opt.genre {
            Some(genre) => cli::set_preference(&session, &genre).await,
            None => cli::show_preference(&session).await,
        },
        Command::Genres => cli::genres(),
        Command::Recommend(opt) => {
            cli::recommend(&session, opt.limit.map(usize::from)).await
        }
        Command::Recommendations => cli::list_recommendations(&session).await,
        Command::Stats => cli::stats().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
