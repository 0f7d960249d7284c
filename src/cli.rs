// command line interface

use crate::config::{Config, DEFAULT_MODEL, OnlineConfig};
use crate::output::Output;
use crate::{Request, Server, chat};
use clap::{Parser, Subcommand};
use miette::Result;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(
    name = "glossa",
    version,
    about = "Define words and describe pictures from the terminal"
)]
struct Cli {
    /// wordnet `dict` directory
    #[arg(long, env = "WORDNET_DIR", global = true)]
    wordnet: Option<PathBuf>,

    /// onnx image classifier (e.g. resnet-50)
    #[arg(long, env = "GLOSSA_MODEL", global = true)]
    model: Option<PathBuf>,

    /// class names for the classifier, one per line
    #[arg(long, env = "GLOSSA_LABELS", global = true)]
    labels: Option<PathBuf>,

    /// extra label descriptions as json
    #[arg(long, env = "GLOSSA_ENRICHMENT", global = true)]
    enrichment: Option<PathBuf>,

    /// try the hosted model first, fall back to offline lookups
    #[arg(
        long,
        env = "USE_ONLINE_AI",
        action = clap::ArgAction::SetTrue,
        value_parser = online_switch,
        global = true
    )]
    online: bool,

    /// api key for the hosted model
    #[arg(long, short = 'k', env = "AZURE_OPENAI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// endpoint of the hosted model
    #[arg(long, env = "AZURE_OPENAI_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// deployment / model name
    #[arg(long, env = "AZURE_OPENAI_MODEL", default_value = DEFAULT_MODEL, global = true)]
    deployment: String,

    /// print json instead of labeled sections
    #[arg(long, global = true)]
    json: bool,

    /// more logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// look up a word
    Define {
        #[arg(required = true)]
        word: Vec<String>,
    },

    /// classify and describe an image file
    Describe { path: PathBuf },

    /// interactive session (default)
    Chat,

    /// start as http server
    Serve {
        /// port number
        #[arg(long, short, default_value = "3000")]
        port: u16,

        /// host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            wordnet: self.wordnet.clone(),
            model: self.model.clone(),
            labels: self.labels.clone(),
            enrichment: self.enrichment.clone(),
            online: OnlineConfig {
                enabled: self.online,
                api_key: self.api_key.clone(),
                endpoint: self.endpoint.clone(),
                model: self.deployment.clone(),
            },
        }
    }
}

// only "true" (any case) turns online mode on, anything else means offline
fn online_switch(value: &str) -> Result<bool, String> {
    Ok(value.trim().eq_ignore_ascii_case("true"))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

pub async fn run() -> Result<()> {
    // a missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);
    tracing::debug!(command = ?cli.command, "parsed arguments");

    let dispatcher = cli.config().dispatcher()?;

    match cli.command {
        Some(Commands::Define { word }) => {
            let reply = dispatcher.handle(Request::Define(word.join(" "))).await;
            show(&reply, cli.json);
            Ok(())
        }

        Some(Commands::Describe { path }) => {
            let reply = dispatcher
                .handle(Request::Describe(path.to_string_lossy().into_owned()))
                .await;
            show(&reply, cli.json);
            Ok(())
        }

        Some(Commands::Serve { port, host }) => Ok(Server::run(dispatcher, &host, port).await?),

        Some(Commands::Chat) | None => Ok(chat::run(&dispatcher, cli.json).await?),
    }
}

fn show(reply: &crate::Reply, json: bool) {
    if json {
        Output::raw(reply);
    } else {
        Output::pretty(reply);
    }
}
