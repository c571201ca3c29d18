use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use srsforge::{
    AppConfig, CancellationToken, ExportOrchestratorBuilder, ExportPath, RawInput, Session,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "srsforge", version)]
#[command(about = "Expand project notes into a Software Requirements Specification")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = "SRSFORGE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct InputArgs {
    /// Project name
    #[arg(short, long, default_value = "")]
    name: String,

    /// One-paragraph project description
    #[arg(short, long, default_value = "")]
    description: String,

    /// Team member; repeat up to three times
    #[arg(short, long = "member")]
    members: Vec<String>,
}

impl InputArgs {
    fn into_raw(self) -> anyhow::Result<RawInput> {
        Ok(RawInput::new(self.name, self.description, self.members)?)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print the expanded document as JSON
    Expand {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Render the document to PDF and save it
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Render through the configured backend instead of locally
        #[arg(long)]
        remote: bool,

        /// Output directory (defaults to export.output_dir)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Backend base URL, overriding backend.base_url
        #[arg(long, env = "SRSFORGE_BACKEND_URL")]
        backend_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Expand { input } => {
            let mut session = Session::new(input.into_raw()?);
            let document = session.generate();
            println!("{}", serde_json::to_string_pretty(document)?);
        }
        Command::Export {
            input,
            remote,
            out,
            backend_url,
        } => {
            let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
            if let Some(url) = backend_url {
                config.backend.base_url = url;
            }
            let orchestrator = ExportOrchestratorBuilder::from_config(&config)?.build()?;

            let mut session = Session::new(input.into_raw()?);
            session.generate();
            let path = if remote { ExportPath::Remote } else { ExportPath::Local };
            if path == ExportPath::Local {
                orchestrator.preview(&mut session)?;
            }

            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    log::warn!("Interrupted; cancelling export");
                    on_interrupt.cancel();
                }
            });

            let artifact = orchestrator.export(path, &mut session, &cancel).await?;
            let dir = out.unwrap_or_else(|| config.export.output_dir.clone());
            std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
            let written = artifact.save_into(&dir)?;
            println!("Wrote {}", written.display());
        }
    }
    Ok(())
}
