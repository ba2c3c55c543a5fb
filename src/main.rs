use std::fs::{self, File};
use std::path::{Path, PathBuf};

use clap::Parser;
use simplelog::{LevelFilter, WriteLogger};

use pva::app::App;
use pva::config::Config;
use pva::document::{DocumentModel, MemoryDocument};
use pva::error::{AppError, AppResult};
use pva::input::parse_script;

/// Replays an interaction script against an in-memory document and prints
/// the resulting notes as JSON.
#[derive(Debug, Parser)]
#[command(name = "pva")]
struct Cli {
    /// Script of pointer, key, wait, and command lines.
    script: PathBuf,

    /// Number of letter-sized pages in the document.
    #[arg(long, default_value_t = 2)]
    pages: usize,

    #[arg(long)]
    config: Option<PathBuf>,

    /// Write debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let raw = fs::read_to_string(&cli.script).map_err(|source| {
        AppError::io_with_context(
            source,
            format!("failed to read script: {}", cli.script.display()),
        )
    })?;
    let script = parse_script(&raw)?;

    let mut doc = MemoryDocument::with_uniform_pages(cli.pages);
    let mut app = App::new_with_config(config);
    app.run(&mut doc, script).await?;

    if !app.status.message.is_empty() {
        log::info!("last status: {}", app.status.message);
    }
    let json = serde_json::to_string_pretty(doc.notes())
        .map_err(|err| AppError::invalid_argument(format!("failed to encode notes: {err}")))?;
    println!("{json}");
    Ok(())
}

fn init_logging(path: &Path) -> AppResult<()> {
    let file = File::create(path).map_err(|source| {
        AppError::io_with_context(source, format!("failed to create log file: {}", path.display()))
    })?;
    WriteLogger::init(LevelFilter::Debug, simplelog::Config::default(), file)
        .map_err(|err| AppError::unsupported(format!("logger already installed: {err}")))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::Cli;

    #[test]
    fn cli_accepts_script_with_defaults() {
        let cli = Cli::try_parse_from(["pva", "replay.txt"]).expect("single arg should parse");
        assert_eq!(cli.script, PathBuf::from("replay.txt"));
        assert_eq!(cli.pages, 2);
        assert!(cli.config.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn cli_parses_options_and_rejects_missing_script() {
        let cli = Cli::try_parse_from([
            "pva",
            "replay.txt",
            "--pages",
            "5",
            "--log-file",
            "pva.log",
        ])
        .expect("options should parse");
        assert_eq!(cli.pages, 5);
        assert_eq!(cli.log_file, Some(PathBuf::from("pva.log")));

        assert!(Cli::try_parse_from(["pva"]).is_err());
        assert!(Cli::try_parse_from(["pva", "a.txt", "b.txt"]).is_err());
    }
}
