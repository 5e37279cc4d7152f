mod app;
mod command;

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use glimpse_config::Config;
use glimpse_engine::CompilerRenderer;

use crate::app::App;

#[derive(Parser)]
#[command(
    version,
    about = "Preview #[ ... #] fragments of a text file as rendered images"
)]
struct Cli {
    /// Text file to open
    file: PathBuf,

    /// Config file to use instead of ~/.config/glimpse/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Compiler executable, overriding the config file
    #[arg(long)]
    compiler: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(Config::config_path);

    let config = match Config::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Fix or remove {} and try again", config_path.display());
            process::exit(1);
        }
    };

    let compiler = cli.compiler.unwrap_or(config.compiler);
    log::info!(
        "glimpse starting with compiler {} on {}",
        compiler.display(),
        cli.file.display()
    );
    let renderer = CompilerRenderer::new(compiler).with_user_config(config.user_preamble);

    let mut app = App::open(
        cli.file,
        config.style,
        renderer,
        config.temp_root.as_deref(),
    )?;
    println!("type 'help' for commands");

    let stdin = io::stdin();
    app.run(stdin.lock(), io::stdout().lock())
}
