use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fleet_autopilot::runner::run_session;

#[derive(Parser, Debug)]
#[command(name = "fleet-autopilot")]
#[command(about = "Autopilot for the turn-based space-combat wire protocol")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a live session over stdin/stdout
    Play,
    /// Re-run a recorded request log (one JSON request per line)
    Replay {
        #[arg(long)]
        input: PathBuf,
        /// Write responses here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play => {
            let stdin = io::stdin();
            let mut stdout = io::stdout().lock();
            run_session(stdin.lock(), &mut stdout)?;
        }
        Commands::Replay { input, output } => {
            let file = File::open(&input)
                .with_context(|| format!("opening request log {}", input.display()))?;
            let reader = BufReader::new(file);
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    let mut writer = BufWriter::new(file);
                    let requests = run_session(reader, &mut writer)?;
                    writer.flush().context("flushing response log")?;
                    println!("wrote={}", path.display());
                    println!("requests={requests}");
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    let requests = run_session(reader, &mut stdout)?;
                    eprintln!("requests={requests}");
                }
            }
        }
    }
    Ok(())
}
