use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use goche::game_state::chess_rules::STARTING_POSITION_FEN;
use goche::move_generation::perft::{run_to_depth, PerftOptions};
use goche::move_generation::perft_expectations::{run_from_source, run_with_expected};

/// Perft driver for the goche move generator.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Position to search. May carry expected counts (`;D1 20;D2 400` or `,20,400`)
    /// when `--depth` is not given.
    #[arg(long, default_value = STARTING_POSITION_FEN)]
    fen: String,

    /// Count leaves to this depth instead of checking expected counts
    #[arg(long)]
    depth: Option<u8>,

    /// Report the count under each root move
    #[arg(long)]
    divide: bool,

    /// File of annotated positions, one per line ("-" reads stdin)
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write log output to FILE instead of stderr
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("failed to initialise logging: {e:#}");
        std::process::exit(2);
    }

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            log::error!("Fatal error: {e:#}");
            std::process::exit(2);
        }
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let log_level = if args.debug { "debug" } else { "info" };

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );

    builder
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .write_style(env_logger::WriteStyle::Never);

    match &args.log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(env_logger::Target::Stderr);
        }
    }

    builder.try_init().context("logger already initialised")?;
    Ok(())
}

/// Returns whether every checked count matched.
fn run(args: &Args) -> Result<bool> {
    let options = PerftOptions {
        divide: args.divide,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(path) = &args.input {
        let reader: Box<dyn BufRead> = if path.as_os_str() == "-" {
            Box::new(io::stdin().lock())
        } else {
            let file = File::open(path)
                .with_context(|| format!("cannot open perft source {}", path.display()))?;
            Box::new(BufReader::new(file))
        };

        let lines = run_from_source(reader, options)
            .with_context(|| format!("reading perft source {}", path.display()))?;
        for line in &lines {
            writeln!(out, "{line}")?;
        }
        return Ok(lines.iter().all(|line| line.passed()));
    }

    if let Some(depth) = args.depth {
        let run = run_to_depth(&args.fen, depth, options).context("perft run failed")?;
        writeln!(out, "{run}")?;
        return Ok(true);
    }

    let report = run_with_expected(&args.fen, options).context("perft check failed")?;
    writeln!(out, "{report}")?;
    Ok(report.passed())
}
