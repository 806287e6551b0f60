use anyhow::Context;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use obj2hc::{Config, Mode};
use std::path::PathBuf;
use std::process::ExitCode;

/// Bake a Wavefront OBJ file into a static HolyC header (<NAME>.HC)
#[derive(Parser, Debug)]
#[command(name = "obj2hc", version)]
struct Args {
    /// OBJ file to read
    file: PathBuf,

    /// Symbol name for the guard, the arrays and the output file
    #[arg(value_parser = symbol)]
    name: String,

    /// What to bake
    #[arg(value_enum, default_value_t = Mode::Line)]
    mode: Mode,

    /// Directory the header is written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Error,
            (false, 0) => LevelFilter::Warn,
            (false, 1) => LevelFilter::Info,
            (false, _) => LevelFilter::Debug,
        }
    }
}

fn symbol(name: &str) -> Result<String, String> {
    obj2hc::config::check_symbol(name)
        .map(|()| name.to_string())
        .map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(args.level())
        .init()
    {
        eprintln!("warning: logging disabled: {e}");
    }

    match convert(args) {
        Ok(path) => {
            log::info!("done: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn convert(args: Args) -> anyhow::Result<PathBuf> {
    let input = args.file.display().to_string();
    let config = Config::new(args.file, args.name, args.mode, args.out_dir)?;
    obj2hc::run(&config).with_context(|| format!("failed to convert {input}"))
}
