use clap::{Parser, Subcommand};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use wordswap::config::{load_config, parse_pair};
use wordswap::{Result, Transformer};

#[derive(Parser)]
#[command(name = "wordswap", about = "Whole-word find/replace over text streams")]
struct Cli {
    /// Dictionary file (defaults to $WORDSWAP_CONFIG, then ~/.config/wordswap.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra replacement on top of the dictionary file
    #[arg(
        short,
        long = "map",
        value_name = "KEY=VALUE",
        value_parser = parse_pair,
        global = true
    )]
    map: Vec<(String, String)>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy INPUT (or stdin) to OUTPUT (or stdout), replacing dictionary words
    Apply {
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate the dictionary and print its entries
    Check,
}

fn build_transformer(cli: &Cli) -> Result<Transformer> {
    let mut config = load_config(cli.config.as_deref())?;
    config.merge_pairs(cli.map.iter().cloned());
    let map = config.translation_map()?;
    debug!("entries={}", map.len());
    Ok(Transformer::with_map(map))
}

fn run_apply(
    transformer: &Transformer,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let mut reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(std::io::stdin().lock()),
    };
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    let start = std::time::Instant::now();
    transformer.transform(&mut *reader, &mut *writer)?;
    writer.flush()?;
    debug!("transform: {:?}", start.elapsed());
    Ok(())
}

fn run_check(transformer: &Transformer) {
    let mut entries: Vec<_> = transformer.map().iter().collect();
    entries.sort();
    for (key, value) in entries {
        println!("{key} -> {value}");
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let transformer = match build_transformer(&cli) {
        Ok(transformer) => transformer,
        Err(e) => {
            eprintln!("Invalid dictionary: {e}");
            std::process::exit(1);
        }
    };

    match &cli.command {
        Commands::Apply { input, output } => {
            if let Err(e) = run_apply(&transformer, input.as_deref(), output.as_deref()) {
                eprintln!("Transform failed: {e}");
                std::process::exit(1);
            }
        }
        Commands::Check => run_check(&transformer),
    }
}
