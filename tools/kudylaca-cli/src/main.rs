use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use kudylaca_parser::IdOptions;

mod commands;

#[derive(Parser)]
#[command(author, version, about = "Reversible identifiers for Kudylaca words")]
struct Cli {
    /// Syllable delimiter accepted in words and used when decoding
    #[arg(short, long, global = true, default_value = "-")]
    delimiter: String,

    /// Leave out the leading syllable-count field
    #[arg(long, global = true)]
    no_length: bool,

    /// Leave out the trailing grammar tag
    #[arg(long, global = true)]
    no_grammar: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a word into an identifier
    Encode { word: String },
    /// Decode an identifier back into a word
    Decode { id: String },
    /// Show the affix analysis of a word
    Analyze { word: String },
    /// List every known affix
    Affixes,
    /// Estimate the collision probability for a number of words
    Collisions {
        #[arg(default_value_t = 1_000_000)]
        count: u64,
    },
    /// Encode and decode the built-in sample words
    Samples,
    /// Encode every word found in a text file
    Batch { file: PathBuf },
    /// Compile a word list (JSON array or one word per line) into an rkyv lexicon
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Find the word behind an identifier in a compiled lexicon
    Lookup {
        #[arg(short, long, value_name = "FILE")]
        lexicon: PathBuf,
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = IdOptions {
        delimiter: cli.delimiter.clone(),
        include_length: !cli.no_length,
        include_grammar: !cli.no_grammar,
    };
    let out = commands::Output { json: cli.json };

    match &cli.command {
        Command::Encode { word } => commands::encode(&out, word, &options),
        Command::Decode { id } => commands::decode(&out, id, &options),
        Command::Analyze { word } => commands::analyze(&out, word),
        Command::Affixes => commands::affixes(&out),
        Command::Collisions { count } => commands::collisions(&out, *count),
        Command::Samples => commands::samples(&out, &options),
        Command::Batch { file } => commands::batch(&out, file, &options),
        Command::Compile { input, output } => commands::compile(input, output, &options),
        Command::Lookup { lexicon, id } => commands::lookup(&out, lexicon, id),
    }
}
