use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::Context;
use charchipper::{CharCodec, Vocabulary, load_vocab_path, save_vocab_path};
use clap::Parser;

/// Character-level tokenizer trainer and smoke-test CLI.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Logging verbosity; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug)]
pub enum Command {
    /// Train a vocabulary from a text file, one sample per line.
    Train {
        /// Path to the training text file.
        #[arg(long)]
        input: String,

        /// Destination path for the vocabulary record.
        #[arg(long)]
        output: String,

        /// Special tokens, in registration order; repeatable.
        #[arg(long = "special")]
        specials: Vec<String>,
    },

    /// Load a vocabulary, encode a string, and decode it back.
    Roundtrip {
        /// Path to the vocabulary record.
        #[arg(long)]
        vocab: String,

        /// The text to encode.
        text: String,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    stderrlog::new()
        .modules(["charchipper", module_path!()])
        .verbosity(args.verbose as usize + 2)
        .init()?;

    match &args.command {
        Command::Train {
            input,
            output,
            specials,
        } => run_train(input, output, specials),
        Command::Roundtrip { vocab, text } => run_roundtrip(vocab, text),
    }
}

fn run_train(
    input: &str,
    output: &str,
    specials: &[String],
) -> anyhow::Result<()> {
    let file = File::open(input).with_context(|| format!("failed to open {input}"))?;
    let lines = BufReader::new(file)
        .lines()
        .collect::<Result<Vec<String>, _>>()
        .with_context(|| format!("failed to read {input}"))?;

    let mut vocab = Vocabulary::with_special_tokens(specials.iter().cloned());
    vocab.train_from_iter(&lines);

    save_vocab_path(&vocab, output).with_context(|| format!("failed to write {output}"))?;
    log::info!("trained {} units from {} lines", vocab.size(), lines.len());

    Ok(())
}

fn run_roundtrip(
    vocab_path: &str,
    text: &str,
) -> anyhow::Result<()> {
    let vocab = load_vocab_path(vocab_path)
        .with_context(|| format!("failed to load {vocab_path}"))?;
    let codec = CharCodec::new(&vocab);

    let ids = codec.encode(text)?;
    println!("{ids:?}");
    println!("{}", codec.decode(&ids)?);

    Ok(())
}
