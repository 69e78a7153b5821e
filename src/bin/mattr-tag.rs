use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::error;
use mattr::analyzer::{self, Strategy};
use mattr::categories;
use mattr::errors::Result;
use mattr::input::Document;
use mattr::model::ModelSource;
use std::path::PathBuf;
use std::process;

/// Show how each token of a text is tagged
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input file
    infile: PathBuf,
    /// Tokenizer and tagger
    #[arg(long, value_enum, default_value_t = Strategy::Statistical)]
    strategy: Strategy,
    /// Tagger model file or directory
    #[arg(long)]
    model: Option<PathBuf>,
    /// Where to download the tagger model from if it is not cached
    /// (a single JSON file with "weights", "tagdict" and "classes"; see README)
    #[arg(long)]
    model_url: Option<String>,
    /// Model cache directory
    #[arg(long)]
    cache_dir: Option<PathBuf>,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn process(args: &Args) -> Result<()> {
    let doc = Document::read(&args.infile)?;
    let source = ModelSource {
        path: args.model.clone(),
        url: args.model_url.clone(),
        cache_dir: args.cache_dir.clone(),
    };
    let selection = analyzer::select(args.strategy, &source);
    let tagged = analyzer::analyze(selection.analyzer.as_ref(), &doc.text)?;
    for (token, tag) in &tagged.tagged {
        let category = categories::categorize(tag).map_or("-".to_owned(), |c| c.to_string());
        println!("{token}\t{tag}\t{category}");
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    if let Err(e) = process(&args) {
        error!(target: "mattr", "{e}");
        process::exit(1);
    }
}
