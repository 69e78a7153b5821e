use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::{error, info, warn};
use mattr::analyzer::Strategy;
use mattr::categories::Category;
use mattr::driver::{self, DEFAULT_WINDOW, DriverArgs};
use mattr::errors::Result;
use mattr::input;
use mattr::model::ModelSource;
use mattr::output::{OError, Report};
use std::path::PathBuf;
use std::{error, fs, io, process};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Input files or folders of .txt files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Output file (.csv, .xlsx or .json); CSV to stdout if omitted
    #[arg(short, long)]
    outfile: Option<PathBuf>,
    /// Window size
    #[arg(short, long, default_value_t = DEFAULT_WINDOW)]
    window: usize,
    /// Categories to report (default: all of them)
    #[arg(short, long = "category", value_enum)]
    categories: Vec<Category>,
    /// Tokenizer and tagger
    #[arg(long, value_enum, default_value_t = Strategy::Statistical)]
    strategy: Strategy,
    /// Also report each category's MATTR against the whole document
    #[arg(long)]
    relative: bool,
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
    /// Number of threads (0: one per CPU)
    #[arg(short, long, default_value_t = 0)]
    jobs: usize,
    /// Produce compact JSON files
    #[arg(long)]
    compact: bool,
    /// Report errors as a JSON file
    #[arg(long)]
    error_file: Option<String>,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn write_report(args: &Args, report: &Report) -> Result<()> {
    match &args.outfile {
        None => report.write_csv(io::stdout().lock())?,
        Some(outfile) => {
            info!(target: "mattr", "write: {}", outfile.display());
            report.save(outfile, args.compact)?;
        }
    }
    Ok(())
}

fn process(args: &Args) -> Result<()> {
    let sources = input::collect_sources(&args.inputs)?;
    let categories = if args.categories.is_empty() {
        Category::ALL.to_vec()
    } else {
        args.categories.clone()
    };
    let driver_args = DriverArgs {
        window_size: args.window,
        categories: &categories,
        strategy: args.strategy,
        model: ModelSource {
            path: args.model.clone(),
            url: args.model_url.clone(),
            cache_dir: args.cache_dir.clone(),
        },
        relative: args.relative,
        jobs: args.jobs,
    };
    let report = driver::calc(&driver_args, &sources)?;
    write_report(args, &report)?;
    for w in &report.warnings {
        warn!(target: "mattr", "{w}");
    }
    info!(target: "mattr",
        "finished: {} documents, {} failed",
        report.rows.len(),
        report.failures()
    );
    Ok(())
}

fn store_error(error_file: &str, e: &(dyn error::Error + Send + Sync)) -> Result<()> {
    let error = OError {
        error: format!("{e}"),
    };
    let file = fs::File::create(error_file)?;
    let writer = io::BufWriter::new(file);
    serde_json::to_writer(writer, &error)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    match process(&args) {
        Ok(()) => (),
        Err(e) => {
            match &args.error_file {
                Some(filename) => match store_error(filename, &*e) {
                    Ok(()) => {
                        info!(target: "mattr", "error reported: {e}");
                    }
                    Err(e2) => {
                        error!(target: "mattr", "{e}");
                        error!(target: "mattr", "{e2}");
                    }
                },
                None => error!(target: "mattr", "{e}"),
            }
            process::exit(1);
        }
    }
}
