use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cliclack::log;
use itertools::Itertools;
use mattr::analyzer::Strategy;
use mattr::categories::Category;
use mattr::driver::{self, DEFAULT_WINDOW, DriverArgs};
use mattr::input;
use mattr::model::ModelSource;
use mattr::output;
use std::path::PathBuf;

/// Pick texts and categories interactively, then analyze
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Tagger model file or directory
    #[arg(long)]
    model: Option<PathBuf>,
    /// Where to download the tagger model from if it is not cached
    /// (a single JSON file with "weights", "tagdict" and "classes"; see README)
    #[arg(long)]
    model_url: Option<String>,
    /// Default output file
    #[arg(long, default_value = "results.csv")]
    outfile: String,
}

fn ask_inputs() -> Result<Vec<input::Source>> {
    loop {
        let line: String = cliclack::input("Files or folders to analyze")
            .placeholder("texts/ or a.txt b.txt")
            .interact()?;
        let paths = line.split_whitespace().map(PathBuf::from).collect_vec();
        match input::collect_sources(&paths) {
            Ok(sources) => return Ok(sources),
            Err(e) => log::warning(format!("{e}, try again"))?,
        }
    }
}

fn ask_categories() -> Result<Vec<Category>> {
    let items = Category::ALL
        .iter()
        .map(|&c| (c, c.label(), ""))
        .collect_vec();
    let categories = cliclack::multiselect("Which categories?")
        .items(&items)
        .initial_values(Category::ALL.to_vec())
        .required(true)
        .interact()?;
    Ok(categories)
}

fn ask_window() -> Result<usize> {
    let window: usize = cliclack::input("Window size")
        .default_input(&DEFAULT_WINDOW.to_string())
        .validate(|s: &String| match s.trim().parse::<usize>() {
            Ok(n) if n >= 1 => Ok(()),
            _ => Err("enter a whole number, at least 1"),
        })
        .interact()?;
    Ok(window)
}

fn ask_strategy() -> Result<Strategy> {
    let strategy = cliclack::select("Tagger?")
        .items(&[
            (
                Strategy::Statistical,
                "Statistical",
                "falls back to rules if the model is missing",
            ),
            (Strategy::Rules, "Rule-based", "no model needed"),
        ])
        .interact()?;
    Ok(strategy)
}

fn main() -> Result<()> {
    let args = Args::parse();
    cliclack::intro("mattr")?;
    let sources = ask_inputs()?;
    log::info(format!("{} documents", sources.len()))?;
    let categories = ask_categories()?;
    let window = ask_window()?;
    let strategy = ask_strategy()?;
    let relative = cliclack::confirm("Also compare each category against all words?")
        .initial_value(false)
        .interact()?;

    let driver_args = DriverArgs {
        window_size: window,
        categories: &categories,
        strategy,
        model: ModelSource {
            path: args.model.clone(),
            url: args.model_url.clone(),
            cache_dir: None,
        },
        relative,
        jobs: 0,
    };
    let report = driver::calc(&driver_args, &sources).map_err(|e| anyhow!(e))?;
    for w in &report.warnings {
        log::warning(w)?;
    }

    let options = textwrap::Options::new(70).subsequent_indent("  ");
    let summary = report
        .rows
        .iter()
        .map(|row| textwrap::fill(&output::row_string(row), &options))
        .join("\n");
    cliclack::note("Results", summary)?;

    let filename: String = cliclack::input("Save to")
        .default_input(&args.outfile)
        .interact()?;
    report
        .save(filename.as_ref(), false)
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("cannot write {filename}"))?;
    log::success(format!("Wrote {filename}"))?;
    cliclack::outro("Done")?;
    Ok(())
}
