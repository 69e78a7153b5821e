//! Main entry point for analyzing a batch of documents.

use crate::analyzer::{self, Analyzer, Strategy};
use crate::categories::{self, Category};
use crate::counter;
use crate::errors::{self, Result};
use crate::information;
use crate::input::{Document, Source};
use crate::mattr;
use crate::model::ModelSource;
use crate::output::{self, CategoryResult, Report, Row};
use crate::parallelism;
use log::{debug, info, warn};

pub const DEFAULT_WINDOW: usize = 11;

/// What to calculate?
pub struct DriverArgs<'a> {
    /// Window size for the moving average.
    /// Texts (or categories) with fewer tokens than this get a plain type-token ratio instead.
    pub window_size: usize,

    /// Categories to report on.
    /// Reported in the fixed order all, verb, noun, adjective, adverb, whatever the order given here.
    pub categories: &'a [Category],

    /// Which tokenizer and tagger to use.
    /// [Strategy::Statistical] falls back to rules if the model is not available.
    pub strategy: Strategy,

    /// Where the statistical tagger model comes from.
    pub model: ModelSource,

    /// Also report each category's MATTR against the whole document.
    pub relative: bool,

    /// Number of worker threads.
    /// Documents are independent, so this only affects speed; 0 means one per CPU.
    pub jobs: usize,
}

impl Default for DriverArgs<'_> {
    fn default() -> Self {
        DriverArgs {
            window_size: DEFAULT_WINDOW,
            categories: &Category::ALL,
            strategy: Strategy::Statistical,
            model: ModelSource::default(),
            relative: false,
            jobs: 0,
        }
    }
}

fn validate(args: &DriverArgs, sources: &[Source]) -> Result<Vec<Category>> {
    if args.window_size == 0 {
        return Err(errors::invalid_argument(
            "window size must be at least 1".to_owned(),
        ));
    }
    if sources.is_empty() {
        return Err(errors::invalid_input_ref("no documents given"));
    }
    categories::normalize_selection(args.categories)
}

/// Analyze everything.
///
/// This is the main entry point for the library. Only invalid settings are
/// errors; a document that cannot be read or analyzed becomes a failed row.
pub fn calc(args: &DriverArgs, sources: &[Source]) -> Result<Report> {
    let categories = validate(args, sources)?;
    let selection = analyzer::select(args.strategy, &args.model);
    let analyzer = selection.analyzer.as_ref();
    info!(target: "mattr",
        "documents: {}, window: {}, strategy: {}",
        sources.len(),
        args.window_size,
        analyzer.strategy()
    );
    let jobs = match args.jobs {
        0 => parallelism::default_threads(),
        n => n,
    };
    let rows = parallelism::map_parallel(sources, jobs, |source| {
        process(analyzer, source, &categories, args.window_size)
    });
    let mut warnings = selection.warnings;
    for row in &rows {
        match row {
            Row::Failed { name, error } => {
                warnings.push(format!("{name}: {error}"));
            }
            Row::Analyzed {
                name, lossy: true, ..
            } => {
                warnings.push(format!("{name}: invalid UTF-8 replaced"));
            }
            Row::Analyzed { .. } => (),
        }
    }
    let report = Report {
        window_size: args.window_size,
        categories,
        strategy: analyzer.strategy(),
        relative: args.relative,
        rows,
        warnings,
    };
    information::statistics(&report);
    Ok(report)
}

fn process(
    analyzer: &dyn Analyzer,
    source: &Source,
    categories: &[Category],
    window_size: usize,
) -> Row {
    let name = source.name();
    let result = source.load().and_then(|doc| {
        let results = analyze_document(analyzer, &doc, categories, window_size)?;
        Ok((doc.lossy, results))
    });
    let row = match result {
        Ok((lossy, results)) => Row::Analyzed {
            name,
            lossy,
            results,
        },
        Err(e) => {
            warn!(target: "mattr", "{name}: {e}");
            Row::Failed {
                name,
                error: e.to_string(),
            }
        }
    };
    debug!(target: "mattr", "{}", output::row_string(&row));
    row
}

/// Analyze one document for each of `categories`.
pub fn analyze_document(
    analyzer: &dyn Analyzer,
    doc: &Document,
    categories: &[Category],
    window_size: usize,
) -> Result<Vec<CategoryResult>> {
    let tagged = analyzer::analyze(analyzer, &doc.text)?;
    // every category is a subsequence of the full token stream
    let all_tokens = tagged.tokens();
    let results = categories
        .iter()
        .map(|&category| {
            let tokens = tagged.category(category);
            CategoryResult {
                category,
                types: counter::count_types(&tokens),
                tokens: tokens.len(),
                mattr: mattr::calculate_mattr(&tokens, window_size),
                relative_mattr: mattr::calculate_category_mattr(
                    &tokens,
                    &all_tokens,
                    window_size,
                ),
            }
        })
        .collect();
    Ok(results)
}
