//! Tokenizer and tagger pairs, and how one is chosen.

use crate::categories::Category;
use crate::errors::Result;
use crate::model::{self, ModelSource};
use crate::perceptron::PerceptronModel;
use crate::rules;
use crate::tokenize::{self, RegexTokenizer, Tokenizer, WordBoundaryTokenizer};
use clap::ValueEnum;
use itertools::Itertools;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Perceptron tagger, with rules as the fallback.
    Statistical,
    /// Regex tokenizer and rule-based tagger only.
    Rules,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strategy::Statistical => write!(f, "statistical"),
            Strategy::Rules => write!(f, "rules"),
        }
    }
}

pub trait Analyzer: Send + Sync {
    fn strategy(&self) -> Strategy;

    /// Lowercase tokens in source order.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Pairs each token with a tag. `text` is the text the tokens came from.
    fn classify(&self, tokens: &[String], text: &str) -> Result<Vec<(String, String)>>;
}

pub struct RuleAnalyzer;

impl Analyzer for RuleAnalyzer {
    fn strategy(&self) -> Strategy {
        Strategy::Rules
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        RegexTokenizer.tokenize(text)
    }

    fn classify(&self, tokens: &[String], _text: &str) -> Result<Vec<(String, String)>> {
        Ok(rules::tag_tokens(tokens))
    }
}

pub struct StatisticalAnalyzer {
    model: Arc<PerceptronModel>,
}

impl StatisticalAnalyzer {
    pub fn new(model: Arc<PerceptronModel>) -> StatisticalAnalyzer {
        StatisticalAnalyzer { model }
    }
}

impl Analyzer for StatisticalAnalyzer {
    fn strategy(&self) -> Strategy {
        Strategy::Statistical
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        WordBoundaryTokenizer.tokenize(text)
    }

    fn classify(&self, tokens: &[String], text: &str) -> Result<Vec<(String, String)>> {
        // the tagger does better with the original capitalization
        let surface = WordBoundaryTokenizer.surface_tokens(text);
        let aligned = surface.len() == tokens.len()
            && surface
                .iter()
                .zip(tokens)
                .all(|(s, t)| s.to_lowercase() == *t);
        let input = if aligned { surface } else { tokens.to_vec() };
        match self.model.tag(&input) {
            Ok(tags) => Ok(tokens
                .iter()
                .map(|t| t.to_lowercase())
                .zip(tags)
                .collect_vec()),
            Err(e) => {
                warn!(target: "mattr", "tagger failed ({e}), using rules instead");
                RuleAnalyzer.classify(&RegexTokenizer.tokenize(text), text)
            }
        }
    }
}

/// The analyzer that will actually be used, and why.
pub struct Selection {
    pub analyzer: Box<dyn Analyzer>,
    pub warnings: Vec<String>,
}

/// Picks the analyzer for `strategy`, falling back to rules if the model
/// cannot be had. The model is loaded at most once per process.
pub fn select(strategy: Strategy, source: &ModelSource) -> Selection {
    match strategy {
        Strategy::Rules => Selection {
            analyzer: Box::new(RuleAnalyzer),
            warnings: vec![],
        },
        Strategy::Statistical => match model::shared_model(source) {
            Ok(model) => {
                info!(target: "mattr", "using statistical tagger");
                Selection {
                    analyzer: Box::new(StatisticalAnalyzer::new(model)),
                    warnings: vec![],
                }
            }
            Err(e) => {
                let msg = format!("statistical tagger unavailable, using rules: {e}");
                warn!(target: "mattr", "{msg}");
                Selection {
                    analyzer: Box::new(RuleAnalyzer),
                    warnings: vec![msg],
                }
            }
        },
    }
}

/// A tokenized and tagged text.
pub struct TaggedText {
    /// All tokens with their tags.
    pub tagged: Vec<(String, String)>,
    /// Tokens made only of letters; these are the words of [Category::All].
    pub words: Vec<String>,
}

impl TaggedText {
    /// Every token of the document, whatever its tag.
    pub fn tokens(&self) -> Vec<&str> {
        self.tagged.iter().map(|(token, _)| token.as_str()).collect_vec()
    }

    pub fn category(&self, category: Category) -> Vec<&str> {
        match category {
            Category::All => self.words.iter().map(|w| w.as_str()).collect_vec(),
            c => self
                .tagged
                .iter()
                .filter(|(_, tag)| c.matches(tag))
                .map(|(token, _)| token.as_str())
                .collect_vec(),
        }
    }
}

pub fn analyze(analyzer: &dyn Analyzer, text: &str) -> Result<TaggedText> {
    let tokens = analyzer.tokenize(text);
    let tagged = analyzer.classify(&tokens, text)?;
    let words = tokenize::alpha_only(tokens);
    Ok(TaggedText { tagged, words })
}

/// Lowercase tokens of `text` that belong to `category`, in order.
pub fn extract_category(
    analyzer: &dyn Analyzer,
    text: &str,
    category: Category,
) -> Result<Vec<String>> {
    let words = match category {
        Category::All => tokenize::alpha_only(analyzer.tokenize(text)),
        c => analyze(analyzer, text)?
            .category(c)
            .into_iter()
            .map(|t| t.to_owned())
            .collect_vec(),
    };
    Ok(words)
}
