//! Tokenizers: a Unicode word-boundary tokenizer and a regex fallback.

use itertools::Itertools;
use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// Clitics split off the end of a word, longest first.
const CLITICS: &[&str] = &["n't", "'ll", "'re", "'ve", "'s", "'d", "'m"];

static WORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn word_regex() -> &'static Regex {
    WORD_REGEX.get_or_init(|| Regex::new(r"[A-Za-z0-9]+").expect("valid pattern"))
}

pub trait Tokenizer {
    /// Tokens in source order, case preserved.
    fn surface_tokens(&self, text: &str) -> Vec<String>;

    /// Lowercase tokens in source order.
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.surface_tokens(text)
            .into_iter()
            .map(|t| t.to_lowercase())
            .collect_vec()
    }
}

/// Maximal runs of ASCII letters and digits.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegexTokenizer;

impl Tokenizer for RegexTokenizer {
    fn surface_tokens(&self, text: &str) -> Vec<String> {
        word_regex()
            .find_iter(text)
            .map(|m| m.as_str().to_owned())
            .collect_vec()
    }
}

/// Splits on Unicode word boundaries, keeps punctuation as separate tokens
/// and splits English clitics off their host word.
#[derive(Clone, Copy, Debug, Default)]
pub struct WordBoundaryTokenizer;

impl Tokenizer for WordBoundaryTokenizer {
    fn surface_tokens(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for segment in text.split_word_bounds() {
            if segment.chars().all(char::is_whitespace) {
                continue;
            }
            let normalized = segment.replace('\u{2019}', "'");
            match split_clitic(&normalized) {
                Some((host, clitic)) => {
                    tokens.push(host.to_owned());
                    tokens.push(clitic.to_owned());
                }
                None => tokens.push(normalized),
            }
        }
        tokens
    }
}

fn split_clitic(word: &str) -> Option<(&str, &str)> {
    let lower = word.to_lowercase();
    if lower.len() != word.len() {
        return None;
    }
    for clitic in CLITICS {
        if lower.ends_with(clitic) && word.len() > clitic.len() {
            let at = word.len() - clitic.len();
            if word.is_char_boundary(at) {
                return Some((&word[..at], &word[at..]));
            }
        }
    }
    None
}

pub fn is_alpha(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

/// Keeps only the tokens made entirely of letters.
pub fn alpha_only(tokens: Vec<String>) -> Vec<String> {
    tokens.into_iter().filter(|t| is_alpha(t)).collect_vec()
}
