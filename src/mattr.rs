//! Moving-average type-token ratio.

use crate::counter::{WindowCounter, count_types};
use itertools::Itertools;

/// MATTR of a token sequence.
///
/// An empty sequence has MATTR 0. A sequence shorter than the window has no
/// full window, and its plain type-token ratio is returned instead.
/// Otherwise the result is the mean of `types / window_size` over all
/// `n - window_size + 1` windows.
///
/// The window is maintained incrementally; the ratios are summed in window
/// order and divided once, exactly like [calculate_mattr_naive].
pub fn calculate_mattr<S: AsRef<str>>(tokens: &[S], window_size: usize) -> f64 {
    assert!(window_size > 0, "window size must be positive");
    let n = tokens.len();
    if n == 0 {
        return 0.0;
    }
    if n < window_size {
        return count_types(tokens) as f64 / n as f64;
    }
    sliding_mean(tokens, window_size)
}

/// Same as [calculate_mattr], recounting every window from scratch.
pub fn calculate_mattr_naive<S: AsRef<str>>(tokens: &[S], window_size: usize) -> f64 {
    assert!(window_size > 0, "window size must be positive");
    let n = tokens.len();
    if n == 0 {
        return 0.0;
    }
    if n < window_size {
        return count_types(tokens) as f64 / n as f64;
    }
    let ratios = tokens
        .windows(window_size)
        .map(|w| count_types(w) as f64 / window_size as f64)
        .collect_vec();
    let mut sum = 0.0;
    for r in &ratios {
        sum += r;
    }
    sum / ratios.len() as f64
}

/// MATTR of the tokens of one category, reported against the whole document.
///
/// If either sequence is shorter than the window, the number of distinct
/// category tokens is divided by the number of tokens in the whole document
/// (not in the category). Otherwise this is the MATTR of `category_tokens`;
/// `all_tokens` only matters in the short case.
pub fn calculate_category_mattr<S: AsRef<str>, U: AsRef<str>>(
    category_tokens: &[S],
    all_tokens: &[U],
    window_size: usize,
) -> f64 {
    assert!(window_size > 0, "window size must be positive");
    if category_tokens.len() < window_size || all_tokens.len() < window_size {
        if all_tokens.is_empty() {
            return 0.0;
        }
        return count_types(category_tokens) as f64 / all_tokens.len() as f64;
    }
    sliding_mean(category_tokens, window_size)
}

fn sliding_mean<S: AsRef<str>>(tokens: &[S], window_size: usize) -> f64 {
    debug_assert!(tokens.len() >= window_size);
    let mut counter = WindowCounter::new();
    for t in &tokens[..window_size] {
        counter.add(t.as_ref());
    }
    let mut sum = counter.types() as f64 / window_size as f64;
    for i in window_size..tokens.len() {
        counter.remove(tokens[i - window_size].as_ref());
        counter.add(tokens[i].as_ref());
        sum += counter.types() as f64 / window_size as f64;
    }
    sum / (tokens.len() - window_size + 1) as f64
}
