//! Greedy averaged-perceptron part-of-speech tagger.
//!
//! The model is a set of feature weights per tag, a dictionary of
//! unambiguous words, and the list of tags. Tags are Penn Treebank tags.

use crate::errors::{Result, invalid_input, invalid_input_ref};
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::{fs, io};

const START: [&str; 2] = ["-START-", "-START2-"];
const END: [&str; 2] = ["-END-", "-END2-"];

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PerceptronModel {
    pub weights: HashMap<String, HashMap<String, f64>>,
    pub tagdict: HashMap<String, String>,
    pub classes: Vec<String>,
}

impl PerceptronModel {
    /// Loads a model from a single JSON file, or from a directory holding
    /// separate `*.weights.json`, `*.tagdict.json` and `*.classes.json` files.
    pub fn load(path: &Path) -> Result<PerceptronModel> {
        let model = if path.is_dir() {
            Self::load_dir(path)?
        } else {
            let file = fs::File::open(path)?;
            serde_json::from_reader(io::BufReader::new(file))?
        };
        model.check()?;
        debug!(target: "mattr",
            "model {}: {} features, {} dictionary words, {} tags",
            path.display(),
            model.weights.len(),
            model.tagdict.len(),
            model.classes.len()
        );
        Ok(model)
    }

    fn load_dir(dir: &Path) -> Result<PerceptronModel> {
        let mut weights = None;
        let mut tagdict = None;
        let mut classes = None;
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_owned();
            let read = || -> Result<io::BufReader<fs::File>> {
                Ok(io::BufReader::new(fs::File::open(&path)?))
            };
            if name.ends_with(".weights.json") {
                weights = Some(serde_json::from_reader(read()?)?);
            } else if name.ends_with(".tagdict.json") {
                tagdict = Some(serde_json::from_reader(read()?)?);
            } else if name.ends_with(".classes.json") {
                classes = Some(serde_json::from_reader(read()?)?);
            }
        }
        match (weights, tagdict, classes) {
            (Some(weights), Some(tagdict), Some(classes)) => Ok(PerceptronModel {
                weights,
                tagdict,
                classes,
            }),
            _ => Err(invalid_input(format!(
                "{}: expected *.weights.json, *.tagdict.json and *.classes.json",
                dir.display()
            ))),
        }
    }

    fn check(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(invalid_input_ref("tagger model has no tags"));
        }
        Ok(())
    }

    /// Tags a sentence or document. Tokens keep their original case.
    pub fn tag(&self, tokens: &[String]) -> Result<Vec<String>> {
        self.check()?;
        let context = START
            .iter()
            .map(|s| (*s).to_owned())
            .chain(tokens.iter().map(|t| normalize(t)))
            .chain(END.iter().map(|s| (*s).to_owned()))
            .collect_vec();
        let mut prev = START[0].to_owned();
        let mut prev2 = START[1].to_owned();
        let mut tags = Vec::with_capacity(tokens.len());
        for (i, word) in tokens.iter().enumerate() {
            let tag = match self.tagdict.get(word) {
                Some(tag) => tag.clone(),
                None => {
                    let features = get_features(i, word, &context, &prev, &prev2);
                    self.predict(&features)
                }
            };
            prev2 = prev;
            prev = tag.clone();
            tags.push(tag);
        }
        Ok(tags)
    }

    fn predict(&self, features: &HashMap<String, u32>) -> String {
        let mut scores: HashMap<&str, f64> = HashMap::new();
        for (feature, &value) in features {
            if value == 0 {
                continue;
            }
            if let Some(weights) = self.weights.get(feature) {
                for (label, weight) in weights {
                    *scores.entry(label.as_str()).or_insert(0.0) += value as f64 * weight;
                }
            }
        }
        let score = |label: &String| scores.get(label.as_str()).copied().unwrap_or(0.0);
        self.classes
            .iter()
            .max_by(|a, b| score(a).total_cmp(&score(b)).then_with(|| a.cmp(b)))
            .cloned()
            .unwrap_or_default()
    }
}

fn normalize(word: &str) -> String {
    let first = word.chars().next();
    if word.contains('-') && first != Some('-') {
        "!HYPHEN".to_owned()
    } else if word.len() == 4 && word.chars().all(|c| c.is_ascii_digit()) {
        "!YEAR".to_owned()
    } else if first.is_some_and(|c| c.is_ascii_digit()) {
        "!DIGITS".to_owned()
    } else {
        word.to_lowercase()
    }
}

fn suffix(word: &str) -> &str {
    match word.char_indices().rev().nth(2) {
        Some((i, _)) => &word[i..],
        None => word,
    }
}

fn prefix(word: &str) -> &str {
    match word.chars().next() {
        Some(c) => &word[..c.len_utf8()],
        None => "",
    }
}

fn get_features(
    i: usize,
    word: &str,
    context: &[String],
    prev: &str,
    prev2: &str,
) -> HashMap<String, u32> {
    let i = i + START.len();
    let mut features = HashMap::new();
    let mut add = |parts: &[&str]| {
        *features.entry(parts.join(" ")).or_insert(0) += 1;
    };
    add(&["bias"]);
    add(&["i suffix", suffix(word)]);
    add(&["i pref1", prefix(word)]);
    add(&["i-1 tag", prev]);
    add(&["i-2 tag", prev2]);
    add(&["i tag+i-2 tag", prev, prev2]);
    add(&["i word", context[i].as_str()]);
    add(&["i-1 tag+i word", prev, context[i].as_str()]);
    add(&["i-1 word", context[i - 1].as_str()]);
    add(&["i-1 suffix", suffix(&context[i - 1])]);
    add(&["i-2 word", context[i - 2].as_str()]);
    add(&["i+1 word", context[i + 1].as_str()]);
    add(&["i+1 suffix", suffix(&context[i + 1])]);
    add(&["i+2 word", context[i + 2].as_str()]);
    features
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| (*x).to_owned()).collect_vec()
    }

    fn tiny_model() -> PerceptronModel {
        let mut weights = HashMap::new();
        weights.insert(
            "i suffix ing".to_owned(),
            HashMap::from([("VBG".to_owned(), 2.0), ("NN".to_owned(), 0.5)]),
        );
        weights.insert(
            "i-1 tag DT".to_owned(),
            HashMap::from([("NN".to_owned(), 1.0)]),
        );
        weights.insert(
            "i suffix wly".to_owned(),
            HashMap::from([("RB".to_owned(), 3.0)]),
        );
        PerceptronModel {
            weights,
            tagdict: HashMap::from([
                ("The".to_owned(), "DT".to_owned()),
                ("the".to_owned(), "DT".to_owned()),
                (".".to_owned(), ".".to_owned()),
            ]),
            classes: s(&["DT", "NN", "RB", "VBG", "."]),
        }
    }

    #[test]
    fn normalize_words() {
        assert_eq!(normalize("well-known"), "!HYPHEN");
        assert_eq!(normalize("-"), "-");
        assert_eq!(normalize("1999"), "!YEAR");
        assert_eq!(normalize("42nd"), "!DIGITS");
        assert_eq!(normalize("Cat"), "cat");
    }

    #[test]
    fn suffix_and_prefix() {
        assert_eq!(suffix("running"), "ing");
        assert_eq!(suffix("go"), "go");
        assert_eq!(suffix("café"), "afé");
        assert_eq!(prefix("über"), "ü");
        assert_eq!(prefix(""), "");
    }

    #[test]
    fn features_use_context() {
        let tokens = s(&["The", "cat"]);
        let context = s(&["-START-", "-START2-", "the", "cat", "-END-", "-END2-"]);
        let f = get_features(1, &tokens[1], &context, "DT", "-START-");
        assert_eq!(f["bias"], 1);
        assert_eq!(f["i suffix cat"], 1);
        assert_eq!(f["i-1 tag DT"], 1);
        assert_eq!(f["i-1 word the"], 1);
        assert_eq!(f["i+1 word -END-"], 1);
        assert_eq!(f["i+2 word -END2-"], 1);
        assert_eq!(f["i tag+i-2 tag DT -START-"], 1);
    }

    #[test]
    fn tag_with_dictionary_and_weights() {
        let model = tiny_model();
        let tags = model.tag(&s(&["The", "running", "."])).unwrap();
        assert_eq!(tags, ["DT", "VBG", "."]);
        let tags = model.tag(&s(&["the", "cat", "slowly"])).unwrap();
        assert_eq!(tags, ["DT", "NN", "RB"]);
    }

    #[test]
    fn ties_break_on_label() {
        let model = tiny_model();
        // no weights fire at all: every score is 0, the largest label wins
        let tags = model.tag(&s(&["zzz"])).unwrap();
        assert_eq!(tags, ["VBG"]);
    }

    #[test]
    fn empty_classes_rejected() {
        let model = PerceptronModel::default();
        assert!(model.tag(&s(&["a"])).is_err());
    }

    #[test]
    fn load_single_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, serde_json::to_string(&tiny_model()).unwrap()).unwrap();
        let model = PerceptronModel::load(&path).unwrap();
        assert_eq!(model.classes.len(), 5);
    }

    #[test]
    fn load_split_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        let m = tiny_model();
        fs::write(
            dir.join("tagger.weights.json"),
            serde_json::to_string(&m.weights).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.join("tagger.tagdict.json"),
            serde_json::to_string(&m.tagdict).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.join("tagger.classes.json"),
            serde_json::to_string(&m.classes).unwrap(),
        )
        .unwrap();
        let model = PerceptronModel::load(dir).unwrap();
        assert_eq!(model.tagdict["the"], "DT");
    }
}
