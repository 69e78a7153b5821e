//! Rule-based part-of-speech classification.
//!
//! Each token is checked against [RULES] in order and receives the tag of the
//! first rule that matches, or `NOUN` if none does. Verbs come first because
//! irregular verb forms overlap with the other word lists; a word like
//! `runner` therefore only becomes a noun after the verb, adjective and adverb
//! rules have all failed.

use itertools::Itertools;

/// A closed word list plus a set of suffixes for one tag.
pub struct Rule {
    pub tag: &'static str,
    pub words: &'static [&'static str],
    pub suffixes: &'static [&'static str],
}

/// Suffix rules only fire if at least this much of the word remains.
pub const MIN_STEM: usize = 3;

pub const DEFAULT_TAG: &str = "NOUN";

pub const RULES: &[Rule] = &[
    Rule {
        tag: "VERB",
        words: &[
            "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
            "do", "does", "did", "done", "will", "would", "shall", "should", "can", "could",
            "may", "might", "must", "go", "goes", "went", "gone", "get", "got", "gotten",
            "make", "made", "say", "said", "see", "saw", "seen", "come", "came", "take",
            "took", "taken", "know", "knew", "known", "think", "thought", "give", "gave",
            "given", "find", "found", "tell", "told", "run", "ran", "sit", "sat", "eat",
            "ate", "eaten", "write", "wrote", "written", "speak", "spoke", "spoken", "bring",
            "brought", "buy", "bought", "begin", "began", "begun", "keep", "kept", "hold",
            "held", "stand", "stood", "leave", "left", "feel", "felt", "meet", "met", "pay",
            "paid", "sell", "sold", "send", "sent", "build", "built", "fall", "fell",
            "fallen", "grow", "grew", "grown", "draw", "drew", "drawn", "drive", "drove",
            "driven", "fly", "flew", "flown", "lose", "lost", "win", "won", "sing", "sang",
            "sung", "swim", "swam", "swum", "throw", "threw", "thrown", "wear", "wore",
            "worn", "become", "became", "let", "put", "set", "read", "want", "like", "use",
            "need", "seem", "help", "show", "hear", "heard", "play", "move", "live", "believe",
            "happen", "understand", "understood", "look", "ask", "try", "call",
        ],
        suffixes: &["ing", "ed", "ize", "ise", "ify", "ates"],
    },
    Rule {
        tag: "ADJ",
        words: &[
            "good", "better", "best", "bad", "worse", "worst", "big", "bigger", "biggest",
            "small", "smaller", "smallest", "great", "greater", "greatest", "little",
            "large", "larger", "long", "longer", "short", "shorter", "high", "higher",
            "low", "lower", "old", "older", "new", "newer", "young", "younger", "few",
            "many", "much", "more", "most", "other", "same", "different", "important",
            "early", "late", "able", "hot", "cold", "warm", "happy", "sad", "easy", "hard",
            "strong", "weak", "red", "blue", "green", "black", "white", "free", "full",
            "real", "sure", "true", "whole", "clear", "close", "nice", "fine", "lovely",
            "friendly", "likely", "lonely", "ugly", "silly", "quick", "slow", "fast",
        ],
        suffixes: &["ful", "ous", "able", "ible", "ive", "less", "ish", "ical", "ic", "est"],
    },
    Rule {
        tag: "ADV",
        words: &[
            "not", "very", "too", "also", "often", "always", "never", "sometimes", "soon",
            "here", "there", "now", "then", "again", "already", "still", "just", "quite",
            "almost", "perhaps", "rather", "even", "ever", "yet", "well", "once", "away",
            "today", "tomorrow", "yesterday", "together", "maybe", "seldom",
        ],
        suffixes: &["ly", "ward", "wards", "wise"],
    },
    Rule {
        tag: "NOUN",
        words: &[
            "man", "woman", "child", "children", "people", "time", "year", "day", "way",
            "thing", "world", "life", "hand", "part", "place", "case", "week", "company",
            "system", "group", "number", "problem", "fact", "cat", "dog", "house", "water",
        ],
        suffixes: &[
            "tion", "sion", "ment", "ness", "ity", "ship", "hood", "dom", "ism", "ist",
            "ance", "ence", "er", "or",
        ],
    },
];

fn suffix_matches(token: &str, suffix: &str) -> bool {
    token.ends_with(suffix) && token.chars().count() >= suffix.chars().count() + MIN_STEM
}

impl Rule {
    pub fn matches(&self, token: &str) -> bool {
        self.words.contains(&token) || self.suffixes.iter().any(|s| suffix_matches(token, s))
    }
}

/// Tag for one lowercase token.
pub fn tag_token(token: &str) -> &'static str {
    RULES
        .iter()
        .find(|r| r.matches(token))
        .map_or(DEFAULT_TAG, |r| r.tag)
}

pub fn tag_tokens(tokens: &[String]) -> Vec<(String, String)> {
    tokens
        .iter()
        .map(|t| {
            let lower = t.to_lowercase();
            let tag = tag_token(&lower);
            (lower, tag.to_owned())
        })
        .collect_vec()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn runner_falls_through_to_noun() {
        let verb = &RULES[0];
        let adj = &RULES[1];
        let adv = &RULES[2];
        let noun = &RULES[3];
        assert!(!verb.matches("runner"));
        assert!(!adj.matches("runner"));
        assert!(!adv.matches("runner"));
        assert!(noun.matches("runner"));
        assert_eq!(tag_token("runner"), "NOUN");
    }

    #[test]
    fn verb_before_everything() {
        assert_eq!(tag_token("running"), "VERB");
        assert_eq!(tag_token("walked"), "VERB");
        // "left" is also an adjective and a noun
        assert_eq!(tag_token("left"), "VERB");
    }

    #[test]
    fn adjective_before_adverb() {
        assert!(RULES[2].matches("lovely"));
        assert_eq!(tag_token("lovely"), "ADJ");
    }

    #[test]
    fn adjective_before_noun() {
        assert!(RULES[3].matches("better"));
        assert_eq!(tag_token("better"), "ADJ");
    }

    #[test]
    fn adverbs() {
        assert_eq!(tag_token("quickly"), "ADV");
        assert_eq!(tag_token("never"), "ADV");
        assert_eq!(tag_token("backwards"), "ADV");
    }

    #[test]
    fn short_stems_do_not_match_suffixes() {
        // "bed" would end in "-ed" but leaves a one-letter stem
        assert_eq!(tag_token("bed"), "NOUN");
        assert_eq!(tag_token("fly"), "VERB");
        assert_eq!(tag_token("ply"), "NOUN");
    }

    #[test]
    fn default_is_noun() {
        assert_eq!(tag_token("the"), "NOUN");
        assert_eq!(tag_token("2024"), "NOUN");
    }

    #[test]
    fn tag_tokens_lowercases() {
        let tokens = vec!["Quickly".to_owned(), "ran".to_owned()];
        assert_eq!(
            tag_tokens(&tokens),
            [
                ("quickly".to_owned(), "ADV".to_owned()),
                ("ran".to_owned(), "VERB".to_owned()),
            ]
        );
    }
}
