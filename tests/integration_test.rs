use mattr::analyzer::{Strategy, StatisticalAnalyzer};
use mattr::categories::Category;
use mattr::driver::{self, DriverArgs};
use mattr::input::{self, Document, Source};
use mattr::output::{Report, Row};
use mattr::perceptron::PerceptronModel;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

const TEXT: &str = "The cat sat quickly. The dog ran fast.";

fn init() {
    let _ = pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

fn rules_args(categories: &[Category], window_size: usize) -> DriverArgs {
    DriverArgs {
        window_size,
        categories,
        strategy: Strategy::Rules,
        jobs: 2,
        ..Default::default()
    }
}

#[test]
fn test_golden_csv() {
    init();
    let sources = [Source::Memory(Document::new("a.txt", TEXT))];
    let report = driver::calc(&rules_args(&[Category::All], 3), &sources).unwrap();
    assert_eq!(
        report.to_csv().unwrap(),
        "File Name,All Words Types,All Words Tokens,All Words MATTR\na.txt,7,8,1.0000\n"
    );
    assert!(report.warnings.is_empty());
}

#[test]
fn test_zero_verbs() {
    init();
    let sources = [Source::Memory(Document::new("b.txt", "cat dog cat"))];
    let report = driver::calc(&rules_args(&[Category::Verb], 11), &sources).unwrap();
    assert_eq!(
        report.to_csv().unwrap(),
        "File Name,Verb Types,Verb Tokens,Verb MATTR\nb.txt,0,0,0.0000\n"
    );
}

#[test]
fn test_batch_with_invalid_utf8() {
    init();
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    fs::write(dir.join("good.txt"), TEXT).unwrap();
    fs::write(dir.join("bad.txt"), b"ab\xffcd").unwrap();
    let paths = vec![dir.join("good.txt"), dir.join("bad.txt")];
    let sources = input::collect_sources(&paths).unwrap();
    let report = driver::calc(&rules_args(&[Category::All], 11), &sources).unwrap();
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].name(), "good.txt");
    match &report.rows[1] {
        Row::Analyzed {
            name,
            lossy,
            results,
        } => {
            assert_eq!(name, "bad.txt");
            assert!(lossy);
            assert_eq!(results[0].types, 2);
            assert_eq!(results[0].tokens, 2);
            assert_eq!(results[0].mattr, 1.0);
        }
        row => panic!("unexpected row: {row:?}"),
    }
    assert_eq!(report.failures(), 0);
    assert_eq!(report.warnings, ["bad.txt: invalid UTF-8 replaced"]);
}

#[test]
fn test_folder_input() {
    init();
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    fs::write(dir.join("b.txt"), "dog dog").unwrap();
    fs::write(dir.join("a.txt"), TEXT).unwrap();
    fs::write(dir.join("notes.md"), "ignored").unwrap();
    let sources = input::collect_sources(&[dir.to_path_buf()]).unwrap();
    let report = driver::calc(&rules_args(&Category::ALL, 11), &sources).unwrap();
    let names = report.rows.iter().map(|r| r.name()).collect::<Vec<_>>();
    assert_eq!(names, ["a.txt", "b.txt"]);

    let out = dir.join("results.json");
    report.save(&out, false).unwrap();
    let back: Report = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(back, report);
}

#[test]
fn test_missing_file_is_a_row() {
    init();
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    let sources = [
        Source::Memory(Document::new("a.txt", TEXT)),
        Source::File(dir.join("nowhere.txt")),
    ];
    let report = driver::calc(&rules_args(&[Category::All], 3), &sources).unwrap();
    let csv = report.to_csv().unwrap();
    let last = csv.lines().last().unwrap();
    assert!(last.starts_with("nowhere.txt,error: "));
    assert!(last.ends_with(",,"));
    assert_eq!(report.failures(), 1);
}

#[test]
fn test_statistical_model_file() {
    init();
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    let model = r#"{
        "weights": {"i suffix lly": {"RB": 1.0}},
        "tagdict": {
            "The": "DT", "cat": "NN", "dog": "NN",
            "sat": "VBD", "ran": "VBD", "fast": "RB", ".": "."
        },
        "classes": ["DT", "NN", "RB", "VBD", "."]
    }"#;
    let path = dir.join("perceptron-tagger.json");
    fs::write(&path, model).unwrap();
    let model = PerceptronModel::load(&path).unwrap();
    let analyzer = StatisticalAnalyzer::new(Arc::new(model));
    let doc = Document::new("a.txt", TEXT);
    let categories = [Category::Verb, Category::Noun, Category::Adverb];
    let results = driver::analyze_document(&analyzer, &doc, &categories, 11).unwrap();
    let counts = results
        .iter()
        .map(|r| (r.category, r.types, r.tokens))
        .collect::<Vec<_>>();
    assert_eq!(
        counts,
        [
            (Category::Verb, 2, 2),
            (Category::Noun, 2, 2),
            (Category::Adverb, 2, 2),
        ]
    );
    assert!(results.iter().all(|r| r.mattr == 1.0));
}
