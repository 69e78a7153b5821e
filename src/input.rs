//! Documents and how they are read.

use crate::errors::{Result, invalid_input};
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Document {
    pub name: String,
    pub text: String,
    /// Were invalid UTF-8 sequences replaced with U+FFFD?
    pub lossy: bool,
}

impl Document {
    pub fn new(name: &str, text: &str) -> Document {
        Document {
            name: name.to_owned(),
            text: text.to_owned(),
            lossy: false,
        }
    }

    /// Decodes `bytes` as UTF-8, replacing anything invalid.
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Document {
        let text = String::from_utf8_lossy(bytes);
        let lossy = matches!(text, std::borrow::Cow::Owned(_));
        if lossy {
            warn!(target: "mattr", "{name}: invalid UTF-8 replaced");
        }
        Document {
            name: name.to_owned(),
            text: text.into_owned(),
            lossy,
        }
    }

    pub fn read(path: &Path) -> Result<Document> {
        let bytes = fs::read(path)?;
        debug!(target: "mattr", "read: {} ({} bytes)", path.display(), bytes.len());
        Ok(Document::from_bytes(&display_name(path), &bytes))
    }
}

/// A document to be analyzed: either already in memory or still on disk.
#[derive(Clone, Debug)]
pub enum Source {
    Memory(Document),
    File(PathBuf),
}

impl Source {
    pub fn name(&self) -> String {
        match self {
            Source::Memory(d) => d.name.clone(),
            Source::File(p) => display_name(p),
        }
    }

    pub fn load(&self) -> Result<Document> {
        match self {
            Source::Memory(d) => Ok(d.clone()),
            Source::File(p) => Document::read(p),
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Expands the given paths into document sources.
///
/// Files are taken as they are, in the given order. A directory contributes
/// its `.txt` files, sorted by name.
pub fn collect_sources(paths: &[PathBuf]) -> Result<Vec<Source>> {
    let mut sources = vec![];
    for path in paths {
        if path.is_dir() {
            let files = fs::read_dir(path)?
                .map(|e| e.map(|e| e.path()))
                .collect::<std::io::Result<Vec<_>>>()?
                .into_iter()
                .filter(|p| p.is_file() && p.extension().is_some_and(|x| x == "txt"))
                .sorted()
                .collect_vec();
            debug!(target: "mattr", "{}: {} text files", path.display(), files.len());
            sources.extend(files.into_iter().map(Source::File));
        } else {
            sources.push(Source::File(path.clone()));
        }
    }
    if sources.is_empty() {
        return Err(invalid_input("no documents found".to_owned()));
    }
    Ok(sources)
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn from_bytes_valid() {
        let d = Document::from_bytes("a.txt", "héllo".as_bytes());
        assert_eq!(d.text, "héllo");
        assert!(!d.lossy);
    }

    #[test]
    fn from_bytes_invalid() {
        let d = Document::from_bytes("b.txt", b"ab\xffcd");
        assert_eq!(d.text, "ab\u{fffd}cd");
        assert!(d.lossy);
    }

    #[test]
    fn collect_from_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().to_path_buf();
        fs::write(dir.join("b.txt"), "b").unwrap();
        fs::write(dir.join("a.txt"), "a").unwrap();
        fs::write(dir.join("notes.md"), "skip").unwrap();
        let sources = collect_sources(&[dir.clone()]).unwrap();
        assert_eq!(sources.iter().map(|s| s.name()).collect_vec(), ["a.txt", "b.txt"]);
        let doc = sources[1].load().unwrap();
        assert_eq!(doc.text, "b");
    }

    #[test]
    fn collect_nothing() {
        assert!(collect_sources(&[]).is_err());
    }

    #[test]
    fn missing_file_fails_on_load() {
        let sources = collect_sources(&[PathBuf::from("/nonexistent/mattr.txt")]).unwrap();
        assert_eq!(sources[0].name(), "mattr.txt");
        assert!(sources[0].load().is_err());
    }
}
