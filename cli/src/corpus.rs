use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One corpus entry as read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct InputDoc {
    pub title: Option<String>,
    pub text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDoc {
    Plain(String),
    Record {
        text: String,
        #[serde(default)]
        title: Option<String>,
    },
}

impl From<RawDoc> for InputDoc {
    fn from(raw: RawDoc) -> Self {
        match raw {
            RawDoc::Plain(text) => InputDoc { title: None, text },
            RawDoc::Record { text, title } => InputDoc { title, text },
        }
    }
}

const EXTENSIONS: [&str; 3] = ["txt", "json", "jsonl"];

/// Load a corpus from a file or, recursively, a directory.
///
/// Directory entries are read in sorted path order so document ids are stable.
pub fn load_corpus(input: &Path) -> Result<Vec<InputDoc>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && extension(p).is_some_and(|ext| EXTENSIONS.contains(&ext)) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input path {} does not exist", input.display());
    }

    let mut docs = Vec::new();
    for file in &files {
        let before = docs.len();
        match extension(file) {
            Some("jsonl") => load_jsonl(file, &mut docs)?,
            Some("json") => load_json(file, &mut docs)?,
            _ => load_lines(file, &mut docs)?,
        }
        tracing::debug!(file = %file.display(), docs = docs.len() - before, "loaded corpus file");
    }
    tracing::info!(files = files.len(), docs = docs.len(), "corpus loaded");
    Ok(docs)
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

fn load_lines(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    docs.extend(
        text.lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| InputDoc { title: None, text: l.to_string() }),
    );
    Ok(())
}

fn load_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let raw: RawDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: expected a string or an object with \"text\"", file.display(), lineno + 1))?;
        docs.push(raw.into());
    }
    Ok(())
}

fn load_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader).with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let raw: RawDoc = serde_json::from_value(v).with_context(|| format!("bad document in {}", file.display()))?;
                docs.push(raw.into());
            }
        }
        other => {
            let raw: RawDoc = serde_json::from_value(other).with_context(|| format!("bad document in {}", file.display()))?;
            docs.push(raw.into());
        }
    }
    Ok(())
}
