//! Load the synthesis dictionary and tag inventory with zero-copy text.
//!
//! The dictionary is a line-oriented file mapping `lemma + tag` pairs to
//! inflected surface forms, three tab-separated columns per line:
//!
//! ```text
//! kot	subst:sg:nom:m2	kot
//! kot	subst:sg:gen:m2	kota
//! ```
//!
//! A line with only the first two columns is a placeholder entry: the key is
//! known but carries no form. Lookups return borrowed [`DictEntry`] views
//! into the backing buffer; callers choose between a memory-mapped file and
//! an owned buffer at runtime via [`LoadMode`].
//!
//! The tag inventory is a plain text file with one tag literal per line,
//! loaded in order via [`load_tag_inventory`].
//!
//! # Example
//! ```no_run
//! use morfsynth_dict::{LoadMode, SynthDict, load_tag_inventory};
//! use morfsynth_types::lookup_key;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dict = SynthDict::load_with_mode("pl/synth.dict", LoadMode::Mmap)?;
//! let tags = load_tag_inventory("pl/tags.txt")?;
//! for entry in dict.lookup(&lookup_key("kot", "subst:sg:nom:m2")) {
//!     println!("{:?} [{}]", entry.stem, entry.tag);
//! }
//! # Ok(()) }
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use memmap2::Mmap;
use morfsynth_types::{DictEntry, lookup_key};

/// Strategy for loading the dictionary file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the file (fast, zero-copy).
    Mmap,
    /// Read the file into an owned buffer (portable fallback).
    Owned,
}

#[derive(Debug)]
enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Span {
    start: usize,
    len: usize,
}

#[derive(Debug)]
struct EntrySpan {
    stem: Option<Span>,
    tag: Span,
}

/// Keyed view of a synthesis dictionary backed by mmap or an owned buffer.
#[derive(Debug)]
pub struct SynthDict {
    buf: Buffer,
    entries: HashMap<String, Vec<EntrySpan>>,
}

impl SynthDict {
    /// Load a dictionary file, memory-mapping it by default.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_mode(path, LoadMode::Mmap)
    }

    /// Load a dictionary file choosing the backing buffer at runtime.
    pub fn load_with_mode(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let buf = load_file(path.as_ref().to_path_buf(), mode)?;
        let entries = parse_entries(buf.as_slice())
            .with_context(|| format!("parse dictionary {}", path.as_ref().display()))?;
        Ok(Self { buf, entries })
    }

    /// All entries stored under a `lemma|tag` key, empty when absent.
    pub fn lookup(&self, key: &str) -> Vec<DictEntry<'_>> {
        let Some(spans) = self.entries.get(key) else {
            return Vec::new();
        };
        spans
            .iter()
            .map(|e| DictEntry {
                stem: e.stem.map(|s| self.text(s)),
                tag: self.text(e.tag),
            })
            .collect()
    }

    /// Number of distinct `lemma|tag` keys.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of entries across all keys, placeholders included.
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    fn text(&self, span: Span) -> &str {
        let bytes = &self.buf.as_slice()[span.start..span.start + span.len];
        std::str::from_utf8(bytes).expect("dictionary text is valid utf8")
    }
}

/// Load the tag inventory: one tag literal per line, order preserved.
pub fn load_tag_inventory(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("open tag inventory {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut tags = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("read line {} in {}", lineno + 1, path.display()))?;
        let tag = line.trim();
        if tag.is_empty() || tag.starts_with('#') {
            continue;
        }
        tags.push(tag.to_string());
    }
    Ok(tags)
}

fn load_file(path: PathBuf, mode: LoadMode) -> Result<Buffer> {
    match mode {
        LoadMode::Mmap => {
            let file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .with_context(|| format!("mmap {}", path.display()))
        }
        LoadMode::Owned => {
            let mut file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

fn parse_entries(bytes: &[u8]) -> Result<HashMap<String, Vec<EntrySpan>>> {
    let mut entries: HashMap<String, Vec<EntrySpan>> = HashMap::new();
    for (lineno, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = strip_cr(raw_line);
        if line.is_empty() || line.first() == Some(&b'#') {
            continue;
        }
        let line_str = std::str::from_utf8(line)
            .with_context(|| format!("line {} is not valid utf8", lineno + 1))?;

        let mut columns = line_str.split('\t');
        let lemma = columns.next().filter(|c| !c.is_empty());
        let tag = columns.next().filter(|c| !c.is_empty());
        let (Some(lemma), Some(tag)) = (lemma, tag) else {
            anyhow::bail!("line {}: expected `lemma<TAB>tag[<TAB>form]`", lineno + 1);
        };
        let stem = columns.next().filter(|c| !c.is_empty());

        entries.entry(lookup_key(lemma, tag)).or_default().push(EntrySpan {
            stem: stem.map(|s| span_of(bytes, s)),
            tag: span_of(bytes, tag),
        });
    }
    Ok(entries)
}

fn span_of(root: &[u8], token: &str) -> Span {
    let start = token.as_ptr() as usize - root.as_ptr() as usize;
    Span {
        start,
        len: token.len(),
    }
}

fn strip_cr(line: &[u8]) -> &[u8] {
    if line.ends_with(b"\r") {
        &line[..line.len() - 1]
    } else {
        line
    }
}
