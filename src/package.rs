// SPDX-License-Identifier: MPL-2.0
//! Language package descriptors and identity labels.
//!
//! A package is a single file (or byte buffer) holding one language's message
//! catalog. Its first line must carry an identity label of the shape
//! `# [i18n] <accept-language-string> <display name>`, which names the
//! language without the body having to be decoded. Only that first line is
//! read at discovery time; the body is consumed later, when the language is
//! actually loaded.

use crate::error::{Error, Result};
use regex::Regex;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use unic_langid::LanguageIdentifier;

static LABEL_RE: OnceLock<Regex> = OnceLock::new();

fn label_regex() -> &'static Regex {
    LABEL_RE.get_or_init(|| {
        Regex::new(r"# \[i18n\] <(.*)> <(.*)>").expect("label pattern is valid")
    })
}

/// Extracts the `(tag string, display name)` pair from a package's first
/// line. Returns `None` when the line carries no label; callers treat that as
/// "not a package" and skip the file.
pub fn parse_label(top_line: &str) -> Option<(String, String)> {
    let caps = label_regex().captures(top_line)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Parses an Accept-Language style list (`zh-Hans, en;q=0.8`) into the tags
/// that survive parsing. Quality parameters are ignored; entries that fail to
/// parse are dropped rather than failing the whole list.
pub fn parse_accept_language(raw: &str) -> Vec<LanguageIdentifier> {
    raw.split(',')
        .filter_map(|entry| {
            let tag = entry.split(';').next().unwrap_or_default().trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }
            tag.parse::<LanguageIdentifier>().ok()
        })
        .collect()
}

/// Where a package's bytes live. Exactly one origin per package, enforced by
/// the enum itself.
#[derive(Debug, Clone)]
pub enum PackageOrigin {
    /// A file on disk, read in full at load time.
    File(PathBuf),
    /// An in-memory buffer, e.g. an embedded resource.
    Bytes(Vec<u8>),
}

/// One discovered language package. Immutable after creation; the engine owns
/// the full set for its lifetime.
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    name: String,
    tag: LanguageIdentifier,
    origin: PackageOrigin,
    source_name: String,
}

impl PackageDescriptor {
    /// Builds a descriptor from a file by reading only its first line.
    ///
    /// An unreadable file or a missing/unparsable label yields
    /// [`Error::InvalidPackage`]; discovery logs and skips such files instead
    /// of aborting the batch.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source_name = path.display().to_string();
        let file = File::open(path)
            .map_err(|e| Error::InvalidPackage(format!("cannot open {}: {}", source_name, e)))?;
        let mut top_line = String::new();
        BufReader::new(file)
            .read_line(&mut top_line)
            .map_err(|e| Error::InvalidPackage(format!("cannot read {}: {}", source_name, e)))?;

        let (tag, name) = parse_identity(&top_line, &source_name)?;
        Ok(Self {
            name,
            tag,
            origin: PackageOrigin::File(path.to_path_buf()),
            source_name,
        })
    }

    /// Builds a descriptor from an in-memory package, e.g. one embedded in
    /// the binary. `source_name` is only used in diagnostics.
    pub fn from_bytes(data: Vec<u8>, source_name: impl Into<String>) -> Result<Self> {
        let source_name = source_name.into();
        let top_line_end = data
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
            .unwrap_or(data.len());
        let top_line = String::from_utf8_lossy(&data[..top_line_end]).into_owned();

        let (tag, name) = parse_identity(&top_line, &source_name)?;
        Ok(Self {
            name,
            tag,
            origin: PackageOrigin::Bytes(data),
            source_name,
        })
    }

    /// Display name from the label (`English`, `简体中文`, ...).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The language tag the package declares.
    pub fn tag(&self) -> &LanguageIdentifier {
        &self.tag
    }

    pub fn origin(&self) -> &PackageOrigin {
        &self.origin
    }

    /// The file path or caller-supplied buffer name, for diagnostics.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// `"<name> (<tag>)"`, or just the tag when the label had an empty name.
    pub fn full_name(&self) -> String {
        if self.name.is_empty() {
            self.tag.to_string()
        } else {
            format!("{} ({})", self.name, self.tag)
        }
    }

    /// The package's raw bytes: borrowed for in-memory packages, read from
    /// disk for file-backed ones.
    pub fn read_content(&self) -> Result<Cow<'_, [u8]>> {
        match &self.origin {
            PackageOrigin::File(path) => std::fs::read(path).map(Cow::Owned).map_err(|e| {
                Error::InvalidPackage(format!("cannot read {}: {}", path.display(), e))
            }),
            PackageOrigin::Bytes(data) => Ok(Cow::Borrowed(data)),
        }
    }
}

fn parse_identity(top_line: &str, source: &str) -> Result<(LanguageIdentifier, String)> {
    let (tag_raw, name) = parse_label(top_line).ok_or_else(|| {
        Error::InvalidPackage(format!("{}: first line carries no identity label", source))
    })?;
    let tag = parse_accept_language(&tag_raw)
        .into_iter()
        .next()
        .ok_or_else(|| {
            Error::InvalidPackage(format!("{}: no parsable language tag in label", source))
        })?;
    Ok((tag, name))
}
