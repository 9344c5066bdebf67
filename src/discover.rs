// SPDX-License-Identifier: MPL-2.0
//! Package discovery.
//!
//! The default strategy resolves a shell glob (e.g. `./lang/*.lang`) against
//! the filesystem and builds a descriptor per matching file by reading only
//! its first line. Files whose label fails to parse are logged and skipped;
//! the batch only fails when the pattern itself is unusable. Callers may
//! replace the whole strategy with a [`DiscoverFn`] of their own (embedded
//! resources, network fetch, ...); the engine only needs descriptors with
//! resolvable tags.

use crate::error::{Error, Result};
use crate::options::LogFn;
use crate::package::PackageDescriptor;
use std::sync::Arc;

/// A pluggable discovery strategy: pattern in, descriptors out.
pub type DiscoverFn = Arc<dyn Fn(&str) -> Result<Vec<PackageDescriptor>> + Send + Sync>;

/// Enumerates packages matching `pattern`.
///
/// Per-file problems (unreadable entry, missing label, unparsable tag) are
/// reported through `log_error` and skipped. An empty or malformed pattern is
/// a [`Error::Config`].
pub fn discover(
    pattern: &str,
    log_info: &LogFn,
    log_error: &LogFn,
) -> Result<Vec<PackageDescriptor>> {
    if pattern.trim().is_empty() {
        return Err(Error::Config("discovery pattern is empty".to_string()));
    }

    let mut languages = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                log_error(&format!("skipping unreadable entry: {}", e));
                continue;
            }
        };
        match PackageDescriptor::from_file(&path) {
            Ok(descriptor) => {
                log_info(&format!("found language: {}", descriptor.full_name()));
                languages.push(descriptor);
            }
            Err(e) => log_error(&format!("skipping {}: {}", path.display(), e)),
        }
    }
    log_info(&format!("found {} language(s)", languages.len()));
    Ok(languages)
}
