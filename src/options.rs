// SPDX-License-Identifier: MPL-2.0
//! Engine configuration.
//!
//! [`Options`] replaces a grab-bag of init parameters with named, typed
//! fields and chainable setters. Setters apply immediately and in call
//! order, so later calls win, including the derived glob pattern, which
//! tracks the configured suffix and directory until an explicit pattern is
//! set.

use crate::catalog::{decode_ftl, DecodeFn};
use crate::discover::DiscoverFn;
use crate::error::Result;
use crate::package::PackageDescriptor;
use fluent_bundle::FluentResource;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A log sink. Receives one fully formatted line per call.
pub type LogFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Suffix the default discovery pattern looks for.
pub const DEFAULT_SUFFIX: &str = "lang";

const DEFAULT_DIR: &str = "./lang";

/// Initialization options for [`crate::I18n`]. Consumed by
/// [`crate::I18n::initialize`]; every field has a working default.
pub struct Options {
    pub(crate) log_info: LogFn,
    pub(crate) log_error: LogFn,
    pub(crate) decode: DecodeFn,
    pub(crate) suffix: String,
    pub(crate) path: Option<PathBuf>,
    pub(crate) pattern: String,
    pub(crate) discoverer: Option<DiscoverFn>,
    pub(crate) use_system_language: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            log_info: Arc::new(|msg| tracing::info!(target: "langpack", "{msg}")),
            log_error: Arc::new(|msg| tracing::error!(target: "langpack", "{msg}")),
            decode: Arc::new(decode_ftl),
            suffix: DEFAULT_SUFFIX.to_string(),
            path: None,
            pattern: derive_pattern(None, DEFAULT_SUFFIX),
            discoverer: None,
            use_system_language: false,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the info-level log sink (default: `tracing::info!`).
    pub fn log_info(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.log_info = Arc::new(f);
        self
    }

    /// Replaces the error-level log sink (default: `tracing::error!`).
    pub fn log_error(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.log_error = Arc::new(f);
        self
    }

    /// Replaces the package-body decoder (default: [`decode_ftl`]).
    pub fn decode(
        mut self,
        f: impl Fn(&[u8]) -> std::result::Result<FluentResource, String> + Send + Sync + 'static,
    ) -> Self {
        self.decode = Arc::new(f);
        self
    }

    /// Changes the package suffix. When a package directory was already set,
    /// the derived pattern is rewritten for the new suffix; otherwise the
    /// current pattern is left alone until a directory arrives.
    pub fn package_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        if let Some(path) = &self.path {
            self.pattern = derive_pattern(Some(path), &self.suffix);
        }
        self
    }

    /// Sets the package directory and derives the pattern
    /// `<path>/*.<suffix>` from it.
    pub fn package_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.pattern = derive_pattern(Some(&path), &self.suffix);
        self.path = Some(path);
        self
    }

    /// Sets the glob pattern directly, overriding any suffix/path
    /// derivation made so far.
    pub fn package_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Replaces the discovery strategy wholesale. The configured pattern is
    /// still handed to the strategy, which is free to ignore it.
    pub fn discoverer(
        mut self,
        f: impl Fn(&str) -> Result<Vec<PackageDescriptor>> + Send + Sync + 'static,
    ) -> Self {
        self.discoverer = Some(Arc::new(f));
        self
    }

    /// When no language is requested at initialization, fall back to the
    /// host's detected locale instead of the fixed default.
    pub fn use_system_language(mut self, enabled: bool) -> Self {
        self.use_system_language = enabled;
        self
    }

    /// The glob pattern discovery will run with.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The configured package suffix.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

fn derive_pattern(path: Option<&Path>, suffix: &str) -> String {
    let dir = path.unwrap_or(Path::new(DEFAULT_DIR));
    dir.join(format!("*.{}", suffix)).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pattern_uses_lang_directory_and_suffix() {
        let options = Options::default();
        assert_eq!(options.pattern(), "./lang/*.lang");
        assert_eq!(options.suffix(), "lang");
    }

    #[test]
    fn package_path_derives_pattern_with_current_suffix() {
        let options = Options::new().package_path("/opt/app/i18n");
        assert_eq!(options.pattern(), "/opt/app/i18n/*.lang");
    }

    #[test]
    fn package_suffix_after_path_rewrites_pattern() {
        let options = Options::new()
            .package_path("/opt/app/i18n")
            .package_suffix("toml");
        assert_eq!(options.pattern(), "/opt/app/i18n/*.toml");
    }

    #[test]
    fn package_suffix_without_path_keeps_pattern_until_path_is_set() {
        let options = Options::new().package_suffix("toml");
        assert_eq!(options.pattern(), "./lang/*.lang");

        let options = options.package_path("./translations");
        assert_eq!(options.pattern(), "./translations/*.toml");
    }

    #[test]
    fn package_pattern_overrides_derivation() {
        let options = Options::new()
            .package_path("/opt/app/i18n")
            .package_pattern("/srv/custom/??.catalog");
        assert_eq!(options.pattern(), "/srv/custom/??.catalog");
    }

    #[test]
    fn later_path_wins_over_earlier_pattern() {
        let options = Options::new()
            .package_pattern("/srv/custom/*.catalog")
            .package_path("/opt/app/i18n");
        assert_eq!(options.pattern(), "/opt/app/i18n/*.lang");
    }
}
