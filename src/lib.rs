// SPDX-License-Identifier: MPL-2.0
//! `langpack` is a runtime localization engine built on the Fluent
//! localization system.
//!
//! It discovers language packages on disk (or supplied in-memory), loads one
//! of them as the active message catalog, and resolves message identifiers
//! to localized strings with template-variable substitution and plural
//! selection. Languages can be switched live: subscribed formatting
//! closures re-run after every switch so already-rendered text can refresh
//! without a restart.
//!
//! # Package files
//!
//! A package is one file per language. Its first line is an identity label,
//! `# [i18n] <tag> <display name>`, and the rest is the catalog body:
//! Fluent FTL by default, or anything a custom decoder understands:
//!
//! ```text
//! # [i18n] <en> <English>
//! greeting = Hello
//! emails = { $count ->
//!     [one] You have one email
//!    *[other] You have { $count } emails
//! }
//! ```
//!
//! # Example
//!
//! ```no_run
//! use langpack::{I18n, LanguageIdentifier, Options};
//!
//! # fn main() -> langpack::Result<()> {
//! let requested: LanguageIdentifier = "en".parse().expect("valid tag");
//! let mut engine = I18n::initialize(
//!     Some(requested),
//!     Options::new().package_path("./lang"),
//! )?;
//!
//! assert_eq!(engine.t("greeting"), "Hello");
//!
//! // Live switch: subscribers re-render, resolution follows the new catalog.
//! let zh: LanguageIdentifier = "zh-Hans".parse().expect("valid tag");
//! engine.switch(&zh)?;
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/langpack/0.1.0")]

pub mod catalog;
pub mod discover;
pub mod engine;
pub mod error;
pub mod options;
pub mod package;

pub use engine::notify::{next_callback_id, Callback};
pub use engine::{I18n, MessageConfig, DEFAULT_LANGUAGE};
pub use error::{Error, Result};
pub use options::Options;
pub use package::{PackageDescriptor, PackageOrigin};

// The argument and tag types of the resolution surface come from the fluent
// stack; re-exported so callers don't need to name those crates themselves.
pub use fluent_bundle::FluentArgs;
pub use unic_langid::LanguageIdentifier;
