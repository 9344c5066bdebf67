// SPDX-License-Identifier: MPL-2.0
//! The language engine.
//!
//! [`I18n`] owns the discovered package set, the active language, and the
//! catalog backing resolution. It is an explicit instance: create one per
//! process (or per tenant), hand out `&I18n` for resolution and `&mut I18n`
//! for switching. The borrow checker serializes initialization, switches,
//! and subscriptions; there is no hidden global state apart from the
//! callback-id counter.
//!
//! The lifecycle is: [`I18n::initialize`] discovers packages and loads the
//! requested language; [`I18n::switch`] atomically replaces the catalog and
//! notifies subscribers; [`I18n::resolve`] and its shorthands never fail:
//! a missing translation degrades to the caller's default text.

pub mod notify;

use crate::catalog::{Catalog, DecodeFn};
use crate::discover;
use crate::error::{Error, Result};
use crate::options::{LogFn, Options};
use crate::package::PackageDescriptor;
use fluent_bundle::FluentArgs;
use notify::{Callback, CallbackRegistry};
use unic_langid::LanguageIdentifier;

/// Tag used when no language is requested and the system fallback is off.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A reusable resolution request: message id plus optional arguments, plural
/// count, and a wrapper applied around the resolved text.
#[derive(Default)]
pub struct MessageConfig {
    pub id: String,
    /// Wrapped around the resolved text: the first `{}` is replaced with the
    /// text; a wrapper without `{}` is appended after it.
    pub wrapper: Option<String>,
    pub args: Option<FluentArgs<'static>>,
    pub plural_count: Option<i64>,
}

impl Clone for MessageConfig {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            wrapper: self.wrapper.clone(),
            args: self.args.as_ref().map(crate::catalog::clone_fluent_args),
            plural_count: self.plural_count,
        }
    }
}

impl MessageConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn wrapper(mut self, wrapper: impl Into<String>) -> Self {
        self.wrapper = Some(wrapper.into());
        self
    }

    pub fn args(mut self, args: FluentArgs<'static>) -> Self {
        self.args = Some(args);
        self
    }

    pub fn plural_count(mut self, count: i64) -> Self {
        self.plural_count = Some(count);
        self
    }
}

/// The runtime localization engine.
pub struct I18n {
    log_info: LogFn,
    log_error: LogFn,
    decode: DecodeFn,
    default_tag: LanguageIdentifier,
    languages: Vec<PackageDescriptor>,
    active: Option<usize>,
    catalog: Option<Catalog>,
    callbacks: CallbackRegistry,
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("default_tag", &self.default_tag)
            .field("languages", &self.languages)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl I18n {
    /// Discovers language packages and loads the requested language.
    ///
    /// With `requested == None`, the host locale is used when
    /// [`Options::use_system_language`] is on, `en` otherwise. Discovery
    /// failures and an empty package set are returned errors; the host
    /// decides whether a localization-less start is fatal. When the resolved
    /// language is not among the discovered packages the engine starts
    /// without an active catalog and every resolution degrades to its
    /// default text.
    pub fn initialize(requested: Option<LanguageIdentifier>, options: Options) -> Result<Self> {
        let Options {
            log_info,
            log_error,
            decode,
            pattern,
            discoverer,
            use_system_language,
            ..
        } = options;

        let requested_tag = match requested {
            Some(tag) => tag,
            None => {
                let fallback = if use_system_language {
                    system_language().unwrap_or_else(fixed_default)
                } else {
                    fixed_default()
                };
                log_info(&format!(
                    "no language requested, defaulting to {}",
                    fallback
                ));
                fallback
            }
        };

        log_info("language engine starting");
        let languages = match &discoverer {
            Some(custom) => custom(&pattern)?,
            None => discover::discover(&pattern, &log_info, &log_error)?,
        };
        if languages.is_empty() {
            log_error("no usable language packages found");
            return Err(Error::NoLanguages);
        }

        let mut engine = Self {
            log_info,
            log_error,
            decode,
            default_tag: requested_tag.clone(),
            languages,
            active: None,
            catalog: None,
            callbacks: CallbackRegistry::default(),
        };

        match engine
            .languages
            .iter()
            .position(|l| *l.tag() == requested_tag)
        {
            Some(index) => {
                let catalog = engine.load_catalog(&engine.languages[index])?;
                engine.catalog = Some(catalog);
                engine.active = Some(index);
                (engine.log_info)(&format!(
                    "using language {}",
                    engine.languages[index].full_name()
                ));
            }
            None => (engine.log_info)(&format!(
                "requested language {} not among discovered packages",
                requested_tag
            )),
        }
        (engine.log_info)("language engine ready");
        Ok(engine)
    }

    /// The discovered packages, in discovery order. Fixed for the engine's
    /// lifetime.
    pub fn languages(&self) -> &[PackageDescriptor] {
        &self.languages
    }

    /// The package backing resolution right now, if one is loaded.
    pub fn active(&self) -> Option<&PackageDescriptor> {
        self.active.map(|index| &self.languages[index])
    }

    /// The language resolved at initialization time.
    pub fn default_language(&self) -> &LanguageIdentifier {
        &self.default_tag
    }

    /// Builds and discards the catalog for `tag`: a preflight check that the
    /// package decodes. Does not touch the active language.
    pub fn preload(&self, tag: &LanguageIdentifier) -> Result<()> {
        let descriptor = self
            .languages
            .iter()
            .find(|l| l.tag() == tag)
            .ok_or_else(|| Error::UnknownLanguage(tag.to_string()))?;
        self.load_catalog(descriptor).map(|_| ())
    }

    /// Switches the active language to `tag` and notifies every subscriber,
    /// synchronously and in registration order.
    ///
    /// All-or-nothing: when the package fails to load, the previous catalog
    /// and active language stay in place, no subscriber runs, and the load
    /// error is returned.
    pub fn switch(&mut self, tag: &LanguageIdentifier) -> Result<()> {
        let index = self
            .languages
            .iter()
            .position(|l| l.tag() == tag)
            .ok_or_else(|| Error::UnknownLanguage(tag.to_string()))?;

        let catalog = self.load_catalog(&self.languages[index])?;
        self.catalog = Some(catalog);
        self.active = Some(index);
        (self.log_info)(&format!(
            "switched to {}",
            self.languages[index].full_name()
        ));

        let mut entries = self.callbacks.take();
        for entry in entries.iter_mut() {
            entry.run(self);
        }
        self.callbacks.restore(entries);
        Ok(())
    }

    /// Resolves `id` against the active catalog. On any miss (no active
    /// catalog, unknown id, template or plural mismatch) the error is
    /// logged and `default_text` comes back instead; resolution never fails
    /// visibly.
    ///
    /// A `plural_count` is exposed to the message as its `count` argument,
    /// which FTL selector expressions match against plural categories.
    pub fn resolve(
        &self,
        default_text: &str,
        id: &str,
        args: Option<&FluentArgs>,
        plural_count: Option<i64>,
    ) -> String {
        let Some(catalog) = &self.catalog else {
            (self.log_error)(&format!("no active language while resolving \"{}\"", id));
            return default_text.to_string();
        };
        match catalog.format(id, args, plural_count) {
            Ok(text) => text,
            Err(reason) => {
                (self.log_error)(&reason);
                default_text.to_string()
            }
        }
    }

    /// Resolves `id` with no arguments, degrading to the empty string.
    pub fn t(&self, id: &str) -> String {
        self.resolve("", id, None, None)
    }

    /// Resolves `id` with no arguments, degrading to `default_text`.
    pub fn tc(&self, default_text: &str, id: &str) -> String {
        self.resolve(default_text, id, None, None)
    }

    /// Resolves a [`MessageConfig`] and applies its wrapper.
    pub fn formatted(&self, config: &MessageConfig) -> String {
        let text = self.resolve("", &config.id, config.args.as_ref(), config.plural_count);
        match &config.wrapper {
            Some(wrapper) if wrapper.contains("{}") => wrapper.replacen("{}", &text, 1),
            Some(wrapper) => format!("{}{}", text, wrapper),
            None => text,
        }
    }

    /// Registers a switch callback. A duplicate id is logged at error
    /// severity and ignored; the registry keeps exactly one entry per id.
    /// Returns the callback's id.
    pub fn subscribe(&mut self, callback: Callback) -> u32 {
        let id = callback.id();
        if !self.callbacks.insert(callback) {
            (self.log_error)(&format!("cannot add duplicated callback {}", id));
        }
        id
    }

    /// Registers the callback, then invokes it once, synchronously, so a
    /// fresh subscriber renders its initial text without waiting for the
    /// first switch.
    pub fn subscribe_and_run(&mut self, callback: Callback) -> u32 {
        let id = self.subscribe(callback);
        let mut entries = self.callbacks.take();
        if let Some(entry) = entries.iter_mut().find(|e| e.id() == id) {
            entry.run(self);
        }
        self.callbacks.restore(entries);
        id
    }

    /// Localize-and-subscribe: resolves `id` now, hands the text to `apply`,
    /// and keeps the subscription alive: `apply` re-runs with freshly
    /// resolved text after every switch, for the engine's lifetime. Returns
    /// the id of the backing callback.
    pub fn subscribe_text(
        &mut self,
        default_text: impl Into<String>,
        id: impl Into<String>,
        args: Option<FluentArgs<'static>>,
        plural_count: Option<i64>,
        mut apply: impl FnMut(String) + 'static,
    ) -> u32 {
        let default_text = default_text.into();
        let id = id.into();
        apply(self.resolve(&default_text, &id, args.as_ref(), plural_count));
        self.subscribe(Callback::new(move |engine: &I18n| {
            apply(engine.resolve(&default_text, &id, args.as_ref(), plural_count));
        }))
    }

    fn load_catalog(&self, descriptor: &PackageDescriptor) -> Result<Catalog> {
        descriptor
            .read_content()
            .map_err(|e| e.to_string())
            .and_then(|content| Catalog::load(descriptor.tag().clone(), &content, &self.decode))
            .map_err(|reason| {
                let err = Error::Load {
                    language: descriptor.full_name(),
                    reason,
                };
                (self.log_error)(&err.to_string());
                err
            })
    }
}

fn system_language() -> Option<LanguageIdentifier> {
    sys_locale::get_locale().and_then(|raw| raw.parse().ok())
}

fn fixed_default() -> LanguageIdentifier {
    DEFAULT_LANGUAGE
        .parse()
        .expect("default language tag is valid")
}
