// SPDX-License-Identifier: MPL-2.0
//! The message-catalog adapter.
//!
//! A [`Catalog`] wraps one `FluentBundle` holding the messages of a single
//! language. How a package body turns into fluent messages is pluggable
//! through [`DecodeFn`]: the default decoder parses the body as Fluent FTL
//! (the identity label on the first line is a valid FTL comment, so the whole
//! file is handed over as-is), and [`decode_toml`] is provided for packages
//! written as flat TOML key-value tables.
//!
//! Decoders are strict: a package that fails to decode fails the whole load,
//! so a broken language switch never half-applies.

use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

/// Turns a package's raw bytes into a parsed fluent resource. The error
/// string is wrapped into [`crate::Error::Load`] together with the package's
/// display name.
pub type DecodeFn = Arc<dyn Fn(&[u8]) -> Result<FluentResource, String> + Send + Sync>;

/// Element-wise clone of a [`FluentArgs`]. `fluent-bundle` does not derive
/// `Clone` on `FluentArgs`, but `FluentValue` is `Clone`, so this reproduces
/// exactly what a derived clone would produce.
pub(crate) fn clone_fluent_args<'a>(args: &FluentArgs<'a>) -> FluentArgs<'a> {
    args.iter()
        .map(|(k, _)| {
            let key = k.to_string();
            // `get` returns `&FluentValue<'a>` (the map's own lifetime), unlike
            // `iter`, which ties the value to the borrow of `args`. Cloning via
            // `get` therefore preserves `'a` (e.g. `'static`).
            let value = args
                .get(key.clone())
                .expect("key yielded by iter is present")
                .clone();
            (key, value)
        })
        .collect()
}

/// Default decoder: the package body is Fluent FTL. Any parser error rejects
/// the package.
pub fn decode_ftl(bytes: &[u8]) -> Result<FluentResource, String> {
    let source = std::str::from_utf8(bytes)
        .map_err(|e| format!("package is not valid UTF-8: {}", e))?;
    FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
        let reasons: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        format!("FTL parse errors: {}", reasons.join("; "))
    })
}

/// Alternate decoder: the package body is a TOML table of message texts.
///
/// String values become messages; nested tables are flattened into the id
/// with `-` (fluent's id grammar has no dots), so `[menu]` / `file = "File"`
/// yields the message `menu-file`. Braces and line breaks in values are
/// escaped so arbitrary text survives the trip through FTL.
pub fn decode_toml(bytes: &[u8]) -> Result<FluentResource, String> {
    let source = std::str::from_utf8(bytes)
        .map_err(|e| format!("package is not valid UTF-8: {}", e))?;
    let table: toml::Table = source
        .parse()
        .map_err(|e| format!("invalid TOML: {}", e))?;

    let mut ftl = String::new();
    flatten_table(&table, None, &mut ftl);
    FluentResource::try_new(ftl).map_err(|(_, errors)| {
        let reasons: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        format!("converted TOML did not form valid messages: {}", reasons.join("; "))
    })
}

fn flatten_table(table: &toml::Table, prefix: Option<&str>, out: &mut String) {
    for (key, value) in table {
        let id = match prefix {
            Some(p) => format!("{}-{}", p, key),
            None => key.clone(),
        };
        match value {
            toml::Value::Table(nested) => flatten_table(nested, Some(&id), out),
            toml::Value::String(text) => push_message(out, &id, text),
            other => push_message(out, &id, &other.to_string()),
        }
    }
}

fn push_message(out: &mut String, id: &str, text: &str) {
    let escaped = escape_ftl_value(text);
    if escaped.is_empty() {
        out.push_str(&format!("{} = {{\"\"}}\n", id));
    } else {
        out.push_str(&format!("{} = {}\n", id, escaped));
    }
}

// Braces open placeables and raw line breaks open FTL's indentation rules;
// both are routed through string-literal placeables instead.
fn escape_ftl_value(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '{' => escaped.push_str("{\"{\"}"),
            '}' => escaped.push_str("{\"}\"}"),
            '\n' => escaped.push_str("{\"\\u000A\"}"),
            '\r' => escaped.push_str("{\"\\u000D\"}"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The parsed message catalog of one language.
pub struct Catalog {
    locale: LanguageIdentifier,
    bundle: FluentBundle<FluentResource>,
}

impl Catalog {
    /// Decodes `bytes` and builds the catalog for `locale`. Nothing is shared
    /// with previously built catalogs, so a failed load leaves no trace.
    pub fn load(
        locale: LanguageIdentifier,
        bytes: &[u8],
        decode: &DecodeFn,
    ) -> Result<Self, String> {
        let resource = decode(bytes)?;
        let mut bundle = FluentBundle::new(vec![locale.clone()]);
        // Keep formatted output byte-for-byte predictable; no bidi isolation
        // marks around placeables.
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            let reasons: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            format!("conflicting messages in package: {}", reasons.join("; "))
        })?;
        Ok(Self { locale, bundle })
    }

    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Looks `id` up and formats it with the supplied arguments. A plural
    /// count is exposed to the message as the `count` argument, which FTL
    /// selector expressions match against CLDR plural categories.
    ///
    /// Every failure mode (unknown id, message without value, formatting
    /// error) comes back as `Err`; the engine downgrades those to the
    /// caller's default text.
    pub fn format(
        &self,
        id: &str,
        args: Option<&FluentArgs>,
        plural_count: Option<i64>,
    ) -> Result<String, String> {
        let message = self
            .bundle
            .get_message(id)
            .ok_or_else(|| format!("message \"{}\" not found", id))?;
        let pattern = message
            .value()
            .ok_or_else(|| format!("message \"{}\" has no value", id))?;

        let mut errors = vec![];
        let formatted = match plural_count {
            Some(count) => {
                let mut merged = args.map(clone_fluent_args).unwrap_or_default();
                merged.set("count", count);
                self.bundle
                    .format_pattern(pattern, Some(&merged), &mut errors)
                    .to_string()
            }
            None => self
                .bundle
                .format_pattern(pattern, args, &mut errors)
                .to_string(),
        };

        if errors.is_empty() {
            Ok(formatted)
        } else {
            let reasons: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            Err(format!(
                "message \"{}\" failed to format: {}",
                id,
                reasons.join("; ")
            ))
        }
    }
}
