// SPDX-License-Identifier: MPL-2.0
use langpack::{I18n, LanguageIdentifier, Options};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();
    let lang: Option<String> = args.opt_value_from_str("--lang")?;
    let dir: Option<String> = args.opt_value_from_str("--dir")?;
    let ids: Vec<String> = args
        .finish()
        .into_iter()
        .filter_map(|s| s.into_string().ok())
        .collect();

    let requested = match lang {
        Some(raw) => Some(
            raw.parse::<LanguageIdentifier>()
                .map_err(|e| format!("invalid --lang {:?}: {:?}", raw, e))?,
        ),
        None => None,
    };

    let mut options = Options::new().use_system_language(true);
    if let Some(dir) = dir {
        options = options.package_path(dir);
    }

    let engine = I18n::initialize(requested, options)?;

    println!("languages:");
    for language in engine.languages() {
        let marker = if engine.active().map(|a| a.tag()) == Some(language.tag()) {
            "*"
        } else {
            " "
        };
        println!("  {} {}", marker, language.full_name());
    }
    for id in ids {
        println!("{} = {}", id, engine.t(&id));
    }
    Ok(())
}
