use std::path::PathBuf;

use crate::collection::{read_collection, to_pretty_json, write_collection};
use crate::config::Config;
use crate::error::Result;
use crate::generate::{generate_collection, GeneratorOptions};
use crate::migrate::migrate_collection;
use crate::report::{format_issue, format_warning};
use crate::tokens::RandomTokens;
use crate::validate::Validator;

/// Merge the config file (if any) with command line overrides
fn resolve_config(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    no_output: bool,
    config: Option<PathBuf>,
) -> Result<Config> {
    let mut resolved = match config {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    if input.is_some() {
        resolved.input = input;
    }
    if output.is_some() {
        resolved.output = output;
    }
    if no_output {
        resolved.generate_output = false;
    }

    Ok(resolved)
}

pub fn handle_validate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    no_output: bool,
    config: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = resolve_config(input, output, no_output, config)?;
    let collection = read_collection(config.input_path()?)?;

    let outcome = Validator::new(&config.schema, RandomTokens).run(collection)?;

    if let Some(path) = config.output_path() {
        write_collection(path, &outcome.collection)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else {
        for issue in &outcome.report.issues {
            println!("{}", format_issue(issue));
        }
        for warning in &outcome.report.warnings {
            println!("{}", format_warning(warning));
        }
        println!("Finished: {}", outcome.report.summary());
        if let Some(path) = config.output_path() {
            println!("Wrote repaired collection to {}", path.display());
        }
    }

    Ok(())
}

pub fn handle_migrate(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let collection = read_collection(&input)?;
    let outcome = migrate_collection(collection)?;

    match output {
        Some(path) => {
            write_collection(&path, &outcome.collection)?;
            println!(
                "Migrated {} entities ({} relationships), {} skipped, {} issues",
                outcome.migrated,
                outcome.relationships,
                outcome.skipped,
                outcome.report.issues.len()
            );
            println!("Wrote to path: {}", path.display());
        }
        None => print!("{}", to_pretty_json(&outcome.collection)?),
    }

    Ok(())
}

pub fn handle_generate(
    count: usize,
    owner: Option<String>,
    created: Option<String>,
    history: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let defaults = GeneratorOptions::default();
    let options = GeneratorOptions {
        count,
        owner: owner.unwrap_or(defaults.owner),
        created: created.unwrap_or(defaults.created),
        history,
    };

    let collection = generate_collection(&options, RandomTokens)?;

    match output {
        Some(path) => {
            write_collection(&path, &collection)?;
            println!("Generated {} entities into {}", collection.len(), path.display());
        }
        None => print!("{}", to_pretty_json(&collection)?),
    }

    Ok(())
}
