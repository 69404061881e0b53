//! Subcommand implementations.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;
use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use rulegate::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cli::{CheckArgs, PruneArgs, RuleSource};

pub fn run_prune(args: &PruneArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        !(is_stdin(&args.source.rules) && is_stdin(&args.record)),
        "--rules and --record cannot both read from stdin"
    );
    let rules: RuleSet = read_json(&args.source.rules).context("failed to load rules")?;
    let record: Value = read_json(&args.record).context("failed to load record")?;
    let settings = resolve_settings(&args.source)?;

    let report = prune_report(&rules, &record, &settings)?;
    tracing::info!(
        record_type = %args.source.record_type,
        removed = report.removed.len(),
        "pruned rules"
    );

    let output = if args.report {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string_pretty(&report.rules)?
    };
    println!("{output}");
    Ok(())
}

pub fn run_check(args: &CheckArgs) -> anyhow::Result<()> {
    let rules: RuleSet = read_json(&args.source.rules).context("failed to load rules")?;
    let settings = resolve_settings(&args.source)?;

    let conditional = check_conditions(&rules, &settings)?;
    println!(
        "ok: {conditional} conditional rule(s) across {} field(s)",
        rules.len()
    );
    Ok(())
}

/// Defaults < settings file < `--condition-key`.
fn resolve_settings(source: &RuleSource) -> anyhow::Result<Settings> {
    let mut figment = Figment::new();

    if let Some(path) = &source.settings {
        // `Toml::file` treats a missing file as empty.
        anyhow::ensure!(path.is_file(), "settings file {} not found", path.display());
        figment = figment.merge(Toml::file(path));
    }
    if let Some(key) = &source.condition_key {
        let flag = HashMap::from([(
            source.record_type.clone(),
            SettingsOverride::condition_key(key),
        )]);
        figment = figment.merge(Serialized::defaults(flag));
    }

    let registry: SettingsRegistry = figment.extract().context("invalid settings")?;
    let settings = registry.get(&source.record_type).clone();
    tracing::debug!(
        record_type = %source.record_type,
        condition_key = %settings.condition_key,
        "resolved settings"
    );
    Ok(settings)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = if is_stdin(path) {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}
