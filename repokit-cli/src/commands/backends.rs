//! Report the effective backends and wrapper classification.

use super::load_config;
use anyhow::Result;
use repokit_reactive::{ReactiveConverters, WrapperType};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct BackendReport {
    backends: Vec<&'static str>,
    wrappers: Vec<WrapperRow>,
    conversions: Vec<(&'static str, &'static str)>,
}

#[derive(Debug, Serialize)]
struct WrapperRow {
    name: &'static str,
    kind: &'static str,
    supported: bool,
}

/// Print the backends in use and how each registered wrapper type is classified
pub fn show_backends(config_path: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let converters = ReactiveConverters::from_config(&config)?;
    let wrappers = converters.wrappers();

    let row = |ty: &'static WrapperType| WrapperRow {
        name: ty.name(),
        kind: if converters.is_single_like(ty) {
            "single"
        } else {
            "multi"
        },
        supported: converters.supports(ty),
    };

    let report = BackendReport {
        backends: wrappers.backends().iter().map(|b| b.as_str()).collect(),
        wrappers: wrappers
            .single_types()
            .iter()
            .chain(wrappers.multi_types())
            .copied()
            .map(row)
            .collect(),
        conversions: converters
            .conversions()
            .pairs()
            .map(|(source, target)| (source.name(), target.name()))
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.backends.is_empty() {
        println!("No reactive backends present");
        return Ok(());
    }

    println!("Backends: {}", report.backends.join(", "));
    println!();
    println!("{:<14} {:<8} {}", "WRAPPER", "KIND", "ADAPTER");
    for row in &report.wrappers {
        println!(
            "{:<14} {:<8} {}",
            row.name,
            row.kind,
            if row.supported { "yes" } else { "no" }
        );
    }
    println!();
    println!("{} conversions registered", report.conversions.len());
    Ok(())
}
