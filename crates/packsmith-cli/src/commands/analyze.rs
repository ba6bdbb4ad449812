//! Analyze command - group manifests into services and hoist shared values

use std::path::{Path, PathBuf};

use packsmith_analyze::{extract_global_values, group_resources};
use packsmith_core::{ResourceGraph, load_manifest_file};
use walkdir::WalkDir;

use crate::display::{self, AnalysisReport, OutputFormat};
use crate::error::{CliError, Result};

pub fn run(paths: &[PathBuf], format: OutputFormat, globals_only: bool) -> Result<()> {
    let files = collect_manifest_files(paths)?;

    let mut resources = Vec::new();
    for file in &files {
        resources.extend(load_manifest_file(file)?);
    }
    tracing::debug!(
        "loaded {} resources from {} files",
        resources.len(),
        files.len()
    );

    if resources.is_empty() {
        return Err(CliError::validation_with_help(
            "No Kubernetes resources found",
            "Pass YAML files or directories containing manifests with kind and metadata.name",
        ));
    }

    let graph = ResourceGraph::from_resources(resources);
    let groups = group_resources(&graph)?;
    let global = extract_global_values(&groups);

    if globals_only {
        let parent = global.into_global_scope();
        match format {
            OutputFormat::Json => println!("{}", to_json(&parent)?),
            OutputFormat::Text | OutputFormat::Yaml => print!("{}", to_yaml(&parent)?),
        }
        return Ok(());
    }

    match format {
        OutputFormat::Text => {
            let parent = global.into_global_scope();
            let rendered = if parent.is_empty() {
                String::new()
            } else {
                to_yaml(&parent)?
            };
            display::print_analysis(&groups, &rendered);
        }
        OutputFormat::Json => {
            println!("{}", to_json(&AnalysisReport::new(&groups, &global))?);
        }
        OutputFormat::Yaml => {
            print!("{}", to_yaml(&AnalysisReport::new(&groups, &global))?);
        }
    }

    Ok(())
}

/// Expand files and directories into a sorted list of manifest files
fn collect_manifest_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(CliError::io(path, "no such file or directory"));
        }

        if path.is_file() {
            files.push(path.clone());
            continue;
        }

        let mut found: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(|e| CliError::io(path, e))?;
            if entry.file_type().is_file() && is_manifest(entry.path()) {
                found.push(entry.into_path());
            }
        }
        files.extend(found);
    }

    Ok(files)
}

fn is_manifest(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::internal(e.to_string()))
}

fn to_yaml<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_yaml::to_string(value).map_err(|e| CliError::internal(e.to_string()))
}
