//! Display formatting for CLI output
//!
//! Renders analysis results as styled text, JSON or YAML.

use clap::ValueEnum;
use console::style;
use packsmith_analyze::{GroupingStrategy, ServiceGroup};
use packsmith_core::Values;
use serde::Serialize;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Serializable view of an analysis run
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    pub groups: Vec<GroupSummary<'a>>,
    pub global: &'a Values,
}

/// A group with its members reduced to their keys
#[derive(Debug, Serialize)]
pub struct GroupSummary<'a> {
    pub name: &'a str,
    pub namespace: &'a str,
    pub strategy: GroupingStrategy,
    pub resources: Vec<String>,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(groups: &'a [ServiceGroup], global: &'a Values) -> Self {
        let groups = groups
            .iter()
            .map(|g| GroupSummary {
                name: &g.name,
                namespace: &g.namespace,
                strategy: g.strategy,
                resources: g.keys().map(ToString::to_string).collect(),
            })
            .collect();
        Self { groups, global }
    }
}

/// Print groups and global values as styled text
pub fn print_analysis(groups: &[ServiceGroup], parent_values: &str) {
    println!();
    println!("  {}", style("Service Groups").bold());
    println!("  {}", style("──────────────").dim());

    for group in groups {
        let namespace = if group.namespace.is_empty() {
            style("(cluster)".to_string()).dim()
        } else {
            style(group.namespace.clone()).dim()
        };
        println!(
            "  {} {} {} {}",
            style("●").green(),
            style(&group.name).cyan().bold(),
            strategy_badge(group.strategy),
            namespace
        );
        for key in group.keys() {
            println!("      {}", key);
        }
    }
    println!();

    println!("  {}", style("Global Values").bold());
    println!("  {}", style("─────────────").dim());
    if parent_values.is_empty() {
        println!("  {}", style("No values shared across groups").dim());
    } else {
        for line in parent_values.lines() {
            println!("  {}", line);
        }
    }
    println!();

    let resources: usize = groups.iter().map(ServiceGroup::len).sum();
    println!(
        "{} {} resource{} in {} group{}",
        style("✓").green().bold(),
        resources,
        if resources == 1 { "" } else { "s" },
        groups.len(),
        if groups.len() == 1 { "" } else { "s" }
    );
}

fn strategy_badge(strategy: GroupingStrategy) -> console::StyledObject<String> {
    let label = format!("[{}]", strategy);
    match strategy {
        GroupingStrategy::Label => style(label).green(),
        GroupingStrategy::Relationship => style(label).blue(),
        GroupingStrategy::Namespace => style(label).yellow(),
        GroupingStrategy::Individual => style(label).magenta(),
    }
}
