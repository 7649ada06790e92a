//! `priorities`: inspect and rewrite tag/category priority numbers.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::ExitCode;

use clap::{Subcommand, ValueEnum};
use serde::Serialize;
use storefront_catalog::{
    auto_renumber, calculate_stats, group_failures, move_down, move_up, render_grouped,
    sort_by_priority, validate_priorities,
};
use storefront_core::{
    validate_categories, validate_tag_map, AppConfig, CatalogUniverse, Category, CollectionReport,
    FeaturedPrioritized, Identified, RenumberConfig, Tag,
};

use crate::load::{read_json, write_json, CATEGORIES_FILE, TAGS_FILE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Collection {
    Tags,
    Categories,
}

/// Sub-commands available under `priorities`.
#[derive(Debug, Subcommand)]
pub enum PrioritiesCommands {
    /// Show partition counts, ranges and gaps
    Stats {
        #[arg(long, value_enum)]
        collection: Collection,
    },
    /// Report duplicate or out-of-range priorities
    Check {
        #[arg(long, value_enum)]
        collection: Collection,
    },
    /// Reassign gap-free priorities, keeping the current order
    Renumber {
        #[arg(long, value_enum)]
        collection: Collection,
        /// Write the result back instead of printing it
        #[arg(long)]
        write: bool,
    },
    /// Swap the item at INDEX (in priority order) with the one above it
    MoveUp {
        #[arg(long, value_enum)]
        collection: Collection,
        #[arg(long)]
        index: usize,
        #[arg(long)]
        write: bool,
    },
    /// Swap the item at INDEX (in priority order) with the one below it
    MoveDown {
        #[arg(long, value_enum)]
        collection: Collection,
        #[arg(long)]
        index: usize,
        #[arg(long)]
        write: bool,
    },
}

impl PrioritiesCommands {
    fn collection(&self) -> Collection {
        match self {
            PrioritiesCommands::Stats { collection }
            | PrioritiesCommands::Check { collection }
            | PrioritiesCommands::Renumber { collection, .. }
            | PrioritiesCommands::MoveUp { collection, .. }
            | PrioritiesCommands::MoveDown { collection, .. } => *collection,
        }
    }
}

/// How a collection is laid out on disk.
trait Stored: FeaturedPrioritized + Serialize {
    fn save(path: &Path, items: &[Self]) -> anyhow::Result<()>;
}

impl Stored for Category {
    fn save(path: &Path, items: &[Self]) -> anyhow::Result<()> {
        write_json(path, items)
    }
}

impl Stored for Tag {
    fn save(path: &Path, items: &[Self]) -> anyhow::Result<()> {
        let map: BTreeMap<&str, &Tag> = items.iter().map(|t| (t.id.as_str(), t)).collect();
        write_json(path, &map)
    }
}

pub(crate) fn run_priorities(
    data_dir: &Path,
    config: &AppConfig,
    universe: &CatalogUniverse,
    command: &PrioritiesCommands,
) -> anyhow::Result<ExitCode> {
    match command.collection() {
        Collection::Tags => {
            let path = data_dir.join(TAGS_FILE);
            let report = validate_tag_map(&read_json(&path)?)?;
            run_on(&path, report, &config.tag_priorities, command)
        }
        Collection::Categories => {
            let path = data_dir.join(CATEGORIES_FILE);
            let report = validate_categories(&read_json(&path)?, universe)?;
            run_on(&path, report, &config.category_priorities, command)
        }
    }
}

fn run_on<T: Stored>(
    path: &Path,
    report: CollectionReport<T>,
    config: &RenumberConfig,
    command: &PrioritiesCommands,
) -> anyhow::Result<ExitCode> {
    if !report.is_clean() {
        eprint!(
            "{}",
            render_grouped(&path.display().to_string(), &group_failures(&report.failures))
        );
        eprintln!("fix schema errors before editing priorities");
        return Ok(ExitCode::FAILURE);
    }

    let items = sort_by_priority(&report.valid);

    match command {
        PrioritiesCommands::Stats { .. } => {
            print!("{}", render_stats(&items, config));
            Ok(ExitCode::SUCCESS)
        }
        PrioritiesCommands::Check { .. } => {
            let result = validate_priorities(&items, config);
            if result.success {
                println!("ok: {} items, priorities valid", items.len());
                return Ok(ExitCode::SUCCESS);
            }
            for error in &result.errors {
                eprintln!("{error}");
            }
            Ok(ExitCode::FAILURE)
        }
        PrioritiesCommands::Renumber { write, .. } => {
            let renumbered = auto_renumber(&items, config);
            emit(path, &renumbered, *write)
        }
        PrioritiesCommands::MoveUp { index, write, .. } => {
            if *index == 0 || *index >= items.len() {
                tracing::warn!(index, len = items.len(), "nothing above this index; no change");
            }
            emit(path, &move_up(&items, *index), *write)
        }
        PrioritiesCommands::MoveDown { index, write, .. } => {
            if index.saturating_add(1) >= items.len() {
                tracing::warn!(index, len = items.len(), "nothing below this index; no change");
            }
            emit(path, &move_down(&items, *index), *write)
        }
    }
}

fn emit<T: Stored>(path: &Path, items: &[T], write: bool) -> anyhow::Result<ExitCode> {
    if write {
        T::save(path, items)?;
        println!("updated {} ({} items)", path.display(), items.len());
    } else {
        print!("{}", render_listing(items));
    }
    Ok(ExitCode::SUCCESS)
}

/// One line per item: index, priority, featured marker, id.
pub(crate) fn render_listing<T: FeaturedPrioritized>(items: &[T]) -> String {
    let mut out = String::new();
    for (index, item) in items.iter().enumerate() {
        let marker = if item.is_featured() { "*" } else { " " };
        out.push_str(&format!(
            "{index:>3}  {:>4} {marker} {}\n",
            item.priority(),
            item.id()
        ));
    }
    out
}

pub(crate) fn render_stats<T: FeaturedPrioritized>(items: &[T], config: &RenumberConfig) -> String {
    let stats = calculate_stats(items, config);
    let fmt_range = |range: Option<(i64, i64)>| {
        range.map_or_else(|| "-".to_string(), |(min, max)| format!("{min}..={max}"))
    };

    if i64::try_from(stats.featured).is_ok_and(|n| n > config.featured_capacity()) {
        tracing::warn!(
            featured = stats.featured,
            capacity = config.featured_capacity(),
            "more featured items than featured priority slots"
        );
    }

    let mut out = format!(
        "total: {}\nfeatured: {} of {} slots (priorities {})\nnon-featured: {} (priorities {})\n",
        stats.total,
        stats.featured,
        config.featured_capacity(),
        fmt_range(stats.featured_range),
        stats.non_featured,
        fmt_range(stats.non_featured_range),
    );
    match stats.gaps {
        Some(gaps) => {
            out.push_str(&format!("gaps: {}\n", gaps.len()));
            for gap in gaps {
                out.push_str(&format!(
                    "  {} \"{}\": expected {}, found {}\n",
                    gap.partition, gap.name, gap.expected, gap.actual
                ));
            }
        }
        None => out.push_str("gaps: none\n"),
    }
    out
}
