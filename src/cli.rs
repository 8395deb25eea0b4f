//! CLI argument parsing and command handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::index::{SearchCatalog, SymbolIndex, fragment_files};
use crate::models::Entry;
use crate::output;
use crate::parser;

/// Doxidx: inspect and validate documentation search indexes
#[derive(Parser, Debug)]
#[command(
    name = "dxi",
    version,
    about = "Load, validate, and query Doxygen-style searchData fragments",
    long_about = "Doxidx works with the static search index a documentation build \
                  drops under its search/ directory: one searchData fragment per \
                  symbol-kind/letter shard. It answers exact-match symbol lookups, \
                  validates record structure, and re-emits fragments losslessly."
)]
pub struct Cli {
    /// Enable verbose logging (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look a symbol up across the index
    ///
    /// The name is normalized (lowercased, punctuation stripped) before
    /// matching, so 'GetDistance' and 'getdistance' are equivalent.
    /// An absent symbol prints nothing and exits 0.
    Lookup {
        /// Symbol name or search key
        name: String,

        /// Fragment file or search/ directory
        #[arg(short = 'p', long, value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Output format as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output (only with --json)
        #[arg(long)]
        pretty: bool,

        /// Decode HTML entities in owner labels for display
        #[arg(long)]
        decode: bool,
    },

    /// List every entry in the index
    List {
        /// Fragment file or search/ directory
        #[arg(short = 'p', long, value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Output format as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output (only with --json)
        #[arg(long)]
        pretty: bool,

        /// Maximum number of entries to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show index statistics (fragments, entries, occurrences)
    Stats {
        /// Fragment file or search/ directory
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Output format as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output (only with --json)
        #[arg(long)]
        pretty: bool,
    },

    /// Validate every fragment under a path
    ///
    /// Reports malformed records per file and exits non-zero if any fragment
    /// fails to load. Also warns when a fragment parses but is not in
    /// canonical form (re-emitting it would change bytes).
    Validate {
        /// Fragment file or search/ directory
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,
    },

    /// Export the index as JSON
    Export {
        /// Fragment file or search/ directory
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Re-emit a fragment in canonical form
    Fmt {
        /// Fragment file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Rewrite the file in place instead of printing to stdout
        #[arg(short, long)]
        write: bool,
    },
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        // Setup logging based on verbosity
        let log_level = match self.verbose {
            0 => "warn",  // Default: only warnings and errors
            1 => "info",  // -v: show info messages
            2 => "debug", // -vv: show debug messages
            _ => "trace", // -vvv: show trace messages
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();

        match self.command {
            Command::Lookup {
                name,
                path,
                json,
                pretty,
                decode,
            } => handle_lookup(&name, &path, json, pretty, decode),
            Command::List {
                path,
                json,
                pretty,
                limit,
            } => handle_list(&path, json, pretty, limit),
            Command::Stats { path, json, pretty } => handle_stats(&path, json, pretty),
            Command::Validate { path } => handle_validate(&path),
            Command::Export { path, pretty } => handle_export(&path, pretty),
            Command::Fmt { file, write } => handle_fmt(&file, write),
        }
    }
}

/// Handle the `lookup` command
fn handle_lookup(name: &str, path: &Path, json: bool, pretty: bool, decode: bool) -> Result<()> {
    log::info!("looking up '{}' under {}", name, path.display());

    let catalog = SearchCatalog::load(path)?;
    let matches = catalog.lookup(name);

    if json {
        println!("{}", to_json(&matches, pretty)?);
        return Ok(());
    }

    if matches.is_empty() {
        output::info(&format!("No matches for '{name}'."));
        return Ok(());
    }

    println!("{} ({} occurrences)", matches[0].display_name, matches.len());
    for m in &matches {
        let owner = if decode {
            crate::models::decode_entities(&m.owner)
        } else {
            m.owner.clone()
        };
        println!("  {owner}");
        println!("    {}", m.url);
    }
    Ok(())
}

/// One row of `list` output
#[derive(Debug, Serialize)]
struct ListRow {
    fragment: String,
    key: String,
    display_name: String,
    occurrences: usize,
}

/// Handle the `list` command
fn handle_list(path: &Path, json: bool, pretty: bool, limit: Option<usize>) -> Result<()> {
    let catalog = SearchCatalog::load(path)?;

    let mut rows = Vec::new();
    for fragment in catalog.fragments() {
        for entry in fragment.index.entries() {
            rows.push(ListRow {
                fragment: fragment.path.display().to_string(),
                key: entry.key.clone(),
                display_name: entry.display_name.clone(),
                occurrences: entry.occurrences.len(),
            });
        }
    }
    if let Some(limit) = limit {
        rows.truncate(limit);
    }

    if json {
        println!("{}", to_json(&rows, pretty)?);
        return Ok(());
    }

    for row in &rows {
        println!(
            "{:<40} {:>3}  {}",
            row.display_name, row.occurrences, row.key
        );
    }
    Ok(())
}

/// Handle the `stats` command
fn handle_stats(path: &Path, json: bool, pretty: bool) -> Result<()> {
    let catalog = SearchCatalog::load(path)?;
    let stats = catalog.stats();

    if json {
        println!("{}", to_json(&stats, pretty)?);
        return Ok(());
    }

    println!("Fragments:    {}", stats.fragments);
    println!("Entries:      {}", stats.entries);
    println!("Occurrences:  {}", stats.occurrences);
    Ok(())
}

/// Handle the `validate` command
fn handle_validate(path: &Path) -> Result<()> {
    let files = if path.is_dir() {
        fragment_files(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut checked = 0usize;
    let mut failures = 0usize;
    for file in &files {
        let text =
            fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
        if !parser::is_fragment(&text) {
            log::debug!("skipping non-fragment file: {}", file.display());
            continue;
        }
        checked += 1;
        match SymbolIndex::parse(&text) {
            Ok(index) => {
                if index.to_js() == text {
                    println!("OK       {} ({} entries)", file.display(), index.len());
                } else {
                    output::warn(&format!("{}: valid but not in canonical form", file.display()));
                }
            }
            Err(e) => {
                failures += 1;
                println!("INVALID  {}: {}", file.display(), e);
            }
        }
    }

    if checked == 0 {
        anyhow::bail!("no searchData fragments found under {}", path.display());
    }
    if failures > 0 {
        anyhow::bail!("{failures} of {checked} fragments failed validation");
    }
    output::info(&format!("All {checked} fragments valid."));
    Ok(())
}

/// One fragment's worth of `export` output
#[derive(Debug, Serialize)]
struct ExportFragment<'a> {
    fragment: String,
    entries: &'a [Entry],
}

/// Handle the `export` command
fn handle_export(path: &Path, pretty: bool) -> Result<()> {
    let catalog = SearchCatalog::load(path)?;

    let dump: Vec<ExportFragment<'_>> = catalog
        .fragments()
        .iter()
        .map(|f| ExportFragment {
            fragment: f.path.display().to_string(),
            entries: f.index.entries(),
        })
        .collect();

    println!("{}", to_json(&dump, pretty)?);
    Ok(())
}

/// Handle the `fmt` command
fn handle_fmt(file: &Path, write: bool) -> Result<()> {
    let index =
        SymbolIndex::load(file).with_context(|| format!("failed to load {}", file.display()))?;
    let canonical = index.to_js();

    if write {
        fs::write(file, &canonical)
            .with_context(|| format!("failed to write {}", file.display()))?;
        log::info!("rewrote {} in canonical form", file.display());
    } else {
        print!("{canonical}");
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
