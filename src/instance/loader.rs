//! Loader for the semicolon-delimited `.pb` format.
//!
//! The file has three sections, each opened by a row holding only the
//! section name (`META`, `PROJECTS`, `VOTES`, case-insensitive) and followed
//! by a header row:
//!
//! ```text
//! META
//! key;value
//! budget;25
//! PROJECTS
//! project_id;cost;name
//! A;10;Park
//! B;15;Library
//! VOTES
//! voter_id;vote
//! v1;A,B
//! ```
//!
//! `meta` must contain `budget`. The `projects` header must contain `cost`
//! and the `votes` header must contain `vote`. All other columns are kept as
//! opaque metadata.
//!
//! Fields may be double-quoted, so a vote list or a name can contain `;` or
//! `,` (`v1;"A,B"`, `A;10;"Park; north"`).

use super::types::{Ballot, Instance, InstanceBuilder, Item};
use crate::error::Error;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Errors raised while reading a `.pb` file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: row outside of any section")]
    RowOutsideSection { line: usize },

    #[error("section `{0}` has no header row")]
    MissingHeader(&'static str),

    #[error("section `{0}` is missing")]
    MissingSection(&'static str),

    #[error("section `{section}` header has no `{column}` column")]
    MissingColumn {
        section: &'static str,
        column: &'static str,
    },

    #[error("line {line}: expected {expected} fields, found {found}")]
    ShortRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: `{value}` is not a number")]
    InvalidNumber { line: usize, value: String },

    #[error("meta section has no `budget` entry")]
    MissingBudget,

    #[error("malformed row: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Instance(#[from] Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Meta,
    Projects,
    Votes,
}

impl Section {
    fn parse(cell: &str) -> Option<Self> {
        match cell.trim().to_ascii_lowercase().as_str() {
            "meta" => Some(Section::Meta),
            "projects" => Some(Section::Projects),
            "votes" => Some(Section::Votes),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Section::Meta => "meta",
            Section::Projects => "projects",
            Section::Votes => "votes",
        }
    }
}

/// Reads and parses a `.pb` file.
pub fn from_path(path: impl AsRef<Path>) -> Result<Instance, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&text)
}

/// Parses the contents of a `.pb` file.
pub fn parse_str(text: &str) -> Result<Instance, LoadError> {
    let mut meta: BTreeMap<String, String> = BTreeMap::new();
    let mut budget_line = 0;
    let mut items: Vec<Item> = Vec::new();
    let mut ballots: Vec<Ballot> = Vec::new();

    let mut seen = [false; 3];
    let mut section: Option<Section> = None;
    let mut header: Option<Vec<String>> = None;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line() as usize);
        let row: Vec<&str> = record.iter().collect();
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        if let Some(next) = Section::parse(row[0]) {
            if let (Some(prev), None) = (section, header.as_ref()) {
                return Err(LoadError::MissingHeader(prev.name()));
            }
            section = Some(next);
            header = None;
            seen[next as usize] = true;
            continue;
        }

        let Some(current) = section else {
            return Err(LoadError::RowOutsideSection { line });
        };

        let Some(columns) = header.as_ref() else {
            let names: Vec<String> = row.iter().skip(1).map(|c| c.to_string()).collect();
            match current {
                Section::Projects if !names.iter().any(|c| c == "cost") => {
                    return Err(LoadError::MissingColumn {
                        section: "projects",
                        column: "cost",
                    })
                }
                Section::Votes if !names.iter().any(|c| c == "vote") => {
                    return Err(LoadError::MissingColumn {
                        section: "votes",
                        column: "vote",
                    })
                }
                _ => {}
            }
            header = Some(names);
            continue;
        };

        match current {
            Section::Meta => {
                if row.len() < 2 {
                    return Err(LoadError::ShortRow {
                        line,
                        expected: 2,
                        found: row.len(),
                    });
                }
                if row[0] == "budget" {
                    budget_line = line;
                }
                meta.insert(row[0].to_string(), row[1].to_string());
            }
            Section::Projects => {
                let fields = row_fields(&row, columns, line)?;
                let mut item = Item::new(row[0], 0.0);
                for (key, value) in fields {
                    if key == "cost" {
                        item.cost = parse_number(value, line)?;
                    } else {
                        item.metadata.insert(key.to_string(), value.to_string());
                    }
                }
                items.push(item);
            }
            Section::Votes => {
                let fields = row_fields(&row, columns, line)?;
                let mut ballot = Ballot {
                    id: row[0].to_string(),
                    ..Ballot::default()
                };
                for (key, value) in fields {
                    if key == "vote" {
                        ballot.approvals = value
                            .split(',')
                            .map(str::trim)
                            .filter(|v| !v.is_empty())
                            .map(str::to_string)
                            .collect();
                        if ballot.approvals.is_empty() {
                            tracing::warn!(voter = %ballot.id, line, "voter approves no items");
                        }
                    } else {
                        ballot.metadata.insert(key.to_string(), value.to_string());
                    }
                }
                ballots.push(ballot);
            }
        }
    }

    for s in [Section::Meta, Section::Projects, Section::Votes] {
        if !seen[s as usize] {
            return Err(LoadError::MissingSection(s.name()));
        }
    }
    if let (Some(s), None) = (section, header.as_ref()) {
        return Err(LoadError::MissingHeader(s.name()));
    }

    let cap = match meta.get("budget") {
        Some(value) => parse_number(value, budget_line)?,
        None => return Err(LoadError::MissingBudget),
    };

    tracing::debug!(
        items = items.len(),
        voters = ballots.len(),
        cap,
        "parsed pb file"
    );

    let mut builder = InstanceBuilder::new(cap);
    for (key, value) in meta {
        builder.add_meta(key, value);
    }
    for item in items {
        builder.add_item(item);
    }
    for ballot in ballots {
        builder.add_ballot(ballot);
    }
    Ok(builder.build()?)
}

/// Pairs header columns with the row's cells after the id column.
fn row_fields<'a>(
    row: &'a [&'a str],
    columns: &'a [String],
    line: usize,
) -> Result<impl Iterator<Item = (&'a str, &'a str)>, LoadError> {
    if row.len() < columns.len() + 1 {
        return Err(LoadError::ShortRow {
            line,
            expected: columns.len() + 1,
            found: row.len(),
        });
    }
    Ok(columns
        .iter()
        .map(String::as_str)
        .zip(row[1..].iter().copied()))
}

fn parse_number(value: &str, line: usize) -> Result<f64, LoadError> {
    value.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}
