
use anyhow::Context;
use coitrees::{COITree, Interval, IntervalTree};
use log::debug;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

use crate::util::file_io::open_text_reader;

#[derive(thiserror::Error, Debug)]
pub enum RegionError {
    #[error("line {line}: expected at least 3 columns (chrom, start, end), found {found}")]
    MissingColumns { line: usize, found: usize },
    #[error("line {line}: invalid {field} coordinate {value:?}")]
    InvalidCoordinate { line: usize, field: &'static str, value: String },
    #[error("line {line}: start ({start}) is after end ({end})")]
    StartAfterEnd { line: usize, start: i32, end: i32 }
}

/// Region lookup for "is this position inside any configured region?" queries.
/// Coordinates are used exactly as they appear in the region file and both bounds are inclusive.
pub struct IntervalIndex {
    /// Lookup from a chromosome to a COITree of inclusive ranges
    lookup_trees: BTreeMap<String, COITree<(), usize>>
}

impl std::fmt::Debug for IntervalIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // COITree has no Debug impl, report region counts per chromosome instead
        let lookup_counts: BTreeMap<&str, usize> = self.lookup_trees.iter()
            .map(|(s, c)| (s.as_str(), c.len()))
            .collect();
        f.debug_struct("IntervalIndex").field("lookup_trees_len", &lookup_counts).finish()
    }
}

impl IntervalIndex {
    /// Loads a whitespace-delimited region file (.gz supported).
    /// Blank lines, `#` comments, and `track`/`browser` header lines are skipped.
    /// # Arguments
    /// * `filename` - path to the region file
    /// # Errors
    /// * if the file cannot be opened or read
    /// * if any data line is malformed, see `RegionError`
    pub fn from_bed(filename: &Path) -> anyhow::Result<Self> {
        debug!("Loading regions from {filename:?}...");
        let reader = open_text_reader(filename)?;
        Self::from_reader(reader)
            .with_context(|| format!("Error while loading regions from {filename:?}:"))
    }

    /// Same as `from_bed`, but reads from an already opened source.
    /// # Arguments
    /// * `reader` - any buffered text source
    pub fn from_reader<R: BufRead>(reader: R) -> anyhow::Result<Self> {
        let mut chrom_intervals: BTreeMap<String, Vec<Interval<()>>> = Default::default();
        for (line_index, result) in reader.lines().enumerate() {
            let line = result?;
            if let Some((chrom, start, end)) = parse_region_line(&line, line_index + 1)? {
                chrom_intervals.entry(chrom)
                    .or_default()
                    .push(Interval::new(start, end, ()));
            }
        }

        let lookup_trees: BTreeMap<String, COITree<(), usize>> = chrom_intervals.into_iter()
            .map(|(chrom, intervals)| {
                debug!("Found {} regions for {chrom}.", intervals.len());
                let tree = COITree::new(&intervals);
                (chrom, tree)
            })
            .collect();

        Ok(Self {
            lookup_trees
        })
    }

    /// Returns true if `position` falls inside at least one region on `chrom`, bounds inclusive.
    /// # Arguments
    /// * `chrom` - the chromosome name, matched exactly
    /// * `position` - the position to test, same coordinate system as the region file
    pub fn contains(&self, chrom: &str, position: u64) -> bool {
        let position = match i32::try_from(position) {
            Ok(p) => p,
            // every loaded coordinate fits an i32, so this cannot be inside anything
            Err(_) => return false
        };
        match self.lookup_trees.get(chrom) {
            Some(coi_tree) => coi_tree.query_count(position, position) > 0,
            None => false
        }
    }

    /// Total number of regions loaded
    pub fn num_regions(&self) -> usize {
        self.lookup_trees.values()
            .map(|t| t.len())
            .sum()
    }

    /// True if no data lines were loaded, e.g. a header-only or comment-only file
    pub fn is_empty(&self) -> bool {
        self.lookup_trees.is_empty()
    }

    /// Chromosomes that have at least one region
    pub fn chromosomes(&self) -> impl Iterator<Item = &str> {
        self.lookup_trees.keys().map(|k| k.as_str())
    }
}

/// Parses a single region line, returning None for lines that carry no region.
/// # Arguments
/// * `line` - the raw text line
/// * `line_number` - 1-based line number for error reporting
fn parse_region_line(line: &str, line_number: usize) -> Result<Option<(String, i32, i32)>, RegionError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    if fields[0] == "track" || fields[0] == "browser" {
        return Ok(None);
    }
    if fields.len() < 3 {
        return Err(RegionError::MissingColumns { line: line_number, found: fields.len() });
    }

    let parse_coordinate = |field: &'static str, value: &str| -> Result<i32, RegionError> {
        value.parse::<i32>()
            .map_err(|_e| RegionError::InvalidCoordinate { line: line_number, field, value: value.to_string() })
    };
    let start = parse_coordinate("start", fields[1])?;
    let end = parse_coordinate("end", fields[2])?;
    if start > end {
        return Err(RegionError::StartAfterEnd { line: line_number, start, end });
    }

    Ok(Some((fields[0].to_string(), start, end)))
}
