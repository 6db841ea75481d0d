
use anyhow::Context;
use log::debug;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use tempfile::TempPath;

use crate::util::file_io::{is_gzipped, open_text_reader};

/// Header key that some tools write without a value, which VCF parsers reject
pub const FILE_DATE_KEY: &[u8] = b"##fileDate";
/// Replacement for a `##fileDate` line that is missing its value
pub const FILE_DATE_PLACEHOLDER: &[u8] = b"##fileDate=unknown\n";

/// A repaired, temporary copy of a VCF file.
/// The file on disk is deleted when this is dropped, so keep it alive for as long as the path is being read.
#[derive(Debug)]
pub struct SanitizedVcf {
    /// Location of the temporary copy, removed on drop
    path: TempPath,
    /// If true, the copy is gzip compressed
    is_compressed: bool,
    /// Number of lines that were rewritten
    repaired_lines: usize
}

impl SanitizedVcf {
    // getters
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_compressed(&self) -> bool {
        self.is_compressed
    }

    pub fn repaired_lines(&self) -> usize {
        self.repaired_lines
    }
}

/// Creates a temporary copy of a VCF file with any bare `##fileDate` header lines repaired.
/// Every other line is copied byte-for-byte. If the input ends with `.gz`, it is decompressed on read
/// and the copy is gzip compressed with a matching `.vcf.gz` suffix.
/// # Arguments
/// * `vcf_fn` - the VCF file to sanitize
/// # Errors
/// * if the input cannot be opened or decompressed
/// * if the temporary copy cannot be written
pub fn sanitize_vcf(vcf_fn: &Path) -> anyhow::Result<SanitizedVcf> {
    sanitize_vcf_in(vcf_fn, &std::env::temp_dir())
}

/// Same as `sanitize_vcf`, but the temporary copy is created inside `temp_dir`.
/// If sanitizing fails part way, the partial copy is removed before returning.
/// # Arguments
/// * `vcf_fn` - the VCF file to sanitize
/// * `temp_dir` - existing folder that will hold the copy
pub fn sanitize_vcf_in(vcf_fn: &Path, temp_dir: &Path) -> anyhow::Result<SanitizedVcf> {
    let is_compressed = is_gzipped(vcf_fn);
    let mut reader = open_text_reader(vcf_fn)?;

    let suffix = if is_compressed { ".vcf.gz" } else { ".vcf" };
    let mut temp_file = tempfile::Builder::new()
        .prefix("sanitized_")
        .suffix(suffix)
        .tempfile_in(temp_dir)
        .with_context(|| format!("Error while creating temporary VCF file in {temp_dir:?}:"))?;

    let repaired_lines = {
        let writer = BufWriter::new(temp_file.as_file_mut());
        if is_compressed {
            let mut encoder = flate2::write::GzEncoder::new(writer, flate2::Compression::default());
            let repaired = repair_lines(&mut reader, &mut encoder)
                .with_context(|| format!("Error while sanitizing {vcf_fn:?}:"))?;
            encoder.finish()?
                .flush()?;
            repaired
        } else {
            let mut writer = writer;
            let repaired = repair_lines(&mut reader, &mut writer)
                .with_context(|| format!("Error while sanitizing {vcf_fn:?}:"))?;
            writer.flush()?;
            repaired
        }
    };

    let path = temp_file.into_temp_path();
    debug!("Sanitized {vcf_fn:?} into {path:?}, {repaired_lines} line(s) repaired.");
    Ok(SanitizedVcf {
        path,
        is_compressed,
        repaired_lines
    })
}

/// Copies lines from `reader` to `writer`, replacing any `##fileDate` line that has no `=`.
/// Lines are handled as raw bytes so terminators and encodings are preserved exactly.
/// Returns the number of lines that were replaced.
/// # Arguments
/// * `reader` - the source text
/// * `writer` - the destination
pub fn repair_lines<R: BufRead + ?Sized, W: Write + ?Sized>(reader: &mut R, writer: &mut W) -> std::io::Result<usize> {
    let mut repaired = 0;
    let mut line: Vec<u8> = Vec::with_capacity(1024);
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }

        if is_bare_file_date(&line) {
            writer.write_all(FILE_DATE_PLACEHOLDER)?;
            repaired += 1;
        } else {
            writer.write_all(&line)?;
        }
    }
    Ok(repaired)
}

/// True for a `##fileDate` header line that does not contain a `=` anywhere
fn is_bare_file_date(line: &[u8]) -> bool {
    line.starts_with(FILE_DATE_KEY) && !line.contains(&b'=')
}
