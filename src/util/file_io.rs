
use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Returns true if the path ends in `.gz`, which is how we decide on gzip handling
pub fn is_gzipped(filename: &Path) -> bool {
    filename.extension().unwrap_or_default() == "gz"
}

/// Opens a file for buffered reading, transparently decompressing `.gz` files.
/// BGZF files are multi-member gzip, so they are handled by the same decoder.
/// # Arguments
/// * `filename` - the file to open
/// # Errors
/// * if the file does not open
pub fn open_text_reader(filename: &Path) -> anyhow::Result<Box<dyn BufRead>> {
    let file = File::open(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;
    let reader: Box<dyn BufRead> = if is_gzipped(filename) {
        Box::new(BufReader::new(
            flate2::read::MultiGzDecoder::new(file)
        ))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}

/// Creates the parent folder for an output file if it does not already exist.
/// # Arguments
/// * `out_filename` - the output file path
pub fn create_parent_folder(out_filename: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out_filename.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Error while creating folder {parent:?}:"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("calls.vcf.gz")));
        assert!(!is_gzipped(Path::new("calls.vcf")));
        assert!(!is_gzipped(Path::new("calls.gzip")));
        assert!(!is_gzipped(Path::new("gz")));
    }

    #[test]
    fn test_open_gzip() {
        let mut gz_file = tempfile::Builder::new()
            .suffix(".txt.gz")
            .tempfile()
            .unwrap();
        {
            let mut encoder = flate2::write::GzEncoder::new(gz_file.as_file_mut(), flate2::Compression::default());
            encoder.write_all(b"line one\nline two\n").unwrap();
            encoder.finish().unwrap();
        }

        let mut text = String::new();
        open_text_reader(gz_file.path()).unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "line one\nline two\n");
    }

    #[test]
    fn test_create_parent_folder() {
        let temp_dir = tempfile::tempdir().unwrap();
        let out_fn = temp_dir.path().join("a").join("b").join("out.csv");
        create_parent_folder(&out_fn).unwrap();
        assert!(temp_dir.path().join("a").join("b").is_dir());

        // bare filenames have an empty parent, which is fine
        create_parent_folder(Path::new("out.csv")).unwrap();
    }
}
