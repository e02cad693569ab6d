//! Importing datasets from delimited text files.
//!
//! Accepts the loose formats people actually export from spreadsheets:
//! values separated by commas, semicolons, or any whitespace, in any mix,
//! across any number of lines. Cells that do not parse as integers are
//! skipped and counted rather than failing the whole file.

use crate::error::Error;
use std::fs;
use std::path::Path;

/// Result of reading a dataset file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedDataset {
    /// Parsed values in file order.
    pub values: Vec<i32>,
    /// Number of cells that were present but did not parse.
    pub skipped: usize,
}

/// Reads an integer dataset from a delimited text file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and
/// [`Error::EmptyImport`] if no cell parses as an integer.
pub fn load_dataset(path: &Path) -> Result<ImportedDataset, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut values = Vec::new();
    let mut skipped = 0_usize;
    for cell in text
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|cell| !cell.is_empty())
    {
        match cell.parse::<i32>() {
            Ok(value) => values.push(value),
            Err(_) => {
                skipped += 1;
                tracing::warn!(path = %path.display(), cell, "skipping unparsable cell");
            }
        }
    }

    if values.is_empty() {
        return Err(Error::EmptyImport {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(
        path = %path.display(),
        count = values.len(),
        skipped,
        "imported dataset"
    );
    Ok(ImportedDataset { values, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("sortlab-import-{name}-{}", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_mixed_delimiters() {
        let path = write_temp("mixed", "1, 2;3\n4\t5  6");
        let imported = load_dataset(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(imported.values, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(imported.skipped, 0);
    }

    #[test]
    fn skips_unparsable_cells_and_counts_them() {
        let path = write_temp("skips", "10, abc, 20, 3.5, -7");
        let imported = load_dataset(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(imported.values, vec![10, 20, -7]);
        assert_eq!(imported.skipped, 2);
    }

    #[test]
    fn empty_file_is_an_error() {
        let path = write_temp("empty", "  \n , ; \n");
        let err = load_dataset(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(matches!(err, Error::EmptyImport { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = Path::new("/nonexistent/sortlab-dataset.txt");
        assert!(matches!(load_dataset(path), Err(Error::Io { .. })));
    }
}
