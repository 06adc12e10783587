use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::parser::SourceDocument;

/// Extension of the text files picked up from directories.
const TEXT_EXTENSION: &str = "txt";

/// Expand command-line paths into the documents to parse.
///
/// Files are taken as given, whatever their extension. Directories are walked
/// recursively for `.txt` files, sorted by path. A path that does not exist is
/// still returned, so it shows up in the output as an invalid document.
pub fn scan_inputs(paths: &[PathBuf]) -> Vec<SourceDocument> {
    let mut results = Vec::new();

    for path in paths {
        if path.is_dir() {
            results.extend(scan_dir(path).into_iter().map(SourceDocument::file));
        } else {
            results.push(SourceDocument::file(path.clone()));
        }
    }

    results
}

fn scan_dir(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_text_file(p))
        .collect()
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(TEXT_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(docs: &[SourceDocument]) -> Vec<&str> {
        docs.iter().map(|d| d.filename.as_str()).collect()
    }

    #[test]
    fn test_directory_walk_sorted_txt_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_order.txt"), "TRIAL").unwrap();
        fs::write(dir.path().join("a_order.TXT"), "TRIAL").unwrap();
        fs::write(dir.path().join("notes.md"), "skip").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c_order.txt"), "TRIAL").unwrap();

        let docs = scan_inputs(&[dir.path().to_path_buf()]);
        assert_eq!(names(&docs), vec!["a_order.TXT", "b_order.txt", "c_order.txt"]);
    }

    #[test]
    fn test_explicit_files_kept_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let second = dir.path().join("second.pdf");
        let first = dir.path().join("first.txt");
        fs::write(&second, "%PDF-1.4").unwrap();
        fs::write(&first, "TRIAL").unwrap();

        let docs = scan_inputs(&[second, first]);
        assert_eq!(names(&docs), vec!["second.pdf", "first.txt"]);
    }

    #[test]
    fn test_missing_path_still_listed() {
        let docs = scan_inputs(&[PathBuf::from("/no/such/dir/order.txt")]);
        assert_eq!(names(&docs), vec!["order.txt"]);
    }

    #[test]
    fn test_is_text_file() {
        assert!(is_text_file(Path::new("x/order.txt")));
        assert!(!is_text_file(Path::new("x/order.pdf")));
        assert!(!is_text_file(Path::new("x/txt")));
    }
}
