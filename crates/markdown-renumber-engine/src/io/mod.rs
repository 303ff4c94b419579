use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
    #[error("Path is not inside the notes directory: {0}")]
    OutsideNotesDir(PathBuf),
}

/// Read a markdown file and return its content
pub fn read_file(relative_path: &RelativePath, notes_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a markdown file
pub fn write_file(
    relative_path: &RelativePath,
    notes_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(notes_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Scan for markdown files under `notes_root`, returned relative to it and sorted
pub fn scan_markdown_files(notes_root: &Path) -> Result<Vec<RelativePathBuf>, IoError> {
    validate_notes_dir(notes_root)?;

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, &mut files)?;

    let mut relative = files
        .iter()
        .map(|path| to_relative(path, notes_root))
        .collect::<Result<Vec<_>, _>>()?;
    relative.sort();
    Ok(relative)
}

/// Splits a file path into its directory and a relative name, the shape the
/// other functions here expect.
pub fn split_file_path(path: &Path) -> Result<(PathBuf, RelativePathBuf), IoError> {
    let name = path
        .file_name()
        .ok_or_else(|| IoError::NotFound(path.to_path_buf()))?;
    let root = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let relative = RelativePathBuf::from_path(name)
        .map_err(|_| IoError::OutsideNotesDir(path.to_path_buf()))?;
    Ok((root, relative))
}

fn to_relative(path: &Path, notes_root: &Path) -> Result<RelativePathBuf, IoError> {
    path.strip_prefix(notes_root)
        .ok()
        .and_then(|p| RelativePathBuf::from_path(p).ok())
        .ok_or_else(|| IoError::OutsideNotesDir(path.to_path_buf()))
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotesDir(format!(
            "notes directory not found: {}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_file, create_test_notes_dir};

    #[test]
    fn test_scan_and_load_files() {
        // Given a notes directory with markdown files
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "test1.md", "1. First item\n2. Second item");
        create_test_file(&notes_dir, "test2.md", "1. Parent\n\t1. Child");

        // When scanning for files
        let files = scan_markdown_files(notes_dir.path()).unwrap();

        // Then we find the expected files, relative and sorted
        assert_eq!(
            files,
            vec![
                RelativePathBuf::from("test1.md"),
                RelativePathBuf::from("test2.md")
            ]
        );
    }

    #[test]
    fn test_handle_invalid_notes_directory() {
        let nonexistent_path = PathBuf::from("/this/path/does/not/exist");

        let result = scan_markdown_files(&nonexistent_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("notes directory"));
    }

    #[test]
    fn test_scan_nested_directories() {
        // Given a notes directory with nested structure
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "root.md", "1. Root file");

        let sub_dir = notes_dir.path().join("subfolder");
        std::fs::create_dir(&sub_dir).unwrap();
        std::fs::write(sub_dir.join("nested.md"), "1. Nested file").unwrap();

        // When scanning for files
        let files = scan_markdown_files(notes_dir.path()).unwrap();

        // Then nested files keep their folder in the relative path
        assert_eq!(files.len(), 2);
        assert!(files.contains(&RelativePathBuf::from("root.md")));
        assert!(files.contains(&RelativePathBuf::from("subfolder/nested.md")));
    }

    #[test]
    fn test_ignore_non_markdown_files() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "document.md", "1. Markdown");
        create_test_file(&notes_dir, "image.png", "fake image data");
        create_test_file(&notes_dir, "config.json", "{}");

        let files = scan_markdown_files(notes_dir.path()).unwrap();

        assert_eq!(files, vec![RelativePathBuf::from("document.md")]);
    }

    #[test]
    fn test_validate_notes_dir_not_exists() {
        let result = validate_notes_dir(Path::new("/nonexistent/path"));
        assert!(matches!(result, Err(IoError::InvalidNotesDir(_))));
    }

    #[test]
    fn test_read_file_not_found() {
        let notes_dir = create_test_notes_dir();
        let relative_path = RelativePath::new("nonexistent.md");
        let result = read_file(relative_path, notes_dir.path());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_write_file_creates_parent_directories() {
        let notes_dir = create_test_notes_dir();
        let relative_path = RelativePath::new("folder/subfolder/list.md");
        let content = "1. a\n2. b";

        write_file(relative_path, notes_dir.path(), content).unwrap();

        let written_content = read_file(relative_path, notes_dir.path()).unwrap();
        assert_eq!(written_content, content);
        assert!(notes_dir.path().join("folder").join("subfolder").is_dir());
    }

    #[test]
    fn test_split_file_path() {
        let (root, relative) = split_file_path(Path::new("/notes/daily/today.md")).unwrap();

        assert_eq!(root, PathBuf::from("/notes/daily"));
        assert_eq!(relative, RelativePathBuf::from("today.md"));
    }

    #[test]
    fn test_split_bare_file_name_uses_current_dir() {
        let (root, relative) = split_file_path(Path::new("today.md")).unwrap();

        assert_eq!(root, PathBuf::from("."));
        assert_eq!(relative, RelativePathBuf::from("today.md"));
    }
}
