//! File-based image acquisition and validation

use plastiscan_types::{Error, ImageHandle, ImageSource, Result, ScanError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Supported image extensions
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];

/// Check if a path is a supported image file
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Read the file picked by the user.
///
/// `None` means the dialog was cancelled.
pub fn read_selected_file(path: Option<&Path>) -> std::result::Result<ImageHandle, ScanError> {
    let path = path.ok_or(ScanError::NoFileSelected)?;

    if !path.is_file() {
        return Err(ScanError::UnreadableFile(format!(
            "{} does not exist or is not a file",
            path.display()
        )));
    }

    if !is_supported_image(path) {
        return Err(ScanError::UnreadableFile(format!(
            "Unsupported image format: {}",
            path.display()
        )));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| ScanError::UnreadableFile(format!("{}: {}", path.display(), e)))?;

    ImageHandle::from_encoded(bytes, ImageSource::File(path.to_path_buf()))
}

/// Scan a directory (non-recursive) for image files, sorted by file name
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} is not a directory", dir.display()),
        )));
    }

    let mut images: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_supported_image(p))
        .collect();

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_png(path: &Path) {
        image::RgbImage::new(3, 2).save(path).unwrap();
    }

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image(Path::new("bottle.jpg")));
        assert!(is_supported_image(Path::new("bottle.JPEG")));
        assert!(is_supported_image(Path::new("bottle.png")));
        assert!(!is_supported_image(Path::new("bottle.txt")));
        assert!(!is_supported_image(Path::new("bottle")));
    }

    #[test]
    fn test_no_file_selected() {
        assert_eq!(read_selected_file(None), Err(ScanError::NoFileSelected));
    }

    #[test]
    fn test_reads_valid_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cup.png");
        write_png(&path);

        let handle = read_selected_file(Some(&path)).unwrap();
        assert_eq!(handle.path(), Some(path.as_path()));
        assert_eq!(handle.dimensions(), (3, 2));
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.png");
        assert!(matches!(
            read_selected_file(Some(&path)),
            Err(ScanError::UnreadableFile(_))
        ));
    }

    #[test]
    fn test_wrong_extension_is_unreadable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        assert!(matches!(
            read_selected_file(Some(&path)),
            Err(ScanError::UnreadableFile(msg)) if msg.contains("Unsupported")
        ));
    }

    #[test]
    fn test_corrupt_content_is_unreadable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, [0u8, 1, 2, 3, 4, 5]).unwrap();
        assert!(matches!(
            read_selected_file(Some(&path)),
            Err(ScanError::UnreadableFile(_))
        ));
    }

    #[test]
    fn test_scan_directory_sorted() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("b.png"));
        write_png(&dir.path().join("a.png"));
        std::fs::write(dir.path().join("readme.md"), "x").unwrap();

        let images = scan_directory(dir.path()).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempdir().unwrap();
        assert!(scan_directory(&dir.path().join("nope")).is_err());
    }
}
