use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Maximum total length of a destination path, in characters.
pub const MAX_PATH_LEN: usize = 248;

/// Slots reserved at the end of a shortened name for the `...` marker.
const ELLIPSIS_LEN: usize = 3;

#[derive(Debug, Error)]
pub enum PathError {
    /// Destination directory leaves no room for even a shortened file name.
    #[error("destination directory leaves no room for a file name: {0}")]
    DestinationTooLong(PathBuf),

    /// Source directory has no files to take an extension from.
    #[error("no files in source directory: {0}")]
    EmptySourceDir(PathBuf),

    /// First file in the source directory has no '.' in its name.
    #[error("cannot infer an extension from {0}")]
    MissingExtension(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the destination path `character_dir/file_name+extension`,
/// shortening `file_name` with a trailing `...` when the combined path
/// would exceed [`MAX_PATH_LEN`]. The extension is never truncated.
pub fn resolve(
    file_name: &str,
    character_dir: &Path,
    extension: &str,
) -> Result<PathBuf, PathError> {
    let dir_len = character_dir.as_os_str().to_string_lossy().chars().count();
    let ext_len = extension.chars().count();
    let name_len = file_name.chars().count();

    // Budget covers directory + separator + name + extension.
    if dir_len + 1 + name_len + ext_len <= MAX_PATH_LEN {
        return Ok(character_dir.join(format!("{}{}", file_name, extension)));
    }

    let available = MAX_PATH_LEN
        .checked_sub(dir_len + 1 + ext_len)
        .filter(|room| *room >= ELLIPSIS_LEN)
        .ok_or_else(|| PathError::DestinationTooLong(character_dir.to_path_buf()))?;

    // Keep what fits of the original name and mark the cut.
    let shortened: String = file_name
        .chars()
        .take(available - ELLIPSIS_LEN)
        .chain("...".chars())
        .collect();

    Ok(character_dir.join(format!("{}{}", shortened, extension)))
}

/// Returns the extension shared by every file in `source_dir`, dot
/// included. Only the first file the listing yields is inspected; the
/// extraction step leaves the whole directory with one uniform extension.
pub fn shared_extension(source_dir: &Path) -> Result<String, PathError> {
    let first = fs::read_dir(source_dir)?
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.path().is_file())
        .ok_or_else(|| PathError::EmptySourceDir(source_dir.to_path_buf()))?;

    let name = first.file_name();
    let name = name.to_string_lossy();

    // Extensions can stack (".ogg.wav"), so cut at the first dot rather
    // than the last.
    match name.find('.') {
        Some(dot) => Ok(name[dot..].to_string()),
        None => Err(PathError::MissingExtension(first.path())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_paths_pass_through_unchanged() {
        let path = resolve("Hello_there", Path::new("/sorted/GERALT"), ".wav").unwrap();
        assert_eq!(path, PathBuf::from("/sorted/GERALT/Hello_there.wav"));
    }

    #[test]
    fn boundary_length_is_not_shortened() {
        let dir = format!("/{}", "d".repeat(99));
        let name = "x".repeat(MAX_PATH_LEN - 100 - 1 - 4);
        let path = resolve(&name, Path::new(&dir), ".wav").unwrap();
        let path = path.to_string_lossy();
        assert_eq!(path.chars().count(), MAX_PATH_LEN);
        assert!(!path.contains("..."));
    }

    #[test]
    fn long_names_are_shortened_with_a_marker() {
        let dir = format!("/{}", "d".repeat(179));
        let name = "x".repeat(300);
        let path = resolve(&name, Path::new(&dir), ".wav").unwrap();
        let path = path.to_string_lossy();
        assert_eq!(path.chars().count(), MAX_PATH_LEN);
        assert!(path.ends_with("....wav"));
        assert!(path.contains("/xxxx"));
    }

    #[test]
    fn extension_survives_shortening_in_full() {
        let dir = format!("/{}", "d".repeat(200));
        let path = resolve(&"y".repeat(100), Path::new(&dir), ".ogg.wav").unwrap();
        let path = path.to_string_lossy();
        assert!(path.ends_with("....ogg.wav"));
        assert!(path.chars().count() <= MAX_PATH_LEN);
    }

    #[test]
    fn shortening_counts_characters_not_bytes() {
        let dir = format!("/{}", "d".repeat(179));
        let name = "é".repeat(300);
        let path = resolve(&name, Path::new(&dir), ".wav").unwrap();
        assert!(path.to_string_lossy().chars().count() <= MAX_PATH_LEN);
    }

    #[test]
    fn overlong_directory_is_rejected() {
        let dir = format!("/{}", "d".repeat(260));
        let err = resolve("name", Path::new(&dir), ".wav").unwrap_err();
        assert!(matches!(err, PathError::DestinationTooLong(_)));
    }

    #[test]
    fn directory_leaving_no_room_for_the_marker_is_rejected() {
        // available comes out below the three slots the marker needs
        let dir = format!("/{}", "d".repeat(MAX_PATH_LEN - 1 - 4 - 3));
        let err = resolve(&"z".repeat(50), Path::new(&dir), ".wav").unwrap_err();
        assert!(matches!(err, PathError::DestinationTooLong(_)));
    }

    #[test]
    fn discovers_the_shared_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("0x0001A2B3.wav"), b"").unwrap();
        fs::write(dir.path().join("0x0001A2C4.wav"), b"").unwrap();
        assert_eq!(shared_extension(dir.path()).unwrap(), ".wav");
    }

    #[test]
    fn stacked_extensions_are_kept_whole() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("0x0001A2B3.ogg.wav"), b"").unwrap();
        assert_eq!(shared_extension(dir.path()).unwrap(), ".ogg.wav");
    }

    #[test]
    fn empty_source_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = shared_extension(dir.path()).unwrap_err();
        assert!(matches!(err, PathError::EmptySourceDir(_)));
    }

    #[test]
    fn dotless_file_name_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("0x0001A2B3"), b"").unwrap();
        let err = shared_extension(dir.path()).unwrap_err();
        assert!(matches!(err, PathError::MissingExtension(_)));
    }
}
