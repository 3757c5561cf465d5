use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::catalog::tables::CatalogConfig;

/// Errors from resolving a requested audio path.
#[derive(Error, Debug)]
pub enum MediaError {
    /// Missing file, or a path that leaves the example folders.
    #[error("audio file not found")]
    NotFound,

    #[error("filesystem error: {0}")]
    Io(#[from] io::Error),
}

// ---------------------------------------------------------------------------
// Path resolution
// ---------------------------------------------------------------------------

/// Map a URL path such as `Example_01/noisy_input.wav` onto a file under `base`.
///
/// The request must name a configured example folder, end in a recognized
/// audio extension, contain only plain segments, and, after symlinks are
/// followed, still point at a regular file inside `base`. Anything else is
/// [`MediaError::NotFound`].
pub fn resolve_audio_path(
    base: &Path,
    cfg: &CatalogConfig,
    requested: &str,
) -> Result<PathBuf, MediaError> {
    let rel = Path::new(requested);

    let mut segments = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(seg) => segments.push(seg),
            _ => return Err(MediaError::NotFound),
        }
    }

    let [first, .., _file] = segments.as_slice() else {
        return Err(MediaError::NotFound);
    };
    let is_known = first
        .to_str()
        .is_some_and(|name| cfg.snr_for(name).is_some());
    if !is_known || !cfg.is_audio(rel) {
        return Err(MediaError::NotFound);
    }

    // Any failure to resolve (missing base, ENOTDIR, ENAMETOOLONG, ...) means
    // there is no such file to serve.
    let root = base.canonicalize().map_err(|e| {
        log::debug!("Base directory {} unavailable: {e}", base.display());
        MediaError::NotFound
    })?;
    let resolved = root.join(rel).canonicalize().map_err(|e| {
        log::debug!("Cannot resolve {requested:?}: {e}");
        MediaError::NotFound
    })?;

    if !resolved.starts_with(&root) || !resolved.is_file() {
        return Err(MediaError::NotFound);
    }
    Ok(resolved)
}

/// Content type for an audio file, by extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "flac" => "audio/flac",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        "opus" => "audio/opus",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let ex = temp_dir.path().join("Example_01");
        fs::create_dir_all(&ex).unwrap();
        fs::write(ex.join("speech_only.wav"), b"RIFF....WAVE").unwrap();
        fs::write(ex.join("notes.txt"), b"hello").unwrap();
        fs::create_dir_all(temp_dir.path().join("private")).unwrap();
        fs::write(temp_dir.path().join("private/secret.wav"), b"nope").unwrap();
        temp_dir
    }

    fn is_not_found(r: Result<PathBuf, MediaError>) -> bool {
        matches!(r, Err(MediaError::NotFound))
    }

    #[test]
    fn resolves_existing_file() {
        let temp_dir = fixture();
        let cfg = CatalogConfig::default();
        let path = resolve_audio_path(temp_dir.path(), &cfg, "Example_01/speech_only.wav").unwrap();
        assert!(path.ends_with("Example_01/speech_only.wav"));
    }

    #[test]
    fn rejects_traversal_and_absolute_paths() {
        let temp_dir = fixture();
        let cfg = CatalogConfig::default();
        let base = temp_dir.path();

        assert!(is_not_found(resolve_audio_path(base, &cfg, "../../etc/passwd")));
        assert!(is_not_found(resolve_audio_path(base, &cfg, "Example_01/../private/secret.wav")));
        assert!(is_not_found(resolve_audio_path(base, &cfg, "/etc/passwd")));
        assert!(is_not_found(resolve_audio_path(base, &cfg, "./Example_01/speech_only.wav")));
    }

    #[test]
    fn rejects_unknown_folders_and_non_audio() {
        let temp_dir = fixture();
        let cfg = CatalogConfig::default();
        let base = temp_dir.path();

        assert!(is_not_found(resolve_audio_path(base, &cfg, "private/secret.wav")));
        assert!(is_not_found(resolve_audio_path(base, &cfg, "Example_01/notes.txt")));
        assert!(is_not_found(resolve_audio_path(base, &cfg, "Example_01")));
        assert!(is_not_found(resolve_audio_path(base, &cfg, "")));
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp_dir = fixture();
        let cfg = CatalogConfig::default();
        let base = temp_dir.path();

        assert!(is_not_found(resolve_audio_path(base, &cfg, "Example_99/missing.wav")));
        assert!(is_not_found(resolve_audio_path(base, &cfg, "Example_01/missing.wav")));
        assert!(is_not_found(resolve_audio_path(base, &cfg, "Example_02/noisy_input.wav")));
    }

    #[test]
    fn unresolvable_paths_are_not_found() {
        let temp_dir = fixture();
        let cfg = CatalogConfig::default();
        let base = temp_dir.path();

        // file used as a directory
        assert!(is_not_found(resolve_audio_path(base, &cfg, "Example_01/speech_only.wav/a.wav")));

        let long_name = format!("Example_01/{}.wav", "a".repeat(300));
        assert!(is_not_found(resolve_audio_path(base, &cfg, &long_name)));
    }

    #[test]
    fn missing_base_is_not_found() {
        let temp_dir = fixture();
        let cfg = CatalogConfig::default();
        let gone = temp_dir.path().join("gone");

        assert!(is_not_found(resolve_audio_path(&gone, &cfg, "Example_01/speech_only.wav")));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_out_of_base_is_not_found() {
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("leak.wav"), b"x").unwrap();

        let temp_dir = fixture();
        std::os::unix::fs::symlink(
            outside.path().join("leak.wav"),
            temp_dir.path().join("Example_01/leak.wav"),
        )
        .unwrap();

        let cfg = CatalogConfig::default();
        assert!(is_not_found(resolve_audio_path(temp_dir.path(), &cfg, "Example_01/leak.wav")));
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for(Path::new("a.wav")), "audio/wav");
        assert_eq!(content_type_for(Path::new("a.MP3")), "audio/mpeg");
        assert_eq!(content_type_for(Path::new("a.m4a")), "audio/mp4");
        assert_eq!(content_type_for(Path::new("a.bin")), "application/octet-stream");
    }
}
