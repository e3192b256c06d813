use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::ImtDigest;

#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("I/O error in {1}: {0}")]
    Io(io::Error, PathBuf),
}

/// Write `digest`, as a hex string, to the file in `destination`.
///
/// The file is created if it does not exist, and truncated if it does.
/// No newline is added after the digest.
pub fn save(destination: &Path, digest: &ImtDigest) -> Result<(), SinkError> {
    fs::write(destination, digest.to_hex()).map_err(|e| SinkError::Io(e, destination.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_hex_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("digest");

        // Previous contents are replaced.
        fs::write(&path, "previous contents, longer than a digest").unwrap();

        save(&path, &crate::digest(b"A")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "824bbe00cdc3552d");
    }

    #[test]
    fn missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/digest");

        let err = save(&path, &ImtDigest::default()).unwrap_err();
        let SinkError::Io(e, err_path) = err;

        assert_eq!(e.kind(), io::ErrorKind::NotFound);
        assert_eq!(err_path, path);
    }
}
