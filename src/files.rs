use std::{fs, path::Path};

use log::debug;

use crate::error::{Error, Result};

/// Read a whole text file, e.g. shader source.
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("read {} bytes from {}", contents.len(), path.display());
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    use crate::testing::write_file;

    #[test]
    fn reads_whole_file() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "shader.wgsl", "@vertex\nfn vertex_main() {}\n");
        assert_eq!(read_file(&path).unwrap(), "@vertex\nfn vertex_main() {}\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.wgsl");
        match read_file(&path) {
            Err(Error::ReadFile { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected a read error, got {:?}", other),
        }
    }

    #[test]
    fn error_message_names_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.wgsl");
        let message = read_file(&path).unwrap_err().to_string();
        assert!(message.starts_with("file reading error"));
        assert!(message.contains("nope.wgsl"));
    }
}
