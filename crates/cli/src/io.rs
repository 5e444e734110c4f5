//! Shared font I/O utilities.

use std::{
    fs::{File, create_dir_all, read, remove_file, rename, write},
    io::Read,
    path::{Path, PathBuf},
    process,
};

use anyhow::{Context, Result};
use glob::glob;
use log::debug;

/// A font file handle for I/O operations.
#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read font data from the file.
    pub fn read(&self) -> Result<Vec<u8>> {
        let data = read(&self.path)
            .with_context(|| format!("Failed to read font: {}", self.path.display()))?;
        debug!("Read {} bytes from {}", data.len(), self.path.display());
        Ok(data)
    }

    /// Read only the first four bytes, or fewer if the file is shorter.
    pub fn read_signature(&self) -> Result<Vec<u8>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open font: {}", self.path.display()))?;
        let mut signature = Vec::with_capacity(4);
        file.take(4)
            .read_to_end(&mut signature)
            .with_context(|| format!("Failed to read font: {}", self.path.display()))?;
        Ok(signature)
    }

    /// Write font data through a sibling temporary file and rename it into
    /// place, so the destination never holds a partial font.
    pub fn write_atomic(&self, data: impl AsRef<[u8]>) -> Result<()> {
        self.ensure_parent_dir()?;
        let temp = self.temp_sibling();
        let result = write(&temp, data)
            .with_context(|| format!("Failed to write font: {}", temp.display()))
            .and_then(|()| {
                rename(&temp, &self.path).with_context(|| {
                    format!(
                        "Failed to move {} to {}",
                        temp.display(),
                        self.path.display()
                    )
                })
            });
        if result.is_err() {
            let _ = remove_file(&temp);
        } else {
            debug!("Wrote {}", self.path.display());
        }
        result
    }

    /// Create parent directory if it doesn't exist.
    pub fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        Ok(())
    }

    fn temp_sibling(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".{}.tmp", process::id()));
        self.path.with_file_name(name)
    }
}

impl AsRef<Path> for FontFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Expand arguments that may be glob patterns into file paths.
///
/// Arguments without glob metacharacters are passed through unchanged, so a
/// missing file is reported by whoever opens it.
pub fn expand_paths<S: AsRef<str>>(args: &[S]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for arg in args {
        let arg = arg.as_ref();
        if arg.contains(['*', '?', '[']) {
            let matches = glob(arg).with_context(|| format!("Failed to glob pattern: {arg}"))?;
            paths.extend(matches.filter_map(Result::ok));
        } else {
            paths.push(PathBuf::from(arg));
        }
    }
    Ok(paths)
}

pub fn read_font(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    FontFile::new(path.as_ref()).read()
}

pub fn write_font_atomic(path: impl AsRef<Path>, data: impl AsRef<[u8]>) -> Result<()> {
    FontFile::new(path.as_ref()).write_atomic(data)
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("glyphkit_io_{name}_{}", process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_atomic_write_creates_parents_and_leaves_no_temp() {
        let dir = scratch("atomic");
        let file = FontFile::new(dir.join("nested/out.ttf"));
        file.write_atomic(b"OTTO....").unwrap();

        assert_eq!(fs::read(file.path()).unwrap(), b"OTTO....");
        let entries: Vec<_> = fs::read_dir(dir.join("nested")).unwrap().collect();
        assert_eq!(entries.len(), 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_signature_reads_at_most_four_bytes() {
        let dir = scratch("signature");
        fs::create_dir_all(&dir).unwrap();
        let long = dir.join("long.bin");
        let short = dir.join("short.bin");
        fs::write(&long, b"wOF2 and more").unwrap();
        fs::write(&short, b"wO").unwrap();

        assert_eq!(FontFile::new(&long).read_signature().unwrap(), b"wOF2");
        assert_eq!(FontFile::new(&short).read_signature().unwrap(), b"wO");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_literal_paths_pass_through() {
        let paths = expand_paths(&["does/not/exist.ttf"]).unwrap();
        assert_eq!(paths, [PathBuf::from("does/not/exist.ttf")]);
    }
}
