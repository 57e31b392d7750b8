//! Discovery of locale directories and their source files.

use std::{
    ffi::OsStr,
    fs::{self, ReadDir},
    io,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::error::Error;

/// A source file found inside a locale directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFile {
    /// Name of the locale directory, used verbatim for the output directory.
    pub locale: String,
    pub path: PathBuf,
}

/// Lazy, single-pass scan over the children of an input root.
///
/// Yields one [`LocaleFile`] per locale directory that contains the source
/// file. Directories that cannot be listed are yielded as
/// [`Error::LocaleList`]; a failure to read the root itself is yielded as
/// [`Error::InputRoot`].
#[derive(Debug)]
pub struct LocaleScan {
    root: PathBuf,
    entries: ReadDir,
    marker: String,
    source_filename: String,
}

/// Starts scanning `input_root`.
///
/// Fails with [`Error::InputRoot`] when the root does not exist or is not a
/// listable directory.
pub fn scan_locales(
    input_root: &Path,
    marker: &str,
    source_filename: &str,
) -> Result<LocaleScan, Error> {
    let entries = fs::read_dir(input_root).map_err(|source| Error::InputRoot {
        path: input_root.to_path_buf(),
        source,
    })?;
    Ok(LocaleScan {
        root: input_root.to_path_buf(),
        entries,
        marker: marker.to_string(),
        source_filename: source_filename.to_string(),
    })
}

impl Iterator for LocaleScan {
    type Item = Result<LocaleFile, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(source) => {
                    return Some(Err(Error::InputRoot {
                        path: self.root.clone(),
                        source,
                    }));
                }
            };

            let dir = entry.path();
            let Some(locale) = entry.file_name().to_str().map(str::to_string) else {
                warn!("skipping `{}`: name is not valid UTF-8", dir.display());
                continue;
            };
            // Substring, not prefix: `night-values` and `values-es` both match.
            if !locale.contains(&self.marker) {
                debug!("ignoring `{locale}`: not a locale directory");
                continue;
            }

            match find_file(&dir, &self.source_filename) {
                Ok(Some(path)) => return Some(Ok(LocaleFile { locale, path })),
                Ok(None) => {
                    debug!("`{locale}` has no `{}`", self.source_filename);
                }
                Err(source) => {
                    return Some(Err(Error::LocaleList {
                        locale,
                        path: dir,
                        source,
                    }));
                }
            }
        }
    }
}

// Exact, case-sensitive lookup among the immediate children of `dir`.
fn find_file(dir: &Path, name: &str) -> io::Result<Option<PathBuf>> {
    for child in fs::read_dir(dir)? {
        let child = child?;
        if child.file_name() == OsStr::new(name) {
            return Ok(Some(child.path()));
        }
    }
    Ok(None)
}
