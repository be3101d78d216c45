//! JSON file and directory utilities.

use std::ffi::OsStr;
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{from_reader, to_writer_pretty};
use tracing::trace;

/// Reads a JSON-encoded type from a given file `path`.
pub fn read_json<D: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<D> {
    let path = path.as_ref();
    trace!("reading {}", path.display());
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    from_reader(BufReader::new(file)).with_context(|| format!("cannot parse {}", path.display()))
}

/// JSON-encodes the `value` in pretty-printed form and writes it to a given `path`.
pub fn write_json(path: impl AsRef<Path>, value: &impl Serialize) -> anyhow::Result<()> {
    let path = path.as_ref();
    trace!("writing {}", path.display());
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("cannot write {}", path.display()))
}

pub trait ReadJsonFile<D> {
    fn read_json_file(path: impl AsRef<Path>) -> anyhow::Result<D>;
}

impl<D: DeserializeOwned> ReadJsonFile<D> for D {
    fn read_json_file(path: impl AsRef<Path>) -> anyhow::Result<D> {
        read_json(path)
    }
}

/// Recursively locates all files under `path` whose extension satisfies `extension_filter`,
/// appending them to `files` in sorted order. A `path` naming a matching file is added as-is.
pub fn recurse_dir(
    path: PathBuf,
    files: &mut Vec<PathBuf>,
    extension_filter: &mut impl FnMut(&OsStr) -> bool,
) -> anyhow::Result<()> {
    let md = fs::metadata(&path).with_context(|| format!("cannot stat {}", path.display()))?;
    if md.is_dir() {
        let mut entries = fs::read_dir(&path)?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort();
        for entry in entries {
            recurse_dir(entry, files, extension_filter)?;
        }
    } else if extension_filter(path.extension().unwrap_or_default()) {
        trace!("found {}", path.display());
        files.push(path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::env;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        line: Option<f64>,
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("fairline-file-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn write_then_read() {
        let dir = scratch_dir("rw");
        let path = dir.join("sample.json");
        let sample = Sample {
            name: "Over".into(),
            line: Some(47.5),
        };
        write_json(&path, &sample).unwrap();
        assert_eq!(sample, Sample::read_json_file(&path).unwrap());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn read_missing_file() {
        let err = read_json::<Sample>("/nonexistent/fairline.json").unwrap_err();
        assert_eq!("cannot open /nonexistent/fairline.json", err.to_string());
    }

    #[test]
    fn recurse_filters_by_extension() {
        let dir = scratch_dir("recurse");
        fs::create_dir_all(dir.join("nested")).unwrap();
        for name in ["b.json", "a.json", "notes.txt", "nested/c.json"] {
            fs::write(dir.join(name), "{}").unwrap();
        }
        let mut files = vec![];
        recurse_dir(dir.clone(), &mut files, &mut |ext| ext == "json").unwrap();
        let names = files
            .iter()
            .map(|file| file.strip_prefix(&dir).unwrap().to_str().unwrap().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(vec!["a.json", "b.json", "nested/c.json"], names);
        fs::remove_dir_all(dir).unwrap();
    }
}
