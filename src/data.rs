// Scriptures MCP Data Sources
// Locates raw scripture documents and feeds them to the corpus loader

use crate::corpus::Corpus;
use crate::types::ScriptureError;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::ZipArchive;

/// Environment variable naming a data directory override
pub const DATA_DIR_ENV: &str = "SCRIPTURES_DATA_DIR";

/// Scripture documents shipped with the project, in load order
pub const CORPUS_FILES: [&str; 5] = [
    "book-of-mormon.json",
    "doctrine-and-covenants.json",
    "pearl-of-great-price.json",
    "old-testament.json",
    "new-testament.json",
];

/// Archive file looked for in each data directory
pub const ARCHIVE_FILE: &str = "scriptures.zip";

/// Embedded scripture archive, preferred over the loose embedded documents
#[cfg(embedded_archive)]
pub const EMBEDDED_ARCHIVE: Option<&[u8]> = Some(include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/data/scriptures.zip"
)));

#[cfg(not(embedded_archive))]
pub const EMBEDDED_ARCHIVE: Option<&[u8]> = None;

/// Embedded scripture documents (label, JSON bytes)
///
/// Present only with the `embedded-corpus` feature and when every file
/// exists under `data/` at build time.
#[cfg(embedded_documents)]
pub const EMBEDDED_DOCUMENTS: &[(&str, &[u8])] = &[
    (
        "book-of-mormon.json",
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/book-of-mormon.json")),
    ),
    (
        "doctrine-and-covenants.json",
        include_bytes!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/data/doctrine-and-covenants.json"
        )),
    ),
    (
        "pearl-of-great-price.json",
        include_bytes!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/data/pearl-of-great-price.json"
        )),
    ),
    (
        "old-testament.json",
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/old-testament.json")),
    ),
    (
        "new-testament.json",
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/new-testament.json")),
    ),
];

#[cfg(not(embedded_documents))]
pub const EMBEDDED_DOCUMENTS: &[(&str, &[u8])] = &[];

/// A labeled raw document
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// File name, used to derive the collection
    pub label: String,
    pub bytes: Vec<u8>,
}

/// One place scripture documents can come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    /// Every `*.json` entry in a zip archive
    Archive(PathBuf),

    /// Every `*.json` file in a directory
    Directory(PathBuf),

    /// Documents compiled into the binary
    Embedded,
}

impl CorpusSource {
    /// Read this source's documents
    ///
    /// Unreadable files are logged and skipped; a missing directory or an
    /// archive that cannot be opened yields no documents.
    pub fn documents(&self) -> Vec<RawDocument> {
        match self {
            CorpusSource::Archive(path) => read_archive_file(path),
            CorpusSource::Directory(dir) => read_directory(dir),
            CorpusSource::Embedded => embedded_documents(),
        }
    }

    /// Load a corpus from this source alone
    pub fn load(&self) -> Corpus {
        Corpus::from_documents(
            self.documents()
                .into_iter()
                .map(|doc| (doc.label, doc.bytes)),
        )
    }
}

impl std::fmt::Display for CorpusSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorpusSource::Archive(path) => write!(f, "archive {}", path.display()),
            CorpusSource::Directory(dir) => write!(f, "directory {}", dir.display()),
            CorpusSource::Embedded => write!(f, "embedded data"),
        }
    }
}

/// Sources in priority order
///
/// 1. The data directory override, if given
/// 2. Embedded documents
/// 3. A `data` directory next to the executable
///
/// Each directory contributes its `scriptures.zip` ahead of its loose
/// `*.json` files, so a broken or absent archive falls through to them.
pub fn default_sources(data_dir: Option<PathBuf>) -> Vec<CorpusSource> {
    let mut sources = Vec::new();

    if let Some(dir) = data_dir {
        push_directory(&mut sources, dir);
    }

    sources.push(CorpusSource::Embedded);

    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("data")))
    {
        push_directory(&mut sources, dir);
    }

    sources
}

fn push_directory(sources: &mut Vec<CorpusSource>, dir: PathBuf) {
    sources.push(CorpusSource::Archive(dir.join(ARCHIVE_FILE)));
    sources.push(CorpusSource::Directory(dir));
}

/// Load from the first source that yields a non-empty corpus
///
/// Returns an empty corpus if every source comes up empty; the caller
/// decides how to report that.
pub fn load_corpus(sources: &[CorpusSource]) -> Corpus {
    for source in sources {
        let corpus = source.load();
        if !corpus.is_empty() {
            info!(source = %source, verses = corpus.verse_count(), "using scripture source");
            return corpus;
        }
        warn!(source = %source, "no scripture data loaded; trying next source");
    }

    Corpus::new()
}

/// Read the `*.json` entries of a zip archive held in memory
///
/// Entries keep their archive order and are labeled with their entry name.
/// Directories and other files are skipped, as are entries that fail to
/// decompress. Only an archive that cannot be opened at all is an error.
pub fn read_archive(label: &str, bytes: &[u8]) -> Result<Vec<RawDocument>, ScriptureError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|source| ScriptureError::Archive {
            label: label.to_string(),
            source,
        })?;

    let mut documents = Vec::new();
    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(archive = label, index, "could not open archive entry: {}", e);
                continue;
            }
        };
        if entry.is_dir() || !entry.name().ends_with(".json") {
            continue;
        }

        let name = entry.name().to_string();
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        match entry.read_to_end(&mut bytes) {
            Ok(_) => documents.push(RawDocument { label: name, bytes }),
            Err(e) => warn!(archive = label, entry = %name, "could not read archive entry: {}", e),
        }
    }

    Ok(documents)
}

fn read_archive_file(path: &Path) -> Vec<RawDocument> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %path.display(), "cannot read scripture archive: {}", e);
            return Vec::new();
        }
    };

    read_archive(&path.display().to_string(), &bytes).unwrap_or_else(|e| {
        warn!("{}", e);
        Vec::new()
    })
}

/// The embedded archive if it opens and holds documents, else the loose
/// embedded documents
fn embedded_documents() -> Vec<RawDocument> {
    if let Some(bytes) = EMBEDDED_ARCHIVE {
        match read_archive("embedded scriptures.zip", bytes) {
            Ok(documents) if !documents.is_empty() => return documents,
            Ok(_) => warn!("embedded archive holds no documents; using embedded files"),
            Err(e) => warn!("{}; using embedded files", e),
        }
    }

    EMBEDDED_DOCUMENTS
        .iter()
        .map(|(label, bytes)| RawDocument {
            label: label.to_string(),
            bytes: bytes.to_vec(),
        })
        .collect()
}

/// Read every `*.json` file in a directory, sorted by file name
fn read_directory(dir: &Path) -> Vec<RawDocument> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), "cannot read data directory: {}", e);
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    paths
        .into_iter()
        .filter_map(|path| {
            let label = path.file_name()?.to_string_lossy().into_owned();
            match std::fs::read(&path) {
                Ok(bytes) => Some(RawDocument { label, bytes }),
                Err(e) => {
                    warn!(path = %path.display(), "could not read scripture file: {}", e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    const NT: &str = r#"{"books": [{"book": "John", "chapters": [{"chapter": 3, "verses": [
        {"verse": 16, "text": "For God so loved the world", "reference": "John 3:16"}]}]}]}"#;

    const OT: &str = r#"{"books": [{"book": "Psalms", "chapters": [{"chapter": 23, "verses": [
        {"verse": 1, "text": "The Lord is my shepherd", "reference": "Psalms 23:1"}]}]}]}"#;

    fn write_archive(path: &Path, entries: &[(&str, &str)]) {
        let mut zip = ZipWriter::new(std::fs::File::create(path).unwrap());
        zip.add_directory("nested/", SimpleFileOptions::default()).unwrap();
        for (i, (name, body)) in entries.iter().enumerate() {
            let method = if i % 2 == 0 {
                CompressionMethod::Stored
            } else {
                CompressionMethod::Deflated
            };
            let options = SimpleFileOptions::default().compression_method(method);
            zip.start_file(*name, options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("new-testament.json"), NT).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let source = CorpusSource::Directory(dir.path().to_path_buf());
        let docs = source.documents();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].label, "new-testament.json");

        let corpus = source.load();
        assert_eq!(corpus.collection_names(), vec!["New Testament"]);
    }

    #[test]
    fn test_missing_directory() {
        let source = CorpusSource::Directory(PathBuf::from("/nonexistent/scriptures"));
        assert!(source.documents().is_empty());
        assert!(source.load().is_empty());
    }

    #[test]
    fn test_first_non_empty_source_wins() {
        let empty = tempfile::tempdir().unwrap();
        let full = tempfile::tempdir().unwrap();
        std::fs::write(full.path().join("new-testament.json"), NT).unwrap();

        let sources = vec![
            CorpusSource::Directory(empty.path().to_path_buf()),
            CorpusSource::Directory(full.path().to_path_buf()),
        ];
        let corpus = load_corpus(&sources);
        assert_eq!(corpus.verse_count(), 1);
    }

    #[test]
    fn test_all_sources_empty() {
        let empty = tempfile::tempdir().unwrap();
        let corpus = load_corpus(&[CorpusSource::Directory(empty.path().to_path_buf())]);
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_archive_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ARCHIVE_FILE);
        write_archive(
            &path,
            &[
                ("old-testament.json", OT),
                ("README.txt", "ignored"),
                ("new-testament.json", NT),
            ],
        );

        let source = CorpusSource::Archive(path);
        let labels: Vec<String> = source.documents().into_iter().map(|d| d.label).collect();
        assert_eq!(labels, vec!["old-testament.json", "new-testament.json"]);

        let corpus = source.load();
        assert_eq!(corpus.collection_names(), vec!["New Testament", "Old Testament"]);
        assert_eq!(corpus.verse_count(), 2);
    }

    #[test]
    fn test_archive_preferred_over_loose_files() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(&dir.path().join(ARCHIVE_FILE), &[("new-testament.json", NT)]);
        std::fs::write(dir.path().join("old-testament.json"), OT).unwrap();

        let mut sources = Vec::new();
        push_directory(&mut sources, dir.path().to_path_buf());
        let corpus = load_corpus(&sources);
        assert_eq!(corpus.collection_names(), vec!["New Testament"]);
    }

    #[test]
    fn test_corrupt_archive_falls_back_to_loose_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ARCHIVE_FILE), "not a zip archive").unwrap();
        std::fs::write(dir.path().join("old-testament.json"), OT).unwrap();

        let err = read_archive("scriptures.zip", b"not a zip archive").unwrap_err();
        assert!(matches!(err, ScriptureError::Archive { .. }));
        assert!(CorpusSource::Archive(dir.path().join(ARCHIVE_FILE))
            .documents()
            .is_empty());

        let mut sources = Vec::new();
        push_directory(&mut sources, dir.path().to_path_buf());
        let corpus = load_corpus(&sources);
        assert_eq!(corpus.collection_names(), vec!["Old Testament"]);
    }

    #[test]
    fn test_missing_archive() {
        let source = CorpusSource::Archive(PathBuf::from("/nonexistent/scriptures.zip"));
        assert!(source.documents().is_empty());
    }

    #[test]
    fn test_default_sources_order() {
        let sources = default_sources(Some(PathBuf::from("/override")));
        assert_eq!(
            sources[0],
            CorpusSource::Archive(PathBuf::from("/override/scriptures.zip"))
        );
        assert_eq!(sources[1], CorpusSource::Directory(PathBuf::from("/override")));
        assert_eq!(sources[2], CorpusSource::Embedded);

        let sources = default_sources(None);
        assert_eq!(sources[0], CorpusSource::Embedded);
        assert!(matches!(sources[1], CorpusSource::Archive(_)));
        assert!(matches!(sources[2], CorpusSource::Directory(_)));
    }

    #[test]
    fn test_corpus_file_names_map_to_collections() {
        for file in CORPUS_FILES {
            assert_ne!(
                crate::corpus::collection_for_label(file),
                crate::corpus::UNKNOWN_COLLECTION
            );
        }
    }
}
