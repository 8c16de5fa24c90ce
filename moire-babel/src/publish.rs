//! Publishing: rendering documents to files
//!
//!     Two entry points:
//!
//!     - [publish] renders one parsed document to one format, returning the text or writing it
//!       to a given path.
//!     - [build] is the batch driver. It finds every source under a root, parses each one once
//!       and renders it once per requested dialect to
//!       `<output root>/<dialect>/<relative path>.<extension>`.
//!
//!     Documents are independent: they are processed in parallel, and a failure (unreadable
//!     source, parse error, render error, unwritable destination) is recorded in the
//!     [BuildReport] without stopping the others. Outputs are written to a temporary file in the
//!     destination directory and renamed into place, so a failed render never leaves a partial
//!     file behind.

use crate::error::{FormatError, PublishError};
use crate::registry::{FormatRegistry, DEFAULT_FORMATS};
use moire_parser::{parse_document, Document};
use rayon::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default extension of moire sources
pub const SOURCE_EXTENSION: &str = "moi";

#[derive(Debug)]
pub struct PublishSpec<'a> {
    pub document: &'a Document,
    pub format: &'a str,
    pub output: Option<PathBuf>,
}

impl<'a> PublishSpec<'a> {
    pub fn new(document: &'a Document, format: &'a str) -> Self {
        Self {
            document,
            format,
            output: None,
        }
    }

    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    InMemory(String),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub artifact: PublishArtifact,
}

/// Render one document with the built-in formats
pub fn publish(spec: PublishSpec<'_>) -> Result<PublishResult, FormatError> {
    publish_with(&FormatRegistry::with_defaults(), spec)
}

/// Render one document with the formats of `registry`
pub fn publish_with(
    registry: &FormatRegistry,
    spec: PublishSpec<'_>,
) -> Result<PublishResult, FormatError> {
    let text = registry.serialize(spec.document, spec.format)?;
    match spec.output {
        Some(path) => {
            write_atomic(&path, &text)?;
            log::info!("wrote {}", path.display());
            Ok(PublishResult {
                artifact: PublishArtifact::File(path),
            })
        }
        None => Ok(PublishResult {
            artifact: PublishArtifact::InMemory(text),
        }),
    }
}

/// What a batch build should do
#[derive(Debug, Clone)]
pub struct BuildSpec {
    pub source_root: PathBuf,
    pub output_root: PathBuf,
    /// Format names; each gets its own subdirectory of the output root
    pub dialects: Vec<String>,
    /// Extension of source files, without the dot
    pub extension: String,
    /// Worker threads; 0 lets rayon decide
    pub jobs: usize,
}

impl BuildSpec {
    pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
            dialects: DEFAULT_FORMATS.iter().map(|name| name.to_string()).collect(),
            extension: SOURCE_EXTENSION.to_string(),
            jobs: 0,
        }
    }

    pub fn with_dialects<I, S>(mut self, dialects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dialects = dialects.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }
}

/// Outcome of a batch build
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Number of source documents found
    pub documents: usize,
    /// Every file written, sorted
    pub written: Vec<PathBuf>,
    /// Every failure, sorted by source path
    pub failures: Vec<PublishError>,
}

impl BuildReport {
    pub fn succeeded(&self) -> usize {
        self.written.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Render every source under `spec.source_root` in every requested dialect
///
/// Returns `Err` only for problems that prevent the build from starting: an unknown dialect, a
/// missing source root or a thread pool that cannot be created. Everything else is reported per
/// document in the [BuildReport].
pub fn build(spec: &BuildSpec, registry: &FormatRegistry) -> Result<BuildReport, PublishError> {
    for dialect in &spec.dialects {
        if !registry.has(dialect) {
            return Err(PublishError::UnknownDialect(dialect.clone()));
        }
    }

    let sources = discover_sources(&spec.source_root, &spec.extension)?;
    log::info!(
        "building {} document(s) from {} into {}",
        sources.len(),
        spec.source_root.display(),
        spec.output_root.display()
    );

    let run = || -> Vec<Result<PathBuf, PublishError>> {
        sources
            .par_iter()
            .flat_map_iter(|source| build_document(source, spec, registry))
            .collect()
    };
    let outcomes = if spec.jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(spec.jobs)
            .build()
            .map_err(|err| PublishError::Io {
                path: spec.source_root.clone(),
                source: io::Error::new(io::ErrorKind::Other, err),
            })?
            .install(run)
    } else {
        run()
    };

    let mut report = BuildReport {
        documents: sources.len(),
        ..BuildReport::default()
    };
    for outcome in outcomes {
        match outcome {
            Ok(path) => report.written.push(path),
            Err(err) => report.failures.push(err),
        }
    }
    report.written.sort();
    report
        .failures
        .sort_by(|a, b| a.path().cmp(&b.path()).then_with(|| a.to_string().cmp(&b.to_string())));

    log::info!(
        "{} output(s) written, {} failure(s)",
        report.succeeded(),
        report.failed()
    );
    Ok(report)
}

/// Every file under `root` with `extension`, sorted
pub fn discover_sources(root: &Path, extension: &str) -> Result<Vec<PathBuf>, PublishError> {
    if !root.is_dir() {
        return Err(PublishError::Io {
            path: root.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "source root is not a directory"),
        });
    }

    let mut sources = Vec::new();
    for entry in ignore::WalkBuilder::new(root).standard_filters(false).build() {
        let entry = entry.map_err(|err| PublishError::Io {
            path: root.to_path_buf(),
            source: err
                .into_io_error()
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "walk failed")),
        })?;
        let path = entry.path();
        let is_file = entry.file_type().map_or(false, |kind| kind.is_file());
        if is_file && path.extension().map_or(false, |ext| ext == extension) {
            sources.push(path.to_path_buf());
        }
    }

    sources.sort();
    log::debug!("found {} source(s) under {}", sources.len(), root.display());
    Ok(sources)
}

/// Where the `dialect` rendering of `source` goes
pub fn output_path(spec: &BuildSpec, source: &Path, dialect: &str, extension: &str) -> PathBuf {
    let relative = pathdiff::diff_paths(source, &spec.source_root)
        .unwrap_or_else(|| source.file_name().map(PathBuf::from).unwrap_or_default());
    spec.output_root
        .join(dialect)
        .join(relative)
        .with_extension(extension)
}

/// Read, parse and render one source; one outcome per dialect, or one failure if the source
/// could not be read or parsed
fn build_document(
    source: &Path,
    spec: &BuildSpec,
    registry: &FormatRegistry,
) -> Vec<Result<PathBuf, PublishError>> {
    let text = match fs::read_to_string(source) {
        Ok(text) => text,
        Err(err) => {
            log::warn!("cannot read {}: {}", source.display(), err);
            return vec![Err(PublishError::Io {
                path: source.to_path_buf(),
                source: err,
            })];
        }
    };

    let document = match parse_document(&text) {
        Ok(document) => document,
        Err(error) => {
            log::warn!("{}:{}", source.display(), error);
            return vec![Err(PublishError::Parse {
                path: source.to_path_buf(),
                error,
            })];
        }
    };

    spec.dialects
        .par_iter()
        .map(|dialect| render_document(&document, source, dialect, spec, registry))
        .collect()
}

fn render_document(
    document: &Document,
    source: &Path,
    dialect: &str,
    spec: &BuildSpec,
    registry: &FormatRegistry,
) -> Result<PathBuf, PublishError> {
    let render_error = |error: FormatError| PublishError::Render {
        path: source.to_path_buf(),
        dialect: dialect.to_string(),
        error,
    };

    let format = registry.get(dialect).map_err(render_error)?;
    let text = format.serialize(document).map_err(render_error)?;

    let target = output_path(spec, source, dialect, format.file_extension());
    write_atomic(&target, &text).map_err(|err| PublishError::Io {
        path: target.clone(),
        source: err,
    })?;
    log::info!("wrote {}", target.display());
    Ok(target)
}

/// Write `contents` to `path` through a temporary file in the same directory
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(contents.as_bytes())?;
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
