use crate::config::MIN_BUFFER_SIZE;
use crate::error::{DirectoryRole, ExtractError, Result};
use crate::extractor::status::{ExtractionSummary, FinalStatus};
use crate::scanner::{ExtensionFilter, TreeWalker};
use std::fs;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorState {
    /// Arguments validated, nothing copied yet.
    Ready,
    Traversing,
    Done,
    /// A file could not be copied; the run stopped there.
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCopy {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Copies every file below `source_dir` whose first-dot suffix equals the
/// configured extension into the flat `destination_dir`.
///
/// Existing files in the destination are overwritten without warning, and
/// files sharing a name in different subdirectories overwrite each other;
/// the last one visited wins.
#[derive(Debug)]
pub struct FileExtractor {
    filter: ExtensionFilter,
    source_dir: PathBuf,
    destination_dir: PathBuf,
    buffer_size: usize,
    files_copied: usize,
    bytes_copied: u64,
    state: ExtractorState,
    elapsed: Duration,
}

impl FileExtractor {
    /// Validates the arguments without touching any file.
    pub fn new<S, P, Q>(extension: S, source_dir: P, destination_dir: Q) -> Result<Self>
    where
        S: Into<String>,
        P: Into<PathBuf>,
        Q: Into<PathBuf>,
    {
        let filter = ExtensionFilter::new(extension)?;
        let source_dir = source_dir.into();
        let destination_dir = destination_dir.into();

        ensure_directory(&source_dir, DirectoryRole::Source)?;
        ensure_directory(&destination_dir, DirectoryRole::Destination)?;

        Ok(Self {
            filter,
            source_dir,
            destination_dir,
            buffer_size: 64 * 1024,
            files_copied: 0,
            bytes_copied: 0,
            state: ExtractorState::Ready,
            elapsed: Duration::ZERO,
        })
    }

    /// Validates and immediately runs the whole copy pass.
    pub fn extract<S, P, Q>(extension: S, source_dir: P, destination_dir: Q) -> Result<Self>
    where
        S: Into<String>,
        P: Into<PathBuf>,
        Q: Into<PathBuf>,
    {
        let mut extractor = Self::new(extension, source_dir, destination_dir)?;
        extractor.run()?;
        Ok(extractor)
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(MIN_BUFFER_SIZE);
        self
    }

    /// Walks the source tree and copies every matching file. Stops at the
    /// first failure; files copied before it stay in place and stay counted.
    pub fn run(&mut self) -> Result<usize> {
        if self.state != ExtractorState::Ready {
            return Err(ExtractError::AlreadyRun);
        }

        info!(
            extension = self.filter.extension(),
            source = %self.source_dir.display(),
            destination = %self.destination_dir.display(),
            "starting extraction"
        );

        self.state = ExtractorState::Traversing;
        let start = Instant::now();
        let result = self.copy_matching_files();
        self.elapsed = start.elapsed();

        match result {
            Ok(()) => {
                self.state = ExtractorState::Done;
                info!(
                    files = self.files_copied,
                    bytes = self.bytes_copied,
                    "extraction finished"
                );
                Ok(self.files_copied)
            }
            Err(e) => {
                self.state = ExtractorState::Aborted;
                error!(files = self.files_copied, error = %e, "extraction aborted");
                Err(e)
            }
        }
    }

    /// Lists the copies `run` would perform, without writing anything.
    pub fn plan(&self) -> Result<Vec<PlannedCopy>> {
        let destination_root = canonical_or_self(&self.destination_dir);
        let mut planned = Vec::new();

        for entry in TreeWalker::new(&self.source_dir) {
            let source = entry?;
            if !self.filter.matches(&source) || is_directly_in(&source, &destination_root) {
                continue;
            }

            let destination = self.destination_path(&source)?;
            planned.push(PlannedCopy {
                source,
                destination,
            });
        }

        Ok(planned)
    }

    pub fn files_copied(&self) -> usize {
        self.files_copied
    }

    pub fn bytes_copied(&self) -> u64 {
        self.bytes_copied
    }

    pub fn state(&self) -> ExtractorState {
        self.state
    }

    pub fn final_status(&self) -> FinalStatus {
        FinalStatus::from_count(self.files_copied)
    }

    pub fn summary(&self) -> ExtractionSummary {
        ExtractionSummary {
            extension: self.filter.extension().to_string(),
            files_copied: self.files_copied,
            bytes_copied: self.bytes_copied,
            duration: self.elapsed,
            completed_at: chrono::Utc::now(),
        }
    }

    fn copy_matching_files(&mut self) -> Result<()> {
        let destination_root = canonical_or_self(&self.destination_dir);

        for entry in TreeWalker::new(&self.source_dir) {
            let source = entry?;

            if !self.filter.matches(&source) {
                trace!(path = %source.display(), "skipping");
                continue;
            }

            // The destination may live inside the source tree. Its own files
            // are output, not input: copying one onto itself would truncate it.
            if is_directly_in(&source, &destination_root) {
                info!(path = %source.display(), "skipping file already in destination");
                continue;
            }

            let destination = self.destination_path(&source)?;
            let bytes = self.copy_file(&source, &destination)?;

            self.files_copied += 1;
            self.bytes_copied += bytes;
            debug!(
                source = %source.display(),
                destination = %destination.display(),
                bytes,
                "copied"
            );
        }

        Ok(())
    }

    fn destination_path(&self, source: &Path) -> Result<PathBuf> {
        let file_name = source.file_name().ok_or_else(|| ExtractError::UnsupportedEntry {
            path: source.to_path_buf(),
        })?;
        Ok(self.destination_dir.join(file_name))
    }

    fn copy_file(&self, source: &Path, destination: &Path) -> Result<u64> {
        let mut reader = fs::File::open(source).map_err(|e| ExtractError::io(source, e))?;
        let dest_file =
            fs::File::create(destination).map_err(|e| ExtractError::io(destination, e))?;
        let mut writer = BufWriter::with_capacity(self.buffer_size, dest_file);

        let mut total_bytes = 0u64;
        let mut buffer = vec![0u8; self.buffer_size];

        loop {
            let bytes_read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ExtractError::io(source, e)),
            };

            writer
                .write_all(&buffer[..bytes_read])
                .map_err(|e| ExtractError::io(destination, e))?;

            total_bytes += bytes_read as u64;
        }

        let dest_file = writer
            .into_inner()
            .map_err(|e| ExtractError::io(destination, e.into_error()))?;
        dest_file
            .sync_all()
            .map_err(|e| ExtractError::io(destination, e))?;

        Ok(total_bytes)
    }
}

fn ensure_directory(path: &Path, role: DirectoryRole) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ExtractError::InvalidDirectory {
            role,
            path: path.to_path_buf(),
        })
    }
}

fn is_directly_in(path: &Path, canonical_dir: &Path) -> bool {
    path.parent()
        .is_some_and(|parent| canonical_or_self(parent) == canonical_dir)
}

fn canonical_or_self(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
