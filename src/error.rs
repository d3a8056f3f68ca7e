use std::fmt;

use thiserror::Error;

/// Why a record could not be placed in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathIssue {
    /// Record path was the empty string.
    EmptyPath,
    /// A leading, trailing, or doubled slash produced an empty segment.
    EmptySegment,
    /// The leaf name is already taken by a directory.
    FileOverDir,
    /// A parent segment is already taken by a file.
    DirOverFile,
    /// The exact leaf path was already inserted.
    Duplicate,
}

impl fmt::Display for PathIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            PathIssue::EmptyPath => "path is empty",
            PathIssue::EmptySegment => "path contains an empty segment",
            PathIssue::FileOverDir => "a directory with this name already exists",
            PathIssue::DirOverFile => "a parent segment is already a file",
            PathIssue::Duplicate => "this path was already inserted",
        };
        f.write_str(msg)
    }
}

/// A record the tree builder had to drop. First write wins; the build
/// itself never aborts over one of these.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot place '{path}' in the tree: {issue}")]
pub struct MalformedPath {
    pub path: String,
    pub issue: PathIssue,
}

/// Failure taxonomy of the engine. Every variant is scoped to the current
/// dataset or session; none is fatal to the process.
#[derive(Debug, Error)]
pub enum HeatError {
    #[error(transparent)]
    MalformedPath(#[from] MalformedPath),

    /// Dataset fetch failed. Terminal for the session, never retried here.
    #[error("dataset load failed: {0}")]
    Load(String),

    /// Zero records: a valid outcome, but nothing to show.
    #[error("dataset '{0}' contains no files")]
    EmptyDataset(String),

    #[error("unknown metric '{0}' (expected one of: changes, authors)")]
    UnknownMetric(String),

    /// A load is in flight; views and navigation are gated until it lands.
    #[error("a dataset load is still in flight")]
    LoadPending,

    #[error("no dataset loaded")]
    NoDataset,
}
