//! Errors raised while loading geometry and material sources.

use std::{fmt, io};

use thiserror::Error;

/// Attribute pool a face corner indexes into.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AttributePool {
    Position,
    Texcoord,
    Normal,
}

impl fmt::Display for AttributePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributePool::Position => "position",
            AttributePool::Texcoord => "texcoord",
            AttributePool::Normal => "normal",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be opened or a read failed mid-stream.
    #[error("Failed to read source '{source_name}': {source}")]
    SourceUnavailable {
        source_name: String,
        #[source]
        source: io::Error,
    },

    /// A face record that is not exactly three `p/t/n` corners.
    #[error("Malformed face on line {line}: expected 9 indices across 3 corners, found {found}")]
    MalformedFace { line: usize, found: usize },

    /// Missing or unparsable operands on any other record.
    #[error("Malformed '{directive}' on line {line}: {reason}")]
    MalformedDirective {
        line: usize,
        directive: String,
        reason: String,
    },

    /// Material segment starting before its predecessor or past the last triangle.
    #[error("Material segment {segment} ('{material}') starts at triangle {start}: {reason}")]
    InvalidSegment {
        segment: usize,
        material: String,
        start: usize,
        reason: String,
    },

    /// 1-based index that is 0 or past the end of its pool.
    #[error("Corner {corner} references {pool} index {index}, but the pool holds {len} entries")]
    IndexOutOfRange {
        corner: usize,
        pool: AttributePool,
        index: u32,
        len: usize,
    },
}

impl LoadError {
    pub fn unavailable(source_name: impl Into<String>, source: io::Error) -> Self {
        LoadError::SourceUnavailable {
            source_name: source_name.into(),
            source,
        }
    }

    pub fn directive(line: usize, directive: &str, reason: impl Into<String>) -> Self {
        LoadError::MalformedDirective {
            line,
            directive: directive.to_owned(),
            reason: reason.into(),
        }
    }
}

pub type LoadResult<T> = Result<T, LoadError>;
