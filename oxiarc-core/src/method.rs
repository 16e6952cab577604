//! ZIP compression method identifiers.
//!
//! The numeric ids and "version needed to extract" values come from the
//! PKWARE APPNOTE. Versions are encoded as `major * 10 + minor`.

/// Compression method of an archive member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompressionMethod {
    /// No compression (stored).
    #[default]
    Stored,
    /// DEFLATE compression (32 KB window).
    Deflate,
    /// DEFLATE64 ("enhanced deflate", 64 KB window).
    Deflate64,
    /// Unknown/unsupported method.
    Unknown(u16),
}

impl CompressionMethod {
    /// Create from the numeric id stored in ZIP headers.
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => Self::Stored,
            8 => Self::Deflate,
            9 => Self::Deflate64,
            other => Self::Unknown(other),
        }
    }

    /// The numeric id stored in ZIP headers.
    pub fn id(&self) -> u16 {
        match self {
            Self::Stored => 0,
            Self::Deflate => 8,
            Self::Deflate64 => 9,
            Self::Unknown(id) => *id,
        }
    }

    /// Minimum "version needed to extract" for members using this method.
    pub fn version_needed(&self) -> u16 {
        match self {
            Self::Stored | Self::Unknown(_) => 10,
            Self::Deflate => 20,
            Self::Deflate64 => 21,
        }
    }

    /// Check if this method is "stored" (no compression).
    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored)
    }

    /// Get the method name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::Deflate => "deflate",
            Self::Deflate64 => "deflate64",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<u16> for CompressionMethod {
    fn from(value: u16) -> Self {
        Self::from_u16(value)
    }
}

impl std::fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(id) => write!(f, "unknown({})", id),
            _ => write!(f, "{}", self.name()),
        }
    }
}
