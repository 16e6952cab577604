//! ZIP compression method registry.
//!
//! A [`MethodRegistry`] maps the method id found in a member's headers to a
//! decoder factory. The registry is built once by the host and then only
//! read; each member gets its own decoder from [`MethodRegistry::decoder`].

use log::debug;
use oxiarc_core::error::{OxiArcError, Result};
use oxiarc_core::method::CompressionMethod;
use oxiarc_core::traits::StreamDecoder;
use oxiarc_deflate64::Deflate64Decoder;
use std::collections::BTreeMap;

/// Creates a fresh decoder for one member.
pub type DecoderFactory = fn() -> Box<dyn StreamDecoder>;

/// A compression method a ZIP reader can decode.
#[derive(Debug, Clone, Copy)]
pub struct MethodSpec {
    /// Method id and name.
    pub method: CompressionMethod,
    /// Minimum "version needed to extract" for members using it.
    pub version_needed: u16,
    /// Decoder factory.
    pub factory: DecoderFactory,
}

impl MethodSpec {
    /// Method 0: data stored as is.
    pub const STORED: MethodSpec = MethodSpec {
        method: CompressionMethod::Stored,
        version_needed: 10,
        factory: StoredDecoder::boxed,
    };

    /// Method 9: DEFLATE64.
    pub const DEFLATE64: MethodSpec = MethodSpec {
        method: CompressionMethod::Deflate64,
        version_needed: 21,
        factory: Deflate64Decoder::boxed,
    };

    /// Numeric method id.
    pub fn id(&self) -> u16 {
        self.method.id()
    }

    /// Method name.
    pub fn name(&self) -> &'static str {
        self.method.name()
    }
}

/// Registry of supported compression methods, keyed by method id.
#[derive(Debug, Clone)]
pub struct MethodRegistry {
    methods: BTreeMap<u16, MethodSpec>,
}

impl MethodRegistry {
    /// Create a registry with `stored` and `deflate64`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for spec in [MethodSpec::STORED, MethodSpec::DEFLATE64] {
            registry.methods.insert(spec.id(), spec);
        }
        registry
    }

    /// Create a registry without any methods.
    pub fn empty() -> Self {
        Self {
            methods: BTreeMap::new(),
        }
    }

    /// Add a method.
    ///
    /// Fails if a method with the same id is already registered.
    pub fn register(&mut self, spec: MethodSpec) -> Result<()> {
        let id = spec.id();
        if self.methods.contains_key(&id) {
            return Err(OxiArcError::method_already_registered(id));
        }
        self.methods.insert(id, spec);
        Ok(())
    }

    /// Look up a method by id.
    pub fn get(&self, method: u16) -> Option<&MethodSpec> {
        self.methods.get(&method)
    }

    /// Registered methods in id order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodSpec> {
        self.methods.values()
    }

    /// Check that members compressed with `method` can be read.
    pub fn check_compression(&self, method: u16) -> Result<&MethodSpec> {
        self.get(method)
            .ok_or_else(|| OxiArcError::unsupported_method(method))
    }

    /// Create a decoder for one member.
    ///
    /// Every call returns an independent session.
    pub fn decoder(&self, method: u16) -> Result<Box<dyn StreamDecoder>> {
        let spec = self.check_compression(method)?;
        debug!("creating {} decoder (method {})", spec.name(), method);
        Ok((spec.factory)())
    }

    /// "Version made by" and "version needed to extract" for a member.
    ///
    /// Both are raised to at least the method's minimum version; the local
    /// file header and the central directory record use the same pair.
    pub fn header_versions(
        &self,
        method: u16,
        create_version: u16,
        extract_version: u16,
    ) -> Result<(u16, u16)> {
        let spec = self.check_compression(method)?;
        Ok((
            create_version.max(spec.version_needed),
            extract_version.max(spec.version_needed),
        ))
    }

    /// Read-chunk size the method's decoder recommends.
    pub fn min_read_size(&self, method: u16) -> Result<usize> {
        Ok(self.decoder(method)?.min_read_size())
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoder for method 0: output equals input.
///
/// The stored format has no end marker, so the member's compressed size
/// decides where it ends.
#[derive(Debug, Default)]
pub struct StoredDecoder {
    total: u64,
}

impl StoredDecoder {
    /// Create a stored decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a boxed decoder, for use as a registry factory.
    pub fn boxed() -> Box<dyn StreamDecoder> {
        Box::new(Self::new())
    }

    /// Bytes passed through so far.
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl StreamDecoder for StoredDecoder {
    fn name(&self) -> &'static str {
        "Stored"
    }

    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.total += input.len() as u64;
        Ok(input.to_vec())
    }

    fn is_finished(&self) -> bool {
        false
    }

    fn is_self_terminating(&self) -> bool {
        false
    }
}
