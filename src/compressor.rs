use thiserror::Error;

/// Represents an error emitted while building, persisting or applying a Huffman code.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// A serialized code table could not be turned back into a code.
    ///
    /// The argument describes what went wrong, prefixed with the line number when the
    /// table came from the text format.
    #[error("malformed code table: {0}")]
    MalformedTable(String),

    /// A bit stream did not describe a valid sequence of code words.
    #[error("could not decode bit stream: {0}")]
    Decode(String),

    /// Non-empty input was given to a code built from zero symbols.
    ///
    /// The argument names the operation, e.g. `"encode"` or `"decode"`.
    #[error("cannot {0} non-empty input with an empty code")]
    EmptyInput(&'static str),

    /// The encoder was asked for a symbol the code has no code word for.
    #[error("symbol {0} has no code word in this code")]
    UnknownSymbol(u8),

    /// A packed bit container was truncated or its header disagrees with its payload.
    #[error("malformed bit container: {0}")]
    Container(String),
}

pub type Result<T, E = HuffmanError> = core::result::Result<T, E>;

/// Represents shared behavior for whole-buffer compressors.
///
/// Provides a method [`compress_bytes`](Compressor::compress_bytes) to compress data and
/// [`decompress_bytes`](Compressor::decompress_bytes) to decompress data.
///
/// # Note
///
/// No guarantees are made about the length of the resulting [`Vec<u8>`] from
/// [`compress_bytes`](Compressor::compress_bytes). Small or high-entropy inputs grow,
/// because the code table travels with the data.
pub trait Compressor {
    /// Compresses a given byte slice and returns the encoded data.
    ///
    /// Decoding the resulting [`Vec<u8>`] will always provide the original data.
    fn compress_bytes(&mut self, data: &[u8]) -> anyhow::Result<Vec<u8>>;

    /// Decompresses a given byte slice and returns the decoded data.
    ///
    /// # Errors
    ///
    /// Returns an error if the input data was malformed.
    fn decompress_bytes(&mut self, data: &[u8]) -> anyhow::Result<Vec<u8>>;

    /// Name used when reporting results.
    fn compressor_name(&self) -> String {
        core::any::type_name::<Self>().to_string()
    }

    /// Performs a round-trip test on the compressor.
    ///
    /// Use for sanity checking the compressor and decompressor.
    fn test_roundtrip<'orig>(&mut self, data: &'orig [u8]) -> anyhow::Result<RoundTripTestResult<'orig>> {
        let compressed = self.compress_bytes(data)?;
        let decompressed = self.decompress_bytes(&compressed)?;
        let equal = data == decompressed.as_slice();

        Ok(RoundTripTestResult {
            equal,
            original: data,
            compressed,
            decompressed,
        })
    }
}

/// Represents the result of a round-trip test.
///
/// Use accessor methods to retrieve the [`result`][RoundTripTestResult::is_successful],
/// the [`original data`][RoundTripTestResult::get_original],
/// the [`compressed data`][RoundTripTestResult::get_compressed],
/// and the [`decompressed data`][RoundTripTestResult::get_decompressed].
#[derive(Clone, Debug, Hash)]
pub struct RoundTripTestResult<'orig> {
    pub(crate) equal: bool,
    pub(crate) original: &'orig [u8],
    pub(crate) compressed: Vec<u8>,
    pub(crate) decompressed: Vec<u8>,
}

impl<'orig> RoundTripTestResult<'orig> {
    /// Whether the original and decompressed data were equal.
    pub const fn is_successful(&self) -> bool {
        self.equal
    }

    /// The original data before any action was taken.
    pub const fn get_original(&self) -> &'orig [u8] {
        self.original
    }

    /// The data after it has been encoded by the compressor.
    pub fn get_compressed(&self) -> &[u8] {
        self.compressed.as_slice()
    }

    /// The data after it has been decoded by the decompressor.
    pub fn get_decompressed(&self) -> &[u8] {
        self.decompressed.as_slice()
    }

    /// Compressed size over original size. Zero for empty input.
    pub fn ratio(&self) -> f64 {
        if self.original.is_empty() {
            return 0.0;
        }
        self.compressed.len() as f64 / self.original.len() as f64
    }
}
