/// Errors produced while encoding or decoding a compressed stream.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("compressed stream ends inside the header")]
    TruncatedHeader,

    #[error("header declares {0} distinct symbols, at most 256 are possible")]
    TooManySymbols(u16),

    #[error("header lists symbol {0:#04x} more than once")]
    DuplicateSymbol(u8),

    #[error("header gives symbol {0:#04x} a frequency of zero")]
    ZeroFrequency(u8),

    #[error("header frequencies overflow at symbol {0:#04x}")]
    FrequencyOverflow(u8),

    #[error("symbol {0:#04x} has no code")]
    MissingCode(u8),

    #[error("header declares {declared} characters but its frequencies sum to {counted}")]
    FrequencyMismatch { declared: u64, counted: u64 },

    #[error("header declares {0} characters but no symbols")]
    EmptyAlphabet(u64),

    #[error("bit stream ended after {decoded} of {expected} characters")]
    TruncatedStream { expected: u64, decoded: u64 },
}

impl Error {
    /// True for errors caused by a malformed compressed stream rather than the
    /// underlying reader or writer.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
