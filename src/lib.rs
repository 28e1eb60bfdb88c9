//! # huffpack
//!
//! Static Huffman compression of byte streams.
//!
//! The compressed form is a header holding the frequency of every byte value
//! that occurs in the input, followed by the packed codes. The decoder builds
//! its tree from the header alone, so encoder and decoder must construct trees
//! the same way; see [`huffman::HuffmanTree::from_frequencies`].
//!
//! ```
//! let compressed = huffpack::encode_to_vec(b"abracadabra")?;
//! let restored = huffpack::decode_from_slice(&compressed)?;
//! assert_eq!(restored, b"abracadabra");
//! # Ok::<(), huffpack::Error>(())
//! ```

pub mod bitstream;
pub mod cli;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod header;
pub mod huffman;
pub mod priority_list;

pub use codec::{DecodeSummary, EncodeSummary, decode, decode_from_slice, encode, encode_to_vec};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use huffman::{Code, CodeTable, HuffmanTree};
