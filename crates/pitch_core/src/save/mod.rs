//! Durable storage of the pitch-board blob.
//!
//! Format: MessagePack → LZ4 → SHA-256 checksum, written atomically. Read
//! failures degrade silently to "no saved state".

mod error;
mod format;
mod store;

pub use error::SaveError;
pub use format::{
    current_timestamp, decompress_and_deserialize, serialize_and_compress, BoardSave,
};
pub use store::BoardStore;

/// Current save format version.
pub const SAVE_VERSION: u32 = 1;
