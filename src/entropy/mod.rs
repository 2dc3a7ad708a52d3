//! Entropy provider (component C2): a labelled CSPRNG source
//! ([`random::RandomGenerator`]) plus an "enhanced" two-source mixer
//! ([`enhanced::EnhancedRandomGenerator`]). Textual rendering of the bytes
//! these produce lives in [`crate::encoding`] (component C5).

pub mod enhanced;
pub mod random;

pub use enhanced::EnhancedRandomGenerator;
pub use random::{
    generate_array, generate_as_base64, generate_as_hex, generate_bytes, EntropyQuality,
    RandomGenerator,
};
