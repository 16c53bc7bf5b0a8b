//! Sega header decoders and Mega Drive interleave correction.
//!
//! This crate provides decoders for:
//!
//! - Mega Drive / Genesis (including Sega CD boot sectors and 32X carts)
//! - Saturn
//! - Dreamcast

pub mod dreamcast;
pub mod genesis;
pub mod interleave;
pub mod publisher;
pub mod saturn;

pub use dreamcast::DreamcastDecoder;
pub use genesis::MegaDriveDecoder;
pub use interleave::Interleave;
pub use saturn::SaturnDecoder;
