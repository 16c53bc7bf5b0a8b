//! Image identification: disc layout resolution plus header decoding.
//!
//! [`create_context`] builds a [`ProbeContext`] with every shipped decoder,
//! most specific signature first:
//!
//! ```no_run
//! use std::path::Path;
//!
//! let ctx = retro_probe_lib::create_context();
//! let fields = ctx.parse(Path::new("game.cue"))?;
//! if let Some(platform) = fields.get_str("platform") {
//!     println!("{platform}");
//! }
//! # Ok::<(), retro_probe_lib::ProbeError>(())
//! ```

pub mod context;
pub mod generic_disc;

pub use context::{DecoderInfo, FORMAT_KEY, ProbeContext, RegisteredDecoder};
pub use generic_disc::GenericDiscDecoder;
pub use retro_probe_core::{FieldMap, FieldValue, Platform, ProbeError, ProbeOptions};

/// Create a context with the default decoders and options.
pub fn create_context() -> ProbeContext {
    create_context_with_options(ProbeOptions::default())
}

/// Create a context with the default decoders.
///
/// Order matters: the generic ISO decoder accepts any data disc, and the
/// Mega Drive decoder's interleave heuristics are looser than the exact
/// Saturn and Dreamcast identifiers.
pub fn create_context_with_options(options: ProbeOptions) -> ProbeContext {
    let mut ctx = ProbeContext::with_options(options);

    // Sega
    ctx.register(retro_probe_sega::DreamcastDecoder::new());
    ctx.register(retro_probe_sega::SaturnDecoder::new());
    ctx.register(retro_probe_sega::MegaDriveDecoder::new());

    // Anything else with a volume descriptor
    ctx.register(GenericDiscDecoder::new());

    ctx
}
