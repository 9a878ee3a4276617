//! Notan Study - tonal study engine for photo value sketches.
//!
//! Decodes a photo, reduces it to a small working preview and maps it onto a
//! handful of flat gray tones, the way a painter blocks in a notan before
//! committing to a composition. The pure image math lives in the `tone-quant`
//! crate; this library adds decoding, storage and orchestration around it.

pub mod codec;
pub mod error;
pub mod models;
pub mod services;
