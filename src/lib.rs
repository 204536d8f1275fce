//! Miniature pure-Rust implementation of [OpenUSD](https://github.com/PixarAnimationStudios/OpenUSD)
//! scene description: text-format layers, composition, authoring, and the
//! Pixar introductory tutorials as a runnable driver.

pub mod base;
pub mod pcp;
pub mod sdf;
pub mod usd;

pub mod usd_geom;
pub mod usd_shade;

pub mod tutorial;

mod error;
mod usda;

pub use error::{Error, Result};

#[doc(hidden)]
pub use base::*;

pub(crate) use tf::declare_public_tokens;
