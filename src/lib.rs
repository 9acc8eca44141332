//! Whole-word substitution over text streams.
//!
//! A word is a maximal run of ASCII `[a-zA-Z0-9]`. [`Transformer`] copies a
//! reader to a writer and replaces each word that exactly matches a key in its
//! [`TranslationMap`]; everything else passes through byte for byte.
//!
//! ```
//! use wordswap::Transformer;
//!
//! let mut transformer = Transformer::new();
//! transformer.add("key", "KEY")?;
//! assert_eq!(transformer.transform_str("a key, a keyword")?, "a KEY, a keyword");
//! # Ok::<(), wordswap::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod text;

pub use crate::error::{Error, Result};
pub use crate::text::{TranslationMap, Transformer};
