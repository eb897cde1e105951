//! Helpers for resolving configured paths and matching bundle files against
//! exclude lists.
//!
//! Alias expansion is used for source roots, bundle directories, the views root
//! and the output directory alike, so every configured path accepts the same
//! `@alias` and `$VAR` syntax.

mod alias;
mod filters;

pub use alias::AliasResolver;
pub use filters::{exclude_key, is_file_excluded};
