// https://stackoverflow.com/a/61417700
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod layer;
mod service;

/// Directives.
pub mod directives;

/// Middleware utilities.
pub mod middleware;

/// Axum utilities.
#[cfg(feature = "axum")]
pub mod axum;

pub use {layer::*, service::*};
