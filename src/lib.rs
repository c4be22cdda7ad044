// Penmark: stylometric authorship attribution.
//
// This is the library root. Text flows through the modules in this order:
// text -> features -> signature -> corpus -> scoring -> pipeline.

pub mod config;
pub mod corpus;
pub mod error;
pub mod features;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod signature;
pub mod text;

pub use error::{AttributionError, Result};
