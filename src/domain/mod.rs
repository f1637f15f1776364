// SPDX-License-Identifier: MPL-2.0
//! Domain layer: pure value types with no dependencies beyond `std`.
//!
//! # Modules
//!
//! - [`query`]: the validated user question ([`Query`](query::Query))
//! - [`prompt`]: the animation-script instruction sent to the video backend
//!   ([`GenerationPrompt`](prompt::GenerationPrompt))

pub mod prompt;
pub mod query;

pub use prompt::GenerationPrompt;
pub use query::Query;
