//! Block Store: the ordered collection, normalization and pure mutators.

mod collection;
mod mutations;

pub use collection::{normalize, BlockCollection};
pub use mutations::{BlockPatch, EditorWarning, Mutation};
