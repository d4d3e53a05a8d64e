//! Types of the Figma REST API, and the decoder for the node tree of design
//! files.
//!
//! Nothing in here does I/O. Bodies fetched by some HTTP client go in as
//! bytes, typed values come out.

pub mod comment;
pub mod file;
pub mod geometry;
pub mod image;
pub mod node;
pub mod project;
pub mod style;
pub mod version;

#[cfg(test)]
mod fixtures;

pub use file::{decode, ComponentReference, File, DOCUMENT_ID};
pub use node::{decode_node_sequence, DecodeError, Decoder, Node, NodeType};
