//! This crate is a Rust implementation of the
//! [JSON-LD](https://www.w3.org/TR/json-ld/) 1.1 data interchange format:
//! context processing, expansion, compaction, flattening and conversion
//! to/from RDF.
//!
//! [Linked Data (LD)](https://www.w3.org/standards/semanticweb/data)
//! is a [World Wide Web Consortium (W3C)](https://www.w3.org/)
//! initiative built upon standard Web technologies to create an
//! interrelated network of datasets across the Web.
//! The [JavaScript Object Notation (JSON)](https://tools.ietf.org/html/rfc7159) is
//! a widely used, simple, unstructured data serialization format to describe
//! data objects in a human readable way.
//! JSON-LD brings these two technologies together, adding semantics to JSON
//! to create a lightweight data serialization format that can organize data
//! and help applications interoperate at a large scale.
//!
//! # Usage
//!
//! The four algorithms are each provided by their own trait/function and can
//! be used directly, or through the convenience [`JsonLdProcessor`] trait
//! that chains context processing in for you:
//!
//! - [`Expand`] / [`JsonLdProcessor::expand`]
//! - [`Compact`] / [`JsonLdProcessor::compact`]
//! - [`JsonLdProcessor::flatten`]
//! - [`rdf::to_rdf`] / [`rdf::from_rdf`]
pub use json_ld_compaction as compaction;
pub use json_ld_context_processing as context_processing;
pub use json_ld_core::*;
pub use json_ld_expansion as expansion;
pub use json_ld_syntax as syntax;

pub use compaction::Compact;
pub use context_processing::Process;
pub use expansion::Expand;

mod processor;
pub use processor::*;
