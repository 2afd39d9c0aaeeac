//! Core JSON-LD value model: processed contexts, the expanded/flattened
//! document types, and RDF conversion.
//!
//! This crate owns everything downstream of parsing the raw
//! [`json_ld_syntax`] tree but upstream of any single algorithm: the
//! [`Context`], [`Object`]/[`Node`]/[`Value`] model the Expansion and
//! Compaction algorithms both read and write, and the [`rdf`] conversion
//! that consumes an [`ExpandedDocument`].
pub use json_ld_syntax::{Container, ContainerKind, Direction, LenientLangTag, LenientLangTagBuf};

pub mod context;
pub mod document;
pub mod error;
pub mod generator;
pub mod id;
pub mod indexed;
pub mod lang_string;
pub mod loader;
pub mod node_map;
pub mod object;
pub mod rdf;
pub mod warning;

pub use context::Context;
pub use document::{ExpandedDocument, FlattenedDocument};
pub use error::Error;
pub use generator::Generator;
pub use id::{Id, ValidId};
pub use indexed::Indexed;
pub use lang_string::{InvalidLangString, LangStr, LangString};
pub use loader::{LoadError, Loader, MapLoader, NoLoader, RemoteDocument};
pub use node_map::{generate_node_map, ConflictingIndexes, NodeMap, NodeMapGraph};
pub use object::{IndexedObject, List, Literal, Node, Object, Properties, ReverseProperties, Value};
pub use rdf::{Quad, RdfDirection, RdfLiteral, RdfTerm};
pub use warning::{Handler, Log as LogWarnings, Print as PrintWarnings, Warning};

mod term;
pub use term::Term;

/// Which version of the JSON-LD algorithms to run.
///
/// Context processing, expansion and compaction all branch on this in a
/// handful of places: JSON-LD 1.0 rejects several 1.1-only context entries
/// (`@version`, `@direction`, `@import`, `@protected`, scoped `@context`,
/// `@index` on a term, ...) that are otherwise accepted verbatim.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ProcessingMode {
	JsonLd1_0,
	#[default]
	JsonLd1_1,
}
