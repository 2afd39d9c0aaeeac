//! Raw (unprocessed) JSON-LD 1.1 syntax: keywords, containers, text
//! direction, language tags, and the `@context` syntax tree.
//!
//! Types here mirror the grammar of a JSON-LD document as written, before
//! context processing or expansion give it meaning.
pub mod compact_iri;
pub mod container;
pub mod context;
pub mod direction;
pub mod error;
pub mod keyword;
pub mod lang;
pub mod nullable;
mod utils;

pub use compact_iri::{CompactIri, CompactIriBuf, InvalidCompactIri};
pub use container::{Container, ContainerKind};
pub use context::{Context, ContextDocument, ContextEntry, Definition, TermDefinition};
pub use direction::{Direction, InvalidDirection};
pub use error::Error;
pub use json_syntax::{
	object, parse, print, BorrowUnordered, Kind, Number, NumberBuf, Object, Parse, Print, String,
	Unordered, UnorderedEq, UnorderedHash, UnorderedPartialEq, Value,
};
pub use keyword::{is_keyword_like, InvalidKeyword, Keyword};
pub use lang::{InvalidLangTag, LangTag, LangTagBuf, LenientLangTag, LenientLangTagBuf};
pub use nullable::Nullable;

#[cfg(feature = "serde")]
pub use json_syntax::{from_value, to_value};
