/// Errors raised while building or converting core value-model types
/// (value objects, language strings, node identifiers, RDF terms).
///
/// Higher-level algorithm crates (`json-ld-context-processing`,
/// `json-ld-expansion`, `json-ld-compaction`) embed this error in their own
/// error enums rather than duplicating these conditions.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
	#[error("invalid language-tagged string")]
	InvalidLanguageTaggedString,

	#[error("invalid base direction")]
	InvalidBaseDirection,

	#[error("invalid `@id` value")]
	InvalidIdValue,

	#[error("invalid index value")]
	InvalidIndexValue,

	#[error("invalid `@reverse` value")]
	InvalidReversePropertyValue,

	#[error("invalid typed value")]
	InvalidTypedValue,

	#[error("invalid value object")]
	InvalidValueObject,

	#[error("invalid value object value")]
	InvalidValueObjectValue,

	#[error("blank node predicates require generalized RDF")]
	BlankNodePredicate,
}
