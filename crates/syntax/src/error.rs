use crate::{compact_iri::InvalidCompactIri, direction::InvalidDirection, keyword::InvalidKeyword};
use langtag::InvalidLangTag;

/// Error raised when parsing a raw JSON-LD syntax fragment (context entry,
/// term definition, container, ...) fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid keyword `{0}`")]
	InvalidKeyword(String),

	#[error("invalid compact IRI `{0}`")]
	InvalidCompactIri(String),

	#[error("invalid base direction `{0}`")]
	InvalidDirection(String),

	#[error("invalid language tag `{0}`")]
	InvalidLanguageTag(String),

	#[error("invalid container `{0}`")]
	InvalidContainer(String),

	#[error("unexpected JSON value, expected {expected}")]
	UnexpectedType { expected: &'static str },
}

impl From<InvalidKeyword<&str>> for Error {
	fn from(value: InvalidKeyword<&str>) -> Self {
		Self::InvalidKeyword(value.0.to_owned())
	}
}

impl From<InvalidCompactIri<&str>> for Error {
	fn from(value: InvalidCompactIri<&str>) -> Self {
		Self::InvalidCompactIri(value.0.to_owned())
	}
}

impl From<InvalidDirection<String>> for Error {
	fn from(value: InvalidDirection<String>) -> Self {
		Self::InvalidDirection(value.0)
	}
}

impl From<InvalidLangTag<String>> for Error {
	fn from(value: InvalidLangTag<String>) -> Self {
		Self::InvalidLanguageTag(value.0)
	}
}
