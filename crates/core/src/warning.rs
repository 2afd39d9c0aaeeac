use std::fmt;

/// A condition that a JSON-LD processor must report but must not treat as a
/// fatal error: reserved keyword-like keys, malformed BCP47 language tags,
/// and use of the deprecated pre-1.1 term-coercion keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
	/// A key matching the `@[A-Za-z]+` keyword production was encountered
	/// but is not one of the keywords JSON-LD 1.1 defines; it is dropped.
	ReservedKeywordLike(String),

	/// A `@language`/`@direction`-adjacent string was not a well-formed
	/// BCP47 language tag; it is still used verbatim.
	MalformedLanguageTag(String),

	/// One of `@coerce`, `@literal`, `@iri`, `@subject` (JSON-LD 1.0
	/// compatibility keys) was encountered; it is treated as an ordinary
	/// property.
	DeprecatedCompatibilityKey(String),
}

impl fmt::Display for Warning {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::ReservedKeywordLike(k) => write!(f, "reserved keyword-like key `{k}` ignored"),
			Self::MalformedLanguageTag(t) => write!(f, "malformed language tag `{t}`"),
			Self::DeprecatedCompatibilityKey(k) => {
				write!(f, "deprecated JSON-LD 1.0 key `{k}` treated as a property")
			}
		}
	}
}

/// Receives [`Warning`]s raised during processing.
///
/// Implemented by `()`, which silently drops every warning -- the default
/// for library callers that don't care. [`Print`] writes warnings to
/// stderr.
pub trait Handler<W = Warning> {
	fn handle(&mut self, warning: W);
}

impl<W> Handler<W> for () {
	fn handle(&mut self, _warning: W) {}
}

impl<W, H: Handler<W>> Handler<W> for &mut H {
	fn handle(&mut self, warning: W) {
		H::handle(*self, warning)
	}
}

impl<W> Handler<W> for Vec<W> {
	fn handle(&mut self, warning: W) {
		self.push(warning)
	}
}

/// Prints warnings to stderr as they are raised.
pub struct Print;

impl<W: fmt::Display> Handler<W> for Print {
	fn handle(&mut self, warning: W) {
		eprintln!("{warning}")
	}
}

/// Routes warnings through the `log` facade (`log::warn!`) instead of
/// stderr, for callers that already wire up a logger.
pub struct Log;

impl<W: fmt::Display> Handler<W> for Log {
	fn handle(&mut self, warning: W) {
		log::warn!("{warning}")
	}
}
