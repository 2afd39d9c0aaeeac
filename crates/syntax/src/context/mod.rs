use iref::IriRefBuf;

pub mod definition;
pub mod term_definition;

pub use definition::Definition;
pub use term_definition::TermDefinition;

/// A raw `@context` value: either a single entry or an array of entries,
/// applied left to right.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Context {
	One(ContextEntry),
	Many(Vec<ContextEntry>),
}

impl Context {
	pub fn is_object(&self) -> bool {
		matches!(self, Self::One(ContextEntry::Definition(_)))
	}

	/// Iterates over the individual entries, in application order.
	pub fn iter(&self) -> std::slice::Iter<ContextEntry> {
		match self {
			Self::One(e) => std::slice::from_ref(e).iter(),
			Self::Many(v) => v.iter(),
		}
	}
}

impl From<ContextEntry> for Context {
	fn from(value: ContextEntry) -> Self {
		Self::One(value)
	}
}

/// A single entry of a (possibly array-valued) `@context`.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ContextEntry {
	Null,
	IriRef(IriRefBuf),
	Definition(Box<Definition>),
}

impl ContextEntry {
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	pub fn as_definition(&self) -> Option<&Definition> {
		match self {
			Self::Definition(d) => Some(d),
			_ => None,
		}
	}
}

impl From<Definition> for ContextEntry {
	fn from(value: Definition) -> Self {
		Self::Definition(Box::new(value))
	}
}

/// A context document: the top-level value of a file/resource whose
/// content type is `application/ld+json` and that is referenced from an
/// `@context` entry, or is loaded directly as a context.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContextDocument {
	#[cfg_attr(feature = "serde", serde(rename = "@context"))]
	pub context: Context,
}

impl ContextDocument {
	pub fn new(context: Context) -> Self {
		Self { context }
	}
}

#[cfg(all(test, feature = "serde"))]
mod tests {
	use super::*;

	#[test]
	fn parses_context_array() {
		let doc: ContextDocument = json_syntax::from_value(json_syntax::json!({
			"@context": ["http://schema.org/", { "name": "http://schema.org/name" }]
		}))
		.unwrap();

		match doc.context {
			Context::Many(entries) => assert_eq!(entries.len(), 2),
			other => panic!("unexpected context shape: {other:?}"),
		}
	}

	#[test]
	fn null_context_resets() {
		let doc: ContextDocument =
			json_syntax::from_value(json_syntax::json!({ "@context": null })).unwrap();
		assert!(matches!(doc.context, Context::One(ContextEntry::Null)));
	}
}
