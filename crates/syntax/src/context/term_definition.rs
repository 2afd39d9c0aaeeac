use crate::{CompactIri, Container, Direction, Keyword, LenientLangTagBuf, Nullable};
use iref::Iri;
use rdf_types::BlankId;

/// Term definition, as it appears in a raw (unprocessed) context.
///
/// Either a bare IRI/compact-IRI/keyword string (`Simple`), or a full JSON
/// object with `@id`, `@type`, `@container`, ... entries (`Expanded`).
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum TermDefinition {
	Simple(Simple),
	Expanded(Box<Expanded>),
}

impl TermDefinition {
	pub fn is_expanded(&self) -> bool {
		matches!(self, Self::Expanded(_))
	}
}

/// A bare string term definition (`"term": "http://example.org/term"`).
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Serialize, serde::Deserialize),
	serde(transparent)
)]
pub struct Simple(pub(crate) String);

impl Simple {
	pub fn as_iri(&self) -> Option<&Iri> {
		Iri::new(&self.0).ok()
	}

	pub fn as_compact_iri(&self) -> Option<&CompactIri> {
		CompactIri::new(&self.0).ok()
	}

	pub fn as_blank_id(&self) -> Option<&BlankId> {
		BlankId::new(&self.0).ok()
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}
}

impl From<String> for Simple {
	fn from(value: String) -> Self {
		Self(value)
	}
}

/// The value of a term's `@id`/`@reverse` mapping: either a keyword
/// (`@type`, `@id`, ...) or an ordinary term/IRI.
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Id {
	Keyword(Keyword),
	Term(String),
}

impl Id {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Keyword(k) => k.as_str(),
			Self::Term(t) => t,
		}
	}
}

impl From<String> for Id {
	fn from(value: String) -> Self {
		match Keyword::try_from(value.as_str()) {
			Ok(k) => Self::Keyword(k),
			Err(_) => Self::Term(value),
		}
	}
}

/// The value of a term's `@type` mapping.
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Serialize, serde::Deserialize),
	serde(transparent)
)]
pub struct Type(pub(crate) String);

impl Type {
	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}

	/// `true` if this is one of the type keywords (`@id`, `@json`, `@none`,
	/// `@vocab`) rather than an ordinary datatype IRI/term.
	pub fn as_keyword(&self) -> Option<Keyword> {
		Keyword::try_from(self.0.as_str())
			.ok()
			.filter(Keyword::is_type_keyword)
	}
}

/// `@index` entry of a term definition: the name of a property used as a
/// secondary index key in an `@index`-containered map.
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Serialize, serde::Deserialize),
	serde(transparent)
)]
pub struct Index(pub(crate) String);

impl Index {
	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}
}

impl From<String> for Index {
	fn from(value: String) -> Self {
		Self(value)
	}
}

/// `@nest` entry of a term definition.
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Serialize, serde::Deserialize),
	serde(transparent)
)]
pub struct Nest(pub(crate) String);

impl Nest {
	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}
}

impl From<String> for Nest {
	fn from(value: String) -> Self {
		Self(value)
	}
}

/// Expanded (object-form) term definition.
#[derive(PartialEq, Eq, Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expanded {
	#[cfg_attr(
		feature = "serde",
		serde(
			rename = "@id",
			default,
			deserialize_with = "Nullable::optional",
			skip_serializing_if = "Option::is_none"
		)
	)]
	pub id: Option<Nullable<Id>>,

	#[cfg_attr(
		feature = "serde",
		serde(
			rename = "@type",
			default,
			deserialize_with = "Nullable::optional",
			skip_serializing_if = "Option::is_none"
		)
	)]
	pub type_: Option<Nullable<Type>>,

	#[cfg_attr(
		feature = "serde",
		serde(rename = "@context", default, skip_serializing_if = "Option::is_none")
	)]
	pub context: Option<Box<super::Context>>,

	#[cfg_attr(
		feature = "serde",
		serde(rename = "@reverse", default, skip_serializing_if = "Option::is_none")
	)]
	pub reverse: Option<String>,

	#[cfg_attr(
		feature = "serde",
		serde(rename = "@index", default, skip_serializing_if = "Option::is_none")
	)]
	pub index: Option<Index>,

	#[cfg_attr(
		feature = "serde",
		serde(
			rename = "@language",
			default,
			deserialize_with = "Nullable::optional",
			skip_serializing_if = "Option::is_none"
		)
	)]
	pub language: Option<Nullable<LenientLangTagBuf>>,

	#[cfg_attr(
		feature = "serde",
		serde(
			rename = "@direction",
			default,
			deserialize_with = "Nullable::optional",
			skip_serializing_if = "Option::is_none"
		)
	)]
	pub direction: Option<Nullable<Direction>>,

	#[cfg_attr(
		feature = "serde",
		serde(
			rename = "@container",
			default,
			deserialize_with = "Nullable::optional",
			skip_serializing_if = "Option::is_none"
		)
	)]
	pub container: Option<Nullable<Container>>,

	#[cfg_attr(
		feature = "serde",
		serde(rename = "@nest", default, skip_serializing_if = "Option::is_none")
	)]
	pub nest: Option<Nest>,

	#[cfg_attr(
		feature = "serde",
		serde(rename = "@prefix", default, skip_serializing_if = "Option::is_none")
	)]
	pub prefix: Option<bool>,

	#[cfg_attr(
		feature = "serde",
		serde(rename = "@propagate", default, skip_serializing_if = "Option::is_none")
	)]
	pub propagate: Option<bool>,

	#[cfg_attr(
		feature = "serde",
		serde(rename = "@protected", default, skip_serializing_if = "Option::is_none")
	)]
	pub protected: Option<bool>,
}

impl Expanded {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_null(&self) -> bool {
		matches!(&self.id, None | Some(Nullable::Null))
			&& self.type_.is_none()
			&& self.context.is_none()
			&& self.reverse.is_none()
			&& self.index.is_none()
			&& self.language.is_none()
			&& self.direction.is_none()
			&& self.container.is_none()
			&& self.nest.is_none()
			&& self.prefix.is_none()
			&& self.propagate.is_none()
			&& self.protected.is_none()
	}

	pub fn is_simple_definition(&self) -> bool {
		matches!(&self.id, Some(Nullable::Some(_)))
			&& self.type_.is_none()
			&& self.context.is_none()
			&& self.reverse.is_none()
			&& self.index.is_none()
			&& self.language.is_none()
			&& self.direction.is_none()
			&& self.container.is_none()
			&& self.nest.is_none()
			&& self.prefix.is_none()
			&& self.propagate.is_none()
			&& self.protected.is_none()
	}

	/// Collapses an expanded term definition with no entries other than
	/// `@id` back down into its `Simple` form, matching how the JSON-LD 1.1
	/// algorithm treats `{"@id": "..."}`  and `"..."` as equivalent inputs.
	pub fn simplify(self) -> Nullable<TermDefinition> {
		if self.is_null() {
			Nullable::Null
		} else if self.is_simple_definition() {
			let id = match self.id.unwrap().unwrap() {
				Id::Keyword(k) => k.as_str().to_owned(),
				Id::Term(t) => t,
			};
			Nullable::Some(TermDefinition::Simple(Simple(id)))
		} else {
			Nullable::Some(TermDefinition::Expanded(Box::new(self)))
		}
	}
}
