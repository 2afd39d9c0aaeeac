use crate::{Id, ValidId};
use iref::IriBuf;
use json_ld_syntax::Keyword;
use rdf_types::BlankIdBuf;
use std::fmt;

/// A term produced by context processing for a node's vocabulary/`@id`
/// mapping, or consumed as the value of `@vocab`.
///
/// Distinct from [`Id`]: a `Term` additionally admits the "null" mapping
/// (a term explicitly mapped to `null`, making it unusable) and mapping
/// directly to a keyword (e.g. `"type": "@type"`).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Term {
	Null,
	Id(Id),
	Keyword(Keyword),
}

impl Term {
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	pub fn is_keyword(&self) -> bool {
		matches!(self, Self::Keyword(_))
	}

	pub fn into_iri(self) -> Option<IriBuf> {
		match self {
			Self::Id(Id::Valid(ValidId::Iri(iri))) => Some(iri),
			_ => None,
		}
	}

	pub fn as_iri(&self) -> Option<&iref::Iri> {
		match self {
			Self::Id(id) => id.as_iri(),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Self::Null => "",
			Self::Id(id) => id.as_str(),
			Self::Keyword(k) => k.as_str(),
		}
	}
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<Id> for Term {
	fn from(value: Id) -> Self {
		Self::Id(value)
	}
}

impl From<IriBuf> for Term {
	fn from(value: IriBuf) -> Self {
		Self::Id(Id::iri(value))
	}
}

impl From<BlankIdBuf> for Term {
	fn from(value: BlankIdBuf) -> Self {
		Self::Id(Id::blank(value))
	}
}

impl From<Keyword> for Term {
	fn from(value: Keyword) -> Self {
		Self::Keyword(value)
	}
}
