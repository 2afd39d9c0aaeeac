use iref::{Iri, IriBuf};
use rdf_types::{BlankId, BlankIdBuf};
use std::fmt;

/// A well-formed node identifier: either an IRI or a blank node identifier.
pub type ValidId = rdf_types::Id<IriBuf, BlankIdBuf>;

/// A node identifier as it occurs in a JSON-LD document.
///
/// Node identifiers are not required to be valid (an `@id` value that is
/// neither an IRI nor a blank node identifier is still accepted and carried
/// through as [`Id::Invalid`]; it just cannot be used to build an RDF term).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Id {
	Valid(ValidId),
	Invalid(String),
}

impl Id {
	pub fn iri(iri: IriBuf) -> Self {
		Self::Valid(ValidId::Iri(iri))
	}

	pub fn blank(id: BlankIdBuf) -> Self {
		Self::Valid(ValidId::Blank(id))
	}

	/// Parses `s` as an IRI, then as a blank node identifier, falling back to
	/// `Invalid` if neither accepts it.
	pub fn from_string(s: String) -> Self {
		match Iri::new(&s) {
			Ok(iri) => Self::Valid(ValidId::Iri(iri.to_owned())),
			Err(_) => match BlankId::new(&s) {
				Ok(blank) => Self::Valid(ValidId::Blank(blank.to_owned())),
				Err(_) => Self::Invalid(s),
			},
		}
	}

	pub fn is_valid(&self) -> bool {
		matches!(self, Self::Valid(_))
	}

	pub fn as_iri(&self) -> Option<&Iri> {
		match self {
			Self::Valid(ValidId::Iri(iri)) => Some(iri),
			_ => None,
		}
	}

	pub fn as_blank(&self) -> Option<&BlankId> {
		match self {
			Self::Valid(ValidId::Blank(b)) => Some(b),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Self::Valid(ValidId::Iri(iri)) => iri.as_str(),
			Self::Valid(ValidId::Blank(b)) => b.as_str(),
			Self::Invalid(s) => s,
		}
	}
}

impl fmt::Display for Id {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<IriBuf> for Id {
	fn from(value: IriBuf) -> Self {
		Self::Valid(ValidId::Iri(value))
	}
}

impl From<BlankIdBuf> for Id {
	fn from(value: BlankIdBuf) -> Self {
		Self::Valid(ValidId::Blank(value))
	}
}

impl From<ValidId> for Id {
	fn from(value: ValidId) -> Self {
		Self::Valid(value)
	}
}

impl TryFrom<crate::Term> for Id {
	type Error = crate::Term;

	fn try_from(term: crate::Term) -> Result<Id, crate::Term> {
		match term {
			crate::Term::Id(prop) => Ok(prop),
			term => Err(term),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_iri() {
		assert!(Id::from_string("http://example.org/foo".into())
			.as_iri()
			.is_some());
	}

	#[test]
	fn parses_blank() {
		assert!(Id::from_string("_:b0".into()).as_blank().is_some());
	}

	#[test]
	fn falls_back_to_invalid() {
		let id = Id::from_string("not an iri".into());
		assert!(!id.is_valid());
		assert_eq!(id.as_str(), "not an iri");
	}
}
