use crate::Error;
use iref::{Iri, IriBuf};

/// The type of a literal value object (an explicit `@type`, as opposed to
/// the language/direction tagging used by [`crate::LangString`]).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Type {
	/// `@type: "@json"` -- the value is an arbitrary JSON document, kept
	/// verbatim rather than interpreted as a typed literal lexical form.
	Json,

	/// An ordinary datatype IRI.
	Id(IriBuf),
}

impl Type {
	pub fn as_iri(&self) -> Option<&Iri> {
		match self {
			Self::Id(iri) => Some(iri),
			Self::Json => None,
		}
	}

	pub fn is_json(&self) -> bool {
		matches!(self, Self::Json)
	}
}

impl From<IriBuf> for Type {
	fn from(value: IriBuf) -> Self {
		Self::Id(value)
	}
}

/// The literal content of a (non-language-tagged) value object.
#[derive(Clone, PartialEq, Debug)]
pub enum Literal {
	Null,
	Boolean(bool),
	Number(json_syntax::NumberBuf),
	String(json_ld_syntax::String),
}

impl Literal {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s.as_str()),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Boolean(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_number(&self) -> Option<&json_syntax::NumberBuf> {
		match self {
			Self::Number(n) => Some(n),
			_ => None,
		}
	}

	pub fn into_json(self) -> json_syntax::Value {
		match self {
			Self::Null => json_syntax::Value::Null,
			Self::Boolean(b) => json_syntax::Value::Boolean(b),
			Self::Number(n) => json_syntax::Value::Number(n),
			Self::String(s) => json_syntax::Value::String(s),
		}
	}

	/// Canonical lexical form used for RDF conversion: the `xsd:boolean`,
	/// `xsd:integer`/`xsd:double`, or plain-string canonicalization rules
	/// from the JSON-LD 1.1 "Value Object to RDF" algorithm.
	pub fn canonical_lexical_form(&self) -> String {
		match self {
			Self::Null => "null".to_string(),
			Self::Boolean(b) => b.to_string(),
			Self::Number(n) => canonicalize_number(n),
			Self::String(s) => s.to_string(),
		}
	}
}

/// Formats a JSON number using the canonical double/integer form JSON-LD
/// 1.1 requires when emitting RDF literals: integers print without a
/// leading `+` or unnecessary fraction, and doubles use the XSD canonical
/// form (a single nonzero digit before the decimal point, explicit
/// capital-`E` exponent).
pub fn canonicalize_number(n: &json_syntax::NumberBuf) -> String {
	if let Some(i) = n.as_i64() {
		return i.to_string();
	}

	pretty_dtoa::dtoa(n.as_f64_lossy(), XSD_CANONICAL_FLOAT)
}

// <https://www.w3.org/TR/xmlschema11-2/#f-doubleLexmap>
const XSD_CANONICAL_FLOAT: pretty_dtoa::FmtFloatConfig = pretty_dtoa::FmtFloatConfig::default()
	.force_e_notation()
	.capitalize_e(true);

/// A JSON-LD value object: `{"@value": ..., "@type"/"@language": ...}`.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
	/// A literal, with an optional datatype.
	Literal(Literal, Option<Type>),

	/// A language- or direction-tagged string.
	LangString(crate::LangString),

	/// An `@value` whose `@type` is `@json`.
	Json(json_syntax::Value),
}

impl Value {
	pub fn literal(literal: Literal, ty: Option<Type>) -> Self {
		Self::Literal(literal, ty)
	}

	pub fn json(value: json_syntax::Value) -> Self {
		Self::Json(value)
	}

	pub fn lang_string(s: crate::LangString) -> Self {
		Self::LangString(s)
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Literal(l, _) => l.as_str(),
			Self::LangString(s) => Some(s.as_str()),
			Self::Json(_) => None,
		}
	}

	pub fn as_literal(&self) -> Option<&Literal> {
		match self {
			Self::Literal(l, _) => Some(l),
			_ => None,
		}
	}

	pub fn literal_type(&self) -> Option<&Type> {
		match self {
			Self::Literal(_, t) => t.as_ref(),
			_ => None,
		}
	}

	pub fn set_literal_type(&mut self, ty: Option<Type>) -> Result<(), Error> {
		match self {
			Self::Literal(_, t) => {
				*t = ty;
				Ok(())
			}
			_ => Err(Error::InvalidTypedValue),
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Literal(l, _) => l.as_bool(),
			_ => None,
		}
	}

	pub fn as_number(&self) -> Option<&json_syntax::NumberBuf> {
		match self {
			Self::Literal(l, _) => l.as_number(),
			_ => None,
		}
	}

	pub fn as_lang_string(&self) -> Option<&crate::LangString> {
		match self {
			Self::LangString(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_json(&self) -> Option<&json_syntax::Value> {
		match self {
			Self::Json(v) => Some(v),
			_ => None,
		}
	}

	pub fn is_json(&self) -> bool {
		matches!(self, Self::Json(_))
	}

	/// Converts this value object back to the raw JSON it would expand to
	/// (the inverse of value expansion), e.g. for re-compaction.
	pub fn into_json(self) -> json_syntax::Value {
		match self {
			Self::Literal(l, _) => l.into_json(),
			Self::LangString(s) => json_syntax::Value::String(s.as_str().into()),
			Self::Json(v) => v,
		}
	}
}
