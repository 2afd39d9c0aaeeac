use super::term_definition::TermDefinition;
use crate::Nullable;
use indexmap::IndexMap;

/// `@version` entry value: JSON-LD 1.1 is the only version this crate
/// accepts, but the raw syntax tree still records whatever number appeared.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Version(pub f64);

impl From<Version> for f64 {
	fn from(value: Version) -> Self {
		value.0
	}
}

/// `@vocab` entry value.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Serialize, serde::Deserialize),
	serde(transparent)
)]
pub struct Vocab(pub String);

impl Vocab {
	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}
}

impl From<String> for Vocab {
	fn from(value: String) -> Self {
		Self(value)
	}
}

/// `@import` entry value: an IRI reference to another context fragment to
/// merge in before the rest of this definition is processed.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Serialize, serde::Deserialize),
	serde(transparent)
)]
pub struct Import(pub iref::IriRefBuf);

/// A raw (unprocessed) context definition object: everything that can
/// appear inside a JSON-LD `@context` value other than `null` or a bare
/// IRI reference.
#[derive(Clone, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Definition {
	#[cfg_attr(feature = "serde", serde(rename = "@base", default, skip_serializing_if = "Option::is_none"))]
	pub base: Option<Nullable<iref::IriRefBuf>>,

	#[cfg_attr(feature = "serde", serde(rename = "@import", default, skip_serializing_if = "Option::is_none"))]
	pub import: Option<Import>,

	#[cfg_attr(
		feature = "serde",
		serde(
			rename = "@language",
			default,
			deserialize_with = "Nullable::optional",
			skip_serializing_if = "Option::is_none"
		)
	)]
	pub language: Option<Nullable<crate::LenientLangTagBuf>>,

	#[cfg_attr(
		feature = "serde",
		serde(
			rename = "@direction",
			default,
			deserialize_with = "Nullable::optional",
			skip_serializing_if = "Option::is_none"
		)
	)]
	pub direction: Option<Nullable<crate::Direction>>,

	#[cfg_attr(feature = "serde", serde(rename = "@propagate", default, skip_serializing_if = "Option::is_none"))]
	pub propagate: Option<bool>,

	#[cfg_attr(feature = "serde", serde(rename = "@protected", default, skip_serializing_if = "Option::is_none"))]
	pub protected: Option<bool>,

	/// The `@type` keyword may itself carry a (restricted) term definition.
	#[cfg_attr(feature = "serde", serde(rename = "@type", default, skip_serializing_if = "Option::is_none"))]
	pub type_: Option<TypeTermDefinition>,

	#[cfg_attr(feature = "serde", serde(rename = "@version", default, skip_serializing_if = "Option::is_none"))]
	pub version: Option<Version>,

	#[cfg_attr(
		feature = "serde",
		serde(
			rename = "@vocab",
			default,
			deserialize_with = "Nullable::optional",
			skip_serializing_if = "Option::is_none"
		)
	)]
	pub vocab: Option<Nullable<Vocab>>,

	#[cfg_attr(feature = "serde", serde(flatten))]
	pub bindings: Bindings,
}

impl Definition {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.base.is_none()
			&& self.import.is_none()
			&& self.language.is_none()
			&& self.direction.is_none()
			&& self.propagate.is_none()
			&& self.protected.is_none()
			&& self.type_.is_none()
			&& self.version.is_none()
			&& self.vocab.is_none()
			&& self.bindings.is_empty()
	}
}

/// Restricted term definition allowed for the `@type` keyword itself:
/// only `@container: @set`, optionally `@protected`.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeTermDefinition {
	#[cfg_attr(feature = "serde", serde(rename = "@container"))]
	pub container: TypeContainer,

	#[cfg_attr(feature = "serde", serde(rename = "@protected", default, skip_serializing_if = "Option::is_none"))]
	pub protected: Option<bool>,
}

/// The only legal `@container` value for the `@type` keyword's term
/// definition.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeContainer {
	#[default]
	#[cfg_attr(feature = "serde", serde(rename = "@set"))]
	Set,
}

impl TypeContainer {
	pub fn as_str(&self) -> &'static str {
		"@set"
	}

	pub fn into_str(self) -> &'static str {
		self.as_str()
	}
}

/// Ordinary (non-keyword) term bindings of a context definition, in
/// declaration order.
#[derive(Clone, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct Bindings(pub IndexMap<String, Nullable<TermDefinition>>);

impl Bindings {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn get(&self, key: &str) -> Option<&Nullable<TermDefinition>> {
		self.0.get(key)
	}

	pub fn iter(&self) -> indexmap::map::Iter<String, Nullable<TermDefinition>> {
		self.0.iter()
	}

	pub fn insert(
		&mut self,
		key: String,
		value: Nullable<TermDefinition>,
	) -> Option<Nullable<TermDefinition>> {
		self.0.insert(key, value)
	}
}

impl IntoIterator for Bindings {
	type Item = (String, Nullable<TermDefinition>);
	type IntoIter = indexmap::map::IntoIter<String, Nullable<TermDefinition>>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a Bindings {
	type Item = (&'a String, &'a Nullable<TermDefinition>);
	type IntoIter = indexmap::map::Iter<'a, String, Nullable<TermDefinition>>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

#[cfg(all(test, feature = "serde"))]
mod tests {
	use super::*;

	#[test]
	fn vocab_null_differs_from_absent() {
		let def: Definition = json_syntax::from_value(json_syntax::json!({
			"@vocab": null
		}))
		.unwrap();
		assert_eq!(def.vocab, Some(Nullable::Null));

		let def: Definition = json_syntax::from_value(json_syntax::json!({})).unwrap();
		assert_eq!(def.vocab, None);
	}

	#[test]
	fn simple_term_binding() {
		let def: Definition = json_syntax::from_value(json_syntax::json!({
			"name": "http://schema.org/name"
		}))
		.unwrap();
		assert_eq!(def.bindings.len(), 1);
		match def.bindings.get("name").unwrap() {
			Nullable::Some(TermDefinition::Simple(s)) => {
				assert_eq!(s.as_str(), "http://schema.org/name")
			}
			other => panic!("unexpected binding: {other:?}"),
		}
	}
}
