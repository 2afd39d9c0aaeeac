use crate::{Container, Direction, LenientLangTagBuf, Term};
use json_ld_syntax::context::term_definition::{Index, Nest};
use std::collections::HashMap;

/// A processed term definition for the special `@type` keyword: the only
/// entries JSON-LD 1.1 allows it to carry (`@container: @set`, optionally
/// `@protected`).
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct TypeTermDefinition {
	pub protected: bool,
}

/// A processed (ordinary) term definition.
#[derive(Clone, PartialEq, Debug)]
pub struct NormalTermDefinition {
	/// The term's IRI/keyword mapping (`None` only transiently, while a
	/// term is mid-definition and depends on itself).
	pub value: Option<Term>,

	/// `true` if the term may be used as a compact-IRI prefix.
	pub prefix: bool,

	pub protected: bool,

	/// `true` if this term was declared with `@reverse` rather than `@id`.
	pub reverse_property: bool,

	pub base_url: Option<iref::IriBuf>,

	/// A local context to apply (scoped context) whenever this term is
	/// used as a key.
	pub context: Option<Box<json_ld_syntax::context::Context>>,

	pub container: Option<Container>,
	pub direction: Option<Direction>,
	pub index: Option<Index>,
	pub language: Option<LenientLangTagBuf>,
	pub nest: Option<Nest>,
	pub typ: Option<TermType>,
}

impl Default for NormalTermDefinition {
	fn default() -> Self {
		Self {
			value: None,
			prefix: false,
			protected: false,
			reverse_property: false,
			base_url: None,
			context: None,
			container: None,
			direction: None,
			index: None,
			language: None,
			nest: None,
			typ: None,
		}
	}
}

/// The processed value of a term's `@type` entry.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TermType {
	Id,
	Json,
	None,
	Vocab,
	Other(iref::IriBuf),
}

/// A processed term definition, as stored in a [`super::Context`].
#[derive(Clone, PartialEq, Debug)]
pub enum TermDefinition {
	Type(TypeTermDefinition),
	Normal(Box<NormalTermDefinition>),
}

impl TermDefinition {
	pub fn is_protected(&self) -> bool {
		match self {
			Self::Type(t) => t.protected,
			Self::Normal(n) => n.protected,
		}
	}

	pub fn as_normal(&self) -> Option<&NormalTermDefinition> {
		match self {
			Self::Normal(n) => Some(n),
			_ => None,
		}
	}

	pub fn value(&self) -> Option<&Term> {
		self.as_normal().and_then(|n| n.value.as_ref())
	}

	pub fn container(&self) -> Option<Container> {
		match self {
			Self::Type(_) => Some(Container::One(json_ld_syntax::ContainerKind::Set)),
			Self::Normal(n) => n.container.clone(),
		}
	}

	/// Structural equality ignoring the `@protected` flag: the rule
	/// JSON-LD 1.1 §4.2.2 uses to decide whether redefining a protected
	/// term is actually a no-op (allowed) or a real change (an error).
	pub fn equivalent_modulo_protected(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Type(_), Self::Type(_)) => true,
			(Self::Normal(a), Self::Normal(b)) => {
				a.value == b.value
					&& a.prefix == b.prefix
					&& a.reverse_property == b.reverse_property
					&& a.base_url == b.base_url
					&& a.context == b.context
					&& a.container == b.container
					&& a.direction == b.direction
					&& a.index == b.index
					&& a.language == b.language
					&& a.nest == b.nest
					&& a.typ == b.typ
			}
			_ => false,
		}
	}
}

/// All of a context's term definitions, keyed by term. The `@type`
/// keyword's own (restricted) term definition is split out because it
/// cannot carry the full `NormalTermDefinition` field set.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Definitions {
	normal: HashMap<String, NormalTermDefinition>,
	type_: Option<TypeTermDefinition>,
}

impl Definitions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, term: &str) -> Option<TermDefinition> {
		if term == "@type" {
			self.type_.map(TermDefinition::Type)
		} else {
			self.normal.get(term).cloned().map(|d| TermDefinition::Normal(Box::new(d)))
		}
	}

	pub fn contains(&self, term: &str) -> bool {
		if term == "@type" {
			self.type_.is_some()
		} else {
			self.normal.contains_key(term)
		}
	}

	pub fn insert(&mut self, term: String, definition: TermDefinition) {
		match definition {
			TermDefinition::Type(t) => self.type_ = Some(t),
			TermDefinition::Normal(n) => {
				self.normal.insert(term, *n);
			}
		}
	}

	pub fn remove(&mut self, term: &str) {
		if term == "@type" {
			self.type_ = None;
		} else {
			self.normal.remove(term);
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, TermDefinitionRef)> {
		self.normal
			.iter()
			.map(|(k, v)| (k.as_str(), TermDefinitionRef::Normal(v)))
			.chain(
				self.type_
					.iter()
					.map(|t| ("@type", TermDefinitionRef::Type(t))),
			)
	}
}

/// Borrowed counterpart of [`TermDefinition`].
#[derive(Clone, Copy, Debug)]
pub enum TermDefinitionRef<'a> {
	Type(&'a TypeTermDefinition),
	Normal(&'a NormalTermDefinition),
}
