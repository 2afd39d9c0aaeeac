use json_ld_syntax::context::definition::{TypeTermDefinition, Vocab};
use json_ld_syntax::context::{Definition, TermDefinition};
use json_ld_syntax::{Direction, LenientLangTagBuf, Nullable};

/// A context definition merged with the definition it `@import`s, the
/// entries of `base` taking priority over those of `imported`.
pub struct Merged<'a> {
	base: &'a Definition,
	imported: Option<json_ld_syntax::context::Context>,
}

impl<'a> Merged<'a> {
	pub fn new(base: &'a Definition, imported: Option<json_ld_syntax::context::Context>) -> Self {
		Self { base, imported }
	}

	pub fn imported(&self) -> Option<&Definition> {
		self.imported.as_ref().and_then(|imported| match imported {
			json_ld_syntax::context::Context::One(
				json_ld_syntax::ContextEntry::Definition(def),
			) => Some(&**def),
			_ => None,
		})
	}

	pub fn base(&self) -> Option<Nullable<&iref::IriRef>> {
		self.base
			.base
			.as_ref()
			.or_else(|| self.imported().and_then(|i| i.base.as_ref()))
			.map(Nullable::as_deref)
	}

	pub fn vocab(&self) -> Option<Nullable<&Vocab>> {
		self.base
			.vocab
			.as_ref()
			.or_else(|| self.imported().and_then(|i| i.vocab.as_ref()))
			.map(Nullable::as_ref)
	}

	pub fn language(&self) -> Option<Nullable<&LenientLangTagBuf>> {
		self.base
			.language
			.as_ref()
			.or_else(|| self.imported().and_then(|i| i.language.as_ref()))
			.map(Nullable::as_ref)
	}

	pub fn direction(&self) -> Option<Nullable<Direction>> {
		self.base
			.direction
			.or_else(|| self.imported().and_then(|i| i.direction))
	}

	pub fn protected(&self) -> Option<bool> {
		self.base
			.protected
			.or_else(|| self.imported().and_then(|i| i.protected))
	}

	pub fn type_(&self) -> Option<TypeTermDefinition> {
		self.base
			.type_
			.or_else(|| self.imported().and_then(|i| i.type_))
	}

	/// Looks up `key` in `base`, falling back to `imported`.
	pub fn get(&self, key: &str) -> Option<Nullable<&TermDefinition>> {
		self.base
			.bindings
			.get(key)
			.or_else(|| self.imported().and_then(|i| i.bindings.get(key)))
			.map(Nullable::as_ref)
	}

	/// Iterates over every binding, `base`'s shadowing `imported`'s, in
	/// `imported` order first, then `base` order (matching the order the
	/// Context Processing Algorithm defines terms in after a merge).
	pub fn bindings(&self) -> impl Iterator<Item = (&str, Nullable<&TermDefinition>)> {
		let imported = self.imported().into_iter().flat_map(move |i| {
			i.bindings
				.iter()
				.filter(move |(k, _)| self.base.bindings.get(k.as_str()).is_none())
				.map(|(k, v)| (k.as_str(), v.as_ref()))
		});
		let base = self
			.base
			.bindings
			.iter()
			.map(|(k, v)| (k.as_str(), v.as_ref()));
		imported.chain(base)
	}
}

impl<'a> From<&'a Definition> for Merged<'a> {
	fn from(base: &'a Definition) -> Self {
		Self {
			base,
			imported: None,
		}
	}
}
