//! The processed (as opposed to raw syntax) `@context`: the result of
//! running the Context Processing Algorithm.
pub mod definition;
pub mod inverse;

pub use definition::{NormalTermDefinition, TermDefinition, TermType, TypeTermDefinition};
pub use inverse::InverseContext;

use crate::Term;
use definition::Definitions;
use iref::IriBuf;
use json_ld_syntax::{Direction, LenientLangTagBuf};
use once_cell::unsync::OnceCell;

/// A processed JSON-LD context: the mapping from terms to IRIs/keywords
/// plus the ambient settings (`@base`, `@vocab`, `@language`, `@direction`)
/// that IRI/value expansion and compaction consult.
#[derive(Clone, Debug)]
pub struct Context {
	original_base_url: Option<IriBuf>,
	base_iri: Option<IriBuf>,
	vocabulary: Option<Term>,
	default_language: Option<LenientLangTagBuf>,
	default_base_direction: Option<Direction>,
	previous_context: Option<Box<Context>>,
	definitions: Definitions,
	inverse: OnceCell<InverseContext>,
}

impl Default for Context {
	fn default() -> Self {
		Self::new(None)
	}
}

impl Context {
	/// Creates a new, empty "initial context" relative to `base_iri`.
	pub fn new(base_iri: Option<IriBuf>) -> Self {
		Self {
			original_base_url: base_iri.clone(),
			base_iri,
			vocabulary: None,
			default_language: None,
			default_base_direction: None,
			previous_context: None,
			definitions: Definitions::new(),
			inverse: OnceCell::new(),
		}
	}

	pub fn original_base_url(&self) -> Option<&iref::Iri> {
		self.original_base_url.as_deref()
	}

	pub fn base_iri(&self) -> Option<&iref::Iri> {
		self.base_iri.as_deref()
	}

	pub fn set_base_iri(&mut self, iri: Option<IriBuf>) {
		self.base_iri = iri;
		self.inverse.take();
	}

	pub fn vocabulary(&self) -> Option<&Term> {
		self.vocabulary.as_ref()
	}

	pub fn set_vocabulary(&mut self, vocabulary: Option<Term>) {
		self.vocabulary = vocabulary;
		self.inverse.take();
	}

	pub fn default_language(&self) -> Option<&LenientLangTagBuf> {
		self.default_language.as_ref()
	}

	pub fn set_default_language(&mut self, language: Option<LenientLangTagBuf>) {
		self.default_language = language;
	}

	pub fn default_base_direction(&self) -> Option<Direction> {
		self.default_base_direction
	}

	pub fn set_default_base_direction(&mut self, direction: Option<Direction>) {
		self.default_base_direction = direction;
	}

	pub fn previous_context(&self) -> Option<&Context> {
		self.previous_context.as_deref()
	}

	pub fn set_previous_context(&mut self, context: Context) {
		self.previous_context = Some(Box::new(context));
	}

	pub fn definitions(&self) -> &Definitions {
		&self.definitions
	}

	pub fn get(&self, term: &str) -> Option<TermDefinition> {
		self.definitions.get(term)
	}

	pub fn contains_term(&self, term: &str) -> bool {
		self.definitions.contains(term)
	}

	/// Defines (or redefines) `term`, invalidating the cached inverse
	/// context -- the next [`Context::inverse`] call will rebuild it.
	pub fn set(&mut self, term: String, definition: TermDefinition) {
		self.definitions.insert(term, definition);
		self.inverse.take();
	}

	pub fn remove(&mut self, term: &str) {
		self.definitions.remove(term);
		self.inverse.take();
	}

	pub fn has_protected_items(&self) -> bool {
		self.definitions.iter().any(|(_, d)| match d {
			definition::TermDefinitionRef::Type(t) => t.protected,
			definition::TermDefinitionRef::Normal(n) => n.protected,
		})
	}

	/// The lazily-constructed [`InverseContext`] used by compaction; built
	/// once and cached until the context is mutated.
	pub fn inverse(&self) -> &InverseContext {
		self.inverse.get_or_init(|| InverseContext::create(self))
	}
}
