//! The inverse context: a lazily-built index from IRI to candidate terms,
//! used by the Compaction Algorithm (§4.5) to pick the best term for a
//! given IRI/container/language/direction combination in roughly constant
//! time instead of scanning every term definition for every IRI compacted.
use crate::context::definition::{NormalTermDefinition, TermDefinition};
use crate::Context;
use indexmap::IndexMap;
use json_ld_syntax::{Container, Direction, Nullable};
use std::collections::HashMap;

/// How a language-tagged or directional value prefers to select a term:
/// by exact language, by exact direction, by both, by neither (`@none`),
/// or no preference at all.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum LangDir {
	Lang(Option<String>),
	LangDir(Option<String>, Option<Direction>),
	Dir(Option<Direction>),
	None,
}

#[derive(Clone, Debug, Default)]
struct ContainerMap {
	language: HashMap<LangDir, String>,
	typ: HashMap<TypeSelector, String>,
	any: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
enum TypeSelector {
	Id,
	Vocab,
	None,
	Other(String),
}

/// Inverse context: IRI -> (container -> candidate term), built once per
/// [`Context`] and cached on it.
#[derive(Clone, Debug, Default)]
pub struct InverseContext {
	map: IndexMap<String, HashMap<ContainerSelector, ContainerMap>>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum ContainerSelector {
	None,
	One(json_ld_syntax::ContainerKind),
}

impl InverseContext {
	/// Builds the inverse context from `context`'s term definitions,
	/// following the JSON-LD 1.1 "Inverse Context Creation" algorithm:
	/// terms are visited shortest-term-first (ties broken lexicographically)
	/// so that, for a given IRI, the first (and thus preferred) term
	/// recorded for each container/language/type selector wins.
	pub fn create(context: &Context) -> Self {
		let mut inverse = Self::default();
		let mut terms: Vec<(&str, &NormalTermDefinition)> = context
			.definitions()
			.iter()
			.filter_map(|(term, def)| match def {
				crate::context::definition::TermDefinitionRef::Normal(n) => Some((term, n)),
				_ => None,
			})
			.collect();

		terms.sort_by(|(a_term, _), (b_term, _)| {
			a_term.len().cmp(&b_term.len()).then_with(|| a_term.cmp(b_term))
		});

		for (term, def) in terms {
			let Some(value) = &def.value else { continue };
			let iri = value.as_str().to_string();
			let container_key = match &def.container {
				Some(Container::One(k)) => ContainerSelector::One(*k),
				_ => ContainerSelector::None,
			};

			let entry = inverse
				.map
				.entry(iri)
				.or_default()
				.entry(container_key)
				.or_insert_with(ContainerMap::default);

			if let Some(lang) = &def.language {
				entry
					.language
					.entry(LangDir::Lang(Some(lang.as_str().to_string())))
					.or_insert_with(|| term.to_string());
			} else if let Some(typ) = &def.typ {
				let selector = match typ {
					crate::context::definition::TermType::Id => TypeSelector::Id,
					crate::context::definition::TermType::Vocab => TypeSelector::Vocab,
					crate::context::definition::TermType::None => TypeSelector::None,
					crate::context::definition::TermType::Json => {
						TypeSelector::Other("@json".to_string())
					}
					crate::context::definition::TermType::Other(iri) => {
						TypeSelector::Other(iri.as_str().to_string())
					}
				};
				entry.typ.entry(selector).or_insert_with(|| term.to_string());
			} else {
				entry.any.get_or_insert_with(|| term.to_string());
			}
		}

		inverse
	}

	/// Finds the best existing term for `iri` under the given container,
	/// preferring an exact type match, then an exact language/direction
	/// match, then any term mapped with no type/language constraint.
	pub fn select_term(
		&self,
		iri: &str,
		container: Nullable<&json_ld_syntax::ContainerKind>,
		type_selector: Option<&str>,
		lang_selector: Option<(&Option<String>, Option<Direction>)>,
	) -> Option<&str> {
		let by_container = self.map.get(iri)?;
		let key = match container {
			Nullable::Some(k) => ContainerSelector::One(*k),
			Nullable::Null => ContainerSelector::None,
		};
		let entry = by_container.get(&key).or_else(|| by_container.get(&ContainerSelector::None))?;

		if let Some(ty) = type_selector {
			let selector = match ty {
				"@id" => TypeSelector::Id,
				"@vocab" => TypeSelector::Vocab,
				"@none" => TypeSelector::None,
				other => TypeSelector::Other(other.to_string()),
			};
			if let Some(term) = entry.typ.get(&selector) {
				return Some(term);
			}
		}

		if let Some((lang, _dir)) = lang_selector {
			if let Some(term) = entry.language.get(&LangDir::Lang(lang.clone())) {
				return Some(term);
			}
		}

		entry.any.as_deref()
	}
}

#[allow(unused)]
fn _assert_term_definition_is_used(_: &TermDefinition) {}
