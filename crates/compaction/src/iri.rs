use crate::Options;
use json_ld_core::{
	context::definition::TermDefinitionRef, object::Type, Context, IndexedObject, Object, Term,
};
use json_ld_syntax::{ContainerKind, Nullable};

pub struct IriConfusedWithPrefix;

/// Compact the given term without considering any value.
pub(crate) fn compact_iri(
	active_context: &Context,
	var: &Term,
	vocab: bool,
	reverse: bool,
	options: Options,
) -> Result<Option<String>, IriConfusedWithPrefix> {
	compact_iri_with_value(active_context, var, None, vocab, reverse, options)
}

pub(crate) fn compact_key(
	active_context: &Context,
	var: &Term,
	vocab: bool,
	reverse: bool,
	options: Options,
) -> Result<Option<json_syntax::object::Key>, IriConfusedWithPrefix> {
	Ok(compact_iri(active_context, var, vocab, reverse, options)?.map(Into::into))
}

/// Compact the given term, considering the given value object.
pub(crate) fn compact_iri_with(
	active_context: &Context,
	var: &Term,
	value: &IndexedObject,
	vocab: bool,
	reverse: bool,
	options: Options,
) -> Result<Option<String>, IriConfusedWithPrefix> {
	compact_iri_with_value(active_context, var, Some(value), vocab, reverse, options)
}

/// The `@type` selector used to pick a term with a matching `@type` entry
/// in its definition, following the "IRI Compaction" algorithm's notion of
/// type/language/any-mapped terms.
fn type_selector(value: &IndexedObject) -> Option<String> {
	match value.inner() {
		Object::Node(node) => {
			if node.is_graph() {
				None
			} else {
				Some("@id".to_string())
			}
		}
		Object::List(_) => None,
		Object::Value(v) => match v {
			json_ld_core::Value::LangString(_) => None,
			json_ld_core::Value::Literal(_, Some(Type::Json)) => Some("@json".to_string()),
			json_ld_core::Value::Literal(_, Some(Type::Id(iri))) => Some(iri.as_str().to_string()),
			json_ld_core::Value::Literal(_, None) => Some("@none".to_string()),
			json_ld_core::Value::Json(_) => Some("@json".to_string()),
		},
	}
}

fn lang_selector(value: &IndexedObject) -> Option<Option<String>> {
	match value.inner() {
		Object::Value(json_ld_core::Value::LangString(s)) => {
			Some(s.language().map(|l| l.as_str().to_string()))
		}
		_ => None,
	}
}

fn container_selector(value: Option<&IndexedObject>) -> Option<ContainerKind> {
	let value = value?;
	if value.index().is_some() && !value.inner().is_graph() {
		return Some(ContainerKind::Index);
	}

	match value.inner() {
		Object::List(_) => Some(ContainerKind::List),
		Object::Node(node) if node.is_graph() => Some(ContainerKind::Graph),
		Object::Value(json_ld_core::Value::LangString(_)) => Some(ContainerKind::Language),
		_ => None,
	}
}

/// Compact the given term, using `value` (if given) to refine the choice
/// between multiple terms mapped to the same IRI.
fn compact_iri_with_value(
	active_context: &Context,
	var: &Term,
	value: Option<&IndexedObject>,
	vocab: bool,
	reverse: bool,
	options: Options,
) -> Result<Option<String>, IriConfusedWithPrefix> {
	if var.is_null() {
		return Ok(None);
	}

	let var_str = var.as_str();

	if vocab {
		let container = container_selector(value);
		let type_sel = if reverse {
			Some("@reverse".to_string())
		} else {
			value.and_then(type_selector)
		};
		let lang_sel = if reverse { None } else { value.and_then(lang_selector) };

		if let Some(term) = active_context.inverse().select_term(
			var_str,
			match &container {
				Some(k) => Nullable::Some(k),
				None => Nullable::Null,
			},
			type_sel.as_deref(),
			lang_sel.as_ref().map(|lang| (lang, None)),
		) {
			return Ok(Some(term.to_string()));
		}

		// No simple term: try stripping the `@vocab` mapping's prefix.
		if let Some(vocab_mapping) = active_context.vocabulary() {
			let vocab_str = vocab_mapping.as_str();
			if !vocab_str.is_empty() {
				if let Some(suffix) = var_str.strip_prefix(vocab_str) {
					if !suffix.is_empty() && active_context.get(suffix).is_none() {
						return Ok(Some(suffix.to_string()));
					}
				}
			}
		}
	}

	// Try to build a compact IRI of the form `prefix:suffix`.
	let mut compact_iri: Option<String> = None;

	for (key, definition) in active_context.definitions().iter() {
		let TermDefinitionRef::Normal(def) = definition else { continue };

		if !def.prefix {
			continue;
		}

		let Some(iri_mapping) = def.value.as_ref() else { continue };
		let iri_mapping = iri_mapping.as_str();

		if iri_mapping.is_empty() || iri_mapping == var_str {
			continue;
		}

		if let Some(suffix) = var_str.strip_prefix(iri_mapping) {
			if suffix.is_empty() {
				continue;
			}

			let candidate = format!("{key}:{suffix}");

			// A prefix candidate is usable as long as it does not
			// redefine a different IRI (unless we're compacting a
			// value-less term, where any candidate is acceptable).
			let usable = match active_context.get(candidate.as_str()) {
				None => true,
				Some(candidate_def) => {
					value.is_none() && candidate_def.value().map(Term::as_str) == Some(var_str)
				}
			};

			if usable {
				let better = match &compact_iri {
					None => true,
					Some(current) => {
						candidate.len() < current.len()
							|| (candidate.len() == current.len() && candidate < *current)
					}
				};

				if better {
					compact_iri = Some(candidate);
				}
			}
		}
	}

	if let Some(compact_iri) = compact_iri {
		return Ok(Some(compact_iri));
	}

	// If `var`'s scheme matches a term in the active context flagged as a
	// usable prefix, a relative/absolute IRI reference could be confused
	// with a compact IRI: reject it rather than emit an ambiguous term.
	if let Some(iri) = var.as_iri() {
		let scheme = iri.scheme().as_str();
		if let Some(def) = active_context.get(scheme) {
			if def.as_normal().is_some_and(|n| n.prefix) {
				return Err(IriConfusedWithPrefix);
			}
		}
	}

	if !vocab {
		if let Some(base_iri) = active_context.base_iri() {
			if let Some(iri) = var.as_iri() {
				return Ok(Some(iri.relative_to(base_iri).as_str().to_string()));
			}
		}
	}

	Ok(Some(var_str.to_string()))
}
