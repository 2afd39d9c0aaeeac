use crate::{compact_iri, compact_key, container_contains, Error, Options};
use json_ld_context_processing::{Options as ProcessingOptions, Process};
use json_ld_core::{
	context::TermType,
	object::{value::Literal, Type},
	Context, Id, Loader, Term, Value,
};
use json_ld_syntax::{Container, ContainerKind, Keyword};

/// Compact the given indexed value.
pub async fn compact_indexed_value_with(
	value: &Value,
	index: Option<&str>,
	active_context: &Context,
	active_property: Option<&str>,
	loader: &impl Loader,
	options: Options,
) -> Result<json_syntax::Value, Error> {
	// If the term definition for active property in active context has a local context:
	let mut owned_context = None;
	if let Some(active_property) = active_property {
		if let Some(normal) = active_context.get(active_property).and_then(|d| d.as_normal().cloned()) {
			if let Some(local_context) = normal.context.as_deref() {
				owned_context = Some(
					local_context
						.process_with(
							active_context,
							loader,
							normal.base_url.clone(),
							ProcessingOptions::from(options).with_override(),
						)
						.await?
						.into_processed(),
				)
			}
		}
	}
	let active_context = owned_context.as_ref().unwrap_or(active_context);

	// If element has an @value or @id entry and the result of using the Value Compaction algorithm,
	// passing active context, active property, and element as value is a scalar,
	// or the term definition for active property has a type mapping of @json,
	// return that result.

	// Here starts the Value Compaction Algorithm.
	let mut result = json_syntax::Object::default();

	let active_property_definition = active_property.and_then(|p| active_context.get(p));
	let active_property_normal = active_property_definition.as_ref().and_then(|d| d.as_normal());

	// Initialize language to the language mapping for active property in active context,
	// if any, otherwise to the default language of active context.
	let language = match active_property_normal {
		Some(def) if def.language.is_some() => def.language.as_ref().map(|l| l.as_str().to_string()),
		Some(_) => active_context.default_language().map(|l| l.as_str().to_string()),
		None => active_context.default_language().map(|l| l.as_str().to_string()),
	};

	// Initialize direction to the direction mapping for active property in active context,
	// if any, otherwise to the default base direction of active context.
	let direction = match active_property_normal {
		Some(def) if def.direction.is_some() => def.direction,
		Some(_) => active_context.default_base_direction(),
		None => active_context.default_base_direction(),
	};

	// Otherwise, if value has an @type entry whose value matches the type mapping of
	// active property, set result to the value associated with the @value entry of value.
	let type_mapping = active_property_normal.and_then(|def| def.typ.clone());

	let container_mapping: Option<Container> =
		active_property_definition.as_ref().and_then(|d| d.container());

	let remove_index =
		(index.is_some() && container_contains(container_mapping.as_ref(), ContainerKind::Index)) || index.is_none();

	match value {
		Value::Literal(lit, ty) => {
			let ty_matches = match (ty, &type_mapping) {
				(Some(Type::Id(iri)), Some(TermType::Other(mapped))) => iri == mapped,
				(None, Some(TermType::None)) => true,
				(Some(Type::Json), Some(TermType::Json)) => true,
				_ => false,
			};

			if ty_matches && remove_index {
				match lit {
					Literal::Null => return Ok(json_syntax::Value::Null),
					Literal::Boolean(b) => return Ok(json_syntax::Value::Boolean(*b)),
					Literal::Number(n) => return Ok(json_syntax::Value::Number(n.clone())),
					Literal::String(s) => {
						if ty.is_some() || (language.is_none() && direction.is_none()) {
							return Ok(json_syntax::Value::String(s.as_str().into()));
						} else {
							let compact_key =
								compact_key(active_context, &Term::Keyword(Keyword::Value), true, false, options)?;
							result.insert(compact_key.unwrap(), json_syntax::Value::String(s.as_str().into()));
						}
					}
				}
			} else {
				let compact_key = compact_key(active_context, &Term::Keyword(Keyword::Value), true, false, options)?;
				match lit {
					Literal::Null => {
						result.insert(compact_key.unwrap(), json_syntax::Value::Null);
					}
					Literal::Boolean(b) => {
						result.insert(compact_key.unwrap(), json_syntax::Value::Boolean(*b));
					}
					Literal::Number(n) => {
						result.insert(compact_key.unwrap(), json_syntax::Value::Number(n.clone()));
					}
					Literal::String(s) => {
						result.insert(compact_key.unwrap(), json_syntax::Value::String(s.as_str().into()));
					}
				}

				if let Some(ty) = ty {
					let compact_key =
						crate::compact_key(active_context, &Term::Keyword(Keyword::Type), true, false, options)?;

					let ty_term = match ty {
						Type::Json => Term::Keyword(Keyword::Json),
						Type::Id(iri) => Term::Id(Id::iri(iri.clone())),
					};
					let compact_ty = compact_iri(active_context, &ty_term, true, false, options)?;
					result.insert(
						compact_key.unwrap(),
						match compact_ty {
							Some(s) => json_syntax::Value::String(s.into()),
							None => json_syntax::Value::Null,
						},
					);
				}
			}
		}
		Value::LangString(ls) => {
			let ls_language = ls.language().map(|l| l.as_str().to_string());
			let ls_direction = ls.direction();

			if remove_index && (ls_language.is_none() || language == ls_language) && (ls_direction.is_none() || direction == ls_direction)
			{
				return Ok(json_syntax::Value::String(ls.as_str().into()));
			} else {
				let compact_key = compact_key(active_context, &Term::Keyword(Keyword::Value), true, false, options)?;
				result.insert(compact_key.unwrap(), json_syntax::Value::String(ls.as_str().into()));

				if let Some(language) = ls.language() {
					let compact_key =
						crate::compact_key(active_context, &Term::Keyword(Keyword::Language), true, false, options)?;
					result.insert(compact_key.unwrap(), json_syntax::Value::String(language.as_str().into()));
				}

				if let Some(direction) = ls.direction() {
					let compact_key =
						crate::compact_key(active_context, &Term::Keyword(Keyword::Direction), true, false, options)?;
					result.insert(compact_key.unwrap(), json_syntax::Value::String(direction.as_str().into()));
				}
			}
		}
		Value::Json(json) => {
			if matches!(type_mapping, Some(TermType::Json)) && remove_index {
				return Ok(json.clone());
			} else {
				let compact_key = compact_key(active_context, &Term::Keyword(Keyword::Value), true, false, options)?;
				result.insert(compact_key.unwrap(), json.clone());

				let compact_key =
					crate::compact_key(active_context, &Term::Keyword(Keyword::Type), true, false, options)?;

				let compact_ty = compact_iri(active_context, &Term::Keyword(Keyword::Json), true, false, options)?;
				result.insert(
					compact_key.unwrap(),
					match compact_ty {
						Some(s) => json_syntax::Value::String(s.into()),
						None => json_syntax::Value::Null,
					},
				);
			}
		}
	}

	if !remove_index {
		if let Some(index) = index {
			let compact_key = compact_key(active_context, &Term::Keyword(Keyword::Index), true, false, options)?;
			result.insert(compact_key.unwrap(), json_syntax::Value::String(index.into()));
		}
	}

	Ok(json_syntax::Value::Object(result))
}
