use crate::{
	expand_array, expand_iri, expand_literal, expand_node, expand_value, Error, Expanded,
	ForwardToContext, GivenLiteralValue, LiteralValue, Loader, Options, Warning, WarningHandler,
};
use json_ld_context_processing::{Options as ProcessingOptions, Process};
use json_ld_core::{
	context::TermDefinition, object, Context, Id, Indexed, Object, Term, ValidId,
};
use json_ld_syntax::{Keyword, Nullable};
use json_syntax::{object::Entry, Value};
use std::borrow::Cow;

pub(crate) struct ExpandedEntry<'a>(pub &'a str, pub Term, pub &'a Value);

#[derive(Clone, Copy)]
pub(crate) enum ActiveProperty<'a> {
	Some(&'a str),
	None,
}

impl<'a> ActiveProperty<'a> {
	pub fn is_some(&self) -> bool {
		matches!(self, Self::Some(_))
	}

	pub fn is_none(&self) -> bool {
		matches!(self, Self::None)
	}

	pub fn get_from(&self, context: &Context) -> Option<TermDefinition> {
		match self {
			Self::Some(s) => context.get(s),
			Self::None => None,
		}
	}
}

impl<'a> PartialEq<Keyword> for ActiveProperty<'a> {
	fn eq(&self, other: &Keyword) -> bool {
		match self {
			Self::Some(s) => *s == other.as_str(),
			_ => false,
		}
	}
}

/// Result of the expansion of a single element in a JSON-LD document.
pub(crate) type ElementExpansionResult = Result<Expanded, Error>;

/// Expand an element.
///
/// See <https://www.w3.org/TR/json-ld11-api/#expansion-algorithm>.
/// The default specified value for `ordered` and `from_map` is `false`.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn expand_element<'a>(
	active_context: &'a Context,
	active_property: ActiveProperty<'a>,
	element: &'a Value,
	base_url: Option<&'a iref::Iri>,
	options: Options,
	from_map: bool,
	loader: &impl Loader,
	warnings: &mut impl WarningHandler,
) -> ElementExpansionResult {
	// If `element` is null, return null.
	if element.is_null() {
		return Ok(Expanded::Null);
	}

	let active_property_definition = active_property.get_from(active_context);
	let active_property_normal = active_property_definition
		.as_ref()
		.and_then(|d| d.as_normal());

	// If `active_property` has a term definition in `active_context` with a local context,
	// initialize property-scoped context to that local context.
	let mut property_scoped_base_url = None;
	let property_scoped_context = if let Some(normal) = active_property_normal {
		if let Some(base_url) = normal.base_url.as_ref() {
			property_scoped_base_url = Some(base_url.clone());
		}

		normal.context.as_deref()
	} else {
		None
	};

	match element {
		Value::Null => unreachable!(),
		Value::Array(element) => {
			Box::pin(expand_array(
				active_context,
				active_property,
				active_property_definition,
				element,
				base_url,
				options,
				from_map,
				loader,
				warnings,
			))
			.await
		}

		Value::Object(element) => {
			// Preliminary key expansions.
			let mut preliminary_value_entry = None;
			let mut preliminary_id_entry = None;
			for Entry { key, value } in element.entries() {
				match expand_iri(
					active_context,
					Nullable::Some(key.as_str().into()),
					false,
					Some(options.policy.vocab),
					&mut ForwardToContext(warnings),
				)? {
					Some(Term::Keyword(Keyword::Value)) => {
						preliminary_value_entry = Some(value.clone())
					}
					Some(Term::Keyword(Keyword::Id)) => preliminary_id_entry = Some(value.clone()),
					_ => (),
				}
			}

			// Otherwise element is a map.
			// If `active_context` has a `previous_context`, the active context is not
			// propagated.
			let mut active_context = Cow::Borrowed(active_context);
			if let Some(previous_context) = active_context.previous_context() {
				if !from_map
					&& preliminary_value_entry.is_none()
					&& !(element.len() == 1 && preliminary_id_entry.is_some())
				{
					active_context = Cow::Owned(previous_context.clone())
				}
			}

			// If `property_scoped_context` is defined, set `active_context` to the result of
			// the Context Processing algorithm.
			if let Some(property_scoped_context) = property_scoped_context {
				let processing_options: ProcessingOptions = options.into();
				active_context = Cow::Owned(
					property_scoped_context
						.process_with(
							active_context.as_ref(),
							loader,
							property_scoped_base_url,
							processing_options.with_override(),
						)
						.await?
						.into_processed(),
				);
			}

			// If `element` contains the entry `@context`, set `active_context` to the result
			// of the Context Processing algorithm.
			if let Some(local_context) = element
				.get_unique("@context")
				.map_err(Error::duplicate_key_ref)?
			{
				let local_context: json_ld_syntax::context::Context =
					json_syntax::from_value(local_context.clone())
						.map_err(|e| Error::InvalidContext(e.to_string()))?;

				active_context = Cow::Owned(
					local_context
						.process_with(
							active_context.as_ref(),
							loader,
							base_url.map(ToOwned::to_owned),
							options.into(),
						)
						.await?
						.into_processed(),
				);
			}

			let entries: Cow<[Entry]> = if options.ordered {
				Cow::Owned(element.entries().to_vec())
			} else {
				Cow::Borrowed(element.entries())
			};

			let mut type_entries: Vec<&Entry> = Vec::new();
			for entry @ Entry { key, .. } in entries.iter() {
				let expanded_key = expand_iri(
					active_context.as_ref(),
					Nullable::Some(key.as_str().into()),
					false,
					Some(options.policy.vocab),
					&mut ForwardToContext(warnings),
				)?;

				if let Some(Term::Keyword(Keyword::Type)) = expanded_key {
					type_entries.push(entry);
				}
			}

			type_entries.sort_unstable_by_key(|entry| &entry.key);

			// Initialize `type_scoped_context` to `active_context`.
			let type_scoped_context: &Context = active_context.as_ref();
			let mut active_context = Cow::Borrowed(type_scoped_context);

			// For each `key` and `value` in `element` ordered lexicographically by key where
			// key IRI expands to @type:
			for Entry { value, .. } in &type_entries {
				let value = Value::force_as_array(value);

				let mut sorted_value = Vec::with_capacity(value.len());
				for term in value {
					if let Some(s) = term.as_str() {
						sorted_value.push(s);
					}
				}

				sorted_value.sort_unstable();

				for term in sorted_value {
					if let Some(term_definition) = type_scoped_context.get(term) {
						if let Some(local_context) = term_definition
							.as_normal()
							.and_then(|d| d.context.as_deref())
						{
							let term_base_url = term_definition
								.as_normal()
								.and_then(|d| d.base_url.clone());
							let processing_options: ProcessingOptions = options.into();
							active_context = Cow::Owned(
								local_context
									.process_with(
										active_context.as_ref(),
										loader,
										term_base_url,
										processing_options.without_propagation(),
									)
									.await?
									.into_processed(),
							);
						}
					}
				}
			}

			// Initialize `input_type` to expansion of the last value of the first entry in
			// `element` expanding to `@type` (if any).
			let input_type = if let Some(Entry { value, .. }) = type_entries.first() {
				let value = Value::force_as_array(value);
				if let Some(input_type) = value.last() {
					input_type
						.as_str()
						.map(|input_type_str| {
							expand_iri(
								active_context.as_ref(),
								Nullable::Some(input_type_str.into()),
								false,
								Some(options.policy.vocab),
								&mut ForwardToContext(warnings),
							)
						})
						.transpose()?
						.flatten()
				} else {
					None
				}
			} else {
				None
			};

			let mut expanded_entries: Vec<ExpandedEntry> = Vec::with_capacity(element.len());
			let mut list_entry = None;
			let mut set_entry = None;
			let mut value_entry = None;
			for Entry { key, value } in entries.iter() {
				if key.is_empty() {
					warnings.handle(Warning::EmptyTerm);
				}

				let expanded_key = expand_iri(
					active_context.as_ref(),
					Nullable::Some(key.as_str().into()),
					false,
					Some(options.policy.vocab),
					&mut ForwardToContext(warnings),
				)?;

				if let Some(expanded_key) = expanded_key {
					match &expanded_key {
						Term::Keyword(Keyword::Value) => value_entry = Some(value.clone()),
						Term::Keyword(Keyword::List) => {
							if active_property.is_some() && active_property != Keyword::Graph {
								list_entry = Some(value.clone())
							}
						}
						Term::Keyword(Keyword::Set) => set_entry = Some(value.clone()),
						Term::Id(Id::Valid(ValidId::Blank(id))) => {
							warnings.handle(Warning::BlankNodeIdProperty(id.clone()));
						}
						_ => (),
					}

					expanded_entries.push(ExpandedEntry(key, expanded_key, value))
				}
			}

			if let Some(list_entry) = list_entry {
				// List objects.
				let mut index = None;
				for ExpandedEntry(_, expanded_key, value) in expanded_entries {
					match expanded_key {
						Term::Keyword(Keyword::Index) => match value.as_str() {
							Some(value) => index = Some(value.to_string()),
							None => return Err(Error::InvalidIndexValue),
						},
						Term::Keyword(Keyword::List) => (),
						_ => return Err(Error::InvalidSetOrListObject),
					}
				}

				let mut result = Vec::new();
				let list_entry = Value::force_as_array(&list_entry);
				for item in list_entry {
					let e = Box::pin(expand_element(
						active_context.as_ref(),
						active_property,
						item,
						base_url,
						options,
						false,
						loader,
						warnings,
					))
					.await?;
					result.extend(e)
				}

				Ok(Expanded::Object(Indexed::new(
					Object::List(object::List::new(result)),
					index,
				)))
			} else if let Some(set_entry) = set_entry {
				// Set objects.
				for ExpandedEntry(_, expanded_key, _) in expanded_entries {
					match expanded_key {
						Term::Keyword(Keyword::Index) => (),
						Term::Keyword(Keyword::Set) => (),
						_ => return Err(Error::InvalidSetOrListObject),
					}
				}

				Box::pin(expand_element(
					active_context.as_ref(),
					active_property,
					&set_entry,
					base_url,
					options,
					false,
					loader,
					warnings,
				))
				.await
			} else if let Some(value_entry) = value_entry {
				// Value objects.
				let expanded_value = expand_value(
					active_context.as_ref(),
					options.policy.vocab,
					input_type,
					type_scoped_context,
					expanded_entries,
					&value_entry,
					warnings,
				)?;

				if let Some(value) = expanded_value {
					Ok(Expanded::Object(value))
				} else {
					Ok(Expanded::Null)
				}
			} else {
				// Node objects.
				let e = Box::pin(expand_node(
					active_context.as_ref(),
					type_scoped_context,
					active_property,
					expanded_entries,
					base_url,
					options,
					loader,
					warnings,
				))
				.await?;

				if let Some(result) = e {
					Ok(Expanded::Object(result.map_inner(Object::from)))
				} else {
					Ok(Expanded::Null)
				}
			}
		}

		_ => {
			// Literals.

			// If `active_property` is `null` or `@graph`, drop the free-floating scalar.
			if active_property.is_none() || active_property == Keyword::Graph {
				return Ok(Expanded::Null);
			}

			let active_context = if let Some(property_scoped_context) = property_scoped_context {
				let property_base_url = active_property_normal.and_then(|n| n.base_url.clone());

				let result = property_scoped_context
					.process_with(active_context, loader, property_base_url, options.into())
					.await?
					.into_processed();
				Cow::Owned(result)
			} else {
				Cow::Borrowed(active_context)
			};

			// Return the result of the Value Expansion algorithm.
			Ok(Expanded::Object(expand_literal(
				active_context.as_ref(),
				options.policy.vocab,
				active_property,
				LiteralValue::Given(GivenLiteralValue::new(element)),
				warnings,
			)?))
		}
	}
}
