use crate::{add_value, compact_iri, compact_property, container_contains, Error, Options};
use json_ld_context_processing::{Options as ProcessingOptions, Process, ProcessingMode};
use json_ld_core::{Context, Id, Loader, Node, Term};
use json_ld_syntax::{Container, ContainerKind, Keyword};

fn optional_string(s: Option<String>) -> json_syntax::Value {
	s.map(Into::into).unwrap_or(json_syntax::Value::Null)
}

/// Compact the given indexed node.
#[allow(clippy::too_many_arguments)]
pub async fn compact_indexed_node_with(
	node: &Node,
	index: Option<&str>,
	mut active_context: &Context,
	type_scoped_context: &Context,
	active_property: Option<&str>,
	loader: &impl Loader,
	options: Options,
) -> Result<json_syntax::Value, Error> {
	// If active context has a previous context, the active context is not propagated.
	// If element does not contain an @value entry, and element does not consist of
	// a single @id entry, set active context to previous context from active context,
	// as the scope of a term-scoped context does not apply when processing new node objects.
	if !(node.is_empty() && node.id().is_some()) {
		if let Some(previous_context) = active_context.previous_context() {
			active_context = previous_context
		}
	}

	// If the term definition for active property in active context has a local context:
	let mut owned_context = None;
	if let Some(active_property) = active_property {
		if let Some(normal) = type_scoped_context.get(active_property).and_then(|d| d.as_normal().cloned()) {
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
	let mut active_context = owned_context.as_ref().unwrap_or(active_context);

	let mut result = json_syntax::Object::default();

	if !node.types().is_empty() {
		// If element has an @type entry, create a new array compacted types initialized by
		// transforming each expanded type of that entry into its compacted form by IRI
		// compacting expanded type. Then, for each term in compacted types ordered
		// lexicographically:
		let mut compacted_types = Vec::new();
		for ty in node.types() {
			let compacted_ty = compact_iri(type_scoped_context, &Term::Id(ty.clone()), true, false, options)?;
			compacted_types.push(compacted_ty.unwrap_or_default())
		}

		compacted_types.sort();

		let mut next_context = None;
		for term in &compacted_types {
			if let Some(term_definition) = type_scoped_context.get(term.as_str()) {
				if let Some(normal) = term_definition.as_normal() {
					if let Some(local_context) = normal.context.as_deref() {
						let processing_options = ProcessingOptions::from(options).without_propagation();
						next_context = Some(
							local_context
								.process_with(
									next_context.as_ref().unwrap_or(active_context),
									loader,
									normal.base_url.clone(),
									processing_options,
								)
								.await?
								.into_processed(),
						)
					}
				}
			}
		}
		if let Some(next_context) = next_context {
			owned_context = Some(next_context);
			active_context = owned_context.as_ref().unwrap();
		}
	}

	// For each key expanded property and value expanded value in element, ordered
	// lexicographically by expanded property if ordered is true:
	let mut expanded_entries: Vec<_> = node.properties().iter().collect();
	if options.ordered {
		expanded_entries.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()))
	}

	// If expanded property is @id:
	if let Some(id) = node.id() {
		let id_term = Term::Id(id.clone());

		if node.is_empty() {
			// If the type mapping of active property is set to @id,
			// set result to the result of IRI compacting the value associated
			// with the @id entry using false for vocab.
			let type_mapping = active_property
				.and_then(|prop| active_context.get(prop))
				.and_then(|def| def.as_normal().and_then(|n| n.typ.clone()));

			if matches!(type_mapping, Some(json_ld_core::context::TermType::Id)) {
				let compacted_value = compact_iri(active_context, &id_term, false, false, options)?;
				return Ok(optional_string(compacted_value));
			}

			// Otherwise, if the type mapping of active property is set to @vocab,
			// set result to the result of IRI compacting the value associated with the @id entry.
			if matches!(type_mapping, Some(json_ld_core::context::TermType::Vocab)) {
				let compacted_value = compact_iri(active_context, &id_term, true, false, options)?;
				return Ok(optional_string(compacted_value));
			}
		}

		let compacted_value = compact_iri(active_context, &id_term, false, false, options)?;
		let alias = compact_iri(active_context, &Term::Keyword(Keyword::Id), true, false, options)?;

		if let Some(key) = alias {
			result.insert(key.into(), optional_string(compacted_value));
		}
	}

	compact_types(&mut result, node.types(), active_context, type_scoped_context, options)?;

	// If expanded property is @reverse:
	if !node.reverse_properties().is_empty() {
		let active_property = "@reverse";
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
		let active_context = owned_context.as_ref().unwrap_or(active_context);

		let mut reverse_result = json_syntax::Object::default();
		for (expanded_property, expanded_value) in node.reverse_properties().iter() {
			let expanded_value: Vec<_> = expanded_value
				.iter()
				.map(|n| n.as_ref().map_inner(|n| json_ld_core::Object::Node(Box::new(n.clone()))))
				.collect();
			compact_property(
				&mut reverse_result,
				&Term::Id(Id::iri(expanded_property.clone())),
				expanded_value.iter(),
				active_context,
				loader,
				true,
				options,
			)
			.await?;
		}

		let mut reverse_map = json_syntax::Object::default();
		for (property, mapped_value) in reverse_result.iter_mut() {
			let mut value = json_syntax::Value::Null;
			std::mem::swap(&mut value, &mut *mapped_value);

			if let Some(term_definition) = active_context.get(property.as_str()) {
				if term_definition.as_normal().is_some_and(|n| n.reverse_property) {
					let container = term_definition.container();
					let as_array =
						container_contains(container.as_ref(), ContainerKind::Set) || !options.compact_arrays;

					add_value(&mut result, property, value, as_array);
					continue;
				}
			}

			reverse_map.insert(property.clone(), value);
		}

		if !reverse_map.is_empty() {
			let alias = compact_iri(active_context, &Term::Keyword(Keyword::Reverse), true, false, options)?;
			result.insert(alias.unwrap().into(), reverse_map.into());
		}
	}

	// If expanded property is @index and active property has a container mapping in
	// active context that includes @index,
	if let Some(index_entry) = index {
		let mut index_container = false;
		if let Some(active_property) = active_property {
			if let Some(active_property_definition) = active_context.get(active_property) {
				if container_contains(active_property_definition.container().as_ref(), ContainerKind::Index) {
					index_container = true;
				}
			}
		}

		if !index_container {
			let alias = compact_iri(active_context, &Term::Keyword(Keyword::Index), true, false, options)?;
			result.insert(alias.unwrap().into(), index_entry.into());
		}
	}

	if let Some(graph_entry) = node.graph() {
		compact_property(
			&mut result,
			&Term::Keyword(Keyword::Graph),
			graph_entry.iter(),
			active_context,
			loader,
			false,
			options,
		)
		.await?
	}

	for (expanded_property, expanded_value) in expanded_entries {
		compact_property(
			&mut result,
			&Term::Id(Id::iri(expanded_property.clone())),
			expanded_value.iter(),
			active_context,
			loader,
			false,
			options,
		)
		.await?
	}

	if let Some(included_entry) = node.included() {
		let included: Vec<_> = included_entry
			.iter()
			.map(|n| n.as_ref().map_inner(|n| json_ld_core::Object::Node(Box::new(n.clone()))))
			.collect();
		compact_property(
			&mut result,
			&Term::Keyword(Keyword::Included),
			included.iter(),
			active_context,
			loader,
			false,
			options,
		)
		.await?
	}

	Ok(result.into())
}

/// Compact the given list of types into the given `result` compacted object.
fn compact_types(
	result: &mut json_syntax::Object,
	types: &[Id],
	active_context: &Context,
	type_scoped_context: &Context,
	options: Options,
) -> Result<(), Error> {
	if !types.is_empty() {
		let compacted_value = if types.len() == 1 {
			optional_string(compact_iri(type_scoped_context, &Term::Id(types[0].clone()), true, false, options)?)
		} else {
			let mut compacted_value = Vec::with_capacity(types.len());
			for ty in types {
				let compacted_ty = compact_iri(type_scoped_context, &Term::Id(ty.clone()), true, false, options)?;
				compacted_value.push(optional_string(compacted_ty))
			}
			json_syntax::Value::Array(compacted_value)
		};

		let alias = compact_iri(active_context, &Term::Keyword(Keyword::Type), true, false, options)?.unwrap();

		let container_mapping: Option<Container> = active_context.get(alias.as_str()).and_then(|d| d.container());
		let as_array = (options.processing_mode == ProcessingMode::JsonLd1_1
			&& container_contains(container_mapping.as_ref(), ContainerKind::Set))
			|| !options.compact_arrays;

		add_value(result, &alias, compacted_value, as_array)
	}

	Ok(())
}
