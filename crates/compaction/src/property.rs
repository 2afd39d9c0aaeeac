use crate::{
	add_value, compact_collection_with, compact_iri, compact_iri_with, compact_key, container_contains, value_value,
	CompactFragment, CompactIndexedFragment, Error, Options,
};

use json_ld_core::{object::List, Context, Id, Indexed, IndexedObject, Loader, Node, Object, Term};
use json_ld_syntax::{Container, ContainerKind, Keyword};

#[allow(clippy::too_many_arguments)]
async fn compact_property_list(
	list: &List,
	expanded_index: Option<&str>,
	nest_result: &mut json_syntax::Object,
	container: Option<&Container>,
	as_array: bool,
	item_active_property: &str,
	active_context: &Context,
	loader: &impl Loader,
	options: Options,
) -> Result<(), Error> {
	// If expanded item is a list object:
	let mut compacted_item = Box::pin(compact_collection_with(
		list.iter(),
		active_context,
		active_context,
		Some(item_active_property),
		loader,
		options,
	))
	.await?;

	// If compacted item is not an array,
	// then set `compacted_item` to an array containing only `compacted_item`.
	if !compacted_item.is_array() {
		compacted_item = json_syntax::Value::Array(vec![compacted_item]);
	}

	// If container does not include @list:
	if !container_contains(container, ContainerKind::List) {
		let key = compact_key(active_context, &Term::Keyword(Keyword::List), true, false, options)?;
		let mut compacted_item_list_object = json_syntax::Object::default();
		compacted_item_list_object.insert(key.unwrap(), compacted_item);

		if let Some(index) = expanded_index {
			let key = compact_key(active_context, &Term::Keyword(Keyword::Index), true, false, options)?;
			compacted_item_list_object.insert(key.unwrap(), json_syntax::Value::String(index.into()));
		}

		let compacted_item = json_syntax::Value::Object(compacted_item_list_object);
		add_value(nest_result, item_active_property, compacted_item, as_array)
	} else {
		nest_result.insert(item_active_property.into(), compacted_item);
	}

	Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn compact_property_graph(
	node: &Node,
	expanded_index: Option<&str>,
	nest_result: &mut json_syntax::Object,
	container: Option<&Container>,
	as_array: bool,
	item_active_property: &str,
	active_context: &Context,
	loader: &impl Loader,
	options: Options,
) -> Result<(), Error> {
	// If expanded item is a graph object
	let mut compacted_item = Box::pin(
		node.graph()
			.unwrap()
			.compact_fragment_full(active_context, active_context, Some(item_active_property), loader, options),
	)
	.await?;

	if container_contains(container, ContainerKind::Graph) && container_contains(container, ContainerKind::Id) {
		if nest_result.get_unique(item_active_property).ok().unwrap().is_none() {
			nest_result.insert(item_active_property.into(), json_syntax::Object::default().into());
		}

		let map_object = nest_result.get_unique_mut(item_active_property).ok().unwrap().unwrap();
		let map_object = map_object.as_object_mut().unwrap();

		let (id_value, vocab) = match node.id() {
			Some(id) => (Term::Id(id.clone()), false),
			None => (Term::Keyword(Keyword::None), true),
		};

		let map_key = compact_iri(active_context, &id_value, vocab, false, options)?.unwrap();

		add_value(map_object, &map_key, compacted_item, as_array)
	} else if container_contains(container, ContainerKind::Graph)
		&& container_contains(container, ContainerKind::Index)
		&& is_simple_graph(node)
	{
		if nest_result.get_unique(item_active_property).ok().unwrap().is_none() {
			nest_result.insert(item_active_property.into(), json_syntax::Object::default().into());
		}

		let map_object = nest_result.get_unique_mut(item_active_property).ok().unwrap().unwrap();
		let map_object = map_object.as_object_mut().unwrap();

		let map_key = expanded_index.unwrap_or("@none");

		add_value(map_object, map_key, compacted_item, as_array)
	} else if container_contains(container, ContainerKind::Graph) && is_simple_graph(node) {
		// If `compacted_item` is an array with more than one value, it cannot be
		// directly represented, as multiple objects would be interpreted as
		// different named graphs.
		compacted_item = match compacted_item {
			json_syntax::Value::Array(items) if items.len() > 1 => {
				let key = compact_iri(active_context, &Term::Keyword(Keyword::Included), true, false, options)?
					.unwrap();
				let mut map = json_syntax::Object::default();
				map.insert(key.into(), json_syntax::Value::Array(items));
				json_syntax::Value::Object(map)
			}
			item => item,
		};

		add_value(nest_result, item_active_property, compacted_item, as_array)
	} else {
		// `container` does not include @graph or does not match one of the
		// previous cases.
		let key = compact_iri(active_context, &Term::Keyword(Keyword::Graph), true, false, options)?.unwrap();
		let mut map = json_syntax::Object::default();
		map.insert(key.into(), compacted_item);

		if let Some(id) = node.id() {
			let key = compact_iri(active_context, &Term::Keyword(Keyword::Id), false, false, options)?.unwrap();
			let value = compact_iri(active_context, &Term::Id(id.clone()), false, false, options)?;
			map.insert(
				key.into(),
				match value {
					Some(s) => s.into(),
					None => json_syntax::Value::Null,
				},
			);
		}

		if let Some(index_entry) = expanded_index {
			let key = compact_iri(active_context, &Term::Keyword(Keyword::Index), true, false, options)?.unwrap();
			map.insert(key.into(), index_entry.into());
		}

		let compacted_item = json_syntax::Value::Object(map);
		add_value(nest_result, item_active_property, compacted_item, as_array)
	}

	Ok(())
}

/// `true` if `node` is an unnamed (blank, identifier-less) graph container.
fn is_simple_graph(node: &Node) -> bool {
	node.is_graph() && node.id().is_none()
}

fn select_nest_result<'a>(
	result: &'a mut json_syntax::Object,
	active_context: &Context,
	item_active_property: &str,
	compact_arrays: bool,
) -> Result<(&'a mut json_syntax::Object, Option<Container>, bool), Error> {
	let (nest_result, container) = match active_context.get(item_active_property) {
		Some(term_definition) => {
			let nest_term = term_definition
				.as_normal()
				.and_then(|n| n.nest.as_ref());

			let nest_result = match nest_term {
				Some(nest_term) => {
					// If nest term is not @nest, or a term in the active context that
					// expands to @nest, an invalid @nest value error has been detected.
					if nest_term.as_str() != "@nest" {
						match active_context.get(nest_term.as_str()) {
							Some(term_def) if term_def.value() == Some(&Term::Keyword(Keyword::Nest)) => {}
							_ => return Err(Error::InvalidNestValue),
						}
					}

					if result.get_unique(nest_term.as_str()).ok().unwrap().is_none() {
						result.insert(nest_term.as_str().into(), json_syntax::Object::default().into());
					}

					let value = result.get_unique_mut(nest_term.as_str()).ok().unwrap().unwrap();
					value.as_object_mut().unwrap()
				}
				None => result,
			};

			(nest_result, term_definition.container())
		}
		None => (result, None),
	};

	let as_array = if container_contains(container.as_ref(), ContainerKind::Set)
		|| item_active_property == "@graph"
		|| item_active_property == "@list"
	{
		true
	} else {
		!compact_arrays
	};

	Ok((nest_result, container, as_array))
}

/// Compact the given property into the `result` compacted object.
#[allow(clippy::too_many_arguments)]
pub async fn compact_property<'a>(
	result: &mut json_syntax::Object,
	expanded_property: &Term,
	expanded_value: impl IntoIterator<Item = &'a IndexedObject>,
	active_context: &Context,
	loader: &impl Loader,
	inside_reverse: bool,
	options: Options,
) -> Result<(), Error> {
	let mut is_empty = true;

	for expanded_item in expanded_value {
		is_empty = false;

		let item_active_property = compact_iri_with(
			active_context,
			expanded_property,
			expanded_item,
			true,
			inside_reverse,
			options,
		)?;

		if let Some(item_active_property) = item_active_property {
			let (nest_result, container, as_array) =
				select_nest_result(result, active_context, &item_active_property, options.compact_arrays)?;

			match expanded_item.inner() {
				Object::List(list) => {
					compact_property_list(
						list,
						expanded_item.index(),
						nest_result,
						container.as_ref(),
						as_array,
						&item_active_property,
						active_context,
						loader,
						options,
					)
					.await?
				}
				Object::Node(node) if node.is_graph() => {
					compact_property_graph(
						node,
						expanded_item.index(),
						nest_result,
						container.as_ref(),
						as_array,
						&item_active_property,
						active_context,
						loader,
						options,
					)
					.await?
				}
				_ => {
					let mut compacted_item = Box::pin(expanded_item.compact_fragment_full(
						active_context,
						active_context,
						Some(&item_active_property),
						loader,
						options,
					))
					.await?;

					let container = container.as_ref();
					if !container_contains(container, ContainerKind::Graph)
						&& (container_contains(container, ContainerKind::Language)
							|| container_contains(container, ContainerKind::Index)
							|| container_contains(container, ContainerKind::Id)
							|| container_contains(container, ContainerKind::Type))
					{
						if nest_result
							.get_unique(item_active_property.as_str())
							.ok()
							.unwrap()
							.is_none()
						{
							nest_result.insert(item_active_property.clone().into(), json_syntax::Object::default().into());
						}

						let map_object = nest_result
							.get_unique_mut(item_active_property.as_str())
							.ok()
							.unwrap()
							.unwrap();
						let map_object = map_object.as_object_mut().unwrap();

						let container_type = if container_contains(container, ContainerKind::Language) {
							ContainerKind::Language
						} else if container_contains(container, ContainerKind::Index) {
							ContainerKind::Index
						} else if container_contains(container, ContainerKind::Id) {
							ContainerKind::Id
						} else {
							ContainerKind::Type
						};

						let mut container_key = compact_iri(
							active_context,
							&Term::Keyword(container_type.into()),
							true,
							false,
							options,
						)?;

						let index_key = active_context
							.get(item_active_property.as_str())
							.and_then(|def| def.as_normal().and_then(|n| n.index.clone()));

						let map_key = if container_type == ContainerKind::Language && expanded_item.inner().is_value() {
							if let Object::Value(value) = expanded_item.inner() {
								compacted_item = value_value(value)
							}

							expanded_item
								.inner()
								.as_value()
								.and_then(|v| v.as_lang_string())
								.and_then(|s| s.language().map(|l| l.as_str().to_string()))
						} else if container_type == ContainerKind::Index {
							match index_key {
								Some(index_key) => {
									container_key = compact_iri(
										active_context,
										&Term::Id(Id::from_string(index_key.as_str().to_string())),
										true,
										false,
										options,
									)?;

									let (map_key, remaining_values) = take_first_value(
										&mut compacted_item,
										container_key.as_deref().unwrap(),
									);

									if !remaining_values.is_empty() {
										if let Some(map) = compacted_item.as_object_mut() {
											for value in remaining_values {
												add_value(map, container_key.as_deref().unwrap(), value, false)
											}
										}
									}

									map_key
								}
								None => expanded_item.index().map(ToOwned::to_owned),
							}
						} else if container_type == ContainerKind::Id {
							compacted_item
								.as_object_mut()
								.and_then(|map| {
									map.remove_unique(container_key.unwrap().as_str())
										.ok()
										.unwrap()
										.map(|entry| entry.value.as_str().map(ToOwned::to_owned))
								})
								.flatten()
						} else {
							let (map_key, remaining_values) =
								take_first_value(&mut compacted_item, container_key.as_deref().unwrap());

							if !remaining_values.is_empty() {
								if let Some(map) = compacted_item.as_object_mut() {
									for value in remaining_values {
										add_value(map, container_key.as_deref().unwrap(), value, false)
									}
								}
							}

							if let Some(map) = compacted_item.as_object() {
								if map.len() == 1 && map.get_unique("@id").ok().unwrap().is_some() {
									let obj = Object::id(expanded_item.id().unwrap().clone());
									compacted_item = Box::pin(obj.compact_indexed_fragment(
										None,
										active_context,
										active_context,
										Some(&item_active_property),
										loader,
										options,
									))
									.await?
								}
							}

							map_key
						};

						let map_key = match map_key {
							Some(key) => key,
							None => {
								let key = compact_iri(active_context, &Term::Keyword(Keyword::None), true, false, options)?;
								key.unwrap()
							}
						};

						add_value(map_object, &map_key, compacted_item, as_array)
					} else {
						add_value(nest_result, &item_active_property, compacted_item, as_array)
					}
				}
			};
		}
	}

	// If expanded value is an empty array:
	if is_empty {
		let item_active_property = compact_iri_with(
			active_context,
			expanded_property,
			&Indexed::new(Object::node(), None),
			true,
			inside_reverse,
			options,
		)?;

		if let Some(item_active_property) = item_active_property {
			let (nest_result, _, _) =
				select_nest_result(result, active_context, &item_active_property, options.compact_arrays)?;

			add_value(nest_result, &item_active_property, Vec::new().into(), true)
		}
	}

	Ok(())
}

fn take_first_value(
	compacted_item: &mut json_syntax::Value,
	container_key: &str,
) -> (Option<String>, Vec<json_syntax::Value>) {
	match compacted_item {
		json_syntax::Value::Object(map) => match map.remove_unique(container_key).ok().unwrap() {
			Some(entry) => match entry.value {
				json_syntax::Value::String(s) => (Some(s.to_string()), Vec::new()),
				json_syntax::Value::Array(values) => {
					let mut values = values.into_iter();
					match values.next() {
						Some(first_value) => (first_value.as_str().map(ToOwned::to_owned), values.collect()),
						None => (None, values.collect()),
					}
				}
				other => (None, vec![other]),
			},
			None => (None, Vec::new()),
		},
		_ => (None, Vec::new()),
	}
}
