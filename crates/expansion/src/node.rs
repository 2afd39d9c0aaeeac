use crate::{
	container_contains, expand_element, expand_iri, expand_literal, filter_top_level_item, Action,
	ActiveProperty, Error, Expanded, ExpandedEntry, ForwardToContext, LiteralValue, Options,
	Warning, WarningHandler,
};
use json_ld_context_processing::{Options as ProcessingOptions, Process};
use json_ld_core::{
	object, object::value::Literal, Context, Id, Indexed, IndexedObject, LangString, Loader, Node,
	Object, ProcessingMode, Properties, ReverseProperties, Term, ValidId, Value,
};
use json_ld_syntax::{ContainerKind, Keyword, LenientLangTagBuf, Nullable};
use json_syntax::object::Entry;
use std::borrow::Cow;

/// Convert a term to a node id, if possible.
/// Returns `None` if the term is `null`.
pub(crate) fn node_id_of_term(term: Term) -> Option<Id> {
	match term {
		Term::Null => None,
		Term::Id(prop) => Some(prop),
		Term::Keyword(kw) => Some(Id::Invalid(kw.into_str().to_string())),
	}
}

/// Extracts the node out of an expanded object, giving back `None` if it is
/// a value or list object.
fn try_into_node(object: IndexedObject) -> Option<Indexed<Node>> {
	let (object, index) = object.into_parts();
	object.into_node().map(|node| Indexed::new(*node, index))
}

fn insert_all(
	props: &mut Properties,
	prop: iref::IriBuf,
	values: impl IntoIterator<Item = IndexedObject>,
) {
	for value in values {
		props.insert(prop.clone(), value);
	}
}

fn insert_all_reverse(
	props: &mut ReverseProperties,
	prop: iref::IriBuf,
	values: impl IntoIterator<Item = Indexed<Node>>,
) {
	for value in values {
		props.insert(prop.clone(), value);
	}
}

/// `true` if `result` already carries a value for the given keyword, judged
/// from the concrete [`Node`] field that keyword maps to.
fn node_has_keyword(result: &Indexed<Node>, kw: Keyword) -> bool {
	match kw {
		Keyword::Id => result.id().is_some(),
		Keyword::Type => !result.types().is_empty(),
		Keyword::Graph => result.is_graph(),
		Keyword::Included => result.included().is_some(),
		Keyword::Reverse => !result.reverse_properties().is_empty(),
		Keyword::Index => result.index().is_some(),
		_ => false,
	}
}

fn prop_iri(id: &Id) -> Option<iref::IriBuf> {
	match id {
		Id::Valid(ValidId::Iri(iri)) => Some(iri.clone()),
		_ => None,
	}
}

/// Expand a node object.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn expand_node<'a>(
	active_context: &'a Context,
	type_scoped_context: &'a Context,
	active_property: ActiveProperty<'a>,
	expanded_entries: Vec<ExpandedEntry<'a>>,
	base_url: Option<&'a iref::Iri>,
	options: Options,
	loader: &impl Loader,
	warnings: &mut impl WarningHandler,
) -> Result<Option<Indexed<Node>>, Error> {
	let (result, has_value_object_entries) = Box::pin(expand_node_entries(
		Indexed::new(Node::new(), None),
		false,
		active_context,
		type_scoped_context,
		active_property,
		expanded_entries,
		base_url,
		options,
		loader,
		warnings,
	))
	.await?;

	if has_value_object_entries && result.is_empty() && result.id().is_none() {
		return Ok(None);
	}

	if (active_property.is_none() || active_property == Keyword::Graph)
		&& result.is_empty()
		&& result.index().is_none()
	{
		return Ok(None);
	}

	Ok(Some(result))
}

type ExpandedNode = (Indexed<Node>, bool);
type NodeEntriesExpansionResult = Result<ExpandedNode, Error>;

#[allow(clippy::too_many_arguments)]
async fn expand_node_entries<'a>(
	mut result: Indexed<Node>,
	mut has_value_object_entries: bool,
	active_context: &'a Context,
	type_scoped_context: &'a Context,
	active_property: ActiveProperty<'a>,
	expanded_entries: Vec<ExpandedEntry<'a>>,
	base_url: Option<&'a iref::Iri>,
	options: Options,
	loader: &impl Loader,
	warnings: &mut impl WarningHandler,
) -> NodeEntriesExpansionResult {
	for ExpandedEntry(key, expanded_key, value) in expanded_entries {
		match expanded_key {
			Term::Null => (),

			// If key is @context, continue to the next key.
			Term::Keyword(Keyword::Context) => (),

			// If `expanded_property` is a keyword:
			Term::Keyword(expanded_property) => {
				// If `active_property` equals `@reverse`, an invalid reverse property
				// map error has been detected and processing is aborted.
				if active_property == Keyword::Reverse {
					return Err(Error::InvalidReversePropertyMap);
				}

				// If `result` already has an `expanded_property` entry, other than
				// `@included` or `@type` (unless processing mode is json-ld-1.0), a
				// colliding keywords error has been detected and processing is
				// aborted.
				if (options.processing_mode == ProcessingMode::JsonLd1_0
					|| (expanded_property != Keyword::Included && expanded_property != Keyword::Type))
					&& node_has_keyword(&result, expanded_property)
				{
					return Err(Error::CollidingKeywords);
				}

				match expanded_property {
					// If `expanded_property` is @id:
					Keyword::Id => {
						if let Some(str_value) = value.as_str() {
							let id = expand_iri(
								active_context,
								Nullable::Some(str_value.into()),
								true,
								None,
								&mut ForwardToContext(warnings),
							)?
							.and_then(node_id_of_term);
							result.set_id(id);
						} else {
							return Err(Error::InvalidIdValue);
						}
					}
					// If expanded property is @type:
					Keyword::Type => {
						let value = json_syntax::Value::force_as_array(value);
						for ty in value {
							if let Some(str_ty) = ty.as_str() {
								if let Some(ty) = expand_iri(
									type_scoped_context,
									Nullable::Some(str_ty.into()),
									true,
									Some(options.policy.vocab),
									&mut ForwardToContext(warnings),
								)? {
									match Id::try_from(ty) {
										Ok(ty) => {
											if let Id::Invalid(_) = &ty {
												match options.policy.invalid {
													Action::Keep => (),
													Action::Drop => continue,
													Action::Reject => return Err(Error::InvalidTypeValue),
												}
											}

											result.types_mut().push(ty)
										}
										Err(_) => return Err(Error::InvalidTypeValue),
									}
								}
							} else {
								return Err(Error::InvalidTypeValue);
							}
						}
					}
					// If expanded property is @graph
					Keyword::Graph => {
						let expanded_value = Box::pin(expand_element(
							active_context,
							ActiveProperty::Some("@graph"),
							value,
							base_url,
							options,
							false,
							loader,
							warnings,
						))
						.await?;

						result.set_graph(Some(
							expanded_value
								.into_iter()
								.filter(filter_top_level_item)
								.collect(),
						));
					}
					// If expanded property is @included:
					Keyword::Included => {
						if options.processing_mode == ProcessingMode::JsonLd1_0 {
							continue;
						}

						let expanded_value = Box::pin(expand_element(
							active_context,
							ActiveProperty::Some("@included"),
							value,
							base_url,
							options,
							false,
							loader,
							warnings,
						))
						.await?;

						let mut expanded_nodes = Vec::new();
						for obj in expanded_value.into_iter() {
							match try_into_node(obj) {
								Some(node) => expanded_nodes.push(node),
								None => return Err(Error::InvalidIncludedValue),
							}
						}

						if let Some(included) = result.included() {
							let mut all = included.to_vec();
							all.extend(expanded_nodes);
							result.set_included(Some(all));
						} else {
							result.set_included(Some(expanded_nodes));
						}
					}
					// If expanded property is @language:
					Keyword::Language => has_value_object_entries = true,
					// If expanded property is @direction:
					Keyword::Direction => has_value_object_entries = true,
					// If expanded property is @index:
					Keyword::Index => {
						if let Some(index) = value.as_str() {
							result.set_index(Some(index.to_string()))
						} else {
							return Err(Error::InvalidIndexValue);
						}
					}
					// If expanded property is @reverse:
					Keyword::Reverse => {
						if let Some(value) = value.as_object() {
							let mut reverse_entries: Vec<&Entry> = value.iter().collect();

							if options.ordered {
								reverse_entries.sort_by_key(|entry| &entry.key)
							}

							for Entry {
								key: reverse_key,
								value: reverse_value,
							} in reverse_entries
							{
								match expand_iri(
									active_context,
									Nullable::Some(reverse_key.as_str().into()),
									false,
									Some(options.policy.vocab),
									&mut ForwardToContext(warnings),
								)? {
									Some(Term::Keyword(_)) => {
										return Err(Error::InvalidReversePropertyMap)
									}
									Some(Term::Id(reverse_prop))
										if reverse_prop.as_str().contains(':') =>
									{
										if !reverse_prop.is_valid() {
											match options.policy.invalid {
												Action::Keep => (),
												Action::Drop => continue,
												Action::Reject => {
													return Err(Error::KeyExpansionFailed(
														reverse_key.to_string(),
													))
												}
											}
										}

										let reverse_prop_iri = match prop_iri(&reverse_prop) {
											Some(iri) => iri,
											None => continue,
										};

										let reverse_expanded_value = Box::pin(expand_element(
											active_context,
											ActiveProperty::Some(reverse_key.as_ref()),
											reverse_value,
											base_url,
											options,
											false,
											loader,
											warnings,
										))
										.await?;

										let is_double_reversed = active_context
											.get(reverse_key.as_str())
											.and_then(|d| d.as_normal().map(|n| n.reverse_property))
											.unwrap_or(false);

										if is_double_reversed {
											insert_all(
												result.properties_mut(),
												reverse_prop_iri,
												reverse_expanded_value.into_iter(),
											)
										} else {
											let mut reverse_expanded_nodes = Vec::new();
											for object in reverse_expanded_value {
												match try_into_node(object) {
													Some(node) => reverse_expanded_nodes.push(node),
													None => {
														return Err(Error::InvalidReversePropertyValue)
													}
												}
											}

											insert_all_reverse(
												result.reverse_properties_mut(),
												reverse_prop_iri,
												reverse_expanded_nodes,
											)
										}
									}
									_ => {
										if options.policy.invalid == Action::Reject {
											return Err(Error::KeyExpansionFailed(
												reverse_key.to_string(),
											));
										}

										if !options.policy.allow_undefined {
											return Err(Error::KeyExpansionFailed(
												reverse_key.to_string(),
											));
										}
									}
								}
							}
						} else {
							return Err(Error::InvalidReverseValue);
						}
					}
					// If expanded property is @nest
					Keyword::Nest => {
						let nesting_key = key;
						let value = json_syntax::Value::force_as_array(value);
						for nested_value in value {
							let mut property_scoped_base_url = None;
							let property_scoped_context = match active_context.get(nesting_key) {
								Some(definition) => {
									let normal = definition.as_normal();
									if let Some(base_url) = normal.and_then(|d| d.base_url.as_ref()) {
										property_scoped_base_url = Some(base_url.clone());
									}

									normal.and_then(|d| d.context.as_deref()).cloned()
								}
								None => None,
							};

							let active_context_cow = match property_scoped_context {
								Some(property_scoped_context) => {
									let processing_options: ProcessingOptions = options.into();
									Cow::Owned(
										property_scoped_context
											.process_with(
												active_context,
												loader,
												property_scoped_base_url,
												processing_options.with_override(),
											)
											.await?
											.into_processed(),
									)
								}
								None => Cow::Borrowed(active_context),
							};

							if let Some(nested_value) = nested_value.as_object() {
								let mut nested_entries: Vec<&Entry> = Vec::new();

								for entry in nested_value.iter() {
									nested_entries.push(entry)
								}

								if options.ordered {
									nested_entries.sort_by_key(|entry| &entry.key);
								}

								let mut expanded = Vec::with_capacity(nested_entries.len());
								for Entry { key, value } in nested_entries {
									if let Some(expanded_key) = expand_iri(
										active_context_cow.as_ref(),
										Nullable::Some(key.as_str().into()),
										false,
										Some(options.policy.vocab),
										&mut ForwardToContext(warnings),
									)? {
										expanded.push(ExpandedEntry(key, expanded_key, value));
									}
								}

								let (new_result, new_has_value_object_entries) =
									Box::pin(expand_node_entries(
										result,
										has_value_object_entries,
										active_context_cow.as_ref(),
										type_scoped_context,
										active_property,
										expanded,
										base_url,
										options,
										loader,
										warnings,
									))
									.await?;

								result = new_result;
								has_value_object_entries = new_has_value_object_entries;
							} else {
								return Err(Error::InvalidNestValue);
							}
						}
					}
					Keyword::Value => return Err(Error::InvalidNestValue),
					_ => (),
				}
			}

			Term::Id(prop) if prop.as_str().contains(':') => {
				if let Id::Invalid(name) = &prop {
					match options.policy.invalid {
						Action::Keep => (),
						Action::Drop => continue,
						Action::Reject => return Err(Error::KeyExpansionFailed(name.to_owned())),
					}
				}

				let key_definition = active_context.get(key);
				let key_normal = key_definition.as_ref().and_then(|d| d.as_normal());

				let is_reverse_property = key_normal.map(|n| n.reverse_property).unwrap_or(false);
				let container_mapping = key_definition.as_ref().and_then(|d| d.container());
				let is_json = key_normal
					.and_then(|n| n.typ.as_ref())
					.map(|t| *t == json_ld_core::context::TermType::Json)
					.unwrap_or(false);

				let mut expanded_value = if is_json {
					Expanded::Object(Object::Value(Value::Json(value.clone())).into())
				} else if let Some(value) = value
					.as_object()
					.filter(|_| container_contains(container_mapping.as_ref(), ContainerKind::Language))
				{
					let mut expanded_value = Vec::new();
					let mut direction = active_context.default_base_direction();

					if let Some(key_direction) = key_normal.and_then(|n| n.direction) {
						direction = Some(key_direction)
					}

					let mut language_entries: Vec<&Entry> = Vec::with_capacity(value.len());
					for language_entry in value.iter() {
						language_entries.push(language_entry);
					}

					if options.ordered {
						language_entries.sort_by_key(|entry| &entry.key);
					}

					for Entry {
						key: language,
						value: language_value,
					} in language_entries
					{
						let language_value = json_syntax::Value::force_as_array(language_value);

						for item in language_value {
							match item {
								json_syntax::Value::Null => (),
								json_syntax::Value::String(item) => {
									let language = if expand_iri(
										active_context,
										Nullable::Some(language.as_str().into()),
										false,
										Some(options.policy.vocab),
										&mut ForwardToContext(warnings),
									)? == Some(Term::Keyword(Keyword::None))
									{
										None
									} else {
										let (language, error) =
											LenientLangTagBuf::new(language.to_string());

										if let Some(error) = error {
											warnings.handle(Warning::MalformedLanguageTag(
												language.to_string(),
												error,
											))
										}

										Some(language)
									};

									if let Ok(v) = LangString::new(item.clone(), language, direction) {
										expanded_value.push(Object::Value(Value::LangString(v)).into());
									} else {
										expanded_value.push(
											Object::Value(Value::Literal(
												Literal::String(item.clone()),
												None,
											))
											.into(),
										)
									}
								}
								_ => {
									return Err(Error::InvalidLanguageMapValue);
								}
							}
						}
					}

					Expanded::Array(expanded_value)
				} else if let Some(value) = value.as_object().filter(|_| {
					container_contains(container_mapping.as_ref(), ContainerKind::Index)
						|| container_contains(container_mapping.as_ref(), ContainerKind::Type)
						|| container_contains(container_mapping.as_ref(), ContainerKind::Id)
				}) {
					let mut expanded_value: Vec<IndexedObject> = Vec::new();

					let index_key = key_normal
						.and_then(|n| n.index.as_ref())
						.map(|i| i.as_str())
						.unwrap_or("@index");

					let mut entries: Vec<&Entry> = Vec::with_capacity(value.len());
					for entry in value.iter() {
						entries.push(entry)
					}

					if options.ordered {
						entries.sort_by_key(|entry| &entry.key);
					}

					for Entry {
						key: index,
						value: index_value,
					} in entries
					{
						let mut map_context = Cow::Borrowed(active_context);
						if container_contains(container_mapping.as_ref(), ContainerKind::Type)
							|| container_contains(container_mapping.as_ref(), ContainerKind::Id)
						{
							if let Some(previous_context) = active_context.previous_context() {
								map_context = Cow::Borrowed(previous_context)
							}
						}

						if container_contains(container_mapping.as_ref(), ContainerKind::Type) {
							if let Some(index_definition) = map_context.get(index.as_str()) {
								if let Some(local_context) =
									index_definition.as_normal().and_then(|d| d.context.as_deref())
								{
									let base_url =
										index_definition.as_normal().and_then(|d| d.base_url.clone());
									let processing_options: ProcessingOptions = options.into();
									map_context = Cow::Owned(
										local_context
											.process_with(
												map_context.as_ref(),
												loader,
												base_url,
												processing_options,
											)
											.await?
											.into_processed(),
									)
								}
							}
						}

						let expanded_index = match expand_iri(
							active_context,
							Nullable::Some(index.as_str().into()),
							false,
							Some(options.policy.vocab),
							&mut ForwardToContext(warnings),
						)? {
							Some(Term::Null) | Some(Term::Keyword(Keyword::None)) => None,
							key => key,
						};

						let expanded_index_value = Box::pin(expand_element(
							map_context.as_ref(),
							ActiveProperty::Some(key),
							index_value,
							base_url,
							options,
							true,
							loader,
							warnings,
						))
						.await?;

						for mut item in expanded_index_value {
							if container_contains(container_mapping.as_ref(), ContainerKind::Graph)
								&& !item.is_graph()
							{
								let mut node = Node::new();
								node.set_graph(Some(vec![item]));
								item = Object::from(node).into();
							}

							if expanded_index.is_some() {
								if container_contains(container_mapping.as_ref(), ContainerKind::Index)
									&& index_key != "@index"
								{
									let re_expanded_index = expand_literal(
										active_context,
										options.policy.vocab,
										ActiveProperty::Some(index_key),
										LiteralValue::Inferred(index.as_str().into()),
										warnings,
									)?;

									let expanded_index_key_iri = match expand_iri(
										active_context,
										Nullable::Some(index_key.into()),
										false,
										Some(options.policy.vocab),
										&mut ForwardToContext(warnings),
									)? {
										Some(Term::Id(prop)) => match prop_iri(&prop) {
											Some(iri) => iri,
											None => continue,
										},
										_ => continue,
									};

									if let Object::Node(node) = item.inner_mut() {
										node
											.properties_mut()
											.insert(expanded_index_key_iri, re_expanded_index);
									} else {
										return Err(Error::Value(crate::InvalidValue::ValueObject));
									}
								} else if container_contains(container_mapping.as_ref(), ContainerKind::Index)
									&& item.index().is_none()
								{
									item.set_index(Some((*index).to_string()))
								} else if container_contains(container_mapping.as_ref(), ContainerKind::Id)
									&& item.id().is_none()
								{
									if let Object::Node(node) = item.inner_mut() {
										let id = expand_iri(
											active_context,
											Nullable::Some(index.as_str().into()),
											true,
											None,
											&mut ForwardToContext(warnings),
										)?
										.and_then(node_id_of_term);
										node.set_id(id);
									}
								} else if container_contains(container_mapping.as_ref(), ContainerKind::Type)
								{
									match Id::try_from(expanded_index.clone().unwrap()) {
										Ok(typ) => {
											if let Object::Node(node) = item.inner_mut() {
												node.types_mut().insert(0, typ);
											}
										}
										Err(_) => return Err(Error::InvalidTypeValue),
									}
								}
							}

							expanded_value.push(item)
						}
					}

					Expanded::Array(expanded_value)
				} else {
					Box::pin(expand_element(
						active_context,
						ActiveProperty::Some(key),
						value,
						base_url,
						options,
						false,
						loader,
						warnings,
					))
					.await?
				};

				// If container mapping includes @list and expanded value is
				// not already a list object, wrap it.
				if container_contains(container_mapping.as_ref(), ContainerKind::List)
					&& !expanded_value.is_list()
				{
					expanded_value = Expanded::Object(
						Object::List(object::List::new(expanded_value.into_iter().collect())).into(),
					);
				}

				// If container mapping includes @graph, and includes neither
				// @id nor @index, convert every value into a graph object.
				if container_contains(container_mapping.as_ref(), ContainerKind::Graph)
					&& !container_contains(container_mapping.as_ref(), ContainerKind::Id)
					&& !container_contains(container_mapping.as_ref(), ContainerKind::Index)
				{
					expanded_value = Expanded::Array(
						expanded_value
							.into_iter()
							.map(|ev| {
								let mut node = Node::new();
								node.set_graph(Some(vec![ev]));
								Object::from(node).into()
							})
							.collect(),
					);
				}

				if !expanded_value.is_null() {
					if let Some(prop_iri) = prop_iri(&prop) {
						if is_reverse_property {
							let mut reverse_expanded_nodes = Vec::new();
							for object in expanded_value {
								match try_into_node(object) {
									Some(node) => reverse_expanded_nodes.push(node),
									None => return Err(Error::InvalidReversePropertyValue),
								}
							}

							insert_all_reverse(
								result.reverse_properties_mut(),
								prop_iri,
								reverse_expanded_nodes,
							);
						} else {
							insert_all(result.properties_mut(), prop_iri, expanded_value.into_iter());
						}
					}
				}
			}

			Term::Id(prop) => {
				// non-keyword, colon-less property: not a valid node property.
				if let Id::Invalid(name) = &prop {
					match options.policy.invalid {
						Action::Drop | Action::Keep => (),
						Action::Reject => return Err(Error::KeyExpansionFailed(name.to_owned())),
					}
				}

				if !options.policy.allow_undefined {
					return Err(Error::KeyExpansionFailed(prop.to_string()));
				}
			}
		}
	}

	Ok((result, has_value_object_entries))
}
