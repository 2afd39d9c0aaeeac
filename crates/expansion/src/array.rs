use crate::{container_contains, expand_element, ActiveProperty, Error, Expanded, Loader, Options, WarningHandler};
use json_ld_core::{context::TermDefinition, object, Context, Object};
use json_ld_syntax::ContainerKind;
use json_syntax::Array;

#[allow(clippy::too_many_arguments)]
pub(crate) async fn expand_array<'a>(
	active_context: &'a Context,
	active_property: ActiveProperty<'a>,
	active_property_definition: Option<TermDefinition>,
	element: &'a Array,
	base_url: Option<&'a iref::Iri>,
	options: Options,
	from_map: bool,
	loader: &impl Loader,
	warnings: &mut impl WarningHandler,
) -> Result<Expanded, Error> {
	// Initialize an empty array, result.
	let mut is_list = false;
	let mut result = Vec::new();

	// If the container mapping of `active_property` includes `@list`, and
	// `expanded_item` is an array, set `expanded_item` to a new map containing
	// the entry `@list` where the value is the original `expanded_item`.
	if let Some(definition) = &active_property_definition {
		if let Some(normal) = definition.as_normal() {
			is_list = container_contains(normal.container.as_ref(), ContainerKind::List);
		}
	}

	// For each item in element:
	for item in element.iter() {
		// Initialize `expanded_item` to the result of using this algorithm
		// recursively, passing `active_context`, `active_property`, `item` as element,
		// `base_url`, the `frame_expansion`, `ordered`, and `from_map` flags.
		let e = Box::pin(expand_element(
			active_context,
			active_property,
			item,
			base_url,
			options,
			from_map,
			loader,
			warnings,
		))
		.await?;

		result.extend(e);
	}

	if is_list {
		return Ok(Expanded::Object(
			Object::List(object::List::new(result)).into(),
		));
	}

	// Return result.
	Ok(Expanded::Array(result))
}
