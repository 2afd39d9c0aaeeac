use super::expand_element;
use crate::{ActiveProperty, Error, Loader, Options, WarningHandler};
use json_ld_core::{Context, ExpandedDocument, IndexedObject, Object};
use json_syntax::Value;

/// Expand the given JSON-LD document.
pub(crate) async fn expand<'a>(
	document: &'a Value,
	active_context: Context,
	base_url: Option<&'a iref::Iri>,
	options: Options,
	loader: &impl Loader,
	warnings: &mut impl WarningHandler,
) -> Result<ExpandedDocument, Error> {
	let expanded = expand_element(
		&active_context,
		ActiveProperty::None,
		document,
		base_url,
		options,
		false,
		loader,
		warnings,
	)
	.await?;

	if expanded.len() == 1 {
		let obj = expanded.into_iter().next().unwrap();
		let (object, index) = obj.into_parts();
		match object.clone().into_node() {
			Some(node) => match node.into_unnamed_graph() {
				Ok(graph) => Ok(graph.into_iter().collect()),
				Err(node) => {
					let obj = json_ld_core::Indexed::new(Object::from(node), index);
					let mut result = ExpandedDocument::new();
					if filter_top_level_item(&obj) {
						result.insert(obj);
					}
					Ok(result)
				}
			},
			None => {
				let obj = json_ld_core::Indexed::new(object, index);
				let mut result = ExpandedDocument::new();
				if filter_top_level_item(&obj) {
					result.insert(obj);
				}
				Ok(result)
			}
		}
	} else {
		Ok(expanded.into_iter().filter(filter_top_level_item).collect())
	}
}

pub(crate) fn filter_top_level_item(item: &IndexedObject) -> bool {
	// Remove dangling values.
	!matches!(item.inner(), Object::Value(_))
}
