//! This library implements the [JSON-LD compaction algorithm](https://www.w3.org/TR/json-ld-api/#compaction-algorithms)
//! for the [`json-ld` crate](https://crates.io/crates/json-ld).
//!
//! # Usage
//!
//! The compaction algorithm is provided by the [`Compact`] trait.
use json_ld_core::{Context, Indexed, IndexedObject, Loader, Node, ProcessingMode, Term};
use json_ld_syntax::{ContainerKind, ErrorCode, Keyword};
use json_syntax::object::Entry;

mod document;
mod iri;
mod node;
mod property;
mod value;

pub use document::*;
pub(crate) use iri::*;
use node::*;
use property::*;
use value::*;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("IRI confused with prefix")]
	IriConfusedWithPrefix,

	#[error("Invalid `@nest` value")]
	InvalidNestValue,

	#[error("Context processing failed: {0}")]
	ContextProcessing(json_ld_context_processing::Error),
}

impl Error {
	pub fn code(&self) -> ErrorCode {
		match self {
			Self::IriConfusedWithPrefix => ErrorCode::IriConfusedWithPrefix,
			Self::InvalidNestValue => ErrorCode::InvalidNestValue,
			Self::ContextProcessing(e) => e.code(),
		}
	}
}

impl From<json_ld_context_processing::Error> for Error {
	fn from(e: json_ld_context_processing::Error) -> Self {
		Self::ContextProcessing(e)
	}
}

impl From<IriConfusedWithPrefix> for Error {
	fn from(_: IriConfusedWithPrefix) -> Self {
		Self::IriConfusedWithPrefix
	}
}

pub type CompactFragmentResult = Result<json_syntax::Value, Error>;

/// Compaction options.
#[derive(Clone, Copy)]
pub struct Options {
	/// JSON-LD processing mode.
	pub processing_mode: ProcessingMode,

	/// Determines if IRIs are compacted relative to the provided base IRI or document location when compacting.
	pub compact_to_relative: bool,

	/// If set to `true`, arrays with just one element are replaced with that element during compaction.
	/// If set to `false`, all arrays will remain arrays even if they have just one element.
	pub compact_arrays: bool,

	/// If set to `true`, properties are processed by lexical order.
	/// If `false`, order is not considered in processing.
	pub ordered: bool,
}

impl Options {
	pub fn unordered(self) -> Self {
		Self {
			ordered: false,
			..self
		}
	}
}

impl From<Options> for json_ld_context_processing::Options {
	fn from(options: Options) -> json_ld_context_processing::Options {
		json_ld_context_processing::Options {
			processing_mode: options.processing_mode,
			..Default::default()
		}
	}
}

impl From<json_ld_expansion::Options> for Options {
	fn from(options: json_ld_expansion::Options) -> Options {
		Options {
			processing_mode: options.processing_mode,
			ordered: options.ordered,
			..Options::default()
		}
	}
}

impl Default for Options {
	fn default() -> Options {
		Options {
			processing_mode: ProcessingMode::default(),
			compact_to_relative: true,
			compact_arrays: true,
			ordered: false,
		}
	}
}

/// Type that can be compacted into a JSON(-LD) fragment.
pub trait CompactFragment {
	#[allow(async_fn_in_trait)]
	async fn compact_fragment_full(
		&self,
		active_context: &Context,
		type_scoped_context: &Context,
		active_property: Option<&str>,
		loader: &impl Loader,
		options: Options,
	) -> CompactFragmentResult;

	#[allow(async_fn_in_trait)]
	#[inline(always)]
	async fn compact_fragment_with(
		&self,
		active_context: &Context,
		loader: &impl Loader,
	) -> CompactFragmentResult {
		self.compact_fragment_full(active_context, active_context, None, loader, Options::default())
			.await
	}

	#[allow(async_fn_in_trait)]
	#[inline(always)]
	async fn compact_fragment(&self, active_context: &Context, loader: &impl Loader) -> CompactFragmentResult {
		self.compact_fragment_with(active_context, loader).await
	}
}

/// Type that can be compacted with an index.
pub trait CompactIndexedFragment {
	#[allow(async_fn_in_trait)]
	#[allow(clippy::too_many_arguments)]
	async fn compact_indexed_fragment(
		&self,
		index: Option<&str>,
		active_context: &Context,
		type_scoped_context: &Context,
		active_property: Option<&str>,
		loader: &impl Loader,
		options: Options,
	) -> CompactFragmentResult;
}

impl CompactFragment for IndexedObject {
	async fn compact_fragment_full(
		&self,
		active_context: &Context,
		type_scoped_context: &Context,
		active_property: Option<&str>,
		loader: &impl Loader,
		options: Options,
	) -> CompactFragmentResult {
		self.inner()
			.compact_indexed_fragment(
				self.index(),
				active_context,
				type_scoped_context,
				active_property,
				loader,
				options,
			)
			.await
	}
}

impl CompactIndexedFragment for json_ld_core::Object {
	async fn compact_indexed_fragment(
		&self,
		index: Option<&str>,
		active_context: &Context,
		type_scoped_context: &Context,
		active_property: Option<&str>,
		loader: &impl Loader,
		options: Options,
	) -> CompactFragmentResult {
		match self {
			json_ld_core::Object::Value(value) => {
				compact_indexed_value_with(value, index, active_context, active_property, loader, options).await
			}
			json_ld_core::Object::Node(node) => {
				compact_indexed_node_with(
					node,
					index,
					active_context,
					type_scoped_context,
					active_property,
					loader,
					options,
				)
				.await
			}
			json_ld_core::Object::List(list) => {
				// If active context has a previous context, the active context is not propagated.
				// If element does not contain an @value entry, and element does not consist of
				// a single @id entry, set active context to previous context from active context,
				// as the scope of a term-scoped context does not apply when processing new node objects.
				let mut active_context = active_context;
				if let Some(previous_context) = active_context.previous_context() {
					active_context = previous_context
				}

				// If the term definition for active property in active context has a local context:
				let mut owned_context = None;
				let mut list_container = false;
				if let Some(active_property) = active_property {
					if let Some(active_property_definition) = type_scoped_context.get(active_property) {
						if let Some(normal) = active_property_definition.as_normal() {
							if let Some(local_context) = normal.context.as_deref() {
								owned_context = Some(
									local_context
										.process_with(
											active_context,
											loader,
											normal.base_url.clone(),
											json_ld_context_processing::Options::from(options).with_override(),
										)
										.await?
										.into_processed(),
								);
							}

							list_container = crate::container_contains(
								normal.container.as_ref(),
								ContainerKind::List,
							);
						}
					}
				}
				let active_context = owned_context.as_ref().unwrap_or(active_context);

				if list_container {
					compact_collection_with(
						list.iter(),
						active_context,
						active_context,
						active_property,
						loader,
						options,
					)
					.await
				} else {
					let mut result = json_syntax::Object::default();
					compact_property(
						&mut result,
						&Term::Keyword(Keyword::List),
						list.iter(),
						active_context,
						loader,
						false,
						options,
					)
					.await?;

					// If expanded property is @index and active property has a container mapping in
					// active context that includes @index,
					if let Some(index) = index {
						let mut index_container = false;
						if let Some(active_property) = active_property {
							if let Some(active_property_definition) = active_context.get(active_property) {
								if crate::container_contains(
									active_property_definition.container().as_ref(),
									ContainerKind::Index,
								) {
									index_container = true;
								}
							}
						}

						if !index_container {
							let alias = compact_key(
								active_context,
								&Term::Keyword(Keyword::Index),
								true,
								false,
								options,
							)?;

							result.insert(alias.unwrap(), json_syntax::Value::String(index.into()));
						}
					}

					Ok(json_syntax::Value::Object(result))
				}
			}
		}
	}
}

pub(crate) fn container_contains(container: Option<&json_ld_syntax::Container>, kind: ContainerKind) -> bool {
	match container {
		Some(json_ld_syntax::Container::One(k)) => *k == kind,
		Some(json_ld_syntax::Container::Many(ks)) => ks.contains(&kind),
		None => false,
	}
}

/// Default value of `as_array` is false.
fn add_value(map: &mut json_syntax::Object, key: &str, value: json_syntax::Value, as_array: bool) {
	match map.get_unique(key).ok().unwrap().map(|entry| entry.is_array()) {
		Some(false) => {
			let Entry { key, value } = map.remove_unique(key).ok().unwrap().unwrap();
			map.insert(key, json_syntax::Value::Array(vec![value]));
		}
		None if as_array => {
			map.insert(key.into(), json_syntax::Value::Array(Vec::new()));
		}
		_ => (),
	}

	match value {
		json_syntax::Value::Array(values) => {
			for value in values {
				add_value(map, key, value, false)
			}
		}
		value => {
			if let Some(array) = map.get_unique_mut(key).ok().unwrap() {
				array.as_array_mut().unwrap().push(value);
				return;
			}

			map.insert(key.into(), value);
		}
	}
}

/// Get the `@value` field of a value object.
fn value_value(value: &json_ld_core::Value) -> json_syntax::Value {
	use json_ld_core::Literal;
	match value {
		json_ld_core::Value::Literal(lit, _ty) => match lit {
			Literal::Null => json_syntax::Value::Null,
			Literal::Boolean(b) => json_syntax::Value::Boolean(*b),
			Literal::Number(n) => json_syntax::Value::Number(n.clone()),
			Literal::String(s) => json_syntax::Value::String(s.as_str().into()),
		},
		json_ld_core::Value::LangString(s) => json_syntax::Value::String(s.as_str().into()),
		json_ld_core::Value::Json(json) => json.clone(),
	}
}

async fn compact_collection_with<'a, O, T>(
	items: O,
	active_context: &'a Context,
	type_scoped_context: &'a Context,
	active_property: Option<&'a str>,
	loader: &impl Loader,
	options: Options,
) -> CompactFragmentResult
where
	T: 'a + CompactFragment,
	O: 'a + Iterator<Item = &'a T>,
{
	let mut result = Vec::new();

	for item in items {
		let compacted_item = Box::pin(item.compact_fragment_full(
			active_context,
			type_scoped_context,
			active_property,
			loader,
			options,
		))
		.await?;

		if !compacted_item.is_null() {
			result.push(compacted_item)
		}
	}

	let mut list_or_set = false;
	if let Some(active_property) = active_property {
		if let Some(active_property_definition) = active_context.get(active_property) {
			let container = active_property_definition.container();
			list_or_set = container_contains(container.as_ref(), ContainerKind::List)
				|| container_contains(container.as_ref(), ContainerKind::Set);
		}
	}

	if result.is_empty()
		|| result.len() > 1
		|| !options.compact_arrays
		|| active_property == Some("@graph")
		|| active_property == Some("@set")
		|| list_or_set
	{
		return Ok(json_syntax::Value::Array(result.into_iter().collect()));
	}

	Ok(result.into_iter().next().unwrap())
}

impl<T: CompactFragment> CompactFragment for Vec<T> {
	async fn compact_fragment_full(
		&self,
		active_context: &Context,
		type_scoped_context: &Context,
		active_property: Option<&str>,
		loader: &impl Loader,
		options: Options,
	) -> CompactFragmentResult {
		compact_collection_with(self.iter(), active_context, type_scoped_context, active_property, loader, options)
			.await
	}
}

impl<T: CompactFragment> CompactFragment for [T] {
	async fn compact_fragment_full(
		&self,
		active_context: &Context,
		type_scoped_context: &Context,
		active_property: Option<&str>,
		loader: &impl Loader,
		options: Options,
	) -> CompactFragmentResult {
		compact_collection_with(self.iter(), active_context, type_scoped_context, active_property, loader, options)
			.await
	}
}

impl CompactFragment for Indexed<Node> {
	async fn compact_fragment_full(
		&self,
		active_context: &Context,
		type_scoped_context: &Context,
		active_property: Option<&str>,
		loader: &impl Loader,
		options: Options,
	) -> CompactFragmentResult {
		compact_indexed_node_with(
			self.inner(),
			self.index(),
			active_context,
			type_scoped_context,
			active_property,
			loader,
			options,
		)
		.await
	}
}
