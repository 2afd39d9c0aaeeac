//! This library implements the [JSON-LD expansion algorithm](https://www.w3.org/TR/json-ld-api/#expansion-algorithms)
//! for the `json-ld` crate.
//!
//! # Usage
//!
//! The expansion algorithm is provided by the [`Expand`] trait.
use json_ld_core::{Context, ExpandedDocument, Loader, RemoteDocument};
use json_ld_syntax::{Container, ContainerKind};
use json_syntax::Value;

mod array;
mod document;
mod element;
mod error;
mod expanded;
mod literal;
mod node;
mod options;
mod value;
mod warning;

pub use error::*;
pub use expanded::*;
pub use options::*;
pub use warning::*;

pub(crate) use array::*;
pub(crate) use document::filter_top_level_item;
pub(crate) use element::*;
pub(crate) use json_ld_context_processing::algorithm::expand_iri_simple as expand_iri;
pub(crate) use literal::*;
pub(crate) use node::*;
pub(crate) use value::*;

/// Result of the document expansion.
pub type ExpansionResult = Result<ExpandedDocument, Error>;

pub(crate) fn container_contains(container: Option<&Container>, kind: ContainerKind) -> bool {
	match container {
		Some(Container::One(k)) => *k == kind,
		Some(Container::Many(ks)) => ks.contains(&kind),
		None => false,
	}
}

/// Document expansion.
///
/// This trait provides the functions necessary to expand a JSON-LD document
/// into an [`ExpandedDocument`]. It is implemented by [`json_syntax::Value`]
/// representing a JSON object and [`RemoteDocument`].
///
/// # Example
///
/// ```
/// # mod json_ld { pub use json_ld_syntax as syntax; pub use json_ld_core::{RemoteDocument, ExpandedDocument, NoLoader}; pub use json_ld_expansion::Expand; };
///
/// use json_ld::{syntax::Parse, RemoteDocument, Expand};
///
/// # #[async_std::test]
/// # async fn example() {
/// // Parse the input JSON(-LD) document.
/// let (json, _) = json_ld::syntax::Value::parse_str(
///   r##"
///   {
///     "@graph": [
///       {
///         "http://example.org/vocab#a": {
///           "@graph": [
///             {
///               "http://example.org/vocab#b": "Chapter One"
///             }
///           ]
///         }
///       }
///     ]
///   }
///   "##)
/// .unwrap();
///
/// // Prepare a dummy document loader using [`json_ld::NoLoader`],
/// // since we won't need to load any remote document while expanding this one.
/// let loader = json_ld::NoLoader;
///
/// // The `expand` method returns a [`json_ld::ExpandedDocument`].
/// json
///     .expand(&loader)
///     .await
///     .unwrap();
/// # }
/// ```
pub trait Expand {
	/// Returns the default base URL passed to the expansion algorithm and
	/// used to initialize the default empty context when calling
	/// [`Expand::expand`] or [`Expand::expand_with`].
	fn default_base_url(&self) -> Option<&iref::Iri>;

	/// Expand the document with full options.
	///
	/// The `context` is used as initial context. The `base_url` is the
	/// initial base URL used to resolve relative IRI references. The given
	/// `loader` is used to load remote documents (such as contexts) imported
	/// by the input and required during expansion. The `options` are used to
	/// tweak the expansion algorithm. The `warnings` handler is called each
	/// time a warning is emitted during expansion.
	#[allow(async_fn_in_trait)]
	async fn expand_full(
		&self,
		context: Context,
		base_url: Option<&iref::Iri>,
		loader: &impl Loader,
		options: Options,
		warnings: &mut impl WarningHandler,
	) -> ExpansionResult;

	/// Expand the input JSON-LD document.
	///
	/// The given `loader` is used to load remote documents (such as
	/// contexts) imported by the input and required during expansion. The
	/// expansion algorithm is called with an empty initial context with a
	/// base URL given by [`Expand::default_base_url`].
	#[allow(async_fn_in_trait)]
	async fn expand(&self, loader: &impl Loader) -> ExpansionResult {
		self.expand_full(
			Context::new(self.default_base_url().map(ToOwned::to_owned)),
			self.default_base_url(),
			loader,
			Options::default(),
			&mut (),
		)
		.await
	}
}

/// Value expansion without base URL.
impl Expand for Value {
	fn default_base_url(&self) -> Option<&iref::Iri> {
		None
	}

	async fn expand_full(
		&self,
		context: Context,
		base_url: Option<&iref::Iri>,
		loader: &impl Loader,
		options: Options,
		warnings: &mut impl WarningHandler,
	) -> ExpansionResult {
		document::expand(self, context, base_url, options, loader, warnings).await
	}
}

/// Remote document expansion.
///
/// The default base URL given to the expansion algorithm is the URL of the
/// remote document.
impl Expand for RemoteDocument {
	fn default_base_url(&self) -> Option<&iref::Iri> {
		self.url()
	}

	async fn expand_full(
		&self,
		context: Context,
		base_url: Option<&iref::Iri>,
		loader: &impl Loader,
		options: Options,
		warnings: &mut impl WarningHandler,
	) -> ExpansionResult {
		self.document()
			.expand_full(context, base_url, loader, options, warnings)
			.await
	}
}
