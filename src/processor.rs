use crate::compaction::{self, Compact};
use crate::context_processing::{self, Process};
use crate::expansion::{self, Expand};
use crate::rdf;
use crate::{
	Context, ConflictingIndexes, ExpandedDocument, Generator, Loader, ProcessingMode,
	RemoteDocument,
};

/// Options shared by the four top-level operations.
///
/// Each operation only reads the fields relevant to it; see
/// [`Options::context_processing_options`], [`Options::expansion_options`],
/// [`Options::compaction_options`] and [`Options::rdf_options`] for how this
/// maps onto each algorithm's own, narrower options type.
#[derive(Clone)]
pub struct Options {
	/// The base IRI to use when expanding or compacting the document.
	///
	/// If set, this overrides the input document's own IRI.
	pub base: Option<iref::IriBuf>,

	/// A context used to initialize the active context before expansion,
	/// processed on top of the empty context before the document's own
	/// `@context` (if any) is applied.
	pub expand_context: Option<syntax::context::Context>,

	/// If set to `true`, the processor replaces arrays with just one
	/// element with that element during compaction.
	///
	/// Defaults to `true`.
	pub compact_arrays: bool,

	/// Determines if IRIs are compacted relative to the base option or
	/// document location when compacting.
	///
	/// Defaults to `true`.
	pub compact_to_relative: bool,

	/// If set to `true`, certain algorithm processing steps where
	/// indicated are ordered lexicographically.
	///
	/// Defaults to `false`.
	pub ordered: bool,

	/// Sets the processing mode.
	///
	/// Defaults to `ProcessingMode::JsonLd1_1`.
	pub processing_mode: ProcessingMode,

	/// How a `@direction`-tagged string is represented in RDF. `None`
	/// drops the direction (JSON-LD 1.0 behaviour).
	pub rdf_direction: Option<rdf::RdfDirection>,

	/// `fromRdf`: decode recognized `xsd:integer`/`xsd:double`/`xsd:boolean`
	/// typed literals into native JSON values.
	pub use_native_types: bool,

	/// `fromRdf`: keep `rdf:type` quads as an explicit `rdf:type` property
	/// instead of folding them into the node's `@type` entry.
	pub use_rdf_type: bool,
}

impl Options {
	pub fn unordered(self) -> Self {
		Self {
			ordered: false,
			..self
		}
	}

	pub fn context_processing_options(&self) -> context_processing::Options {
		context_processing::Options {
			processing_mode: self.processing_mode,
			..Default::default()
		}
	}

	pub fn expansion_options(&self) -> expansion::Options {
		expansion::Options {
			processing_mode: self.processing_mode,
			ordered: self.ordered,
			..Default::default()
		}
	}

	pub fn compaction_options(&self) -> compaction::Options {
		compaction::Options {
			processing_mode: self.processing_mode,
			compact_to_relative: self.compact_to_relative,
			compact_arrays: self.compact_arrays,
			ordered: self.ordered,
		}
	}

	pub fn rdf_options(&self) -> rdf::Options {
		rdf::Options {
			rdf_direction: self.rdf_direction,
			use_native_types: self.use_native_types,
			use_rdf_type: self.use_rdf_type,
		}
	}
}

impl Default for Options {
	fn default() -> Self {
		Self {
			base: None,
			expand_context: None,
			compact_arrays: true,
			compact_to_relative: true,
			ordered: false,
			processing_mode: ProcessingMode::JsonLd1_1,
			rdf_direction: None,
			use_native_types: false,
			use_rdf_type: false,
		}
	}
}

/// Failure of the expansion step of any of the `JsonLdProcessor` operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
	#[error("context processing failed: {0}")]
	ContextProcessing(#[from] context_processing::Error),

	#[error("expansion failed: {0}")]
	Expansion(#[from] expansion::Error),
}

pub type ExpandResult = Result<ExpandedDocument, ExpandError>;

/// Failure of [`JsonLdProcessor::compact`].
#[derive(Debug, thiserror::Error)]
pub enum CompactError {
	#[error(transparent)]
	Expand(#[from] ExpandError),

	#[error("context processing failed: {0}")]
	ContextProcessing(#[from] context_processing::Error),

	#[error("compaction failed: {0}")]
	Compaction(#[from] compaction::Error),
}

pub type CompactResult = Result<json_syntax::Value, CompactError>;

/// Failure of [`JsonLdProcessor::flatten`].
#[derive(Debug, thiserror::Error)]
pub enum FlattenError {
	#[error(transparent)]
	Expand(#[from] ExpandError),

	#[error(transparent)]
	Compact(#[from] CompactError),

	#[error(transparent)]
	ConflictingIndexes(#[from] ConflictingIndexes),
}

pub type FlattenResult = Result<json_syntax::Value, FlattenError>;

/// Convenience entry point chaining context processing in front of
/// expansion, compaction and flattening.
///
/// Implemented for [`json_syntax::Value`] (a parsed but otherwise unprocessed
/// document) and [`RemoteDocument`] (one fetched from a known URL, which
/// becomes the default base IRI).
#[allow(async_fn_in_trait)]
pub trait JsonLdProcessor {
	fn default_base_url(&self) -> Option<&iref::Iri>;

	fn as_value(&self) -> &json_syntax::Value;

	/// Expands the document with the given `options`.
	async fn expand_full(
		&self,
		loader: &impl Loader,
		options: Options,
	) -> ExpandResult {
		let base_url = options.base.as_deref().or(self.default_base_url());
		log::debug!("expanding document (base = {base_url:?})");

		let initial_context = match &options.expand_context {
			Some(expand_context) => expand_context
				.process_with(
					&Context::new(base_url.map(ToOwned::to_owned)),
					loader,
					base_url.map(ToOwned::to_owned),
					options.context_processing_options(),
				)
				.await?
				.into_processed(),
			None => Context::new(base_url.map(ToOwned::to_owned)),
		};

		Ok(Expand::expand_full(
			self.as_value(),
			initial_context,
			base_url,
			loader,
			options.expansion_options(),
			&mut (),
		)
		.await?)
	}

	/// Expands the document with the default options.
	async fn expand(&self, loader: &impl Loader) -> ExpandResult {
		JsonLdProcessor::expand_full(self, loader, Options::default()).await
	}

	/// Expands the document, then compacts it against `context`.
	async fn compact_full(
		&self,
		context: &syntax::context::Context,
		loader: &impl Loader,
		options: Options,
	) -> CompactResult {
		log::debug!("compacting document");
		let expanded = JsonLdProcessor::expand_full(self, loader, options.clone()).await?;

		let base_url = options.base.as_deref().or(self.default_base_url());
		let mut active_context = context
			.process_with(
				&Context::new(None),
				loader,
				base_url.map(ToOwned::to_owned),
				options.context_processing_options(),
			)
			.await?;

		match &options.base {
			Some(base) => active_context.set_base_iri(Some(base.clone())),
			None if options.compact_to_relative && active_context.base_iri().is_none() => {
				active_context.set_base_iri(base_url.map(ToOwned::to_owned))
			}
			None => (),
		}

		Ok(expanded
			.compact_full(&active_context, loader, options.compaction_options())
			.await?)
	}

	/// Expands the document, then compacts it against `context` with the
	/// default options.
	async fn compact(
		&self,
		context: &syntax::context::Context,
		loader: &impl Loader,
	) -> CompactResult {
		JsonLdProcessor::compact_full(self, context, loader, Options::default()).await
	}

	/// Expands the document, then flattens it, compacting the result
	/// against `context` (or, if `None`, against the empty context, which
	/// still abbreviates `@id`/`@type`/... to their default compact form).
	async fn flatten_full(
		&self,
		generator: &mut impl Generator,
		context: Option<&syntax::context::Context>,
		loader: &impl Loader,
		options: Options,
	) -> FlattenResult {
		let expanded = JsonLdProcessor::expand_full(self, loader, options.clone()).await?;

		let node_map = crate::generate_node_map(&expanded, generator)?;
		let flattened = node_map.flatten(options.ordered);

		let empty_context = syntax::context::Context::Many(Vec::new());
		let context = context.unwrap_or(&empty_context);

		let base_url = options.base.as_deref().or(self.default_base_url());
		let mut active_context = context
			.process_with(
				&Context::new(None),
				loader,
				base_url.map(ToOwned::to_owned),
				options.context_processing_options(),
			)
			.await
			.map_err(CompactError::ContextProcessing)?;

		match &options.base {
			Some(base) => active_context.set_base_iri(Some(base.clone())),
			None if options.compact_to_relative && active_context.base_iri().is_none() => {
				active_context.set_base_iri(base_url.map(ToOwned::to_owned))
			}
			None => (),
		}

		Ok(flattened
			.compact_full(&active_context, loader, options.compaction_options())
			.await
			.map_err(CompactError::Compaction)?)
	}

	/// Flattens the document without compacting the result.
	async fn flatten(&self, generator: &mut impl Generator, loader: &impl Loader) -> FlattenResult {
		self.flatten_full(generator, None, loader, Options::default()).await
	}
}

impl JsonLdProcessor for json_syntax::Value {
	fn default_base_url(&self) -> Option<&iref::Iri> {
		None
	}

	fn as_value(&self) -> &json_syntax::Value {
		self
	}
}

impl JsonLdProcessor for RemoteDocument {
	fn default_base_url(&self) -> Option<&iref::Iri> {
		self.url()
	}

	fn as_value(&self) -> &json_syntax::Value {
		self.document()
	}
}
