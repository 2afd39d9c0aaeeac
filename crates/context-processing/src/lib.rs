//! The Context Processing Algorithm (JSON-LD 1.1 §4.2): turns a raw
//! [`json_ld_syntax::context::Context`] into a [`json_ld_core::Context`],
//! resolving `@import`/remote `@context` IRIs through a [`Loader`] and
//! building a [`json_ld_core::context::TermDefinition`] for every term via
//! the Create Term Definition Algorithm.
use json_ld_core::Context;
pub use json_ld_core::ProcessingMode;
use json_ld_core::{LoadError, Loader};

pub mod algorithm;
mod processed;
mod stack;

pub use algorithm::{process_context, Action};
pub use processed::Processed;
pub use stack::ProcessingStack;

/// Warnings specific to context processing (on top of the ones
/// [`json_ld_core::Warning`] already covers).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
	/// A term or `@reverse`/`@id` value had the shape of a keyword
	/// (`@[A-Za-z]+`) but isn't one.
	KeywordLikeValue(String),

	/// A string used where an IRI was expected did not expand to one.
	MalformedIri(String),
}

impl std::fmt::Display for Warning {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::KeywordLikeValue(s) => write!(f, "keyword-like value `{s}`"),
			Self::MalformedIri(s) => write!(f, "malformed IRI `{s}`"),
		}
	}
}

pub trait WarningHandler: json_ld_core::warning::Handler<Warning> {}
impl<H: json_ld_core::warning::Handler<Warning>> WarningHandler for H {}

/// Errors that can happen during context processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid context nullification")]
	InvalidContextNullification,

	#[error("processing mode conflict")]
	ProcessingModeConflict,

	#[error("invalid `@context` entry")]
	InvalidContextEntry,

	#[error("invalid `@import` value")]
	InvalidImportValue,

	#[error("invalid remote context")]
	InvalidRemoteContext,

	#[error("invalid base IRI")]
	InvalidBaseIri,

	#[error("invalid vocabulary mapping")]
	InvalidVocabMapping,

	#[error("cyclic IRI mapping")]
	CyclicIriMapping,

	#[error("invalid term definition")]
	InvalidTermDefinition,

	#[error("keyword redefinition")]
	KeywordRedefinition,

	#[error("invalid type mapping")]
	InvalidTypeMapping,

	#[error("invalid reverse property")]
	InvalidReverseProperty,

	#[error("invalid IRI mapping")]
	InvalidIriMapping,

	#[error("invalid keyword alias")]
	InvalidKeywordAlias,

	#[error("invalid container mapping")]
	InvalidContainerMapping,

	#[error("invalid scoped context")]
	InvalidScopedContext,

	#[error("protected term redefinition")]
	ProtectedTermRedefinition,

	#[error(transparent)]
	ContextLoadingFailed(#[from] LoadError),

	#[error("loaded document has no top-level `@context` entry")]
	InvalidRemoteContextDocument,

	#[error("use of `@vocab` is forbidden here")]
	ForbiddenVocab,
}

impl From<algorithm::RejectVocab> for Error {
	fn from(_: algorithm::RejectVocab) -> Self {
		Self::ForbiddenVocab
	}
}

/// Runs the Context Processing Algorithm, processing `local_context` on top
/// of `active_context`.
#[allow(async_fn_in_trait)]
pub trait Process {
	async fn process_full(
		&self,
		active_context: &Context,
		loader: &impl Loader,
		base_url: Option<iref::IriBuf>,
		options: Options,
		warnings: &mut impl WarningHandler,
	) -> Result<Processed<'_>, Error>;

	async fn process_with(
		&self,
		active_context: &Context,
		loader: &impl Loader,
		base_url: Option<iref::IriBuf>,
		options: Options,
	) -> Result<Processed<'_>, Error> {
		self.process_full(
			active_context,
			loader,
			base_url,
			options,
			&mut json_ld_core::warning::Print,
		)
		.await
	}

	/// Processes with the default options: `processing_mode` 1.1,
	/// `override_protected` false, `propagate` true.
	async fn process(
		&self,
		loader: &impl Loader,
		base_url: Option<iref::IriBuf>,
	) -> Result<Processed<'_>, Error> {
		self.process_full(
			&Context::default(),
			loader,
			base_url,
			Options::default(),
			&mut json_ld_core::warning::Print,
		)
		.await
	}
}

impl Process for json_ld_syntax::context::Context {
	async fn process_full(
		&self,
		active_context: &Context,
		loader: &impl Loader,
		base_url: Option<iref::IriBuf>,
		options: Options,
		warnings: &mut impl WarningHandler,
	) -> Result<Processed<'_>, Error> {
		let result = process_context(
			active_context,
			self,
			loader,
			ProcessingStack::new(),
			base_url,
			options,
			warnings,
		)
		.await?;
		Ok(Processed::new(self, result))
	}
}

/// Options of the Context Processing Algorithm.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Options {
	pub processing_mode: ProcessingMode,
	pub override_protected: bool,
	pub propagate: bool,
	/// Forbids the use of `@vocab` to expand terms (used by the JSON-LD API's
	/// `expandContext` step, which must not itself resolve through `@vocab`).
	pub vocab: Action,
}

impl Options {
	#[must_use]
	pub fn with_override(&self) -> Options {
		let mut opt = *self;
		opt.override_protected = true;
		opt
	}

	#[must_use]
	pub fn with_no_override(&self) -> Options {
		let mut opt = *self;
		opt.override_protected = false;
		opt
	}

	#[must_use]
	pub fn without_propagation(&self) -> Options {
		let mut opt = *self;
		opt.propagate = false;
		opt
	}
}

impl Default for Options {
	fn default() -> Options {
		Options {
			processing_mode: ProcessingMode::default(),
			override_protected: false,
			propagate: true,
			vocab: Action::Keep,
		}
	}
}

/// Loads `url` and extracts the `@context` value of the top-level map,
/// failing if the document isn't a JSON object or has no `@context` entry.
pub(crate) async fn load_context(
	loader: &impl Loader,
	url: &iref::Iri,
) -> Result<json_ld_syntax::context::Context, Error> {
	let remote = loader.load(url).await?;
	let document: json_ld_syntax::context::ContextDocument =
		json_syntax::from_value(remote.into_document())
			.map_err(|_| Error::InvalidRemoteContextDocument)?;
	Ok(document.context)
}
