//! The Context Processing Algorithm driver (JSON-LD 1.1 §4.2, steps 1-13):
//! walks `local_context`'s entries (nullification / remote dereference /
//! context-definition object) left to right, folding each into a working
//! copy of `active_context`, then runs the Create Term Definition Algorithm
//! over every term binding.
use crate::{load_context, Error, Options, ProcessingStack, WarningHandler};
use iref::IriBuf;
use json_ld_core::{Context, Loader, ProcessingMode, Term};
use json_ld_syntax::{self as syntax, Nullable};

mod define;
mod iri;
mod merged;

pub use define::{define, DefinedTerms};
pub use iri::{Action, Expandable, RejectVocab};
pub use merged::Merged;

use iri::{expand_iri_simple, resolve_iri};

/// Default value for `remote_contexts` is the empty stack, `false` for
/// `override_protected`, and `true` for `propagate`.
#[allow(clippy::too_many_arguments)]
pub async fn process_context(
	active_context: &Context,
	local_context: &syntax::context::Context,
	loader: &impl Loader,
	mut remote_contexts: ProcessingStack<IriBuf>,
	base_url: Option<IriBuf>,
	mut options: Options,
	warnings: &mut impl WarningHandler,
) -> Result<Context, Error> {
	// 2) If `local_context` is an object containing the member `@propagate`,
	// its value overrides `options.propagate`.
	if let syntax::context::Context::One(syntax::ContextEntry::Definition(def)) = local_context {
		if let Some(propagate) = def.propagate {
			if options.processing_mode == ProcessingMode::JsonLd1_0 {
				return Err(Error::InvalidContextEntry);
			}
			options.propagate = propagate;
		}
	}

	// 1) Initialize result to the result of cloning active context.
	let mut result = active_context.clone();

	// 3) If propagate is false, and result does not have a previous
	// context, set previous context in result to active context.
	if !options.propagate && result.previous_context().is_none() {
		result.set_previous_context(active_context.clone());
	}

	// 4)/5) For each entry of local context (coerced to an array):
	for entry in local_context.iter() {
		match entry {
			// 5.1) If context is null:
			syntax::ContextEntry::Null => {
				if !options.override_protected && result.has_protected_items() {
					return Err(Error::InvalidContextNullification);
				}

				let previous_result = result;
				result = Context::new(active_context.original_base_url().map(ToOwned::to_owned));

				if !options.propagate {
					result.set_previous_context(previous_result);
				}
			}

			// 5.2) If context is a string,
			syntax::ContextEntry::IriRef(iri_ref) => {
				let context_iri = resolve_iri(iri_ref.as_iri_ref(), base_url.as_deref())
					.ok_or(Error::InvalidRemoteContext)?;

				// If context was already dereferenced in this call chain, a
				// context overflow / loop has been detected.
				if remote_contexts.push(context_iri.clone()) {
					let loaded_context = load_context(loader, &context_iri).await?;

					let new_options = Options {
						processing_mode: options.processing_mode,
						override_protected: false,
						propagate: true,
						vocab: options.vocab,
					};

					result = Box::pin(process_context(
						&result,
						&loaded_context,
						loader,
						remote_contexts.clone(),
						Some(context_iri),
						new_options,
						warnings,
					))
					.await?;
				}
			}

			// 5.4) Context definition.
			syntax::ContextEntry::Definition(context) => {
				// 5.5) If context has an `@version` entry and processing
				// mode is 1.0, a processing mode conflict has been
				// detected.
				if context.version.is_some() && options.processing_mode == ProcessingMode::JsonLd1_0 {
					return Err(Error::ProcessingModeConflict);
				}

				// 5.6) If context has an `@import` entry:
				let import_context = match &context.import {
					Some(import_value) => {
						if options.processing_mode == ProcessingMode::JsonLd1_0 {
							return Err(Error::InvalidContextEntry);
						}

						let import = resolve_iri(import_value.0.as_iri_ref(), base_url.as_deref())
							.ok_or(Error::InvalidImportValue)?;

						let import_context = load_context(loader, &import).await?;

						match &import_context {
							syntax::context::Context::One(syntax::ContextEntry::Definition(def)) => {
								if def.import.is_some() {
									return Err(Error::InvalidContextEntry);
								}
							}
							_ => return Err(Error::InvalidRemoteContext),
						}

						Some(import_context)
					}
					None => None,
				};

				let merged = Merged::new(context, import_context);

				// 5.7) If context has a `@base` entry and remote contexts
				// is empty (this isn't a remote context being processed):
				if remote_contexts.is_empty() {
					if let Some(value) = merged.base() {
						match value {
							Nullable::Null => result.set_base_iri(None),
							Nullable::Some(iri_ref) => match iri_ref.as_iri() {
								Some(iri) => result.set_base_iri(Some(iri.to_owned())),
								None => {
									let resolved = resolve_iri(iri_ref, result.base_iri())
										.ok_or(Error::InvalidBaseIri)?;
									result.set_base_iri(Some(resolved));
								}
							},
						}
					}
				}

				// 5.8) If context has a `@vocab` entry:
				if let Some(value) = merged.vocab() {
					match value {
						Nullable::Null => result.set_vocabulary(None),
						Nullable::Some(vocab) => match expand_iri_simple(
							&result,
							Nullable::Some(Expandable::String(vocab.as_str())),
							true,
							Some(options.vocab),
							warnings,
						)? {
							Some(Term::Id(id)) => result.set_vocabulary(Some(Term::Id(id))),
							_ => return Err(Error::InvalidVocabMapping),
						},
					}
				}

				// 5.9) If context has a `@language` entry:
				if let Some(value) = merged.language() {
					match value {
						Nullable::Null => result.set_default_language(None),
						Nullable::Some(tag) => result.set_default_language(Some(tag.to_owned())),
					}
				}

				// 5.10) If context has a `@direction` entry:
				if let Some(value) = merged.direction() {
					if options.processing_mode == ProcessingMode::JsonLd1_0 {
						return Err(Error::InvalidContextEntry);
					}

					match value {
						Nullable::Null => result.set_default_base_direction(None),
						Nullable::Some(dir) => result.set_default_base_direction(Some(dir)),
					}
				}

				// 5.12) Create a map to track term definition cycles.
				let mut defined = DefinedTerms::new();
				let protected = merged.protected().unwrap_or(false);

				// 5.13) Define every term binding (and `@type`'s own
				// restricted term definition, if present).
				if merged.type_().is_some() {
					define(
						&mut result,
						&merged,
						"@type",
						&mut defined,
						loader,
						remote_contexts.clone(),
						base_url.clone(),
						protected,
						options,
						warnings,
					)
					.await?;
				}

				for (key, _) in merged.bindings() {
					define(
						&mut result,
						&merged,
						key,
						&mut defined,
						loader,
						remote_contexts.clone(),
						base_url.clone(),
						protected,
						options,
						warnings,
					)
					.await?;
				}
			}
		}
	}

	Ok(result)
}
