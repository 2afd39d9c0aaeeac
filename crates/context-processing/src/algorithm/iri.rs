//! IRI Expansion (JSON-LD 1.1 §4.2's "IRI Expansion" routine), used both
//! while expanding term/value strings met outside a term definition
//! (`expand_iri`), and -- through [`expand_iri_with`] -- while a term
//! definition is itself being created, where expanding a dependency may
//! recursively trigger [`super::define`].
use super::merged::Merged;
use super::DefinedTerms;
use crate::{Error, Options, ProcessingStack, Warning, WarningHandler};
use iref::{Iri, IriBuf, IriRef};
use json_ld_core::{Context, Id, Loader, Term};
use json_ld_syntax::{is_keyword_like, CompactIri, Keyword, Nullable};
use rdf_types::BlankId;

/// A value passed to IRI expansion: a keyword literal, or an ordinary
/// string that may be a term, compact IRI, IRI, or IRI reference.
#[derive(Clone, Copy, Debug)]
pub enum Expandable<'a> {
	Keyword(Keyword),
	String(&'a str),
}

impl<'a> From<&'a str> for Expandable<'a> {
	fn from(value: &'a str) -> Self {
		Self::String(value)
	}
}

/// Resolves `iri_ref` against `base_iri`, falling back to requiring it to
/// already be a valid IRI when there is no base.
pub(crate) fn resolve_iri(iri_ref: &IriRef, base_iri: Option<&Iri>) -> Option<IriBuf> {
	match base_iri {
		Some(base) => Some(iri_ref.resolved(base)),
		None => iri_ref.as_iri().map(|iri| iri.to_owned()),
	}
}

/// What to do when a plain (non-prefixed) term would otherwise expand
/// through `@vocab`. Only ever set to something other than `Keep` by the
/// Create Term Definition Algorithm, which must not resolve `@vocab` while
/// expanding a term's own `@id`/`@reverse` value against itself.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Action {
	#[default]
	Keep,
	Drop,
	Reject,
}

#[derive(Debug)]
pub struct RejectVocab;

fn invalid_iri(warnings: &mut impl WarningHandler, value: String) -> Term {
	warnings.handle(Warning::MalformedIri(value.clone()));
	Term::Id(Id::Invalid(value))
}

/// IRI expansion that may recursively define terms found along the way, for
/// use from within the Create Term Definition Algorithm.
///
/// Default values for `document_relative` and `vocab` are `false` and `true`.
#[allow(clippy::too_many_arguments)]
pub async fn expand_iri_with(
	active_context: &mut Context,
	value: Nullable<Expandable<'_>>,
	document_relative: bool,
	vocab: Option<Action>,
	local_context: &Merged<'_>,
	defined: &mut DefinedTerms,
	loader: &impl Loader,
	remote_contexts: ProcessingStack<IriBuf>,
	options: Options,
	warnings: &mut impl WarningHandler,
) -> Result<Option<Term>, Error> {
	match value {
		Nullable::Null => Ok(Some(Term::Null)),
		Nullable::Some(Expandable::Keyword(k)) => Ok(Some(Term::Keyword(k))),
		Nullable::Some(Expandable::String(value)) => {
			if is_keyword_like(value) {
				return Ok(Some(Term::Null));
			}

			// If local context contains an entry for value and it isn't yet
			// defined, define it now: this is how expanding a term's `@id`
			// pulls in its dependencies.
			if local_context.get(value).is_some() {
				Box::pin(super::define::define(
					active_context,
					local_context,
					value,
					defined,
					loader,
					remote_contexts.clone(),
					None,
					false,
					options.with_no_override(),
					warnings,
				))
				.await?;
			}

			if let Some(term_definition) = active_context.get(value) {
				if let Some(mapping) = term_definition.value() {
					if mapping.is_keyword() {
						return Ok(Some(mapping.clone()));
					}
				}

				if vocab.is_some() {
					return match term_definition.value() {
						Some(mapping) => Ok(Some(mapping.clone())),
						None => Ok(Some(Term::Null)),
					};
				}
			}

			if value.find(':').map(|i| i > 0).unwrap_or(false) {
				if let Ok(blank_id) = BlankId::new(value) {
					return Ok(Some(Term::Id(Id::blank(blank_id.to_owned()))));
				}

				if value == "_:" {
					return Ok(Some(Term::Id(Id::Invalid("_:".to_string()))));
				}

				if let Ok(compact_iri) = CompactIri::new(value) {
					Box::pin(super::define::define(
						active_context,
						local_context,
						compact_iri.prefix(),
						defined,
						loader,
						remote_contexts,
						None,
						false,
						options.with_no_override(),
						warnings,
					))
					.await?;

					if let Some(term_definition) = active_context.get(compact_iri.prefix()) {
						if let Some(def) = term_definition.as_normal() {
							if def.prefix {
								if let Some(mapping) = &def.value {
									if let Some(iri) = mapping.as_iri() {
										let mut result = iri.as_str().to_string();
										result.push_str(compact_iri.suffix());
										return Ok(Some(Term::Id(Id::from_string(result))));
									}
								}
							}
						}
					}
				}

				if let Ok(iri) = Iri::new(value) {
					return Ok(Some(Term::Id(Id::iri(iri.to_owned()))));
				}
			}

			if let Some(action) = vocab {
				match active_context.vocabulary() {
					Some(Term::Id(mapping)) => {
						return match action {
							Action::Keep => {
								let mut result = mapping.as_str().to_string();
								result.push_str(value);
								Ok(Some(Term::Id(Id::from_string(result))))
							}
							Action::Drop => Ok(None),
							Action::Reject => Err(Error::ForbiddenVocab),
						};
					}
					Some(_) => return Ok(Some(invalid_iri(warnings, value.to_string()))),
					None => (),
				}
			}

			if document_relative {
				if let Ok(iri_ref) = IriRef::new(value) {
					if let Some(iri) = resolve_iri(iri_ref, active_context.base_iri()) {
						return Ok(Some(Term::from(iri)));
					}
				}
			}

			Ok(Some(invalid_iri(warnings, value.to_string())))
		}
	}
}

/// IRI expansion for use outside of Create Term Definition: `value` is
/// assumed to already have any term definition it needs.
///
/// Default values for `document_relative` and `vocab` are `false` and `true`.
pub fn expand_iri_simple(
	active_context: &Context,
	value: Nullable<Expandable<'_>>,
	document_relative: bool,
	vocab: Option<Action>,
	warnings: &mut impl WarningHandler,
) -> Result<Option<Term>, RejectVocab> {
	match value {
		Nullable::Null => Ok(Some(Term::Null)),
		Nullable::Some(Expandable::Keyword(k)) => Ok(Some(Term::Keyword(k))),
		Nullable::Some(Expandable::String(value)) => {
			if is_keyword_like(value) {
				return Ok(Some(Term::Null));
			}

			if let Some(term_definition) = active_context.get(value) {
				if let Some(mapping) = term_definition.value() {
					if mapping.is_keyword() {
						return Ok(Some(mapping.clone()));
					}
				}

				if vocab.is_some() {
					return match term_definition.value() {
						Some(mapping) => Ok(Some(mapping.clone())),
						None => Ok(Some(Term::Null)),
					};
				}
			}

			if value.find(':').map(|i| i > 0).unwrap_or(false) {
				if let Ok(blank_id) = BlankId::new(value) {
					return Ok(Some(Term::Id(Id::blank(blank_id.to_owned()))));
				}

				if value == "_:" {
					return Ok(Some(Term::Id(Id::Invalid("_:".to_string()))));
				}

				if let Ok(compact_iri) = CompactIri::new(value) {
					if let Some(term_definition) = active_context.get(compact_iri.prefix()) {
						if let Some(def) = term_definition.as_normal() {
							if def.prefix {
								if let Some(mapping) = &def.value {
									if let Some(iri) = mapping.as_iri() {
										let mut result = iri.as_str().to_string();
										result.push_str(compact_iri.suffix());
										return Ok(Some(Term::Id(Id::from_string(result))));
									}
								}
							}
						}
					}
				}

				if let Ok(iri) = Iri::new(value) {
					return Ok(Some(Term::Id(Id::iri(iri.to_owned()))));
				}
			}

			if let Some(action) = vocab {
				match active_context.vocabulary() {
					Some(Term::Id(mapping)) => {
						return match action {
							Action::Keep => {
								let mut result = mapping.as_str().to_string();
								result.push_str(value);
								Ok(Some(Term::Id(Id::from_string(result))))
							}
							Action::Drop => Ok(None),
							Action::Reject => Err(RejectVocab),
						};
					}
					Some(_) => return Ok(Some(invalid_iri(warnings, value.to_string()))),
					None => (),
				}
			}

			if document_relative {
				if let Ok(iri_ref) = IriRef::new(value) {
					if let Some(iri) = resolve_iri(iri_ref, active_context.base_iri()) {
						return Ok(Some(Term::from(iri)));
					}
				}
			}

			Ok(Some(invalid_iri(warnings, value.to_string())))
		}
	}
}
