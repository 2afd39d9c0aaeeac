//! Create Term Definition (JSON-LD 1.1 §4.2's "Create Term Definition"
//! algorithm): builds the [`json_ld_core::context::TermDefinition`] for a
//! single term, recursively defining whatever terms it depends on first.
use super::iri::{expand_iri_simple, expand_iri_with, Expandable};
use super::merged::Merged;
use crate::{Error, Options, ProcessingStack, Warning, WarningHandler};
use iref::{Iri, IriBuf, IriRef};
use json_ld_core::{
	context::{NormalTermDefinition, TermDefinition, TermType, TypeTermDefinition},
	Container, ContainerKind, Id, Loader, Term, ValidId,
};
use json_ld_syntax::{
	context::term_definition::Id as RawId, CompactIri, Keyword, Nullable,
};
use rdf_types::BlankId;
use std::collections::HashMap;

fn container_contains(container: &Container, kind: ContainerKind) -> bool {
	match container {
		Container::One(k) => *k == kind,
		Container::Many(ks) => ks.contains(&kind),
	}
}

fn is_gen_delim(c: char) -> bool {
	matches!(c, ':' | '/' | '?' | '#' | '[' | ']' | '@')
}

fn is_gen_delim_or_blank(t: &Term) -> bool {
	match t {
		Term::Id(Id::Valid(ValidId::Blank(_))) => true,
		Term::Id(Id::Valid(ValidId::Iri(id))) => {
			id.as_str().chars().last().is_some_and(is_gen_delim)
		}
		_ => false,
	}
}

/// `true` if `c` occurs in `id` somewhere other than the first or last
/// character.
fn contains_between_boundaries(id: &str, c: char) -> bool {
	if let Some(i) = id.find(c) {
		let j = id.rfind(c).unwrap();
		i > 0 && j < id.len() - 1
	} else {
		false
	}
}

fn term_to_type(term: Term) -> Option<TermType> {
	match term {
		Term::Keyword(Keyword::Id) => Some(TermType::Id),
		Term::Keyword(Keyword::Json) => Some(TermType::Json),
		Term::Keyword(Keyword::None) => Some(TermType::None),
		Term::Keyword(Keyword::Vocab) => Some(TermType::Vocab),
		Term::Id(Id::Valid(ValidId::Iri(iri))) => Some(TermType::Other(iri)),
		_ => None,
	}
}

#[derive(Default)]
pub struct DefinedTerms(HashMap<String, DefinedTerm>);

struct DefinedTerm {
	pending: bool,
}

impl DefinedTerms {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `Ok(true)` the first time `key` is seen (the caller should go
	/// on to define it), `Ok(false)` if it's already fully defined, or
	/// `Err` if `key` is currently mid-definition (a cyclic IRI mapping).
	pub fn begin(&mut self, key: &str) -> Result<bool, Error> {
		match self.0.get(key) {
			Some(d) => {
				if d.pending {
					Err(Error::CyclicIriMapping)
				} else {
					Ok(false)
				}
			}
			None => {
				self.0.insert(key.to_owned(), DefinedTerm { pending: true });
				Ok(true)
			}
		}
	}

	pub fn end(&mut self, key: &str) {
		self.0.get_mut(key).unwrap().pending = false
	}
}

/// A term definition as it appears in a raw context, normalized across its
/// `Simple`/`Expanded`/`Null` forms so the rest of this algorithm can read
/// it uniformly.
struct RawDefinition<'a> {
	is_expanded: bool,
	id: Option<Nullable<IdRef<'a>>>,
	type_: Option<Nullable<&'a str>>,
	context: Option<&'a json_ld_syntax::context::Context>,
	reverse: Option<&'a str>,
	index: Option<&'a str>,
	language: Option<Nullable<&'a json_ld_syntax::LenientLangTagBuf>>,
	direction: Option<Nullable<json_ld_syntax::Direction>>,
	container: Option<Nullable<&'a json_ld_syntax::Container>>,
	nest: Option<&'a str>,
	prefix: Option<bool>,
	propagate: Option<bool>,
	protected: Option<bool>,
}

#[derive(Clone, Copy)]
enum IdRef<'a> {
	Keyword(Keyword),
	Term(&'a str),
}

impl<'a> IdRef<'a> {
	fn as_str(&self) -> &'a str {
		match self {
			Self::Keyword(k) => k.as_str(),
			Self::Term(t) => t,
		}
	}

	fn is_keyword(&self) -> bool {
		matches!(self, Self::Keyword(_))
	}
}

impl<'a> From<&'a RawId> for IdRef<'a> {
	fn from(value: &'a RawId) -> Self {
		match value {
			RawId::Keyword(k) => Self::Keyword(*k),
			RawId::Term(t) => Self::Term(t.as_str()),
		}
	}
}

fn normalize(
	def: Nullable<&json_ld_syntax::context::TermDefinition>,
) -> RawDefinition<'_> {
	use json_ld_syntax::context::TermDefinition as Raw;

	match def {
		Nullable::Null => RawDefinition {
			is_expanded: false,
			id: Some(Nullable::Null),
			type_: None,
			context: None,
			reverse: None,
			index: None,
			language: None,
			direction: None,
			container: None,
			nest: None,
			prefix: None,
			propagate: None,
			protected: None,
		},
		Nullable::Some(Raw::Simple(s)) => RawDefinition {
			is_expanded: false,
			id: Some(Nullable::Some(IdRef::Term(s.as_str()))),
			type_: None,
			context: None,
			reverse: None,
			index: None,
			language: None,
			direction: None,
			container: None,
			nest: None,
			prefix: None,
			propagate: None,
			protected: None,
		},
		Nullable::Some(Raw::Expanded(e)) => RawDefinition {
			is_expanded: true,
			id: e.id.as_ref().map(|v| v.as_ref().map(IdRef::from)),
			type_: e.type_.as_ref().map(|v| v.as_ref().map(|t| t.as_str())),
			context: e.context.as_deref(),
			reverse: e.reverse.as_deref(),
			index: e.index.as_ref().map(|i| i.as_str()),
			language: e.language.as_ref().map(Nullable::as_ref),
			direction: e.direction,
			container: e.container.as_ref().map(Nullable::as_ref),
			nest: e.nest.as_ref().map(|n| n.as_str()),
			prefix: e.prefix,
			propagate: e.propagate,
			protected: e.protected,
		},
	}
}

/// Default value for `base_url` is `None`. Default values for `protected`
/// and `override_protected` are `false`.
#[allow(clippy::too_many_arguments)]
pub async fn define(
	active_context: &mut json_ld_core::Context,
	local_context: &Merged<'_>,
	term: &str,
	defined: &mut DefinedTerms,
	loader: &impl Loader,
	remote_contexts: ProcessingStack<IriBuf>,
	base_url: Option<IriBuf>,
	protected: bool,
	options: Options,
	warnings: &mut impl WarningHandler,
) -> Result<(), Error> {
	if defined.begin(term)? {
		if term.is_empty() {
			return Err(Error::InvalidTermDefinition);
		}

		if term == "@type" {
			if let Some(d) = local_context.type_() {
				if options.processing_mode == json_ld_core::ProcessingMode::JsonLd1_0 {
					return Err(Error::KeywordRedefinition);
				}

				let previous_definition = active_context.get("@type");
				active_context.remove("@type");

				let mut definition = TypeTermDefinition::default();
				if let Some(protected) = d.protected {
					if options.processing_mode == json_ld_core::ProcessingMode::JsonLd1_0 {
						return Err(Error::InvalidTermDefinition);
					}
					definition.protected = protected;
				}

				if !options.override_protected {
					if let Some(previous_definition) = previous_definition {
						if previous_definition.is_protected() {
							if !TermDefinition::Type(definition)
								.equivalent_modulo_protected(&previous_definition)
							{
								return Err(Error::ProtectedTermRedefinition);
							}
							definition.protected = true;
						}
					}
				}

				active_context.set("@type".to_string(), TermDefinition::Type(definition));
			}
		} else if Keyword::try_from(term).is_ok() {
			// Keywords other than `@type` cannot be redefined.
			if local_context.get(term).is_some() {
				return Err(Error::KeywordRedefinition);
			}
		} else if let Some(raw) = local_context.get(term) {
			let previous_definition = active_context.get(term);
			active_context.remove(term);

			let simple_term = !normalize(raw).is_expanded;
			let value = normalize(raw);

			let mut definition = NormalTermDefinition {
				protected,
				..Default::default()
			};

			if let Some(protected) = value.protected {
				if options.processing_mode == json_ld_core::ProcessingMode::JsonLd1_0 {
					return Err(Error::InvalidTermDefinition);
				}
				definition.protected = protected;
			}

			if let Some(type_) = value.type_ {
				let typ = expand_iri_with(
					active_context,
					type_.cast(),
					false,
					Some(options.vocab),
					local_context,
					defined,
					loader,
					remote_contexts.clone(),
					options,
					warnings,
				)
				.await?;

				if let Some(typ) = typ {
					if options.processing_mode == json_ld_core::ProcessingMode::JsonLd1_0
						&& (typ == Term::Keyword(Keyword::Json) || typ == Term::Keyword(Keyword::None))
					{
						return Err(Error::InvalidTypeMapping);
					}

					match term_to_type(typ) {
						Some(typ) => definition.typ = Some(typ),
						None => return Err(Error::InvalidTypeMapping),
					}
				}
			}

			if let Some(reverse_value) = value.reverse {
				if value.id.is_some() || value.nest.is_some() {
					return Err(Error::InvalidReverseProperty);
				}

				if json_ld_syntax::is_keyword_like(reverse_value) {
					warnings.handle(Warning::KeywordLikeValue(reverse_value.to_owned()));
					return Ok(());
				}

				match expand_iri_with(
					active_context,
					Nullable::Some(Expandable::String(reverse_value)),
					false,
					Some(options.vocab),
					local_context,
					defined,
					loader,
					remote_contexts.clone(),
					options,
					warnings,
				)
				.await?
				{
					Some(Term::Id(mapping)) if mapping.is_valid() => {
						definition.value = Some(Term::Id(mapping))
					}
					_ => return Err(Error::InvalidIriMapping),
				}

				if let Some(container_value) = value.container {
					match container_value {
						Nullable::Null => (),
						Nullable::Some(container_value) => {
							if matches!(
								container_value,
								Container::One(ContainerKind::Set) | Container::One(ContainerKind::Index)
							) {
								definition.container = Some(container_value.clone());
							} else {
								return Err(Error::InvalidReverseProperty);
							}
						}
					}
				}

				definition.reverse_property = true;
				active_context.set(term.to_owned(), TermDefinition::Normal(Box::new(definition)));
				defined.end(term);
				return Ok(());
			}

			match value.id {
				Some(id_value) if id_value.as_ref().map(IdRef::as_str) != Nullable::Some(term) => {
					match id_value {
						Nullable::Null => (),
						Nullable::Some(id_value) => {
							if json_ld_syntax::is_keyword_like(id_value.as_str())
								&& !id_value.is_keyword()
							{
								warnings.handle(Warning::KeywordLikeValue(id_value.as_str().to_owned()));
								return Ok(());
							}

							let expandable = match id_value {
								IdRef::Keyword(k) => Expandable::Keyword(k),
								IdRef::Term(t) => Expandable::String(t),
							};

							definition.value = match expand_iri_with(
								active_context,
								Nullable::Some(expandable),
								false,
								Some(options.vocab),
								local_context,
								defined,
								loader,
								remote_contexts.clone(),
								options,
								warnings,
							)
							.await?
							{
								Some(Term::Keyword(Keyword::Context)) => {
									return Err(Error::InvalidKeywordAlias);
								}
								Some(Term::Id(id)) if !id.is_valid() => {
									return Err(Error::InvalidIriMapping);
								}
								value => value,
							};

							if contains_between_boundaries(term, ':') || term.contains('/') {
								defined.end(term);

								let expanded_term = expand_iri_with(
									active_context,
									Nullable::Some(Expandable::String(term)),
									false,
									Some(options.vocab),
									local_context,
									defined,
									loader,
									remote_contexts.clone(),
									options,
									warnings,
								)
								.await?;

								if definition.value != expanded_term {
									return Err(Error::InvalidIriMapping);
								}
							}

							if !term.contains(':')
								&& !term.contains('/')
								&& simple_term
								&& is_gen_delim_or_blank(definition.value.as_ref().unwrap())
							{
								definition.prefix = true;
							}
						}
					}
				}
				Some(Nullable::Some(IdRef::Keyword(Keyword::Type))) => {
					definition.value = Some(Term::Keyword(Keyword::Type))
				}
				_ => {
					if let Ok(compact_iri) = CompactIri::new(term) {
						Box::pin(define(
							active_context,
							local_context,
							compact_iri.prefix(),
							defined,
							loader,
							remote_contexts.clone(),
							None,
							false,
							options.with_no_override(),
							warnings,
						))
						.await?;

						if let Some(prefix_definition) = active_context.get(compact_iri.prefix()) {
							let mut result = String::new();
							if let Some(prefix_key) = prefix_definition.value() {
								if let Some(prefix_iri) = prefix_key.as_iri() {
									result = prefix_iri.as_str().to_string();
								}
							}
							result.push_str(compact_iri.suffix());

							if let Ok(iri) = Iri::new(result.as_str()) {
								definition.value = Some(Term::Id(Id::iri(iri.to_owned())));
							} else {
								return Err(Error::InvalidIriMapping);
							}
						}
					}

					if definition.value.is_none() {
						if let Ok(blank_id) = BlankId::new(term) {
							definition.value = Some(Term::Id(Id::blank(blank_id.to_owned())));
						} else if let Ok(iri_ref) = IriRef::new(term) {
							match iri_ref.as_iri() {
								Some(iri) => {
									definition.value = Some(Term::Id(Id::iri(iri.to_owned())));
								}
								None => {
									if iri_ref.as_str().contains('/') {
										match expand_iri_simple(
											active_context,
											Nullable::Some(Expandable::String(iri_ref.as_str())),
											false,
											Some(options.vocab),
											warnings,
										)? {
											Some(Term::Id(Id::Valid(ValidId::Iri(id)))) => {
												definition.value = Some(Term::from(id))
											}
											_ => return Err(Error::InvalidIriMapping),
										}
									}
								}
							}
						}

						if definition.value.is_none() {
							if let Some(context_vocabulary) = active_context.vocabulary() {
								if let Some(vocabulary_iri) = context_vocabulary.as_iri() {
									let mut result = vocabulary_iri.as_str().to_string();
									result.push_str(term);
									if let Ok(iri) = Iri::new(result.as_str()) {
										definition.value = Some(Term::from(iri.to_owned()));
									} else {
										return Err(Error::InvalidIriMapping);
									}
								} else {
									return Err(Error::InvalidIriMapping);
								}
							} else {
								return Err(Error::InvalidIriMapping);
							}
						}
					}
				}
			}

			if let Some(container_value) = value.container {
				if options.processing_mode == json_ld_core::ProcessingMode::JsonLd1_0 {
					match container_value {
						Nullable::Null
						| Nullable::Some(
							Container::Many(_)
							| Container::One(
								ContainerKind::Graph | ContainerKind::Id | ContainerKind::Type,
							),
						) => return Err(Error::InvalidContainerMapping),
						_ => (),
					}
				}

				definition.container = container_value.cloned().option();

				if definition
					.container
					.as_ref()
					.is_some_and(|c| container_contains(c, ContainerKind::Type))
				{
					match &definition.typ {
						Some(TermType::Id) | Some(TermType::Vocab) => (),
						Some(_) => return Err(Error::InvalidTypeMapping),
						None => definition.typ = Some(TermType::Id),
					}
				}
			}

			if let Some(index_value) = value.index {
				if !definition
					.container
					.as_ref()
					.is_some_and(|c| container_contains(c, ContainerKind::Index))
					|| options.processing_mode == json_ld_core::ProcessingMode::JsonLd1_0
				{
					return Err(Error::InvalidTermDefinition);
				}

				match expand_iri_simple(
					active_context,
					Nullable::Some(Expandable::String(index_value)),
					false,
					Some(options.vocab),
					warnings,
				)? {
					Some(Term::Id(Id::Valid(ValidId::Iri(_)))) => (),
					_ => return Err(Error::InvalidTermDefinition),
				}

				definition.index =
					Some(json_ld_syntax::context::term_definition::Index::from(index_value.to_owned()));
			}

			if let Some(context) = value.context {
				if options.processing_mode == json_ld_core::ProcessingMode::JsonLd1_0 {
					return Err(Error::InvalidTermDefinition);
				}

				Box::pin(super::process_context(
					active_context,
					context,
					loader,
					remote_contexts.clone(),
					base_url.clone(),
					options.with_override(),
					warnings,
				))
				.await
				.map_err(|_| Error::InvalidScopedContext)?;

				definition.context = Some(Box::new(context.clone()));
				definition.base_url = base_url.clone();
			}

			if value.type_.is_none() {
				if let Some(language_value) = value.language {
					definition.language = language_value.cloned().option();
				}

				if let Some(direction_value) = value.direction {
					definition.direction = direction_value.option();
				}
			}

			if let Some(nest_value) = value.nest {
				if options.processing_mode == json_ld_core::ProcessingMode::JsonLd1_0 {
					return Err(Error::InvalidTermDefinition);
				}
				definition.nest = Some(json_ld_syntax::context::term_definition::Nest::from(
					nest_value.to_owned(),
				));
			}

			if let Some(prefix_value) = value.prefix {
				if term.contains(':')
					|| term.contains('/')
					|| options.processing_mode == json_ld_core::ProcessingMode::JsonLd1_0
				{
					return Err(Error::InvalidTermDefinition);
				}

				definition.prefix = prefix_value;

				if definition.prefix && definition.value.as_ref().unwrap().is_keyword() {
					return Err(Error::InvalidTermDefinition);
				}
			}

			if value.propagate.is_some() {
				return Err(Error::InvalidTermDefinition);
			}

			if !options.override_protected {
				if let Some(previous_definition) = &previous_definition {
					if previous_definition.is_protected() {
						let candidate = TermDefinition::Normal(Box::new(definition.clone()));
						if !candidate.equivalent_modulo_protected(previous_definition) {
							return Err(Error::ProtectedTermRedefinition);
						}
						definition.protected = true;
					}
				}
			}

			active_context.set(term.to_owned(), TermDefinition::Normal(Box::new(definition)));
		}

		defined.end(term);
	}

	Ok(())
}
