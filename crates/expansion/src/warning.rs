use langtag::InvalidLangTag;
use rdf_types::BlankIdBuf;
use std::fmt;

/// Warnings specific to the Expansion Algorithm (on top of the ones
/// [`json_ld_core::Warning`] and [`json_ld_context_processing::Warning`]
/// already cover).
#[derive(Debug)]
pub enum Warning {
	MalformedIri(String),
	EmptyTerm,
	BlankNodeIdProperty(BlankIdBuf),
	MalformedLanguageTag(String, InvalidLangTag<String>),
}

impl fmt::Display for Warning {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::MalformedIri(s) => write!(f, "malformed IRI `{s}`"),
			Self::EmptyTerm => write!(f, "empty term"),
			Self::BlankNodeIdProperty(b) => {
				write!(f, "blank node identifier `{b}` used as property")
			}
			Self::MalformedLanguageTag(t, e) => write!(f, "invalid language tag `{t}`: {e}"),
		}
	}
}

pub trait WarningHandler: json_ld_core::warning::Handler<Warning> {}
impl<H: json_ld_core::warning::Handler<Warning>> WarningHandler for H {}

/// Adapts an expansion [`WarningHandler`] so it can also receive the
/// narrower set of warnings [`json_ld_context_processing::algorithm::expand_iri_simple`]
/// raises (malformed IRIs only).
pub(crate) struct ForwardToContext<'a, W>(pub &'a mut W);

impl<'a, W: WarningHandler> json_ld_core::warning::Handler<json_ld_context_processing::Warning>
	for ForwardToContext<'a, W>
{
	fn handle(&mut self, warning: json_ld_context_processing::Warning) {
		if let json_ld_context_processing::Warning::MalformedIri(s) = warning {
			self.0.handle(Warning::MalformedIri(s))
		}
	}
}
