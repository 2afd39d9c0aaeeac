use crate::{expand_iri, node_id_of_term, ActiveProperty, ForwardToContext, WarningHandler};
use json_ld_context_processing::algorithm::{Action, RejectVocab};
use json_ld_core::{
	context::TermType, object::value::Literal, Context, IndexedObject, LangString, Node, Object,
	Value,
};
use json_ld_syntax::Nullable;
use json_syntax::Number;

pub(crate) enum GivenLiteralValue<'a> {
	Boolean(bool),
	Number(&'a Number),
	String(&'a str),
}

impl<'a> GivenLiteralValue<'a> {
	pub fn new(value: &'a json_syntax::Value) -> Self {
		match value {
			json_syntax::Value::Boolean(b) => Self::Boolean(*b),
			json_syntax::Value::Number(n) => Self::Number(n),
			json_syntax::Value::String(s) => Self::String(s),
			_ => panic!("not a literal value"),
		}
	}

	pub fn is_string(&self) -> bool {
		matches!(self, Self::String(_))
	}

	pub fn as_str(&self) -> Option<&'a str> {
		match self {
			Self::String(s) => Some(s),
			_ => None,
		}
	}
}

pub(crate) enum LiteralValue<'a> {
	Given(GivenLiteralValue<'a>),
	Inferred(json_ld_syntax::String),
}

impl<'a> LiteralValue<'a> {
	pub fn is_string(&self) -> bool {
		match self {
			Self::Given(v) => v.is_string(),
			Self::Inferred(_) => true,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Given(v) => v.as_str(),
			Self::Inferred(s) => Some(s.as_str()),
		}
	}
}

pub(crate) type ExpandedLiteral = IndexedObject;

#[derive(Debug, thiserror::Error)]
pub enum LiteralExpansionError {
	#[error("invalid `@type` value")]
	InvalidTypeValue,

	#[error("forbidden use of `@vocab`")]
	ForbiddenVocab,
}

impl From<RejectVocab> for LiteralExpansionError {
	fn from(_value: RejectVocab) -> Self {
		Self::ForbiddenVocab
	}
}

pub(crate) type LiteralExpansionResult = Result<ExpandedLiteral, LiteralExpansionError>;

/// Expand a literal value.
/// See <https://www.w3.org/TR/json-ld11-api/#value-expansion>.
pub(crate) fn expand_literal(
	active_context: &Context,
	vocab_policy: Action,
	active_property: ActiveProperty<'_>,
	value: LiteralValue,
	warnings: &mut impl WarningHandler,
) -> LiteralExpansionResult {
	let active_property_definition = active_property.get_from(active_context);
	let normal_definition = active_property_definition.as_ref().and_then(|d| d.as_normal());
	let active_property_type = normal_definition.and_then(|d| d.typ.clone());

	match &active_property_type {
		// If the `active_property` has a type mapping in `active_context` that is `@id`, and the
		// `value` is a string, return a new map containing a single entry where the key is `@id`
		// and the value is the result of IRI expanding `value` using `true` for `document_relative`
		// and `false` for vocab.
		Some(TermType::Id) if value.is_string() => {
			let mut node = Node::new();
			let id = expand_iri(
				active_context,
				Nullable::Some(value.as_str().unwrap().into()),
				true,
				None,
				&mut ForwardToContext(warnings),
			)
			.unwrap()
			.and_then(node_id_of_term);

			node.set_id(id);
			Ok(Object::from(node).into())
		}

		// If `active_property` has a type mapping in active context that is `@vocab`, and the
		// value is a string, return a new map containing a single entry where the key is
		// `@id` and the value is the result of IRI expanding `value` using `true` for
		// document relative.
		Some(TermType::Vocab) if value.is_string() => {
			let mut node = Node::new();

			let ty = expand_iri(
				active_context,
				Nullable::Some(value.as_str().unwrap().into()),
				true,
				Some(vocab_policy),
				&mut ForwardToContext(warnings),
			)?;

			if let Some(ty) = ty {
				node.set_id(node_id_of_term(ty));
			}

			Ok(Object::from(node).into())
		}

		_ => {
			// Otherwise, initialize `result` to a map with an `@value` entry whose value is set to
			// `value`.
			let result: Literal = match value {
				LiteralValue::Given(v) => match v {
					GivenLiteralValue::Boolean(b) => Literal::Boolean(b),
					GivenLiteralValue::Number(n) => Literal::Number(unsafe {
						json_syntax::NumberBuf::new_unchecked(n.as_bytes().into())
					}),
					GivenLiteralValue::String(s) => Literal::String(s.into()),
				},
				LiteralValue::Inferred(s) => Literal::String(s),
			};

			// If `active_property` has a type mapping in active context, other than `@id`,
			// `@vocab`, or `@none`, add `@type` to `result` and set its value to the value
			// associated with the type mapping.
			let mut ty = None;
			match &active_property_type {
				None | Some(TermType::Id) | Some(TermType::Vocab) | Some(TermType::None) => {
					// Otherwise, if value is a string:
					if let Literal::String(s) = result {
						// Initialize `language` to the language mapping for
						// `active_property` in `active_context`, if any, otherwise to the
						// default language of `active_context`.
						let language = normal_definition
							.map(|d| d.language.clone())
							.unwrap_or_else(|| active_context.default_language().map(ToOwned::to_owned));

						// Initialize `direction` to the direction mapping for
						// `active_property` in `active_context`, if any, otherwise to the
						// default base direction of `active_context`.
						let direction = normal_definition
							.map(|d| d.direction)
							.unwrap_or_else(|| active_context.default_base_direction());

						// If `language` is not null, add `@language` to result with the value
						// `language`. If `direction` is not null, add `@direction` to result
						// with the value `direction`.
						return match LangString::new(s, language, direction) {
							Ok(lang_str) => Ok(Object::Value(Value::LangString(lang_str)).into()),
							Err(s) => {
								Ok(Object::Value(Value::Literal(Literal::String(s), None)).into())
							}
						};
					}
				}

				Some(TermType::Other(iri)) => ty = Some(iri.clone().into()),
				Some(TermType::Json) => return Err(LiteralExpansionError::InvalidTypeValue),
			}

			Ok(Object::Value(Value::Literal(result, ty)).into())
		}
	}
}
