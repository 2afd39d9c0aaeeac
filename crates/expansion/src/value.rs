use crate::{expand_iri, ActiveProperty, ExpandedEntry, ForwardToContext, Warning, WarningHandler};
use json_ld_context_processing::algorithm::{Action, RejectVocab};
use json_ld_core::{
	object::value::Literal, Context, Id, Indexed, IndexedObject, LangString, Object, Term,
	ValidId, Value,
};
use json_ld_syntax::{Direction, Keyword, LenientLangTagBuf, Nullable};

#[derive(Debug, thiserror::Error)]
pub enum InvalidValue {
	#[error("invalid language tagged string")]
	LanguageTaggedString,

	#[error("invalid base `@direction`")]
	BaseDirection,

	#[error("invalid `@index` value")]
	IndexValue,

	#[error("invalid typed value")]
	TypedValue,

	#[error("invalid value object")]
	ValueObject,

	#[error("invalid value object value")]
	ValueObjectValue,

	#[error("invalid language tagged value")]
	LanguageTaggedValue,

	#[error("forbidden use of `@vocab`")]
	ForbiddenVocab,
}

impl From<RejectVocab> for InvalidValue {
	fn from(_value: RejectVocab) -> Self {
		Self::ForbiddenVocab
	}
}

pub type ValueExpansionResult = Result<Option<IndexedObject>, InvalidValue>;

/// Expand a value object.
pub(crate) fn expand_value(
	active_context: &Context,
	vocab_policy: Action,
	input_type: Option<Term>,
	type_scoped_context: &Context,
	expanded_entries: Vec<ExpandedEntry<'_>>,
	value_entry: &json_syntax::Value,
	warnings: &mut impl WarningHandler,
) -> ValueExpansionResult {
	let mut is_json = input_type
		.as_ref()
		.map(|t| *t == Term::Keyword(Keyword::Json))
		.unwrap_or(false);
	let mut ty = None;
	let mut index = None;
	let mut language = None;
	let mut direction = None;

	for ExpandedEntry(_, expanded_key, value) in expanded_entries {
		match expanded_key {
			// If expanded property is @language:
			Term::Keyword(Keyword::Language) => {
				// If value is not a string, an invalid language-tagged string
				// error has been detected and processing is aborted.
				if let Some(value) = value.as_str() {
					if value != "@none" {
						language = Some(value.to_owned());
					}
				} else {
					return Err(InvalidValue::LanguageTaggedString);
				}
			}
			// If expanded property is @direction:
			Term::Keyword(Keyword::Direction) => {
				// If value is neither "ltr" nor "rtl", an invalid base direction
				// error has been detected and processing is aborted.
				if let Some(value) = value.as_str() {
					if let Ok(value) = Direction::try_from(value) {
						direction = Some(value);
					} else {
						return Err(InvalidValue::BaseDirection);
					}
				} else {
					return Err(InvalidValue::BaseDirection);
				}
			}
			// If expanded property is @index:
			Term::Keyword(Keyword::Index) => {
				if let Some(value) = value.as_str() {
					index = Some(value.to_string())
				} else {
					return Err(InvalidValue::IndexValue);
				}
			}
			Term::Keyword(Keyword::Type) => {
				if let Some(ty_value) = value.as_str() {
					let expanded_ty = expand_iri(
						type_scoped_context,
						Nullable::Some(ty_value.into()),
						true,
						Some(vocab_policy),
						&mut ForwardToContext(warnings),
					)?;

					match expanded_ty {
						Some(Term::Keyword(Keyword::Json)) => {
							is_json = true;
						}
						Some(Term::Id(Id::Valid(ValidId::Iri(expanded_ty)))) => {
							is_json = false;
							ty = Some(expanded_ty.into())
						}
						_ => return Err(InvalidValue::TypedValue),
					}
				} else {
					return Err(InvalidValue::TypedValue);
				}
			}
			Term::Keyword(Keyword::Value) => (),
			_ => {
				return Err(InvalidValue::ValueObject);
			}
		}
	}

	// If input type is @json, set expanded value to value.
	if is_json {
		if language.is_some() || direction.is_some() {
			return Err(InvalidValue::ValueObject);
		}
		return Ok(Some(Indexed::new(
			Object::Value(Value::Json(value_entry.clone())),
			index,
		)));
	}

	// Otherwise, if value is not a scalar or null, an invalid value object value
	// error has been detected and processing is aborted.
	let result = match value_entry {
		json_syntax::Value::Null => Literal::Null,
		json_syntax::Value::String(s) => Literal::String(s.clone()),
		json_syntax::Value::Number(n) => Literal::Number(n.clone()),
		json_syntax::Value::Boolean(b) => Literal::Boolean(*b),
		_ => {
			return Err(InvalidValue::ValueObjectValue);
		}
	};

	// Otherwise, if the value of result's @value entry is null, return null.
	if matches!(result, Literal::Null) {
		return Ok(None);
	}

	// Otherwise, if the value of result's @value entry is not a string and result
	// contains the entry @language (or @direction), an invalid language-tagged
	// value error has been detected and processing is aborted.
	if language.is_some() || direction.is_some() {
		if ty.is_some() {
			return Err(InvalidValue::ValueObject);
		}

		if let Literal::String(s) = result {
			let lang = match language {
				Some(language) => {
					let (language, error) = LenientLangTagBuf::new(language);

					if let Some(error) = error {
						warnings.handle(Warning::MalformedLanguageTag(language.to_string(), error))
					}

					Some(language)
				}
				None => None,
			};

			return match LangString::new(s, lang, direction) {
				Ok(result) => Ok(Some(Indexed::new(
					Object::Value(Value::LangString(result)),
					index,
				))),
				Err(_) => Err(InvalidValue::LanguageTaggedValue),
			};
		} else {
			return Err(InvalidValue::LanguageTaggedValue);
		}
	}

	Ok(Some(Indexed::new(
		Object::Value(Value::Literal(result, ty)),
		index,
	)))
}
