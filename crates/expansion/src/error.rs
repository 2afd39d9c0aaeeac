use json_ld_context_processing::algorithm::RejectVocab;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid context: {0}")]
	InvalidContext(String),

	#[error("context processing failed: {0}")]
	ContextProcessing(#[from] json_ld_context_processing::Error),

	#[error("invalid `@index` value")]
	InvalidIndexValue,

	#[error("invalid set or list object")]
	InvalidSetOrListObject,

	#[error("invalid `@reverse` property map")]
	InvalidReversePropertyMap,

	#[error("invalid `@type` value")]
	InvalidTypeValue,

	#[error("key `{0}` expansion failed")]
	KeyExpansionFailed(String),

	#[error("invalid `@reverse` property value")]
	InvalidReversePropertyValue,

	#[error("invalid `@language` map value")]
	InvalidLanguageMapValue,

	#[error("colliding keywords")]
	CollidingKeywords,

	#[error("invalid `@id` value")]
	InvalidIdValue,

	#[error("invalid `@included` value")]
	InvalidIncludedValue,

	#[error("invalid `@reverse` value")]
	InvalidReverseValue,

	#[error("invalid `@nest` value")]
	InvalidNestValue,

	#[error("duplicate key `{0}`")]
	DuplicateKey(json_syntax::object::Key),

	#[error(transparent)]
	Literal(#[from] crate::LiteralExpansionError),

	#[error(transparent)]
	Value(#[from] crate::InvalidValue),

	#[error("forbidden use of `@vocab`")]
	ForbiddenVocab,
}

impl From<RejectVocab> for Error {
	fn from(_value: RejectVocab) -> Self {
		Self::ForbiddenVocab
	}
}

impl Error {
	pub fn duplicate_key_ref(
		json_syntax::object::Duplicate(a, _b): json_syntax::object::Duplicate<
			&json_syntax::object::Entry,
		>,
	) -> Self {
		Self::DuplicateKey(a.key.clone())
	}
}
