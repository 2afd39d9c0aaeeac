use json_ld_context_processing::Processed;
use json_ld_core::{ExpandedDocument, FlattenedDocument, Loader, Term};
use json_ld_syntax::{IntoJson, Keyword};

use crate::{
	iri::{compact_iri, IriConfusedWithPrefix},
	CompactFragment,
};

pub type CompactDocumentResult = Result<json_syntax::Value, crate::Error>;

/// Context embedding method.
///
/// This trait provides the `embed_context` method that can be used
/// to include a JSON-LD context to a JSON-LD document.
/// It is used at the end of compaction algorithm to embed to
/// context used to compact the document into the compacted output.
pub trait EmbedContext {
	/// Embeds the given context into the document.
	fn embed_context(
		&mut self,
		context: &Processed<'_>,
		options: crate::Options,
	) -> Result<(), IriConfusedWithPrefix>;
}

/// Compaction function.
pub trait Compact {
	/// Compacts the input document with full options.
	#[allow(async_fn_in_trait)]
	async fn compact_full(
		&self,
		context: &Processed<'_>,
		loader: &impl Loader,
		options: crate::Options,
	) -> CompactDocumentResult;

	/// Compacts the input document.
	#[allow(async_fn_in_trait)]
	async fn compact(&self, context: &Processed<'_>, loader: &impl Loader) -> CompactDocumentResult {
		self.compact_full(context, loader, crate::Options::default()).await
	}
}

impl Compact for ExpandedDocument {
	async fn compact_full(
		&self,
		context: &Processed<'_>,
		loader: &impl Loader,
		options: crate::Options,
	) -> CompactDocumentResult {
		let mut compacted_output = self.objects().compact_fragment_full(context, context, None, loader, options).await?;

		compacted_output.embed_context(context, options)?;

		Ok(compacted_output)
	}
}

impl Compact for FlattenedDocument {
	async fn compact_full(
		&self,
		context: &Processed<'_>,
		loader: &impl Loader,
		options: crate::Options,
	) -> CompactDocumentResult {
		let mut compacted_output = self.nodes().compact_fragment_full(context, context, None, loader, options).await?;

		compacted_output.embed_context(context, options)?;

		Ok(compacted_output)
	}
}

impl EmbedContext for json_syntax::Value {
	fn embed_context(&mut self, context: &Processed<'_>, options: crate::Options) -> Result<(), IriConfusedWithPrefix> {
		let value = self.take();

		let obj = match value {
			json_syntax::Value::Array(array) => {
				let mut obj = json_syntax::Object::new();

				if !array.is_empty() {
					let key = compact_iri(context, &Term::Keyword(Keyword::Graph), true, false, options)?;

					obj.insert(key.unwrap().into(), array.into());
				}

				Some(obj)
			}
			json_syntax::Value::Object(obj) => Some(obj),
			_null => None,
		};

		if let Some(mut obj) = obj {
			let json_context = IntoJson::into_json(context.unprocessed().clone());

			if !obj.is_empty() && !json_context.is_null() && !json_context.is_empty_array_or_object() {
				obj.insert_front("@context".into(), json_context);
			}

			*self = obj.into()
		};

		Ok(())
	}
}
