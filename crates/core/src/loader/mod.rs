//! Remote document loading.
//!
//! Context processing needs to dereference `@context` IRIs (and the initial
//! document itself may be loaded from a remote IRI). This module only covers
//! the part of that story this crate is willing to own: a small [`Loader`]
//! trait and the two trivial implementations that don't need a HTTP stack.
use iref::{Iri, IriBuf};
use std::collections::HashMap;

/// A document retrieved from some IRI, paired with the (possibly
/// redirected-to) URL it was ultimately found at.
#[derive(Clone, Debug)]
pub struct RemoteDocument {
	/// The final URL of the loaded document, after eventual redirection.
	pub url: Option<IriBuf>,

	/// The retrieved document.
	pub document: json_syntax::Value,
}

impl RemoteDocument {
	pub fn new(url: Option<IriBuf>, document: json_syntax::Value) -> Self {
		Self { url, document }
	}

	pub fn url(&self) -> Option<&Iri> {
		self.url.as_deref()
	}

	pub fn document(&self) -> &json_syntax::Value {
		&self.document
	}

	pub fn into_document(self) -> json_syntax::Value {
		self.document
	}
}

pub type LoadErrorCause = Box<dyn std::error::Error + Send + Sync>;

/// Loading error.
#[derive(Debug, thiserror::Error)]
#[error("loading document `{target}` failed: {cause}")]
pub struct LoadError {
	pub target: IriBuf,
	pub cause: LoadErrorCause,
}

impl LoadError {
	pub fn new(target: IriBuf, cause: impl 'static + std::error::Error + Send + Sync) -> Self {
		Self {
			target,
			cause: Box::new(cause),
		}
	}
}

/// Document loader, asked to dereference the IRIs a `@context` entry or
/// `@import` imports, or the initial input document when it is given as an
/// IRI rather than inline content.
pub trait Loader {
	#[allow(async_fn_in_trait)]
	async fn load(&self, url: &Iri) -> Result<RemoteDocument, LoadError>;
}

impl<'l, L: Loader> Loader for &'l L {
	async fn load(&self, url: &Iri) -> Result<RemoteDocument, LoadError> {
		L::load(self, url).await
	}
}

/// Dummy loader that always fails. Use when the documents being processed
/// are known not to reference any remote context.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLoader;

#[derive(Debug, thiserror::Error)]
#[error("cannot load `{0}`")]
pub struct CannotLoad(pub IriBuf);

impl Loader for NoLoader {
	async fn load(&self, url: &Iri) -> Result<RemoteDocument, LoadError> {
		Err(LoadError::new(url.to_owned(), CannotLoad(url.to_owned())))
	}
}

/// A loader backed by a fixed, preloaded table of documents: no network or
/// file-system access, just a lookup. Useful for testing and for embedding a
/// known set of contexts.
#[derive(Debug, Default, Clone)]
pub struct MapLoader {
	documents: HashMap<IriBuf, RemoteDocument>,
}

#[derive(Debug, thiserror::Error)]
#[error("document `{0}` not found")]
pub struct EntryNotFound(pub IriBuf);

impl MapLoader {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `document` to be returned whenever `url` is loaded.
	pub fn insert(&mut self, url: IriBuf, document: json_syntax::Value) -> &mut Self {
		self.documents.insert(
			url.clone(),
			RemoteDocument::new(Some(url), document),
		);
		self
	}
}

impl FromIterator<(IriBuf, json_syntax::Value)> for MapLoader {
	fn from_iter<I: IntoIterator<Item = (IriBuf, json_syntax::Value)>>(iter: I) -> Self {
		let mut loader = Self::new();
		for (url, document) in iter {
			loader.insert(url, document);
		}
		loader
	}
}

impl Loader for MapLoader {
	async fn load(&self, url: &Iri) -> Result<RemoteDocument, LoadError> {
		match self.documents.get(url) {
			Some(doc) => Ok(doc.clone()),
			None => Err(LoadError::new(url.to_owned(), EntryNotFound(url.to_owned()))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn no_loader_always_fails() {
		let iri = Iri::new("https://example.org/context.jsonld").unwrap();
		assert!(NoLoader.load(iri).await.is_err());
	}

	#[tokio::test]
	async fn map_loader_resolves_registered_documents() {
		let iri = iref::Iri::new("https://example.org/context.jsonld").unwrap().to_owned();
		let mut loader = MapLoader::new();
		loader.insert(iri.clone(), json_syntax::json!({"@context": {}}));
		let doc = loader.load(&iri).await.unwrap();
		assert_eq!(doc.url(), Some(iri.as_iri()));
	}
}
