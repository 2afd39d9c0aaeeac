//! The result types of the Expansion and Compaction/Flattening
//! algorithms.
use crate::{Indexed, IndexedObject, Node};

/// Result of the Expansion Algorithm (§4.3): an ordered set of top-level
/// objects, free of any `@context`.
#[derive(Clone, Debug, Default)]
pub struct ExpandedDocument(Vec<IndexedObject>);

impl ExpandedDocument {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn objects(&self) -> &[IndexedObject] {
		&self.0
	}

	pub fn objects_mut(&mut self) -> &mut Vec<IndexedObject> {
		&mut self.0
	}

	pub fn into_objects(self) -> Vec<IndexedObject> {
		self.0
	}

	pub fn insert(&mut self, object: IndexedObject) {
		self.0.push(object)
	}

	pub fn iter(&self) -> std::slice::Iter<IndexedObject> {
		self.0.iter()
	}

	/// The top-level node objects (ignoring top-level value/list objects,
	/// which the Expansion Algorithm drops when they appear at the root).
	pub fn nodes(&self) -> impl Iterator<Item = &Node> {
		self.0.iter().filter_map(|o| o.as_node())
	}
}

impl FromIterator<IndexedObject> for ExpandedDocument {
	fn from_iter<I: IntoIterator<Item = IndexedObject>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl IntoIterator for ExpandedDocument {
	type Item = IndexedObject;
	type IntoIter = std::vec::IntoIter<IndexedObject>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a ExpandedDocument {
	type Item = &'a IndexedObject;
	type IntoIter = std::slice::Iter<'a, IndexedObject>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

/// Result of the Flattening Algorithm (§4.4): a flat, ordered list of node
/// objects with no nesting left other than through `@id` references, one
/// entry per subject in the document's default graph (named graphs stay
/// nested under their node's `@graph` entry, per the JSON-LD 1.1 spec).
#[derive(Clone, Debug, Default)]
pub struct FlattenedDocument(Vec<Indexed<Node>>);

impl FlattenedDocument {
	pub fn new(nodes: Vec<Indexed<Node>>) -> Self {
		Self(nodes)
	}

	pub fn nodes(&self) -> &[Indexed<Node>] {
		&self.0
	}

	pub fn into_nodes(self) -> Vec<Indexed<Node>> {
		self.0
	}

	pub fn iter(&self) -> std::slice::Iter<Indexed<Node>> {
		self.0.iter()
	}
}

impl IntoIterator for FlattenedDocument {
	type Item = Indexed<Node>;
	type IntoIter = std::vec::IntoIter<Indexed<Node>>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
