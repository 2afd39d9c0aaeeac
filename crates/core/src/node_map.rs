//! Node Map Generation (§4.4): the algorithm Flattening is built on, and
//! which Compaction's flatten entry point also drives. Walks an
//! [`ExpandedDocument`], replacing every embedded node object with a bare
//! node reference and collecting the actual node data -- merged by `@id` --
//! into one flat map per graph.
use crate::{ExpandedDocument, FlattenedDocument, Generator, Id, Indexed, IndexedObject, Node, Object};
use indexmap::IndexMap;

/// Raised when the same node is declared twice with two different,
/// conflicting `@index` values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictingIndexes {
	pub node_id: Id,
	pub defined_index: String,
	pub conflicting_index: String,
}

impl std::fmt::Display for ConflictingIndexes {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"node `{}` has conflicting indexes `{}` and `{}`",
			self.node_id, self.defined_index, self.conflicting_index
		)
	}
}

impl std::error::Error for ConflictingIndexes {}

/// One graph's worth of flattened nodes, keyed by (and merged on) `@id`.
#[derive(Clone, Debug, Default)]
pub struct NodeMapGraph {
	nodes: IndexMap<Id, Indexed<Node>>,
}

impl NodeMapGraph {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, id: &Id) -> Option<&Indexed<Node>> {
		self.nodes.get(id)
	}

	pub fn get_mut(&mut self, id: &Id) -> Option<&mut Indexed<Node>> {
		self.nodes.get_mut(id)
	}

	pub fn nodes(&self) -> impl Iterator<Item = &Indexed<Node>> {
		self.nodes.values()
	}

	pub fn into_nodes(self) -> impl Iterator<Item = Indexed<Node>> {
		self.nodes.into_values()
	}

	/// Returns the entry for `id`, creating an empty one (an unadorned node
	/// reference) if it doesn't exist yet, recording `index` in either case
	/// (rejecting a second, different index for the same node).
	fn declare_node(
		&mut self,
		id: Id,
		index: Option<&str>,
	) -> Result<&mut Indexed<Node>, ConflictingIndexes> {
		if let Some(entry) = self.nodes.get_mut(&id) {
			match (entry.index(), index) {
				(Some(existing), Some(index)) if existing != index => {
					return Err(ConflictingIndexes {
						node_id: id,
						defined_index: existing.to_string(),
						conflicting_index: index.to_string(),
					});
				}
				(None, Some(index)) => entry.set_index(Some(index.to_string())),
				_ => (),
			}
		} else {
			self.nodes.insert(
				id.clone(),
				Indexed::new(Node::with_id(id.clone()), index.map(str::to_string)),
			);
		}

		Ok(self.nodes.get_mut(&id).unwrap())
	}

	/// Merges `other`'s nodes into this graph, node by node (see
	/// [`Self::merge_node`]).
	fn merge_with(&mut self, other: Self) {
		for (_, node) in other.nodes {
			self.merge_node(node);
		}
	}

	/// Merges one (already-flat) node into this graph: if a node with the
	/// same `@id` already exists, concatenates types, overrides the
	/// `@graph`/`@included` entries, and merges properties/reverse
	/// properties; otherwise inserts `node` as-is.
	fn merge_node(&mut self, node: Indexed<Node>) {
		let (node, index) = node.into_parts();
		let Some(id) = node.id().cloned() else {
			return;
		};

		let entry = self
			.nodes
			.entry(id.clone())
			.or_insert_with(|| Indexed::new(Node::with_id(id.clone()), None));

		if let Some(index) = index {
			entry.set_index(Some(index));
		}

		entry.types_mut().extend(node.types().iter().cloned());
		entry.set_graph(node.graph().map(<[_]>::to_vec));
		entry.set_included(node.included().map(<[_]>::to_vec));

		for (property, values) in node.properties().clone() {
			for value in values {
				entry.properties_mut().insert(property.clone(), value);
			}
		}

		for (property, nodes) in node.reverse_properties().clone() {
			for n in nodes {
				entry.reverse_properties_mut().insert(property.clone(), n);
			}
		}
	}
}

/// The result of Node Map Generation: one [`NodeMapGraph`] per named graph,
/// plus the default graph.
#[derive(Clone, Debug, Default)]
pub struct NodeMap {
	default_graph: NodeMapGraph,
	named_graphs: IndexMap<Id, NodeMapGraph>,
}

impl NodeMap {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn default_graph(&self) -> &NodeMapGraph {
		&self.default_graph
	}

	pub fn graph(&self, id: Option<&Id>) -> Option<&NodeMapGraph> {
		match id {
			None => Some(&self.default_graph),
			Some(id) => self.named_graphs.get(id),
		}
	}

	fn graph_mut(&mut self, id: Option<&Id>) -> &mut NodeMapGraph {
		match id {
			None => &mut self.default_graph,
			Some(id) => self.named_graphs.entry(id.clone()).or_default(),
		}
	}

	pub fn named_graphs(&self) -> impl Iterator<Item = (&Id, &NodeMapGraph)> {
		self.named_graphs.iter()
	}

	/// Merges every named graph into the default graph, in unspecified
	/// order; used by callers that only want one flat set of nodes
	/// regardless of graph structure.
	pub fn into_merged_graph(self) -> NodeMapGraph {
		let mut result = self.default_graph;
		for (_, graph) in self.named_graphs {
			result.merge_with(graph);
		}
		result
	}

	/// The Flattening Algorithm (§4.4.4) proper: turns this node map into
	/// the flat list of node objects a [`FlattenedDocument`] carries, with
	/// named graphs nested back under their node's `@graph` entry. When
	/// `ordered`, both the top-level list and each graph's contents are
	/// sorted by the textual form of the node's `@id`.
	pub fn flatten(mut self, ordered: bool) -> FlattenedDocument {
		let named_graphs = std::mem::take(&mut self.named_graphs);

		for (graph_id, graph) in named_graphs {
			let mut nodes: Vec<_> = graph.into_nodes().collect();
			if ordered {
				nodes.sort_by(|a, b| a.id().map(Id::as_str).cmp(&b.id().map(Id::as_str)));
			}

			let entries: Vec<IndexedObject> = nodes
				.into_iter()
				.filter_map(strip_for_named_graph)
				.collect();

			let entry = self
				.default_graph
				.declare_node(graph_id, None)
				.expect("graph node was just freshly declared, cannot conflict");
			entry.set_graph(Some(entries));
		}

		let mut nodes: Vec<_> = self
			.default_graph
			.into_nodes()
			.filter(|n| n.index().is_some() || !n.is_empty())
			.collect();

		if ordered {
			nodes.sort_by(|a, b| a.id().map(Id::as_str).cmp(&b.id().map(Id::as_str)));
		}

		FlattenedDocument::new(nodes)
	}
}

/// A bare node reference contributes nothing to a named graph's own node
/// list (it's already reachable as a property value); drop it unless it
/// carries an `@index` or other content of its own.
fn strip_for_named_graph(node: Indexed<Node>) -> Option<IndexedObject> {
	if node.index().is_none() && node.is_empty() {
		return None;
	}

	Some(node.map_inner(Object::from))
}

/// Runs Node Map Generation (§4.4.3) over an expanded document.
pub fn generate_node_map(
	document: &ExpandedDocument,
	generator: &mut impl Generator,
) -> Result<NodeMap, ConflictingIndexes> {
	let mut node_map = NodeMap::new();
	for object in document.objects() {
		extend_node_map(&mut node_map, object, None, generator)?;
	}
	Ok(node_map)
}

fn node_id(id: Option<&Id>, generator: &mut impl Generator) -> Id {
	match id {
		Some(id) => id.clone(),
		None => Id::blank(generator.next()),
	}
}

fn extend_node_map(
	node_map: &mut NodeMap,
	object: &IndexedObject,
	active_graph: Option<&Id>,
	generator: &mut impl Generator,
) -> Result<IndexedObject, ConflictingIndexes> {
	match object.inner() {
		Object::Value(value) => Ok(Indexed::new(
			Object::Value(value.clone()),
			object.index().map(str::to_string),
		)),
		Object::List(list) => {
			let mut flat_items = Vec::with_capacity(list.len());
			for item in list.iter() {
				flat_items.push(extend_node_map(node_map, item, active_graph, generator)?);
			}
			Ok(Indexed::new(
				Object::List(flat_items.into_iter().collect()),
				object.index().map(str::to_string),
			))
		}
		Object::Node(node) => {
			let reference = extend_node_map_from_node(
				node_map,
				node,
				object.index(),
				active_graph,
				generator,
			)?;
			Ok(reference.map_inner(Object::from))
		}
	}
}

fn extend_node_map_from_node(
	node_map: &mut NodeMap,
	node: &Node,
	index: Option<&str>,
	active_graph: Option<&Id>,
	generator: &mut impl Generator,
) -> Result<Indexed<Node>, ConflictingIndexes> {
	let id = node_id(node.id(), generator);

	{
		let flat_node = node_map.graph_mut(active_graph).declare_node(id.clone(), index)?;
		flat_node.types_mut().extend(node.types().iter().cloned());
	}

	if let Some(graph) = node.graph() {
		node_map.graph_mut(Some(&id));

		let mut flat_graph = Vec::new();
		for object in graph {
			flat_graph.push(extend_node_map(node_map, object, Some(&id), generator)?);
		}

		let flat_node = node_map.graph_mut(active_graph).get_mut(&id).unwrap();
		match flat_node.graph() {
			Some(existing) => {
				let mut merged = existing.to_vec();
				merged.extend(flat_graph);
				flat_node.set_graph(Some(merged));
			}
			None => flat_node.set_graph(Some(flat_graph)),
		}
	}

	if let Some(included) = node.included() {
		for included_node in included {
			extend_node_map_from_node(
				node_map,
				included_node,
				included_node.index(),
				active_graph,
				generator,
			)?;
		}
	}

	for (property, objects) in node.properties().iter() {
		let mut flat_objects = Vec::with_capacity(objects.len());
		for object in objects {
			flat_objects.push(extend_node_map(node_map, object, active_graph, generator)?);
		}
		let flat_node = node_map.graph_mut(active_graph).get_mut(&id).unwrap();
		for object in flat_objects {
			flat_node.properties_mut().insert(property.clone(), object);
		}
	}

	for (property, referencing_nodes) in node.reverse_properties().iter() {
		for referencing in referencing_nodes {
			let flat_referencing = extend_node_map_from_node(
				node_map,
				referencing,
				referencing.index(),
				active_graph,
				generator,
			)?;
			let subject_id = flat_referencing.id().unwrap().clone();

			let flat_subject = node_map
				.graph_mut(active_graph)
				.get_mut(&subject_id)
				.unwrap();
			flat_subject
				.properties_mut()
				.insert(property.clone(), Indexed::none(Object::id(id.clone())));
		}
	}

	Ok(Indexed::new(Node::with_id(id), None))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::generator::Blank;
	use crate::Id;
	use iref::Iri;

	fn iri(s: &str) -> Id {
		Id::iri(Iri::new(s).unwrap().to_owned())
	}

	#[test]
	fn merges_duplicate_node_references() {
		let mut generator = Blank::new();
		let mut alice = Node::with_id(iri("https://example.org/alice"));
		alice.types_mut().push(iri("https://example.org/Person"));
		alice
			.properties_mut()
			.insert(Iri::new("https://example.org/knows").unwrap().to_owned(), {
				let mut bob = Node::with_id(iri("https://example.org/bob"));
				bob.types_mut().push(iri("https://example.org/Person"));
				Indexed::none(Object::from(bob))
			});

		let document: ExpandedDocument =
			std::iter::once(Indexed::none(Object::from(alice))).collect();

		let node_map = generate_node_map(&document, &mut generator).unwrap();
		assert_eq!(node_map.default_graph().nodes().count(), 2);

		let flattened = node_map.flatten(true);
		assert_eq!(flattened.nodes().len(), 2);
	}

	#[test]
	fn conflicting_index_is_rejected() {
		let mut node_map = NodeMap::new();
		let id = iri("https://example.org/a");
		node_map
			.graph_mut(None)
			.declare_node(id.clone(), Some("a"))
			.unwrap();
		let err = node_map.graph_mut(None).declare_node(id, Some("b"));
		assert!(err.is_err());
	}
}
