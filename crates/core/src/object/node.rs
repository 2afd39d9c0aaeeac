use crate::{Id, Indexed, IndexedObject, Term};
use indexmap::IndexMap;
use iref::IriBuf;

/// The (possibly multi-valued) set of objects attached to a node under one
/// property IRI, in declaration order.
pub type Objects = Vec<IndexedObject>;

/// The forward (non-reversed) properties of a node: IRI -> objects.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Properties(IndexMap<IriBuf, Objects>);

impl Properties {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn get(&self, prop: &IriBuf) -> Option<&Objects> {
		self.0.get(prop)
	}

	pub fn iter(&self) -> indexmap::map::Iter<IriBuf, Objects> {
		self.0.iter()
	}

	/// Associates one more object with `prop`, appending to any objects
	/// already there.
	pub fn insert(&mut self, prop: IriBuf, value: IndexedObject) {
		self.0.entry(prop).or_default().push(value);
	}

	/// Replaces whatever objects were associated with `prop`.
	pub fn set(&mut self, prop: IriBuf, values: Objects) {
		self.0.insert(prop, values);
	}

	pub fn remove(&mut self, prop: &IriBuf) -> Option<Objects> {
		self.0.shift_remove(prop)
	}
}

impl IntoIterator for Properties {
	type Item = (IriBuf, Objects);
	type IntoIter = indexmap::map::IntoIter<IriBuf, Objects>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

/// The `@reverse` properties of a node: IRI -> the nodes that point back
/// at this one through that property.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ReverseProperties(IndexMap<IriBuf, Vec<Indexed<Node>>>);

impl ReverseProperties {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> indexmap::map::Iter<IriBuf, Vec<Indexed<Node>>> {
		self.0.iter()
	}

	pub fn insert(&mut self, prop: IriBuf, value: Indexed<Node>) {
		self.0.entry(prop).or_default().push(value);
	}
}

impl IntoIterator for ReverseProperties {
	type Item = (IriBuf, Vec<Indexed<Node>>);
	type IntoIter = indexmap::map::IntoIter<IriBuf, Vec<Indexed<Node>>>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

/// A JSON-LD node object.
///
/// May carry an `@id`, any number of `@type`s, ordinary properties,
/// `@reverse` properties, and (if this node is the top-level `@graph`
/// container of a named graph) its own nested graph and `@included` set.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Node {
	id: Option<Id>,
	types: Vec<Id>,
	graph: Option<Vec<IndexedObject>>,
	included: Option<Vec<Indexed<Node>>>,
	properties: Properties,
	reverse_properties: ReverseProperties,
}

impl Node {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_id(id: Id) -> Self {
		Self {
			id: Some(id),
			..Self::default()
		}
	}

	pub fn id(&self) -> Option<&Id> {
		self.id.as_ref()
	}

	pub fn set_id(&mut self, id: Option<Id>) {
		self.id = id;
	}

	pub fn types(&self) -> &[Id] {
		&self.types
	}

	pub fn types_mut(&mut self) -> &mut Vec<Id> {
		&mut self.types
	}

	pub fn has_key(&self) -> bool {
		self.id.is_some()
			|| !self.types.is_empty()
			|| self.graph.is_some()
			|| self.included.is_some()
			|| !self.properties.is_empty()
			|| !self.reverse_properties.is_empty()
	}

	/// `true` for a node object with nothing but (possibly) an `@id` -- the
	/// shape produced by a "free-floating node reference".
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
			&& self.graph.is_none()
			&& self.included.is_none()
			&& self.properties.is_empty()
			&& self.reverse_properties.is_empty()
	}

	pub fn is_graph(&self) -> bool {
		self.graph.is_some()
	}

	pub fn graph(&self) -> Option<&[IndexedObject]> {
		self.graph.as_deref()
	}

	pub fn set_graph(&mut self, graph: Option<Vec<IndexedObject>>) {
		self.graph = graph;
	}

	/// `true` if the only field of the node is a `@graph` field.
	pub fn is_unnamed_graph(&self) -> bool {
		self.graph.is_some()
			&& self.id.is_none()
			&& self.types.is_empty()
			&& self.included.is_none()
			&& self.properties.is_empty()
			&& self.reverse_properties.is_empty()
	}

	/// Returns the node's `@graph` value if it is an unnamed graph object,
	/// or gives it back unchanged otherwise.
	#[allow(clippy::result_large_err)]
	pub fn into_unnamed_graph(self) -> Result<Vec<IndexedObject>, Self> {
		if self.is_unnamed_graph() {
			Ok(self.graph.unwrap())
		} else {
			Err(self)
		}
	}

	pub fn included(&self) -> Option<&[Indexed<Node>]> {
		self.included.as_deref()
	}

	pub fn set_included(&mut self, included: Option<Vec<Indexed<Node>>>) {
		self.included = included;
	}

	pub fn properties(&self) -> &Properties {
		&self.properties
	}

	pub fn properties_mut(&mut self) -> &mut Properties {
		&mut self.properties
	}

	pub fn reverse_properties(&self) -> &ReverseProperties {
		&self.reverse_properties
	}

	pub fn reverse_properties_mut(&mut self) -> &mut ReverseProperties {
		&mut self.reverse_properties
	}

	/// The node's term, for use as an RDF subject/object: `Term::Id` built
	/// from the node's `@id`, or `Term::Null` if it has none (anonymous,
	/// un-identified node, which gets a fresh blank node on flattening).
	pub fn as_term(&self) -> Term {
		match &self.id {
			Some(id) => Term::Id(id.clone()),
			None => Term::Null,
		}
	}
}
