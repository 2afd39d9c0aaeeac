//! Nodes, lists and values: the processed value model that the Expansion
//! Algorithm produces and the Compaction Algorithm consumes.
use crate::{Id, Indexed, Term};

pub mod list;
pub mod node;
pub mod value;

pub use list::List;
pub use node::{Node, Objects, Properties, ReverseProperties};
pub use value::{Literal, Type, Value};

/// A (possibly `@index`-indexed) object: the unit of value carried by a
/// node map entry, the items of an expanded array, and the entries of a
/// `@list`.
pub type IndexedObject = Indexed<Object>;

/// One of the three kinds a JSON-LD object can take after expansion.
#[derive(Clone, PartialEq, Debug)]
pub enum Object {
	/// A value object (`@value`).
	Value(Value),

	/// A node object (`@id`, properties, ...).
	Node(Box<Node>),

	/// A list object (`@list`).
	List(List),
}

impl Object {
	pub fn node() -> Self {
		Self::Node(Box::new(Node::new()))
	}

	pub fn id(id: Id) -> Self {
		Self::Node(Box::new(Node::with_id(id)))
	}

	pub fn is_value(&self) -> bool {
		matches!(self, Self::Value(_))
	}

	pub fn is_node(&self) -> bool {
		matches!(self, Self::Node(_))
	}

	pub fn is_list(&self) -> bool {
		matches!(self, Self::List(_))
	}

	pub fn as_value(&self) -> Option<&Value> {
		match self {
			Self::Value(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_value_mut(&mut self) -> Option<&mut Value> {
		match self {
			Self::Value(v) => Some(v),
			_ => None,
		}
	}

	pub fn into_value(self) -> Option<Value> {
		match self {
			Self::Value(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_node(&self) -> Option<&Node> {
		match self {
			Self::Node(n) => Some(n),
			_ => None,
		}
	}

	pub fn as_node_mut(&mut self) -> Option<&mut Node> {
		match self {
			Self::Node(n) => Some(n),
			_ => None,
		}
	}

	pub fn into_node(self) -> Option<Box<Node>> {
		match self {
			Self::Node(n) => Some(n),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&List> {
		match self {
			Self::List(l) => Some(l),
			_ => None,
		}
	}

	/// `true` if this is a node object carrying a nested `@graph`.
	pub fn is_graph(&self) -> bool {
		matches!(self, Self::Node(n) if n.is_graph())
	}

	/// The node's `@id`, if this is a node object with one.
	pub fn id(&self) -> Option<&Id> {
		self.as_node().and_then(Node::id)
	}

	/// The `@type` IRIs of a node object; empty for values and lists.
	pub fn types(&self) -> &[Id] {
		match self {
			Self::Node(n) => n.types(),
			_ => &[],
		}
	}

	/// This object's term, for use as an RDF subject/object: a node's
	/// `@id`-derived term, or `Term::Null` for values, lists, and
	/// un-identified nodes.
	pub fn as_term(&self) -> Term {
		match self {
			Self::Node(n) => n.as_term(),
			_ => Term::Null,
		}
	}
}

impl From<Value> for Object {
	fn from(value: Value) -> Self {
		Self::Value(value)
	}
}

impl From<Node> for Object {
	fn from(value: Node) -> Self {
		Self::Node(Box::new(value))
	}
}

impl From<List> for Object {
	fn from(value: List) -> Self {
		Self::List(value)
	}
}
