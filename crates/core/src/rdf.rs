//! RDF Conversion (§4.6 "Deserialize JSON-LD to RDF"): turning an
//! [`ExpandedDocument`](crate::ExpandedDocument) into a sequence of RDF
//! quads.
//!
//! This module defines its own, concrete [`Quad`]/[`RdfTerm`]/[`RdfLiteral`]
//! types rather than reusing `rdf_types`' generic ones: conversion here
//! always targets `IriBuf`/`BlankIdBuf`, so the extra type parameters buy
//! nothing but make every signature in this file harder to read.
use crate::object::{List, Value};
use crate::{Generator, Id, IndexedObject, Node, Object, ValidId};
use iref::{Iri, IriBuf};
use json_ld_syntax::Direction;
use json_syntax::Print;
use static_iref::iri;

pub static RDF_TYPE: &Iri = iri!("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
pub static RDF_FIRST: &Iri = iri!("http://www.w3.org/1999/02/22-rdf-syntax-ns#first");
pub static RDF_REST: &Iri = iri!("http://www.w3.org/1999/02/22-rdf-syntax-ns#rest");
pub static RDF_NIL: &Iri = iri!("http://www.w3.org/1999/02/22-rdf-syntax-ns#nil");
pub static RDF_VALUE: &Iri = iri!("http://www.w3.org/1999/02/22-rdf-syntax-ns#value");
pub static RDF_DIRECTION: &Iri = iri!("http://www.w3.org/1999/02/22-rdf-syntax-ns#direction");
pub static RDF_LANG_STRING: &Iri =
	iri!("http://www.w3.org/1999/02/22-rdf-syntax-ns#langString");
pub static RDF_JSON: &Iri = iri!("http://www.w3.org/ns/json-ld#JSON");
pub static XSD_BOOLEAN: &Iri = iri!("http://www.w3.org/2001/XMLSchema#boolean");
pub static XSD_INTEGER: &Iri = iri!("http://www.w3.org/2001/XMLSchema#integer");
pub static XSD_DOUBLE: &Iri = iri!("http://www.w3.org/2001/XMLSchema#double");
pub static XSD_STRING: &Iri = iri!("http://www.w3.org/2001/XMLSchema#string");

/// How a language-and-direction-tagged string (`@direction`, JSON-LD 1.1's
/// addition) is carried over to RDF, which has no native notion of base
/// direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RdfDirection {
	/// Encode the direction in the datatype IRI,
	/// `https://www.w3.org/ns/i18n#<language>_<direction>`.
	I18nDatatype,

	/// Represent the value as a fresh blank node carrying `rdf:value` and
	/// `rdf:direction` (and, if tagged, `rdf:language`) properties.
	CompoundLiteral,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid RDF direction mode `{0}`")]
pub struct InvalidRdfDirection(pub String);

impl std::str::FromStr for RdfDirection {
	type Err = InvalidRdfDirection;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"i18n-datatype" => Ok(Self::I18nDatatype),
			"compound-literal" => Ok(Self::CompoundLiteral),
			other => Err(InvalidRdfDirection(other.to_string())),
		}
	}
}

/// Options controlling RDF conversion.
#[derive(Clone, Debug, Default)]
pub struct Options {
	/// If `None`, a language-and-direction-tagged string with a direction
	/// other than the document's silently drops its direction (JSON-LD 1.0
	/// behaviour). Otherwise, selects how `@direction` is represented.
	pub rdf_direction: Option<RdfDirection>,

	/// `fromRdf`: decode recognized `xsd:integer`/`xsd:double`/`xsd:boolean`
	/// typed literals into native JSON values instead of explicit value
	/// objects carrying `@type`.
	pub use_native_types: bool,

	/// `fromRdf`: keep `rdf:type` quads as an explicit `rdf:type` property
	/// instead of folding them into the node's `@type` entry.
	pub use_rdf_type: bool,
}

/// An RDF literal: a lexical form plus either a language tag or a datatype
/// IRI (never both, per the RDF 1.1 data model).
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RdfLiteral {
	LangString { value: String, language: String },
	Typed { value: String, ty: IriBuf },
}

/// An RDF term: an IRI, a blank node, or a literal.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RdfTerm {
	Id(ValidId),
	Literal(RdfLiteral),
}

impl From<ValidId> for RdfTerm {
	fn from(value: ValidId) -> Self {
		Self::Id(value)
	}
}

/// One RDF quad (a triple, plus an optional named graph).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Quad {
	pub graph: Option<ValidId>,
	pub subject: ValidId,
	pub predicate: IriBuf,
	pub object: RdfTerm,
}

impl Quad {
	fn new(graph: Option<ValidId>, subject: ValidId, predicate: IriBuf, object: RdfTerm) -> Self {
		Self {
			graph,
			subject,
			predicate,
			object,
		}
	}
}

/// Converts an expanded document to a list of RDF quads, in the default
/// graph unless a node carries a nested `@graph`.
pub fn to_rdf(
	objects: &[IndexedObject],
	generator: &mut impl Generator,
	options: &Options,
) -> Vec<Quad> {
	let mut quads = Vec::new();
	for object in objects {
		object_to_rdf(object.inner(), None, generator, options, &mut quads);
	}
	quads
}

/// Converts one object at the top level of a graph, returning the RDF term
/// it is represented by (for use as the object of an enclosing triple), if
/// it has one.
fn object_to_rdf(
	object: &Object,
	graph: Option<&ValidId>,
	generator: &mut impl Generator,
	options: &Options,
	quads: &mut Vec<Quad>,
) -> Option<RdfTerm> {
	match object {
		Object::Value(value) => value_to_rdf(value, graph, generator, options, quads),
		Object::List(list) => Some(list_to_rdf(list, graph, generator, options, quads)),
		Object::Node(node) => node_to_rdf(node, graph, generator, options, quads).map(RdfTerm::Id),
	}
}

fn node_subject(node: &Node, generator: &mut impl Generator) -> Option<ValidId> {
	match node.id() {
		Some(Id::Valid(id)) => Some(id.clone()),
		Some(Id::Invalid(_)) => None,
		None => Some(ValidId::Blank(generator.next())),
	}
}

fn node_to_rdf(
	node: &Node,
	graph: Option<&ValidId>,
	generator: &mut impl Generator,
	options: &Options,
	quads: &mut Vec<Quad>,
) -> Option<ValidId> {
	let subject = node_subject(node, generator)?;

	for ty in node.types() {
		if let Id::Valid(ty) = ty {
			quads.push(Quad::new(
				graph.cloned(),
				subject.clone(),
				RDF_TYPE.to_owned(),
				RdfTerm::Id(ty.clone()),
			));
		}
	}

	for (property, values) in node.properties().iter() {
		for value in values {
			if let Some(term) =
				object_to_rdf(value.inner(), graph, generator, options, quads)
			{
				quads.push(Quad::new(
					graph.cloned(),
					subject.clone(),
					property.clone(),
					term,
				));
			}
		}
	}

	for (property, referencing_nodes) in node.reverse_properties().iter() {
		for referencing in referencing_nodes {
			if let Some(referencing_subject) =
				node_to_rdf(referencing, graph, generator, options, quads)
			{
				quads.push(Quad::new(
					graph.cloned(),
					referencing_subject,
					property.clone(),
					RdfTerm::Id(subject.clone()),
				));
			}
		}
	}

	if let Some(nested_graph) = node.graph() {
		for nested in nested_graph {
			object_to_rdf(nested.inner(), Some(&subject), generator, options, quads);
		}
	}

	if let Some(included) = node.included() {
		for included_node in included {
			node_to_rdf(included_node, graph, generator, options, quads);
		}
	}

	Some(subject)
}

fn list_to_rdf(
	list: &List,
	graph: Option<&ValidId>,
	generator: &mut impl Generator,
	options: &Options,
	quads: &mut Vec<Quad>,
) -> RdfTerm {
	let mut terms = Vec::with_capacity(list.len());
	for item in list.iter() {
		if let Some(term) = object_to_rdf(item.inner(), graph, generator, options, quads) {
			terms.push(term);
		}
	}

	if terms.is_empty() {
		return RdfTerm::Id(ValidId::Iri(RDF_NIL.to_owned()));
	}

	let nodes: Vec<ValidId> = terms
		.iter()
		.map(|_| ValidId::Blank(generator.next()))
		.collect();

	for (i, term) in terms.into_iter().enumerate() {
		let cell = nodes[i].clone();
		quads.push(Quad::new(
			graph.cloned(),
			cell.clone(),
			RDF_FIRST.to_owned(),
			term,
		));

		let rest = match nodes.get(i + 1) {
			Some(next) => RdfTerm::Id(next.clone()),
			None => RdfTerm::Id(ValidId::Iri(RDF_NIL.to_owned())),
		};
		quads.push(Quad::new(graph.cloned(), cell, RDF_REST.to_owned(), rest));
	}

	RdfTerm::Id(nodes[0].clone())
}

fn value_to_rdf(
	value: &Value,
	graph: Option<&ValidId>,
	generator: &mut impl Generator,
	options: &Options,
	quads: &mut Vec<Quad>,
) -> Option<RdfTerm> {
	match value {
		Value::Json(json) => Some(RdfTerm::Literal(RdfLiteral::Typed {
			value: json.compact_print().to_string(),
			ty: RDF_JSON.to_owned(),
		})),
		Value::Literal(literal, ty) => {
			let lexical = literal.canonical_lexical_form();
			let ty = match ty {
				Some(crate::object::value::Type::Id(iri)) => iri.clone(),
				Some(crate::object::value::Type::Json) => RDF_JSON.to_owned(),
				None => match literal {
					crate::object::value::Literal::Boolean(_) => XSD_BOOLEAN.to_owned(),
					crate::object::value::Literal::Number(n) if n.as_i64().is_some() => {
						XSD_INTEGER.to_owned()
					}
					crate::object::value::Literal::Number(_) => XSD_DOUBLE.to_owned(),
					_ => XSD_STRING.to_owned(),
				},
			};
			Some(RdfTerm::Literal(RdfLiteral::Typed {
				value: lexical,
				ty,
			}))
		}
		Value::LangString(lang_string) => {
			let lexical = lang_string.as_str().to_string();
			match (lang_string.direction(), options.rdf_direction) {
				(Some(direction), Some(RdfDirection::I18nDatatype)) => {
					let language = lang_string
						.language()
						.map(|l| l.as_str().to_lowercase())
						.unwrap_or_default();
					let ty = format!(
						"https://www.w3.org/ns/i18n#{language}_{}",
						direction_suffix(direction)
					);
					Some(RdfTerm::Literal(RdfLiteral::Typed {
						value: lexical,
						ty: IriBuf::new(ty).expect("well-formed i18n datatype IRI"),
					}))
				}
				(Some(direction), Some(RdfDirection::CompoundLiteral)) => {
					let subject = ValidId::Blank(generator.next());
					quads.push(Quad::new(
						graph.cloned(),
						subject.clone(),
						RDF_VALUE.to_owned(),
						RdfTerm::Literal(RdfLiteral::Typed {
							value: lexical,
							ty: XSD_STRING.to_owned(),
						}),
					));
					if let Some(language) = lang_string.language() {
						quads.push(Quad::new(
							graph.cloned(),
							subject.clone(),
							iri!("http://www.w3.org/1999/02/22-rdf-syntax-ns#language").to_owned(),
							RdfTerm::Literal(RdfLiteral::Typed {
								value: language.as_str().to_lowercase(),
								ty: XSD_STRING.to_owned(),
							}),
						));
					}
					quads.push(Quad::new(
						graph.cloned(),
						subject.clone(),
						RDF_DIRECTION.to_owned(),
						RdfTerm::Literal(RdfLiteral::Typed {
							value: direction_suffix(direction).to_string(),
							ty: XSD_STRING.to_owned(),
						}),
					));
					Some(RdfTerm::Id(subject))
				}
				(Some(_), None) | (None, _) => match lang_string.language() {
					Some(language) => Some(RdfTerm::Literal(RdfLiteral::LangString {
						value: lexical,
						language: language.as_str().to_lowercase(),
					})),
					None => Some(RdfTerm::Literal(RdfLiteral::Typed {
						value: lexical,
						ty: XSD_STRING.to_owned(),
					})),
				},
			}
		}
	}
}

fn direction_suffix(direction: Direction) -> &'static str {
	match direction {
		Direction::Ltr => "ltr",
		Direction::Rtl => "rtl",
	}
}

fn parse_direction_suffix(s: &str) -> Option<Direction> {
	match s {
		"ltr" => Some(Direction::Ltr),
		"rtl" => Some(Direction::Rtl),
		_ => None,
	}
}

/// One graph's worth of quads, grouped by subject in first-seen order.
#[derive(Default)]
struct GraphData {
	types: indexmap::IndexMap<ValidId, Vec<Id>>,
	properties: indexmap::IndexMap<ValidId, Vec<(IriBuf, RdfTerm)>>,
	usage_count: std::collections::HashMap<ValidId, usize>,
}

impl GraphData {
	fn declare_subject(&mut self, subject: &ValidId) {
		self.types.entry(subject.clone()).or_default();
        self.properties.entry(subject.clone()).or_default();
	}

	fn add(&mut self, predicate: &IriBuf, subject: &ValidId, object: &RdfTerm, options: &Options) {
		self.declare_subject(subject);

		if let RdfTerm::Id(id) = object {
			*self.usage_count.entry(id.clone()).or_insert(0) += 1;
		}

		if predicate.as_str() == RDF_TYPE.as_str() && !options.use_rdf_type {
			if let RdfTerm::Id(ty) = object {
				self.types.get_mut(subject).unwrap().push(Id::Valid(ty.clone()));
				return;
			}
		}

		self.properties.get_mut(subject).unwrap().push((predicate.clone(), object.clone()));
	}

	/// `true` if `subject` is a "pure" `rdf:first`/`rdf:rest` list cell:
	/// referenced exactly once as an object, with no other predicates or
	/// types, making it safe to fold back into a `@list`.
	fn is_list_cell(&self, subject: &ValidId) -> bool {
		if self.usage_count.get(subject).copied().unwrap_or(0) != 1 {
			return false;
		}

		if !self.types.get(subject).map(Vec::is_empty).unwrap_or(true) {
			return false;
		}

		let Some(props) = self.properties.get(subject) else {
			return false;
		};

		props.len() == 2
			&& props.iter().any(|(p, _)| p.as_str() == RDF_FIRST.as_str())
			&& props.iter().any(|(p, _)| p.as_str() == RDF_REST.as_str())
	}

	fn first_rest(&self, subject: &ValidId) -> (RdfTerm, RdfTerm) {
		let props = &self.properties[subject];
		let first = props.iter().find(|(p, _)| p.as_str() == RDF_FIRST.as_str()).unwrap().1.clone();
		let rest = props.iter().find(|(p, _)| p.as_str() == RDF_REST.as_str()).unwrap().1.clone();
		(first, rest)
	}
}

/// Reassembles the `rdf:first`/`rdf:rest`/`rdf:nil` chain rooted at `head`
/// into a JSON-LD list object.
fn build_list(graph: &GraphData, head: &ValidId, options: &Options) -> List {
	let mut items = Vec::new();
	let mut current = head.clone();

	loop {
		let (first, rest) = graph.first_rest(&current);
		items.push(Indexed::none(term_to_object(graph, &first, options)));

		match rest {
			RdfTerm::Id(next) if next.as_str() == RDF_NIL.as_str() => break,
			RdfTerm::Id(next) if graph.is_list_cell(&next) => current = next,
			_ => break,
		}
	}

	List::new(items)
}

/// Converts one RDF term, appearing as the object of some quad, into the
/// JSON-LD object it represents (a node reference, a reassembled list, or
/// a value object).
fn term_to_object(graph: &GraphData, term: &RdfTerm, options: &Options) -> Object {
	match term {
		RdfTerm::Id(id) if graph.is_list_cell(id) => Object::List(build_list(graph, id, options)),
		RdfTerm::Id(id) => Object::id(Id::Valid(id.clone())),
		RdfTerm::Literal(literal) => Object::Value(literal_to_value(literal, options)),
	}
}

fn literal_to_value(literal: &RdfLiteral, options: &Options) -> Value {
	match literal {
		RdfLiteral::LangString { value, language } => {
			let (tag, _) = langtag::LenientLangTagBuf::new(language.clone());
			Value::LangString(
				crate::LangString::new(value.as_str().into(), Some(tag), None)
					.expect("a language tag was just provided"),
			)
		}
		RdfLiteral::Typed { value, ty } => {
			if ty.as_str() == RDF_JSON.as_str() {
				if let Ok((parsed, _)) = json_syntax::Value::parse_str(value) {
					return Value::Json(parsed);
				}
			}

			if let Some(suffix) = ty.as_str().strip_prefix("https://www.w3.org/ns/i18n#") {
				if let Some((language, direction_str)) = suffix.rsplit_once('_') {
					if let Some(direction) = parse_direction_suffix(direction_str) {
						let language = if language.is_empty() {
							None
						} else {
							Some(langtag::LenientLangTagBuf::new(language.to_string()).0)
						};
						if let Ok(lang_string) =
							crate::LangString::new(value.as_str().into(), language, Some(direction))
						{
							return Value::LangString(lang_string);
						}
					}
				}
			}

			if options.use_native_types {
				if ty.as_str() == XSD_BOOLEAN.as_str() {
					if let Ok(b) = value.parse::<bool>() {
						return Value::Literal(crate::object::value::Literal::Boolean(b), None);
					}
				} else if ty.as_str() == XSD_INTEGER.as_str() {
					if value.parse::<i64>().is_ok() {
						let number = unsafe {
							json_syntax::NumberBuf::new_unchecked(value.as_bytes().into())
						};
						return Value::Literal(crate::object::value::Literal::Number(number), None);
					}
				} else if ty.as_str() == XSD_DOUBLE.as_str() {
					if value.parse::<f64>().is_ok() {
						let number = unsafe {
							json_syntax::NumberBuf::new_unchecked(value.as_bytes().into())
						};
						return Value::Literal(crate::object::value::Literal::Number(number), None);
					}
				}
			}

			if ty.as_str() == XSD_STRING.as_str() {
				return Value::Literal(
					crate::object::value::Literal::String(value.as_str().into()),
					None,
				);
			}

			Value::Literal(
				crate::object::value::Literal::String(value.as_str().into()),
				Some(crate::object::value::Type::Id(ty.clone())),
			)
		}
	}
}

fn build_graph_nodes(graph: GraphData, options: &Options) -> Vec<IndexedObject> {
	let mut result = Vec::new();

	for (subject, _) in graph.properties.iter() {
		// List cells are folded into the `@list` of whatever references
		// them; they never appear as top-level node objects themselves.
		if graph.is_list_cell(subject) {
			continue;
		}

		let mut node = Node::with_id(Id::Valid(subject.clone()));
		*node.types_mut() = graph.types.get(subject).cloned().unwrap_or_default();

		for (predicate, object) in &graph.properties[subject] {
			let value = term_to_object(&graph, object, options);
			node.properties_mut().insert(predicate.clone(), Indexed::none(value));
		}

		result.push(Indexed::none(Object::from(node)));
	}

	result
}

/// Converts a flat list of RDF quads back into an expanded document
/// (§4.6 "Deserialize JSON-LD to RDF", reverse direction). Quads are first
/// partitioned by graph; each graph's subjects become node objects, with
/// `rdf:first`/`rdf:rest` chains folded back into `@list`s and named
/// graphs nested under their graph node's `@graph` entry.
pub fn from_rdf(quads: &[Quad], options: &Options) -> crate::ExpandedDocument {
	let mut graphs: indexmap::IndexMap<Option<ValidId>, GraphData> = indexmap::IndexMap::new();

	for quad in quads {
		let graph = graphs.entry(quad.graph.clone()).or_default();
		graph.add(&quad.predicate, &quad.subject, &quad.object, options);
	}

	let default_graph = graphs.shift_remove(&None).unwrap_or_default();
	let mut default_nodes = build_graph_nodes(default_graph, options);

	for (graph_id, graph_data) in graphs {
		let graph_id = graph_id.expect("only the default graph has no name");
		let graph_nodes = build_graph_nodes(graph_data, options);

		let existing = default_nodes.iter_mut().find(|object| {
			object
				.inner()
				.as_node()
				.and_then(|n| n.id())
				.is_some_and(|id| id == &Id::Valid(graph_id.clone()))
		});

		match existing {
			Some(object) => {
				object.inner_mut().as_node_mut().unwrap().set_graph(Some(graph_nodes));
			}
			None => {
				let mut node = Node::with_id(Id::Valid(graph_id));
				node.set_graph(Some(graph_nodes));
				default_nodes.push(Indexed::none(Object::from(node)));
			}
		}
	}

	default_nodes.into_iter().collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::generator::Blank;
	use crate::object::value::Literal;
	use crate::{Indexed, Object};

	#[test]
	fn converts_a_typed_literal_value() {
		let mut generator = Blank::new();
		let value = Value::Literal(Literal::Boolean(true), None);
		let objects = vec![Indexed::none(Object::Value(value))];
		let quads = to_rdf(&objects, &mut generator, &Options::default());
		assert!(quads.is_empty(), "a bare top-level value produces no quads by itself");
	}

	#[test]
	fn converts_a_list_to_rdf_chain() {
		let mut generator = Blank::new();
		let number = |s: &str| unsafe { json_syntax::NumberBuf::new_unchecked(s.as_bytes().into()) };
		let list = List::new(vec![
			Indexed::none(Object::Value(Value::Literal(
				Literal::Number(number("1")),
				None,
			))),
			Indexed::none(Object::Value(Value::Literal(
				Literal::Number(number("2")),
				None,
			))),
		]);
		let mut quads = Vec::new();
		let head = list_to_rdf(&list, None, &mut generator, &Options::default(), &mut quads);
		assert!(matches!(head, RdfTerm::Id(ValidId::Blank(_))));
		assert_eq!(quads.len(), 4);
	}

	#[test]
	fn empty_list_is_rdf_nil() {
		let mut generator = Blank::new();
		let list = List::new(vec![]);
		let mut quads = Vec::new();
		let head = list_to_rdf(&list, None, &mut generator, &Options::default(), &mut quads);
		assert_eq!(head, RdfTerm::Id(ValidId::Iri(RDF_NIL.to_owned())));
		assert!(quads.is_empty());
	}

	fn iri(s: &str) -> IriBuf {
		iref::Iri::new(s).unwrap().to_owned()
	}

	fn blank(s: &str) -> ValidId {
		ValidId::Blank(rdf_types::BlankId::new(s).unwrap().to_owned())
	}

	#[test]
	fn decodes_a_simple_triple() {
		let quads = vec![Quad {
			graph: None,
			subject: ValidId::Iri(iri("https://example.com/s")),
			predicate: iri("https://example.com/p"),
			object: RdfTerm::Literal(RdfLiteral::Typed {
				value: "hello".to_string(),
				ty: XSD_STRING.to_owned(),
			}),
		}];

		let document = from_rdf(&quads, &Options::default());
		assert_eq!(document.objects().len(), 1);

		let node = document.objects()[0].inner().as_node().unwrap();
		assert_eq!(node.id(), Some(&Id::Valid(ValidId::Iri(iri("https://example.com/s")))));
		assert_eq!(node.properties().iter().count(), 1);
	}

	#[test]
	fn decodes_a_list_chain_back_into_a_list_object() {
		let s = ValidId::Iri(iri("https://example.com/s"));
		let p = iri("https://example.com/p");
		let l1 = blank("_:l1");
		let l2 = blank("_:l2");

		let literal = |s: &str| RdfTerm::Literal(RdfLiteral::Typed { value: s.to_string(), ty: XSD_STRING.to_owned() });

		let quads = vec![
			Quad { graph: None, subject: s.clone(), predicate: p.clone(), object: RdfTerm::Id(l1.clone()) },
			Quad { graph: None, subject: l1.clone(), predicate: RDF_FIRST.to_owned(), object: literal("a") },
			Quad { graph: None, subject: l1.clone(), predicate: RDF_REST.to_owned(), object: RdfTerm::Id(l2.clone()) },
			Quad { graph: None, subject: l2.clone(), predicate: RDF_FIRST.to_owned(), object: literal("b") },
			Quad {
				graph: None,
				subject: l2.clone(),
				predicate: RDF_REST.to_owned(),
				object: RdfTerm::Id(ValidId::Iri(RDF_NIL.to_owned())),
			},
		];

		let document = from_rdf(&quads, &Options::default());

		// Only `s` survives as a top-level node; the two list cells are folded away.
		assert_eq!(document.objects().len(), 1);

		let node = document.objects()[0].inner().as_node().unwrap();
		let values = node.properties().get(&p).unwrap().first().unwrap();
		let list = values.inner().as_list().expect("property value should be a list");
		assert_eq!(list.iter().count(), 2);
	}

	#[test]
	fn native_types_decoding_is_gated_by_option() {
		let literal = RdfTerm::Literal(RdfLiteral::Typed { value: "42".to_string(), ty: XSD_INTEGER.to_owned() });
		let quads = vec![Quad {
			graph: None,
			subject: ValidId::Iri(iri("https://example.com/s")),
			predicate: iri("https://example.com/p"),
			object: literal,
		}];

		let without_native = from_rdf(&quads, &Options::default());
		let node = without_native.objects()[0].inner().as_node().unwrap();
		let value = node.properties().get(&iri("https://example.com/p")).unwrap().first().unwrap();
		let value = value.inner().as_value().unwrap();
		assert!(matches!(value, Value::Literal(Literal::String(_), Some(_))));

		let with_native = from_rdf(&quads, &Options { use_native_types: true, ..Options::default() });
		let node = with_native.objects()[0].inner().as_node().unwrap();
		let value = node.properties().get(&iri("https://example.com/p")).unwrap().first().unwrap();
		let value = value.inner().as_value().unwrap();
		assert!(matches!(value, Value::Literal(Literal::Number(_), None)));
	}

	#[test]
	fn named_graph_is_attached_to_its_naming_node() {
		let g = ValidId::Iri(iri("https://example.com/g"));
		let quads = vec![Quad {
			graph: Some(g.clone()),
			subject: ValidId::Iri(iri("https://example.com/s")),
			predicate: RDF_TYPE.to_owned(),
			object: RdfTerm::Id(ValidId::Iri(iri("https://example.com/Thing"))),
		}];

		let document = from_rdf(&quads, &Options::default());
		assert_eq!(document.objects().len(), 1);

		let node = document.objects()[0].inner().as_node().unwrap();
		assert_eq!(node.id(), Some(&Id::Valid(g)));
		assert_eq!(node.graph().unwrap().len(), 1);
	}
}
