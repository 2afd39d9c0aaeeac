//! End-to-end scenarios exercising the four algorithms together, through the
//! public [`json_ld::JsonLdProcessor`] façade and the lower-level node-map /
//! RDF conversion functions it sits on top of.

use json_ld::generator::Blank;
use json_ld::rdf::{self, RdfLiteral, RdfTerm};
use json_ld::syntax::{from_value, Parse};
use json_ld::{generate_node_map, Id, JsonLdProcessor, NoLoader, Options};

fn iri(s: &str) -> iref::IriBuf {
	iref::Iri::new(s).unwrap().to_owned()
}

fn parse(s: &str) -> json_syntax::Value {
	json_syntax::Value::parse_str(s).unwrap().0
}

/// Scenario 1: a term aliasing `@id` (used for the document's own `@id`
/// value) and a term coerced to `@type: @id` (so its value is itself
/// interpreted as a node reference, not a string).
#[tokio::test]
async fn coerced_iri() {
	let doc = parse(
		r#"{
			"@context": {
				"a": {"@id": "http://ex/a"},
				"b": {"@id": "http://ex/b", "@type": "@id"}
			},
			"@id": "a",
			"b": "c"
		}"#,
	);

	let expanded = doc.expand(&NoLoader).await.unwrap();
	assert_eq!(expanded.len(), 1);

	let node = expanded.objects()[0].inner().as_node().unwrap();
	assert_eq!(node.id(), Some(&Id::iri(iri("http://ex/a"))));

	let values = node.properties().get(&iri("http://ex/b")).unwrap();
	assert_eq!(values.len(), 1);
	let referenced = values[0].inner().as_node().unwrap();
	// "c" has no scheme, so it cannot be resolved to an absolute IRI without
	// a base: it is carried through as an invalid, but not discarded, id.
	assert_eq!(referenced.id(), Some(&Id::Invalid("c".to_string())));
}

/// Scenario 2: a term coerced to `@container: @list`, expanded and then
/// compacted back against the same context.
#[tokio::test]
async fn list_coercion_round_trips_through_compaction() {
	let context_json = parse(r#"{"b": {"@id": "http://ex/b", "@container": "@list"}}"#);
	let context: json_ld::syntax::context::Context = from_value(context_json).unwrap();

	let doc = parse(r#"{"@context": {"b": {"@id": "http://ex/b", "@container": "@list"}}, "b": ["c", "d"]}"#);

	let expanded = doc.expand(&NoLoader).await.unwrap();
	assert_eq!(expanded.len(), 1);

	let node = expanded.objects()[0].inner().as_node().unwrap();
	let values = node.properties().get(&iri("http://ex/b")).unwrap();
	assert_eq!(values.len(), 1);
	let list = values[0].inner().as_list().expect("b should expand to a list object");
	let items: Vec<_> = list.iter().collect();
	assert_eq!(items.len(), 2);
	assert_eq!(items[0].inner().as_value().unwrap().as_str(), Some("c"));
	assert_eq!(items[1].inner().as_value().unwrap().as_str(), Some("d"));

	let compacted = doc
		.compact(&context, &NoLoader)
		.await
		.unwrap();

	let object = match &compacted {
		json_syntax::Value::Object(object) => object,
		other => panic!("compaction should produce a JSON object, got {other:?}"),
	};
	let b = object
		.get_unique("b")
		.ok()
		.unwrap()
		.expect("b should survive compaction");
	match b {
		json_syntax::Value::Array(items) => {
			assert_eq!(items.len(), 2);
			assert!(matches!(&items[0], json_syntax::Value::String(_)));
			assert!(matches!(&items[1], json_syntax::Value::String(_)));
		}
		other => panic!("expected b to compact back to a plain array, got {other:?}"),
	}
}

/// Scenario 3: a `@reverse`-typed, `@type: @id`-coerced term turns its
/// values into the *subject* of the property, with the node carrying the
/// term into the *object* position. Flattening must produce one node per
/// referenced id plus one fresh blank node for the (otherwise anonymous)
/// subject, with both references attached to it.
#[tokio::test]
async fn reverse_property_with_blank_node_reference() {
	let doc = parse(
		r#"{
			"@context": {"bar": {"@reverse": "http://ex/bar", "@type": "@id"}},
			"bar": ["http://example.org/origin", "_:b0"]
		}"#,
	);

	let expanded = doc.expand(&NoLoader).await.unwrap();
	let mut generator = Blank::new();
	let node_map = generate_node_map(&expanded, &mut generator).unwrap();
	let flattened = node_map.flatten(true);

	assert_eq!(flattened.nodes().len(), 3);

	let origin_id = Id::iri(iri("http://example.org/origin"));
	let b0_id = Id::blank(rdf_types::BlankId::new("_:b0").unwrap().to_owned());

	let origin = flattened
		.iter()
		.find(|n| n.id() == Some(&origin_id))
		.expect("http://example.org/origin should be a top-level node");
	let b0 = flattened
		.iter()
		.find(|n| n.id() == Some(&b0_id))
		.expect("_:b0 should keep its explicit identifier");

	let origin_target = origin.properties().get(&iri("http://ex/bar")).unwrap();
	let b0_target = b0.properties().get(&iri("http://ex/bar")).unwrap();
	assert_eq!(origin_target.len(), 1);
	assert_eq!(b0_target.len(), 1);

	let subject_id = origin_target[0]
		.inner()
		.as_node()
		.unwrap()
		.id()
		.unwrap()
		.clone();
	assert_eq!(
		b0_target[0].inner().as_node().unwrap().id(),
		Some(&subject_id)
	);
	// The anonymous subject is distinct from the explicit "_:b0" reference
	// it is linked from.
	assert_ne!(subject_id, b0_id);
	assert!(subject_id.as_blank().is_some());
}

/// Scenario 4: a named graph nested under a node that also carries a
/// property outside the `@graph` entry. Flattening must keep that property
/// on the graph-naming node while the inner triple stays nested under its
/// `@graph`.
#[tokio::test]
async fn nested_named_graph_keeps_outer_property_separate() {
	let doc = parse(
		r#"{
			"@context": {"ref": {"@id": "http://ex/hasReference"}},
			"@graph": [
				{
					"@id": "_:g1",
					"ref": "http://ex/ref1",
					"@graph": [
						{"@id": "http://ex/s1", "ref": "http://ex/ref2"}
					]
				}
			]
		}"#,
	);

	let expanded = doc.expand(&NoLoader).await.unwrap();
	let mut generator = Blank::new();
	let node_map = generate_node_map(&expanded, &mut generator).unwrap();
	let flattened = node_map.flatten(true);

	// Only the graph-naming node is top-level; the inner node stays nested.
	assert_eq!(flattened.nodes().len(), 1);

	let g1 = &flattened.nodes()[0];
	let outer_ref = g1.properties().get(&iri("http://ex/hasReference")).unwrap();
	assert_eq!(outer_ref.len(), 1);
	assert_eq!(
		outer_ref[0].inner().as_node().unwrap().id(),
		Some(&Id::iri(iri("http://ex/ref1")))
	);

	let inner_graph = g1.graph().expect("g1 should carry a nested @graph");
	assert_eq!(inner_graph.len(), 1);
	let s1 = inner_graph[0].inner().as_node().unwrap();
	assert_eq!(s1.id(), Some(&Id::iri(iri("http://ex/s1"))));
	let inner_ref = s1.properties().get(&iri("http://ex/hasReference")).unwrap();
	assert_eq!(
		inner_ref[0].inner().as_node().unwrap().id(),
		Some(&Id::iri(iri("http://ex/ref2")))
	);
}

/// Scenario 5: an RDF-list encoded as a chain of `rdf:first`/`rdf:rest`
/// blank nodes decodes back into a single `@list`, and re-encoding produces
/// an isomorphic quad set (same triples, up to the blank node labels the
/// decoder happened to reuse).
#[test]
fn rdf_list_chain_round_trips() {
	let s = rdf_types::Id::Iri(iri("http://ex/s"));
	let p = iri("http://ex/p");
	let l = rdf_types::Id::Blank(rdf_types::BlankId::new("_:l").unwrap().to_owned());
	let m = rdf_types::Id::Blank(rdf_types::BlankId::new("_:m").unwrap().to_owned());

	let literal = |v: &str| {
		RdfTerm::Literal(RdfLiteral::Typed {
			value: v.to_string(),
			ty: rdf::XSD_STRING.to_owned(),
		})
	};

	let quads = vec![
		rdf::Quad {
			graph: None,
			subject: s.clone(),
			predicate: p.clone(),
			object: RdfTerm::Id(l.clone()),
		},
		rdf::Quad {
			graph: None,
			subject: l.clone(),
			predicate: rdf::RDF_FIRST.to_owned(),
			object: literal("a"),
		},
		rdf::Quad {
			graph: None,
			subject: l.clone(),
			predicate: rdf::RDF_REST.to_owned(),
			object: RdfTerm::Id(m.clone()),
		},
		rdf::Quad {
			graph: None,
			subject: m.clone(),
			predicate: rdf::RDF_FIRST.to_owned(),
			object: literal("b"),
		},
		rdf::Quad {
			graph: None,
			subject: m,
			predicate: rdf::RDF_REST.to_owned(),
			object: RdfTerm::Id(rdf_types::Id::Iri(rdf::RDF_NIL.to_owned())),
		},
	];

	let document = rdf::from_rdf(&quads, &rdf::Options::default());
	assert_eq!(document.len(), 1);

	let node = document.objects()[0].inner().as_node().unwrap();
	assert_eq!(node.id(), Some(&Id::iri(iri("http://ex/s"))));
	let values = node.properties().get(&p).unwrap();
	let list = values[0].inner().as_list().expect("p should decode back to a list");
	assert_eq!(list.iter().count(), 2);

	let mut generator = Blank::new();
	let re_encoded = rdf::to_rdf(document.objects(), &mut generator, &rdf::Options::default());
	// s -> list cell, plus 2 first/rest pairs each, plus the closing nil:
	// same shape as the original 5 quads (the cell labels may differ).
	assert_eq!(re_encoded.len(), 5);
}

/// Scenario 6: a protected term cannot be silently redefined by a later
/// context.
#[tokio::test]
async fn protected_term_redefinition_is_rejected() {
	let protecting_context: json_ld::syntax::context::Context =
		from_value(parse(r#"{"name": {"@id": "http://ex/name", "@protected": true}}"#)).unwrap();

	let doc = parse(
		r#"{
			"@context": {"name": {"@id": "http://ex/other"}},
			"name": "test"
		}"#,
	);

	let options = Options {
		expand_context: Some(protecting_context),
		..Options::default()
	};

	let result = doc.expand_full(&NoLoader, options).await;
	match result {
		Err(json_ld::ExpandError::Expansion(json_ld::expansion::Error::ContextProcessing(
			json_ld::context_processing::Error::ProtectedTermRedefinition,
		))) => {}
		other => panic!("expected a ProtectedTermRedefinition error, got {other:?}"),
	}
}
