//! Turtle output and reading, on top of `oxttl`.

use oxrdf::{NamedNodeRef, Subject, Term, TripleRef};
use oxttl::{TurtleParser, TurtleSerializer};

use crate::{Namespaces, Result, SpaceGraphError, Triple, TripleStore};

fn named_node(iri: &str) -> Result<NamedNodeRef<'_>> {
    NamedNodeRef::new(iri).map_err(|source| SpaceGraphError::Iri {
        iri: iri.to_string(),
        source,
    })
}

/// Serialize the store as Turtle with the namespace bindings as prefixes.
/// Subjects come out sorted, `rdf:type` first within each subject.
pub(crate) fn to_turtle(store: &TripleStore, ns: &Namespaces) -> Result<String> {
    let mut serializer = TurtleSerializer::new();
    for (prefix, namespace) in ns.bindings() {
        serializer = serializer
            .with_prefix(prefix, namespace)
            .map_err(|source| SpaceGraphError::Iri {
                iri: namespace.to_string(),
                source,
            })?;
    }
    let mut writer = serializer.for_writer(Vec::new());

    let rdf_type = ns.rdf_type();
    for (subject, mut predicates) in store.grouped() {
        let subject = named_node(subject)?;
        let types = predicates
            .remove(rdf_type.as_str())
            .map(|objects| (rdf_type.as_str(), objects));
        for (predicate, objects) in types.into_iter().chain(predicates) {
            let predicate = named_node(predicate)?;
            for object in objects {
                writer.serialize_triple(TripleRef::new(subject, predicate, named_node(object)?))?;
            }
        }
    }

    let bytes = writer.finish()?;
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

/// Read Turtle back into a store. Only IRI subjects and objects are
/// accepted; the graph never holds literals or blank nodes.
pub(crate) fn parse_turtle(src: &str) -> Result<TripleStore> {
    let mut store = TripleStore::new();
    for triple in TurtleParser::new().for_reader(src.as_bytes()) {
        let triple = triple?;
        let subject = match triple.subject {
            Subject::NamedNode(node) => node.into_string(),
            other => {
                return Err(SpaceGraphError::parse(0, format!("unsupported subject {other}")));
            }
        };
        let object = match triple.object {
            Term::NamedNode(node) => node.into_string(),
            other => {
                return Err(SpaceGraphError::parse(0, format!("unsupported object {other}")));
            }
        };
        store.insert(Triple::new(subject, triple.predicate.into_string(), object));
    }
    Ok(store)
}
