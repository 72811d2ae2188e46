//! Compacted JSON-LD for the space graph.
//!
//! The context binds two prefixes (`ex`, `dbr`) and two terms (`onCraft`,
//! `knows`). Nodes are listed under `@graph` sorted by `@id`. Term values
//! are node references because the context carries no `@type: @id`
//! coercion.

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use crate::{Namespaces, Result, SpaceGraphError, Triple, TripleStore};

struct Context {
    prefixes: Vec<(String, String)>,
    terms: Vec<(String, String)>,
}

impl Context {
    fn for_namespaces(ns: &Namespaces) -> Self {
        Self {
            prefixes: vec![
                ("ex".to_string(), ns.ex.clone()),
                ("dbr".to_string(), ns.dbr.clone()),
            ],
            terms: vec![
                ("onCraft".to_string(), ns.on_craft()),
                ("knows".to_string(), ns.knows()),
            ],
        }
    }

    fn from_value(value: &Value) -> Result<Self> {
        let Some(obj) = value.as_object() else {
            return Err(SpaceGraphError::parse(0, "@context must be an object"));
        };
        let mut ctx = Context {
            prefixes: Vec::new(),
            terms: Vec::new(),
        };
        for (key, iri) in obj {
            let Some(iri) = iri.as_str() else {
                return Err(SpaceGraphError::parse(0, format!("unsupported context entry {key}")));
            };
            // A prefix maps to a namespace ending in a JSON-LD gen-delim; a
            // term maps to a full property IRI.
            if iri.ends_with([':', '/', '?', '#', '[', ']', '@']) {
                ctx.prefixes.push((key.clone(), iri.to_string()));
            } else {
                ctx.terms.push((key.clone(), iri.to_string()));
            }
        }
        // Longest namespace first so nested namespaces compact to the most
        // specific prefix.
        ctx.prefixes.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        Ok(ctx)
    }

    fn to_value(&self) -> Value {
        let mut obj = Map::new();
        for (name, iri) in self.prefixes.iter().chain(&self.terms) {
            obj.insert(name.clone(), Value::String(iri.clone()));
        }
        Value::Object(obj)
    }

    fn compact_iri(&self, iri: &str) -> String {
        for (prefix, ns) in &self.prefixes {
            if let Some(local) = iri.strip_prefix(ns.as_str()) {
                if !local.is_empty() {
                    return format!("{prefix}:{local}");
                }
            }
        }
        iri.to_string()
    }

    fn expand_iri(&self, value: &str) -> String {
        if let Some((prefix, local)) = value.split_once(':') {
            if let Some((_, ns)) = self.prefixes.iter().find(|(p, _)| p == prefix) {
                return format!("{ns}{local}");
            }
        }
        value.to_string()
    }

    fn property_key(&self, predicate: &str) -> String {
        match self.terms.iter().find(|(_, iri)| iri == predicate) {
            Some((term, _)) => term.clone(),
            None => self.compact_iri(predicate),
        }
    }

    fn expand_property(&self, key: &str) -> String {
        match self.terms.iter().find(|(term, _)| term == key) {
            Some((_, iri)) => iri.clone(),
            None => self.expand_iri(key),
        }
    }
}

fn one_or_many(mut values: Vec<Value>) -> Value {
    if values.len() == 1 {
        values.remove(0)
    } else {
        Value::Array(values)
    }
}

pub(crate) fn to_json_ld(store: &TripleStore, ns: &Namespaces) -> Value {
    let ctx = Context::for_namespaces(ns);
    let rdf_type = ns.rdf_type();
    let mut nodes = Vec::new();
    for (subject, predicates) in store.grouped() {
        let mut node = Map::new();
        node.insert("@id".to_string(), Value::String(ctx.compact_iri(subject)));
        // BTreeMap keeps property keys in a stable order.
        let mut props: BTreeMap<String, Value> = BTreeMap::new();
        for (predicate, objects) in predicates {
            if predicate == rdf_type {
                let types = objects
                    .iter()
                    .map(|o| Value::String(ctx.compact_iri(o)))
                    .collect();
                node.insert("@type".to_string(), one_or_many(types));
                continue;
            }
            let refs = objects
                .iter()
                .map(|o| json!({ "@id": ctx.compact_iri(o) }))
                .collect();
            props.insert(ctx.property_key(predicate), one_or_many(refs));
        }
        node.extend(props);
        nodes.push(Value::Object(node));
    }
    json!({
        "@context": ctx.to_value(),
        "@graph": nodes,
    })
}

fn iri_values(value: &Value) -> Result<Vec<&str>> {
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.as_str()),
            Value::Object(obj) => obj
                .get("@id")
                .and_then(Value::as_str)
                .ok_or_else(|| SpaceGraphError::parse(0, "node reference without @id")),
            _ => Err(SpaceGraphError::parse(0, "literal values are not supported")),
        })
        .collect()
}

/// Read a document in the shape `to_json_ld` writes back into triples.
pub(crate) fn parse_json_ld(doc: &Value, ns: &Namespaces) -> Result<TripleStore> {
    let ctx = match doc.get("@context") {
        Some(value) => Context::from_value(value)?,
        None => Context::for_namespaces(ns),
    };
    let nodes: Vec<&Value> = match doc.get("@graph") {
        Some(Value::Array(nodes)) => nodes.iter().collect(),
        Some(_) => return Err(SpaceGraphError::parse(0, "@graph must be an array")),
        None => vec![doc],
    };
    let rdf_type = ns.rdf_type();
    let mut store = TripleStore::new();
    for node in nodes {
        let Some(obj) = node.as_object() else {
            return Err(SpaceGraphError::parse(0, "graph entries must be objects"));
        };
        let Some(id) = obj.get("@id").and_then(Value::as_str) else {
            return Err(SpaceGraphError::parse(0, "node without @id"));
        };
        let subject = ctx.expand_iri(id);
        for (key, value) in obj {
            match key.as_str() {
                "@id" | "@context" => {}
                "@type" => {
                    for t in iri_values(value)? {
                        store.insert(Triple::new(&subject, &rdf_type, ctx.expand_iri(t)));
                    }
                }
                _ => {
                    let predicate = ctx.expand_property(key);
                    for o in iri_values(value)? {
                        store.insert(Triple::new(&subject, &predicate, ctx.expand_iri(o)));
                    }
                }
            }
        }
    }
    Ok(store)
}
