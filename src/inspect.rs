use std::path::Path;

use crate::{
    InspectReport, Namespaces, Result, SpaceGraphError, TripleStore, parse_json_ld, parse_turtle,
};

/// Load a previously written graph, picking the reader by file extension.
pub(crate) fn load_graph(path: &Path, ns: &Namespaces) -> Result<TripleStore> {
    let data = std::fs::read_to_string(path).map_err(|e| SpaceGraphError::io(path, e))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" | "jsonld" => {
            let doc: serde_json::Value = serde_json::from_str(&data)?;
            parse_json_ld(&doc, ns)
        }
        _ => parse_turtle(&data),
    }
}

pub(crate) fn inspect_graph(path: &Path, ns: &Namespaces) -> Result<InspectReport> {
    let store = load_graph(path, ns)?;
    let on_craft = ns.on_craft();
    let knows = ns.knows();
    Ok(InspectReport {
        path: path.to_path_buf(),
        triples: store.len(),
        subjects: store.subjects().len(),
        on_craft: store.with_predicate(&on_craft).count(),
        knows: store.with_predicate(&knows).count(),
    })
}
