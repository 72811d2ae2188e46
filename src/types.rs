use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One person currently in space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Record {
    pub(crate) name: String,
    pub(crate) craft: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PeopleResponse {
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) number: Option<u64>,
    pub(crate) people: Vec<Record>,
}

/// A resolved entity: its identifier plus a comma-separated type list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Annotation {
    pub(crate) uri: String,
    pub(crate) types: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) surface_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) similarity: Option<f64>,
    pub(crate) fallback: bool,
}

impl Annotation {
    pub(crate) fn new(uri: impl Into<String>, types: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            types: types.into(),
            surface_form: None,
            similarity: None,
            fallback: false,
        }
    }

    pub(crate) fn fallback(uri: String, types: &str) -> Self {
        Self {
            fallback: true,
            ..Self::new(uri, types)
        }
    }

    pub(crate) fn type_labels(&self) -> impl Iterator<Item = &str> {
        self.types
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }

    /// Exact match against one trimmed label, so `DBpedia:AstronautProgram`
    /// does not count as `DBpedia:Astronaut`.
    pub(crate) fn has_type(&self, label: &str) -> bool {
        self.type_labels().any(|t| t == label)
    }
}

/// A statement between three IRIs. Ordering is subject, predicate, object.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Triple {
    pub(crate) subject: String,
    pub(crate) predicate: String,
    pub(crate) object: String,
}

impl Triple {
    pub(crate) fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RunSummary {
    pub(crate) records: usize,
    pub(crate) astronauts: usize,
    pub(crate) fallbacks: usize,
    pub(crate) triples: usize,
    pub(crate) json_ld: PathBuf,
    pub(crate) turtle: PathBuf,
}

#[derive(Debug, Serialize)]
pub(crate) struct InspectReport {
    pub(crate) path: PathBuf,
    pub(crate) triples: usize,
    pub(crate) subjects: usize,
    pub(crate) on_craft: usize,
    pub(crate) knows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_labels_trim_and_skip_empty() {
        let ann = Annotation::new("u", " DBpedia:Astronaut, ,Schema:Person,");
        let labels: Vec<&str> = ann.type_labels().collect();
        assert_eq!(labels, vec!["DBpedia:Astronaut", "Schema:Person"]);
    }

    #[test]
    fn has_type_is_label_exact() {
        let ann = Annotation::new("u", "DBpedia:AstronautProgram,DBpedia:Person");
        assert!(!ann.has_type("DBpedia:Astronaut"));
        assert!(ann.has_type("DBpedia:Person"));
    }

    #[test]
    fn people_response_ignores_extra_fields() {
        let body = r#"{"message":"success","number":1,"people":[{"craft":"ISS","name":"Jane Doe"}]}"#;
        let parsed: PeopleResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.number, Some(1));
        assert_eq!(
            parsed.people,
            vec![Record {
                name: "Jane Doe".into(),
                craft: "ISS".into()
            }]
        );
    }
}
