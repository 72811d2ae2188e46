use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_PEOPLE_URL: &str = "http://api.open-notify.org/astros.json";
pub(crate) const DEFAULT_SPOTLIGHT_URL: &str = "https://api.dbpedia-spotlight.org/en/annotate";
pub(crate) const DEFAULT_CONFIDENCE: f64 = 0.5;
pub(crate) const DEFAULT_ASTRONAUT_TYPE: &str = "DBpedia:Astronaut";
pub(crate) const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Namespace IRIs used when minting triples. Every value ends with its
/// separator (`/` or `#`) so local names can be appended directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Namespaces {
    pub(crate) ex: String,
    pub(crate) dbr: String,
    pub(crate) dul: String,
    pub(crate) schema: String,
    pub(crate) wd: String,
    pub(crate) foaf: String,
    pub(crate) rdf: String,
}

impl Default for Namespaces {
    fn default() -> Self {
        Self {
            ex: "https://example.org/".to_string(),
            dbr: "http://dbpedia.org/resource/".to_string(),
            dul: "http://www.ontologydesignpatterns.org/ont/dul/DUL.owl#".to_string(),
            schema: "http://schema.org/".to_string(),
            wd: "http://www.wikidata.org/entity/".to_string(),
            foaf: "http://xmlns.com/foaf/0.1/".to_string(),
            rdf: "http://www.w3.org/1999/02/22-rdf-syntax-ns#".to_string(),
        }
    }
}

impl Namespaces {
    pub(crate) fn rdf_type(&self) -> String {
        format!("{}type", self.rdf)
    }

    pub(crate) fn on_craft(&self) -> String {
        format!("{}onCraft", self.ex)
    }

    pub(crate) fn knows(&self) -> String {
        format!("{}knows", self.foaf)
    }

    /// Prefix bindings written to Turtle output, sorted by prefix.
    pub(crate) fn bindings(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("dbr", self.dbr.as_str()),
            ("dul", self.dul.as_str()),
            ("ex", self.ex.as_str()),
            ("foaf", self.foaf.as_str()),
            ("rdf", self.rdf.as_str()),
            ("schema", self.schema.as_str()),
            ("wd", self.wd.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SpaceGraphConfig {
    pub(crate) people_url: String,
    pub(crate) spotlight_url: String,
    pub(crate) confidence: f64,
    /// Type filter used for person names; also the type given to fallbacks.
    pub(crate) astronaut_type: String,
    pub(crate) http_timeout_secs: u64,
    pub(crate) json_ld_path: PathBuf,
    pub(crate) turtle_path: PathBuf,
    pub(crate) namespaces: Namespaces,
}

impl Default for SpaceGraphConfig {
    fn default() -> Self {
        Self {
            people_url: DEFAULT_PEOPLE_URL.to_string(),
            spotlight_url: DEFAULT_SPOTLIGHT_URL.to_string(),
            confidence: DEFAULT_CONFIDENCE,
            astronaut_type: DEFAULT_ASTRONAUT_TYPE.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            json_ld_path: PathBuf::from("output/data.json"),
            turtle_path: PathBuf::from("output/data.ttl"),
            namespaces: Namespaces::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_predicates() {
        let ns = Namespaces::default();
        assert_eq!(ns.on_craft(), "https://example.org/onCraft");
        assert_eq!(ns.knows(), "http://xmlns.com/foaf/0.1/knows");
        assert_eq!(
            ns.rdf_type(),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type"
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: SpaceGraphConfig =
            serde_json::from_str(r#"{"confidence": 0.8, "namespaces": {"ex": "urn:x:"}}"#)
                .unwrap();
        assert!((cfg.confidence - 0.8).abs() < f64::EPSILON);
        assert_eq!(cfg.namespaces.ex, "urn:x:");
        assert_eq!(cfg.namespaces.dbr, "http://dbpedia.org/resource/");
        assert_eq!(cfg.people_url, DEFAULT_PEOPLE_URL);
        assert_eq!(cfg.astronaut_type, "DBpedia:Astronaut");
    }

    #[test]
    fn bindings_are_sorted() {
        let ns = Namespaces::default();
        let names: Vec<&str> = ns.bindings().iter().map(|(p, _)| *p).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
