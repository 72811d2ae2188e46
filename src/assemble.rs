use crate::{
    Annotation, Annotator, PeopleSource, Record, Result, RunSummary, SpaceGraphConfig, Triple,
    TripleStore, annotate_or_fallback, to_json_ld, to_turtle, type_triples, write_atomic,
};

/// Knowledge graph of the people currently in space.
pub(crate) struct SpaceGraph<'a> {
    config: &'a SpaceGraphConfig,
    store: TripleStore,
    astronauts: Vec<String>,
    records: usize,
    fallbacks: usize,
}

impl<'a> SpaceGraph<'a> {
    pub(crate) fn new(config: &'a SpaceGraphConfig) -> Self {
        Self {
            config,
            store: TripleStore::new(),
            astronauts: Vec::new(),
            records: 0,
            fallbacks: 0,
        }
    }

    /// Fetch the crew list, annotate every record and derive `knows`.
    pub(crate) fn build(
        config: &'a SpaceGraphConfig,
        people: &dyn PeopleSource,
        annotator: &dyn Annotator,
    ) -> Result<Self> {
        let records = people.people()?;
        let mut graph = SpaceGraph::new(config);
        for record in &records {
            graph.add_record(annotator, record);
        }
        graph.add_astronaut_relations();
        tracing::info!(
            records = graph.records,
            astronauts = graph.astronauts.len(),
            triples = graph.store.len(),
            "graph assembled"
        );
        Ok(graph)
    }

    pub(crate) fn add_record(&mut self, annotator: &dyn Annotator, record: &Record) {
        self.records += 1;
        let config = self.config;
        let people = self.annotate(annotator, &record.name, Some(config.astronaut_type.as_str()));
        let craft = self.add_craft(annotator, &record.craft);
        for annotation in &people {
            self.add_astronaut(annotation, &craft);
        }
    }

    /// Every match for a name is kept, not only the top-ranked one.
    fn add_astronaut(&mut self, annotation: &Annotation, craft_uri: &str) {
        let on_craft = self.config.namespaces.on_craft();
        self.store
            .insert(Triple::new(&annotation.uri, on_craft, craft_uri));
        self.add_metadata(annotation);
        if annotation.has_type(&self.config.astronaut_type)
            && !self.astronauts.contains(&annotation.uri)
        {
            self.astronauts.push(annotation.uri.clone());
        }
    }

    /// Craft matches are taken unfiltered; the top-ranked one wins.
    fn add_craft(&mut self, annotator: &dyn Annotator, craft: &str) -> String {
        let mut matches = self.annotate(annotator, craft, None);
        // annotate_or_fallback never returns an empty list.
        let annotation = matches.swap_remove(0);
        self.add_metadata(&annotation);
        annotation.uri
    }

    fn add_metadata(&mut self, annotation: &Annotation) {
        self.store.extend(type_triples(
            &annotation.uri,
            &annotation.types,
            &self.config.namespaces,
        ));
    }

    fn annotate(
        &mut self,
        annotator: &dyn Annotator,
        text: &str,
        types: Option<&str>,
    ) -> Vec<Annotation> {
        let found = annotate_or_fallback(annotator, self.config, text, types);
        self.fallbacks += found.iter().filter(|a| a.fallback).count();
        found
    }

    /// Everyone in orbit knows everyone else, whichever craft they are on.
    pub(crate) fn add_astronaut_relations(&mut self) {
        let knows = self.config.namespaces.knows();
        for astronaut in &self.astronauts {
            for friend in &self.astronauts {
                if astronaut != friend {
                    self.store
                        .insert(Triple::new(astronaut, knows.as_str(), friend));
                }
            }
        }
    }

    pub(crate) fn store(&self) -> &TripleStore {
        &self.store
    }

    pub(crate) fn astronauts(&self) -> &[String] {
        &self.astronauts
    }

    pub(crate) fn write_outputs(&self) -> Result<()> {
        let ns = &self.config.namespaces;
        let doc = to_json_ld(&self.store, ns);
        write_atomic(
            &self.config.json_ld_path,
            serde_json::to_string_pretty(&doc)?.as_bytes(),
        )?;
        write_atomic(
            &self.config.turtle_path,
            to_turtle(&self.store, ns)?.as_bytes(),
        )?;
        tracing::info!(
            json_ld = %self.config.json_ld_path.display(),
            turtle = %self.config.turtle_path.display(),
            "wrote graph"
        );
        Ok(())
    }

    pub(crate) fn summary(&self) -> RunSummary {
        RunSummary {
            records: self.records,
            astronauts: self.astronauts.len(),
            fallbacks: self.fallbacks,
            triples: self.store.len(),
            json_ld: self.config.json_ld_path.clone(),
            turtle: self.config.turtle_path.clone(),
        }
    }
}

/// One full run: build the graph and write both serializations.
pub(crate) fn run_space_graph(
    config: &SpaceGraphConfig,
    people: &dyn PeopleSource,
    annotator: &dyn Annotator,
) -> Result<RunSummary> {
    let graph = SpaceGraph::build(config, people, annotator)?;
    graph.write_outputs()?;
    Ok(graph.summary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpaceGraphError;
    use crate::spotlight::fake::FakeAnnotator;

    const ISS: &str = "http://dbpedia.org/resource/International_Space_Station";

    fn record(name: &str, craft: &str) -> Record {
        Record {
            name: name.to_string(),
            craft: craft.to_string(),
        }
    }

    fn crew_annotator() -> FakeAnnotator {
        FakeAnnotator::default()
            .with(
                "Jasmin Moghbeli",
                "http://dbpedia.org/resource/Jasmin_Moghbeli",
                "Http://xmlns.com/foaf/0.1/Person,DBpedia:Astronaut,DBpedia:Person,Schema:Person",
            )
            .with(
                "Andreas Mogensen",
                "http://dbpedia.org/resource/Andreas_Mogensen",
                "DBpedia:Astronaut,Wikidata:Q5,DUL:NaturalPerson",
            )
            .with(
                "Jing Haiping",
                "http://dbpedia.org/resource/Jing_Haipeng",
                "DBpedia:Astronaut",
            )
            .with("ISS", ISS, "DBpedia:SpaceStation,Schema:Place")
    }

    fn crew() -> Vec<Record> {
        vec![
            record("Jasmin Moghbeli", "ISS"),
            record("Andreas Mogensen", "ISS"),
            record("Jing Haiping", "Tiangong"),
        ]
    }

    #[test]
    fn records_relate_to_craft_and_types() {
        let config = SpaceGraphConfig::default();
        let annotator = crew_annotator();
        let graph = SpaceGraph::build(&config, &crew(), &annotator).unwrap();
        let store = graph.store();
        let ns = &config.namespaces;

        assert!(store.contains(
            "http://dbpedia.org/resource/Jasmin_Moghbeli",
            &ns.on_craft(),
            ISS
        ));
        assert!(store.contains(
            "http://dbpedia.org/resource/Jing_Haipeng",
            &ns.on_craft(),
            "https://example.org/Tiangong"
        ));
        assert!(store.contains(ISS, &ns.rdf_type(), "http://schema.org/Place"));
        assert!(store.contains(
            "http://dbpedia.org/resource/Andreas_Mogensen",
            &ns.rdf_type(),
            "http://www.ontologydesignpatterns.org/ont/dul/DUL.owl#NaturalPerson"
        ));
        assert_eq!(graph.astronauts().len(), 3);
        assert_eq!(graph.summary().fallbacks, 1);
    }

    #[test]
    fn person_filter_and_unfiltered_craft() {
        let config = SpaceGraphConfig::default();
        let annotator = crew_annotator();
        SpaceGraph::build(&config, &vec![record("Jasmin Moghbeli", "ISS")], &annotator).unwrap();
        let calls = annotator.calls.borrow();
        assert_eq!(
            calls[0],
            ("Jasmin Moghbeli".to_string(), Some("DBpedia:Astronaut".to_string()))
        );
        assert_eq!(calls[1], ("ISS".to_string(), None));
    }

    #[test]
    fn every_subject_has_a_type() {
        let config = SpaceGraphConfig::default();
        let mut people = crew();
        people.push(record("Zzyzx Explorer", "Zzyzx Craft"));
        let graph = SpaceGraph::build(&config, &people, &crew_annotator()).unwrap();
        let store = graph.store();
        let rdf_type = config.namespaces.rdf_type();
        for subject in store.subjects() {
            assert!(
                store
                    .with_predicate(&rdf_type)
                    .any(|t| t.subject == subject),
                "{subject} has no type"
            );
        }
    }

    #[test]
    fn craft_relation_precedes_types_and_knows() {
        let config = SpaceGraphConfig::default();
        let graph = SpaceGraph::build(&config, &crew(), &crew_annotator()).unwrap();
        let store = graph.store();
        let ns = &config.namespaces;
        let knows = ns.knows();
        let first_knows = store
            .insertion_order()
            .iter()
            .position(|t| t.predicate == knows)
            .unwrap();
        let on_craft = ns.on_craft();
        for t in store.with_predicate(&on_craft) {
            let on_craft_at = store.position(t).unwrap();
            assert!(on_craft_at < first_knows);
            let first_type = store
                .insertion_order()
                .iter()
                .position(|x| x.subject == t.subject && x.predicate == ns.rdf_type())
                .unwrap();
            assert!(on_craft_at < first_type);
        }
    }

    #[test]
    fn knows_is_symmetric_and_irreflexive() {
        let config = SpaceGraphConfig::default();
        let graph = SpaceGraph::build(&config, &crew(), &crew_annotator()).unwrap();
        let store = graph.store();
        let knows = config.namespaces.knows();
        let astronauts = graph.astronauts();
        for a in astronauts {
            assert!(!store.contains(a, &knows, a));
            for b in astronauts {
                if a != b {
                    assert!(store.contains(a, &knows, b));
                    assert!(store.contains(b, &knows, a));
                }
            }
        }
        // Craft co-membership is ignored: ISS and Tiangong crews know each other.
        assert!(store.contains(
            "http://dbpedia.org/resource/Jasmin_Moghbeli",
            &knows,
            "http://dbpedia.org/resource/Jing_Haipeng"
        ));
        assert_eq!(store.with_predicate(&knows).count(), 6);
    }

    #[test]
    fn duplicate_record_tracks_one_identifier() {
        let config = SpaceGraphConfig::default();
        let annotator = FakeAnnotator::default()
            .with("Jane Doe", "http://dbpedia.org/resource/Jane_Doe", "DBpedia:Astronaut")
            .with("ISS", ISS, "DBpedia:SpaceStation");
        let people = vec![record("Jane Doe", "ISS"), record("Jane Doe", "ISS")];
        let graph = SpaceGraph::build(&config, &people, &annotator).unwrap();
        assert_eq!(graph.astronauts(), ["http://dbpedia.org/resource/Jane_Doe"]);
        let knows = config.namespaces.knows();
        assert_eq!(graph.store().with_predicate(&knows).count(), 0);
        assert_eq!(graph.summary().records, 2);
    }

    #[test]
    fn unresolved_person_uses_fallback_identifier() {
        let config = SpaceGraphConfig::default();
        let annotator = FakeAnnotator::default().with("ISS", ISS, "DBpedia:SpaceStation");
        let graph =
            SpaceGraph::build(&config, &vec![record("Zzyzx Explorer", "ISS")], &annotator).unwrap();
        let ns = &config.namespaces;
        assert_eq!(graph.astronauts(), ["https://example.org/Zzyzx_Explorer"]);
        assert!(graph.store().contains(
            "https://example.org/Zzyzx_Explorer",
            &ns.rdf_type(),
            "http://dbpedia.org/resource/Astronaut"
        ));
        assert!(graph.store().contains(
            "https://example.org/Zzyzx_Explorer",
            &ns.on_craft(),
            ISS
        ));
    }

    #[test]
    fn non_astronaut_match_is_not_tracked() {
        let config = SpaceGraphConfig::default();
        let annotator = FakeAnnotator::default()
            .with("Jane Doe", "http://dbpedia.org/resource/Jane_Doe", "DBpedia:Person")
            .with("John Roe", "http://dbpedia.org/resource/John_Roe", "DBpedia:Astronaut")
            .with("ISS", ISS, "DBpedia:SpaceStation");
        let people = vec![record("Jane Doe", "ISS"), record("John Roe", "ISS")];
        let graph = SpaceGraph::build(&config, &people, &annotator).unwrap();
        assert_eq!(graph.astronauts(), ["http://dbpedia.org/resource/John_Roe"]);
        assert!(graph.store().contains(
            "http://dbpedia.org/resource/Jane_Doe",
            &config.namespaces.on_craft(),
            ISS
        ));
    }

    struct FailingPeople;

    impl PeopleSource for FailingPeople {
        fn people(&self) -> Result<Vec<Record>> {
            Err(SpaceGraphError::Http {
                url: "http://api.open-notify.org/astros.json".to_string(),
                message: "connection refused".to_string(),
            })
        }
    }

    #[test]
    fn people_failure_aborts() {
        let config = SpaceGraphConfig::default();
        let annotator = crew_annotator();
        let result = SpaceGraph::build(&config, &FailingPeople, &annotator);
        assert!(matches!(result, Err(SpaceGraphError::Http { .. })));
        assert!(annotator.calls.borrow().is_empty());
    }

    #[test]
    fn run_writes_both_outputs() {
        let dir = std::env::temp_dir()
            .join("spacegraph_test")
            .join(format!("run_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let config = SpaceGraphConfig {
            json_ld_path: dir.join("data.json"),
            turtle_path: dir.join("data.ttl"),
            ..SpaceGraphConfig::default()
        };
        let summary = run_space_graph(&config, &crew(), &crew_annotator()).unwrap();
        assert_eq!(summary.records, 3);
        assert_eq!(summary.json_ld, dir.join("data.json"));

        let ttl = std::fs::read_to_string(&config.turtle_path).unwrap();
        let parsed = crate::turtle::parse_turtle(&ttl).unwrap();
        assert_eq!(parsed.len(), summary.triples);

        let json = std::fs::read_to_string(&config.json_ld_path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            doc["@context"]["onCraft"],
            serde_json::json!("https://example.org/onCraft")
        );
        std::fs::remove_dir_all(&dir).ok();
    }
}
