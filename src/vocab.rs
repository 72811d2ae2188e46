use crate::{Namespaces, Triple};

/// Type vocabularies Spotlight reports labels from. Checked in declaration
/// order, so a label mentioning two tags resolves to the earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Vocabulary {
    DBpedia,
    Wikidata,
    Schema,
    Foaf,
    Dul,
}

impl Vocabulary {
    pub(crate) const ALL: [Vocabulary; 5] = [
        Vocabulary::DBpedia,
        Vocabulary::Wikidata,
        Vocabulary::Schema,
        Vocabulary::Foaf,
        Vocabulary::Dul,
    ];

    fn tag(self) -> &'static str {
        match self {
            Vocabulary::DBpedia => "dbpedia",
            Vocabulary::Wikidata => "wikidata",
            Vocabulary::Schema => "schema",
            Vocabulary::Foaf => "foaf",
            Vocabulary::Dul => "dul",
        }
    }

    pub(crate) fn namespace(self, ns: &Namespaces) -> &str {
        match self {
            Vocabulary::DBpedia => &ns.dbr,
            Vocabulary::Wikidata => &ns.wd,
            Vocabulary::Schema => &ns.schema,
            Vocabulary::Foaf => &ns.foaf,
            Vocabulary::Dul => &ns.dul,
        }
    }

    /// FOAF labels arrive as full IRIs (`Http://xmlns.com/foaf/0.1/Person`);
    /// everything else is `Prefix:Local`, where the local name stops at the
    /// next ':'.
    fn local_name(self, label: &str) -> Option<&str> {
        let local = match self {
            Vocabulary::Foaf => label
                .split_once("/0.1/")
                .map(|(_, rest)| rest)
                .or_else(|| label.split(':').nth(1)),
            _ => label.split(':').nth(1),
        }?;
        let local = local.trim();
        if local.is_empty() { None } else { Some(local) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeLabel<'a> {
    Known {
        vocabulary: Vocabulary,
        local: &'a str,
    },
    Unrecognized,
}

pub(crate) fn classify_label(label: &str) -> TypeLabel<'_> {
    let lower = label.to_ascii_lowercase();
    let Some(vocabulary) = Vocabulary::ALL
        .into_iter()
        .find(|v| lower.contains(v.tag()))
    else {
        return TypeLabel::Unrecognized;
    };
    match vocabulary.local_name(label) {
        Some(local) => TypeLabel::Known { vocabulary, local },
        None => TypeLabel::Unrecognized,
    }
}

/// Map a comma-separated type list to `rdf:type` triples for `subject`.
pub(crate) fn type_triples(subject: &str, types: &str, ns: &Namespaces) -> Vec<Triple> {
    let rdf_type = ns.rdf_type();
    types
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .filter_map(|label| match classify_label(label) {
            TypeLabel::Known { vocabulary, local } => Some(Triple::new(
                subject,
                rdf_type.clone(),
                format!("{}{local}", vocabulary.namespace(ns)),
            )),
            TypeLabel::Unrecognized => None,
        })
        .collect()
}
