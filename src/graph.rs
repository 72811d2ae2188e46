use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::Triple;

/// In-memory set of triples. Keeps first-insertion order alongside the set
/// so callers can see the sequence facts were added in.
#[derive(Debug, Default, Clone)]
pub(crate) struct TripleStore {
    seen: HashSet<Triple>,
    order: Vec<Triple>,
}

impl TripleStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns false when the triple was already present.
    pub(crate) fn insert(&mut self, triple: Triple) -> bool {
        if self.seen.contains(&triple) {
            return false;
        }
        self.seen.insert(triple.clone());
        self.order.push(triple);
        true
    }

    pub(crate) fn extend(&mut self, triples: impl IntoIterator<Item = Triple>) {
        for triple in triples {
            self.insert(triple);
        }
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, subject: &str, predicate: &str, object: &str) -> bool {
        self.seen
            .contains(&Triple::new(subject, predicate, object))
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[cfg(test)]
    /// Triples in the order they were first inserted.
    pub(crate) fn insertion_order(&self) -> &[Triple] {
        &self.order
    }

    #[cfg(test)]
    pub(crate) fn position(&self, triple: &Triple) -> Option<usize> {
        self.order.iter().position(|t| t == triple)
    }

    #[cfg(test)]
    pub(crate) fn to_set(&self) -> BTreeSet<Triple> {
        self.order.iter().cloned().collect()
    }

    pub(crate) fn subjects(&self) -> BTreeSet<&str> {
        self.order.iter().map(|t| t.subject.as_str()).collect()
    }

    pub(crate) fn with_predicate<'a>(&'a self, predicate: &'a str) -> impl Iterator<Item = &'a Triple> {
        self.order.iter().filter(move |t| t.predicate == predicate)
    }

    /// Sorted `subject -> predicate -> objects` view used by the writers.
    pub(crate) fn grouped(&self) -> BTreeMap<&str, BTreeMap<&str, BTreeSet<&str>>> {
        let mut out: BTreeMap<&str, BTreeMap<&str, BTreeSet<&str>>> = BTreeMap::new();
        for t in &self.order {
            out.entry(t.subject.as_str())
                .or_default()
                .entry(t.predicate.as_str())
                .or_default()
                .insert(t.object.as_str());
        }
        out
    }
}

impl FromIterator<Triple> for TripleStore {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut store = TripleStore::new();
        store.extend(iter);
        store
    }
}
