use serde::Deserialize;
use url::form_urlencoded;

use crate::{Annotation, Result, SpaceGraphConfig, SpaceGraphError, fallback_uri};

/// Resolves free text to ranked linked-data resources.
pub(crate) trait Annotator {
    /// `types` restricts matches to one vocabulary type (e.g.
    /// `DBpedia:Astronaut`). An empty result means nothing cleared the
    /// confidence threshold.
    fn annotate(&self, text: &str, types: Option<&str>) -> Result<Vec<Annotation>>;
}

/// DBpedia Spotlight `annotate` endpoint.
pub(crate) struct SpotlightClient {
    agent: ureq::Agent,
    url: String,
    confidence: f64,
}

impl SpotlightClient {
    pub(crate) fn new(agent: ureq::Agent, url: impl Into<String>, confidence: f64) -> Self {
        Self {
            agent,
            url: url.into(),
            confidence,
        }
    }
}

// Spotlight answers `{"Resources": [{"@URI": .., "@types": ..}]}` and omits
// `Resources` entirely when nothing matched. Some proxies flatten this to a
// bare array with unprefixed keys; accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SpotlightBody {
    Bare(Vec<SpotlightResource>),
    Document {
        #[serde(rename = "Resources", default)]
        resources: Option<Vec<SpotlightResource>>,
    },
}

#[derive(Debug, Deserialize)]
struct SpotlightResource {
    #[serde(rename = "@URI", alias = "URI")]
    uri: String,
    #[serde(rename = "@types", alias = "types", default)]
    types: String,
    #[serde(rename = "@surfaceForm", alias = "surfaceForm", default)]
    surface_form: Option<serde_json::Value>,
    #[serde(rename = "@similarityScore", alias = "similarityScore", default)]
    similarity_score: Option<serde_json::Value>,
}

impl From<SpotlightResource> for Annotation {
    fn from(res: SpotlightResource) -> Self {
        // Spotlight encodes numbers as strings.
        let similarity = res.similarity_score.and_then(|v| match v {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        });
        let surface_form = res.surface_form.map(|v| match v {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });
        Annotation {
            surface_form,
            similarity,
            ..Annotation::new(res.uri, res.types)
        }
    }
}

pub(crate) fn parse_spotlight_body(body: &str) -> Result<Vec<Annotation>> {
    let parsed: SpotlightBody = serde_json::from_str(body)?;
    let resources = match parsed {
        SpotlightBody::Bare(items) => items,
        SpotlightBody::Document { resources } => resources.unwrap_or_default(),
    };
    Ok(resources.into_iter().map(Annotation::from).collect())
}

impl Annotator for SpotlightClient {
    fn annotate(&self, text: &str, types: Option<&str>) -> Result<Vec<Annotation>> {
        let mut form = form_urlencoded::Serializer::new(String::new());
        form.append_pair("text", text)
            .append_pair("confidence", &self.confidence.to_string());
        if let Some(types) = types {
            form.append_pair("types", types);
        }
        let payload = form.finish();
        tracing::debug!(url = %self.url, text, ?types, "annotating");
        let resp = self
            .agent
            .post(&self.url)
            .set("accept", "application/json")
            .set("content-type", "application/x-www-form-urlencoded")
            .send_string(&payload)
            .map_err(|e| SpaceGraphError::from_ureq(&self.url, e))?;
        let body = resp.into_string().map_err(|e| SpaceGraphError::Http {
            url: self.url.clone(),
            message: e.to_string(),
        })?;
        parse_spotlight_body(&body)
    }
}

/// Annotate `text`, substituting a single local fallback annotation when the
/// service fails or returns nothing. The fallback carries the requested type,
/// or the astronaut type when no filter was given.
pub(crate) fn annotate_or_fallback(
    annotator: &dyn Annotator,
    config: &SpaceGraphConfig,
    text: &str,
    types: Option<&str>,
) -> Vec<Annotation> {
    let err = match annotator.annotate(text, types) {
        Ok(found) if !found.is_empty() => return found,
        Ok(_) => SpaceGraphError::NoMatch {
            text: text.to_string(),
        },
        Err(err) => err,
    };
    let uri = fallback_uri(&config.namespaces.ex, text);
    tracing::warn!(%err, fallback = %uri, "annotation failed, using local identifier");
    vec![Annotation::fallback(
        uri,
        types.unwrap_or(config.astronaut_type.as_str()),
    )]
}
