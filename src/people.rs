use crate::{PeopleResponse, Record, Result, SpaceGraphError};

/// Source of the current crew list.
pub(crate) trait PeopleSource {
    fn people(&self) -> Result<Vec<Record>>;
}

/// Open Notify `astros.json` client.
pub(crate) struct OpenNotifyClient {
    agent: ureq::Agent,
    url: String,
}

impl OpenNotifyClient {
    pub(crate) fn new(agent: ureq::Agent, url: impl Into<String>) -> Self {
        Self {
            agent,
            url: url.into(),
        }
    }
}

impl PeopleSource for OpenNotifyClient {
    fn people(&self) -> Result<Vec<Record>> {
        tracing::debug!(url = %self.url, "fetching people list");
        let resp = self
            .agent
            .get(&self.url)
            .set("accept", "application/json")
            .call()
            .map_err(|e| SpaceGraphError::from_ureq(&self.url, e))?;
        let body = resp.into_string().map_err(|e| SpaceGraphError::Http {
            url: self.url.clone(),
            message: e.to_string(),
        })?;
        let parsed: PeopleResponse = serde_json::from_str(&body)?;
        tracing::info!(
            count = parsed.people.len(),
            reported = parsed.number.unwrap_or_default(),
            message = parsed.message.as_deref().unwrap_or(""),
            "fetched people list"
        );
        Ok(parsed.people)
    }
}

/// Fixed list, for offline runs and tests.
impl PeopleSource for Vec<Record> {
    fn people(&self) -> Result<Vec<Record>> {
        Ok(self.clone())
    }
}
