use serde::{Deserialize, Serialize};

use crate::Result;

/// Schema URI of the custom-contexts envelope attached under `co`.
pub(crate) const CONTEXTS_SCHEMA: &str =
    "iglu:com.snowplowanalytics.snowplow/contexts/jsonschema/1-0-0";

/// Schema URI of the unstructured-event envelope attached under `ue_pr`.
pub(crate) const UNSTRUCT_EVENT_SCHEMA: &str =
    "iglu:com.snowplowanalytics.snowplow/unstruct_event/jsonschema/1-0-0";

/// Schema URI of the payload built by [`crate::Tracker::track_screen_view`].
pub(crate) const SCREEN_VIEW_SCHEMA: &str =
    "iglu:com.snowplowanalytics.snowplow/screen_view/jsonschema/1-0-0";

/// A schema-tagged JSON document: an `iglu:` schema URI plus an arbitrary
/// payload.
///
/// Used both for custom context entries and for unstructured-event
/// payloads. The tracker never inspects `data`; it is only serialized and
/// forwarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelfDescribingJson {
    /// The schema URI describing `data`.
    pub schema: String,
    /// The payload itself.
    pub data: serde_json::Value,
}

impl SelfDescribingJson {
    /// Create a schema-tagged document from a schema URI and a payload.
    pub fn new(schema: impl Into<String>, data: serde_json::Value) -> Self {
        SelfDescribingJson {
            schema: schema.into(),
            data,
        }
    }
}

/// The fixed `{schema, data}` wrapper. `schema` always serializes before
/// `data`.
#[derive(Serialize)]
struct Envelope<T: Serialize> {
    schema: &'static str,
    data: T,
}

/// Wrap custom context entries into the serialized contexts envelope.
///
/// Returns `None` when there are no entries, so the `co` parameter is
/// omitted instead of carrying an empty array.
pub(crate) fn wrap_contexts(entries: &[SelfDescribingJson]) -> Result<Option<String>> {
    if entries.is_empty() {
        return Ok(None);
    }
    let envelope = Envelope {
        schema: CONTEXTS_SCHEMA,
        data: entries,
    };
    Ok(Some(serde_json::to_string(&envelope)?))
}

/// Wrap an unstructured-event payload into the serialized unstruct
/// envelope. The payload is trusted to already be a well-formed
/// schema-tagged document.
pub(crate) fn wrap_unstruct(payload: &SelfDescribingJson) -> Result<String> {
    let envelope = Envelope {
        schema: UNSTRUCT_EVENT_SCHEMA,
        data: payload,
    };
    Ok(serde_json::to_string(&envelope)?)
}
