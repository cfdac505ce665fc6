use std::sync::Arc;

use reqwest::Url;

use crate::{payload::Payload, Error, Result};

/// Response metadata for one completed collector request.
#[derive(Debug, Clone)]
pub struct CollectorResponse {
    /// HTTP status code returned by the collector.
    pub status: u16,
}

/// A trait for observing completion of outbound collector requests.
///
/// The notifier is invoked exactly once per outbound request, on the
/// request's own dispatch thread, with the unmodified transport outcome:
/// [`CollectorResponse`] metadata on success, or the transport error. The
/// tracker never retries, so a failure reported here is final for that
/// event.
///
/// Completions of concurrently in-flight requests may arrive in any
/// order. Implementations should return quickly and must not panic.
///
/// The trait is implemented for closures:
///
/// ```
/// # use snowplow_tracker::TrackerConfig;
/// let config = TrackerConfig::new("collector.example.com", "cf", "app-1")
///     .completion_notifier(|outcome| {
///         println!("{:?}", outcome);
///     });
/// ```
pub trait CompletionNotifier {
    /// Called once per outbound request with the transport outcome.
    fn on_completion(&self, outcome: Result<CollectorResponse>);
}

pub(crate) struct NoopNotifier;
impl CompletionNotifier for NoopNotifier {
    fn on_completion(&self, _outcome: Result<CollectorResponse>) {}
}

impl<T: Fn(Result<CollectorResponse>)> CompletionNotifier for T {
    fn on_completion(&self, outcome: Result<CollectorResponse>) {
        self(outcome);
    }
}

/// The transport performing the actual request. Production uses a
/// blocking reqwest client; tests substitute a recording fake.
pub(crate) trait Transport: Send + Sync {
    fn get(&self, url: &Url) -> Result<CollectorResponse>;
}

struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<CollectorResponse> {
        let response = self.client.get(url.clone()).send()?;
        Ok(CollectorResponse {
            status: response.status().as_u16(),
        })
    }
}

/// Sends assembled payloads to the collector, one GET request per event.
pub(crate) struct Emitter {
    collector: Url,
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn CompletionNotifier + Send + Sync>,
}

impl Emitter {
    pub(crate) fn new(
        collector: Url,
        notifier: Arc<dyn CompletionNotifier + Send + Sync>,
    ) -> Self {
        Emitter {
            collector,
            transport: Arc::new(HttpTransport {
                client: reqwest::blocking::Client::new(),
            }),
            notifier,
        }
    }

    #[cfg(test)]
    pub(crate) fn new_with_transport(
        collector: Url,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn CompletionNotifier + Send + Sync>,
    ) -> Self {
        Emitter {
            collector,
            transport,
            notifier,
        }
    }

    #[cfg(test)]
    pub(crate) fn collector(&self) -> &Url {
        &self.collector
    }

    /// Dispatch one event without blocking the caller.
    ///
    /// The payload is serialized into the request URL synchronously, so
    /// the event is fully determined before this function returns. The
    /// request itself runs on a background thread and reports through the
    /// completion notifier.
    pub(crate) fn send(&self, payload: Payload) -> Result<()> {
        let url = Url::parse_with_params(self.collector.as_str(), payload.iter())
            .map_err(Error::InvalidCollectorEndpoint)?;

        log::debug!(target: "snowplow", url = url.as_str(); "dispatching event to collector");

        let transport = Arc::clone(&self.transport);
        let notifier = Arc::clone(&self.notifier);
        std::thread::Builder::new()
            .name("snowplow-emitter".to_owned())
            .spawn(move || {
                let outcome = transport.get(&url);
                if let Err(err) = &outcome {
                    log::warn!(target: "snowplow", "error sending event to collector: {:?}", err);
                }
                notifier.on_completion(outcome);
            })?;

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use reqwest::Url;

    use super::test_support::{CompletionLatch, RecordingTransport};
    use super::Emitter;
    use crate::payload::Payload;
    use crate::Error;

    fn collector() -> Url {
        Url::parse("http://collector.example.com/i").unwrap()
    }

    fn query_map(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn sends_payload_as_collector_query_string() {
        let transport = Arc::new(RecordingTransport::ok());
        let latch = Arc::new(CompletionLatch::new());
        let emitter = Emitter::new_with_transport(collector(), transport.clone(), latch.clone());

        let mut payload = Payload::new();
        payload.add("e", "pv");
        payload.add("url", "http://www.example.com");
        emitter.send(payload).unwrap();

        latch.wait_for(1);
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].host_str(), Some("collector.example.com"));
        assert_eq!(requests[0].path(), "/i");

        let query = query_map(&requests[0]);
        assert_eq!(query["e"], "pv");
        assert_eq!(query["url"], "http://www.example.com");
    }

    #[test]
    fn query_string_round_trips_reserved_characters() {
        let transport = Arc::new(RecordingTransport::ok());
        let latch = Arc::new(CompletionLatch::new());
        let emitter = Emitter::new_with_transport(collector(), transport.clone(), latch.clone());

        let mut payload = Payload::new();
        payload.add("page", "a page & a half = 100% ?");
        payload.add("url", "http://www.example.com/search?q=caf\u{e9}+crema");
        payload.add("tz", "Europe/London");
        emitter.send(payload.clone()).unwrap();

        latch.wait_for(1);
        let decoded = query_map(&transport.requests()[0]);
        let original: HashMap<String, String> = payload
            .iter()
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect();
        assert_eq!(decoded, original);
    }

    #[test]
    fn notifies_success_once_per_request() {
        let transport = Arc::new(RecordingTransport::ok());
        let latch = Arc::new(CompletionLatch::new());
        let emitter = Emitter::new_with_transport(collector(), transport.clone(), latch.clone());

        for n in 0..3 {
            let mut payload = Payload::new();
            payload.add_num("dtm", n);
            emitter.send(payload).unwrap();
        }

        let outcomes = latch.wait_for(3);
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes
            .iter()
            .all(|outcome| outcome.as_ref().unwrap().status == 200));
        assert_eq!(transport.requests().len(), 3);
    }

    #[test]
    fn transport_failures_pass_through_unmodified() {
        let failure = Error::Io(Arc::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )));
        let transport = Arc::new(RecordingTransport::failing(failure));
        let latch = Arc::new(CompletionLatch::new());
        let emitter = Emitter::new_with_transport(collector(), transport, latch.clone());

        let mut payload = Payload::new();
        payload.add("e", "pv");
        emitter.send(payload).unwrap();

        let outcomes = latch.wait_for(1);
        assert!(matches!(outcomes[0], Err(Error::Io(_))));
    }
}
