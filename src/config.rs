use std::sync::Arc;

use crate::{
    emitter::{CompletionNotifier, NoopNotifier},
    Result, Tracker,
};

/// Configuration for [`Tracker`].
///
/// # Examples
/// ```
/// # use snowplow_tracker::TrackerConfig;
/// let tracker = TrackerConfig::new("collector.example.com", "cf", "app-1")
///     .encrypt_transport(true)
///     .completion_notifier(|outcome| {
///         println!("{:?}", outcome);
///     })
///     .to_tracker()?;
/// # Ok::<(), snowplow_tracker::Error>(())
/// ```
pub struct TrackerConfig {
    pub(crate) collector_host: String,
    pub(crate) namespace: String,
    pub(crate) app_id: String,
    pub(crate) encrypt_transport: bool,
    pub(crate) notifier: Arc<dyn CompletionNotifier + Send + Sync>,
}

impl TrackerConfig {
    /// Create a tracker configuration from the collector host, the
    /// tracker namespace, and the application id.
    ///
    /// ```
    /// # use snowplow_tracker::TrackerConfig;
    /// TrackerConfig::new("collector.example.com", "cf", "app-1");
    /// ```
    pub fn new(
        collector_host: impl Into<String>,
        namespace: impl Into<String>,
        app_id: impl Into<String>,
    ) -> Self {
        TrackerConfig {
            collector_host: collector_host.into(),
            namespace: namespace.into(),
            app_id: app_id.into(),
            encrypt_transport: false,
            notifier: Arc::new(NoopNotifier),
        }
    }

    /// Send events over HTTPS instead of HTTP. The scheme is selected
    /// once, at tracker construction, and is fixed for the tracker's
    /// lifetime.
    pub fn encrypt_transport(mut self, encrypt: bool) -> Self {
        self.encrypt_transport = encrypt;
        self
    }

    /// Set the notifier invoked once per outbound collector request with
    /// its completion outcome.
    pub fn completion_notifier(
        mut self,
        notifier: impl CompletionNotifier + Send + Sync + 'static,
    ) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Create a new [`Tracker`] using this configuration.
    ///
    /// Fails if the collector host does not form a valid endpoint URL.
    pub fn to_tracker(self) -> Result<Tracker> {
        Tracker::new(self)
    }
}
