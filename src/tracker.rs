use chrono::Utc;
use reqwest::Url;
use uuid::Uuid;

use crate::{
    emitter::Emitter,
    envelope::{self, SelfDescribingJson},
    payload::Payload,
    subject::Subject,
    Error, Result, TrackerConfig,
};

/// Tracker version reported in the `tv` parameter of every event.
pub(crate) const TRACKER_VERSION: &str = concat!("rust-", env!("CARGO_PKG_VERSION"));

/// Collector ingestion path for GET requests.
const COLLECTOR_PATH: &str = "/i";

/// A tracker bound to one collector endpoint.
///
/// In order to create a tracker instance, first create [`TrackerConfig`].
///
/// # Examples
/// ```
/// # use snowplow_tracker::TrackerConfig;
/// let mut tracker = TrackerConfig::new("collector.example.com", "cf", "app-1")
///     .to_tracker()?;
///
/// tracker.set_user_id("jacob");
/// tracker.track_page_view("http://www.example.com", Some("example page"), None, &[])?;
/// # Ok::<(), snowplow_tracker::Error>(())
/// ```
///
/// Tracking calls do not block: each one assembles its parameter set
/// synchronously and hands it to a background dispatch. Completion is
/// observed through the configured
/// [`CompletionNotifier`](crate::CompletionNotifier), not through the
/// call's return value.
pub struct Tracker {
    namespace: String,
    app_id: String,
    subject: Subject,
    emitter: Emitter,
}

/// One line item of an e-commerce transaction.
///
/// Each item is dispatched as a separate `ti` event alongside the parent
/// transaction event, with its own contexts and its own generated event
/// id and timestamp.
#[derive(Debug, Clone)]
pub struct TransactionItem {
    /// Stock keeping unit. Required.
    pub sku: String,
    /// Human-readable item name.
    pub name: String,
    /// Item category.
    pub category: Option<String>,
    /// Price of a single unit.
    pub price: f64,
    /// Number of units purchased.
    pub quantity: i64,
    /// Custom contexts attached to this item's event.
    pub contexts: Vec<SelfDescribingJson>,
}

impl Tracker {
    pub(crate) fn new(config: TrackerConfig) -> Result<Self> {
        // The scheme is fixed here for the tracker's lifetime.
        let scheme = if config.encrypt_transport { "https" } else { "http" };
        let collector = Url::parse(&format!(
            "{}://{}{}",
            scheme, config.collector_host, COLLECTOR_PATH
        ))
        .map_err(Error::InvalidCollectorEndpoint)?;

        Ok(Tracker {
            namespace: config.namespace,
            app_id: config.app_id,
            subject: Subject::default(),
            emitter: Emitter::new(collector, config.notifier),
        })
    }

    #[cfg(test)]
    pub(crate) fn new_with_emitter(
        namespace: impl Into<String>,
        app_id: impl Into<String>,
        emitter: Emitter,
    ) -> Self {
        Tracker {
            namespace: namespace.into(),
            app_id: app_id.into(),
            subject: Subject::default(),
            emitter,
        }
    }

    #[cfg(test)]
    pub(crate) fn collector(&self) -> &Url {
        self.emitter.collector()
    }

    /// Track a visit to a web page.
    ///
    /// `url` is required; `page` (the page title) and `referrer` are
    /// optional.
    pub fn track_page_view(
        &self,
        url: &str,
        page: Option<&str>,
        referrer: Option<&str>,
        contexts: &[SelfDescribingJson],
    ) -> Result<()> {
        if url.is_empty() {
            return Err(Error::MissingField("url"));
        }

        let mut payload = self.assemble("pv");
        payload.add("url", url);
        payload.add_opt("page", page);
        payload.add_opt("refr", referrer);
        Self::attach_contexts(&mut payload, contexts)?;

        log::trace!(target: "snowplow", url; "tracking page view");
        self.emitter.send(payload)
    }

    /// Track a custom event with the five classic category/action/label/
    /// property/value fields.
    pub fn track_struct_event(
        &self,
        category: &str,
        action: &str,
        label: Option<&str>,
        property: Option<&str>,
        value: Option<f64>,
        contexts: &[SelfDescribingJson],
    ) -> Result<()> {
        if category.is_empty() {
            return Err(Error::MissingField("category"));
        }
        if action.is_empty() {
            return Err(Error::MissingField("action"));
        }

        let mut payload = self.assemble("se");
        payload.add("se_ca", category);
        payload.add("se_ac", action);
        payload.add_opt("se_la", label);
        payload.add_opt("se_pr", property);
        payload.add_opt_num("se_va", value);
        Self::attach_contexts(&mut payload, contexts)?;

        log::trace!(target: "snowplow", category, action; "tracking structured event");
        self.emitter.send(payload)
    }

    /// Track a self-describing event with an arbitrary schema-tagged
    /// payload.
    ///
    /// The payload is wrapped under the fixed unstructured-event schema
    /// and carried as serialized JSON in the `ue_pr` parameter. Its shape
    /// is not validated.
    pub fn track_unstruct_event(
        &self,
        event: SelfDescribingJson,
        contexts: &[SelfDescribingJson],
    ) -> Result<()> {
        let mut payload = self.assemble("ue");
        payload.add("ue_pr", envelope::wrap_unstruct(&event)?);
        Self::attach_contexts(&mut payload, contexts)?;

        log::trace!(target: "snowplow", schema = event.schema.as_str(); "tracking unstructured event");
        self.emitter.send(payload)
    }

    /// Track a screen view, a convenience wrapper over
    /// [`Tracker::track_unstruct_event`] for non-web platforms.
    ///
    /// `name` is required; `id` is an optional screen identifier and is
    /// left out of the payload entirely when absent.
    pub fn track_screen_view(
        &self,
        name: &str,
        id: Option<&str>,
        contexts: &[SelfDescribingJson],
    ) -> Result<()> {
        if name.is_empty() {
            return Err(Error::MissingField("name"));
        }

        let mut data = serde_json::Map::new();
        data.insert("name".to_owned(), name.into());
        if let Some(id) = id {
            data.insert("id".to_owned(), id.into());
        }
        let event = SelfDescribingJson::new(
            envelope::SCREEN_VIEW_SCHEMA,
            serde_json::Value::Object(data),
        );
        self.track_unstruct_event(event, contexts)
    }

    /// Track an e-commerce transaction.
    ///
    /// Dispatches one `tr` event for the transaction itself plus one
    /// independent `ti` event per line item, each carrying the parent
    /// `order_id` and `currency`, the item's own contexts, and a fresh
    /// event id and timestamp. The N+1 dispatches complete independently
    /// and in no guaranteed order.
    #[allow(clippy::too_many_arguments)]
    pub fn track_ecommerce_transaction(
        &self,
        order_id: &str,
        affiliation: Option<&str>,
        total_value: f64,
        tax_value: Option<f64>,
        shipping: Option<f64>,
        city: Option<&str>,
        state: Option<&str>,
        country: Option<&str>,
        currency: Option<&str>,
        items: &[TransactionItem],
        contexts: &[SelfDescribingJson],
    ) -> Result<()> {
        if order_id.is_empty() {
            return Err(Error::MissingField("order_id"));
        }
        // Validate all items up front so nothing is dispatched for a
        // partially-invalid call.
        for item in items {
            if item.sku.is_empty() {
                return Err(Error::MissingField("sku"));
            }
        }

        let mut payload = self.assemble("tr");
        payload.add("tr_id", order_id);
        payload.add_opt("tr_af", affiliation);
        payload.add_num("tr_tt", total_value);
        payload.add_opt_num("tr_tx", tax_value);
        payload.add_opt_num("tr_sh", shipping);
        payload.add_opt("tr_ci", city);
        payload.add_opt("tr_st", state);
        payload.add_opt("tr_co", country);
        payload.add_opt("tr_cu", currency);
        Self::attach_contexts(&mut payload, contexts)?;

        log::trace!(target: "snowplow", order_id, item_count = items.len(); "tracking ecommerce transaction");
        self.emitter.send(payload)?;

        for item in items {
            self.track_transaction_item(order_id, currency, item)?;
        }
        Ok(())
    }

    fn track_transaction_item(
        &self,
        order_id: &str,
        currency: Option<&str>,
        item: &TransactionItem,
    ) -> Result<()> {
        let mut payload = self.assemble("ti");
        payload.add("ti_id", order_id);
        payload.add("ti_sk", &item.sku);
        payload.add("ti_nm", &item.name);
        payload.add_opt("ti_ca", item.category.as_deref());
        payload.add_num("ti_pr", item.price);
        payload.add_num("ti_qu", item.quantity);
        payload.add_opt("ti_cu", currency);
        Self::attach_contexts(&mut payload, &item.contexts)?;

        self.emitter.send(payload)
    }

    /// Set the platform events are reported from (e.g. `"web"`, `"mob"`,
    /// `"srv"`).
    pub fn set_platform(&mut self, platform: impl Into<String>) {
        self.subject.platform = Some(platform.into());
    }

    /// Set the business user id attached to subsequent events.
    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.subject.user_id = Some(user_id.into());
    }

    /// Set the device screen resolution in pixels.
    pub fn set_screen_resolution(&mut self, width: u32, height: u32) {
        self.subject.screen_resolution = Some((width, height));
    }

    /// Set the browser viewport size in pixels.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.subject.viewport = Some((width, height));
    }

    /// Set the screen color depth in bits per pixel.
    pub fn set_color_depth(&mut self, depth: u32) {
        self.subject.color_depth = Some(depth);
    }

    /// Set the subject's timezone (e.g. `"Europe/London"`).
    pub fn set_timezone(&mut self, timezone: impl Into<String>) {
        self.subject.timezone = Some(timezone.into());
    }

    /// Start a parameter set with everything every event carries: the
    /// event type code, tracker identity, a fresh event id, the assembly
    /// timestamp, and the current subject context.
    fn assemble(&self, event_type: &'static str) -> Payload {
        let mut payload = Payload::new();
        payload.add("e", event_type);
        payload.add("tv", TRACKER_VERSION);
        payload.add("tna", &self.namespace);
        payload.add("aid", &self.app_id);
        payload.add("eid", Uuid::new_v4().to_string());
        payload.add_num("dtm", Utc::now().timestamp_millis());
        self.subject.add_to(&mut payload);
        payload
    }

    fn attach_contexts(payload: &mut Payload, contexts: &[SelfDescribingJson]) -> Result<()> {
        if let Some(wrapped) = envelope::wrap_contexts(contexts)? {
            payload.add("co", wrapped);
        }
        Ok(())
    }
}
