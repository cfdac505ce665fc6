use std::collections::BTreeMap;
use std::fmt::Display;

/// The canonical flat key-value form of a single event.
///
/// Keys are the short collector parameter names (`e`, `url`, `se_ca`, ...),
/// values are their string-encoded form. Percent-encoding is not applied
/// here; the emitter encodes values when it builds the request URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Payload {
    pairs: BTreeMap<&'static str, String>,
}

impl Payload {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a string parameter. Empty values are omitted entirely rather
    /// than sent as `key=`.
    pub(crate) fn add(&mut self, key: &'static str, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.pairs.insert(key, value);
        }
    }

    /// Add an optional string parameter, omitting it when absent.
    pub(crate) fn add_opt(&mut self, key: &'static str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.add(key, value);
        }
    }

    /// Add a numeric parameter in its plain decimal string form.
    pub(crate) fn add_num(&mut self, key: &'static str, value: impl Display) {
        self.pairs.insert(key, value.to_string());
    }

    /// Add an optional numeric parameter, omitting it when absent.
    pub(crate) fn add_opt_num(&mut self, key: &'static str, value: Option<impl Display>) {
        if let Some(value) = value {
            self.add_num(key, value);
        }
    }

    /// Add a `<width>x<height>` dimension pair (screen resolution, viewport).
    pub(crate) fn add_dimensions(&mut self, key: &'static str, width: u32, height: u32) {
        self.pairs.insert(key, format!("{width}x{height}"));
    }

    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.pairs.iter().map(|(key, value)| (*key, value.as_str()))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.pairs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::Payload;

    #[test]
    fn numbers_render_in_plain_decimal_form() {
        let mut payload = Payload::new();
        payload.add_num("tr_tt", 15.0);
        payload.add_num("tr_sh", 0.0);
        payload.add_num("ti_pr", 10.5);
        payload.add_num("cd", 24);

        assert_eq!(payload.get("tr_tt"), Some("15"));
        assert_eq!(payload.get("tr_sh"), Some("0"));
        assert_eq!(payload.get("ti_pr"), Some("10.5"));
        assert_eq!(payload.get("cd"), Some("24"));
    }

    #[test]
    fn absent_and_empty_values_are_omitted() {
        let mut payload = Payload::new();
        payload.add("url", "http://www.example.com");
        payload.add("page", "");
        payload.add_opt("refr", None::<&str>);
        payload.add_opt_num("se_va", None::<f64>);

        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("page"), None);
        assert_eq!(payload.get("refr"), None);
        assert_eq!(payload.get("se_va"), None);
    }

    #[test]
    fn dimension_pairs_encode_as_width_x_height() {
        let mut payload = Payload::new();
        payload.add_dimensions("res", 400, 200);
        payload.add_dimensions("vp", 500, 800);

        assert_eq!(payload.get("res"), Some("400x200"));
        assert_eq!(payload.get("vp"), Some("500x800"));
    }

    #[test]
    fn strings_pass_through_unescaped() {
        let mut payload = Payload::new();
        payload.add("url", "http://www.example.com/path?a=b&c=d");

        assert_eq!(payload.get("url"), Some("http://www.example.com/path?a=b&c=d"));
    }

    #[test]
    fn iter_yields_every_added_pair() {
        let mut payload = Payload::new();
        payload.add("e", "pv");
        payload.add("url", "http://www.example.com");

        let pairs: Vec<_> = payload.iter().collect();
        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&("e", "pv")));
        assert!(pairs.contains(&("url", "http://www.example.com")));
    }
}
