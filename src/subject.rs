use crate::payload::Payload;

/// Mutable per-tracker subject context.
///
/// Values persist across tracking calls until overwritten and are read
/// once, at event-assembly time. Owned exclusively by the tracker
/// instance.
#[derive(Debug, Clone, Default)]
pub(crate) struct Subject {
    pub(crate) platform: Option<String>,
    pub(crate) user_id: Option<String>,
    pub(crate) screen_resolution: Option<(u32, u32)>,
    pub(crate) viewport: Option<(u32, u32)>,
    pub(crate) color_depth: Option<u32>,
    pub(crate) timezone: Option<String>,
}

impl Subject {
    /// Copy the currently-set subject fields into an event payload.
    pub(crate) fn add_to(&self, payload: &mut Payload) {
        payload.add_opt("p", self.platform.as_deref());
        payload.add_opt("uid", self.user_id.as_deref());
        if let Some((width, height)) = self.screen_resolution {
            payload.add_dimensions("res", width, height);
        }
        if let Some((width, height)) = self.viewport {
            payload.add_dimensions("vp", width, height);
        }
        payload.add_opt_num("cd", self.color_depth);
        payload.add_opt("tz", self.timezone.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::Subject;
    use crate::payload::Payload;

    #[test]
    fn unset_subject_contributes_nothing() {
        let mut payload = Payload::new();
        Subject::default().add_to(&mut payload);

        assert_eq!(payload.len(), 0);
    }

    #[test]
    fn set_fields_are_copied_into_the_payload() {
        let subject = Subject {
            platform: Some("web".to_owned()),
            user_id: Some("jacob".to_owned()),
            screen_resolution: Some((400, 200)),
            viewport: Some((500, 800)),
            color_depth: Some(24),
            timezone: Some("Europe/London".to_owned()),
        };

        let mut payload = Payload::new();
        subject.add_to(&mut payload);

        assert_eq!(payload.get("p"), Some("web"));
        assert_eq!(payload.get("uid"), Some("jacob"));
        assert_eq!(payload.get("res"), Some("400x200"));
        assert_eq!(payload.get("vp"), Some("500x800"));
        assert_eq!(payload.get("cd"), Some("24"));
        assert_eq!(payload.get("tz"), Some("Europe/London"));
    }
}
