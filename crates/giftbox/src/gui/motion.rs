use gtk::prelude::*;
use gtk4 as gtk;

/// Follows the desktop's "enable animations" setting. Reduced motion means
/// animations are disabled.
pub struct MotionSource {
    settings: Option<gtk::Settings>,
    handler: Option<glib::SignalHandlerId>,
}

impl MotionSource {
    pub fn subscribe(on_change: impl Fn(bool) + 'static) -> Self {
        let Some(settings) = gtk::Settings::default() else {
            log::debug!("GTK settings unavailable, assuming full motion");
            return Self {
                settings: None,
                handler: None,
            };
        };

        let handler = settings.connect_gtk_enable_animations_notify(move |s| {
            on_change(!s.is_gtk_enable_animations());
        });

        Self {
            settings: Some(settings),
            handler: Some(handler),
        }
    }

    pub fn system_reduced(&self) -> bool {
        self.settings
            .as_ref()
            .is_some_and(|s| !s.is_gtk_enable_animations())
    }
}

impl Drop for MotionSource {
    fn drop(&mut self) {
        if let (Some(settings), Some(handler)) = (&self.settings, self.handler.take()) {
            settings.disconnect(handler);
        }
    }
}
