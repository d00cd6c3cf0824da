use confetti::ColorToken;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub box_body: Srgba<f64>,
    pub lid: Srgba<f64>,
    pub ribbon: Srgba<f64>,
    pub brand_mark: Srgba<f64>,
    pub pink: Srgba<f64>,
    pub yellow: Srgba<f64>,
    pub blue: Srgba<f64>,
    pub green: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            box_body: Self::lookup_color(
                context,
                "giftbox_body",
                Srgba::new(0.85, 0.22, 0.33, 1.0),
                None,
            ),
            lid: Self::lookup_color(
                context,
                "giftbox_lid",
                Srgba::new(0.93, 0.3, 0.4, 1.0),
                None,
            ),
            ribbon: Self::lookup_color(
                context,
                "giftbox_ribbon",
                Srgba::new(0.99, 0.82, 0.3, 1.0),
                None,
            ),
            brand_mark: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 0.9),
                Some(0.9),
            ),
            pink: Self::lookup_color(
                context,
                "confetti_pink",
                Srgba::new(0.96, 0.45, 0.71, 1.0),
                None,
            ),
            yellow: Self::lookup_color(
                context,
                "confetti_yellow",
                Srgba::new(0.98, 0.8, 0.21, 1.0),
                None,
            ),
            blue: Self::lookup_color(
                context,
                "confetti_blue",
                Srgba::new(0.23, 0.51, 0.96, 1.0),
                None,
            ),
            green: Self::lookup_color(
                context,
                "confetti_green",
                Srgba::new(0.2, 0.78, 0.45, 1.0),
                None,
            ),
        }
    }

    pub fn confetti(&self, token: ColorToken) -> Srgba<f64> {
        match token {
            ColorToken::Pink => self.pink,
            ColorToken::Yellow => self.yellow,
            ColorToken::Blue => self.blue,
            ColorToken::Green => self.green,
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color confetti_pink #f472b6;
@define-color confetti_yellow #facc15;
@define-color confetti_blue #3b82f6;
@define-color confetti_green #34d399;

.giftbox-window {
    background-image: linear-gradient(135deg, #fdf2f8, #ede9fe);
}
.giftbox-drawing-area {
    background: none;
    background-color: transparent;
}
.giftbox-reset {
    border-radius: 9999px;
}
.giftbox-hint {
    font-size: 1.2em;
    opacity: 0.75;
}
.giftbox-title {
    font-size: 2.4em;
    font-weight: bold;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
