use crate::config::AssetsConfig;
use gdk_pixbuf::Pixbuf;
use std::path::Path;

/// Host-resolved images. Any of them may be missing, in which case the
/// renderer falls back to drawn shapes.
#[derive(Default)]
pub struct Assets {
    pub body: Option<Pixbuf>,
    pub lid: Option<Pixbuf>,
    pub brand_mark: Option<Pixbuf>,
}

impl Assets {
    pub fn load(config: &AssetsConfig) -> Self {
        Self {
            body: Self::load_image(config.box_body.as_deref(), "box body"),
            lid: Self::load_image(config.lid.as_deref(), "lid"),
            brand_mark: Self::load_image(config.brand_mark.as_deref(), "brand mark"),
        }
    }

    fn load_image(path: Option<&Path>, what: &str) -> Option<Pixbuf> {
        let path = path?;
        Pixbuf::from_file(path)
            .map_err(|e| log::warn!("Failed to load {} image {}: {}", what, path.display(), e))
            .ok()
    }
}
