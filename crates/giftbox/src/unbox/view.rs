use super::layout::{BoxLayout, Point, Rect};
use super::model::{Snapshot, Transform};
use crate::gui::assets::Assets;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use confetti::{Particle, ParticleKind, ParticlePose};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;

pub const SPECK_RADIUS: f64 = 6.0;
pub const GLYPH_FONT_SIZE: f64 = 24.0;
pub const BRAND_MARK_SIZE: f64 = 32.0;
pub const RIBBON_WIDTH: f64 = 0.14; // fraction of part width

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Paints `pixbuf` stretched over `rect` in the current user space.
fn paint_image(cr: &Context, pixbuf: &Pixbuf, rect: Rect) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.translate(rect.x, rect.y);
    cr.scale(
        rect.width / pixbuf.width() as f64,
        rect.height / pixbuf.height() as f64,
    );
    cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
    cr.paint()?;
    cr.restore()
}

/// One animatable half of the box (body or lid).
struct PartRenderer<'a> {
    rect: Rect,
    transform: Transform,
    pivot: Point,
    image: Option<&'a Pixbuf>,
    fill: Srgba<f64>,
    ribbon: Srgba<f64>,
}

impl PartRenderer<'_> {
    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        cr.save()?;
        cr.translate(self.pivot.x, self.pivot.y + self.transform.y);
        cr.rotate(self.transform.rotate.to_radians());
        cr.scale(self.transform.scale, self.transform.scale);
        cr.translate(-self.pivot.x, -self.pivot.y);

        match self.image {
            Some(pixbuf) => paint_image(cr, pixbuf, self.rect)?,
            None => self.draw_fallback(cr)?,
        }
        cr.restore()
    }

    fn draw_fallback(&self, cr: &Context) -> Result<(), cairo::Error> {
        let r = self.rect;
        set_color(cr, self.fill);
        cr.rectangle(r.x, r.y, r.width, r.height);
        cr.fill()?;

        let stripe = r.width * RIBBON_WIDTH;
        set_color(cr, self.ribbon);
        cr.rectangle(r.x + (r.width - stripe) / 2.0, r.y, stripe, r.height);
        cr.fill()
    }
}

struct ParticleRenderer<'a> {
    particle: &'a Particle,
    pose: ParticlePose,
}

impl ParticleRenderer<'_> {
    fn draw(
        &self,
        cr: &Context,
        surface: (f64, f64),
        assets: &Assets,
        colors: &ThemeColors,
    ) -> Result<(), cairo::Error> {
        let (width, height) = surface;
        cr.save()?;
        cr.translate(
            self.pose.x as f64 / 100.0 * width,
            self.pose.y as f64 / 100.0 * height,
        );
        cr.rotate((self.pose.rotation as f64).to_radians());
        cr.scale(self.pose.scale as f64, self.pose.scale as f64);

        match self.particle.kind {
            ParticleKind::Speck { color } => {
                set_color(cr, colors.confetti(color));
                cr.arc(0.0, 0.0, SPECK_RADIUS, 0.0, 2.0 * PI);
                cr.fill()?;
            }
            ParticleKind::Glyph { letter, color } => {
                set_color(cr, colors.confetti(color));
                cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
                cr.set_font_size(GLYPH_FONT_SIZE);
                let text = letter.to_string();
                if let Ok(ext) = cr.text_extents(&text) {
                    cr.move_to(-ext.width() / 2.0, ext.height() / 2.0);
                    cr.show_text(&text)?;
                }
            }
            ParticleKind::BrandMark => {
                let half = BRAND_MARK_SIZE / 2.0;
                match &assets.brand_mark {
                    Some(pixbuf) => paint_image(
                        cr,
                        pixbuf,
                        Rect {
                            x: -half,
                            y: -half,
                            width: BRAND_MARK_SIZE,
                            height: BRAND_MARK_SIZE,
                        },
                    )?,
                    None => {
                        set_color(cr, colors.brand_mark);
                        cr.arc(0.0, 0.0, half, 0.0, 2.0 * PI);
                        cr.fill()?;
                    }
                }
            }
        }
        cr.restore()
    }
}

/// Renders one snapshot. Pure with respect to its inputs; the controller is
/// never touched from here.
pub fn draw(
    cr: &Context,
    snapshot: &Snapshot,
    surface: (f64, f64),
    assets: &Assets,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let layout = BoxLayout::fit(surface.0, surface.1);
    let body = layout.body();
    let lid = layout.lid();

    PartRenderer {
        rect: body,
        transform: snapshot.body,
        pivot: Point::new(body.x + body.width / 2.0, body.y + body.height / 2.0),
        image: assets.body.as_ref(),
        fill: colors.box_body,
        ribbon: colors.ribbon,
    }
    .draw(cr)?;

    PartRenderer {
        rect: lid,
        transform: snapshot.lid,
        pivot: lid.bottom_center(),
        image: assets.lid.as_ref(),
        fill: colors.lid,
        ribbon: colors.ribbon,
    }
    .draw(cr)?;

    let elapsed = snapshot.revealed_for.as_secs_f32();
    for particle in snapshot.visible_particles() {
        if let Some(pose) = particle.pose_at(elapsed) {
            ParticleRenderer { particle, pose }.draw(cr, surface, assets, colors)?;
        }
    }
    Ok(())
}
