#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    pub fn bottom_center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height)
    }
}

pub const MAX_BOX_SIZE: f64 = 400.0;
pub const BOX_WIDTH_FRACTION: f64 = 0.6;
pub const BOX_HEIGHT_FRACTION: f64 = 0.5;
// Vertical center of the box, as a fraction of the surface height
pub const BOX_CENTER_Y: f64 = 0.45;

// Fractions of the box square
pub const BODY_TOP: f64 = 0.3;
pub const LID_TOP: f64 = 0.12;
pub const LID_HEIGHT: f64 = 0.22;
pub const LID_OVERHANG: f64 = 0.04;

/// Where the gift box sits on a drawing surface of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxLayout {
    pub origin: Point,
    pub size: f64,
}

impl BoxLayout {
    pub fn fit(width: f64, height: f64) -> Self {
        let size = (width * BOX_WIDTH_FRACTION)
            .min(height * BOX_HEIGHT_FRACTION)
            .min(MAX_BOX_SIZE)
            .max(0.0);
        Self {
            origin: Point::new((width - size) / 2.0, height * BOX_CENTER_Y - size / 2.0),
            size,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.origin.x,
            y: self.origin.y,
            width: self.size,
            height: self.size,
        }
    }

    pub fn body(&self) -> Rect {
        Rect {
            x: self.origin.x,
            y: self.origin.y + self.size * BODY_TOP,
            width: self.size,
            height: self.size * (1.0 - BODY_TOP),
        }
    }

    /// Lid rest position. It pivots about its bottom center.
    pub fn lid(&self) -> Rect {
        Rect {
            x: self.origin.x - self.size * LID_OVERHANG,
            y: self.origin.y + self.size * LID_TOP,
            width: self.size * (1.0 + 2.0 * LID_OVERHANG),
            height: self.size * LID_HEIGHT,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }
}
