use opencv::core::Rect;

/// Axis-aligned pixel rectangle believed to contain text.
///
/// `x0 < x1` and `y0 < y1` hold for every region produced by detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Region {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// The equivalent OpenCV rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x0, self.y0, self.width(), self.height())
    }
}

impl From<Rect> for Region {
    // A rect poking past the top/left edge is shrunk to the visible part,
    // never shifted onto pixels the contour did not cover.
    fn from(rect: Rect) -> Self {
        Self {
            x0: rect.x.max(0),
            y0: rect.y.max(0),
            x1: rect.x + rect.width,
            y1: rect.y + rect.height,
        }
    }
}

/// Recognized text for a single region. The text is never empty or
/// whitespace-only; blank recognitions are dropped upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionText {
    pub region: Region,
    pub text: String,
}

impl RegionText {
    pub fn new(region: Region, text: String) -> Self {
        Self { region, text }
    }
}
