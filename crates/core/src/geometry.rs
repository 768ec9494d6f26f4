use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
}

/// Axis-aligned rectangle given by its lower-left and upper-right
/// corners. The origin is bottom-left, y grows upward; surfaces that
/// draw top-down flip y themselves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub ll: Point,
    pub ur: Point,
}

impl Rect {
    pub fn new(ll: Point, ur: Point) -> Rect {
        Rect { ll, ur }
    }

    /// Rectangle of the given size with its lower-left corner at the origin.
    pub fn from_size(width: f64, height: f64) -> Rect {
        Rect::new(Point::new(0.0, 0.0), Point::new(width, height))
    }

    pub fn width(&self) -> f64 {
        self.ur.x - self.ll.x
    }

    pub fn height(&self) -> f64 {
        self.ur.y - self.ll.y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.ll.x + self.ur.x) / 2.0,
            (self.ll.y + self.ur.y) / 2.0,
        )
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.ll.x && x <= self.ur.x && y >= self.ll.y && y <= self.ur.y
    }

    /// Cut into two parts, the first holding `proportion` of the area.
    ///
    /// The cut runs across the longer dimension (width wins a tie), so
    /// repeated splits keep the parts close to square. A vertical cut
    /// returns (left, right); a horizontal one returns (bottom, top).
    /// Both parts share the full extent of the uncut axis and tile the
    /// whole rectangle exactly.
    pub fn split(&self, proportion: f64) -> Result<(Rect, Rect)> {
        if !(proportion > 0.0 && proportion < 1.0) {
            return Err(Error::InvalidProportion { proportion });
        }
        if self.width() >= self.height() {
            let cut = self.ll.x + proportion * self.width();
            Ok((
                Rect::new(self.ll, Point::new(cut, self.ur.y)),
                Rect::new(Point::new(cut, self.ll.y), self.ur),
            ))
        } else {
            let cut = self.ll.y + proportion * self.height();
            Ok((
                Rect::new(self.ll, Point::new(self.ur.x, cut)),
                Rect::new(Point::new(self.ll.x, cut), self.ur),
            ))
        }
    }
}
