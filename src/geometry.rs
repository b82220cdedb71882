//! Cell-grid geometry: sizes, points, rectangles and insets.
//!
//! All coordinates are whole terminal cells. The layout pass produces
//! rectangles in the coordinate space of the edit surface, with the origin
//! at the top-left corner of the surface (not of the text container).

/// Width and height in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// The zero size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check if this size has no area.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A position in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Dimensions.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// One past the right edge.
    #[must_use]
    pub const fn max_x(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// One past the bottom edge.
    #[must_use]
    pub const fn max_y(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Translate by `origin`.
    #[must_use]
    pub const fn offset_by(self, origin: Point) -> Self {
        Self::new(
            self.x.saturating_add(origin.x),
            self.y.saturating_add(origin.y),
            self.width,
            self.height,
        )
    }

    /// Check if a point is inside this rectangle.
    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.y >= self.y && point.x < self.max_x() && point.y < self.max_y()
    }

    /// Check if this rectangle is empty (zero area).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Insets around the text container inside the edit surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EdgeInsets {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl EdgeInsets {
    /// No insets.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create insets.
    #[must_use]
    pub const fn new(top: u32, left: u32, bottom: u32, right: u32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same inset on every side.
    #[must_use]
    pub const fn uniform(inset: u32) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// Sum of left and right.
    #[must_use]
    pub const fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// Sum of top and bottom.
    #[must_use]
    pub const fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }
}
