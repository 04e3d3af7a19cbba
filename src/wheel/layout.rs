//! Segment geometry for the wheel.
//!
//! All coordinates use the screen convention: x grows right, y grows down,
//! angles are degrees measured clockwise from the positive x axis. 270°
//! therefore points at the top of the wheel.

/// Drawable area handed to the layout by the host (terminal canvas or SVG
/// document). The layout never reads the terminal size on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn square(size: f64) -> Self {
        Self::new(size, size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Point at `radius` from `self` in direction `degrees`
    pub fn polar(self, radius: f64, degrees: f64) -> Point {
        let rad = degrees.to_radians();
        Point {
            x: self.x + radius * rad.cos(),
            y: self.y + radius * rad.sin(),
        }
    }
}

/// Sizing knobs for the layout, both fractions in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Wheel radius as a fraction of half the wheel size
    pub radius_fraction: f64,
    /// Label anchor radius as a fraction of the wheel radius
    pub label_radius: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            radius_fraction: 280.0 / 300.0,
            label_radius: 0.68,
        }
    }
}

/// One angular slice of the wheel
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub center: f64,
    /// Arc start point on the rim
    pub arc_start: Point,
    /// Arc end point on the rim
    pub arc_end: Point,
    /// Whether the sector spans more than half the circle
    pub large_arc: bool,
    /// Where the label is centered
    pub label_anchor: Point,
    /// Label rotation in degrees, aligned radially with the segment center
    pub label_rotation: f64,
}

impl Segment {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Whether an angle in the wheel's own frame falls inside this segment
    pub fn contains(&self, degrees: f64) -> bool {
        let mut a = degrees.rem_euclid(360.0);
        // tiny negatives round up to exactly 360
        if a >= 360.0 {
            a = 0.0;
        }
        a >= self.start && a < self.end
    }
}

/// Derived geometry for every segment of a wheel
#[derive(Debug, Clone, PartialEq)]
pub struct WheelLayout {
    count: usize,
    params: LayoutParams,
    viewport: Viewport,
    center: Point,
    radius: f64,
    segments: Vec<Segment>,
}

impl WheelLayout {
    /// `count` comes from a `PrizeList` and is therefore at least one
    pub fn new(count: usize, params: LayoutParams, viewport: Viewport) -> Self {
        let mut layout = Self {
            count: count.max(1),
            params,
            viewport,
            center: Point { x: 0.0, y: 0.0 },
            radius: 0.0,
            segments: Vec::new(),
        };
        layout.recompute();
        layout
    }

    /// Recompute geometry after the host reports a new drawable area
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        let size = self.viewport.width.min(self.viewport.height);
        self.center = Point {
            x: self.viewport.width / 2.0,
            y: self.viewport.height / 2.0,
        };
        self.radius = size / 2.0 * self.params.radius_fraction;

        let span = 360.0 / self.count as f64;
        let label_radius = self.radius * self.params.label_radius;
        let center = self.center;
        let radius = self.radius;
        let count = self.count;

        self.segments = (0..count)
            .map(|index| {
                let start = index as f64 * span;
                // last segment closes the circle exactly
                let end = if index + 1 == count {
                    360.0
                } else {
                    (index + 1) as f64 * span
                };
                let mid = start + span / 2.0;
                Segment {
                    index,
                    start,
                    end,
                    center: mid,
                    arc_start: center.polar(radius, start),
                    arc_end: center.polar(radius, end),
                    large_arc: span > 180.0,
                    label_anchor: center.polar(label_radius, mid),
                    label_rotation: mid,
                }
            })
            .collect();
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Distance of the label anchors from the center
    pub fn label_distance(&self) -> f64 {
        self.radius * self.params.label_radius
    }

    /// Index of the segment containing `degrees` (wheel frame)
    pub fn segment_at(&self, degrees: f64) -> usize {
        let span = 360.0 / self.count as f64;
        ((degrees.rem_euclid(360.0) / span).floor() as usize).min(self.count - 1)
    }
}
