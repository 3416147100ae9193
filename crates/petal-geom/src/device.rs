use serde::{Deserialize, Serialize};

use crate::point::Point;

/// A closed polygon outline. The ring is implicit: the last vertex
/// connects back to the first without repeating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Polygon { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Rotate every vertex about the origin by `degrees`, counter-clockwise.
    pub fn rotated(mut self, degrees: f64) -> Self {
        let radians = degrees.to_radians();
        for p in &mut self.points {
            *p = p.rotated(radians);
        }
        self
    }

    /// Translate every vertex by `offset`.
    pub fn translated(mut self, offset: Point) -> Self {
        for p in &mut self.points {
            *p = p.translated(offset.x, offset.y);
        }
        self
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = *self.points.first()?;
        let mut bbox = BoundingBox {
            min: first,
            max: first,
        };
        for p in &self.points[1..] {
            bbox.expand(*p);
        }
        Some(bbox)
    }

    /// Arithmetic mean of the vertices. Coincides with the center of mass
    /// for the symmetric outlines built by this crate.
    pub fn vertex_centroid(&self) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        let n = self.points.len() as f64;
        Some(Point::new(sx / n, sy / n))
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn expand(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn union(mut self, other: BoundingBox) -> BoundingBox {
        self.expand(other.min);
        self.expand(other.max);
        self
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// The in-memory aggregate of all placed shapes for one layout run.
///
/// Created empty, populated by the flower/petal builders, consumed once by
/// export or preview, then discarded. Insertion order is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    name: String,
    polygons: Vec<Polygon>,
}

impl Device {
    pub fn new(name: impl Into<String>) -> Self {
        Device {
            name: name.into(),
            polygons: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn push(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.polygons
            .iter()
            .filter_map(Polygon::bounding_box)
            .reduce(BoundingBox::union)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(cx: f64, cy: f64, half: f64) -> Polygon {
        Polygon::new(vec![
            Point::new(cx - half, cy - half),
            Point::new(cx + half, cy - half),
            Point::new(cx + half, cy + half),
            Point::new(cx - half, cy + half),
        ])
    }

    #[test]
    fn test_empty_device() {
        let device = Device::new("empty");
        assert!(device.is_empty());
        assert_eq!(device.bounding_box(), None);
    }

    #[test]
    fn test_bounding_box_union() {
        let mut device = Device::new("boxes");
        device.push(square(0.0, 0.0, 1.0));
        device.push(square(10.0, 5.0, 2.0));

        let bbox = device.bounding_box().unwrap();
        assert_eq!(bbox.min, Point::new(-1.0, -1.0));
        assert_eq!(bbox.max, Point::new(12.0, 7.0));
        assert_eq!(bbox.width(), 13.0);
        assert_eq!(bbox.height(), 8.0);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut device = Device::new("ordered");
        device.push(square(0.0, 0.0, 1.0));
        device.push(square(3.0, 0.0, 1.0));
        assert_eq!(device.len(), 2);
        assert_eq!(device.polygons()[1].points()[0], Point::new(2.0, -1.0));
    }

    #[test]
    fn test_polygon_rotate_then_translate() {
        let placed = square(1.0, 0.0, 0.5)
            .rotated(90.0)
            .translated(Point::new(10.0, 0.0));
        let centroid = placed.vertex_centroid().unwrap();
        assert!((centroid.x - 10.0).abs() < 1e-12);
        assert!((centroid.y - 1.0).abs() < 1e-12);
    }
}
