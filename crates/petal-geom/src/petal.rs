use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::device::Polygon;
use crate::point::Point;
use crate::GeomError;

/// Angular resolution used to discretize arcs and circles.
///
/// `degrees_per_segment` must be positive; the default of 2.5 degrees of
/// arc per polygon segment keeps vertex error well under the writable
/// feature size at the radii these masks use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tessellation {
    pub degrees_per_segment: f64,
}

impl Tessellation {
    pub fn new(degrees_per_segment: f64) -> Self {
        Tessellation {
            degrees_per_segment,
        }
    }

    /// Number of segments used for an arc spanning `span_degrees`.
    pub fn segments(&self, span_degrees: f64) -> usize {
        (span_degrees / self.degrees_per_segment).ceil().max(1.0) as usize
    }
}

impl Default for Tessellation {
    fn default() -> Self {
        Tessellation {
            degrees_per_segment: 2.5,
        }
    }
}

/// Caller-supplied corrections for outer-edge shrinkage in curved petals.
///
/// `outer_radius` scales the outer radius used for the centerline arc
/// length; `outer_width` scales the extruded width at the outer end. Both
/// default to 1.0 (no correction). No formula is inferred for them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Compensation {
    pub outer_radius: f64,
    pub outer_width: f64,
}

impl Compensation {
    fn validate(self) -> Result<(), GeomError> {
        for factor in [self.outer_radius, self.outer_width] {
            if !(factor > 0.0) {
                return Err(GeomError::InvalidCompensation { factor });
            }
        }
        Ok(())
    }
}

impl Default for Compensation {
    fn default() -> Self {
        Compensation {
            outer_radius: 1.0,
            outer_width: 1.0,
        }
    }
}

/// The closed set of petal outline variants. All four are structurally
/// equivalent except for the centerline path between inner and outer
/// radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PetalStyle {
    /// Annular wedge spanning `pi / n_petals` radians.
    Arc,
    /// Straight radial centerline, extruded to a trapezoid.
    Line,
    /// Circular-arc centerline of fixed curvature radius.
    CurvedByRadius {
        arc_radius: f64,
        #[serde(default)]
        comp: Compensation,
    },
    /// Circular-arc centerline subtending a given turning angle (degrees).
    CurvedByAngle {
        petal_rotation: f64,
        #[serde(default)]
        comp: Compensation,
    },
}

/// Parameters of one flower: a center disk of radius `inner_radius / 2`
/// plus `n_petals` petals between `inner_radius` and `outer_radius`,
/// evenly rotated about `center`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowerSpec {
    pub style: PetalStyle,
    pub n_petals: u32,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub center: Point,
    #[serde(default)]
    pub tessellation: Tessellation,
}

impl FlowerSpec {
    pub fn new(
        style: PetalStyle,
        n_petals: u32,
        outer_radius: f64,
        inner_radius: f64,
        center: Point,
    ) -> Self {
        FlowerSpec {
            style,
            n_petals,
            outer_radius,
            inner_radius,
            center,
            tessellation: Tessellation::default(),
        }
    }

    /// Angular half-pitch of one petal, `pi / n_petals` radians. The arc
    /// variant spans exactly this angle; the extruded variants taper from
    /// `inner_radius * theta` to `outer_radius * theta` in width.
    pub fn theta(&self) -> f64 {
        PI / self.n_petals as f64
    }

    /// Curvature radius of the petal centerline, `None` for the straight
    /// variants. For [`PetalStyle::CurvedByAngle`] the radius is derived
    /// so the centerline subtends `petal_rotation` degrees.
    pub fn centerline_arc_radius(&self) -> Option<f64> {
        match self.style {
            PetalStyle::Arc | PetalStyle::Line => None,
            PetalStyle::CurvedByRadius { arc_radius, .. } => Some(arc_radius),
            PetalStyle::CurvedByAngle { petal_rotation, .. } => {
                Some((self.outer_radius - self.inner_radius) / petal_rotation.to_radians())
            }
        }
    }

    /// Check every invariant up front, before any geometry is built.
    pub fn validate(&self) -> Result<(), GeomError> {
        if self.n_petals == 0 {
            return Err(GeomError::ZeroPetalCount);
        }
        if self.inner_radius < 0.0 || self.outer_radius <= self.inner_radius {
            return Err(GeomError::RadiusOrder {
                inner: self.inner_radius,
                outer: self.outer_radius,
            });
        }
        match self.style {
            PetalStyle::Arc | PetalStyle::Line => Ok(()),
            PetalStyle::CurvedByRadius { arc_radius, comp } => {
                comp.validate()?;
                if arc_radius <= 0.0 {
                    return Err(GeomError::NonPositiveArcRadius { arc_radius });
                }
                self.centerline_span(arc_radius, comp).map(|_| ())
            }
            PetalStyle::CurvedByAngle {
                petal_rotation,
                comp,
            } => {
                comp.validate()?;
                if !(petal_rotation > 0.0 && petal_rotation <= 360.0) {
                    return Err(GeomError::PetalRotationOutOfRange {
                        degrees: petal_rotation,
                    });
                }
                let arc_radius =
                    (self.outer_radius - self.inner_radius) / petal_rotation.to_radians();
                self.centerline_span(arc_radius, comp).map(|_| ())
            }
        }
    }

    /// Angle subtended by the curved centerline, in radians. Spans over a
    /// full turn would self-overlap and are rejected.
    fn centerline_span(&self, arc_radius: f64, comp: Compensation) -> Result<f64, GeomError> {
        let length = self.outer_radius * comp.outer_radius - self.inner_radius;
        if length <= 0.0 {
            return Err(GeomError::CenterlineCollapsed { length });
        }
        let span = length / arc_radius;
        if span > TAU {
            return Err(GeomError::ArcSpanTooLarge {
                degrees: span.to_degrees(),
            });
        }
        Ok(span)
    }
}

/// Build one petal outline at the origin, bisector along +x. The caller
/// rotates and translates the result into place.
pub fn petal_outline(spec: &FlowerSpec) -> Result<Polygon, GeomError> {
    spec.validate()?;
    let theta = spec.theta();
    let outline = match spec.style {
        PetalStyle::Arc => arc_outline(spec, theta),
        PetalStyle::Line => line_outline(spec, theta),
        PetalStyle::CurvedByRadius { arc_radius, comp } => {
            curved_outline(spec, theta, arc_radius, comp)
        }
        PetalStyle::CurvedByAngle {
            petal_rotation,
            comp,
        } => {
            let arc_radius = (spec.outer_radius - spec.inner_radius) / petal_rotation.to_radians();
            curved_outline(spec, theta, arc_radius, comp)
        }
    };
    Ok(outline)
}

/// Circle outline centered at the origin.
pub fn circle_outline(radius: f64, tessellation: &Tessellation) -> Polygon {
    let segments = tessellation.segments(360.0);
    let points = (0..segments)
        .map(|i| {
            let angle = TAU * i as f64 / segments as f64;
            Point::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect();
    Polygon::new(points)
}

fn arc_outline(spec: &FlowerSpec, theta: f64) -> Polygon {
    let half = theta / 2.0;
    let segments = spec.tessellation.segments(theta.to_degrees());
    let angle_at = |i: usize| -half + theta * i as f64 / segments as f64;

    let mut points = Vec::with_capacity(2 * (segments + 1));
    for i in 0..=segments {
        let (sin, cos) = angle_at(i).sin_cos();
        points.push(Point::new(spec.outer_radius * cos, spec.outer_radius * sin));
    }
    if spec.inner_radius > 0.0 {
        for i in (0..=segments).rev() {
            let (sin, cos) = angle_at(i).sin_cos();
            points.push(Point::new(spec.inner_radius * cos, spec.inner_radius * sin));
        }
    } else {
        points.push(Point::ORIGIN);
    }
    Polygon::new(points)
}

fn line_outline(spec: &FlowerSpec, theta: f64) -> Polygon {
    let w_inner = spec.inner_radius * theta;
    let w_outer = spec.outer_radius * theta;
    Polygon::new(vec![
        Point::new(spec.inner_radius, -w_inner / 2.0),
        Point::new(spec.outer_radius, -w_outer / 2.0),
        Point::new(spec.outer_radius, w_outer / 2.0),
        Point::new(spec.inner_radius, w_inner / 2.0),
    ])
}

/// Extrude a linearly tapering width along a circular-arc centerline that
/// starts at `(inner_radius, 0)` heading +x, curvature center above.
fn curved_outline(spec: &FlowerSpec, theta: f64, arc_radius: f64, comp: Compensation) -> Polygon {
    let length = spec.outer_radius * comp.outer_radius - spec.inner_radius;
    let span = length / arc_radius;
    let w_inner = spec.inner_radius * theta;
    let w_outer = spec.outer_radius * theta * comp.outer_width;

    let segments = spec.tessellation.segments(span.to_degrees());
    let mut left = Vec::with_capacity(segments + 1);
    let mut right = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let f = i as f64 / segments as f64;
        let (sin, cos) = (span * f).sin_cos();
        let cx = spec.inner_radius + arc_radius * sin;
        let cy = arc_radius * (1.0 - cos);
        // Unit normal, left of travel; width varies linearly with arc length.
        let w = w_inner + (w_outer - w_inner) * f;
        left.push(Point::new(cx - sin * w / 2.0, cy + cos * w / 2.0));
        right.push(Point::new(cx + sin * w / 2.0, cy - cos * w / 2.0));
    }
    let mut ring = right;
    ring.extend(left.into_iter().rev());
    Polygon::new(ring)
}
