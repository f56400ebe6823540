//! Geographic value types used throughout the crate: points, spans and
//! rectangular boundaries. All coordinates are decimal degrees; there is no
//! antimeridian wraparound handling because the supported query region never
//! crosses it.

use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use havainto::LatLon;
///
/// let helsinki_harbour = LatLon(60.167, 24.956);
/// assert_eq!(helsinki_harbour.0, 60.167); // Latitude
/// assert_eq!(helsinki_harbour.1, 24.956); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

/// The angular extent of a map viewport, in decimal degrees.
///
/// Mirrors the span a map view reports alongside its center coordinate when
/// the visible region settles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSpan {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl CoordinateSpan {
    pub fn new(latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude_delta,
            longitude_delta,
        }
    }
}

/// A rectangular latitude/longitude region.
///
/// Invariant: `south <= north` and `west <= east`. The rectangle is a plain
/// value type; all operations are pure and return new values.
///
/// # Examples
///
/// ```
/// use havainto::{CoordinateBoundaries, CoordinateSpan, LatLon};
///
/// let viewport = CoordinateBoundaries::around(
///     LatLon(60.2, 25.0),
///     CoordinateSpan::new(0.6, 1.0),
/// );
/// assert!(viewport.contains(LatLon(60.2, 25.0)));
/// assert!(!viewport.contains(LatLon(62.0, 25.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateBoundaries {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

impl CoordinateBoundaries {
    /// Creates a rectangle from its four edges.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        debug_assert!(south <= north, "south edge above north edge");
        debug_assert!(west <= east, "west edge right of east edge");
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Creates the rectangle covered by a viewport given its center and span.
    pub fn around(center: LatLon, span: CoordinateSpan) -> Self {
        Self::new(
            center.0 + span.latitude_delta / 2.0,
            center.0 - span.latitude_delta / 2.0,
            center.1 + span.longitude_delta / 2.0,
            center.1 - span.longitude_delta / 2.0,
        )
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    /// Returns true iff `self` and `other` share no area.
    ///
    /// The test is symmetric: `a.is_entirely_outside(&b) ==
    /// b.is_entirely_outside(&a)`.
    pub fn is_entirely_outside(&self, other: &CoordinateBoundaries) -> bool {
        self.east < other.west
            || self.west > other.east
            || self.north < other.south
            || self.south > other.north
    }

    /// Clamps this rectangle coordinate-wise into `other`.
    ///
    /// The result is degenerate (inverted edges) when the rectangles do not
    /// overlap; callers must check [`is_entirely_outside`] first.
    ///
    /// [`is_entirely_outside`]: CoordinateBoundaries::is_entirely_outside
    pub fn restrict_to(&self, other: &CoordinateBoundaries) -> CoordinateBoundaries {
        CoordinateBoundaries {
            north: self.north.min(other.north),
            south: self.south.max(other.south),
            east: self.east.min(other.east),
            west: self.west.max(other.west),
        }
    }

    /// Inclusive containment test on all four edges.
    pub fn contains(&self, point: LatLon) -> bool {
        point.0 >= self.south && point.0 <= self.north && point.1 >= self.west && point.1 <= self.east
    }
}
