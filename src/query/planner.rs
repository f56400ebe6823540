//! Decides, for a given viewport, whether to query the observation service
//! at all, and builds the request target from the clipped boundaries.

use crate::types::coordinates::CoordinateBoundaries;

/// The outcome of planning one fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryPlan {
    /// The viewport shares no area with the supported region. Skip network
    /// I/O entirely; the result of the cycle is an empty station table and
    /// this is a normal outcome, not an error.
    OutsideRegion,
    /// Fetch `url`, which covers the viewport clipped to the supported
    /// region.
    Fetch { url: String },
}

/// Plans fetches against a fixed base URL and supported region.
#[derive(Debug, Clone)]
pub struct QueryPlanner {
    base_url: String,
    region: CoordinateBoundaries,
}

impl QueryPlanner {
    pub fn new(base_url: String, region: CoordinateBoundaries) -> Self {
        Self { base_url, region }
    }

    pub fn region(&self) -> &CoordinateBoundaries {
        &self.region
    }

    /// Maps a viewport to a [`QueryPlan`].
    ///
    /// A viewport that only partially overlaps the region is clipped to the
    /// region's edges before the request target is built, so the service is
    /// never asked for coordinates it cannot answer.
    pub fn plan(&self, viewport: CoordinateBoundaries) -> QueryPlan {
        if viewport.is_entirely_outside(&self.region) {
            return QueryPlan::OutsideRegion;
        }
        let bounds = viewport.restrict_to(&self.region);
        QueryPlan::Fetch {
            url: self.request_url(&bounds),
        }
    }

    // Coordinates go out with 3 decimals, the resolution the service expects.
    fn request_url(&self, bounds: &CoordinateBoundaries) -> String {
        format!(
            "{}?lat1={:.3}&lat2={:.3}&lon1={:.3}&lon2={:.3}",
            self.base_url,
            bounds.south(),
            bounds.north(),
            bounds.west(),
            bounds.east(),
        )
    }
}
