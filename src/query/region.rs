use crate::types::coordinates::CoordinateBoundaries;

/// The coverage area of the FMI open-data observation proxy, used as the
/// supported query region unless the model is configured with another one.
///
/// Roughly Finland plus nearby sea areas.
pub fn fmi_coverage() -> CoordinateBoundaries {
    CoordinateBoundaries::new(70.1, 59.35, 31.6, 19.1)
}
