use std::fmt;

/// The model's current condition, always derived, never set directly.
///
/// `Querying` wins while any fetch is in flight; otherwise the value follows
/// whether the latest viewport overlaps the supported query region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStatus {
    Ready,
    Querying,
    RegionNotAvailable,
}

impl fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ModelStatus::Ready => "ready",
            ModelStatus::Querying => "querying",
            ModelStatus::RegionNotAvailable => "region not available",
        };
        write!(f, "{}", text)
    }
}
