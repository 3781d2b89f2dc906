//! Operator-supplied location fixes.
//!
//! A command-line host has no GPS receiver; the fix comes from the
//! operator (typically `--lat`/`--lon` flags) and flows through the same
//! permission-gated provider seam a hardware source would use.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::model::GeoPoint;

use super::LocationProvider;

/// A location provider that returns a fix supplied up front.
#[derive(Debug, Clone)]
pub struct StaticLocation {
    point: GeoPoint,
    granted: bool,
}

impl StaticLocation {
    /// Create a provider for the given fix.
    ///
    /// `granted` carries the consent state from the device configuration.
    #[must_use]
    pub fn new(point: GeoPoint, granted: bool) -> Self {
        Self { point, granted }
    }
}

#[async_trait]
impl LocationProvider for StaticLocation {
    fn name(&self) -> &'static str {
        "static"
    }

    fn has_permission(&self) -> bool {
        self.granted
    }

    async fn current_position(&self) -> Result<GeoPoint> {
        debug!("Acquired location fix {}", self.point);
        Ok(self.point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::acquire_location;

    fn fix() -> GeoPoint {
        GeoPoint {
            latitude: -23.5505,
            longitude: -46.6333,
        }
    }

    #[tokio::test]
    async fn test_static_location_granted() {
        let provider = StaticLocation::new(fix(), true);
        let point = acquire_location(&provider).await.unwrap();
        assert_eq!(point, fix());
    }

    #[tokio::test]
    async fn test_static_location_denied() {
        let provider = StaticLocation::new(fix(), false);
        let err = acquire_location(&provider).await.unwrap_err();
        assert!(err.is_permission_denied());
    }
}
