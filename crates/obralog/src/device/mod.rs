//! Device capture providers.
//!
//! Camera and geolocation are external capabilities consumed through
//! traits: each acquisition is a scoped one-shot — check consent, acquire
//! one value, release. Acquisitions never overlap store operations, and a
//! refused capability aborts the whole user action with an actionable
//! message rather than writing a partial record.

pub mod camera;
pub mod location;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::model::GeoPoint;

pub use camera::FileCamera;
pub use location::StaticLocation;

/// A permission-gated geolocation source.
#[async_trait]
pub trait LocationProvider {
    /// The name of this provider (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Check whether location capture is currently allowed.
    fn has_permission(&self) -> bool;

    /// Acquire a single latitude/longitude fix.
    ///
    /// # Errors
    ///
    /// Returns an error if the fix cannot be acquired.
    async fn current_position(&self) -> Result<GeoPoint>;
}

/// A permission-gated camera source.
#[async_trait]
pub trait CameraProvider {
    /// The name of this provider (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Check whether photo capture is currently allowed.
    fn has_permission(&self) -> bool;

    /// Capture one photo and return a local URI referencing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the capture fails.
    async fn capture_photo(&self) -> Result<String>;
}

/// Acquire one location fix, enforcing the consent gate first.
///
/// # Errors
///
/// Returns [`Error::PermissionDenied`] if location capture is not allowed,
/// or the provider's own error if acquisition fails.
pub async fn acquire_location(provider: &dyn LocationProvider) -> Result<GeoPoint> {
    if !provider.has_permission() {
        return Err(Error::permission_denied(
            "location",
            location_instructions(),
        ));
    }
    provider.current_position().await
}

/// Capture one photo, enforcing the consent gate first.
///
/// # Errors
///
/// Returns [`Error::PermissionDenied`] if photo capture is not allowed,
/// or the provider's own error if the capture fails.
pub async fn acquire_photo(provider: &dyn CameraProvider) -> Result<String> {
    if !provider.has_permission() {
        return Err(Error::permission_denied("camera", camera_instructions()));
    }
    provider.capture_photo().await
}

/// Instructions for allowing location capture.
#[must_use]
pub fn location_instructions() -> &'static str {
    "To allow location capture, set location_enabled = true under [device] \
     in the obralog configuration (see `obralog config path`)."
}

/// Instructions for allowing photo capture.
#[must_use]
pub fn camera_instructions() -> &'static str {
    "To allow photo capture, set camera_enabled = true under [device] \
     in the obralog configuration (see `obralog config path`)."
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DeniedLocation;

    #[async_trait]
    impl LocationProvider for DeniedLocation {
        fn name(&self) -> &'static str {
            "denied"
        }

        fn has_permission(&self) -> bool {
            false
        }

        async fn current_position(&self) -> Result<GeoPoint> {
            unreachable!("the gate rejects before acquisition")
        }
    }

    struct DeniedCamera;

    #[async_trait]
    impl CameraProvider for DeniedCamera {
        fn name(&self) -> &'static str {
            "denied"
        }

        fn has_permission(&self) -> bool {
            false
        }

        async fn capture_photo(&self) -> Result<String> {
            unreachable!("the gate rejects before capture")
        }
    }

    #[tokio::test]
    async fn test_acquire_location_denied() {
        let err = acquire_location(&DeniedLocation).await.unwrap_err();
        assert!(err.is_permission_denied());
        assert!(err.to_string().contains("location_enabled"));
    }

    #[tokio::test]
    async fn test_acquire_photo_denied() {
        let err = acquire_photo(&DeniedCamera).await.unwrap_err();
        assert!(err.is_permission_denied());
        assert!(err.to_string().contains("camera_enabled"));
    }

    #[test]
    fn test_instructions_are_actionable() {
        assert!(location_instructions().contains("config"));
        assert!(camera_instructions().contains("config"));
    }
}
