/// Convenience result type used across lucent.
pub type LucentResult<T> = Result<T, LucentError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum LucentError {
    /// Invalid user-provided parameters or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The frame source could not be acquired or stopped delivering frames.
    #[error("camera error: {0}")]
    Camera(#[from] CameraError),

    /// Failure while transforming or compositing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LucentError {
    /// Build a [`LucentError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LucentError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LucentError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Capture device failures, one variant per cause reported to the user.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// Access to the device was refused. Never retried.
    #[error("camera permission was denied; check the system privacy settings")]
    PermissionDenied,

    /// No capture device is attached.
    #[error("no usable camera was found")]
    NotFound,

    /// The requested resolution could not be satisfied.
    #[error("the camera cannot satisfy the requested resolution")]
    Overconstrained,

    /// The device exists but another application holds it.
    #[error("the camera is in use by another application; close it and retry")]
    NotReadable,

    /// The stream opened without any video track.
    #[error("the camera stream has no video track")]
    NoVideoTrack,

    /// The platform has no capture support at all.
    #[error("camera capture is not supported on this platform")]
    Unsupported,

    /// Anything else the device layer reports.
    #[error("failed to start the camera: {0}")]
    Other(String),
}

impl CameraError {
    /// Return `true` for errors that must abort the constraint fallback ladder.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
