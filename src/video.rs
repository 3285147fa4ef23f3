//! Optional camera feed. The tracking overlay is composited over it but never
//! reads from it, so losing the camera only hides the background layer.

use serde::Serialize;

pub const CAMERA_REQUIRED_WARNING: &str =
    "Camera access is required for AI tracking. Please enable it.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    /// Permission prompt not answered yet
    #[default]
    Pending,
    Live,
    /// Denied, missing hardware, or no media API
    Unavailable,
}

impl VideoStatus {
    pub fn from_available(available: bool) -> Self {
        if available {
            VideoStatus::Live
        } else {
            VideoStatus::Unavailable
        }
    }

    /// Whether the host should draw the camera feed behind the overlay
    pub fn shows_background(self) -> bool {
        self == VideoStatus::Live
    }

    /// User-facing message when the feed is unavailable
    pub fn warning(self) -> Option<&'static str> {
        match self {
            VideoStatus::Unavailable => Some(CAMERA_REQUIRED_WARNING),
            VideoStatus::Pending | VideoStatus::Live => None,
        }
    }
}

/// Ask the browser for a camera stream.
///
/// Resolves to `Live` with the stream, or `Unavailable` when the media API
/// is missing or the user refuses.
#[cfg(target_arch = "wasm32")]
pub async fn request_camera() -> (VideoStatus, Option<web_sys::MediaStream>) {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    let promise = web_sys::window()
        .map(|window| window.navigator())
        .ok_or_else(|| JsValue::from_str("no window"))
        .and_then(|navigator| navigator.media_devices())
        .and_then(|devices| {
            let constraints = web_sys::MediaStreamConstraints::new();
            constraints.set_video(&JsValue::TRUE);
            devices.get_user_media_with_constraints(&constraints)
        });

    let stream = match promise {
        Ok(promise) => JsFuture::from(promise).await,
        Err(err) => Err(err),
    };

    match stream.and_then(|value| value.dyn_into::<web_sys::MediaStream>()) {
        Ok(stream) => {
            log::info!("Camera stream acquired");
            (VideoStatus::Live, Some(stream))
        }
        Err(err) => {
            log::warn!("Camera access denied or unavailable: {:?}", err);
            (VideoStatus::Unavailable, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unavailable_warns() {
        assert_eq!(VideoStatus::Pending.warning(), None);
        assert_eq!(VideoStatus::Live.warning(), None);
        assert_eq!(
            VideoStatus::Unavailable.warning(),
            Some(CAMERA_REQUIRED_WARNING)
        );
    }

    #[test]
    fn test_background_only_when_live() {
        assert!(VideoStatus::from_available(true).shows_background());
        assert!(!VideoStatus::from_available(false).shows_background());
        assert!(!VideoStatus::default().shows_background());
    }
}
