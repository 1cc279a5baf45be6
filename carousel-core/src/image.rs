//! Image provider contract
//!
//! Fetching, decoding and caching belong to the host. The surface only
//! starts a load when an item appears and cancels it when the item
//! disappears; it never looks at cache state.

use std::cell::RefCell;
use std::rc::Rc;

use url::Url;

use crate::error::ImageLoadError;

/// A decoded image, reduced to what a host needs to draw a thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    pub url: Url,
    pub width: u32,
    pub height: u32,
    /// Average colour, used by hosts that cannot draw pixels.
    pub average_rgb: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageState {
    Pending,
    Ready(ImageHandle),
    Failed(ImageLoadError),
    Cancelled,
}

impl ImageState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn image(&self) -> Option<&ImageHandle> {
        match self {
            Self::Ready(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Shared view of one in-flight load.
///
/// The provider keeps a clone to deliver the result; the surface keeps a
/// clone to read or cancel it. Not thread-safe: loads are driven from the
/// UI thread through [`ImageProvider::poll`].
#[derive(Debug, Clone)]
pub struct LoadHandle {
    state: Rc<RefCell<ImageState>>,
}

impl LoadHandle {
    pub fn pending() -> Self {
        Self {
            state: Rc::new(RefCell::new(ImageState::Pending)),
        }
    }

    pub fn ready(image: ImageHandle) -> Self {
        Self {
            state: Rc::new(RefCell::new(ImageState::Ready(image))),
        }
    }

    pub fn failed(error: ImageLoadError) -> Self {
        Self {
            state: Rc::new(RefCell::new(ImageState::Failed(error))),
        }
    }

    pub fn state(&self) -> ImageState {
        self.state.borrow().clone()
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(*self.state.borrow(), ImageState::Cancelled)
    }

    /// Cancel a pending load. Returns true only for the call that actually
    /// cancelled; cancelling twice, or cancelling a finished load, is a
    /// no-op.
    pub fn cancel(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.is_pending() {
            *state = ImageState::Cancelled;
            true
        } else {
            false
        }
    }

    /// Deliver a result. Ignored unless the load is still pending.
    pub fn complete(
        &self,
        result: Result<ImageHandle, ImageLoadError>,
    ) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.is_pending() {
            return false;
        }
        *state = match result {
            Ok(image) => ImageState::Ready(image),
            Err(error) => ImageState::Failed(error),
        };
        true
    }
}

/// Host side of image loading.
pub trait ImageProvider {
    /// Start loading `url`. The returned handle may already be resolved
    /// when the provider has the image cached.
    fn request(&mut self, url: &Url) -> LoadHandle;

    /// Make progress on outstanding loads. Called once per layout pass.
    fn poll(&mut self) {}
}

/// Provider for hosts that draw no images.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoImages;

impl ImageProvider for NoImages {
    fn request(&mut self, _url: &Url) -> LoadHandle {
        LoadHandle::failed(ImageLoadError::Network(
            "image loading disabled".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle_for(url: &str) -> ImageHandle {
        ImageHandle {
            url: Url::parse(url).unwrap(),
            width: 320,
            height: 240,
            average_rgb: [10, 20, 30],
        }
    }

    #[test]
    fn cancel_is_idempotent() {
        let load = LoadHandle::pending();
        assert!(load.cancel());
        assert!(!load.cancel());
        assert!(load.is_cancelled());
    }

    #[test]
    fn cancelled_loads_ignore_late_results() {
        let load = LoadHandle::pending();
        let provider_side = load.clone();
        load.cancel();
        assert!(!provider_side.complete(Ok(handle_for("https://example.com/a"))));
        assert_eq!(load.state(), ImageState::Cancelled);
    }

    #[test]
    fn finished_loads_cannot_be_cancelled() {
        let load = LoadHandle::ready(handle_for("https://example.com/a"));
        assert!(!load.cancel());
        assert!(load.state().image().is_some());
    }

    #[test]
    fn completion_is_visible_through_every_clone() {
        let load = LoadHandle::pending();
        let provider_side = load.clone();
        assert!(provider_side.complete(Err(ImageLoadError::Decode("bad".into()))));
        assert_eq!(
            load.state(),
            ImageState::Failed(ImageLoadError::Decode("bad".into()))
        );
    }
}
