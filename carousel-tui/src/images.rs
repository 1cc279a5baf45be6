//! Deterministic stand-in for an image loader.
//!
//! Terminals cannot draw the thumbnails, so each URL resolves to a colour
//! swatch derived from its bytes. Loads resolve after a few polls to make
//! the pending state and cancellation observable.

use std::collections::VecDeque;

use carousel_core::image::{ImageHandle, ImageProvider, LoadHandle};
use url::Url;

/// Polls before a requested swatch resolves.
const DEFAULT_LATENCY_POLLS: u32 = 3;

#[derive(Debug)]
struct QueuedLoad {
    url: Url,
    handle: LoadHandle,
    remaining: u32,
}

#[derive(Debug)]
pub struct SwatchImages {
    latency_polls: u32,
    queue: VecDeque<QueuedLoad>,
    resolved: usize,
}

impl Default for SwatchImages {
    fn default() -> Self {
        Self::with_latency(DEFAULT_LATENCY_POLLS)
    }
}

impl SwatchImages {
    pub fn with_latency(latency_polls: u32) -> Self {
        Self {
            latency_polls,
            queue: VecDeque::new(),
            resolved: 0,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.queue.len()
    }

    pub fn resolved(&self) -> usize {
        self.resolved
    }
}

impl ImageProvider for SwatchImages {
    fn request(&mut self, url: &Url) -> LoadHandle {
        if self.latency_polls == 0 {
            self.resolved += 1;
            return LoadHandle::ready(swatch(url));
        }
        let handle = LoadHandle::pending();
        self.queue.push_back(QueuedLoad {
            url: url.clone(),
            handle: handle.clone(),
            remaining: self.latency_polls,
        });
        handle
    }

    fn poll(&mut self) {
        let mut still_waiting = VecDeque::with_capacity(self.queue.len());
        while let Some(mut load) = self.queue.pop_front() {
            if load.handle.is_cancelled() {
                log::trace!("SwatchImages: dropping cancelled load {}", load.url);
                continue;
            }
            load.remaining = load.remaining.saturating_sub(1);
            if load.remaining > 0 {
                still_waiting.push_back(load);
                continue;
            }
            if load.handle.complete(Ok(swatch(&load.url))) {
                self.resolved += 1;
            }
        }
        self.queue = still_waiting;
    }
}

/// FNV-1a over the URL, folded into a mid-brightness colour.
fn swatch(url: &Url) -> ImageHandle {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in url.as_str().bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    let channel = |shift: u32| 64 + ((hash >> shift) & 0x7f) as u8;
    ImageHandle {
        url: url.clone(),
        width: 320,
        height: 213,
        average_rgb: [channel(0), channel(8), channel(16)],
    }
}
