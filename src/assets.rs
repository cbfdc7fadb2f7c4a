//! Background matcap loading with a single designated activation slot.
//!
//! Every source is fetched on its own thread. Completions come back over a
//! channel tagged with their submission index, in whatever order they
//! finish. Only the designated slot ever becomes the active matcap.

use std::io::Read;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use crate::error::AssetError;
use crate::params::MatcapSources;

/// Upper bound on a downloaded texture body (bytes)
const MAX_TEXTURE_BYTES: u64 = 16 * 1024 * 1024;

/// Decoded RGBA8 matcap
#[derive(Debug, Clone, PartialEq)]
pub struct MatcapImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl MatcapImage {
    /// Decode any format the `image` crate recognizes
    pub fn decode(bytes: &[u8]) -> Result<Self, AssetError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self {
            width: image.width(),
            height: image.height(),
            rgba: image.into_raw(),
        })
    }
}

/// Retrieves raw texture bytes for a source string
pub trait Fetch: Send + Sync + 'static {
    fn fetch(&self, source: &str) -> Result<Vec<u8>, AssetError>;
}

/// Fetches `http://` / `https://` sources over the network, anything else
/// from the local file system
pub struct SourceFetcher;

impl Fetch for SourceFetcher {
    fn fetch(&self, source: &str) -> Result<Vec<u8>, AssetError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            let response = ureq::get(source).call().map_err(|e| AssetError::Http {
                url: source.to_string(),
                message: e.to_string(),
            })?;

            read_body(response.into_reader(), source, MAX_TEXTURE_BYTES)
        } else {
            Ok(std::fs::read(source)?)
        }
    }
}

/// Read a response body, failing instead of truncating past `limit` bytes
fn read_body(reader: impl Read, url: &str, limit: u64) -> Result<Vec<u8>, AssetError> {
    let mut bytes = Vec::new();
    reader.take(limit + 1).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > limit {
        return Err(AssetError::Http {
            url: url.to_string(),
            message: format!("body exceeds {} MiB", limit / (1024 * 1024)),
        });
    }
    Ok(bytes)
}

/// Submission index of one texture request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(pub usize);

/// Outcome of one texture request
#[derive(Debug)]
pub struct LoadCompletion {
    pub ticket: LoadTicket,
    pub result: Result<MatcapImage, AssetError>,
}

/// Reacts to exactly one ticket among many completions
#[derive(Debug)]
pub struct DesignatedSlot {
    ticket: LoadTicket,
    resolved: bool,
}

impl DesignatedSlot {
    pub fn new(slot: usize) -> Self {
        Self {
            ticket: LoadTicket(slot),
            resolved: false,
        }
    }

    /// Returns the image when `completion` is the first success for the slot
    pub fn handle(&mut self, completion: LoadCompletion) -> Option<Arc<MatcapImage>> {
        let LoadCompletion { ticket, result } = completion;
        let LoadTicket(slot) = ticket;

        match result {
            Ok(image) if ticket == self.ticket && !self.resolved => {
                self.resolved = true;
                tracing::info!(slot, width = image.width, height = image.height, "matcap activated");
                Some(Arc::new(image))
            }
            Ok(image) => {
                tracing::debug!(slot, width = image.width, height = image.height, "texture loaded");
                None
            }
            Err(e) => {
                tracing::warn!(slot, "texture load failed: {e}");
                None
            }
        }
    }
}

/// Owns the completion channel of all in-flight texture requests
pub struct AssetLoader {
    receiver: Receiver<LoadCompletion>,
    handler: DesignatedSlot,
    outstanding: usize,
}

impl AssetLoader {
    /// Issue one background request per source
    pub fn spawn(sources: &MatcapSources, fetcher: Arc<dyn Fetch>) -> Result<Self, AssetError> {
        let count = sources.sources.len();
        if sources.active_slot >= count {
            return Err(AssetError::SlotOutOfRange {
                slot: sources.active_slot,
                count,
            });
        }

        let (sender, receiver) = mpsc::channel();

        for (slot, source) in sources.sources.iter().enumerate() {
            let sender = sender.clone();
            let fetcher = Arc::clone(&fetcher);
            let source = source.clone();

            thread::spawn(move || {
                let result = fetcher
                    .fetch(&source)
                    .and_then(|bytes| MatcapImage::decode(&bytes));
                // The loader may already be gone at teardown
                let _ = sender.send(LoadCompletion {
                    ticket: LoadTicket(slot),
                    result,
                });
            });
        }

        tracing::info!(count, active_slot = sources.active_slot, "texture requests issued");

        Ok(Self {
            receiver,
            handler: DesignatedSlot::new(sources.active_slot),
            outstanding: count,
        })
    }

    /// Drain finished requests without blocking
    ///
    /// Returns the active matcap the one time its request succeeds.
    pub fn poll(&mut self) -> Option<Arc<MatcapImage>> {
        let mut activated = None;
        let mut drained = false;

        loop {
            match self.receiver.try_recv() {
                Ok(completion) => {
                    drained = true;
                    self.outstanding = self.outstanding.saturating_sub(1);
                    if let Some(image) = self.handler.handle(completion) {
                        activated = Some(image);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if drained && self.outstanding == 0 && !self.handler.resolved {
            tracing::warn!("all texture requests finished without an active matcap");
        }

        activated
    }
}
