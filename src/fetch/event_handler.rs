use std::{path::Path, time::Duration};

use crate::ImtDigest;

/// Handler to receive notifications for events while a file is fetched
/// and hashed.
///
/// All methods are optional.
#[expect(unused_variables)]
pub trait EventHandler {
    /// HTTP request to the source.
    fn request(&self, url: &str) {}

    /// Response from the HTTP server.
    ///
    /// `content_length` is the value of the `Content-Length` header, if
    /// it is present.
    fn response(&self, status: u16, content_length: Option<u64>) {}

    /// The source is a local file.
    fn open_file(&self, path: &Path) {}

    /// The fetcher waits `delay` before reading the body.
    fn throttle(&self, delay: Duration) {}

    /// Some data (in `bytes`) has been received.
    ///
    /// This method is invoked very frequently.
    fn progress_bytes(&self, bytes: usize) {}

    /// All data has been received, and its IMT hash is `digest`.
    fn digest(&self, digest: &ImtDigest) {}
}

/// [`EventHandler`] instance to ignore all events.
pub struct NoEventHandler;

impl EventHandler for NoEventHandler {}
