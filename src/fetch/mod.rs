mod event_handler;
mod http;


use std::{
    fmt,
    fs::File,
    io::{self, Read},
    path::PathBuf,
    thread,
    time::Duration,
};

use crate::{checksum::Checksum, imt::HashingReader, ImtDigest};

pub use event_handler::{EventHandler, NoEventHandler};

/// Size of the buffer to read the body of a source.
const BUFFER_SIZE: usize = 8 * 1024;

/// Location of the file to hash.
///
/// Locators with a `http://` or `https://` scheme are fetched with a
/// `GET` request. Any other locator is a path in the local filesystem.
///
/// # Examples
///
/// ```
/// # use imt_hash::Source;
/// assert!(matches!(Source::from("https://example.com/a.pdf"), Source::Url(_)));
/// assert!(matches!(Source::from("./a.pdf"), Source::Path(_)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

impl From<&str> for Source {
    fn from(locator: &str) -> Self {
        let is_url = ["http://", "https://"].iter().any(|scheme| {
            locator
                .get(..scheme.len())
                .is_some_and(|s| s.eq_ignore_ascii_case(scheme))
        });

        if is_url {
            Source::Url(locator.to_owned())
        } else {
            Source::Path(PathBuf::from(locator))
        }
    }
}

impl From<String> for Source {
    fn from(locator: String) -> Self {
        Source::from(locator.as_str())
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed.")]
    Http(#[from] Box<ureq::Error>),

    #[error("Unexpected status {0} from {1}.")]
    Status(u16, String),

    #[error("I/O error in {1}: {0}")]
    Io(io::Error, String),
}

impl From<ureq::Error> for FetchError {
    fn from(value: ureq::Error) -> Self {
        FetchError::Http(Box::new(value))
    }
}

macro_rules! try_io {
    ($source:expr, $e:expr $(,)?) => {
        $e.map_err(|e| FetchError::Io(io::Error::from(e), $source.to_string()))?
    };
}

/// Fetch a file and compute its IMT hash.
///
/// # Examples
///
/// ```no_run
/// # use std::time::Duration;
/// # use imt_hash::Fetcher;
/// let digest = Fetcher::new("https://example.com/file.pdf")
///     .throttle(Duration::from_millis(500))
///     .digest()
///     .unwrap();
///
/// println!("{digest}");
/// ```
pub struct Fetcher<E = NoEventHandler> {
    source: Source,
    throttle: Option<Duration>,
    timeout: Option<Duration>,
    checksum: Option<Checksum>,
    event_handler: E,
}

impl Fetcher {
    pub fn new(source: impl Into<Source>) -> Self {
        Fetcher {
            source: source.into(),
            throttle: None,
            timeout: None,
            checksum: None,
            event_handler: NoEventHandler,
        }
    }
}

impl<E: EventHandler> Fetcher<E> {
    /// Wait for `delay` after the source is opened, and before reading
    /// its contents.
    pub fn throttle(mut self, delay: Duration) -> Self {
        self.throttle = Some(delay);
        self
    }

    /// Maximum time for the HTTP request.
    ///
    /// Ignored for local files.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Verify the contents of the file with `checksum`.
    ///
    /// If the data does not match, [`digest`](Self::digest) returns an
    /// [`InvalidData`](::std::io::ErrorKind::InvalidData) error.
    pub fn checksum(mut self, checksum: Checksum) -> Self {
        self.checksum = Some(checksum);
        self
    }

    /// Use `event_handler` to receive notifications.
    pub fn event_handler<H: EventHandler>(self, event_handler: H) -> Fetcher<H> {
        Fetcher {
            source: self.source,
            throttle: self.throttle,
            timeout: self.timeout,
            checksum: self.checksum,
            event_handler,
        }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Read the whole file and compute its IMT hash.
    pub fn digest(&self) -> Result<ImtDigest, FetchError> {
        let source = &self.source;

        let body: Box<dyn Read> = match source {
            Source::Url(url) => {
                let client = http::Client::new(self.timeout, &self.event_handler);
                Box::new(client.get(url)?.into_reader())
            }

            Source::Path(path) => {
                self.event_handler.open_file(path);
                Box::new(try_io!(source, File::open(path)))
            }
        };

        if let Some(delay) = self.throttle {
            self.event_handler.throttle(delay);
            thread::sleep(delay);
        }

        let body: Box<dyn Read> = match &self.checksum {
            Some(checksum) => Box::new(checksum.wrap_reader(body)),
            None => body,
        };

        let mut input = HashingReader::new(body);
        let mut data = [0u8; BUFFER_SIZE];

        loop {
            let n = try_io!(source, input.read(&mut data[..]));

            if n == 0 {
                break;
            }

            self.event_handler.progress_bytes(n);
        }

        let digest = input.finish();
        self.event_handler.digest(&digest);

        Ok(digest)
    }
}
