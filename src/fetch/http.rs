use std::time::Duration;

use super::{EventHandler, FetchError};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub(super) struct Client<'a, E> {
    agent: ureq::Agent,
    event_handler: &'a E,
}

impl<'a, E> Client<'a, E>
where
    E: EventHandler,
{
    /// Create a new HTTP client.
    ///
    /// If `timeout` is not `None`, it limits the whole request, including
    /// the time to read the body.
    pub fn new(timeout: Option<Duration>, event_handler: &'a E) -> Self {
        let mut builder = ureq::AgentBuilder::new().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Client {
            agent: builder.build(),
            event_handler,
        }
    }

    /// Send a `GET` request to `url`.
    ///
    /// Only `2xx` responses are accepted. `ureq` already turns `4xx` and
    /// `5xx` into errors, but any other status (like a `300`, or a `304`)
    /// is returned as [`FetchError::Status`].
    pub fn get(&self, url: &str) -> Result<ureq::Response, FetchError> {
        let request = self.agent.get(url).set("Accept", "*/*");

        self.event_handler.request(request.url());

        let response = request.call()?;

        let content_length = response
            .header("Content-Length")
            .and_then(|l| l.parse().ok());

        self.event_handler
            .response(response.status(), content_length);

        match response.status() {
            200..=299 => Ok(response),
            status => Err(FetchError::Status(status, url.to_owned())),
        }
    }
}
