//! [`Revalidator`] definitions.

use std::sync::Arc;

use tracing as log;

/// Notifier of the frontend about public paths whose rendered pages became
/// stale.
///
/// Paths are pushed to the configured revalidation endpoint after a
/// successful mutation, fire-and-forget: a failed push is logged and never
/// fails the mutation that triggered it.
#[derive(Clone, Debug, Default)]
pub struct Revalidator(Option<Arc<Inner>>);

/// Inner state of a [`Revalidator`].
#[derive(Debug)]
struct Inner {
    /// Endpoint accepting revalidation requests.
    endpoint: String,

    /// HTTP client performing the requests.
    client: reqwest::Client,
}

impl Revalidator {
    /// Creates a new [`Revalidator`] pushing to the provided `endpoint`, or
    /// a no-op one when no endpoint is configured.
    #[must_use]
    pub fn new(endpoint: Option<String>) -> Self {
        Self(endpoint.map(|endpoint| {
            Arc::new(Inner {
                endpoint,
                client: reqwest::Client::new(),
            })
        }))
    }

    /// Notifies the frontend that the provided `paths` should be re-rendered.
    pub fn notify(&self, paths: &[&str]) {
        let Some(inner) = self.0.clone() else {
            return;
        };

        let paths =
            paths.iter().map(|p| (*p).to_owned()).collect::<Vec<_>>();
        drop(tokio::spawn(async move {
            for path in paths {
                let result = inner
                    .client
                    .post(format!("{}?path={path}", inner.endpoint))
                    .send()
                    .await
                    .and_then(reqwest::Response::error_for_status);
                if let Err(e) = result {
                    log::warn!("failed to revalidate `{path}`: {e}");
                }
            }
        }));
    }
}
