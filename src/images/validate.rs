use std::time::Duration;

/// Decides whether an image URL is fit to display.
pub trait ImageValidator {
    fn accept(&self, url: &str) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl ImageValidator for AcceptAll {
    fn accept(&self, _url: &str) -> bool {
        true
    }
}

/// Issues a blocking `HEAD` for remote URLs and accepts any success status.
/// Relative and local paths are accepted without a request.
///
/// Must not be used from inside an async runtime.
#[derive(Clone, Debug)]
pub struct HttpImageValidator {
    client: reqwest::blocking::Client,
}

impl HttpImageValidator {
    /// Routes checks through `proxy` when one is given, like the list fetch.
    pub fn new(proxy: Option<&str>, timeout_seconds: u64) -> Result<Self, reqwest::Error> {
        let mut builder =
            reqwest::blocking::Client::builder().timeout(Duration::from_secs(timeout_seconds));
        if let Some(proxy) = proxy.filter(|p| !p.trim().is_empty()) {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

fn is_remote(url: &str) -> bool {
    let lower = url.trim().to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl ImageValidator for HttpImageValidator {
    fn accept(&self, url: &str) -> bool {
        if !is_remote(url) {
            return true;
        }
        match self.client.head(url).send() {
            Ok(resp) => {
                let ok = resp.status().is_success();
                if !ok {
                    tracing::debug!(url, status = resp.status().as_u16(), "image check failed");
                }
                ok
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "image check failed");
                false
            }
        }
    }
}
