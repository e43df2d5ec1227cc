//! Blocking transport backed by `ureq`.

use ureq::Agent;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Executes requests on a `ureq::Agent`.
///
/// The default agent returns 4xx/5xx responses as data rather than `Err`,
/// so status interpretation stays with `Response`. A caller-supplied agent
/// should be configured the same way. Response bodies are read in full with
/// no size limit.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn with_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    type Error = ureq::Error;

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ureq::Error> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;
        let url = url.as_str();

        let mut response = match method {
            HttpMethod::Get | HttpMethod::Head | HttpMethod::Delete | HttpMethod::Options => {
                let builder = match method {
                    HttpMethod::Get => self.agent.get(url),
                    HttpMethod::Head => self.agent.head(url),
                    HttpMethod::Delete => self.agent.delete(url),
                    _ => self.agent.options(url),
                };
                let builder = with_headers(builder, &headers);
                // A body on a bodiless verb is still sent; the builder
                // never produces one for GET or HEAD.
                match body {
                    Some(data) => builder.force_send_body().send(data.as_slice()),
                    None => builder.call(),
                }
            }
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => {
                let builder = match method {
                    HttpMethod::Post => self.agent.post(url),
                    HttpMethod::Put => self.agent.put(url),
                    _ => self.agent.patch(url),
                };
                let builder = with_headers(builder, &headers);
                match body {
                    Some(data) => builder.send(data.as_slice()),
                    None => builder.send_empty(),
                }
            }
        }?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (k, v) in headers {
        builder = builder.header(k.as_str(), v.as_str());
    }
    builder
}
