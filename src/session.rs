use std::time::Duration;

use anyhow::Result;
use reqwest::Client;

/// Per-request timeout, matching the original reporting job.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Status and body of a completed HTTP exchange.
///
/// Both are captured eagerly so callers can branch on the status and still
/// include the full body in logs and errors.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Minimal async HTTP seam shared by the fetcher, the token exchange and
/// the uploader. The concrete implementation is `reqwest::Client`; tests
/// substitute a scripted mock.
#[async_trait::async_trait]
pub trait ApiSession: Send + Sync {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, String)],
    ) -> Result<HttpReply>;

    async fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<HttpReply>;

    /// Multipart file upload with a bearer token. `attributes` is the
    /// JSON metadata part; Box requires it to precede the file part.
    async fn upload(
        &self,
        url: &str,
        bearer: &str,
        file_name: &str,
        bytes: Vec<u8>,
        attributes: Option<String>,
    ) -> Result<HttpReply>;
}

/// Build the HTTP client used for every request in a run.
pub fn build_client() -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?)
}

#[async_trait::async_trait]
impl ApiSession for Client {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, String)],
    ) -> Result<HttpReply> {
        let mut builder = Client::get(self, url).query(query);
        for &(k, v) in headers {
            builder = builder.header(k, v);
        }
        tracing::debug!("GET {}", url);
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpReply { status, body })
    }

    async fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<HttpReply> {
        tracing::debug!("POST {} (form)", url);
        let response = self.post(url).form(form).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpReply { status, body })
    }

    async fn upload(
        &self,
        url: &str,
        bearer: &str,
        file_name: &str,
        bytes: Vec<u8>,
        attributes: Option<String>,
    ) -> Result<HttpReply> {
        let mut form = reqwest::multipart::Form::new();
        if let Some(attrs) = attributes {
            form = form.text("attributes", attrs);
        }
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        form = form.part("file", part);

        tracing::debug!("POST {} (multipart)", url);
        let response = self
            .post(url)
            .bearer_auth(bearer)
            .multipart(form)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpReply { status, body })
    }
}
