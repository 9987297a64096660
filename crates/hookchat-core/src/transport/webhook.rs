//! Webhook client struct and request building.

use std::time::Duration;

use hookchat_common::{SessionId, TransportError};
use hookchat_config::{ChatOptions, HttpMethod};
use serde_json::{Map, Value};

use crate::message::Attachment;

pub(crate) const ACTION_LOAD_PREVIOUS_SESSION: &str = "loadPreviousSession";
pub(crate) const ACTION_SEND_MESSAGE: &str = "sendMessage";

/// Chat webhook client.
#[derive(Clone)]
pub struct WebhookTransport {
    pub(crate) http: reqwest::Client,
}

impl WebhookTransport {
    pub fn new() -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| TransportError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// Use a preconfigured client (proxies, TLS roots, ...).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Build a webhook request.
    ///
    /// Scalar fields go in the JSON body, or the query string for `GET`.
    /// Attachments switch a `POST` to multipart.
    pub(crate) fn build_request(
        &self,
        action: &str,
        session_id: &SessionId,
        text: Option<&str>,
        files: &[Attachment],
        options: &ChatOptions,
    ) -> Result<reqwest::RequestBuilder, TransportError> {
        let mut fields = Map::new();
        fields.insert("action".into(), Value::from(action));
        fields.insert(
            options.chat_session_key.clone(),
            Value::from(session_id.as_str()),
        );
        if let Some(text) = text {
            fields.insert(options.chat_input_key.clone(), Value::from(text));
        }
        fields.insert("metadata".into(), Value::Object(options.metadata.clone()));

        let url = options.webhook_url.as_str();
        let mut request = match options.webhook_config.method {
            HttpMethod::Get => {
                if !files.is_empty() {
                    return Err(TransportError::Unsupported(
                        "file attachments require a POST webhook".into(),
                    ));
                }
                let query: Vec<(String, String)> = fields
                    .into_iter()
                    .map(|(k, v)| (k, form_value(v)))
                    .collect();
                self.http.get(url).query(&query)
            }
            HttpMethod::Post if files.is_empty() => self.http.post(url).json(&Value::Object(fields)),
            HttpMethod::Post => self.http.post(url).multipart(multipart_form(fields, files)?),
        };

        for (name, value) in &options.webhook_config.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        Ok(request)
    }

    /// Send a request and reject non-2xx statuses.
    pub(crate) async fn dispatch(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, TransportError> {
        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = text.chars().take(200).collect::<String>();
            return Err(TransportError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

fn form_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn multipart_form(
    fields: Map<String, Value>,
    files: &[Attachment],
) -> Result<reqwest::multipart::Form, TransportError> {
    let mut form = reqwest::multipart::Form::new();
    for (name, value) in fields {
        form = form.text(name, form_value(value));
    }
    for file in files {
        let part = reqwest::multipart::Part::bytes(file.data.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| TransportError::Unsupported(format!("{}: {e}", file.name)))?;
        form = form.part("files", part);
    }
    Ok(form)
}
