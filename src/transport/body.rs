//! Encoding request bodies and decoding response bodies
//!
//! `BodyCodec` pairs an [`EnvelopeCodec`] with an [`EndpointPolicy`]. It
//! produces and consumes HTTP bodies only; sending them is the caller's
//! business.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::envelope::{Envelope, EnvelopeCodec};
use crate::error::{EnvelopeError, EnvelopeResult};

use super::mode::BodyMode;
use super::policy::{normalize_path, EndpointPolicy};
use super::response::ApiResponse;

#[derive(Debug, Clone)]
pub struct BodyCodec {
    codec: EnvelopeCodec,
    policy: EndpointPolicy,
}

impl BodyCodec {
    pub fn new(codec: EnvelopeCodec, policy: EndpointPolicy) -> Self {
        Self { codec, policy }
    }

    pub fn codec(&self) -> &EnvelopeCodec {
        &self.codec
    }

    pub fn policy(&self) -> &EndpointPolicy {
        &self.policy
    }

    /// Build the request body for an endpoint
    pub fn encode_request<T>(&self, path: &str, payload: &T) -> EnvelopeResult<Value>
    where
        T: Serialize + ?Sized,
    {
        let mode = self.policy.modes_for(path).request;
        tracing::debug!(path = %normalize_path(path), %mode, "encoding request body");
        self.encode_with(mode, payload)
    }

    /// Decode a raw response body for an endpoint
    pub fn decode_response(&self, path: &str, body: &str) -> EnvelopeResult<Value> {
        let mode = self.policy.modes_for(path).response;
        tracing::debug!(path = %normalize_path(path), %mode, body_len = body.len(), "decoding response body");
        self.decode_with(mode, body)
    }

    /// Decode a response body and read the status convention
    pub fn decode_api_response<T>(&self, path: &str, body: &str) -> EnvelopeResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        ApiResponse::from_value(self.decode_response(path, body)?)
    }

    /// Build a body in an explicitly chosen mode
    pub fn encode_with<T>(&self, mode: BodyMode, payload: &T) -> EnvelopeResult<Value>
    where
        T: Serialize + ?Sized,
    {
        match mode {
            BodyMode::Encrypted => Ok(self.codec.seal(payload)?.to_value()),
            BodyMode::Plaintext => serde_json::to_value(payload)
                .map_err(|e| EnvelopeError::Json(format!("Failed to serialize payload: {}", e))),
        }
    }

    /// Decode a raw body in an explicitly chosen mode
    pub fn decode_with(&self, mode: BodyMode, body: &str) -> EnvelopeResult<Value> {
        match mode {
            BodyMode::Encrypted => self.codec.open(&Envelope::from_json(body)?),
            BodyMode::Plaintext => serde_json::from_str(body)
                .map_err(|e| EnvelopeError::Json(format!("Response is not JSON: {}", e))),
        }
    }

    /// Decode a body the HTTP client already parsed as JSON
    pub fn decode_value_with(&self, mode: BodyMode, body: Value) -> EnvelopeResult<Value> {
        match mode {
            BodyMode::Encrypted => self.codec.open(&Envelope::from_value(body)?),
            BodyMode::Plaintext => Ok(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::EnvelopeKey;
    use crate::transport::mode::EndpointModes;
    use serde_json::json;

    fn body_codec() -> BodyCodec {
        let mut policy = EndpointPolicy::default();
        policy
            .set(
                "/banner/upload",
                EndpointModes::new(BodyMode::Plaintext, BodyMode::Encrypted),
            )
            .unwrap();
        policy.set("/health", EndpointModes::plaintext()).unwrap();
        BodyCodec::new(EnvelopeCodec::new(EnvelopeKey::generate()), policy)
    }

    #[test]
    fn test_encrypted_request_shape() {
        let codec = body_codec();
        let body = codec.encode_request("/banner/list", &json!({"page": 1})).unwrap();
        assert!(body["data"].is_string());

        let envelope = Envelope::from_value(body).unwrap();
        assert_eq!(codec.codec().open(&envelope).unwrap(), json!({"page": 1}));
    }

    #[test]
    fn test_plaintext_request_passthrough() {
        let codec = body_codec();
        let body = codec.encode_request("/banner/upload", &json!({"title": "A"})).unwrap();
        assert_eq!(body, json!({"title": "A"}));
    }

    #[test]
    fn test_request_response_exchange() {
        let codec = body_codec();
        let server_reply = codec
            .encode_with(
                BodyMode::Encrypted,
                &json!({"status": 200, "data": [{"id": 1, "title": "Banner A"}]}),
            )
            .unwrap()
            .to_string();

        let response: ApiResponse = codec.decode_api_response("/banner/list", &server_reply).unwrap();
        assert!(response.is_success());
        assert_eq!(response.data.unwrap()[0]["title"], "Banner A");
    }

    #[test]
    fn test_plaintext_response() {
        let codec = body_codec();
        let value = codec.decode_response("/health", r#"{"status":200}"#).unwrap();
        assert_eq!(value, json!({"status": 200}));

        let err = codec.decode_response("/health", "<html>").unwrap_err();
        assert!(matches!(err, EnvelopeError::Json(_)));
    }

    #[test]
    fn test_plaintext_body_on_encrypted_endpoint_fails() {
        let codec = body_codec();
        let err = codec
            .decode_response("/banner/list", r#"{"status":200,"data":[]}"#)
            .unwrap_err();
        assert!(err.is_decryption());
    }

    #[test]
    fn test_failure_status_surfaces() {
        let codec = body_codec();
        let reply = codec
            .encode_with(BodyMode::Encrypted, &json!({"status": 500, "message": "KYC service down"}))
            .unwrap()
            .to_string();

        let err = codec
            .decode_api_response::<Value>("/kyc/list", &reply)
            .and_then(ApiResponse::into_result)
            .unwrap_err();
        assert!(err.is_api());
        assert!(err.to_string().contains("KYC service down"));
    }

    #[test]
    fn test_typed_failure_keeps_server_message() {
        let codec = body_codec();
        let reply = codec
            .encode_with(
                BodyMode::Encrypted,
                &json!({"status": 500, "message": "KYC service down", "data": ""}),
            )
            .unwrap()
            .to_string();

        let err = codec
            .decode_api_response::<Vec<u64>>("/kyc/list", &reply)
            .and_then(ApiResponse::into_data)
            .unwrap_err();
        assert!(err.is_api());
        assert!(err.to_string().contains("KYC service down"));
    }

    #[test]
    fn test_decode_parsed_value() {
        let codec = body_codec();
        let body = codec.encode_with(BodyMode::Encrypted, &json!([])).unwrap();
        assert_eq!(
            codec.decode_value_with(BodyMode::Encrypted, body).unwrap(),
            json!([])
        );
        assert_eq!(
            codec.decode_value_with(BodyMode::Plaintext, json!({"a": 1})).unwrap(),
            json!({"a": 1})
        );
    }
}
