//! The `{ status, message, data, report }` response convention
//!
//! Status `200` is success. Any other status is a failure described by
//! `message`.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EnvelopeError, EnvelopeResult};

/// Application-level success status
pub const SUCCESS_STATUS: i64 = 200;

/// A decoded API response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = Value> {
    pub status: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Value>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    /// Turn a non-success status into [`EnvelopeError::Api`]
    pub fn into_result(self) -> EnvelopeResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(EnvelopeError::api(self.status, self.message))
        }
    }

    /// The `data` field of a successful response
    pub fn into_data(self) -> EnvelopeResult<Option<T>> {
        self.into_result().map(|response| response.data)
    }
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Read the convention from a decoded JSON body
    ///
    /// `data` is converted to `T` only for a successful status. On failure it
    /// is kept when it fits `T` and dropped otherwise, so `message` always
    /// reaches [`ApiResponse::into_result`].
    pub fn from_value(value: Value) -> EnvelopeResult<Self> {
        let raw: ApiResponse<Value> = serde_json::from_value(value).map_err(|e| {
            EnvelopeError::Json(format!("Response does not follow the status convention: {}", e))
        })?;

        let data = match raw.data {
            Some(data) if raw.status == SUCCESS_STATUS => {
                Some(serde_json::from_value(data).map_err(|e| {
                    EnvelopeError::Json(format!("Response data has unexpected shape: {}", e))
                })?)
            }
            Some(data) => serde_json::from_value(data).ok(),
            None => None,
        };

        Ok(ApiResponse {
            status: raw.status,
            message: raw.message,
            data,
            report: raw.report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success() {
        let response: ApiResponse =
            ApiResponse::from_value(json!({"status": 200, "data": [{"id": 1}]})).unwrap();
        assert!(response.is_success());
        assert_eq!(response.into_data().unwrap(), Some(json!([{"id": 1}])));
    }

    #[test]
    fn test_failure_carries_message() {
        let response: ApiResponse =
            ApiResponse::from_value(json!({"status": 401, "message": "Session expired"})).unwrap();
        assert!(!response.is_success());

        match response.into_result().unwrap_err() {
            EnvelopeError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Session expired");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_report_field() {
        let response: ApiResponse = ApiResponse::from_value(json!({
            "status": 200,
            "data": [],
            "report": {"total": 42, "pending": 3}
        }))
        .unwrap();
        assert_eq!(response.report.unwrap()["total"], 42);
    }

    #[test]
    fn test_typed_data() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Redeem {
            id: u64,
            amount: f64,
        }

        let response: ApiResponse<Vec<Redeem>> =
            ApiResponse::from_value(json!({"status": 200, "data": [{"id": 5, "amount": 12.5}]}))
                .unwrap();
        assert_eq!(
            response.into_data().unwrap().unwrap(),
            vec![Redeem { id: 5, amount: 12.5 }]
        );
    }

    #[test]
    fn test_failure_with_mismatched_data_keeps_message() {
        let response: ApiResponse<Vec<u64>> = ApiResponse::from_value(json!({
            "status": 500,
            "message": "KYC service down",
            "data": ""
        }))
        .unwrap();
        assert_eq!(response.data, None);

        match response.into_result().unwrap_err() {
            EnvelopeError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "KYC service down");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failure_data_kept_when_it_fits() {
        let response: ApiResponse<Vec<u64>> =
            ApiResponse::from_value(json!({"status": 409, "message": "Duplicate", "data": [4, 5]}))
                .unwrap();
        assert_eq!(response.data, Some(vec![4, 5]));
        assert!(!response.is_success());
    }

    #[test]
    fn test_success_with_mismatched_data_rejected() {
        let err = ApiResponse::<Vec<u64>>::from_value(json!({"status": 200, "data": "oops"}))
            .unwrap_err();
        assert!(matches!(err, EnvelopeError::Json(_)));
    }

    #[test]
    fn test_negative_status_is_failure() {
        let response: ApiResponse =
            ApiResponse::from_value(json!({"status": -1, "message": "Invalid token"})).unwrap();
        assert!(!response.is_success());

        let err = response.into_result().unwrap_err();
        assert!(matches!(err, EnvelopeError::Api { status: -1, .. }));
        assert_eq!(err.to_string(), "API error (status -1): Invalid token");
    }

    #[test]
    fn test_missing_status_rejected() {
        let err = ApiResponse::<Value>::from_value(json!({"data": []})).unwrap_err();
        assert!(matches!(err, EnvelopeError::Json(_)));
    }

    #[test]
    fn test_null_data_is_none() {
        let response: ApiResponse = ApiResponse::from_value(json!({"status": 200, "data": null})).unwrap();
        assert_eq!(response.data, None);
    }
}
