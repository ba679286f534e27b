use serde::{Deserialize, Serialize};

/// Response body for endpoints that only report an outcome
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_response_shape() {
        let body = serde_json::to_value(ApiResponse::message("Password updated")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"success": true, "message": "Password updated"})
        );
    }
}
