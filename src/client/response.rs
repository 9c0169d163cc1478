use serde_json::Value;

use super::error::ClientError;
use super::transport::RelayResponse;

/// Pull the translated text out of a relay response.
pub fn extract_translation(response: &RelayResponse) -> Result<String, ClientError> {
    if !response.is_success() {
        return Err(ClientError::Relay {
            status: response.status,
            message: failure_message(response),
        });
    }

    response
        .body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(|content| content.trim().to_string())
        .ok_or(ClientError::UnexpectedFormat)
}

fn failure_message(response: &RelayResponse) -> String {
    let field = |name: &str| {
        response
            .body
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    field("error")
        .or_else(|| field("message"))
        .unwrap_or_else(|| format!("API error: {}", response.status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: Value) -> RelayResponse {
        RelayResponse { status, body }
    }

    #[test]
    fn trims_extracted_content() {
        let r = response(200, json!({ "choices": [ { "message": { "content": "  Hola  " } } ] }));
        assert_eq!(extract_translation(&r).unwrap(), "Hola");
    }

    #[test]
    fn missing_choices_is_unexpected_format() {
        for body in [
            json!({}),
            json!({ "choices": [] }),
            json!({ "choices": [ {} ] }),
            json!({ "choices": [ { "message": { "content": 5 } } ] }),
        ] {
            assert!(matches!(
                extract_translation(&response(200, body)),
                Err(ClientError::UnexpectedFormat)
            ));
        }
    }

    #[test]
    fn failure_message_precedence() {
        let err = extract_translation(&response(
            401,
            json!({ "error": "bad key", "message": "ignored" }),
        ))
        .unwrap_err();
        assert!(matches!(&err, ClientError::Relay { status: 401, message } if message == "bad key"));

        let err = extract_translation(&response(
            500,
            json!({ "error": "", "message": "connection refused" }),
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), "connection refused");

        let err = extract_translation(&response(503, json!({}))).unwrap_err();
        assert_eq!(err.to_string(), "API error: 503");
    }
}
