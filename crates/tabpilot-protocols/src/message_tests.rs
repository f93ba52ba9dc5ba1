use super::*;
use crate::question::QuestionKind;

#[test]
fn test_send_question_wire_tag() {
    let msg = RelayMessage::SendQuestion {
        question: QuestionPayload::new(QuestionKind::TrueFalse, "The sky is blue."),
    };
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value["action"], "sendQuestionToChatGPT");
    assert_eq!(value["question"]["type"], "true_false");
}

#[test]
fn test_response_tags_per_provider() {
    let cases = [
        (
            RelayMessage::ChatGptResponse {
                response: "{}".into(),
            },
            "chatGPTResponse",
        ),
        (
            RelayMessage::GeminiResponse {
                response: "{}".into(),
            },
            "geminiResponse",
        ),
        (
            RelayMessage::DeepseekResponse {
                response: "{}".into(),
            },
            "deepseekResponse",
        ),
    ];
    for (msg, tag) in cases {
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["action"], tag);
        assert_eq!(msg.action(), tag);
        assert_eq!(msg.provider_response(), Some("{}"));
    }
}

#[test]
fn test_process_response_tag_is_legacy_name() {
    let msg = RelayMessage::ProcessResponse {
        response: r#"{"answer":"B"}"#.into(),
    };
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value["action"], "processChatGPTResponse");
}

#[test]
fn test_update_website_url_camel_case() {
    let msg = RelayMessage::UpdateWebsiteUrl {
        website_url: "myschool".into(),
    };
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value["action"], "updateWebsiteUrl");
    assert_eq!(value["websiteUrl"], "myschool");
}

#[test]
fn test_ping_round_trip() {
    let json = serde_json::to_string(&RelayMessage::Ping).unwrap();
    let back: RelayMessage = serde_json::from_str(&json).unwrap();
    assert_eq!(back, RelayMessage::Ping);
}

#[test]
fn test_ack_shapes() {
    assert!(Ack::received().received);
    assert!(!Ack::rejected().received);
    let value = serde_json::to_value(Ack::received()).unwrap();
    assert_eq!(value, serde_json::json!({"received": true}));
}

#[test]
fn test_non_provider_messages_have_no_response() {
    assert!(RelayMessage::Ping.provider_response().is_none());
    assert!(
        RelayMessage::AlertMessage {
            message: "x".into()
        }
        .provider_response()
        .is_none()
    );
}
