/// Request and result types exchanged between the form, the HTTP handler,
/// and the QA script.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{QaError, Result};
use crate::topic::Topic;

/// Body of `POST /api/qa`. The topic stays a raw string so an unknown key
/// reaches the handler and is answered with a 400 rather than a JSON
/// extractor rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub topic: String,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaResult {
    pub answer: String,
    #[serde(default)]
    pub references: Vec<String>,
}

impl QaResult {
    /// Validate the payload of a `result` frame. It must be an object with an
    /// `answer` string; `references` is optional.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.as_object().is_some_and(|o| o.contains_key("answer")) {
            return Err(QaError::InvalidResult("missing `answer` field".to_string()));
        }
        serde_json::from_value(value).map_err(|e| QaError::InvalidResult(e.to_string()))
    }
}

/// One entry of the topic selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl From<Topic> for TopicOption {
    fn from(topic: Topic) -> Self {
        Self { value: topic.key(), label: topic.label() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_result_keeps_reference_order() {
        let result = QaResult::from_value(json!({
            "answer": "A",
            "references": ["来源: c.pdf", "来源: a.pdf", "来源: b.pdf"]
        })).unwrap();
        assert_eq!(result, QaResult {
            answer: "A".to_string(),
            references: vec![
                "来源: c.pdf".to_string(),
                "来源: a.pdf".to_string(),
                "来源: b.pdf".to_string(),
            ],
        });
    }

    #[test]
    fn test_result_references_default_to_empty() {
        let result = QaResult::from_value(json!({ "answer": "only" })).unwrap();
        assert!(result.references.is_empty());
    }

    #[test]
    fn test_result_without_answer_rejected() {
        let err = QaResult::from_value(json!({ "error": "boom", "references": [] })).unwrap_err();
        assert!(matches!(err, QaError::InvalidResult(_)));
    }

    #[test]
    fn test_non_object_result_rejected() {
        for value in [json!("answer"), json!(["answer"]), json!(42)] {
            assert!(matches!(QaResult::from_value(value), Err(QaError::InvalidResult(_))));
        }
    }

    #[test]
    fn test_non_string_answer_rejected() {
        let err = QaResult::from_value(json!({ "answer": 7 })).unwrap_err();
        assert!(matches!(err, QaError::InvalidResult(_)));
    }

    #[test]
    fn test_topic_option_from_topic() {
        let opt = TopicOption::from(Topic::BiomechanicsSpace);
        assert_eq!(opt.value, "biomechanics-space");
        assert_eq!(opt.label, "生物力学空间");
    }
}
