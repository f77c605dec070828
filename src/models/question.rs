use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<Conditional>,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// Kind-specific shape of a question, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    SingleChoice {
        #[serde(default)]
        options: Vec<String>,
    },
    MultiChoice {
        #[serde(default)]
        options: Vec<String>,
    },
    ShortText {
        #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    LongText {
        #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    Numeric {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        range: Option<NumericRange>,
    },
    FileUpload {},
}

impl QuestionKind {
    pub fn options(&self) -> Option<&[String]> {
        match self {
            QuestionKind::SingleChoice { options } | QuestionKind::MultiChoice { options } => {
                Some(options)
            }
            _ => None,
        }
    }

    pub fn options_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            QuestionKind::SingleChoice { options } | QuestionKind::MultiChoice { options } => {
                Some(options)
            }
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice { .. } => "single-choice",
            QuestionKind::MultiChoice { .. } => "multi-choice",
            QuestionKind::ShortText { .. } => "short-text",
            QuestionKind::LongText { .. } => "long-text",
            QuestionKind::Numeric { .. } => "numeric",
            QuestionKind::FileUpload {} => "file-upload",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Visibility rule: the owning question is shown only when question
/// `question_id` was answered with `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditional {
    pub question_id: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_tagged_question_kinds() {
        let q: Question = serde_json::from_value(json!({
            "id": "q1",
            "text": "Years of Rust?",
            "type": "numeric",
            "required": true,
            "range": { "min": 0, "max": 40 }
        }))
        .unwrap();
        assert_eq!(
            q.kind,
            QuestionKind::Numeric {
                range: Some(NumericRange { min: 0.0, max: 40.0 })
            }
        );

        let q: Question = serde_json::from_value(json!({
            "id": "q2",
            "text": "Why us?",
            "type": "long-text",
            "maxLength": 500,
            "conditional": { "questionId": "q1", "value": "5" }
        }))
        .unwrap();
        assert_eq!(q.kind, QuestionKind::LongText { max_length: Some(500) });
        assert_eq!(q.conditional.unwrap().question_id, "q1");
        assert!(!q.required);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = serde_json::from_value::<Question>(json!({
            "id": "q1",
            "text": "?",
            "type": "essay"
        }));
        assert!(err.is_err());
    }

    #[test]
    fn file_upload_serializes_with_type_only() {
        let q = Question {
            id: "cv".into(),
            text: "Upload CV".into(),
            required: true,
            points: None,
            conditional: None,
            kind: QuestionKind::FileUpload {},
        };
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["type"], "file-upload");
        assert!(value.get("options").is_none());
    }
}
