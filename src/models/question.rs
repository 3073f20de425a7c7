use crate::models::QuestionType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 多语言文本
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    #[serde(default)]
    pub en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kn: Option<String>,
}

impl Description {
    pub fn en(text: impl Into<String>) -> Self {
        Self {
            en: text.into(),
            ..Self::default()
        }
    }
}

/// 带名称的引用（题库、教材、年级、技能）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub identifier: String,
    #[serde(default)]
    pub name: Description,
}

impl NamedRef {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: Description::en(name),
        }
    }
}

/// 课程分类
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub board: NamedRef,
    pub class: NamedRef,
    pub l1_skill: NamedRef,
    #[serde(default)]
    pub l2_skill: Vec<NamedRef>,
    #[serde(default)]
    pub l3_skill: Vec<NamedRef>,
}

/// 题目主体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBody {
    /// 操作数，如 `n1` / `n2`
    #[serde(default)]
    pub numbers: BTreeMap<String, Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_option: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_image_url: Option<String>,
}

impl QuestionBody {
    /// 获取非空操作数
    pub fn number(&self, key: &str) -> Option<&str> {
        self.numbers
            .get(key)
            .and_then(|v| v.as_deref())
            .filter(|v| !v.trim().is_empty())
    }

    /// 获取非空选项列表
    pub fn options(&self) -> Option<&[String]> {
        self.options.as_deref().filter(|opts| !opts.is_empty())
    }

    pub fn image_url(&self) -> Option<&str> {
        self.question_image_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }
}

/// 题目状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    #[default]
    Draft,
    Live,
}

/// 题目摘要
///
/// 题集编排中的一项。在拖拽排序过程中只改变位置，内容不变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub identifier: String,
    #[serde(default)]
    pub x_id: String,
    #[serde(default)]
    pub description: Description,
    pub question_type: QuestionType,
    #[serde(default)]
    pub question_body: QuestionBody,
}

/// 完整题目记录（列表页使用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub identifier: String,
    #[serde(default)]
    pub x_id: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub description: Description,
    #[serde(default)]
    pub status: QuestionStatus,
    #[serde(default)]
    pub repository: NamedRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<Taxonomy>,
    #[serde(default)]
    pub question_body: QuestionBody,
    #[serde(default)]
    pub question_set_ids: Vec<String>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl From<&Question> for QuestionSummary {
    fn from(question: &Question) -> Self {
        Self {
            identifier: question.identifier.clone(),
            x_id: question.x_id.clone(),
            description: question.description.clone(),
            question_type: question.question_type.clone(),
            question_body: question.question_body.clone(),
        }
    }
}

impl From<Question> for QuestionSummary {
    fn from(question: Question) -> Self {
        Self {
            identifier: question.identifier,
            x_id: question.x_id,
            description: question.description,
            question_type: question.question_type,
            question_body: question.question_body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_question_with_missing_fields() {
        let question: Question = serde_json::from_value(json!({
            "identifier": "q-1",
            "question_type": "addition",
            "question_body": { "numbers": { "n1": "12", "n2": null } }
        }))
        .unwrap();

        assert_eq!(question.status, QuestionStatus::Draft);
        assert!(question.is_active);
        assert_eq!(question.question_body.number("n1"), Some("12"));
        assert_eq!(question.question_body.number("n2"), None);

        let summary = QuestionSummary::from(&question);
        assert_eq!(summary.identifier, "q-1");
        assert_eq!(summary.question_type, QuestionType::Addition);
    }

    #[test]
    fn test_body_treats_blank_values_as_absent() {
        let body = QuestionBody {
            options: Some(Vec::new()),
            question_image_url: Some("  ".to_string()),
            ..QuestionBody::default()
        };
        assert!(body.options().is_none());
        assert!(body.image_url().is_none());
    }
}
