use serde::{Deserialize, Serialize};

/// 题型
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    /// 加法
    Addition,
    /// 减法
    Subtraction,
    /// 乘法
    Multiplication,
    /// 除法
    Division,
    /// 选择题
    Mcq,
    /// 填空题
    Fib,
    /// 未知题型，保留原始标签
    Other(String),
}

static QUESTION_TYPES: phf::Map<&'static str, QuestionType> = phf::phf_map! {
    "addition" => QuestionType::Addition,
    "subtraction" => QuestionType::Subtraction,
    "multiplication" => QuestionType::Multiplication,
    "division" => QuestionType::Division,
    "mcq" => QuestionType::Mcq,
    "fib" => QuestionType::Fib,
};

impl QuestionType {
    /// 从标签解析题型（大小写不敏感）
    pub fn parse(tag: &str) -> Self {
        let normalized = tag.trim().to_lowercase();
        QUESTION_TYPES
            .get(normalized.as_str())
            .cloned()
            .unwrap_or_else(|| QuestionType::Other(tag.to_string()))
    }

    /// 获取题型标签
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::Addition => "addition",
            QuestionType::Subtraction => "subtraction",
            QuestionType::Multiplication => "multiplication",
            QuestionType::Division => "division",
            QuestionType::Mcq => "mcq",
            QuestionType::Fib => "fib",
            QuestionType::Other(tag) => tag,
        }
    }

    pub fn is_mcq(&self) -> bool {
        matches!(self, QuestionType::Mcq)
    }
}

impl From<String> for QuestionType {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<QuestionType> for String {
    fn from(question_type: QuestionType) -> Self {
        question_type.as_str().to_string()
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_and_unknown() {
        assert_eq!(QuestionType::parse("MCQ"), QuestionType::Mcq);
        assert_eq!(QuestionType::parse(" addition "), QuestionType::Addition);
        assert_eq!(
            QuestionType::parse("grid-1"),
            QuestionType::Other("grid-1".to_string())
        );
        assert!(QuestionType::parse("mcq").is_mcq());
    }

    #[test]
    fn test_serde_uses_plain_tag() {
        let json = serde_json::to_string(&QuestionType::Division).unwrap();
        assert_eq!(json, "\"division\"");
        let parsed: QuestionType = serde_json::from_str("\"fib\"").unwrap();
        assert_eq!(parsed, QuestionType::Fib);
    }
}
