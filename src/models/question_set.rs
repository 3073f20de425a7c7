use crate::models::{Description, NamedRef, QuestionSummary, Taxonomy};
use serde::{Deserialize, Serialize};

/// 题集用途
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSetPurpose {
    /// 主诊断题集，允许按年级筛选候选题
    MainDiagnostic,
    Practice,
    #[default]
    #[serde(other)]
    Other,
}

/// 题集
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub identifier: String,
    #[serde(default)]
    pub title: Description,
    pub repository: NamedRef,
    pub taxonomy: Taxonomy,
    #[serde(default)]
    pub purpose: QuestionSetPurpose,
    /// 题集中已有的题目（按顺序）
    #[serde(default)]
    pub questions: Vec<QuestionSummary>,
}

impl QuestionSet {
    /// 年级筛选是否可用
    pub fn class_filter_enabled(&self) -> bool {
        self.purpose == QuestionSetPurpose::MainDiagnostic
    }
}

/// 题集中题目的持久化顺序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedOrder(pub Vec<String>);

/// 顺序中的一项（接口格式，sequence 从 1 开始）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedQuestion {
    pub identifier: String,
    pub sequence: usize,
}

impl PersistedOrder {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn identifiers(&self) -> &[String] {
        &self.0
    }

    /// 转换为接口需要的带序号格式
    pub fn to_sequenced(&self) -> Vec<SequencedQuestion> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, id)| SequencedQuestion {
                identifier: id.clone(),
                sequence: i + 1,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_purpose_falls_back_to_other() {
        let purpose: QuestionSetPurpose = serde_json::from_str("\"remedial\"").unwrap();
        assert_eq!(purpose, QuestionSetPurpose::Other);
        let purpose: QuestionSetPurpose = serde_json::from_str("\"main_diagnostic\"").unwrap();
        assert_eq!(purpose, QuestionSetPurpose::MainDiagnostic);
    }

    #[test]
    fn test_sequenced_order_is_one_based() {
        let order = PersistedOrder(vec!["b".to_string(), "a".to_string()]);
        let sequenced = order.to_sequenced();
        assert_eq!(sequenced[0].identifier, "b");
        assert_eq!(sequenced[0].sequence, 1);
        assert_eq!(sequenced[1].sequence, 2);
    }
}
