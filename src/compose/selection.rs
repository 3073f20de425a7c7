//! 有序选题模型
//!
//! 持有当前题集正在编排的题目顺序。只提供同步的 add / remove / reorder，
//! 不做任何 I/O。越界等非法操作一律视为空操作。

use crate::models::{PersistedOrder, QuestionSummary};
use std::collections::HashSet;
use tracing::debug;

/// 有序选题
///
/// 不变量：标识唯一；删除只改变其余题目的位置，不改变标识。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedSelection {
    entries: Vec<QuestionSummary>,
}

impl OrderedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用已有题目初始化，重复标识只保留第一次出现的
    pub fn from_summaries(seed: impl IntoIterator<Item = QuestionSummary>) -> Self {
        let mut selection = Self::new();
        selection.add(seed);
        selection
    }

    /// 追加不在列表中的候选题，保持输入的相对顺序
    ///
    /// 返回实际追加的数量
    pub fn add(&mut self, candidates: impl IntoIterator<Item = QuestionSummary>) -> usize {
        let mut seen: HashSet<String> = self.entries.iter().map(|q| q.identifier.clone()).collect();
        let before = self.entries.len();

        for candidate in candidates {
            if seen.insert(candidate.identifier.clone()) {
                self.entries.push(candidate);
            } else {
                debug!("题目 {} 已在列表中，忽略", candidate.identifier);
            }
        }

        self.entries.len() - before
    }

    /// 删除指定题目，不存在时为空操作
    pub fn remove(&mut self, identifier: &str) -> Option<QuestionSummary> {
        let pos = self.position_of(identifier)?;
        Some(self.entries.remove(pos))
    }

    /// 将 `from` 位置的题目移动到 `to`，中间的题目依次平移一位
    ///
    /// `from == to` 或任一索引越界时不做任何修改，返回 false
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.entries.len();
        if from == to || from >= len || to >= len {
            debug!("忽略无效的重排: {} -> {} (共 {} 项)", from, to, len);
            return false;
        }

        let item = self.entries.remove(from);
        self.entries.insert(to, item);
        true
    }

    /// 原位替换同标识的题目摘要，位置不变
    pub fn refresh(&mut self, summary: QuestionSummary) -> bool {
        match self.position_of(&summary.identifier) {
            Some(pos) => {
                self.entries[pos] = summary;
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> &[QuestionSummary] {
        &self.entries
    }

    pub fn position_of(&self, identifier: &str) -> Option<usize> {
        self.entries.iter().position(|q| q.identifier == identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.position_of(identifier).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&QuestionSummary> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn identifiers(&self) -> Vec<String> {
        self.entries.iter().map(|q| q.identifier.clone()).collect()
    }

    pub fn into_order(self) -> PersistedOrder {
        PersistedOrder(self.entries.into_iter().map(|q| q.identifier).collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Description, QuestionBody, QuestionType};

    pub(crate) fn summary(id: &str) -> QuestionSummary {
        QuestionSummary {
            identifier: id.to_string(),
            x_id: format!("X-{}", id),
            description: Description::en(format!("Question {}", id)),
            question_type: QuestionType::Addition,
            question_body: QuestionBody::default(),
        }
    }

    fn selection(ids: &[&str]) -> OrderedSelection {
        OrderedSelection::from_summaries(ids.iter().map(|id| summary(id)))
    }

    fn sorted(mut ids: Vec<String>) -> Vec<String> {
        ids.sort();
        ids
    }

    #[test]
    fn test_reorder_first_to_last() {
        let mut sel = selection(&["A", "B", "C"]);
        assert!(sel.reorder(0, 2));
        assert_eq!(sel.identifiers(), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_reorder_last_to_first() {
        let mut sel = selection(&["A", "B", "C", "D"]);
        assert!(sel.reorder(3, 1));
        assert_eq!(sel.identifiers(), vec!["A", "D", "B", "C"]);
    }

    #[test]
    fn test_reorder_preserves_identifier_set() {
        let ids = ["A", "B", "C", "D", "E"];
        for from in 0..ids.len() {
            for to in 0..ids.len() {
                let mut sel = selection(&ids);
                let before = sorted(sel.identifiers());
                sel.reorder(from, to);
                assert_eq!(sorted(sel.identifiers()), before, "reorder({}, {})", from, to);
                assert_eq!(sel.identifiers()[to], ids[from]);
            }
        }
    }

    #[test]
    fn test_reorder_same_index_is_noop() {
        let mut sel = selection(&["A", "B", "C"]);
        for i in 0..3 {
            assert!(!sel.reorder(i, i));
            assert_eq!(sel.identifiers(), vec!["A", "B", "C"]);
        }
    }

    #[test]
    fn test_reorder_out_of_bounds_is_noop() {
        let mut sel = selection(&["A", "B", "C"]);
        assert!(!sel.reorder(0, 3));
        assert!(!sel.reorder(7, 1));
        assert_eq!(sel.identifiers(), vec!["A", "B", "C"]);

        let mut empty = OrderedSelection::new();
        assert!(!empty.reorder(0, 0));
        assert!(!empty.reorder(0, 1));
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut sel = selection(&["A", "B"]);
        assert_eq!(sel.add(vec![summary("A")]), 0);
        assert_eq!(sel.identifiers(), vec!["A", "B"]);

        assert_eq!(sel.add(vec![summary("C"), summary("B"), summary("D"), summary("C")]), 2);
        assert_eq!(sel.identifiers(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_remove_then_remove_again() {
        let mut sel = selection(&["A", "B", "C"]);
        assert!(sel.remove("B").is_some());
        assert_eq!(sel.identifiers(), vec!["A", "C"]);
        assert!(sel.remove("B").is_none());
        assert_eq!(sel.identifiers(), vec!["A", "C"]);
    }

    #[test]
    fn test_refresh_keeps_position() {
        let mut sel = selection(&["A", "B", "C"]);
        let mut updated = summary("B");
        updated.description = Description::en("Edited");
        assert!(sel.refresh(updated));
        assert_eq!(sel.position_of("B"), Some(1));
        assert_eq!(sel.get(1).unwrap().description.en, "Edited");
        assert!(!sel.refresh(summary("Z")));
        assert_eq!(sel.len(), 3);
    }

    #[test]
    fn test_seed_drops_duplicates_and_builds_order() {
        let sel = selection(&["A", "B", "A"]);
        assert_eq!(sel.len(), 2);
        assert_eq!(sel.into_order().identifiers(), &["A".to_string(), "B".to_string()]);
    }
}
