//! 弹层栈
//!
//! 用显式的栈代替单个“对话框类型”标志，嵌套打开时互不覆盖。

/// 题目编辑器模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    Edit,
    View,
}

impl EditorMode {
    /// 根据题目 ID 和只读标志决定模式
    pub fn resolve(question_id: Option<&str>, view_mode: bool) -> Self {
        match (view_mode, question_id) {
            (true, _) => EditorMode::View,
            (false, Some(_)) => EditorMode::Edit,
            (false, None) => EditorMode::Add,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            EditorMode::Add => "Add Question",
            EditorMode::Edit => "Edit Question",
            EditorMode::View => "View Question",
        }
    }

    pub fn is_read_only(self) -> bool {
        self == EditorMode::View
    }
}

/// 弹层
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Filter,
    QuestionEditor {
        question_id: Option<String>,
        mode: EditorMode,
    },
    ConfirmDelete {
        question_id: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct OverlayStack {
    stack: Vec<Overlay>,
}

impl OverlayStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, overlay: Overlay) {
        tracing::debug!("打开弹层 {:?} (深度 {})", overlay, self.depth() + 1);
        self.stack.push(overlay);
    }

    pub fn pop(&mut self) -> Option<Overlay> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Overlay> {
        self.stack.last()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// 栈顶是否为筛选面板
    pub fn filter_on_top(&self) -> bool {
        matches!(self.top(), Some(Overlay::Filter))
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_mode_resolution() {
        assert_eq!(EditorMode::resolve(Some("q-1"), true), EditorMode::View);
        assert_eq!(EditorMode::resolve(None, true), EditorMode::View);
        assert_eq!(EditorMode::resolve(Some("q-1"), false), EditorMode::Edit);
        assert_eq!(EditorMode::resolve(None, false), EditorMode::Add);
        assert_eq!(EditorMode::View.title(), "View Question");
        assert_eq!(EditorMode::Add.title(), "Add Question");
    }

    #[test]
    fn test_nested_overlays_unwind_in_order() {
        let mut stack = OverlayStack::new();
        stack.push(Overlay::QuestionEditor {
            question_id: Some("q-1".to_string()),
            mode: EditorMode::View,
        });
        stack.push(Overlay::ConfirmDelete {
            question_id: "q-2".to_string(),
        });
        assert_eq!(stack.depth(), 2);

        assert!(matches!(stack.pop(), Some(Overlay::ConfirmDelete { .. })));
        assert!(matches!(
            stack.top(),
            Some(Overlay::QuestionEditor { mode: EditorMode::View, .. })
        ));
        stack.pop();
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
    }
}
