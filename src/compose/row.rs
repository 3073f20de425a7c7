//! 行展示
//!
//! 纯展示逻辑：给定题目摘要、从 1 开始的序号和拖拽视觉状态，生成 [`RowView`]。
//! 行本身不处理拖拽，只把查看 / 编辑 / 移除意图交给 [`RowActionHandler`]。

use crate::compose::RowVisual;
use crate::models::QuestionSummary;
use crate::utils::truncate_text;
use std::fmt;

/// 缺失字段的占位符
pub const EMPTY_PLACEHOLDER: &str = "--";

/// 选项预览的最大字符数
pub const OPTIONS_PREVIEW_CHARS: usize = 20;

/// 行内操作的接收方
pub trait RowActionHandler {
    fn on_view(&mut self, identifier: &str);
    fn on_edit(&mut self, identifier: &str);
    fn on_remove(&mut self, identifier: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    View,
    Edit,
    Remove,
}

/// 行内的一个次要字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowField {
    pub label: &'static str,
    /// 显示文本（可能被截断）
    pub value: String,
    /// 悬停时显示的完整文本
    pub tooltip: Option<String>,
}

/// 一行的展示模型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub identifier: String,
    pub position: usize,
    pub title: String,
    pub code: String,
    pub visual: RowVisual,
    pub fields: Vec<RowField>,
}

impl RowView {
    pub fn field(&self, label: &str) -> Option<&RowField> {
        self.fields.iter().find(|f| f.label == label)
    }

    /// 触发行内操作
    pub fn dispatch(&self, action: RowAction, handler: &mut impl RowActionHandler) {
        match action {
            RowAction::View => handler.on_view(&self.identifier),
            RowAction::Edit => handler.on_edit(&self.identifier),
            RowAction::Remove => handler.on_remove(&self.identifier),
        }
    }
}

impl fmt::Display for RowView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.visual {
            RowVisual::Idle => " ",
            RowVisual::Dragging => "*",
            RowVisual::DropTarget => ">",
        };
        write!(f, "{}{}. {} ({})", marker, self.position, self.title, self.code)?;
        for field in &self.fields {
            write!(f, " | {}: {}", field.label, field.value)?;
        }
        Ok(())
    }
}

/// 生成一行的展示模型
pub fn present(summary: &QuestionSummary, position: usize, visual: RowVisual) -> RowView {
    let body = &summary.question_body;
    let mut fields = Vec::with_capacity(5);

    let question_type = summary.question_type.as_str();
    fields.push(RowField {
        label: "Question Type",
        value: or_placeholder(question_type),
        tooltip: None,
    });

    for (label, key) in [("N1", "n1"), ("N2", "n2")] {
        if let Some(value) = body.number(key) {
            fields.push(RowField {
                label,
                value: value.to_string(),
                tooltip: None,
            });
        }
    }

    if let Some(url) = body.image_url() {
        fields.push(RowField {
            label: "Image",
            value: "Attached".to_string(),
            tooltip: Some(url.to_string()),
        });
    }

    if let Some(options) = body.options() {
        let joined = options.join(", ");
        fields.push(RowField {
            label: "Options",
            value: truncate_text(&joined, OPTIONS_PREVIEW_CHARS),
            tooltip: Some(joined),
        });
    }

    RowView {
        identifier: summary.identifier.clone(),
        position,
        title: or_placeholder(&summary.description.en),
        code: or_placeholder(&summary.x_id),
        visual,
        fields,
    }
}

fn or_placeholder(value: &str) -> String {
    if value.trim().is_empty() {
        EMPTY_PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}
