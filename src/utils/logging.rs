/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::compose::RowView;
use crate::models::{PersistedOrder, QuestionSet};
use tracing::info;

/// 记录会话启动信息
///
/// # 参数
/// - `question_set`: 正在编辑的题集
pub fn log_session_start(question_set: &QuestionSet) {
    info!("{}", "=".repeat(60));
    info!("🚀 题集编排会话启动");
    info!(
        "📚 题集: {} ({})",
        question_set.title.en, question_set.identifier
    );
    info!("📋 已有题目: {} 道", question_set.questions.len());
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}

/// 逐行输出当前题目顺序
pub fn log_rows(rows: &[RowView]) {
    info!("\n{}", "─".repeat(60));
    for row in rows {
        info!("{}", row);
    }
    info!("{}", "─".repeat(60));
}

/// 记录最终保存的顺序
///
/// # 参数
/// - `order`: 最终顺序
/// - `target`: 保存位置
pub fn log_final_order(order: &PersistedOrder, target: &str) {
    info!("\n{}", "=".repeat(60));
    info!("✅ 已保存 {} 道题目的顺序", order.len());
    info!("💾 保存至: {}", target);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("abc", 3), "abc");
        assert_eq!(truncate_text("abcd", 3), "abc...");
        assert_eq!(truncate_text("加减乘除", 2), "加减...");
    }
}
