use crate::error::AppError;
use crate::models::{PersistedOrder, QuestionSet, QuestionSummary};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载题集
pub async fn load_question_set(toml_file_path: &Path) -> Result<QuestionSet> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let question_set: QuestionSet = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    tracing::info!(
        "成功加载题集 {}，包含 {} 个题目",
        question_set.identifier,
        question_set.questions.len()
    );

    Ok(question_set)
}

/// 将新的题目顺序写回题集 TOML 文件
///
/// `known` 为本次会话中出现过的题目摘要，用于补全新加入的题目。
/// 顺序中找不到摘要的题目会被跳过并记录警告。
pub async fn save_question_set_order(
    toml_file_path: &Path,
    question_set: &QuestionSet,
    order: &PersistedOrder,
    known: &[QuestionSummary],
) -> Result<()> {
    let by_id: HashMap<&str, &QuestionSummary> = question_set
        .questions
        .iter()
        .chain(known.iter())
        .map(|q| (q.identifier.as_str(), q))
        .collect();

    let mut updated = question_set.clone();
    updated.questions = order
        .identifiers()
        .iter()
        .filter_map(|id| match by_id.get(id.as_str()) {
            Some(summary) => Some((*summary).clone()),
            None => {
                tracing::warn!("顺序中的题目 {} 没有摘要信息，已跳过", id);
                None
            }
        })
        .collect();

    let content = toml::to_string_pretty(&updated).context("无法序列化题集")?;
    fs::write(toml_file_path, content)
        .await
        .map_err(|e| AppError::file_write_failed(toml_file_path.display().to_string(), e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileError;
    use crate::models::{
        Description, NamedRef, QuestionBody, QuestionSetPurpose, QuestionType, Taxonomy,
    };

    fn summary(id: &str) -> QuestionSummary {
        QuestionSummary {
            identifier: id.to_string(),
            x_id: format!("X-{}", id),
            description: Description::en(format!("Question {}", id)),
            question_type: QuestionType::Addition,
            question_body: QuestionBody::default(),
        }
    }

    fn question_set() -> QuestionSet {
        QuestionSet {
            identifier: "set-1".to_string(),
            title: Description::en("Diagnostic"),
            repository: NamedRef::new("repo-1", "Repo"),
            taxonomy: Taxonomy {
                board: NamedRef::new("board-1", "Board"),
                class: NamedRef::new("class-1", "Class One"),
                l1_skill: NamedRef::new("skill-1", "Addition"),
                l2_skill: Vec::new(),
                l3_skill: Vec::new(),
            },
            purpose: QuestionSetPurpose::MainDiagnostic,
            questions: vec![summary("a"), summary("b")],
        }
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_new_order() {
        let path = std::env::temp_dir().join(format!(
            "question_set_composer_{}_{}.toml",
            std::process::id(),
            "order"
        ));
        let set = question_set();
        let order = PersistedOrder(vec!["c".to_string(), "a".to_string(), "missing".to_string()]);

        save_question_set_order(&path, &set, &order, &[summary("c")])
            .await
            .unwrap();
        let loaded = load_question_set(&path).await.unwrap();
        let _ = std::fs::remove_file(&path);

        let ids: Vec<&str> = loaded.questions.iter().map(|q| q.identifier.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
        assert_eq!(loaded.purpose, QuestionSetPurpose::MainDiagnostic);
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_reports_write_failure() {
        let path = std::env::temp_dir()
            .join(format!("question_set_composer_missing_{}", std::process::id()))
            .join("set.toml");
        let set = question_set();
        let order = PersistedOrder(vec!["a".to_string()]);

        let err = save_question_set_order(&path, &set, &order, &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::File(FileError::WriteFailed { .. }))
        ));
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let result = load_question_set(Path::new("/definitely/not/here.toml")).await;
        assert!(result.is_err());
    }
}
