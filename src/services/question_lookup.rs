//! 候选题查询服务 - 业务能力层
//!
//! 只负责“按条件分页查题”能力，不关心结果如何合并到界面状态

use crate::clients::QuestionClient;
use crate::compose::FilterPanel;
use crate::error::AppResult;
use crate::models::{QuestionSet, QuestionSummary};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// 查询条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupQuery {
    pub search_query: String,
    pub repository_id: String,
    pub board_id: String,
    pub l1_skill_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l2_skill_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l3_skill_id: Option<String>,
    pub page_no: u32,
}

impl LookupQuery {
    /// 组合搜索词、题集固定范围和筛选条件
    ///
    /// 年级筛选可用时 `class_id` 取自筛选条件，否则取自题集分类
    pub fn build(
        term: &str,
        question_set: &QuestionSet,
        filters: &FilterPanel,
        page_no: u32,
    ) -> Self {
        let effective = filters.effective();
        let taxonomy = &question_set.taxonomy;
        let class_id = if filters.class_enabled() {
            effective.class_id
        } else {
            Some(taxonomy.class.identifier.clone()).filter(|id| !id.is_empty())
        };

        Self {
            search_query: term.trim().to_string(),
            repository_id: question_set.repository.identifier.clone(),
            board_id: taxonomy.board.identifier.clone(),
            l1_skill_id: taxonomy.l1_skill.identifier.clone(),
            class_id,
            l2_skill_id: effective.l2_skill_id,
            l3_skill_id: effective.l3_skill_id,
            page_no,
        }
    }

    /// 除页码外是否为同一查询
    pub fn same_search(&self, other: &LookupQuery) -> bool {
        Self {
            page_no: other.page_no,
            ..self.clone()
        } == *other
    }

    pub fn next_page(&self) -> Self {
        Self {
            page_no: self.page_no + 1,
            ..self.clone()
        }
    }
}

/// 一页候选题
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupPage {
    pub questions: Vec<QuestionSummary>,
    pub total_count: u64,
}

/// 候选题查询
#[async_trait]
pub trait QuestionLookup: Send + Sync {
    async fn search(&self, query: &LookupQuery) -> AppResult<LookupPage>;
}

#[async_trait]
impl<T: QuestionLookup + ?Sized> QuestionLookup for Arc<T> {
    async fn search(&self, query: &LookupQuery) -> AppResult<LookupPage> {
        (**self).search(query).await
    }
}

/// 基于 HTTP 接口的查询实现
pub struct HttpQuestionLookup {
    client: Arc<QuestionClient>,
}

impl HttpQuestionLookup {
    pub fn new(client: Arc<QuestionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuestionLookup for HttpQuestionLookup {
    async fn search(&self, query: &LookupQuery) -> AppResult<LookupPage> {
        debug!(
            "查询候选题 - 关键词: {:?}, 页码: {}",
            query.search_query, query.page_no
        );
        let result = self.client.list_questions(query).await?;
        Ok(LookupPage {
            questions: result.questions.iter().map(QuestionSummary::from).collect(),
            total_count: result.meta.total,
        })
    }
}
