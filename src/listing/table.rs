//! 题目列表状态
//!
//! 当前页的排序、发布、删除确认和查看弹层。排序只在客户端对当前页进行。

use crate::clients::QuestionClient;
use crate::compose::{EditorMode, Overlay, OverlayStack};
use crate::error::{AppResult, BusinessError};
use crate::listing::{cell, Cell, ListingColumn, ListingContext};
use crate::models::{Question, QuestionStatus};
use crate::services::LookupQuery;
use std::cmp::Ordering;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: ListingColumn,
    pub direction: SortDirection,
}

/// 列表发出的导航意图
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingIntent {
    NavigateToEdit(String),
}

#[derive(Debug, Default)]
pub struct QuestionListing {
    rows: Vec<Question>,
    total_count: u64,
    sort: Option<SortState>,
    overlays: OverlayStack,
    publishing_id: Option<String>,
    deleting_id: Option<String>,
}

impl QuestionListing {
    pub fn new(rows: Vec<Question>, total_count: u64) -> Self {
        Self {
            rows,
            total_count,
            ..Self::default()
        }
    }

    /// 替换为新一页数据，排序状态保留
    pub fn set_page(&mut self, rows: Vec<Question>, total_count: u64) {
        self.rows = rows;
        self.total_count = total_count;
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub fn overlays(&self) -> &OverlayStack {
        &self.overlays
    }

    /// 切换排序：升序 -> 降序 -> 不排序；不可排序的列忽略
    pub fn toggle_sort(&mut self, column: ListingColumn) {
        if !column.sortable() {
            debug!("列 {} 不可排序", column.header());
            return;
        }
        self.sort = match self.sort {
            Some(SortState {
                column: current,
                direction: SortDirection::Asc,
            }) if current == column => Some(SortState {
                column,
                direction: SortDirection::Desc,
            }),
            Some(SortState {
                column: current,
                direction: SortDirection::Desc,
            }) if current == column => None,
            _ => Some(SortState {
                column,
                direction: SortDirection::Asc,
            }),
        };
    }

    pub fn sorted_rows(&self) -> Vec<&Question> {
        let mut rows: Vec<&Question> = self.rows.iter().collect();
        if let Some(sort) = self.sort {
            rows.sort_by(|a, b| {
                let ordering = compare(sort.column, a, b);
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }
        rows
    }

    /// 按当前排序生成所有单元格
    pub fn cells(&self, ctx: &ListingContext) -> Vec<Vec<Cell>> {
        self.sorted_rows()
            .into_iter()
            .map(|q| ListingColumn::ALL.iter().map(|c| cell(*c, q, ctx)).collect())
            .collect()
    }

    fn find_mut(&mut self, identifier: &str) -> Option<&mut Question> {
        self.rows.iter_mut().find(|q| q.identifier == identifier)
    }

    // ========== 发布 ==========

    /// 只有草稿可以发布
    pub fn begin_publish(&mut self, identifier: &str) -> AppResult<()> {
        let question = self
            .find_mut(identifier)
            .ok_or_else(|| BusinessError::QuestionNotFound {
                question_id: identifier.to_string(),
            })?;
        if question.status != QuestionStatus::Draft {
            return Err(BusinessError::NotDraft {
                question_id: identifier.to_string(),
            }
            .into());
        }
        self.publishing_id = Some(identifier.to_string());
        Ok(())
    }

    pub fn finish_publish(&mut self, identifier: &str, ok: bool) {
        if self.publishing_id.as_deref() == Some(identifier) {
            self.publishing_id = None;
        }
        if !ok {
            warn!("题目 {} 发布失败", identifier);
            return;
        }
        if let Some(question) = self.find_mut(identifier) {
            question.status = QuestionStatus::Live;
            info!("✓ 题目 {} 已发布", identifier);
        }
    }

    pub fn is_publishing(&self, identifier: &str) -> bool {
        self.publishing_id.as_deref() == Some(identifier)
    }

    // ========== 删除 ==========

    /// 打开删除确认
    pub fn request_delete(&mut self, identifier: &str) {
        self.deleting_id = Some(identifier.to_string());
        self.overlays.push(Overlay::ConfirmDelete {
            question_id: identifier.to_string(),
        });
    }

    /// 确认删除，返回待删除的题目 ID
    pub fn confirm_delete(&mut self) -> Option<String> {
        match self.overlays.top() {
            Some(Overlay::ConfirmDelete { .. }) => match self.overlays.pop() {
                Some(Overlay::ConfirmDelete { question_id }) => Some(question_id),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn cancel_delete(&mut self) {
        if matches!(self.overlays.top(), Some(Overlay::ConfirmDelete { .. })) {
            self.overlays.pop();
        }
        self.deleting_id = None;
    }

    pub fn finish_delete(&mut self, identifier: &str, ok: bool) {
        if self.deleting_id.as_deref() == Some(identifier) {
            self.deleting_id = None;
        }
        if !ok {
            warn!("题目 {} 删除失败", identifier);
            return;
        }
        let before = self.rows.len();
        self.rows.retain(|q| q.identifier != identifier);
        if self.rows.len() < before {
            self.total_count = self.total_count.saturating_sub(1);
            info!("✓ 题目 {} 已删除", identifier);
        }
    }

    pub fn is_deleting(&self, identifier: &str) -> bool {
        self.deleting_id.as_deref() == Some(identifier)
    }

    // ========== 查看 / 编辑 ==========

    pub fn view(&mut self, identifier: &str) {
        self.overlays.push(Overlay::QuestionEditor {
            question_id: Some(identifier.to_string()),
            mode: EditorMode::View,
        });
    }

    pub fn edit(&self, identifier: &str) -> ListingIntent {
        ListingIntent::NavigateToEdit(identifier.to_string())
    }

    pub fn close_overlay(&mut self) -> Option<Overlay> {
        self.overlays.pop()
    }

    // ========== 接口调用 ==========

    /// 从接口加载一页题目
    pub async fn load(&mut self, client: &QuestionClient, query: &LookupQuery) -> AppResult<()> {
        let result = client.list_questions(query).await?;
        info!(
            "📋 列表第 {} 页: {} 道题目 (共 {} 道)",
            query.page_no,
            result.questions.len(),
            result.meta.total
        );
        self.set_page(result.questions, result.meta.total);
        Ok(())
    }

    /// 发布草稿题目
    pub async fn publish(&mut self, client: &QuestionClient, identifier: &str) -> AppResult<()> {
        self.begin_publish(identifier)?;
        let result = client.publish_question(identifier).await;
        self.finish_publish(identifier, result.is_ok());
        result
    }

    /// 执行已确认的删除；没有待确认的删除时返回 None
    pub async fn delete_confirmed(&mut self, client: &QuestionClient) -> Option<AppResult<()>> {
        let identifier = self.confirm_delete()?;
        let result = client.delete_question(&identifier).await;
        self.finish_delete(&identifier, result.is_ok());
        Some(result)
    }
}

fn compare(column: ListingColumn, a: &Question, b: &Question) -> Ordering {
    match column {
        ListingColumn::Live => status_rank(a.status).cmp(&status_rank(b.status)),
        ListingColumn::Id => a.x_id.cmp(&b.x_id),
        ListingColumn::Operation => a.operation.cmp(&b.operation),
        ListingColumn::QuestionType => a.question_type.as_str().cmp(b.question_type.as_str()),
        ListingColumn::Description => a.description.en.cmp(&b.description.en),
        ListingColumn::Repository => a.repository.name.en.cmp(&b.repository.name.en),
        ListingColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        _ => Ordering::Equal,
    }
}

fn status_rank(status: QuestionStatus) -> u8 {
    match status {
        QuestionStatus::Draft => 0,
        QuestionStatus::Live => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::listing::columns::tests::question;

    fn listing() -> QuestionListing {
        let mut b = question("b");
        b.x_id = "Q-002".to_string();
        b.created_at = "2024-01-02T00:00:00Z".to_string();
        let mut a = question("a");
        a.x_id = "Q-001".to_string();
        a.created_at = "2024-05-01T00:00:00Z".to_string();
        a.status = QuestionStatus::Live;
        QuestionListing::new(vec![b, a], 2)
    }

    fn ids(listing: &QuestionListing) -> Vec<&str> {
        listing.sorted_rows().iter().map(|q| q.identifier.as_str()).collect()
    }

    #[test]
    fn test_toggle_sort_cycles() {
        let mut listing = listing();
        assert_eq!(ids(&listing), vec!["b", "a"]);

        listing.toggle_sort(ListingColumn::Id);
        assert_eq!(ids(&listing), vec!["a", "b"]);
        listing.toggle_sort(ListingColumn::Id);
        assert_eq!(ids(&listing), vec!["b", "a"]);
        assert_eq!(listing.sort().unwrap().direction, SortDirection::Desc);
        listing.toggle_sort(ListingColumn::Id);
        assert_eq!(listing.sort(), None);

        listing.toggle_sort(ListingColumn::Numbers);
        assert_eq!(listing.sort(), None);

        listing.toggle_sort(ListingColumn::CreatedAt);
        assert_eq!(ids(&listing), vec!["b", "a"]);
    }

    #[test]
    fn test_publish_only_drafts() {
        let mut listing = listing();
        assert!(matches!(
            listing.begin_publish("a"),
            Err(AppError::Business(BusinessError::NotDraft { .. }))
        ));
        assert!(listing.begin_publish("zzz").is_err());

        listing.begin_publish("b").unwrap();
        assert!(listing.is_publishing("b"));
        listing.finish_publish("b", true);
        assert!(!listing.is_publishing("b"));
        let cells = listing.cells(&ListingContext::default());
        assert!(cells.iter().all(|row| row[0].text == "●live"));
    }

    #[test]
    fn test_delete_confirmation_flow() {
        let mut listing = listing();
        listing.request_delete("b");
        assert!(listing.is_deleting("b"));
        listing.cancel_delete();
        assert!(!listing.is_deleting("b"));
        assert!(listing.overlays().is_empty());

        listing.request_delete("b");
        let id = listing.confirm_delete().unwrap();
        assert_eq!(id, "b");
        listing.finish_delete(&id, true);
        assert_eq!(ids(&listing), vec!["a"]);
        assert_eq!(listing.total_count(), 1);
        assert_eq!(listing.confirm_delete(), None);
    }

    #[test]
    fn test_view_and_edit() {
        let mut listing = listing();
        listing.view("a");
        assert!(matches!(
            listing.overlays().top(),
            Some(Overlay::QuestionEditor { mode: EditorMode::View, .. })
        ));
        assert!(listing.close_overlay().is_some());
        assert_eq!(listing.edit("a"), ListingIntent::NavigateToEdit("a".to_string()));
    }

    #[tokio::test]
    async fn test_client_calls_are_guarded_locally() {
        let client = QuestionClient::new(&crate::config::Config::default()).unwrap();
        let mut listing = listing();

        // 已发布的题目不会发出请求
        let result = listing.publish(&client, "a").await;
        assert!(matches!(
            result,
            Err(AppError::Business(BusinessError::NotDraft { .. }))
        ));
        assert!(!listing.is_publishing("a"));

        // 没有待确认的删除
        assert!(listing.delete_confirmed(&client).await.is_none());
        assert_eq!(listing.total_count(), 2);
    }
}
