//! 候选题选择器状态
//!
//! 跟踪搜索词、当前候选页和最近一次发出的查询。
//! 只有最新票据对应的返回才会被应用，过期返回直接丢弃。

use crate::compose::{OrderedSelection, Resource};
use crate::error::AppResult;
use crate::models::QuestionSummary;
use crate::services::{LookupPage, LookupQuery};
use std::collections::HashSet;
use tracing::{debug, warn};

/// 一次已发出的查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    seq: u64,
    pub query: LookupQuery,
}

#[derive(Debug, Clone, Default)]
pub struct CandidatePicker {
    term: String,
    results: Resource<LookupPage, String>,
    /// 已加载结果对应的查询（最后一页）
    loaded: Option<LookupQuery>,
    in_flight: Option<u64>,
    next_seq: u64,
    /// 下一页为空或没有带来新题目时置位，之后不再翻页
    exhausted: bool,
}

impl CandidatePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn results(&self) -> &Resource<LookupPage, String> {
        &self.results
    }

    pub fn loaded_query(&self) -> Option<&LookupQuery> {
        self.loaded.as_ref()
    }

    /// 发出一次查询
    ///
    /// 不同于当前结果的新查询会整体替换结果（进入 Loading）；
    /// 同一查询的下一页则保留已有结果，返回后追加。
    pub fn begin(&mut self, query: LookupQuery) -> LookupTicket {
        self.next_seq += 1;
        let seq = self.next_seq;

        if !self.is_next_page_of_loaded(&query) {
            self.results = Resource::Loading;
            self.loaded = None;
            self.exhausted = false;
        }
        self.in_flight = Some(seq);

        debug!("发出查询 #{} (页码 {})", seq, query.page_no);
        LookupTicket { seq, query }
    }

    /// 应用查询返回，返回是否被采用
    pub fn complete(&mut self, ticket: LookupTicket, result: AppResult<LookupPage>) -> bool {
        if self.in_flight != Some(ticket.seq) {
            debug!("丢弃过期的查询返回 #{}", ticket.seq);
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(page) if self.is_next_page_of_loaded(&ticket.query) => {
                let appended = self.append_page(page);
                if appended == 0 {
                    debug!("第 {} 页没有新题目，停止翻页", ticket.query.page_no);
                    self.exhausted = true;
                }
                self.loaded = Some(ticket.query);
            }
            result => {
                if let Err(e) = &result {
                    warn!("候选题查询失败: {}", e);
                }
                self.results = Resource::from_result(result.map_err(|e| e.to_string()));
                self.exhausted = self
                    .results
                    .data()
                    .is_some_and(|page| page.questions.is_empty());
                self.loaded = self.results.is_success().then_some(ticket.query);
            }
        }
        true
    }

    /// 追加下一页，跳过已有的题目，返回实际追加的数量
    fn append_page(&mut self, page: LookupPage) -> usize {
        let Some(existing) = self.results.data_mut() else {
            return 0;
        };
        let mut seen: HashSet<String> = existing
            .questions
            .iter()
            .map(|q| q.identifier.clone())
            .collect();
        let before = existing.questions.len();
        existing.questions.extend(
            page.questions
                .into_iter()
                .filter(|q| seen.insert(q.identifier.clone())),
        );
        existing.total_count = page.total_count;
        existing.questions.len() - before
    }

    /// 让所有进行中的查询失效
    pub fn invalidate(&mut self) {
        if let Some(seq) = self.in_flight.take() {
            debug!("查询 #{} 已失效", seq);
        }
        if self.results.is_loading() {
            self.results = Resource::NotAsked;
        }
    }

    /// 清空搜索词和结果
    pub fn reset(&mut self) {
        self.invalidate();
        self.term.clear();
        self.results = Resource::NotAsked;
        self.loaded = None;
        self.exhausted = false;
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// 仅在加载完成且结果为空时显示“无结果”
    pub fn show_empty_message(&self) -> bool {
        !self.is_loading()
            && self
                .results
                .data()
                .is_some_and(|page| page.questions.is_empty())
    }

    /// 还有未加载的页：已加载数少于总数，且上一页带来了新题目
    pub fn has_more(&self) -> bool {
        !self.exhausted
            && self
                .results
                .data()
                .is_some_and(|page| (page.questions.len() as u64) < page.total_count)
    }

    /// 下一页查询（没有更多或正在加载时为 None）
    pub fn next_page_query(&self) -> Option<LookupQuery> {
        if self.is_loading() || !self.has_more() {
            return None;
        }
        self.loaded.as_ref().map(LookupQuery::next_page)
    }

    /// 当前候选题及其是否已被选中
    pub fn candidates<'a>(
        &'a self,
        selection: &'a OrderedSelection,
    ) -> impl Iterator<Item = (&'a QuestionSummary, bool)> + 'a {
        self.results
            .data()
            .into_iter()
            .flat_map(|page| page.questions.iter())
            .map(move |q| (q, selection.contains(&q.identifier)))
    }

    pub fn find(&self, identifier: &str) -> Option<&QuestionSummary> {
        self.results
            .data()
            .and_then(|page| page.questions.iter().find(|q| q.identifier == identifier))
    }

    fn is_next_page_of_loaded(&self, query: &LookupQuery) -> bool {
        self.results.is_success()
            && self
                .loaded
                .as_ref()
                .is_some_and(|loaded| {
                loaded.same_search(query) && query.page_no == loaded.page_no + 1
            })
    }
}
