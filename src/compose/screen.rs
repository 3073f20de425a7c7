//! 题集编排界面 - 流程层
//!
//! 组合选题模型、拖拽面、行展示、筛选面板、候选题选择器和弹层栈。
//! 查询服务和选题模型都通过构造函数注入，界面不读取任何全局状态。
//!
//! 所有修改都经过 `&mut self`，一次只处理一个事件，不会出现交错修改。

use crate::compose::{
    present, CandidatePicker, DragOutcome, DragSurface, EditorMode, FilterCriteria, FilterPanel,
    ListLayout, LookupTicket, OrderedSelection, Overlay, OverlayStack, Point, RowActionHandler,
    RowView, DEFAULT_ACTIVATION_DISTANCE,
};
use crate::error::AppResult;
use crate::models::{PersistedOrder, QuestionSet, QuestionSummary};
use crate::services::{LookupPage, LookupQuery, QuestionLookup};
use tracing::{debug, info};

/// 选题为空时的提示
pub const EMPTY_SELECTION_MESSAGE: &str = "No questions added yet.";

pub struct CompositionScreen<L> {
    question_set: QuestionSet,
    lookup: L,
    selection: OrderedSelection,
    drag: DragSurface,
    filters: FilterPanel,
    picker: CandidatePicker,
    overlays: OverlayStack,
}

impl<L: QuestionLookup> CompositionScreen<L> {
    pub fn new(
        question_set: QuestionSet,
        selection: OrderedSelection,
        lookup: L,
        layout: ListLayout,
    ) -> Self {
        let filters = FilterPanel::new(question_set.class_filter_enabled());
        let mut drag = DragSurface::new(layout, DEFAULT_ACTIVATION_DISTANCE);
        drag.sync(&selection);

        Self {
            question_set,
            lookup,
            selection,
            drag,
            filters,
            picker: CandidatePicker::new(),
            overlays: OverlayStack::new(),
        }
    }

    /// 用题集已有的题目顺序初始化
    pub fn mount(question_set: QuestionSet, lookup: L, layout: ListLayout) -> Self {
        let selection = OrderedSelection::from_summaries(question_set.questions.iter().cloned());
        info!(
            "📚 题集 {} 载入 {} 道题目",
            question_set.identifier,
            selection.len()
        );
        Self::new(question_set, selection, lookup, layout)
    }

    pub fn with_activation_distance(mut self, distance: f32) -> Self {
        let layout = self.drag.layout();
        self.drag = DragSurface::new(layout, distance);
        self.drag.sync(&self.selection);
        self
    }

    pub fn question_set(&self) -> &QuestionSet {
        &self.question_set
    }

    pub fn selection(&self) -> &OrderedSelection {
        &self.selection
    }

    pub fn picker(&self) -> &CandidatePicker {
        &self.picker
    }

    pub fn filters(&self) -> &FilterPanel {
        &self.filters
    }

    pub fn overlays(&self) -> &OverlayStack {
        &self.overlays
    }

    pub fn drag(&self) -> &DragSurface {
        &self.drag
    }

    // ========== 选题 ==========

    pub fn add_candidates(
        &mut self,
        candidates: impl IntoIterator<Item = QuestionSummary>,
    ) -> usize {
        let added = self.selection.add(candidates);
        self.after_mutation();
        debug!("新增 {} 道题目，共 {} 道", added, self.selection.len());
        added
    }

    /// 从当前候选页中添加一道题
    pub fn add_candidate(&mut self, identifier: &str) -> bool {
        match self.picker.find(identifier).cloned() {
            Some(candidate) => self.add_candidates([candidate]) == 1,
            None => {
                debug!("候选页中没有题目 {}", identifier);
                false
            }
        }
    }

    /// 多选框行为：已选则移除，未选则添加
    pub fn toggle_candidate(&mut self, identifier: &str) -> bool {
        if self.selection.contains(identifier) {
            self.remove(identifier)
        } else {
            self.add_candidate(identifier)
        }
    }

    pub fn remove(&mut self, identifier: &str) -> bool {
        let removed = self.selection.remove(identifier).is_some();
        if removed {
            // 被移除的行可能正是拖拽源或落点
            self.drag.cancel();
            self.after_mutation();
            debug!("移除题目 {}", identifier);
        }
        removed
    }

    fn after_mutation(&mut self) {
        self.drag.sync(&self.selection);
    }

    // ========== 拖拽 ==========

    pub fn pointer_down(&mut self, identifier: &str, point: Point) -> bool {
        self.drag.pointer_down(identifier, point)
    }

    pub fn pointer_move(&mut self, point: Point) {
        self.drag.pointer_move(point);
    }

    pub fn pointer_up(&mut self, point: Point) -> DragOutcome {
        self.drag.release(point, &mut self.selection)
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    // ========== 展示 ==========

    pub fn rows(&self) -> Vec<RowView> {
        self.selection
            .snapshot()
            .iter()
            .enumerate()
            .map(|(i, q)| present(q, i + 1, self.drag.visual_state(&q.identifier)))
            .collect()
    }

    /// 只有在列表为空且没有拖拽时才显示空提示
    pub fn empty_state_message(&self) -> Option<&'static str> {
        (self.selection.is_empty() && !self.drag.is_active()).then_some(EMPTY_SELECTION_MESSAGE)
    }

    pub fn filter_badge(&self) -> usize {
        self.filters.active_count()
    }

    // ========== 查询 ==========

    fn query_for_page(&self, page_no: u32) -> LookupQuery {
        LookupQuery::build(self.picker.term(), &self.question_set, &self.filters, page_no)
    }

    /// 以当前搜索词和筛选条件发出第一页查询
    pub fn issue_query(&mut self) -> LookupTicket {
        let query = self.query_for_page(1);
        self.picker.begin(query)
    }

    pub fn set_search_term(&mut self, term: &str) -> LookupTicket {
        self.picker.set_term(term);
        self.issue_query()
    }

    pub fn load_next_page(&mut self) -> Option<LookupTicket> {
        let query = self.picker.next_page_query()?;
        Some(self.picker.begin(query))
    }

    /// 应用查询返回；过期返回会被丢弃
    pub fn apply_lookup(&mut self, ticket: LookupTicket, result: AppResult<LookupPage>) -> bool {
        self.picker.complete(ticket, result)
    }

    async fn run_ticket(&mut self, ticket: LookupTicket) -> bool {
        let result = self.lookup.search(&ticket.query).await;
        self.apply_lookup(ticket, result)
    }

    /// 搜索并应用结果
    pub async fn search(&mut self, term: &str) -> bool {
        let ticket = self.set_search_term(term);
        self.run_ticket(ticket).await
    }

    /// 加载下一页；没有更多时返回 false
    pub async fn next_page(&mut self) -> bool {
        match self.load_next_page() {
            Some(ticket) => self.run_ticket(ticket).await,
            None => false,
        }
    }

    // ========== 筛选 ==========

    pub fn open_filters(&mut self) {
        self.filters.open();
        self.overlays.push(Overlay::Filter);
    }

    pub fn filter_draft_mut(&mut self) -> Option<&mut FilterCriteria> {
        self.filters.draft_mut()
    }

    /// 提交筛选；条件变化时返回新的第一页查询
    pub fn apply_filters(&mut self) -> Option<LookupTicket> {
        if self.overlays.filter_on_top() {
            self.overlays.pop();
        }
        if self.filters.commit() {
            Some(self.issue_query())
        } else {
            None
        }
    }

    pub fn cancel_filters(&mut self) {
        if self.overlays.filter_on_top() {
            self.overlays.pop();
        }
        self.filters.cancel();
    }

    // ========== 弹层 ==========

    pub fn open_question(&mut self, identifier: &str, read_only: bool) {
        let mode = EditorMode::resolve(Some(identifier), read_only);
        debug!("{}: {}", mode.title(), identifier);
        self.overlays.push(Overlay::QuestionEditor {
            question_id: Some(identifier.to_string()),
            mode,
        });
    }

    /// 关闭栈顶弹层
    ///
    /// 关闭的是可编辑的编辑器且带回了新的摘要时，原位刷新该题，不重新查询。
    /// 只读弹层带回的摘要会被忽略。
    pub fn close_overlay(&mut self, updated: Option<QuestionSummary>) -> Option<Overlay> {
        let closed = self.overlays.pop()?;
        match (&closed, updated) {
            (Overlay::QuestionEditor { mode, .. }, Some(summary)) if !mode.is_read_only() => {
                if self.selection.refresh(summary) {
                    self.after_mutation();
                }
            }
            (Overlay::Filter, _) => self.filters.cancel(),
            _ => {}
        }
        Some(closed)
    }

    // ========== 生命周期 ==========

    /// 重新挂载：清空筛选、搜索词和弹层，进行中的查询作废
    pub fn remount(&mut self) {
        self.filters = FilterPanel::new(self.question_set.class_filter_enabled());
        self.picker.reset();
        self.overlays.clear();
        self.drag.cancel();
        debug!("题集编排界面已重新挂载");
    }

    /// 提交顺序
    pub fn commit(self) -> PersistedOrder {
        info!("✓ 提交题集 {} 的题目顺序", self.question_set.identifier);
        self.selection.into_order()
    }

    /// 放弃本次编排
    pub fn cancel(self) {
        debug!("放弃题集 {} 的编排", self.question_set.identifier);
    }
}

impl<L: QuestionLookup> RowActionHandler for CompositionScreen<L> {
    fn on_view(&mut self, identifier: &str) {
        self.open_question(identifier, true);
    }

    fn on_edit(&mut self, identifier: &str) {
        self.open_question(identifier, false);
    }

    fn on_remove(&mut self, identifier: &str) {
        self.remove(identifier);
    }
}
