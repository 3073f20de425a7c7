//! 拖拽排序
//!
//! 把指针手势转换为对 [`OrderedSelection`] 的 reorder 调用。
//!
//! ```text
//! Idle ──按下行──▶ Pressed ──移动超过激活距离──▶ Dragging ──松开──▶ Idle
//!                   │                               │
//!                   └──松开（视为点击）──▶ Idle       └──取消 / 松开在列表外──▶ Idle
//! ```
//!
//! 拖拽面自己维护 `标识 → 位置` 索引，不依赖任何手势库的内部状态。
//! 目标行只按指针的 y 坐标解析，水平漂移不影响结果。

use crate::compose::OrderedSelection;
use std::collections::HashMap;
use tracing::debug;

/// 默认激活距离（逻辑像素）
pub const DEFAULT_ACTIVATION_DISTANCE: f32 = 10.0;

/// 指针坐标
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn distance_to(self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// 列表几何信息：行连续排列，等高
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListLayout {
    pub top: f32,
    pub row_height: f32,
}

impl Default for ListLayout {
    fn default() -> Self {
        Self {
            top: 0.0,
            row_height: 64.0,
        }
    }
}

impl ListLayout {
    /// 第 `index` 行的垂直中心
    pub fn row_center(&self, index: usize) -> f32 {
        self.top + self.row_height * index as f32 + self.row_height / 2.0
    }

    fn row_at(&self, y: f32, row_count: usize) -> Option<usize> {
        if self.row_height <= 0.0 || y < self.top {
            return None;
        }
        let index = ((y - self.top) / self.row_height).floor() as usize;
        (index < row_count).then_some(index)
    }
}

/// 行的拖拽视觉状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowVisual {
    #[default]
    Idle,
    /// 正在被拖动的行
    Dragging,
    /// 指针下方的候选落点
    DropTarget,
}

#[derive(Debug, Clone, PartialEq)]
enum DragPhase {
    Idle,
    Pressed { source: String, origin: Point },
    Dragging { source: String, target: Option<String> },
}

/// 一次手势的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// 已提交重排
    Reordered { from: usize, to: usize },
    /// 拖拽被丢弃（列表外松开、落回原位、索引过期）
    Discarded,
    /// 没有达到激活距离，属于点击
    NotStarted,
    /// 当前没有手势
    Ignored,
}

/// 拖拽排序面
#[derive(Debug, Clone)]
pub struct DragSurface {
    layout: ListLayout,
    activation_distance: f32,
    positions: HashMap<String, usize>,
    order: Vec<String>,
    phase: DragPhase,
}

impl DragSurface {
    pub fn new(layout: ListLayout, activation_distance: f32) -> Self {
        Self {
            layout,
            activation_distance,
            positions: HashMap::new(),
            order: Vec::new(),
            phase: DragPhase::Idle,
        }
    }

    pub fn layout(&self) -> ListLayout {
        self.layout
    }

    /// 根据选题模型重建位置索引，每次修改选题后都要调用
    pub fn sync(&mut self, selection: &OrderedSelection) {
        self.order = selection.identifiers();
        self.positions = self
            .order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
    }

    pub fn position_of(&self, identifier: &str) -> Option<usize> {
        self.positions.get(identifier).copied()
    }

    /// 拖拽是否已经激活
    pub fn is_active(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, DragPhase::Idle)
    }

    /// 在某一行上按下指针
    pub fn pointer_down(&mut self, identifier: &str, point: Point) -> bool {
        if !self.is_idle() {
            debug!("已有进行中的手势，忽略按下 {}", identifier);
            return false;
        }
        if !self.positions.contains_key(identifier) {
            debug!("按下的行 {} 不在列表中", identifier);
            return false;
        }
        self.phase = DragPhase::Pressed {
            source: identifier.to_string(),
            origin: point,
        };
        true
    }

    /// 指针移动：只更新候选落点，不修改列表
    pub fn pointer_move(&mut self, point: Point) {
        let hovered = self.row_under(point);
        match &mut self.phase {
            DragPhase::Idle => {}
            DragPhase::Pressed { source, origin } => {
                if origin.distance_to(point) >= self.activation_distance {
                    debug!("开始拖拽 {}", source);
                    self.phase = DragPhase::Dragging {
                        source: std::mem::take(source),
                        target: hovered,
                    };
                }
            }
            DragPhase::Dragging { target, .. } => {
                *target = hovered;
            }
        }
    }

    /// 松开指针；有效时对选题执行 reorder
    pub fn release(&mut self, point: Point, selection: &mut OrderedSelection) -> DragOutcome {
        self.pointer_move(point);
        let phase = std::mem::replace(&mut self.phase, DragPhase::Idle);

        let (source, target) = match phase {
            DragPhase::Idle => return DragOutcome::Ignored,
            DragPhase::Pressed { .. } => return DragOutcome::NotStarted,
            DragPhase::Dragging { source, target } => (source, target),
        };

        let Some(target) = target else {
            debug!("在列表外松开，丢弃拖拽 {}", source);
            return DragOutcome::Discarded;
        };
        if target == source {
            return DragOutcome::Discarded;
        }

        let (Some(from), Some(to)) = (self.position_of(&source), self.position_of(&target))
        else {
            return DragOutcome::Discarded;
        };

        // 索引与选题不一致时说明已过期
        if selection.position_of(&source) != Some(from)
            || selection.position_of(&target) != Some(to)
        {
            debug!("位置索引已过期，丢弃拖拽 {} -> {}", source, target);
            self.sync(selection);
            return DragOutcome::Discarded;
        }

        if !selection.reorder(from, to) {
            return DragOutcome::Discarded;
        }
        self.sync(selection);
        debug!("拖拽完成: {} 从 {} 移动到 {}", source, from, to);
        DragOutcome::Reordered { from, to }
    }

    /// 外部取消信号
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            debug!("拖拽被取消");
        }
        self.phase = DragPhase::Idle;
    }

    pub fn visual_state(&self, identifier: &str) -> RowVisual {
        match &self.phase {
            DragPhase::Dragging { source, .. } if source == identifier => RowVisual::Dragging,
            DragPhase::Dragging {
                target: Some(target),
                ..
            } if target == identifier => RowVisual::DropTarget,
            _ => RowVisual::Idle,
        }
    }

    fn row_under(&self, point: Point) -> Option<String> {
        self.layout
            .row_at(point.y, self.order.len())
            .map(|i| self.order[i].clone())
    }
}
