//! 候选题筛选面板
//!
//! 面板只发布筛选条件，不直接调用查询服务。

use serde::{Deserialize, Serialize};
use tracing::debug;

/// 筛选条件，空白字符串视为未设置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l2_skill_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l3_skill_id: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl FilterCriteria {
    pub fn class_id(&self) -> Option<&str> {
        non_blank(&self.class_id)
    }

    pub fn l2_skill_id(&self) -> Option<&str> {
        non_blank(&self.l2_skill_id)
    }

    pub fn l3_skill_id(&self) -> Option<&str> {
        non_blank(&self.l3_skill_id)
    }

    /// 有值且可用的字段数；年级筛选不可用时不计入
    pub fn active_count(&self, class_enabled: bool) -> usize {
        let class = class_enabled && self.class_id().is_some();
        [class, self.l2_skill_id().is_some(), self.l3_skill_id().is_some()]
            .into_iter()
            .filter(|active| *active)
            .count()
    }

    /// 实际参与查询的条件：去掉空白值和不可用的字段
    pub fn effective(&self, class_enabled: bool) -> FilterCriteria {
        FilterCriteria {
            class_id: self
                .class_id()
                .filter(|_| class_enabled)
                .map(str::to_string),
            l2_skill_id: self.l2_skill_id().map(str::to_string),
            l3_skill_id: self.l3_skill_id().map(str::to_string),
        }
    }
}

/// 筛选面板
///
/// 打开时复制当前条件作为草稿；提交时整体替换，取消时保留原条件。
#[derive(Debug, Clone, Default)]
pub struct FilterPanel {
    applied: FilterCriteria,
    draft: Option<FilterCriteria>,
    class_enabled: bool,
}

impl FilterPanel {
    pub fn new(class_enabled: bool) -> Self {
        Self {
            applied: FilterCriteria::default(),
            draft: None,
            class_enabled,
        }
    }

    pub fn class_enabled(&self) -> bool {
        self.class_enabled
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.applied
    }

    pub fn effective(&self) -> FilterCriteria {
        self.applied.effective(self.class_enabled)
    }

    pub fn active_count(&self) -> usize {
        self.applied.active_count(self.class_enabled)
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn open(&mut self) {
        self.draft = Some(self.applied.clone());
    }

    /// 草稿（面板未打开时为 None）
    pub fn draft_mut(&mut self) -> Option<&mut FilterCriteria> {
        self.draft.as_mut()
    }

    /// 提交草稿，返回生效条件是否发生变化
    pub fn commit(&mut self) -> bool {
        let Some(draft) = self.draft.take() else {
            return false;
        };
        let changed = draft.effective(self.class_enabled) != self.effective();
        self.applied = draft;
        debug!("筛选条件已提交 (变化: {}): {:?}", changed, self.applied);
        changed
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }
}
