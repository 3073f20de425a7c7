//! 题集编排核心
//!
//! ```text
//! screen (CompositionScreen)
//!     ├── selection  有序选题模型
//!     ├── drag       拖拽排序状态机
//!     ├── row        行展示
//!     ├── filter     筛选面板
//!     ├── picker     候选题查询结果跟踪
//!     └── overlay    弹层栈
//! ```

pub mod drag;
pub mod filter;
pub mod overlay;
pub mod picker;
pub mod resource;
pub mod row;
pub mod screen;
pub mod selection;

pub use drag::{DragOutcome, DragSurface, ListLayout, Point, RowVisual, DEFAULT_ACTIVATION_DISTANCE};
pub use filter::{FilterCriteria, FilterPanel};
pub use overlay::{EditorMode, Overlay, OverlayStack};
pub use picker::{CandidatePicker, LookupTicket};
pub use resource::Resource;
pub use row::{present, RowAction, RowActionHandler, RowField, RowView, EMPTY_PLACEHOLDER};
pub use screen::{CompositionScreen, EMPTY_SELECTION_MESSAGE};
pub use selection::OrderedSelection;
