//! 编排层（Orchestration Layer）
//!
//! 管理一次题集编排会话的生命周期：载入题集、挂载编排界面、
//! 拉取候选题、提交顺序并保存。
//!
//! ```text
//! session::App
//!     ↓
//! compose::CompositionScreen (界面状态)
//!     ↓
//! services::QuestionLookup (候选题查询)
//!     ↓
//! clients::QuestionClient (HTTP)
//! ```

pub mod session;

pub use session::{collect_candidates, refresh_summaries, App};
