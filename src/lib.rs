//! # Question Set Composer
//!
//! 题集编排工具：为题集挑选题目、拖拽调整顺序并保存
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 题库 HTTP 接口，只负责请求和重试
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `QuestionLookup` - 按条件分页查询候选题
//!
//! ### ③ 界面状态层（Compose / Listing）
//! - `compose/` - 编排界面：有序选题、拖拽排序、行展示、筛选、候选题、弹层
//! - `listing/` - 题目列表：列格式化、排序、发布、删除确认
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/session` - 一次编排会话的生命周期
//!
//! ## 模块结构

pub mod clients;
pub mod compose;
pub mod config;
pub mod error;
pub mod listing;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use compose::{CompositionScreen, DragOutcome, OrderedSelection};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{PersistedOrder, QuestionSet, QuestionSummary};
pub use orchestrator::App;
