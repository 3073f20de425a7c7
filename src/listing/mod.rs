//! 题目列表
//!
//! 列定义、单元格格式化和表格状态（排序、发布、删除确认）

pub mod columns;
pub mod table;

pub use columns::{cell, Cell, ListingColumn, ListingContext, UserName};
pub use table::{ListingIntent, QuestionListing, SortDirection, SortState};
