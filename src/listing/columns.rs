//! 题目列表的列定义与单元格格式化

use crate::compose::EMPTY_PLACEHOLDER;
use crate::models::{Question, QuestionStatus};
use crate::utils::truncate_text;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// 题集标题提示的最大长度
const SET_TITLES_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingColumn {
    Live,
    Id,
    Class,
    Operation,
    QuestionType,
    Description,
    Repository,
    CreatedBy,
    CreatedAt,
    QuestionSetCount,
    Numbers,
    Actions,
}

impl ListingColumn {
    pub const ALL: [ListingColumn; 12] = [
        ListingColumn::Live,
        ListingColumn::Id,
        ListingColumn::Class,
        ListingColumn::Operation,
        ListingColumn::QuestionType,
        ListingColumn::Description,
        ListingColumn::Repository,
        ListingColumn::CreatedBy,
        ListingColumn::CreatedAt,
        ListingColumn::QuestionSetCount,
        ListingColumn::Numbers,
        ListingColumn::Actions,
    ];

    pub fn header(self) -> &'static str {
        match self {
            ListingColumn::Live => "Live",
            ListingColumn::Id => "ID",
            ListingColumn::Class => "Class",
            ListingColumn::Operation => "Operation",
            ListingColumn::QuestionType => "Question Type",
            ListingColumn::Description => "Description",
            ListingColumn::Repository => "Repository",
            ListingColumn::CreatedBy => "Created By",
            ListingColumn::CreatedAt => "Created At",
            ListingColumn::QuestionSetCount => "Q. sets count",
            ListingColumn::Numbers => "Numbers",
            ListingColumn::Actions => "Actions",
        }
    }

    pub fn sortable(self) -> bool {
        !matches!(
            self,
            ListingColumn::Class
                | ListingColumn::CreatedBy
                | ListingColumn::QuestionSetCount
                | ListingColumn::Numbers
                | ListingColumn::Actions
        )
    }
}

/// 用户姓名
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserName {
    pub first_name: String,
    pub last_name: String,
}

/// 单元格格式化需要的外部数据
#[derive(Debug, Clone, Default)]
pub struct ListingContext {
    pub users: HashMap<String, UserName>,
    /// 题集 ID -> 标题
    pub question_sets: HashMap<String, String>,
}

/// 单元格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub tooltip: Option<String>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tooltip: None,
        }
    }

    fn with_tooltip(text: impl Into<String>, tooltip: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tooltip: Some(tooltip.into()),
        }
    }
}

/// 格式化某一列
pub fn cell(column: ListingColumn, question: &Question, ctx: &ListingContext) -> Cell {
    match column {
        ListingColumn::Live => Cell::plain(match question.status {
            QuestionStatus::Live => "●live",
            QuestionStatus::Draft => "○draft",
        }),
        ListingColumn::Id => Cell::plain(or_placeholder(&question.x_id)),
        ListingColumn::Class => Cell::plain(
            question
                .taxonomy
                .as_ref()
                .map(|t| readable_format(&t.class.name.en))
                .unwrap_or_default(),
        ),
        ListingColumn::Operation => Cell::plain(question.operation.clone()),
        ListingColumn::QuestionType => Cell::plain(question.question_type.as_str()),
        ListingColumn::Description => {
            Cell::with_tooltip(question.description.en.clone(), question.description.en.clone())
        }
        ListingColumn::Repository => Cell::plain(question.repository.name.en.clone()),
        ListingColumn::CreatedBy => Cell::plain(created_by(&question.created_by, ctx)),
        ListingColumn::CreatedAt => Cell::plain(format_date(&question.created_at)),
        ListingColumn::QuestionSetCount => Cell::with_tooltip(
            question.question_set_ids.len().to_string(),
            question_set_titles(&question.question_set_ids, ctx),
        ),
        ListingColumn::Numbers => {
            let text = numbers_text(question);
            Cell::with_tooltip(text.clone(), text)
        }
        ListingColumn::Actions => Cell::plain(String::new()),
    }
}

fn or_placeholder(value: &str) -> String {
    if value.trim().is_empty() {
        EMPTY_PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

fn created_by(user_id: &str, ctx: &ListingContext) -> String {
    if user_id == "system" {
        return user_id.to_string();
    }
    match ctx.users.get(user_id) {
        Some(user) => format!("{} {}", user.first_name, user.last_name).trim().to_string(),
        None => EMPTY_PLACEHOLDER.to_string(),
    }
}

/// `class_one` / `class-one` -> `Class One`
pub fn readable_format(value: &str) -> String {
    static SEPARATORS: OnceLock<Option<Regex>> = OnceLock::new();
    let value = value.trim();
    let words: Vec<&str> = match SEPARATORS.get_or_init(|| Regex::new(r"[_\-\s]+").ok()) {
        Some(re) => re.split(value).collect(),
        None => value
            .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
            .collect(),
    };

    words
        .into_iter()
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// RFC 3339 时间 -> `%d %b %Y`，无法解析时原样返回
pub fn format_date(value: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.format("%d %b %Y").to_string())
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|dt| dt.format("%d %b %Y").to_string())
        })
        .unwrap_or_else(|_| value.to_string())
}

/// 题集标题列表，超过 100 个字符时截断
pub fn question_set_titles(ids: &[String], ctx: &ListingContext) -> String {
    if ids.is_empty() {
        return "0 Sets".to_string();
    }
    let joined = ids
        .iter()
        .filter_map(|id| ctx.question_sets.get(id))
        .filter(|title| !title.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");

    if joined.chars().count() > SET_TITLES_MAX_CHARS {
        truncate_text(&joined, SET_TITLES_MAX_CHARS - 3)
    } else {
        joined
    }
}

/// 选择题显示选项，其他题型显示操作数
pub fn numbers_text(question: &Question) -> String {
    let body = &question.question_body;
    if question.question_type.is_mcq() {
        return body.options().map(|o| o.join(", ")).unwrap_or_default();
    }
    body.numbers
        .values()
        .filter_map(|v| v.as_deref())
        .filter(|v| !v.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
