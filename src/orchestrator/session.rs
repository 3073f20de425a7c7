//! 题集编排会话 - 编排层
//!
//! 本模块是应用入口，持有配置、题集和 API 客户端。
//! 不做具体的界面判断，只负责调度和保存。

use crate::clients::QuestionClient;
use crate::compose::{CompositionScreen, ListLayout};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{
    load_question_set, save_question_set_order, PersistedOrder, Question, QuestionSet,
    QuestionSummary,
};
use crate::services::{HttpQuestionLookup, QuestionLookup};
use crate::utils::logging::{log_final_order, log_rows, log_session_start};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    question_set: QuestionSet,
    client: Arc<QuestionClient>,
    lookup: Arc<HttpQuestionLookup>,
}

impl App {
    /// 初始化应用：创建 API 客户端并载入题集
    ///
    /// 配置了 `question_set_id` 时从接口读取题集，否则读取本地 TOML 文件
    pub async fn initialize(config: Config) -> Result<Self> {
        let client = Arc::new(QuestionClient::new(&config)?);

        let question_set = if config.question_set_id.trim().is_empty() {
            load_question_set(&PathBuf::from(&config.question_set_file)).await?
        } else {
            fetch_question_set(&client, config.question_set_id.trim()).await?
        };
        log_session_start(&question_set);

        let lookup = Arc::new(HttpQuestionLookup::new(client.clone()));

        Ok(Self {
            config,
            question_set,
            client,
            lookup,
        })
    }

    /// 运行一次编排会话，返回最终顺序
    pub async fn run(&self) -> Result<PersistedOrder> {
        let layout = ListLayout {
            top: 0.0,
            row_height: self.config.row_height,
        };
        let mut screen =
            CompositionScreen::mount(self.question_set.clone(), self.lookup.clone(), layout)
                .with_activation_distance(self.config.drag_activation_distance);

        let added =
            collect_candidates(&mut screen, &self.config.search_term, self.config.max_pages).await;
        info!("📥 本次会话新增 {} 道题目", added);

        let rows = screen.rows();
        if rows.is_empty() {
            if let Some(message) = screen.empty_state_message() {
                warn!("⚠️ {}", message);
            }
        } else {
            log_rows(&rows);
        }

        // 保存时需要新加入题目的摘要
        let known = screen.selection().snapshot().to_vec();
        let order = screen.commit();

        let path = PathBuf::from(&self.config.question_set_file);
        save_question_set_order(&path, &self.question_set, &order, &known).await?;
        log_final_order(&order, &path.display().to_string());

        if self.config.save_remote {
            match self
                .client
                .update_question_set_order(&self.question_set.identifier, &order)
                .await
            {
                Ok(()) => log_final_order(&order, &self.config.api_base_url),
                Err(e) => {
                    error!("❌ 远端保存失败: {}", e);
                    return Err(e.into());
                }
            }
        }

        Ok(order)
    }
}

/// 从接口读取题集，并用最新的题目内容刷新其中的摘要
async fn fetch_question_set(client: &QuestionClient, question_set_id: &str) -> Result<QuestionSet> {
    info!("🌐 从接口读取题集 {}", question_set_id);
    let mut question_set = client.get_question_set(question_set_id).await?;

    let ids: Vec<String> = question_set
        .questions
        .iter()
        .map(|q| q.identifier.clone())
        .collect();
    let fetched = client.get_questions(&ids).await;
    let refreshed = refresh_summaries(&mut question_set, fetched);
    info!("✓ 已刷新 {}/{} 道题目", refreshed, ids.len());

    Ok(question_set)
}

/// 按位置用读取到的题目替换题集中的摘要
///
/// 读取失败或 ID 对不上的题目保留原摘要。
///
/// # 返回
/// 被替换的摘要数量
pub fn refresh_summaries(
    question_set: &mut QuestionSet,
    fetched: Vec<AppResult<Question>>,
) -> usize {
    let mut refreshed = 0;
    for (summary, result) in question_set.questions.iter_mut().zip(fetched) {
        match result {
            Ok(question) if question.identifier == summary.identifier => {
                *summary = QuestionSummary::from(question);
                refreshed += 1;
            }
            Ok(question) => warn!(
                "⚠️ 题目 {} 返回了其他题目 {}，保留原摘要",
                summary.identifier, question.identifier
            ),
            Err(e) => warn!("⚠️ 读取题目 {} 失败，保留原摘要: {}", summary.identifier, e),
        }
    }
    refreshed
}

/// 按搜索词拉取候选题并全部加入选题，最多加载 `max_pages` 页
///
/// # 返回
/// 新加入的题目数量
pub async fn collect_candidates<L: QuestionLookup>(
    screen: &mut CompositionScreen<L>,
    term: &str,
    max_pages: u32,
) -> usize {
    if term.trim().is_empty() || max_pages == 0 {
        return 0;
    }

    let mut added = 0;
    let mut applied = screen.search(term).await;
    let mut pages = 1;

    loop {
        if !applied || screen.picker().results().is_failure() {
            if let Some(e) = screen.picker().results().error() {
                warn!("⚠️ 候选题查询失败，已有选题保持不变: {}", e);
            }
            break;
        }

        let fresh: Vec<_> = screen
            .picker()
            .candidates(screen.selection())
            .filter(|(_, selected)| !selected)
            .map(|(q, _)| q.clone())
            .collect();
        added += screen.add_candidates(fresh);

        if pages >= max_pages || !screen.picker().has_more() {
            break;
        }
        applied = screen.next_page().await;
        pages += 1;
    }

    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::selection::tests::summary;
    use crate::error::ApiError;
    use crate::listing::columns::tests::question;
    use crate::models::{Description, NamedRef, QuestionSetPurpose, Taxonomy};
    use crate::services::{LookupPage, LookupQuery};
    use async_trait::async_trait;

    /// 每页两道题，共五道
    struct PagedLookup;

    #[async_trait]
    impl QuestionLookup for PagedLookup {
        async fn search(&self, query: &LookupQuery) -> AppResult<LookupPage> {
            let start = (query.page_no as usize - 1) * 2;
            let questions = (start..(start + 2).min(5))
                .map(|i| summary(&format!("{}{}", query.search_query, i)))
                .collect();
            Ok(LookupPage {
                questions,
                total_count: 5,
            })
        }
    }

    struct FailingLookup;

    #[async_trait]
    impl QuestionLookup for FailingLookup {
        async fn search(&self, _query: &LookupQuery) -> AppResult<LookupPage> {
            Err(ApiError::RateLimited {
                endpoint: "api/v1/question/list".to_string(),
                attempts: 3,
            }
            .into())
        }
    }

    fn question_set() -> QuestionSet {
        QuestionSet {
            identifier: "set-1".to_string(),
            title: Description::en("Set One"),
            repository: NamedRef::new("repo-1", "Core"),
            taxonomy: Taxonomy::default(),
            purpose: QuestionSetPurpose::Practice,
            questions: vec![summary("add1")],
        }
    }

    fn mount<L: QuestionLookup>(lookup: L) -> CompositionScreen<L> {
        CompositionScreen::mount(question_set(), lookup, ListLayout::default())
    }

    #[test]
    fn test_refresh_summaries_keeps_failed_entries() {
        let mut set = question_set();
        set.questions = vec![summary("a"), summary("b"), summary("c")];

        let mut fresh_a = question("a");
        fresh_a.description = Description::en("Fresh A");
        let fetched = vec![
            Ok(fresh_a),
            Err(ApiError::BadResponse {
                endpoint: "api/v1/question/read/b".to_string(),
                status: 404,
                message: None,
            }
            .into()),
            Ok(question("other")),
        ];

        assert_eq!(refresh_summaries(&mut set, fetched), 1);
        assert_eq!(set.questions[0].description.en, "Fresh A");
        assert_eq!(set.questions[1], summary("b"));
        assert_eq!(set.questions[2], summary("c"));
    }

    #[tokio::test]
    async fn test_initialize_reads_remote_set_when_id_configured() {
        // 本地文件存在，但配置了题集 ID 时应改走接口
        let path = std::env::temp_dir().join(format!(
            "question_set_composer_{}_remote.toml",
            std::process::id()
        ));
        std::fs::write(&path, toml::to_string(&question_set()).unwrap()).unwrap();
        let local = Config {
            question_set_file: path.display().to_string(),
            ..Config::default()
        };
        let remote = Config {
            question_set_id: "set-1".to_string(),
            api_base_url: "http://127.0.0.1:9".to_string(),
            max_retries: 1,
            request_timeout_secs: 2,
            ..local.clone()
        };

        let from_file = App::initialize(local).await;
        let from_api = App::initialize(remote).await;
        let _ = std::fs::remove_file(&path);

        assert_eq!(from_file.unwrap().question_set, question_set());
        assert!(from_api.is_err());
    }

    #[tokio::test]
    async fn test_collect_candidates_respects_max_pages() {
        let _ = tracing_subscriber::fmt::try_init();
        let mut screen = mount(PagedLookup);

        let added = collect_candidates(&mut screen, "add", 2).await;
        // add0..add3，其中 add1 已存在
        assert_eq!(added, 3);
        assert_eq!(
            screen.selection().identifiers(),
            vec!["add1", "add0", "add2", "add3"]
        );
    }

    #[tokio::test]
    async fn test_collect_candidates_loads_until_exhausted() {
        let mut screen = mount(PagedLookup);
        let added = collect_candidates(&mut screen, "sub", 10).await;
        assert_eq!(added, 5);
        assert_eq!(screen.selection().len(), 6);
    }

    #[tokio::test]
    async fn test_collect_candidates_skips_blank_term_and_failures() {
        let mut screen = mount(PagedLookup);
        assert_eq!(collect_candidates(&mut screen, "  ", 3).await, 0);

        let mut screen = mount(FailingLookup);
        assert_eq!(collect_candidates(&mut screen, "add", 3).await, 0);
        assert_eq!(screen.selection().identifiers(), vec!["add1"]);
        assert!(screen.picker().results().is_failure());
    }
}
