/// 题库 API 客户端
///
/// 封装所有与题目 / 题集接口相关的调用逻辑
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::{PersistedOrder, Question, QuestionSet};
use crate::services::LookupQuery;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// 接口统一的返回外层
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    result: T,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMeta {
    #[serde(default)]
    pub total: u64,
}

/// 题目列表返回
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionListResult {
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub meta: ListMeta,
}

#[derive(Debug, Serialize)]
struct ListRequest<'a> {
    filters: &'a LookupQuery,
}

/// 题库 API 客户端
pub struct QuestionClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    max_retries: usize,
}

impl QuestionClient {
    /// 创建新的题库客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
            max_retries: config.max_retries.max(1),
        })
    }

    /// 分页查询题目
    pub async fn list_questions(&self, query: &LookupQuery) -> AppResult<QuestionListResult> {
        let body = serde_json::to_value(ListRequest { filters: query })?;
        self.call(Method::POST, "api/v1/question/list", Some(body)).await
    }

    /// 读取单个题目
    pub async fn get_question(&self, question_id: &str) -> AppResult<Question> {
        let endpoint = format!("api/v1/question/read/{}", question_id);
        self.call(Method::GET, &endpoint, None).await
    }

    /// 并发读取多个题目，保持输入顺序
    pub async fn get_questions(&self, question_ids: &[String]) -> Vec<AppResult<Question>> {
        futures::future::join_all(question_ids.iter().map(|id| self.get_question(id))).await
    }

    /// 发布题目
    pub async fn publish_question(&self, question_id: &str) -> AppResult<()> {
        let endpoint = format!("api/v1/question/publish/{}", question_id);
        let _: serde_json::Value = self.call(Method::POST, &endpoint, None).await?;
        Ok(())
    }

    /// 删除题目
    pub async fn delete_question(&self, question_id: &str) -> AppResult<()> {
        let endpoint = format!("api/v1/question/delete/{}", question_id);
        let _: serde_json::Value = self.call(Method::DELETE, &endpoint, None).await?;
        Ok(())
    }

    /// 读取题集
    pub async fn get_question_set(&self, question_set_id: &str) -> AppResult<QuestionSet> {
        let endpoint = format!("api/v1/question-set/read/{}", question_set_id);
        self.call(Method::GET, &endpoint, None).await
    }

    /// 保存题集中的题目顺序
    pub async fn update_question_set_order(
        &self,
        question_set_id: &str,
        order: &PersistedOrder,
    ) -> AppResult<()> {
        if question_set_id.trim().is_empty() {
            return Err(crate::error::BusinessError::EmptyQuestionSetId.into());
        }
        let endpoint = format!("api/v1/question-set/update/{}", question_set_id);
        let body = json!({ "questions": order.to_sequenced() });
        debug!("保存题集顺序 Payload: {}", body);
        let _: serde_json::Value = self.call(Method::POST, &endpoint, Some(body)).await?;
        Ok(())
    }

    /// 发送请求并解析 `{"result": ...}`，遇到 429 时等待后重试
    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> AppResult<T> {
        let url = format!("{}/{}", self.base_url, endpoint);

        for attempt in 1..=self.max_retries {
            let mut request = self.http.request(method.clone(), &url);
            if !self.token.is_empty() {
                request = request.bearer_auth(&self.token);
            }
            if let Some(body) = &body {
                request = request.json(body);
            }

            let response = request
                .send()
                .await
                .map_err(|e| AppError::api_request_failed(endpoint, e))?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                warn!(
                    "API 请求频繁限制 (尝试 {}/{}), 等待 2 秒后重试...",
                    attempt, self.max_retries
                );
                sleep(Duration::from_secs(2)).await;
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.ok().filter(|t| !t.is_empty());
                return Err(ApiError::BadResponse {
                    endpoint: endpoint.to_string(),
                    status: status.as_u16(),
                    message,
                }
                .into());
            }

            let envelope: ApiEnvelope<T> = response.json().await?;
            return Ok(envelope.result);
        }

        Err(ApiError::RateLimited {
            endpoint: endpoint.to_string(),
            attempts: self.max_retries,
        }
        .into())
    }
}
