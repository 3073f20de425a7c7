/// 异步数据状态
///
/// 四种状态：
/// - NotAsked: 尚未发起请求
/// - Loading: 请求进行中
/// - Success: 请求成功
/// - Failure: 请求失败
///
/// 用一个枚举替代 `loading: bool` + `data: Option<T>` 的组合。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resource<T, E = String> {
    NotAsked,
    Loading,
    Success(T),
    Failure(E),
}

impl<T, E> Resource<T, E> {
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Resource::Success(data),
            Err(e) => Resource::Failure(e),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Resource::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Resource::Failure(_))
    }

    pub fn is_not_asked(&self) -> bool {
        matches!(self, Resource::NotAsked)
    }

    /// 成功时返回数据引用
    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            Resource::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Resource::Failure(e) => Some(e),
            _ => None,
        }
    }
}

impl<T, E> Default for Resource<T, E> {
    fn default() -> Self {
        Resource::NotAsked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ok: Resource<u32> = Resource::from_result(Ok(3));
        assert_eq!(ok.data(), Some(&3));
        let err: Resource<u32> = Resource::from_result(Err("down".to_string()));
        assert!(err.is_failure());
        assert_eq!(err.error().map(String::as_str), Some("down"));
        assert!(Resource::<u32>::default().is_not_asked());
    }
}
