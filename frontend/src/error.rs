use crate::web::TransportError;

/// API 调用错误
///
/// `Unauthorized` 只在带会话的请求收到 401 时产生，
/// 由 `Storefront` 统一处理（清空会话并跳转登录页）。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] TransportError),
    #[error("session is no longer valid")]
    Unauthorized,
    #[error("resource not found")]
    NotFound,
    #[error("request rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("failed to encode request: {0}")]
    Encode(String),
    #[error("authentication response carried no token")]
    MissingToken,
}

impl ApiError {
    /// 服务端在错误响应体中给出的提示
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
