use ubuy_shared::protocol::ApiRequest;
use ubuy_shared::{CONTENT_TYPE_JSON, ErrorBody, HEADER_AUTHORIZATION};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::web::{HttpClient, HttpRequest, HttpResponse};

/// 商城后端 API 客户端
///
/// 负责 URL 拼接、鉴权头、JSON 编解码以及错误分类。
/// 不做重试，也不处理会话失效的副作用。
#[derive(Debug, Clone)]
pub struct StorefrontApi<C> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> StorefrontApi<C> {
    pub fn new(client: C, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.api_base.clone(),
        }
    }

    fn url<R: ApiRequest>(&self, req: &R) -> String {
        let mut url = format!("{}{}", self.base_url, req.path());
        let query = req.query();
        if !query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }

    /// 发送请求
    ///
    /// `token` 只在需要鉴权的接口上附加为 `Authorization: Bearer <token>`。
    pub async fn send<R: ApiRequest>(&self, req: &R, token: Option<&str>) -> ApiResult<R::Response> {
        let mut http = HttpRequest::new(self.url(req), R::METHOD);

        if R::AUTHENTICATED {
            if let Some(token) = token {
                http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {token}"));
            }
        }

        if R::METHOD.has_body() {
            let body = serde_json::to_string(req).map_err(|e| ApiError::Encode(e.to_string()))?;
            http = http
                .with_header("Content-Type", CONTENT_TYPE_JSON)
                .with_body(body);
        }

        let method = R::METHOD.as_str();
        let url = http.url.clone();
        let response = self.client.send(http).await.inspect_err(|e| {
            tracing::error!(method, %url, error = %e, "request failed");
        })?;
        tracing::debug!(method, %url, status = response.status, "response");

        if !response.ok() {
            return Err(classify(&response, R::AUTHENTICATED));
        }

        decode(&response.body)
    }
}

/// 将非 2xx 响应映射为 `ApiError`
fn classify(response: &HttpResponse, authenticated: bool) -> ApiError {
    match response.status {
        401 if authenticated => ApiError::Unauthorized,
        404 => ApiError::NotFound,
        status => ApiError::Rejected {
            status,
            message: serde_json::from_str::<ErrorBody>(&response.body)
                .ok()
                .and_then(ErrorBody::into_message),
        },
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> ApiResult<T> {
    // 空响应体按 JSON null 处理，方便 Option 类型的响应
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::TransportError;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use ubuy_shared::protocol::{GetProduct, ListProducts, Login, SearchProducts};
    use ubuy_shared::{Credentials, NewProduct, ProductId};

    #[derive(Default)]
    struct TestContext {
        requests: RefCell<Vec<HttpRequest>>,
        responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    }

    #[derive(Clone, Default)]
    struct TestClient {
        ctx: Rc<TestContext>,
    }

    impl TestClient {
        fn reply(&self, status: u16, body: &str) {
            self.ctx.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
        }

        fn last_request(&self) -> HttpRequest {
            self.ctx.requests.borrow().last().cloned().unwrap()
        }
    }

    #[async_trait(?Send)]
    impl HttpClient for TestClient {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.ctx.requests.borrow_mut().push(req);
            self.ctx
                .responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError("no scripted response".into())))
        }
    }

    fn api(client: &TestClient) -> StorefrontApi<TestClient> {
        StorefrontApi::new(client.clone(), &ClientConfig::new("http://shop.test/"))
    }

    #[tokio::test]
    async fn attaches_bearer_token_to_authenticated_calls() {
        let client = TestClient::default();
        client.reply(200, "[]");

        let products = api(&client).send(&ListProducts, Some("abc")).await.unwrap();
        assert!(products.is_empty());

        let req = client.last_request();
        assert_eq!(req.url, "http://shop.test/api/products");
        assert_eq!(req.header("authorization"), Some("Bearer abc"));
        assert_eq!(req.body, None);
    }

    #[tokio::test]
    async fn never_attaches_token_to_login() {
        let client = TestClient::default();
        client.reply(200, r#"{"token":"t","username":"ann"}"#);

        let login = Login(Credentials {
            username: "ann".into(),
            password: "pw".into(),
        });
        api(&client).send(&login, Some("stale")).await.unwrap();

        let req = client.last_request();
        assert_eq!(req.header("Authorization"), None);
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(
            req.body.as_deref(),
            Some(r#"{"username":"ann","password":"pw"}"#)
        );
    }

    #[tokio::test]
    async fn encodes_search_keyword() {
        let client = TestClient::default();
        client.reply(200, "[]");

        let search = SearchProducts {
            keyword: "red & blue".into(),
        };
        api(&client).send(&search, None).await.unwrap();

        assert_eq!(
            client.last_request().url,
            "http://shop.test/api/products/search?keyword=red+%26+blue"
        );
    }

    #[tokio::test]
    async fn classifies_failures() {
        let client = TestClient::default();
        let api = api(&client);

        client.reply(401, "");
        assert_eq!(
            api.send(&ListProducts, Some("t")).await,
            Err(ApiError::Unauthorized)
        );

        client.reply(404, "");
        assert_eq!(
            api.send(&GetProduct { id: ProductId::new(9) }, None).await,
            Err(ApiError::NotFound)
        );

        client.reply(400, r#"{"error":"Price is required"}"#);
        let err = api.send(&NewProduct::default(), None).await.unwrap_err();
        assert_eq!(err.server_message(), Some("Price is required"));

        client.reply(500, "<html>oops</html>");
        assert_eq!(
            api.send(&ListProducts, None).await,
            Err(ApiError::Rejected {
                status: 500,
                message: None
            })
        );

        // 无脚本响应 => 传输层错误
        assert!(matches!(
            api.send(&ListProducts, None).await,
            Err(ApiError::Network(_))
        ));
    }

    #[tokio::test]
    async fn login_401_keeps_server_message() {
        let client = TestClient::default();
        client.reply(401, r#"{"error":"Invalid credentials"}"#);

        let err = api(&client)
            .send(&Login(Credentials::default()), None)
            .await
            .unwrap_err();
        assert!(!err.is_unauthorized());
        assert_eq!(err.server_message(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn empty_body_decodes_as_none() {
        let client = TestClient::default();
        client.reply(200, "");

        let product = api(&client)
            .send(&GetProduct { id: ProductId::new(1) }, None)
            .await
            .unwrap();
        assert_eq!(product, None);
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let client = TestClient::default();
        client.reply(200, "{not json");

        assert!(matches!(
            api(&client).send(&ListProducts, None).await,
            Err(ApiError::Decode(_))
        ));
    }
}
