use super::*;
use crate::config::ClientConfig;
use crate::web::{HttpRequest, HttpResponse, MemoryStorage, TransportError};
use async_trait::async_trait;
use futures::channel::oneshot;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

// =========================================================
// Shared Mock Components
// =========================================================

pub(crate) enum Reply {
    Ready(Result<HttpResponse, TransportError>),
    /// 由测试决定何时（以及以什么顺序）完成
    Deferred(oneshot::Receiver<HttpResponse>),
}

#[derive(Default)]
pub(crate) struct TestContext {
    /// Requests in the order they were sent
    pub requests: RefCell<Vec<HttpRequest>>,
    replies: RefCell<VecDeque<Reply>>,
    /// Routes the navigator was sent to
    pub navigations: RefCell<Vec<AppRoute>>,
}

impl TestContext {
    pub fn reply(&self, status: u16, body: &str) {
        self.replies.borrow_mut().push_back(Reply::Ready(Ok(HttpResponse {
            status,
            body: body.to_string(),
        })));
    }

    pub fn fail(&self) {
        self.replies
            .borrow_mut()
            .push_back(Reply::Ready(Err(TransportError("connection refused".into()))));
    }

    pub fn defer(&self) -> oneshot::Sender<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(Reply::Deferred(rx));
        tx
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }
}

#[derive(Clone)]
pub(crate) struct TestClient {
    ctx: Rc<TestContext>,
}

#[async_trait(?Send)]
impl HttpClient for TestClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.ctx.requests.borrow_mut().push(req);
        let reply = self.ctx.replies.borrow_mut().pop_front();
        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Deferred(rx)) => rx
                .await
                .map_err(|_| TransportError("deferred reply dropped".into())),
            None => Err(TransportError("no scripted response".into())),
        }
    }
}

#[derive(Clone)]
pub(crate) struct RecordingNavigator {
    ctx: Rc<TestContext>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: AppRoute) {
        self.ctx.navigations.borrow_mut().push(route);
    }
}

pub(crate) type TestStorefront = Storefront<TestClient, MemoryStorage, RecordingNavigator>;

pub(crate) fn ok(body: &str) -> HttpResponse {
    HttpResponse {
        status: 200,
        body: body.to_string(),
    }
}

pub(crate) fn setup() -> (Rc<TestContext>, MemoryStorage, TestStorefront) {
    let ctx = Rc::new(TestContext::default());
    let storage = MemoryStorage::new();
    let api = StorefrontApi::new(
        TestClient { ctx: ctx.clone() },
        &ClientConfig::new("http://shop.test"),
    );
    let storefront = Storefront::new(
        api,
        SessionStore::new(storage.clone()),
        RecordingNavigator { ctx: ctx.clone() },
    );
    (ctx, storage, storefront)
}

fn sign_in(storage: &MemoryStorage) {
    SessionStore::new(storage.clone()).save(&Session {
        token: "tok-1".into(),
        username: "ann".into(),
    });
}

const PHONE: &str = r#"{"prodId":1,"prodName":"Phone","prodPrice":499.0,"brand":"Acme","category":"Mobiles"}"#;

fn credentials() -> Credentials {
    Credentials {
        username: "ann".into(),
        password: "hunter2".into(),
    }
}

// =========================================================
// Tests
// =========================================================

#[tokio::test]
async fn test_login_stores_session_and_goes_home() {
    let (ctx, storage, storefront) = setup();
    ctx.reply(200, r#"{"token":"jwt-123","username":"ann"}"#);

    let outcome = storefront
        .authenticate(AuthMode::Login, credentials())
        .await
        .unwrap();

    let expected = Session {
        token: "jwt-123".into(),
        username: "ann".into(),
    };
    assert_eq!(outcome, AuthOutcome::SignedIn(expected.clone()));
    assert_eq!(storefront.session(), Some(expected));
    assert_eq!(storage.raw("token").as_deref(), Some("jwt-123"));
    assert_eq!(*ctx.navigations.borrow(), vec![AppRoute::Home]);
    assert_eq!(ctx.urls(), vec!["http://shop.test/api/login"]);
}

#[tokio::test]
async fn test_login_falls_back_to_submitted_username() {
    let (ctx, _, storefront) = setup();
    ctx.reply(200, r#"{"token":"jwt"}"#);

    storefront
        .authenticate(AuthMode::Login, credentials())
        .await
        .unwrap();
    assert_eq!(storefront.session().unwrap().username, "ann");
}

#[tokio::test]
async fn test_login_failure_reports_server_message() {
    let (ctx, storage, storefront) = setup();
    sign_in(&storage);
    ctx.reply(401, r#"{"error":"Invalid credentials"}"#);

    let err = storefront
        .authenticate(AuthMode::Login, credentials())
        .await
        .unwrap_err();

    assert_eq!(err.server_message(), Some("Invalid credentials"));
    // 登录接口的 401 不是会话失效：不清空、不跳转
    assert!(storefront.session().is_some());
    assert!(ctx.navigations.borrow().is_empty());
}

#[tokio::test]
async fn test_login_without_token_is_an_error() {
    let (ctx, _, storefront) = setup();
    ctx.reply(200, r#"{"username":"ann"}"#);

    let result = storefront.authenticate(AuthMode::Login, credentials()).await;
    assert_eq!(result, Err(ApiError::MissingToken));
    assert!(storefront.session().is_none());
    assert!(ctx.navigations.borrow().is_empty());
}

#[tokio::test]
async fn test_signup_with_token_signs_in() {
    let (ctx, _, storefront) = setup();
    ctx.reply(200, r#"{"token":"fresh","username":"bob"}"#);

    let outcome = storefront
        .authenticate(AuthMode::Signup, credentials())
        .await
        .unwrap();

    assert!(matches!(outcome, AuthOutcome::SignedIn(ref s) if s.username == "bob"));
    assert_eq!(ctx.urls(), vec!["http://shop.test/api/signup"]);
    assert_eq!(*ctx.navigations.borrow(), vec![AppRoute::Home]);
}

#[tokio::test]
async fn test_signup_without_token_goes_to_login() {
    let (ctx, _, storefront) = setup();
    ctx.reply(
        200,
        r#"{"message":"User registered successfully","username":"ann"}"#,
    );

    let outcome = storefront
        .authenticate(AuthMode::Signup, credentials())
        .await
        .unwrap();

    assert_eq!(outcome, AuthOutcome::AccountCreated);
    assert!(storefront.session().is_none());
    assert_eq!(*ctx.navigations.borrow(), vec![AppRoute::Login]);
}

#[tokio::test]
async fn test_unauthorized_clears_session_from_any_call() {
    let (ctx, storage, storefront) = setup();

    // 每一种带会话的操作都应触发同样的处理
    for step in 0..4 {
        sign_in(&storage);
        ctx.reply(401, "");

        let err = match step {
            0 => storefront.list_products().await.unwrap_err(),
            1 => storefront.search_products("phone").await.unwrap_err(),
            2 => storefront.product(ProductId::new(1)).await.unwrap_err(),
            _ => storefront
                .add_product(NewProduct::default())
                .await
                .unwrap_err(),
        };

        assert_eq!(err, ApiError::Unauthorized, "step {step}");
        assert_eq!(storefront.session(), None, "step {step}");
        assert_eq!(storage.raw("username"), None, "step {step}");
        assert_eq!(
            ctx.navigations.borrow().last(),
            Some(&AppRoute::Login),
            "step {step}"
        );
    }
    assert_eq!(ctx.navigations.borrow().len(), 4);
}

#[tokio::test]
async fn test_other_errors_leave_session_alone() {
    let (ctx, storage, storefront) = setup();
    sign_in(&storage);

    ctx.reply(500, r#"{"error":"boom"}"#);
    assert!(storefront.list_products().await.is_err());
    ctx.fail();
    assert!(matches!(
        storefront.list_products().await,
        Err(ApiError::Network(_))
    ));

    assert!(storefront.session().is_some());
    assert!(ctx.navigations.borrow().is_empty());
}

#[tokio::test]
async fn test_token_from_session_is_attached() {
    let (ctx, storage, storefront) = setup();
    sign_in(&storage);
    ctx.reply(200, &format!("[{PHONE}]"));

    let products = storefront.list_products().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(
        ctx.requests.borrow()[0].header("Authorization"),
        Some("Bearer tok-1")
    );
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let (ctx, _, storefront) = setup();
    ctx.reply(200, "");
    assert_eq!(
        storefront.product(ProductId::new(99)).await,
        Err(ApiError::NotFound)
    );

    ctx.reply(200, PHONE);
    let product = storefront.product(ProductId::new(1)).await.unwrap();
    assert_eq!(product.name, "Phone");
    assert_eq!(ctx.urls()[1], "http://shop.test/api/products/1");
}

#[tokio::test]
async fn test_logout_clears_and_goes_home() {
    let (ctx, storage, storefront) = setup();
    sign_in(&storage);

    storefront.logout();

    assert!(storefront.session().is_none());
    assert_eq!(*ctx.navigations.borrow(), vec![AppRoute::Home]);
}
