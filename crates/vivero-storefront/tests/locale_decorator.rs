//! Storefront client against a recording transport.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::StatusCode;
use serde_json::json;
use vivero_storefront::{
    BackendConfig, FetchError, LocaleError, LocaleHeaders, LocaleInterceptor, LocaleResolver,
    Method, Request, RequestLocale, Response, StorefrontClient, Transport, LOCALE_HEADER,
    PUBLISHABLE_KEY_HEADER,
};

#[derive(Clone)]
struct RecordingTransport {
    requests: Arc<Mutex<Vec<Request>>>,
    status: StatusCode,
    body: serde_json::Value,
}

impl RecordingTransport {
    fn ok(body: serde_json::Value) -> Self {
        Self {
            requests: Arc::default(),
            status: StatusCode::OK,
            body,
        }
    }

    fn failing(status: StatusCode, body: serde_json::Value) -> Self {
        Self {
            status,
            ..Self::ok(body)
        }
    }

    fn sent(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        self.requests.lock().unwrap().push(request);
        Ok(Response::new(self.status, self.body.to_string()))
    }
}

struct FailingResolver;

#[async_trait]
impl LocaleResolver for FailingResolver {
    async fn locale_headers(&self) -> Result<LocaleHeaders, LocaleError> {
        Err(LocaleError::Resolution("cookie store unavailable".to_string()))
    }
}

struct StaticResolver(LocaleHeaders);

#[async_trait]
impl LocaleResolver for StaticResolver {
    async fn locale_headers(&self) -> Result<LocaleHeaders, LocaleError> {
        Ok(self.0.clone())
    }
}

fn spanish() -> StaticResolver {
    StaticResolver(LocaleHeaders::from([(
        LOCALE_HEADER.to_string(),
        Some("es".to_string()),
    )]))
}

fn config() -> BackendConfig {
    BackendConfig::new("http://localhost:9000/").with_publishable_key("pk_test")
}

fn products() -> serde_json::Value {
    json!({
        "products": [
            { "id": "prod_01", "title": "Lavanda", "handle": "lavanda", "variants": [] }
        ],
        "count": 1
    })
}

#[tokio::test]
async fn failing_resolver_does_not_block_the_request() {
    let transport = RecordingTransport::ok(products());
    let client = StorefrontClient::builder(config())
        .transport(transport.clone())
        .interceptor(LocaleInterceptor::with_resolver(FailingResolver))
        .build()
        .unwrap();

    let page = client.list_products(20).await.unwrap();
    assert_eq!(page.count, 1);

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].header_str(LOCALE_HEADER), None);
}

#[tokio::test]
async fn resolved_locale_is_added() {
    let transport = RecordingTransport::ok(products());
    let client = StorefrontClient::builder(config())
        .transport(transport.clone())
        .interceptor(LocaleInterceptor::with_resolver(spanish()))
        .build()
        .unwrap();

    client.list_products(20).await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent[0].header_str(LOCALE_HEADER), Some("es"));
    assert_eq!(sent[0].url, "http://localhost:9000/store/products?limit=20");
}

#[tokio::test]
async fn caller_locale_wins() {
    let transport = RecordingTransport::ok(products());
    let client = StorefrontClient::builder(config())
        .transport(transport.clone())
        .interceptor(LocaleInterceptor::with_resolver(spanish()))
        .build()
        .unwrap();

    let request = client
        .request(Method::GET, "/store/products")
        .unwrap()
        .header(LOCALE_HEADER, "fr")
        .unwrap();
    let _: serde_json::Value = client.send_json(request).await.unwrap();

    assert_eq!(transport.sent()[0].header_str(LOCALE_HEADER), Some("fr"));
}

#[tokio::test]
async fn extra_resolved_headers_are_merged_and_nulls_dropped() {
    let transport = RecordingTransport::ok(json!({}));
    let resolver = StaticResolver(LocaleHeaders::from([
        (LOCALE_HEADER.to_string(), None),
        ("x-medusa-region".to_string(), Some("us".to_string())),
    ]));
    let client = StorefrontClient::builder(config())
        .transport(transport.clone())
        .interceptor(LocaleInterceptor::with_resolver(resolver))
        .build()
        .unwrap();

    let _: serde_json::Value = client.get_json("/store/regions").await.unwrap();

    let sent = &transport.sent()[0];
    assert_eq!(sent.header_str(LOCALE_HEADER), None);
    assert_eq!(sent.header_str("x-medusa-region"), Some("us"));
}

#[tokio::test]
async fn request_scope_locale_reaches_the_transport() {
    let transport = RecordingTransport::ok(products());
    let client = StorefrontClient::builder(config())
        .transport(transport.clone())
        .with_locale()
        .build()
        .unwrap();

    RequestLocale::scope(Some("es".to_string()), client.list_products(20))
        .await
        .unwrap();
    client.list_products(20).await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent[0].header_str(LOCALE_HEADER), Some("es"));
    assert_eq!(sent[1].header_str(LOCALE_HEADER), None);
}

#[tokio::test]
async fn publishable_key_is_sent() {
    let transport = RecordingTransport::ok(products());
    let client = StorefrontClient::builder(config())
        .transport(transport.clone())
        .build()
        .unwrap();

    client.list_products(20).await.unwrap();

    assert_eq!(
        transport.sent()[0].header_str(PUBLISHABLE_KEY_HEADER),
        Some("pk_test")
    );
}

#[tokio::test]
async fn post_json_sends_a_body() {
    let transport = RecordingTransport::ok(json!({ "cart": { "id": "cart_01" } }));
    let client = StorefrontClient::builder(config())
        .transport(transport.clone())
        .build()
        .unwrap();

    let response: serde_json::Value = client
        .post_json("/store/carts", &json!({ "region_id": "reg_01" }))
        .await
        .unwrap();
    assert_eq!(response["cart"]["id"], "cart_01");

    let sent = &transport.sent()[0];
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.header_str("content-type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_slice(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["region_id"], "reg_01");
}

#[tokio::test]
async fn error_status_becomes_http_error() {
    let transport = RecordingTransport::failing(
        StatusCode::UNAUTHORIZED,
        json!({ "type": "not_allowed", "message": "A valid publishable key is required" }),
    );
    let client = StorefrontClient::builder(config())
        .transport(transport)
        .build()
        .unwrap();

    let err = client.list_products(20).await.unwrap_err();
    match err {
        FetchError::Http { status, url, message } => {
            assert_eq!(status, 401);
            assert_eq!(url, "http://localhost:9000/store/products?limit=20");
            assert_eq!(message, "A valid publishable key is required");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
