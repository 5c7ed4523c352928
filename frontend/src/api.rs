use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use reviewflow_shared::{
    gateway::{HttpMethod, HttpRequest, HttpResponse, HttpTransport},
    session::{CredentialStorage, SessionStore},
    ApiGateway,
};
use web_sys::{window, Storage};

use crate::config;

const TOKEN_KEY: &str = "reviewflow_admin_token";

/// Browser fetch via `gloo-net`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
        };
        if let Some(token) = request.bearer.as_deref() {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let response = match request.body {
            Some(body) => json_body(builder, body)?.send().await,
            None => builder.send().await,
        }
        .map_err(|e| format!("Network error: {:?}", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("Network error: {:?}", e))?;
        Ok(HttpResponse {
            status,
            body,
        })
    }
}

fn json_body(builder: RequestBuilder, body: String) -> Result<Request, String> {
    builder
        .header("Content-Type", "application/json")
        .body(body)
        .map_err(|e| format!("Serialize error: {:?}", e))
}

/// Token kept in `sessionStorage`, so it dies with the tab.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserSessionStorage;

fn session_storage() -> Option<Storage> {
    window().and_then(|win| win.session_storage().ok().flatten())
}

impl CredentialStorage for BrowserSessionStorage {
    fn load(&self) -> Option<String> {
        session_storage().and_then(|storage| storage.get_item(TOKEN_KEY).ok().flatten())
    }

    fn store(&self, token: &str) {
        if let Some(storage) = session_storage() {
            if storage.set_item(TOKEN_KEY, token).is_err() {
                web_sys::console::error_1(&"Failed to persist admin session".into());
            }
        }
    }

    fn remove(&self) {
        if let Some(storage) = session_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

pub fn session() -> SessionStore {
    SessionStore::new(BrowserSessionStorage)
}

pub type Gateway = ApiGateway<GlooTransport>;

pub fn gateway() -> Rc<Gateway> {
    Rc::new(ApiGateway::new(&config::client_config(), GlooTransport, session()))
}
