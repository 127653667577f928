use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::extract::{DefaultBodyLimit, Form, Multipart, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use brief_core::{Mode, Msg};
use brief_engine::{CompletionSettings, Engine};
use engine_logging::{engine_info, engine_warn};
use serde::Deserialize;
use uuid::Uuid;

use super::effects::EffectRunner;
use super::session::{Session, SessionStore, SESSION_COOKIE};
use super::ui::{self, constants::*};

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
    /// Sessions untouched for this long are dropped.
    pub session_idle_timeout: Duration,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
            max_upload_bytes: 200 * 1024 * 1024,
            session_idle_timeout: Duration::from_secs(60 * 60),
        }
    }
}

/// Everything a request handler needs: the session map and the effect runner.
pub struct AppContext {
    sessions: SessionStore,
    effects: EffectRunner,
}

impl AppContext {
    pub fn new(engine: Engine, settings: &ServerSettings) -> Self {
        Self {
            sessions: SessionStore::new(settings.session_idle_timeout),
            effects: EffectRunner::new(engine),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Applies `msg`, runs every resulting effect to completion and feeds the
    /// outcomes back until the state machine settles.
    async fn process(&self, session: &Session, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            for effect in session.dispatch(msg) {
                inbox.push_back(self.effects.run(effect).await);
            }
        }
    }

    fn resolve(&self, headers: &HeaderMap) -> (Session, Option<HeaderValue>) {
        let (session, created) = self.sessions.resolve(session_cookie(headers));
        let cookie = created.then(|| set_cookie_value(session.id())).flatten();
        (session, cookie)
    }
}

pub async fn run_app(settings: ServerSettings, completion: CompletionSettings) -> anyhow::Result<()> {
    let context = Arc::new(AppContext::new(Engine::new(completion), &settings));
    let app = router(context, &settings);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;
    engine_info!("Listening on http://{}", settings.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    engine_info!("Server stopped");
    Ok(())
}

pub fn router(context: Arc<AppContext>, settings: &ServerSettings) -> Router {
    Router::new()
        .route(ROUTE_PAGE, get(show_page))
        .route(ROUTE_CREDENTIAL, post(enter_credential))
        .route(ROUTE_MODE, post(select_mode))
        .route(ROUTE_SUBMIT, post(submit))
        .route(ROUTE_UPLOAD, post(upload_pdf))
        .layer(DefaultBodyLimit::max(settings.max_upload_bytes))
        .with_state(context)
}

#[derive(Deserialize)]
struct CredentialForm {
    api_key: String,
}

#[derive(Deserialize)]
struct ModeForm {
    mode: String,
}

#[derive(Deserialize)]
struct SubmitForm {
    /// Absent in the PDF mode, which has no text field.
    text: Option<String>,
}

async fn show_page(State(context): State<Arc<AppContext>>, headers: HeaderMap) -> Response {
    let (session, cookie) = context.resolve(&headers);
    let page = ui::render::render(&session.view());
    with_cookie(Html(page).into_response(), cookie)
}

async fn enter_credential(
    State(context): State<Arc<AppContext>>,
    headers: HeaderMap,
    Form(form): Form<CredentialForm>,
) -> Response {
    let (session, cookie) = context.resolve(&headers);
    context
        .process(&session, Msg::CredentialEntered(form.api_key))
        .await;
    back_to_page(cookie)
}

async fn select_mode(
    State(context): State<Arc<AppContext>>,
    headers: HeaderMap,
    Form(form): Form<ModeForm>,
) -> Response {
    let (session, cookie) = context.resolve(&headers);
    match Mode::from_key(&form.mode) {
        Some(mode) => context.process(&session, Msg::ModeSelected(mode)).await,
        None => engine_warn!("Session {} sent unknown mode {:?}", session.id(), form.mode),
    }
    back_to_page(cookie)
}

async fn submit(
    State(context): State<Arc<AppContext>>,
    headers: HeaderMap,
    Form(form): Form<SubmitForm>,
) -> Response {
    let (session, cookie) = context.resolve(&headers);
    if let Some(text) = form.text {
        context.process(&session, Msg::InputChanged(text)).await;
    }
    // Blocks until the completion returns; the browser's pending request is the busy indicator.
    context.process(&session, Msg::SubmitClicked).await;
    back_to_page(cookie)
}

async fn upload_pdf(
    State(context): State<Arc<AppContext>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, (StatusCode, String)> {
    let (session, cookie) = context.resolve(&headers);

    while let Some(field) = multipart.next_field().await.map_err(multipart_rejection)? {
        if field.name() != Some(FIELD_PDF) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_rejection)?;
        // An empty file input still posts an unnamed, empty part.
        if file_name.is_empty() && bytes.is_empty() {
            break;
        }
        engine_info!(
            "Session {} uploaded {} ({} bytes)",
            session.id(),
            file_name,
            bytes.len()
        );
        let msg = Msg::PdfUploaded {
            file_name,
            bytes: bytes.to_vec(),
        };
        context.process(&session, msg).await;
        break;
    }

    Ok(back_to_page(cookie))
}

fn multipart_rejection(err: axum::extract::multipart::MultipartError) -> (StatusCode, String) {
    (err.status(), err.body_text())
}

fn back_to_page(cookie: Option<HeaderValue>) -> Response {
    with_cookie(Redirect::to(ROUTE_PAGE).into_response(), cookie)
}

fn with_cookie(mut response: Response, cookie: Option<HeaderValue>) -> Response {
    if let Some(cookie) = cookie {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    response
}

fn session_cookie(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}

fn set_cookie_value(id: Uuid) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Strict"
    ))
    .ok()
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        engine_warn!("Could not listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
