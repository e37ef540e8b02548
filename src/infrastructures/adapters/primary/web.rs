use crate::application::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::application::session::{ClientEvent, DashboardSession, ViewUpdate};
use crate::application::use_cases::estimate_streak::{
    EstimateStreakInteractor, EstimateStreakUseCase, EstimateStreakUseCaseInput,
};
use crate::application::use_cases::list_followers::{
    ListFollowersInteractor, ListFollowersUseCase,
};
use crate::application::use_cases::load_dashboard::{
    LoadDashboardInteractor, LoadDashboardUseCase, LoadDashboardUseCaseInput,
};
use crate::domain::external_apis::github::GitHubApi;
use crate::infrastructures::adapters::primary::html::{page, updates};
use axum::extract::ws::Utf8Bytes;
use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use chrono::Utc;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use std::fmt::Display;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Structure to hold application state (AppState)
pub struct AppState<G: GitHubApi + Send + Sync + 'static> {
    pub username: String,
    pub load_dashboard: Arc<LoadDashboardInteractor<G>>,
    pub estimate_streak: Arc<EstimateStreakInteractor<G>>,
    pub list_followers: Arc<ListFollowersInteractor<G>>,
}

impl<G: GitHubApi + Send + Sync + 'static> AppState<G> {
    pub fn new(github_api: Arc<G>, username: String) -> Self {
        Self {
            load_dashboard: Arc::new(LoadDashboardInteractor::new(
                github_api.clone(),
                username.clone(),
            )),
            estimate_streak: Arc::new(EstimateStreakInteractor::new(
                github_api.clone(),
                username.clone(),
            )),
            list_followers: Arc::new(ListFollowersInteractor::new(github_api, username.clone())),
            username,
        }
    }
}

#[tracing::instrument(name = "index", skip(state))]
async fn index<G: GitHubApi + Send + Sync + 'static>(
    State(state): State<Arc<AppState<G>>>,
) -> Html<String> {
    Html(page::shell(&state.username, Utc::now()))
}

pub async fn websocket_handler<G: GitHubApi + Send + Sync + 'static>(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState<G>>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Renders `updates` and pushes them to the page in order.
async fn send_updates<S>(sender: &mut S, view_updates: &[ViewUpdate]) -> Result<(), S::Error>
where
    S: Sink<Message> + Unpin,
{
    let now = Utc::now();
    for message in view_updates
        .iter()
        .flat_map(|update| updates::render(update, now))
    {
        match serde_json::to_string(&message) {
            Ok(json_string) => sender.send(Message::Text(Utf8Bytes::from(json_string))).await?,
            Err(e) => tracing::error!("Failed to serialize message: {:?}", e),
        }
    }
    Ok(())
}

#[tracing::instrument(name = "handle_socket", skip(socket, state), fields(username = %state.username))]
async fn handle_socket<G: GitHubApi + Send + Sync + 'static>(
    socket: WebSocket,
    state: Arc<AppState<G>>,
) {
    tracing::info!("Client connected");
    let (mut sender, mut receiver) = socket.split();
    run_session(state.as_ref(), &mut sender, &mut receiver).await;
    tracing::info!("Client disconnected");
}

/// One session is one page load: fetch and render once, then serve UI
/// events from `receiver` until the page goes away or `sender` fails.
async fn run_session<G, S, R, E>(state: &AppState<G>, sender: &mut S, receiver: &mut R)
where
    G: GitHubApi + Send + Sync + 'static,
    S: Sink<Message> + Unpin,
    S::Error: Display,
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let dashboard = state
        .load_dashboard
        .execute(LoadDashboardUseCaseInput::default())
        .await;
    let repositories = dashboard.repositories.value().clone();
    let mut session = DashboardSession::new(dashboard);

    if let Err(e) = send_updates(sender, &session.initial_updates()).await {
        tracing::info!("Client disconnected (send error): {}", e);
        return;
    }

    let streak = state
        .estimate_streak
        .execute(EstimateStreakUseCaseInput {
            repositories,
            now: Utc::now(),
        })
        .await;
    if let Err(e) = send_updates(sender, &session.streak_estimated(streak)).await {
        tracing::info!("Client disconnected (send error): {}", e);
        return;
    }

    let mut search: Debouncer<String> = Debouncer::new(SEARCH_DEBOUNCE);

    loop {
        let view_updates = tokio::select! {
            term = search.fire() => {
                tracing::debug!("Searching for {:?}", term);
                session.apply_search(&term)
            },
            message = receiver.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<ClientEvent>(text.as_str()) {
                        Ok(ClientEvent::SearchInput { term }) => {
                            search.schedule(term);
                            continue;
                        }
                        Ok(ClientEvent::OpenFollowers) => {
                            if let Err(e) = send_updates(sender, &session.open_followers()).await {
                                tracing::info!("Client disconnected (send error): {}", e);
                                break;
                            }
                            let followers = state.list_followers.execute().await;
                            session.followers_loaded(followers)
                        }
                        Ok(event) => {
                            tracing::debug!("Received event: {:?}", event);
                            session.handle(event)
                        }
                        Err(e) => {
                            tracing::warn!("Ignoring malformed client message: {}", e);
                            continue;
                        }
                    }
                }
                Some(Ok(Message::Close(_))) => {
                    tracing::info!("Client disconnected (received close message)");
                    break;
                }
                Some(Ok(_)) => {
                    // Ignore Ping/Pong and Binary messages
                    continue;
                }
                Some(Err(e)) => {
                    tracing::info!("Client disconnected (receive error): {}", e);
                    break;
                }
                None => {
                    tracing::info!("Client or stream ended");
                    break;
                }
            },
        };

        if let Err(e) = send_updates(sender, &view_updates).await {
            tracing::info!("Client disconnected (send error): {}", e);
            break;
        }
    }
}

#[tracing::instrument(name = "health_check")]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub fn create_router<G: GitHubApi + Send + Sync + 'static>(app_state: Arc<AppState<G>>) -> Router {
    Router::new()
        .route("/", get(index::<G>))
        .route("/ws", get(websocket_handler::<G>))
        .route("/health", get(health_check))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::FakeGitHubApi;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use futures_util::stream;
    use serde_json::{Value, json};
    use std::convert::Infallible;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::task::{Context, Poll};
    use std::time::Duration;
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState::new(Arc::new(FakeGitHubApi::failing()), "octocat".to_string());
        create_router(Arc::new(state))
    }

    #[tokio::test]
    async fn test_health_check() -> Result<(), Box<dyn std::error::Error>> {
        let request = Request::builder().uri("/health").body(Body::empty())?;

        let response = app().oneshot(request).await?;

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        assert_eq!(&body[..], b"OK");
        Ok(())
    }

    #[tokio::test]
    async fn test_index_serves_page_shell() -> Result<(), Box<dyn std::error::Error>> {
        let request = Request::builder().uri("/").body(Body::empty())?;

        let response = app().oneshot(request).await?;

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let html = String::from_utf8(body.to_vec())?;
        assert!(html.contains("octocat · GitHub Profile"));
        assert!(html.contains("/ws"));
        Ok(())
    }

    #[tokio::test]
    async fn test_socket_route_requires_upgrade() -> Result<(), Box<dyn std::error::Error>> {
        let request = Request::builder().uri("/ws").body(Body::empty())?;

        let response = app().oneshot(request).await?;

        assert!(response.status().is_client_error());
        Ok(())
    }

    fn dashboard_state(api: FakeGitHubApi) -> AppState<FakeGitHubApi> {
        AppState::new(Arc::new(api), "octocat".to_string())
    }

    fn text(json: &str) -> Message {
        Message::Text(Utf8Bytes::from(json))
    }

    /// A page that sends each message after its delay.
    fn client(
        steps: Vec<(Duration, Message)>,
    ) -> impl Stream<Item = Result<Message, Infallible>> + Unpin {
        Box::pin(stream::iter(steps).then(|(delay, message)| async move {
            tokio::time::sleep(delay).await;
            Ok(message)
        }))
    }

    fn decode(sent: &[Message]) -> Vec<Value> {
        sent.iter()
            .filter_map(|message| match message {
                Message::Text(text) => serde_json::from_str(text.as_str()).ok(),
                _ => None,
            })
            .collect()
    }

    fn rendered<'a>(messages: &'a [Value], target: &str) -> Vec<&'a str> {
        messages
            .iter()
            .filter(|message| message["type"] == "render" && message["target"] == target)
            .filter_map(|message| message["html"].as_str())
            .collect()
    }

    /// Accepts messages while `open` is set, then fails like a dropped socket.
    struct ClosingSink {
        open: Arc<AtomicBool>,
        accepted: usize,
    }

    impl Sink<Message> for ClosingSink {
        type Error = std::io::Error;

        fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            if self.open.load(Ordering::SeqCst) {
                Poll::Ready(Ok(()))
            } else {
                Poll::Ready(Err(std::io::ErrorKind::BrokenPipe.into()))
            }
        }

        fn start_send(mut self: Pin<&mut Self>, _item: Message) -> Result<(), Self::Error> {
            self.accepted += 1;
            Ok(())
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_debounces_search_input() {
        let state = dashboard_state(FakeGitHubApi::with_repositories(Utc::now(), 12));
        let mut sent: Vec<Message> = Vec::new();
        let mut receiver = client(vec![
            (Duration::ZERO, text(r#"{"type":"searchInput","term":"r"}"#)),
            (
                Duration::from_millis(100),
                text(r#"{"type":"searchInput","term":"repo-1"}"#),
            ),
            (Duration::from_secs(1), Message::Close(None)),
        ]);

        run_session(&state, &mut sent, &mut receiver).await;

        let messages = decode(&sent);
        let grids = rendered(&messages, "repos-container");
        assert_eq!(grids.len(), 2);
        assert!(grids[0].contains("repo-5"));
        assert!(grids[1].contains("repo-10"));
        assert!(grids[1].contains("repo-11"));
        assert!(!grids[1].contains("repo-5"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_shows_loading_then_followers() {
        let state = dashboard_state(
            FakeGitHubApi::with_repositories(Utc::now(), 3).with_followers(&["ada"]),
        );
        let mut sent: Vec<Message> = Vec::new();
        let mut receiver = client(vec![
            (Duration::ZERO, text(r#"{"type":"openFollowers"}"#)),
            (Duration::from_secs(1), Message::Close(None)),
        ]);

        run_session(&state, &mut sent, &mut receiver).await;

        let messages = decode(&sent);
        let lists = rendered(&messages, "followers-list");
        assert_eq!(lists.len(), 2);
        assert!(lists[0].contains("Loading followers..."));
        assert!(lists[1].contains("@ada"));
        assert!(messages.contains(&json!({"type": "modal", "target": "followers-modal", "open": true})));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_skips_malformed_messages() {
        let state = dashboard_state(FakeGitHubApi::with_repositories(Utc::now(), 3));
        let mut sent: Vec<Message> = Vec::new();
        let mut receiver = client(vec![
            (Duration::ZERO, text("not json")),
            (Duration::ZERO, text(r#"{"type":"selectTab","tab":"settings"}"#)),
            (Duration::ZERO, Message::Binary(vec![0_u8].into())),
            (Duration::ZERO, text(r#"{"type":"selectTab","tab":"analytics"}"#)),
            (Duration::from_secs(1), Message::Close(None)),
        ]);

        run_session(&state, &mut sent, &mut receiver).await;

        let messages = decode(&sent);
        assert!(messages.contains(&json!({"type": "activate", "group": "tab", "key": "analytics"})));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_ends_when_send_fails() {
        let state = dashboard_state(FakeGitHubApi::with_repositories(Utc::now(), 3));
        let open = Arc::new(AtomicBool::new(true));
        let mut sender = ClosingSink {
            open: Arc::clone(&open),
            accepted: 0,
        };
        let closer = Arc::clone(&open);
        let mut receiver = Box::pin(
            stream::once(async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                closer.store(false, Ordering::SeqCst);
                Ok::<_, Infallible>(text(r#"{"type":"selectTab","tab":"analytics"}"#))
            })
            .chain(stream::pending()),
        );

        let finished = tokio::time::timeout(
            Duration::from_secs(60),
            run_session(&state, &mut sender, &mut receiver),
        )
        .await;

        assert!(finished.is_ok());
        assert!(sender.accepted > 0);
    }
}
