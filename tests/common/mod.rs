#![allow(dead_code)]

//! In-memory test doubles and router assembly.
//!
//! The repository traits are implemented over mutex-guarded vectors so
//! handler, service, and envelope behavior can be exercised end to end
//! without external services.

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum::routing::{get, post};
use axum::{Router, middleware};
use chrono::Utc;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use shortlink::api::handlers::{
    create_link_handler, dashboard_stats_handler, delete_link_handler, get_link_handler,
    list_links_handler, login_handler, logout_handler, redirect_handler, refresh_handler,
    register_handler, update_link_handler,
};
use shortlink::api::middleware::auth;
use shortlink::application::services::{AuthService, LinkService, StatsService};
use shortlink::auth::TokenService;
use shortlink::domain::click_event::ClickEvent;
use shortlink::domain::entities::{
    DailyVisits, LinkListFilter, LinkPatch, NewClick, NewSession, NewShortLink, NewUser, Session,
    ShortLink, User,
};
use shortlink::domain::repositories::{
    ClickRepository, LinkRepository, SessionRepository, StatsRepository, UserRepository,
};
use shortlink::error::AppError;
use shortlink::infrastructure::cache::{CacheResult, CacheService};
use shortlink::state::AppState;

pub const ACCESS_SECRET: &str = "access-secret-for-tests";
pub const REFRESH_SECRET: &str = "refresh-secret-for-tests";
pub const BASE_URL: &str = "http://sl.test/";

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryStore {
    next_id: AtomicI64,
    pub users: Mutex<Vec<User>>,
    pub sessions: Mutex<Vec<Session>>,
    pub links: Mutex<Vec<ShortLink>>,
    pub clicks: Mutex<Vec<NewClick>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI64::new(1),
            ..Default::default()
        })
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn link_by_code(&self, code: &str) -> Option<ShortLink> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.short_code == code)
            .cloned()
    }

    pub fn click_count(&self) -> usize {
        self.clicks.lock().unwrap().len()
    }
}

// ---------------------------------------------------------------------------
// Repository fakes
// ---------------------------------------------------------------------------

pub struct MemoryUserRepository(pub Arc<MemoryStore>);

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.0.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict("Unique constraint violation"));
        }

        let user = User {
            id: self.0.next_id(),
            full_name: new_user.full_name,
            email: new_user.email,
            password: new_user.password,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.email == email))
    }
}

pub struct MemorySessionRepository(pub Arc<MemoryStore>);

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn create(&self, new_session: NewSession) -> Result<i64, AppError> {
        let id = self.0.next_id();
        self.0.sessions.lock().unwrap().push(Session {
            id,
            user_id: new_session.user_id,
            refresh_token: new_session.refresh_token,
            login_time: Utc::now(),
            logout_time: None,
            expired_at: new_session.expired_at,
            ip_address: new_session.ip_address,
            user_agent: new_session.user_agent,
            is_active: true,
        });
        Ok(id)
    }

    async fn find_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<Session>, AppError> {
        let now = Utc::now();
        Ok(self
            .0
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.refresh_token == refresh_token && s.is_active && s.expired_at > now)
            .cloned())
    }

    async fn check_active(&self, session_id: i64) -> Result<bool, AppError> {
        let now = Utc::now();
        Ok(self
            .0
            .sessions
            .lock()
            .unwrap()
            .iter()
            .any(|s| s.id == session_id && s.is_active && s.expired_at > now))
    }

    async fn invalidate(&self, refresh_token: &str) -> Result<(), AppError> {
        for session in self.0.sessions.lock().unwrap().iter_mut() {
            if session.refresh_token == refresh_token && session.is_active {
                session.is_active = false;
                session.logout_time = Some(Utc::now());
            }
        }
        Ok(())
    }

    async fn invalidate_by_id(&self, session_id: i64) -> Result<(), AppError> {
        for session in self.0.sessions.lock().unwrap().iter_mut() {
            if session.id == session_id && session.is_active {
                session.is_active = false;
                session.logout_time = Some(Utc::now());
            }
        }
        Ok(())
    }

    async fn invalidate_all_for_user(&self, user_id: i64) -> Result<(), AppError> {
        for session in self.0.sessions.lock().unwrap().iter_mut() {
            if session.user_id == user_id && session.is_active {
                session.is_active = false;
                session.logout_time = Some(Utc::now());
            }
        }
        Ok(())
    }
}

pub struct MemoryLinkRepository(pub Arc<MemoryStore>);

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut links = self.0.links.lock().unwrap();
        if links.iter().any(|l| l.short_code == new_link.short_code) {
            return Err(AppError::conflict("Unique constraint violation"));
        }

        let link = ShortLink {
            id: self.0.next_id(),
            owner: new_link.owner,
            short_code: new_link.short_code,
            original_url: new_link.original_url,
            is_active: true,
            click_count: 0,
            last_clicked_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            created_by: new_link.owner.as_id(),
            updated_by: new_link.owner.as_id(),
        };
        links.push(link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.0.link_by_code(code))
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.0.link_by_code(code).is_some())
    }

    async fn list_by_owner(
        &self,
        user_id: i64,
        filter: LinkListFilter,
    ) -> Result<(Vec<ShortLink>, i64), AppError> {
        let links = self.0.links.lock().unwrap();

        let mut matching: Vec<ShortLink> = links
            .iter()
            .filter(|l| l.owner.is_owned_by(user_id))
            .filter(|l| {
                filter.search.as_deref().is_none_or(|needle| {
                    let needle = needle.to_lowercase();
                    l.short_code.to_lowercase().contains(&needle)
                        || l.original_url.to_lowercase().contains(&needle)
                })
            })
            .filter(|l| filter.is_active.is_none_or(|active| l.is_active == active))
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as i64;
        let offset = ((filter.page - 1) * filter.page_size).max(0) as usize;
        let page: Vec<ShortLink> = matching
            .into_iter()
            .skip(offset)
            .take(filter.page_size as usize)
            .collect();

        Ok((page, total))
    }

    async fn update(
        &self,
        code: &str,
        user_id: i64,
        patch: LinkPatch,
    ) -> Result<Option<ShortLink>, AppError> {
        let mut links = self.0.links.lock().unwrap();
        let link = links
            .iter_mut()
            .find(|l| l.short_code == code && l.owner.is_owned_by(user_id));

        Ok(link.map(|link| {
            if let Some(url) = patch.original_url {
                link.original_url = url;
            }
            if let Some(active) = patch.is_active {
                link.is_active = active;
            }
            link.updated_by = Some(user_id);
            link.updated_at = Utc::now();
            link.clone()
        }))
    }

    async fn delete(&self, code: &str, user_id: i64) -> Result<bool, AppError> {
        let mut links = self.0.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| !(l.short_code == code && l.owner.is_owned_by(user_id)));
        Ok(links.len() < before)
    }

    async fn increment_click(&self, code: &str) -> Result<(), AppError> {
        if let Some(link) = self
            .0
            .links
            .lock()
            .unwrap()
            .iter_mut()
            .find(|l| l.short_code == code)
        {
            link.click_count += 1;
            link.last_clicked_at = Some(Utc::now());
        }
        Ok(())
    }
}

pub struct MemoryClickRepository(pub Arc<MemoryStore>);

#[async_trait]
impl ClickRepository for MemoryClickRepository {
    async fn insert(&self, new_click: NewClick) -> Result<(), AppError> {
        self.0.clicks.lock().unwrap().push(new_click);
        Ok(())
    }
}

pub struct MemoryStatsRepository(pub Arc<MemoryStore>);

#[async_trait]
impl StatsRepository for MemoryStatsRepository {
    async fn total_links(&self, user_id: i64) -> Result<i64, AppError> {
        Ok(self
            .0
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.owner.is_owned_by(user_id))
            .count() as i64)
    }

    async fn total_visits(&self, user_id: i64) -> Result<i64, AppError> {
        let owned_ids: Vec<i64> = self
            .0
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.owner.is_owned_by(user_id))
            .map(|l| l.id)
            .collect();

        Ok(self
            .0
            .clicks
            .lock()
            .unwrap()
            .iter()
            .filter(|c| owned_ids.contains(&c.short_link_id))
            .count() as i64)
    }

    async fn last_7_days(&self, user_id: i64) -> Result<Vec<DailyVisits>, AppError> {
        let total = self.total_visits(user_id).await?;
        if total == 0 {
            return Ok(vec![]);
        }
        Ok(vec![DailyVisits {
            day: Utc::now().date_naive(),
            count: total,
        }])
    }
}

// ---------------------------------------------------------------------------
// Cache fake
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn entry(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, _ttl_seconds: u64) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn del(&self, keys: &[&str]) -> CacheResult<()> {
        let mut entries = self.entries.lock().unwrap();
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }

    async fn incr(&self, key: &str) -> CacheResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let next = entries
            .get(key)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0)
            + 1;
        entries.insert(key.to_string(), next.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// State + router assembly
// ---------------------------------------------------------------------------

pub struct TestContext {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub cache: Arc<MemoryCache>,
    pub click_rx: mpsc::Receiver<ClickEvent>,
}

pub fn create_test_state() -> TestContext {
    let store = MemoryStore::new();
    let cache = Arc::new(MemoryCache::default());
    let (click_tx, click_rx) = mpsc::channel(100);

    let user_repo = Arc::new(MemoryUserRepository(store.clone()));
    let session_repo = Arc::new(MemorySessionRepository(store.clone()));
    let link_repo = Arc::new(MemoryLinkRepository(store.clone()));
    let stats_repo = Arc::new(MemoryStatsRepository(store.clone()));

    let tokens = TokenService::new(ACCESS_SECRET, REFRESH_SECRET);

    let state = AppState {
        auth_service: Arc::new(AuthService::new(user_repo, session_repo, tokens)),
        link_service: Arc::new(LinkService::new(link_repo, cache.clone())),
        stats_service: Arc::new(StatsService::new(stats_repo, cache.clone())),
        cache: cache.clone(),
        click_sender: click_tx,
        base_url: BASE_URL.to_string(),
    };

    TestContext {
        state,
        store,
        cache,
        click_rx,
    }
}

/// Assembles the HTTP surface under test: same route and middleware
/// composition as production, minus rate limiting, plus a fixed peer
/// address so `ConnectInfo` extraction works without a real socket.
pub fn test_app(state: AppState) -> Router {
    let auth_router = Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/refresh", post(refresh_handler))
        .route("/logout", post(logout_handler));

    let create_link_router = Router::new()
        .route("/links", post(create_link_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::optional_layer,
        ));

    let protected_router = Router::new()
        .route("/links", get(list_links_handler))
        .route(
            "/links/{code}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/dashboard/stats", get(dashboard_stats_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/{code}", get(redirect_handler))
        .nest(
            "/api/v1",
            Router::new()
                .nest("/auth", auth_router)
                .merge(create_link_router)
                .merge(protected_router),
        )
        .layer(MockConnectInfoLayer)
        .with_state(state)
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> tower::Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
