// ============================================================================
// SCRIPT LOADER - Carga única de la librería de mapas
// ============================================================================
// Servicio inyectable: un estado de carga compartido + lista de espera.
// La librería externa se pide UNA sola vez por proceso, sin importar cuántas
// veces se monte el selector.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use futures::channel::oneshot;
use futures::future::{self, FutureExt, LocalBoxFuture};

use crate::config::AppConfig;

/// Fallo al cargar la librería externa
#[derive(Debug, Clone, PartialEq)]
pub enum LoadFailure {
    MissingCredential,
    Network(String),
    Unavailable(String),
    Cancelled,
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadFailure::MissingCredential => write!(f, "Missing map access token"),
            LoadFailure::Network(url) => write!(f, "Network error loading {}", url),
            LoadFailure::Unavailable(msg) => write!(f, "Map library unavailable: {}", msg),
            LoadFailure::Cancelled => write!(f, "Map library load was cancelled"),
        }
    }
}

impl std::error::Error for LoadFailure {}

/// Estado de carga, compartido por todos los montajes
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    NotRequested,
    Loading,
    Ready,
    Failed(LoadFailure),
}

/// Qué cargar y con qué credencial
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptRequest {
    pub script_url: String,
    pub stylesheet_url: Option<String>,
    pub access_token: String,
}

impl ScriptRequest {
    pub fn from_config(config: &AppConfig) -> Self {
        let stylesheet_url = Some(config.map_config.stylesheet_url.clone())
            .filter(|url| !url.is_empty());
        Self {
            script_url: config.map_config.script_url.clone(),
            stylesheet_url,
            access_token: config.mapbox_token().to_string(),
        }
    }
}

pub type FetchCallback = Box<dyn FnOnce(Result<(), LoadFailure>)>;

/// Acción externa de carga (inyectar <script>, o un doble en tests).
///
/// `done` se llama exactamente una vez; puede llamarse de forma síncrona.
pub trait ScriptFetcher {
    fn fetch(&self, request: &ScriptRequest, done: FetchCallback);
}

struct LoaderInner {
    fetcher: Box<dyn ScriptFetcher>,
    request: ScriptRequest,
    state: RefCell<LoadState>,
    waiters: RefCell<Vec<oneshot::Sender<Result<(), LoadFailure>>>>,
    fetches: Cell<u32>,
}

/// Cargador de la librería de mapas con deduplicación single-flight
#[derive(Clone)]
pub struct ScriptLoader {
    inner: Rc<LoaderInner>,
}

impl PartialEq for ScriptLoader {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

thread_local! {
    static GLOBAL_LOADER: ScriptLoader = ScriptLoader::new(
        default_fetcher(),
        ScriptRequest::from_config(&crate::config::CONFIG),
    );
}

#[cfg(target_arch = "wasm32")]
fn default_fetcher() -> impl ScriptFetcher {
    super::script_injector::ScriptInjector
}

#[cfg(not(target_arch = "wasm32"))]
fn default_fetcher() -> impl ScriptFetcher {
    NoDocumentFetcher
}

/// Fuera del navegador no hay dónde inyectar el script
#[cfg(not(target_arch = "wasm32"))]
struct NoDocumentFetcher;

#[cfg(not(target_arch = "wasm32"))]
impl ScriptFetcher for NoDocumentFetcher {
    fn fetch(&self, _request: &ScriptRequest, done: FetchCallback) {
        done(Err(LoadFailure::Unavailable("no document available".to_string())));
    }
}

impl ScriptLoader {
    pub fn new(fetcher: impl ScriptFetcher + 'static, request: ScriptRequest) -> Self {
        Self {
            inner: Rc::new(LoaderInner {
                fetcher: Box::new(fetcher),
                request,
                state: RefCell::new(LoadState::NotRequested),
                waiters: RefCell::new(Vec::new()),
                fetches: Cell::new(0),
            }),
        }
    }

    /// Instancia del proceso (una por hilo de UI), construida desde CONFIG
    pub fn global() -> Self {
        GLOBAL_LOADER.with(|loader| loader.clone())
    }

    pub fn state(&self) -> LoadState {
        self.inner.state.borrow().clone()
    }

    /// Número de cargas externas emitidas (0 o 1)
    pub fn fetch_count(&self) -> u32 {
        self.inner.fetches.get()
    }

    /// Resuelve cuando la librería está disponible.
    ///
    /// Soltar el future solo retira a este interesado; la carga en curso sigue
    /// y actualiza el estado igualmente.
    pub fn ensure_loaded(&self) -> LocalBoxFuture<'static, Result<(), LoadFailure>> {
        let current = self.state();
        match current {
            LoadState::Ready => future::ready(Ok(())).boxed_local(),
            LoadState::Failed(failure) => future::ready(Err(failure)).boxed_local(),
            LoadState::Loading => self.wait(),
            LoadState::NotRequested => {
                if self.inner.request.access_token.is_empty() {
                    log::warn!("⚠️ [LOADER] Token de Mapbox vacío, el mapa no se cargará");
                    settle(&self.inner, Err(LoadFailure::MissingCredential));
                    return future::ready(Err(LoadFailure::MissingCredential)).boxed_local();
                }

                *self.inner.state.borrow_mut() = LoadState::Loading;
                let waiting = self.wait();
                self.issue_fetch();
                waiting
            }
        }
    }

    fn wait(&self) -> LocalBoxFuture<'static, Result<(), LoadFailure>> {
        let (tx, rx) = oneshot::channel();
        self.inner.waiters.borrow_mut().push(tx);
        rx.map(|received| received.unwrap_or(Err(LoadFailure::Cancelled)))
            .boxed_local()
    }

    fn issue_fetch(&self) {
        self.inner.fetches.set(self.inner.fetches.get() + 1);
        log::info!("🗺️ [LOADER] Cargando librería de mapas: {}", self.inner.request.script_url);

        let weak: Weak<LoaderInner> = Rc::downgrade(&self.inner);
        let done: FetchCallback = Box::new(move |result| {
            if let Some(inner) = weak.upgrade() {
                settle(&inner, result);
            }
        });
        self.inner.fetcher.fetch(&self.inner.request, done);
    }
}

fn settle(inner: &LoaderInner, result: Result<(), LoadFailure>) {
    *inner.state.borrow_mut() = match &result {
        Ok(()) => {
            log::info!("✅ [LOADER] Librería de mapas lista");
            LoadState::Ready
        }
        Err(failure) => {
            log::error!("❌ [LOADER] Error cargando librería de mapas: {}", failure);
            LoadState::Failed(failure.clone())
        }
    };

    let waiters = std::mem::take(&mut *inner.waiters.borrow_mut());
    for waiter in waiters {
        // Un receptor soltado significa que ese montaje ya no espera
        let _ = waiter.send(result.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{request_with_token, FakeFetcher};
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;

    #[test]
    fn test_concurrent_waiters_share_one_fetch() {
        let fetcher = FakeFetcher::default();
        let loader = ScriptLoader::new(fetcher.clone(), request_with_token());
        let mut pool = LocalPool::new();
        let results = Rc::new(RefCell::new(Vec::new()));

        for _ in 0..3 {
            let pending = loader.ensure_loaded();
            let results = results.clone();
            pool.spawner()
                .spawn_local(async move {
                    let result = pending.await;
                    results.borrow_mut().push(result);
                })
                .unwrap();
        }
        pool.run_until_stalled();

        assert_eq!(loader.state(), LoadState::Loading);
        assert_eq!(fetcher.fetch_count(), 1);
        assert!(results.borrow().is_empty());

        fetcher.complete(Ok(()));
        pool.run_until_stalled();

        assert_eq!(loader.state(), LoadState::Ready);
        assert_eq!(*results.borrow(), vec![Ok(()), Ok(()), Ok(())]);
        assert_eq!(loader.fetch_count(), 1);
    }

    #[test]
    fn test_ready_resolves_immediately_without_refetch() {
        let fetcher = FakeFetcher::default();
        let loader = ScriptLoader::new(fetcher.clone(), request_with_token());
        let first = loader.ensure_loaded();
        fetcher.complete(Ok(()));
        assert_eq!(block_on(first), Ok(()));

        for _ in 0..5 {
            assert_eq!(block_on(loader.ensure_loaded()), Ok(()));
        }
        assert_eq!(fetcher.fetch_count(), 1);
    }

    #[test]
    fn test_failure_is_sticky_for_the_session() {
        let fetcher = FakeFetcher::default();
        let loader = ScriptLoader::new(fetcher.clone(), request_with_token());
        let first = loader.ensure_loaded();
        let second = loader.ensure_loaded();
        fetcher.complete(Err(LoadFailure::Network("https://cdn/mapbox-gl.js".into())));

        let expected = Err(LoadFailure::Network("https://cdn/mapbox-gl.js".into()));
        assert_eq!(block_on(first), expected);
        assert_eq!(block_on(second), expected);
        assert_eq!(block_on(loader.ensure_loaded()), expected);
        assert_eq!(fetcher.fetch_count(), 1);
        assert!(matches!(loader.state(), LoadState::Failed(LoadFailure::Network(_))));
    }

    #[test]
    fn test_empty_token_fails_without_fetching() {
        let fetcher = FakeFetcher::default();
        let mut request = request_with_token();
        request.access_token = String::new();
        let loader = ScriptLoader::new(fetcher.clone(), request);

        assert_eq!(block_on(loader.ensure_loaded()), Err(LoadFailure::MissingCredential));
        assert_eq!(block_on(loader.ensure_loaded()), Err(LoadFailure::MissingCredential));
        assert_eq!(fetcher.fetch_count(), 0);
        assert_eq!(loader.state(), LoadState::Failed(LoadFailure::MissingCredential));
    }

    #[test]
    fn test_dropped_waiter_does_not_disturb_others() {
        let fetcher = FakeFetcher::default();
        let loader = ScriptLoader::new(fetcher.clone(), request_with_token());
        let abandoned = loader.ensure_loaded();
        let kept = loader.ensure_loaded();
        drop(abandoned);

        fetcher.complete(Ok(()));
        assert_eq!(block_on(kept), Ok(()));
        assert_eq!(loader.state(), LoadState::Ready);
    }

    #[test]
    fn test_synchronous_fetcher_completion() {
        struct AlreadyPresent;
        impl ScriptFetcher for AlreadyPresent {
            fn fetch(&self, _request: &ScriptRequest, done: FetchCallback) {
                done(Ok(()));
            }
        }

        let loader = ScriptLoader::new(AlreadyPresent, request_with_token());
        assert_eq!(block_on(loader.ensure_loaded()), Ok(()));
        assert_eq!(loader.state(), LoadState::Ready);
        assert_eq!(loader.fetch_count(), 1);
    }

    #[test]
    fn test_loader_dropped_before_settling_cancels_waiters() {
        let fetcher = FakeFetcher::default();
        let loader = ScriptLoader::new(fetcher.clone(), request_with_token());
        let pending = loader.ensure_loaded();
        drop(loader);
        // La callback pendiente ya no encuentra el loader
        fetcher.complete(Ok(()));
        assert_eq!(block_on(pending), Err(LoadFailure::Cancelled));
    }
}
