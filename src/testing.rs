// Dobles en memoria para los tests del puente y del loader

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::bridge::{ResizeSource, ResizeSubscription, Scheduler, TimerHandle};
use crate::maps::{ListenerId, MapError, MapMarker, MapProvider, MapWidget};
use crate::models::Coordinates;
use crate::services::{FetchCallback, LoadFailure, ScriptFetcher, ScriptRequest};

pub(crate) fn request_with_token() -> ScriptRequest {
    ScriptRequest {
        script_url: "https://cdn.test/mapbox-gl.js".to_string(),
        stylesheet_url: None,
        access_token: "pk.test-token".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub(crate) struct FakeFetcher {
    pending: Rc<RefCell<Vec<FetchCallback>>>,
    fetches: Rc<Cell<u32>>,
}

impl FakeFetcher {
    pub fn fetch_count(&self) -> u32 {
        self.fetches.get()
    }

    /// Resolver todas las cargas en curso
    pub fn complete(&self, result: Result<(), LoadFailure>) {
        let pending = std::mem::take(&mut *self.pending.borrow_mut());
        for done in pending {
            done(result.clone());
        }
    }
}

impl ScriptFetcher for FakeFetcher {
    fn fetch(&self, _request: &ScriptRequest, done: FetchCallback) {
        self.fetches.set(self.fetches.get() + 1);
        self.pending.borrow_mut().push(done);
    }
}

// ---------------------------------------------------------------------------
// Mapa
// ---------------------------------------------------------------------------

/// Cada mutación observable del widget, en orden
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum WidgetCall {
    CreateMap { center: Coordinates, zoom: f64 },
    CreateMarker(Coordinates),
    SetCenter(Coordinates),
    SetMarker(Coordinates),
    Resize,
    AddListener,
    RemoveListener,
    RemoveMarker,
    DisposeMap,
}

#[derive(Default)]
struct FakeWorld {
    calls: RefCell<Vec<WidgetCall>>,
    center: Cell<Option<Coordinates>>,
    marker: Cell<Option<Coordinates>>,
    listeners: RefCell<Vec<(ListenerId, Rc<dyn Fn(Coordinates)>)>>,
    next_listener: Cell<u32>,
    fail_create: Cell<bool>,
}

impl FakeWorld {
    fn record(&self, call: WidgetCall) {
        self.calls.borrow_mut().push(call);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct FakeContainer(pub u32);

/// Proveedor que anota todo lo que el puente le pide
#[derive(Clone, Default)]
pub(crate) struct FakeProvider {
    world: Rc<FakeWorld>,
}

impl FakeProvider {
    pub fn calls(&self) -> Vec<WidgetCall> {
        self.world.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.world.calls.borrow().len()
    }

    pub fn maps_created(&self) -> usize {
        self.count(|call| matches!(call, WidgetCall::CreateMap { .. }))
    }

    pub fn resizes(&self) -> usize {
        self.count(|call| matches!(call, WidgetCall::Resize))
    }

    pub fn count(&self, predicate: impl Fn(&WidgetCall) -> bool) -> usize {
        self.world.calls.borrow().iter().filter(|call| predicate(call)).count()
    }

    pub fn center(&self) -> Option<Coordinates> {
        self.world.center.get()
    }

    pub fn marker_position(&self) -> Option<Coordinates> {
        self.world.marker.get()
    }

    pub fn listener_count(&self) -> usize {
        self.world.listeners.borrow().len()
    }

    pub fn fail_next_create(&self) {
        self.world.fail_create.set(true);
    }

    /// Simular un click del operador
    pub fn click(&self, position: Coordinates) {
        let listeners: Vec<_> = self
            .world
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(position);
        }
    }
}

impl MapProvider for FakeProvider {
    type Container = FakeContainer;
    type Map = FakeMap;

    fn create_map(
        &self,
        _container: &FakeContainer,
        center: Coordinates,
        zoom: f64,
    ) -> Result<FakeMap, MapError> {
        if self.world.fail_create.replace(false) {
            return Err(MapError::CreationFailed("fake failure".to_string()));
        }
        self.world.record(WidgetCall::CreateMap { center, zoom });
        self.world.center.set(Some(center));
        Ok(FakeMap {
            world: self.world.clone(),
        })
    }
}

pub(crate) struct FakeMap {
    world: Rc<FakeWorld>,
}

impl MapWidget for FakeMap {
    type Marker = FakeMarker;

    fn create_marker(&self, position: Coordinates) -> Result<FakeMarker, MapError> {
        self.world.record(WidgetCall::CreateMarker(position));
        self.world.marker.set(Some(position));
        Ok(FakeMarker {
            world: self.world.clone(),
        })
    }

    fn set_center(&self, center: Coordinates) {
        self.world.record(WidgetCall::SetCenter(center));
        self.world.center.set(Some(center));
    }

    fn center(&self) -> Coordinates {
        self.world.center.get().unwrap_or(Coordinates::new(0.0, 0.0))
    }

    /// Como un mapa real mal medido: recalcular el layout desplaza el centro
    fn trigger_resize(&self) {
        self.world.record(WidgetCall::Resize);
        if let Some(center) = self.world.center.get() {
            self.world
                .center
                .set(Some(Coordinates::new(center.latitude + 0.5, center.longitude - 0.25)));
        }
    }

    fn add_click_listener(&self, listener: Rc<dyn Fn(Coordinates)>) -> ListenerId {
        self.world.record(WidgetCall::AddListener);
        let id = ListenerId(self.world.next_listener.get());
        self.world.next_listener.set(id.0 + 1);
        self.world.listeners.borrow_mut().push((id, listener));
        id
    }

    fn remove_click_listener(&self, id: ListenerId) {
        self.world.record(WidgetCall::RemoveListener);
        self.world.listeners.borrow_mut().retain(|(existing, _)| *existing != id);
    }

    fn dispose(&self) {
        self.world.record(WidgetCall::DisposeMap);
        self.world.center.set(None);
    }
}

pub(crate) struct FakeMarker {
    world: Rc<FakeWorld>,
}

impl MapMarker for FakeMarker {
    fn set_position(&self, position: Coordinates) {
        self.world.record(WidgetCall::SetMarker(position));
        self.world.marker.set(Some(position));
    }

    fn position(&self) -> Coordinates {
        self.world.marker.get().unwrap_or(Coordinates::new(0.0, 0.0))
    }

    fn remove(&self) {
        self.world.record(WidgetCall::RemoveMarker);
        self.world.marker.set(None);
    }
}

// ---------------------------------------------------------------------------
// Temporizadores
// ---------------------------------------------------------------------------

struct CancelOnDrop(Rc<Cell<bool>>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

type ScheduledTask = (u32, Box<dyn FnOnce()>, Rc<Cell<bool>>);

/// Scheduler manual: las tareas corren cuando el test lo decide
#[derive(Clone, Default)]
pub(crate) struct ManualScheduler {
    tasks: Rc<RefCell<Vec<ScheduledTask>>>,
}

impl ManualScheduler {
    pub fn pending(&self) -> usize {
        self.tasks.borrow().iter().filter(|(_, _, cancelled)| !cancelled.get()).count()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.tasks.borrow().iter().map(|(delay, _, _)| *delay).collect()
    }

    /// Ejecutar las tareas no canceladas
    pub fn run_all(&self) {
        self.drain(false);
    }

    /// Ejecutar todo, incluso lo cancelado (temporizador que llega tarde)
    pub fn run_all_ignoring_cancel(&self) {
        self.drain(true);
    }

    fn drain(&self, ignore_cancel: bool) {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        for (_, task, cancelled) in tasks {
            if ignore_cancel || !cancelled.get() {
                task();
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle {
        let cancelled = Rc::new(Cell::new(false));
        self.tasks.borrow_mut().push((delay_ms, task, cancelled.clone()));
        TimerHandle::new(CancelOnDrop(cancelled))
    }
}

// ---------------------------------------------------------------------------
// Resize
// ---------------------------------------------------------------------------

type Observer = (Rc<dyn Fn()>, Rc<Cell<bool>>);

#[derive(Clone, Default)]
pub(crate) struct ManualResize {
    observers: Rc<RefCell<Vec<Observer>>>,
}

impl ManualResize {
    pub fn active_observers(&self) -> usize {
        self.observers.borrow().iter().filter(|(_, stopped)| !stopped.get()).count()
    }

    /// Notificar un cambio de tamaño a los observadores activos
    pub fn notify(&self) {
        let active: Vec<_> = self
            .observers
            .borrow()
            .iter()
            .filter(|(_, stopped)| !stopped.get())
            .map(|(callback, _)| callback.clone())
            .collect();
        for callback in active {
            callback();
        }
    }
}

impl<C> ResizeSource<C> for ManualResize {
    fn observe(&self, _container: &C, on_resize: Rc<dyn Fn()>) -> Option<ResizeSubscription> {
        let stopped = Rc::new(Cell::new(false));
        self.observers.borrow_mut().push((on_resize, stopped.clone()));
        Some(ResizeSubscription::new(CancelOnDrop(stopped)))
    }
}
