use std::any::Any;

/// Temporizador pendiente; soltarlo lo cancela
pub struct TimerHandle {
    _guard: Box<dyn Any>,
}

impl TimerHandle {
    pub fn new(guard: impl Any) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

/// Retardo de un solo disparo en el event loop de UI
pub trait Scheduler {
    fn once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle;
}

/// Scheduler web sobre gloo_timers::Timeout
#[cfg(target_arch = "wasm32")]
pub struct TimeoutScheduler;

#[cfg(target_arch = "wasm32")]
impl Scheduler for TimeoutScheduler {
    fn once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle {
        use gloo_timers::callback::Timeout;
        // Timeout cancela en Drop
        TimerHandle::new(Timeout::new(delay_ms, task))
    }
}
