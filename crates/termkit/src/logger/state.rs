//! Per-thread logger state.
//!
//! Every logger family (a logger plus everything derived from it) shares one
//! [`StateRegistry`]. The registry hands out one [`LogState`] per thread, so
//! nesting on one thread never leaks into another even when a logger is shared.
//!
//! The states themselves live in thread-local storage and are dropped when
//! their thread exits. The registry only keeps weak handles to them.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::thread::{self, ThreadId};
use std::time::Instant;

use indicatif::ProgressBar;

/// Mutable logging state for one thread
#[derive(Default)]
pub struct LogState {
    /// Current nesting depth
    pub indent: usize,
    /// Messages already emitted through `warn_once`
    pub warn_once_keys: HashSet<String>,
    /// Running timers by label
    pub timers: HashMap<String, Instant>,
    /// Spinner currently drawn on this thread, if any
    pub live: Option<ProgressBar>,
}

impl std::fmt::Debug for LogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogState")
            .field("indent", &self.indent)
            .field("warn_once_keys", &self.warn_once_keys)
            .field("timers", &self.timers)
            .field("live", &self.live.is_some())
            .finish()
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

type SharedState = Arc<Mutex<LogState>>;

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(0);

/// A thread's state for one registry, kept while the registry is alive
struct Slot {
    owner: Weak<()>,
    state: SharedState,
}

thread_local! {
    static SLOTS: RefCell<HashMap<u64, Slot>> = RefCell::new(HashMap::new());
}

/// Per-thread [`LogState`]s of one logger family
#[derive(Debug)]
pub(crate) struct StateRegistry {
    id: u64,
    alive: Arc<()>,
    states: Mutex<HashMap<ThreadId, Weak<Mutex<LogState>>>>,
}

impl Default for StateRegistry {
    fn default() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            alive: Arc::new(()),
            states: Mutex::new(HashMap::new()),
        }
    }
}

impl StateRegistry {
    /// State for the calling thread, created on first use
    pub fn current(&self) -> SharedState {
        SLOTS
            .try_with(|slots| {
                let mut slots = slots.borrow_mut();
                if let Some(slot) = slots.get(&self.id) {
                    return Arc::clone(&slot.state);
                }
                // states of dropped registries
                slots.retain(|_, slot| slot.owner.strong_count() > 0);

                let state = SharedState::default();
                slots.insert(
                    self.id,
                    Slot {
                        owner: Arc::downgrade(&self.alive),
                        state: Arc::clone(&state),
                    },
                );
                self.track(&state);
                state
            })
            .unwrap_or_else(|_| {
                // thread-local storage is already torn down on this thread
                log::trace!("logging during thread teardown, using a detached state");
                SharedState::default()
            })
    }

    fn track(&self, state: &SharedState) {
        let mut states = lock(&self.states);
        states.retain(|_, weak| weak.strong_count() > 0);
        states.insert(thread::current().id(), Arc::downgrade(state));
    }

    /// Run `f` with the calling thread's state locked.
    ///
    /// Keep `f` short: nothing that writes output or runs caller code.
    pub fn with<R>(&self, f: impl FnOnce(&mut LogState) -> R) -> R {
        let state = self.current();
        let mut guard = lock(&state);
        f(&mut guard)
    }

    /// Number of live threads holding state in this registry
    #[cfg(test)]
    pub fn threads(&self) -> usize {
        lock(&self.states)
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

/// Adds one nesting level for as long as it lives
pub(crate) struct IndentGuard {
    state: SharedState,
}

impl IndentGuard {
    pub fn push(registry: &StateRegistry) -> Self {
        let state = registry.current();
        lock(&state).indent += 1;
        Self { state }
    }
}

impl Drop for IndentGuard {
    fn drop(&mut self) {
        let mut state = lock(&self.state);
        state.indent = state.indent.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_shared_within_a_thread() {
        let registry = StateRegistry::default();
        registry.with(|s| s.indent = 3);
        assert_eq!(registry.with(|s| s.indent), 3);
        assert_eq!(registry.threads(), 1);
    }

    #[test]
    fn test_each_thread_gets_fresh_state() {
        let registry = StateRegistry::default();
        registry.with(|s| {
            s.indent = 2;
            s.warn_once_keys.insert("seen".to_string());
        });

        thread::scope(|scope| {
            scope.spawn(|| {
                registry.with(|s| {
                    assert_eq!(s.indent, 0);
                    assert!(s.warn_once_keys.is_empty());
                });
            });
        });

        assert_eq!(registry.with(|s| s.indent), 2);
    }

    #[test]
    fn test_indent_guard_restores_on_drop() {
        let registry = StateRegistry::default();
        {
            let _outer = IndentGuard::push(&registry);
            let _inner = IndentGuard::push(&registry);
            assert_eq!(registry.with(|s| s.indent), 2);
        }
        assert_eq!(registry.with(|s| s.indent), 0);
    }

    #[test]
    fn test_indent_guard_restores_on_panic() {
        let registry = StateRegistry::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = IndentGuard::push(&registry);
            panic!("scope body failed");
        }));
        assert!(result.is_err());
        assert_eq!(registry.with(|s| s.indent), 0);
    }

    #[test]
    fn test_exited_threads_release_their_state() {
        let registry = Arc::new(StateRegistry::default());
        registry.with(|s| s.indent = 1);

        for i in 0..64 {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry.with(|s| s.warn_once_keys.insert(format!("worker {i}")));
            })
            .join()
            .unwrap();
        }

        assert_eq!(registry.threads(), 1);
        assert_eq!(lock(&registry.states).len(), 2);
        assert_eq!(registry.with(|s| s.indent), 1);
    }

    #[test]
    fn test_dropped_registry_is_pruned_from_thread_slots() {
        let first = StateRegistry::default();
        first.with(|s| s.indent = 5);
        let first_id = first.id;
        drop(first);

        let second = StateRegistry::default();
        second.with(|s| s.indent = 1);
        SLOTS.with(|slots| {
            let slots = slots.borrow();
            assert!(!slots.contains_key(&first_id));
            assert!(slots.contains_key(&second.id));
        });
    }

    #[test]
    fn test_registries_do_not_share_state() {
        let a = StateRegistry::default();
        let b = StateRegistry::default();
        a.with(|s| s.indent = 3);
        assert_eq!(b.with(|s| s.indent), 0);
    }
}
