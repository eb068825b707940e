//! Keyed cache of machine instances.

use super::error::MachineError;
use super::listener::{ListenerRegistry, StateChangeListener};
use super::machine::Machine;
use crate::config::MachineConfig;
use crate::core::{EventKind, StateId};
use crate::table::TransitionTable;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A machine shared between callers. The mutex serializes `start`,
/// `send_event` and `stop` on this one instance.
pub type SharedMachine<S, E> = Arc<Mutex<Machine<S, E>>>;

/// Lock a shared machine, recovering it if a previous holder panicked.
pub fn lock_machine<S: StateId, E: EventKind>(machine: &SharedMachine<S, E>) -> MutexGuard<'_, Machine<S, E>> {
    machine.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Entry<S: StateId, E: EventKind> {
    machine: SharedMachine<S, E>,
    table: Arc<TransitionTable<S, E>>,
}

/// Creates machines on first request for a key and hands out the same
/// instance for every later request.
///
/// Machines are never evicted; they live as long as the factory.
///
/// # Example
///
/// ```rust
/// use statewise::config::MachineConfig;
/// use statewise::engine::{lock_machine, MachineFactory};
/// use statewise::table::TransitionTable;
/// use statewise::{event_enum, state_enum};
/// use std::sync::Arc;
///
/// state_enum! { enum Job { Queued, Done } }
/// event_enum! { enum JobEvent { Finish } }
///
/// let table = Arc::new(
///     TransitionTable::builder()
///         .initial(Job::Queued)
///         .terminal(Job::Done)
///         .external(Job::Queued, JobEvent::Finish, Job::Done)
///         .build()?,
/// );
///
/// let factory = MachineFactory::new(MachineConfig::new().with_auto_startup(true));
/// let job = factory.get_machine("job-7", &table)?;
/// let again = factory.get_machine("job-7", &table)?;
/// assert!(Arc::ptr_eq(&job, &again));
///
/// lock_machine(&job).send_event(JobEvent::Finish)?;
/// assert_eq!(lock_machine(&again).current_state(), &Job::Done);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct MachineFactory<S: StateId, E: EventKind> {
    config: MachineConfig,
    listeners: ListenerRegistry<S>,
    machines: Mutex<HashMap<String, Entry<S, E>>>,
}

impl<S: StateId, E: EventKind> MachineFactory<S, E> {
    pub fn new(config: MachineConfig) -> Self {
        Self {
            config,
            listeners: ListenerRegistry::new(),
            machines: Mutex::new(HashMap::new()),
        }
    }

    /// Add a listener given to every machine created from now on.
    pub fn with_listener<L>(mut self, listener: L) -> Self
    where
        L: StateChangeListener<S> + 'static,
    {
        self.register_listener(listener);
        self
    }

    /// Add a listener given to every machine created from now on.
    pub fn register_listener<L>(&mut self, listener: L)
    where
        L: StateChangeListener<S> + 'static,
    {
        self.listeners.register(listener);
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Return the machine registered under `key`, creating it from `table`
    /// if there is none.
    ///
    /// A new machine is stopped with an empty extended state, unless
    /// `auto_startup` is set, in which case it is started before any other
    /// caller can lock it. The start runs after the factory's key map is
    /// unlocked, so entry actions and listeners may use the factory and
    /// other keys stay available meanwhile. If that start fails the
    /// machine is still registered and the error is returned.
    pub fn get_machine(
        &self,
        key: &str,
        table: &Arc<TransitionTable<S, E>>,
    ) -> Result<SharedMachine<S, E>, MachineError> {
        let mut machines = self.lock_map();

        if let Some(entry) = machines.get(key) {
            if !Arc::ptr_eq(&entry.table, table) {
                tracing::warn!(
                    machine = key,
                    "machine already exists with a different transition table; returning the existing one"
                );
            }
            return Ok(Arc::clone(&entry.machine));
        }

        let machine = Machine::with_listeners(key, Arc::clone(table), self.listeners.clone());
        tracing::debug!(machine = key, uuid = %machine.uuid(), "machine created");

        let shared = Arc::new(Mutex::new(machine));
        let mut instance = lock_machine(&shared);
        machines.insert(
            key.to_string(),
            Entry {
                machine: Arc::clone(&shared),
                table: Arc::clone(table),
            },
        );
        drop(machines);

        let started = if self.config.auto_startup {
            instance.start()
        } else {
            Ok(())
        };
        drop(instance);
        started.map(|()| shared)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock_map().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock_map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_map().is_empty()
    }

    /// Keys of all registered machines, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lock_map().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn lock_map(&self) -> MutexGuard<'_, HashMap<String, Entry<S, E>>> {
        self.machines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: StateId, E: EventKind> Default for MachineFactory<S, E> {
    fn default() -> Self {
        Self::new(MachineConfig::default())
    }
}
