//! A running machine instance.

use super::error::MachineError;
use super::executor::{ActionExecutor, ActionPhase};
use super::listener::{ListenerError, ListenerRegistry, StateChangeListener};
use crate::core::{Event, EventKind, ExtendedState, Headers, StateHistory, StateId, StateTransition};
use crate::table::{ActionContext, ActionError, TransitionTable};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of a successful `send_event` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// A transition fired and the machine moved to its target.
    Accepted,
    /// No enabled transition matched; nothing changed.
    Rejected,
}

impl EventResult {
    pub fn is_accepted(self) -> bool {
        self == Self::Accepted
    }
}

/// One instance of a transition table: current state, extended state and
/// listeners.
///
/// A machine is not internally synchronized. Callers that share one across
/// threads wrap it in a mutex, as [`MachineFactory`](super::MachineFactory)
/// does.
///
/// # Example
///
/// ```rust
/// use statewise::engine::{EventResult, Machine};
/// use statewise::table::TransitionTable;
/// use statewise::{event_enum, state_enum};
/// use std::sync::Arc;
///
/// state_enum! { enum Door { Closed, Open } }
/// event_enum! { enum Push { Open, Close } }
///
/// let table = TransitionTable::builder()
///     .initial(Door::Closed)
///     .state(Door::Open)
///     .external(Door::Closed, Push::Open, Door::Open)
///     .external(Door::Open, Push::Close, Door::Closed)
///     .build()?;
///
/// let mut door = Machine::new("front", Arc::new(table));
/// door.start()?;
/// assert_eq!(door.send_event(Push::Open)?, EventResult::Accepted);
/// assert_eq!(door.send_event(Push::Open)?, EventResult::Rejected);
/// assert_eq!(door.current_state(), &Door::Open);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Machine<S: StateId, E: EventKind> {
    id: String,
    uuid: Uuid,
    table: Arc<TransitionTable<S, E>>,
    current: S,
    extended: ExtendedState,
    running: bool,
    listeners: ListenerRegistry<S>,
    executor: ActionExecutor,
    history: StateHistory<S, E>,
    listener_failures: Vec<ListenerError>,
}

impl<S: StateId, E: EventKind> Machine<S, E> {
    /// Create a stopped machine positioned at the table's initial state.
    pub fn new(id: impl Into<String>, table: Arc<TransitionTable<S, E>>) -> Self {
        Self::with_listeners(id, table, ListenerRegistry::new())
    }

    pub fn with_listeners(
        id: impl Into<String>,
        table: Arc<TransitionTable<S, E>>,
        listeners: ListenerRegistry<S>,
    ) -> Self {
        let current = table.initial().clone();
        Self {
            id: id.into(),
            uuid: Uuid::new_v4(),
            table,
            current,
            extended: ExtendedState::new(),
            running: false,
            listeners,
            executor: ActionExecutor::new(),
            history: StateHistory::new(),
            listener_failures: Vec::new(),
        }
    }

    /// Enter the initial state and begin accepting events.
    ///
    /// Runs the initial state's entry action, then notifies listeners with
    /// `(None, initial)`. Starting again after [`stop`](Self::stop) is a
    /// full reset to the initial state; the extended state is kept.
    pub fn start(&mut self) -> Result<(), MachineError> {
        if self.running {
            return Err(MachineError::AlreadyStarted {
                machine: self.id.clone(),
            });
        }

        let table = Arc::clone(&self.table);
        let initial = table.initial_state();
        self.current = initial.id.clone();
        self.running = true;
        self.history = StateHistory::new();
        tracing::debug!(machine = %self.id, state = initial.id.name(), "machine started");

        let headers = Headers::new();
        let mut ctx = ActionContext::new(None, &initial.id, None, &headers, &mut self.extended);
        if let Err(source) =
            self.executor
                .execute(ActionPhase::Entry, initial.on_entry.as_ref(), &mut ctx)
        {
            return Err(action_failed(&self.id, ActionPhase::Entry, &self.current, source));
        }

        self.notify(None, &initial.id);
        Ok(())
    }

    /// Dispatch one event.
    ///
    /// The first transition out of the current state on `event.kind` whose
    /// guard passes is taken: the source's exit action, the transition's
    /// action, the state change, the target's entry action, then listener
    /// notification. A guard that panics is treated as not satisfied.
    ///
    /// A failing action stops that sequence where it is; nothing already
    /// done is undone. In particular, when the target's entry action fails
    /// the machine has already moved to the target, but the transition is
    /// not recorded in [`history`](Self::history) and listeners are not
    /// notified of it.
    pub fn send_event(&mut self, event: impl Into<Event<E>>) -> Result<EventResult, MachineError> {
        if !self.running {
            return Err(MachineError::NotRunning {
                machine: self.id.clone(),
            });
        }

        let event = event.into();
        let table = Arc::clone(&self.table);
        let selected = table
            .transitions_for(&self.current, &event.kind)
            .find(|t| self.executor.allows(t, &self.extended, &event.headers));

        let Some(transition) = selected else {
            tracing::debug!(
                machine = %self.id,
                state = self.current.name(),
                event = event.kind.name(),
                "event rejected"
            );
            return Ok(EventResult::Rejected);
        };

        let source = &transition.source;
        let target = &transition.target;
        let on_exit = table.state(source).and_then(|def| def.on_exit.as_ref());
        let on_entry = table.state(target).and_then(|def| def.on_entry.as_ref());

        let mut ctx = ActionContext::new(
            Some(source),
            target,
            Some(&event.kind),
            &event.headers,
            &mut self.extended,
        );
        if let Err(err) = self.executor.execute(ActionPhase::Exit, on_exit, &mut ctx) {
            return Err(action_failed(&self.id, ActionPhase::Exit, &self.current, err));
        }
        if let Err(err) =
            self.executor
                .execute(ActionPhase::Transition, transition.action.as_ref(), &mut ctx)
        {
            return Err(action_failed(&self.id, ActionPhase::Transition, &self.current, err));
        }
        self.current = target.clone();
        if let Err(err) = self.executor.execute(ActionPhase::Entry, on_entry, &mut ctx) {
            return Err(action_failed(&self.id, ActionPhase::Entry, &self.current, err));
        }

        self.history.push(StateTransition {
            from: source.clone(),
            to: target.clone(),
            event: event.kind.clone(),
            timestamp: Utc::now(),
        });
        tracing::debug!(
            machine = %self.id,
            from = source.name(),
            to = target.name(),
            event = event.kind.name(),
            "transition committed"
        );

        self.notify(Some(source), target);
        Ok(EventResult::Accepted)
    }

    /// Stop accepting events. The current state is kept until the next
    /// `start`, which resets it.
    pub fn stop(&mut self) -> Result<(), MachineError> {
        if !self.running {
            return Err(MachineError::NotRunning {
                machine: self.id.clone(),
            });
        }

        self.running = false;
        tracing::debug!(machine = %self.id, state = self.current.name(), "machine stopped");
        self.listener_failures = self.listeners.notify_stopped(&self.current);
        self.log_listener_failures();
        Ok(())
    }

    /// Register a listener for this instance only, after the ones it was
    /// created with.
    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: StateChangeListener<S> + 'static,
    {
        self.listeners.register(listener);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Identifier unique to this instance, unlike the caller-chosen `id`.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn current_state(&self) -> &S {
        &self.current
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True once the machine sits in a terminal state.
    pub fn is_complete(&self) -> bool {
        self.table.is_terminal(&self.current)
    }

    pub fn extended_state(&self) -> &ExtendedState {
        &self.extended
    }

    pub fn extended_state_mut(&mut self) -> &mut ExtendedState {
        &mut self.extended
    }

    pub fn table(&self) -> &Arc<TransitionTable<S, E>> {
        &self.table
    }

    /// Transitions committed since the last `start`.
    pub fn history(&self) -> &StateHistory<S, E> {
        &self.history
    }

    /// Failures reported by listeners during the most recent notification.
    pub fn listener_failures(&self) -> &[ListenerError] {
        &self.listener_failures
    }

    fn notify(&mut self, from: Option<&S>, to: &S) {
        self.listener_failures = self.listeners.notify(from, to);
        self.log_listener_failures();
    }

    fn log_listener_failures(&self) {
        for failure in &self.listener_failures {
            tracing::warn!(machine = %self.id, error = %failure, "listener failed");
        }
    }
}

fn action_failed<S: StateId>(
    machine: &str,
    phase: ActionPhase,
    state: &S,
    source: ActionError,
) -> MachineError {
    tracing::error!(machine, %phase, state = state.name(), error = %source, "action failed");
    MachineError::ActionFailed {
        machine: machine.to_string(),
        phase,
        state: state.name().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MachineConfig;
    use crate::engine::{lock_machine, MachineFactory};
    use crate::table::{Action, StateDef, Transition};
    use crate::{event_enum, state_enum};
    use std::sync::Mutex;

    state_enum! {
        enum OrderState {
            Submitted,
            Paid,
            Fulfilled,
            Cancelled,
        }
    }

    event_enum! {
        enum OrderEvent {
            Pay,
            Fulfill,
            Cancel,
        }
    }

    use OrderEvent::*;
    use OrderState::*;

    type Trace = Arc<Mutex<Vec<String>>>;

    fn tracing_action(trace: &Trace, label: &'static str) -> Action<OrderState, OrderEvent> {
        let trace = Arc::clone(trace);
        Action::infallible(move |_| trace.lock().unwrap().push(label.to_string()))
    }

    fn order_table(trace: &Trace) -> Arc<TransitionTable<OrderState, OrderEvent>> {
        let table = TransitionTable::builder()
            .add_state(StateDef::initial(Submitted).with_exit(tracing_action(trace, "exit Submitted")))
            .add_state(StateDef::normal(Paid).with_entry(tracing_action(trace, "enter Paid")))
            .terminal(Fulfilled)
            .terminal(Cancelled)
            .add_transition(Transition {
                action: Some(tracing_action(trace, "pay")),
                ..Transition::new(Submitted, Pay, Paid)
            })
            .external(Paid, Fulfill, Fulfilled)
            .external(Submitted, Cancel, Cancelled)
            .external(Paid, Cancel, Cancelled)
            .build()
            .unwrap();
        Arc::new(table)
    }

    #[test]
    fn new_machine_is_stopped_at_initial_state() {
        let machine = Machine::new("order-1", order_table(&Trace::default()));

        assert!(!machine.is_running());
        assert_eq!(machine.current_state(), &Submitted);
        assert_eq!(machine.id(), "order-1");
        assert!(machine.extended_state().is_empty());
    }

    #[test]
    fn send_event_before_start_fails() {
        let mut machine = Machine::new("order-1", order_table(&Trace::default()));

        assert!(matches!(
            machine.send_event(Pay),
            Err(MachineError::NotRunning { .. })
        ));
        assert!(matches!(machine.stop(), Err(MachineError::NotRunning { .. })));
    }

    #[test]
    fn double_start_is_rejected() {
        let mut machine = Machine::new("order-1", order_table(&Trace::default()));
        machine.start().unwrap();
        machine.send_event(Pay).unwrap();

        assert!(matches!(
            machine.start(),
            Err(MachineError::AlreadyStarted { .. })
        ));
        assert_eq!(machine.current_state(), &Paid);
    }

    #[test]
    fn actions_run_exit_transition_entry() {
        let trace = Trace::default();
        let mut machine = Machine::new("order-1", order_table(&trace));
        machine.start().unwrap();

        assert_eq!(machine.send_event(Pay).unwrap(), EventResult::Accepted);
        assert_eq!(
            *trace.lock().unwrap(),
            vec!["exit Submitted", "pay", "enter Paid"]
        );
    }

    #[test]
    fn rejected_event_changes_nothing() {
        let trace = Trace::default();
        let mut machine = Machine::new("order-1", order_table(&trace));
        machine.start().unwrap();

        assert_eq!(machine.send_event(Fulfill).unwrap(), EventResult::Rejected);
        assert_eq!(machine.current_state(), &Submitted);
        assert!(trace.lock().unwrap().is_empty());
        assert!(machine.history().is_empty());
    }

    #[test]
    fn stop_then_start_resets_to_initial() {
        let mut machine = Machine::new("order-1", order_table(&Trace::default()));
        machine.start().unwrap();
        machine.send_event(Pay).unwrap();
        machine.stop().unwrap();

        assert!(matches!(
            machine.send_event(Fulfill),
            Err(MachineError::NotRunning { .. })
        ));
        assert_eq!(machine.current_state(), &Paid);

        machine.start().unwrap();
        assert_eq!(machine.current_state(), &Submitted);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn transition_action_failure_leaves_source_state() {
        let table = TransitionTable::builder()
            .initial(Submitted)
            .state(Paid)
            .add_transition(Transition {
                action: Some(Action::new(|_| Err(ActionError::new("card declined")))),
                ..Transition::new(Submitted, Pay, Paid)
            })
            .build()
            .unwrap();
        let mut machine = Machine::new("order-1", Arc::new(table));
        machine.start().unwrap();

        match machine.send_event(Pay) {
            Err(MachineError::ActionFailed { phase, state, source, .. }) => {
                assert_eq!(phase, ActionPhase::Transition);
                assert_eq!(state, "Submitted");
                assert_eq!(source.message, "card declined");
            }
            other => panic!("Expected ActionFailed, got {other:?}"),
        }
        assert_eq!(machine.current_state(), &Submitted);
        assert!(machine.is_running());
    }

    #[test]
    fn entry_action_failure_leaves_target_state() {
        let table = TransitionTable::builder()
            .initial(Submitted)
            .state(Paid)
            .on_entry(Paid, Action::new(|_| Err("ledger offline".into())))
            .external(Submitted, Pay, Paid)
            .build()
            .unwrap();
        let mut machine = Machine::new("order-1", Arc::new(table));
        machine.start().unwrap();

        match machine.send_event(Pay) {
            Err(MachineError::ActionFailed { phase, state, .. }) => {
                assert_eq!(phase, ActionPhase::Entry);
                assert_eq!(state, "Paid");
            }
            other => panic!("Expected ActionFailed, got {other:?}"),
        }
        assert_eq!(machine.current_state(), &Paid);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn first_satisfied_guard_wins() {
        let table = TransitionTable::builder()
            .initial(Submitted)
            .state(Paid)
            .terminal(Cancelled)
            .add_transition(crate::builder::guarded_transition(
                Submitted,
                Pay,
                Cancelled,
                |vars, _| vars.get_as::<bool>("fraud") == Some(true),
            ))
            .external(Submitted, Pay, Paid)
            .build()
            .unwrap();
        let table = Arc::new(table);

        let mut honest = Machine::new("a", Arc::clone(&table));
        honest.start().unwrap();
        honest.send_event(Pay).unwrap();
        assert_eq!(honest.current_state(), &Paid);

        let mut fraud = Machine::new("b", table);
        fraud.extended_state_mut().insert("fraud", true);
        fraud.start().unwrap();
        fraud.send_event(Pay).unwrap();
        assert_eq!(fraud.current_state(), &Cancelled);
        assert!(fraud.is_complete());
    }

    #[test]
    fn headers_reach_guards_and_actions() {
        let table = TransitionTable::builder()
            .initial(Submitted)
            .state(Paid)
            .transition(
                crate::builder::TransitionBuilder::new()
                    .from(Submitted)
                    .to(Paid)
                    .on(Pay)
                    .when(|_, headers| headers.contains_key("amount"))
                    .perform(|ctx| {
                        let amount = ctx.headers().get_as::<i64>("amount").unwrap_or(0);
                        ctx.extended_state_mut().insert("paid", amount);
                        Ok(())
                    }),
            )
            .unwrap()
            .build()
            .unwrap();
        let mut machine = Machine::new("order-1", Arc::new(table));
        machine.start().unwrap();

        assert_eq!(machine.send_event(Pay).unwrap(), EventResult::Rejected);
        let event = Event::new(Pay).with_header("amount", 25_i64);
        assert_eq!(machine.send_event(event).unwrap(), EventResult::Accepted);
        assert_eq!(machine.extended_state().get_as::<i64>("paid"), Some(25));
    }

    #[test]
    fn listeners_see_start_and_transitions() {
        let seen: Arc<Mutex<Vec<(Option<OrderState>, OrderState)>>> = Arc::default();
        let mut machine = Machine::new("order-1", order_table(&Trace::default()));
        let sink = Arc::clone(&seen);
        machine.add_listener(move |from: Option<&OrderState>, to: &OrderState| -> Result<(), ListenerError> {
            sink.lock().unwrap().push((from.copied(), *to));
            Ok(())
        });

        machine.start().unwrap();
        machine.send_event(Fulfill).unwrap();
        machine.send_event(Pay).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(None, Submitted), (Some(Submitted), Paid)]
        );
    }

    #[test]
    fn listener_failure_does_not_undo_transition() {
        let mut machine = Machine::new("order-1", order_table(&Trace::default()));
        machine.add_listener(|_: Option<&OrderState>, _: &OrderState| -> Result<(), ListenerError> {
            Err("metrics sink down".into())
        });

        machine.start().unwrap();
        assert_eq!(machine.listener_failures().len(), 1);

        assert_eq!(machine.send_event(Pay).unwrap(), EventResult::Accepted);
        assert_eq!(machine.current_state(), &Paid);
        assert_eq!(
            machine.listener_failures(),
            &[ListenerError::new("metrics sink down")]
        );
    }

    #[test]
    fn history_records_committed_transitions() {
        let mut machine = Machine::new("order-1", order_table(&Trace::default()));
        machine.start().unwrap();
        machine.send_event(Pay).unwrap();
        machine.send_event(Fulfill).unwrap();

        assert_eq!(machine.history().get_path(), vec![&Submitted, &Paid, &Fulfilled]);
        assert_eq!(machine.history().last().map(|t| t.event), Some(Fulfill));
    }

    type Seen = Arc<Mutex<Vec<(Option<OrderState>, OrderState)>>>;

    fn recording_listener(seen: &Seen) -> impl StateChangeListener<OrderState> {
        let sink = Arc::clone(seen);
        move |from: Option<&OrderState>, to: &OrderState| -> Result<(), ListenerError> {
            sink.lock().unwrap().push((from.copied(), *to));
            Ok(())
        }
    }

    #[test]
    fn exit_action_failure_leaves_source_state() {
        let trace = Trace::default();
        let table = TransitionTable::builder()
            .initial(Submitted)
            .state(Paid)
            .on_exit(Submitted, Action::new(|_| Err("cart locked".into())))
            .on_entry(Paid, tracing_action(&trace, "enter Paid"))
            .add_transition(Transition {
                action: Some(tracing_action(&trace, "pay")),
                ..Transition::new(Submitted, Pay, Paid)
            })
            .build()
            .unwrap();
        let seen = Seen::default();
        let mut machine = Machine::new("order-1", Arc::new(table));
        machine.add_listener(recording_listener(&seen));
        machine.start().unwrap();

        match machine.send_event(Pay) {
            Err(MachineError::ActionFailed { phase, state, source, .. }) => {
                assert_eq!(phase, ActionPhase::Exit);
                assert_eq!(state, "Submitted");
                assert_eq!(source.message, "cart locked");
            }
            other => panic!("Expected ActionFailed, got {other:?}"),
        }
        assert_eq!(machine.current_state(), &Submitted);
        assert!(trace.lock().unwrap().is_empty());
        assert!(machine.history().is_empty());
        assert_eq!(*seen.lock().unwrap(), vec![(None, Submitted)]);
    }

    #[test]
    fn failed_initial_entry_leaves_machine_running_at_initial() {
        let table = TransitionTable::builder()
            .initial(Submitted)
            .state(Paid)
            .on_entry(Submitted, Action::new(|_| Err("no inventory".into())))
            .external(Submitted, Pay, Paid)
            .build()
            .unwrap();
        let seen = Seen::default();
        let mut machine = Machine::new("order-1", Arc::new(table));
        machine.add_listener(recording_listener(&seen));

        match machine.start() {
            Err(MachineError::ActionFailed { phase, state, .. }) => {
                assert_eq!(phase, ActionPhase::Entry);
                assert_eq!(state, "Submitted");
            }
            other => panic!("Expected ActionFailed, got {other:?}"),
        }
        assert!(machine.is_running());
        assert_eq!(machine.current_state(), &Submitted);
        assert!(seen.lock().unwrap().is_empty());

        assert_eq!(machine.send_event(Pay).unwrap(), EventResult::Accepted);
        assert_eq!(*seen.lock().unwrap(), vec![(Some(Submitted), Paid)]);
    }

    #[test]
    fn entry_action_failure_skips_listeners() {
        let table = TransitionTable::builder()
            .initial(Submitted)
            .state(Paid)
            .on_entry(Paid, Action::new(|_| Err("ledger offline".into())))
            .external(Submitted, Pay, Paid)
            .build()
            .unwrap();
        let seen = Seen::default();
        let mut machine = Machine::new("order-1", Arc::new(table));
        machine.add_listener(recording_listener(&seen));
        machine.start().unwrap();

        assert!(machine.send_event(Pay).is_err());
        assert_eq!(machine.current_state(), &Paid);
        assert_eq!(*seen.lock().unwrap(), vec![(None, Submitted)]);
    }

    struct StopRecorder {
        stopped: Arc<Mutex<Vec<OrderState>>>,
    }

    impl StateChangeListener<OrderState> for StopRecorder {
        fn on_change(&self, _from: Option<&OrderState>, _to: &OrderState) -> Result<(), ListenerError> {
            Ok(())
        }

        fn on_stopped(&self, state: &OrderState) {
            self.stopped.lock().unwrap().push(*state);
        }
    }

    #[test]
    fn stop_notifies_listeners_with_current_state() {
        let stopped = Arc::new(Mutex::new(Vec::new()));
        let mut machine = Machine::new("order-1", order_table(&Trace::default()));
        machine.add_listener(StopRecorder {
            stopped: Arc::clone(&stopped),
        });

        machine.start().unwrap();
        machine.send_event(Pay).unwrap();
        machine.stop().unwrap();

        assert_eq!(*stopped.lock().unwrap(), vec![Paid]);
        assert!(machine.listener_failures().is_empty());
        assert!(matches!(machine.stop(), Err(MachineError::NotRunning { .. })));
        assert_eq!(stopped.lock().unwrap().len(), 1);
    }

    #[test]
    fn factory_machine_rejects_events_after_stop() {
        let factory = MachineFactory::new(MachineConfig::new().with_auto_startup(true));
        let table = order_table(&Trace::default());

        let shared = factory.get_machine("order-1", &table).unwrap();
        {
            let mut machine = lock_machine(&shared);
            machine.send_event(Pay).unwrap();
            machine.stop().unwrap();
        }

        let again = factory.get_machine("order-1", &table).unwrap();
        let mut machine = lock_machine(&again);
        assert!(!machine.is_running());
        assert!(matches!(
            machine.send_event(Fulfill),
            Err(MachineError::NotRunning { ref machine }) if machine == "order-1"
        ));
        assert_eq!(machine.current_state(), &Paid);
    }

    #[test]
    fn panicking_guard_falls_through_to_next_transition() {
        let table = TransitionTable::builder()
            .initial(Submitted)
            .state(Paid)
            .terminal(Cancelled)
            .add_transition(crate::builder::guarded_transition(
                Submitted,
                Pay,
                Cancelled,
                |_, _| panic!("fraud service unreachable"),
            ))
            .external(Submitted, Pay, Paid)
            .build()
            .unwrap();
        let mut machine = Machine::new("order-1", Arc::new(table));
        machine.start().unwrap();

        assert_eq!(machine.send_event(Pay).unwrap(), EventResult::Accepted);
        assert_eq!(machine.current_state(), &Paid);
    }

    #[test]
    fn long_running_machine_keeps_every_transition() {
        let table = TransitionTable::builder()
            .initial(Submitted)
            .state(Paid)
            .external(Submitted, Pay, Paid)
            .external(Paid, Cancel, Submitted)
            .build()
            .unwrap();
        let mut machine = Machine::new("order-1", Arc::new(table));
        machine.start().unwrap();

        for _ in 0..5_000 {
            machine.send_event(Pay).unwrap();
            machine.send_event(Cancel).unwrap();
        }

        assert_eq!(machine.history().len(), 10_000);
        assert_eq!(machine.history().last().map(|t| t.to), Some(Submitted));
    }
}
