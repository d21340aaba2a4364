//! `Waypoint` builder and entry points.
//!
//! This is what a host embeds. It ties the layers together: host signals
//! go through the event dispatcher into the session directory, and
//! commands read the same directory through the roster layer.

use std::sync::Arc;

use tokio::runtime::Handle;
use waypoint_events::{
    DisabledStore, DomainEvent, EventDispatcher, EventError, EventKind,
    HistoryLogger, HookRegistry, Persister, RawSignal, RelationshipNotifier,
    RelationshipTracker, Stage, Store, Subscriber,
};
use waypoint_roster::{NoPlaceholders, TemplateParser};
use waypoint_session::{PresenceProvider, SessionDirectory};

use crate::{
    Channel, CommandContext, CommandStatus, FindCommand, ListCommand, Outbox,
    WaypointConfig, WaypointError,
};

/// Builder for a [`Waypoint`].
///
/// # Example
///
/// ```rust,ignore
/// use waypoint::prelude::*;
///
/// let waypoint = Waypoint::builder(host)
///     .store(my_store)
///     .config(WaypointConfig::from_json(&text)?)
///     .parser(my_placeholders)
///     .build(my_outbox)?;
///
/// waypoint.handle(signal);
/// waypoint.run("list", &Channel::Console, &[]);
/// ```
pub struct WaypointBuilder<P: PresenceProvider, S: Store> {
    provider: P,
    store: S,
    runtime: Option<Handle>,
    parser: Box<dyn TemplateParser>,
    config: WaypointConfig,
    relationships: Option<Box<dyn Subscriber>>,
    hooks: HookRegistry,
    subscribers: Vec<(Stage, Box<dyn Subscriber>)>,
}

impl<P: PresenceProvider> WaypointBuilder<P, DisabledStore> {
    /// Creates a builder with no store, no placeholders and default
    /// command settings.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            store: DisabledStore,
            runtime: None,
            parser: Box::new(NoPlaceholders),
            config: WaypointConfig::default(),
            relationships: None,
            hooks: HookRegistry::new(),
            subscribers: Vec::new(),
        }
    }
}

impl<P: PresenceProvider, S: Store> WaypointBuilder<P, S> {
    /// Sets the persistent store. Without one, join, switch and leave
    /// signals are ignored.
    pub fn store<T: Store>(self, store: T) -> WaypointBuilder<P, T> {
        WaypointBuilder {
            provider: self.provider,
            store,
            runtime: self.runtime,
            parser: self.parser,
            config: self.config,
            relationships: self.relationships,
            hooks: self.hooks,
            subscribers: self.subscribers,
        }
    }

    /// Sets the runtime store writes are spawned on. Defaults to the
    /// runtime `build` is called from.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Sets the host's placeholder parser.
    pub fn parser(mut self, parser: impl TemplateParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn config(mut self, config: WaypointConfig) -> Self {
        self.config = config;
        self
    }

    /// Notifies `tracker` of proxy joins, server changes and proxy leaves
    /// of players who aren't vanished.
    pub fn relationships(
        mut self,
        tracker: impl RelationshipTracker + 'static,
    ) -> Self {
        self.relationships = Some(Box::new(RelationshipNotifier::new(tracker)));
        self
    }

    /// Registers a hook for events of `kind`.
    pub fn hook<F>(mut self, kind: EventKind, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&DomainEvent) -> Result<(), EventError> + Send + Sync + 'static,
    {
        self.hooks.register(kind, name, hook);
        self
    }

    /// Adds a custom subscriber to `stage`.
    pub fn subscribe(
        mut self,
        stage: Stage,
        subscriber: impl Subscriber + 'static,
    ) -> Self {
        self.subscribers.push((stage, Box::new(subscriber)));
        self
    }

    /// Builds the system. Replies for players and the chat-bot go through
    /// `outbox`.
    ///
    /// # Errors
    /// [`WaypointError::NoRuntime`] when no runtime was set and this isn't
    /// called from within one.
    pub fn build(
        self,
        outbox: impl Outbox + 'static,
    ) -> Result<Waypoint<P, S>, WaypointError> {
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|_| WaypointError::NoRuntime)?,
        };

        let directory = Arc::new(SessionDirectory::new(self.provider));
        let persister = Persister::new(Arc::new(self.store), runtime);
        let store_enabled = persister.is_enabled();
        let mut dispatcher =
            EventDispatcher::new(Arc::clone(&directory), persister.clone());

        if let Some(relationships) = self.relationships {
            dispatcher.subscribe(Stage::Relationships, relationships);
        }
        dispatcher.subscribe(Stage::History, HistoryLogger::new(persister));
        dispatcher.subscribe(Stage::Hooks, self.hooks);
        for (stage, subscriber) in self.subscribers {
            dispatcher.subscribe(stage, subscriber);
        }

        tracing::info!(
            subscribers = ?dispatcher.subscriber_names(),
            store_enabled,
            "waypoint ready"
        );

        Ok(Waypoint {
            directory,
            dispatcher,
            parser: self.parser,
            outbox: Box::new(outbox),
            find: FindCommand::new(self.config.find),
            list: ListCommand::new(self.config.list),
        })
    }
}

/// Live presence and the directory commands for one proxy.
pub struct Waypoint<P: PresenceProvider, S: Store> {
    directory: Arc<SessionDirectory<P>>,
    dispatcher: EventDispatcher<P, S>,
    parser: Box<dyn TemplateParser>,
    outbox: Box<dyn Outbox>,
    find: FindCommand,
    list: ListCommand,
}

impl<P: PresenceProvider> Waypoint<P, DisabledStore> {
    /// Creates a builder.
    pub fn builder(provider: P) -> WaypointBuilder<P, DisabledStore> {
        WaypointBuilder::new(provider)
    }
}

impl<P: PresenceProvider, S: Store> Waypoint<P, S> {
    /// Processes one host signal. See [`EventDispatcher::handle`].
    pub fn handle(&self, signal: RawSignal) -> Option<DomainEvent> {
        self.dispatcher.handle(signal)
    }

    /// Runs a directory command by name.
    ///
    /// Returns `None` for a command Waypoint doesn't provide.
    pub fn run(
        &self,
        command: &str,
        channel: &Channel,
        args: &[&str],
    ) -> Option<CommandStatus> {
        match command {
            "find" => Some(self.find(channel, args)),
            "list" => Some(self.list(channel)),
            other => {
                tracing::debug!(command = other, "not a waypoint command");
                None
            }
        }
    }

    pub fn find(&self, channel: &Channel, args: &[&str]) -> CommandStatus {
        self.find.run(&self.context(), channel, args)
    }

    pub fn list(&self, channel: &Channel) -> CommandStatus {
        self.list.run(&self.context(), channel)
    }

    pub fn directory(&self) -> &Arc<SessionDirectory<P>> {
        &self.directory
    }

    pub fn dispatcher(&self) -> &EventDispatcher<P, S> {
        &self.dispatcher
    }

    fn context(&self) -> CommandContext<'_, P> {
        CommandContext {
            directory: &self.directory,
            parser: &*self.parser,
            outbox: &*self.outbox,
        }
    }
}
