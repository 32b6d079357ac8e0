use {
    crate::{
        backend::{Output, OutputDestroyListener},
        ifs::wlr_output_manager::{
            output_configuration::OutputConfiguration,
            output_head::{HeadState, OutputHead, OutputHeadId, OutputHeadIds},
            zwlr_output_manager_v1::{WlrOutputManagerId, WlrOutputManagerIds, ZwlrOutputManagerV1},
        },
        utils::{clonecell::CloneCell, copyhashmap::CopyHashMap, numcell::NumCell},
    },
    std::{
        cell::Cell,
        rc::{Rc, Weak},
    },
};

pub mod output_configuration;
pub mod output_head;
pub mod zwlr_output_configuration_head;
pub mod zwlr_output_configuration_v1;
pub mod zwlr_output_head_v1;
pub mod zwlr_output_manager_v1;
pub mod zwlr_output_mode_v1;

/// The component that decides whether a proposed layout can be realized.
pub trait OutputManagerHandler {
    /// A session asked for `config` to be applied.
    ///
    /// The handler must eventually call exactly one of
    /// [`OutputConfiguration::send_succeeded`] and [`OutputConfiguration::send_failed`].
    /// After a successful apply it should commit the new layout with
    /// [`WlrOutputManagerState::set_configuration`].
    fn apply(&self, config: &Rc<OutputConfiguration>);

    /// Like `apply` but the layout must not be changed.
    fn test(&self, config: &Rc<OutputConfiguration>);

    /// The output of `head` is being destroyed. Called before the head is destroyed.
    fn head_removed(&self, head: &Rc<OutputHead>) {
        let _ = head;
    }

    fn manager_destroyed(&self) {}
}

/// The registry of heads and bound sessions.
pub struct WlrOutputManagerState {
    ids: WlrOutputManagerIds,
    head_ids: OutputHeadIds,
    heads: CopyHashMap<OutputHeadId, Rc<OutputHead>>,
    serial: NumCell<u32>,
    display_serial: Rc<NumCell<u32>>,
    managers: CopyHashMap<WlrOutputManagerId, Rc<ZwlrOutputManagerV1>>,
    handler: CloneCell<Option<Rc<dyn OutputManagerHandler>>>,
    destroyed: Cell<bool>,
}

impl WlrOutputManagerState {
    pub fn new(display_serial: &Rc<NumCell<u32>>) -> Rc<Self> {
        Rc::new(Self {
            ids: Default::default(),
            head_ids: Default::default(),
            heads: Default::default(),
            serial: NumCell::new(0),
            display_serial: display_serial.clone(),
            managers: Default::default(),
            handler: Default::default(),
            destroyed: Cell::new(false),
        })
    }

    pub fn set_handler(&self, handler: Option<Rc<dyn OutputManagerHandler>>) {
        self.handler.set(handler);
    }

    /// The serial of the layout that sessions currently observe.
    pub fn serial(&self) -> u32 {
        self.serial.get()
    }

    pub fn heads(&self) -> Vec<Rc<OutputHead>> {
        self.heads.values()
    }

    pub fn find_head(&self, output: &Output) -> Option<Rc<OutputHead>> {
        self.heads
            .lock()
            .values()
            .find(|h| h.output.id == output.id)
            .cloned()
    }

    pub fn num_managers(&self) -> usize {
        self.managers.len()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    /// Registers a head that mirrors the current state of `output`.
    ///
    /// The head is destroyed automatically when the output is destroyed.
    pub fn create_head(self: &Rc<Self>, output: &Rc<Output>) -> Rc<OutputHead> {
        let head = Rc::new(OutputHead {
            id: self.head_ids.next(),
            output: output.clone(),
            manager: Rc::downgrade(self),
            state: Cell::new(HeadState::of_output(output).sanitized(output)),
            resources: Default::default(),
            mode_resources: Default::default(),
            output_listener: Cell::new(None),
            destroyed: Cell::new(false),
        });
        let listener: Weak<dyn OutputDestroyListener> = Rc::downgrade(&head) as Weak<_>;
        head.output_listener
            .set(Some(output.on_destroy.attach(listener)));
        self.heads.set(head.id, head.clone());
        log::debug!("Created head for output {}", output.name);
        head
    }

    /// Sends `finished` to all proxies of the head and removes it from the registry.
    ///
    /// Calling this on a head that has already been destroyed has no effect.
    pub fn destroy_head(&self, head: &Rc<OutputHead>) {
        head.destroy();
    }

    /// Announces `head` to all bound sessions.
    pub fn broadcast_new_head(&self, head: &Rc<OutputHead>) {
        for manager in self.managers.values() {
            if let Err(e) = manager.announce_head(head) {
                manager.client.error(e);
            }
        }
    }

    /// Applies `next` to `head` and sends the fields that changed to all proxies.
    pub fn update_head(&self, head: &OutputHead, next: HeadState) {
        head.update(next);
    }

    /// Commits a layout.
    ///
    /// Heads without a counterpart in `config` are destroyed. Heads of `config` without a
    /// counterpart in the registry are created and announced. Afterwards `config` is
    /// destroyed and every session receives `done` with a new serial.
    pub fn set_configuration(self: &Rc<Self>, config: &Rc<OutputConfiguration>) {
        if self.destroyed.get() {
            log::warn!("Ignoring configuration for a destroyed output manager");
            config.destroy();
            return;
        }
        for head in self.heads.values() {
            match config.find_head(&head.output) {
                Some(config_head) => {
                    head.update(config_head.state());
                    config_head.destroy();
                }
                _ => head.destroy(),
            }
        }
        for config_head in config.heads() {
            let head = self.create_head(&config_head.output);
            head.state.set(config_head.state().sanitized(&head.output));
            self.broadcast_new_head(&head);
        }
        config.destroy();
        self.serial.set(self.display_serial.next_wrapping());
        log::debug!("Output layout committed with serial {}", self.serial.get());
        for manager in self.managers.values() {
            manager.send_done(self.serial.get());
        }
    }

    /// Destroys all heads and unbinds all sessions.
    pub fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        if let Some(handler) = self.handler.take() {
            handler.manager_destroyed();
        }
        for head in self.heads.values() {
            head.destroy();
        }
        self.managers.clear();
    }
}
