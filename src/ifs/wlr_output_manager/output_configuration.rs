
use {
    crate::{
        backend::{Output, OutputDestroyListener},
        ifs::wlr_output_manager::{
            output_head::HeadState, zwlr_output_configuration_head::ZwlrOutputConfigurationHeadV1,
            zwlr_output_configuration_v1::ZwlrOutputConfigurationV1,
        },
        utils::{clonecell::CloneCell, errorfmt::ErrorFmt, event_listener::ListenerId},
    },
    std::{
        cell::{Cell, RefCell},
        mem, ptr,
        rc::{Rc, Weak},
    },
};

/// A proposed layout.
///
/// Configurations created by sessions start out open. They are finalized by `apply` or
/// `test` and handed to the [`OutputManagerHandler`](super::OutputManagerHandler) which
/// reports the outcome exactly once.
pub struct OutputConfiguration {
    pub serial: u32,
    pub(super) heads: RefCell<Vec<Rc<OutputConfigurationHead>>>,
    /// Every configuration-head proxy created for this configuration, including inert ones.
    pub(super) head_resources: RefCell<Vec<Rc<ZwlrOutputConfigurationHeadV1>>>,
    pub(super) finalized: Cell<bool>,
    pub(super) finished: Cell<bool>,
    pub(super) destroyed: Cell<bool>,
    pub(super) resource: CloneCell<Option<Rc<ZwlrOutputConfigurationV1>>>,
}

impl OutputConfiguration {
    /// Creates an empty, finalized configuration that is not owned by any session.
    pub fn new() -> Rc<Self> {
        Self::create(0, true)
    }

    pub(super) fn new_client(serial: u32) -> Rc<Self> {
        Self::create(serial, false)
    }

    fn create(serial: u32, finalized: bool) -> Rc<Self> {
        Rc::new(Self {
            serial,
            heads: Default::default(),
            head_resources: Default::default(),
            finalized: Cell::new(finalized),
            finished: Cell::new(false),
            destroyed: Cell::new(false),
            resource: Default::default(),
        })
    }

    pub fn heads(&self) -> Vec<Rc<OutputConfigurationHead>> {
        self.heads.borrow().clone()
    }

    pub fn find_head(&self, output: &Output) -> Option<Rc<OutputConfigurationHead>> {
        self.heads
            .borrow()
            .iter()
            .find(|h| h.output.id == output.id)
            .cloned()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized.get()
    }

    pub fn is_finished(&self) -> bool {
        self.finished.get()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    /// Whether the session that created the configuration still holds it.
    pub fn has_resource(&self) -> bool {
        self.resource.is_some()
    }

    /// Destroys the proxies of all configuration heads. Sessions cannot use them once the
    /// configuration has been submitted.
    pub(super) fn finalize(&self) {
        if self.finalized.replace(true) {
            return;
        }
        for head in self.heads() {
            head.resource.take();
        }
        let resources = mem::take(&mut *self.head_resources.borrow_mut());
        for resource in resources {
            resource.config_head.take();
            if !resource.client.is_connected() {
                continue;
            }
            if let Err(e) = resource.client.remove_obj(&*resource) {
                log::error!(
                    "Client {}: Could not remove configuration head {}: {}",
                    resource.client.id,
                    resource.id,
                    ErrorFmt(e),
                );
            }
        }
    }

    /// Reports that the configuration has been applied or tested successfully.
    ///
    /// # Panics
    ///
    /// Panics if the configuration has not been finalized or if an outcome has already
    /// been reported.
    pub fn send_succeeded(&self) {
        self.finish();
        if let Some(resource) = self.resource.get() {
            resource.send_succeeded();
        }
    }

    /// Reports that the configuration could not be applied or failed the test.
    ///
    /// # Panics
    ///
    /// Panics if the configuration has not been finalized or if an outcome has already
    /// been reported.
    pub fn send_failed(&self) {
        self.finish();
        if let Some(resource) = self.resource.get() {
            resource.send_failed();
        }
    }

    fn finish(&self) {
        assert!(self.finalized.get(), "configuration has not been submitted");
        assert!(
            !self.finished.replace(true),
            "outcome of the configuration has already been reported"
        );
    }

    /// Destroys the configuration and all of its heads.
    ///
    /// The proxy of the session becomes inert.
    pub fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        self.finalize();
        if let Some(resource) = self.resource.take() {
            resource.config.take();
        }
        let heads = mem::take(&mut *self.heads.borrow_mut());
        for head in heads {
            head.destroy();
        }
    }
}

/// The proposed state of one output inside a configuration.
pub struct OutputConfigurationHead {
    pub output: Rc<Output>,
    state: Cell<HeadState>,
    config: Weak<OutputConfiguration>,
    pub(super) resource: CloneCell<Option<Rc<ZwlrOutputConfigurationHeadV1>>>,
    output_listener: Cell<Option<ListenerId>>,
    destroyed: Cell<bool>,
}

impl OutputConfigurationHead {
    /// Adds `output` to `config` with the live state of the output as its proposed state.
    ///
    /// If the output has already been destroyed, the returned head is inert and not part
    /// of the configuration.
    pub fn create(config: &Rc<OutputConfiguration>, output: &Rc<Output>) -> Rc<Self> {
        Self::new(config, output, HeadState::of_output(output))
    }

    pub(super) fn new(
        config: &Rc<OutputConfiguration>,
        output: &Rc<Output>,
        state: HeadState,
    ) -> Rc<Self> {
        let head = Rc::new(Self {
            output: output.clone(),
            state: Cell::new(state),
            config: Rc::downgrade(config),
            resource: Default::default(),
            output_listener: Cell::new(None),
            destroyed: Cell::new(false),
        });
        if output.is_destroyed() {
            head.destroyed.set(true);
            return head;
        }
        let listener: Weak<dyn OutputDestroyListener> = Rc::downgrade(&head) as Weak<_>;
        head.output_listener
            .set(Some(output.on_destroy.attach(listener)));
        config.heads.borrow_mut().push(head.clone());
        head
    }

    pub fn state(&self) -> HeadState {
        self.state.get()
    }

    pub fn set_state(&self, state: HeadState) {
        self.state.set(state);
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    /// Removes the head from its configuration. The proxy of the session becomes inert.
    pub(super) fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        if let Some(resource) = self.resource.take() {
            resource.config_head.take();
        }
        if let Some(id) = self.output_listener.take() {
            self.output.on_destroy.detach(id);
        }
        if let Some(config) = self.config.upgrade() {
            let _removed = {
                let mut heads = config.heads.borrow_mut();
                let pos = heads.iter().position(|h| ptr::eq(&**h, self));
                pos.map(|pos| heads.remove(pos))
            };
        }
    }
}

impl OutputDestroyListener for OutputConfigurationHead {
    fn output_destroyed(self: Rc<Self>, output: &Rc<Output>) {
        log::debug!(
            "Output {} of a pending configuration has been destroyed",
            output.name
        );
        self.destroy();
    }
}
