use {
    crate::{
        backend,
        client::{Client, ClientError},
        ifs::wlr_output_manager::{
            output_head::{
                HEAD_STATE_ENABLED, HEAD_STATE_MODE, HEAD_STATE_POSITION, HeadStateChanges,
                OutputHead,
            },
            zwlr_output_mode_v1::ZwlrOutputModeV1,
        },
        object::{Object, Version},
        utils::clonecell::CloneCell,
        wire::{ZwlrOutputHeadV1Id, zwlr_output_head_v1::*},
    },
    ahash::AHashMap,
    std::{cell::RefCell, mem, rc::Rc},
    thiserror::Error,
};

pub const HEAD_DISABLED: i32 = 0;
pub const HEAD_ENABLED: i32 = 1;

pub struct ZwlrOutputHeadV1 {
    pub(super) id: ZwlrOutputHeadV1Id,
    pub(super) version: Version,
    pub(super) client: Rc<Client>,
    pub(super) head: CloneCell<Option<Rc<OutputHead>>>,
    pub(super) modes: RefCell<AHashMap<backend::Mode, Rc<ZwlrOutputModeV1>>>,
}

impl ZwlrOutputHeadV1 {
    /// Returns the head mirrored by this proxy unless the head has been destroyed.
    pub fn head(&self) -> Option<Rc<OutputHead>> {
        self.head.get()
    }

    pub fn is_inert(&self) -> bool {
        self.head.is_none()
    }

    fn detach(&self) {
        if let Some(head) = self.head.take() {
            head.resources.remove(&(self.client.id, self.id));
        }
        self.make_inert();
    }

    pub(super) fn make_inert(&self) {
        self.head.take();
        let _modes = mem::take(&mut *self.modes.borrow_mut());
    }

    /// Sends the fields in `changes`. Only `enabled` is sent for a disabled head.
    pub(super) fn send_state(&self, changes: HeadStateChanges) {
        let Some(head) = self.head.get() else {
            return;
        };
        let state = head.state();
        if changes.contains(HEAD_STATE_ENABLED) {
            self.send_enabled(state.enabled);
        }
        if !state.enabled {
            return;
        }
        if changes.contains(HEAD_STATE_MODE) {
            if let Some(mode) = state.mode {
                let resource = self.modes.borrow().get(&mode).cloned();
                match resource {
                    Some(resource) if !resource.is_inert() => self.send_current_mode(&resource),
                    _ => log::debug!(
                        "Client {} has no live proxy for the current mode of {}",
                        self.client.id,
                        head.output.name,
                    ),
                }
            }
        }
        if changes.contains(HEAD_STATE_POSITION) {
            self.send_position(state.position.0, state.position.1);
        }
    }

    pub fn send_name(&self, name: &str) {
        self.client.event(Name {
            self_id: self.id,
            name: name.to_string(),
        });
    }

    pub fn send_description(&self, description: &str) {
        self.client.event(Description {
            self_id: self.id,
            description: description.to_string(),
        });
    }

    pub fn send_physical_size(&self, width: i32, height: i32) {
        self.client.event(PhysicalSize {
            self_id: self.id,
            width,
            height,
        });
    }

    pub fn send_mode(&self, mode: &ZwlrOutputModeV1) {
        self.client.event(Mode {
            self_id: self.id,
            mode: mode.id,
        });
    }

    pub fn send_enabled(&self, enabled: bool) {
        let enabled = if enabled { HEAD_ENABLED } else { HEAD_DISABLED };
        self.client.event(Enabled {
            self_id: self.id,
            enabled,
        });
    }

    pub fn send_current_mode(&self, mode: &ZwlrOutputModeV1) {
        self.client.event(CurrentMode {
            self_id: self.id,
            mode: mode.id,
        });
    }

    pub fn send_position(&self, x: i32, y: i32) {
        self.client.event(Position {
            self_id: self.id,
            x,
            y,
        });
    }

    pub fn send_finished(&self) {
        self.client.event(Finished { self_id: self.id })
    }
}

impl ZwlrOutputHeadV1RequestHandler for ZwlrOutputHeadV1 {
    type Error = ZwlrOutputHeadV1Error;

    fn release(&self, _req: Release, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.detach();
        self.client.remove_obj(self)?;
        Ok(())
    }
}

object_base! {
    self = ZwlrOutputHeadV1;
    interface = ZwlrOutputHeadV1;
    handler = zwlr_output_head_v1::ZwlrOutputHeadV1RequestHandler;
}

impl Object for ZwlrOutputHeadV1 {
    fn break_loops(self: Rc<Self>) {
        self.detach();
    }
}

dedicated_add_obj!(ZwlrOutputHeadV1, ZwlrOutputHeadV1Id, zwlr_output_heads);

#[derive(Debug, Error)]
pub enum ZwlrOutputHeadV1Error {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(ZwlrOutputHeadV1Error, ClientError);
