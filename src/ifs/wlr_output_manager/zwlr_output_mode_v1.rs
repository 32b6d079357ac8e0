use {
    crate::{
        backend::Mode,
        client::{Client, ClientError},
        ifs::wlr_output_manager::output_head::OutputHead,
        object::{Object, Version},
        utils::clonecell::CloneCell,
        wire::{ZwlrOutputModeV1Id, zwlr_output_mode_v1::*},
    },
    std::{cell::Cell, rc::Rc},
    thiserror::Error,
};

pub struct ZwlrOutputModeV1 {
    pub(super) id: ZwlrOutputModeV1Id,
    pub(super) version: Version,
    pub(super) client: Rc<Client>,
    pub(super) head: CloneCell<Option<Rc<OutputHead>>>,
    pub(super) mode: Cell<Option<Mode>>,
}

impl ZwlrOutputModeV1 {
    /// Returns the mode unless the head has been destroyed.
    pub fn mode(&self) -> Option<Mode> {
        self.mode.get()
    }

    pub fn head(&self) -> Option<Rc<OutputHead>> {
        self.head.get()
    }

    pub fn is_inert(&self) -> bool {
        self.head.is_none()
    }

    pub(super) fn make_inert(&self) {
        self.head.take();
        self.mode.take();
    }

    fn detach(&self) {
        if let Some(head) = self.head.take() {
            head.mode_resources.remove(&(self.client.id, self.id));
        }
        self.make_inert();
    }

    pub fn send_size(&self, width: i32, height: i32) {
        self.client.event(Size {
            self_id: self.id,
            width,
            height,
        });
    }

    pub fn send_refresh(&self, refresh: i32) {
        self.client.event(Refresh {
            self_id: self.id,
            refresh,
        });
    }

    pub fn send_preferred(&self) {
        self.client.event(Preferred { self_id: self.id });
    }

    pub fn send_finished(&self) {
        self.client.event(Finished { self_id: self.id })
    }
}

impl ZwlrOutputModeV1RequestHandler for ZwlrOutputModeV1 {
    type Error = ZwlrOutputModeV1Error;

    fn release(&self, _req: Release, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.detach();
        self.client.remove_obj(self)?;
        Ok(())
    }
}

object_base! {
    self = ZwlrOutputModeV1;
    interface = ZwlrOutputModeV1;
    handler = zwlr_output_mode_v1::ZwlrOutputModeV1RequestHandler;
}

impl Object for ZwlrOutputModeV1 {
    fn break_loops(self: Rc<Self>) {
        self.detach();
    }
}

dedicated_add_obj!(ZwlrOutputModeV1, ZwlrOutputModeV1Id, zwlr_output_modes);

#[derive(Debug, Error)]
pub enum ZwlrOutputModeV1Error {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(ZwlrOutputModeV1Error, ClientError);
