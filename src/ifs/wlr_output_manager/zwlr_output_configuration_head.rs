use {
    crate::{
        client::{Client, ClientError},
        ifs::wlr_output_manager::output_configuration::OutputConfigurationHead,
        object::{Object, Version},
        utils::clonecell::CloneCell,
        wire::{ZwlrOutputConfigurationHeadV1Id, zwlr_output_configuration_head_v1::*},
    },
    std::{cell::Cell, rc::Rc},
    thiserror::Error,
};

pub struct ZwlrOutputConfigurationHeadV1 {
    pub(super) id: ZwlrOutputConfigurationHeadV1Id,
    pub(super) version: Version,
    pub(super) client: Rc<Client>,
    pub(super) config_head: CloneCell<Option<Rc<OutputConfigurationHead>>>,
    pub(super) mode_set: Cell<bool>,
    pub(super) position_set: Cell<bool>,
}

impl ZwlrOutputConfigurationHeadV1 {
    pub fn new(
        id: ZwlrOutputConfigurationHeadV1Id,
        client: &Rc<Client>,
        version: Version,
        config_head: Option<Rc<OutputConfigurationHead>>,
    ) -> Self {
        Self {
            id,
            version,
            client: client.clone(),
            config_head: CloneCell::new(config_head),
            mode_set: Cell::new(false),
            position_set: Cell::new(false),
        }
    }

    pub fn is_inert(&self) -> bool {
        self.config_head.is_none()
    }
}

impl ZwlrOutputConfigurationHeadV1RequestHandler for ZwlrOutputConfigurationHeadV1 {
    type Error = ZwlrOutputConfigurationHeadV1Error;

    fn set_mode(&self, req: SetMode, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        if self.mode_set.replace(true) {
            return Err(ZwlrOutputConfigurationHeadV1Error::AlreadySet);
        }
        let mode = self.client.lookup(req.mode)?;
        let Some(config_head) = self.config_head.get() else {
            return Ok(());
        };
        let (Some(head), Some(new_mode)) = (mode.head(), mode.mode()) else {
            return Ok(());
        };
        if head.output.id != config_head.output.id {
            return Err(ZwlrOutputConfigurationHeadV1Error::InvalidMode);
        }
        let mut state = config_head.state();
        state.mode = Some(new_mode);
        config_head.set_state(state);
        Ok(())
    }

    fn set_position(&self, req: SetPosition, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        if self.position_set.replace(true) {
            return Err(ZwlrOutputConfigurationHeadV1Error::AlreadySet);
        }
        if let Some(config_head) = self.config_head.get() {
            let mut state = config_head.state();
            state.position = (req.x, req.y);
            config_head.set_state(state);
        }
        Ok(())
    }
}

object_base! {
    self = ZwlrOutputConfigurationHeadV1;
    interface = ZwlrOutputConfigurationHeadV1;
    handler = zwlr_output_configuration_head_v1::ZwlrOutputConfigurationHeadV1RequestHandler;
}

impl Object for ZwlrOutputConfigurationHeadV1 {
    fn break_loops(self: Rc<Self>) {
        if let Some(config_head) = self.config_head.take() {
            config_head.destroy();
        }
    }
}

simple_add_obj!(ZwlrOutputConfigurationHeadV1);

#[derive(Debug, Error)]
pub enum ZwlrOutputConfigurationHeadV1Error {
    #[error(transparent)]
    ClientError(Box<ClientError>),
    #[error("Property has already been set")]
    AlreadySet,
    #[error("Mode doesn't belong to head")]
    InvalidMode,
}
efrom!(ZwlrOutputConfigurationHeadV1Error, ClientError);
