use {
    crate::{
        client::{Client, ClientError},
        ifs::wlr_output_manager::{
            output_configuration::{OutputConfiguration, OutputConfigurationHead},
            output_head::HeadState,
            zwlr_output_configuration_head::ZwlrOutputConfigurationHeadV1,
        },
        object::{Object, Version},
        utils::clonecell::CloneCell,
        wire::{ZwlrOutputConfigurationV1Id, zwlr_output_configuration_v1::*},
    },
    std::rc::Rc,
    thiserror::Error,
};

pub struct ZwlrOutputConfigurationV1 {
    pub(super) id: ZwlrOutputConfigurationV1Id,
    pub(super) version: Version,
    pub(super) client: Rc<Client>,
    pub(super) config: CloneCell<Option<Rc<OutputConfiguration>>>,
}

impl ZwlrOutputConfigurationV1 {
    /// Returns the configuration if it can still be modified or submitted.
    fn open_config(&self) -> Result<Rc<OutputConfiguration>, ZwlrOutputConfigurationV1Error> {
        match self.config.get() {
            Some(config) if !config.finalized.get() => Ok(config),
            _ => Err(ZwlrOutputConfigurationV1Error::AlreadyUsed),
        }
    }

    pub fn is_inert(&self) -> bool {
        self.config.is_none()
    }

    fn detach(&self) {
        let Some(config) = self.config.take() else {
            return;
        };
        if config.finalized.get() {
            config.resource.take();
        } else {
            config.destroy();
        }
    }

    fn submit(&self, test: bool) -> Result<(), ZwlrOutputConfigurationV1Error> {
        let config = self.open_config()?;
        config.finalize();
        let registry = &self.client.state.wlr_output_manager;
        if config.serial != registry.serial() {
            log::debug!(
                "Client {}: Ignored configuration request: invalid serial {} (current: {})",
                self.client.id,
                config.serial,
                registry.serial(),
            );
            self.send_cancelled();
            config.destroy();
            return Ok(());
        }
        match registry.handler.get() {
            Some(handler) if test => handler.test(&config),
            Some(handler) => handler.apply(&config),
            _ => {
                log::warn!("There is no handler for output configurations");
                config.send_failed();
            }
        }
        Ok(())
    }

    pub fn send_succeeded(&self) {
        self.client.event(Succeeded { self_id: self.id });
    }

    pub fn send_failed(&self) {
        self.client.event(Failed { self_id: self.id });
    }

    pub fn send_cancelled(&self) {
        self.client.event(Cancelled { self_id: self.id });
    }
}

impl ZwlrOutputConfigurationV1RequestHandler for ZwlrOutputConfigurationV1 {
    type Error = ZwlrOutputConfigurationV1Error;

    fn enable_head(&self, req: EnableHead, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        let config = self.open_config()?;
        let head = self.client.lookup(req.head)?;
        let mut config_head = None;
        if let Some(head) = head.head() {
            if config.find_head(&head.output).is_some() {
                return Err(ZwlrOutputConfigurationV1Error::AlreadyConfiguredHead);
            }
            let state = HeadState {
                enabled: true,
                ..head.state()
            };
            config_head = Some(OutputConfigurationHead::new(&config, &head.output, state));
        }
        let resource = Rc::new(ZwlrOutputConfigurationHeadV1::new(
            req.id,
            &self.client,
            self.version,
            config_head.clone(),
        ));
        self.client.add_client_obj(&resource)?;
        config.head_resources.borrow_mut().push(resource.clone());
        if let Some(config_head) = config_head {
            config_head.resource.set(Some(resource));
        }
        Ok(())
    }

    fn disable_head(&self, req: DisableHead, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        let config = self.open_config()?;
        let head = self.client.lookup(req.head)?;
        let Some(head) = head.head() else {
            return Ok(());
        };
        if config.find_head(&head.output).is_some() {
            return Err(ZwlrOutputConfigurationV1Error::AlreadyConfiguredHead);
        }
        let state = HeadState {
            enabled: false,
            mode: None,
            ..head.state()
        };
        OutputConfigurationHead::new(&config, &head.output, state);
        Ok(())
    }

    fn apply(&self, _req: Apply, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.submit(false)
    }

    fn test(&self, _req: Test, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.submit(true)
    }

    fn destroy(&self, _req: Destroy, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.detach();
        self.client.remove_obj(self)?;
        Ok(())
    }
}

object_base! {
    self = ZwlrOutputConfigurationV1;
    interface = ZwlrOutputConfigurationV1;
    handler = zwlr_output_configuration_v1::ZwlrOutputConfigurationV1RequestHandler;
}

impl Object for ZwlrOutputConfigurationV1 {
    fn break_loops(self: Rc<Self>) {
        self.detach();
    }
}

simple_add_obj!(ZwlrOutputConfigurationV1);

#[derive(Debug, Error)]
pub enum ZwlrOutputConfigurationV1Error {
    #[error(transparent)]
    ClientError(Box<ClientError>),
    #[error("Head has already been configured")]
    AlreadyConfiguredHead,
    #[error("Configuration has already been used")]
    AlreadyUsed,
}
efrom!(ZwlrOutputConfigurationV1Error, ClientError);

impl ZwlrOutputConfigurationV1Error {
    /// The protocol error code sent to the client.
    pub fn code(&self) -> Option<u32> {
        match self {
            Self::ClientError(_) => None,
            Self::AlreadyConfiguredHead => Some(ALREADY_CONFIGURED_HEAD),
            Self::AlreadyUsed => Some(ALREADY_USED),
        }
    }
}

pub const ALREADY_CONFIGURED_HEAD: u32 = 1;
pub const UNCONFIGURED_HEAD: u32 = 2;
pub const ALREADY_USED: u32 = 3;
