use {
    crate::{
        client::{Client, ClientError},
        ifs::wlr_output_manager::{
            output_configuration::OutputConfiguration,
            output_head::{HeadStateChanges, OutputHead},
            zwlr_output_configuration_v1::ZwlrOutputConfigurationV1,
            zwlr_output_head_v1::ZwlrOutputHeadV1,
            zwlr_output_mode_v1::ZwlrOutputModeV1,
        },
        object::{Object, Version},
        utils::clonecell::CloneCell,
        wire::{
            ZwlrOutputHeadV1Id, ZwlrOutputManagerV1Id, ZwlrOutputModeV1Id,
            zwlr_output_manager_v1::*,
        },
    },
    std::{cell::Cell, rc::Rc},
    thiserror::Error,
};

linear_ids!(WlrOutputManagerIds, WlrOutputManagerId, u64);

pub struct ZwlrOutputManagerV1 {
    pub(super) id: ZwlrOutputManagerV1Id,
    pub(super) manager_id: WlrOutputManagerId,
    pub(super) client: Rc<Client>,
    pub(super) version: Version,
}

impl ZwlrOutputManagerV1 {
    /// Binds the output manager for `client`.
    ///
    /// The session receives all heads followed by `done`. Errors are fatal for the client.
    pub fn bind(
        client: &Rc<Client>,
        id: ZwlrOutputManagerV1Id,
        version: Version,
    ) -> Result<Rc<Self>, ZwlrOutputManagerV1Error> {
        let res = Self::bind_(client, id, version);
        if let Err(e) = &res {
            client.error(e);
        }
        res
    }

    fn bind_(
        client: &Rc<Client>,
        id: ZwlrOutputManagerV1Id,
        version: Version,
    ) -> Result<Rc<Self>, ZwlrOutputManagerV1Error> {
        let registry = &client.state.wlr_output_manager;
        if registry.destroyed.get() {
            return Err(ZwlrOutputManagerV1Error::Destroyed);
        }
        if version.0 == 0 || version.0 > client.state.config.version {
            return Err(ZwlrOutputManagerV1Error::UnsupportedVersion(version));
        }
        let obj = Rc::new(ZwlrOutputManagerV1 {
            id,
            manager_id: registry.ids.next(),
            client: client.clone(),
            version,
        });
        client.add_client_obj(&obj)?;
        registry.managers.set(obj.manager_id, obj.clone());
        for head in registry.heads.values() {
            obj.announce_head(&head)?;
        }
        obj.send_done(registry.serial.get());
        Ok(obj)
    }

    fn detach(&self) {
        self.client
            .state
            .wlr_output_manager
            .managers
            .remove(&self.manager_id);
    }

    /// Creates the proxies of `head` for this session and sends its full description.
    ///
    /// All ids are allocated before anything is sent so that a failure leaves the head
    /// untouched.
    pub(super) fn announce_head(&self, head: &Rc<OutputHead>) -> Result<(), ClientError> {
        let output = &head.output;
        let mi = &output.monitor_info;
        let head_id: ZwlrOutputHeadV1Id = self.client.new_id()?;
        let mut modes = vec![];
        for mode in &mi.modes {
            if modes.iter().any(|(m, _)| m == mode) {
                continue;
            }
            let id: ZwlrOutputModeV1Id = self.client.new_id()?;
            modes.push((*mode, id));
        }
        let resource = Rc::new(ZwlrOutputHeadV1 {
            id: head_id,
            client: self.client.clone(),
            version: self.version,
            head: CloneCell::new(Some(head.clone())),
            modes: Default::default(),
        });
        self.client.add_server_obj(&resource)?;
        head.resources
            .set((self.client.id, head_id), resource.clone());
        self.send_head(&resource);
        resource.send_name(&output.name);
        resource.send_description(&output.description());
        if output.has_physical_size() {
            resource.send_physical_size(mi.width_mm, mi.height_mm);
        }
        for (mode, id) in modes {
            let mode_resource = Rc::new(ZwlrOutputModeV1 {
                id,
                client: self.client.clone(),
                version: self.version,
                head: CloneCell::new(Some(head.clone())),
                mode: Cell::new(Some(mode)),
            });
            self.client.add_server_obj(&mode_resource)?;
            head.mode_resources
                .set((self.client.id, id), mode_resource.clone());
            resource
                .modes
                .borrow_mut()
                .insert(mode, mode_resource.clone());
            resource.send_mode(&mode_resource);
            mode_resource.send_size(mode.width, mode.height);
            match i32::try_from(mode.refresh_rate_millihz) {
                Ok(0) => {}
                Ok(refresh) => mode_resource.send_refresh(refresh),
                Err(_) => log::warn!(
                    "Refresh rate {} mHz of output {} does not fit the protocol",
                    mode.refresh_rate_millihz,
                    output.name,
                ),
            }
            if mi.preferred_mode == Some(mode) {
                mode_resource.send_preferred();
            }
        }
        resource.send_state(HeadStateChanges::all());
        Ok(())
    }

    pub fn send_head(&self, head: &ZwlrOutputHeadV1) {
        self.client.event(Head {
            self_id: self.id,
            head: head.id,
        });
    }

    pub fn send_done(&self, serial: u32) {
        self.client.event(Done {
            self_id: self.id,
            serial,
        });
    }

    pub fn send_finished(&self) {
        self.client.event(Finished { self_id: self.id });
    }
}

impl ZwlrOutputManagerV1RequestHandler for ZwlrOutputManagerV1 {
    type Error = ZwlrOutputManagerV1Error;

    fn create_configuration(
        &self,
        req: CreateConfiguration,
        _slf: &Rc<Self>,
    ) -> Result<(), Self::Error> {
        let config = OutputConfiguration::new_client(req.serial);
        let resource = Rc::new(ZwlrOutputConfigurationV1 {
            id: req.id,
            client: self.client.clone(),
            version: self.version,
            config: CloneCell::new(Some(config.clone())),
        });
        self.client.add_client_obj(&resource)?;
        config.resource.set(Some(resource));
        Ok(())
    }

    fn stop(&self, _req: Stop, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.send_finished();
        self.detach();
        self.client.remove_obj(self)?;
        Ok(())
    }
}

object_base! {
    self = ZwlrOutputManagerV1;
    interface = ZwlrOutputManagerV1;
    handler = zwlr_output_manager_v1::ZwlrOutputManagerV1RequestHandler;
}

simple_add_obj!(ZwlrOutputManagerV1);

impl Object for ZwlrOutputManagerV1 {
    fn break_loops(self: Rc<Self>) {
        self.detach();
    }
}

#[derive(Debug, Error)]
pub enum ZwlrOutputManagerV1Error {
    #[error(transparent)]
    ClientError(Box<ClientError>),
    #[error("Version {0} of the output manager is not supported")]
    UnsupportedVersion(Version),
    #[error("The output manager has been destroyed")]
    Destroyed,
}
efrom!(ZwlrOutputManagerV1Error, ClientError);
