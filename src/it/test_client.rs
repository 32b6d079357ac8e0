use {
    crate::{
        client::{Client, ClientError},
        ifs::wlr_output_manager::zwlr_output_manager_v1::ZwlrOutputManagerV1,
        it::test_error::TestResult,
        object::{ObjectId, Version},
        state::State,
        utils::numcell::NumCell,
        wire::{
            Event, ZwlrOutputConfigurationHeadV1Id, ZwlrOutputConfigurationV1Id,
            ZwlrOutputHeadV1Id, ZwlrOutputManagerV1Id, ZwlrOutputModeV1Id,
            zwlr_output_configuration_head_v1 as config_head, zwlr_output_configuration_v1 as config,
            zwlr_output_head_v1 as head, zwlr_output_manager_v1 as manager,
            zwlr_output_mode_v1 as mode,
        },
    },
    ahash::AHashMap,
    indexmap::IndexMap,
    isnt::std_1::vec::IsntVecExt,
    std::{
        cell::{Cell, RefCell},
        rc::Rc,
    },
};

#[derive(Clone, Debug, Default)]
pub struct TestHead {
    pub name: String,
    pub description: String,
    pub physical_size: Option<(i32, i32)>,
    pub modes: Vec<ZwlrOutputModeV1Id>,
    pub enabled: Option<bool>,
    pub current_mode: Option<ZwlrOutputModeV1Id>,
    pub position: Option<(i32, i32)>,
    pub finished: bool,
}

#[derive(Clone, Debug, Default)]
pub struct TestMode {
    pub size: Option<(i32, i32)>,
    pub refresh: Option<i32>,
    pub preferred: bool,
    pub finished: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Succeeded,
    Failed,
    Cancelled,
}

/// A session that mirrors the state it has been told about.
pub struct TestClient {
    pub client: Rc<Client>,
    pub manager: Cell<ZwlrOutputManagerV1Id>,
    next_id: NumCell<u32>,
    pub events: RefCell<Vec<Event>>,
    pub heads: RefCell<IndexMap<ZwlrOutputHeadV1Id, TestHead>>,
    pub modes: RefCell<AHashMap<ZwlrOutputModeV1Id, TestMode>>,
    pub serial: Cell<Option<u32>>,
    pub dones: NumCell<u32>,
    pub outcomes: RefCell<AHashMap<ZwlrOutputConfigurationV1Id, Outcome>>,
    pub finished: Cell<bool>,
}

impl TestClient {
    pub fn new(state: &Rc<State>) -> Rc<Self> {
        Rc::new(Self {
            client: state.clients.spawn(state),
            manager: Cell::new(ZwlrOutputManagerV1Id::NONE),
            next_id: NumCell::new(2),
            events: Default::default(),
            heads: Default::default(),
            modes: Default::default(),
            serial: Cell::new(None),
            dones: NumCell::new(0),
            outcomes: Default::default(),
            finished: Cell::new(false),
        })
    }

    fn new_id<T: From<ObjectId>>(&self) -> T {
        T::from(ObjectId::from_raw(self.next_id.fetch_add(1)))
    }

    pub fn bind(&self, version: u32) -> TestResult {
        let id = self.new_id();
        ZwlrOutputManagerV1::bind(&self.client, id, Version(version))?;
        self.manager.set(id);
        self.sync();
        Ok(())
    }

    /// Processes all events that have been sent since the last call and returns them.
    pub fn sync(&self) -> Vec<Event> {
        let events: Vec<_> = self.client.flush().into_iter().collect();
        if events.is_not_empty() {
            log::debug!("Client {} received {} events", self.client.id, events.len());
        }
        for event in &events {
            self.handle_event(event);
        }
        self.events.borrow_mut().extend(events.iter().cloned());
        events
    }

    fn with_head<F: FnOnce(&mut TestHead)>(&self, id: ZwlrOutputHeadV1Id, f: F) {
        if let Some(head) = self.heads.borrow_mut().get_mut(&id) {
            f(head);
        }
    }

    fn with_mode<F: FnOnce(&mut TestMode)>(&self, id: ZwlrOutputModeV1Id, f: F) {
        if let Some(mode) = self.modes.borrow_mut().get_mut(&id) {
            f(mode);
        }
    }

    fn handle_event(&self, event: &Event) {
        match event {
            Event::ZwlrOutputManagerV1(ev) => match ev {
                manager::Event::Head(e) => {
                    self.heads.borrow_mut().insert(e.head, TestHead::default());
                }
                manager::Event::Done(e) => {
                    self.serial.set(Some(e.serial));
                    self.dones.fetch_add(1);
                }
                manager::Event::Finished(_) => self.finished.set(true),
            },
            Event::ZwlrOutputHeadV1(ev) => match ev {
                head::Event::Name(e) => self.with_head(e.self_id, |h| h.name = e.name.clone()),
                head::Event::Description(e) => {
                    self.with_head(e.self_id, |h| h.description = e.description.clone())
                }
                head::Event::PhysicalSize(e) => self.with_head(e.self_id, |h| {
                    h.physical_size = Some((e.width, e.height))
                }),
                head::Event::Mode(e) => {
                    self.modes.borrow_mut().insert(e.mode, TestMode::default());
                    self.with_head(e.self_id, |h| h.modes.push(e.mode));
                }
                head::Event::Enabled(e) => {
                    self.with_head(e.self_id, |h| h.enabled = Some(e.enabled != 0))
                }
                head::Event::CurrentMode(e) => {
                    self.with_head(e.self_id, |h| h.current_mode = Some(e.mode))
                }
                head::Event::Position(e) => {
                    self.with_head(e.self_id, |h| h.position = Some((e.x, e.y)))
                }
                head::Event::Finished(e) => self.with_head(e.self_id, |h| h.finished = true),
            },
            Event::ZwlrOutputModeV1(ev) => match ev {
                mode::Event::Size(e) => {
                    self.with_mode(e.self_id, |m| m.size = Some((e.width, e.height)))
                }
                mode::Event::Refresh(e) => self.with_mode(e.self_id, |m| m.refresh = Some(e.refresh)),
                mode::Event::Preferred(e) => self.with_mode(e.self_id, |m| m.preferred = true),
                mode::Event::Finished(e) => self.with_mode(e.self_id, |m| m.finished = true),
            },
            Event::ZwlrOutputConfigurationV1(ev) => {
                let (id, outcome) = match ev {
                    config::Event::Succeeded(e) => (e.self_id, Outcome::Succeeded),
                    config::Event::Failed(e) => (e.self_id, Outcome::Failed),
                    config::Event::Cancelled(e) => (e.self_id, Outcome::Cancelled),
                };
                self.outcomes.borrow_mut().insert(id, outcome);
            }
            Event::ZwlrOutputConfigurationHeadV1(ev) => match *ev {},
        }
    }

    /// Returns the live head with the given name.
    pub fn head(&self, name: &str) -> TestResult<ZwlrOutputHeadV1Id> {
        let heads = self.heads.borrow();
        for (id, head) in heads.iter() {
            if head.name == name && !head.finished {
                return Ok(*id);
            }
        }
        bail!("Client {} has no head named {}", self.client.id, name);
    }

    pub fn head_state(&self, id: ZwlrOutputHeadV1Id) -> TestResult<TestHead> {
        match self.heads.borrow().get(&id) {
            Some(h) => Ok(h.clone()),
            _ => bail!("Client {} has never seen head {}", self.client.id, id),
        }
    }

    pub fn live_heads(&self) -> Vec<String> {
        self.heads
            .borrow()
            .values()
            .filter(|h| !h.finished)
            .map(|h| h.name.clone())
            .collect()
    }

    pub fn mode(&self, head: ZwlrOutputHeadV1Id, width: i32, height: i32) -> TestResult<ZwlrOutputModeV1Id> {
        let head = self.head_state(head)?;
        let modes = self.modes.borrow();
        for id in &head.modes {
            if let Some(mode) = modes.get(id) {
                if mode.size == Some((width, height)) {
                    return Ok(*id);
                }
            }
        }
        bail!("Head {} has no mode {}x{}", head.name, width, height);
    }

    pub fn mode_state(&self, id: ZwlrOutputModeV1Id) -> TestResult<TestMode> {
        match self.modes.borrow().get(&id) {
            Some(m) => Ok(m.clone()),
            _ => bail!("Client {} has never seen mode {}", self.client.id, id),
        }
    }

    pub fn outcome(&self, id: ZwlrOutputConfigurationV1Id) -> Option<Outcome> {
        self.outcomes.borrow().get(&id).copied()
    }

    pub fn create_configuration(&self) -> Result<ZwlrOutputConfigurationV1Id, ClientError> {
        self.create_configuration_with_serial(self.serial.get().unwrap_or(0))
    }

    pub fn create_configuration_with_serial(
        &self,
        serial: u32,
    ) -> Result<ZwlrOutputConfigurationV1Id, ClientError> {
        let id = self.new_id();
        self.client.request(manager::CreateConfiguration {
            self_id: self.manager.get(),
            id,
            serial,
        })?;
        Ok(id)
    }

    pub fn stop(&self) -> Result<(), ClientError> {
        self.client.request(manager::Stop {
            self_id: self.manager.get(),
        })
    }

    pub fn enable_head(
        &self,
        config: ZwlrOutputConfigurationV1Id,
        head: ZwlrOutputHeadV1Id,
    ) -> Result<ZwlrOutputConfigurationHeadV1Id, ClientError> {
        let id = self.new_id();
        self.client.request(config::EnableHead {
            self_id: config,
            id,
            head,
        })?;
        Ok(id)
    }

    pub fn disable_head(
        &self,
        config: ZwlrOutputConfigurationV1Id,
        head: ZwlrOutputHeadV1Id,
    ) -> Result<(), ClientError> {
        self.client.request(config::DisableHead {
            self_id: config,
            head,
        })
    }

    pub fn apply(&self, config: ZwlrOutputConfigurationV1Id) -> Result<(), ClientError> {
        self.client.request(config::Apply { self_id: config })
    }

    pub fn test(&self, config: ZwlrOutputConfigurationV1Id) -> Result<(), ClientError> {
        self.client.request(config::Test { self_id: config })
    }

    pub fn destroy_configuration(
        &self,
        config: ZwlrOutputConfigurationV1Id,
    ) -> Result<(), ClientError> {
        self.client.request(config::Destroy { self_id: config })
    }

    pub fn set_mode(
        &self,
        config_head: ZwlrOutputConfigurationHeadV1Id,
        mode: ZwlrOutputModeV1Id,
    ) -> Result<(), ClientError> {
        self.client.request(config_head::SetMode {
            self_id: config_head,
            mode,
        })
    }

    pub fn set_position(
        &self,
        config_head: ZwlrOutputConfigurationHeadV1Id,
        x: i32,
        y: i32,
    ) -> Result<(), ClientError> {
        self.client.request(config_head::SetPosition {
            self_id: config_head,
            x,
            y,
        })
    }

    pub fn release_head(&self, head: ZwlrOutputHeadV1Id) -> Result<(), ClientError> {
        self.client.request(head::Release { self_id: head })
    }

    pub fn release_mode(&self, mode: ZwlrOutputModeV1Id) -> Result<(), ClientError> {
        self.client.request(mode::Release { self_id: mode })
    }
}
