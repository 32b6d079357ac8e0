use {
    crate::{
        backend::{Mode, MonitorInfo, Output, OutputId},
        ifs::wlr_output_manager::{
            OutputManagerHandler,
            output_configuration::{OutputConfiguration, OutputConfigurationHead},
            output_head::{HeadState, OutputHead},
        },
        state::State,
        utils::{copyhashmap::CopyHashMap, numcell::NumCell},
    },
    std::{
        cell::{Cell, RefCell},
        mem,
        rc::Rc,
    },
};

pub const FHD: Mode = Mode {
    width: 1920,
    height: 1080,
    refresh_rate_millihz: 60000,
};

pub const QHD: Mode = Mode {
    width: 2560,
    height: 1440,
    refresh_rate_millihz: 144000,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Decision {
    Approve,
    Reject,
    Defer,
}

/// An arbiter that drives virtual outputs and records what it has been asked to do.
pub struct TestBackend {
    pub state: Rc<State>,
    pub outputs: CopyHashMap<OutputId, Rc<Output>>,
    pub decision: Cell<Decision>,
    pub pending: RefCell<Vec<(Rc<OutputConfiguration>, bool)>>,
    pub proposals: RefCell<Vec<Vec<(String, HeadState)>>>,
    pub applied: NumCell<u32>,
    pub tested: NumCell<u32>,
    pub removed_heads: RefCell<Vec<String>>,
    pub manager_destroyed: Cell<bool>,
}

impl TestBackend {
    pub fn new(state: &Rc<State>) -> Rc<Self> {
        Rc::new(Self {
            state: state.clone(),
            outputs: Default::default(),
            decision: Cell::new(Decision::Approve),
            pending: Default::default(),
            proposals: Default::default(),
            applied: NumCell::new(0),
            tested: NumCell::new(0),
            removed_heads: Default::default(),
            manager_destroyed: Cell::new(false),
        })
    }

    /// Connects an enabled output that uses its first mode and commits the new layout.
    pub fn plug(&self, name: &str, modes: &[Mode]) -> Rc<Output> {
        let monitor_info = MonitorInfo {
            modes: modes.to_vec(),
            preferred_mode: modes.first().copied(),
            manufacturer: "Jay".to_string(),
            product: "Virtual".to_string(),
            serial_number: name.to_lowercase(),
            width_mm: 600,
            height_mm: 340,
        };
        self.plug_with(name, monitor_info)
    }

    pub fn plug_with(&self, name: &str, monitor_info: MonitorInfo) -> Rc<Output> {
        let x = self
            .outputs
            .values()
            .iter()
            .filter_map(|o| o.current_mode.get())
            .map(|m| m.width)
            .sum::<i32>();
        let output = self.state.create_output(name, monitor_info);
        output.enabled.set(true);
        output
            .current_mode
            .set(output.monitor_info.modes.first().copied());
        output.position.set((x, 0));
        self.outputs.set(output.id, output.clone());
        self.commit_layout();
        output
    }

    /// Disconnects the output. The layout is not committed.
    pub fn unplug(&self, output: &Rc<Output>) {
        self.outputs.remove(&output.id);
        output.destroy();
    }

    /// Publishes the live state of all outputs.
    pub fn commit_layout(&self) {
        let config = OutputConfiguration::new();
        for output in self.outputs.values() {
            OutputConfigurationHead::create(&config, &output);
        }
        self.state.wlr_output_manager.set_configuration(&config);
    }

    /// Reports the outcome of all deferred configurations.
    pub fn resolve(&self, success: bool) -> usize {
        let pending = mem::take(&mut *self.pending.borrow_mut());
        let n = pending.len();
        for (config, test) in pending {
            self.finish(&config, test, success);
        }
        n
    }

    fn record(&self, config: &OutputConfiguration) {
        let proposal = config
            .heads()
            .iter()
            .map(|h| (h.output.name.clone(), h.state()))
            .collect();
        self.proposals.borrow_mut().push(proposal);
    }

    fn decide(&self, config: &Rc<OutputConfiguration>, test: bool) {
        self.record(config);
        match self.decision.get() {
            Decision::Approve => self.finish(config, test, true),
            Decision::Reject => self.finish(config, test, false),
            Decision::Defer => self.pending.borrow_mut().push((config.clone(), test)),
        }
    }

    fn finish(&self, config: &OutputConfiguration, test: bool, success: bool) {
        if !success {
            config.send_failed();
            return;
        }
        if !test {
            for head in config.heads() {
                let state = head.state();
                head.output.enabled.set(state.enabled);
                if let Some(mode) = state.mode {
                    head.output.current_mode.set(Some(mode));
                }
                head.output.position.set(state.position);
            }
        }
        config.send_succeeded();
        if !test {
            self.commit_layout();
        }
    }
}

impl OutputManagerHandler for TestBackend {
    fn apply(&self, config: &Rc<OutputConfiguration>) {
        self.applied.fetch_add(1);
        self.decide(config, false);
    }

    fn test(&self, config: &Rc<OutputConfiguration>) {
        self.tested.fetch_add(1);
        self.decide(config, true);
    }

    fn head_removed(&self, head: &Rc<OutputHead>) {
        self.removed_heads
            .borrow_mut()
            .push(head.output.name.clone());
    }

    fn manager_destroyed(&self) {
        self.manager_destroyed.set(true);
    }
}
