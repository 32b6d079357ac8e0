use {
    crate::{
        backend::{MonitorInfo, Output, OutputIds},
        client::Clients,
        config::OutputManagerConfig,
        ifs::wlr_output_manager::WlrOutputManagerState,
        logger,
        utils::numcell::NumCell,
    },
    std::rc::Rc,
};

pub struct State {
    pub config: OutputManagerConfig,
    pub clients: Clients,
    /// The display-wide serial. Every committed layout takes the next value.
    pub serial: Rc<NumCell<u32>>,
    pub output_ids: OutputIds,
    pub wlr_output_manager: Rc<WlrOutputManagerState>,
}

impl State {
    pub fn new(config: OutputManagerConfig) -> Rc<Self> {
        logger::set_level(config.log_level.to_level());
        let serial = Rc::new(NumCell::new(0));
        Rc::new(Self {
            wlr_output_manager: WlrOutputManagerState::new(&serial),
            config,
            clients: Clients::new(),
            serial,
            output_ids: Default::default(),
        })
    }

    pub fn create_output(&self, name: &str, monitor_info: MonitorInfo) -> Rc<Output> {
        Output::new(&self.output_ids, name, monitor_info)
    }

    /// Shuts the display down.
    pub fn clear(&self) {
        self.wlr_output_manager.destroy();
        self.clients.clear();
    }
}
