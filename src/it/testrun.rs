use {
    crate::{
        config::OutputManagerConfig,
        ifs::wlr_output_manager::OutputManagerHandler,
        it::{test_backend::TestBackend, test_client::TestClient, test_error::TestResult},
        state::State,
    },
    std::rc::Rc,
};

pub struct TestRun {
    pub state: Rc<State>,
    pub backend: Rc<TestBackend>,
}

impl TestRun {
    pub fn new(config: OutputManagerConfig) -> Rc<Self> {
        let state = State::new(config);
        let backend = TestBackend::new(&state);
        let handler: Rc<dyn OutputManagerHandler> = backend.clone();
        state.wlr_output_manager.set_handler(Some(handler));
        Rc::new(Self { state, backend })
    }

    pub fn create_client(&self) -> TestResult<Rc<TestClient>> {
        self.create_client_with_version(self.state.config.version)
    }

    pub fn create_client_with_version(&self, version: u32) -> TestResult<Rc<TestClient>> {
        let client = TestClient::new(&self.state);
        client.bind(version)?;
        Ok(client)
    }
}
