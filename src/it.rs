use {
    crate::{
        config::OutputManagerConfig,
        it::{test_error::TestResult, testrun::TestRun},
    },
    log::Level,
    std::rc::Rc,
};

#[macro_use]
mod test_error;
#[macro_use]
mod test_macros;
mod test_backend;
mod test_client;
mod test_logger;
mod testrun;

fn run_test(name: &str, test: fn(Rc<TestRun>) -> TestResult) {
    test_logger::install();
    let testrun = TestRun::new(OutputManagerConfig::default());
    test_logger::set_level(Level::Trace);
    log::info!("Running {}", name);
    let res = test(testrun.clone());
    testrun.state.clear();
    if let Err(e) = res {
        log::error!("{} failed: {}", name, e);
        panic!("{} failed: {}", name, e);
    }
}
