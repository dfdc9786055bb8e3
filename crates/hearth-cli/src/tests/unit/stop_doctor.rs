//! `stop` and `doctor` command behaviour.

use std::cell::RefCell;
use std::rc::Rc;

use hearth_instance::{Instance, Registry, RegistryError, WorkingContext};
use mockall::mock;
use rstest::{fixture, rstest};

use crate::lifecycle::{
    DoctorCommand, DoctorOptions, LifecycleError, StopCommand, StopOptions, StopOutcome,
};
use crate::tests::support::{EventLog, TestDispatcher, TestRegistry, TestUi, events};

mock! {
    InstanceLookup {}
    impl Registry for InstanceLookup {
        fn get_instance(&self, context: &WorkingContext) -> Result<Box<dyn Instance>, RegistryError>;
    }
}

#[fixture]
fn log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

#[rstest]
fn stop_reports_instance_that_is_not_running(log: EventLog) {
    let registry = TestRegistry::new(&log, "development", None);
    let mut ui = TestUi::default();

    let outcome = StopCommand::new(&registry, &mut ui, WorkingContext::new("/srv/blog"))
        .run(StopOptions::default())
        .expect("stop");

    assert_eq!(outcome, StopOutcome::NotRunning);
    assert_eq!(events(&log), ["get_instance", "is_running"]);
    assert_eq!(ui.logs, ["Instance 'blog' is not running"]);
}

#[rstest]
fn stop_runs_inside_a_task(log: EventLog) {
    let mut registry = TestRegistry::new(&log, "development", None);
    registry.script.running = true;
    let mut ui = TestUi::default();

    let outcome = StopCommand::new(&registry, &mut ui, WorkingContext::new("/srv/blog"))
        .run(StopOptions { quiet: true })
        .expect("stop");

    assert_eq!(outcome, StopOutcome::Stopped);
    assert_eq!(events(&log), ["get_instance", "is_running", "stop"]);
    assert_eq!(ui.tasks, ["Stopping blog"]);
    assert!(ui.logs.is_empty());
}

#[test]
fn stop_surfaces_lookup_failures() {
    let mut registry = MockInstanceLookup::new();
    registry
        .expect_get_instance()
        .times(1)
        .returning(|context| {
            Err(RegistryError::NotFound {
                path: context.dir().to_path_buf(),
            })
        });
    let mut ui = TestUi::default();

    let error = StopCommand::new(&registry, &mut ui, WorkingContext::new("/tmp/empty"))
        .run(StopOptions::default())
        .expect_err("lookup failure");

    assert!(matches!(
        error,
        LifecycleError::Registry(RegistryError::NotFound { .. })
    ));
    assert!(ui.tasks.is_empty());
}

#[rstest]
fn doctor_defaults_to_every_category(log: EventLog) {
    let dispatcher = TestDispatcher::new(&log);
    let mut ui = TestUi::default();

    DoctorCommand::new(&dispatcher, &mut ui)
        .run(&DoctorOptions::default())
        .expect("doctor");

    let requests = dispatcher.requests.borrow();
    let request = requests.first().expect("one request");
    assert_eq!(request.categories(), ["install", "start"]);
    assert_eq!(ui.tasks, ["Running doctor checks"]);
    assert_eq!(
        ui.logs,
        ["0 doctor check(s) passed for install, start"]
    );
}

#[rstest]
fn doctor_forwards_requested_categories(log: EventLog) {
    let dispatcher = TestDispatcher::new(&log);
    let mut ui = TestUi::default();
    let options = DoctorOptions {
        categories: vec![String::from("start")],
        check_mem: Some(false),
        quiet: true,
    };

    DoctorCommand::new(&dispatcher, &mut ui)
        .run(&options)
        .expect("doctor");

    let requests = dispatcher.requests.borrow();
    let request = requests.first().expect("one request");
    assert_eq!(request.categories(), ["start"]);
    assert_eq!(request.check_mem(), Some(false));
    assert!(ui.logs.is_empty());
}

#[rstest]
fn doctor_failure_is_a_lifecycle_error(log: EventLog) {
    let dispatcher = TestDispatcher::failing(&log, "not enough memory");
    let mut ui = TestUi::default();

    let error = DoctorCommand::new(&dispatcher, &mut ui)
        .run(&DoctorOptions::default())
        .expect_err("failing checks");

    assert!(matches!(error, LifecycleError::Diagnostics(_)));
}
