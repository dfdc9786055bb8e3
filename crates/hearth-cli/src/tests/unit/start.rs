//! Start flow ordering, gating, and reporting.

use std::rc::Rc;
use std::cell::RefCell;

use hearth_config::OptionValue;
use hearth_instance::{InstanceError, WorkingContext};
use rstest::{fixture, rstest};

use crate::lifecycle::{LifecycleError, StartCommand, StartOptions, StartOutcome, diagnostic_request};
use crate::tests::support::{EventLog, TestDispatcher, TestRegistry, TestUi, events};

#[fixture]
fn log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

fn start(
    registry: &TestRegistry,
    dispatcher: &TestDispatcher,
    ui: &mut TestUi,
    options: &StartOptions,
) -> Result<StartOutcome, LifecycleError> {
    StartCommand::new(registry, dispatcher, ui, WorkingContext::new("/srv/blog")).run(options)
}

#[rstest]
fn successful_start_runs_gates_in_order(log: EventLog) {
    let registry = TestRegistry::new(&log, "production", Some("https://blog.example"));
    let dispatcher = TestDispatcher::new(&log);
    let mut ui = TestUi::default();

    let outcome = start(&registry, &dispatcher, &mut ui, &StartOptions::new()).expect("start");

    assert_eq!(outcome, StartOutcome::Started);
    assert_eq!(
        events(&log),
        [
            "get_instance",
            "is_running",
            "check_environment",
            "diagnostics",
            "start"
        ]
    );
    assert_eq!(ui.tasks, ["Starting blog"]);
    assert!(ui.warnings.is_empty());
}

#[rstest]
fn already_running_instance_is_left_alone(log: EventLog) {
    let mut registry = TestRegistry::new(&log, "production", Some("https://blog.example"));
    registry.script.running = true;
    let dispatcher = TestDispatcher::new(&log);
    let mut ui = TestUi::default();

    let outcome = start(&registry, &dispatcher, &mut ui, &StartOptions::new()).expect("start");

    assert_eq!(outcome, StartOutcome::AlreadyRunning);
    assert_eq!(events(&log), ["get_instance", "is_running"]);
    assert_eq!(ui.logs, ["Instance 'blog' is already running"]);
    assert!(ui.tasks.is_empty());
    assert_eq!(registry.reads(), 0);
}

#[rstest]
fn quiet_already_running_writes_nothing(log: EventLog) {
    let mut registry = TestRegistry::new(&log, "development", None);
    registry.script.running = true;
    let dispatcher = TestDispatcher::new(&log);
    let mut ui = TestUi::default();

    let outcome = start(
        &registry,
        &dispatcher,
        &mut ui,
        &StartOptions::new().with_quiet(true),
    )
    .expect("start");

    assert_eq!(outcome, StartOutcome::AlreadyRunning);
    assert!(ui.logs.is_empty());
}

#[rstest]
fn environment_failure_stops_before_diagnostics(log: EventLog) {
    let mut registry = TestRegistry::new(&log, "production", Some("https://blog.example"));
    registry.script.environment_error = Some(InstanceError::MissingEnvironment {
        name: String::from("blog"),
    });
    let dispatcher = TestDispatcher::new(&log);
    let mut ui = TestUi::default();

    let error = start(&registry, &dispatcher, &mut ui, &StartOptions::new())
        .expect_err("environment failure");

    assert!(matches!(
        error,
        LifecycleError::Instance(InstanceError::MissingEnvironment { .. })
    ));
    assert_eq!(
        events(&log),
        ["get_instance", "is_running", "check_environment"]
    );
    assert!(ui.warnings.is_empty());
}

#[rstest]
fn diagnostics_failure_prevents_start(log: EventLog) {
    let registry = TestRegistry::new(&log, "production", Some("https://blog.example"));
    let dispatcher = TestDispatcher::failing(&log, "not enough memory");
    let mut ui = TestUi::default();

    let error = start(&registry, &dispatcher, &mut ui, &StartOptions::new())
        .expect_err("diagnostics failure");

    assert_eq!(
        error.to_string(),
        "doctor check failed: free-memory: not enough memory"
    );
    assert_eq!(
        events(&log),
        [
            "get_instance",
            "is_running",
            "check_environment",
            "diagnostics"
        ]
    );
    assert!(ui.tasks.is_empty());
}

#[rstest]
fn start_failure_is_returned_unchanged(log: EventLog) {
    let mut registry = TestRegistry::new(&log, "development", Some("http://localhost:2368"));
    registry.script.start_error = Some(InstanceError::MissingCommand {
        name: String::from("blog"),
    });
    let dispatcher = TestDispatcher::new(&log);
    let mut ui = TestUi::default();

    let error = start(&registry, &dispatcher, &mut ui, &StartOptions::new())
        .expect_err("start failure");

    assert_eq!(
        error.to_string(),
        "instance 'blog' does not declare a start command"
    );
    assert_eq!(ui.tasks, ["Starting blog"]);
    assert!(ui.logs.is_empty());
}

#[rstest]
#[case::production_http("production", Some("http://blog.example"), true)]
#[case::production_unset("production", None, true)]
#[case::production_https("production", Some("https://blog.example"), false)]
#[case::development_http("development", Some("http://localhost:2368"), false)]
fn insecure_production_url_warns(
    log: EventLog,
    #[case] environment: &str,
    #[case] url: Option<&str>,
    #[case] warns: bool,
) {
    let registry = TestRegistry::new(&log, environment, url);
    let dispatcher = TestDispatcher::new(&log);
    let mut ui = TestUi::default();

    start(&registry, &dispatcher, &mut ui, &StartOptions::new()).expect("start");

    assert_eq!(ui.warnings.len(), usize::from(warns));
    if let Some(warning) = ui.warnings.first() {
        assert!(warning.contains("using https for all URLs is highly recommended"));
    }
}

#[rstest]
#[case::quiet(true, None, 1)]
#[case::url_only(false, None, 3)]
#[case::admin_url(false, Some("https://admin.example"), 2)]
fn configuration_reads_follow_output_needs(
    log: EventLog,
    #[case] quiet: bool,
    #[case] admin: Option<&str>,
    #[case] expected_reads: usize,
) {
    let base = TestRegistry::new(&log, "development", Some("http://localhost:2368"));
    let registry = match admin {
        Some(address) => base.with_admin_url(address),
        None => base,
    };
    let dispatcher = TestDispatcher::new(&log);
    let mut ui = TestUi::default();

    start(
        &registry,
        &dispatcher,
        &mut ui,
        &StartOptions::new().with_quiet(quiet),
    )
    .expect("start");

    assert_eq!(registry.reads(), expected_reads);
}

#[rstest]
fn start_report_names_environment_and_admin_address(log: EventLog) {
    let registry = TestRegistry::new(&log, "production", Some("https://blog.example"))
        .with_admin_url("https://admin.example");
    let dispatcher = TestDispatcher::new(&log);
    let mut ui = TestUi::default();

    start(&registry, &dispatcher, &mut ui, &StartOptions::new()).expect("start");

    assert_eq!(
        ui.logs,
        [
            "Instance 'blog' started in the production environment",
            "Admin interface available at https://admin.example"
        ]
    );
}

#[rstest]
fn missing_addresses_are_reported(log: EventLog) {
    let registry = TestRegistry::new(&log, "development", None);
    let dispatcher = TestDispatcher::new(&log);
    let mut ui = TestUi::default();

    start(&registry, &dispatcher, &mut ui, &StartOptions::new()).expect("start");

    assert_eq!(
        ui.logs.last().map(String::as_str),
        Some("Admin interface address is not configured")
    );
}

#[rstest]
fn diagnostics_receive_only_the_start_category(log: EventLog) {
    let registry = TestRegistry::new(&log, "production", Some("https://blog.example"));
    let dispatcher = TestDispatcher::new(&log);
    let mut ui = TestUi::default();
    let options = StartOptions::new()
        .with_quiet(true)
        .with_check_mem(Some(false))
        .with_extension_values(vec![(
            String::from("smtp-host"),
            OptionValue::String(String::from("mail.example")),
        )]);

    start(&registry, &dispatcher, &mut ui, &options).expect("start");

    let requests = dispatcher.requests.borrow();
    assert_eq!(requests.as_slice(), [diagnostic_request(&options)]);
    let request = requests.first().expect("one request");
    assert_eq!(request.categories(), ["start"]);
    assert!(request.quiet());
    assert_eq!(request.check_mem(), Some(false));
}

#[rstest]
fn extension_values_reach_the_launch(log: EventLog) {
    let registry = TestRegistry::new(&log, "development", Some("http://localhost:2368"));
    let dispatcher = TestDispatcher::new(&log);
    let mut ui = TestUi::default();
    let values = vec![
        (String::from("smtp-host"), OptionValue::String(String::from("mail"))),
        (String::from("cache-size"), OptionValue::Number(64.0)),
    ];

    start(
        &registry,
        &dispatcher,
        &mut ui,
        &StartOptions::new().with_extension_values(values.clone()),
    )
    .expect("start");

    assert_eq!(registry.launched_options(), values);
}
