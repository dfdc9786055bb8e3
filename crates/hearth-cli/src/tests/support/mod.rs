//! Test doubles for the CLI runtime.
//!
//! Every double records into a shared event log so tests can assert on the
//! order in which the start flow touches its collaborators.

use std::cell::{Cell, RefCell};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use hearth_config::{Config, OptionSink, OptionSpec, OptionValue};
use hearth_doctor::{
    CheckFailure, DiagnosticError, DiagnosticReport, DiagnosticRequest, DiagnosticsDispatcher,
};
use hearth_extensions::{ExtensionDescriptor, ExtensionError, ExtensionRegistry};
use hearth_instance::{
    ConfigSource, Environment, Instance, InstanceConfig, InstanceError, LaunchOptions, Registry,
    RegistryError, WorkingContext,
};
use serde_json::{Map, Value};

use crate::config::ConfigLoader;
use crate::errors::AppError;
use crate::ui::Ui;
use crate::{IoStreams, Services, run_with};

/// Ordered record of collaborator calls.
pub(crate) type EventLog = Rc<RefCell<Vec<String>>>;

pub(crate) fn events(log: &EventLog) -> Vec<String> {
    log.borrow().clone()
}

fn record(log: &EventLog, event: impl Into<String>) {
    log.borrow_mut().push(event.into());
}

/// [`ConfigSource`] counting every lookup.
pub(crate) struct CountingConfig {
    inner: InstanceConfig,
    reads: Rc<Cell<usize>>,
}

impl ConfigSource for CountingConfig {
    fn get(&self, key: &str) -> Option<Value> {
        self.reads.set(self.reads.get().saturating_add(1));
        self.inner.lookup(key).cloned()
    }
}

/// Behaviour of a [`TestInstance`].
#[derive(Clone, Default)]
pub(crate) struct InstanceScript {
    pub(crate) running: bool,
    pub(crate) environment_error: Option<InstanceError>,
    pub(crate) start_error: Option<InstanceError>,
}

/// Scripted [`Instance`] recording into an [`EventLog`].
pub(crate) struct TestInstance {
    name: String,
    dir: PathBuf,
    environment: Environment,
    config: CountingConfig,
    script: InstanceScript,
    log: EventLog,
    launches: Rc<RefCell<Vec<LaunchOptions>>>,
}

impl Instance for TestInstance {
    fn name(&self) -> &str {
        &self.name
    }

    fn dir(&self) -> &Path {
        &self.dir
    }

    fn environment(&self) -> &Environment {
        &self.environment
    }

    fn config(&self) -> &dyn ConfigSource {
        &self.config
    }

    fn is_running(&self) -> Result<bool, InstanceError> {
        record(&self.log, "is_running");
        Ok(self.script.running)
    }

    fn check_environment(&self) -> Result<(), InstanceError> {
        record(&self.log, "check_environment");
        self.script.environment_error.clone().map_or(Ok(()), Err)
    }

    fn start(&self, options: &LaunchOptions) -> Result<(), InstanceError> {
        record(&self.log, "start");
        self.launches.borrow_mut().push(options.clone());
        self.script.start_error.clone().map_or(Ok(()), Err)
    }

    fn stop(&self) -> Result<(), InstanceError> {
        record(&self.log, "stop");
        Ok(())
    }
}

/// Builds a fresh [`TestInstance`] per lookup, sharing counters and logs.
#[derive(Clone)]
pub(crate) struct TestRegistry {
    pub(crate) name: String,
    pub(crate) environment: Environment,
    pub(crate) values: Map<String, Value>,
    pub(crate) script: InstanceScript,
    pub(crate) log: EventLog,
    pub(crate) reads: Rc<Cell<usize>>,
    pub(crate) launches: Rc<RefCell<Vec<LaunchOptions>>>,
    pub(crate) missing: bool,
}

impl TestRegistry {
    pub(crate) fn new(log: &EventLog, environment: &str, url: Option<&str>) -> Self {
        let mut values = Map::new();
        if let Some(address) = url {
            values.insert(String::from("url"), Value::String(address.to_owned()));
        }
        Self {
            name: String::from("blog"),
            environment: Environment::from(environment),
            values,
            script: InstanceScript::default(),
            log: Rc::clone(log),
            reads: Rc::new(Cell::new(0)),
            launches: Rc::new(RefCell::new(Vec::new())),
            missing: false,
        }
    }

    pub(crate) fn with_admin_url(mut self, address: &str) -> Self {
        let mut admin = Map::new();
        admin.insert(String::from("url"), Value::String(address.to_owned()));
        self.values.insert(String::from("admin"), Value::Object(admin));
        self
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.get()
    }

    pub(crate) fn launched_options(&self) -> Vec<(String, OptionValue)> {
        self.launches
            .borrow()
            .iter()
            .flat_map(|launch| {
                launch
                    .extension_options()
                    .map(|(name, value)| (name.to_owned(), value.clone()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

impl Registry for TestRegistry {
    fn get_instance(&self, context: &WorkingContext) -> Result<Box<dyn Instance>, RegistryError> {
        record(&self.log, "get_instance");
        if self.missing {
            return Err(RegistryError::NotFound {
                path: context.dir().to_path_buf(),
            });
        }
        Ok(Box::new(TestInstance {
            name: self.name.clone(),
            dir: context.dir().to_path_buf(),
            environment: self.environment.clone(),
            config: CountingConfig {
                inner: InstanceConfig::from_map(self.values.clone()),
                reads: Rc::clone(&self.reads),
            },
            script: self.script.clone(),
            log: Rc::clone(&self.log),
            launches: Rc::clone(&self.launches),
        }))
    }
}

/// Dispatcher recording requests and failing on demand.
pub(crate) struct TestDispatcher {
    log: EventLog,
    pub(crate) requests: RefCell<Vec<DiagnosticRequest>>,
    pub(crate) configured: Cell<usize>,
    pub(crate) failure: Option<String>,
}

impl TestDispatcher {
    pub(crate) fn new(log: &EventLog) -> Self {
        Self {
            log: Rc::clone(log),
            requests: RefCell::new(Vec::new()),
            configured: Cell::new(0),
            failure: None,
        }
    }

    pub(crate) fn failing(log: &EventLog, message: &str) -> Self {
        Self {
            failure: Some(message.to_owned()),
            ..Self::new(log)
        }
    }
}

impl DiagnosticsDispatcher for TestDispatcher {
    fn run(&self, request: &DiagnosticRequest) -> Result<DiagnosticReport, DiagnosticError> {
        record(&self.log, "diagnostics");
        self.requests.borrow_mut().push(request.clone());
        match &self.failure {
            Some(message) => Err(DiagnosticError::ChecksFailed {
                failures: vec![CheckFailure {
                    id: String::from("free-memory"),
                    message: message.clone(),
                }],
            }),
            None => Ok(DiagnosticReport::default()),
        }
    }

    fn configure_options(&self, sink: &mut dyn OptionSink, _quiet: bool) {
        self.configured.set(self.configured.get().saturating_add(1));
        if !sink.contains("check-mem") {
            sink.register("check-mem", &OptionSpec::boolean().with_default(true.into()));
        }
    }
}

/// [`Ui`] capturing output lines.
#[derive(Default)]
pub(crate) struct TestUi {
    pub(crate) logs: Vec<String>,
    pub(crate) warnings: Vec<String>,
    pub(crate) tasks: Vec<String>,
}

impl Ui for TestUi {
    fn log(&mut self, message: &str) -> std::io::Result<()> {
        self.logs.push(message.to_owned());
        Ok(())
    }

    fn warn(&mut self, message: &str) -> std::io::Result<()> {
        self.warnings.push(message.to_owned());
        Ok(())
    }

    fn run<T, E, F>(&mut self, label: &str, action: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.tasks.push(label.to_owned());
        action()
    }
}

/// [`OptionSink`] recording registrations in order.
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) registered: Vec<(String, OptionSpec)>,
}

impl RecordingSink {
    pub(crate) fn names(&self) -> Vec<&str> {
        self.registered.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl OptionSink for RecordingSink {
    fn contains(&self, name: &str) -> bool {
        self.registered.iter().any(|(existing, _)| existing == name)
    }

    fn register(&mut self, name: &str, spec: &OptionSpec) {
        self.registered.push((name.to_owned(), spec.clone()));
    }
}

pub(crate) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub(crate) const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

/// [`Services`] handing out the doubles above.
pub(crate) struct TestServices {
    pub(crate) registry: TestRegistry,
    pub(crate) extensions: Vec<ExtensionDescriptor>,
    pub(crate) failure: Option<String>,
    pub(crate) log: EventLog,
    pub(crate) requests: Rc<RefCell<Vec<DiagnosticRequest>>>,
}

impl TestServices {
    pub(crate) fn new(registry: TestRegistry) -> Self {
        let log = Rc::clone(&registry.log);
        Self {
            registry,
            extensions: Vec::new(),
            failure: None,
            log,
            requests: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

/// Dispatcher handed out by [`TestServices`]; shares its request log.
struct SharedDispatcher {
    inner: TestDispatcher,
    requests: Rc<RefCell<Vec<DiagnosticRequest>>>,
}

impl DiagnosticsDispatcher for SharedDispatcher {
    fn run(&self, request: &DiagnosticRequest) -> Result<DiagnosticReport, DiagnosticError> {
        self.requests.borrow_mut().push(request.clone());
        self.inner.run(request)
    }

    fn configure_options(&self, sink: &mut dyn OptionSink, quiet: bool) {
        self.inner.configure_options(sink, quiet);
    }
}

impl Services for TestServices {
    fn registry(&self) -> &dyn Registry {
        &self.registry
    }

    fn extensions(&self, _dir: &Path) -> Result<ExtensionRegistry, ExtensionError> {
        let mut registry = ExtensionRegistry::new();
        for extension in &self.extensions {
            registry.register(extension.clone())?;
        }
        Ok(registry)
    }

    fn dispatcher(&self, _dir: &Path) -> Box<dyn DiagnosticsDispatcher> {
        let inner = match &self.failure {
            Some(message) => TestDispatcher::failing(&self.log, message),
            None => TestDispatcher::new(&self.log),
        };
        Box::new(SharedDispatcher {
            inner,
            requests: Rc::clone(&self.requests),
        })
    }
}

/// Output of one CLI invocation.
pub(crate) struct Invocation {
    pub(crate) exit: ExitCode,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

/// Runs the CLI with `tokens` against `services`.
pub(crate) fn invoke(services: &TestServices, tokens: &[&str]) -> Invocation {
    let args: Vec<OsString> = std::iter::once("hearth")
        .chain(tokens.iter().copied())
        .map(OsString::from)
        .collect();
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let loader = StaticConfigLoader::new(Config::default());
    let exit = {
        let mut io = IoStreams::new(&mut stdout, &mut stderr);
        run_with(args, Path::new("/srv/blog"), &mut io, &loader, services)
    };
    Invocation {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}
