//! Option aggregation across extensions and diagnostics.

use std::cell::RefCell;
use std::rc::Rc;

use hearth_config::{OptionKind, OptionSpec, OptionTable};
use hearth_extensions::ExtensionDescriptor;

use crate::options::configure_options;
use crate::tests::support::{RecordingSink, TestDispatcher};

fn extension(name: &str, command: &str, options: &[(&str, OptionSpec)]) -> ExtensionDescriptor {
    let table: OptionTable = options
        .iter()
        .map(|(option, spec)| (*option, spec.clone()))
        .collect();
    ExtensionDescriptor::new(name, "1.0.0").with_options(command, table)
}

#[test]
fn dispatcher_is_consulted_once_without_extensions() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let dispatcher = TestDispatcher::new(&log);
    let mut sink = RecordingSink::default();

    configure_options("start", &mut sink, &[], false, &dispatcher);

    assert_eq!(dispatcher.configured.get(), 1);
    assert_eq!(sink.names(), ["check-mem"]);
}

#[test]
fn options_follow_extension_and_declaration_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let dispatcher = TestDispatcher::new(&log);
    let mut sink = RecordingSink::default();
    let extensions = [
        extension(
            "mailer",
            "start",
            &[
                ("smtp-host", OptionSpec::string()),
                ("smtp-secure", OptionSpec::boolean()),
            ],
        ),
        extension("search", "start", &[("index-dir", OptionSpec::string())]),
        extension("backup", "stop", &[("snapshot", OptionSpec::boolean())]),
    ];

    configure_options("start", &mut sink, &extensions, false, &dispatcher);

    assert_eq!(
        sink.names(),
        ["smtp-host", "smtp-secure", "index-dir", "check-mem"]
    );
    assert_eq!(dispatcher.configured.get(), 1);
}

#[test]
fn first_declaration_of_a_name_wins() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let dispatcher = TestDispatcher::new(&log);
    let mut sink = RecordingSink::default();
    let extensions = [
        extension("first", "start", &[("port", OptionSpec::string())]),
        extension("second", "start", &[("port", OptionSpec::boolean())]),
        extension("third", "start", &[("check-mem", OptionSpec::string())]),
    ];

    configure_options("start", &mut sink, &extensions, true, &dispatcher);

    let kinds: Vec<(&str, OptionKind)> = sink
        .registered
        .iter()
        .map(|(name, spec)| (name.as_str(), spec.kind()))
        .collect();
    assert_eq!(
        kinds,
        [("port", OptionKind::String), ("check-mem", OptionKind::String)]
    );
}
