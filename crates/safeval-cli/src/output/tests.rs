// Tests for output formatting and the writer
//
// The writer is pointed at a shared buffer so each test can inspect exactly
// what would have reached stdout.

use super::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

/// A colorless writer capturing into a buffer
pub(crate) fn capture(
    format: OutputFormat,
    quiet: bool,
    verbose: u8,
) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, quiet, verbose, Box::new(buffer.clone()));
    (writer, buffer)
}

#[test]
fn test_output_writer_creation() {
    let writer = OutputWriter::new(OutputFormat::Human, true, false, 1);
    assert_eq!(writer.format(), OutputFormat::Human);
    assert!(writer.is_verbose());
}

#[test]
fn test_human_messages() {
    let (mut out, buffer) = capture(OutputFormat::Human, false, 0);
    out.info("loading").unwrap();
    out.success("done").unwrap();
    out.warning("careful").unwrap();
    out.section("Result").unwrap();

    assert_eq!(
        buffer.contents(),
        "INFO: loading\ndone\nWARNING: careful\n\n=== Result ===\n"
    );
}

#[test]
fn test_quiet_keeps_warnings() {
    let (mut out, buffer) = capture(OutputFormat::Human, true, 0);
    out.info("hidden").unwrap();
    out.success("hidden").unwrap();
    out.warning("shown").unwrap();
    assert_eq!(buffer.contents(), "WARNING: shown\n");
}

#[test]
fn test_machine_formats_skip_messages() {
    let (mut out, buffer) = capture(OutputFormat::Json, false, 2);
    out.info("hidden").unwrap();
    out.warning("hidden").unwrap();
    out.debug("hidden").unwrap();
    out.data(&serde_json::json!({"value": "ok"})).unwrap();
    assert_eq!(buffer.contents(), "{\"value\":\"ok\"}\n");
}

#[test]
fn test_debug_requires_verbosity() {
    let (mut out, buffer) = capture(OutputFormat::Human, false, 0);
    out.debug("hidden").unwrap();
    assert_eq!(buffer.contents(), "");

    let (mut out, buffer) = capture(OutputFormat::Human, false, 1);
    out.debug("steps: trim").unwrap();
    assert_eq!(buffer.contents(), "DEBUG: steps: trim\n");
}

#[test]
fn test_yaml_data_has_single_newline() {
    let (mut out, buffer) = capture(OutputFormat::Yaml, false, 0);
    out.data(&serde_json::json!({"a": 1})).unwrap();
    assert_eq!(buffer.contents(), "a: 1\n");
}

#[test]
fn test_table_alignment() {
    let (mut out, buffer) = capture(OutputFormat::Human, false, 0);
    out.table(
        &["check", "result"],
        vec![
            vec!["is_missing".to_string(), "false".to_string()],
            vec!["is_zero".to_string(), "true".to_string()],
        ],
    )
    .unwrap();

    let contents = buffer.contents();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "check      │ result");
    assert_eq!(lines[1], "───────────┼───────");
    assert_eq!(lines[2], "is_missing │ false");
    assert_eq!(lines[3], "is_zero    │ true");
}

#[test]
fn test_output_formatter_trait() {
    let value = serde_json::json!({"test": "value"});
    assert_eq!(OutputFormat::Json.format(&value).unwrap(), r#"{"test":"value"}"#);
    assert!(OutputFormat::JsonPretty.format(&value).unwrap().contains("\n"));
    assert_eq!(OutputFormat::Human.format(&value).unwrap(), "test: value\n");
}
