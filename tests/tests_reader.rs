//! Tests for the reader façade: the three input overloads, argument
//! guards, and error classification.

use std::io::Write;

use prodesc::{DescriptorReader, FieldDef, ReadError, ReadOptions, Schema};

fn project_schema() -> Schema {
    Schema::new(
        "1.0.0",
        FieldDef::group(
            "project",
            vec![
                FieldDef::scalar("id"),
                FieldDef::scalar("name"),
                FieldDef::sequence(
                    "modules",
                    FieldDef::scalar("module").with_attributes(["optional"]),
                ),
            ],
        ),
    )
}

fn reader() -> DescriptorReader {
    DescriptorReader::new(project_schema())
}

/// The canonical scenario: `<project><id>42</id></project>`, strict mode,
/// no context.
#[test]
fn test_read_str_basic_scalar() {
    let document = reader()
        .read_str("<project><id>42</id></project>", &ReadOptions::new())
        .expect("read");
    assert_eq!(document.root().name(), "project");
    assert_eq!(
        document.root().get("id").and_then(|f| f.as_scalar()),
        Some("42")
    );
    assert!(document.origin().is_none());
    assert!(document.source().is_none());
}

#[test]
fn test_read_path_sets_origin_handle() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(b"<project><name>demo</name></project>")
        .expect("write");
    let document = reader()
        .read_path(file.path(), &ReadOptions::new())
        .expect("read");
    assert_eq!(document.origin(), Some(file.path()));
    assert_eq!(
        document.root().get("name").and_then(|f| f.as_scalar()),
        Some("demo")
    );
}

#[test]
fn test_read_bytes_leaves_stream_with_caller() {
    let mut stream: &[u8] = b"<project><id>7</id></project>";
    let document = reader()
        .read_bytes(&mut stream, &ReadOptions::new())
        .expect("read");
    assert_eq!(
        document.root().get("id").and_then(|f| f.as_scalar()),
        Some("7")
    );
    assert!(document.origin().is_none());
}

#[test]
fn test_empty_path_is_invalid_argument() {
    let err = reader()
        .read_path("", &ReadOptions::new())
        .expect_err("empty path");
    assert!(matches!(err, ReadError::InvalidArgument(_)));
}

#[test]
fn test_missing_file_is_io_failure() {
    let err = reader()
        .read_path("/nonexistent/project.xml", &ReadOptions::new())
        .expect_err("missing file");
    assert!(matches!(err, ReadError::Io { .. }));
}

#[test]
fn test_malformed_markup_carries_line_and_column() {
    let err = reader()
        .read_str("<project>\n  <id>42\n</project>", &ReadOptions::new())
        .expect_err("unclosed tag");
    let ReadError::Parse(parse) = err else {
        panic!("expected parse error, got {err:?}");
    };
    assert!(parse.line.is_some());
    assert!(parse.column.is_some());
}

#[test]
fn test_sequence_items_preserve_declaration_order() {
    let document = reader()
        .read_str(
            "<project><modules>\
             <module optional=\"true\">core</module>\
             <module>cli</module>\
             <module>docs</module>\
             </modules></project>",
            &ReadOptions::new(),
        )
        .expect("read");
    let modules = document.root().get("modules").expect("modules");
    let names: Vec<_> = modules
        .fields()
        .iter()
        .filter_map(|f| f.as_scalar())
        .collect();
    assert_eq!(names, ["core", "cli", "docs"]);
    assert_eq!(modules.fields()[0].attribute("optional"), Some("true"));
}

#[test]
fn test_builtin_entities_resolve_in_values() {
    let document = reader()
        .read_str(
            "<project><name>a &amp; b &lt;c&gt;</name></project>",
            &ReadOptions::new(),
        )
        .expect("read");
    assert_eq!(
        document.root().get("name").and_then(|f| f.as_scalar()),
        Some("a & b <c>")
    );
}

#[test]
fn test_unknown_entity_is_parse_error() {
    let err = reader()
        .read_str("<project><name>&custom;</name></project>", &ReadOptions::new())
        .expect_err("external entity");
    assert!(err.is_parse());
}

#[test]
fn test_content_after_root_is_parse_error() {
    let err = reader()
        .read_str("<project/><project/>", &ReadOptions::new())
        .expect_err("two roots");
    assert!(err.is_parse());
}

#[test]
fn test_empty_input_is_parse_error() {
    let err = reader()
        .read_str("", &ReadOptions::new())
        .expect_err("empty input");
    let ReadError::Parse(parse) = err else {
        panic!("expected parse error");
    };
    assert!(parse.message.contains("missing root element"));
}

#[test]
fn test_reader_is_shareable_across_threads() {
    let reader = std::sync::Arc::new(reader());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let reader = std::sync::Arc::clone(&reader);
            std::thread::spawn(move || {
                let text = format!("<project><id>{i}</id></project>");
                reader.read_str(&text, &ReadOptions::new()).expect("read")
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread");
    }
}
