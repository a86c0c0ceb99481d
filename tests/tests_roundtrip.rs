//! Round-trip stability: reading, rendering, and re-reading a well-formed
//! document yields a structurally equal tree.

use prodesc::document::to_xml;
use prodesc::{DescriptorReader, Field, FieldDef, ReadOptions, Schema, Value};

fn descriptor_schema() -> Schema {
    Schema::new(
        "1.0.0",
        FieldDef::group(
            "project",
            vec![
                FieldDef::scalar("id"),
                FieldDef::scalar("name").with_attributes(["lang"]),
                FieldDef::sequence(
                    "dependencies",
                    FieldDef::group(
                        "dependency",
                        vec![FieldDef::scalar("id"), FieldDef::scalar("version")],
                    )
                    .with_attributes(["scope"]),
                ),
            ],
        ),
    )
}

fn assert_same_tree(a: &Field, b: &Field) {
    assert_eq!(a.name(), b.name());
    assert_eq!(a.attributes(), b.attributes());
    match (a.value(), b.value()) {
        (Value::Scalar(x), Value::Scalar(y)) => assert_eq!(x, y),
        _ => {
            assert_eq!(a.fields().len(), b.fields().len());
            for (x, y) in a.fields().iter().zip(b.fields()) {
                assert_same_tree(x, y);
            }
        }
    }
}

#[test]
fn test_read_render_read_is_stable() {
    let text = "<project>\
                <id>demo-parent</id>\
                <name lang=\"en\">Demo &amp; Friends</name>\
                <dependencies>\
                <dependency scope=\"test\"><id>harness</id><version>1.2</version></dependency>\
                <dependency><id>assertions</id></dependency>\
                </dependencies>\
                </project>";
    let reader = DescriptorReader::new(descriptor_schema());
    let options = ReadOptions::new();

    let first = reader.read_str(text, &options).expect("first read");
    let rendered = to_xml(&first);
    let second = reader.read_str(&rendered, &options).expect("second read");
    assert_same_tree(first.root(), second.root());
}

#[test]
fn test_rendered_output_escapes_markup_characters() {
    let reader = DescriptorReader::new(descriptor_schema());
    let options = ReadOptions::new();
    let document = reader
        .read_str(
            "<project><name>a &lt;tag&gt; &amp; &quot;quote&quot;</name></project>",
            &options,
        )
        .expect("read");
    let rendered = to_xml(&document);
    let again = reader.read_str(&rendered, &options).expect("re-read");
    assert_eq!(
        again.root().get("name").and_then(|f| f.as_scalar()),
        Some("a <tag> & \"quote\"")
    );
}

#[test]
fn test_empty_sequences_survive_round_trip() {
    let reader = DescriptorReader::new(descriptor_schema());
    let options = ReadOptions::new();
    let first = reader
        .read_str("<project><dependencies/></project>", &options)
        .expect("read");
    let second = reader
        .read_str(&to_xml(&first), &options)
        .expect("re-read");
    assert_same_tree(first.root(), second.root());
}
