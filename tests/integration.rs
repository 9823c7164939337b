use pulldown_cmark::Options;
use pulldown_cmark_anchor::anchor::{AnchorConfig, Extender, Position, Text, text_fn};
use pulldown_cmark_anchor::{Markdown, Parser};
use serde::Deserialize;
use similar::{ChangeTag, TextDiff};
use std::fs;

#[derive(Debug, Deserialize)]
struct Case {
    desc: String,
    give: String,
    want: String,
    #[serde(default)]
    config: AnchorConfig,
}

fn markdown(ext: &Extender) -> Markdown {
    let parser = Parser::new()
        .with_options(Options::ENABLE_HEADING_ATTRIBUTES)
        .with_auto_heading_id(true);
    Markdown::new().with_parser(parser).with_extension(ext)
}

fn print_diff(want: &str, got: &str) {
    let diff = TextDiff::from_lines(want, got);
    for op in diff.ops() {
        for change in diff.iter_changes(op) {
            match change.tag() {
                ChangeTag::Delete => eprint!("- {}", change),
                ChangeTag::Insert => eprint!("+ {}", change),
                ChangeTag::Equal => eprint!("  {}", change),
            }
        }
    }
    eprintln!();
}

#[test]
fn testdata_cases() {
    let src = fs::read_to_string("tests/testdata/cases.yaml").unwrap();
    let cases: Vec<Case> = serde_yaml::from_str(&src).unwrap();
    assert!(!cases.is_empty(), "no cases found");

    let mut failed = Vec::new();
    for case in cases {
        let md = markdown(&Extender::from(case.config));
        let got = md.convert_to_string(&case.give);
        if got != case.want {
            eprintln!("case {:?}:", case.desc);
            print_diff(&case.want, &got);
            failed.push(case.desc);
        }
    }
    assert!(failed.is_empty(), "failing cases: {:?}", failed);
}

#[test]
fn skip_heading_by_returning_empty_text() {
    let ext = Extender::new().texter(text_fn(|info| {
        if info.id == "skip-me" {
            String::new()
        } else {
            "#".repeat(info.level)
        }
    }));
    let got = markdown(&ext).convert_to_string("# Foo\n\n## Skip me\n\n### Bar\n");
    assert_eq!(
        got,
        concat!(
            "<h1 id=\"foo\">Foo <a class=\"anchor\" href=\"#foo\">#</a></h1>\n",
            "<h2 id=\"skip-me\">Skip me</h2>\n",
            "<h3 id=\"bar\">Bar <a class=\"anchor\" href=\"#bar\">###</a></h3>\n",
        )
    );
}

#[test]
fn headings_without_ids_get_no_anchor() {
    let md = Markdown::new().with_extension(&Extender::new());
    assert_eq!(md.convert_to_string("# Foo\n"), "<h1>Foo</h1>\n");
    assert_eq!(
        md.convert_to_string("# Foo {#bar}\n"),
        "<h1>Foo {#bar}</h1>\n",
        "attribute syntax is only recognised when enabled"
    );
}

#[test]
fn dump_shows_anchor_nodes() {
    let md = markdown(&Extender::new().texter(Text::new("#")).position(Position::Before));
    let got = pulldown_cmark_anchor::ast::dump(&md.parse("# Foo"));
    let want = r#"Document {
    Heading {
        Level: 1
        [id]: foo
        Anchor {
            ID: foo
            Level: 1
            Value: #
        }
        Text {
            Content: "Foo"
        }
    }
}
"#;
    if got != want {
        print_diff(want, &got);
    }
    assert_eq!(got, want);
}

#[test]
fn config_file_drives_extender() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("anchor.yaml");
    fs::write(&path, "text: \"§\"\nposition: before\nattributes: {}\n").unwrap();

    let ext = Extender::from(AnchorConfig::load(&path).unwrap());
    assert_eq!(
        markdown(&ext).convert_to_string("## Usage"),
        "<h2 id=\"usage\"><a href=\"#usage\">§</a> Usage</h2>\n"
    );
}
