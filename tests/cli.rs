use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn anchorize() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("anchorize"))
}

#[test]
fn converts_stdin() {
    anchorize()
        .write_stdin("# Foo\n\ntext\n")
        .assert()
        .success()
        .stdout("<h1 id=\"foo\">Foo <a class=\"anchor\" href=\"#foo\">¶</a></h1>\n<p>text</p>\n");
}

#[test]
fn flags_set_text_and_position() {
    anchorize()
        .args(["--position", "before", "--text", "#", "--no-attributes"])
        .write_stdin("## Bar")
        .assert()
        .success()
        .stdout("<h2 id=\"bar\"><a href=\"#bar\">#</a> Bar</h2>\n");
}

#[test]
fn repeated_attr_flags() {
    anchorize()
        .args(["--attr", "class=permalink", "--attr", "title=link"])
        .write_stdin("# Foo")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<a class=\"permalink\" title=\"link\" href=\"#foo\">",
        ));
}

#[test]
fn reads_file_and_config() {
    let temp = tempfile::tempdir().unwrap();
    let doc = temp.path().join("doc.md");
    let cfg = temp.path().join("anchor.json");
    fs::write(&doc, "# Title\n").unwrap();
    fs::write(&cfg, r#"{"text": "§", "position": "before"}"#).unwrap();

    anchorize()
        .arg(&doc)
        .arg("--config")
        .arg(&cfg)
        .assert()
        .success()
        .stdout("<h1 id=\"title\"><a class=\"anchor\" href=\"#title\">§</a> Title</h1>\n");
}

#[test]
fn flags_override_config() {
    let temp = tempfile::tempdir().unwrap();
    let cfg = temp.path().join("anchor.yaml");
    fs::write(&cfg, "position: before\ntext: \"§\"\n").unwrap();

    anchorize()
        .arg("--config")
        .arg(&cfg)
        .args(["--position", "after"])
        .write_stdin("# Title")
        .assert()
        .success()
        .stdout("<h1 id=\"title\">Title <a class=\"anchor\" href=\"#title\">§</a></h1>\n");
}

#[test]
fn dump_prints_tree() {
    anchorize()
        .arg("--dump")
        .write_stdin("# Foo bar")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Anchor {")
                .and(predicate::str::contains("ID: foo-bar"))
                .and(predicate::str::contains("Value: ¶")),
        );
}

#[test]
fn invalid_position_fails() {
    anchorize()
        .args(["--position", "middle"])
        .write_stdin("# Foo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid anchor position"));
}

#[test]
fn missing_input_file_fails() {
    anchorize()
        .arg("does-not-exist.md")
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading does-not-exist.md"));
}
