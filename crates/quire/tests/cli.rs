use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const CONFIG: &str = r#"
collections:
  - name: posts
    preview_path: /posts/{{slug}}
    fields:
      - { name: title }
      - { name: author, widget: relation, collection: authors }
  - name: authors
    preview_path: /authors/{{slug}}
    fields:
      - { name: name }
"#;

const CONTENT: &str = r#"{
  "posts": { "hello": { "title": "Hello", "author": "jane" } },
  "authors": { "jane": { "name": "Jane" } }
}"#;

fn quire(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quire"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run quire")
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cms.yml"), CONFIG).unwrap();
    fs::write(dir.path().join("content.json"), CONTENT).unwrap();
    dir
}

#[test]
fn test_path_command() {
    let dir = project();
    let out = quire(dir.path(), &["path", "posts", "hello", "--preview"]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        "/posts/hello#preview=posts/hello"
    );
}

#[test]
fn test_match_command() {
    let dir = project();
    let out = quire(dir.path(), &["match", "/authors/jane"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "authors\tjane");

    let out = quire(dir.path(), &["match", "/nowhere"]);
    assert!(!out.status.success());
}

#[test]
fn test_resolve_command() {
    let dir = project();
    let out = quire(dir.path(), &["resolve", "/posts/hello", "--content", "content.json"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(doc["title"], "Hello");
    assert_eq!(doc["author"]["name"], "Jane");
    assert_eq!(doc["author"]["href"], "/authors/jane");
}

#[test]
fn test_resolve_entry_command() {
    let dir = project();
    let out = quire(
        dir.path(),
        &["resolve", "authors/jane", "--entry", "--content", "content.json"],
    );
    assert!(out.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(doc["slug"], "jane");
}

#[test]
fn test_paths_command() {
    let dir = project();
    let out = quire(dir.path(), &["paths", "--content", "content.json"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let paths: Vec<_> = stdout.lines().collect();
    assert_eq!(paths, vec!["/posts/hello", "/authors/jane"]);
}

#[test]
fn test_missing_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = quire(dir.path(), &["path", "posts", "hello"]);
    assert!(!out.status.success());
}
