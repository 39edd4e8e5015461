#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn twig(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("twig").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("TWIG_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

const TREE_TEXT: &str = "\
app/
├── src/
│   ├── main.rs  # entry point
│   └── lib.rs
└── README.md
";

// ---------------------------------------------------------------------------
// twig expand
// ---------------------------------------------------------------------------

#[test]
fn expand_prints_each_path() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["expand", "{a,b}/{c,d}"])
        .assert()
        .success()
        .stdout("a/c\na/d\nb/c\nb/d\n");
}

#[test]
fn expand_nested_groups() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["expand", "a/{b,c/{d,e}}"])
        .assert()
        .success()
        .stdout("a/b\na/c/d\na/c/e\n");
}

#[test]
fn expand_multiple_patterns_and_sort() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["expand", "--sort", "{z,y}", "x"])
        .assert()
        .success()
        .stdout("x\ny\nz\n");
}

#[test]
fn expand_json() {
    let dir = TempDir::new().unwrap();
    let output = twig(&dir)
        .args(["--json", "expand", "docs/{guides,apis,arch}"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let paths: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(paths, vec!["docs/guides", "docs/apis", "docs/arch"]);
}

#[test]
fn expand_as_tree() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["expand", "--tree", "src/{a,b}.rs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("├── a.rs"))
        .stdout(predicate::str::contains("└── b.rs"));
}

#[test]
fn expand_literal_closing_brace() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["expand", "path/incomplete}"])
        .assert()
        .success()
        .stdout("path/incomplete}\n");
}

#[test]
fn expand_unmatched_open_brace_fails() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["expand", "path/{incomplete"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unmatched opening brace"));
}

#[test]
fn expand_empty_group_fails() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["expand", "path/{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty brace content"));
}

#[test]
fn expand_result_limit_flag() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["expand", "--max-results", "3", "{a,b}/{c,d}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("maximum of 3 results"));
}

#[test]
fn expand_reads_limits_from_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".twig.yaml"), "expand:\n  max_depth: 1\n").unwrap();

    twig(&dir)
        .args(["expand", "{a,{b,c}}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("maximum depth of 1"));

    // Flags override the config file
    twig(&dir)
        .args(["expand", "--max-depth", "2", "{a,{b,c}}"])
        .assert()
        .success()
        .stdout("a\nb\nc\n");
}

#[test]
fn explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["--config", "missing.yaml", "expand", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

// ---------------------------------------------------------------------------
// twig scaffold
// ---------------------------------------------------------------------------

#[test]
fn scaffold_creates_files_and_dirs() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["scaffold", "proj/{src/{main,lib}.rs,docs/}", "--into", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 created"));

    let out = dir.path().join("out");
    assert!(out.join("proj/src/main.rs").is_file());
    assert!(out.join("proj/src/lib.rs").is_file());
    assert!(out.join("proj/docs").is_dir());
}

#[test]
fn scaffold_dirs_flag() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["scaffold", "--dirs", "{a,b}/{c,d}", "--into", "out"])
        .assert()
        .success();

    for p in ["a/c", "a/d", "b/c", "b/d"] {
        assert!(dir.path().join("out").join(p).is_dir(), "{p} should be a directory");
    }
}

#[test]
fn scaffold_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["scaffold", "--dry-run", "{a,b}.txt", "--into", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would create"))
        .stdout(predicate::str::contains("Dry run"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn scaffold_skips_existing_files() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("out")).unwrap();
    std::fs::write(dir.path().join("out/keep.txt"), "original").unwrap();

    twig(&dir)
        .args(["scaffold", "{keep,new}.txt", "--into", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 created"))
        .stdout(predicate::str::contains("1 skipped"));

    let kept = std::fs::read_to_string(dir.path().join("out/keep.txt")).unwrap();
    assert_eq!(kept, "original");
}

#[test]
fn scaffold_abort_on_conflict() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("out")).unwrap();
    std::fs::write(dir.path().join("out/b.txt"), "").unwrap();

    twig(&dir)
        .args(["scaffold", "--abort-on-conflict", "{a,b}.txt", "--into", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("item already exists"));

    assert!(!dir.path().join("out/a.txt").exists());
}

#[test]
fn scaffold_rejects_traversal() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["scaffold", "../{escape}.txt", "--into", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("path traversal detected"));

    assert!(!dir.path().join("escape.txt").exists());
}

#[test]
fn scaffold_json_report() {
    let dir = TempDir::new().unwrap();
    let output = twig(&dir)
        .args(["--json", "scaffold", "x/{1,2}", "--into", "out"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["created"].as_array().unwrap().len(), 3);
    assert_eq!(report["dry_run"], false);
}

// ---------------------------------------------------------------------------
// twig parse
// ---------------------------------------------------------------------------

#[test]
fn parse_redraws_tree_from_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("layout.txt"), TREE_TEXT).unwrap();

    twig(&dir)
        .args(["parse", "layout.txt"])
        .assert()
        .success()
        .stdout(TREE_TEXT);
}

#[test]
fn parse_paths_from_stdin() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["parse", "--paths"])
        .write_stdin(TREE_TEXT)
        .assert()
        .success()
        .stdout("app/\napp/src/\napp/src/main.rs\napp/src/lib.rs\napp/README.md\n");
}

#[test]
fn parse_stats() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["parse", "--stats", "-"])
        .write_stdin(TREE_TEXT)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 directory, 3 files"));
}

#[test]
fn parse_json() {
    let dir = TempDir::new().unwrap();
    let output = twig(&dir)
        .args(["-j", "parse"])
        .write_stdin(TREE_TEXT)
        .output()
        .unwrap();
    assert!(output.status.success());

    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tree["name"], "app");
    assert_eq!(tree["children"][0]["children"][0]["comment"], "entry point");
}

#[test]
fn parse_empty_input_fails() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .arg("parse")
        .write_stdin("\n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty tree structure"));
}

// ---------------------------------------------------------------------------
// twig build
// ---------------------------------------------------------------------------

#[test]
fn build_defaults_to_root_name() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .arg("build")
        .write_stdin(TREE_TEXT)
        .assert()
        .success();

    let app = dir.path().join("app");
    assert!(app.join("src/lib.rs").is_file());
    assert_eq!(
        std::fs::read_to_string(app.join("src/main.rs")).unwrap(),
        "# entry point\n"
    );
    assert!(app.join("README.md").is_file());
}

#[test]
fn build_into_explicit_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("layout.txt"), TREE_TEXT).unwrap();

    twig(&dir)
        .args(["build", "layout.txt", "--into", "elsewhere"])
        .assert()
        .success();

    assert!(dir.path().join("elsewhere/src/main.rs").is_file());
    assert!(!dir.path().join("app").exists());
}

#[test]
fn build_reports_invalid_structure() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .arg("build")
        .write_stdin("root/\n│   │   └── too-deep\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2: invalid tree structure"));
}

#[test]
fn build_rejects_root_name_outside_cwd() {
    let dir = TempDir::new().unwrap();
    let work = dir.path().join("work");
    std::fs::create_dir(&work).unwrap();

    let mut cmd = Command::cargo_bin("twig").unwrap();
    cmd.current_dir(&work)
        .env("HOME", dir.path())
        .env_remove("TWIG_CONFIG")
        .env_remove("RUST_LOG")
        .arg("build")
        .write_stdin("../escaped/\n└── pwned.txt\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("path traversal detected"));

    assert!(!dir.path().join("escaped").exists());
}

#[test]
fn build_rejects_absolute_root_name() {
    let dir = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    let text = format!("{}/\n└── pwned.txt\n", outside.path().display());

    twig(&dir)
        .arg("build")
        .write_stdin(text)
        .assert()
        .failure()
        .stderr(predicate::str::contains("path traversal detected"));

    assert!(!outside.path().join("pwned.txt").exists());
}

#[test]
fn parse_accepts_indented_drawing() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["parse", "--paths"])
        .write_stdin("root/\n  ├── a\n  └── b\n")
        .assert()
        .success()
        .stdout("root/\nroot/a\nroot/b\n");
}

// ---------------------------------------------------------------------------
// twig tree
// ---------------------------------------------------------------------------

fn project(dir: &TempDir) {
    let root = dir.path().join("proj");
    std::fs::create_dir_all(root.join("src")).unwrap();
    std::fs::create_dir_all(root.join(".git")).unwrap();
    std::fs::create_dir_all(root.join("target/debug")).unwrap();
    std::fs::write(root.join("src/main.rs"), "").unwrap();
    std::fs::write(root.join("Cargo.toml"), "").unwrap();
    std::fs::write(root.join(".hidden"), "").unwrap();
}

#[test]
fn tree_draws_directory() {
    let dir = TempDir::new().unwrap();
    project(&dir);
    twig(&dir)
        .args(["tree", "proj"])
        .assert()
        .success()
        .stdout("proj/\n├── Cargo.toml\n├── src/\n│   └── main.rs\n└── target/\n    └── debug/\n");
}

#[test]
fn tree_ignore_level_and_stats() {
    let dir = TempDir::new().unwrap();
    project(&dir);
    twig(&dir)
        .args(["tree", "proj", "-i", "target", "-L", "1", "--stats"])
        .assert()
        .success()
        .stdout("proj/\n├── Cargo.toml\n└── src/\n\n1 directory, 1 file\n");
}

#[test]
fn tree_all_and_dirs_only() {
    let dir = TempDir::new().unwrap();
    project(&dir);
    twig(&dir)
        .args(["tree", "proj", "--all", "--dirs-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/"))
        .stdout(predicate::str::contains(".git").not())
        .stdout(predicate::str::contains(".hidden").not())
        .stdout(predicate::str::contains("Cargo.toml").not());
}

#[test]
fn tree_json_parses_back() {
    let dir = TempDir::new().unwrap();
    project(&dir);
    let output = twig(&dir)
        .args(["--json", "tree", "proj/src"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tree["name"], "src");
    assert_eq!(tree["children"][0]["path"], "src/main.rs");
}

#[test]
fn tree_output_rebuilds_the_same_layout() {
    let dir = TempDir::new().unwrap();
    project(&dir);
    let drawn = twig(&dir).args(["tree", "proj"]).output().unwrap();
    assert!(drawn.status.success());

    twig(&dir)
        .args(["build", "--into", "copy"])
        .write_stdin(drawn.stdout)
        .assert()
        .success();

    assert!(dir.path().join("copy/src/main.rs").is_file());
    assert!(dir.path().join("copy/target/debug").is_dir());
}

#[test]
fn tree_missing_path_fails() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["tree", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("path not found"));
}

// ---------------------------------------------------------------------------
// twig config
// ---------------------------------------------------------------------------

#[test]
fn config_show_defaults() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("built-in defaults"))
        .stdout(predicate::str::contains("max_depth: 64"));
}

#[test]
fn config_show_reports_source() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".twig.yaml"), "expand:\n  max_results: 5\n").unwrap();

    let output = twig(&dir)
        .args(["--json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["config"]["expand"]["max_results"], 5);
    assert!(value["source"].as_str().unwrap().ends_with(".twig.yaml"));
}

#[test]
fn config_validate_clean() {
    let dir = TempDir::new().unwrap();
    twig(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No warnings"));
}

#[test]
fn config_validate_errors() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".twig.yaml"), "expand:\n  max_depth: 0\n").unwrap();

    twig(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error]"))
        .stderr(predicate::str::contains("config validation found errors"));
}
