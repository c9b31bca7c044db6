use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn project(descriptor: &str, sources: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("out")).unwrap();
    std::fs::write(dir.path().join("cstojs_options.xml"), descriptor).unwrap();
    for (name, text) in sources {
        std::fs::write(dir.path().join(name), text).unwrap();
    }
    dir
}

const TWO_FILES: &str = r#"<ProjectOptions>
  <Output Folder="out" />
  <File Source="a.src" />
  <File Source="b.src" />
</ProjectOptions>
"#;

#[test]
fn test_translate_two_files() {
    let dir = project(TWO_FILES, &[("a.src", "class A {}"), ("b.src", "class B {}")]);

    cargo_bin_cmd!("cstojs")
        .current_dir(dir.path())
        .arg("translate")
        .assert()
        .success()
        .stderr(predicate::str::contains("Done"));

    assert_eq!(
        std::fs::read_to_string(dir.path().join("out/a.js")).unwrap(),
        "class A {}"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("out/b.js")).unwrap(),
        "class B {}"
    );
}

#[test]
fn test_translate_twice_is_identical() {
    let dir = project(
        r#"<P>
  <Option CustomCSNamesToJS="Console-console,WriteLine-log" AddSBAtTheTop="// generated&#10;" />
  <Output Folder="out" />
  <File Source="a.src" />
</P>"#,
        &[("a.src", "Console.WriteLine(1);\n")],
    );

    let run = || {
        cargo_bin_cmd!("cstojs")
            .args(["--config", dir.path().to_str().unwrap(), "translate"])
            .assert()
            .success();
        std::fs::read(dir.path().join("out/a.js")).unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
    assert_eq!(
        String::from_utf8(first).unwrap(),
        "// generated\nconsole.log(1);\n"
    );
}

#[test]
fn test_translate_batch_flag() {
    let dir = project(TWO_FILES, &[("a.src", "a"), ("b.src", "b")]);

    cargo_bin_cmd!("cstojs")
        .current_dir(dir.path())
        .args(["translate", "--batch"])
        .assert()
        .success();

    assert!(dir.path().join("out/a.js").is_file());
    assert!(dir.path().join("out/b.js").is_file());
}

#[test]
fn test_translate_missing_output_folder_fails() {
    let dir = project(
        r#"<P><Output Folder="nowhere" /><File Source="a.src" /></P>"#,
        &[("a.src", "a")],
    );

    cargo_bin_cmd!("cstojs")
        .current_dir(dir.path())
        .arg("translate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere"));
}

#[test]
fn test_translate_unknown_option_fails() {
    let dir = project(
        r#"<P><Output Folder="out" /><Option Minify="true" /><File Source="a.src" /></P>"#,
        &[("a.src", "a")],
    );

    cargo_bin_cmd!("cstojs")
        .current_dir(dir.path())
        .arg("translate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Minify"));

    assert!(!dir.path().join("out/a.js").exists());
}

#[test]
fn test_translate_missing_descriptor_fails() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("cstojs")
        .current_dir(dir.path())
        .arg("translate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cstojs_options.xml"));
}

#[test]
fn test_validate_json() {
    let dir = project(
        r#"<P>
  <Output Folder="out" />
  <File Source="a.src"><Option Debug="true" /></File>
  <File Source="b.src"><Option TranslateFile="false" /></File>
</P>"#,
        &[("a.src", "a"), ("b.src", "b")],
    );

    let output = cargo_bin_cmd!("cstojs")
        .current_dir(dir.path())
        .args(["validate", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let jobs = value["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["output_file_name"], "a.js");
    assert_eq!(jobs[0]["options"]["debug"], true);
}

#[test]
fn test_init_then_translate() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("cstojs")
        .current_dir(dir.path())
        .args(["init", "js"])
        .assert()
        .success();

    assert!(dir.path().join("cstojs_options.xml").is_file());
    assert!(dir.path().join("js").is_dir());

    std::fs::write(dir.path().join("Program.cs"), "Console.WriteLine();").unwrap();
    cargo_bin_cmd!("cstojs")
        .current_dir(dir.path())
        .arg("translate")
        .assert()
        .success();
    assert!(dir.path().join("js/Program.js").is_file());

    // A second init must not clobber the descriptor.
    cargo_bin_cmd!("cstojs")
        .current_dir(dir.path())
        .args(["init", "other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_watch_rejects_out_of_range_delay() {
    let dir = project(TWO_FILES, &[("a.src", "a"), ("b.src", "b")]);

    for delay in ["999", "10001"] {
        cargo_bin_cmd!("cstojs")
            .current_dir(dir.path())
            .args(["watch", "--delay", delay])
            .assert()
            .failure()
            .stderr(predicate::str::contains("outside 1000..=10000ms"));
    }
}
