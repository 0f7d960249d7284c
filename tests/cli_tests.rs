// command line tests against the built binary

use assert_cmd::Command;
use predicates::prelude::*;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/wordnet");

// binary with a clean environment, nothing picked up from the shell
fn glossa() -> Command {
    let mut cmd = Command::cargo_bin("glossa").unwrap();
    for var in [
        "WORDNET_DIR",
        "GLOSSA_MODEL",
        "GLOSSA_LABELS",
        "GLOSSA_ENRICHMENT",
        "USE_ONLINE_AI",
        "AZURE_OPENAI_API_KEY",
        "AZURE_OPENAI_ENDPOINT",
        "AZURE_OPENAI_MODEL",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd
}

#[test]
fn test_help() {
    glossa()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("define"))
        .stdout(predicate::str::contains("describe"))
        .stdout(predicate::str::contains("--wordnet"));
}

#[test]
fn test_define_pretty() {
    glossa()
        .args(["define", "serendipity", "--wordnet", FIXTURE])
        .assert()
        .success()
        .stdout(predicate::str::contains("[word]\n  serendipity"))
        .stdout(predicate::str::contains("[part_of_speech]\n  noun"))
        .stdout(predicate::str::contains("[pronunciation]\n  N/A"));
}

#[test]
fn test_define_multiword() {
    glossa()
        .args(["--json", "define", "ice", "cream"])
        .env("WORDNET_DIR", FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""word":"ice cream""#));
}

#[test]
fn test_define_json_refusal() {
    glossa()
        .args(["--json", "define", "bomb", "--wordnet", FIXTURE])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"error":"Sorry, I can't help"#));
}

#[test]
fn test_define_unknown_word() {
    glossa()
        .args(["define", "qwzxv", "--wordnet", FIXTURE])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entry found"))
        .stdout(predicate::str::contains("(no example available)"));
}

#[test]
fn test_describe_without_model() {
    glossa()
        .args(["describe", "/no/such/cat.jpg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Image classification is not configured"));
}

#[test]
fn test_bad_wordnet_dir_fails() {
    glossa()
        .args(["define", "cat", "--wordnet", "/definitely/not/here"])
        .assert()
        .failure();
}

#[test]
fn test_model_without_labels_fails() {
    glossa()
        .args(["describe", "cat.jpg", "--model", "model.onnx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("label file is required"));
}

#[test]
fn test_chat_session() {
    glossa()
        .args(["--wordnet", FIXTURE])
        .write_stdin("help\ndefine cat\nfly away\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Type 'help'"))
        .stdout(predicate::str::contains("describe <image>"))
        .stdout(predicate::str::contains("[synonyms]\n  true cat, bozo, guy"))
        .stdout(predicate::str::contains("Unknown command: 'fly'"))
        .stdout(predicate::str::contains("Bye!"));
}

#[test]
fn test_online_switch_values_never_abort() {
    for value in ["TRUE", "0", "yes", "false"] {
        glossa()
            .args(["define", "serendipity", "--wordnet", FIXTURE])
            .env("USE_ONLINE_AI", value)
            .assert()
            .success()
            .stdout(predicate::str::contains("[part_of_speech]\n  noun"));
    }
}
