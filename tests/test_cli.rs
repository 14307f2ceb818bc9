#[cfg(test)]
extern crate assert_cmd;
extern crate predicates;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use std::process::Command;

#[test]
fn test_version() {
    let expected_version = "pylauncher 0.1.0\n";
    let mut cmd = Command::cargo_bin("pylauncher").expect("Calling binary failed");
    cmd.arg("--version").assert().stdout(expected_version);
}

#[test]
fn test_config_shows_defaults() {
    let mut cmd = Command::cargo_bin("pylauncher").expect("Calling binary failed");
    cmd.arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("PyQt6"))
        .stdout(predicate::str::contains("requirements.txt"));
}

#[test]
fn test_config_reads_environment() {
    let mut cmd = Command::cargo_bin("pylauncher").expect("Calling binary failed");
    cmd.env("PYLAUNCHER_TOOLKIT_MODULE", "tkinter")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("tkinter"));
}

#[test]
fn test_environment_overrides_config_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config_file = temp_dir.path().join("launcher.toml");
    std::fs::write(&config_file, "toolkit_module = \"from_file\"\ninterpreter = \"python3\"\n")
        .unwrap();

    let mut cmd = Command::cargo_bin("pylauncher").expect("Calling binary failed");
    cmd.env("PYLAUNCHER_TOOLKIT_MODULE", "from_env")
        .arg("--config")
        .arg(&config_file)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("from_env"))
        .stdout(predicate::str::contains("from_file").not())
        .stdout(predicate::str::contains("python3"));
}

#[test]
fn test_completion_bash() {
    let mut cmd = Command::cargo_bin("pylauncher").expect("Calling binary failed");
    cmd.args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pylauncher"));
}

#[test]
fn test_missing_app_dir_fails() {
    let mut cmd = Command::cargo_bin("pylauncher").expect("Calling binary failed");
    cmd.args(["--no-pause", "--dir", "/nonexistent/launcher/dir"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("无法进入程序所在目录"))
        .stderr(predicate::str::is_empty());
}

#[cfg(unix)]
mod launch {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const PAUSE_PROMPT: &str = "请按回车键继续";

    // Stands in for `python`: the toolkit counts as installed once the fake
    // pip has dropped a marker into the working directory.
    const FAKE_PYTHON: &str = r#"#!/bin/sh
case "$1" in
    --version)
        echo "Python 3.12.1"
        exit 0
        ;;
    -c)
        [ -f .toolkit-installed ] && exit 0
        exit 1
        ;;
    main.py)
        pwd > launched-from
        exit "${FAKE_APP_EXIT:-0}"
        ;;
esac
exit 2
"#;

    const FAKE_PIP: &str = r#"#!/bin/sh
echo "$@" >> pip-calls
if [ "${FAKE_PIP_EXIT:-0}" -ne 0 ]; then
    exit "$FAKE_PIP_EXIT"
fi
touch .toolkit-installed
"#;

    struct Fixture {
        app: TempDir,
        bin: TempDir,
    }

    impl Fixture {
        fn new() -> Fixture {
            let app = TempDir::new().unwrap();
            fs::write(app.path().join("main.py"), "print('hello')\n").unwrap();
            fs::write(app.path().join("requirements.txt"), "PyQt6\n").unwrap();

            let bin = TempDir::new().unwrap();
            write_script(&bin.path().join("python"), FAKE_PYTHON);
            write_script(&bin.path().join("pip"), FAKE_PIP);

            Fixture { app, bin }
        }

        fn with_toolkit(self) -> Fixture {
            fs::write(self.app.path().join(".toolkit-installed"), "").unwrap();
            self
        }

        fn launcher(&self) -> Command {
            let mut cmd = Command::cargo_bin("pylauncher").expect("Calling binary failed");
            cmd.arg("--dir")
                .arg(self.app.path())
                .env("PYLAUNCHER_INTERPRETER", self.bin.path().join("python"))
                .env("PYLAUNCHER_INSTALLER", self.bin.path().join("pip"))
                .env_remove("FAKE_APP_EXIT")
                .env_remove("FAKE_PIP_EXIT");
            cmd
        }

        fn app_file(&self, name: &str) -> PathBuf {
            self.app.path().join(name)
        }
    }

    fn write_script(path: &Path, body: &str) {
        fs::write(path, body).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn interpreter_absent_exits_1_without_install_or_launch() {
        let fixture = Fixture::new();

        fixture
            .launcher()
            .env("PYLAUNCHER_INTERPRETER", fixture.bin.path().join("no-such-python"))
            .assert()
            .code(1)
            .stdout(predicate::str::contains("[详情] 无法启动"))
            .stdout(predicate::str::contains("未检测到 Python"))
            .stdout(predicate::str::contains("https://www.python.org/downloads/"))
            .stdout(predicate::str::contains(PAUSE_PROMPT));

        assert!(!fixture.app_file("pip-calls").exists());
        assert!(!fixture.app_file("launched-from").exists());
    }

    #[test]
    fn toolkit_present_launches_without_install() {
        let fixture = Fixture::new().with_toolkit();

        fixture
            .launcher()
            .assert()
            .success()
            .stdout(predicate::str::contains("正在启动收入记账助手"))
            .stdout(predicate::str::contains(PAUSE_PROMPT).not())
            .stdout(predicate::str::contains("\x1b]").not());

        assert!(!fixture.app_file("pip-calls").exists());
        assert!(fixture.app_file("launched-from").exists());
    }

    #[test]
    fn toolkit_absent_installs_once_then_launches() {
        let fixture = Fixture::new();

        fixture
            .launcher()
            .assert()
            .success()
            .stdout(predicate::str::contains("依赖安装成功"));

        let calls = fs::read_to_string(fixture.app_file("pip-calls")).unwrap();
        assert_eq!(calls, "install -r requirements.txt\n");
        assert!(fixture.app_file("launched-from").exists());
    }

    #[test]
    fn install_failure_exits_1_and_never_launches() {
        let fixture = Fixture::new();

        fixture
            .launcher()
            .env("FAKE_PIP_EXIT", "1")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("依赖安装失败，请检查网络连接"))
            .stdout(predicate::str::contains(PAUSE_PROMPT));

        assert!(!fixture.app_file("launched-from").exists());
    }

    #[test]
    fn app_failure_exits_1_after_pause() {
        let fixture = Fixture::new().with_toolkit();

        fixture
            .launcher()
            .env("FAKE_APP_EXIT", "3")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("程序异常退出"))
            .stdout(predicate::str::contains(PAUSE_PROMPT))
            .stderr(predicate::str::is_empty());
    }

    #[test]
    fn no_pause_skips_the_prompt() {
        let fixture = Fixture::new().with_toolkit();

        fixture
            .launcher()
            .arg("--no-pause")
            .env("FAKE_APP_EXIT", "3")
            .assert()
            .code(1)
            .stdout(predicate::str::contains(PAUSE_PROMPT).not());
    }

    #[test]
    fn app_runs_in_its_own_directory_wherever_launched_from() {
        let fixture = Fixture::new().with_toolkit();
        let elsewhere = TempDir::new().unwrap();

        fixture
            .launcher()
            .current_dir(elsewhere.path())
            .assert()
            .success();

        let launched_from = fs::read_to_string(fixture.app_file("launched-from")).unwrap();
        assert_eq!(
            fs::canonicalize(launched_from.trim()).unwrap(),
            fs::canonicalize(fixture.app.path()).unwrap()
        );
        assert!(!elsewhere.path().join("launched-from").exists());
    }

    #[test]
    fn launcher_next_to_main_py_needs_no_dir_flag() {
        let fixture = Fixture::new().with_toolkit();
        let elsewhere = TempDir::new().unwrap();

        let installed = fixture.app_file("pylauncher");
        fs::copy(assert_cmd::cargo::cargo_bin("pylauncher"), &installed).unwrap();
        fs::set_permissions(&installed, fs::Permissions::from_mode(0o755)).unwrap();

        let output = run_copied_binary(|| {
            let mut cmd = Command::new(&installed);
            cmd.current_dir(elsewhere.path())
                .env("PYLAUNCHER_INTERPRETER", fixture.bin.path().join("python"))
                .env("PYLAUNCHER_INSTALLER", fixture.bin.path().join("pip"))
                .env_remove("FAKE_APP_EXIT");
            cmd
        });
        assert!(output.status.success(), "{:?}", output);

        let launched_from = fs::read_to_string(fixture.app_file("launched-from")).unwrap();
        assert_eq!(
            fs::canonicalize(launched_from.trim()).unwrap(),
            fs::canonicalize(fixture.app.path()).unwrap()
        );
        assert!(!elsewhere.path().join("launched-from").exists());
    }

    // A freshly copied executable can briefly be busy (ETXTBSY) while another
    // test thread forks with the copy's descriptor still open.
    fn run_copied_binary(build: impl Fn() -> Command) -> std::process::Output {
        const ETXTBSY: i32 = 26;
        let mut attempts = 0;
        loop {
            match build().output() {
                Err(err) if err.raw_os_error() == Some(ETXTBSY) && attempts < 10 => {
                    attempts += 1;
                    std::thread::sleep(std::time::Duration::from_millis(50));
                }
                result => return result.unwrap(),
            }
        }
    }

    #[test]
    fn forwarded_arguments_reach_the_entry_point() {
        let fixture = Fixture::new().with_toolkit();

        // The fake interpreter only recognises `main.py` as its first argument,
        // so extra arguments must come after it.
        fixture
            .launcher()
            .args(["launch", "--", "--safe-mode"])
            .assert()
            .success();

        assert!(fixture.app_file("launched-from").exists());
    }

    #[test]
    fn check_reports_missing_toolkit_as_json() {
        let fixture = Fixture::new();

        let output = fixture
            .launcher()
            .args(["check", "--format", "json"])
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let items = items.as_array().unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[1]["detail"], "Python 3.12.1");
        assert_eq!(items[2]["ok"], false);
        assert_eq!(items[3]["ok"], true);
        assert_eq!(items[4]["ok"], true);

        // Checking never installs.
        assert!(!fixture.app_file("pip-calls").exists());
        assert!(!fixture.app_file(".toolkit-installed").exists());
    }

    #[test]
    fn check_passes_when_everything_is_in_place() {
        let fixture = Fixture::new().with_toolkit();

        fixture
            .launcher()
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("Python 3.12.1"));
    }
}
