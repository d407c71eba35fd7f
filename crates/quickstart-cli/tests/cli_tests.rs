//! Integration tests for the create-vueless binary.
//!
//! Every run uses `--template-dir` and, where a package manager is needed,
//! fake `pnpm` / `npm` / `npx` scripts on `PATH`, so nothing touches the
//! network.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn bin() -> Command {
    let mut cmd = Command::cargo_bin("create-vueless").unwrap();
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

/// A workspace with an empty config file and a local template tree.
struct Fixture {
    root: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        let template = root.path().join("template");
        fs::create_dir_all(template.join("src")).unwrap();
        fs::create_dir_all(template.join(".git")).unwrap();
        for (rel, content) in [
            ("package.json", "{\n  \"name\": \"vueless-quickstart\",\n  \"private\": true\n}\n"),
            ("vueless.config.ts", "export default {};\n"),
            ("vueless.config.js", "export default {};\n"),
            ("package-lock.json", "{}\n"),
            ("yarn.lock", ""),
            ("pnpm-lock.yaml", ""),
            ("bun.lockb", ""),
            (".env.local.example", "VITE_API_URL=http://localhost:3000\n"),
            ("src/main.ts", "import { createApp } from \"vue\";\n"),
            (".git/HEAD", "ref: refs/heads/main\n"),
        ] {
            fs::write(template.join(rel), content).unwrap();
        }
        fs::create_dir_all(root.path().join("work")).unwrap();
        fs::write(root.path().join("config.toml"), "").unwrap();
        Self { root }
    }

    fn work(&self) -> PathBuf {
        self.root.path().join("work")
    }

    fn template(&self) -> PathBuf {
        self.root.path().join("template")
    }

    fn config(&self) -> PathBuf {
        self.root.path().join("config.toml")
    }

    /// `create-vueless -c <config> ... --template-dir <template>` run in `work/`.
    fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = bin();
        cmd.current_dir(self.work())
            .arg("-c")
            .arg(self.config())
            .args(args)
            .arg("--template-dir")
            .arg(self.template());
        cmd
    }
}

// ── help / version / completions ──────────────────────────────────────────────

#[test]
fn help_lists_project_flags_and_subcommands() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--template"))
        .stdout(predicate::str::contains("--pm"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag() {
    bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_package_manager_is_a_usage_error() {
    bin()
        .args(["demo", "--pm", "deno"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("deno"));
}

#[test]
fn completions_for_bash() {
    bin()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create-vueless"));
}

#[test]
fn no_color_env_accepts_common_values() {
    for value in ["1", "yes", "anything"] {
        bin()
            .env("NO_COLOR", value)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("pnpm"))
            .stdout(predicate::str::contains("\u{1b}[").not());
    }
}

#[test]
fn empty_no_color_is_ignored() {
    bin().env("NO_COLOR", "").arg("list").assert().success();
}

// ── config ────────────────────────────────────────────────────────────────────

#[test]
fn config_path_reports_explicit_file() {
    let fx = Fixture::new();
    bin()
        .arg("-c")
        .arg(fx.config())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(fx.config().display().to_string()));
}

#[test]
fn config_get_honours_environment_override() {
    let fx = Fixture::new();
    bin()
        .arg("-c")
        .arg(fx.config())
        .args(["config", "get", "defaults.package_manager"])
        .env("CREATE_VUELESS__DEFAULTS__PACKAGE_MANAGER", "yarn")
        .assert()
        .success()
        .stdout(predicate::str::diff("yarn\n"));
}

#[test]
fn config_get_unknown_key_exits_with_four() {
    let fx = Fixture::new();
    bin()
        .arg("-c")
        .arg(fx.config())
        .args(["config", "get", "nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn missing_config_file_exits_with_four() {
    let fx = Fixture::new();
    bin()
        .arg("-c")
        .arg(fx.root.path().join("absent.toml"))
        .args(["config", "list"])
        .assert()
        .code(4);
}

#[test]
fn init_writes_loadable_config() {
    let fx = Fixture::new();
    let path = fx.root.path().join("fresh/config.toml");
    bin()
        .arg("-c")
        .arg(&path)
        .arg("init")
        .assert()
        .success();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("vueless-quickstart-ts.git"));

    bin()
        .arg("-c")
        .arg(&path)
        .args(["config", "get", "defaults.template"])
        .assert()
        .success()
        .stdout(predicate::str::diff("ts\n"));
}

// ── project creation ──────────────────────────────────────────────────────────

#[test]
fn existing_directory_exits_with_one_and_is_untouched() {
    let fx = Fixture::new();
    let target = fx.work().join("demo");
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("notes.txt"), "keep me").unwrap();

    fx.cmd(&["demo", "-y", "-t", "ts", "-p", "pnpm"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    let entries: Vec<_> = fs::read_dir(&target).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(fs::read_to_string(target.join("notes.txt")).unwrap(), "keep me");
}

#[test]
fn dry_run_describes_plan_without_writing() {
    let fx = Fixture::new();

    fx.cmd(&["demo", "-y", "-p", "pnpm", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vueless.config.js"))
        .stdout(predicate::str::contains("package-lock.json"))
        .stdout(predicate::str::contains("npx vueless init --pnpm"))
        .stdout(predicate::str::contains("cd demo && pnpm run dev"));

    assert!(!fx.work().join("demo").exists());
}

#[test]
fn empty_name_is_stopped_by_directory_guard() {
    let fx = Fixture::new();
    fx.cmd(&["", "-y", "-p", "npm"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_dir(fx.work()).unwrap().count(), 0);
}

#[test]
fn dry_run_location_is_absolute_under_working_directory() {
    let fx = Fixture::new();
    let expected = fx.work().canonicalize().unwrap().join("tmp/elsewhere");

    fx.cmd(&["/tmp/elsewhere", "-y", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Location:  {}",
            expected.display()
        )));
}

#[cfg(unix)]
mod with_fake_managers {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Drops executable shell scripts into `<root>/bin`; returns a PATH value.
    fn install_fakes(root: &Path, scripts: &[(&str, &str)]) -> String {
        let bin_dir = root.join("bin");
        fs::create_dir_all(&bin_dir).unwrap();
        for (name, body) in scripts {
            let path = bin_dir.join(name);
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        format!("{}:/usr/bin:/bin", bin_dir.display())
    }

    #[test]
    fn demo_ts_pnpm_scenario() {
        let fx = Fixture::new();
        let log = fx.root.path().join("calls.log");
        let path = install_fakes(
            fx.root.path(),
            &[
                (
                    "pnpm",
                    &format!(
                        "if [ \"$1\" = \"--version\" ]; then echo 9.1.0; exit 0; fi\n\
                         echo \"pnpm $* agent=$npm_config_user_agent\" >> {}",
                        log.display()
                    ),
                ),
                ("npx", &format!("echo \"npx $*\" >> {}", log.display())),
            ],
        );

        fx.cmd(&["demo", "-y", "-t", "ts", "-p", "pnpm"])
            .env("PATH", path)
            .assert()
            .success()
            .stdout(predicate::str::contains("Project ready!"))
            .stdout(predicate::str::contains("cd demo && pnpm run dev"));

        let project = fx.work().join("demo");
        assert!(project.join("vueless.config.ts").exists());
        assert!(!project.join("vueless.config.js").exists());
        assert!(project.join("pnpm-lock.yaml").exists());
        for gone in ["package-lock.json", "yarn.lock", "bun.lockb"] {
            assert!(!project.join(gone).exists(), "{gone} should be removed");
        }
        assert!(!project.join(".git").exists());
        assert_eq!(
            fs::read(project.join(".env.local")).unwrap(),
            fs::read(project.join(".env.local.example")).unwrap()
        );

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(project.join("package.json")).unwrap())
                .unwrap();
        assert_eq!(manifest["packageManager"], "pnpm@9.1.0");

        assert_eq!(
            fs::read_to_string(&log).unwrap(),
            "pnpm install agent=pnpm\nnpx vueless init --pnpm\n"
        );
    }

    #[test]
    fn failed_install_propagates_exit_code_and_skips_init() {
        let fx = Fixture::new();
        let marker = fx.root.path().join("init-ran");
        let path = install_fakes(
            fx.root.path(),
            &[
                ("npm", "echo 'npm ERR! network' >&2; exit 3"),
                ("npx", &format!("touch {}", marker.display())),
            ],
        );

        fx.cmd(&["demo", "-y", "-p", "npm"])
            .env("PATH", path)
            .assert()
            .code(3)
            .stderr(predicate::str::contains("npm install"));

        assert!(!marker.exists());
        assert!(fx.work().join("demo/package.json").exists());
    }

    #[test]
    fn missing_version_only_warns() {
        let fx = Fixture::new();
        let path = install_fakes(
            fx.root.path(),
            &[
                ("bun", "if [ \"$1\" = \"--version\" ]; then exit 1; fi"),
                ("npx", "exit 0"),
            ],
        );

        fx.cmd(&["demo", "-y", "-t", "js", "-p", "bun"])
            .env("PATH", path)
            .assert()
            .success()
            .stdout(predicate::str::contains("Could not detect bun version"));

        let manifest = fs::read_to_string(fx.work().join("demo/package.json")).unwrap();
        assert!(!manifest.contains("packageManager"));
        assert!(fx.work().join("demo/vueless.config.js").exists());
        assert!(!fx.work().join("demo/vueless.config.ts").exists());
    }

    #[test]
    fn second_run_with_same_name_keeps_first_project() {
        let fx = Fixture::new();
        let path = install_fakes(
            fx.root.path(),
            &[("npm", "if [ \"$1\" = \"--version\" ]; then echo 10.8.1; fi"), ("npx", "exit 0")],
        );

        fx.cmd(&["demo", "-y"]).env("PATH", &path).assert().success();
        let manifest = fs::read_to_string(fx.work().join("demo/package.json")).unwrap();

        fx.cmd(&["demo", "-y"])
            .env("PATH", &path)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("already exists"));
        assert_eq!(
            fs::read_to_string(fx.work().join("demo/package.json")).unwrap(),
            manifest
        );
    }
}
