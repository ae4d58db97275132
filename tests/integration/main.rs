//! Integration tests for listsync

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Isolated config, state and store locations for one test
    struct Sandbox {
        dir: TempDir,
    }

    impl Sandbox {
        fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        fn store(&self) -> PathBuf {
            self.dir.path().join("items.json")
        }

        fn config(&self) -> PathBuf {
            self.dir.path().join("config.toml")
        }

        fn cmd(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("listsync");
            cmd.env("HOME", self.dir.path())
                .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
                .env("XDG_STATE_HOME", self.dir.path().join("state"))
                .env("XDG_DATA_HOME", self.dir.path().join("data"))
                .env("LISTSYNC_NO_PROMPT", "1")
                .env_remove("LISTSYNC_CONFIG")
                .arg("--config")
                .arg(self.config())
                .arg("--store")
                .arg(self.store());
            cmd
        }

        fn create(&self, name: &str) {
            self.cmd()
                .args(["create", "--name", name])
                .assert()
                .success()
                .stdout(predicate::str::contains(format!("Created {name}")));
        }

        fn ids(&self) -> Vec<String> {
            let output = self
                .cmd()
                .args(["list", "--format", "plain"])
                .output()
                .unwrap();
            assert!(output.status.success());
            String::from_utf8(output.stdout)
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn listsync() -> Command {
        cargo_bin_cmd!("listsync")
    }

    #[test]
    fn help_displays() {
        listsync()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("confirmed-delete"));
    }

    #[test]
    fn version_displays() {
        listsync()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("listsync"));
    }

    #[test]
    fn list_empty() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("No items"));
    }

    #[test]
    fn create_then_list() {
        let sandbox = Sandbox::new();
        sandbox.create("Gold");
        sandbox.create("Silver");

        sandbox
            .cmd()
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("Gold"))
            .stdout(predicate::str::contains("Silver"))
            .stdout(predicate::str::contains("2 item(s)"));
    }

    #[test]
    fn list_filter_and_json() {
        let sandbox = Sandbox::new();
        sandbox.create("Gold Annual");
        sandbox.create("Silver");

        sandbox
            .cmd()
            .args(["list", "--filter", "gold", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Gold Annual"))
            .stdout(predicate::str::contains("Silver").not());
    }

    #[test]
    fn list_all_pages() {
        let sandbox = Sandbox::new();
        for name in ["A", "B", "C"] {
            sandbox.create(name);
        }

        sandbox
            .cmd()
            .args(["list", "--first", "2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("2 item(s)"))
            .stdout(predicate::str::contains("--all"));

        sandbox
            .cmd()
            .args(["list", "--first", "2", "--all"])
            .assert()
            .success()
            .stdout(predicate::str::contains("3 item(s)"));
    }

    #[test]
    fn delete_with_yes_removes_item() {
        let sandbox = Sandbox::new();
        sandbox.create("Gold");
        sandbox.create("Silver");
        let ids = sandbox.ids();
        assert_eq!(ids.len(), 2);

        sandbox
            .cmd()
            .args(["delete", "--yes", &ids[0]])
            .assert()
            .success()
            .stdout(predicate::str::contains("Deleted Gold"))
            .stdout(predicate::str::contains("1 item(s) remain"));

        assert_eq!(sandbox.ids(), vec![ids[1].clone()]);
    }

    #[test]
    fn delete_several_with_yes() {
        let sandbox = Sandbox::new();
        for name in ["Gold", "Silver", "Bronze"] {
            sandbox.create(name);
        }
        let ids = sandbox.ids();

        sandbox
            .cmd()
            .args(["delete", "--yes", &ids[0], &ids[1]])
            .assert()
            .success()
            .stdout(predicate::str::contains("Deleted Gold"))
            .stdout(predicate::str::contains("Deleted Silver"))
            .stdout(predicate::str::contains("1 item(s) remain"));

        assert_eq!(sandbox.ids(), vec![ids[2].clone()]);
    }

    #[test]
    fn delete_item_past_first_page() {
        let sandbox = Sandbox::new();
        for name in ["A", "B", "C"] {
            sandbox.create(name);
        }
        let ids = sandbox.ids();

        sandbox
            .cmd()
            .args(["delete", "--yes", "--first", "2", &ids[2]])
            .assert()
            .success()
            .stdout(predicate::str::contains("Deleted C"));

        assert_eq!(sandbox.ids(), ids[..2].to_vec());
    }

    #[test]
    fn delete_without_yes_is_declined() {
        let sandbox = Sandbox::new();
        sandbox.create("Gold");
        let ids = sandbox.ids();

        sandbox
            .cmd()
            .args(["delete", &ids[0]])
            .assert()
            .success()
            .stdout(predicate::str::contains("Nothing deleted"));

        assert_eq!(sandbox.ids(), ids);
    }

    #[test]
    fn delete_unknown_item() {
        let sandbox = Sandbox::new();
        sandbox.create("Gold");

        sandbox
            .cmd()
            .args(["delete", "--yes", "no-such-id"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Item not found"));
    }

    #[test]
    fn create_rejects_bad_field() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["create", "--name", "Gold", "--field", "novalue"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("KEY=VALUE"));
    }

    #[test]
    fn config_path() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[list]"))
            .stdout(predicate::str::contains("itemList"));
    }

    #[test]
    fn config_init_then_invalid_page_size() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration initialized"));

        std::fs::write(sandbox.config(), "[list]\npage_size = \"many\"\n").unwrap();
        sandbox
            .cmd()
            .arg("list")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));
    }
}
