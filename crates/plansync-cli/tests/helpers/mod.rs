use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SCHEDULE: &str = r#"
base_date = "2025-01-01"

[repository]
owner = "octo"
name = "roadmap"

[project]
number = 5

[issues]
"BE-INFRA-001" = 5
"BE-PERF-001" = 6

[schedule]
"BE-INFRA-001" = [2, 2]
"#;

/// Test harness running the binary inside a scratch directory that holds
/// the schedule document and, optionally, a fake `gh` script.
pub struct CliTestHarness {
    temp_dir: TempDir,
    gh_path: Option<PathBuf>,
}

impl CliTestHarness {
    pub fn new() -> Self {
        Self::with_schedule(SCHEDULE)
    }

    pub fn with_schedule(document: &str) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        std::fs::write(temp_dir.path().join("roadmap.toml"), document)
            .expect("Failed to write schedule document");
        Self {
            temp_dir,
            gh_path: None,
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Installs an executable shell script standing in for `gh`. The script
    /// sees the full GraphQL document in its arguments and answers by
    /// operation name.
    #[cfg(unix)]
    pub fn with_fake_gh(mut self, script: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let path = self.temp_dir.path().join("fake-gh");
        std::fs::write(&path, script).expect("Failed to write fake gh");
        let mut permissions = std::fs::metadata(&path).unwrap().permissions();
        permissions.set_mode(0o755);
        std::fs::set_permissions(&path, permissions).unwrap();
        self.gh_path = Some(path);
        self
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("plansync").expect("Failed to find plansync binary");
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("RUST_LOG");
        match &self.gh_path {
            Some(path) => cmd.env("PLANSYNC_GH_PATH", path),
            None => cmd.env("PLANSYNC_GH_PATH", self.temp_dir.path().join("missing-gh")),
        };
        cmd
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }
}

/// A fake `gh` serving a board with issue #5 on it and Start/End date fields.
pub const BOARD_GH: &str = r#"#!/bin/sh
case "$*" in
  *"query ViewerProject"*)
    echo '{"data":{"viewer":{"projectV2":{"id":"PVT_1","title":"Roadmap"}}}}' ;;
  *"query ProjectFields"*)
    echo '{"data":{"node":{"fields":{"pageInfo":{"hasNextPage":false,"endCursor":null},"nodes":[{"id":"F_status","name":"Status","dataType":"SINGLE_SELECT"},{"id":"F_start","name":"Start date","dataType":"DATE"},{"id":"F_end","name":"End date","dataType":"DATE"}]}}}}' ;;
  *"query Issue"*)
    echo '{"data":{"repository":{"issue":{"id":"I_5","title":"Infra"}}}}' ;;
  *"query ProjectItems"*)
    echo '{"data":{"node":{"items":{"pageInfo":{"hasNextPage":false,"endCursor":null},"nodes":[{"id":"PVTI_5","content":{"id":"I_5"}}]}}}}' ;;
  *"mutation SetDate"*)
    echo '{"data":{"updateProjectV2ItemFieldValue":{"projectV2Item":{"id":"PVTI_5"}}}}' ;;
  *"mutation AddItem"*)
    echo '{"errors":[{"message":"Content already exists in this project"}]}'
    exit 1 ;;
  *)
    echo "unexpected call: $*" >&2
    exit 1 ;;
esac
"#;

/// A fake `gh` whose viewer has no such project, answering the way GitHub
/// does: null data, a typed NOT_FOUND error and a non-zero exit.
pub const NO_PROJECT_GH: &str = r#"#!/bin/sh
echo '{"data":{"viewer":{"projectV2":null}},"errors":[{"type":"NOT_FOUND","path":["viewer","projectV2"],"locations":[{"line":3,"column":5}],"message":"Could not resolve to a ProjectV2 with the number 5."}]}'
echo "gh: Could not resolve to a ProjectV2 with the number 5." >&2
exit 1
"#;

/// A fake `gh` whose token lacks project scopes.
pub const NO_SCOPE_GH: &str = r#"#!/bin/sh
echo '{"errors":[{"type":"INSUFFICIENT_SCOPES","message":"Your token has not been granted the required scopes to execute this query."}]}'
exit 1
"#;

/// A fake `gh` serving a board without any DATE field.
pub const NO_DATE_FIELDS_GH: &str = r#"#!/bin/sh
case "$*" in
  *"query ViewerProject"*)
    echo '{"data":{"viewer":{"projectV2":{"id":"PVT_1","title":"Roadmap"}}}}' ;;
  *"query ProjectFields"*)
    echo '{"data":{"node":{"fields":{"pageInfo":{"hasNextPage":false,"endCursor":null},"nodes":[{"id":"F_title","name":"Title","dataType":"TITLE"},{"id":"F_status","name":"Status","dataType":"SINGLE_SELECT"}]}}}}' ;;
  *)
    echo "unexpected call: $*" >&2
    exit 1 ;;
esac
"#;
