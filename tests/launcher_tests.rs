//! Launcher tests
//!
//! Spawns real scripts, so everything runs in one test to keep writes and
//! execs of the same files from racing.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;

use mcmd::error::McmdError;
use mcmd::provision::make_executable;
use mcmd::{Config, Launcher};
use tempfile::TempDir;

fn write_script(config: &Config, name: &str, body: &str, executable: bool) {
    let dir = config.commands_dir.join(name);
    fs::create_dir_all(&dir).unwrap();
    let script = dir.join(format!("{}.sh", name));
    fs::write(&script, body).unwrap();
    if executable {
        make_executable(&script).unwrap();
    } else {
        fs::set_permissions(&script, fs::Permissions::from_mode(0o644)).unwrap();
    }
}

#[test]
fn test_launcher_runs_registered_scripts() {
    let temp = TempDir::new().unwrap();
    let config = Config::with_home(temp.path());
    let out = temp.path().join("args.txt");

    write_script(
        &config,
        "record",
        &format!("#!/bin/sh\necho \"$@\" > '{}'\n", out.display()),
        true,
    );
    write_script(&config, "fail", "#!/bin/sh\nexit 3\n", true);
    write_script(&config, "plain", "#!/bin/sh\necho never\n", false);

    let launcher = Launcher::new(&config);

    // Arguments are passed through untouched
    launcher
        .execute("record", &["--release".to_string(), "two words".to_string()])
        .unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), "--release two words\n");

    match launcher.execute("fail", &[]).unwrap_err() {
        McmdError::ExecutionFailed { name, code } => {
            assert_eq!(name, "fail");
            assert_eq!(code, Some(3));
        }
        other => panic!("expected ExecutionFailed, got {:?}", other),
    }

    assert!(matches!(
        launcher.execute("plain", &[]),
        Err(McmdError::LaunchError { .. })
    ));
    assert!(matches!(
        launcher.execute("missing", &[]),
        Err(McmdError::CommandNotFound(_))
    ));
}
