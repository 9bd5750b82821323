//! Registry tests
//!
//! Create/update/list/remove flows driven through a scripted interaction.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use mcmd::error::{McmdError, Result};
use mcmd::provision::{is_executable, Operation};
use mcmd::registry::SavedCommand;
use mcmd::{Config, CreateOutcome, CreateRequest, Interaction, Registry, ScriptSource, Warned};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Interaction that replays canned answers
#[derive(Default)]
struct Scripted {
    confirms: VecDeque<bool>,
    inputs: VecDeque<String>,
    files: VecDeque<Option<PathBuf>>,
    /// Content the "editor" writes; `None` leaves the file alone
    editor_content: Option<String>,
    prompts: Vec<String>,
    edits: usize,
}

impl Scripted {
    fn editor(content: &str) -> Self {
        Self {
            editor_content: Some(content.to_string()),
            ..Self::default()
        }
    }

    fn confirm(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }

    fn input(mut self, answer: &str) -> Self {
        self.inputs.push_back(answer.to_string());
        self
    }

    fn file(mut self, path: Option<PathBuf>) -> Self {
        self.files.push_back(path);
        self
    }
}

impl Interaction for Scripted {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self.prompts.push(prompt.to_string());
        self.confirms
            .pop_front()
            .ok_or_else(|| McmdError::Prompt(format!("unexpected confirm: {}", prompt)))
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.inputs
            .pop_front()
            .ok_or_else(|| McmdError::Prompt(format!("unexpected input: {}", prompt)))
    }

    fn choose_file(&mut self, prompt: &str) -> Result<Option<PathBuf>> {
        self.prompts.push(prompt.to_string());
        self.files
            .pop_front()
            .ok_or_else(|| McmdError::Prompt(format!("unexpected file prompt: {}", prompt)))
    }

    fn choose_directory(&mut self, prompt: &str) -> Result<Option<PathBuf>> {
        Err(McmdError::Prompt(format!("unexpected directory prompt: {}", prompt)))
    }

    fn edit(&mut self, path: &Path) -> Result<()> {
        self.edits += 1;
        if let Some(content) = &self.editor_content {
            fs::write(path, content)?;
        }
        Ok(())
    }
}

fn setup() -> (TempDir, Config) {
    let temp = TempDir::new().unwrap();
    let config = Config::with_home(temp.path().join("home"));
    fs::create_dir_all(&config.commands_dir).unwrap();
    (temp, config)
}

fn saved(outcome: CreateOutcome) -> Warned<SavedCommand> {
    match outcome {
        CreateOutcome::Saved(saved) => saved,
        CreateOutcome::Cancelled => panic!("expected the command to be saved"),
    }
}

// =============================================================================
// Create
// =============================================================================

mod create_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_with_editor() {
        let (_temp, config) = setup();
        let registry = Registry::new(&config);
        let mut ui = Scripted::editor("echo hi").confirm(false);

        let outcome = registry
            .create(CreateRequest::new("build").description("runs the build"), &mut ui)
            .unwrap();
        let saved = saved(outcome);

        let script = config.commands_dir.join("build/build.sh");
        assert_eq!(saved.value.script, script);
        assert_eq!(saved.value.operation, Operation::Create);
        assert!(saved.value.interpreter_added);
        assert!(saved.warnings.is_empty());
        assert_eq!(fs::read_to_string(&script).unwrap(), "#!/bin/bash\necho hi");
        assert_eq!(
            fs::read_to_string(config.commands_dir.join("build/build.desc")).unwrap(),
            "runs the build\n"
        );
        assert!(is_executable(&script));
        assert_eq!(ui.edits, 1);
    }

    #[test]
    fn test_create_from_file_keeps_interpreter() {
        let (temp, config) = setup();
        let source = temp.path().join("deploy.sh");
        fs::write(&source, "#!/bin/sh\necho deploy\n").unwrap();

        let mut ui = Scripted::default();
        let request = CreateRequest::new("deploy")
            .description("ships it")
            .source(ScriptSource::File(source));
        let saved = saved(Registry::new(&config).create(request, &mut ui).unwrap());

        assert!(!saved.value.interpreter_added);
        assert_eq!(
            fs::read_to_string(&saved.value.script).unwrap(),
            "#!/bin/sh\necho deploy\n"
        );
        assert!(ui.prompts.is_empty());
    }

    #[test]
    fn test_create_asks_for_missing_pieces() {
        let (temp, config) = setup();
        let source = temp.path().join("lint.sh");
        fs::write(&source, "cargo clippy\n").unwrap();

        // Empty description is asked again
        let mut ui = Scripted::default()
            .input("   ")
            .input("runs clippy")
            .confirm(true)
            .file(Some(source));

        saved(Registry::new(&config).create(CreateRequest::new("lint"), &mut ui).unwrap());

        assert_eq!(
            Registry::new(&config).describe("lint").unwrap(),
            "runs clippy"
        );
        assert_eq!(ui.prompts.len(), 4);
    }

    #[test]
    fn test_create_then_list_shows_command_once() {
        let (_temp, config) = setup();
        let registry = Registry::new(&config);

        let mut ui = Scripted::editor("echo hi");
        let request = CreateRequest::new("build")
            .description("runs the build")
            .source(ScriptSource::Editor);
        saved(registry.create(request, &mut ui).unwrap());

        let listed = registry.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "build");
        assert_eq!(listed[0].index, 1);
        assert_eq!(listed[0].description.as_deref(), Some("runs the build"));
    }

    #[test]
    fn test_invalid_name_writes_nothing() {
        let (_temp, config) = setup();
        let mut ui = Scripted::editor("echo hi");

        for name in ["", "my cmd", "../escape", "9lives", "a/b"] {
            let err = Registry::new(&config)
                .create(CreateRequest::new(name).description("x"), &mut ui)
                .unwrap_err();
            assert!(matches!(err, McmdError::InvalidName(_)), "{:?}", name);
        }

        assert_eq!(fs::read_dir(&config.commands_dir).unwrap().count(), 0);
        assert_eq!(ui.edits, 0);
    }

    #[test]
    fn test_missing_source_file_writes_nothing() {
        let (temp, config) = setup();
        let request = CreateRequest::new("build")
            .description("x")
            .source(ScriptSource::File(temp.path().join("missing.sh")));

        let err = Registry::new(&config)
            .create(request, &mut Scripted::default())
            .unwrap_err();

        assert!(matches!(err, McmdError::ScriptNotFound(_)));
        assert!(!config.commands_dir.join("build").exists());
    }

    #[test]
    fn test_cancelled_file_choice_writes_nothing() {
        let (_temp, config) = setup();
        let mut ui = Scripted::default().confirm(true).file(None);

        let outcome = Registry::new(&config)
            .create(CreateRequest::new("build").description("x"), &mut ui)
            .unwrap();

        assert_eq!(outcome, CreateOutcome::Cancelled);
        assert!(!config.commands_dir.join("build").exists());
    }

    #[test]
    fn test_editor_that_writes_nothing() {
        let (_temp, config) = setup();
        let request = CreateRequest::new("build")
            .description("x")
            .source(ScriptSource::Editor);

        let err = Registry::new(&config)
            .create(request, &mut Scripted::default())
            .unwrap_err();

        assert!(matches!(err, McmdError::ScriptNotWritten(_)));
    }
}

// =============================================================================
// Update
// =============================================================================

mod update_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_build(config: &Config) {
        let request = CreateRequest::new("build")
            .description("runs the build")
            .source(ScriptSource::Editor);
        saved(
            Registry::new(config)
                .create(request, &mut Scripted::editor("echo v1\n"))
                .unwrap(),
        );
    }

    #[test]
    fn test_declined_update_changes_nothing() {
        let (_temp, config) = setup();
        create_build(&config);
        let script = config.commands_dir.join("build/build.sh");
        let before = fs::read(&script).unwrap();

        let mut ui = Scripted::editor("echo v2\n").confirm(false);
        let request = CreateRequest::new("build")
            .description("new text")
            .source(ScriptSource::Editor);
        let outcome = Registry::new(&config).create(request, &mut ui).unwrap();

        assert_eq!(outcome, CreateOutcome::Cancelled);
        assert_eq!(fs::read(&script).unwrap(), before);
        assert_eq!(
            Registry::new(&config).describe("build").unwrap(),
            "runs the build"
        );
        assert_eq!(ui.edits, 0);
    }

    #[test]
    fn test_update_keeps_description_on_empty_answer() {
        let (_temp, config) = setup();
        create_build(&config);

        let mut ui = Scripted::editor("echo v2\n").confirm(true).input("");
        let request = CreateRequest::new("build").source(ScriptSource::Editor);
        let saved = saved(Registry::new(&config).create(request, &mut ui).unwrap());

        assert_eq!(saved.value.operation, Operation::Update);
        assert_eq!(
            fs::read_to_string(&saved.value.script).unwrap(),
            "#!/bin/bash\necho v2\n"
        );
        assert_eq!(
            Registry::new(&config).describe("build").unwrap(),
            "runs the build"
        );
    }

    #[test]
    fn test_update_from_own_script_keeps_body() {
        let (_temp, config) = setup();
        let script = config.commands_dir.join("build/build.sh");
        fs::create_dir_all(script.parent().unwrap()).unwrap();
        fs::write(&script, "#!/bin/sh\nmake all\n").unwrap();

        let mut ui = Scripted::default().confirm(true);
        let request = CreateRequest::new("build")
            .description("runs make")
            .source(ScriptSource::File(script.clone()));
        let saved = saved(Registry::new(&config).create(request, &mut ui).unwrap());

        assert_eq!(saved.value.operation, Operation::Update);
        assert!(!saved.value.interpreter_added);
        assert_eq!(fs::read_to_string(&script).unwrap(), "#!/bin/sh\nmake all\n");
        assert!(is_executable(&script));
    }

    #[test]
    fn test_update_replaces_description() {
        let (_temp, config) = setup();
        create_build(&config);

        let mut ui = Scripted::editor("echo v2\n").confirm(true);
        let request = CreateRequest::new("build")
            .description("builds everything")
            .source(ScriptSource::Editor);
        saved(Registry::new(&config).create(request, &mut ui).unwrap());

        assert_eq!(
            Registry::new(&config).describe("build").unwrap(),
            "builds everything"
        );
        assert_eq!(Registry::new(&config).list().unwrap().len(), 1);
    }
}

// =============================================================================
// Auto export
// =============================================================================

mod auto_export_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request() -> CreateRequest {
        CreateRequest::new("build")
            .description("runs the build")
            .source(ScriptSource::Editor)
    }

    #[test]
    fn test_auto_export_after_create() {
        let (temp, mut config) = setup();
        config.auto_export = true;
        config.export_dir = Some(temp.path().join("shared"));

        let saved = saved(
            Registry::new(&config)
                .create(request(), &mut Scripted::editor("echo hi"))
                .unwrap(),
        );

        let exported = temp.path().join("shared/mcmd");
        assert_eq!(saved.value.exported_to, Some(exported.clone()));
        assert!(saved.warnings.is_empty());
        assert_eq!(
            fs::read_to_string(exported.join("build/build.sh")).unwrap(),
            "#!/bin/bash\necho hi"
        );
        assert!(exported.join("build/build.desc").is_file());
    }

    #[test]
    fn test_auto_export_failure_is_a_warning() {
        let (temp, mut config) = setup();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        config.auto_export = true;
        config.export_dir = Some(blocker);

        let saved = saved(
            Registry::new(&config)
                .create(request(), &mut Scripted::editor("echo hi"))
                .unwrap(),
        );

        assert_eq!(saved.value.exported_to, None);
        assert_eq!(saved.warnings.len(), 1);
        assert!(saved.warnings[0].contains("auto export"));
        assert!(config.commands_dir.join("build/build.sh").is_file());
    }

    #[test]
    fn test_auto_export_without_directory_warns() {
        let (_temp, mut config) = setup();
        config.auto_export = true;

        let saved = saved(
            Registry::new(&config)
                .create(request(), &mut Scripted::editor("echo hi"))
                .unwrap(),
        );

        assert_eq!(saved.value.exported_to, None);
        assert!(saved.warnings[0].contains("MCMD_EXPORT_DIR"));
    }

    #[test]
    fn test_no_export_when_disabled() {
        let (temp, mut config) = setup();
        config.export_dir = Some(temp.path().join("shared"));

        let saved = saved(
            Registry::new(&config)
                .create(request(), &mut Scripted::editor("echo hi"))
                .unwrap(),
        );

        assert_eq!(saved.value.exported_to, None);
        assert!(!temp.path().join("shared").exists());
    }
}

// =============================================================================
// Remove
// =============================================================================

mod remove_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_remove_by_listed_index() {
        let (_temp, config) = setup();
        let registry = Registry::new(&config);
        for name in ["alpha", "beta"] {
            let request = CreateRequest::new(name)
                .description(format!("{} command", name))
                .source(ScriptSource::Editor);
            saved(registry.create(request, &mut Scripted::editor("true")).unwrap());
        }

        let beta = registry
            .list()
            .unwrap()
            .into_iter()
            .find(|e| e.name == "beta")
            .unwrap();
        let removed = registry.remove(beta.index).unwrap();

        assert_eq!(removed.name, "beta");
        assert_eq!(removed.removed_dirs, vec![config.commands_dir.join("beta")]);
        let names: Vec<_> = registry.list().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["alpha".to_string()]);
        assert!(config.commands_dir.is_dir());
    }
}
