use std::io::{BufRead, Write};

use crate::{
    cli::AnsiStyles,
    config::DsmConfig,
    health::ReportKind,
    management::Managers,
    DsmResult, ManagerMode, OperationResult,
};

use super::{
    menu::{self, Action, Effect, MenuId, MenuTree, SessionState},
    render,
};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Status shown when the input matches no option.
pub const INVALID_CHOICE: &str = "Invalid choice";

/// Status shown when the session ends normally.
pub const GOODBYE: &str = "Goodbye!";

/// Prefix of the status shown when an action fails outside its manager.
pub const ACTION_ERROR: &str = "Error executing action";

/// Status for a container selection outside the listed range.
pub const INVALID_CONTAINER_NUMBER: &str = "Invalid container number";

/// Status for a container selection that is not a number.
pub const INVALID_INPUT: &str = "Invalid input";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The interactive console.
///
/// Owns the [`SessionState`] and runs the render, read and dispatch loop over any buffered
/// reader and writer, so sessions can be driven from memory in tests.
pub struct Console<R, W> {
    input: R,
    output: W,
    managers: Managers,
    tree: MenuTree,
    state: SessionState,
    shown: Option<MenuId>,
    default_log_tail: usize,
    pause_after_output: bool,
    clear_screen: bool,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<R, W> Console<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Creates a console over prepared managers and the standard menu tree.
    pub fn new(config: &DsmConfig, managers: Managers, input: R, output: W) -> Self {
        let tree = MenuTree::standard();
        Self {
            input,
            output,
            managers,
            state: tree.initial_state(),
            tree,
            shown: None,
            default_log_tail: *config.get_default_log_tail(),
            pause_after_output: *config.get_pause_after_output(),
            clear_screen: *config.get_clear_screen()
                && dsmutils::term::is_ansi_interactive_terminal(),
        }
    }

    /// Creates a console whose managers use the binaries named in `config`.
    pub fn from_config(config: &DsmConfig, mode: ManagerMode, input: R, output: W) -> Self {
        Self::new(config, Managers::from_config(config, mode), input, output)
    }

    /// Replaces the menu tree. It is validated when the session starts.
    pub fn with_tree(mut self, tree: MenuTree) -> Self {
        self.state = tree.initial_state();
        self.tree = tree;
        self
    }

    /// The current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Consumes the console and returns its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the session until the operator quits or the input ends.
    ///
    /// Failures inside an action are reported and the session continues. An `Err` means the
    /// console itself could not go on, e.g. the menu tree is malformed or the output is gone.
    pub fn run(&mut self) -> DsmResult<()> {
        self.tree.validate()?;
        tracing::info!("session started in {} mode", self.managers.mode());

        while self.state.running {
            self.render_menu()?;

            let Some(line) = self.read_line()? else {
                tracing::debug!("input closed, ending session");
                self.state.running = false;
                self.write(&format!("\n{}\n", GOODBYE.valid()))?;
                break;
            };

            let choice = line.trim().to_lowercase();
            let (next, effect) = menu::dispatch(&self.tree, self.state, &choice);
            tracing::trace!("menu {}: {choice:?} -> {effect:?}", self.state.current);
            self.state = next;

            match effect {
                Effect::InvalidChoice => self.write_line(&INVALID_CHOICE.invalid())?,
                Effect::Navigate(target) => tracing::debug!("entering menu {target}"),
                Effect::Terminate => self.write_line(&GOODBYE.valid())?,
                Effect::Perform(action) => {
                    if let Err(e) = self.perform(action) {
                        tracing::warn!("{action:?} failed: {e}");
                        self.write_line(&format!("{ACTION_ERROR}: {e}").invalid())?;
                    }
                }
            }
        }

        tracing::info!("session ended");
        Ok(())
    }

    fn perform(&mut self, action: Action) -> DsmResult<()> {
        match action {
            Action::Goto(_) | Action::Quit => Ok(()),
            Action::UnitStatus(kind) => {
                let result = self.managers.unit(kind).status();
                self.show(&result)
            }
            Action::Unit(kind, verb) => {
                let result = self.managers.unit(kind).apply(verb);
                self.show(&result)
            }
            Action::ListContainers { include_stopped } => {
                let title = if include_stopped {
                    "All Containers"
                } else {
                    "Running Containers"
                };
                self.write(&render::section(title))?;
                let result = self.managers.containers.list(include_stopped);
                self.show(&result)
            }
            Action::RemoveContainer => {
                let Some(id) = self.prompt("Enter container ID or name: ")? else {
                    return Ok(());
                };
                let force = self.confirm("Force removal?")?;
                let result = self.managers.containers.remove(&id, force);
                self.show(&result)
            }
            Action::PruneContainers => {
                if !self.confirm("Remove all stopped containers?")? {
                    return self.write_line("Prune cancelled");
                }
                let result = self.managers.containers.prune();
                self.show(&result)
            }
            Action::ViewContainerLogs => self.view_logs(),
            Action::ContainerUsage => {
                self.write(&render::section("Container Resource Usage"))?;
                let result = self.managers.containers.usage();
                self.show(&result)
            }
            Action::ListImages => {
                self.write(&render::section("Images"))?;
                let result = self.managers.images.list();
                self.show(&result)
            }
            Action::RemoveImage => {
                let Some(id) = self.prompt("Enter image ID or name: ")? else {
                    return Ok(());
                };
                let force = self.confirm("Force removal?")?;
                let result = self.managers.images.remove(&id, force);
                self.show(&result)
            }
            Action::PruneImages => {
                if !self.confirm("Remove all dangling images?")? {
                    return self.write_line("Prune cancelled");
                }
                let result = self.managers.images.prune();
                self.show(&result)
            }
            Action::EngineInfo => {
                self.write(&render::section("Docker Information"))?;
                let result = self.managers.system.engine_info();
                self.show(&result)
            }
            Action::CheckPrivileges => {
                let result = self.managers.system.privileges();
                self.show(&result)
            }
            Action::HealthReport(kind) => {
                let title = match kind {
                    ReportKind::Full => "Full Health Report",
                    ReportKind::Quick => "Quick Health Report",
                };
                let report = self.managers.reporter().report(kind);
                self.write(&render::section(title))?;
                self.write(&render::health_report(&report))?;
                self.pause()
            }
        }
    }

    fn view_logs(&mut self) -> DsmResult<()> {
        let listing = self.managers.containers.list(true);
        let Some(containers) = listing.containers() else {
            return self.show(&listing);
        };

        if containers.is_empty() {
            return self.write_line("No containers found");
        }

        self.write(&render::section("Available Containers"))?;
        self.write(&render::numbered(
            containers
                .iter()
                .map(|c| (c.get_name().as_str(), c.get_status().as_str())),
        ))?;

        let Some(choice) = self.prompt("\nEnter container number (or 'b' to go back): ")? else {
            return Ok(());
        };
        if choice.eq_ignore_ascii_case("b") {
            return Ok(());
        }

        let Ok(number) = choice.parse::<usize>() else {
            return self.show(&OperationResult::failure(INVALID_INPUT));
        };
        let Some(container) = number.checked_sub(1).and_then(|i| containers.get(i)) else {
            return self.show(&OperationResult::failure(INVALID_CONTAINER_NUMBER));
        };

        let lines = self.prompt(&format!(
            "Enter number of lines to show (default: {}): ",
            self.default_log_tail
        ))?;
        let tail = lines
            .and_then(|l| l.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(self.default_log_tail);

        let result = self.managers.containers.logs(container.get_id(), tail);
        self.show(&result)
    }

    /// Prints a result's payload and outcome. Successful inspections wait for Enter.
    fn show(&mut self, result: &OperationResult) -> DsmResult<()> {
        if let Some(detail) = result.detail() {
            self.write(&render::detail(detail, self.managers.mode()))?;
        }
        self.write_line(&render::outcome(result))?;

        if result.succeeded() && result.detail().is_some() {
            self.pause()?;
        }
        Ok(())
    }

    fn render_menu(&mut self) -> DsmResult<()> {
        let Some(node) = self.tree.node(self.state.current) else {
            return Err(crate::DsmError::InvalidMenuTree(format!(
                "menu {} is not registered",
                self.state.current
            )));
        };

        let mut screen = String::new();
        if self.clear_screen && self.shown != Some(self.state.current) {
            screen.push_str(dsmutils::term::CLEAR_SCREEN);
        }
        screen.push_str(&render::banner(self.managers.mode()));
        screen.push_str(&render::menu(node));
        screen.push('\n');
        screen.push_str(&render::CHOICE_PROMPT.placeholder());

        self.shown = Some(self.state.current);
        self.write(&screen)
    }

    fn pause(&mut self) -> DsmResult<()> {
        if !self.pause_after_output {
            return Ok(());
        }

        self.write(&format!("\n{}", render::PAUSE_PROMPT.placeholder()))?;
        self.read_line()?;
        Ok(())
    }

    fn confirm(&mut self, question: &str) -> DsmResult<bool> {
        let answer = self.prompt(&format!("{question} [y/N]: "))?;
        Ok(matches!(
            answer.map(|a| a.to_lowercase()).as_deref(),
            Some("y" | "yes")
        ))
    }

    /// Prints `text` and reads the trimmed answer. `None` when the input has ended.
    fn prompt(&mut self, text: &str) -> DsmResult<Option<String>> {
        self.write(&text.placeholder())?;
        Ok(self.read_line()?.map(|line| line.trim().to_string()))
    }

    /// Reads one line. Bytes that are not UTF-8 are replaced, so a garbled line is still
    /// just an unmatched choice.
    fn read_line(&mut self) -> DsmResult<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    fn write_line(&mut self, text: &str) -> DsmResult<()> {
        self.write(&format!("{text}\n"))
    }

    fn write(&mut self, text: &str) -> DsmResult<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::console::{MenuNode, MenuOption};

    use super::*;

    fn quiet_config() -> DsmConfig {
        DsmConfig::builder()
            .pause_after_output(false)
            .clear_screen(false)
            .build()
    }

    fn session(input: impl AsRef<[u8]>) -> (SessionState, String) {
        let config = quiet_config();
        let mut console = Console::from_config(
            &config,
            ManagerMode::Simulated,
            Cursor::new(input.as_ref().to_vec()),
            Vec::new(),
        );
        console.run().expect("session");
        let state = console.state();
        let output = String::from_utf8(console.into_output()).expect("utf-8 output");
        (state, output)
    }

    #[test_log::test]
    fn test_end_of_input_quits_cleanly() {
        let (state, output) = session("");
        assert!(!state.running);
        assert!(output.contains(GOODBYE));
        assert!(output.contains("Main Menu"));
    }

    #[test]
    fn test_empty_line_is_an_invalid_choice() {
        let (state, output) = session("\nq\n");
        assert_eq!(state.current, MenuId::Main);
        assert_eq!(output.matches(INVALID_CHOICE).count(), 1);
    }

    #[test]
    fn test_non_utf8_line_is_an_invalid_choice() {
        let (state, output) = session(b"\xff\xfe\n3\n\xc3\n1\nq\n");
        assert!(!state.running);
        assert_eq!(state.current, MenuId::Containers);
        assert_eq!(output.matches(INVALID_CHOICE).count(), 2);
        assert!(output.contains("web-server"));
    }

    #[test]
    fn test_uppercase_input_is_normalized() {
        let (state, output) = session("5\n  1 \nQ\n");
        assert_eq!(state.current, MenuId::System);
        assert!(output.contains("24.0.0"));
        assert!(!output.contains(INVALID_CHOICE));
    }

    #[test]
    fn test_prune_requires_confirmation() {
        let (_, output) = session("3\n5\nn\n5\ny\nq\n");
        assert!(output.contains("Prune cancelled"));
        assert!(output.contains("pruned stopped containers (demo)"));
    }

    #[test]
    fn test_malformed_tree_is_fatal() {
        let config = quiet_config();
        let tree = MenuTree::new(
            MenuId::Main,
            vec![MenuNode::new(
                MenuId::Main,
                "Main Menu",
                vec![MenuOption::new('1', "Service", Action::Goto(MenuId::Service))],
            )],
        );
        let mut console = Console::from_config(
            &config,
            ManagerMode::Simulated,
            Cursor::new("q\n"),
            Vec::new(),
        )
        .with_tree(tree);

        assert!(matches!(
            console.run(),
            Err(crate::DsmError::InvalidMenuTree(_))
        ));
    }
}
