//! The menu tree and the pure transition function that drives it.

use std::{
    collections::HashSet,
    fmt::{self, Display},
};

use getset::Getters;

use crate::{health::ReportKind, management::UnitKind, runtime::UnitVerb, DsmError, DsmResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Identifies a menu in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuId {
    /// The root menu.
    Main,

    /// Engine service lifecycle.
    Service,

    /// Activation socket lifecycle.
    Socket,

    /// Container listing, logs, removal and usage.
    Containers,

    /// Image listing and removal.
    Images,

    /// Engine info and privilege check.
    System,

    /// Health reports.
    Health,
}

/// What selecting an option does. Dispatch is a `match` over this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move to another menu.
    Goto(MenuId),

    /// End the session.
    Quit,

    /// Show the state of a unit.
    UnitStatus(UnitKind),

    /// Apply a lifecycle verb to a unit.
    Unit(UnitKind, UnitVerb),

    /// List containers.
    ListContainers {
        /// Include containers that are not running.
        include_stopped: bool,
    },

    /// Prompt for a container and remove it.
    RemoveContainer,

    /// Remove all stopped containers after confirmation.
    PruneContainers,

    /// Pick a container from a numbered list and show its logs.
    ViewContainerLogs,

    /// Show CPU and memory usage of running containers.
    ContainerUsage,

    /// List images.
    ListImages,

    /// Prompt for an image and remove it.
    RemoveImage,

    /// Remove dangling images after confirmation.
    PruneImages,

    /// Show engine version information.
    EngineInfo,

    /// Check whether the user may talk to the engine.
    CheckPrivileges,

    /// Run a health report.
    HealthReport(ReportKind),
}

/// One keyed entry of a menu.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub with_prefix")]
pub struct MenuOption {
    /// Single-character key, matched case-insensitively.
    key: char,

    /// Text shown next to the key.
    description: String,

    /// What the option does.
    action: Action,
}

/// A menu: a title and an ordered list of options.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub with_prefix")]
pub struct MenuNode {
    /// Identifier used by transitions.
    id: MenuId,

    /// Heading shown above the options.
    title: String,

    /// Options in display order.
    options: Vec<MenuOption>,
}

/// The registry of menus a session navigates.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub with_prefix")]
pub struct MenuTree {
    /// The menu a session starts in.
    root: MenuId,

    /// Every registered menu.
    nodes: Vec<MenuNode>,
}

/// Driver-owned session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    /// The menu currently shown.
    pub current: MenuId,

    /// False once the session has been asked to end.
    pub running: bool,
}

/// What the driver must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The input matched no option. The menu did not change.
    InvalidChoice,

    /// The session moved to another menu.
    Navigate(MenuId),

    /// Run an action. The menu did not change.
    Perform(Action),

    /// The session has ended.
    Terminate,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl MenuId {
    /// Every menu identifier.
    pub const ALL: [MenuId; 7] = [
        MenuId::Main,
        MenuId::Service,
        MenuId::Socket,
        MenuId::Containers,
        MenuId::Images,
        MenuId::System,
        MenuId::Health,
    ];

    /// The menu's registry name.
    pub fn name(&self) -> &'static str {
        match self {
            MenuId::Main => "main",
            MenuId::Service => "service",
            MenuId::Socket => "socket",
            MenuId::Containers => "container",
            MenuId::Images => "image",
            MenuId::System => "info",
            MenuId::Health => "health",
        }
    }
}

impl MenuOption {
    /// Creates an option.
    pub fn new(key: char, description: impl Into<String>, action: Action) -> Self {
        Self {
            key,
            description: description.into(),
            action,
        }
    }

    /// Returns whether `input` selects this option.
    pub fn matches(&self, input: &str) -> bool {
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_lowercase().eq(self.key.to_lowercase()),
            _ => false,
        }
    }
}

impl MenuNode {
    /// Creates a menu.
    pub fn new(id: MenuId, title: impl Into<String>, options: Vec<MenuOption>) -> Self {
        Self {
            id,
            title: title.into(),
            options,
        }
    }

    /// The menu's registry name.
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    /// Returns the option selected by `input`, if any.
    pub fn find(&self, input: &str) -> Option<&MenuOption> {
        self.options.iter().find(|option| option.matches(input))
    }
}

impl MenuTree {
    /// Creates a tree without checking it. See [`MenuTree::validate`].
    pub fn new(root: MenuId, nodes: Vec<MenuNode>) -> Self {
        Self { root, nodes }
    }

    /// The console's menus.
    pub fn standard() -> Self {
        use Action::*;

        let back = || MenuOption::new('b', "Back to Main Menu", Goto(MenuId::Main));
        let quit = || MenuOption::new('q', "Quit", Quit);

        let nodes = vec![
            MenuNode::new(
                MenuId::Main,
                "Main Menu",
                vec![
                    MenuOption::new('1', "Service Management", Goto(MenuId::Service)),
                    MenuOption::new('2', "Socket Management", Goto(MenuId::Socket)),
                    MenuOption::new('3', "Container Management", Goto(MenuId::Containers)),
                    MenuOption::new('4', "Image Management", Goto(MenuId::Images)),
                    MenuOption::new('5', "System Information", Goto(MenuId::System)),
                    MenuOption::new('6', "Health Reports", Goto(MenuId::Health)),
                    quit(),
                ],
            ),
            MenuNode::new(
                MenuId::Service,
                "Service Management",
                vec![
                    MenuOption::new('1', "Check Service Status", UnitStatus(UnitKind::Service)),
                    MenuOption::new('2', "Start Service", Unit(UnitKind::Service, UnitVerb::Start)),
                    MenuOption::new('3', "Stop Service", Unit(UnitKind::Service, UnitVerb::Stop)),
                    MenuOption::new(
                        '4',
                        "Restart Service",
                        Unit(UnitKind::Service, UnitVerb::Restart),
                    ),
                    MenuOption::new('5', "Enable Service", Unit(UnitKind::Service, UnitVerb::Enable)),
                    MenuOption::new(
                        '6',
                        "Disable Service",
                        Unit(UnitKind::Service, UnitVerb::Disable),
                    ),
                    back(),
                    quit(),
                ],
            ),
            MenuNode::new(
                MenuId::Socket,
                "Socket Management",
                vec![
                    MenuOption::new('1', "Check Socket Status", UnitStatus(UnitKind::Socket)),
                    MenuOption::new('2', "Start Socket", Unit(UnitKind::Socket, UnitVerb::Start)),
                    MenuOption::new('3', "Stop Socket", Unit(UnitKind::Socket, UnitVerb::Stop)),
                    MenuOption::new('4', "Enable Socket", Unit(UnitKind::Socket, UnitVerb::Enable)),
                    MenuOption::new('5', "Disable Socket", Unit(UnitKind::Socket, UnitVerb::Disable)),
                    back(),
                    quit(),
                ],
            ),
            MenuNode::new(
                MenuId::Containers,
                "Container Management",
                vec![
                    MenuOption::new(
                        '1',
                        "List Running Containers",
                        ListContainers {
                            include_stopped: false,
                        },
                    ),
                    MenuOption::new(
                        '2',
                        "List All Containers",
                        ListContainers {
                            include_stopped: true,
                        },
                    ),
                    MenuOption::new('3', "View Container Logs", ViewContainerLogs),
                    MenuOption::new('4', "Remove Container", RemoveContainer),
                    MenuOption::new('5', "Prune Stopped Containers", PruneContainers),
                    MenuOption::new('6', "Visualize Container Usage", ContainerUsage),
                    back(),
                    quit(),
                ],
            ),
            MenuNode::new(
                MenuId::Images,
                "Image Management",
                vec![
                    MenuOption::new('1', "List Images", ListImages),
                    MenuOption::new('2', "Remove Image", RemoveImage),
                    MenuOption::new('3', "Prune Dangling Images", PruneImages),
                    back(),
                    quit(),
                ],
            ),
            MenuNode::new(
                MenuId::System,
                "System Information",
                vec![
                    MenuOption::new('1', "Show Docker Info", EngineInfo),
                    MenuOption::new('2', "Check Privileges", CheckPrivileges),
                    back(),
                    quit(),
                ],
            ),
            MenuNode::new(
                MenuId::Health,
                "Health Reports",
                vec![
                    MenuOption::new('1', "Full Health Report", HealthReport(ReportKind::Full)),
                    MenuOption::new('2', "Quick Health Report", HealthReport(ReportKind::Quick)),
                    back(),
                    quit(),
                ],
            ),
        ];

        Self::new(MenuId::Main, nodes)
    }

    /// Returns the menu registered under `id`.
    pub fn node(&self, id: MenuId) -> Option<&MenuNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// The menu a fresh session starts in.
    pub fn initial_state(&self) -> SessionState {
        SessionState {
            current: self.root,
            running: true,
        }
    }

    /// Checks the structural invariants of the tree.
    ///
    /// - every menu is registered once and the root is registered
    /// - every `Goto` target is registered
    /// - keys are unique within a menu, ignoring case
    /// - every menu offers `Quit`
    pub fn validate(&self) -> DsmResult<()> {
        let mut ids = HashSet::new();
        for node in &self.nodes {
            if !ids.insert(node.id) {
                return Err(DsmError::InvalidMenuTree(format!(
                    "menu {} is registered twice",
                    node.name()
                )));
            }
        }

        if !ids.contains(&self.root) {
            return Err(DsmError::InvalidMenuTree(format!(
                "root menu {} is not registered",
                self.root.name()
            )));
        }

        for node in &self.nodes {
            let mut keys = HashSet::new();
            for option in &node.options {
                let key: String = option.key.to_lowercase().collect();
                if !keys.insert(key) {
                    return Err(DsmError::InvalidMenuTree(format!(
                        "key {} appears twice in menu {}",
                        option.key,
                        node.name()
                    )));
                }

                if let Action::Goto(target) = option.action {
                    if !ids.contains(&target) {
                        return Err(DsmError::InvalidMenuTree(format!(
                            "menu {} links to unregistered menu {}",
                            node.name(),
                            target.name()
                        )));
                    }
                }
            }

            if !node.options.iter().any(|o| o.action == Action::Quit) {
                return Err(DsmError::InvalidMenuTree(format!(
                    "menu {} has no quit option",
                    node.name()
                )));
            }
        }

        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Computes the next session state for one line of normalized input.
///
/// Unmatched input, including the empty string, never changes the current menu.
pub fn dispatch(tree: &MenuTree, state: SessionState, input: &str) -> (SessionState, Effect) {
    if !state.running {
        return (state, Effect::Terminate);
    }

    let Some(option) = tree.node(state.current).and_then(|node| node.find(input)) else {
        return (state, Effect::InvalidChoice);
    };

    match option.action {
        Action::Goto(target) => (
            SessionState {
                current: target,
                ..state
            },
            Effect::Navigate(target),
        ),
        Action::Quit => (
            SessionState {
                running: false,
                ..state
            },
            Effect::Terminate,
        ),
        action => (state, Effect::Perform(action)),
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
