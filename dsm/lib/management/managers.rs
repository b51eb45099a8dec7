use std::sync::Arc;

use crate::{
    config::DsmConfig,
    health::HealthReporter,
    runtime::{ContainerRuntime, DockerCli, ServiceController, Systemctl},
    ManagerMode,
};

use super::{ContainerManager, ImageManager, SystemManager, UnitKind, UnitManager};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Every manager a console session needs, all sharing one mode.
pub struct Managers {
    /// The engine service.
    pub service: UnitManager,

    /// The engine's activation socket.
    pub socket: UnitManager,

    /// Containers.
    pub containers: ContainerManager,

    /// Images.
    pub images: ImageManager,

    /// Engine and privilege information.
    pub system: SystemManager,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Managers {
    /// Builds the managers over the given collaborators.
    pub fn new(
        config: &DsmConfig,
        mode: ManagerMode,
        runtime: Arc<dyn ContainerRuntime>,
        controller: Arc<dyn ServiceController>,
    ) -> Self {
        Self {
            service: UnitManager::new(
                UnitKind::Service,
                config.get_service_unit(),
                mode,
                controller.clone(),
            ),
            socket: UnitManager::new(UnitKind::Socket, config.get_socket_unit(), mode, controller),
            containers: ContainerManager::new(mode, runtime.clone()),
            images: ImageManager::new(mode, runtime.clone()),
            system: SystemManager::new(mode, runtime),
        }
    }

    /// Builds the managers over the `docker` and `systemctl` binaries named in `config`.
    pub fn from_config(config: &DsmConfig, mode: ManagerMode) -> Self {
        let runtime = Arc::new(DockerCli::new(config.get_docker_bin()));
        let controller = Arc::new(Systemctl::new(config.get_systemctl_bin()));
        Self::new(config, mode, runtime, controller)
    }

    /// The mode shared by all managers.
    pub fn mode(&self) -> ManagerMode {
        self.service.mode()
    }

    /// Returns the unit manager for `kind`.
    pub fn unit(&self, kind: UnitKind) -> &UnitManager {
        match kind {
            UnitKind::Service => &self.service,
            UnitKind::Socket => &self.socket,
        }
    }

    /// A health reporter over these managers.
    pub fn reporter(&self) -> HealthReporter<'_> {
        HealthReporter::new(
            &self.service,
            &self.socket,
            &self.containers,
            &self.images,
            &self.system,
        )
    }
}
