use std::sync::Arc;

use crate::{runtime::ContainerRuntime, Detail, DsmResult, ManagerMode, OperationResult};

use super::{fixtures, format};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Image operations: listing, removal and pruning.
pub struct ImageManager {
    mode: ManagerMode,
    runtime: Arc<dyn ContainerRuntime>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ImageManager {
    /// Creates a manager. The mode cannot be changed afterwards.
    pub fn new(mode: ManagerMode, runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { mode, runtime }
    }

    /// The mode fixed at construction.
    pub fn mode(&self) -> ManagerMode {
        self.mode
    }

    /// Lists images. The result carries [`Detail::Images`], possibly empty.
    pub fn list(&self) -> OperationResult {
        match self.mode {
            ManagerMode::Simulated => {
                let records = fixtures::images();
                OperationResult::success_with(
                    fixtures::demo_message(format!("{} images", records.len())),
                    Detail::Images(records),
                )
            }
            ManagerMode::Live => self.live_list().into(),
        }
    }

    /// Removes an image by id or `name:tag`.
    pub fn remove(&self, id: &str, force: bool) -> OperationResult {
        match self.mode {
            ManagerMode::Simulated => {
                OperationResult::success(fixtures::demo_message(format!("removed image {id}")))
            }
            ManagerMode::Live => {
                tracing::debug!("removing image {id} (force={force})");
                self.runtime
                    .remove_image(id, force)
                    .map(|()| OperationResult::success(format!("removed image {id}")))
                    .into()
            }
        }
    }

    /// Removes all dangling images.
    pub fn prune(&self) -> OperationResult {
        match self.mode {
            ManagerMode::Simulated => {
                OperationResult::success(fixtures::demo_message("pruned dangling images"))
            }
            ManagerMode::Live => self
                .runtime
                .prune_images()
                .map(OperationResult::success)
                .into(),
        }
    }

    fn live_list(&self) -> DsmResult<OperationResult> {
        let records: Vec<_> = self
            .runtime
            .list_images()?
            .iter()
            .map(format::image_record)
            .collect();

        Ok(OperationResult::success_with(
            format!("{} images", records.len()),
            Detail::Images(records),
        ))
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
