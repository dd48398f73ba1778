//! The per-library build pipeline state machine.

use railyard_config::VersionCatalog;
use railyard_util::fs::remove_dir_if_present;

use crate::descriptor::BuildDescriptor;
use crate::error::EngineError;
use crate::install::LocalStore;
use crate::package::package_library;
use crate::publish::RemoteRepository;
use crate::sync::sync_manifest;
use crate::vcs::StatusProvider;

/// Destination of the artifact-placement stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InstallerKind {
    /// The local artifact store under `~/.railyard/store`.
    #[default]
    Local,
    /// The configured remote repository. Placement happens in the Publish
    /// step, so this kind is only paired with a publishing run.
    Remote,
}

/// Per-run step switches for one library.
#[derive(Debug, Clone, Copy)]
pub struct StepFlags {
    /// Whether this library's run publishes. Gates the working-tree check
    /// and the Publish step.
    pub publish: bool,
    /// Upload detached checksum files alongside deployed files.
    pub sign_releases: bool,
    /// Install destination.
    pub installer: InstallerKind,
}

/// Pipeline progress for one library.
///
/// `Published`, `Skipped`, and `Aborted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Discovered,
    Synced,
    Gated,
    Cleaned,
    Packaged,
    Installed,
    Published,
    Skipped,
    Aborted,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Published | Self::Skipped | Self::Aborted)
    }
}

/// Shared collaborators a pipeline runs against.
pub struct PipelineContext<'a> {
    /// The repository's shared group identifier.
    pub group: &'a str,
    pub catalog: &'a VersionCatalog,
    pub status: &'a dyn StatusProvider,
    pub store: &'a LocalStore,
    pub remote: Option<&'a RemoteRepository>,
}

/// Strictly sequential build pipeline for one library.
///
/// Steps run in fixed order: Sync, Gate (publishing runs only), Clean,
/// Package, Install, Publish (publishing runs only). The gate always runs
/// before Clean. The first failing step aborts the run; earlier steps are
/// not rolled back.
pub struct BuildPipeline<'a> {
    descriptor: &'a BuildDescriptor,
    flags: StepFlags,
    state: PipelineState,
}

impl<'a> BuildPipeline<'a> {
    pub fn new(descriptor: &'a BuildDescriptor, flags: StepFlags) -> Self {
        Self {
            descriptor,
            flags,
            state: PipelineState::Discovered,
        }
    }

    /// The current pipeline state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run the pipeline to its terminal state.
    ///
    /// # Errors
    /// Returns the first step's error; the pipeline lands in
    /// `PipelineState::Aborted`.
    pub fn run(&mut self, ctx: &PipelineContext<'_>) -> Result<PipelineState, EngineError> {
        match self.advance(ctx) {
            Ok(state) => Ok(state),
            Err(e) => {
                self.state = PipelineState::Aborted;
                Err(e)
            }
        }
    }

    fn advance(&mut self, ctx: &PipelineContext<'_>) -> Result<PipelineState, EngineError> {
        // 1. Sync: reconcile sibling dependency references. Always runs.
        sync_manifest(&self.descriptor.manifest_path, ctx.group, ctx.catalog)?;
        self.state = PipelineState::Synced;

        // 2. Gate: publishing runs only, and always before Clean. Tracked
        //    changes abort the run; untracked files are exempt.
        if self.flags.publish {
            let entries = ctx.status.status()?;
            let dirty: Vec<String> = entries
                .into_iter()
                .filter(|entry| !entry.is_untracked())
                .map(|entry| entry.path)
                .collect();
            if !dirty.is_empty() {
                return Err(EngineError::DirtyWorkingTree { paths: dirty });
            }
            self.state = PipelineState::Gated;
        }

        // 3. Clean: drop the previous build output.
        remove_dir_if_present(&self.descriptor.target_dir)?;
        self.state = PipelineState::Cleaned;

        // 4. Package: descriptor + artifact at their derived paths.
        package_library(self.descriptor)?;
        self.state = PipelineState::Packaged;

        // 5. Install. The remote destination is written by the Publish
        //    step, so a remote installer places nothing here.
        if self.flags.installer == InstallerKind::Local {
            ctx.store.install(self.descriptor)?;
        }
        self.state = PipelineState::Installed;

        // 6. Publish: only when this specific library is flagged.
        if self.flags.publish {
            let remote = ctx.remote.ok_or(EngineError::NoRemote)?;
            remote.deploy(self.descriptor, self.flags.sign_releases)?;
            self.state = PipelineState::Published;
        } else {
            self.state = PipelineState::Skipped;
        }

        Ok(self.state)
    }
}
