//! Operation modes composed from discovery, graph construction, and the
//! build pipeline.

use std::path::{Path, PathBuf};

use railyard_config::{VersionCatalog, WorkspaceConfig};
use railyard_graph::{transitive_dependencies, topological_order, DependencyGraph, LibraryId};
use railyard_util::fs::remove_dir_if_present;

use crate::builder::build_graph;
use crate::descriptor::{BuildDescriptor, BuildPaths};
use crate::discover::discover_libraries;
use crate::error::EngineError;
use crate::install::LocalStore;
use crate::pipeline::{BuildPipeline, InstallerKind, PipelineContext, StepFlags};
use crate::publish::RemoteRepository;
use crate::vcs::{GitStatus, StatusProvider};

/// Repository-level workspace config filename.
pub const WORKSPACE_FILE: &str = "railyard.toml";

/// Recognized options for every operation mode.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Build-output root to clean/write under, relative to the repo root
    /// unless absolute.
    pub target_dir: PathBuf,
    /// Enable the Publish step where applicable.
    pub publish: bool,
    /// Target library for install-one; ignored by the batch modes.
    pub artifact_id: Option<String>,
    /// Upload detached checksum files with each deployed file.
    pub sign_releases: bool,
    /// Install destination. Defaults to local; forced to remote for
    /// publishing libraries.
    pub installer: InstallerKind,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from("target"),
            publish: false,
            artifact_id: None,
            sign_releases: false,
            installer: InstallerKind::Local,
        }
    }
}

/// How an operation finished.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The operation processed this many libraries.
    Completed(usize),
    /// The named target library does not exist. Recoverable: the caller
    /// reports it and exits cleanly.
    UnknownTarget(String),
}

/// One invocation's wiring: configuration, derived paths, and the shared
/// collaborators every pipeline runs against.
///
/// Created at the start of each invocation and discarded at the end.
pub struct BuildContext<'a> {
    pub config: WorkspaceConfig,
    pub paths: BuildPaths,
    pub catalog: &'a VersionCatalog,
    pub store: LocalStore,
    pub status: Box<dyn StatusProvider>,
    pub remote: Option<RemoteRepository>,
}

impl<'a> BuildContext<'a> {
    /// Open the repository at `repo_root` with default wiring: git status,
    /// the default local store, and the configured remote (if any).
    ///
    /// # Errors
    /// Returns an error if `railyard.toml` cannot be loaded or the store
    /// location cannot be determined.
    pub fn open(
        repo_root: &Path,
        catalog: &'a VersionCatalog,
        options: &RunOptions,
    ) -> Result<Self, EngineError> {
        let config = WorkspaceConfig::from_path(&repo_root.join(WORKSPACE_FILE))?;
        let target_root = if options.target_dir.is_absolute() {
            options.target_dir.clone()
        } else {
            repo_root.join(&options.target_dir)
        };
        let paths = BuildPaths {
            repo_root: repo_root.to_path_buf(),
            libs_root: repo_root.join(&config.workspace.libraries),
            target_root,
        };
        let remote = config
            .repository
            .as_ref()
            .map(|r| RemoteRepository::new(&r.url));
        Ok(Self {
            paths,
            catalog,
            store: LocalStore::open_default()?,
            status: Box::new(GitStatus::new(repo_root)),
            remote,
            config,
        })
    }

    fn pipeline_context(&self) -> PipelineContext<'_> {
        PipelineContext {
            group: &self.config.workspace.group,
            catalog: self.catalog,
            status: self.status.as_ref(),
            store: &self.store,
            remote: self.remote.as_ref(),
        }
    }

    fn derive(&self, id: &LibraryId) -> Result<BuildDescriptor, EngineError> {
        BuildDescriptor::derive(&self.config.workspace.group, id, self.catalog, &self.paths)
    }
}

/// The ordered `(library, publish)` plan for a single-target install.
///
/// Every transitive prerequisite runs with publishing disabled regardless
/// of the global flag — only the requested target may publish. The
/// prerequisites keep their topological order.
pub fn installation_plan(
    graph: &DependencyGraph,
    target: &LibraryId,
    publish: bool,
) -> Vec<(LibraryId, bool)> {
    let closure = transitive_dependencies(graph, target);
    let mut plan: Vec<(LibraryId, bool)> = topological_order(graph)
        .into_iter()
        .filter(|id| closure.contains(id))
        .map(|id| (id, false))
        .collect();
    plan.push((target.clone(), publish));
    plan
}

/// Build and install one library and everything it depends on.
///
/// An unknown target is reported through `RunOutcome::UnknownTarget`, not
/// an error.
///
/// # Errors
/// Returns the first pipeline or graph error; the remaining sequence is
/// abandoned.
pub fn install_one(
    ctx: &BuildContext<'_>,
    target_name: &str,
    options: &RunOptions,
) -> Result<RunOutcome, EngineError> {
    validate_installer(options)?;
    let libraries = discover_libraries(&ctx.paths.libs_root)?;
    let target = LibraryId::new(target_name);
    if !libraries.contains(&target) {
        return Ok(RunOutcome::UnknownTarget(target_name.to_owned()));
    }

    let build = build_graph(&ctx.paths.libs_root, &libraries, &ctx.config.workspace.group)?;
    let plan = installation_plan(&build.graph, &target, options.publish);
    let pctx = ctx.pipeline_context();

    for (id, publish) in &plan {
        let descriptor = ctx.derive(id)?;
        announce(if *publish { "Publishing" } else { "Building" }, &descriptor);
        BuildPipeline::new(&descriptor, step_flags(options, *publish)).run(&pctx)?;
    }
    Ok(RunOutcome::Completed(plan.len()))
}

/// Run `action` on every library in topological order.
///
/// Returns the number of libraries processed. The first error halts the
/// remaining sequence.
///
/// # Errors
/// Returns discovery, graph, descriptor, or `action` errors.
pub fn for_all<F>(ctx: &BuildContext<'_>, mut action: F) -> Result<usize, EngineError>
where
    F: FnMut(&BuildDescriptor) -> Result<(), EngineError>,
{
    let libraries = discover_libraries(&ctx.paths.libs_root)?;
    let build = build_graph(&ctx.paths.libs_root, &libraries, &ctx.config.workspace.group)?;
    let order = topological_order(&build.graph);

    for id in &order {
        let descriptor = ctx.derive(id)?;
        action(&descriptor)?;
    }
    Ok(order.len())
}

/// Run the full pipeline on every library with a uniform publish flag.
///
/// Unlike install-one, publishing here is intentionally uniform: every
/// library publishes when the flag is set.
///
/// # Errors
/// Returns the first pipeline or graph error.
pub fn build_all(ctx: &BuildContext<'_>, options: &RunOptions) -> Result<usize, EngineError> {
    validate_installer(options)?;
    let pctx = ctx.pipeline_context();
    for_all(ctx, |descriptor| {
        announce(
            if options.publish { "Publishing" } else { "Building" },
            descriptor,
        );
        BuildPipeline::new(descriptor, step_flags(options, options.publish))
            .run(&pctx)
            .map(|_| ())
    })
}

/// Build and publish every library.
///
/// # Errors
/// Returns the first pipeline or graph error.
pub fn publish_all(ctx: &BuildContext<'_>, options: &RunOptions) -> Result<usize, EngineError> {
    let mut opts = options.clone();
    opts.publish = true;
    opts.installer = InstallerKind::Remote;
    build_all(ctx, &opts)
}

/// Remove every library's build-output directory.
///
/// # Errors
/// Returns the first filesystem or graph error.
pub fn clean_all(ctx: &BuildContext<'_>, _options: &RunOptions) -> Result<usize, EngineError> {
    for_all(ctx, |descriptor| {
        announce("Cleaning", descriptor);
        remove_dir_if_present(&descriptor.target_dir).map_err(EngineError::from)
    })
}

/// Effective step switches for one library's run. Publishing forces the
/// remote install destination.
fn step_flags(options: &RunOptions, publish: bool) -> StepFlags {
    StepFlags {
        publish,
        sign_releases: options.sign_releases,
        installer: if publish {
            InstallerKind::Remote
        } else {
            InstallerKind::Local
        },
    }
}

fn validate_installer(options: &RunOptions) -> Result<(), EngineError> {
    if options.installer == InstallerKind::Remote && !options.publish {
        return Err(EngineError::RemoteInstallerRequiresPublish);
    }
    Ok(())
}

fn announce(verb: &str, descriptor: &BuildDescriptor) {
    eprintln!(
        "    {verb} {} v{}",
        descriptor.id, descriptor.artifact.version
    );
}
