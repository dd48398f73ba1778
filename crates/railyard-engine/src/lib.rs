//! Build orchestration for Railyard: discovery, graph construction, and
//! the per-library build pipeline.

pub mod builder;
pub mod descriptor;
pub mod discover;
pub mod error;
pub mod install;
pub mod orchestrate;
pub mod package;
pub mod pipeline;
pub mod publish;
pub mod sync;
pub mod vcs;

pub use builder::{build_graph, BuildGraph};
pub use descriptor::BuildDescriptor;
pub use discover::discover_libraries;
pub use error::EngineError;
pub use install::LocalStore;
pub use orchestrate::{
    build_all, clean_all, install_one, publish_all, BuildContext, RunOptions, RunOutcome,
};
pub use pipeline::{BuildPipeline, InstallerKind, PipelineState, StepFlags};
pub use publish::RemoteRepository;
pub use vcs::{GitStatus, StatusEntry, StatusProvider};
