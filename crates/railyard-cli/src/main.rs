#![forbid(unsafe_code)]

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use railyard_engine::{BuildContext, InstallerKind, RunOptions, RunOutcome};

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "railyard", about = "Build, install, and publish the libraries of a monorepo")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build and install one library and everything it depends on
    Install {
        /// The library to install
        artifact_id: String,
        /// Publish the target library after installing
        #[arg(long)]
        publish: bool,
        /// Upload detached checksum files with each deployed file
        #[arg(long)]
        sign_releases: bool,
        /// Install destination
        #[arg(long, value_enum, default_value_t = InstallerArg::Local)]
        installer: InstallerArg,
        /// Build-output root
        #[arg(long, default_value = "target")]
        target_dir: PathBuf,
    },
    /// Build and install every library in dependency order
    Build {
        /// Publish every library after installing
        #[arg(long)]
        publish: bool,
        /// Upload detached checksum files with each deployed file
        #[arg(long)]
        sign_releases: bool,
        /// Build-output root
        #[arg(long, default_value = "target")]
        target_dir: PathBuf,
    },
    /// Build and publish every library
    Publish {
        /// Upload detached checksum files with each deployed file
        #[arg(long)]
        sign_releases: bool,
        /// Build-output root
        #[arg(long, default_value = "target")]
        target_dir: PathBuf,
    },
    /// Remove every library's build output
    Clean {
        /// Build-output root
        #[arg(long, default_value = "target")]
        target_dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InstallerArg {
    Local,
    Remote,
}

impl From<InstallerArg> for InstallerKind {
    fn from(arg: InstallerArg) -> Self {
        match arg {
            InstallerArg::Local => InstallerKind::Local,
            InstallerArg::Remote => InstallerKind::Remote,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Install {
            artifact_id,
            publish,
            sign_releases,
            installer,
            target_dir,
        } => cmd_install(&artifact_id, publish, sign_releases, installer, target_dir),
        Command::Build {
            publish,
            sign_releases,
            target_dir,
        } => cmd_build(publish, sign_releases, target_dir),
        Command::Publish {
            sign_releases,
            target_dir,
        } => cmd_publish(sign_releases, target_dir),
        Command::Clean { target_dir } => cmd_clean(target_dir),
    };

    if let Err(msg) = result {
        eprintln!("error: {msg}");
        process::exit(1);
    }
}

/// Find the repository root by looking for `railyard.toml` in the current
/// directory.
fn repo_root() -> Result<PathBuf, Box<dyn Error>> {
    let cwd = std::env::current_dir()?;
    if !cwd.join("railyard.toml").exists() {
        return Err(
            "no railyard.toml found in current directory — run from the repository root".into(),
        );
    }
    Ok(cwd)
}

/// Load the workspace config and the process-wide version catalog.
fn open_context(
    root: &std::path::Path,
    options: &RunOptions,
) -> Result<BuildContext<'static>, Box<dyn Error>> {
    let config = railyard_config::WorkspaceConfig::from_path(&root.join("railyard.toml"))?;
    let catalog = railyard_config::catalog::init(&root.join(&config.workspace.catalog))?;
    Ok(BuildContext::open(root, catalog, options)?)
}

fn cmd_install(
    artifact_id: &str,
    publish: bool,
    sign_releases: bool,
    installer: InstallerArg,
    target_dir: PathBuf,
) -> CliResult {
    let root = repo_root()?;
    let options = RunOptions {
        target_dir,
        publish,
        artifact_id: Some(artifact_id.to_owned()),
        sign_releases,
        installer: installer.into(),
    };
    let ctx = open_context(&root, &options)?;

    match railyard_engine::install_one(&ctx, artifact_id, &options)? {
        RunOutcome::Completed(count) => {
            eprintln!("    Finished {count} {}", plural(count));
        }
        RunOutcome::UnknownTarget(name) => {
            eprintln!("library `{name}` not found in this repository — nothing to do");
        }
    }
    Ok(())
}

fn cmd_build(publish: bool, sign_releases: bool, target_dir: PathBuf) -> CliResult {
    let root = repo_root()?;
    let options = RunOptions {
        target_dir,
        publish,
        artifact_id: None,
        sign_releases,
        installer: if publish {
            InstallerKind::Remote
        } else {
            InstallerKind::Local
        },
    };
    let ctx = open_context(&root, &options)?;

    let count = railyard_engine::build_all(&ctx, &options)?;
    eprintln!("    Finished {count} {}", plural(count));
    Ok(())
}

fn cmd_publish(sign_releases: bool, target_dir: PathBuf) -> CliResult {
    let root = repo_root()?;
    let options = RunOptions {
        target_dir,
        publish: true,
        artifact_id: None,
        sign_releases,
        installer: InstallerKind::Remote,
    };
    let ctx = open_context(&root, &options)?;

    let count = railyard_engine::publish_all(&ctx, &options)?;
    eprintln!("   Published {count} {}", plural(count));
    Ok(())
}

fn cmd_clean(target_dir: PathBuf) -> CliResult {
    let root = repo_root()?;
    let options = RunOptions {
        target_dir,
        ..RunOptions::default()
    };
    let ctx = open_context(&root, &options)?;

    let count = railyard_engine::clean_all(&ctx, &options)?;
    eprintln!("     Cleaned {count} {}", plural(count));
    Ok(())
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "library"
    } else {
        "libraries"
    }
}
