use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for orbfield")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand, Clone, Copy)]
enum Task {
    /// Run the full gate: fmt, clippy, tests, deny, doc
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy with warnings denied
    Clippy,
    /// Run all tests
    Test,
    /// Run cargo deny check
    Deny,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
}

impl Task {
    fn cargo_args(self) -> &'static [&'static str] {
        match self {
            Task::Check => unreachable!("check fans out to the other tasks"),
            Task::Fmt => &["fmt", "--all", "--", "--check"],
            Task::Clippy => &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
            Task::Test => &["test", "--workspace"],
            Task::Deny => &["deny", "check", "licenses", "bans", "sources"],
            Task::Doc => &["doc", "--workspace", "--no-deps"],
            Task::Build => &["build", "--workspace"],
        }
    }

    fn run(self) -> Result<()> {
        let args = self.cargo_args();
        println!("==> cargo {}", args.join(" "));
        let status = Command::new("cargo").args(args).status()?;
        if !status.success() {
            bail!("cargo {} failed", args[0]);
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Task::Check => {
            for task in [Task::Fmt, Task::Clippy, Task::Test, Task::Deny, Task::Doc] {
                task.run()?;
            }
        }
        task => task.run()?,
    }

    Ok(())
}
