use std::io;
use std::process::Command;

/// Captured result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Text worth showing to the operator when the command failed.
    pub fn diagnostics(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// Blocking invocation of an external program.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        (**self).run(program, args)
    }
}

/// Runs commands on the local system, waiting for them without a timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        tracing::debug!("exec: {} {}", program, args.join(" "));
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Run a command and collapse every failure into `None`, logging what went wrong.
pub fn run_logged<R: CommandRunner>(
    runner: &R,
    action: &str,
    program: &str,
    args: &[&str],
) -> Option<CommandOutput> {
    match runner.run(program, args) {
        Ok(output) if output.success => Some(output),
        Ok(output) => {
            match output.code {
                Some(code) => tracing::error!("{} failed (exit {}):\n{}", action, code, output.diagnostics()),
                None => tracing::error!("{} terminated by signal:\n{}", action, output.diagnostics()),
            }
            None
        }
        Err(e) => {
            tracing::error!("{} failed: could not run {}: {}", action, program, e);
            None
        }
    }
}
