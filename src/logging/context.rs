use crate::cli::Command;

/// Execution contexts that influence how logging is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Long-running HTTP service.
    Service,
    /// Single command that prints its result and exits.
    OneShot,
}

impl ExecutionContext {
    /// Returns `true` when the file sink is on unless configured otherwise.
    pub fn file_sink_by_default(self) -> bool {
        matches!(self, ExecutionContext::Service)
    }
}

/// Derive the active execution context from a parsed CLI command.
pub fn detect_context(command: &Command) -> ExecutionContext {
    match command {
        Command::Serve(_) => ExecutionContext::Service,
        Command::Submit(_) | Command::CheckConfig(_) => ExecutionContext::OneShot,
    }
}
