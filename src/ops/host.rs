/// Capabilities the dispatcher borrows from its caller. Command logic
/// stays a pure function of the session plus whatever these return, so
/// tests can drive it with a scripted host instead of a terminal.
pub trait Host {
    /// Prompt for a line of input. `None` means the user cancelled;
    /// a cancelled prompt must abort the whole command.
    fn ask(&mut self, prompt: &str, default: &str) -> Option<String>;

    /// Show a message to the user (errors and confirmations alike).
    fn alert(&mut self, message: &str);

    /// Fetch pasted text for an import. `None` means cancelled.
    fn read_text(&mut self) -> Option<String>;

    /// Hand exported text to the clipboard.
    fn write_text(&mut self, text: &str);
}
