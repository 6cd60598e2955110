pub mod results;
pub mod running;
pub mod title;

/// What a screen asks the app shell to do in response to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    /// TITLE -> RUNNING.
    Begin,
    /// RUNNING -> DONE before the pool is exhausted.
    Finish,
    /// DONE -> TITLE with a rebuilt session.
    Reset,
    Exit,
}
