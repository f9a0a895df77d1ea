pub mod append;
pub mod check;
pub mod outline;

pub use append::{append, AppendArgs};
pub use check::{check, CheckArgs};
pub use outline::{outline, OutlineArgs};
