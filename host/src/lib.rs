mod console;
mod remote;
pub use console::*;
pub use remote::*;
