// Platform-specific code module

pub mod processes;

pub use processes::SysinfoEnumerator;
