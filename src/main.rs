mod cli;
mod core;
mod error;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

#[cfg(windows)]
fn enable_utf8_output() {
    use windows_sys::Win32::System::Console::SetConsoleOutputCP;
    // Box-drawing connectors need a UTF-8 console.
    unsafe {
        SetConsoleOutputCP(65001);
    }
}

fn main() -> Result<()> {
    #[cfg(windows)]
    enable_utf8_output();
    let cli = Cli::parse();
    core::tree::run_tree(&cli)
}
