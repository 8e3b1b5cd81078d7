//! Fail-fast handlers for the `or_die` family
//!
//! These are the only operations that leave the caller's control flow. The
//! host decides what "leaving" means by implementing [`FailFast`].
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

use std::process;

/// A handler that never returns control to the caller
pub trait FailFast {
    /// Stop with an error message
    fn die(&self, message: &str) -> !;

    /// Stop with a "not found" response
    fn not_found(&self, message: &str) -> !;

    /// Stop and send the client elsewhere
    fn redirect(&self, url: &str) -> !;
}

/// Default handler: report on stderr and terminate the process
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitProcess;

impl ExitProcess {
    pub const DIE_EXIT_CODE: i32 = 1;
    pub const NOT_FOUND_EXIT_CODE: i32 = 4;
    pub const REDIRECT_EXIT_CODE: i32 = 3;
}

impl FailFast for ExitProcess {
    fn die(&self, message: &str) -> ! {
        log::error!("Terminating: {}", message);
        eprintln!("{}", message);
        process::exit(Self::DIE_EXIT_CODE)
    }

    fn not_found(&self, message: &str) -> ! {
        log::error!("Not found: {}", message);
        eprintln!("404 Not Found: {}", message);
        process::exit(Self::NOT_FOUND_EXIT_CODE)
    }

    fn redirect(&self, url: &str) -> ! {
        log::info!("Redirecting to {}", url);
        eprintln!("Location: {}", url);
        process::exit(Self::REDIRECT_EXIT_CODE)
    }
}
