//! Level-named emit macros.
//!
//! Each macro takes a `format!` template plus arguments, tags the entry with the
//! macro's call site and routes it through the process-wide logger (see
//! [`install`](crate::install)). The first emission installs a default logger when
//! none exists. Outside a Tokio runtime no logger can be created; entries are then
//! dropped, `fatal!` prints its line to stdout before exiting and `error!` still panics.
//!
//! ```rust,no_run
//! use logvisor::{warning, debug};
//!
//! warning!("disk {}% full", 97);
//! debug!("cache miss for {key}", key = "tile-12");
//! ```

#[doc(hidden)]
pub mod __private {
    use crate::config::Config;
    use crate::entry::{CallSite, LogEntry};
    use crate::facade;
    use crate::levels::Level;

    pub fn emit(level: Level, site: CallSite, message: String) -> bool {
        match facade::installed() {
            Ok(logger) => logger.log(level, site, message),
            Err(_) => facade::would_pass(level),
        }
    }

    pub fn fatal(site: CallSite, message: String) -> ! {
        match facade::installed() {
            Ok(logger) => logger.fatal_at(site, message),
            Err(_) => {
                // Nothing can deliver without a runtime; write where the console would.
                println!("{}", LogEntry::new(Level::Fatal, site, message).render());
                std::process::exit(Config::default().fatal_exit_code)
            }
        }
    }

    pub fn error(site: CallSite, message: String) -> ! {
        if let Ok(logger) = facade::installed() {
            logger.log(Level::Error, site, message.as_str());
        }
        panic!("{message}")
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __site {
    () => {
        $crate::CallSite::new(file!(), line!())
    };
}

/// Emits an always-delivered entry.
#[macro_export]
macro_rules! wtf {
    ($($arg:tt)+) => {
        $crate::macros::__private::emit($crate::Level::Wtf, $crate::__site!(), ::std::format!($($arg)+))
    };
}

/// Emits an always-delivered entry meant for users.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::macros::__private::emit($crate::Level::Info, $crate::__site!(), ::std::format!($($arg)+))
    };
}

/// Emits a `Fatal` entry, then terminates the process.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::macros::__private::fatal($crate::__site!(), ::std::format!($($arg)+))
    };
}

/// Emits an `Error` entry, then panics with the message.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::macros::__private::error($crate::__site!(), ::std::format!($($arg)+))
    };
}

/// Emits a `Warning` entry.
#[macro_export]
macro_rules! warning {
    ($($arg:tt)+) => {
        $crate::macros::__private::emit($crate::Level::Warning, $crate::__site!(), ::std::format!($($arg)+))
    };
}

/// Emits a `Debug` entry.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::macros::__private::emit($crate::Level::Debug, $crate::__site!(), ::std::format!($($arg)+))
    };
}

/// Emits a `Verbose` entry.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)+) => {
        $crate::macros::__private::emit($crate::Level::Verbose, $crate::__site!(), ::std::format!($($arg)+))
    };
}
