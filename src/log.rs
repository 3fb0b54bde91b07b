use crate::constant::NAME;
use colorize::AnsiColor;
use std::sync::atomic::{AtomicUsize, Ordering};

static VERBOSE_FLAG: AtomicUsize = AtomicUsize::new(0);

pub fn set_verbosity(level: usize) {
    VERBOSE_FLAG.store(level, Ordering::Relaxed)
}

pub fn verbosity() -> usize {
    VERBOSE_FLAG.load(Ordering::Relaxed)
}

#[doc(hidden)]
pub fn _verbose_println(msg: &str) {
    if verbosity() >= 1 {
        println!("{NAME}: {} {}", "verbose:".yellow(), msg)
    }
}

#[doc(hidden)]
pub fn _very_verbose_println(msg: &str) {
    if verbosity() >= 2 {
        println!("{NAME}: {} {}", "very-verbose:".yellow(), msg)
    }
}

#[doc(hidden)]
pub fn _warn_println(msg: &str) {
    eprintln!("{NAME}: {} {}", "warning:".red(), msg)
}

#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => ($crate::log::_verbose_println(&format!($($arg)*)));
}
#[macro_export]
macro_rules! very_verbose_println {
    ($($arg:tt)*) => ($crate::log::_very_verbose_println(&format!($($arg)*)));
}
#[macro_export]
macro_rules! warn_println {
    ($($arg:tt)*) => ($crate::log::_warn_println(&format!($($arg)*)));
}
