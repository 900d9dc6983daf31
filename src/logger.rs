//! Console logging for the fleet coordinator.
//!
//! Every line carries a coloured tag and a UTC wall-clock stamp. `event!` output
//! is verbose bridge traffic and only printed with `LOG_FLEET_EVENTS` set.

#[doc(hidden)]
#[macro_export]
macro_rules! log_line {
    ($color:literal, $tag:literal, $($arg:tt)*) => {
        println!(
            concat!("\x1b[", $color, "m", $tag, "[{}]\x1b[0m {}"),
            chrono::Utc::now().format("%H:%M:%S"),
            format!($($arg)*)
        )
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::log_line!("32", "[INFO] ", $($arg)*) };
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => { $crate::log_line!("33", "[LOG]  ", $($arg)*) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::log_line!("35", "[WARN] ", $($arg)*) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::log_line!("31", "[ERROR]", $($arg)*) };
}

/// Unit lifecycle: placement, handle assignment, removal.
#[macro_export]
macro_rules! unit {
    ($($arg:tt)*) => { $crate::log_line!("1;34", "[UNIT] ", $($arg)*) };
}

#[macro_export]
macro_rules! event {
    ($($arg:tt)*) => {
        if std::env::var("LOG_FLEET_EVENTS").is_ok() {
            $crate::log_line!("36", "[EVENT]", $($arg)*)
        }
    };
}

#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {
        panic!(
            "\x1b[1;31m[FATAL][{}]\x1b[0m {}",
            chrono::Utc::now().format("%H:%M:%S"),
            format!($($arg)*)
        )
    };
}
