//! ANSI-colored stdout log macros.
//!
//! Timestamps carry milliseconds since fix streams arrive at sub-second
//! cadence. The `event!` channel logs per-fix chatter and stays silent
//! unless `LOG_TASK_EVENTS` is set.

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        println!("\x1b[32m[INFO ][{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S%.3f"), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        println!("\x1b[33m[LOG  ][{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S%.3f"), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        println!("\x1b[35m[WARN ][{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S%.3f"), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        println!("\x1b[31m[ERROR][{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S%.3f"), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! event {
    ($($arg:tt)*) => {
        if std::env::var("LOG_TASK_EVENTS").is_ok() {
            println!("\x1b[36m[EVENT][{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S%.3f"), format!($($arg)*))
        }
    };
}
