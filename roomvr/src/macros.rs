/// Scoped logging gated by the runtime [`LogConfig`](crate::logging::LogConfig).
#[macro_export]
macro_rules! scoped_log {
    (@level error) => {
        ::tracing::Level::ERROR
    };
    (@level warn) => {
        ::tracing::Level::WARN
    };
    (@level info) => {
        ::tracing::Level::INFO
    };
    (@level debug) => {
        ::tracing::Level::DEBUG
    };
    (@level trace) => {
        ::tracing::Level::TRACE
    };
    ($level:ident, $scope:expr, $($arg:tt)*) => {
        if $crate::logging::log_config().should_log($scope, $crate::scoped_log!(@level $level)) {
            ::tracing::$level!(scope = $scope, $($arg)*);
        }
    };
}

// Convenience macros for the scopes this crate logs under

#[macro_export]
macro_rules! input_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "input", $($arg)*)
    };
}

#[macro_export]
macro_rules! media_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "media", $($arg)*)
    };
}

#[macro_export]
macro_rules! player_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "player", $($arg)*)
    };
}

#[macro_export]
macro_rules! room_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "room", $($arg)*)
    };
}
