//! Convenience macros for the bootgate project
#![macro_use]

/// Define and export a specific port module (transparently pulls
/// its namespace to the current one).
///
/// Used mostly to conveniently fit the module declaration and reexport
/// under a single configuration flag.
///
/// # Example
/// ```ignore
/// #[cfg(feature = "nrf51")]
/// port!(nrf51);
/// // Expands into:
/// pub mod nrf51;
/// pub use self::nrf51::*;
///
/// #[cfg(feature = "nrf51")]
/// port!(nrf51: [bootloader, configuration,]);
/// // Expands into:
/// pub mod nrf51 { pub mod bootloader; pub mod configuration; }
/// pub use self::nrf51::bootloader;
/// pub use self::nrf51::configuration;
/// ```
#[macro_export]
macro_rules! port {
    ($mod:ident) => {
        pub mod $mod;
        pub use self::$mod::*;
    };
    ($mod:ident as $name:ident) => {
        pub mod $mod;
        pub use self::$mod as $name;
    };
    ($outer:ident: [$($inner:ident,)+]) => {
        pub mod $outer {
        $(
            pub mod $inner;
        )+
        }
        $(
            pub use self::$outer::$inner;
        )+
    };
}

/// Logs through `defmt` on target. Off target, where no global logger
/// exists, only the arguments are evaluated.
#[macro_export]
macro_rules! log_info {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(target_arch = "arm")]
        defmt::info!($fmt $(, $arg)*);
        $(
            #[cfg(not(target_arch = "arm"))]
            let _ = &$arg;
        )*
    }};
}

/// Warning level counterpart of [`log_info!`].
#[macro_export]
macro_rules! log_warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(target_arch = "arm")]
        defmt::warn!($fmt $(, $arg)*);
        $(
            #[cfg(not(target_arch = "arm"))]
            let _ = &$arg;
        )*
    }};
}

/// Error level counterpart of [`log_info!`].
#[macro_export]
macro_rules! log_error {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(target_arch = "arm")]
        defmt::error!($fmt $(, $arg)*);
        $(
            #[cfg(not(target_arch = "arm"))]
            let _ = &$arg;
        )*
    }};
}
