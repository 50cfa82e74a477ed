/// Configuration macros for zero-repetition config definitions
///
/// This module provides the `config_struct!` macro that allows defining
/// configuration structures with embedded defaults in a single declaration.

/// Define a configuration struct with embedded defaults
///
/// Generates:
/// - The struct with public fields
/// - The Default implementation
/// - Serde serialization/deserialization with `#[serde(default)]`, so a
///   partial TOML file only overrides what it names
///
/// # Example
/// ```
/// x1_dashboard::config_struct! {
///     pub struct ExampleConfig {
///         interval_ms: u64 = 5_000,
///         enabled: bool = true,
///     }
/// }
///
/// let cfg = ExampleConfig::default();
/// assert_eq!(cfg.interval_ms, 5_000);
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
