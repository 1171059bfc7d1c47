//! Public macros for constructing option structs without relying on struct literal syntax.
//!
//! Call sites keep compiling when the option structs gain fields.

/// Construct [`crate::LoaderOptions`] from `Default` and a list of field assignments.
///
/// Example:
///
/// ```rust
/// let options = yaml_nodes::loader_options! {
///     legacy_octal_numbers: true,
///     strict_booleans: true,
/// };
/// assert!(options.strict_booleans);
/// ```
#[macro_export]
macro_rules! loader_options {
    ( $( $field:ident : $value:expr ),* $(,)? ) => {{
        let mut opt = $crate::LoaderOptions::default();
        $(
            opt.$field = $value;
        )*
        opt
    }};
}

/// Construct [`crate::DumperOptions`] from `Default` and a list of field assignments.
///
/// Example:
///
/// ```rust
/// let options = yaml_nodes::dumper_options! {
///     indent_step: 4,
///     explicit_start: true,
/// };
/// assert_eq!(options.indent_step, 4);
/// ```
#[macro_export]
macro_rules! dumper_options {
    ( $( $field:ident : $value:expr ),* $(,)? ) => {{
        let mut opt = $crate::DumperOptions::default();
        $(
            opt.$field = $value;
        )*
        opt
    }};
}
