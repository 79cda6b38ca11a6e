pub use folio_utils_derive::trace_instrument;

mod macros;

/// Version string reported by the CLI and attached to startup logs.
pub const fn folio_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
