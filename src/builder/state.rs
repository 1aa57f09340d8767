//! Builder typestates.

/// Start of a build session; only the scheme may be set.
pub struct Initial(());

/// Scheme set; only the host may be set.
pub struct SchemeSet(());

/// Scheme and host set; every remaining component may be set, in any
/// order, and the URI may be rendered.
pub struct Ready(());
