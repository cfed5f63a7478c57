//! Subcommand implementations.

pub(crate) mod check;
pub(crate) mod purge;
pub(crate) mod serve;

pub(crate) use check::CheckArgs;
pub(crate) use purge::PurgeArgs;
pub(crate) use serve::ServeArgs;
