/// Single-pass (and one two-pass) table transforms.
///
/// Each submodule is one standalone cleaning step over an in-memory
/// `Table`; the binaries wire them to files. None of them know about
/// each other — composition happens on the filesystem.
///
/// Submodules:
/// - `prune` — drop configured columns, split a combined timestamp.
/// - `sentinel` — blank cells equal to the missing-data sentinel.
/// - `headers` — drop columns with blank/placeholder headers.
/// - `onehot` — two-pass categorical one-hot encoding.
/// - `cyclical` — date components and cyclical time-of-day encoding.

pub mod cyclical;
pub mod headers;
pub mod onehot;
pub mod prune;
pub mod sentinel;
