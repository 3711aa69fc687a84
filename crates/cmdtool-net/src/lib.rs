//! Network-side implementations of the cmdtool backend probe.

pub mod http_probe;

/// Backend probe that talks to the daemon's HTTP API.
pub use http_probe::HttpProbe;

#[cfg(test)]
mod tests;
