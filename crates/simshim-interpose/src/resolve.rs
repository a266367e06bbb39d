//! Name-resolution interception.
//!
//! The hosted library issues asynchronous DNS requests through its event
//! library; inside the simulation those must complete synchronously and
//! deterministically with respect to the scheduler. The replacement
//! resolves on the calling thread and invokes the completion callback
//! immediately — exactly once on success, never on failure.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs};

use thiserror::Error;

/// Why a name failed to resolve.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("lookup for `{name}` failed: {source}")]
    Lookup {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("`{name}` has no IPv4 address")]
    NoIpv4 { name: String },
}

/// Replacement IPv4 resolution entry point.
///
/// Resolves `name` synchronously; on success `callback` is invoked exactly
/// once with the address before this function returns. On failure the
/// callback is never invoked and the error is returned to the caller,
/// which the hosted library treats as a failed request submission.
pub fn resolve_ipv4<F>(name: &str, callback: F) -> Result<(), ResolveError>
where
    F: FnOnce(Ipv4Addr),
{
    let addrs = (name, 0u16)
        .to_socket_addrs()
        .map_err(|source| ResolveError::Lookup {
            name: name.to_owned(),
            source,
        })?;

    for addr in addrs {
        if let SocketAddr::V4(v4) = addr {
            callback(*v4.ip());
            return Ok(());
        }
    }
    Err(ResolveError::NoIpv4 {
        name: name.to_owned(),
    })
}
