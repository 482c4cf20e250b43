use std::env::var;
use std::net::SocketAddr;

use anyhow::Result;

/// Get the value of ENV var
///
/// Only when:
/// - It is set
/// - It is not empty
pub fn env_var(var_name: &str) -> Option<String> {
    var(var_name).ok().filter(|value| !value.is_empty())
}

/// Build the listen address from an address and an optional port override
pub fn resolve_address(address: &str, port: Option<&str>) -> Result<SocketAddr> {
    let mut address = address.parse::<SocketAddr>()?;

    if let Some(port) = port {
        address.set_port(port.parse::<u16>()?);
    }

    Ok(address)
}
