use std::{fs, path::Path, sync::Arc};

use anyhow::Context;

use crate::networks::{BeaconNetworkSpec, MAINNET, MINIMAL};

/// Resolve a network name to one of the built-in configurations, falling back to reading a YAML
/// file at the given path.
pub fn beacon_network_parser(network_string: &str) -> anyhow::Result<Arc<BeaconNetworkSpec>> {
    match network_string {
        "mainnet" => Ok(MAINNET.clone()),
        "minimal" => Ok(MINIMAL.clone()),
        path => read_network_spec(path),
    }
}

pub fn read_network_spec(path: impl AsRef<Path>) -> anyhow::Result<Arc<BeaconNetworkSpec>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read network spec file {}", path.display()))?;
    Ok(Arc::new(BeaconNetworkSpec::from_yaml_str(&contents)?))
}
