use formats::Topology;

use crate::error::MapError;
use crate::map::ChoroplethMap;
use crate::options::{Container, MapCallbacks, MapOptions};

/// Builds a map and loads `object_name`, or the topology's first object when
/// no name is given. A failed load destroys the half-built map before the
/// error is returned.
pub fn initialize(
    container: &Container,
    options: MapOptions,
    callbacks: MapCallbacks,
    topology: &Topology,
    object_name: Option<&str>,
) -> Result<ChoroplethMap, MapError> {
    let mut map = ChoroplethMap::new(container, options, callbacks)?;
    let loaded = match object_name {
        Some(name) => Ok(name),
        None => topology.first_object_name(),
    }
    .map_err(MapError::from)
    .and_then(|name| map.load_topology(topology, name));

    match loaded {
        Ok(()) => Ok(map),
        Err(err) => {
            map.destroy();
            Err(err)
        }
    }
}
