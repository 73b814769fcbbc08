use std::{path::Path, sync::Arc};

use langcache::{
    Backend,
    backends::{BackendKind, YamlBackend},
};

/// Opens one backend per input, keeping the order given on the command line.
///
/// Directories are walked recursively as YAML trees. Files pick their backend
/// from the extension.
pub fn open_backends(inputs: &[String]) -> Result<Vec<Arc<dyn Backend>>, String> {
    inputs.iter().map(|input| open_backend(input)).collect()
}

fn open_backend(input: &str) -> Result<Arc<dyn Backend>, String> {
    let path = Path::new(input);
    if path.is_dir() {
        tracing::debug!("reading {} as a YAML directory", input);
        return Ok(Arc::new(YamlBackend::walk(&[path])));
    }

    let kind = BackendKind::from_path(path)
        .ok_or_else(|| format!("Cannot infer backend from file extension: {}", input))?;
    kind.open(&[path]).map_err(|e| e.to_string())
}
