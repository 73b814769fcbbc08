use std::sync::Arc;

use langcache::{Arg, Backend, I18n, backends::MemoryBackend};

use crate::inputs::open_backends;

/// Parameters of `langcache translate`.
#[derive(Debug, Clone, Default)]
pub struct TranslateRequest {
    pub inputs: Vec<String>,
    pub locale: String,
    pub key: String,
    pub default: Option<String>,
    pub scope: Option<String>,
    pub fallbacks: Vec<String>,
    pub args: Vec<String>,
    /// Write auto-created keys to the first writable input instead of a
    /// throwaway in-memory store.
    pub persist: bool,
}

pub fn run_translate(request: &TranslateRequest) -> Result<String, String> {
    let mut backends: Vec<Arc<dyn Backend>> = Vec::new();
    if !request.persist {
        backends.push(Arc::new(MemoryBackend::named("scratch")));
    }
    backends.extend(open_backends(&request.inputs)?);

    let i18n = I18n::new(backends).map_err(|e| e.to_string())?;

    let mut view = i18n.fallbacks(request.fallbacks.iter().cloned());
    if let Some(scope) = &request.scope {
        view = view.scope(scope.as_str());
    }
    if let Some(default) = &request.default {
        view = view.default(default.as_str());
    }

    let args: Vec<Arg> = request.args.iter().map(Arg::from).collect();
    Ok(view.translate(&request.locale, &request.key, &args))
}
