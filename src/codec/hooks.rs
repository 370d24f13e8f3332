use crate::record::Record;
use serde_json::{Map, Value};
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-type customization run on the input tree before default binding.
///
/// Returning `Err(message)` aborts decoding; the codec reports it as
/// `Error::Hook` together with the target type name.
pub trait BindHook: Send + Sync {
    fn before_bind(&self, tree: &mut Map<String, Value>) -> std::result::Result<(), String>;
}

impl<F> BindHook for F
where
    F: Fn(&mut Map<String, Value>) -> std::result::Result<(), String> + Send + Sync,
{
    fn before_bind(&self, tree: &mut Map<String, Value>) -> std::result::Result<(), String> {
        self(tree)
    }
}

#[derive(Clone)]
struct Registration {
    type_name: &'static str,
    hook: Arc<dyn BindHook>,
}

/// Bind hooks keyed by the exact record type they customize.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: HashMap<TypeId, Registration>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `hook` for `R`, handing back the hook it replaced.
    pub fn register<R: Record>(
        &mut self,
        hook: impl BindHook + 'static,
    ) -> Option<Arc<dyn BindHook>> {
        let registration = Registration {
            type_name: type_name::<R>(),
            hook: Arc::new(hook),
        };

        let previous = self.hooks.insert(TypeId::of::<R>(), registration);
        if previous.is_some() {
            warn!("Replacing bind hook for {}", type_name::<R>());
        } else {
            debug!("Registered bind hook for {}", type_name::<R>());
        }
        previous.map(|p| p.hook)
    }

    /// Closure form of [`HookRegistry::register`].
    pub fn register_fn<R, F>(&mut self, hook: F) -> Option<Arc<dyn BindHook>>
    where
        R: Record,
        F: Fn(&mut Map<String, Value>) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        self.register::<R>(hook)
    }

    pub fn unregister<R: Record>(&mut self) -> Option<Arc<dyn BindHook>> {
        self.hooks.remove(&TypeId::of::<R>()).map(|r| r.hook)
    }

    pub fn get<R: Record>(&self) -> Option<Arc<dyn BindHook>> {
        self.hooks.get(&TypeId::of::<R>()).map(|r| r.hook.clone())
    }

    pub fn contains<R: Record>(&self) -> bool {
        self.hooks.contains_key(&TypeId::of::<R>())
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Names of the record types that currently have a hook, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.hooks.values().map(|r| r.type_name).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
