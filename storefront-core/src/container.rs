//! Lifecycle-scoped bean container.
//!
//! Factories are registered per type together with a [`Scope`]:
//! - [`Scope::Singleton`]: created on first retrieval, then shared
//! - [`Scope::Prototype`]: created fresh on every retrieval
//!
//! The container only manages what it caches. Closing it runs
//! [`Bean::destroy`] on singletons; prototypes belong to the caller once
//! handed out and are never destroyed by the container.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lifetime policy of a registered bean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// Create once, reuse for every retrieval
    #[default]
    Singleton,
    /// Create a new instance per retrieval
    Prototype,
}

/// Lifecycle hooks for container-managed types
pub trait Bean: Send + Sync + 'static {
    /// Runs once on each newly created instance
    fn init(&self) {}

    /// Runs when the container disposes of a cached instance
    fn destroy(&self) {}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContainerError {
    #[error("No bean registered for type {0}")]
    NotRegistered(&'static str),
    #[error("Container is closed")]
    Closed,
}

type Instance = Arc<dyn Any + Send + Sync>;
type Factory = Box<dyn Fn() -> (Instance, Arc<dyn Bean>) + Send + Sync>;

struct Definition {
    name: &'static str,
    scope: Scope,
    factory: Factory,
}

struct Managed {
    name: &'static str,
    instance: Instance,
    bean: Arc<dyn Bean>,
}

#[derive(Default)]
struct SingletonCache {
    by_type: HashMap<TypeId, Instance>,
    // creation order, used to destroy in reverse
    created: Vec<Managed>,
    closed: bool,
}

#[derive(Default)]
pub struct Container {
    definitions: HashMap<TypeId, Definition>,
    singletons: Mutex<SingletonCache>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for `T` under the given scope.
    ///
    /// Registering the same type again replaces the earlier definition and
    /// evicts its cached singleton, which is still destroyed on close.
    pub fn register<T, F>(&mut self, scope: Scope, factory: F) -> &mut Self
    where
        T: Bean,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let name = type_name::<T>();
        tracing::debug!(bean = name, ?scope, "registering bean");

        let factory: Factory = Box::new(move || {
            let bean = Arc::new(factory());
            (bean.clone() as Instance, bean as Arc<dyn Bean>)
        });

        let type_id = TypeId::of::<T>();
        self.singletons
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .by_type
            .remove(&type_id);
        self.definitions.insert(type_id, Definition { name, scope, factory });
        self
    }

    pub fn singleton<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Bean,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.register(Scope::Singleton, factory)
    }

    pub fn prototype<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Bean,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.register(Scope::Prototype, factory)
    }

    pub fn contains<T: Bean>(&self) -> bool {
        self.definitions.contains_key(&TypeId::of::<T>())
    }

    pub fn scope_of<T: Bean>(&self) -> Option<Scope> {
        self.definitions.get(&TypeId::of::<T>()).map(|d| d.scope)
    }

    /// Retrieve an instance of `T` according to its registered scope
    pub fn get<T: Bean>(&self) -> Result<Arc<T>, ContainerError> {
        let type_id = TypeId::of::<T>();
        let definition = self
            .definitions
            .get(&type_id)
            .ok_or(ContainerError::NotRegistered(type_name::<T>()))?;

        let instance = match definition.scope {
            Scope::Singleton => self.singleton_instance(type_id, definition)?,
            Scope::Prototype => {
                if self.cache().closed {
                    return Err(ContainerError::Closed);
                }
                Self::create(definition).instance
            }
        };

        instance
            .downcast::<T>()
            .map_err(|_| ContainerError::NotRegistered(type_name::<T>()))
    }

    pub fn is_closed(&self) -> bool {
        self.cache().closed
    }

    /// Destroy cached singletons in reverse creation order.
    ///
    /// Idempotent; later retrievals fail with [`ContainerError::Closed`].
    pub fn close(&self) {
        let created = {
            let mut cache = self.cache();
            if cache.closed {
                return;
            }
            cache.closed = true;
            cache.by_type.clear();
            std::mem::take(&mut cache.created)
        };

        for managed in created.into_iter().rev() {
            tracing::debug!(bean = managed.name, "destroying bean");
            managed.bean.destroy();
        }
    }

    fn singleton_instance(
        &self,
        type_id: TypeId,
        definition: &Definition,
    ) -> Result<Instance, ContainerError> {
        {
            let cache = self.cache();
            if cache.closed {
                return Err(ContainerError::Closed);
            }
            if let Some(instance) = cache.by_type.get(&type_id) {
                return Ok(instance.clone());
            }
        }

        // factory and init run unlocked so hooks may resolve other beans
        let managed = Self::create(definition);

        let mut cache = self.cache();
        if cache.closed || cache.by_type.contains_key(&type_id) {
            let existing = cache.by_type.get(&type_id).cloned();
            drop(cache);
            managed.bean.destroy();
            return existing.ok_or(ContainerError::Closed);
        }

        let instance = managed.instance.clone();
        cache.by_type.insert(type_id, instance.clone());
        cache.created.push(managed);
        Ok(instance)
    }

    fn create(definition: &Definition) -> Managed {
        tracing::debug!(bean = definition.name, scope = ?definition.scope, "creating bean");
        let (instance, bean) = (definition.factory)();
        bean.init();
        Managed {
            name: definition.name,
            instance,
            bean,
        }
    }

    fn cache(&self) -> MutexGuard<'_, SingletonCache> {
        self.singletons.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{OnceLock, Weak};

    #[derive(Default)]
    struct Hooks {
        init: AtomicUsize,
        destroy: AtomicUsize,
        destroyed: Mutex<Vec<&'static str>>,
    }

    struct PrototypeBean {
        hooks: Arc<Hooks>,
    }

    impl Bean for PrototypeBean {
        fn init(&self) {
            self.hooks.init.fetch_add(1, Ordering::SeqCst);
        }

        fn destroy(&self) {
            self.hooks.destroy.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct SingletonBean {
        hooks: Arc<Hooks>,
    }

    impl Bean for SingletonBean {
        fn init(&self) {
            self.hooks.init.fetch_add(1, Ordering::SeqCst);
        }

        fn destroy(&self) {
            self.hooks.destroy.fetch_add(1, Ordering::SeqCst);
            self.hooks.destroyed.lock().unwrap().push("singleton");
        }
    }

    struct OtherSingleton {
        hooks: Arc<Hooks>,
    }

    impl Bean for OtherSingleton {
        fn destroy(&self) {
            self.hooks.destroyed.lock().unwrap().push("other");
        }
    }

    struct Unregistered;

    impl Bean for Unregistered {}

    #[test]
    fn test_prototype_returns_new_instance() {
        let hooks = Arc::new(Hooks::default());
        let mut container = Container::new();
        let h = hooks.clone();
        container.prototype(move || PrototypeBean { hooks: h.clone() });

        let bean1 = container.get::<PrototypeBean>().unwrap();
        let bean2 = container.get::<PrototypeBean>().unwrap();

        assert!(!Arc::ptr_eq(&bean1, &bean2));
        assert_eq!(hooks.init.load(Ordering::SeqCst), 2);

        // prototypes are not managed after hand-off
        container.close();
        assert_eq!(hooks.destroy.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_singleton_returns_same_instance() {
        let hooks = Arc::new(Hooks::default());
        let mut container = Container::new();
        let h = hooks.clone();
        container.singleton(move || SingletonBean { hooks: h.clone() });

        // lazily created
        assert_eq!(hooks.init.load(Ordering::SeqCst), 0);

        let bean1 = container.get::<SingletonBean>().unwrap();
        let bean2 = container.get::<SingletonBean>().unwrap();

        assert!(Arc::ptr_eq(&bean1, &bean2));
        assert_eq!(hooks.init.load(Ordering::SeqCst), 1);

        container.close();
        assert_eq!(hooks.destroy.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_close_destroys_in_reverse_creation_order() {
        let hooks = Arc::new(Hooks::default());
        let mut container = Container::new();
        let h1 = hooks.clone();
        let h2 = hooks.clone();
        container
            .singleton(move || SingletonBean { hooks: h1.clone() })
            .singleton(move || OtherSingleton { hooks: h2.clone() });

        container.get::<SingletonBean>().unwrap();
        container.get::<OtherSingleton>().unwrap();
        container.close();

        assert_eq!(*hooks.destroyed.lock().unwrap(), vec!["other", "singleton"]);
    }

    #[test]
    fn test_close_is_idempotent_and_runs_on_drop() {
        let hooks = Arc::new(Hooks::default());
        {
            let mut container = Container::new();
            let h = hooks.clone();
            container.singleton(move || SingletonBean { hooks: h.clone() });
            container.get::<SingletonBean>().unwrap();

            container.close();
            container.close();
            assert!(container.is_closed());
        }
        assert_eq!(hooks.destroy.load(Ordering::SeqCst), 1);

        let dropped = Arc::new(Hooks::default());
        {
            let mut container = Container::new();
            let h = dropped.clone();
            container.singleton(move || SingletonBean { hooks: h.clone() });
            container.get::<SingletonBean>().unwrap();
        }
        assert_eq!(dropped.destroy.load(Ordering::SeqCst), 1);
    }

    /// Resolves `SingletonBean` from its own `init` hook
    struct Dependent {
        container: Arc<OnceLock<Weak<Container>>>,
        resolved: Arc<AtomicUsize>,
    }

    impl Bean for Dependent {
        fn init(&self) {
            let container = self.container.get().and_then(Weak::upgrade).unwrap();
            container.get::<SingletonBean>().unwrap();
            self.resolved.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_init_hook_can_resolve_other_beans() {
        let hooks = Arc::new(Hooks::default());
        let handle = Arc::new(OnceLock::new());
        let resolved = Arc::new(AtomicUsize::new(0));

        let mut container = Container::new();
        let h = hooks.clone();
        let c = handle.clone();
        let r = resolved.clone();
        container
            .singleton(move || SingletonBean { hooks: h.clone() })
            .singleton(move || Dependent { container: c.clone(), resolved: r.clone() });

        let container = Arc::new(container);
        handle.set(Arc::downgrade(&container)).unwrap();

        container.get::<Dependent>().unwrap();

        assert_eq!(resolved.load(Ordering::SeqCst), 1);
        assert_eq!(hooks.init.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reregister_evicts_cached_singleton() {
        let hooks = Arc::new(Hooks::default());
        let mut container = Container::new();
        let h1 = hooks.clone();
        container.singleton(move || SingletonBean { hooks: h1.clone() });
        let first = container.get::<SingletonBean>().unwrap();

        let h2 = hooks.clone();
        container.singleton(move || SingletonBean { hooks: h2.clone() });
        let second = container.get::<SingletonBean>().unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&second, &container.get::<SingletonBean>().unwrap()));

        // both generations are disposed
        container.close();
        assert_eq!(hooks.destroy.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unregistered_and_closed_errors() {
        let hooks = Arc::new(Hooks::default());
        let mut container = Container::new();
        let h = hooks.clone();
        container.prototype(move || PrototypeBean { hooks: h.clone() });

        assert!(matches!(
            container.get::<Unregistered>(),
            Err(ContainerError::NotRegistered(_))
        ));
        assert!(container.contains::<PrototypeBean>());
        assert_eq!(container.scope_of::<PrototypeBean>(), Some(Scope::Prototype));
        assert_eq!(container.scope_of::<Unregistered>(), None);

        container.close();
        assert_eq!(
            container.get::<PrototypeBean>().err(),
            Some(ContainerError::Closed)
        );
    }
}
