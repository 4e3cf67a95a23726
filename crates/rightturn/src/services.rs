//! Service registration collection
//!
//! An ordered list of service descriptors that is replayed into a fresh
//! [`dill::CatalogBuilder`] every time a service provider is built.
//!
//! ```text
//! ServiceCollection           dill (runtime)
//! ─────────────────           ──────────────
//! add_transient::<I, C>()  →  CatalogBuilder::add::<C>()
//! add_singleton(value)     →  CatalogBuilder::add_value(value)
//! configure(name, f)       →  f(&mut CatalogBuilder)
//!                                   ↓
//!                             CatalogBuilder::build() → Catalog
//! ```
//!
//! Registering an implementation type that is already present replaces the
//! earlier descriptor, so the last registration wins.

use std::any::{TypeId, type_name};
use std::fmt;
use std::sync::Arc;

use dill::{Catalog, CatalogBuilder, Component};
use tracing::debug;

/// Resolver produced from a [`ServiceCollection`]
pub type ServiceProvider = Catalog;

type Registration = Arc<dyn Fn(&mut CatalogBuilder) + Send + Sync>;

/// How instances of a registered service are shared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Built per request (dill's default component scope)
    Transient,
    /// One value shared by every request
    Singleton,
    /// Raw catalog registration, scope decided by the caller
    Custom,
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transient => write!(f, "transient"),
            Self::Singleton => write!(f, "singleton"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// One entry of a [`ServiceCollection`]
#[derive(Clone)]
pub struct ServiceDescriptor {
    service: &'static str,
    implementation: &'static str,
    lifetime: Lifetime,
    key: Option<TypeId>,
    register: Registration,
}

impl ServiceDescriptor {
    /// Type name of the service this descriptor answers for
    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Type name of the implementation
    pub fn implementation(&self) -> &'static str {
        self.implementation
    }

    /// Instance sharing of the registration
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    fn apply(&self, builder: &mut CatalogBuilder) {
        (self.register)(builder);
    }
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("service", &self.service)
            .field("implementation", &self.implementation)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

/// Ordered service registrations consumed when the provider is built
#[derive(Debug, Clone, Default)]
pub struct ServiceCollection {
    descriptors: Vec<ServiceDescriptor>,
}

impl ServiceCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Register component `C` as a transient implementation of `I`
    ///
    /// `C` must declare `I` through dill's `#[interface]` attribute; the
    /// container resolves `I` through that binding.
    pub fn add_transient<I, C>(&mut self) -> &mut Self
    where
        I: ?Sized + Send + Sync + 'static,
        C: Component + Send + Sync + 'static,
    {
        self.push(
            type_name::<I>(),
            type_name::<C>(),
            Lifetime::Transient,
            Some(TypeId::of::<C>()),
            Arc::new(|builder: &mut CatalogBuilder| {
                builder.add::<C>();
            }),
        )
    }

    /// Register component `C` under its own type and declared interfaces
    pub fn add_component<C>(&mut self) -> &mut Self
    where
        C: Component + Send + Sync + 'static,
    {
        self.add_transient::<C, C>()
    }

    /// Register a value shared by every resolution of `T`
    pub fn add_singleton<T>(&mut self, value: T) -> &mut Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.push(
            type_name::<T>(),
            type_name::<T>(),
            Lifetime::Singleton,
            Some(TypeId::of::<T>()),
            Arc::new(move |builder: &mut CatalogBuilder| {
                builder.add_value(value.clone());
            }),
        )
    }

    /// Register arbitrary catalog bindings under a descriptive name
    pub fn configure<F>(&mut self, name: &'static str, register: F) -> &mut Self
    where
        F: Fn(&mut CatalogBuilder) + Send + Sync + 'static,
    {
        self.push(name, name, Lifetime::Custom, None, Arc::new(register))
    }

    /// Append every descriptor of `other` after the existing ones
    ///
    /// Descriptors of `other` replace existing ones for the same
    /// implementation type.
    pub fn extend(&mut self, other: &ServiceCollection) -> &mut Self {
        for descriptor in &other.descriptors {
            self.insert(descriptor.clone());
        }
        self
    }

    /// Number of registered descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether no descriptor was registered
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.descriptors.iter()
    }

    /// Whether a descriptor answers for the service type `T`
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        let service = type_name::<T>();
        self.descriptors.iter().any(|d| d.service == service)
    }

    /// Replay the descriptors into a new catalog
    pub fn build_service_provider(&self) -> ServiceProvider {
        let mut builder = CatalogBuilder::new();
        for descriptor in &self.descriptors {
            debug!(
                service = descriptor.service,
                implementation = descriptor.implementation,
                lifetime = %descriptor.lifetime,
                "Registering service"
            );
            descriptor.apply(&mut builder);
        }
        builder.build()
    }

    fn push(
        &mut self,
        service: &'static str,
        implementation: &'static str,
        lifetime: Lifetime,
        key: Option<TypeId>,
        register: Registration,
    ) -> &mut Self {
        self.insert(ServiceDescriptor {
            service,
            implementation,
            lifetime,
            key,
            register,
        })
    }

    // dill rejects a second builder for the same implementation type
    fn insert(&mut self, descriptor: ServiceDescriptor) -> &mut Self {
        if let Some(key) = descriptor.key
            && let Some(index) = self.descriptors.iter().position(|d| d.key == Some(key))
        {
            debug!(
                implementation = descriptor.implementation,
                "Replacing earlier registration"
            );
            self.descriptors.remove(index);
        }
        self.descriptors.push(descriptor);
        self
    }
}

/// Resolve one implementation of `I` from a built provider
pub fn resolve_service<I>(provider: &ServiceProvider) -> crate::error::Result<Arc<I>>
where
    I: ?Sized + Send + Sync + 'static,
{
    provider
        .get_one::<I>()
        .map_err(|e| crate::error::TurnError::resolution(type_name::<I>(), e.to_string()))
}
