use crate::core::factory::DefaultShipFactory;
use crate::core::{PartsFactory, ShipFactory, ShipKind};
use crate::utils::error::{CatalogError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

type Constructor<T> = Box<dyn Fn() -> Box<T> + Send + Sync>;

/// 具名建構函式，每次 `resolve` 都產生新的實例
pub struct ComponentRegistry<T: ?Sized> {
    kind: String,
    constructors: BTreeMap<String, Constructor<T>>,
}

impl<T: ?Sized> ComponentRegistry<T> {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            constructors: BTreeMap::new(),
        }
    }

    pub fn register<F>(&mut self, name: &str, constructor: F) -> Result<()>
    where
        F: Fn() -> Box<T> + Send + Sync + 'static,
    {
        if self.constructors.contains_key(name) {
            return Err(CatalogError::DuplicateComponent {
                name: name.to_string(),
            });
        }
        self.constructors
            .insert(name.to_string(), Box::new(constructor));
        tracing::debug!("Registered {} '{}'", self.kind, name);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<Box<T>> {
        let constructor =
            self.constructors
                .get(name)
                .ok_or_else(|| CatalogError::UnknownVariant {
                    kind: self.kind.clone(),
                    selector: name.to_string(),
                })?;
        Ok(constructor())
    }

    /// 已註冊名稱，依字母排序
    pub fn names(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }
}

/// 每種船一個工廠，共用同一個零件工廠
pub fn ship_factories(parts: Arc<dyn PartsFactory>) -> Result<ComponentRegistry<dyn ShipFactory>> {
    let mut registry: ComponentRegistry<dyn ShipFactory> = ComponentRegistry::new("ship factory");

    for kind in ShipKind::ALL {
        let parts = Arc::clone(&parts);
        registry.register(kind.as_str(), move || {
            Box::new(DefaultShipFactory::new(kind, Arc::clone(&parts))) as Box<dyn ShipFactory>
        })?;
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parts::FamilyPartsFactory;
    use crate::core::PartFamily;

    #[test]
    fn test_resolve_registered_factories() {
        let registry = ship_factories(Arc::new(FamilyPartsFactory::pro())).unwrap();

        assert_eq!(registry.names(), vec!["blackship", "whiteship"]);
        let ship = registry.resolve("whiteship").unwrap().create_ship().unwrap();
        assert_eq!(ship.family(), PartFamily::Pro);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let registry = ship_factories(Arc::new(FamilyPartsFactory::standard())).unwrap();

        assert!(matches!(
            registry.resolve("ghostship"),
            Err(CatalogError::UnknownVariant { ref kind, .. }) if kind == "ship factory"
        ));
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry: ComponentRegistry<str> = ComponentRegistry::new("greeting");
        registry.register("hello", || "hello".into()).unwrap();

        let err = registry.register("hello", || "again".into()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateComponent { .. }));
        assert_eq!(&*registry.resolve("hello").unwrap(), "hello");
    }
}
