use crate::core::{AuditSink, OrderRequest, PartsFactory, Ship, ShipFactory, ShipKind};
use crate::utils::error::{CatalogError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// 從 `parts` 取出 `kind` 需要的所有零件，全部到齊才建立船
pub fn assemble(kind: ShipKind, parts: &dyn PartsFactory) -> Result<Ship> {
    let family = parts.family();
    let mut installed = BTreeMap::new();

    for &slot in kind.required_slots() {
        let part = parts.create_part(slot)?;
        if part.family != family || part.slot != slot {
            return Err(CatalogError::IncompleteFamily {
                family: family.to_string(),
                slot: slot.to_string(),
            });
        }
        installed.insert(slot, part);
    }

    tracing::debug!("Assembled {} with {} parts", kind, family);
    Ok(Ship::assembled(kind, family, installed))
}

/// 單一船種的工廠，family 由零件工廠決定
#[derive(Clone)]
pub struct DefaultShipFactory {
    kind: ShipKind,
    parts: Arc<dyn PartsFactory>,
}

impl DefaultShipFactory {
    pub fn new(kind: ShipKind, parts: Arc<dyn PartsFactory>) -> Self {
        Self { kind, parts }
    }

    pub fn whiteship(parts: Arc<dyn PartsFactory>) -> Self {
        Self::new(ShipKind::Whiteship, parts)
    }

    pub fn blackship(parts: Arc<dyn PartsFactory>) -> Self {
        Self::new(ShipKind::Blackship, parts)
    }
}

impl ShipFactory for DefaultShipFactory {
    fn kind(&self) -> ShipKind {
        self.kind
    }

    fn create_ship(&self) -> Result<Ship> {
        assemble(self.kind, self.parts.as_ref())
    }
}

/// 依選擇字串建造的簡單工廠
#[derive(Clone)]
pub struct SimpleShipFactory {
    parts: Arc<dyn PartsFactory>,
}

impl SimpleShipFactory {
    pub fn new(parts: Arc<dyn PartsFactory>) -> Self {
        Self { parts }
    }

    pub fn create_product(&self, selector: &str) -> Result<Ship> {
        let kind: ShipKind = selector.parse()?;
        assemble(kind, self.parts.as_ref())
    }

    /// 與 `ShipFactory::order_ship` 相同的稽核流程
    pub fn order_product(
        &self,
        selector: &str,
        request: &OrderRequest,
        audit: &dyn AuditSink,
    ) -> Result<Ship> {
        let kind: ShipKind = selector.parse()?;
        DefaultShipFactory::new(kind, Arc::clone(&self.parts)).order_ship(request, audit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::audit::MemoryAuditSink;
    use crate::core::parts::FamilyPartsFactory;
    use crate::core::{Part, PartFamily, PartSlot};

    struct MixedPartsFactory;

    impl PartsFactory for MixedPartsFactory {
        fn family(&self) -> PartFamily {
            PartFamily::Pro
        }

        fn create_part(&self, slot: PartSlot) -> Result<Part> {
            let family = match slot {
                PartSlot::Anchor => PartFamily::Pro,
                PartSlot::Wheel => PartFamily::Standard,
            };
            Ok(Part {
                slot,
                family,
                model: "Mixed".to_string(),
            })
        }
    }

    #[test]
    fn test_every_kind_gets_every_required_slot() {
        let factory = SimpleShipFactory::new(Arc::new(FamilyPartsFactory::standard()));

        for kind in ShipKind::ALL {
            let ship = factory.create_product(kind.as_str()).unwrap();
            for slot in kind.required_slots() {
                assert!(ship.part(*slot).is_some(), "{} missing {}", kind, slot);
            }
        }
    }

    #[test]
    fn test_unknown_selector_is_rejected() {
        let factory = SimpleShipFactory::new(Arc::new(FamilyPartsFactory::standard()));

        let err = factory.create_product("submarine").unwrap_err();
        assert_eq!(err.kind(), "UnknownVariantError");
    }

    #[test]
    fn test_whiteship_factory_with_pro_parts() {
        let factory = DefaultShipFactory::whiteship(Arc::new(FamilyPartsFactory::pro()));
        let ship = factory.create_ship().unwrap();

        assert_eq!(ship.name(), "whiteship");
        assert_eq!(ship.color(), "white");
        assert_eq!(ship.anchor().unwrap().model, "WhiteAnchorPro");
        assert_eq!(ship.wheel().unwrap().model, "WhiteWheelPro");
    }

    #[test]
    fn test_mixed_family_is_refused() {
        let factory = DefaultShipFactory::whiteship(Arc::new(MixedPartsFactory));

        assert!(matches!(
            factory.create_ship(),
            Err(CatalogError::IncompleteFamily { .. })
        ));
    }

    #[test]
    fn test_order_ship_records_audit() {
        let audit = MemoryAuditSink::new();
        let factory = DefaultShipFactory::blackship(Arc::new(FamilyPartsFactory::standard()));

        let ship = factory
            .order_ship(&OrderRequest::new("blackship", "jay@mail.com"), &audit)
            .unwrap();

        assert_eq!(ship.kind(), ShipKind::Blackship);
        let records = audit.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ship, ShipKind::Blackship);
        assert_eq!(records[0].email, "jay@mail.com");
    }

    #[test]
    fn test_order_ship_rejects_blank_email_without_audit() {
        let audit = MemoryAuditSink::new();
        let factory = DefaultShipFactory::whiteship(Arc::new(FamilyPartsFactory::standard()));

        let result = factory.order_ship(&OrderRequest::new("whiteship", " "), &audit);

        assert!(result.is_err());
        assert!(audit.records().is_empty());
    }

    #[test]
    fn test_order_product_unknown_selector_records_nothing() {
        let audit = MemoryAuditSink::new();
        let factory = SimpleShipFactory::new(Arc::new(FamilyPartsFactory::standard()));

        let result =
            factory.order_product("ghostship", &OrderRequest::new("ghost", "jay@mail.com"), &audit);

        assert!(matches!(result, Err(CatalogError::UnknownVariant { .. })));
        assert!(audit.records().is_empty());
    }
}
