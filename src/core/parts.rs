use crate::core::{Part, PartFamily, PartSlot, PartsFactory};
use crate::utils::error::{CatalogError, Result};
use std::collections::HashMap;
use std::sync::Arc;

const DEFAULT_MODELS: &[(PartFamily, PartSlot, &str)] = &[
    (PartFamily::Standard, PartSlot::Anchor, "WhiteAnchor"),
    (PartFamily::Standard, PartSlot::Wheel, "WhiteWheel"),
    (PartFamily::Pro, PartSlot::Anchor, "WhiteAnchorPro"),
    (PartFamily::Pro, PartSlot::Wheel, "WhiteWheelPro"),
];

/// (family, slot) 對應零件型號的查表
#[derive(Debug, Clone, Default)]
pub struct PartsCatalog {
    models: HashMap<(PartFamily, PartSlot), String>,
}

impl PartsCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// 內建型號：`standard` 用 WhiteAnchor/WhiteWheel，`pro` 用 Pro 系列
    pub fn builtin() -> Self {
        DEFAULT_MODELS
            .iter()
            .fold(Self::empty(), |catalog, (family, slot, model)| {
                catalog.with_model(*family, *slot, *model)
            })
    }

    pub fn with_model(
        mut self,
        family: PartFamily,
        slot: PartSlot,
        model: impl Into<String>,
    ) -> Self {
        self.models.insert((family, slot), model.into());
        self
    }

    pub fn model(&self, family: PartFamily, slot: PartSlot) -> Option<&str> {
        self.models.get(&(family, slot)).map(String::as_str)
    }
}

/// 綁定單一 family 的零件工廠，換工廠就是整組零件一起換
#[derive(Debug, Clone)]
pub struct FamilyPartsFactory {
    family: PartFamily,
    catalog: Arc<PartsCatalog>,
}

impl FamilyPartsFactory {
    pub fn new(family: PartFamily, catalog: Arc<PartsCatalog>) -> Self {
        Self { family, catalog }
    }

    pub fn standard() -> Self {
        Self::new(PartFamily::Standard, Arc::new(PartsCatalog::builtin()))
    }

    pub fn pro() -> Self {
        Self::new(PartFamily::Pro, Arc::new(PartsCatalog::builtin()))
    }
}

impl PartsFactory for FamilyPartsFactory {
    fn family(&self) -> PartFamily {
        self.family
    }

    fn create_part(&self, slot: PartSlot) -> Result<Part> {
        // 找不到就報錯，不能拿別的 family 頂替
        let model = self.catalog.model(self.family, slot).ok_or_else(|| {
            CatalogError::IncompleteFamily {
                family: self.family.to_string(),
                slot: slot.to_string(),
            }
        })?;

        tracing::debug!("{} parts factory produced {} {}", self.family, slot, model);
        Ok(Part {
            slot,
            family: self.family,
            model: model.to_string(),
        })
    }
}
