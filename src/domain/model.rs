use crate::utils::error::CatalogError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 可以建造的船種，封閉列舉，不會默默退回預設值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipKind {
    Whiteship,
    Blackship,
}

impl ShipKind {
    pub const ALL: [ShipKind; 2] = [ShipKind::Whiteship, ShipKind::Blackship];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipKind::Whiteship => "whiteship",
            ShipKind::Blackship => "blackship",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ShipKind::Whiteship => "white",
            ShipKind::Blackship => "black",
        }
    }

    pub fn logo(&self) -> &'static str {
        match self {
            ShipKind::Whiteship => "\u{1F6E5}\u{FE0F}",
            ShipKind::Blackship => "\u{2693}",
        }
    }

    /// 出廠前必須裝上的零件位置
    pub fn required_slots(&self) -> &'static [PartSlot] {
        match self {
            ShipKind::Whiteship | ShipKind::Blackship => &[PartSlot::Anchor, PartSlot::Wheel],
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShipKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownVariant {
                kind: "ship".to_string(),
                selector: s.to_string(),
            })
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PartFamily {
    #[default]
    Standard,
    Pro,
}

impl PartFamily {
    pub const ALL: [PartFamily; 2] = [PartFamily::Standard, PartFamily::Pro];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartFamily::Standard => "standard",
            PartFamily::Pro => "pro",
        }
    }
}

impl fmt::Display for PartFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartFamily {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartFamily::ALL
            .into_iter()
            .find(|family| family.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownVariant {
                kind: "parts family".to_string(),
                selector: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartSlot {
    Anchor,
    Wheel,
}

impl PartSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartSlot::Anchor => "anchor",
            PartSlot::Wheel => "wheel",
        }
    }
}

impl fmt::Display for PartSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 零件只由 slot + family 決定，沒有其他身分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub slot: PartSlot,
    pub family: PartFamily,
    pub model: String,
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.model)
    }
}

/// 組裝完成的船，只有 `core::factory` 能在所有 slot 裝好後建立
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ship {
    kind: ShipKind,
    family: PartFamily,
    parts: BTreeMap<PartSlot, Part>,
}

impl Ship {
    pub(crate) fn assembled(
        kind: ShipKind,
        family: PartFamily,
        parts: BTreeMap<PartSlot, Part>,
    ) -> Self {
        Self {
            kind,
            family,
            parts,
        }
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn color(&self) -> &'static str {
        self.kind.color()
    }

    pub fn logo(&self) -> &'static str {
        self.kind.logo()
    }

    pub fn family(&self) -> PartFamily {
        self.family
    }

    pub fn part(&self, slot: PartSlot) -> Option<&Part> {
        self.parts.get(&slot)
    }

    pub fn anchor(&self) -> Option<&Part> {
        self.part(PartSlot::Anchor)
    }

    pub fn wheel(&self) -> Option<&Part> {
        self.part(PartSlot::Wheel)
    }

    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.values()
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship{{name='{}', color='{}', logo='{}'",
            self.name(),
            self.color(),
            self.logo()
        )?;
        for (slot, part) in &self.parts {
            write!(f, ", {}={}", slot, part)?;
        }
        f.write_str("}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub name: String,
    pub email: String,
}

impl OrderRequest {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub event: String,
    pub ship: ShipKind,
    pub family: PartFamily,
    pub customer: String,
    pub email: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPlan {
    pub day: u32,
    pub plan: String,
}

/// 由 builder 產出的旅遊計畫，產出後欄位唯讀
///
/// 只能透過 `TourPlanBuilder::get_plan` 取得，不提供反序列化：
///
/// ```compile_fail
/// use pattern_catalog::core::TourPlan;
///
/// let plan: TourPlan = serde_json::from_str(r#"{"title":"","nights":5,"days":0}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourPlan {
    title: String,
    nights: u32,
    days: u32,
    start_date: NaiveDate,
    where_to_stay: Option<String>,
    plans: Vec<DetailPlan>,
}

impl TourPlan {
    pub(crate) fn new(
        title: String,
        nights: u32,
        days: u32,
        start_date: NaiveDate,
        where_to_stay: Option<String>,
        plans: Vec<DetailPlan>,
    ) -> Self {
        Self {
            title,
            nights,
            days,
            start_date,
            where_to_stay,
            plans,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn nights(&self) -> u32 {
        self.nights
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn where_to_stay(&self) -> Option<&str> {
        self.where_to_stay.as_deref()
    }

    /// 依加入順序的所有細項
    pub fn plans(&self) -> &[DetailPlan] {
        &self.plans
    }

    /// 某一天的細項，保持加入順序
    pub fn plans_for(&self, day: u32) -> Vec<&str> {
        self.plans
            .iter()
            .filter(|detail| detail.day == day)
            .map(|detail| detail.plan.as_str())
            .collect()
    }
}

impl fmt::Display for TourPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TourPlan{{title='{}', nights={}, days={}, start_date={}",
            self.title, self.nights, self.days, self.start_date
        )?;
        if let Some(stay) = &self.where_to_stay {
            write!(f, ", where_to_stay='{}'", stay)?;
        }
        write!(f, ", plans={}}}", self.plans.len())
    }
}

/// `AccountService` 保存的舊帳號資料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub password: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ship_kind_from_str() {
        assert_eq!("whiteship".parse::<ShipKind>().unwrap(), ShipKind::Whiteship);
        assert_eq!("Blackship".parse::<ShipKind>().unwrap(), ShipKind::Blackship);

        let err = "redship".parse::<ShipKind>().unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownVariant { ref selector, .. } if selector == "redship"
        ));
    }

    #[test]
    fn test_part_family_from_str() {
        assert_eq!("pro".parse::<PartFamily>().unwrap(), PartFamily::Pro);
        assert!("gold".parse::<PartFamily>().is_err());
    }

    #[test]
    fn test_plans_for_keeps_insertion_order() {
        let plan = TourPlan::new(
            "Trip".to_string(),
            1,
            2,
            NaiveDate::from_ymd_opt(2020, 2, 2).unwrap(),
            None,
            vec![
                DetailPlan { day: 0, plan: "a".to_string() },
                DetailPlan { day: 1, plan: "b".to_string() },
                DetailPlan { day: 0, plan: "c".to_string() },
            ],
        );

        assert_eq!(plan.plans_for(0), vec!["a", "c"]);
        assert_eq!(plan.plans_for(1), vec!["b"]);
        assert!(plan.plans_for(2).is_empty());
    }
}
