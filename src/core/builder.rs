use crate::core::{DetailPlan, TourPlan, TourPlanBuilder};
use crate::utils::error::{CatalogError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `get_plan` 成功後 builder 狀態如何處理
///
/// 不論哪種，產出的計畫都是獨立副本，之後的呼叫不會影響它。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReusePolicy {
    /// 下一次從空白開始
    #[default]
    Reset,
    /// 保留所有欄位與細項
    Carry,
}

impl ReusePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReusePolicy::Reset => "reset",
            ReusePolicy::Carry => "carry",
        }
    }
}

impl fmt::Display for ReusePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReusePolicy {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" => Ok(ReusePolicy::Reset),
            "carry" => Ok(ReusePolicy::Carry),
            _ => Err(CatalogError::UnknownVariant {
                kind: "reuse policy".to_string(),
                selector: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Draft {
    title: Option<String>,
    nights_and_days: Option<(u32, u32)>,
    start_date: Option<NaiveDate>,
    where_to_stay: Option<String>,
    plans: Vec<DetailPlan>,
}

impl Draft {
    fn finish(self) -> Result<TourPlan> {
        let mut missing = Vec::new();
        if self.title.is_none() {
            missing.push("title".to_string());
        }
        if self.nights_and_days.is_none() {
            missing.push("nights_and_days".to_string());
        }
        if self.start_date.is_none() {
            missing.push("start_date".to_string());
        }

        let (Some(title), Some((nights, days)), Some(start_date)) =
            (self.title, self.nights_and_days, self.start_date)
        else {
            return Err(CatalogError::IncompleteBuild { missing });
        };

        if days == 0 || nights > days {
            return Err(CatalogError::ValidationError {
                message: format!("{} nights / {} days is not a valid stay", nights, days),
            });
        }

        Ok(TourPlan::new(
            title,
            nights,
            days,
            start_date,
            self.where_to_stay,
            self.plans,
        ))
    }
}

/// 原地修改的 builder，跨執行緒共用需要自行加鎖
#[derive(Debug, Clone, Default)]
pub struct DefaultTourBuilder {
    policy: ReusePolicy,
    draft: Draft,
}

impl DefaultTourBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ReusePolicy) -> Self {
        Self {
            policy,
            draft: Draft::default(),
        }
    }

    pub fn policy(&self) -> ReusePolicy {
        self.policy
    }
}

impl TourPlanBuilder for DefaultTourBuilder {
    fn title(&mut self, title: &str) -> &mut Self {
        self.draft.title = Some(title.to_string());
        self
    }

    fn nights_and_days(&mut self, nights: u32, days: u32) -> &mut Self {
        self.draft.nights_and_days = Some((nights, days));
        self
    }

    fn start_date(&mut self, date: NaiveDate) -> &mut Self {
        self.draft.start_date = Some(date);
        self
    }

    fn where_to_stay(&mut self, place: &str) -> &mut Self {
        self.draft.where_to_stay = Some(place.to_string());
        self
    }

    fn add_plan(&mut self, day: u32, plan: &str) -> &mut Self {
        // 同一天可以有多筆，保持加入順序，不覆蓋
        self.draft.plans.push(DetailPlan {
            day,
            plan: plan.to_string(),
        });
        self
    }

    fn get_plan(&mut self) -> Result<TourPlan> {
        // 驗證失敗時 draft 保持原樣
        let plan = self.draft.clone().finish()?;
        if self.policy == ReusePolicy::Reset {
            self.draft = Draft::default();
        }

        tracing::info!(
            "Finalized tour plan '{}' ({} detail plans, reuse={})",
            plan.title(),
            plan.plans().len(),
            self.policy
        );
        Ok(plan)
    }
}

/// 預設行程，可搭配任何 `TourPlanBuilder`
pub struct TourDirector<B: TourPlanBuilder> {
    builder: B,
}

impl<B: TourPlanBuilder> TourDirector<B> {
    pub fn new(builder: B) -> Self {
        Self { builder }
    }

    pub fn cancun_trip(&mut self) -> Result<TourPlan> {
        self.builder
            .title("Cancun Trip")
            .nights_and_days(2, 3)
            .start_date(date(2020, 8, 19)?)
            .where_to_stay("Resort")
            .add_plan(0, "Check-in and unpack")
            .add_plan(0, "Dinner")
            .add_plan(1, "Breakfast buffet")
            .add_plan(1, "Walk on the beach")
            .add_plan(1, "Lunch near the pool")
            .add_plan(1, "Swim at the resort pool")
            .add_plan(1, "Steak dinner at the BBQ place")
            .add_plan(2, "Breakfast buffet")
            .add_plan(2, "Check-out")
            .get_plan()
    }

    pub fn long_beach_trip(&mut self) -> Result<TourPlan> {
        self.builder
            .title("Long Beach")
            .nights_and_days(0, 1)
            .start_date(date(2021, 7, 15)?)
            .get_plan()
    }

    pub fn into_inner(self) -> B {
        self.builder
    }
}

pub(crate) fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| CatalogError::ValidationError {
        message: format!("{}-{}-{} is not a calendar date", year, month, day),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cancun(builder: &mut DefaultTourBuilder) -> TourPlan {
        builder
            .title("Cancun Trip")
            .nights_and_days(2, 3)
            .start_date(date(2020, 2, 2).unwrap())
            .where_to_stay("Resort")
            .add_plan(0, "Check-in")
            .add_plan(0, "Dinner")
            .get_plan()
            .unwrap()
    }

    #[test]
    fn test_builds_cancun_plan() {
        let mut builder = DefaultTourBuilder::new();
        let plan = cancun(&mut builder);

        assert_eq!(plan.title(), "Cancun Trip");
        assert_eq!(plan.nights(), 2);
        assert_eq!(plan.days(), 3);
        assert_eq!(plan.start_date(), date(2020, 2, 2).unwrap());
        assert_eq!(plan.where_to_stay(), Some("Resort"));
        assert_eq!(plan.plans_for(0), vec!["Check-in", "Dinner"]);
    }

    #[test]
    fn test_reset_policy_requires_full_config_again() {
        let mut builder = DefaultTourBuilder::with_policy(ReusePolicy::Reset);
        let first = cancun(&mut builder);

        let err = builder
            .title("Long Beach")
            .start_date(date(2020, 1, 2).unwrap())
            .get_plan()
            .unwrap_err();

        match err {
            CatalogError::IncompleteBuild { missing } => {
                assert_eq!(missing, vec!["nights_and_days".to_string()]);
            }
            other => panic!("expected IncompleteBuild, got {:?}", other),
        }
        assert_eq!(first.title(), "Cancun Trip");
        assert_eq!(first.start_date(), date(2020, 2, 2).unwrap());
    }

    #[test]
    fn test_carry_policy_keeps_previous_fields() {
        let mut builder = DefaultTourBuilder::with_policy(ReusePolicy::Carry);
        let first = cancun(&mut builder);

        let second = builder
            .title("Long Beach")
            .start_date(date(2020, 1, 2).unwrap())
            .get_plan()
            .unwrap();

        assert_eq!(second.title(), "Long Beach");
        assert_eq!(second.start_date(), date(2020, 1, 2).unwrap());
        assert_eq!(second.nights(), 2);
        assert_eq!(second.where_to_stay(), Some("Resort"));
        assert_eq!(second.plans_for(0), vec!["Check-in", "Dinner"]);

        assert_eq!(first.title(), "Cancun Trip");
        assert_eq!(first.start_date(), date(2020, 2, 2).unwrap());
    }

    #[test]
    fn test_empty_builder_lists_every_missing_field() {
        let mut builder = DefaultTourBuilder::new();

        let err = builder.get_plan().unwrap_err();
        assert!(matches!(
            err,
            CatalogError::IncompleteBuild { ref missing } if missing.len() == 3
        ));
    }

    #[test]
    fn test_failed_build_keeps_draft() {
        let mut builder = DefaultTourBuilder::new();
        builder.title("Half done").add_plan(0, "Pack");
        assert!(builder.get_plan().is_err());

        let plan = builder
            .nights_and_days(0, 1)
            .start_date(date(2020, 3, 1).unwrap())
            .get_plan()
            .unwrap();
        assert_eq!(plan.title(), "Half done");
        assert_eq!(plan.plans_for(0), vec!["Pack"]);
    }

    #[test]
    fn test_more_nights_than_days_is_invalid() {
        let mut builder = DefaultTourBuilder::new();
        let result = builder
            .title("Odd")
            .nights_and_days(3, 2)
            .start_date(date(2020, 3, 1).unwrap())
            .get_plan();

        assert!(matches!(result, Err(CatalogError::ValidationError { .. })));
    }

    #[test]
    fn test_director_builds_both_trips() {
        let mut director = TourDirector::new(DefaultTourBuilder::new());

        let cancun = director.cancun_trip().unwrap();
        let long_beach = director.long_beach_trip().unwrap();

        assert_eq!(cancun.plans().len(), 9);
        assert_eq!(cancun.plans_for(2), vec!["Breakfast buffet", "Check-out"]);
        assert_eq!(long_beach.days(), 1);
        assert!(long_beach.plans().is_empty());
        assert_eq!(long_beach.where_to_stay(), None);
    }
}
