use crate::domain::model::{
    Account, AuditRecord, OrderRequest, Part, PartFamily, PartSlot, Ship, ShipKind, TourPlan,
};
use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;
use chrono::{NaiveDate, Utc};

/// 提供同一個 family 的全套零件
pub trait PartsFactory: Send + Sync {
    fn family(&self) -> PartFamily;
    fn create_part(&self, slot: PartSlot) -> Result<Part>;
}

pub trait AuditSink: Send + Sync {
    fn record(&self, record: AuditRecord) -> Result<()>;
}

pub trait ShipFactory: Send + Sync {
    fn kind(&self) -> ShipKind;

    fn create_ship(&self) -> Result<Ship>;

    /// 所有船種共用的下單流程：驗證、建造、留下稽核紀錄。
    /// 新增船種時不需要覆寫這個方法。
    fn order_ship(&self, request: &OrderRequest, audit: &dyn AuditSink) -> Result<Ship> {
        validate_non_empty_string("order.name", &request.name)?;
        validate_non_empty_string("order.email", &request.email)?;

        tracing::debug!("Preparing {} for {}", self.kind(), request.name);
        let ship = self.create_ship()?;

        audit.record(AuditRecord {
            event: "ship.completed".to_string(),
            ship: ship.kind(),
            family: ship.family(),
            customer: request.name.clone(),
            email: request.email.clone(),
            at: Utc::now(),
        })?;
        tracing::info!("{} completed for {}", ship.name(), request.email);

        Ok(ship)
    }
}

/// 旅遊計畫的鏈式 builder，setter 原地修改並回傳同一個 builder
pub trait TourPlanBuilder {
    fn title(&mut self, title: &str) -> &mut Self;
    fn nights_and_days(&mut self, nights: u32, days: u32) -> &mut Self;
    fn start_date(&mut self, date: NaiveDate) -> &mut Self;
    fn where_to_stay(&mut self, place: &str) -> &mut Self;
    fn add_plan(&mut self, day: u32, plan: &str) -> &mut Self;
    fn get_plan(&mut self) -> Result<TourPlan>;
}

/// 舊系統的帳號 API，adapter 不會改動它
pub trait AccountRepository: Send + Sync {
    fn find_account_by_username(&self, username: &str) -> Account;
    fn create_new_account(&self, account: Account);
    fn update_account(&self, account: Account);
}

/// `LoginHandler` 需要的目標介面
pub trait UserDetails: Send + Sync {
    fn username(&self) -> &str;
    fn password(&self) -> &str;
}

pub trait UserDetailsService: Send + Sync {
    fn load_user(&self, username: &str) -> Result<Box<dyn UserDetails>>;
}

pub trait CommentService: Send + Sync {
    fn add_comment(&self, comment: &str);
}
