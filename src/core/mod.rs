pub mod adapter;
pub mod builder;
pub mod decorator;
pub mod factory;
pub mod parts;
pub mod prototype;
pub mod registry;
pub mod showcase;

pub use crate::domain::model::{
    Account, AuditRecord, DetailPlan, OrderRequest, Part, PartFamily, PartSlot, Ship, ShipKind,
    TourPlan,
};
pub use crate::domain::ports::{
    AccountRepository, AuditSink, CommentService, PartsFactory, ShipFactory, TourPlanBuilder,
    UserDetails, UserDetailsService,
};
pub use crate::utils::error::Result;
