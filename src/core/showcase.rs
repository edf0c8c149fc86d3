use crate::adapters::audit::TracingAuditSink;
use crate::config::toml_config::CatalogConfig;
use crate::core::adapter::{AccountService, AccountUserDetailsService, LoginHandler};
use crate::core::builder::{date, DefaultTourBuilder, TourDirector};
use crate::core::decorator::{CommentChain, DefaultCommentService, SpamFilter, Trimming};
use crate::core::factory::{DefaultShipFactory, SimpleShipFactory};
use crate::core::parts::{FamilyPartsFactory, PartsCatalog};
use crate::core::prototype::{GithubIssue, GithubRepository};
use crate::core::registry::ship_factories;
use crate::core::{
    AuditSink, CommentService, OrderRequest, PartFamily, PartsFactory, ShipFactory,
    TourPlanBuilder,
};
use crate::utils::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Demo {
    Factory,
    AbstractFactory,
    Builder,
    Prototype,
    Adapter,
    Decorator,
    Registry,
}

impl Demo {
    pub const ALL: [Demo; 7] = [
        Demo::Factory,
        Demo::AbstractFactory,
        Demo::Builder,
        Demo::Prototype,
        Demo::Adapter,
        Demo::Decorator,
        Demo::Registry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Demo::Factory => "factory",
            Demo::AbstractFactory => "abstract-factory",
            Demo::Builder => "builder",
            Demo::Prototype => "prototype",
            Demo::Adapter => "adapter",
            Demo::Decorator => "decorator",
            Demo::Registry => "registry",
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Demo {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        Demo::ALL
            .into_iter()
            .find(|demo| demo.as_str() == s.trim())
            .ok_or_else(|| CatalogError::UnknownVariant {
                kind: "demo".to_string(),
                selector: s.to_string(),
            })
    }
}

/// 依配置執行選定的示範並收集報表，輸出交給呼叫端
pub struct Showcase {
    config: CatalogConfig,
    audit: Arc<dyn AuditSink>,
    catalog: Arc<PartsCatalog>,
}

impl Showcase {
    pub fn new(config: CatalogConfig) -> Self {
        Self::with_audit(config, Arc::new(TracingAuditSink))
    }

    pub fn with_audit(config: CatalogConfig, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            config,
            audit,
            catalog: Arc::new(PartsCatalog::builtin()),
        }
    }

    pub fn with_catalog(mut self, catalog: PartsCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// 依序執行，遇到第一個錯誤就停止
    pub fn run(&self) -> Result<Vec<String>> {
        let mut report = Vec::new();

        for demo in &self.config.demos {
            tracing::debug!("Running {} demo", demo);
            report.push(format!("== {} ==", demo));
            report.extend(self.run_demo(*demo)?);
        }

        Ok(report)
    }

    pub fn run_demo(&self, demo: Demo) -> Result<Vec<String>> {
        match demo {
            Demo::Factory => self.factory(),
            Demo::AbstractFactory => self.abstract_factory(),
            Demo::Builder => self.builder(),
            Demo::Prototype => self.prototype(),
            Demo::Adapter => self.adapter(),
            Demo::Decorator => Ok(self.decorator()),
            Demo::Registry => self.registry(),
        }
    }

    fn parts(&self, family: PartFamily) -> Arc<dyn PartsFactory> {
        Arc::new(FamilyPartsFactory::new(family, Arc::clone(&self.catalog)))
    }

    fn factory(&self) -> Result<Vec<String>> {
        let factory = SimpleShipFactory::new(self.parts(self.config.parts.family));
        let request = OrderRequest::new(&self.config.order.customer, &self.config.order.email);

        self.config
            .order
            .ships
            .iter()
            .map(|selector| {
                factory
                    .order_product(selector, &request, self.audit.as_ref())
                    .map(|ship| ship.to_string())
            })
            .collect()
    }

    fn abstract_factory(&self) -> Result<Vec<String>> {
        PartFamily::ALL
            .into_iter()
            .map(|family| -> Result<String> {
                let ship = DefaultShipFactory::whiteship(self.parts(family)).create_ship()?;
                let parts: Vec<String> = ship.parts().map(|part| part.to_string()).collect();
                Ok(format!(
                    "{} with {} parts: {}",
                    ship.name(),
                    family,
                    parts.join(", ")
                ))
            })
            .collect()
    }

    fn builder(&self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        let mut builder = DefaultTourBuilder::with_policy(self.config.builder.reuse);

        let first = builder
            .title("Cancun Trip")
            .nights_and_days(2, 3)
            .start_date(date(2020, 2, 2)?)
            .where_to_stay("Resort")
            .add_plan(0, "Check-in")
            .add_plan(0, "Dinner")
            .get_plan()?;
        lines.push(first.to_string());

        // 同一個 builder 再建一次，結果取決於 reuse policy
        let second = builder
            .title("Long Beach")
            .start_date(date(2020, 1, 2)?)
            .get_plan();
        match second {
            Ok(plan) => lines.push(format!("reuse={}: {}", builder.policy(), plan)),
            Err(e) => lines.push(format!("reuse={}: {}", builder.policy(), e)),
        }
        lines.push(format!("first plan unchanged: {}", first));

        let mut director = TourDirector::new(DefaultTourBuilder::new());
        lines.push(director.cancun_trip()?.to_string());
        lines.push(director.long_beach_trip()?.to_string());

        Ok(lines)
    }

    fn prototype(&self) -> Result<Vec<String>> {
        let repository = Arc::new(GithubRepository::new("whiteship", "live-study"));
        let issue = GithubIssue::new(repository, 1, "Week 1: What is the JVM?");
        let clone = issue.duplicate_with(2, "Week 2");

        Ok(vec![
            issue.url()?.to_string(),
            clone.url()?.to_string(),
            format!(
                "shares repository: {}",
                Arc::ptr_eq(&issue.repository, &clone.repository)
            ),
        ])
    }

    fn adapter(&self) -> Result<Vec<String>> {
        let mapping = self.config.user_details_mapping()?;
        let service = AccountUserDetailsService::with_mapping(AccountService::new(), mapping);
        let handler = LoginHandler::new(service);

        let user = handler.login(&self.config.accounts.username, &self.config.accounts.password)?;
        Ok(vec![format!("logged in as {}", user)])
    }

    fn decorator(&self) -> Vec<String> {
        let base = DefaultCommentService::new();
        let chain = CommentChain::new(base.clone())
            .layer(SpamFilter::new(self.config.comments.spam_markers.clone()))
            .layer(Trimming::new(self.config.comments.trim_markers.clone()));

        for sample in &self.config.comments.samples {
            chain.add_comment(sample);
        }

        let posted = base.comments();
        let suppressed = self.config.comments.samples.len() - posted.len();
        let mut lines: Vec<String> = posted.into_iter().map(|c| format!("posted: {}", c)).collect();
        lines.push(format!("suppressed: {}", suppressed));
        lines
    }

    fn registry(&self) -> Result<Vec<String>> {
        let registry = ship_factories(self.parts(self.config.parts.family))?;

        registry
            .names()
            .into_iter()
            .map(|name| -> Result<String> {
                let ship = registry.resolve(name)?.create_ship()?;
                Ok(format!("{} -> {}", name, ship))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::audit::MemoryAuditSink;
    use crate::core::PartSlot;

    fn showcase(config: CatalogConfig) -> (Showcase, Arc<MemoryAuditSink>) {
        let audit = Arc::new(MemoryAuditSink::new());
        (Showcase::with_audit(config, audit.clone()), audit)
    }

    #[test]
    fn test_demo_from_str() {
        assert_eq!("abstract-factory".parse::<Demo>().unwrap(), Demo::AbstractFactory);
        assert!("visitor".parse::<Demo>().is_err());
    }

    #[test]
    fn test_factory_demo_orders_every_ship() {
        let (showcase, audit) = showcase(CatalogConfig::default());

        let lines = showcase.run_demo(Demo::Factory).unwrap();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("whiteship"));
        assert!(lines[1].contains("blackship"));
        assert_eq!(audit.records().len(), 2);
    }

    #[test]
    fn test_unknown_ship_stops_the_run() {
        let mut config = CatalogConfig::default();
        config.order.ships = vec!["whiteship".to_string(), "yacht".to_string()];
        let (showcase, audit) = showcase(config);

        let err = showcase.run().unwrap_err();

        assert!(matches!(
            err,
            CatalogError::UnknownVariant { ref selector, .. } if selector == "yacht"
        ));
        assert_eq!(audit.records().len(), 1);
    }

    #[test]
    fn test_builder_demo_reports_reset_failure() {
        let (showcase, _) = showcase(CatalogConfig::default());

        let lines = showcase.run_demo(Demo::Builder).unwrap();

        assert!(lines[1].starts_with("reuse=reset: Incomplete build"));
        assert!(lines[2].contains("Cancun Trip"));
    }

    #[test]
    fn test_decorator_demo_counts_suppressed() {
        let (showcase, _) = showcase(CatalogConfig::default());

        let lines = showcase.run_demo(Demo::Decorator).unwrap();

        assert_eq!(
            lines,
            vec![
                "posted: Great write-up on decorators".to_string(),
                "posted: Thanks this helped".to_string(),
                "suppressed: 1".to_string(),
            ]
        );
    }

    #[test]
    fn test_incomplete_catalog_surfaces_family_error() {
        let catalog = PartsCatalog::empty().with_model(PartFamily::Standard, PartSlot::Anchor, "A");
        let (showcase, _) = showcase(CatalogConfig::default());
        let showcase = showcase.with_catalog(catalog);

        assert!(matches!(
            showcase.run_demo(Demo::Registry),
            Err(CatalogError::IncompleteFamily { .. })
        ));
    }
}
