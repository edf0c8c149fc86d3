use crate::config::toml_config::CatalogConfig;
use crate::core::builder::ReusePolicy;
use crate::core::showcase::Demo;
use crate::core::PartFamily;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "pattern-catalog")]
#[command(about = "Runs the construction pattern showcase")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Demos to run, e.g. factory,builder (default: all, or [demos] from the config)
    #[arg(long, value_delimiter = ',')]
    pub demo: Vec<Demo>,

    /// Ship selectors to order, overriding [order].ships
    #[arg(long, value_delimiter = ',')]
    pub ship: Vec<String>,

    /// Parts family: standard or pro
    #[arg(long)]
    pub family: Option<PartFamily>,

    /// Builder reuse policy: reset or carry
    #[arg(long)]
    pub reuse: Option<ReusePolicy>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 命令列參數優先於設定檔
    pub fn apply_overrides(&self, config: &mut CatalogConfig) {
        if !self.demo.is_empty() {
            config.demos = self.demo.clone();
        }
        if !self.ship.is_empty() {
            config.order.ships = self.ship.clone();
        }
        if let Some(family) = self.family {
            config.parts.family = family;
        }
        if let Some(reuse) = self.reuse {
            config.builder.reuse = reuse;
        }
    }
}
