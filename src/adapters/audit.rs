use crate::domain::model::AuditRecord;
use crate::domain::ports::AuditSink;
use crate::utils::error::Result;
use std::sync::Mutex;

/// 每筆紀錄以 JSON 寫進日誌
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: AuditRecord) -> Result<()> {
        let payload = serde_json::to_string(&record)?;
        tracing::info!(target: "pattern_catalog::audit", "{}", payload);
        Ok(())
    }
}

/// 收集在記憶體裡，測試與報表用
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: AuditRecord) -> Result<()> {
        // 鎖中毒時照樣寫入，稽核紀錄不能丟
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        records.push(record);
        Ok(())
    }
}
