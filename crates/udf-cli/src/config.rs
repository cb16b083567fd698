//! Engine configuration file.
//!
//! ```toml
//! label_prefix = "contract.field."
//! header_prefix = "contract.column."
//! unmapped_policy = "skip"        # or "fail_fast"
//! collision_policy = "warn"       # or "overwrite", "reject"
//!
//! [[special_types]]
//! value = 7
//! name = "INTERNAL_COST"
//!
//! [[column_groups]]
//! field = "q1"
//! label = "totals.quarter"
//! span = "remaining"              # or a column count
//!
//! [visibility]
//! INTERNAL_COST = false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;
use udf_compile::{CompileOptions, UnmappedPolicy};
use udf_model::SpecialType;
use udf_registry::{CollisionPolicy, SpecialTypeRegistry};
use udf_table::{ColumnConfig, ColumnGroup, Span, VisibilitySettings, fold_column_groups};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "UDF_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub label_prefix: String,
    pub header_prefix: String,
    pub unmapped_policy: UnmappedPolicy,
    pub collision_policy: CollisionPolicy,
    pub special_types: Vec<SpecialType>,
    pub column_groups: Vec<ColumnGroupSetting>,
    pub visibility: VisibilitySettings,
}

/// A column-group decoration attached to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnGroupSetting {
    pub field: String,
    pub label: String,
    pub span: SpanSetting,
}

/// Span as written in the file: a count or a keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpanSetting {
    Count(usize),
    Keyword(String),
}

impl SpanSetting {
    pub fn to_span(&self) -> Result<Span> {
        match self {
            SpanSetting::Count(n) => Ok(Span::Fixed(*n)),
            SpanSetting::Keyword(text) => text.parse::<Span>().map_err(|e| anyhow!(e)),
        }
    }
}

impl EngineConfig {
    /// Registry populated with the configured special types.
    pub fn registry(&self) -> Result<SpecialTypeRegistry> {
        SpecialTypeRegistry::from_types(self.collision_policy, self.special_types.iter().cloned())
            .context("register special types")
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions::new(self.label_prefix.clone()).with_unmapped(self.unmapped_policy)
    }

    /// Attach configured groups to their columns and fold spans.
    pub fn apply_column_groups(&self, columns: &mut [ColumnConfig]) -> Result<()> {
        for setting in &self.column_groups {
            let span = setting
                .span
                .to_span()
                .with_context(|| format!("column group on '{}'", setting.field))?;
            let column = columns
                .iter_mut()
                .find(|column| column.field_name == setting.field)
                .ok_or_else(|| anyhow!("column group names unknown field '{}'", setting.field))?;
            column.group = Some(ColumnGroup::new(setting.label.clone(), span));
        }
        fold_column_groups(columns);
        Ok(())
    }
}

/// Configuration file from the flag, else from `UDF_CONFIG`.
pub fn resolve_config_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf).or_else(|| {
        std::env::var_os(CONFIG_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
}

pub fn parse_config(text: &str) -> Result<EngineConfig> {
    toml::from_str(text).context("parse engine configuration")
}

pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let config = parse_config(&text).with_context(|| format!("in {}", path.display()))?;
    debug!(
        path = %path.display(),
        special_types = config.special_types.len(),
        column_groups = config.column_groups.len(),
        "loaded engine configuration"
    );
    Ok(config)
}

/// Load the resolved configuration file, or defaults when none is given.
pub fn load_or_default(flag: Option<&Path>) -> Result<EngineConfig> {
    match resolve_config_path(flag) {
        Some(path) => load_config(&path),
        None => Ok(EngineConfig::default()),
    }
}
