use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, info_span};

use udf_codec::{param_map_to_json, to_dynamic_model, to_param_map};
use udf_compile::{
    FormCompiler, OptionCatalog, UnmappedPolicy, ValidationIssue, validate_model,
};
use udf_model::{DynamicModel, ParamMap};
use udf_table::{
    ColumnConfig, FilterService, SortKey, SortedOptionList, TranslationCache, compile_columns,
    resolve_visibility, set_visible, sort_rows,
};
use udf_cli::args::{parse_filter, parse_option_source, parse_seed};
use udf_cli::config::{EngineConfig, load_or_default};
use udf_cli::loaders::{
    OptionRow, load_class, load_model, load_options, load_params, load_rows, load_translations,
};

use crate::cli::{
    ColumnsArgs, CompileArgs, DecodeArgs, EncodeArgs, OptionsArgs, OutputArgs, OutputFormatArg,
};
use crate::summary::{
    print_columns, print_compiled, print_issues, print_model, print_options, print_rows,
    print_special_types,
};

fn load_engine_config(flag: Option<&Path>) -> Result<EngineConfig> {
    load_or_default(flag).context("load engine configuration")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn run_compile(args: &CompileArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_engine_config(config_path)?;
    let class = load_class(&args.class_file)?;
    let _span = info_span!("compile", class = %class.name).entered();

    let mut options = config.compile_options();
    if let Some(prefix) = &args.label_prefix {
        options.label_prefix.clone_from(prefix);
    }
    if args.fail_on_unmapped {
        options.unmapped = UnmappedPolicy::FailFast;
    }
    options.catalog = load_catalog(&args.options)?;
    let compiled = FormCompiler::new(options)
        .compile(&class)
        .with_context(|| format!("compile class {}", class.name))?;
    info!(entries = compiled.len(), "compiled form");

    match args.output.format {
        OutputFormatArg::Table => print_compiled(&class.name, &compiled),
        OutputFormatArg::Json => print_json(&compiled)?,
    }
    Ok(())
}

fn sorted_options(rows: &[OptionRow]) -> SortedOptionList {
    let mut options = SortedOptionList::new();
    for row in rows {
        options.insert_parts(
            row.key.clone(),
            row.category.as_deref(),
            row.sub_category.as_deref(),
            row.kind.as_deref(),
        );
    }
    options
}

fn load_catalog(sources: &[String]) -> Result<OptionCatalog> {
    let mut catalog = OptionCatalog::new();
    for source in sources {
        let (enum_type, path) = parse_option_source(source)?;
        let options = sorted_options(&load_options(&path)?);
        info!(enum_type = %enum_type, options = options.len(), "loaded option list");
        catalog = catalog.with_list(enum_type, options);
    }
    Ok(catalog)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ColumnsReport<'a> {
    columns: &'a [ColumnConfig],
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<Vec<&'a DynamicModel>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pending_translations: BTreeMap<&'a str, Vec<&'a str>>,
}

pub fn run_columns(args: &ColumnsArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_engine_config(config_path)?;
    let registry = config.registry()?;
    let class = load_class(&args.class_file)?;
    let _span = info_span!("columns", class = %class.name).entered();

    let header_prefix = args
        .header_prefix
        .as_deref()
        .unwrap_or(&config.header_prefix);
    let mut columns = compile_columns(&class.fields, header_prefix)
        .with_context(|| format!("compile columns for {}", class.name))?;
    config.apply_column_groups(&mut columns)?;
    let changed = resolve_visibility(&mut columns, &config.visibility, &registry);
    for field in &args.hide {
        set_visible(&mut columns, field, false)?;
    }
    info!(
        columns = columns.len(),
        visibility_changes = changed,
        "compiled columns"
    );

    let sort_keys = args
        .sort
        .iter()
        .map(|key| key.parse::<SortKey>().map_err(|e| anyhow!(e)))
        .collect::<Result<Vec<_>>>()?;
    let filters = args
        .filter
        .iter()
        .map(|arg| parse_filter(arg))
        .collect::<Result<Vec<_>>>()?;

    let mut cache = TranslationCache::new();
    let mut rows = match &args.rows {
        Some(path) => Some(load_rows(path)?),
        None => None,
    };
    if let Some(rows) = rows.as_mut() {
        let translations = match &args.translations {
            Some(path) => load_translations(path)?,
            None => BTreeMap::new(),
        };
        let requested = cache.warm(&columns, rows, &translations);
        info!(rows = rows.len(), requested, "resolved translations");
        sort_rows(rows, &sort_keys, &columns, &cache);
    } else if !sort_keys.is_empty() || !filters.is_empty() {
        return Err(anyhow!("--sort and --filter need --rows"));
    }

    let service = FilterService::default();
    let shown = match rows.as_deref() {
        Some(rows) => Some(service.filter_rows(rows, &filters, &columns, &cache)?),
        None => None,
    };

    match args.output.format {
        OutputFormatArg::Table => {
            print_columns(&columns);
            if let Some(shown) = &shown {
                print_rows(&columns, shown, &cache);
            }
        }
        OutputFormatArg::Json => {
            let pending_translations = columns
                .iter()
                .filter(|column| column.translate.is_some())
                .map(|column| {
                    (
                        column.field_name.as_str(),
                        cache.pending(&column.field_name),
                    )
                })
                .filter(|(_, pending)| !pending.is_empty())
                .collect();
            print_json(&ColumnsReport {
                columns: &columns,
                rows: shown,
                pending_translations,
            })?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct DecodeReport<'a> {
    model: &'a DynamicModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    issues: Option<&'a [ValidationIssue]>,
}

/// Decode a parameter map. Returns the validation issues when `--validate`
/// was given.
pub fn run_decode(
    args: &DecodeArgs,
    config_path: Option<&Path>,
) -> Result<Vec<ValidationIssue>> {
    let class = load_class(&args.class_file)?;
    let params = load_params(&args.params_file)?;
    let seed = args.seed.as_deref().map(parse_seed).transpose()?;
    let model = to_dynamic_model(
        &class.fields,
        &params,
        seed.as_ref()
            .map(|(field, value)| (field.as_str(), value.clone())),
    )
    .with_context(|| format!("decode parameters for {}", class.name))?;

    let issues = if args.validate {
        let config = load_engine_config(config_path)?;
        let compiled = FormCompiler::new(config.compile_options())
            .compile(&class)
            .with_context(|| format!("compile class {}", class.name))?;
        let today = match &args.today {
            Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .with_context(|| format!("invalid --today '{text}'"))?,
            None => chrono::Local::now().date_naive(),
        };
        let issues = validate_model(&compiled, &model, today);
        info!(issues = issues.len(), %today, "validated model");
        Some(issues)
    } else {
        None
    };

    match args.output.format {
        OutputFormatArg::Table => {
            print_model(&model);
            if let Some(issues) = &issues {
                print_issues(issues);
            }
        }
        OutputFormatArg::Json => print_json(&DecodeReport {
            model: &model,
            issues: issues.as_deref(),
        })?,
    }
    Ok(issues.unwrap_or_default())
}

pub fn run_encode(args: &EncodeArgs) -> Result<()> {
    let class = load_class(&args.class_file)?;
    let model = load_model(&args.model_file)?;
    let params: ParamMap = to_param_map(&class.fields, &model)
        .with_context(|| format!("encode model for {}", class.name))?;
    info!(params = params.len(), "encoded model");
    println!("{}", param_map_to_json(&params, true)?);
    Ok(())
}

pub fn run_options(args: &OptionsArgs) -> Result<()> {
    let rows = load_options(&args.options_file)?;
    let options = sorted_options(&rows);
    info!(rows = rows.len(), options = options.len(), "sorted options");
    match args.output.format {
        OutputFormatArg::Table => print_options(&options),
        OutputFormatArg::Json => print_json(options.as_slice())?,
    }
    Ok(())
}

pub fn run_special_types(args: &OutputArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_engine_config(config_path)?;
    let registry = config.registry()?;
    let types = registry.get_all();
    match args.format {
        OutputFormatArg::Table => print_special_types(&types),
        OutputFormatArg::Json => print_json(&types)?,
    }
    Ok(())
}
