//! Maps the flat `parse` flag set into the nested request payload.
//!
//! Sparse omission is the rule throughout: a leaf is serialized only when the
//! user supplied it, and a group is attached only when at least one of its
//! leaves is present. The API treats a missing group and an explicit default
//! differently, so empty groups are never sent.

use serde::Serialize;

use crate::cli::ParseArgs;
use crate::error::UsageError;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ParseOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhance: Option<EnhanceOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatting: Option<FormattingOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieval: Option<RetrievalOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spreadsheet: Option<SpreadsheetOptions>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct EnhanceOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summarize_figures: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agentic: Option<Vec<AgenticEntry>>,
}

/// One entry in the agentic enhancement list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgenticEntry {
    pub scope: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct FormattingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_page_markers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_tables: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_output_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct RetrievalOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_optimized: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_blocks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunking: Option<ChunkingOptions>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ChunkingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<u32>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SettingsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_range: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_ocr_data: Option<bool>,
    /// The API expects this as a float even though the CLI takes whole seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist_results: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_url_result: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_pdf_metadata: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_file_extension: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SpreadsheetOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_large_tables: Option<SplitLargeTables>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clustering: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SplitLargeTables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

pub fn validate_return_images(values: &[String]) -> Result<(), UsageError> {
    for value in values {
        if value != "figure" && value != "table" {
            return Err(UsageError::InvalidReturnImages(value.clone()));
        }
    }
    Ok(())
}

/// Flatten the supplied flags into the nested request payload.
pub fn build_parse_options(args: &ParseArgs) -> Result<ParseOptions, UsageError> {
    if let Some(values) = &args.settings_return_images {
        validate_return_images(values)?;
    }

    let enhance = build_enhance(args);
    let formatting = build_formatting(args);
    let retrieval = build_retrieval(args);
    let settings = build_settings(args);
    let spreadsheet = build_spreadsheet(args);

    Ok(ParseOptions {
        enhance,
        formatting,
        retrieval,
        settings,
        spreadsheet,
    })
}

fn build_enhance(args: &ParseArgs) -> Option<EnhanceOptions> {
    // Append order table -> figure -> text is part of the request contract.
    let mut agentic = Vec::new();
    if args.enhance_agentic_table == Some(true) {
        agentic.push(AgenticEntry {
            scope: "table",
            prompt: args.enhance_agentic_table_prompt.clone(),
        });
    }
    if args.enhance_agentic_figure == Some(true) {
        agentic.push(AgenticEntry {
            scope: "figure",
            prompt: args.enhance_agentic_figure_prompt.clone(),
        });
    }
    if args.enhance_agentic_text == Some(true) {
        agentic.push(AgenticEntry {
            scope: "text",
            prompt: None,
        });
    }

    let enhance = EnhanceOptions {
        summarize_figures: args.enhance_summarize_figures,
        agentic: if agentic.is_empty() { None } else { Some(agentic) },
    };
    (enhance != EnhanceOptions::default()).then_some(enhance)
}

fn build_formatting(args: &ParseArgs) -> Option<FormattingOptions> {
    let formatting = FormattingOptions {
        add_page_markers: args.formatting_add_page_markers,
        merge_tables: args.formatting_merge_tables,
        table_output_format: args.formatting_table_output_format.clone(),
        include: args.formatting_include.clone(),
    };
    (formatting != FormattingOptions::default()).then_some(formatting)
}

fn build_retrieval(args: &ParseArgs) -> Option<RetrievalOptions> {
    let chunking = ChunkingOptions {
        chunk_mode: args.retrieval_chunking_mode.clone(),
        chunk_size: args.retrieval_chunking_size,
    };
    let retrieval = RetrievalOptions {
        embedding_optimized: args.retrieval_embedding_optimized,
        filter_blocks: args.retrieval_filter_blocks.clone(),
        chunking: (chunking != ChunkingOptions::default()).then_some(chunking),
    };
    (retrieval != RetrievalOptions::default()).then_some(retrieval)
}

fn build_settings(args: &ParseArgs) -> Option<SettingsOptions> {
    let settings = SettingsOptions {
        document_password: args.settings_document_password.clone(),
        page_range: args.settings_page_range.clone(),
        return_images: args.settings_return_images.clone(),
        return_ocr_data: args.settings_return_ocr_data,
        timeout: args.settings_timeout.map(|t| t as f64),
        ocr_system: args.settings_ocr_system.clone(),
        persist_results: args.settings_persist_results,
        force_url_result: args.settings_force_url_result,
        embed_pdf_metadata: args.settings_embed_pdf_metadata,
        force_file_extension: args.settings_force_file_extension.clone(),
    };
    (settings != SettingsOptions::default()).then_some(settings)
}

fn build_spreadsheet(args: &ParseArgs) -> Option<SpreadsheetOptions> {
    let split = SplitLargeTables {
        enabled: args.spreadsheet_split_large_tables,
        size: args.spreadsheet_split_large_tables_size,
    };
    let spreadsheet = SpreadsheetOptions {
        split_large_tables: (split != SplitLargeTables::default()).then_some(split),
        include: args.spreadsheet_include.clone(),
        clustering: args.spreadsheet_clustering.clone(),
        exclude: args.spreadsheet_exclude.clone(),
    };
    (spreadsheet != SpreadsheetOptions::default()).then_some(spreadsheet)
}
