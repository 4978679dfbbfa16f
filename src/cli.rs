use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::environment::Environment;

#[derive(Parser, Debug)]
#[command(name = "reducto")]
#[command(about = "A CLI wrapper for the Reducto API", arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a document: uploads local files, submits an async job, polls
    /// until completion, and writes the result to a JSON file
    Parse(ParseArgs),
    /// Upload a file and print the returned file reference
    Upload(UploadArgs),
    /// Print API version information
    Version(VersionArgs),
}

#[derive(Args, Debug, Default)]
pub struct ParseArgs {
    /// Input: file path, URL, or reducto:// prefix
    pub input: String,

    /// API environment to use
    #[arg(long, value_enum, default_value_t = Environment::Production)]
    pub environment: Environment,

    // Enhance options
    /// Summarize figures using a vision language model
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub enhance_summarize_figures: Option<bool>,

    /// Enable table agentic enhancement
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub enhance_agentic_table: Option<bool>,

    /// Custom prompt for table agentic
    #[arg(long)]
    pub enhance_agentic_table_prompt: Option<String>,

    /// Enable figure agentic enhancement
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub enhance_agentic_figure: Option<bool>,

    /// Custom prompt for figure agentic
    #[arg(long)]
    pub enhance_agentic_figure_prompt: Option<String>,

    /// Enable text agentic enhancement
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub enhance_agentic_text: Option<bool>,

    // Formatting options
    /// Add page markers to output
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub formatting_add_page_markers: Option<bool>,

    /// Merge consecutive tables with the same column count
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub formatting_merge_tables: Option<bool>,

    /// Table output format: html, json, md, jsonbbox, dynamic, csv
    #[arg(long)]
    pub formatting_table_output_format: Option<String>,

    /// Formatting to include: change_tracking, highlight, comments
    #[arg(long)]
    pub formatting_include: Option<Vec<String>>,

    // Retrieval options
    /// Use embedding optimized mode
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub retrieval_embedding_optimized: Option<bool>,

    /// Block types to filter out (e.g., Header, Footer, Table)
    #[arg(long)]
    pub retrieval_filter_blocks: Option<Vec<String>>,

    /// Chunking mode: variable, section, page, disabled, block, page_sections
    #[arg(long)]
    pub retrieval_chunking_mode: Option<String>,

    /// Approximate chunk size in characters
    #[arg(long)]
    pub retrieval_chunking_size: Option<u32>,

    // Spreadsheet options
    /// Split large tables into smaller tables
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub spreadsheet_split_large_tables: Option<bool>,

    /// Row count to split large tables at
    #[arg(long)]
    pub spreadsheet_split_large_tables_size: Option<u32>,

    /// Include options: cell_colors, formula
    #[arg(long)]
    pub spreadsheet_include: Option<Vec<String>>,

    /// Table clustering mode: accurate, fast, disabled
    #[arg(long)]
    pub spreadsheet_clustering: Option<String>,

    /// Exclude options: hidden_sheets, hidden_rows, hidden_cols
    #[arg(long)]
    pub spreadsheet_exclude: Option<Vec<String>>,

    // Settings options
    /// Password for password-protected documents
    #[arg(long)]
    pub settings_document_password: Option<String>,

    /// Page range to process (1-indexed, repeat the flag per page)
    #[arg(long)]
    pub settings_page_range: Option<Vec<u32>>,

    /// Return images for block types ('figure' or 'table'), repeatable
    #[arg(long)]
    pub settings_return_images: Option<Vec<String>>,

    /// Return OCR data in the result
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub settings_return_ocr_data: Option<bool>,

    /// Timeout in seconds (also used for CLI job polling timeout)
    #[arg(long)]
    pub settings_timeout: Option<u64>,

    /// OCR system: standard (best multilingual) or legacy
    #[arg(long)]
    pub settings_ocr_system: Option<String>,

    /// Persist results indefinitely
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub settings_persist_results: Option<bool>,

    /// Force result to be returned as a URL
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub settings_force_url_result: Option<bool>,

    /// Embed OCR metadata into the returned PDF
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub settings_embed_pdf_metadata: Option<bool>,

    /// Force URL to be downloaded as a specific file extension
    #[arg(long)]
    pub settings_force_file_extension: Option<String>,

    /// Output file path (default: {basename}.json for files,
    /// reducto_{job_id}.json for URLs)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Path to the file to upload
    pub file: PathBuf,

    /// Force file extension (e.g., pdf, docx)
    #[arg(long)]
    pub extension: Option<String>,

    /// API environment to use
    #[arg(long, value_enum, default_value_t = Environment::Production)]
    pub environment: Environment,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// API environment to use
    #[arg(long, value_enum, default_value_t = Environment::Production)]
    pub environment: Environment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::parse_from(["reducto", "parse", "doc.pdf"]);
        match cli.command {
            Command::Parse(args) => {
                assert_eq!(args.input, "doc.pdf");
                assert_eq!(args.environment, Environment::Production);
                assert!(args.enhance_summarize_figures.is_none());
                assert!(args.output.is_none());
            }
            _ => panic!("expected parse command"),
        }
    }

    #[test]
    fn test_tristate_bool_flags() {
        let cli = Cli::parse_from([
            "reducto",
            "parse",
            "doc.pdf",
            "--enhance-summarize-figures",
            "--formatting-merge-tables",
            "false",
        ]);
        match cli.command {
            Command::Parse(args) => {
                assert_eq!(args.enhance_summarize_figures, Some(true));
                assert_eq!(args.formatting_merge_tables, Some(false));
                assert!(args.formatting_add_page_markers.is_none());
            }
            _ => panic!("expected parse command"),
        }
    }

    #[test]
    fn test_repeatable_list_flags() {
        let cli = Cli::parse_from([
            "reducto",
            "parse",
            "doc.pdf",
            "--settings-page-range",
            "1",
            "--settings-page-range",
            "5",
            "--settings-return-images",
            "figure",
            "--settings-return-images",
            "table",
        ]);
        match cli.command {
            Command::Parse(args) => {
                assert_eq!(args.settings_page_range, Some(vec![1, 5]));
                assert_eq!(
                    args.settings_return_images,
                    Some(vec!["figure".to_string(), "table".to_string()])
                );
            }
            _ => panic!("expected parse command"),
        }
    }

    #[test]
    fn test_upload_command() {
        let cli = Cli::parse_from([
            "reducto",
            "upload",
            "doc.pdf",
            "--extension",
            "pdf",
            "--environment",
            "eu",
        ]);
        match cli.command {
            Command::Upload(args) => {
                assert_eq!(args.file, PathBuf::from("doc.pdf"));
                assert_eq!(args.extension.as_deref(), Some("pdf"));
                assert_eq!(args.environment, Environment::Eu);
            }
            _ => panic!("expected upload command"),
        }
    }
}
