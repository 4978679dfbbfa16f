use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::ParseArgs;
use crate::client::ReductoClient;
use crate::error::CliError;
use crate::options::build_parse_options;
use crate::output::{is_local_file, save_json_to_file};
use crate::poll::poll_job;

/// Full parse flow: build options, upload local input, submit the job, poll
/// to completion, write the result to disk.
pub async fn run(args: ParseArgs) -> Result<(), CliError> {
    // Flag validation happens before any network call.
    let options = build_parse_options(&args)?;
    let client = ReductoClient::from_env(args.environment)?;

    // Local files are uploaded first; URLs and reducto:// references pass
    // through unchanged.
    let input_is_local = is_local_file(&args.input);
    let parse_input = if input_is_local {
        let upload = client.upload(Path::new(&args.input), None).await?;
        info!(file_id = %upload.file_id, "Uploaded input file");
        upload.file_id
    } else {
        args.input.clone()
    };

    let job = client.create_parse_job(&parse_input, &options).await?;
    info!(job_id = %job.job_id, "Parse job created");

    let result = poll_job(&client, &job.job_id, args.settings_timeout).await?;

    let output_path = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input, input_is_local, &job.job_id));
    save_json_to_file(&result, &output_path)?;
    eprintln!("\u{2713} Saved to {}", output_path.display());

    Ok(())
}

/// `<stem>.json` for local inputs, `reducto_<job_id>.json` otherwise.
fn default_output_path(input: &str, input_is_local: bool, job_id: &str) -> PathBuf {
    if input_is_local {
        let stem = Path::new(input)
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy();
        PathBuf::from(format!("{stem}.json"))
    } else {
        PathBuf::from(format!("reducto_{job_id}.json"))
    }
}
