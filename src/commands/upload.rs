use tracing::info;

use crate::cli::UploadArgs;
use crate::client::ReductoClient;
use crate::error::{CliError, UsageError};
use crate::output::output_json;

pub async fn run(args: UploadArgs) -> Result<(), CliError> {
    if !args.file.exists() {
        return Err(UsageError::FileNotFound(args.file).into());
    }
    if !args.file.is_file() {
        return Err(UsageError::NotAFile(args.file).into());
    }

    let client = ReductoClient::from_env(args.environment)?;
    let result = client.upload(&args.file, args.extension.as_deref()).await?;
    info!(file_id = %result.file_id, "Upload complete");

    output_json(&result)
}
