use crate::cli::VersionArgs;
use crate::client::ReductoClient;
use crate::error::CliError;
use crate::output::output_json;

pub async fn run(args: VersionArgs) -> Result<(), CliError> {
    let client = ReductoClient::from_env(args.environment)?;
    let info = client.api_version().await?;
    output_json(&info)
}
