use serde::Serialize;

#[derive(Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    pub api_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            api_version: env!("CARGO_PKG_VERSION"),
            data: Some(data),
            error: None,
        }
    }
}

impl CliResponse<()> {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            api_version: env!("CARGO_PKG_VERSION"),
            data: None,
            error: Some(message.into()),
        }
    }
}

pub fn output_success<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(&CliResponse::ok(data))?);
    Ok(())
}

/// Prints an error response to stderr and exits with code 1 so shell scripts
/// see the failure.
pub fn output_error(message: &str) -> ! {
    match serde_json::to_string(&CliResponse::failed(message)) {
        Ok(json) => eprintln!("{}", json),
        Err(_) => eprintln!("{}", message),
    }
    std::process::exit(1);
}
