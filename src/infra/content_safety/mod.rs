pub mod azure_client;

pub use azure_client::AzureContentSafetyClient;
