// Headers used in azure storage services.
pub const X_MS_DATE: &str = "x-ms-date";
pub const X_MS_HEADER_PREFIX: &str = "x-ms-";

// Env values used in azure storage services.
pub const AZURE_STORAGE_ACCOUNT: &str = "AZURE_STORAGE_ACCOUNT";
pub const AZURE_STORAGE_ACCOUNT_NAME: &str = "AZURE_STORAGE_ACCOUNT_NAME";
pub const AZURE_STORAGE_ACCESS_KEY: &str = "AZURE_STORAGE_ACCESS_KEY";
pub const AZURE_STORAGE_ACCOUNT_KEY: &str = "AZURE_STORAGE_ACCOUNT_KEY";
pub const AZURE_STORAGE_CONNECTION_STRING: &str = "AZURE_STORAGE_CONNECTION_STRING";

// Local storage emulator.
pub const DEVSTORE_ACCOUNT: &str = "devstoreaccount1";
pub const DEVSTORE_SECRET_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
pub const DEVSTORE_BLOB_HOST: &str = "127.0.0.1:10000";
pub const DEVSTORE_QUEUE_HOST: &str = "127.0.0.1:10001";
pub const DEVSTORE_TABLE_HOST: &str = "127.0.0.1:10002";

pub const CLOUD_BLOB_HOST: &str = "blob.core.windows.net";
pub const CLOUD_QUEUE_HOST: &str = "queue.core.windows.net";
pub const CLOUD_TABLE_HOST: &str = "table.core.windows.net";
