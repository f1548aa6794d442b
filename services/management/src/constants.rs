// Headers used by the service management API.
pub const X_MS_VERSION: &str = "x-ms-version";
pub const X_MS_REQUEST_ID: &str = "x-ms-request-id";

// Env values used by the service management API.
pub const AZURE_SUBSCRIPTION_ID: &str = "AZURE_SUBSCRIPTION_ID";
pub const AZURE_MANAGEMENT_CERT: &str = "AZURE_MANAGEMENT_CERT";
pub const AZURE_MANAGEMENT_ENDPOINT: &str = "AZURE_MANAGEMENT_ENDPOINT";

pub const DEFAULT_ENDPOINT: &str = "https://management.core.windows.net";
pub const DEFAULT_API_VERSION: &str = "2011-10-01";

pub const CONTENT_TYPE_XML: &str = "application/xml";
