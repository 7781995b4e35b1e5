/// Defaults applied to zero-valued database settings before creation.
pub const DEFAULT_MAX_TABLES: u64 = 500;
pub const DEFAULT_MAX_COLUMNS_PER_TABLE: u64 = 250;
/// Nanoseconds; 0 means data is kept forever.
pub const DEFAULT_RETENTION_PERIOD: u64 = 0;

/// Upper bound on tags plus tag buckets in a partition template.
pub const MAX_PARTITION_TEMPLATE_ENTRIES: usize = 7;

pub const DEFAULT_MANAGEMENT_API_URL: &str = "https://console.influxdata.com";

// Environment variable names read by `config::*::from_env`
pub const ENV_HOST: &str = "INFLUX_URL";
pub const ENV_TOKEN: &str = "INFLUX_TOKEN";
pub const ENV_DATABASE: &str = "INFLUX_DATABASE";
pub const ENV_MANAGEMENT_TOKEN: &str = "INFLUX_MANAGEMENT_TOKEN";
pub const ENV_ACCOUNT_ID: &str = "INFLUX_ACCOUNT_ID";
pub const ENV_CLUSTER_ID: &str = "INFLUX_CLUSTER_ID";
pub const ENV_MANAGEMENT_URL: &str = "INFLUX_MANAGEMENT_URL";

/// Path of the database collection for an account's cluster.
pub fn databases_path(account_id: &str, cluster_id: &str) -> String {
    format!("/api/v0/accounts/{}/clusters/{}/databases", account_id, cluster_id)
}
