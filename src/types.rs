use crate::constants::{
    DEFAULT_MAX_COLUMNS_PER_TABLE, DEFAULT_MAX_TABLES, MAX_PARTITION_TEMPLATE_ENTRIES,
};
use crate::error::{DedicatedError, Result};
use serde::{Deserialize, Serialize};

/// Database descriptor sent to the management API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    /// Overwritten with the configured database name on creation.
    pub name: String,
    /// 0 means "use the default" (500).
    pub max_tables: u64,
    /// 0 means "use the default" (250).
    pub max_columns_per_table: u64,
    /// Nanoseconds, 0 is infinite.
    pub retention_period: u64,
    #[serde(default)]
    pub partition_template: Vec<PartitionTemplate>,
}

/// One partitioning rule. Serialized with a `type` discriminant and a `value` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum PartitionTemplate {
    /// Partition by the value of a tag.
    Tag(String),
    /// Partition by hashing a tag's value into a fixed number of buckets.
    #[serde(rename = "bucket")]
    TagBucket(TagBucketValue),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagBucketValue {
    pub tag_name: String,
    pub number_of_buckets: u64,
}

impl PartitionTemplate {
    pub fn tag(name: impl Into<String>) -> Self {
        PartitionTemplate::Tag(name.into())
    }

    pub fn tag_bucket(tag_name: impl Into<String>, number_of_buckets: u64) -> Self {
        PartitionTemplate::TagBucket(TagBucketValue {
            tag_name: tag_name.into(),
            number_of_buckets,
        })
    }
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_tables(mut self, max_tables: u64) -> Self {
        self.max_tables = max_tables;
        self
    }

    pub fn max_columns_per_table(mut self, max_columns_per_table: u64) -> Self {
        self.max_columns_per_table = max_columns_per_table;
        self
    }

    pub fn retention_period(mut self, nanos: u64) -> Self {
        self.retention_period = nanos;
        self
    }

    pub fn partition(mut self, entry: PartitionTemplate) -> Self {
        self.partition_template.push(entry);
        self
    }

    /// Checks the partition template bound.
    pub fn validate(&self) -> Result<()> {
        let count = self.partition_template.len();
        if count > MAX_PARTITION_TEMPLATE_ENTRIES {
            return Err(DedicatedError::TooManyPartitionTemplates {
                count,
                max: MAX_PARTITION_TEMPLATE_ENTRIES,
            });
        }
        Ok(())
    }

    /// Replaces zero-valued limits with their defaults. Retention stays as is,
    /// since its default is already 0.
    pub fn with_defaults(mut self) -> Self {
        if self.max_tables == 0 {
            self.max_tables = DEFAULT_MAX_TABLES;
        }
        if self.max_columns_per_table == 0 {
            self.max_columns_per_table = DEFAULT_MAX_COLUMNS_PER_TABLE;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_fill_only_zero_fields() {
        let db = Database::new().with_defaults();
        assert_eq!(db.max_tables, 500);
        assert_eq!(db.max_columns_per_table, 250);
        assert_eq!(db.retention_period, 0);

        let db = Database::new()
            .max_tables(1000)
            .max_columns_per_table(500)
            .retention_period(3_600_000_000_000)
            .with_defaults();
        assert_eq!(db.max_tables, 1000);
        assert_eq!(db.max_columns_per_table, 500);
        assert_eq!(db.retention_period, 3_600_000_000_000);
    }

    #[test]
    fn test_partition_template_wire_format() {
        let db = Database {
            name: "metrics".to_string(),
            max_tables: 500,
            max_columns_per_table: 250,
            retention_period: 0,
            partition_template: vec![
                PartitionTemplate::tag("region"),
                PartitionTemplate::tag_bucket("host", 3),
            ],
        };

        let value = serde_json::to_value(&db).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "metrics",
                "maxTables": 500,
                "maxColumnsPerTable": 250,
                "retentionPeriod": 0,
                "partitionTemplate": [
                    { "type": "tag", "value": "region" },
                    { "type": "bucket", "value": { "tagName": "host", "numberOfBuckets": 3 } }
                ]
            })
        );
    }

    #[test]
    fn test_empty_partition_template_serializes_as_array() {
        let value = serde_json::to_value(Database::new()).unwrap();
        assert_eq!(value["partitionTemplate"], json!([]));
    }

    #[test]
    fn test_partition_template_reads_api_shape() {
        let entry: PartitionTemplate = serde_json::from_value(json!({
            "type": "bucket",
            "value": { "tagName": "host", "numberOfBuckets": 10 }
        }))
        .unwrap();
        assert_eq!(entry, PartitionTemplate::tag_bucket("host", 10));
    }

    #[test]
    fn test_validate_bounds_partition_template() {
        let seven = (0..7).fold(Database::new(), |db, i| {
            db.partition(PartitionTemplate::tag(format!("t{}", i)))
        });
        assert!(seven.validate().is_ok());

        let eight = seven.partition(PartitionTemplate::tag("t7"));
        match eight.validate() {
            Err(DedicatedError::TooManyPartitionTemplates { count, max }) => {
                assert_eq!(count, 8);
                assert_eq!(max, 7);
            }
            other => panic!("expected TooManyPartitionTemplates, got {:?}", other),
        }
    }
}
