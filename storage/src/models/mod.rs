mod timestamp;
mod usage_record;
mod user_usage;

pub use usage_record::UsageRecord;
pub use user_usage::UserUsage;
