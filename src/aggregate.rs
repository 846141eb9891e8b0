//! Grouping of raw count rows into per-user record lists.

use crate::error::{NotifyError, Result};
use crate::types::{EcosystemId, NotificationRecord, RawRow, RoleId, UserId};
use std::collections::HashMap;

/// Group raw rows of one ecosystem by recipient.
///
/// Each user's list keeps its records in the order the rows were seen.
/// A column that does not hold an integer fails the whole batch rather
/// than being read as zero.
pub fn aggregate(
    ecosystem: EcosystemId,
    rows: &[RawRow],
) -> Result<HashMap<UserId, Vec<NotificationRecord>>> {
    let mut by_user: HashMap<UserId, Vec<NotificationRecord>> = HashMap::new();

    for row in rows {
        let recipient = UserId(parse_field("recipient_id", &row.recipient_id)?);
        let role = RoleId(parse_field("role_id", &row.role_id)?);
        let count = parse_field("cnt", &row.cnt)?;

        by_user
            .entry(recipient)
            .or_default()
            .push(NotificationRecord::new(ecosystem, role, count));
    }

    Ok(by_user)
}

fn parse_field(field: &'static str, value: &str) -> Result<i64> {
    value.trim().parse().map_err(|_| NotifyError::Parse {
        field,
        value: value.to_string(),
    })
}
